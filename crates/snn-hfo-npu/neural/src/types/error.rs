// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Error types for neural computation

use super::ids::NeuronId;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum NeuralError {
    #[error("Array size mismatch: expected {expected}, got {actual}")]
    ArraySizeMismatch { expected: usize, actual: usize },

    #[error("Invalid neuron ID: {id} (group has {size} neurons)")]
    InvalidNeuronId { id: NeuronId, size: usize },

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("spike times must be finite and non-decreasing (index {index})")]
    UnsortedSpikeTrain { index: usize },
}

pub type Result<T> = core::result::Result<T, NeuralError>;
