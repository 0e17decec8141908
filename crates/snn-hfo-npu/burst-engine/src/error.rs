// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Error types for the simulation engine

use snn_hfo_config::ConfigError;
use snn_hfo_npu_neural::NeuralError;

#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("a transient subnetwork is already attached to network {network_id}")]
    SubnetworkAlreadyAttached { network_id: u64 },

    #[error("subnetwork handle belongs to network {actual}, not network {expected}")]
    ForeignSubnetwork { expected: u64, actual: u64 },

    #[error("network {network_id} has no checkpoint to restore")]
    NoCheckpoint { network_id: u64 },

    #[error("checkpoint holds {actual} neurons but the hidden population has {expected}")]
    CheckpointMismatch { expected: usize, actual: usize },

    #[error("simulation duration must be positive and finite, got {0}")]
    InvalidDuration(f64),

    #[error("input layer expects {expected} neurons, got {actual}")]
    InputCountMismatch { expected: usize, actual: usize },

    #[error(transparent)]
    Neural(#[from] NeuralError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

pub type Result<T> = std::result::Result<T, EngineError>;
