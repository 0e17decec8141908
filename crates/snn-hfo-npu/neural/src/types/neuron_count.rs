// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

use serde::{Deserialize, Serialize};

use super::error::{NeuralError, Result};

/// Sizes of the input and hidden layers, fixed for the lifetime of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NeuronCount {
    input: usize,
    hidden: usize,
}

impl NeuronCount {
    pub fn new(input: usize, hidden: usize) -> Result<Self> {
        if input == 0 || hidden == 0 {
            return Err(NeuralError::InvalidParameter(format!(
                "neuron counts must be positive (input={}, hidden={})",
                input, hidden
            )));
        }
        Ok(Self { input, hidden })
    }

    pub fn input(&self) -> usize {
        self.input
    }

    pub fn hidden(&self) -> usize {
        self.hidden
    }

    /// All-to-all input to hidden connectivity
    pub fn synapse_count(&self) -> usize {
        self.input * self.hidden
    }
}
