// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Synapse parameter generation
//!
//! Synapses are laid out source-major: synapse `k` connects input `k / hidden`
//! to hidden neuron `k % hidden`. Every source must produce the same values on
//! every call so that repeated simulations of one input are identical.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::types::{NeuralError, NeuronCount, Result};

/// Weights and decay time constants (seconds) for the all-to-all input synapses
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SynapseParameters {
    pub weights: Vec<f64>,
    pub taus: Vec<f64>,
}

impl SynapseParameters {
    /// # Errors
    /// `ArraySizeMismatch` when either vector is not `input × hidden` long,
    /// `InvalidParameter` for a non-positive time constant.
    pub fn validate(&self, counts: &NeuronCount) -> Result<()> {
        let expected = counts.synapse_count();
        for actual in [self.weights.len(), self.taus.len()] {
            if actual != expected {
                return Err(NeuralError::ArraySizeMismatch { expected, actual });
            }
        }
        if let Some(tau) = self.taus.iter().find(|tau| !(tau.is_finite() && **tau > 0.0)) {
            return Err(NeuralError::InvalidParameter(format!(
                "synapse time constant must be positive, got {}",
                tau
            )));
        }
        Ok(())
    }
}

/// Anything that can produce input synapse parameters for a given layer size
pub trait SynapseParameterSource: Send {
    fn generate(&self, counts: &NeuronCount) -> Result<SynapseParameters>;
}

/// Deterministic random parameters.
///
/// Even inputs (`up` channels) excite and odd inputs (`down` channels) inhibit with a
/// weight magnitude drawn uniformly from `[weight_min, weight_max]`. Time constants
/// are spread linearly over the hidden layer, in opposite order for odd inputs, so
/// each hidden neuron sees a different pair of time scales.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeededParameterGenerator {
    pub seed: u64,
    pub weight_min: f64,
    pub weight_max: f64,
    pub tau_min_ms: f64,
    pub tau_max_ms: f64,
}

impl SeededParameterGenerator {
    pub fn new(seed: u64, weight_range: (f64, f64), tau_range_ms: (f64, f64)) -> Self {
        Self {
            seed,
            weight_min: weight_range.0,
            weight_max: weight_range.1,
            tau_min_ms: tau_range_ms.0,
            tau_max_ms: tau_range_ms.1,
        }
    }

    fn tau_ms(&self, hidden_index: usize, hidden: usize, reversed: bool) -> f64 {
        if hidden == 1 {
            return self.tau_min_ms;
        }
        let position = if reversed { hidden - 1 - hidden_index } else { hidden_index };
        let fraction = position as f64 / (hidden - 1) as f64;
        self.tau_min_ms + fraction * (self.tau_max_ms - self.tau_min_ms)
    }
}

impl SynapseParameterSource for SeededParameterGenerator {
    fn generate(&self, counts: &NeuronCount) -> Result<SynapseParameters> {
        if self.weight_min > self.weight_max || self.tau_min_ms > self.tau_max_ms {
            return Err(NeuralError::InvalidParameter(format!(
                "inverted synapse ranges: weight [{}, {}], tau [{}, {}] ms",
                self.weight_min, self.weight_max, self.tau_min_ms, self.tau_max_ms
            )));
        }

        // Fresh generator per call keeps every invocation identical
        let mut rng = StdRng::seed_from_u64(self.seed);
        let hidden = counts.hidden();
        let mut weights = Vec::with_capacity(counts.synapse_count());
        let mut taus = Vec::with_capacity(counts.synapse_count());

        for input in 0..counts.input() {
            let inhibitory = input % 2 == 1;
            for h in 0..hidden {
                let magnitude = rng.gen_range(self.weight_min..=self.weight_max);
                weights.push(if inhibitory { -magnitude } else { magnitude });
                taus.push(self.tau_ms(h, hidden, inhibitory) * 1e-3);
            }
        }

        let parameters = SynapseParameters { weights, taus };
        parameters.validate(counts)?;
        Ok(parameters)
    }
}

/// Caller-supplied parameters, returned unchanged on every call
#[derive(Debug, Clone, PartialEq)]
pub struct FixedParameters(pub SynapseParameters);

impl SynapseParameterSource for FixedParameters {
    fn generate(&self, counts: &NeuronCount) -> Result<SynapseParameters> {
        self.0.validate(counts)?;
        Ok(self.0.clone())
    }
}
