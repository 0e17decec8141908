// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Exponential current synapses
//!
//! A presynaptic spike adds the synapse weight to its current; between spikes the
//! current decays as `I(t+dt) = I(t) × exp(-dt / tau)`.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SynapseType {
    Excitatory,
    Inhibitory,
}

impl SynapseType {
    pub fn from_weight(weight: f64) -> Self {
        if weight < 0.0 {
            SynapseType::Inhibitory
        } else {
            SynapseType::Excitatory
        }
    }
}

/// Per-step multiplicative decay of a synaptic current with time constant `tau`
#[inline]
pub fn decay_factor(tau: f64, dt: f64) -> f64 {
    (-dt / tau).exp()
}
