// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! # LIF (Leaky Integrate-and-Fire) Neuron Model
//!
//! Current-based LIF used for the hidden population.
//!
//! ## Model Dynamics
//!
//! ```text
//! Membrane Potential Update (forward Euler):
//!     V(t+dt) = V(t) + dt / tau_m × (V_rest - V(t) + I_syn)
//!
//!     Where:
//!     - tau_m = membrane time constant (s)
//!     - I_syn = summed synaptic current, in units of potential
//!
//! Firing Check:
//!     if refractory time remains:
//!         Skip
//!     else if V ≥ threshold:
//!         FIRE, set V = V_reset, start refractory period
//! ```

use super::traits::{ModelParameters, NeuronModel};

#[derive(Debug, Clone, Copy)]
pub struct LIFModel;

impl LIFModel {
    pub fn new() -> Self {
        Self
    }
}

impl Default for LIFModel {
    fn default() -> Self {
        Self::new()
    }
}

impl NeuronModel for LIFModel {
    type Parameters = LIFParameters;

    fn model_name(&self) -> &'static str {
        "Leaky Integrate-and-Fire (LIF)"
    }

    #[inline(always)]
    fn update_membrane_potential(
        &self,
        membrane_potential: f64,
        input_current: f64,
        params: &LIFParameters,
        dt: f64,
    ) -> f64 {
        membrane_potential
            + dt / params.membrane_tau * (params.resting_potential - membrane_potential + input_current)
    }

    #[inline(always)]
    fn should_fire(&self, membrane_potential: f64, params: &LIFParameters, refractory_remaining: f64) -> bool {
        refractory_remaining <= 0.0 && membrane_potential >= params.threshold
    }

    #[inline(always)]
    fn reset_after_fire(&self, params: &LIFParameters) -> f64 {
        params.reset_potential
    }

    fn initial_potential(&self, params: &LIFParameters) -> f64 {
        params.resting_potential
    }

    fn refractory_period(&self, params: &LIFParameters) -> f64 {
        params.refractory_period
    }
}

/// LIF model-specific parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LIFParameters {
    /// Membrane time constant in seconds
    pub membrane_tau: f64,
    pub resting_potential: f64,
    pub reset_potential: f64,
    pub threshold: f64,
    /// Seconds during which a neuron cannot fire after a spike
    pub refractory_period: f64,
}

impl Default for LIFParameters {
    fn default() -> Self {
        Self {
            membrane_tau: 0.02,
            resting_potential: 0.0,
            reset_potential: 0.0,
            threshold: 1.0,
            refractory_period: 0.001,
        }
    }
}

impl ModelParameters for LIFParameters {
    fn validate(&self) -> Result<(), &'static str> {
        if !(self.membrane_tau > 0.0) {
            return Err("LIF: membrane time constant must be positive");
        }
        if self.threshold <= self.reset_potential {
            return Err("LIF: threshold must be above the reset potential");
        }
        if self.refractory_period < 0.0 {
            return Err("LIF: refractory period must not be negative");
        }
        Ok(())
    }

    fn parameter_count() -> usize {
        5
    }
}
