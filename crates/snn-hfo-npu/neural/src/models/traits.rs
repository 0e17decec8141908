// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Traits every neuron model implements

/// Parameter set of a neuron model
pub trait ModelParameters: Clone + core::fmt::Debug {
    /// Check physical plausibility
    fn validate(&self) -> Result<(), &'static str>;

    /// Number of scalar parameters
    fn parameter_count() -> usize;
}

/// Continuous-time neuron model integrated with a fixed timestep
pub trait NeuronModel: Clone + core::fmt::Debug + Send {
    type Parameters: ModelParameters;

    fn model_name(&self) -> &'static str;

    /// Advance the membrane potential by `dt` seconds under `input_current`
    fn update_membrane_potential(
        &self,
        membrane_potential: f64,
        input_current: f64,
        params: &Self::Parameters,
        dt: f64,
    ) -> f64;

    /// `refractory_remaining` is the time left (seconds) before the neuron may fire again
    fn should_fire(&self, membrane_potential: f64, params: &Self::Parameters, refractory_remaining: f64) -> bool;

    /// Membrane potential right after a spike
    fn reset_after_fire(&self, params: &Self::Parameters) -> f64;

    /// Membrane potential of a freshly created neuron
    fn initial_potential(&self, params: &Self::Parameters) -> f64;

    /// Refractory time started by a spike
    fn refractory_period(&self, params: &Self::Parameters) -> f64;
}
