// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! # Simulation Core
//!
//! Drives one `Network` across many sequential invocations.
//!
//! ## State machine
//! ```text
//! Uninitialized --first invoke--> Ready (hidden population + monitor built, checkpoint stored)
//! Ready --invoke--> restore -> attach transient -> run -> detach -> Ready
//! ```
//! The persistent population is built exactly once. Every invocation starts from
//! the checkpoint, so the monitor returned by `invoke` only holds spikes caused by
//! that invocation's input.

use snn_hfo_config::{validate_config, Configuration, NetworkConfig};
use snn_hfo_npu_neural::{
    concatenate_band_spikes, BandSpikes, LIFModel, LIFParameters, NeuronCount, SeededParameterGenerator,
    SynapseParameterSource,
};
use tracing::{debug, info};

use crate::error::{EngineError, Result};
use crate::input::SpikeGeneratorGroup;
use crate::monitor::SpikeMonitor;
use crate::network::{Network, TransientSubnetwork};
use crate::neuron_group::NeuronGroup;
use crate::synapses::Synapses;

/// Layer sizes for a run: input from the measurement mode, hidden from configuration
pub fn read_neuron_counts(configuration: &Configuration) -> Result<NeuronCount> {
    Ok(NeuronCount::new(
        configuration.measurement_mode.input_neuron_count(),
        configuration.hidden_neuron_count,
    )?)
}

/// Timestep and hidden neuron parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NetworkModel {
    pub dt: f64,
    pub neuron: LIFParameters,
}

impl NetworkModel {
    pub fn from_config(config: &NetworkConfig) -> Self {
        let neuron = &config.neuron;
        Self {
            dt: config.dt,
            neuron: LIFParameters {
                membrane_tau: neuron.membrane_tau,
                resting_potential: neuron.resting_potential,
                reset_potential: neuron.reset_potential,
                threshold: neuron.threshold,
                refractory_period: neuron.refractory_period,
            },
        }
    }
}

#[derive(Debug)]
pub enum CoreState {
    Uninitialized,
    Ready(Box<Network<LIFModel>>),
}

impl CoreState {
    pub fn is_ready(&self) -> bool {
        matches!(self, CoreState::Ready(_))
    }

    fn network(&self) -> Option<&Network<LIFModel>> {
        match self {
            CoreState::Ready(network) => Some(network.as_ref()),
            CoreState::Uninitialized => None,
        }
    }
}

pub struct SimulationCore {
    neuron_counts: NeuronCount,
    model: NetworkModel,
    parameter_source: Box<dyn SynapseParameterSource>,
    state: CoreState,
    invocations: u64,
}

impl SimulationCore {
    /// Validate the configuration and derive layer sizes. No network object is
    /// built until the first invocation.
    ///
    /// # Errors
    /// `EngineError::Config` for an invalid configuration.
    pub fn new(configuration: &Configuration, parameter_source: Box<dyn SynapseParameterSource>) -> Result<Self> {
        validate_config(configuration)?;
        let neuron_counts = read_neuron_counts(configuration)?;
        debug!(
            "[SNN-CORE] {} mode: {} input neurons, {} hidden neurons",
            configuration.measurement_mode,
            neuron_counts.input(),
            neuron_counts.hidden()
        );
        Ok(Self {
            neuron_counts,
            model: NetworkModel::from_config(&configuration.network),
            parameter_source,
            state: CoreState::Uninitialized,
            invocations: 0,
        })
    }

    /// Core using seeded random synapse parameters from `configuration.network`
    pub fn from_config(configuration: &Configuration) -> Result<Self> {
        let network = &configuration.network;
        let generator = SeededParameterGenerator::new(
            network.seed,
            (network.synapse.weight_min, network.synapse.weight_max),
            (network.synapse.tau_min_ms, network.synapse.tau_max_ms),
        );
        Self::new(configuration, Box::new(generator))
    }

    pub fn neuron_counts(&self) -> NeuronCount {
        self.neuron_counts
    }

    pub fn state(&self) -> &CoreState {
        &self.state
    }

    pub fn invocations(&self) -> u64 {
        self.invocations
    }

    /// Identity of the persistent network, once built
    pub fn network_id(&self) -> Option<u64> {
        self.state.network().map(Network::id)
    }

    /// Monitor of the most recent invocation
    pub fn monitor(&self) -> Option<&SpikeMonitor> {
        self.state.network().map(Network::monitor)
    }

    /// Simulate `duration` seconds of the hidden population driven by `bands`.
    ///
    /// `bands` holds one `BandSpikes` per frequency band of the measurement mode;
    /// band `k` feeds input neurons `2k` (up) and `2k + 1` (down).
    pub fn invoke(&mut self, bands: &[BandSpikes], duration: f64) -> Result<&SpikeMonitor> {
        if !(duration.is_finite() && duration > 0.0) {
            return Err(EngineError::InvalidDuration(duration));
        }
        let counts = self.neuron_counts;
        if bands.len() * 2 != counts.input() {
            return Err(EngineError::InputCountMismatch {
                expected: counts.input(),
                actual: bands.len() * 2,
            });
        }

        let dt = self.model.dt;
        let train = concatenate_band_spikes(bands);
        let params = self.parameter_source.generate(&counts)?;
        let input = SpikeGeneratorGroup::new(counts.input(), &train, dt)?;
        let synapses = Synapses::new(counts, &params, dt)?;
        let transient = TransientSubnetwork::new(input, synapses)?;

        if !self.state.is_ready() {
            self.state = CoreState::Ready(build_persistent_network(&self.model, counts)?);
        }
        let CoreState::Ready(network) = &mut self.state else {
            unreachable!("persistent network is built above");
        };

        network.restore()?;
        let token = network.attach(transient)?;
        let run_result = network.run(duration);
        network.detach(token)?;
        let steps = run_result?;

        self.invocations += 1;
        debug!(
            "[SNN-CORE] invocation {}: {} input spikes, {} steps, {} hidden spikes",
            self.invocations,
            train.len(),
            steps,
            network.monitor().spike_count()
        );
        Ok(network.monitor())
    }
}

/// Hidden population and monitor, checkpointed before any input exists
fn build_persistent_network(model: &NetworkModel, counts: NeuronCount) -> Result<Box<Network<LIFModel>>> {
    info!(
        "[SNN-CORE] Building persistent hidden population ({} neurons, dt={}s)",
        counts.hidden(),
        model.dt
    );
    let hidden = NeuronGroup::new(LIFModel::new(), model.neuron, counts.hidden())?;
    let mut network = Network::new(hidden, model.dt)?;
    network.store()?;
    info!("[SNN-CORE] Network {} checkpointed", network.id());
    Ok(Box::new(network))
}

#[cfg(test)]
mod tests {
    use super::*;
    use snn_hfo_config::MeasurementMode;

    fn scalp_config(hidden: usize) -> Configuration {
        let mut config = Configuration::default();
        config.measurement_mode = MeasurementMode::Scalp;
        config.hidden_neuron_count = hidden;
        config
    }

    #[test]
    fn test_read_neuron_counts_follows_mode() {
        let mut config = Configuration::default();
        for (mode, input) in [
            (MeasurementMode::Ieeg, 4),
            (MeasurementMode::Ecog, 2),
            (MeasurementMode::Scalp, 2),
        ] {
            config.measurement_mode = mode;
            assert_eq!(read_neuron_counts(&config).unwrap().input(), input);
        }
    }

    #[test]
    fn test_core_is_built_lazily() {
        let core = SimulationCore::from_config(&scalp_config(8)).unwrap();
        assert!(!core.state().is_ready());
        assert!(core.network_id().is_none());
        assert!(core.monitor().is_none());
    }

    #[test]
    fn test_invalid_configuration_fails_before_build() {
        let mut config = scalp_config(8);
        config.detection.step_size = 1.0;
        config.detection.window_size = 0.5;
        assert!(matches!(SimulationCore::from_config(&config), Err(EngineError::Config(_))));
    }

    #[test]
    fn test_band_count_must_match_mode() {
        let mut core = SimulationCore::from_config(&scalp_config(8)).unwrap();
        let bands = vec![BandSpikes::default(), BandSpikes::default()];
        let result = core.invoke(&bands, 0.01);
        assert!(matches!(
            result,
            Err(EngineError::InputCountMismatch { expected: 2, actual: 4 })
        ));
        assert_eq!(core.invocations(), 0);
    }

    #[test]
    fn test_model_is_taken_from_config() {
        let mut config = NetworkConfig::default();
        config.dt = 5e-5;
        config.neuron.threshold = 2.0;
        let model = NetworkModel::from_config(&config);
        assert_eq!(model.dt, 5e-5);
        assert_eq!(model.neuron.threshold, 2.0);
    }
}
