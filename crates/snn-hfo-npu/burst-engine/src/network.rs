// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! # Network
//!
//! A persistent hidden population with its spike monitor, plus at most one
//! transient input subnetwork attached at a time.
//!
//! Lifecycle of a transient:
//! ```text
//! let token = network.attach(transient)?;   // network owns it now
//! network.run(duration)?;
//! let transient = network.detach(token)?;   // token is consumed
//! ```
//! `AttachedSubnetwork` is not `Clone`, so a detached subnetwork cannot be
//! detached again and a token cannot outlive its attachment.

use std::sync::atomic::{AtomicU64, Ordering};

use snn_hfo_npu_neural::{NeuralError, NeuronId, NeuronModel};
use tracing::trace;

use crate::clock::SimulationClock;
use crate::error::{EngineError, Result};
use crate::input::SpikeGeneratorGroup;
use crate::monitor::SpikeMonitor;
use crate::neuron_group::{GroupState, NeuronGroup};
use crate::synapses::Synapses;

static NEXT_NETWORK_ID: AtomicU64 = AtomicU64::new(1);

/// Input layer and its synapses onto the hidden population
#[derive(Debug, Clone, PartialEq)]
pub struct TransientSubnetwork {
    input: SpikeGeneratorGroup,
    synapses: Synapses,
}

impl TransientSubnetwork {
    pub fn new(input: SpikeGeneratorGroup, synapses: Synapses) -> Result<Self> {
        if synapses.source_count() != input.size() {
            return Err(EngineError::InputCountMismatch {
                expected: synapses.source_count(),
                actual: input.size(),
            });
        }
        Ok(Self { input, synapses })
    }

    pub fn input(&self) -> &SpikeGeneratorGroup {
        &self.input
    }

    pub fn synapses(&self) -> &Synapses {
        &self.synapses
    }

    fn reset(&mut self) {
        self.input.reset();
        self.synapses.reset();
    }
}

/// Proof that a transient subnetwork is attached to a specific network
#[derive(Debug)]
#[must_use = "an attached subnetwork must be detached"]
pub struct AttachedSubnetwork {
    network_id: u64,
}

impl AttachedSubnetwork {
    pub fn network_id(&self) -> u64 {
        self.network_id
    }
}

/// Snapshot of everything a run mutates in the persistent part of a network
#[derive(Debug, Clone, PartialEq)]
pub struct NetworkCheckpoint {
    step: u64,
    hidden: GroupState,
    monitor: SpikeMonitor,
}

impl NetworkCheckpoint {
    pub fn neuron_count(&self) -> usize {
        self.hidden.membrane_potentials.len()
    }
}

#[derive(Debug)]
pub struct Network<M: NeuronModel> {
    id: u64,
    clock: SimulationClock,
    hidden: NeuronGroup<M>,
    monitor: SpikeMonitor,
    transient: Option<TransientSubnetwork>,
    checkpoint: Option<NetworkCheckpoint>,
    input_currents: Vec<f64>,
    fired: Vec<usize>,
}

impl<M: NeuronModel> Network<M> {
    pub fn new(hidden: NeuronGroup<M>, dt: f64) -> Result<Self> {
        if !(dt.is_finite() && dt > 0.0) {
            return Err(NeuralError::InvalidParameter(format!("timestep must be positive, got {}", dt)).into());
        }
        let size = hidden.len();
        Ok(Self {
            id: NEXT_NETWORK_ID.fetch_add(1, Ordering::Relaxed),
            clock: SimulationClock::new(dt),
            hidden,
            monitor: SpikeMonitor::new(),
            transient: None,
            checkpoint: None,
            input_currents: vec![0.0; size],
            fired: Vec::with_capacity(size),
        })
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn clock(&self) -> &SimulationClock {
        &self.clock
    }

    pub fn hidden(&self) -> &NeuronGroup<M> {
        &self.hidden
    }

    pub fn monitor(&self) -> &SpikeMonitor {
        &self.monitor
    }

    pub fn is_attached(&self) -> bool {
        self.transient.is_some()
    }

    pub fn checkpoint(&self) -> Option<&NetworkCheckpoint> {
        self.checkpoint.as_ref()
    }

    /// Checkpoint the persistent state. Only allowed with nothing attached.
    pub fn store(&mut self) -> Result<()> {
        if self.is_attached() {
            return Err(EngineError::SubnetworkAlreadyAttached { network_id: self.id });
        }
        self.checkpoint = Some(NetworkCheckpoint {
            step: self.clock.step(),
            hidden: self.hidden.state(),
            monitor: self.monitor.clone(),
        });
        Ok(())
    }

    /// Rewind clock, hidden state and monitor to the stored checkpoint.
    pub fn restore(&mut self) -> Result<()> {
        let checkpoint = self
            .checkpoint
            .take()
            .ok_or(EngineError::NoCheckpoint { network_id: self.id })?;
        let result = self.restore_from(&checkpoint);
        self.checkpoint = Some(checkpoint);
        result
    }

    /// Rewind to an arbitrary checkpoint of a population of the same size.
    /// An attached transient is rewound too.
    pub fn restore_from(&mut self, checkpoint: &NetworkCheckpoint) -> Result<()> {
        let expected = self.hidden.len();
        for actual in [
            checkpoint.hidden.membrane_potentials.len(),
            checkpoint.hidden.refractory_remaining.len(),
        ] {
            if actual != expected {
                return Err(EngineError::CheckpointMismatch { expected, actual });
            }
        }

        self.clock.set_step(checkpoint.step);
        self.hidden.load_state(&checkpoint.hidden);
        self.monitor = checkpoint.monitor.clone();
        if let Some(transient) = self.transient.as_mut() {
            transient.reset();
        }
        Ok(())
    }

    pub fn attach(&mut self, transient: TransientSubnetwork) -> Result<AttachedSubnetwork> {
        if self.is_attached() {
            return Err(EngineError::SubnetworkAlreadyAttached { network_id: self.id });
        }
        if transient.synapses.target_count() != self.hidden.len() {
            return Err(NeuralError::ArraySizeMismatch {
                expected: self.hidden.len(),
                actual: transient.synapses.target_count(),
            }
            .into());
        }
        self.transient = Some(transient);
        Ok(AttachedSubnetwork { network_id: self.id })
    }

    pub fn detach(&mut self, token: AttachedSubnetwork) -> Result<TransientSubnetwork> {
        if token.network_id != self.id {
            return Err(EngineError::ForeignSubnetwork {
                expected: self.id,
                actual: token.network_id,
            });
        }
        self.transient.take().ok_or(EngineError::ForeignSubnetwork {
            expected: self.id,
            actual: token.network_id,
        })
    }

    /// Advance the simulation by `duration` seconds, returning the number of steps taken.
    pub fn run(&mut self, duration: f64) -> Result<u64> {
        if !(duration.is_finite() && duration > 0.0) {
            return Err(EngineError::InvalidDuration(duration));
        }
        let steps = self.clock.steps_for(duration);
        for _ in 0..steps {
            self.step_once()?;
        }
        trace!(
            "[NETWORK {}] ran {} steps, monitor holds {} spikes",
            self.id,
            steps,
            self.monitor.spike_count()
        );
        Ok(steps)
    }

    fn step_once(&mut self) -> Result<()> {
        let step = self.clock.step();
        let time = self.clock.time();

        self.input_currents.fill(0.0);
        if let Some(transient) = self.transient.as_mut() {
            transient.synapses.decay();
            for source in transient.input.spikes_at(step) {
                transient.synapses.on_presynaptic_spike(source);
            }
            transient.synapses.accumulate_into(&mut self.input_currents);
        }

        self.fired.clear();
        self.hidden
            .update(&self.input_currents, self.clock.dt(), &mut self.fired)?;
        for &index in &self.fired {
            self.monitor.record(time, NeuronId(index as u32));
        }

        self.clock.advance();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use snn_hfo_npu_neural::{LIFModel, LIFParameters, NeuronCount, SpikeTrain, SynapseParameters};

    const DT: f64 = 1e-4;

    fn network(hidden: usize) -> Network<LIFModel> {
        let group = NeuronGroup::new(LIFModel::new(), LIFParameters::default(), hidden).unwrap();
        Network::new(group, DT).unwrap()
    }

    fn transient(hidden: usize, spike_at: f64) -> TransientSubnetwork {
        let counts = NeuronCount::new(1, hidden).unwrap();
        let train = SpikeTrain::from_times(vec![spike_at]).unwrap();
        let input = SpikeGeneratorGroup::new(1, &train, DT).unwrap();
        let params = SynapseParameters {
            weights: vec![50.0; hidden],
            taus: vec![0.005; hidden],
        };
        let synapses = Synapses::new(counts, &params, DT).unwrap();
        TransientSubnetwork::new(input, synapses).unwrap()
    }

    #[test]
    fn test_attached_input_drives_hidden_spikes() {
        let mut network = network(3);
        let token = network.attach(transient(3, 0.01)).unwrap();
        network.run(0.05).unwrap();
        network.detach(token).unwrap();

        assert!(network.monitor().spike_count() > 0);
        assert!(network.monitor().times().iter().all(|&t| t >= 0.01 - 1e-9));
    }

    #[test]
    fn test_attach_twice_is_rejected() {
        let mut network = network(2);
        let token = network.attach(transient(2, 0.0)).unwrap();
        let second = network.attach(transient(2, 0.0));
        assert!(matches!(second, Err(EngineError::SubnetworkAlreadyAttached { .. })));
        network.detach(token).unwrap();
        assert!(!network.is_attached());
    }

    #[test]
    fn test_foreign_token_is_rejected() {
        let mut a = network(2);
        let mut b = network(2);
        let token_a = a.attach(transient(2, 0.0)).unwrap();

        let result = b.detach(token_a);
        assert!(matches!(result, Err(EngineError::ForeignSubnetwork { .. })));
        assert!(a.is_attached());
    }

    #[test]
    fn test_restore_rewinds_clock_and_monitor() {
        let mut network = network(2);
        network.store().unwrap();

        let token = network.attach(transient(2, 0.0)).unwrap();
        network.run(0.02).unwrap();
        network.detach(token).unwrap();
        assert!(network.monitor().spike_count() > 0);
        assert!(network.clock().step() > 0);

        network.restore().unwrap();
        assert_eq!(network.monitor().spike_count(), 0);
        assert_eq!(network.clock().step(), 0);
        assert!(network.hidden().membrane_potentials().iter().all(|&v| v == 0.0));
    }

    #[test]
    fn test_restore_without_checkpoint_fails() {
        let mut network = network(2);
        assert!(matches!(network.restore(), Err(EngineError::NoCheckpoint { .. })));
    }

    #[test]
    fn test_checkpoint_of_other_size_is_rejected() {
        let mut small = network(2);
        small.store().unwrap();
        let checkpoint = small.checkpoint().unwrap().clone();

        let mut large = network(5);
        let result = large.restore_from(&checkpoint);
        assert!(matches!(
            result,
            Err(EngineError::CheckpointMismatch { expected: 5, actual: 2 })
        ));
    }

    #[test]
    fn test_store_while_attached_is_rejected() {
        let mut network = network(2);
        let token = network.attach(transient(2, 0.0)).unwrap();
        assert!(network.store().is_err());
        network.detach(token).unwrap();
        assert!(network.store().is_ok());
    }

    #[test]
    fn test_transient_with_wrong_target_count_is_rejected() {
        let mut network = network(4);
        assert!(network.attach(transient(3, 0.0)).is_err());
        assert!(!network.is_attached());
    }

    #[test]
    fn test_non_positive_duration_is_rejected() {
        let mut network = network(1);
        assert!(matches!(network.run(0.0), Err(EngineError::InvalidDuration(_))));
        assert!(matches!(network.run(f64::NAN), Err(EngineError::InvalidDuration(_))));
    }

    #[test]
    fn test_unfed_population_stays_silent() {
        let mut network = network(4);
        assert_eq!(network.run(0.01).unwrap(), 100);
        assert_eq!(network.monitor().spike_count(), 0);
    }
}
