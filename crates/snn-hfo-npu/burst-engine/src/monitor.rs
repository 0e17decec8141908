// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Spike recording for the hidden population

use snn_hfo_npu_neural::{NeuronId, SpikeTrain};

use crate::error::Result;

/// Every hidden spike since the last restore, in emission order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SpikeMonitor {
    times: Vec<f64>,
    neuron_ids: Vec<NeuronId>,
}

impl SpikeMonitor {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn record(&mut self, time: f64, neuron: NeuronId) {
        self.times.push(time);
        self.neuron_ids.push(neuron);
    }

    pub fn times(&self) -> &[f64] {
        &self.times
    }

    pub fn neuron_ids(&self) -> &[NeuronId] {
        &self.neuron_ids
    }

    pub fn spike_count(&self) -> usize {
        self.times.len()
    }

    /// Spike times of a single neuron
    pub fn spikes_of(&self, neuron: NeuronId) -> Vec<f64> {
        self.times
            .iter()
            .zip(&self.neuron_ids)
            .filter(|(_, &id)| id == neuron)
            .map(|(&t, _)| t)
            .collect()
    }

    pub fn to_spike_train(&self) -> Result<SpikeTrain> {
        Ok(SpikeTrain::new(self.times.clone(), self.neuron_ids.clone())?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spikes_of_filters_by_neuron() {
        let mut monitor = SpikeMonitor::new();
        monitor.record(0.1, NeuronId(0));
        monitor.record(0.2, NeuronId(1));
        monitor.record(0.3, NeuronId(0));

        assert_eq!(monitor.spike_count(), 3);
        assert_eq!(monitor.spikes_of(NeuronId(0)), vec![0.1, 0.3]);
        assert_eq!(monitor.spikes_of(NeuronId(2)), Vec::<f64>::new());
        assert_eq!(monitor.to_spike_train().unwrap().len(), 3);
    }
}
