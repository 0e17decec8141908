// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! # Synaptic Propagation
//!
//! All-to-all exponential current synapses from the input layer to the hidden
//! population. Storage is source-major: synapse `k` connects source
//! `k / target_count` to target `k % target_count`, matching the layout of
//! `SynapseParameters`.

use snn_hfo_npu_neural::{decay_factor, NeuronCount, SynapseParameters};

use crate::error::Result;

#[derive(Debug, Clone, PartialEq)]
pub struct Synapses {
    counts: NeuronCount,
    weights: Vec<f64>,
    decay: Vec<f64>,
    currents: Vec<f64>,
}

impl Synapses {
    pub fn new(counts: NeuronCount, params: &SynapseParameters, dt: f64) -> Result<Self> {
        params.validate(&counts)?;
        let decay = params.taus.iter().map(|&tau| decay_factor(tau, dt)).collect();
        Ok(Self {
            counts,
            weights: params.weights.clone(),
            decay,
            currents: vec![0.0; counts.synapse_count()],
        })
    }

    pub fn source_count(&self) -> usize {
        self.counts.input()
    }

    pub fn target_count(&self) -> usize {
        self.counts.hidden()
    }

    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    pub fn currents(&self) -> &[f64] {
        &self.currents
    }

    pub(crate) fn decay(&mut self) {
        for (current, &factor) in self.currents.iter_mut().zip(&self.decay) {
            *current *= factor;
        }
    }

    pub(crate) fn on_presynaptic_spike(&mut self, source: usize) {
        let targets = self.target_count();
        let row = source * targets..(source + 1) * targets;
        for (current, &weight) in self.currents[row.clone()].iter_mut().zip(&self.weights[row]) {
            *current += weight;
        }
    }

    /// Add each target's summed synaptic current to `totals`
    pub(crate) fn accumulate_into(&self, totals: &mut [f64]) {
        for row in self.currents.chunks_exact(self.target_count()) {
            for (total, &current) in totals.iter_mut().zip(row) {
                *total += current;
            }
        }
    }

    pub fn reset(&mut self) {
        self.currents.fill(0.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn synapses() -> Synapses {
        let counts = NeuronCount::new(2, 3).unwrap();
        let params = SynapseParameters {
            weights: vec![1.0, 2.0, 3.0, -1.0, -1.0, -1.0],
            taus: vec![0.005; 6],
        };
        Synapses::new(counts, &params, 1e-4).unwrap()
    }

    #[test]
    fn test_spike_adds_weight_row() {
        let mut synapses = synapses();
        synapses.on_presynaptic_spike(0);

        let mut totals = vec![0.0; 3];
        synapses.accumulate_into(&mut totals);
        assert_eq!(totals, vec![1.0, 2.0, 3.0]);

        synapses.on_presynaptic_spike(1);
        let mut totals = vec![0.0; 3];
        synapses.accumulate_into(&mut totals);
        assert_eq!(totals, vec![0.0, 1.0, 2.0]);
    }

    #[test]
    fn test_currents_decay_and_reset() {
        let mut synapses = synapses();
        synapses.on_presynaptic_spike(0);
        synapses.decay();
        assert!(synapses.currents()[0] < 1.0 && synapses.currents()[0] > 0.9);

        synapses.reset();
        assert!(synapses.currents().iter().all(|&c| c == 0.0));
    }

    #[test]
    fn test_parameter_length_is_checked() {
        let counts = NeuronCount::new(2, 3).unwrap();
        let params = SynapseParameters {
            weights: vec![1.0; 5],
            taus: vec![0.005; 6],
        };
        assert!(Synapses::new(counts, &params, 1e-4).is_err());
    }
}
