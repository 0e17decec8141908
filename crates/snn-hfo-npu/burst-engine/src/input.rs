// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Input layer replaying a precomputed spike train

use snn_hfo_npu_neural::{NeuralError, SpikeTrain};

use crate::error::Result;

/// Replays `(time, neuron)` events, each delivered on step `round(time / dt)`.
#[derive(Debug, Clone, PartialEq)]
pub struct SpikeGeneratorGroup {
    size: usize,
    /// `(step, neuron index)`, ordered by step
    events: Vec<(u64, usize)>,
    cursor: usize,
}

impl SpikeGeneratorGroup {
    /// # Errors
    /// `InvalidNeuronId` when an event targets a neuron outside `0..size`,
    /// `InvalidParameter` for a negative spike time.
    pub fn new(size: usize, train: &SpikeTrain, dt: f64) -> Result<Self> {
        let mut events = Vec::with_capacity(train.len());
        for (time, id) in train.iter() {
            if id.index() >= size {
                return Err(NeuralError::InvalidNeuronId { id, size }.into());
            }
            if time < 0.0 {
                return Err(NeuralError::InvalidParameter(format!("negative spike time {}", time)).into());
            }
            events.push(((time / dt).round() as u64, id.index()));
        }
        Ok(Self {
            size,
            events,
            cursor: 0,
        })
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn event_count(&self) -> usize {
        self.events.len()
    }

    /// Neurons spiking on `step`. Events scheduled before `step` that were never
    /// asked for are skipped.
    pub fn spikes_at(&mut self, step: u64) -> impl Iterator<Item = usize> + '_ {
        while self.cursor < self.events.len() && self.events[self.cursor].0 < step {
            self.cursor += 1;
        }
        let start = self.cursor;
        while self.cursor < self.events.len() && self.events[self.cursor].0 == step {
            self.cursor += 1;
        }
        self.events[start..self.cursor].iter().map(|&(_, neuron)| neuron)
    }

    /// Rewind to the first event
    pub fn reset(&mut self) {
        self.cursor = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use snn_hfo_npu_neural::NeuronId;

    #[test]
    fn test_events_are_binned_to_nearest_step() {
        let train = SpikeTrain::new(vec![0.00011, 0.00014, 0.00026], vec![NeuronId(0), NeuronId(1), NeuronId(0)]).unwrap();
        let mut input = SpikeGeneratorGroup::new(2, &train, 1e-4).unwrap();

        assert_eq!(input.spikes_at(0).count(), 0);
        assert_eq!(input.spikes_at(1).collect::<Vec<_>>(), vec![0, 1]);
        assert_eq!(input.spikes_at(2).count(), 0);
        assert_eq!(input.spikes_at(3).collect::<Vec<_>>(), vec![0]);
    }

    #[test]
    fn test_out_of_range_neuron_is_rejected() {
        let train = SpikeTrain::new(vec![0.1], vec![NeuronId(4)]).unwrap();
        let result = SpikeGeneratorGroup::new(4, &train, 1e-4);
        assert!(result.is_err());
    }

    #[test]
    fn test_reset_replays_from_start() {
        let train = SpikeTrain::from_times(vec![0.0]).unwrap();
        let mut input = SpikeGeneratorGroup::new(1, &train, 1e-4).unwrap();
        assert_eq!(input.spikes_at(0).count(), 1);
        assert_eq!(input.spikes_at(0).count(), 0);

        input.reset();
        assert_eq!(input.spikes_at(0).count(), 1);
    }
}
