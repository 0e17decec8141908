// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Spike trains
//!
//! A `SpikeTrain` is a flat, time-ordered list of `(time, neuron)` events. Trains
//! from several sources are merged by tagging each event with the index of the
//! source it came from.

use serde::{Deserialize, Serialize};

use super::error::{NeuralError, Result};
use super::ids::NeuronId;

/// Time-ordered spike events in seconds, with the emitting neuron for each event
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SpikeTrain {
    times: Vec<f64>,
    neuron_ids: Vec<NeuronId>,
}

impl SpikeTrain {
    /// Build a train from parallel vectors.
    ///
    /// # Errors
    /// `ArraySizeMismatch` if the vectors differ in length, `UnsortedSpikeTrain` if a
    /// time is not finite or goes backwards.
    pub fn new(times: Vec<f64>, neuron_ids: Vec<NeuronId>) -> Result<Self> {
        if times.len() != neuron_ids.len() {
            return Err(NeuralError::ArraySizeMismatch {
                expected: times.len(),
                actual: neuron_ids.len(),
            });
        }
        check_ordered(&times)?;
        Ok(Self { times, neuron_ids })
    }

    /// Single-source train; every event belongs to neuron 0
    pub fn from_times(times: Vec<f64>) -> Result<Self> {
        let neuron_ids = vec![NeuronId(0); times.len()];
        Self::new(times, neuron_ids)
    }

    pub fn empty() -> Self {
        Self::default()
    }

    /// Merge independent sources into one train. Source `k` becomes neuron `k`.
    ///
    /// Events are ordered by time; simultaneous events keep source order.
    pub fn concatenate<S: AsRef<[f64]>>(sources: &[S]) -> Self {
        let mut events: Vec<(f64, NeuronId)> = sources
            .iter()
            .enumerate()
            .flat_map(|(k, times)| {
                times
                    .as_ref()
                    .iter()
                    .map(move |&t| (t, NeuronId(k as u32)))
            })
            .collect();
        events.sort_by(|a, b| a.0.total_cmp(&b.0));

        let (times, neuron_ids) = events.into_iter().unzip();
        Self { times, neuron_ids }
    }

    pub fn times(&self) -> &[f64] {
        &self.times
    }

    pub fn neuron_ids(&self) -> &[NeuronId] {
        &self.neuron_ids
    }

    pub fn len(&self) -> usize {
        self.times.len()
    }

    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (f64, NeuronId)> + '_ {
        self.times.iter().copied().zip(self.neuron_ids.iter().copied())
    }

    /// Largest neuron index referenced, if any
    pub fn max_neuron_id(&self) -> Option<NeuronId> {
        self.neuron_ids.iter().copied().max()
    }
}

fn check_ordered(times: &[f64]) -> Result<()> {
    for (index, &t) in times.iter().enumerate() {
        if !t.is_finite() {
            return Err(NeuralError::UnsortedSpikeTrain { index });
        }
        if index > 0 && t < times[index - 1] {
            return Err(NeuralError::UnsortedSpikeTrain { index });
        }
    }
    Ok(())
}

/// Up/down threshold crossings of one filtered band
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BandSpikes {
    pub up: Vec<f64>,
    pub down: Vec<f64>,
}

impl BandSpikes {
    pub fn new(up: Vec<f64>, down: Vec<f64>) -> Self {
        Self { up, down }
    }

    pub fn spike_count(&self) -> usize {
        self.up.len() + self.down.len()
    }
}

/// Flatten bands into one input train: band `k` feeds neuron `2k` (up) and `2k + 1` (down).
pub fn concatenate_band_spikes(bands: &[BandSpikes]) -> SpikeTrain {
    let sources: Vec<&[f64]> = bands
        .iter()
        .flat_map(|band| [band.up.as_slice(), band.down.as_slice()])
        .collect();
    SpikeTrain::concatenate(&sources)
}
