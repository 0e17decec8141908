// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Delta-modulation spike encoding
//!
//! Turns one filtered band signal into `up`/`down` spike times. A reference level
//! tracks the signal in steps of `threshold`: each sample where the signal has moved
//! at least one threshold above (below) the reference emits an `up` (`down`) spike
//! at that sample's time, and the reference catches up by whole thresholds.

use crate::types::{BandSpikes, NeuralError, Result};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DeltaEncoder {
    threshold: f64,
    refractory_period: f64,
}

impl DeltaEncoder {
    /// # Errors
    /// `InvalidParameter` unless `threshold > 0` and `refractory_period >= 0`.
    pub fn new(threshold: f64, refractory_period: f64) -> Result<Self> {
        if !(threshold.is_finite() && threshold > 0.0) {
            return Err(NeuralError::InvalidParameter(format!(
                "encoder threshold must be positive, got {}",
                threshold
            )));
        }
        if !(refractory_period.is_finite() && refractory_period >= 0.0) {
            return Err(NeuralError::InvalidParameter(format!(
                "encoder refractory period must not be negative, got {}",
                refractory_period
            )));
        }
        Ok(Self {
            threshold,
            refractory_period,
        })
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Encode `signal` sampled at `times`.
    ///
    /// At most one spike per sample and direction is emitted. A spike closer than
    /// the refractory period to the previous spike of the same train is dropped,
    /// but the reference still moves.
    pub fn encode(&self, signal: &[f64], times: &[f64]) -> Result<BandSpikes> {
        if signal.len() != times.len() {
            return Err(NeuralError::ArraySizeMismatch {
                expected: times.len(),
                actual: signal.len(),
            });
        }

        let mut spikes = BandSpikes::default();
        let Some(&first) = signal.first() else {
            return Ok(spikes);
        };

        let mut reference = first;
        let mut last_up = f64::NEG_INFINITY;
        let mut last_down = f64::NEG_INFINITY;

        for (&value, &t) in signal.iter().zip(times).skip(1) {
            let delta = value - reference;
            let crossings = (delta.abs() / self.threshold).floor();
            if crossings < 1.0 {
                continue;
            }

            if delta > 0.0 {
                reference += crossings * self.threshold;
                if t - last_up >= self.refractory_period {
                    spikes.up.push(t);
                    last_up = t;
                }
            } else {
                reference -= crossings * self.threshold;
                if t - last_down >= self.refractory_period {
                    spikes.down.push(t);
                    last_down = t;
                }
            }
        }

        Ok(spikes)
    }
}

/// Derive an encoder threshold from the leading baseline segment of a signal.
///
/// The baseline (`times[0] .. times[0] + baseline_duration`) is cut into windows of
/// `window` seconds; the threshold is `factor` times the mean peak-to-peak amplitude
/// of those windows. A flat baseline gives `0.0`.
pub fn find_threshold(
    signal: &[f64],
    times: &[f64],
    baseline_duration: f64,
    window: f64,
    factor: f64,
) -> Result<f64> {
    if signal.len() != times.len() {
        return Err(NeuralError::ArraySizeMismatch {
            expected: times.len(),
            actual: signal.len(),
        });
    }
    if !(window > 0.0 && baseline_duration > 0.0) {
        return Err(NeuralError::InvalidParameter(
            "baseline window and duration must be positive".to_string(),
        ));
    }
    let Some(&start) = times.first() else {
        return Ok(0.0);
    };

    let mut amplitudes = Vec::new();
    let mut current_window = 0u64;
    let mut low = f64::INFINITY;
    let mut high = f64::NEG_INFINITY;

    for (&value, &t) in signal.iter().zip(times) {
        let offset = t - start;
        if offset >= baseline_duration {
            break;
        }
        let window_index = (offset / window).floor() as u64;
        if window_index != current_window {
            if high >= low {
                amplitudes.push(high - low);
            }
            current_window = window_index;
            low = f64::INFINITY;
            high = f64::NEG_INFINITY;
        }
        low = low.min(value);
        high = high.max(value);
    }
    if high >= low {
        amplitudes.push(high - low);
    }

    if amplitudes.is_empty() {
        return Ok(0.0);
    }
    let mean = amplitudes.iter().sum::<f64>() / amplitudes.len() as f64;
    Ok(mean * factor)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ramp(n: usize, slope: f64) -> (Vec<f64>, Vec<f64>) {
        let times: Vec<f64> = (0..n).map(|i| i as f64 * 0.001).collect();
        let signal = (0..n).map(|i| i as f64 * slope).collect();
        (signal, times)
    }

    #[test]
    fn test_rising_ramp_emits_only_up_spikes() {
        let (signal, times) = ramp(11, 0.1);
        let encoder = DeltaEncoder::new(0.25, 0.0).unwrap();
        let spikes = encoder.encode(&signal, &times).unwrap();

        assert!(spikes.down.is_empty());
        // reference steps 0 -> 0.25 -> 0.5 -> 0.75 -> 1.0 reached at samples 3, 5, 8, 10
        assert_eq!(spikes.up.len(), 4);
        assert!((spikes.up[0] - 0.003).abs() < 1e-12);
    }

    #[test]
    fn test_falling_signal_emits_down_spikes() {
        let (signal, times) = ramp(6, -1.0);
        let encoder = DeltaEncoder::new(1.0, 0.0).unwrap();
        let spikes = encoder.encode(&signal, &times).unwrap();

        assert!(spikes.up.is_empty());
        assert_eq!(spikes.down.len(), 5);
    }

    #[test]
    fn test_large_jump_emits_one_spike_per_sample() {
        let times = vec![0.0, 0.001, 0.002];
        let signal = vec![0.0, 10.0, 10.0];
        let encoder = DeltaEncoder::new(1.0, 0.0).unwrap();
        let spikes = encoder.encode(&signal, &times).unwrap();

        assert_eq!(spikes.up, vec![0.001]);
        assert!(spikes.down.is_empty());
    }

    #[test]
    fn test_refractory_period_drops_close_spikes() {
        let (signal, times) = ramp(10, 1.0);
        let encoder = DeltaEncoder::new(1.0, 0.0025).unwrap();
        let spikes = encoder.encode(&signal, &times).unwrap();

        for pair in spikes.up.windows(2) {
            assert!(pair[1] - pair[0] >= 0.0025 - 1e-12);
        }
        assert!(spikes.up.len() < 9);
    }

    #[test]
    fn test_constant_and_empty_signals_are_silent() {
        let encoder = DeltaEncoder::new(0.1, 0.0).unwrap();
        let constant = encoder.encode(&[3.0; 20], &[0.0; 20]).unwrap();
        assert_eq!(constant.spike_count(), 0);

        let empty = encoder.encode(&[], &[]).unwrap();
        assert_eq!(empty.spike_count(), 0);
    }

    #[test]
    fn test_encoder_rejects_bad_parameters() {
        assert!(DeltaEncoder::new(0.0, 0.0).is_err());
        assert!(DeltaEncoder::new(1.0, -0.1).is_err());
        let encoder = DeltaEncoder::new(1.0, 0.0).unwrap();
        assert!(encoder.encode(&[1.0, 2.0], &[0.0]).is_err());
    }

    #[test]
    fn test_find_threshold_uses_baseline_only() {
        // windows of amplitude 2 (samples 0-9) and 4 (samples 10-18), then a huge excursion after the baseline
        let times: Vec<f64> = (0..40).map(|i| i as f64 * 0.001).collect();
        let signal: Vec<f64> = (0..40)
            .map(|i| match i {
                0..=9 => if i % 2 == 0 { 1.0 } else { -1.0 },
                10..=19 => if i % 2 == 0 { 2.0 } else { -2.0 },
                _ => 100.0,
            })
            .collect();

        let threshold = find_threshold(&signal, &times, 0.0185, 0.0095, 0.5).unwrap();
        assert!((threshold - 1.5).abs() < 1e-9);
    }

    #[test]
    fn test_find_threshold_of_flat_signal_is_zero() {
        let times: Vec<f64> = (0..10).map(|i| i as f64 * 0.001).collect();
        let threshold = find_threshold(&[0.5; 10], &times, 1.0, 0.002, 1.0).unwrap();
        assert_eq!(threshold, 0.0);
    }
}
