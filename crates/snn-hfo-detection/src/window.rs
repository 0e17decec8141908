// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Sliding windows over a trial
//!
//! Window `k` spans `[k × step_size, k × step_size + window_size]`, both ends
//! inclusive, for `k` in `0..ceil(duration / step_size)`. With `step_size <
//! window_size` windows overlap, and a spike on a shared boundary counts in
//! both windows.

use serde::{Deserialize, Serialize};
use snn_hfo_config::DetectionConfig;

use crate::error::{DetectionError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WindowConfig {
    step_size: f64,
    window_size: f64,
}

impl WindowConfig {
    /// # Errors
    /// `NonPositiveWindow` unless both sizes are positive and finite,
    /// `StepExceedsWindow` when `step_size > window_size`.
    pub fn new(step_size: f64, window_size: f64) -> Result<Self> {
        let positive = |value: f64| value.is_finite() && value > 0.0;
        if !positive(step_size) || !positive(window_size) {
            return Err(DetectionError::NonPositiveWindow { step_size, window_size });
        }
        if step_size > window_size {
            return Err(DetectionError::StepExceedsWindow { step_size, window_size });
        }
        Ok(Self { step_size, window_size })
    }

    pub fn from_config(config: &DetectionConfig) -> Result<Self> {
        Self::new(config.step_size, config.window_size)
    }

    pub fn step_size(&self) -> f64 {
        self.step_size
    }

    pub fn window_size(&self) -> f64 {
        self.window_size
    }

    pub fn window_count(&self, duration: f64) -> usize {
        (duration / self.step_size).ceil() as usize
    }

    /// Inclusive bounds of window `index`
    pub fn bounds(&self, index: usize) -> (f64, f64) {
        let start = index as f64 * self.step_size;
        (start, start + self.window_size)
    }
}

/// Mean firing rate (spikes per second) of every window of the trial.
///
/// `spike_times` must be sorted.
pub fn window_rates(spike_times: &[f64], duration: f64, config: &WindowConfig) -> Vec<f64> {
    (0..config.window_count(duration))
        .map(|index| {
            let (start, end) = config.bounds(index);
            count_within(spike_times, start, end) as f64 / config.window_size()
        })
        .collect()
}

/// Number of sorted values in `[start, end]`
pub(crate) fn count_within(sorted: &[f64], start: f64, end: f64) -> usize {
    let (first, last) = index_range(sorted, start, end);
    last - first
}

/// Index range of sorted values in `[start, end]`
pub(crate) fn index_range(sorted: &[f64], start: f64, end: f64) -> (usize, usize) {
    let first = sorted.partition_point(|&t| t < start);
    let last = sorted.partition_point(|&t| t <= end);
    (first, last.max(first))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_larger_than_window_is_rejected() {
        assert_eq!(
            WindowConfig::new(0.1, 0.05),
            Err(DetectionError::StepExceedsWindow {
                step_size: 0.1,
                window_size: 0.05
            })
        );
    }

    #[test]
    fn test_zero_sizes_are_rejected() {
        assert!(matches!(
            WindowConfig::new(0.0, 0.05),
            Err(DetectionError::NonPositiveWindow { .. })
        ));
        assert!(matches!(
            WindowConfig::new(0.01, 0.0),
            Err(DetectionError::NonPositiveWindow { .. })
        ));
    }

    #[test]
    fn test_equal_step_and_window_is_accepted() {
        assert!(WindowConfig::new(0.5, 0.5).is_ok());
    }

    #[test]
    fn test_window_count_rounds_up() {
        let config = WindowConfig::new(0.5, 0.5).unwrap();
        assert_eq!(config.window_count(2.0), 4);
        assert_eq!(config.window_count(2.1), 5);
    }

    #[test]
    fn test_upper_bound_is_inclusive() {
        let config = WindowConfig::new(0.5, 0.5).unwrap();
        // 0.5 closes window 0 and opens window 1
        let rates = window_rates(&[0.5], 1.0, &config);
        assert_eq!(rates, vec![2.0, 2.0]);
    }

    #[test]
    fn test_overlapping_windows_share_spikes() {
        let config = WindowConfig::new(0.25, 0.5).unwrap();
        let rates = window_rates(&[0.3], 1.0, &config);
        // windows [0,0.5] and [0.25,0.75] both see the spike
        assert_eq!(rates, vec![2.0, 2.0, 0.0, 0.0]);
    }

    #[test]
    fn test_from_config_validates() {
        let config = DetectionConfig {
            step_size: 0.2,
            window_size: 0.1,
        };
        assert!(WindowConfig::from_config(&config).is_err());
        assert!(WindowConfig::from_config(&DetectionConfig::default()).is_ok());
    }
}
