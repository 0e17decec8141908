// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! # Event Boundary Detector
//!
//! ## Algorithm
//! 1. Count spikes per window (see `window`) and turn counts into rates
//! 2. Every window with a nonzero rate marks the time-vector samples inside
//!    its bounds in the occupancy signal
//! 3. Scan the occupancy signal for edges (see `edges`) and pair them into
//!    event intervals
//!
//! Pure and stateless: every call owns its result.

use tracing::trace;

use crate::edges::scan_edges;
use crate::error::{DetectionError, Result};
use crate::result::{DetectionResult, EventInterval};
use crate::window::{index_range, window_rates, WindowConfig};

/// Detect events in `spike_times` over a trial of `duration` seconds.
///
/// `time_vector` is the sampling grid of the original signal and must be
/// non-decreasing. Spike times need not be sorted.
///
/// # Errors
/// `InvalidDuration` for a non-positive duration, `UnsortedTimeVector` for a
/// time vector that goes backwards.
pub fn detect_events(
    spike_times: &[f64],
    duration: f64,
    time_vector: &[f64],
    config: &WindowConfig,
) -> Result<DetectionResult> {
    if !(duration.is_finite() && duration > 0.0) {
        return Err(DetectionError::InvalidDuration(duration));
    }
    if let Some(index) = (1..time_vector.len()).find(|&i| time_vector[i] < time_vector[i - 1]) {
        return Err(DetectionError::UnsortedTimeVector { index });
    }

    let mut spikes = spike_times.to_vec();
    spikes.sort_by(f64::total_cmp);

    let occupancy_signal = occupancy(&spikes, duration, time_vector, config);
    let edges = scan_edges(&occupancy_signal);

    let event_intervals = if edges.is_empty() {
        vec![EventInterval::NONE]
    } else {
        edges
            .pairs()
            .map(|(rise, fall)| EventInterval::new(time_vector[rise], time_vector[fall]))
            .collect()
    };

    trace!(
        "[DETECTOR] {} spikes over {}s -> {} events",
        spikes.len(),
        duration,
        edges.len()
    );

    Ok(DetectionResult {
        total_event_count: edges.len(),
        time_vector: time_vector.to_vec(),
        occupancy_signal,
        event_intervals,
    })
}

/// Project active windows onto the sample grid
fn occupancy(sorted_spikes: &[f64], duration: f64, time_vector: &[f64], config: &WindowConfig) -> Vec<u8> {
    let mut signal = vec![0u8; time_vector.len()];
    for (index, rate) in window_rates(sorted_spikes, duration, config).into_iter().enumerate() {
        if rate <= 0.0 {
            continue;
        }
        let (start, end) = config.bounds(index);
        let (first, last) = index_range(time_vector, start, end);
        signal[first..last].fill(1);
    }
    signal
}

#[cfg(test)]
mod tests {
    use super::*;

    /// 40 samples at 20 Hz: 0.0, 0.05, ..., 1.95
    fn time_vector() -> Vec<f64> {
        (0..40).map(|i| i as f64 / 20.0).collect()
    }

    #[test]
    fn test_two_active_windows() {
        let config = WindowConfig::new(0.5, 0.5).unwrap();
        let times = time_vector();
        let result = detect_events(&[0.1, 0.2, 1.6], 2.0, &times, &config).unwrap();

        // windows [0, 0.5] and [1.5, 2.0] are active
        let expected: Vec<u8> = times
            .iter()
            .map(|&t| u8::from(t <= 0.5 || t >= 1.5))
            .collect();
        assert_eq!(result.occupancy_signal, expected);

        assert_eq!(result.total_event_count, 2);
        assert_eq!(
            result.event_intervals,
            vec![EventInterval::new(0.0, 0.5), EventInterval::new(1.5, 1.9)]
        );
    }

    #[test]
    fn test_no_spikes_gives_sentinel() {
        let config = WindowConfig::new(0.01, 0.05).unwrap();
        let result = detect_events(&[], 2.0, &time_vector(), &config).unwrap();

        assert_eq!(result.total_event_count, 0);
        assert_eq!(result.event_intervals, vec![EventInterval::NONE]);
        assert!(result.occupancy_signal.iter().all(|&v| v == 0));
        assert!(result.is_empty());
        assert_eq!(result.event_rate(2.0), 0.0);
    }

    #[test]
    fn test_spike_on_window_end_is_counted() {
        let config = WindowConfig::new(0.5, 0.5).unwrap();
        let times = time_vector();
        // 1.0 closes window 1 and opens window 2
        let result = detect_events(&[1.0], 2.0, &times, &config).unwrap();

        assert_eq!(result.total_event_count, 1);
        assert_eq!(result.event_intervals, vec![EventInterval::new(0.5, 1.5)]);
    }

    #[test]
    fn test_spikes_outside_trial_are_ignored() {
        let config = WindowConfig::new(0.5, 0.5).unwrap();
        let result = detect_events(&[-1.0, 5.0], 2.0, &time_vector(), &config).unwrap();
        assert!(result.is_empty());
    }

    #[test]
    fn test_unsorted_spikes_are_accepted() {
        let config = WindowConfig::new(0.5, 0.5).unwrap();
        let times = time_vector();
        let sorted = detect_events(&[0.1, 0.2, 1.6], 2.0, &times, &config).unwrap();
        let shuffled = detect_events(&[1.6, 0.2, 0.1], 2.0, &times, &config).unwrap();
        assert_eq!(sorted, shuffled);
    }

    #[test]
    fn test_event_rate_counts_events_per_second() {
        let config = WindowConfig::new(0.5, 0.5).unwrap();
        let result = detect_events(&[0.1, 1.6], 2.0, &time_vector(), &config).unwrap();
        assert_eq!(result.event_rate(2.0), 1.0);
        assert!((result.active_duration() - 0.9).abs() < 1e-9);
    }

    #[test]
    fn test_invalid_inputs_are_rejected() {
        let config = WindowConfig::new(0.5, 0.5).unwrap();
        assert!(matches!(
            detect_events(&[], 0.0, &time_vector(), &config),
            Err(DetectionError::InvalidDuration(_))
        ));
        assert!(matches!(
            detect_events(&[], 1.0, &[0.0, 0.2, 0.1], &config),
            Err(DetectionError::UnsortedTimeVector { index: 2 })
        ));
    }

    #[test]
    fn test_result_serializes() {
        let config = WindowConfig::new(0.5, 0.5).unwrap();
        let result = detect_events(&[0.1], 1.0, &[0.0, 0.5, 1.0], &config).unwrap();
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["total_event_count"], 1);
        assert_eq!(json["event_intervals"][0]["start_time"], 0.0);
    }
}
