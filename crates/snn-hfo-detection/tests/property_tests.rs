// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Property-based tests for the event boundary detector

use proptest::prelude::*;
use snn_hfo_detection::{detect_events, scan_edges, EventInterval, WindowConfig};

// ============================================================================
// Strategies
// ============================================================================

// Step no larger than the window, both in milliseconds-ish ranges
fn window_strategy() -> impl Strategy<Value = WindowConfig> {
    (0.001f64..0.2, 1.0f64..4.0).prop_map(|(step, ratio)| WindowConfig::new(step, step * ratio).unwrap())
}

// Uniform grid over [0, duration)
fn time_vector_strategy() -> impl Strategy<Value = (f64, Vec<f64>)> {
    (0.2f64..3.0, 2usize..400).prop_map(|(duration, samples)| {
        let times = (0..samples).map(|i| i as f64 * duration / samples as f64).collect();
        (duration, times)
    })
}

fn spikes_strategy() -> impl Strategy<Value = Vec<f64>> {
    prop::collection::vec(0.0f64..3.0, 0..30)
}

// ============================================================================
// Detector Properties
// ============================================================================

proptest! {
    // Property: occupancy signal is aligned with the time vector
    #[test]
    fn test_occupancy_matches_time_vector_length(
        config in window_strategy(),
        (duration, times) in time_vector_strategy(),
        spikes in spikes_strategy()
    ) {
        let result = detect_events(&spikes, duration, &times, &config).unwrap();
        prop_assert_eq!(result.occupancy_signal.len(), times.len());
        prop_assert!(result.occupancy_signal.iter().all(|&v| v <= 1));
    }

    // Property: identical inputs give identical results
    #[test]
    fn test_detection_is_idempotent(
        config in window_strategy(),
        (duration, times) in time_vector_strategy(),
        spikes in spikes_strategy()
    ) {
        let first = detect_events(&spikes, duration, &times, &config).unwrap();
        let second = detect_events(&spikes, duration, &times, &config).unwrap();
        prop_assert_eq!(first, second);
    }

    // Property: intervals are ordered and pairwise disjoint
    #[test]
    fn test_intervals_are_ordered_and_disjoint(
        config in window_strategy(),
        (duration, times) in time_vector_strategy(),
        spikes in spikes_strategy()
    ) {
        let result = detect_events(&spikes, duration, &times, &config).unwrap();
        for interval in &result.event_intervals {
            prop_assert!(interval.start_time <= interval.end_time);
        }
        for pair in result.event_intervals.windows(2) {
            prop_assert!(pair[0].end_time < pair[1].start_time, "overlap: {:?}", pair);
        }
        if !result.is_empty() {
            prop_assert_eq!(result.event_intervals.len(), result.total_event_count);
        }
    }

    // Property: spikes outside every window never produce events
    #[test]
    fn test_no_spikes_in_windows_gives_sentinel(
        config in window_strategy(),
        (duration, times) in time_vector_strategy(),
        late in prop::collection::vec(10.0f64..20.0, 0..10)
    ) {
        let result = detect_events(&late, duration, &times, &config).unwrap();
        prop_assert_eq!(result.total_event_count, 0);
        prop_assert_eq!(result.event_intervals, vec![EventInterval::NONE]);
        prop_assert!(result.occupancy_signal.iter().all(|&v| v == 0));
    }

    // Property: every rising edge gets exactly one falling edge at or after it
    #[test]
    fn test_edges_always_pair(signal in prop::collection::vec(0u8..2, 0..200)) {
        let edges = scan_edges(&signal);
        prop_assert_eq!(edges.rising.len(), edges.falling.len());
        for (rise, fall) in edges.pairs() {
            prop_assert!(rise <= fall);
            prop_assert!(signal[rise..=fall].iter().all(|&v| v == 1));
        }
    }
}
