// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

use serde::{Deserialize, Serialize};

/// One contiguous run of occupancy, in time-vector units
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EventInterval {
    pub start_time: f64,
    pub end_time: f64,
}

impl EventInterval {
    /// `[0, 0]`, reported when nothing was detected
    pub const NONE: EventInterval = EventInterval {
        start_time: 0.0,
        end_time: 0.0,
    };

    pub fn new(start_time: f64, end_time: f64) -> Self {
        Self { start_time, end_time }
    }

    pub fn duration(&self) -> f64 {
        self.end_time - self.start_time
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectionResult {
    pub total_event_count: usize,
    pub time_vector: Vec<f64>,
    /// One 0/1 entry per time-vector sample
    pub occupancy_signal: Vec<u8>,
    /// Ordered, non-overlapping. Exactly `[EventInterval::NONE]` when no event was found.
    pub event_intervals: Vec<EventInterval>,
}

impl DetectionResult {
    pub fn is_empty(&self) -> bool {
        self.total_event_count == 0
    }

    /// Events per second over a trial of `duration` seconds
    pub fn event_rate(&self, duration: f64) -> f64 {
        if self.is_empty() || duration <= 0.0 {
            return 0.0;
        }
        self.total_event_count as f64 / duration
    }

    /// Seconds covered by events
    pub fn active_duration(&self) -> f64 {
        if self.is_empty() {
            return 0.0;
        }
        self.event_intervals.iter().map(EventInterval::duration).sum()
    }
}
