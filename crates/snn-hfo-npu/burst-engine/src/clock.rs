// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Fixed-step simulation clock. Time is `step × dt`, measured from the last restore.

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimulationClock {
    dt: f64,
    step: u64,
}

impl SimulationClock {
    pub(crate) fn new(dt: f64) -> Self {
        Self { dt, step: 0 }
    }

    pub fn dt(&self) -> f64 {
        self.dt
    }

    pub fn step(&self) -> u64 {
        self.step
    }

    /// Current simulated time in seconds
    pub fn time(&self) -> f64 {
        self.step as f64 * self.dt
    }

    /// Number of whole steps covering `duration` seconds
    pub fn steps_for(&self, duration: f64) -> u64 {
        (duration / self.dt).round() as u64
    }

    /// Bin index of an event at `time` seconds
    pub fn bin(&self, time: f64) -> u64 {
        (time / self.dt).round() as u64
    }

    pub(crate) fn advance(&mut self) {
        self.step += 1;
    }

    pub(crate) fn set_step(&mut self, step: u64) {
        self.step = step;
    }
}
