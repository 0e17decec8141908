// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DetectionError {
    #[error("step size {step_size} must not exceed window size {window_size}")]
    StepExceedsWindow { step_size: f64, window_size: f64 },

    #[error("window and step sizes must be positive (step={step_size}, window={window_size})")]
    NonPositiveWindow { step_size: f64, window_size: f64 },

    #[error("trial duration must be positive and finite, got {0}")]
    InvalidDuration(f64),

    #[error("time vector must be non-decreasing (index {index})")]
    UnsortedTimeVector { index: usize },
}

pub type Result<T> = std::result::Result<T, DetectionError>;
