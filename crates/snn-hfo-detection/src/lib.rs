// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! # SNN-HFO Event Detection
//!
//! Turns the hidden-layer spike times of one simulated trial into event
//! intervals aligned to the original sampling grid.
//!
//! ## Example
//! ```
//! use snn_hfo_detection::{detect_events, WindowConfig};
//!
//! let config = WindowConfig::new(0.5, 0.5).unwrap();
//! let times: Vec<f64> = (0..40).map(|i| i as f64 / 20.0).collect();
//! let result = detect_events(&[0.1, 0.2, 1.6], 2.0, &times, &config).unwrap();
//! assert_eq!(result.total_event_count, 2);
//! ```

/// Crate version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod detector;
pub mod edges;
pub mod error;
pub mod result;
pub mod window;

pub use detector::detect_events;
pub use edges::{scan_edges, Edges};
pub use error::{DetectionError, Result};
pub use result::{DetectionResult, EventInterval};
pub use window::{window_rates, WindowConfig};
