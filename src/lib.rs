// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! # SNN-HFO - Spiking Neural Network HFO Detection
//!
//! Detects high frequency oscillations (ripples and fast ripples) in EEG
//! recordings by feeding spike-encoded band signals to a small spiking network
//! and marking the periods where its hidden layer is active.
//!
//! ## Quick Start
//!
//! ```toml
//! [dependencies]
//! snn-hfo = "0.1"  # Default: full pipeline
//! ```
//!
//! ## Feature Flags
//! - **`engine`**: simulation network and the simulation core lifecycle
//! - **`detection`**: event boundary detector
//! - **`runner`** (default): dataset driver, implies both of the above
//!
//! Configuration and the neural types are always available.
//!
//! ## Usage
//!
//! ```rust
//! use snn_hfo::prelude::*;
//!
//! let window = WindowConfig::new(0.5, 0.5)?;
//! let times: Vec<f64> = (0..40).map(|i| i as f64 / 20.0).collect();
//! let result = detect_events(&[0.1, 0.2, 1.6], 2.0, &times, &window)?;
//! assert_eq!(result.total_event_count, 2);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

// Re-export foundation
pub use snn_hfo_config as config;
pub use snn_hfo_npu_neural as neural;

// Re-export algorithms
#[cfg(feature = "engine")]
pub use snn_hfo_npu_burst_engine as engine;

#[cfg(feature = "detection")]
pub use snn_hfo_detection as detection;

// Re-export application layer
#[cfg(feature = "runner")]
pub use snn_hfo_runner as runner;

/// Prelude - commonly used types and traits
pub mod prelude {
    pub use crate::config::{Configuration, CustomOverrides, FrequencyBand, MeasurementMode};
    pub use crate::neural::{BandSpikes, DeltaEncoder, LIFModel, SeededParameterGenerator, SpikeTrain};

    #[cfg(feature = "engine")]
    pub use crate::engine::{SimulationCore, SpikeMonitor};

    #[cfg(feature = "detection")]
    pub use crate::detection::{detect_events, DetectionResult, EventInterval, WindowConfig};

    #[cfg(feature = "runner")]
    pub use crate::runner::{Dataset, HfoPipeline, RunReport};
}
