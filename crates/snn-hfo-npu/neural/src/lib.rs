// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! # SNN-HFO Neural Computation (Platform-Agnostic)
//!
//! Everything the simulation engine needs that does not own network state:
//! - **Types**: spike trains, neuron ids, neuron counts, errors
//! - **Models**: the hidden-layer neuron model and exponential synapses
//! - **Encoding**: delta-modulation of filtered band signals into up/down spikes
//! - **Parameters**: per-synapse weight and time constant generation

/// Crate version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod encoding;
pub mod models;
pub mod parameters;
pub mod synapse;
pub mod types;

pub use encoding::{find_threshold, DeltaEncoder};
pub use models::{LIFModel, LIFParameters, ModelParameters, NeuronModel};
pub use parameters::{FixedParameters, SeededParameterGenerator, SynapseParameterSource, SynapseParameters};
pub use synapse::{decay_factor, SynapseType};
pub use types::{concatenate_band_spikes, BandSpikes, NeuralError, NeuronCount, NeuronId, Result, SpikeTrain};
