// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! # Neural Types Module
//!
//! Core type definitions shared by the encoder, the engine and the detector.

pub mod error;
pub mod ids;
pub mod neuron_count;
pub mod spikes;

pub use error::{NeuralError, Result};
pub use ids::NeuronId;
pub use neuron_count::NeuronCount;
pub use spikes::{concatenate_band_spikes, BandSpikes, SpikeTrain};
