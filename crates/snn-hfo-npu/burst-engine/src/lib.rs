// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! # SNN-HFO Burst Engine
//!
//! Fixed-step simulation of a persistent hidden population, extended per
//! invocation with a transient input layer and its synapses.
//!
//! ## Architecture
//! - `Network`: clock, hidden `NeuronGroup`, `SpikeMonitor`, checkpoint, and at most
//!   one attached `TransientSubnetwork`
//! - `SimulationCore`: lazy build, then restore -> attach -> run -> detach per invocation
//! - Single-threaded; every mutating call takes `&mut self`

/// Crate version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod clock;
pub mod error;
pub mod input;
pub mod lifecycle;
pub mod monitor;
pub mod network;
pub mod neuron_group;
pub mod synapses;

pub use clock::SimulationClock;
pub use error::{EngineError, Result};
pub use input::SpikeGeneratorGroup;
pub use lifecycle::{read_neuron_counts, CoreState, NetworkModel, SimulationCore};
pub use monitor::SpikeMonitor;
pub use network::{AttachedSubnetwork, Network, NetworkCheckpoint, TransientSubnetwork};
pub use neuron_group::{GroupState, NeuronGroup};
pub use synapses::Synapses;
