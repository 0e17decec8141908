// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! # Neuron Model Architecture
//!
//! The hidden population is simulated through the `NeuronModel` trait so the engine
//! never hard-codes the membrane equations.
//!
//! ## Adding a New Neuron Model
//!
//! 1. Create `src/models/your_model.rs`
//! 2. Implement `NeuronModel` and `ModelParameters`
//! 3. Add tests
//! 4. Export in `mod.rs`

pub mod lif;
pub mod traits;

pub use lif::{LIFModel, LIFParameters};
pub use traits::{ModelParameters, NeuronModel};
