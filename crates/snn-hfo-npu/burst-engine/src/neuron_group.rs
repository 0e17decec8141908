// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! # Neuron Group
//!
//! Structure-of-arrays state for a population sharing one neuron model.
//!
//! ## Update order (per step)
//! 1. Neurons still refractory are held at the reset potential
//! 2. Everyone else integrates its input current
//! 3. Threshold check, reset and refractory start for the ones that fire

use snn_hfo_npu_neural::{ModelParameters, NeuralError, NeuronModel};

use crate::error::Result;

#[derive(Debug, Clone)]
pub struct NeuronGroup<M: NeuronModel> {
    model: M,
    params: M::Parameters,
    membrane_potentials: Vec<f64>,
    refractory_remaining: Vec<f64>,
}

/// Dynamic state of a group, as captured by a checkpoint
#[derive(Debug, Clone, PartialEq)]
pub struct GroupState {
    pub membrane_potentials: Vec<f64>,
    pub refractory_remaining: Vec<f64>,
}

impl<M: NeuronModel> NeuronGroup<M> {
    pub fn new(model: M, params: M::Parameters, size: usize) -> Result<Self> {
        if size == 0 {
            return Err(NeuralError::InvalidParameter("neuron group must not be empty".to_string()).into());
        }
        params
            .validate()
            .map_err(|reason| NeuralError::InvalidParameter(reason.to_string()))?;

        let initial = model.initial_potential(&params);
        Ok(Self {
            model,
            params,
            membrane_potentials: vec![initial; size],
            refractory_remaining: vec![0.0; size],
        })
    }

    pub fn len(&self) -> usize {
        self.membrane_potentials.len()
    }

    pub fn is_empty(&self) -> bool {
        self.membrane_potentials.is_empty()
    }

    pub fn model(&self) -> &M {
        &self.model
    }

    pub fn params(&self) -> &M::Parameters {
        &self.params
    }

    pub fn membrane_potentials(&self) -> &[f64] {
        &self.membrane_potentials
    }

    /// Advance every neuron by `dt`, appending the indices that fired to `fired`.
    pub fn update(&mut self, input_currents: &[f64], dt: f64, fired: &mut Vec<usize>) -> Result<()> {
        if input_currents.len() != self.len() {
            return Err(NeuralError::ArraySizeMismatch {
                expected: self.len(),
                actual: input_currents.len(),
            }
            .into());
        }

        let reset = self.model.reset_after_fire(&self.params);
        for (index, &current) in input_currents.iter().enumerate() {
            let refractory = self.refractory_remaining[index];
            let potential = if refractory > 0.0 {
                reset
            } else {
                self.model
                    .update_membrane_potential(self.membrane_potentials[index], current, &self.params, dt)
            };

            if self.model.should_fire(potential, &self.params, refractory) {
                fired.push(index);
                self.membrane_potentials[index] = reset;
                self.refractory_remaining[index] = self.model.refractory_period(&self.params);
            } else {
                self.membrane_potentials[index] = potential;
                self.refractory_remaining[index] = (refractory - dt).max(0.0);
            }
        }
        Ok(())
    }

    pub fn state(&self) -> GroupState {
        GroupState {
            membrane_potentials: self.membrane_potentials.clone(),
            refractory_remaining: self.refractory_remaining.clone(),
        }
    }

    /// Overwrite the dynamic state. Sizes must already have been checked by the caller.
    pub(crate) fn load_state(&mut self, state: &GroupState) {
        self.membrane_potentials.copy_from_slice(&state.membrane_potentials);
        self.refractory_remaining.copy_from_slice(&state.refractory_remaining);
    }
}
