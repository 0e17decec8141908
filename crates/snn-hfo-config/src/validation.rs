// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Configuration validation
//!
//! This module provides validation logic to ensure configuration values are
//! consistent and within valid ranges before any network object is built.

use crate::{ConfigError, ConfigResult, Configuration};

/// Validation errors that can occur during config validation
#[derive(Debug, Clone)]
pub enum ConfigValidationError {
    NonPositive { field: String, value: f64 },
    InvertedRange { min_field: String, max_field: String },
    InvalidValue { field: String, reason: String },
}

impl std::fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NonPositive { field, value } => {
                write!(f, "{} = {} must be positive", field, value)
            }
            Self::InvertedRange { min_field, max_field } => {
                write!(f, "{} must not exceed {}", min_field, max_field)
            }
            Self::InvalidValue { field, reason } => {
                write!(f, "Invalid configuration value for {}: {}", field, reason)
            }
        }
    }
}

/// Validate the complete configuration
///
/// Checks for:
/// - A non-empty hidden layer
/// - Positive timestep, time constants and window sizes
/// - `step_size <= window_size`
/// - Ordered weight and tau ranges
///
/// # Errors
///
/// Returns `ConfigError::ValidationError` listing every violation found
pub fn validate_config(config: &Configuration) -> ConfigResult<()> {
    let mut errors = Vec::new();

    validate_network(config, &mut errors);
    validate_detection(config, &mut errors);
    validate_encoding(config, &mut errors);

    if !errors.is_empty() {
        let error_messages = errors
            .iter()
            .map(|e| format!("  - {}", e))
            .collect::<Vec<_>>()
            .join("\n");

        return Err(ConfigError::ValidationError(format!(
            "Configuration validation failed:\n{}",
            error_messages
        )));
    }

    Ok(())
}

fn require_positive(field: &str, value: f64, errors: &mut Vec<ConfigValidationError>) {
    if !(value.is_finite() && value > 0.0) {
        errors.push(ConfigValidationError::NonPositive {
            field: field.to_string(),
            value,
        });
    }
}

fn require_ordered(min_field: &str, min: f64, max_field: &str, max: f64, errors: &mut Vec<ConfigValidationError>) {
    if min > max {
        errors.push(ConfigValidationError::InvertedRange {
            min_field: min_field.to_string(),
            max_field: max_field.to_string(),
        });
    }
}

fn validate_network(config: &Configuration, errors: &mut Vec<ConfigValidationError>) {
    if config.hidden_neuron_count == 0 {
        errors.push(ConfigValidationError::InvalidValue {
            field: "hidden_neuron_count".to_string(),
            reason: "must be a positive integer".to_string(),
        });
    }

    let network = &config.network;
    require_positive("network.dt", network.dt, errors);
    require_positive("network.neuron.membrane_tau", network.neuron.membrane_tau, errors);
    if network.neuron.refractory_period < 0.0 {
        errors.push(ConfigValidationError::InvalidValue {
            field: "network.neuron.refractory_period".to_string(),
            reason: "must not be negative".to_string(),
        });
    }
    if network.neuron.threshold <= network.neuron.reset_potential {
        errors.push(ConfigValidationError::InvalidValue {
            field: "network.neuron.threshold".to_string(),
            reason: "must be above network.neuron.reset_potential".to_string(),
        });
    }

    let synapse = &network.synapse;
    require_ordered(
        "network.synapse.weight_min",
        synapse.weight_min,
        "network.synapse.weight_max",
        synapse.weight_max,
        errors,
    );
    require_positive("network.synapse.tau_min_ms", synapse.tau_min_ms, errors);
    require_ordered(
        "network.synapse.tau_min_ms",
        synapse.tau_min_ms,
        "network.synapse.tau_max_ms",
        synapse.tau_max_ms,
        errors,
    );
}

fn validate_detection(config: &Configuration, errors: &mut Vec<ConfigValidationError>) {
    let detection = &config.detection;
    require_positive("detection.step_size", detection.step_size, errors);
    require_positive("detection.window_size", detection.window_size, errors);
    require_ordered(
        "detection.step_size",
        detection.step_size,
        "detection.window_size",
        detection.window_size,
        errors,
    );
}

fn validate_encoding(config: &Configuration, errors: &mut Vec<ConfigValidationError>) {
    let encoding = &config.encoding;
    require_positive("encoding.threshold_factor", encoding.threshold_factor, errors);
    require_positive("encoding.baseline_duration", encoding.baseline_duration, errors);
    require_positive("encoding.baseline_window", encoding.baseline_window, errors);
    if encoding.refractory_period < 0.0 {
        errors.push(ConfigValidationError::InvalidValue {
            field: "encoding.refractory_period".to_string(),
            reason: "must not be negative".to_string(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = Configuration::default();
        let result = validate_config(&config);
        if let Err(e) = &result {
            eprintln!("Validation error: {}", e);
        }
        assert!(result.is_ok());
    }

    #[test]
    fn test_step_larger_than_window_is_rejected() {
        let mut config = Configuration::default();
        config.detection.step_size = 0.1;
        config.detection.window_size = 0.05;

        let result = validate_config(&config);
        match result {
            Err(ConfigError::ValidationError(msg)) => {
                assert!(msg.contains("detection.step_size must not exceed detection.window_size"));
            }
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_zero_hidden_neurons_is_rejected() {
        let mut config = Configuration::default();
        config.hidden_neuron_count = 0;

        let result = validate_config(&config);
        assert!(matches!(result, Err(ConfigError::ValidationError(ref msg)) if msg.contains("hidden_neuron_count")));
    }

    #[test]
    fn test_all_violations_are_reported_together() {
        let mut config = Configuration::default();
        config.network.dt = 0.0;
        config.network.synapse.tau_min_ms = 10.0;
        config.network.synapse.tau_max_ms = 1.0;

        let Err(ConfigError::ValidationError(msg)) = validate_config(&config) else {
            panic!("expected validation error");
        };
        assert!(msg.contains("network.dt"));
        assert!(msg.contains("network.synapse.tau_min_ms must not exceed"));
    }

    #[test]
    fn test_threshold_must_exceed_reset() {
        let mut config = Configuration::default();
        config.network.neuron.reset_potential = 2.0;

        assert!(validate_config(&config).is_err());
    }
}
