// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! `--debug-<crate>` flags
//!
//! A flag names a workspace crate either in full (`--debug-snn-hfo-detection`) or
//! without the `snn-hfo-` prefix (`--debug-detection`). `--debug-all` covers every
//! crate in `KNOWN_CRATES`.

use std::collections::BTreeSet;
use std::env;

use crate::KNOWN_CRATES;

const CRATE_PREFIX: &str = "snn-hfo-";

/// Crates whose log level is raised to debug
///
/// ```rust
/// use snn_hfo_observability::CrateDebugFlags;
///
/// let flags = CrateDebugFlags::from_args(vec!["--debug-detection".to_string()]);
/// assert!(flags.is_enabled("snn-hfo-detection"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct CrateDebugFlags {
    pub enabled_crates: BTreeSet<String>,
    /// Names that matched no known crate, kept for a warning once logging is up
    pub unknown: Vec<String>,
}

impl CrateDebugFlags {
    /// Collect debug flags from an argument list; everything else is ignored.
    pub fn from_args<I>(args: I) -> Self
    where
        I: IntoIterator<Item = String>,
    {
        let mut flags = CrateDebugFlags::default();
        for arg in args {
            match arg.strip_prefix("--debug-") {
                Some("all") => flags.enable_all(),
                Some(name) => flags.enable(name),
                None => {}
            }
        }
        flags
    }

    pub(crate) fn enable_all(&mut self) {
        self.enabled_crates
            .extend(KNOWN_CRATES.iter().map(|c| c.to_string()));
    }

    pub(crate) fn enable(&mut self, name: &str) {
        match resolve_crate(name) {
            Some(crate_name) => {
                self.enabled_crates.insert(crate_name.to_string());
            }
            None => self.unknown.push(name.to_string()),
        }
    }

    pub fn is_enabled(&self, crate_name: &str) -> bool {
        self.enabled_crates.contains(crate_name)
    }

    pub fn any_enabled(&self) -> bool {
        !self.enabled_crates.is_empty()
    }

    /// `EnvFilter` directive: one `target=debug` per enabled crate, then `default_level`.
    /// `snn-hfo-detection` becomes the target `snn_hfo_detection`.
    pub fn to_filter_string(&self, default_level: &str) -> String {
        self.enabled_crates
            .iter()
            .map(|crate_name| format!("{}=debug", crate_name.replace('-', "_")))
            .chain(std::iter::once(default_level.to_string()))
            .collect::<Vec<_>>()
            .join(",")
    }
}

/// Full crate name for `name`, with or without the workspace prefix
fn resolve_crate(name: &str) -> Option<&'static str> {
    KNOWN_CRATES
        .iter()
        .copied()
        .find(|known| *known == name || known.strip_prefix(CRATE_PREFIX) == Some(name))
}

/// Debug flags from the process arguments plus `SNN_HFO_DEBUG`
/// (comma-separated crate names, or `all`).
pub fn parse_debug_flags() -> CrateDebugFlags {
    let mut flags = CrateDebugFlags::from_args(env::args());

    if let Ok(value) = env::var("SNN_HFO_DEBUG") {
        for name in value.split(',').map(str::trim).filter(|n| !n.is_empty()) {
            if name == "all" {
                flags.enable_all();
            } else {
                flags.enable(name);
            }
        }
    }

    flags
}

/// Help section appended to `--help`
pub fn debug_flags_help() -> String {
    let short: Vec<&str> = KNOWN_CRATES
        .iter()
        .filter_map(|c| c.strip_prefix(CRATE_PREFIX))
        .collect();
    format!(
        r#"Debug logging:
  --debug-all               Debug output from every crate
  --debug-<crate>           Debug output from one crate: {}
  SNN_HFO_DEBUG=<crate,..>  Same, from the environment (or SNN_HFO_DEBUG=all)"#,
        short.join(", ")
    )
}
