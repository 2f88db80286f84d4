//! Configuration schema definitions.
//!
//! This module contains the struct definitions that map to
//! the YAML configuration file format.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::dependency::{DEFAULT_MAX_DEPTH, DEFAULT_POLL_ATTEMPTS};

/// Root configuration structure for `.prereq/config.yml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PrereqConfig {
    /// Global settings
    pub settings: Settings,

    /// Custom dependency definitions, keyed by id
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub dependencies: BTreeMap<String, DependencyConfig>,
}

/// Engine and output settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Seconds to wait between post-install checks
    pub poll_interval_secs: u64,

    /// Post-install checks before giving up
    pub poll_attempts: u32,

    /// Deepest prerequisite nesting allowed
    pub max_depth: usize,

    /// Default output mode: verbose, normal, quiet
    pub default_output: OutputMode,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            poll_interval_secs: 1,
            poll_attempts: DEFAULT_POLL_ATTEMPTS,
            max_depth: DEFAULT_MAX_DEPTH,
            default_output: OutputMode::Normal,
        }
    }
}

/// Output mode options.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputMode {
    Verbose,
    #[default]
    Normal,
    Quiet,
}

/// A dependency declared in config.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DependencyConfig {
    /// Display name (defaults to the id)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Command whose non-empty output signals presence
    pub check: String,

    /// Pattern the check output must match
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub validate: Option<String>,

    /// Ids of dependencies to install first
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub requires: Vec<String>,

    /// Shell commands run in order to install
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub install: Vec<String>,

    /// Shell commands run in order to uninstall
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub uninstall: Vec<String>,
}
