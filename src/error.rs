//! Error types for prereq operations.
//!
//! This module defines [`PrereqError`], the primary error type used throughout
//! the crate, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - Use `PrereqError` for lifecycle failures that callers need to tell apart
//! - Use `anyhow::Error` (via `PrereqError::Other`) for unexpected errors
//! - A check output that fails validation is not an error; it is a negative
//!   presence result

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for prereq operations.
#[derive(Debug, Error)]
pub enum PrereqError {
    /// The check command failed for a reason other than the "not found" exit code.
    #[error("Check for '{dependency}' failed ({command}): {message}")]
    CheckFailed {
        dependency: String,
        command: String,
        code: Option<i32>,
        message: String,
    },

    /// Install was requested for a dependency without install scripts.
    #[error("{name} cannot be installed (no install scripts)")]
    NoInstallScripts { name: String },

    /// Uninstall was requested for a dependency without uninstall scripts.
    #[error("{name} cannot be uninstalled (no uninstall scripts)")]
    NoUninstallScripts { name: String },

    /// Shell command failed.
    #[error("Command failed with exit code {code:?}: {command}")]
    CommandFailed { command: String, code: Option<i32> },

    /// A function action reported failure.
    #[error("Action failed: {message}")]
    ActionFailed { message: String },

    /// Post-install polling never saw the dependency as present.
    #[error("Installation check for '{name}' did not pass after {attempts} attempts: timeout")]
    ConvergenceTimeout { name: String, attempts: u32 },

    /// Prerequisite nesting went deeper than allowed.
    #[error("Prerequisites of '{name}' nest deeper than {max_depth} levels")]
    DepthExceeded { name: String, max_depth: usize },

    /// No dependency is registered under this id.
    #[error("Unknown dependency: {name}")]
    UnknownDependency { name: String },

    /// Configuration file not found at expected location.
    #[error("Configuration not found: {path}")]
    ConfigNotFound { path: PathBuf },

    /// Failed to parse configuration file.
    #[error("Failed to parse config at {path}: {message}")]
    ConfigParseError { path: PathBuf, message: String },

    /// Invalid configuration structure or values.
    #[error("Invalid configuration: {message}")]
    ConfigValidationError { message: String },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias for prereq operations.
pub type Result<T> = std::result::Result<T, PrereqError>;
