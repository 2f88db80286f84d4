//! prereq - Check, install and uninstall development dependencies.
//!
//! A dependency is a named tool with a shell check command, an optional
//! pattern its output must match, prerequisites, and ordered install and
//! uninstall scripts. Installing walks prerequisites first, runs the
//! scripts, then polls the check until the tool shows up.
//!
//! # Modules
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`config`] - Configuration loading, parsing, and validation
//! - [`dependency`] - Dependency model, lifecycle operations and registry
//! - [`error`] - Error types and result aliases
//! - [`shell`] - Shell command execution
//! - [`ui`] - Terminal output and status lines
//!
//! # Example
//!
//! ```
//! use prereq::dependency::DependencyRegistry;
//!
//! let registry = DependencyRegistry::new();
//! let docker = registry.resolve("docker").unwrap();
//!
//! assert_eq!(docker.prerequisites[0].name, "Homebrew");
//! assert!(docker.can_install());
//! ```

pub mod cli;
pub mod config;
pub mod dependency;
pub mod error;
pub mod shell;
pub mod ui;

pub use error::{PrereqError, Result};
