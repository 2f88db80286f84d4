//! CLI command implementations.
//!
//! Each command implements the [`Command`] trait, which provides a uniform
//! interface for executing commands and reporting results.
//!
//! # Architecture
//!
//! Commands are dispatched via [`CommandDispatcher`], which routes CLI
//! subcommands to their implementations. Commands that touch dependencies
//! load a [`Project`] first: merged config, validation and the registry.

pub mod check;
pub mod completions;
pub mod dispatcher;
pub mod install;
pub mod list;
pub mod project;
pub mod uninstall;

pub use dispatcher::{Command, CommandDispatcher, CommandResult};
pub use project::Project;
