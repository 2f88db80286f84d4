//! Shell command execution.

pub mod command;
pub mod mock;
pub mod platform;

pub use command::{
    execute, execute_interactive, execute_quiet, CommandOptions, CommandResult, ShellRunner,
    SystemShell,
};
pub use mock::{Reply, ScriptedShell};
pub use platform::is_ci;
