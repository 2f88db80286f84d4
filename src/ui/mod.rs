//! Status output for the lifecycle engine and CLI.
//!
//! This module provides:
//! - [`UserInterface`] trait, the logger the engine reports progress through
//! - [`TerminalUI`] for real terminal output
//! - [`MockUI`] which records every line for assertions
//!
//! # Example
//!
//! ```
//! use prereq::ui::{MockUI, UserInterface};
//!
//! let mut ui = MockUI::new();
//! ui.pending("Waiting for installation check to pass");
//! ui.print_ok();
//! assert_eq!(ui.statuses(), &[true]);
//! ```

pub mod mock;
pub mod output;
pub mod terminal;
pub mod theme;

pub use mock::MockUI;
pub use output::OutputMode;
pub use terminal::TerminalUI;
pub use theme::{should_use_colors, PrereqTheme};

/// Trait for user-facing status output.
///
/// The lifecycle engine only ever writes through this trait, so tests can
/// swap in [`MockUI`] and assert on what was reported.
pub trait UserInterface {
    /// Get the current output mode.
    fn output_mode(&self) -> OutputMode;

    /// Set the output mode.
    fn set_output_mode(&mut self, mode: OutputMode);

    /// Display a message to the user.
    fn message(&mut self, msg: &str);

    /// Display a success message.
    fn success(&mut self, msg: &str);

    /// Display a warning message.
    fn warning(&mut self, msg: &str);

    /// Display an error message.
    fn error(&mut self, msg: &str);

    /// Start a status line that a later [`print_ok`](Self::print_ok) or
    /// [`print_not_ok`](Self::print_not_ok) completes.
    fn pending(&mut self, msg: &str);

    /// Finish the pending status line with an OK marker.
    fn print_ok(&mut self);

    /// Finish the pending status line with a NOT OK marker.
    fn print_not_ok(&mut self);
}
