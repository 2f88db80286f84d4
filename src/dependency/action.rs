//! Install and uninstall steps.

use crate::error::Result;
use crate::shell::ShellRunner;
use std::fmt;
use std::sync::Arc;

/// Shared closure behind a function action.
pub type ActionFn = Arc<dyn Fn() -> Result<()> + Send + Sync>;

/// One step of an install or uninstall sequence.
///
/// Actions are cheap to clone so a [`Dependency`](super::Dependency) can own
/// full copies of its prerequisites.
#[derive(Clone)]
pub enum Action {
    /// Run an arbitrary fallible closure.
    Function(ActionFn),

    /// Run a shell command attached to the terminal.
    Shell(String),
}

impl Action {
    /// Create a function action.
    pub fn function<F>(f: F) -> Self
    where
        F: Fn() -> Result<()> + Send + Sync + 'static,
    {
        Action::Function(Arc::new(f))
    }

    /// Create a shell-command action.
    pub fn shell(command: impl Into<String>) -> Self {
        Action::Shell(command.into())
    }

    /// Run the action.
    ///
    /// Shell actions go through [`ShellRunner::run_interactive`], so their
    /// output reaches the terminal directly and only success or failure
    /// comes back.
    pub fn run(&self, shell: &dyn ShellRunner) -> Result<()> {
        match self {
            Action::Function(f) => f(),
            Action::Shell(command) => shell.run_interactive(command),
        }
    }

    /// Short human-readable description for listings.
    pub fn describe(&self) -> &str {
        match self {
            Action::Function(_) => "<function>",
            Action::Shell(command) => command,
        }
    }
}

impl fmt::Debug for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Function(_) => f.write_str("Function(..)"),
            Action::Shell(command) => f.debug_tuple("Shell").field(command).finish(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PrereqError;
    use crate::shell::mock::ScriptedShell;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn function_action_runs_closure() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let action = Action::function(move || {
            counter.fetch_add(1, Ordering::SeqCst);
            Ok(())
        });
        let shell = ScriptedShell::new();

        action.run(&shell).unwrap();
        action.run(&shell).unwrap();

        assert_eq!(calls.load(Ordering::SeqCst), 2);
        assert!(shell.interactive_commands().is_empty());
    }

    #[test]
    fn function_action_propagates_error() {
        let action = Action::function(|| {
            Err(PrereqError::ActionFailed {
                message: "disk full".into(),
            })
        });
        let err = action.run(&ScriptedShell::new()).unwrap_err();
        assert!(err.to_string().contains("disk full"));
    }

    #[test]
    fn shell_action_delegates_to_interactive_runner() {
        let shell = ScriptedShell::new();
        Action::shell("brew install git").run(&shell).unwrap();
        assert_eq!(shell.interactive_commands(), vec!["brew install git"]);
        assert_eq!(shell.capture_count("brew install git"), 0);
    }

    #[test]
    fn shell_action_failure_is_command_failed() {
        let shell = ScriptedShell::new();
        shell.fail_interactive("brew install --cask docker", 1);
        let err = Action::shell("brew install --cask docker")
            .run(&shell)
            .unwrap_err();
        assert!(matches!(
            err,
            PrereqError::CommandFailed { code: Some(1), .. }
        ));
    }

    #[test]
    fn clones_share_the_closure() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let action = Action::function(move || {
            counter.fetch_add(1, Ordering::SeqCst);
            Ok(())
        });
        let copy = action.clone();
        let shell = ScriptedShell::new();

        action.run(&shell).unwrap();
        copy.run(&shell).unwrap();

        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn describe_and_debug() {
        let shell = Action::shell("which brew");
        assert_eq!(shell.describe(), "which brew");
        assert_eq!(format!("{:?}", shell), "Shell(\"which brew\")");
        let func = Action::function(|| Ok(()));
        assert_eq!(func.describe(), "<function>");
        assert_eq!(format!("{:?}", func), "Function(..)");
    }
}
