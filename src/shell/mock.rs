//! Scripted shell runner for testing.
//!
//! `ScriptedShell` implements [`ShellRunner`] without spawning processes.
//! Capturing runs return pre-configured results; interactive runs are
//! recorded and succeed unless told to fail.
//!
//! # Example
//!
//! ```
//! use prereq::shell::{ScriptedShell, ShellRunner};
//!
//! let shell = ScriptedShell::new();
//! shell.respond("git --version", 0, "git version 2.30.0\n");
//!
//! let result = shell.run("git --version").unwrap();
//! assert_eq!(result.exit_code, Some(0));
//! assert_eq!(shell.capture_count("git --version"), 1);
//! ```

use std::cell::RefCell;
use std::collections::{HashMap, VecDeque};
use std::time::Duration;

use crate::error::{PrereqError, Result};

use super::{CommandResult, ShellRunner};

/// A canned reply to a capturing run.
#[derive(Debug, Clone)]
pub enum Reply {
    /// The command ran and exited with this code and stdout.
    Exit { code: i32, stdout: String },
    /// The command was killed by a signal.
    Signal,
    /// The command could not be spawned.
    SpawnError,
}

impl Reply {
    fn into_result(self, command: &str) -> Result<CommandResult> {
        match self {
            Reply::Exit { code: 0, stdout } => {
                Ok(CommandResult::success(stdout, String::new(), Duration::ZERO))
            }
            Reply::Exit { code, stdout } => Ok(CommandResult::failure(
                Some(code),
                stdout,
                String::new(),
                Duration::ZERO,
            )),
            Reply::Signal => Ok(CommandResult::failure(
                None,
                String::new(),
                String::new(),
                Duration::ZERO,
            )),
            Reply::SpawnError => Err(PrereqError::CommandFailed {
                command: command.to_string(),
                code: None,
            }),
        }
    }
}

/// Shell runner that replays scripted replies.
///
/// Each command has a queue of replies. The last reply in a queue repeats
/// forever. Commands without replies behave like a missing tool: exit code
/// 1 and no output.
#[derive(Debug, Default)]
pub struct ScriptedShell {
    replies: RefCell<HashMap<String, VecDeque<Reply>>>,
    interactive_failures: RefCell<HashMap<String, i32>>,
    captured: RefCell<Vec<String>>,
    interactive: RefCell<Vec<String>>,
}

impl ScriptedShell {
    /// Create a shell with no scripted replies.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reply to `command` with an exit code and stdout.
    pub fn respond(&self, command: &str, code: i32, stdout: &str) {
        self.respond_with(
            command,
            vec![Reply::Exit {
                code,
                stdout: stdout.to_string(),
            }],
        );
    }

    /// Reply to successive runs of `command` in order.
    pub fn respond_with(&self, command: &str, replies: Vec<Reply>) {
        self.replies
            .borrow_mut()
            .insert(command.to_string(), replies.into());
    }

    /// Make interactive runs of `command` exit with `code`.
    pub fn fail_interactive(&self, command: &str, code: i32) {
        self.interactive_failures
            .borrow_mut()
            .insert(command.to_string(), code);
    }

    /// How many times `command` was run in capturing mode.
    pub fn capture_count(&self, command: &str) -> usize {
        self.captured
            .borrow()
            .iter()
            .filter(|c| c.as_str() == command)
            .count()
    }

    /// Interactive commands in the order they ran.
    pub fn interactive_commands(&self) -> Vec<String> {
        self.interactive.borrow().clone()
    }
}

impl ShellRunner for ScriptedShell {
    fn run(&self, command: &str) -> Result<CommandResult> {
        self.captured.borrow_mut().push(command.to_string());

        let reply = {
            let mut replies = self.replies.borrow_mut();
            match replies.get_mut(command) {
                Some(queue) if queue.len() > 1 => queue.pop_front(),
                Some(queue) => queue.front().cloned(),
                None => None,
            }
        };

        reply
            .unwrap_or(Reply::Exit {
                code: 1,
                stdout: String::new(),
            })
            .into_result(command)
    }

    fn run_interactive(&self, command: &str) -> Result<()> {
        self.interactive.borrow_mut().push(command.to_string());

        match self.interactive_failures.borrow().get(command) {
            Some(code) => Err(PrereqError::CommandFailed {
                command: command.to_string(),
                code: Some(*code),
            }),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unscripted_command_looks_missing() {
        let shell = ScriptedShell::new();
        let result = shell.run("which nothing").unwrap();
        assert_eq!(result.exit_code, Some(1));
        assert!(result.stdout.is_empty());
    }

    #[test]
    fn last_reply_repeats() {
        let shell = ScriptedShell::new();
        shell.respond_with(
            "which brew",
            vec![
                Reply::Exit {
                    code: 1,
                    stdout: String::new(),
                },
                Reply::Exit {
                    code: 0,
                    stdout: "/opt/homebrew/bin/brew\n".into(),
                },
            ],
        );

        assert_eq!(shell.run("which brew").unwrap().exit_code, Some(1));
        assert_eq!(shell.run("which brew").unwrap().exit_code, Some(0));
        assert_eq!(shell.run("which brew").unwrap().exit_code, Some(0));
        assert_eq!(shell.capture_count("which brew"), 3);
    }

    #[test]
    fn spawn_error_and_signal() {
        let shell = ScriptedShell::new();
        shell.respond_with("a", vec![Reply::SpawnError]);
        shell.respond_with("b", vec![Reply::Signal]);

        assert!(shell.run("a").is_err());
        let result = shell.run("b").unwrap();
        assert_eq!(result.exit_code, None);
        assert!(!result.success);
    }

    #[test]
    fn interactive_runs_are_recorded() {
        let shell = ScriptedShell::new();
        shell.fail_interactive("false", 2);

        assert!(shell.run_interactive("true").is_ok());
        assert!(shell.run_interactive("false").is_err());
        assert_eq!(shell.interactive_commands(), vec!["true", "false"]);
    }
}
