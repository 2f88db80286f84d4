//! Shell command execution.

use crate::error::{PrereqError, Result};
use std::path::Path;
use std::process::{Command, Stdio};
use std::time::{Duration, Instant};

/// Result of executing a shell command.
#[derive(Debug, Clone)]
pub struct CommandResult {
    /// Exit code (None if killed by signal).
    pub exit_code: Option<i32>,

    /// Standard output.
    pub stdout: String,

    /// Standard error.
    pub stderr: String,

    /// Execution duration.
    pub duration: Duration,

    /// Whether command succeeded (exit code 0).
    pub success: bool,
}

impl CommandResult {
    /// Create a success result.
    pub fn success(stdout: String, stderr: String, duration: Duration) -> Self {
        Self {
            exit_code: Some(0),
            stdout,
            stderr,
            duration,
            success: true,
        }
    }

    /// Create a failure result.
    pub fn failure(
        exit_code: Option<i32>,
        stdout: String,
        stderr: String,
        duration: Duration,
    ) -> Self {
        Self {
            exit_code,
            stdout,
            stderr,
            duration,
            success: false,
        }
    }
}

/// Options for command execution.
#[derive(Debug, Clone, Default)]
pub struct CommandOptions {
    /// Working directory.
    pub cwd: Option<std::path::PathBuf>,

    /// Capture stdout (if false, inherits from parent).
    pub capture_stdout: bool,

    /// Capture stderr (if false, inherits from parent).
    pub capture_stderr: bool,
}

/// Runs shell commands on behalf of the lifecycle engine.
///
/// The capturing [`run`](ShellRunner::run) reports non-zero exits through
/// [`CommandResult::exit_code`] and only returns `Err` when the command could
/// not be executed at all. [`run_interactive`](ShellRunner::run_interactive)
/// hands the terminal to the child and maps any non-zero exit to
/// [`PrereqError::CommandFailed`].
pub trait ShellRunner {
    /// Run a command and capture its output.
    fn run(&self, command: &str) -> Result<CommandResult>;

    /// Run a command attached to the controlling terminal.
    fn run_interactive(&self, command: &str) -> Result<()>;
}

/// [`ShellRunner`] backed by the user's shell.
#[derive(Debug, Clone, Default)]
pub struct SystemShell {
    cwd: Option<std::path::PathBuf>,
}

impl SystemShell {
    /// Create a runner that executes in the current directory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a runner that executes in `cwd`.
    pub fn in_dir(cwd: &Path) -> Self {
        Self {
            cwd: Some(cwd.to_path_buf()),
        }
    }
}

impl ShellRunner for SystemShell {
    fn run(&self, command: &str) -> Result<CommandResult> {
        execute_quiet(command, self.cwd.as_deref())
    }

    fn run_interactive(&self, command: &str) -> Result<()> {
        let options = CommandOptions {
            cwd: self.cwd.clone(),
            ..Default::default()
        };
        execute_interactive(command, &options)
    }
}

fn shell_command(command: &str, options: &CommandOptions) -> Command {
    let mut cmd = Command::new(user_shell());
    cmd.arg(shell_flag()).arg(command);

    if let Some(cwd) = &options.cwd {
        cmd.current_dir(cwd);
    }

    cmd
}

/// Execute a shell command.
pub fn execute(command: &str, options: &CommandOptions) -> Result<CommandResult> {
    let start = Instant::now();

    let mut cmd = shell_command(command, options);

    // Configure stdio
    if options.capture_stdout {
        cmd.stdout(Stdio::piped());
    } else {
        cmd.stdout(Stdio::inherit());
    }

    if options.capture_stderr {
        cmd.stderr(Stdio::piped());
    } else {
        cmd.stderr(Stdio::inherit());
    }

    tracing::debug!("Executing: {}", command);

    let output = cmd.output().map_err(|e| {
        tracing::debug!("Failed to spawn '{}': {}", command, e);
        PrereqError::CommandFailed {
            command: command.to_string(),
            code: None,
        }
    })?;

    let duration = start.elapsed();

    let stdout = if options.capture_stdout {
        String::from_utf8_lossy(&output.stdout).to_string()
    } else {
        String::new()
    };

    let stderr = if options.capture_stderr {
        String::from_utf8_lossy(&output.stderr).to_string()
    } else {
        String::new()
    };

    tracing::debug!(
        "'{}' exited with {:?} in {:?}",
        command,
        output.status.code(),
        duration
    );

    if output.status.success() {
        Ok(CommandResult::success(stdout, stderr, duration))
    } else {
        Ok(CommandResult::failure(
            output.status.code(),
            stdout,
            stderr,
            duration,
        ))
    }
}

/// Execute a command and collect output without streaming.
pub fn execute_quiet(command: &str, cwd: Option<&Path>) -> Result<CommandResult> {
    let options = CommandOptions {
        cwd: cwd.map(|p| p.to_path_buf()),
        capture_stdout: true,
        capture_stderr: true,
        ..Default::default()
    };
    execute(command, &options)
}

/// Execute a command with stdin, stdout and stderr attached to the terminal.
///
/// Used for installer scripts that may ask the user for input (passwords,
/// license prompts). Nothing is captured.
pub fn execute_interactive(command: &str, options: &CommandOptions) -> Result<()> {
    let mut cmd = shell_command(command, options);
    cmd.stdin(Stdio::inherit())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit());

    tracing::debug!("Executing interactively: {}", command);

    let status = cmd.status().map_err(|e| {
        tracing::debug!("Failed to spawn '{}': {}", command, e);
        PrereqError::CommandFailed {
            command: command.to_string(),
            code: None,
        }
    })?;

    if status.success() {
        Ok(())
    } else {
        Err(PrereqError::CommandFailed {
            command: command.to_string(),
            code: status.code(),
        })
    }
}

/// The user's login shell, `/bin/sh` when `$SHELL` is unset.
fn user_shell() -> String {
    std::env::var("SHELL").unwrap_or_else(|_| "/bin/sh".to_string())
}

/// Flag that hands the command string to the shell.
///
/// `-lic` loads both the login profile and the interactive rc files, which
/// is where `brew shellenv` and fastlane's PATH export usually live. CI has
/// no TTY for `-i` to take over, so it gets `-lc`.
fn shell_flag() -> &'static str {
    if super::is_ci() {
        "-lc"
    } else {
        "-lic"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn execute_successful_command() {
        let options = CommandOptions {
            capture_stdout: true,
            capture_stderr: true,
            ..Default::default()
        };

        let result = execute("echo hello", &options).unwrap();

        assert!(result.success);
        assert_eq!(result.exit_code, Some(0));
        assert!(result.stdout.contains("hello"));
    }

    #[test]
    fn execute_failing_command_reports_exit_code() {
        let options = CommandOptions {
            capture_stdout: true,
            capture_stderr: true,
            ..Default::default()
        };

        let result = execute("exit 3", &options).unwrap();

        assert!(!result.success);
        assert_eq!(result.exit_code, Some(3));
    }

    #[test]
    fn system_shell_runs_in_directory() {
        let temp = tempfile::TempDir::new().unwrap();
        std::fs::write(temp.path().join("marker.txt"), "x").unwrap();
        let shell = SystemShell::in_dir(temp.path());

        let result = shell.run("ls").unwrap();

        assert!(result.success);
        assert!(result.stdout.contains("marker.txt"));
    }

    #[test]
    fn interactive_failure_maps_to_command_failed() {
        let shell = SystemShell::new();
        let err = shell.run_interactive("exit 4").unwrap_err();
        match err {
            PrereqError::CommandFailed { command, code } => {
                assert_eq!(command, "exit 4");
                assert_eq!(code, Some(4));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn interactive_success() {
        let shell = SystemShell::new();
        assert!(shell.run_interactive("exit 0").is_ok());
    }

    #[test]
    fn ci_drops_interactive_flag() {
        let saved = std::env::var("CI").ok();
        std::env::set_var("CI", "true");

        let flag = shell_flag();

        match saved {
            Some(val) => std::env::set_var("CI", val),
            None => std::env::remove_var("CI"),
        }
        assert_eq!(flag, "-lc");
    }
}
