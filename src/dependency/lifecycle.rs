//! Check, install and uninstall for dependencies.
//!
//! [`Lifecycle`] bundles what the operations need from the outside world:
//! a [`ShellRunner`], a [`UserInterface`] for progress lines, and a
//! [`Clock`] for the post-install poll. Everything runs on the calling
//! thread, one command at a time.

use regex::RegexBuilder;
use std::time::Duration;

use crate::config::Settings;
use crate::error::{PrereqError, Result};
use crate::shell::{CommandResult, ShellRunner};
use crate::ui::{OutputMode, UserInterface};

use super::poll::{Clock, DEFAULT_POLL_ATTEMPTS, DEFAULT_POLL_INTERVAL};
use super::{Action, Dependency};

/// Exit code check commands use to say "not installed" (e.g. `which`).
const NOT_FOUND_EXIT_CODE: i32 = 1;

/// Default limit on prerequisite nesting.
pub const DEFAULT_MAX_DEPTH: usize = 16;

/// Tunables for lifecycle operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LifecycleSettings {
    /// Pause between post-install checks.
    pub poll_interval: Duration,
    /// Post-install checks before giving up.
    pub poll_attempts: u32,
    /// Deepest prerequisite nesting allowed.
    pub max_depth: usize,
}

impl Default for LifecycleSettings {
    fn default() -> Self {
        Self {
            poll_interval: DEFAULT_POLL_INTERVAL,
            poll_attempts: DEFAULT_POLL_ATTEMPTS,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl From<&Settings> for LifecycleSettings {
    fn from(settings: &Settings) -> Self {
        Self {
            poll_interval: Duration::from_secs(settings.poll_interval_secs),
            poll_attempts: settings.poll_attempts,
            max_depth: settings.max_depth,
        }
    }
}

/// Collaborators for lifecycle operations.
pub struct Lifecycle<'a> {
    shell: &'a dyn ShellRunner,
    ui: &'a mut dyn UserInterface,
    clock: &'a dyn Clock,
    settings: LifecycleSettings,
}

impl<'a> Lifecycle<'a> {
    /// Create a lifecycle context with default settings.
    pub fn new(
        shell: &'a dyn ShellRunner,
        ui: &'a mut dyn UserInterface,
        clock: &'a dyn Clock,
    ) -> Self {
        Self {
            shell,
            ui,
            clock,
            settings: LifecycleSettings::default(),
        }
    }

    /// Replace the settings.
    pub fn with_settings(mut self, settings: LifecycleSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Log "<label> k/count"; verbose output also shows what the step runs.
    fn announce(&mut self, label: &str, index: usize, count: usize, action: &Action) {
        self.ui
            .message(&format!("{} {}/{}", label, index + 1, count));
        if self.ui.output_mode() == OutputMode::Verbose {
            self.ui.message(&format!("  {}", action.describe()));
        }
    }

    /// Poll until `dependency` reports present or the attempt budget runs out.
    fn await_presence(&mut self, dependency: &Dependency) -> Result<()> {
        self.ui.pending("Waiting for installation check to pass:");

        let attempts = self.settings.poll_attempts.max(1);
        for attempt in 1..=attempts {
            match dependency.check(self) {
                Ok(true) => {
                    tracing::debug!("'{}' present after {} check(s)", dependency.name, attempt);
                    self.ui.print_ok();
                    return Ok(());
                }
                Ok(false) => {}
                Err(e) => {
                    self.ui.print_not_ok();
                    return Err(e);
                }
            }

            if attempt < attempts {
                self.clock.sleep(self.settings.poll_interval);
            }
        }

        self.ui.print_not_ok();
        Err(PrereqError::ConvergenceTimeout {
            name: dependency.name.clone(),
            attempts,
        })
    }
}

impl Dependency {
    /// Check whether the dependency is present.
    ///
    /// Exit code 1 from the check command means "not found" and is not an
    /// error; any other failure to run the check is returned as
    /// [`PrereqError::CheckFailed`]. A validation pattern that does not
    /// compile or does not match yields `Ok(false)`.
    pub fn check(&self, lifecycle: &Lifecycle<'_>) -> Result<bool> {
        let result = lifecycle
            .shell
            .run(&self.check_command)
            .map_err(|e| PrereqError::CheckFailed {
                dependency: self.name.clone(),
                command: self.check_command.clone(),
                code: None,
                message: e.to_string(),
            })?;

        if !result.success && result.exit_code != Some(NOT_FOUND_EXIT_CODE) {
            return Err(PrereqError::CheckFailed {
                dependency: self.name.clone(),
                command: self.check_command.clone(),
                code: result.exit_code,
                message: failure_message(&result),
            });
        }

        let output = result.stdout;

        if let Some(pattern) = self.check_validation.as_deref().filter(|p| !p.is_empty()) {
            if !output_matches(&self.name, pattern, &output) {
                return Ok(false);
            }
        }

        Ok(!output.is_empty())
    }

    /// Install the dependency, its prerequisites first.
    ///
    /// Returns immediately when already present. Otherwise installs every
    /// prerequisite in order, runs the install actions in order, then polls
    /// [`check`](Self::check) until the dependency shows up. The first
    /// failure aborts the whole sequence; nothing is rolled back.
    pub fn install(&self, lifecycle: &mut Lifecycle<'_>) -> Result<()> {
        self.install_at(lifecycle, 0)
    }

    fn install_at(&self, lifecycle: &mut Lifecycle<'_>, depth: usize) -> Result<()> {
        if depth > lifecycle.settings.max_depth {
            return Err(PrereqError::DepthExceeded {
                name: self.name.clone(),
                max_depth: lifecycle.settings.max_depth,
            });
        }

        match self.check(lifecycle) {
            Ok(true) => {
                lifecycle
                    .ui
                    .message(&format!("{} is already installed", self.name));
                return Ok(());
            }
            Ok(false) => {}
            Err(e) => {
                tracing::warn!("Presence check for '{}' failed: {}", self.name, e);
            }
        }

        if !self.can_install() {
            return Err(PrereqError::NoInstallScripts {
                name: self.name.clone(),
            });
        }

        for prerequisite in &self.prerequisites {
            lifecycle
                .ui
                .message(&format!("Validating subdependency {}", prerequisite.name));
            prerequisite.install_at(lifecycle, depth + 1)?;
        }

        let count = self.install_actions.len();
        for (index, action) in self.install_actions.iter().enumerate() {
            lifecycle.announce("Running installation script", index, count, action);
            tracing::debug!("{} install step {}: {}", self.name, index + 1, action.describe());
            action.run(lifecycle.shell)?;
        }

        lifecycle.await_presence(self)
    }

    /// Uninstall the dependency.
    ///
    /// Skips when the dependency is not present. A check that errors is
    /// also treated as "not present"; a warning says so. Prerequisites are
    /// left alone and there is no re-check afterwards.
    pub fn uninstall(&self, lifecycle: &mut Lifecycle<'_>) -> Result<()> {
        let installed = match self.check(lifecycle) {
            Ok(installed) => installed,
            Err(e) => {
                lifecycle.ui.warning(&format!(
                    "Could not check {}, treating it as not installed: {}",
                    self.name, e
                ));
                false
            }
        };

        if !installed {
            lifecycle
                .ui
                .message(&format!("{} is not installed", self.name));
            return Ok(());
        }

        if !self.can_uninstall() {
            return Err(PrereqError::NoUninstallScripts {
                name: self.name.clone(),
            });
        }

        let count = self.uninstall_actions.len();
        for (index, action) in self.uninstall_actions.iter().enumerate() {
            lifecycle.announce("Running uninstallation script", index, count, action);
            tracing::debug!("{} uninstall step {}: {}", self.name, index + 1, action.describe());
            action.run(lifecycle.shell)?;
        }

        Ok(())
    }
}

fn output_matches(name: &str, pattern: &str, output: &str) -> bool {
    match RegexBuilder::new(pattern).multi_line(true).build() {
        Ok(re) => re.is_match(output),
        Err(e) => {
            tracing::warn!("Invalid validation pattern for '{}': {}", name, e);
            false
        }
    }
}

fn failure_message(result: &CommandResult) -> String {
    let stderr = result.stderr.trim();
    match result.exit_code {
        Some(code) if stderr.is_empty() => format!("exited with code {}", code),
        Some(code) => format!("exited with code {}: {}", code, stderr),
        None => "terminated by signal".to_string(),
    }
}
