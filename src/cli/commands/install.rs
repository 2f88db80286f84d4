//! Install command implementation.
//!
//! The `prereq install` command installs a dependency after its
//! prerequisites, then waits for its check to pass.

use std::path::{Path, PathBuf};

use crate::cli::args::InstallArgs;
use crate::dependency::{Lifecycle, SystemClock};
use crate::error::Result;
use crate::shell::SystemShell;
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};
use super::project::Project;

/// The install command implementation.
pub struct InstallCommand {
    project_root: PathBuf,
    config_override: Option<PathBuf>,
    args: InstallArgs,
}

impl InstallCommand {
    /// Create a new install command.
    pub fn new(project_root: &Path, config_override: Option<&Path>, args: InstallArgs) -> Self {
        Self {
            project_root: project_root.to_path_buf(),
            config_override: config_override.map(Path::to_path_buf),
            args,
        }
    }
}

impl Command for InstallCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let project = Project::load(&self.project_root, self.config_override.as_deref())?;
        project.apply_output_mode(ui);

        let dependency = project.registry().resolve(&self.args.id)?;
        tracing::debug!("Installing '{}' from {}", self.args.id, project.root().display());

        let shell = SystemShell::in_dir(project.root());
        let clock = SystemClock;
        {
            let mut lifecycle =
                Lifecycle::new(&shell, ui, &clock).with_settings(project.lifecycle_settings());
            dependency.install(&mut lifecycle)?;
        }

        ui.success(&format!("{} is installed", dependency.name));
        Ok(CommandResult::success())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CONFIG_DIR;
    use crate::error::PrereqError;
    use crate::ui::MockUI;
    use std::fs;
    use tempfile::TempDir;

    fn setup_project(config: &str) -> TempDir {
        let temp = TempDir::new().unwrap();
        let config_dir = temp.path().join(CONFIG_DIR);
        fs::create_dir_all(&config_dir).unwrap();
        fs::write(config_dir.join("config.yml"), config).unwrap();
        temp
    }

    fn install(temp: &TempDir, id: &str, ui: &mut MockUI) -> Result<CommandResult> {
        let args = InstallArgs { id: id.to_string() };
        InstallCommand::new(temp.path(), None, args).execute(ui)
    }

    #[test]
    fn already_installed_runs_nothing() {
        let temp = setup_project(
            r#"
dependencies:
  greeting:
    check: echo hello
    install: [touch installed.txt]
"#,
        );
        let mut ui = MockUI::new();

        let result = install(&temp, "greeting", &mut ui).unwrap();

        assert!(result.success);
        assert!(ui.has_message("greeting is already installed"));
        assert!(!temp.path().join("installed.txt").exists());
    }

    #[test]
    fn installs_marker_file_and_converges() {
        let temp = setup_project(
            r#"
settings:
  poll_interval_secs: 0
  poll_attempts: 2
dependencies:
  marker:
    check: cat marker.txt
    install: [echo present > marker.txt]
"#,
        );
        let mut ui = MockUI::new();

        let result = install(&temp, "marker", &mut ui).unwrap();

        assert!(result.success);
        assert!(temp.path().join("marker.txt").exists());
        assert!(ui.has_message("Running installation script 1/1"));
        assert_eq!(ui.statuses(), &[true]);
    }

    #[test]
    fn no_install_scripts_is_an_error() {
        let temp = setup_project("dependencies:\n  bare:\n    check: exit 1\n");
        let mut ui = MockUI::new();

        let err = install(&temp, "bare", &mut ui).unwrap_err();

        assert!(matches!(err, PrereqError::NoInstallScripts { .. }));
        assert_eq!(err.to_string(), "bare cannot be installed (no install scripts)");
    }

    #[test]
    fn unknown_id_is_an_error() {
        let temp = TempDir::new().unwrap();
        let mut ui = MockUI::new();

        assert!(matches!(
            install(&temp, "nope", &mut ui),
            Err(PrereqError::UnknownDependency { .. })
        ));
    }
}
