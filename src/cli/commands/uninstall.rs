//! Uninstall command implementation.
//!
//! The `prereq uninstall` command removes a single dependency. Its
//! prerequisites are left in place.

use std::path::{Path, PathBuf};

use crate::cli::args::UninstallArgs;
use crate::dependency::{Lifecycle, SystemClock};
use crate::error::Result;
use crate::shell::SystemShell;
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};
use super::project::Project;

/// The uninstall command implementation.
pub struct UninstallCommand {
    project_root: PathBuf,
    config_override: Option<PathBuf>,
    args: UninstallArgs,
}

impl UninstallCommand {
    /// Create a new uninstall command.
    pub fn new(project_root: &Path, config_override: Option<&Path>, args: UninstallArgs) -> Self {
        Self {
            project_root: project_root.to_path_buf(),
            config_override: config_override.map(Path::to_path_buf),
            args,
        }
    }
}

impl Command for UninstallCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let project = Project::load(&self.project_root, self.config_override.as_deref())?;
        project.apply_output_mode(ui);

        let dependency = project.registry().resolve(&self.args.id)?;

        let shell = SystemShell::in_dir(project.root());
        let clock = SystemClock;
        let mut lifecycle =
            Lifecycle::new(&shell, ui, &clock).with_settings(project.lifecycle_settings());
        dependency.uninstall(&mut lifecycle)?;

        Ok(CommandResult::success())
    }
}
