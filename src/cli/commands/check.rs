//! Check command implementation.
//!
//! The `prereq check` command reports which dependencies are installed.

use std::path::{Path, PathBuf};

use crate::cli::args::CheckArgs;
use crate::dependency::{Lifecycle, SystemClock};
use crate::error::Result;
use crate::shell::SystemShell;
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};
use super::project::Project;

/// The check command implementation.
pub struct CheckCommand {
    project_root: PathBuf,
    config_override: Option<PathBuf>,
    args: CheckArgs,
}

impl CheckCommand {
    /// Create a new check command.
    pub fn new(project_root: &Path, config_override: Option<&Path>, args: CheckArgs) -> Self {
        Self {
            project_root: project_root.to_path_buf(),
            config_override: config_override.map(Path::to_path_buf),
            args,
        }
    }
}

impl Command for CheckCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let project = Project::load(&self.project_root, self.config_override.as_deref())?;
        project.apply_output_mode(ui);

        let ids: Vec<String> = if self.args.ids.is_empty() {
            project.registry().ids().into_iter().map(String::from).collect()
        } else {
            self.args.ids.clone()
        };

        // Resolve everything up front so a typo fails before any command runs
        let dependencies = ids
            .iter()
            .map(|id| project.registry().resolve(id))
            .collect::<Result<Vec<_>>>()?;

        let shell = SystemShell::in_dir(project.root());
        let clock = SystemClock;
        let settings = project.lifecycle_settings();
        let mut missing = 0;

        for dependency in &dependencies {
            ui.pending(&format!("{}:", dependency.name));

            let outcome = {
                let lifecycle = Lifecycle::new(&shell, ui, &clock).with_settings(settings);
                dependency.check(&lifecycle)
            };

            match outcome {
                Ok(true) => ui.print_ok(),
                Ok(false) => {
                    ui.print_not_ok();
                    missing += 1;
                }
                Err(e) => {
                    ui.print_not_ok();
                    ui.warning(&e.to_string());
                    missing += 1;
                }
            }
        }

        if missing > 0 {
            ui.error(&format!(
                "{} of {} dependencies missing",
                missing,
                dependencies.len()
            ));
            return Ok(CommandResult::failure(1));
        }

        ui.success("All dependencies installed");
        Ok(CommandResult::success())
    }
}
