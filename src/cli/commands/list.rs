//! List command implementation.
//!
//! The `prereq list` command lists built-in and configured dependencies.

use std::path::{Path, PathBuf};

use crate::cli::args::ListArgs;
use crate::dependency::Source;
use crate::error::{PrereqError, Result};
use crate::ui::{PrereqTheme, UserInterface};

use super::dispatcher::{Command, CommandResult};
use super::project::Project;

/// The list command implementation.
pub struct ListCommand {
    project_root: PathBuf,
    config_override: Option<PathBuf>,
    args: ListArgs,
}

impl ListCommand {
    /// Create a new list command.
    pub fn new(project_root: &Path, config_override: Option<&Path>, args: ListArgs) -> Self {
        Self {
            project_root: project_root.to_path_buf(),
            config_override: config_override.map(Path::to_path_buf),
            args,
        }
    }

    /// Get the project root path.
    pub fn project_root(&self) -> &Path {
        &self.project_root
    }
}

impl Command for ListCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let project = Project::load(&self.project_root, self.config_override.as_deref())?;
        let summaries = project.registry().summaries()?;

        if self.args.json {
            let json = serde_json::to_string_pretty(&summaries)
                .map_err(|e| PrereqError::Other(e.into()))?;
            ui.message(&json);
            return Ok(CommandResult::success());
        }

        project.apply_output_mode(ui);
        let theme = PrereqTheme::detect();

        ui.message(&format!("  {}", theme.heading.apply_to("Dependencies:")));
        for summary in &summaries {
            let label = if summary.name == summary.id {
                String::new()
            } else {
                format!(" {}", theme.dim.apply_to(format!("({})", summary.name)))
            };
            let origin = match summary.source {
                Source::Builtin => String::new(),
                Source::Config => format!(" {}", theme.dim.apply_to("[config]")),
            };
            ui.message(&format!(
                "    {}{}{}",
                theme.id.apply_to(&summary.id),
                label,
                origin
            ));
            ui.message(&format!(
                "      {} {}",
                theme.dim.apply_to("check:"),
                theme.command.apply_to(&summary.check)
            ));

            if !summary.requires.is_empty() {
                ui.message(&format!(
                    "      {} {}",
                    theme.dim.apply_to("└── requires:"),
                    theme.dim.apply_to(summary.requires.join(", "))
                ));
            }
        }

        Ok(CommandResult::success())
    }
}
