//! Shared project loading for dependency commands.

use std::path::{Path, PathBuf};

use crate::config::{load_config, validate, PrereqConfig};
use crate::dependency::{DependencyRegistry, LifecycleSettings};
use crate::error::Result;
use crate::ui::{OutputMode, UserInterface};

/// A loaded project: validated config plus the registry built from it.
pub struct Project {
    root: PathBuf,
    config: PrereqConfig,
    registry: DependencyRegistry,
}

impl Project {
    /// Load and validate the config for `root`.
    ///
    /// With `config_override` only that file is read; otherwise the user,
    /// project and local files are merged. No config at all is fine and
    /// leaves just the built-in dependencies.
    pub fn load(root: &Path, config_override: Option<&Path>) -> Result<Self> {
        let config = load_config(root, config_override)?;
        validate(&config)?;
        let registry = DependencyRegistry::with_config(&config);

        Ok(Self {
            root: root.to_path_buf(),
            config,
            registry,
        })
    }

    /// Project root directory; shell commands run here.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// The merged configuration.
    pub fn config(&self) -> &PrereqConfig {
        &self.config
    }

    /// Registry of built-in and configured dependencies.
    pub fn registry(&self) -> &DependencyRegistry {
        &self.registry
    }

    /// Engine settings taken from config.
    pub fn lifecycle_settings(&self) -> LifecycleSettings {
        LifecycleSettings::from(&self.config.settings)
    }

    /// Apply config `default_output` when no CLI flag was explicitly set.
    pub fn apply_output_mode(&self, ui: &mut dyn UserInterface) {
        if ui.output_mode() == OutputMode::Normal {
            ui.set_output_mode(self.config.settings.default_output.into());
        }
    }
}
