//! Dependency definitions.

use super::Action;

/// A named tool that can be checked for, installed and uninstalled.
///
/// Prerequisites are owned by value: every dependency carries full copies of
/// the dependencies it needs, so a definition never references shared state.
/// Definitions are immutable once built; the lifecycle operations in
/// [`lifecycle`](super::lifecycle) only read them.
#[derive(Debug, Clone)]
pub struct Dependency {
    /// Display name used in log lines and errors.
    pub name: String,
    /// Command whose successful, non-empty output signals presence.
    pub check_command: String,
    /// Pattern the check output must match, in multi-line mode.
    pub check_validation: Option<String>,
    /// Installed in order before this dependency's own install actions.
    pub prerequisites: Vec<Dependency>,
    pub install_actions: Vec<Action>,
    pub uninstall_actions: Vec<Action>,
}

impl Dependency {
    /// Create a dependency with only a name and check command.
    pub fn new(name: impl Into<String>, check_command: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            check_command: check_command.into(),
            check_validation: None,
            prerequisites: Vec::new(),
            install_actions: Vec::new(),
            uninstall_actions: Vec::new(),
        }
    }

    /// Require check output to match `pattern`.
    pub fn validate(mut self, pattern: impl Into<String>) -> Self {
        self.check_validation = Some(pattern.into());
        self
    }

    /// Add a prerequisite.
    pub fn requires(mut self, prerequisite: Dependency) -> Self {
        self.prerequisites.push(prerequisite);
        self
    }

    /// Append an install action.
    pub fn install_with(mut self, action: Action) -> Self {
        self.install_actions.push(action);
        self
    }

    /// Append an uninstall action.
    pub fn uninstall_with(mut self, action: Action) -> Self {
        self.uninstall_actions.push(action);
        self
    }

    /// Append a shell install step.
    pub fn install_script(self, command: impl Into<String>) -> Self {
        self.install_with(Action::shell(command))
    }

    /// Append a shell uninstall step.
    pub fn uninstall_script(self, command: impl Into<String>) -> Self {
        self.uninstall_with(Action::shell(command))
    }

    /// Whether install actions exist.
    pub fn can_install(&self) -> bool {
        !self.install_actions.is_empty()
    }

    /// Whether uninstall actions exist.
    pub fn can_uninstall(&self) -> bool {
        !self.uninstall_actions.is_empty()
    }
}
