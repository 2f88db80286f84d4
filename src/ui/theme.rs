//! Styles for status lines and dependency listings.

use console::Style;

/// Terminal styles used by [`TerminalUI`](super::TerminalUI) and `prereq list`.
#[derive(Debug, Clone)]
pub struct PrereqTheme {
    /// OK markers and success lines.
    pub ok: Style,
    /// NOT OK markers.
    pub not_ok: Style,
    pub warning: Style,
    pub error: Style,
    /// Secondary text such as labels and display names.
    pub dim: Style,
    /// Dependency ids.
    pub id: Style,
    /// Check commands and scripts.
    pub command: Style,
    /// Section headings.
    pub heading: Style,
}

impl Default for PrereqTheme {
    fn default() -> Self {
        Self::colored()
    }
}

impl PrereqTheme {
    /// Colored theme when the terminal supports it, plain otherwise.
    pub fn detect() -> Self {
        if should_use_colors() {
            Self::colored()
        } else {
            Self::plain()
        }
    }

    /// Colored theme.
    pub fn colored() -> Self {
        Self {
            ok: Style::new().green(),
            not_ok: Style::new().red().bold(),
            warning: Style::new().yellow(),
            error: Style::new().red().bold(),
            dim: Style::new().dim(),
            id: Style::new().cyan().bold(),
            command: Style::new().dim().italic(),
            heading: Style::new().bold().underlined(),
        }
    }

    /// Theme without any styling.
    pub fn plain() -> Self {
        let none = Style::new();
        Self {
            ok: none.clone(),
            not_ok: none.clone(),
            warning: none.clone(),
            error: none.clone(),
            dim: none.clone(),
            id: none.clone(),
            command: none.clone(),
            heading: none,
        }
    }

    pub fn format_success(&self, msg: &str) -> String {
        self.ok.apply_to(format!("✓ {}", msg)).to_string()
    }

    pub fn format_warning(&self, msg: &str) -> String {
        self.warning.apply_to(format!("! {}", msg)).to_string()
    }

    pub fn format_error(&self, msg: &str) -> String {
        self.error.apply_to(format!("✗ {}", msg)).to_string()
    }

    /// Marker closing a pending status line.
    pub fn format_status(&self, ok: bool) -> String {
        if ok {
            self.ok.apply_to("OK").to_string()
        } else {
            self.not_ok.apply_to("NOT OK").to_string()
        }
    }
}

/// Whether stdout should get colors.
///
/// Honors `NO_COLOR` (<https://no-color.org/>), which `--no-color` sets.
pub fn should_use_colors() -> bool {
    std::env::var_os("NO_COLOR").is_none() && console::Term::stdout().is_term()
}
