//! Terminal UI.

use console::Term;
use std::io::Write;

use super::{OutputMode, PrereqTheme, UserInterface};

/// Terminal UI implementation.
pub struct TerminalUI {
    term: Term,
    theme: PrereqTheme,
    mode: OutputMode,
    /// Text of a pending status line that quiet mode held back.
    held: Option<String>,
}

impl TerminalUI {
    /// Create a new terminal UI.
    pub fn new(mode: OutputMode) -> Self {
        Self {
            term: Term::stdout(),
            theme: PrereqTheme::detect(),
            mode,
            held: None,
        }
    }
}

impl UserInterface for TerminalUI {
    fn output_mode(&self) -> OutputMode {
        self.mode
    }

    fn set_output_mode(&mut self, mode: OutputMode) {
        self.mode = mode;
    }

    fn message(&mut self, msg: &str) {
        if self.mode.shows_progress() {
            writeln!(self.term, "{}", msg).ok();
        }
    }

    fn success(&mut self, msg: &str) {
        if self.mode.shows_progress() {
            writeln!(self.term, "{}", self.theme.format_success(msg)).ok();
        }
    }

    fn warning(&mut self, msg: &str) {
        writeln!(self.term, "{}", self.theme.format_warning(msg)).ok();
    }

    fn error(&mut self, msg: &str) {
        writeln!(self.term, "{}", self.theme.format_error(msg)).ok();
    }

    fn pending(&mut self, msg: &str) {
        if self.mode.shows_progress() {
            write!(self.term, "{} ", msg).ok();
            self.term.flush().ok();
        } else {
            self.held = Some(msg.to_string());
        }
    }

    fn print_ok(&mut self) {
        if self.held.take().is_none() {
            writeln!(self.term, "{}", self.theme.format_status(true)).ok();
        }
    }

    fn print_not_ok(&mut self) {
        match self.held.take() {
            Some(msg) => writeln!(self.term, "{} {}", msg, self.theme.format_status(false)).ok(),
            None => writeln!(self.term, "{}", self.theme.format_status(false)).ok(),
        };
    }
}
