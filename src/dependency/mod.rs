//! Dependency lifecycle: presence checks, installs and uninstalls.
//!
//! # Modules
//!
//! - [`action`] - Single install/uninstall steps
//! - [`model`] - The [`Dependency`] definition and its builder methods
//! - [`lifecycle`] - `check`, `install` and `uninstall`
//! - [`poll`] - Clock used for post-install convergence polling
//! - [`registry`] - Built-in dependencies and id lookup
//!
//! # Example
//!
//! ```
//! use prereq::dependency::{Dependency, Lifecycle, RecordingClock};
//! use prereq::shell::ScriptedShell;
//! use prereq::ui::MockUI;
//!
//! let shell = ScriptedShell::new();
//! shell.respond("git --version", 0, "git version 2.30.0\n");
//! let mut ui = MockUI::new();
//! let clock = RecordingClock::new();
//! let lifecycle = Lifecycle::new(&shell, &mut ui, &clock);
//!
//! let git = Dependency::new("git", "git --version").validate(r"git version \d+");
//! assert!(git.check(&lifecycle).unwrap());
//! ```

pub mod action;
pub mod lifecycle;
pub mod model;
pub mod poll;
pub mod registry;

pub use action::{Action, ActionFn};
pub use lifecycle::{Lifecycle, LifecycleSettings, DEFAULT_MAX_DEPTH};
pub use model::Dependency;
pub use poll::{Clock, RecordingClock, SystemClock, DEFAULT_POLL_ATTEMPTS, DEFAULT_POLL_INTERVAL};
pub use registry::{DependencyRegistry, DependencySummary, Source};
