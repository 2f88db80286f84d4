//! Dependency registry and built-in definitions.
//!
//! Defines what dependencies exist and resolves an id into a fully-owned
//! [`Dependency`]. The registry holds the built-in tools (Homebrew, Docker,
//! git, ...) and any custom dependencies declared in config.

use serde::Serialize;
use std::collections::HashMap;

use crate::config::{DependencyConfig, PrereqConfig};
use crate::error::{PrereqError, Result};

use super::lifecycle::DEFAULT_MAX_DEPTH;
use super::{Action, Dependency};

/// Homebrew package manager.
pub fn homebrew() -> Dependency {
    Dependency::new("Homebrew", "which brew").install_script(
        "/bin/bash -c \"$(curl -fsSL https://raw.githubusercontent.com/Homebrew/install/HEAD/install.sh)\"",
    )
}

/// Docker Desktop.
pub fn docker() -> Dependency {
    Dependency::new("Docker", "which docker")
        .requires(homebrew())
        .install_script("brew install --cask docker")
        .install_script("open /Applications/Docker.app")
        .uninstall_script("brew uninstall --cask docker")
}

/// git. Check only; there is no installer.
pub fn git() -> Dependency {
    Dependency::new("git", "git --version")
        .validate(r"(?m)git version (\d+\.)?(\d+\.)?(\*|\d+).*$")
}

/// Xcode command line build tool. Check only.
pub fn xcodebuild() -> Dependency {
    Dependency::new("xcodebuild", "xcodebuild -version")
        .validate(r"(?m)Xcode (\d+\.)?(\d+\.)?(\*|\d+)\s+Build version .+$")
}

/// fastlane.
pub fn fastlane() -> Dependency {
    Dependency::new("fastlane", "fastlane -version")
        .validate(r"(?m)fastlane (\d+\.)?(\d+\.)?(\*|\d+)$")
        .requires(homebrew())
        .install_script("brew install fastlane")
        .install_script(
            "echo 'export PATH=\"$HOME/.fastlane/bin:$PATH\"' >> ~/.bash_profile",
        )
        .uninstall_script("brew uninstall fastlane")
}

/// fastlane match. Ships with fastlane and cannot be installed on its own.
pub fn fastlane_match() -> Dependency {
    Dependency::new("fastlane match", "fastlane match -version")
        .validate(r"(?m)match (\d+\.)?(\d+\.)?(\*|\d+)$")
        .requires(fastlane())
        .uninstall_script("echo \"you can only uninstall whole fastlane\"")
}

/// Where a registry entry came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Source {
    Builtin,
    Config,
}

enum Declaration {
    Builtin(fn() -> Dependency),
    Custom(DependencyConfig),
}

impl Declaration {
    fn source(&self) -> Source {
        match self {
            Declaration::Builtin(_) => Source::Builtin,
            Declaration::Custom(_) => Source::Config,
        }
    }
}

/// Listing entry for one registered dependency.
#[derive(Debug, Clone, Serialize)]
pub struct DependencySummary {
    pub id: String,
    pub name: String,
    pub check: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub validate: Option<String>,
    pub requires: Vec<String>,
    pub install_steps: usize,
    pub uninstall_steps: usize,
    pub source: Source,
}

/// Registry of all known dependencies.
pub struct DependencyRegistry {
    declarations: HashMap<String, Declaration>,
    max_depth: usize,
}

impl Default for DependencyRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl DependencyRegistry {
    /// Create a registry with the built-in dependencies.
    pub fn new() -> Self {
        let builtins: [(&str, fn() -> Dependency); 6] = [
            ("homebrew", homebrew),
            ("docker", docker),
            ("git", git),
            ("xcodebuild", xcodebuild),
            ("fastlane", fastlane),
            ("fastlane-match", fastlane_match),
        ];

        let declarations = builtins
            .into_iter()
            .map(|(id, ctor)| (id.to_string(), Declaration::Builtin(ctor)))
            .collect();

        Self {
            declarations,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    /// Create a registry with built-ins plus the dependencies declared in `config`.
    ///
    /// A config entry with the same id as a built-in replaces it for lookups
    /// by that id. Built-in constructors embed their own prerequisites, so
    /// overriding `homebrew` does not change what `docker` or `fastlane`
    /// require.
    pub fn with_config(config: &PrereqConfig) -> Self {
        let mut registry = Self::new();
        registry.max_depth = config.settings.max_depth;
        for (id, declared) in &config.dependencies {
            registry.register(id, declared.clone());
        }
        registry
    }

    /// Add or replace a custom dependency.
    pub fn register(&mut self, id: &str, declared: DependencyConfig) {
        if self.declarations.contains_key(id) {
            tracing::debug!("Config overrides dependency '{}'", id);
        }
        self.declarations
            .insert(id.to_string(), Declaration::Custom(declared));
    }

    /// Whether `id` is registered.
    pub fn contains(&self, id: &str) -> bool {
        self.declarations.contains_key(id)
    }

    /// All registered ids, sorted.
    pub fn ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.declarations.keys().map(String::as_str).collect();
        ids.sort_unstable();
        ids
    }

    /// Build the dependency registered under `id`, prerequisites included.
    pub fn resolve(&self, id: &str) -> Result<Dependency> {
        self.resolve_at(id, 0)
    }

    fn resolve_at(&self, id: &str, depth: usize) -> Result<Dependency> {
        if depth > self.max_depth {
            return Err(PrereqError::DepthExceeded {
                name: id.to_string(),
                max_depth: self.max_depth,
            });
        }

        match self.declarations.get(id) {
            Some(Declaration::Builtin(ctor)) => Ok(ctor()),
            Some(Declaration::Custom(declared)) => {
                let prerequisites = declared
                    .requires
                    .iter()
                    .map(|req| self.resolve_at(req, depth + 1))
                    .collect::<Result<Vec<_>>>()?;

                Ok(Dependency {
                    name: declared.name.clone().unwrap_or_else(|| id.to_string()),
                    check_command: declared.check.clone(),
                    check_validation: declared.validate.clone(),
                    prerequisites,
                    install_actions: declared.install.iter().map(Action::shell).collect(),
                    uninstall_actions: declared.uninstall.iter().map(Action::shell).collect(),
                })
            }
            None => Err(PrereqError::UnknownDependency {
                name: id.to_string(),
            }),
        }
    }

    /// Listing summary for the dependency registered under `id`.
    pub fn describe(&self, id: &str) -> Result<DependencySummary> {
        let declaration =
            self.declarations
                .get(id)
                .ok_or_else(|| PrereqError::UnknownDependency {
                    name: id.to_string(),
                })?;
        let dep = self.resolve(id)?;

        Ok(DependencySummary {
            id: id.to_string(),
            name: dep.name,
            check: dep.check_command,
            validate: dep.check_validation,
            requires: dep.prerequisites.into_iter().map(|p| p.name).collect(),
            install_steps: dep.install_actions.len(),
            uninstall_steps: dep.uninstall_actions.len(),
            source: declaration.source(),
        })
    }

    /// Summaries of every registered dependency, sorted by id.
    pub fn summaries(&self) -> Result<Vec<DependencySummary>> {
        self.ids().into_iter().map(|id| self.describe(id)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::parse_config;
    use std::path::Path;

    fn custom(check: &str, requires: &[&str]) -> DependencyConfig {
        DependencyConfig {
            name: None,
            check: check.to_string(),
            validate: None,
            requires: requires.iter().map(|s| s.to_string()).collect(),
            install: vec![format!("install {}", check)],
            uninstall: vec![],
        }
    }

    #[test]
    fn builtins_are_registered() {
        let registry = DependencyRegistry::new();
        assert_eq!(
            registry.ids(),
            vec![
                "docker",
                "fastlane",
                "fastlane-match",
                "git",
                "homebrew",
                "xcodebuild"
            ]
        );
    }

    #[test]
    fn docker_requires_homebrew() {
        let docker = docker();
        assert_eq!(docker.prerequisites.len(), 1);
        assert_eq!(docker.prerequisites[0].name, "Homebrew");
        assert_eq!(docker.install_actions.len(), 2);
        assert_eq!(docker.uninstall_actions.len(), 1);
    }

    #[test]
    fn fastlane_match_has_no_installer() {
        let dep = fastlane_match();
        assert!(!dep.can_install());
        assert!(dep.can_uninstall());
        assert_eq!(dep.prerequisites[0].name, "fastlane");
        assert_eq!(dep.prerequisites[0].prerequisites[0].name, "Homebrew");
    }

    #[test]
    fn builtin_patterns_compile_and_match() {
        let cases = [
            (git(), "git version 2.30.0\n"),
            (xcodebuild(), "Xcode 15.2\nBuild version 15C500b\n"),
            (fastlane(), "fastlane installation at path:\n/usr/local/bin/fastlane\n-----------------------------\nfastlane 2.219.0\n"),
            (fastlane_match(), "match 2.219.0\n"),
        ];
        for (dep, output) in cases {
            let pattern = dep.check_validation.as_deref().unwrap();
            let re = regex::Regex::new(pattern).unwrap();
            assert!(re.is_match(output), "{} should match {:?}", dep.name, output);
        }
    }

    #[test]
    fn resolve_unknown_is_an_error() {
        let registry = DependencyRegistry::new();
        assert!(matches!(
            registry.resolve("nope"),
            Err(PrereqError::UnknownDependency { ref name }) if name == "nope"
        ));
    }

    #[test]
    fn custom_dependency_resolves_requires_by_id() {
        let mut registry = DependencyRegistry::new();
        registry.register("node", custom("node --version", &["homebrew"]));

        let node = registry.resolve("node").unwrap();

        assert_eq!(node.name, "node");
        assert_eq!(node.prerequisites.len(), 1);
        assert_eq!(node.prerequisites[0].name, "Homebrew");
        assert_eq!(node.install_actions[0].describe(), "install node --version");
    }

    #[test]
    fn config_overrides_builtin() {
        let yaml = r#"
dependencies:
  git:
    name: Git SCM
    check: git --version
    install: [brew install git]
"#;
        let config = parse_config(yaml, Path::new("config.yml")).unwrap();
        let registry = DependencyRegistry::with_config(&config);

        let git = registry.resolve("git").unwrap();
        assert_eq!(git.name, "Git SCM");
        assert!(git.can_install());
    }

    #[test]
    fn override_does_not_reach_builtin_prerequisites() {
        let yaml = r#"
dependencies:
  homebrew:
    name: Custom Brew
    check: which brew
"#;
        let config = parse_config(yaml, Path::new("config.yml")).unwrap();
        let registry = DependencyRegistry::with_config(&config);

        assert_eq!(registry.resolve("homebrew").unwrap().name, "Custom Brew");
        let docker = registry.resolve("docker").unwrap();
        assert_eq!(docker.prerequisites[0].name, "Homebrew");
    }

    #[test]
    fn cyclic_config_hits_depth_guard() {
        let mut registry = DependencyRegistry::new();
        registry.register("a", custom("check a", &["b"]));
        registry.register("b", custom("check b", &["a"]));

        assert!(matches!(
            registry.resolve("a"),
            Err(PrereqError::DepthExceeded { .. })
        ));
    }

    #[test]
    fn missing_require_is_unknown() {
        let mut registry = DependencyRegistry::new();
        registry.register("app", custom("check app", &["ghost"]));

        assert!(matches!(
            registry.resolve("app"),
            Err(PrereqError::UnknownDependency { ref name }) if name == "ghost"
        ));
    }

    #[test]
    fn summaries_describe_each_entry() {
        let mut registry = DependencyRegistry::new();
        registry.register("node", custom("node --version", &["homebrew"]));

        let summaries = registry.summaries().unwrap();
        let docker = summaries.iter().find(|s| s.id == "docker").unwrap();
        assert_eq!(docker.requires, vec!["Homebrew"]);
        assert_eq!(docker.install_steps, 2);
        assert_eq!(docker.source, Source::Builtin);

        let node = summaries.iter().find(|s| s.id == "node").unwrap();
        assert_eq!(node.source, Source::Config);
    }
}
