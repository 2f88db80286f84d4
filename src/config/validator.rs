//! Configuration validation rules.
//!
//! - Dependencies must have a non-empty check command
//! - Validation patterns must compile
//! - `requires` must reference a known dependency id and resolve within
//!   `settings.max_depth`
//! - Poll attempts and max depth must be at least 1

use crate::config::schema::PrereqConfig;
use crate::dependency::DependencyRegistry;
use crate::error::{PrereqError, Result};

/// Validation error with context.
#[derive(Debug, Clone)]
pub struct ValidationError {
    /// Rule identifier
    pub rule: String,
    /// Human-readable error message
    pub message: String,
    /// Dependency id if the error is dependency-specific
    pub dependency: Option<String>,
}

impl ValidationError {
    fn new(rule: &str, message: String, dependency: Option<&str>) -> Self {
        Self {
            rule: rule.to_string(),
            message,
            dependency: dependency.map(str::to_string),
        }
    }
}

/// Validate a configuration and return all errors.
///
/// Collects every problem rather than stopping at the first one.
pub fn validate_config(config: &PrereqConfig) -> Vec<ValidationError> {
    let mut errors = validate_settings(config);
    errors.extend(validate_dependencies(config));
    errors
}

fn validate_settings(config: &PrereqConfig) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    if config.settings.poll_attempts == 0 {
        errors.push(ValidationError::new(
            "poll-attempts",
            "settings.poll_attempts must be at least 1".to_string(),
            None,
        ));
    }

    if config.settings.max_depth == 0 {
        errors.push(ValidationError::new(
            "max-depth",
            "settings.max_depth must be at least 1".to_string(),
            None,
        ));
    }

    errors
}

fn validate_dependencies(config: &PrereqConfig) -> Vec<ValidationError> {
    let registry = DependencyRegistry::with_config(config);
    let mut errors = Vec::new();

    for (id, declared) in &config.dependencies {
        if declared.check.trim().is_empty() {
            errors.push(ValidationError::new(
                "missing-check",
                format!("Dependency '{}' has an empty check command", id),
                Some(id),
            ));
        }

        if let Some(pattern) = declared.validate.as_deref() {
            if let Err(e) = regex::Regex::new(pattern) {
                errors.push(ValidationError::new(
                    "invalid-pattern",
                    format!("Dependency '{}' has an invalid validate pattern: {}", id, e),
                    Some(id),
                ));
            }
        }

        let before = errors.len();
        for req in &declared.requires {
            if req == id {
                errors.push(ValidationError::new(
                    "self-dependency",
                    format!("Dependency '{}' requires itself", id),
                    Some(id),
                ));
            } else if !registry.contains(req) {
                errors.push(ValidationError::new(
                    "unknown-dependency",
                    format!("Dependency '{}' requires '{}' which does not exist", id, req),
                    Some(id),
                ));
            }
        }

        // A longer cycle only shows up when resolving hits the depth guard
        if errors.len() == before {
            if let Err(PrereqError::DepthExceeded { max_depth, .. }) = registry.resolve(id) {
                errors.push(ValidationError::new(
                    "requires-too-deep",
                    format!(
                        "Dependency '{}' has requires nested deeper than {} levels (is there a cycle?)",
                        id, max_depth
                    ),
                    Some(id),
                ));
            }
        }
    }

    errors
}

/// Validate a configuration, failing on the first batch of errors.
pub fn validate(config: &PrereqConfig) -> Result<()> {
    let errors = validate_config(config);

    if errors.is_empty() {
        Ok(())
    } else {
        let messages: Vec<_> = errors.iter().map(|e| e.message.clone()).collect();
        Err(PrereqError::ConfigValidationError {
            message: messages.join("; "),
        })
    }
}
