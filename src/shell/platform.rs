//! Platform environment detection.

/// Check if running in a CI environment.
///
/// CI runners have no TTY, so commands there run without `-i`.
pub fn is_ci() -> bool {
    const CI_VARS: [&str; 6] = [
        "CI",
        "GITHUB_ACTIONS",
        "GITLAB_CI",
        "CIRCLECI",
        "TRAVIS",
        "JENKINS_URL",
    ];
    CI_VARS.iter().any(|var| std::env::var(var).is_ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn is_ci_detects_environment() {
        let saved = std::env::var("GITLAB_CI").ok();
        std::env::set_var("GITLAB_CI", "true");

        let detected = is_ci();

        match saved {
            Some(val) => std::env::set_var("GITLAB_CI", val),
            None => std::env::remove_var("GITLAB_CI"),
        }
        assert!(detected);
    }
}
