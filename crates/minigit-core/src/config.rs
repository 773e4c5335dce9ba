//! Repository configuration.

use serde::{Deserialize, Serialize};

/// Name of the branch created by `init` when nothing else is configured.
pub const DEFAULT_BRANCH: &str = "main";

/// Settings applied when a repository is initialized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RepoConfig {
    /// Branch created (and made active) by `init`.
    pub default_branch: String,
}

impl Default for RepoConfig {
    fn default() -> Self {
        Self {
            default_branch: DEFAULT_BRANCH.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_branch_is_main() {
        assert_eq!(RepoConfig::default().default_branch, "main");
    }

    #[test]
    fn test_missing_fields_fall_back_to_defaults() {
        let cfg: RepoConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(cfg, RepoConfig::default());

        let cfg: RepoConfig = serde_json::from_str(r#"{"default_branch":"trunk"}"#).unwrap();
        assert_eq!(cfg.default_branch, "trunk");
    }
}
