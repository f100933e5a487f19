//! Configuration management with layered hierarchy
//!
//! Sources, lowest to highest priority: global user config file,
//! config file in the working directory, environment variables, CLI
//! flags. Credentials are validated before any row is processed.

use serde::Deserialize;
use std::path::PathBuf;
use thiserror::Error;

/// Default workflow status created issues are moved to
pub const DEFAULT_STATUS: &str = "Pending";

/// Jira importer configuration with layered hierarchy
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Jira base URL, e.g. https://yourcompany.atlassian.net
    pub jira_url: Option<String>,

    /// Account email for API authentication
    pub email: Option<String>,

    /// Jira API token
    pub api_token: Option<String>,

    /// Target project key
    pub project_key: Option<String>,

    /// Workflow status created issues are transitioned to
    pub default_status: Option<String>,
}

/// Validated configuration, safe to hand to the Jira client
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub jira_url: String,
    pub email: String,
    pub api_token: String,
    pub project_key: String,
    pub default_status: String,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required configuration: {}", .0.join(", "))]
    Missing(Vec<String>),
}

impl Config {
    /// Load configuration from all sources, merging in priority order
    pub fn load() -> Self {
        let mut config = Config::default();

        // 1. Global user config (~/.config/jira-import/config.yaml)
        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                if let Ok(contents) = std::fs::read_to_string(&global_path) {
                    if let Ok(global) = serde_yml::from_str::<Config>(&contents) {
                        config.merge(global);
                    }
                }
            }
        }

        // 2. Local config (./jira-import.yaml)
        let local_path = PathBuf::from("jira-import.yaml");
        if local_path.exists() {
            if let Ok(contents) = std::fs::read_to_string(&local_path) {
                if let Ok(local) = serde_yml::from_str::<Config>(&contents) {
                    config.merge(local);
                }
            }
        }

        // 3. Environment variables
        if let Ok(url) = std::env::var("JIRA_URL") {
            config.jira_url = Some(url);
        }
        if let Ok(email) = std::env::var("JIRA_EMAIL") {
            config.email = Some(email);
        }
        if let Ok(token) = std::env::var("JIRA_API_TOKEN") {
            config.api_token = Some(token);
        }
        if let Ok(project) = std::env::var("JIRA_PROJECT_KEY") {
            config.project_key = Some(project);
        }
        if let Ok(status) = std::env::var("JIRA_DEFAULT_STATUS") {
            config.default_status = Some(status);
        }

        config
    }

    /// Get the path to the global config file
    fn global_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("", "", "jira-import")
            .map(|dirs| dirs.config_dir().join("config.yaml"))
    }

    /// Merge another config into this one (other takes precedence)
    pub fn merge(&mut self, other: Config) {
        if other.jira_url.is_some() {
            self.jira_url = other.jira_url;
        }
        if other.email.is_some() {
            self.email = other.email;
        }
        if other.api_token.is_some() {
            self.api_token = other.api_token;
        }
        if other.project_key.is_some() {
            self.project_key = other.project_key;
        }
        if other.default_status.is_some() {
            self.default_status = other.default_status;
        }
    }

    /// Validate required fields, collecting every missing or
    /// placeholder value into a single error
    pub fn validate(&self) -> Result<ResolvedConfig, ConfigError> {
        let mut missing = Vec::new();

        let jira_url = Self::required(&self.jira_url, "jira_url (JIRA_URL)", &mut missing);
        let email = Self::required(&self.email, "email (JIRA_EMAIL)", &mut missing);
        let api_token = Self::required(&self.api_token, "api_token (JIRA_API_TOKEN)", &mut missing);
        let project_key =
            Self::required(&self.project_key, "project_key (JIRA_PROJECT_KEY)", &mut missing);

        if !missing.is_empty() {
            return Err(ConfigError::Missing(missing));
        }

        Ok(ResolvedConfig {
            jira_url: jira_url.trim_end_matches('/').to_string(),
            email,
            api_token,
            project_key,
            default_status: self
                .default_status
                .clone()
                .filter(|s| !s.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_STATUS.to_string()),
        })
    }

    fn required(value: &Option<String>, name: &str, missing: &mut Vec<String>) -> String {
        match value {
            Some(v) if !Self::is_placeholder(v) => v.trim().to_string(),
            _ => {
                missing.push(name.to_string());
                String::new()
            }
        }
    }

    /// Treat empty values and template placeholders (YOUR_JIRA_URL,
    /// YOUR_API_TOKEN, ...) as unset
    fn is_placeholder(value: &str) -> bool {
        let v = value.trim();
        v.is_empty() || v.starts_with("YOUR_")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_config() -> Config {
        Config {
            jira_url: Some("https://example.atlassian.net/".to_string()),
            email: Some("me@example.com".to_string()),
            api_token: Some("token123".to_string()),
            project_key: Some("PROJ".to_string()),
            default_status: None,
        }
    }

    #[test]
    fn test_validate_complete_config() {
        let resolved = full_config().validate().unwrap();
        // Trailing slash is trimmed off the base URL
        assert_eq!(resolved.jira_url, "https://example.atlassian.net");
        assert_eq!(resolved.project_key, "PROJ");
        assert_eq!(resolved.default_status, DEFAULT_STATUS);
    }

    #[test]
    fn test_validate_collects_all_missing_fields() {
        let config = Config::default();
        let err = config.validate().unwrap_err();
        let ConfigError::Missing(fields) = err;
        assert_eq!(fields.len(), 4);
    }

    #[test]
    fn test_placeholder_values_count_as_missing() {
        let mut config = full_config();
        config.api_token = Some("YOUR_API_TOKEN".to_string());
        let err = config.validate().unwrap_err();
        let ConfigError::Missing(fields) = err;
        assert_eq!(fields, vec!["api_token (JIRA_API_TOKEN)".to_string()]);
    }

    #[test]
    fn test_default_status_override() {
        let mut config = full_config();
        config.default_status = Some("In Progress".to_string());
        let resolved = config.validate().unwrap();
        assert_eq!(resolved.default_status, "In Progress");
    }

    #[test]
    fn test_merge_other_takes_precedence() {
        let mut base = full_config();
        base.merge(Config {
            project_key: Some("OTHER".to_string()),
            ..Default::default()
        });
        assert_eq!(base.project_key.as_deref(), Some("OTHER"));
        assert_eq!(base.email.as_deref(), Some("me@example.com"));
    }
}
