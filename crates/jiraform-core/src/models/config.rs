//! Application configuration

use crate::models::IssueType;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    pub version: String,
    pub jira: JiraConfig,
    pub fields: FieldConfig,
    pub issue_types: IssueTypeMap,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct JiraConfig {
    pub server_url: String,
    pub username: String,
    pub project_key: String,
    /// Issue type name used for sub-items
    pub subtask_issue_type: String,
    pub timeout_secs: u64,
}

/// Custom field identifiers
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FieldConfig {
    pub root_cause: String,
    pub environment: String,
}

/// Tracker-side names for each logical issue type
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct IssueTypeMap {
    pub epic: String,
    pub story: String,
    pub bug: String,
    pub task: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LoggingConfig {
    pub level: String,
}

impl Config {
    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        self.jira.validate()?;
        self.fields.validate()?;
        self.issue_types.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: "1.0.0".to_string(),
            jira: JiraConfig::default(),
            fields: FieldConfig::default(),
            issue_types: IssueTypeMap::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl JiraConfig {
    /// Validate connection settings
    pub fn validate(&self) -> Result<()> {
        if !self.server_url.starts_with("http://") && !self.server_url.starts_with("https://") {
            return Err(Error::Validation(
                "Server URL must start with http:// or https://".to_string(),
            ));
        }

        if self.username.trim().is_empty() {
            return Err(Error::Validation("Username cannot be empty".to_string()));
        }

        if self.project_key.trim().is_empty() {
            return Err(Error::Validation("Project key cannot be empty".to_string()));
        }

        if self.subtask_issue_type.trim().is_empty() {
            return Err(Error::Validation(
                "Sub-task issue type cannot be empty".to_string(),
            ));
        }

        if self.timeout_secs == 0 {
            return Err(Error::Validation(
                "Timeout must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }

    /// Server URL without a trailing slash
    pub fn base_url(&self) -> &str {
        self.server_url.trim_end_matches('/')
    }
}

impl Default for JiraConfig {
    fn default() -> Self {
        Self {
            server_url: "https://your-jira-instance.com".to_string(),
            username: String::new(),
            project_key: "YOUR_PROJECT_KEY".to_string(),
            subtask_issue_type: "Sub-task".to_string(),
            timeout_secs: 30,
        }
    }
}

impl FieldConfig {
    pub fn validate(&self) -> Result<()> {
        if self.root_cause.trim().is_empty() || self.environment.trim().is_empty() {
            return Err(Error::Validation(
                "Custom field ids cannot be empty".to_string(),
            ));
        }

        if self.root_cause == self.environment {
            return Err(Error::Validation(format!(
                "Root cause and environment must be different fields (both '{}')",
                self.root_cause
            )));
        }

        Ok(())
    }
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            root_cause: "customfield_123".to_string(),
            environment: "customfield_456".to_string(),
        }
    }
}

impl IssueTypeMap {
    /// Tracker name for the given type, `None` when left blank
    pub fn name_for(&self, issue_type: IssueType) -> Option<&str> {
        let name = match issue_type {
            IssueType::Epic => &self.epic,
            IssueType::Story => &self.story,
            IssueType::Bug => &self.bug,
            IssueType::Task => &self.task,
        };
        let name = name.trim();
        if name.is_empty() {
            None
        } else {
            Some(name)
        }
    }

    pub fn validate(&self) -> Result<()> {
        for issue_type in IssueType::ALL {
            if self.name_for(issue_type).is_none() {
                return Err(Error::Validation(format!(
                    "No tracker issue type configured for {}",
                    issue_type
                )));
            }
        }
        Ok(())
    }
}

impl Default for IssueTypeMap {
    fn default() -> Self {
        Self {
            epic: "Epic".to_string(),
            story: "Story".to_string(),
            bug: "Bug".to_string(),
            task: "Task".to_string(),
        }
    }
}

impl LoggingConfig {
    pub fn validate(&self) -> Result<()> {
        let valid_log_levels = ["error", "warn", "info", "debug", "trace"];
        if !valid_log_levels.contains(&self.level.as_str()) {
            return Err(Error::Validation(format!(
                "Invalid log level '{}'. Must be one of: {}",
                self.level,
                valid_log_levels.join(", ")
            )));
        }
        Ok(())
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_config() -> Config {
        let mut config = Config::default();
        config.jira.username = "jdoe".to_string();
        config
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.version, "1.0.0");
        assert_eq!(config.fields.root_cause, "customfield_123");
        assert_eq!(config.fields.environment, "customfield_456");
        // a username has to be filled in before the config is usable
        assert!(config.validate().is_err());
        assert!(valid_config().validate().is_ok());
    }

    #[test]
    fn test_jira_config_validation() {
        let mut config = valid_config().jira;
        assert!(config.validate().is_ok());

        config.server_url = "jira.example.com".to_string();
        assert!(config.validate().is_err());

        config.server_url = "https://jira.example.com".to_string();
        config.project_key = " ".to_string();
        assert!(config.validate().is_err());

        config.project_key = "PROJ".to_string();
        config.timeout_secs = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_base_url_trims_slash() {
        let config = JiraConfig {
            server_url: "https://jira.example.com/".to_string(),
            ..JiraConfig::default()
        };
        assert_eq!(config.base_url(), "https://jira.example.com");
    }

    #[test]
    fn test_field_config_validation() {
        let mut fields = FieldConfig::default();
        assert!(fields.validate().is_ok());

        fields.environment = fields.root_cause.clone();
        assert!(fields.validate().is_err());

        fields.environment = String::new();
        assert!(fields.validate().is_err());
    }

    #[test]
    fn test_issue_type_map() {
        let mut map = IssueTypeMap::default();
        assert_eq!(map.name_for(IssueType::Bug), Some("Bug"));
        assert!(map.validate().is_ok());

        map.task = "Chore".to_string();
        assert_eq!(map.name_for(IssueType::Task), Some("Chore"));

        map.epic = "  ".to_string();
        assert_eq!(map.name_for(IssueType::Epic), None);
        assert!(map.validate().is_err());
    }

    #[test]
    fn test_logging_config_validation() {
        let mut logging = LoggingConfig::default();
        assert!(logging.validate().is_ok());

        logging.level = "verbose".to_string();
        assert!(logging.validate().is_err());
    }
}
