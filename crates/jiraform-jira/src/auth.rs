//! JIRA authentication

use crate::{Error, Result};

/// Environment variable checked before the keyring
pub const TOKEN_ENV_VAR: &str = "JIRAFORM_API_TOKEN";

const KEYRING_SERVICE: &str = "jiraform";

#[derive(Clone)]
pub struct JiraAuth {
    username: String,
    api_token: String,
}

impl JiraAuth {
    pub fn new(username: String, api_token: String) -> Self {
        Self {
            username,
            api_token,
        }
    }

    /// Find the API token for `username`, from the environment or the OS keyring
    pub fn resolve(username: &str) -> Result<Self> {
        if let Ok(token) = std::env::var(TOKEN_ENV_VAR) {
            if !token.trim().is_empty() {
                tracing::debug!("Using API token from {}", TOKEN_ENV_VAR);
                return Ok(Self::new(username.to_string(), token.trim().to_string()));
            }
        }

        let entry = keyring::Entry::new(KEYRING_SERVICE, username)?;
        match entry.get_password() {
            Ok(token) => Ok(Self::new(username.to_string(), token)),
            Err(keyring::Error::NoEntry) => Err(Error::Auth(format!(
                "No API token for '{}'. Set {} or run with --store-token",
                username, TOKEN_ENV_VAR
            ))),
            Err(e) => Err(e.into()),
        }
    }

    /// Save an API token for `username` in the OS keyring
    pub fn store(username: &str, api_token: &str) -> Result<()> {
        if api_token.trim().is_empty() {
            return Err(Error::Auth("API token cannot be empty".to_string()));
        }
        let entry = keyring::Entry::new(KEYRING_SERVICE, username)?;
        entry.set_password(api_token.trim())?;
        Ok(())
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn to_basic_auth(&self) -> String {
        use base64::Engine;
        let credentials = format!("{}:{}", self.username, self.api_token);
        format!(
            "Basic {}",
            base64::engine::general_purpose::STANDARD.encode(credentials)
        )
    }
}

impl std::fmt::Debug for JiraAuth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JiraAuth")
            .field("username", &self.username)
            .field("api_token", &"***")
            .finish()
    }
}
