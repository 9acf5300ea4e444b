use crate::config::AppConfig;
use crate::error::AuthError;
use secrecy::SecretString;
use std::fmt;

/// Arguments shared by every command.
#[derive(Clone)]
pub struct GlobalArgs {
    pub api_base_url: String,
    pub timeout_seconds: u64,
    pub username: Option<String>,
    pub password: Option<SecretString>,
}

impl GlobalArgs {
    #[must_use]
    pub fn new(api_base_url: String, timeout_seconds: u64) -> Self {
        Self {
            api_base_url,
            timeout_seconds,
            username: None,
            password: None,
        }
    }

    #[must_use]
    pub fn with_credentials(mut self, username: String, password: SecretString) -> Self {
        self.username = Some(username);
        self.password = Some(password);
        self
    }

    /// Username and password, only when both were given.
    #[must_use]
    pub fn credentials(&self) -> Option<(&str, &SecretString)> {
        match (&self.username, &self.password) {
            (Some(username), Some(password)) => Some((username.as_str(), password)),
            _ => None,
        }
    }

    /// # Errors
    /// Returns an error if the base URL is missing or invalid.
    pub fn config(&self) -> Result<AppConfig, AuthError> {
        AppConfig::new(&self.api_base_url, self.timeout_seconds)
    }
}

impl fmt::Debug for GlobalArgs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GlobalArgs")
            .field("api_base_url", &self.api_base_url)
            .field("timeout_seconds", &self.timeout_seconds)
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "***"))
            .finish()
    }
}
