//! Data setup configuration.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::cli::Cli;
use crate::error::{SetupError, SetupResult};

/// Connection settings for the target server's admin API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SetupConfig {
    /// Server URL including the context path (e.g., http://localhost:8080/auth).
    pub server_url: String,

    /// Realm the admin user authenticates against.
    pub admin_realm: String,

    /// Client used for the admin password grant.
    pub admin_client_id: String,

    /// Admin username.
    pub admin_username: String,

    /// Admin password.
    pub admin_password: String,

    /// HTTP request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for SetupConfig {
    fn default() -> Self {
        Self {
            server_url: "http://localhost:8080/auth".to_string(),
            admin_realm: "master".to_string(),
            admin_client_id: "admin-cli".to_string(),
            admin_username: "admin".to_string(),
            admin_password: "admin".to_string(),
            timeout_secs: 30,
        }
    }
}

impl SetupConfig {
    /// Loads configuration from a TOML file, or the defaults if no path is
    /// given.
    pub fn load(path: Option<&Path>) -> SetupResult<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };

        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content)
            .map_err(|e| SetupError::Config(format!("failed to parse {}: {e}", path.display())))
    }

    /// Applies command line and environment overrides.
    #[must_use]
    pub fn with_overrides(mut self, cli: &Cli) -> Self {
        if let Some(server) = &cli.server {
            self.server_url.clone_from(server);
        }
        if let Some(realm) = &cli.admin_realm {
            self.admin_realm.clone_from(realm);
        }
        if let Some(client_id) = &cli.admin_client_id {
            self.admin_client_id.clone_from(client_id);
        }
        if let Some(username) = &cli.admin_username {
            self.admin_username.clone_from(username);
        }
        if let Some(password) = &cli.admin_password {
            self.admin_password.clone_from(password);
        }
        self
    }

    /// Checks the settings are usable.
    pub fn validate(&self) -> SetupResult<()> {
        if self.server_url.trim().is_empty() {
            return Err(SetupError::Config("server_url must not be empty".to_string()));
        }
        if !self.server_url.starts_with("http://") && !self.server_url.starts_with("https://") {
            return Err(SetupError::Config(format!(
                "server_url must be an http(s) URL: {}",
                self.server_url
            )));
        }
        if self.timeout_secs == 0 {
            return Err(SetupError::Config("timeout_secs must be positive".to_string()));
        }
        Ok(())
    }

    /// Server URL without a trailing slash.
    #[must_use]
    pub fn base_url(&self) -> &str {
        self.server_url.trim_end_matches('/')
    }

    /// HTTP request timeout.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}
