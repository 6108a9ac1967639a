//! Configuration module for plaza.

use serde::Deserialize;
use std::path::Path;

use crate::{PlazaError, Result};

/// Server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host address to bind.
    #[serde(default = "default_host")]
    pub host: String,
    /// Port number to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// Database configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// Path to the SQLite database file.
    #[serde(default = "default_db_path")]
    pub path: String,
    /// Maximum number of pooled connections.
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    /// Timeout in seconds when acquiring a connection from the pool.
    #[serde(default = "default_acquire_timeout")]
    pub acquire_timeout_secs: u64,
    /// SQLite busy timeout in seconds.
    #[serde(default = "default_busy_timeout")]
    pub busy_timeout_secs: u64,
}

fn default_db_path() -> String {
    "data/plaza.db".to_string()
}

fn default_max_connections() -> u32 {
    5
}

fn default_acquire_timeout() -> u64 {
    5
}

fn default_busy_timeout() -> u64 {
    5
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_db_path(),
            max_connections: default_max_connections(),
            acquire_timeout_secs: default_acquire_timeout(),
            busy_timeout_secs: default_busy_timeout(),
        }
    }
}

/// Site (tenant) configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct SiteConfig {
    /// Company id that scopes the boards served by this instance.
    #[serde(default = "default_company_id")]
    pub company_id: i64,
    /// Site name used in notification payloads.
    #[serde(default = "default_site_name")]
    pub name: String,
}

fn default_company_id() -> i64 {
    1
}

fn default_site_name() -> String {
    "plaza".to_string()
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            company_id: default_company_id(),
            name: default_site_name(),
        }
    }
}

/// Security configuration.
///
/// The encryption key protects author contact fields at rest. It must be
/// exactly 32 bytes, hex-encoded (64 hex characters). A missing or
/// malformed key is a fatal configuration error caught by [`Config::load`],
/// before any request is served.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct SecurityConfig {
    /// Hex-encoded 32-byte AES key. Overridden by the `ENCRYPTION_KEY`
    /// environment variable when set.
    #[serde(default)]
    pub encryption_key: String,
}

/// Admin console configuration.
///
/// Session management for the admin console is out of scope; admin
/// endpoints are guarded by this static bearer token instead.
#[derive(Debug, Clone, Deserialize)]
pub struct AdminConfig {
    /// Bearer token required on /api/admin routes.
    #[serde(default)]
    pub token: String,
    /// Id recorded as the acting admin on replies.
    #[serde(default = "default_admin_id")]
    pub id: i64,
    /// Display name stamped as writer on admin-created posts.
    #[serde(default = "default_admin_name")]
    pub display_name: String,
}

fn default_admin_id() -> i64 {
    1
}

fn default_admin_name() -> String {
    "Admin".to_string()
}

impl Default for AdminConfig {
    fn default() -> Self {
        Self {
            token: String::new(),
            id: default_admin_id(),
            display_name: default_admin_name(),
        }
    }
}

/// Notifier configuration.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct NotifierConfig {
    /// Webhook URL receiving JSON notifications. Disabled when empty.
    #[serde(default)]
    pub webhook_url: String,
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Log file path. Console-only when empty.
    #[serde(default)]
    pub file: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: String::new(),
        }
    }
}

/// Web API configuration.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct WebConfig {
    /// Allowed CORS origins. Empty list allows none beyond same-origin.
    #[serde(default)]
    pub cors_origins: Vec<String>,
}

/// Root configuration.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub site: SiteConfig,
    #[serde(default)]
    pub security: SecurityConfig,
    #[serde(default)]
    pub admin: AdminConfig,
    #[serde(default)]
    pub notifier: NotifierConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub web: WebConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    ///
    /// Applies the `ENCRYPTION_KEY` environment override and validates the
    /// key eagerly so a misconfigured process fails at startup rather than
    /// on the first privacy-sensitive request.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let mut config: Config = toml::from_str(&content)
            .map_err(|e| PlazaError::Config(format!("failed to parse config: {e}")))?;
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// Parse configuration from a TOML string.
    pub fn from_toml(content: &str) -> Result<Self> {
        let mut config: Config = toml::from_str(content)
            .map_err(|e| PlazaError::Config(format!("failed to parse config: {e}")))?;
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(key) = std::env::var("ENCRYPTION_KEY") {
            if !key.is_empty() {
                self.security.encryption_key = key;
            }
        }
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<()> {
        let key = &self.security.encryption_key;
        if key.is_empty() {
            return Err(PlazaError::Config(
                "security.encryption_key is not set".to_string(),
            ));
        }
        let bytes = hex::decode(key)
            .map_err(|_| PlazaError::Config("security.encryption_key is not valid hex".to_string()))?;
        if bytes.len() != 32 {
            return Err(PlazaError::Config(format!(
                "security.encryption_key must be 32 bytes (64 hex chars), got {} bytes",
                bytes.len()
            )));
        }
        if self.database.max_connections == 0 {
            return Err(PlazaError::Config(
                "database.max_connections must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEST_KEY: &str = "000102030405060708090a0b0c0d0e0f101112131415161718191a1b1c1d1e1f";

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.database.max_connections, 5);
        assert_eq!(config.site.company_id, 1);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_from_toml_minimal() {
        let toml = format!(
            r#"
[security]
encryption_key = "{TEST_KEY}"
"#
        );
        let config = Config::from_toml(&toml).unwrap();
        assert_eq!(config.security.encryption_key, TEST_KEY);
        assert_eq!(config.server.host, "0.0.0.0");
    }

    #[test]
    fn test_from_toml_overrides() {
        let toml = format!(
            r#"
[server]
host = "127.0.0.1"
port = 8080

[database]
path = ":memory:"
max_connections = 2

[site]
company_id = 2
name = "Texas Crepe"

[security]
encryption_key = "{TEST_KEY}"

[admin]
token = "secret-token"
id = 7
"#
        );
        let config = Config::from_toml(&toml).unwrap();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.database.max_connections, 2);
        assert_eq!(config.site.company_id, 2);
        assert_eq!(config.admin.token, "secret-token");
        assert_eq!(config.admin.id, 7);
    }

    #[test]
    fn test_missing_key_fails() {
        let result = Config::from_toml("[server]\nport = 3000\n");
        assert!(matches!(result, Err(PlazaError::Config(_))));
    }

    #[test]
    fn test_non_hex_key_fails() {
        let toml = r#"
[security]
encryption_key = "not-hex-at-all"
"#;
        let result = Config::from_toml(toml);
        assert!(matches!(result, Err(PlazaError::Config(_))));
    }

    #[test]
    fn test_wrong_length_key_fails() {
        let toml = r#"
[security]
encryption_key = "00112233"
"#;
        let result = Config::from_toml(toml);
        let err = result.unwrap_err();
        assert!(err.to_string().contains("32 bytes"));
    }

    #[test]
    fn test_zero_pool_fails() {
        let toml = format!(
            r#"
[database]
max_connections = 0

[security]
encryption_key = "{TEST_KEY}"
"#
        );
        let result = Config::from_toml(&toml);
        assert!(matches!(result, Err(PlazaError::Config(_))));
    }
}
