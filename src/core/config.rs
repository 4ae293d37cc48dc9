use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration as StdDuration;

use crate::stores::snapshot::DEFAULT_SNAPSHOT_KEY;

/// Longest token lifetime accepted from configuration (ten years)
pub const MAX_TOKEN_TTL_SECS: i64 = 10 * 365 * 24 * 60 * 60;

#[derive(Debug, Clone, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub session: SessionConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    #[default]
    Memory,
    File,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    #[serde(default)]
    pub backend: StorageBackend,
    /// Directory for the file backend
    pub path: Option<PathBuf>,
    #[serde(default = "default_snapshot_key")]
    pub key: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SessionConfig {
    /// Lifetime of issued tokens. 0 issues tokens that expire immediately.
    #[serde(default = "default_token_ttl_secs")]
    pub token_ttl_secs: i64,
    /// Simulated delay applied before every operation
    #[serde(default = "default_latency_ms")]
    pub latency_ms: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Json,
    Console,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default)]
    pub format: LogFormat,
    #[serde(default = "default_console")]
    pub console: bool,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::default(),
            path: None,
            key: default_snapshot_key(),
        }
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            token_ttl_secs: default_token_ttl_secs(),
            latency_ms: default_latency_ms(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: LogFormat::default(),
            console: default_console(),
        }
    }
}

impl SessionConfig {
    /// Token lifetime, clamped to `[0, MAX_TOKEN_TTL_SECS]`
    pub fn token_ttl(&self) -> chrono::Duration {
        let secs = self.token_ttl_secs.clamp(0, MAX_TOKEN_TTL_SECS);
        chrono::Duration::try_seconds(secs).unwrap_or_else(chrono::Duration::zero)
    }

    pub fn latency(&self) -> StdDuration {
        StdDuration::from_millis(self.latency_ms)
    }
}

// Default value functions
fn default_snapshot_key() -> String {
    DEFAULT_SNAPSHOT_KEY.to_string()
}

fn default_token_ttl_secs() -> i64 {
    0
}

fn default_latency_ms() -> u64 {
    0
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_console() -> bool {
    false
}

impl Config {
    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .context(format!("Failed to read config file: {}", path.display()))?;

        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)
            .context("Failed to parse config file")?;

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.storage.key.is_empty() {
            bail!("storage key must not be empty");
        }

        if self.storage.backend == StorageBackend::File && self.storage.path.is_none() {
            bail!("storage path must be specified for the file backend");
        }

        if self.session.token_ttl_secs < 0 {
            bail!("token_ttl_secs must be non-negative");
        }

        if self.session.token_ttl_secs > MAX_TOKEN_TTL_SECS {
            bail!(
                "token_ttl_secs ({}) must not exceed {}",
                self.session.token_ttl_secs,
                MAX_TOKEN_TTL_SECS
            );
        }

        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.logging.level.as_str()) {
            bail!(
                "Invalid log level '{}'. Must be one of: trace, debug, info, warn, error",
                self.logging.level
            );
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = Config::from_toml("").unwrap();

        assert_eq!(config.storage.backend, StorageBackend::Memory);
        assert_eq!(config.storage.key, "users");
        assert!(config.storage.path.is_none());
        assert_eq!(config.session.token_ttl_secs, 0);
        assert_eq!(config.session.latency(), StdDuration::ZERO);
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.logging.format, LogFormat::Json);
        assert!(!config.logging.console);
    }

    #[test]
    fn test_full_config() {
        let content = r#"
            [storage]
            backend = "file"
            path = "/var/lib/users"
            key = "directory"

            [session]
            token_ttl_secs = 3600
            latency_ms = 25

            [logging]
            level = "debug"
            format = "console"
        "#;
        let config = Config::from_toml(content).unwrap();

        assert_eq!(config.storage.backend, StorageBackend::File);
        assert_eq!(config.storage.path, Some(PathBuf::from("/var/lib/users")));
        assert_eq!(config.storage.key, "directory");
        assert_eq!(config.session.token_ttl(), chrono::Duration::hours(1));
        assert_eq!(config.session.latency(), StdDuration::from_millis(25));
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.logging.format, LogFormat::Console);
    }

    #[test]
    fn test_file_backend_requires_path() {
        let err = Config::from_toml("[storage]\nbackend = \"file\"\n").unwrap_err();
        assert!(err.to_string().contains("storage path"));
    }

    #[test]
    fn test_rejects_negative_ttl() {
        assert!(Config::from_toml("[session]\ntoken_ttl_secs = -1\n").is_err());
    }

    #[test]
    fn test_rejects_huge_ttl() {
        let content = format!("[session]\ntoken_ttl_secs = {}\n", i64::MAX);
        assert!(Config::from_toml(&content).is_err());
    }

    #[test]
    fn test_rejects_ttl_past_cap() {
        let content = "[session]\ntoken_ttl_secs = 1000000000000000\n";
        let err = Config::from_toml(content).unwrap_err();
        assert!(err.to_string().contains("must not exceed"));

        let at_cap = format!("[session]\ntoken_ttl_secs = {}\n", MAX_TOKEN_TTL_SECS);
        assert!(Config::from_toml(&at_cap).is_ok());
    }

    #[test]
    fn test_token_ttl_clamps_unvalidated_values() {
        let session = SessionConfig {
            token_ttl_secs: i64::MAX,
            latency_ms: 0,
        };
        assert_eq!(
            session.token_ttl(),
            chrono::Duration::seconds(MAX_TOKEN_TTL_SECS)
        );

        let session = SessionConfig {
            token_ttl_secs: -5,
            latency_ms: 0,
        };
        assert_eq!(session.token_ttl(), chrono::Duration::zero());
    }

    #[test]
    fn test_rejects_unknown_log_format() {
        assert!(Config::from_toml("[logging]\nformat = \"xml\"\n").is_err());
    }

    #[test]
    fn test_rejects_unknown_log_level() {
        assert!(Config::from_toml("[logging]\nlevel = \"loud\"\n").is_err());
    }

    #[test]
    fn test_rejects_unknown_backend() {
        assert!(Config::from_toml("[storage]\nbackend = \"s3\"\n").is_err());
    }

    #[test]
    fn test_from_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        std::fs::write(&path, "[session]\ntoken_ttl_secs = 60\n").unwrap();

        let config = Config::from_file(&path).unwrap();
        assert_eq!(config.session.token_ttl_secs, 60);
    }

    #[test]
    fn test_from_missing_file() {
        let err = Config::from_file(Path::new("/nonexistent/config.toml")).unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }
}
