//! Configuration management for the `SolarOps` dashboard

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Environment variable consulted for the backend base URL when no
/// configuration source sets one.
pub const API_URL_ENV: &str = "SOLAROPS_API_URL";

/// Environment variable consulted for the admin bearer token when no
/// configuration source sets one.
pub const ADMIN_TOKEN_ENV: &str = "SOLAROPS_ADMIN_TOKEN";

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Dashboard web server configuration
    pub server: ServerConfig,

    /// Upstream REST API configuration
    pub backend: BackendConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to listen on
    #[serde(default = "default_port")]
    pub port: u16,
}

/// Backend REST API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendConfig {
    /// Base URL every endpoint path is appended to
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Bearer token attached to every request
    #[serde(default = "default_token")]
    pub token: Option<String>,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level used when `RUST_LOG` is not set
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log format (json or text)
    #[serde(default = "default_log_format")]
    pub format: String,
}

// Default value functions
fn default_host() -> String {
    "0.0.0.0".to_string()
}

const fn default_port() -> u16 {
    8090
}

fn default_base_url() -> String {
    std::env::var(API_URL_ENV).unwrap_or_else(|_| "http://127.0.0.1:4000".to_string())
}

fn default_token() -> Option<String> {
    std::env::var(ADMIN_TOKEN_ENV)
        .ok()
        .filter(|token| !token.trim().is_empty())
}

const fn default_timeout_secs() -> u64 {
    30
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "json".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            token: default_token(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl LoggingConfig {
    /// Whether log lines should be emitted as JSON
    #[must_use]
    pub fn is_json(&self) -> bool {
        self.format.eq_ignore_ascii_case("json")
    }
}

impl Config {
    /// Load configuration from `solarops.toml` (optional) and the environment
    ///
    /// Environment keys use the `SOLAROPS` prefix and `__` as the nesting
    /// separator, e.g. `SOLAROPS__BACKEND__BASE_URL`.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded or parsed.
    pub fn load() -> crate::Result<Self> {
        Self::load_from(None)
    }

    /// Load configuration, reading an explicit TOML file when one is given
    ///
    /// # Errors
    ///
    /// Returns an I/O error if an explicit file cannot be read, or a
    /// configuration error if any source cannot be parsed into a [`Config`].
    pub fn load_from(path: Option<&Path>) -> crate::Result<Self> {
        let builder = match path {
            Some(path) => {
                let contents = std::fs::read_to_string(path)?;
                config::Config::builder()
                    .add_source(config::File::from_str(&contents, config::FileFormat::Toml))
            }
            None => config::Config::builder()
                .add_source(config::File::with_name("solarops").required(false)),
        };

        let config = builder
            .add_source(
                config::Environment::with_prefix("SOLAROPS")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let config: Self = config.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Check the loaded values for obvious mistakes
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the backend URL is not http(s) or the
    /// timeout is zero.
    pub fn validate(&self) -> crate::Result<()> {
        let url = self.backend.base_url.trim();
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(crate::Error::Configuration {
                message: format!("backend.base_url must be an http(s) URL, got '{url}'"),
            });
        }
        if self.backend.timeout_secs == 0 {
            return Err(crate::Error::Configuration {
                message: "backend.timeout_secs must be greater than zero".to_string(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_config_default() {
        let config = Config::default();

        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 8090);
        assert_eq!(config.backend.timeout_secs, 30);
        assert!(config.backend.base_url.starts_with("http"));
        assert_eq!(config.logging.level, "info");
        assert!(config.logging.is_json());
    }

    #[test]
    fn test_logging_format_text() {
        let logging = LoggingConfig {
            level: "debug".to_string(),
            format: "text".to_string(),
        };
        assert!(!logging.is_json());
    }

    #[test]
    fn test_validate_rejects_non_http_url() {
        let mut config = Config::default();
        config.backend.base_url = "ftp://backend".to_string();

        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("backend.base_url"));
    }

    #[test]
    fn test_validate_rejects_zero_timeout() {
        let mut config = Config::default();
        config.backend.base_url = "https://api.example.com".to_string();
        config.backend.timeout_secs = 0;

        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            r#"
[server]
host = "127.0.0.1"
port = 9000

[backend]
base_url = "https://api.klord.example"
token = "secret-token"
timeout_secs = 10

[logging]
format = "text"
"#
        )
        .unwrap();

        let config = Config::load_from(Some(file.path())).unwrap();
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.backend.base_url, "https://api.klord.example");
        assert_eq!(config.backend.token.as_deref(), Some("secret-token"));
        assert_eq!(config.backend.timeout_secs, 10);
        assert_eq!(config.logging.level, "info");
        assert!(!config.logging.is_json());
    }

    #[test]
    fn test_load_from_missing_file_fails() {
        let result = Config::load_from(Some(Path::new("/nonexistent/solarops.toml")));
        match result {
            Err(crate::Error::Io(e)) => assert_eq!(e.kind(), std::io::ErrorKind::NotFound),
            other => panic!("expected an I/O error, got {other:?}"),
        }
    }

    #[test]
    fn test_config_serialization_roundtrip() {
        let config = Config::default();
        let serialized = serde_json::to_string(&config).unwrap();
        let deserialized: Config = serde_json::from_str(&serialized).unwrap();

        assert_eq!(deserialized.server.port, config.server.port);
        assert_eq!(deserialized.backend.base_url, config.backend.base_url);
        assert_eq!(deserialized.logging.format, config.logging.format);
    }
}
