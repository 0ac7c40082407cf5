//! Configuration types.
//!
//! Every section and field has a default, so a file only needs the values it
//! changes. Unknown fields are rejected.

use std::net::SocketAddr;
use std::time::Duration;

use gotodoc_docs::DocFormat;
use gotodoc_telemetry::{LogConfig, LogFormat};
use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// Complete service configuration.
///
/// # Example
///
/// ```
/// use gotodoc_config::GotodocConfig;
///
/// let config = GotodocConfig::default();
/// assert_eq!(config.server.http_addr, "0.0.0.0:8080");
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(deny_unknown_fields)]
pub struct GotodocConfig {
    /// HTTP transport settings.
    #[serde(default)]
    pub server: ServerSection,

    /// API document metadata and output.
    #[serde(default)]
    pub docs: DocsSection,

    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingSection,
}

impl GotodocConfig {
    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] naming the first bad field:
    /// an unparsable `server.http_addr`, a zero `server.max_body_bytes`, or
    /// an empty `docs.title` or `docs.version`.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.server.socket_addr()?;

        if self.server.max_body_bytes == 0 {
            return Err(ConfigError::invalid_value(
                "server.max_body_bytes",
                "must be greater than zero",
            ));
        }
        if self.docs.title.trim().is_empty() {
            return Err(ConfigError::invalid_value("docs.title", "must not be empty"));
        }
        if self.docs.version.trim().is_empty() {
            return Err(ConfigError::invalid_value("docs.version", "must not be empty"));
        }
        Ok(())
    }
}

/// HTTP transport settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields, default)]
pub struct ServerSection {
    /// Bind address.
    pub http_addr: String,

    /// Largest accepted request body in bytes.
    pub max_body_bytes: usize,

    /// Limit for body collection and for handler execution.
    pub request_timeout_secs: u64,

    /// Grace period for open connections on shutdown.
    pub shutdown_timeout_secs: u64,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            http_addr: "0.0.0.0:8080".to_string(),
            max_body_bytes: 1024 * 1024,
            request_timeout_secs: 30,
            shutdown_timeout_secs: 30,
        }
    }
}

impl ServerSection {
    /// Parses the bind address.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] if it is not a socket address.
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        self.http_addr.parse().map_err(|_| {
            ConfigError::invalid_value(
                "server.http_addr",
                format!("invalid socket address: {}", self.http_addr),
            )
        })
    }

    /// Request timeout as a duration.
    #[must_use]
    pub const fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Shutdown timeout as a duration.
    #[must_use]
    pub const fn shutdown_timeout(&self) -> Duration {
        Duration::from_secs(self.shutdown_timeout_secs)
    }
}

/// Document metadata, as passed to `App::init`, and output format.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields, default)]
pub struct DocsSection {
    /// API title.
    pub title: String,

    /// API version.
    pub version: String,

    /// API description; empty means none.
    pub description: String,

    /// Format the document is written in on serve.
    pub format: DocFormat,
}

impl Default for DocsSection {
    fn default() -> Self {
        Self {
            title: "gotodoc service".to_string(),
            version: "0.1.0".to_string(),
            description: String::new(),
            format: DocFormat::Yaml,
        }
    }
}

/// Logging settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields, default)]
pub struct LoggingSection {
    /// Filter directive.
    pub level: String,

    /// Output format.
    pub format: LogFormat,
}

impl Default for LoggingSection {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Json,
        }
    }
}

impl LoggingSection {
    /// Converts to the subscriber configuration.
    #[must_use]
    pub fn to_log_config(&self) -> LogConfig {
        LogConfig::default()
            .with_level(self.level.clone())
            .with_format(self.format)
    }
}
