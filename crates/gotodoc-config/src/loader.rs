//! Layered configuration loading.
//!
//! Layers apply in call order, later ones winning:
//!
//! 1. defaults
//! 2. a TOML or JSON file
//! 3. a `.env` file, which only feeds the process environment
//! 4. environment variables named `<PREFIX>_<SECTION>_<KEY>`

use std::env;
use std::fs;
use std::path::Path;

use crate::{ConfigError, GotodocConfig};

/// Default prefix for environment overrides.
pub const DEFAULT_ENV_PREFIX: &str = "GOTODOC";

/// Configuration loader.
///
/// # Example
///
/// ```
/// use gotodoc_config::ConfigLoader;
///
/// let toml = r#"
///     [docs]
///     title = "Items"
///     version = "1.2.0"
/// "#;
///
/// let config = ConfigLoader::new()
///     .with_string(toml, "toml")
///     .unwrap()
///     .load()
///     .unwrap();
///
/// assert_eq!(config.docs.title, "Items");
/// ```
#[derive(Debug, Default)]
pub struct ConfigLoader {
    config: GotodocConfig,
    env_prefix: Option<String>,
}

impl ConfigLoader {
    /// Creates a loader holding the defaults.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads a file, picking TOML or JSON by extension.
    ///
    /// # Errors
    ///
    /// Fails if the file is missing, unreadable, malformed, has an unknown
    /// extension or contains unknown fields.
    pub fn with_file<P: AsRef<Path>>(mut self, path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ConfigError::file_not_found(path));
        }

        let content = fs::read_to_string(path).map_err(|e| ConfigError::read_error(path, e))?;
        let format = path
            .extension()
            .and_then(|e| e.to_str())
            .ok_or_else(|| ConfigError::UnsupportedFormat(path.display().to_string()))?;

        self.config = parse(&content, format)?;
        Ok(self)
    }

    /// Like [`with_file`](Self::with_file), but a missing file is skipped.
    ///
    /// # Errors
    ///
    /// Same as [`with_file`](Self::with_file) for an existing file.
    pub fn with_optional_file<P: AsRef<Path>>(self, path: P) -> Result<Self, ConfigError> {
        if path.as_ref().exists() {
            self.with_file(path)
        } else {
            Ok(self)
        }
    }

    /// Loads configuration text in `format` (`toml` or `json`).
    ///
    /// # Errors
    ///
    /// Fails on an unknown format, malformed content or unknown fields.
    pub fn with_string(mut self, content: &str, format: &str) -> Result<Self, ConfigError> {
        self.config = parse(content, format)?;
        Ok(self)
    }

    /// Loads `.env` from the current directory or its parents into the
    /// process environment. A missing file is skipped.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EnvFileError`] if the file exists but cannot be
    /// parsed.
    pub fn with_dotenv(self) -> Result<Self, ConfigError> {
        match dotenvy::dotenv() {
            Ok(_) => Ok(self),
            Err(e) if e.not_found() => Ok(self),
            Err(e) => Err(ConfigError::EnvFileError {
                path: ".env".into(),
                reason: e.to_string(),
            }),
        }
    }

    /// Loads a specific env file into the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EnvFileError`] if the file is missing or
    /// malformed.
    pub fn with_dotenv_file<P: AsRef<Path>>(self, path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        dotenvy::from_path(path).map_err(|e| ConfigError::EnvFileError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        Ok(self)
    }

    /// Enables environment overrides under `prefix`, applied by
    /// [`load`](Self::load).
    #[must_use]
    pub fn with_env_prefix(mut self, prefix: &str) -> Self {
        self.env_prefix = Some(prefix.to_uppercase());
        self
    }

    /// Applies overrides from explicit `(name, value)` pairs instead of the
    /// process environment. Names without `prefix` are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EnvParseError`] for a value of the wrong type.
    pub fn with_env_vars<I, K, V>(mut self, prefix: &str, vars: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let prefix = prefix.to_uppercase();
        for (key, value) in vars {
            self.apply_env_var(key.as_ref(), value.as_ref(), &prefix)?;
        }
        Ok(self)
    }

    /// Applies environment overrides, then validates.
    ///
    /// # Errors
    ///
    /// Fails on a malformed environment value or an invalid result.
    pub fn load(mut self) -> Result<GotodocConfig, ConfigError> {
        if let Some(prefix) = self.env_prefix.take() {
            for (key, value) in env::vars() {
                self.apply_env_var(&key, &value, &prefix)?;
            }
        }

        self.config.validate()?;
        Ok(self.config)
    }

    /// Returns the configuration without environment overrides or
    /// validation.
    #[must_use]
    pub fn load_unvalidated(self) -> GotodocConfig {
        self.config
    }

    fn apply_env_var(&mut self, key: &str, value: &str, prefix: &str) -> Result<(), ConfigError> {
        let Some(name) = key
            .strip_prefix(prefix)
            .and_then(|rest| rest.strip_prefix('_'))
        else {
            return Ok(());
        };

        let server = &mut self.config.server;
        let docs = &mut self.config.docs;
        let logging = &mut self.config.logging;

        match name {
            "SERVER_HTTP_ADDR" => server.http_addr = value.to_string(),
            "SERVER_MAX_BODY_BYTES" => server.max_body_bytes = parse_number(key, value)?,
            "SERVER_REQUEST_TIMEOUT_SECS" => server.request_timeout_secs = parse_number(key, value)?,
            "SERVER_SHUTDOWN_TIMEOUT_SECS" => server.shutdown_timeout_secs = parse_number(key, value)?,

            "DOCS_TITLE" => docs.title = value.to_string(),
            "DOCS_VERSION" => docs.version = value.to_string(),
            "DOCS_DESCRIPTION" => docs.description = value.to_string(),
            "DOCS_FORMAT" => {
                docs.format = value
                    .parse()
                    .map_err(|_| ConfigError::env_parse_error(key, "expected 'yaml' or 'json'"))?;
            }

            "LOGGING_LEVEL" => logging.level = value.to_string(),
            "LOGGING_FORMAT" => {
                logging.format = value
                    .parse()
                    .map_err(|_| ConfigError::env_parse_error(key, "expected 'json' or 'pretty'"))?;
            }

            _ => {}
        }

        Ok(())
    }
}

fn parse(content: &str, format: &str) -> Result<GotodocConfig, ConfigError> {
    match format.to_lowercase().as_str() {
        "toml" => Ok(toml::from_str(content)?),
        "json" => Ok(serde_json::from_str(content)?),
        other => Err(ConfigError::UnsupportedFormat(other.to_string())),
    }
}

fn parse_number<T: std::str::FromStr>(key: &str, value: &str) -> Result<T, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::env_parse_error(key, "expected a non-negative integer"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use gotodoc_docs::DocFormat;
    use gotodoc_telemetry::LogFormat;
    use std::io::Write;

    #[test]
    fn test_defaults_load() {
        let config = ConfigLoader::new().load().unwrap();
        assert_eq!(config, GotodocConfig::default());
    }

    #[test]
    fn test_toml_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            r#"
            [server]
            http_addr = "127.0.0.1:9000"
            request_timeout_secs = 5

            [docs]
            title = "Items"
            version = "2.0.0"
            format = "json"

            [logging]
            format = "pretty"
            "#
        )
        .unwrap();

        let config = ConfigLoader::new().with_file(file.path()).unwrap().load().unwrap();
        assert_eq!(config.server.http_addr, "127.0.0.1:9000");
        assert_eq!(config.server.request_timeout_secs, 5);
        assert_eq!(config.server.shutdown_timeout_secs, 30);
        assert_eq!(config.docs.format, DocFormat::Json);
        assert_eq!(config.logging.format, LogFormat::Pretty);
    }

    #[test]
    fn test_json_file() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        write!(file, r#"{{"docs": {{"title": "Items", "description": "Item store"}}}}"#).unwrap();

        let config = ConfigLoader::new().with_file(file.path()).unwrap().load().unwrap();
        assert_eq!(config.docs.description, "Item store");
        assert_eq!(config.docs.version, "0.1.0");
    }

    #[test]
    fn test_unknown_field_in_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "[server]\nport = 8080").unwrap();
        let err = ConfigLoader::new().with_file(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::TomlError(_)));
    }

    #[test]
    fn test_unsupported_extension() {
        let file = tempfile::Builder::new().suffix(".ini").tempfile().unwrap();
        let err = ConfigLoader::new().with_file(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::UnsupportedFormat(_)));
    }

    #[test]
    fn test_missing_files() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.toml");

        let err = ConfigLoader::new().with_file(&path).unwrap_err();
        assert!(matches!(err, ConfigError::FileNotFound { .. }));

        assert!(ConfigLoader::new().with_optional_file(&path).is_ok());
    }

    #[test]
    fn test_env_overrides() {
        let config = ConfigLoader::new()
            .with_env_vars(
                "gotodoc",
                [
                    ("GOTODOC_SERVER_HTTP_ADDR", "127.0.0.1:7000"),
                    ("GOTODOC_SERVER_MAX_BODY_BYTES", "2048"),
                    ("GOTODOC_DOCS_TITLE", "Items"),
                    ("GOTODOC_DOCS_FORMAT", "json"),
                    ("GOTODOC_LOGGING_LEVEL", "debug"),
                    ("GOTODOC_UNKNOWN_KEY", "ignored"),
                    ("OTHER_DOCS_TITLE", "ignored"),
                ],
            )
            .unwrap()
            .load()
            .unwrap();

        assert_eq!(config.server.http_addr, "127.0.0.1:7000");
        assert_eq!(config.server.max_body_bytes, 2048);
        assert_eq!(config.docs.title, "Items");
        assert_eq!(config.docs.format, DocFormat::Json);
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn test_env_override_wins_over_file() {
        let config = ConfigLoader::new()
            .with_string("[docs]\ntitle = \"From file\"", "toml")
            .unwrap()
            .with_env_vars("GOTODOC", [("GOTODOC_DOCS_TITLE", "From env")])
            .unwrap()
            .load_unvalidated();
        assert_eq!(config.docs.title, "From env");
    }

    #[test]
    fn test_env_parse_errors() {
        let err = ConfigLoader::new()
            .with_env_vars("GOTODOC", [("GOTODOC_SERVER_MAX_BODY_BYTES", "lots")])
            .unwrap_err();
        assert!(matches!(err, ConfigError::EnvParseError { .. }));

        let err = ConfigLoader::new()
            .with_env_vars("GOTODOC", [("GOTODOC_LOGGING_FORMAT", "xml")])
            .unwrap_err();
        assert!(err.to_string().contains("GOTODOC_LOGGING_FORMAT"));
    }

    #[test]
    fn test_dotenv_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "GOTODOC_TEST_DOTENV_MARKER=loaded").unwrap();

        ConfigLoader::new().with_dotenv_file(file.path()).unwrap();
        assert_eq!(env::var("GOTODOC_TEST_DOTENV_MARKER").unwrap(), "loaded");

        let err = ConfigLoader::new()
            .with_dotenv_file(file.path().with_extension("missing"))
            .unwrap_err();
        assert!(matches!(err, ConfigError::EnvFileError { .. }));
    }

    #[test]
    fn test_validation_runs_on_load() {
        let err = ConfigLoader::new()
            .with_string(r#"{"server": {"max_body_bytes": 0}}"#, "json")
            .unwrap()
            .load()
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { .. }));
    }
}
