//! Builds the runtime pieces from a loaded [`GotodocConfig`].

use gotodoc_config::GotodocConfig;
use gotodoc_server::{App, ServerConfig};
use gotodoc_telemetry::TelemetryResult;

/// Creates an [`App`] with the configured document metadata, output format
/// and body limit.
///
/// # Example
///
/// ```rust
/// use gotodoc::config::GotodocConfig;
///
/// let mut config = GotodocConfig::default();
/// config.docs.title = "Items".to_string();
///
/// let app = gotodoc::app_from_config(&config);
/// assert_eq!(app.document().info.title, "Items");
/// ```
pub fn app_from_config(config: &GotodocConfig) -> App {
    let docs = &config.docs;
    App::init(&docs.title, &docs.version, &docs.description)
        .with_format(docs.format)
        .with_max_body_bytes(config.server.max_body_bytes)
}

/// Creates the transport settings.
pub fn server_config(config: &GotodocConfig) -> ServerConfig {
    ServerConfig::builder()
        .http_addr(&config.server.http_addr)
        .request_timeout(config.server.request_timeout())
        .shutdown_timeout(config.server.shutdown_timeout())
        .max_body_bytes(config.server.max_body_bytes)
        .build()
}

/// Installs the global log subscriber from the `logging` section.
///
/// # Errors
///
/// Fails on a malformed level or if a subscriber is already installed.
pub fn init_logging(config: &GotodocConfig) -> TelemetryResult<()> {
    gotodoc_telemetry::init_logging(&config.logging.to_log_config())
}
