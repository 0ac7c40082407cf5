//! Typed configuration for gotodoc services.
//!
//! Sources are layered: defaults, then a TOML or JSON file, then environment
//! variables. Unknown fields are rejected.
//!
//! # Example
//!
//! ```no_run
//! use gotodoc_config::ConfigLoader;
//!
//! # fn main() -> Result<(), gotodoc_config::ConfigError> {
//! let config = ConfigLoader::new()
//!     .with_dotenv()?
//!     .with_optional_file("gotodoc.toml")?
//!     .with_env_prefix("GOTODOC")
//!     .load()?;
//!
//! println!("listening on {}", config.server.http_addr);
//! # Ok(())
//! # }
//! ```
//!
//! # File format
//!
//! ```toml
//! [server]
//! http_addr = "0.0.0.0:8080"
//! max_body_bytes = 1048576
//! request_timeout_secs = 30
//! shutdown_timeout_secs = 30
//!
//! [docs]
//! title = "Items"
//! version = "1.0.0"
//! description = "Item store"
//! format = "yaml"
//!
//! [logging]
//! level = "info"
//! format = "json"
//! ```
//!
//! # Environment overrides
//!
//! Variables are named `PREFIX_SECTION_KEY`, for example
//! `GOTODOC_SERVER_HTTP_ADDR=127.0.0.1:9000` or `GOTODOC_DOCS_FORMAT=json`.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod config;
mod error;
mod loader;

pub use config::{DocsSection, GotodocConfig, LoggingSection, ServerSection};
pub use error::ConfigError;
pub use loader::{ConfigLoader, DEFAULT_ENV_PREFIX};
