//! Structured logging for gotodoc services.
//!
//! gotodoc crates emit `tracing` events with a shared set of field names
//! (see [`fields`]): the dispatcher logs each request at debug, binding
//! failures at debug and handler failures at error; registration and serve
//! are logged at info. This crate installs the subscriber that renders them.
//!
//! | Format | Output |
//! |--------|--------|
//! | [`LogFormat::Json`] | one JSON object per event, for log shippers |
//! | [`LogFormat::Pretty`] | multi-line, for local development |
//!
//! # Example
//!
//! ```rust,ignore
//! use gotodoc_telemetry::{init_logging, LogConfig};
//!
//! fn main() -> Result<(), gotodoc_telemetry::TelemetryError> {
//!     init_logging(&LogConfig::development())?;
//!     tracing::info!("ready");
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]

pub mod error;
pub mod logging;

pub use error::TelemetryError;
pub use logging::{create_env_filter, fields, init_logging, LogConfig, LogFormat};

/// Result type for telemetry operations.
pub type TelemetryResult<T> = Result<T, TelemetryError>;
