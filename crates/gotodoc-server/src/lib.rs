//! # gotodoc Server
//!
//! Route registry, dispatcher and HTTP transport.
//!
//! - [`App`]: Init, Register and Serve for one service
//! - [`Registry`]: per-path method tables, frozen on serve
//! - [`Dispatcher`]: method resolution with `OPTIONS` and `405` handling
//! - [`HttpServer`]: hyper/tokio transport with graceful shutdown
//!
//! ## Example
//!
//! ```rust,ignore
//! use gotodoc_server::{App, HttpServer, RouteTable, ServerConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut app = App::init("Items", "1.0.0", "Item store");
//!     app.get("/items/{id}", get_item)?;
//!
//!     let mut table = RouteTable::new();
//!     app.serve_stdout(&mut table)?;
//!
//!     HttpServer::new(ServerConfig::default(), table).run().await?;
//!     Ok(())
//! }
//! ```

#![doc(html_root_url = "https://docs.rs/gotodoc-server/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod app;
mod config;
mod dispatcher;
mod endpoint;
mod error;
mod registry;
mod server;
pub mod shutdown;

pub use app::App;
pub use config::{
    ServerConfig, ServerConfigBuilder, DEFAULT_HTTP_ADDR, DEFAULT_REQUEST_TIMEOUT_SECS,
    DEFAULT_SHUTDOWN_TIMEOUT_SECS,
};
pub use dispatcher::{Dispatcher, Route, RouteTable};
pub use endpoint::{BoxedResponse, Endpoint};
pub use error::{RegistrationError, ServerError};
pub use registry::Registry;
pub use server::{bind, HttpResponse, HttpServer};
pub use shutdown::{ConnectionTracker, ShutdownSignal};
