//! # gotodoc
//!
//! **Declarative HTTP handlers with a generated OpenAPI document**
//!
//! A handler is an async function from a request record to an optional
//! response record. Annotations on the record's fields say where each value
//! comes from; registration records the operation in an OpenAPI 3.1 document
//! and serve installs the handlers and writes that document out.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use gotodoc::prelude::*;
//!
//! #[derive(Default, Serialize, Deserialize, RequestRecord)]
//! #[record(crate = "gotodoc::core")]
//! struct GetItem {
//!     #[param(path = "id")]
//!     id: String,
//!     #[param(query = "search", required = false)]
//!     search: String,
//! }
//!
//! async fn get_item(_ctx: RequestContext, req: GetItem) -> HandlerResult<String> {
//!     Ok(Some(req.id))
//! }
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
//!
//! ## Request flow
//!
//! ```text
//! Request → route match → method resolution ─┬→ OPTIONS: 204 + Allow
//!                                            ├→ unknown method: 405 + Allow
//!                                            └→ bind params → merge body → handler
//!                                                                            ↓
//! Response ←──────────────────────── encode (200 JSON / 204 / 400 / 500) ←───┘
//! ```

#![doc(html_root_url = "https://docs.rs/gotodoc/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod bootstrap;

pub use bootstrap::{app_from_config, init_logging, server_config};

// Re-export core types
pub use gotodoc_core as core;

// Re-export router types
pub use gotodoc_router as router;

// Re-export extraction types
pub use gotodoc_extract as extract;

// Re-export document types
pub use gotodoc_docs as docs;

// Re-export server types
pub use gotodoc_server as server;

// Re-export configuration types
pub use gotodoc_config as config;

// Re-export logging setup
pub use gotodoc_telemetry as telemetry;

// Re-export derive macros
pub use gotodoc_macros::{ApiSchema, RequestRecord};

/// Prelude module for convenient imports.
///
/// # Example
///
/// ```rust,ignore
/// use gotodoc::prelude::*;
/// ```
pub mod prelude {
    pub use gotodoc_core::{
        ApiSchema, HandlerError, HandlerResult, RequestContext, RequestId, RequestRecord,
        ResponseRecord,
    };

    // Derive macros share their trait names
    pub use gotodoc_macros::{ApiSchema, RequestRecord};

    pub use gotodoc_docs::DocFormat;

    pub use gotodoc_server::{App, HttpServer, RegistrationError, RouteTable, ServerConfig, ServerError};

    pub use gotodoc_config::{ConfigLoader, GotodocConfig};

    pub use http::Method;

    pub use serde::{Deserialize, Serialize};
}
