//! The application context: Init, Register and Serve.
//!
//! [`App`] owns the route [`Registry`] and the OpenAPI generator for one
//! service. Handlers are registered against a path pattern and a method;
//! each registration documents the operation and queues an endpoint.
//! [`App::serve`] freezes the registry, installs every queued path onto a
//! [`RouteTable`] and writes the document.
//!
//! # Example
//!
//! ```rust
//! use gotodoc_core::{HandlerResult, RequestContext};
//! use gotodoc_server::{App, RouteTable};
//! use http::Method;
//!
//! async fn ping(_ctx: RequestContext, _req: ()) -> HandlerResult<()> {
//!     Ok(None)
//! }
//!
//! let mut app = App::init("Ping", "1.0.0", "");
//! app.register("/ping", Method::GET, ping).unwrap();
//!
//! let mut table = RouteTable::new();
//! let mut doc = Vec::new();
//! app.serve(&mut table, &mut doc).unwrap();
//!
//! assert_eq!(table.len(), 1);
//! assert!(String::from_utf8(doc).unwrap().contains("/ping"));
//! ```

use std::future::Future;
use std::io::Write;

use gotodoc_core::{HandlerResult, RequestContext, RequestRecord, ResponseRecord};
use gotodoc_docs::{normalize_path, DocFormat, DocsError, OpenApi, OpenApiGenerator};
use gotodoc_extract::DEFAULT_MAX_BODY_SIZE;
use http::Method;

use crate::dispatcher::{Route, RouteTable};
use crate::endpoint::Endpoint;
use crate::error::{RegistrationError, ServerError};
use crate::registry::Registry;

/// Registration and serving context for one service.
#[derive(Debug)]
pub struct App {
    docs: OpenApiGenerator,
    registry: Registry,
    format: DocFormat,
    max_body_bytes: usize,
}

impl App {
    /// Creates an application with the document metadata.
    pub fn init(
        title: impl Into<String>,
        version: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        tracing::info!("initializing application");
        Self {
            docs: OpenApiGenerator::new(title, version, description),
            registry: Registry::new(),
            format: DocFormat::default(),
            max_body_bytes: DEFAULT_MAX_BODY_SIZE,
        }
    }

    /// Replaces the document metadata.
    pub fn set_info(
        &mut self,
        title: impl Into<String>,
        version: impl Into<String>,
        description: impl Into<String>,
    ) {
        self.docs.set_info(title, version, description);
    }

    /// Sets the format [`serve`](Self::serve) writes the document in.
    #[must_use]
    pub fn with_format(mut self, format: DocFormat) -> Self {
        self.format = format;
        self
    }

    /// Sets the body limit for endpoints registered afterwards.
    #[must_use]
    pub fn with_max_body_bytes(mut self, limit: usize) -> Self {
        self.max_body_bytes = limit;
        self
    }

    /// Adds a server URL to the document.
    #[must_use]
    pub fn with_server(mut self, url: impl Into<String>) -> Self {
        self.docs = self.docs.server(url, None);
        self
    }

    /// Registers `handler` for `method` on `path` and returns the normalized
    /// pattern.
    ///
    /// Nothing is recorded when registration fails.
    ///
    /// # Errors
    ///
    /// - [`RegistrationError::RegistrationClosed`] after [`serve`](Self::serve)
    /// - [`RegistrationError::Docs`] for an invalid path, an undocumentable
    ///   method or a duplicate (method, path) pair
    /// - [`RegistrationError::Route`] if the pattern conflicts with another
    ///   registered pattern
    pub fn register<Req, Res, F, Fut>(
        &mut self,
        path: &str,
        method: Method,
        handler: F,
    ) -> Result<String, RegistrationError>
    where
        Req: RequestRecord,
        Res: ResponseRecord,
        F: Fn(RequestContext, Req) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = HandlerResult<Res>> + Send + 'static,
    {
        if self.registry.is_frozen() {
            return Err(RegistrationError::RegistrationClosed {
                method: method.to_string(),
                path: path.to_string(),
            });
        }

        let pattern = normalize_path(path)?;
        if self.registry.contains(&method, &pattern) {
            return Err(DocsError::DuplicateOperation {
                method: method.to_string(),
                path: pattern,
            }
            .into());
        }
        self.registry.check_pattern(&pattern)?;
        self.docs.add_record_operation::<Req, Res>(&method, &pattern)?;
        self.registry.insert(
            method.clone(),
            &pattern,
            Endpoint::new(handler, self.max_body_bytes),
        )?;

        tracing::info!(http.method = %method, http.route = %pattern, "handler registered");
        Ok(pattern)
    }

    /// Registers a `GET` handler.
    pub fn get<Req, Res, F, Fut>(&mut self, path: &str, handler: F) -> Result<String, RegistrationError>
    where
        Req: RequestRecord,
        Res: ResponseRecord,
        F: Fn(RequestContext, Req) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = HandlerResult<Res>> + Send + 'static,
    {
        self.register(path, Method::GET, handler)
    }

    /// Registers a `POST` handler.
    pub fn post<Req, Res, F, Fut>(&mut self, path: &str, handler: F) -> Result<String, RegistrationError>
    where
        Req: RequestRecord,
        Res: ResponseRecord,
        F: Fn(RequestContext, Req) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = HandlerResult<Res>> + Send + 'static,
    {
        self.register(path, Method::POST, handler)
    }

    /// Registers a `PUT` handler.
    pub fn put<Req, Res, F, Fut>(&mut self, path: &str, handler: F) -> Result<String, RegistrationError>
    where
        Req: RequestRecord,
        Res: ResponseRecord,
        F: Fn(RequestContext, Req) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = HandlerResult<Res>> + Send + 'static,
    {
        self.register(path, Method::PUT, handler)
    }

    /// Registers a `DELETE` handler.
    pub fn delete<Req, Res, F, Fut>(
        &mut self,
        path: &str,
        handler: F,
    ) -> Result<String, RegistrationError>
    where
        Req: RequestRecord,
        Res: ResponseRecord,
        F: Fn(RequestContext, Req) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = HandlerResult<Res>> + Send + 'static,
    {
        self.register(path, Method::DELETE, handler)
    }

    /// Freezes the registry, installs every registered path onto `table` and
    /// writes the document to `out`. Returns the number of installed paths.
    ///
    /// A second call installs nothing and writes the document again.
    ///
    /// # Errors
    ///
    /// - [`ServerError::Route`] if `table` already holds a conflicting
    ///   pattern
    /// - [`ServerError::Docs`] if the document cannot be written
    pub fn serve<W: Write>(&mut self, table: &mut RouteTable, out: W) -> Result<usize, ServerError> {
        let routes = self.registry.freeze();
        let installed = routes.len();

        for (pattern, methods) in routes {
            tracing::debug!(
                http.route = %pattern,
                allow = %methods.allow_header(),
                "installing route"
            );
            if table.insert(&pattern, Route::new(pattern.clone(), methods))?.is_some() {
                tracing::warn!(http.route = %pattern, "replaced a route already on the table");
            }
        }

        tracing::info!(
            routes = installed,
            operations = self.docs.document().operation_count(),
            format = %self.format,
            "serving"
        );

        self.docs.write_to(self.format, out)?;
        Ok(installed)
    }

    /// [`serve`](Self::serve) writing the document to standard output.
    ///
    /// # Errors
    ///
    /// Same as [`serve`](Self::serve).
    pub fn serve_stdout(&mut self, table: &mut RouteTable) -> Result<usize, ServerError> {
        self.serve(table, std::io::stdout().lock())
    }

    /// Returns the accumulated document.
    #[must_use]
    pub fn document(&self) -> &OpenApi {
        self.docs.document()
    }

    /// Renders the document in the configured format.
    ///
    /// # Errors
    ///
    /// Returns [`ServerError::Docs`] if serialization fails.
    pub fn render(&self) -> Result<String, ServerError> {
        Ok(self.docs.render(self.format)?)
    }

    /// Returns true once [`serve`](Self::serve) has been called.
    #[must_use]
    pub fn is_serving(&self) -> bool {
        self.registry.is_frozen()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn unit(_ctx: RequestContext, _req: ()) -> HandlerResult<()> {
        Ok(None)
    }

    async fn number(_ctx: RequestContext, _req: ()) -> HandlerResult<i64> {
        Ok(Some(1))
    }

    #[test]
    fn test_register_returns_normalized_pattern() {
        let mut app = App::init("Items", "1.0.0", "");
        let pattern = app.register("items/{id:[0-9]+}/", Method::GET, unit).unwrap();
        assert_eq!(pattern, "/items/{id}");
        assert!(app.document().operation(&Method::GET, "/items/{id}").is_some());
    }

    #[test]
    fn test_duplicate_registration_is_fatal() {
        let mut app = App::init("Items", "1.0.0", "");
        app.get("/items", unit).unwrap();
        let err = app.get("/items/", number).unwrap_err();
        assert!(err.is_duplicate());
        assert_eq!(app.document().operation_count(), 1);
    }

    #[test]
    fn test_conflicting_pattern_leaves_no_trace() {
        let mut app = App::init("Items", "1.0.0", "");
        app.get("/items/{id}", unit).unwrap();
        let err = app.delete("/items/{name}", unit).unwrap_err();
        assert!(matches!(err, RegistrationError::Route(_)));
        assert!(app.document().operation(&Method::DELETE, "/items/{name}").is_none());
    }

    #[test]
    fn test_serve_is_one_shot() {
        let mut app = App::init("Items", "1.0.0", "").with_format(DocFormat::Json);
        app.get("/items", number).unwrap();
        app.post("/items", unit).unwrap();
        app.put("/items/{id}", unit).unwrap();

        let mut table = RouteTable::new();
        let mut first = Vec::new();
        assert_eq!(app.serve(&mut table, &mut first).unwrap(), 2);
        assert!(app.is_serving());
        assert_eq!(table.len(), 2);

        let routed = table.match_path("/items").unwrap();
        assert_eq!(routed.value.methods().allow_header(), "OPTIONS, GET, POST");

        let mut second = Vec::new();
        assert_eq!(app.serve(&mut table, &mut second).unwrap(), 0);
        assert_eq!(first, second);

        let json: serde_json::Value = serde_json::from_slice(&first).unwrap();
        assert_eq!(json["info"]["title"], "Items");

        let err = app.get("/late", unit).unwrap_err();
        assert!(matches!(err, RegistrationError::RegistrationClosed { .. }));
    }

    #[test]
    fn test_set_info_and_render() {
        let mut app = App::init("Draft", "0.0.1", "");
        app.set_info("Items", "2.0.0", "Item store");
        let yaml = app.render().unwrap();
        assert!(yaml.contains("title: Items"));
        assert!(yaml.contains("description: Item store"));
    }
}
