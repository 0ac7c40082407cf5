//! HTTP transport.
//!
//! [`HttpServer`] serves a [`Dispatcher`] over HTTP/1.1 with hyper on tokio.
//! Each connection runs on its own task. Request bodies are collected before
//! dispatch, up to the configured body limit and under the request timeout;
//! dispatch itself runs under the same timeout.
//!
//! | Condition | Status |
//! |-----------|--------|
//! | body larger than `max_body_bytes` | `413 Payload Too Large` |
//! | body stream error | `400 Bad Request` |
//! | body collection timed out | `408 Request Timeout` |
//! | dispatch timed out | `504 Gateway Timeout` |
//!
//! # Example
//!
//! ```rust,ignore
//! use gotodoc_server::{App, HttpServer, RouteTable, ServerConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut app = App::init("Items", "1.0.0", "");
//!     // register handlers...
//!     let mut table = RouteTable::new();
//!     app.serve_stdout(&mut table)?;
//!
//!     HttpServer::new(ServerConfig::default(), table).run().await?;
//!     Ok(())
//! }
//! ```

use std::convert::Infallible;
use std::net::SocketAddr;
use std::time::Duration;

use bytes::Bytes;
use gotodoc_extract::response::EmptyResponse;
use http::{Request, Response, StatusCode};
use http_body_util::{BodyExt, Full, LengthLimitError, Limited};
use hyper::body::{Body as _, Incoming};
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper_util::rt::TokioIo;
use tokio::net::{TcpListener, TcpStream};

use crate::config::ServerConfig;
use crate::dispatcher::{Dispatcher, RouteTable};
use crate::error::ServerError;
use crate::shutdown::{ConnectionTracker, ShutdownSignal};

/// The HTTP response type written to the wire.
pub type HttpResponse = Response<Full<Bytes>>;

/// HTTP/1.1 server around a [`Dispatcher`].
#[derive(Debug, Clone)]
pub struct HttpServer {
    config: ServerConfig,
    dispatcher: Dispatcher,
}

impl HttpServer {
    /// Creates a server for an installed route table.
    #[must_use]
    pub fn new(config: ServerConfig, table: RouteTable) -> Self {
        Self::with_dispatcher(config, Dispatcher::new(table))
    }

    /// Creates a server for an existing dispatcher.
    #[must_use]
    pub fn with_dispatcher(config: ServerConfig, dispatcher: Dispatcher) -> Self {
        Self { config, dispatcher }
    }

    /// Returns the configuration.
    #[must_use]
    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Returns the dispatcher.
    #[must_use]
    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }

    /// Serves until Ctrl-C or SIGTERM.
    ///
    /// # Errors
    ///
    /// Returns [`ServerError::Bind`] if the address is invalid or taken.
    pub async fn run(self) -> Result<(), ServerError> {
        let shutdown = ShutdownSignal::with_os_signals();
        self.run_with_shutdown(shutdown).await
    }

    /// Serves until `shutdown` is triggered.
    ///
    /// # Errors
    ///
    /// Returns [`ServerError::Bind`] if the address is invalid or taken.
    pub async fn run_with_shutdown(self, shutdown: ShutdownSignal) -> Result<(), ServerError> {
        let addr = self.config.socket_addr().map_err(|e| {
            ServerError::Bind(format!("invalid address '{}': {e}", self.config.http_addr()))
        })?;
        let listener = TcpListener::bind(addr)
            .await
            .map_err(|e| ServerError::Bind(format!("failed to bind to {addr}: {e}")))?;
        self.run_with_listener(listener, shutdown).await
    }

    /// Serves connections from an already bound listener until `shutdown`
    /// is triggered, then waits up to the shutdown timeout for live
    /// connections to finish.
    ///
    /// # Errors
    ///
    /// Returns [`ServerError::Io`] if the listener has no local address.
    pub async fn run_with_listener(
        self,
        listener: TcpListener,
        shutdown: ShutdownSignal,
    ) -> Result<(), ServerError> {
        let local_addr = listener.local_addr()?;
        tracing::info!(
            address = %local_addr,
            routes = self.dispatcher.route_count(),
            "server listening"
        );

        let tracker = ConnectionTracker::new();

        loop {
            tokio::select! {
                accepted = listener.accept() => match accepted {
                    Ok((stream, remote_addr)) => {
                        let server = self.clone();
                        let token = tracker.acquire();
                        let shutdown = shutdown.clone();
                        tokio::spawn(async move {
                            if let Err(err) = server.serve_connection(stream, shutdown).await {
                                tracing::debug!(
                                    remote_addr = %remote_addr,
                                    error = %err,
                                    "connection error"
                                );
                            }
                            drop(token);
                        });
                    }
                    Err(err) => {
                        tracing::error!(error = %err, "failed to accept connection");
                    }
                },
                () = shutdown.recv() => {
                    tracing::info!("shutdown signal received, no longer accepting connections");
                    break;
                }
            }
        }

        let grace = self.config.shutdown_timeout();
        tokio::select! {
            () = tracker.wait_for_drain() => {
                tracing::info!("all connections closed");
            }
            () = tokio::time::sleep(grace) => {
                tracing::warn!(
                    active = tracker.active_connections(),
                    "shutdown timeout reached with connections still open"
                );
            }
        }

        tracing::info!("server stopped");
        Ok(())
    }

    async fn serve_connection(
        &self,
        stream: TcpStream,
        shutdown: ShutdownSignal,
    ) -> Result<(), hyper::Error> {
        let server = self.clone();
        let service = service_fn(move |request: Request<Incoming>| {
            let server = server.clone();
            async move { Ok::<_, Infallible>(server.handle(request).await) }
        });

        let connection = http1::Builder::new().serve_connection(TokioIo::new(stream), service);
        tokio::pin!(connection);

        tokio::select! {
            result = connection.as_mut() => result,
            () = shutdown.recv() => {
                connection.as_mut().graceful_shutdown();
                connection.await
            }
        }
    }

    async fn handle(&self, request: Request<Incoming>) -> HttpResponse {
        let timeout = self.config.request_timeout();
        let limit = self.config.max_body_bytes();
        let (parts, body) = request.into_parts();

        if body.size_hint().lower() > u64::try_from(limit).unwrap_or(u64::MAX) {
            tracing::debug!(http.path = %parts.uri.path(), limit, "declared body too large");
            return empty(StatusCode::PAYLOAD_TOO_LARGE);
        }

        let body = match tokio::time::timeout(timeout, Limited::new(body, limit).collect()).await {
            Ok(Ok(collected)) => collected.to_bytes(),
            Ok(Err(err)) if err.is::<LengthLimitError>() => {
                tracing::debug!(http.path = %parts.uri.path(), limit, "request body too large");
                return empty(StatusCode::PAYLOAD_TOO_LARGE);
            }
            Ok(Err(err)) => {
                tracing::debug!(error = %err, "failed to read request body");
                return empty(StatusCode::BAD_REQUEST);
            }
            Err(_) => {
                tracing::debug!(http.path = %parts.uri.path(), "request body timed out");
                return empty(StatusCode::REQUEST_TIMEOUT);
            }
        };

        let method = parts.method.clone();
        let path = parts.uri.path().to_string();
        let request = Request::from_parts(parts, body);

        match tokio::time::timeout(timeout, self.dispatcher.dispatch(request)).await {
            Ok(response) => response.map(Full::new),
            Err(_) => {
                tracing::warn!(
                    http.method = %method,
                    http.path = %path,
                    timeout_ms = duration_ms(timeout),
                    "request timed out"
                );
                empty(StatusCode::GATEWAY_TIMEOUT)
            }
        }
    }
}

fn empty(status: StatusCode) -> HttpResponse {
    EmptyResponse::new(status).into_response().map(Full::new)
}

fn duration_ms(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

/// Binds `addr` and returns the listener with its resolved local address.
///
/// # Errors
///
/// Returns [`ServerError::Bind`] if binding fails.
pub async fn bind(addr: SocketAddr) -> Result<(TcpListener, SocketAddr), ServerError> {
    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| ServerError::Bind(format!("failed to bind to {addr}: {e}")))?;
    let local = listener.local_addr()?;
    Ok((listener, local))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dispatcher::Route;
    use crate::endpoint::Endpoint;
    use gotodoc_core::{HandlerResult, RequestContext};
    use gotodoc_router::MethodRouter;
    use http::Method;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};

    async fn hello(_ctx: RequestContext, _req: ()) -> HandlerResult<String> {
        Ok(Some("hello".to_string()))
    }

    fn table() -> RouteTable {
        let mut methods = MethodRouter::new();
        methods.insert(Method::GET, Endpoint::new(hello, 1024)).unwrap();
        methods.insert(Method::POST, Endpoint::new(hello, 1024)).unwrap();

        let mut table = RouteTable::new();
        table.insert("/hello", Route::new("/hello", methods)).unwrap();
        table
    }

    async fn roundtrip(addr: SocketAddr, raw: &str) -> String {
        let mut stream = TcpStream::connect(addr).await.unwrap();
        stream.write_all(raw.as_bytes()).await.unwrap();
        let mut buf = Vec::new();
        stream.read_to_end(&mut buf).await.unwrap();
        String::from_utf8(buf).unwrap()
    }

    fn post(body: &str, declared_len: usize) -> String {
        format!(
            "POST /hello HTTP/1.1\r\nhost: localhost\r\ncontent-length: {declared_len}\r\nconnection: close\r\n\r\n{body}"
        )
    }

    #[tokio::test]
    async fn test_serves_and_shuts_down() {
        let (listener, addr) = bind("127.0.0.1:0".parse().unwrap()).await.unwrap();
        let config = ServerConfig::builder()
            .shutdown_timeout(Duration::from_secs(1))
            .build();
        let shutdown = ShutdownSignal::new();
        let server = HttpServer::new(config, table());
        let task = tokio::spawn(server.run_with_listener(listener, shutdown.clone()));

        let ok = roundtrip(
            addr,
            "GET /hello HTTP/1.1\r\nhost: localhost\r\nconnection: close\r\n\r\n",
        )
        .await;
        assert!(ok.starts_with("HTTP/1.1 200 OK"));
        assert!(ok.ends_with("\"hello\""));

        let missing = roundtrip(
            addr,
            "GET /nope HTTP/1.1\r\nhost: localhost\r\nconnection: close\r\n\r\n",
        )
        .await;
        assert!(missing.starts_with("HTTP/1.1 404 Not Found"));

        shutdown.trigger();
        tokio::time::timeout(Duration::from_secs(5), task)
            .await
            .expect("server should stop")
            .unwrap()
            .unwrap();
    }

    #[tokio::test]
    async fn test_body_limit_applies_before_dispatch() {
        let (listener, addr) = bind("127.0.0.1:0".parse().unwrap()).await.unwrap();
        let config = ServerConfig::builder()
            .max_body_bytes(16)
            .shutdown_timeout(Duration::from_secs(1))
            .build();
        let shutdown = ShutdownSignal::new();
        let server = HttpServer::new(config, table());
        let task = tokio::spawn(server.run_with_listener(listener, shutdown.clone()));

        let small = roundtrip(addr, &post("12345678", 8)).await;
        assert!(small.starts_with("HTTP/1.1 200 OK"));

        let large = "x".repeat(64);
        let rejected = roundtrip(addr, &post(&large, large.len())).await;
        assert!(rejected.starts_with("HTTP/1.1 413"));

        let declared = roundtrip(addr, &post("", 4 * 1024 * 1024)).await;
        assert!(declared.starts_with("HTTP/1.1 413"));

        shutdown.trigger();
        tokio::time::timeout(Duration::from_secs(5), task)
            .await
            .expect("server should stop")
            .unwrap()
            .unwrap();
    }

    #[tokio::test]
    async fn test_invalid_address() {
        let config = ServerConfig::builder().http_addr("nowhere").build();
        let server = HttpServer::new(config, RouteTable::new());
        let err = server
            .run_with_shutdown(ShutdownSignal::new())
            .await
            .unwrap_err();
        assert!(matches!(err, ServerError::Bind(_)));
    }
}
