//! HTTP server setup and the proxy handler.
//!
//! # Responsibilities
//! - Create the Axum router with the catch-all proxy handler
//! - Wire up middleware (request tracing)
//! - Match requests against the prefix table
//! - Fetch the matched upstream target and relay the response
//! - Answer OPTIONS preflight locally
//!
//! # Request lifecycle
//! ```text
//! Received → Matched | NotFound → (Fetching → Fetched | FetchFailed) → Responded
//! ```
//! Linear per request; nothing persists across requests.

use std::sync::Arc;

use axum::{
    body::Body,
    extract::State,
    http::{header, HeaderValue, Method, Request, StatusCode},
    response::{IntoResponse, Response},
    routing::any,
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::trace::TraceLayer;

use crate::config::ProxyConfig;
use crate::http::response::{apply_cors, preflight_response};
use crate::http::upstream::{UpstreamClient, UpstreamError};
use crate::routing::PrefixTable;

/// Fallback media type when the upstream does not name one.
const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

/// Application state injected into the handler.
#[derive(Clone)]
pub struct AppState {
    pub table: Arc<PrefixTable>,
    pub upstream: UpstreamClient,
}

/// HTTP server for the prefix proxy.
pub struct HttpServer {
    router: Router,
    config: ProxyConfig,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: ProxyConfig) -> Result<Self, UpstreamError> {
        let table = Arc::new(PrefixTable::from_config(&config.routes));
        let upstream = UpstreamClient::new(&config.upstream)?;

        let state = AppState { table, upstream };
        let router = Self::build_router(state);

        Ok(Self { router, config })
    }

    /// Build the Axum router. Every path goes through the proxy handler;
    /// there is no other surface.
    fn build_router(state: AppState) -> Router {
        Router::new()
            .route("/", any(proxy_handler))
            .route("/{*path}", any(proxy_handler))
            .with_state(state)
            .layer(TraceLayer::new_for_http())
    }

    /// Run the server until the shutdown signal fires, draining in-flight
    /// exchanges.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            routes = self.config.routes.len(),
            "CDN proxy listening"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &ProxyConfig {
        &self.config
    }
}

/// Main proxy handler.
/// Matches the path against the prefix table, fetches the upstream target,
/// and relays status/content-type/body with CORS headers attached.
async fn proxy_handler(State(state): State<AppState>, request: Request<Body>) -> Response {
    // Preflight is answered locally; the CORS header set advertises
    // OPTIONS, so it must actually be handled.
    if request.method() == Method::OPTIONS {
        return preflight_response();
    }

    let path = request
        .uri()
        .path_and_query()
        .map_or_else(|| request.uri().path().to_string(), |pq| pq.to_string());

    if request.method() != Method::GET {
        tracing::debug!(method = %request.method(), path = %path, "Method not supported");
        return (
            StatusCode::METHOD_NOT_ALLOWED,
            "method not supported: this proxy serves GET only\n",
        )
            .into_response();
    }

    let Some(target) = state.table.resolve(&path) else {
        tracing::debug!(path = %path, "No CDN mapping for path");
        return (
            StatusCode::NOT_FOUND,
            format!("no CDN mapping for {path}\n"),
        )
            .into_response();
    };

    match state.upstream.fetch(&target.target_url).await {
        Ok(upstream_response) => {
            relay(&path, &target.target_url, upstream_response)
        }
        Err(e) => {
            tracing::error!(
                path = %path,
                target_url = %target.target_url,
                error = %e,
                "Upstream fetch failed"
            );
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("upstream fetch failed: {e}\n"),
            )
                .into_response()
        }
    }
}

/// Relay an upstream response to the client: status passthrough,
/// content-type copied (or a binary default), body streamed chunk by
/// chunk, CORS headers attached.
fn relay(path: &str, target_url: &str, upstream_response: reqwest::Response) -> Response {
    let status = StatusCode::from_u16(upstream_response.status().as_u16())
        .unwrap_or(StatusCode::BAD_GATEWAY);

    let content_type = upstream_response
        .headers()
        .get(reqwest::header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or(DEFAULT_CONTENT_TYPE)
        .to_string();

    tracing::info!(
        path = %path,
        target_url = %target_url,
        status = %status,
        content_type = %content_type,
        "Proxied request"
    );

    // Streaming relay: assets run to tens of megabytes, so the body is
    // never buffered whole. Dropping the stream (client disconnect)
    // aborts the upstream transfer.
    let mut response = Response::new(Body::from_stream(upstream_response.bytes_stream()));
    *response.status_mut() = status;
    response.headers_mut().insert(
        header::CONTENT_TYPE,
        HeaderValue::from_str(&content_type)
            .unwrap_or_else(|_| HeaderValue::from_static(DEFAULT_CONTENT_TYPE)),
    );
    apply_cors(response.headers_mut());
    response
}
