//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, proxy handler)
//!     → [prefix table resolves the upstream target]
//!     → upstream.rs (single GET, bounded timeout)
//!     → response.rs (CORS decoration, preflight)
//!     → streamed to client
//! ```

pub mod response;
pub mod server;
pub mod upstream;

pub use server::HttpServer;
pub use upstream::{UpstreamClient, UpstreamError};
