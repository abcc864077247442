//! CDN Prefix Reverse Proxy
//!
//! A small local reverse proxy that rewrites a fixed set of URL path
//! prefixes to an upstream CDN origin and relays the response back to the
//! caller with permissive CORS headers attached.
//!
//! # Architecture Overview
//!
//! ```text
//!                      ┌──────────────────────────────────────────┐
//!                      │              PREFIX PROXY                 │
//!                      │                                           │
//!   Client Request     │  ┌─────────┐    ┌──────────────┐         │
//!   ──────────────────▶│  │  http   │───▶│   routing    │         │
//!                      │  │ server  │    │ prefix table │         │
//!                      │  └─────────┘    └──────┬───────┘         │
//!                      │                        │                  │
//!                      │                        ▼                  │
//!   Client Response    │  ┌─────────┐    ┌──────────────┐         │
//!   ◀──────────────────│  │  CORS   │◀───│   upstream   │◀────────┼──── CDN Origin
//!                      │  │ headers │    │    client    │         │
//!                      │  └─────────┘    └──────────────┘         │
//!                      │                                           │
//!                      │  config (TOML)          lifecycle         │
//!                      │  load/validate          shutdown/signals  │
//!                      └──────────────────────────────────────────┘
//! ```
//!
//! GET only, no caching, no retries, no load balancing. The prefix table is
//! built once at startup and is immutable for the process lifetime.

// Core subsystems
pub mod config;
pub mod http;
pub mod routing;

// Cross-cutting concerns
pub mod lifecycle;

pub use config::ProxyConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
