//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check prefixes are absolute paths and origins are real URLs
//! - Validate value ranges (timeout > 0, bind address parses)
//! - Detect prefixes shadowed by earlier entries (warning, not an error:
//!   first-match-wins ordering is part of the contract)
//!
//! # Design Decisions
//! - Returns all validation errors, not just the first
//! - Validation is a pure function over the config; the loader decides
//!   what to do with warnings

use std::net::SocketAddr;

use url::Url;

use crate::config::schema::ProxyConfig;

/// A single semantic problem found in a config.
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("bind address {0:?} is not a valid socket address")]
    BindAddress(String),

    #[error("route {index}: local prefix {prefix:?} must start with '/'")]
    PrefixNotAbsolute { index: usize, prefix: String },

    #[error("route {index}: upstream base {base:?} is not a valid http(s) URL")]
    UpstreamBase { index: usize, base: String },

    #[error("no routes configured")]
    NoRoutes,

    #[error("upstream timeout must be greater than zero")]
    ZeroTimeout,
}

/// Validate a config, collecting every problem found.
pub fn validate_config(config: &ProxyConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::BindAddress(
            config.listener.bind_address.clone(),
        ));
    }

    if config.routes.is_empty() {
        errors.push(ValidationError::NoRoutes);
    }

    for (index, route) in config.routes.iter().enumerate() {
        if !route.local_prefix.starts_with('/') {
            errors.push(ValidationError::PrefixNotAbsolute {
                index,
                prefix: route.local_prefix.clone(),
            });
        }

        match Url::parse(&route.upstream_base) {
            Ok(url) if url.scheme() == "http" || url.scheme() == "https" => {}
            _ => errors.push(ValidationError::UpstreamBase {
                index,
                base: route.upstream_base.clone(),
            }),
        }
    }

    if config.upstream.timeout_secs == 0 {
        errors.push(ValidationError::ZeroTimeout);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Find routes that can never match because an earlier entry's prefix is a
/// prefix of theirs. Returns `(shadowing_index, shadowed_index)` pairs.
///
/// Shadowing is legal (the table is ordered and first-match-wins) but it is
/// almost always a config mistake, so the loader logs each pair.
pub fn shadowed_routes(config: &ProxyConfig) -> Vec<(usize, usize)> {
    let mut pairs = Vec::new();
    for (later, route) in config.routes.iter().enumerate() {
        for (earlier, other) in config.routes.iter().enumerate().take(later) {
            if route.local_prefix.starts_with(&other.local_prefix) {
                pairs.push((earlier, later));
                break;
            }
        }
    }
    pairs
}
