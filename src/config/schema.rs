//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the proxy.
//! All types derive Serde traits for deserialization from config files, and
//! every section has defaults so a minimal (or absent) config file works.

use serde::{Deserialize, Serialize};

/// Root configuration for the prefix proxy.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ProxyConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Ordered prefix-to-origin mappings. Order is significant:
    /// matching is first-match-wins.
    pub routes: Vec<RouteConfig>,

    /// Upstream fetch settings (timeout, user agent).
    pub upstream: UpstreamConfig,
}

impl Default for ProxyConfig {
    fn default() -> Self {
        Self {
            listener: ListenerConfig::default(),
            routes: default_routes(),
            upstream: UpstreamConfig::default(),
        }
    }
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address. Defaults to loopback: the proxy fronts a local
    /// browser app and should not be reachable from the network.
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "127.0.0.1:8001".to_string(),
        }
    }
}

/// One prefix-to-origin mapping.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RouteConfig {
    /// Path prefix recognized on the local port (e.g. "/wllama/").
    pub local_prefix: String,

    /// Origin URL the prefix maps to. The request path remainder is
    /// appended verbatim, so this normally ends with "/".
    pub upstream_base: String,
}

/// Upstream fetch configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct UpstreamConfig {
    /// Total timeout for one upstream request, in seconds.
    pub timeout_secs: u64,

    /// User-Agent sent upstream. CDNs reject empty/default agents,
    /// so a generic browser-like string is used by default.
    pub user_agent: String,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 30,
            user_agent: "Mozilla/5.0".to_string(),
        }
    }
}

/// Built-in routing table, mirroring the wllama CDN layout this proxy was
/// built for. Longer prefixes come first so every entry is reachable under
/// first-match-wins.
fn default_routes() -> Vec<RouteConfig> {
    vec![
        RouteConfig {
            local_prefix: "/wllama/single-thread/".to_string(),
            upstream_base: "https://cdn.jsdelivr.net/npm/@wllama/wllama@2.3.2/esm/single-thread/"
                .to_string(),
        },
        RouteConfig {
            local_prefix: "/wllama/multi-thread/".to_string(),
            upstream_base: "https://cdn.jsdelivr.net/npm/@wllama/wllama@2.3.2/esm/multi-thread/"
                .to_string(),
        },
        RouteConfig {
            local_prefix: "/wllama/".to_string(),
            upstream_base: "https://cdn.jsdelivr.net/npm/@wllama/wllama@2.3.2/esm/".to_string(),
        },
    ]
}
