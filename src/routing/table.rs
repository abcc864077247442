//! The ordered prefix table and target resolution.
//!
//! # Responsibilities
//! - Store `(local_prefix, upstream_base)` entries in configuration order
//! - Resolve a request path to an upstream URL, first-match-wins
//!
//! # Design Decisions
//! - Matching runs over the raw path-and-query string, so a query component
//!   rides along in the remainder verbatim (no configured prefix contains
//!   `?`, making this equivalent to path-only matching)
//! - The remainder is appended to the upstream base by plain string
//!   concatenation: no re-encoding, no `..` normalization
//! - Immutable after construction (thread-safe without locks)
//! - O(n) scan; the table holds a handful of entries

use crate::config::RouteConfig;

/// One compiled routing entry.
#[derive(Debug, Clone)]
pub struct RouteEntry {
    /// Path prefix recognized on the local port.
    pub local_prefix: String,
    /// Origin URL the prefix maps to.
    pub upstream_base: String,
}

/// The resolved upstream target for one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedTarget {
    /// Full upstream URL to fetch.
    pub target_url: String,
    /// The prefix that matched, for diagnostics.
    pub local_prefix: String,
}

/// Ordered, immutable prefix-to-origin table.
#[derive(Debug)]
pub struct PrefixTable {
    entries: Vec<RouteEntry>,
}

impl PrefixTable {
    /// Build the table from config, preserving configuration order.
    pub fn from_config(routes: &[RouteConfig]) -> Self {
        let entries = routes
            .iter()
            .map(|r| RouteEntry {
                local_prefix: r.local_prefix.clone(),
                upstream_base: r.upstream_base.clone(),
            })
            .collect();
        Self { entries }
    }

    /// Resolve a path-and-query string against the table.
    ///
    /// Returns the first entry whose prefix is a string-prefix of the
    /// request path, with the remainder appended to its upstream base.
    /// Returns `None` when nothing matches.
    pub fn resolve(&self, path_and_query: &str) -> Option<ResolvedTarget> {
        self.entries.iter().find_map(|entry| {
            path_and_query
                .strip_prefix(&entry.local_prefix)
                .map(|remainder| ResolvedTarget {
                    target_url: format!("{}{}", entry.upstream_base, remainder),
                    local_prefix: entry.local_prefix.clone(),
                })
        })
    }

    /// Number of entries in the table.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when the table holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
