//! Upstream CDN fetch.
//!
//! # Responsibilities
//! - Hold the shared reqwest client (TLS, timeout, user agent)
//! - Issue one GET per proxied request, no retries
//! - Map transport failures into the proxy's error taxonomy
//!
//! # Design Decisions
//! - One client for the process: connection pooling across requests
//! - The configured timeout bounds the whole exchange, so a stalled CDN
//!   cannot hold a request task indefinitely
//! - Timeout is distinguished from other transport failures for logging,
//!   but both surface to the client as 500

use std::time::Duration;

use crate::config::UpstreamConfig;

/// Failure reaching or reading the upstream origin.
#[derive(Debug, thiserror::Error)]
pub enum UpstreamError {
    #[error("upstream request timed out after {0}s")]
    Timeout(u64),

    #[error("upstream unreachable: {0}")]
    Unreachable(#[source] reqwest::Error),

    #[error("failed to build upstream client: {0}")]
    Client(#[source] reqwest::Error),
}

/// Shared client for upstream fetches.
#[derive(Clone)]
pub struct UpstreamClient {
    client: reqwest::Client,
    timeout_secs: u64,
}

impl UpstreamClient {
    /// Build the client from config.
    pub fn new(config: &UpstreamConfig) -> Result<Self, UpstreamError> {
        let client = reqwest::Client::builder()
            .user_agent(config.user_agent.clone())
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(UpstreamError::Client)?;

        Ok(Self {
            client,
            timeout_secs: config.timeout_secs,
        })
    }

    /// GET a target URL. Single attempt; the upstream status is returned
    /// as-is (passthrough is the relay's job, not the client's).
    pub async fn fetch(&self, target_url: &str) -> Result<reqwest::Response, UpstreamError> {
        self.client
            .get(target_url)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    UpstreamError::Timeout(self.timeout_secs)
                } else {
                    UpstreamError::Unreachable(e)
                }
            })
    }
}
