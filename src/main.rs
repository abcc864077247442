//! CDN prefix proxy binary.
//!
//! Loads config (or compiled-in defaults), binds the listener, and runs
//! the proxy until interrupted.

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use cdn_proxy::config::{load_config, ProxyConfig};
use cdn_proxy::http::HttpServer;
use cdn_proxy::lifecycle::{shutdown_on_signal, Shutdown};

/// Local reverse proxy that rewrites fixed path prefixes to a CDN origin
/// and relays responses with permissive CORS headers.
#[derive(Parser, Debug)]
#[command(name = "cdn-proxy", version)]
struct Args {
    /// Path to a TOML config file. Without it the built-in routing table
    /// and defaults are used.
    #[arg(long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "cdn_proxy=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = match &args.config {
        Some(path) => load_config(path)?,
        None => ProxyConfig::default(),
    };

    tracing::info!(
        bind_address = %config.listener.bind_address,
        routes = config.routes.len(),
        upstream_timeout_secs = config.upstream.timeout_secs,
        "Configuration loaded"
    );
    for route in &config.routes {
        tracing::info!(
            local_prefix = %route.local_prefix,
            upstream_base = %route.upstream_base,
            "Route"
        );
    }

    let listener = TcpListener::bind(&config.listener.bind_address).await?;

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    tokio::spawn(shutdown_on_signal(shutdown));

    let server = HttpServer::new(config)?;
    server.run(listener, server_shutdown).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
