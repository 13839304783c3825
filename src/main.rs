//! BFF proxy server.
//!
//! ```text
//!   browser ──▶ /api/server/posts?limit=5 ──▶ ┌──────────────┐ ──▶ {API_URL}/posts?limit=5
//!                                             │  bff-proxy   │
//!   browser ◀── upstream status + body   ◀── └──────────────┘ ◀── upstream response
//! ```

use std::net::SocketAddr;
use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use bff_proxy::config::{load_config, Overrides, ProxyConfig};
use bff_proxy::lifecycle::{shutdown_signal, Shutdown};
use bff_proxy::observability::{init_logging, init_metrics};
use bff_proxy::HttpServer;

#[derive(Parser)]
#[command(name = "bff-proxy")]
#[command(about = "Backend-for-Frontend proxy forwarding /api/server/* to an upstream API", long_about = None)]
struct Cli {
    /// Path to a TOML configuration file.
    #[arg(short, long, env = "BFF_CONFIG")]
    config: Option<PathBuf>,

    /// Upstream base URL (overrides upstream.base_url).
    #[arg(long, env = "API_URL")]
    api_url: Option<String>,

    /// Listen address (overrides listener.bind_address).
    #[arg(short, long, env = "BFF_BIND")]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => load_config(path)?,
        None => ProxyConfig::default(),
    };
    let config = Overrides {
        bind_address: cli.bind,
        upstream_base_url: cli.api_url,
    }
    .apply(config)?;

    init_logging(&config.observability.log_level);

    tracing::info!("bff-proxy v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        bind_address = %config.listener.bind_address,
        upstream = config.upstream.base_url.as_deref().unwrap_or("<unset>"),
        mount_prefix = %config.proxy.mount_prefix,
        upstream_timeout_secs = config.upstream.timeout_secs,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        // Validation has already checked the address.
        if let Ok(addr) = config.observability.metrics_address.parse::<SocketAddr>() {
            init_metrics(addr);
        }
    }

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Shutdown::new();
    let server = HttpServer::new(&config);
    let server_shutdown = shutdown.subscribe();

    shutdown.trigger_on(shutdown_signal());

    server.run(listener, server_shutdown).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
