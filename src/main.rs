//! content-server entry point.
//!
//! Loads configuration, binds the plaintext (and optional TLS) listeners,
//! and serves the site until a listener fails or a shutdown signal arrives.

use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use clap::Parser;
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use content_server::config::{load_config, SiteConfig};
use content_server::net::tls::load_tls_config;
use content_server::HttpServer;

#[derive(Parser, Debug)]
#[command(name = "content-server", about = "Serve a content tree with cascading per-directory rules")]
struct Cli {
    /// Path to the TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the site root directory.
    #[arg(long)]
    root: Option<PathBuf>,

    /// Override the plaintext bind address.
    #[arg(long)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing subscriber
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "content_server=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => SiteConfig::default(),
    };
    if let Some(root) = cli.root {
        config.site.root = root;
    }
    if let Some(bind) = cli.bind {
        config.listener.bind_address = bind;
    }

    // A missing or unreadable site root is a configuration error; die now.
    config.site.root = config.site.root.canonicalize()?;

    tracing::info!(
        root = %config.site.root.display(),
        bind_address = %config.listener.bind_address,
        tls = config.listener.tls.is_some(),
        "Configuration loaded"
    );

    let tls = match &config.listener.tls {
        Some(tls) => {
            let addr: SocketAddr = tls.bind_address.parse()?;
            let rustls =
                load_tls_config(Path::new(&tls.cert_path), Path::new(&tls.key_path)).await?;
            Some((addr, rustls))
        }
        None => None,
    };

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    let server = HttpServer::new(config);

    let serve = async {
        match tls {
            Some((addr, rustls)) => {
                tokio::try_join!(server.run_plain(listener), server.run_tls(addr, rustls))?;
            }
            None => server.run_plain(listener).await?,
        }
        Ok::<(), std::io::Error>(())
    };

    tokio::select! {
        result = serve => result?,
        _ = shutdown_signal() => {}
    }

    tracing::info!("Shutdown complete");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C).
async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("Failed to install Ctrl+C handler");
    tracing::info!("Shutdown signal received");
}
