use anyhow::Context;
use clap::Parser;
use pagecraft_server::{router, AppState, ServerConfig};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Pagecraft layout persistence server
#[derive(Parser, Debug)]
#[command(name = "pagecraft-server")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Directory containing pagecraft.config.json
    #[arg(short, long, default_value = ".")]
    config_dir: PathBuf,

    /// Interface to bind (overrides config)
    #[arg(long)]
    host: Option<String>,

    /// Port to listen on (overrides config)
    #[arg(short, long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let mut config = ServerConfig::load(&args.config_dir)
        .with_context(|| format!("failed to load config from {}", args.config_dir.display()))?;
    if let Some(host) = args.host {
        config.host = host;
    }
    if let Some(port) = args.port {
        config.port = port;
    }

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_filter));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    tracing::info!(%addr, "pagecraft server listening");

    axum::serve(listener, router(AppState::default())).await?;
    Ok(())
}
