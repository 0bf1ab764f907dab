//! AgentFast API - Main Entry Point

use std::path::PathBuf;

use agentfast_api::{build_router, telemetry, ApiState, ServerConfig};
use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "agentfast-api", version, about = "AgentFast CDN control panel API")]
struct Args {
    /// TOML config file
    #[arg(short, long, env = "AGENTFAST_CONFIG")]
    config: Option<PathBuf>,

    /// Listen address, e.g. 0.0.0.0:8080
    #[arg(short, long, env = "AGENTFAST_LISTEN")]
    listen: Option<String>,

    /// Log level used when RUST_LOG is unset
    #[arg(long)]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let config = ServerConfig::load(args.config.as_deref())?
        .with_overrides(args.listen, args.log_level);

    telemetry::init(&config.log_level);

    tracing::info!("AgentFast API v{}", env!("CARGO_PKG_VERSION"));

    let app = build_router(ApiState::seeded(), &config);

    let listener = tokio::net::TcpListener::bind(&config.listen_addr).await?;
    tracing::info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;

    Ok(())
}
