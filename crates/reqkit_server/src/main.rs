//! Report server binary.

use clap::Parser;
use reqkit_server::{ServerArgs, ServiceConfig, build_router};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let args = ServerArgs::parse();

    let (config, config_error) = match args.config {
        Some(config_path) => match ServiceConfig::from_file(&config_path) {
            Ok(config) => (config, None),
            Err(err) => (ServiceConfig::default(), Some(err)),
        },
        None => (ServiceConfig::default(), None),
    };
    let config = config.with_port_override(std::env::var("PORT").ok().as_deref());

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_filter.as_str()));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    if let Some(err) = config_error {
        tracing::warn!(error = %err, "Failed to load config, using defaults");
    }

    let bind_addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!(
        bind_addr = %bind_addr,
        max_body_bytes = config.max_body_bytes,
        "report server starting"
    );

    axum::serve(listener, build_router(&config)).await
}
