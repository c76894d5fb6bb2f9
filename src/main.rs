use log::{info, warn};
use std::sync::Arc;
use tokio::net::TcpListener;

use recipe_relay::{create_router, RecipeRelayBuilder, RelayConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // Missing mandatory secrets stop the process before it accepts traffic
    let config = RelayConfig::load()?;

    let relay = RecipeRelayBuilder::from_config(&config)?.build()?;
    if !relay.scraper_enabled() {
        warn!("ScrapeCreators is not configured; /parse_recipe_tiktok will answer 500");
    }

    let router = create_router(Arc::new(relay), config.server.max_upload_bytes);

    let listener = TcpListener::bind(config.server.bind_address).await?;
    info!("Listening on {}", config.server.bind_address);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
