use anyhow::Result;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use floodrisk_gateway::{app, config::GatewayConfig, AppState, ModelProvenance};

#[tokio::main]
async fn main() -> Result<()> {
    let config = GatewayConfig::from_env();

    let default_filter = if config.debug {
        "floodrisk_gateway=debug,flood_model=debug,info"
    } else {
        "info"
    };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| default_filter.into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    if config.secret_key.is_none() {
        tracing::warn!("SECRET_KEY not set");
    }

    // One-shot, blocking provisioning before the listener opens. A hard
    // training failure here is fatal.
    let outcome = flood_model::provision(&config.data_path, &config.model_path)?;
    let provenance = ModelProvenance::from_outcome(&outcome);
    tracing::info!(
        "Model ready (source: {}, artifact: {})",
        provenance.source,
        config.model_path.display()
    );

    let state = AppState::new(outcome.model(), provenance);
    let router = app(state, &config.static_dir);

    let addr = format!("0.0.0.0:{}", config.port);
    tracing::info!("Flood risk gateway starting on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, router).await?;

    Ok(())
}
