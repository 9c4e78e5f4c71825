use anyhow::Context;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use vibraze_server::config::{DEFAULT_CONFIG_FILE, ServerConfig};
use vibraze_server::{build_app, db};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing()?;

    info!("starting vibraze server");
    let config = ServerConfig::load(DEFAULT_CONFIG_FILE)
        .with_context(|| format!("failed to load server config from {DEFAULT_CONFIG_FILE}"))?;

    if config.mercado_pago.access_token.is_none() {
        warn!("MERCADO_PAGO_ACCESS_TOKEN is not set, payment routes will fail");
    }
    if config.imgbb.api_key.is_none() {
        warn!("IMGBB_API_KEY is not set, image uploads will fail");
    }

    let db = db::init_pool_and_migrate(&config.database_url).await?;
    let app = build_app(&config, db)?;

    let listener = tokio::net::TcpListener::bind(&config.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr))?;
    info!(addr = %config.bind_addr, "server is ready, press Ctrl+C to shut down");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    info!("server shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!(error = %err, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("shutdown signal received, stopping server");
}

fn init_tracing() -> anyhow::Result<()> {
    let env_filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new("info"))?;

    tracing_subscriber::fmt().with_env_filter(env_filter).init();
    Ok(())
}
