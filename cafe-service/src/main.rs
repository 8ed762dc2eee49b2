use anyhow::Result;
use cafe_client::Database;
use cafe_service::{
    config::AppConfig,
    http::{self, AppState},
    metrics_server,
    observability,
};
use std::net::SocketAddr;

#[tokio::main]
async fn main() -> Result<()> {
    observability::init_tracing();

    // Load configuration
    let cfg = AppConfig::load()?;

    // Start metrics server if configured
    if let Some(metrics_cfg) = &cfg.metrics {
        metrics_server::init(&metrics_cfg.bind_addr)?;
    }

    let db = Database::connect_with_pool_size(&cfg.database.url, cfg.database.max_connections).await?;
    db.migrate().await?;

    let addr: SocketAddr = cfg
        .http
        .bind_addr
        .parse()
        .map_err(|e| anyhow::anyhow!("invalid http.bind_addr: {e}"))?;

    let app = http::router(AppState::new(db.clone()), cfg.http.max_upload_bytes);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, "cafe service listening");

    axum::serve(listener, app).await?;

    db.close().await;
    Ok(())
}
