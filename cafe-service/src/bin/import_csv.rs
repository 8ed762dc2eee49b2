use anyhow::{bail, Result};
use axum::body::Bytes;
use cafe_client::{db::reading_queries, Database};
use cafe_service::{config::AppConfig, ingestion::IngestionService, observability};
use std::{env, path::Path};

#[tokio::main]
async fn main() -> Result<()> {
    observability::init_tracing();

    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        bail!("usage: import_csv <csv_file_path>");
    }
    let file_path = Path::new(&args[1]);

    // Same config as the server (point CAFE_CONFIG elsewhere to import into another store).
    let cfg = AppConfig::load()?;

    let db = Database::connect_with_pool_size(&cfg.database.url, cfg.database.max_connections).await?;
    db.migrate().await?;

    let payload = tokio::fs::read(file_path).await?;
    let file_name = file_path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned());

    let summary = IngestionService::new(db.clone())
        .ingest(file_name, Bytes::from(payload))
        .await?;

    if let Some(cafe_id) = summary.cafe_id {
        let stored = reading_queries::count_readings_for_cafe(db.pool(), cafe_id).await?;
        tracing::info!(cafe_id, rows_imported = summary.rows_imported, stored, "import finished");
    }

    println!("{}", serde_json::to_string_pretty(&summary)?);

    db.close().await;
    Ok(())
}
