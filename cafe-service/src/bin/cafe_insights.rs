use anyhow::{bail, Context, Result};
use cafe_client::{db::cafe_queries, Database};
use cafe_service::{analytics::AnalyticsService, config::AppConfig, observability, optimization};
use std::env;

#[tokio::main]
async fn main() -> Result<()> {
    observability::init_tracing();

    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        bail!("usage: cafe_insights <cafe_id>");
    }
    let cafe_id: i64 = args[1]
        .parse()
        .with_context(|| format!("invalid cafe id '{}'", args[1]))?;

    let cfg = AppConfig::load()?;

    let db = Database::connect_with_pool_size(&cfg.database.url, cfg.database.max_connections).await?;
    db.migrate().await?;

    let cafe = cafe_queries::get_cafe(db.pool(), cafe_id)
        .await?
        .with_context(|| format!("no cafe with id {cafe_id}"))?;

    let analytics = AnalyticsService::new(db.clone()).compute_analytics(cafe.id).await?;
    let insights = optimization::generate_insights(&analytics);

    tracing::info!(
        cafe_id,
        name = %cafe.name,
        location = %cafe.location,
        peak_hours = ?insights.peak_hours,
        recommendations = insights.recommendations.len(),
        "insights computed"
    );
    println!("{}", serde_json::to_string_pretty(&insights)?);

    db.close().await;
    Ok(())
}
