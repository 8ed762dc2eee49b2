//! HTTP surface: CSV upload and per-café insights.

mod error;
pub mod handlers;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use cafe_client::Database;

use crate::{analytics::AnalyticsService, ingestion::IngestionService};

#[derive(Debug, Clone)]
pub struct AppState {
    pub ingestion: IngestionService,
    pub analytics: AnalyticsService,
}

impl AppState {
    pub fn new(db: Database) -> Self {
        Self {
            ingestion: IngestionService::new(db.clone()),
            analytics: AnalyticsService::new(db),
        }
    }
}

pub fn router(state: AppState, max_upload_bytes: usize) -> Router {
    let cafes = Router::new()
        .route("/upload", post(handlers::upload))
        .route("/:cafe_id/insights", get(handlers::insights));

    Router::new()
        .nest("/api/cafes", cafes)
        .route("/health", get(handlers::health))
        .layer(DefaultBodyLimit::max(max_upload_bytes))
        .with_state(state)
}
