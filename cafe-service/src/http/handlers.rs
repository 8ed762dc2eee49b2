use axum::{
    extract::{Multipart, Path, State},
    Json,
};

use super::AppState;
use crate::{
    error::ServiceError,
    ingestion::UploadSummary,
    optimization::{self, InsightsResponse},
};

/// Multipart field carrying the CSV file.
pub const FILE_FIELD: &str = "file";

pub async fn upload(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<UploadSummary>, ServiceError> {
    metrics::counter!("csv_upload_requests_total").increment(1);

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ServiceError::Upload(e.to_string()))?
    {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }

        let file_name = field.file_name().map(str::to_owned);
        let bytes = field
            .bytes()
            .await
            .map_err(|e| ServiceError::Upload(e.to_string()))?;

        let summary = state.ingestion.ingest(file_name, bytes).await?;
        return Ok(Json(summary));
    }

    Err(ServiceError::MissingFile(FILE_FIELD))
}

pub async fn insights(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<Json<InsightsResponse>, ServiceError> {
    metrics::counter!("insights_requests_total").increment(1);

    let cafe_id: i64 = raw_id
        .parse()
        .map_err(|_| ServiceError::InvalidCafeId(raw_id.clone()))?;

    let analytics = match state.analytics.compute_analytics(cafe_id).await {
        Ok(a) => a,
        Err(e @ ServiceError::CafeNotFound(_)) => {
            metrics::counter!("insights_not_found_total").increment(1);
            return Err(e);
        }
        Err(e) => return Err(e),
    };

    Ok(Json(optimization::generate_insights(&analytics)))
}

pub async fn health() -> &'static str {
    "ok"
}
