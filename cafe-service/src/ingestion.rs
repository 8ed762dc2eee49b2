use std::{sync::Arc, time::Instant};

use axum::body::Bytes;
use cafe_client::Database;
use serde::Serialize;
use time::OffsetDateTime;

use crate::{
    error::ServiceError,
    pipeline::Pipeline,
    sinks::SqliteReadingSink,
    sources::{CsvRow, CsvUploadSource},
    transform::ReadingValidation,
};

pub const STATUS_OK: &str = "OK";

/// Outcome of a committed upload.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadSummary {
    /// Café of the first data row; `None` for a header-only file.
    pub cafe_id: Option<i64>,
    pub file_name: Option<String>,
    pub rows_imported: usize,
    pub status: String,
    #[serde(with = "time::serde::rfc3339")]
    pub processed_at: OffsetDateTime,
}

/// Runs CSV uploads through parse → validate → transactional write.
#[derive(Debug, Clone)]
pub struct IngestionService {
    db: Database,
}

impl IngestionService {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    pub async fn ingest(
        &self,
        file_name: Option<String>,
        payload: Bytes,
    ) -> Result<UploadSummary, ServiceError> {
        if payload.is_empty() {
            return Err(ServiceError::EmptyUpload);
        }

        let started = Instant::now();
        let pipeline: Pipeline<_, CsvRow, _> = Pipeline {
            source: CsvUploadSource::new(payload),
            transforms: vec![Arc::new(ReadingValidation)],
            sink: SqliteReadingSink::new(self.db.clone()),
        };

        match pipeline.run().await {
            Ok(tally) => {
                metrics::histogram!("ingest_batch_duration_seconds")
                    .record(started.elapsed().as_secs_f64());
                tracing::info!(
                    file_name = file_name.as_deref().unwrap_or("<unnamed>"),
                    cafe_id = ?tally.cafe_id,
                    rows_imported = tally.rows_imported,
                    cafes_created = tally.cafes_created,
                    "upload committed"
                );

                Ok(UploadSummary {
                    cafe_id: tally.cafe_id,
                    file_name,
                    rows_imported: tally.rows_imported,
                    status: STATUS_OK.to_string(),
                    processed_at: OffsetDateTime::now_utc(),
                })
            }
            Err(e) => {
                metrics::counter!("ingestion_failed_total").increment(1);
                tracing::warn!(
                    error = %e,
                    file_name = file_name.as_deref().unwrap_or("<unnamed>"),
                    "upload rejected, nothing committed"
                );
                Err(e)
            }
        }
    }
}
