//! Read-side analytics over a café's stored readings.
//!
//! The aggregation and peak functions are pure; [`AnalyticsService`] only
//! adds the store lookup and the not-found rule.

pub mod aggregate;
pub mod peaks;
pub mod snapshot;

pub use aggregate::{daily_usage, hourly_usage, DailyUsage, HourlyUsage};
pub use peaks::find_peaks;
pub use snapshot::AnalyticsSnapshot;

use cafe_client::{db::reading_queries, domain::EnergyReading, Database};

use crate::error::ServiceError;

#[derive(Debug, Clone)]
pub struct AnalyticsService {
    db: Database,
}

impl AnalyticsService {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// Committed readings for the café; a café with none is unknown.
    async fn readings(&self, cafe_id: i64) -> Result<Vec<EnergyReading>, ServiceError> {
        let readings = reading_queries::readings_for_cafe(self.db.pool(), cafe_id).await?;
        if readings.is_empty() {
            return Err(ServiceError::CafeNotFound(cafe_id));
        }
        Ok(readings)
    }

    pub async fn daily_usage(&self, cafe_id: i64) -> Result<DailyUsage, ServiceError> {
        Ok(daily_usage(&self.readings(cafe_id).await?))
    }

    pub async fn hourly_usage(&self, cafe_id: i64) -> Result<HourlyUsage, ServiceError> {
        Ok(hourly_usage(&self.readings(cafe_id).await?))
    }

    pub async fn find_peaks(&self, cafe_id: i64) -> Result<Vec<u8>, ServiceError> {
        let hourly = self.hourly_usage(cafe_id).await?;
        Ok(find_peaks(&hourly))
    }

    /// One snapshot from a single read of the café's readings.
    pub async fn compute_analytics(&self, cafe_id: i64) -> Result<AnalyticsSnapshot, ServiceError> {
        let readings = self.readings(cafe_id).await?;
        tracing::debug!(cafe_id, readings = readings.len(), "computing analytics snapshot");
        Ok(AnalyticsSnapshot::from_readings(cafe_id, &readings))
    }
}
