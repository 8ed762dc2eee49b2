use crate::{
    error::{RowError, ServiceError},
    pipeline::{Envelope, Transform},
    sources::CsvRow,
};

/// Pure validation of a parsed upload row.
///
/// Rules:
/// - kWh must be finite and non-negative.
pub fn validate_reading(env: Envelope<CsvRow>) -> Result<Envelope<CsvRow>, ServiceError> {
    let kwh = env.payload.kwh;

    if !kwh.is_finite() || kwh < 0.0 {
        return Err(ServiceError::MalformedRow {
            line: env.line,
            source: RowError::NegativeAmount(kwh),
        });
    }

    Ok(env)
}

#[derive(Clone, Default)]
pub struct ReadingValidation;

#[async_trait::async_trait]
impl Transform<CsvRow, CsvRow> for ReadingValidation {
    async fn apply(&self, input: Envelope<CsvRow>) -> Result<Envelope<CsvRow>, ServiceError> {
        match validate_reading(input) {
            Ok(env) => Ok(env),
            Err(e) => {
                metrics::counter!("validation_reading_rejected_total").increment(1);
                Err(e)
            }
        }
    }
}
