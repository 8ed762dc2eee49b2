use axum::body::Bytes;

use super::csv_row::{is_blank, parse_row, CsvRow};
use crate::{
    error::ServiceError,
    pipeline::{Envelope, EnvelopeStream, Source},
};

/// The only header an upload may start with.
pub const EXPECTED_HEADER: &str = "name,location,timestamp,kwh";

/// Source over an uploaded CSV payload held in memory.
///
/// The first line must equal [`EXPECTED_HEADER`] exactly. Blank lines are
/// skipped. Fields are split on commas with quoting disabled, so a comma
/// inside a café name splits the field.
pub struct CsvUploadSource {
    payload: Bytes,
}

impl CsvUploadSource {
    pub fn new(payload: Bytes) -> Self {
        Self { payload }
    }
}

/// Split off the first line, tolerating CRLF endings.
fn split_header(text: &str) -> (&str, &str) {
    let (header, body) = text.split_once('\n').unwrap_or((text, ""));
    (header.strip_suffix('\r').unwrap_or(header), body)
}

#[async_trait::async_trait]
impl Source<CsvRow> for CsvUploadSource {
    async fn stream(&self) -> EnvelopeStream<CsvRow> {
        let payload = self.payload.clone();
        let s = async_stream::try_stream! {
            let text = std::str::from_utf8(&payload)
                .map_err(|e| ServiceError::Upload(format!("payload is not valid UTF-8: {e}")))?;

            let (header, body) = split_header(text);
            if header != EXPECTED_HEADER {
                Err::<(), _>(ServiceError::InvalidHeader {
                    expected: EXPECTED_HEADER,
                    found: header.to_string(),
                })?;
            }

            let mut rdr = csv::ReaderBuilder::new()
                .has_headers(false)
                .quoting(false)
                .flexible(true)
                .from_reader(body.as_bytes());

            for result in rdr.records() {
                let record = result
                    .map_err(|e| ServiceError::Upload(format!("failed to read CSV record: {e}")))?;
                if is_blank(&record) {
                    continue;
                }

                // The header occupies line 1 of the file.
                let line = record.position().map_or(0, |p| p.line() + 1);
                let row = match parse_row(&record) {
                    Ok(row) => row,
                    Err(source) => {
                        metrics::counter!("csv_row_parse_errors_total").increment(1);
                        Err(ServiceError::MalformedRow { line, source })?
                    }
                };

                yield Envelope::new(row, line);
            }
        };

        Box::pin(s)
    }
}
