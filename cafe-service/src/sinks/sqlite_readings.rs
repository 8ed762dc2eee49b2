use std::{collections::HashMap, time::SystemTime};

use cafe_client::{
    db::{cafe_queries, reading_queries},
    domain::NewEnergyReading,
    Database,
};
use futures::StreamExt;

use crate::{
    error::ServiceError,
    pipeline::{Envelope, Sink},
    sources::CsvRow,
};

/// What a committed upload wrote.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IngestTally {
    /// Café of the first data row. Later rows never replace it, even when
    /// they belong to another café.
    pub cafe_id: Option<i64>,
    pub rows_imported: usize,
    pub cafes_created: usize,
}

/// Writes a whole upload inside one transaction.
///
/// The transaction commits only after the input stream ends cleanly. Any
/// upstream error or failed write returns early, dropping the transaction,
/// which rolls back every row of the batch.
pub struct SqliteReadingSink {
    db: Database,
}

impl SqliteReadingSink {
    pub fn new(db: Database) -> Self {
        Self { db }
    }
}

#[async_trait::async_trait]
impl Sink<CsvRow> for SqliteReadingSink {
    type Output = IngestTally;

    async fn run<S>(&self, mut input: S) -> Result<IngestTally, ServiceError>
    where
        S: futures::Stream<Item = Result<Envelope<CsvRow>, ServiceError>> + Send + Unpin + 'static,
    {
        let mut tx = self.db.begin_write().await?;
        let mut tally = IngestTally::default();
        let mut first_received: Option<SystemTime> = None;
        let mut known: HashMap<(String, String), i64> = HashMap::new();

        while let Some(item) = input.next().await {
            let env = item?;
            first_received.get_or_insert(env.received_at);
            let row = env.payload;

            let key = (row.name, row.location);
            let cafe_id = match known.get(&key) {
                Some(id) => *id,
                None => {
                    let (cafe, created) = cafe_queries::find_or_create(&mut tx, &key.0, &key.1)
                        .await
                        .map_err(|e| {
                            tracing::error!(error = %e, line = env.line, "cafe lookup failed, rolling back upload");
                            e
                        })?;
                    if created {
                        tally.cafes_created += 1;
                    }
                    known.insert(key, cafe.id);
                    cafe.id
                }
            };
            tally.cafe_id.get_or_insert(cafe_id);

            let reading = NewEnergyReading {
                cafe_id,
                ts: row.ts,
                kwh: row.kwh,
            };
            reading_queries::insert_reading(&mut tx, &reading)
                .await
                .map_err(|e| {
                    tracing::error!(error = %e, line = env.line, "reading insert failed, rolling back upload");
                    e
                })?;
            tally.rows_imported += 1;
        }

        tx.commit().await?;
        metrics::counter!("readings_ingested_total").increment(tally.rows_imported as u64);
        // Time from the first row leaving the source to the batch being durable.
        if let Some(lag) = first_received.and_then(|t| t.elapsed().ok()) {
            metrics::histogram!("ingest_commit_lag_seconds").record(lag.as_secs_f64());
        }

        Ok(tally)
    }
}
