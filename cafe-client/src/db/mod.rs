pub mod cafe_queries;
pub mod reading_queries;

use std::{str::FromStr, time::Duration};

use sqlx::{
    sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions},
    Sqlite, Transaction,
};

use crate::error::Result;

/// Connection pool wrapper for the café store.
#[derive(Debug, Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    const DEFAULT_POOL_SIZE: u32 = 8;
    const BUSY_TIMEOUT: Duration = Duration::from_secs(30);

    /// Connect using a URL such as `sqlite:cafe.db?mode=rwc` or `sqlite::memory:`.
    pub async fn connect(url: &str) -> Result<Self> {
        Self::connect_with_pool_size(url, Self::DEFAULT_POOL_SIZE).await
    }

    pub async fn connect_with_pool_size(url: &str, pool_size: u32) -> Result<Self> {
        let options = SqliteConnectOptions::from_str(url)?
            .create_if_missing(true)
            .foreign_keys(true)
            .busy_timeout(Self::BUSY_TIMEOUT);

        let pool = SqlitePoolOptions::new()
            .max_connections(pool_size)
            .acquire_timeout(Duration::from_secs(30))
            .connect_with(options)
            .await?;

        tracing::info!(url, pool_size, "connected to cafe store");

        Ok(Self { pool })
    }

    /// Apply the embedded schema migrations.
    pub async fn migrate(&self) -> Result<()> {
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        tracing::debug!("cafe store migrations applied");
        Ok(())
    }

    /// Open a transaction holding the write lock from `BEGIN`.
    ///
    /// Concurrent writers queue on the busy timeout here instead of failing
    /// with `SQLITE_BUSY` when a read inside the transaction upgrades to a write.
    pub async fn begin_write(&self) -> Result<Transaction<'static, Sqlite>> {
        let tx = self.pool.begin_with("BEGIN IMMEDIATE").await?;
        Ok(tx)
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    pub async fn close(&self) {
        self.pool.close().await;
    }
}
