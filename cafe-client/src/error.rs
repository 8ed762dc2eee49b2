use thiserror::Error;

#[derive(Debug, Error)]
pub enum DbError {
    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    #[error("migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// The store accepted a write but the row could not be read back.
    #[error("{entity} vanished after write: {key}")]
    Inconsistent { entity: &'static str, key: String },
}

pub type Result<T> = std::result::Result<T, DbError>;
