use cafe_client::DbError;

/// Failure turning one CSV record into a typed row.
#[derive(thiserror::Error, Debug)]
pub enum RowError {
    #[error("expected 4 fields (name,location,timestamp,kwh), found {0}")]
    TooFewFields(usize),
    #[error("invalid timestamp '{value}': {source}")]
    InvalidTimestamp {
        value: String,
        #[source]
        source: time::error::Parse,
    },
    #[error("invalid kwh '{0}'")]
    InvalidAmount(String),
    #[error("kwh must be a finite non-negative number, got {0}")]
    NegativeAmount(f64),
}

#[derive(thiserror::Error, Debug)]
pub enum ServiceError {
    #[error("File must not be empty")]
    EmptyUpload,
    #[error("File is required: {0}")]
    MissingFile(&'static str),
    #[error("failed to read upload: {0}")]
    Upload(String),
    #[error("CSV header does not match expected columns. Expected: {expected}. Found: {found}")]
    InvalidHeader { expected: &'static str, found: String },
    #[error("invalid CSV row at line {line}: {source}")]
    MalformedRow {
        line: u64,
        #[source]
        source: RowError,
    },
    #[error("Invalid cafe ID: {0}")]
    InvalidCafeId(String),
    #[error("Cafe with ID {0} does not exist")]
    CafeNotFound(i64),
    #[error("storage error: {0}")]
    Storage(#[from] DbError),
}

/// Coarse classification used at the HTTP boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Request,
    NotFound,
    Internal,
}

impl ServiceError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::EmptyUpload
            | Self::MissingFile(_)
            | Self::Upload(_)
            | Self::InvalidHeader { .. }
            | Self::MalformedRow { .. }
            | Self::InvalidCafeId(_) => ErrorKind::Request,
            Self::CafeNotFound(_) => ErrorKind::NotFound,
            Self::Storage(_) => ErrorKind::Internal,
        }
    }
}

impl From<sqlx::Error> for ServiceError {
    fn from(e: sqlx::Error) -> Self {
        Self::Storage(DbError::Sqlx(e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds_follow_error_taxonomy() {
        assert_eq!(ServiceError::EmptyUpload.kind(), ErrorKind::Request);
        assert_eq!(
            ServiceError::MalformedRow { line: 2, source: RowError::TooFewFields(3) }.kind(),
            ErrorKind::Request
        );
        assert_eq!(ServiceError::InvalidCafeId("abc".into()).kind(), ErrorKind::Request);
        assert_eq!(ServiceError::CafeNotFound(7).kind(), ErrorKind::NotFound);
        assert_eq!(
            ServiceError::from(sqlx::Error::PoolTimedOut).kind(),
            ErrorKind::Internal
        );
    }

    #[test]
    fn not_found_message_names_the_cafe() {
        assert_eq!(ServiceError::CafeNotFound(42).to_string(), "Cafe with ID 42 does not exist");
    }
}
