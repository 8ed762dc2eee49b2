pub mod analytics;
pub mod config;
pub mod error;
pub mod http;
pub mod ingestion;
pub mod metrics_server;
pub mod observability;
pub mod optimization;
pub mod pipeline;
pub mod sinks;
pub mod sources;
pub mod transform;

pub use error::{ErrorKind, RowError, ServiceError};
pub use pipeline::{Envelope, Pipeline};
