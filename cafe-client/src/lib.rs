//! Storage client for café energy data.
//!
//! Holds the domain rows and the SQLite queries the ingestion and analytics
//! services run against them.

pub mod db;
pub mod domain;
pub mod error;

pub use db::Database;
pub use error::{DbError, Result};
