pub mod sqlite_readings;

pub use sqlite_readings::{IngestTally, SqliteReadingSink};
