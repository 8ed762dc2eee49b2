pub mod csv_row;
pub mod csv_upload;

pub use csv_row::{parse_row, CsvRow};
pub use csv_upload::{CsvUploadSource, EXPECTED_HEADER};
