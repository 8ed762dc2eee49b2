use csv::StringRecord;
use time::{macros::format_description, PrimitiveDateTime};

use crate::error::RowError;

/// One typed data line of an upload.
#[derive(Debug, Clone, PartialEq)]
pub struct CsvRow {
    pub name: String,
    pub location: String,
    pub ts: PrimitiveDateTime,
    pub kwh: f64,
}

/// Parse `name,location,timestamp,kwh`.
///
/// Fields are trimmed. Columns past the fourth are ignored. The timestamp
/// must be an ISO-8601 local date-time with second precision
/// (`2025-01-31T14:00:00`). Range checks on kwh happen in
/// [`crate::transform::ReadingValidation`].
pub fn parse_row(record: &StringRecord) -> Result<CsvRow, RowError> {
    if record.len() < 4 {
        return Err(RowError::TooFewFields(record.len()));
    }

    let field = |idx: usize| record.get(idx).unwrap_or_default().trim();

    let ts_str = field(2);
    let ts = PrimitiveDateTime::parse(
        ts_str,
        format_description!("[year]-[month]-[day]T[hour]:[minute]:[second]"),
    )
    .map_err(|source| RowError::InvalidTimestamp {
        value: ts_str.to_string(),
        source,
    })?;

    let kwh_str = field(3);
    let kwh: f64 = kwh_str
        .parse()
        .map_err(|_| RowError::InvalidAmount(kwh_str.to_string()))?;

    Ok(CsvRow {
        name: field(0).to_string(),
        location: field(1).to_string(),
        ts,
        kwh,
    })
}

/// A line holding nothing but whitespace.
pub fn is_blank(record: &StringRecord) -> bool {
    record.len() <= 1 && record.get(0).map_or(true, |f| f.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    fn record(fields: &[&str]) -> StringRecord {
        StringRecord::from(fields.to_vec())
    }

    #[test]
    fn parses_and_trims_fields() {
        let row = parse_row(&record(&[" Cafe A ", "Loc ", " 2025-01-01T08:00:00", " 1.5 "])).unwrap();

        assert_eq!(row.name, "Cafe A");
        assert_eq!(row.location, "Loc");
        assert_eq!(row.ts, datetime!(2025-01-01 08:00:00));
        assert_eq!(row.kwh, 1.5);
    }

    #[test]
    fn integer_amounts_are_accepted() {
        let row = parse_row(&record(&["Cafe B", "Loc", "2025-01-01T10:00:00", "3"])).unwrap();
        assert_eq!(row.kwh, 3.0);
    }

    #[test]
    fn extra_columns_are_ignored() {
        let row = parse_row(&record(&["Cafe A", "Loc", "2025-01-01T08:00:00", "1.5", "note"])).unwrap();
        assert_eq!(row.kwh, 1.5);
    }

    #[test]
    fn rejects_missing_kwh_column() {
        let err = parse_row(&record(&["Cafe A", "Loc", "2025-01-01T08:00:00"])).unwrap_err();
        assert!(matches!(err, RowError::TooFewFields(3)));
    }

    #[test]
    fn rejects_timestamp_without_time_part() {
        let err = parse_row(&record(&["Cafe A", "Loc", "2025-01-01", "1.0"])).unwrap_err();
        assert!(matches!(err, RowError::InvalidTimestamp { .. }));
    }

    #[test]
    fn rejects_space_separated_timestamp() {
        let err = parse_row(&record(&["Cafe A", "Loc", "2025-01-01 08:00:00", "1.0"])).unwrap_err();
        assert!(matches!(err, RowError::InvalidTimestamp { .. }));
    }

    #[test]
    fn rejects_non_numeric_kwh() {
        let err = parse_row(&record(&["Cafe A", "Loc", "2025-01-01T08:00:00", "lots"])).unwrap_err();
        assert!(matches!(err, RowError::InvalidAmount(ref v) if v == "lots"));
    }

    #[test]
    fn blank_detection_only_matches_whitespace_lines() {
        assert!(is_blank(&record(&["   "])));
        assert!(is_blank(&record(&[""])));
        assert!(!is_blank(&record(&["", "", "", ""])));
        assert!(!is_blank(&record(&["x"])));
    }
}
