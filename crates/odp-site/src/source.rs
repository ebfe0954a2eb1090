//! CSV row source.
//!
//! Datasets arrive as CSV files with a header row. Every record becomes
//! a [`Row`] keyed by header name; ragged records are tolerated, with
//! surplus cells dropped and missing cells absent.

use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use crate::row::Row;

/// Error reading a row source.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("failed to open {}: {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid CSV: {0}")]
    Csv(#[from] csv::Error),
}

/// Read every row of a CSV file.
pub fn rows_from_csv_path(path: impl AsRef<Path>) -> Result<Vec<Row>, SourceError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| SourceError::Open {
        path: path.to_path_buf(),
        source: e,
    })?;
    rows_from_reader(file)
}

/// Read every row of CSV data from `reader`.
pub fn rows_from_reader(reader: impl Read) -> Result<Vec<Row>, SourceError> {
    let mut csv_reader = csv::ReaderBuilder::new().flexible(true).from_reader(reader);
    let headers = csv_reader.headers()?.clone();

    let mut rows = Vec::new();
    for record in csv_reader.into_records() {
        let record = record?;
        let row: Row = headers
            .iter()
            .zip(record.iter())
            .collect();
        rows.push(row);
    }
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_reads_rows_keyed_by_header() {
        let data = "slug,name,organisation\n/d/REF01,item-one,org-one\n/d/REF02,item-two,org-two\n";

        let rows = rows_from_reader(data.as_bytes()).unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].get("slug"), Some("/d/REF01"));
        assert_eq!(rows[0].get("name"), Some("item-one"));
        assert_eq!(rows[1].get("organisation"), Some("org-two"));
    }

    #[test]
    fn test_short_record_leaves_fields_absent() {
        let data = "slug,name,organisation\n/d/REF01,item-one\n";

        let rows = rows_from_reader(data.as_bytes()).unwrap();

        assert_eq!(rows[0].get("name"), Some("item-one"));
        assert_eq!(rows[0].get("organisation"), None);
    }

    #[test]
    fn test_long_record_drops_surplus_cells() {
        let data = "slug,name\n/d/REF01,item-one,stray\n";

        let rows = rows_from_reader(data.as_bytes()).unwrap();

        assert_eq!(rows[0].len(), 2);
        assert_eq!(rows[0].get("name"), Some("item-one"));
    }

    #[test]
    fn test_empty_cells_read_as_absent() {
        let data = "slug,name\n,item-one\n";

        let rows = rows_from_reader(data.as_bytes()).unwrap();

        assert_eq!(rows[0].slug(), None);
        assert_eq!(rows[0].get("name"), Some("item-one"));
    }

    #[test]
    fn test_reads_from_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("dataset.csv");
        std::fs::write(&path, "slug,name\n/d/REF01,item-one\n").unwrap();

        let rows = rows_from_csv_path(&path).unwrap();

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].get("name"), Some("item-one"));
    }

    #[test]
    fn test_missing_file_is_open_error() {
        let result = rows_from_csv_path("/nonexistent/dataset.csv");

        assert!(matches!(result, Err(SourceError::Open { .. })));
    }
}
