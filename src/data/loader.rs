//! CSV Data Loader Module
//! Reads the sales CSV with Polars. A missing or unreadable file becomes an empty table.

use polars::prelude::*;
use std::path::Path;
use thiserror::Error;
use tracing::{debug, info, warn};

/// File name looked up in the working directory when no path is given.
pub const DEFAULT_CSV_NAME: &str = "Business_sales.csv";

#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("Failed to load CSV: {0}")]
    CsvError(#[from] PolarsError),
    #[error("File not found: {0}")]
    NotFound(String),
}

/// Handles CSV file loading with Polars.
pub struct DataLoader;

impl DataLoader {
    /// Load a CSV file, absorbing every failure into an empty table.
    pub fn load_csv(path: &Path) -> DataFrame {
        match Self::read_csv(path) {
            Ok(df) => {
                info!(
                    path = %path.display(),
                    rows = df.height(),
                    columns = df.width(),
                    "loaded sales dataset"
                );
                df
            }
            Err(LoaderError::NotFound(p)) => {
                info!(path = %p, "dataset not found, starting with an empty table");
                DataFrame::empty()
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "dataset unreadable, using an empty table");
                DataFrame::empty()
            }
        }
    }

    /// Read a CSV file, surfacing errors.
    ///
    /// Every column is read as a string; numeric coercion happens later in
    /// [`SchemaNormalizer`](crate::data::SchemaNormalizer). Rows with extra fields keep
    /// their leading fields, and short rows are padded with nulls.
    pub fn read_csv(path: &Path) -> Result<DataFrame, LoaderError> {
        if !path.is_file() {
            return Err(LoaderError::NotFound(path.display().to_string()));
        }

        debug!(path = %path.display(), "reading CSV");
        let df = LazyCsvReader::new(path)
            .with_has_header(true)
            .with_infer_schema_length(Some(0))
            .with_ignore_errors(true)
            .with_truncate_ragged_lines(true)
            .finish()?
            .collect()?;

        Ok(df)
    }

    /// Get list of column names from a DataFrame.
    pub fn get_columns(df: &DataFrame) -> Vec<String> {
        df.get_column_names()
            .iter()
            .map(|s| s.to_string())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn missing_file_yields_empty_table() {
        let dir = tempfile::tempdir().unwrap();
        let df = DataLoader::load_csv(&dir.path().join("nope.csv"));
        assert_eq!(df.height(), 0);
        assert_eq!(df.width(), 0);
    }

    #[test]
    fn read_csv_reports_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = DataLoader::read_csv(&dir.path().join("nope.csv")).unwrap_err();
        assert!(matches!(err, LoaderError::NotFound(_)));
    }

    #[test]
    fn empty_file_yields_empty_table() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.csv");
        fs::write(&path, "").unwrap();

        let df = DataLoader::load_csv(&path);
        assert_eq!(df.height(), 0);
    }

    #[test]
    fn columns_are_read_as_strings() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sales.csv");
        fs::write(&path, "name,Sales Volume,price\nShirt,10,2.5\nHat,3,bad\n").unwrap();

        let df = DataLoader::load_csv(&path);
        assert_eq!(df.height(), 2);
        assert_eq!(
            DataLoader::get_columns(&df),
            vec!["name", "Sales Volume", "price"]
        );
        assert_eq!(df.column("price").unwrap().dtype(), &DataType::String);
    }

    #[test]
    fn ragged_row_keeps_its_neighbours() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sales.csv");
        fs::write(&path, "Product ID,Sales Volume,price\n1,10,2\n2,5,3,EXTRA\n3,4,1\n").unwrap();

        let df = DataLoader::read_csv(&path).unwrap();
        assert_eq!(df.height(), 3);
        assert_eq!(df.width(), 3);
    }
}
