//! File parsing functionality for results tables
//!
//! This module handles loading comma-separated results files into a
//! [`MeasurementTable`].

use crate::common::MeasurementTable;
use crate::error::{AnalysisError, Result};
use csv::{ReaderBuilder, StringRecord, Trim};
use std::fs::File;
use std::io::ErrorKind;
use std::path::Path;
use tracing::debug;

/// Load a results table from a CSV file with a header row
///
/// This function:
/// - Opens the file
/// - Reads the header row and every data row, trimming whitespace around cells
/// - Rejects tables without data rows
///
/// # Arguments
/// * `file_path` - Path to the CSV file
///
/// # Returns
/// * `Ok(MeasurementTable)` - The loaded rows
/// * `Err(AnalysisError::MissingFile)` - If the path does not resolve to a file
/// * `Err(AnalysisError::EmptyTable)` - If the file has no header or no data rows
/// * `Err(AnalysisError::Csv)` - If the file is not valid CSV
pub fn load_table(file_path: &Path) -> Result<MeasurementTable> {
    let file = File::open(file_path).map_err(|source| match source.kind() {
        ErrorKind::NotFound => AnalysisError::MissingFile {
            path: file_path.to_path_buf(),
        },
        _ => AnalysisError::Io {
            path: file_path.to_path_buf(),
            source,
        },
    })?;

    let csv_error = |source| AnalysisError::Csv {
        path: file_path.to_path_buf(),
        source,
    };

    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(file);

    let headers = reader.headers().map_err(csv_error)?.clone();
    if headers.is_empty() {
        return Err(AnalysisError::EmptyTable {
            path: file_path.to_path_buf(),
        });
    }

    let rows = reader
        .records()
        .collect::<core::result::Result<Vec<StringRecord>, _>>()
        .map_err(csv_error)?;
    if rows.is_empty() {
        return Err(AnalysisError::EmptyTable {
            path: file_path.to_path_buf(),
        });
    }

    debug!(
        path = %file_path.display(),
        columns = headers.len(),
        rows = rows.len(),
        "loaded results table"
    );

    Ok(MeasurementTable::new(file_path, headers, rows))
}
