//! Error taxonomy shared by both analysis pipelines.

use crate::common::PlotError;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading, reducing or plotting a results table.
///
/// Every variant names the file it concerns; the binaries print the message
/// and exit with a non-zero status.
#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error("File {} not found", path.display())]
    MissingFile { path: PathBuf },

    #[error("File {} is empty", path.display())]
    EmptyTable { path: PathBuf },

    #[error("Column '{column}' not found in {}", path.display())]
    MissingColumn { path: PathBuf, column: String },

    #[error(
        "Cannot convert value '{value}' in column '{column}' to float ({}, line {line})",
        path.display()
    )]
    TypeCoercion {
        path: PathBuf,
        column: String,
        line: u64,
        value: String,
    },

    #[error("Malformed CSV in {}: {source}", path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to plot {}: {source}", path.display())]
    Plot {
        path: PathBuf,
        #[source]
        source: PlotError,
    },
}

pub type Result<T> = core::result::Result<T, AnalysisError>;
