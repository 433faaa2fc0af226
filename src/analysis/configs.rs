//! Configuration frequency analysis functionality
//!
//! This module counts how often each solver configuration appears in a results
//! table, prints the frequencies and renders them as a bar chart.

use super::constants::{CONFIG_COLUMN, CONFIG_HISTOGRAM_SUFFIX, TERMINAL_BAR_WIDTH};
use crate::common::buckets::{create_frequency_entries, format_table};
use crate::common::file_finder::output_path_for;
use crate::common::plots::create_frequency_bar_chart;
use crate::common::FrequencyTable;
use crate::error::{AnalysisError, Result};
use crate::parsing::load_table;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Everything derived from one configuration table
#[derive(Debug, Clone)]
pub struct ConfigReport {
    /// Table the report was computed from
    pub path: PathBuf,
    pub frequencies: FrequencyTable,
    /// Number of rows that were counted
    pub rows: usize,
    /// Where the bar chart is written
    pub output_path: PathBuf,
}

/// Loads a results table and counts the occurrences of every configuration.
///
/// The column check happens before any counting, so a table without a `Config`
/// column produces no partial results.
///
/// # Errors
/// [`AnalysisError::MissingFile`], [`AnalysisError::EmptyTable`] or
/// [`AnalysisError::MissingColumn`].
pub fn analyze_config_file(path: &Path) -> Result<ConfigReport> {
    let table = load_table(path)?;
    if !table.has_column(CONFIG_COLUMN) {
        return Err(AnalysisError::MissingColumn {
            path: path.to_path_buf(),
            column: CONFIG_COLUMN.to_string(),
        });
    }

    let frequencies = FrequencyTable::from_labels(table.column(CONFIG_COLUMN)?);
    debug!(
        path = %path.display(),
        rows = table.len(),
        configurations = frequencies.len(),
        "counted configurations"
    );

    Ok(ConfigReport {
        path: path.to_path_buf(),
        frequencies,
        rows: table.len(),
        output_path: output_path_for(path, CONFIG_HISTOGRAM_SUFFIX),
    })
}

/// Formats the frequency list: a heading, then one `label: count` line per configuration.
pub fn format_frequencies(frequencies: &FrequencyTable) -> String {
    let mut output = String::from("Config frequencies:\n");
    for (label, count) in frequencies.entries() {
        output.push_str(&format!("{}: {}\n", label, count));
    }
    output
}

/// Title of the bar chart rendered for `path`
pub fn chart_title(path: &Path) -> String {
    format!("Frequency of Configurations ({})", path.display())
}

/// Renders the bar chart of a report to its output path.
///
/// # Errors
/// [`AnalysisError::Plot`] if the image could not be drawn or saved.
pub fn generate_config_chart(report: &ConfigReport) -> Result<()> {
    create_frequency_bar_chart(
        &report.frequencies,
        &chart_title(&report.path),
        &report.output_path,
    )
    .map_err(|source| AnalysisError::Plot {
        path: report.output_path.clone(),
        source,
    })?;

    debug!(path = %report.output_path.display(), "wrote configuration chart");
    Ok(())
}

/// Formats the chart for display in the terminal: one row per configuration with
/// its count, share of all rows and a proportional bar.
pub fn format_terminal_chart(report: &ConfigReport) -> String {
    let entries = create_frequency_entries(&report.frequencies, TERMINAL_BAR_WIDTH);
    let title = chart_title(&report.path);
    format_table(&entries, Some(title.as_str()))
}
