//! Bucket types and ASCII table formatting for statistical analysis
//!
//! This module provides shared functionality for bucket-based analysis:
//! - [`Histogram`] equal-width binning of timing values
//! - [`FrequencyEntry`] rows for the terminal rendition of a frequency chart
//! - [`DatasetOverview`] rows summarising a batch of timing files
//! - ASCII table formatting using the [`tabled`] crate

use super::data_structures::{FrequencyTable, SummaryStatistics};
use tabled::{Table, Tabled};

/// Equal-width bins over the range of a set of values.
///
/// Follows the usual histogram convention: every bin is half-open except the
/// last, which also includes the upper edge. When all values are equal the range
/// is widened by 0.5 on each side, so the values land in exactly one bin.
#[derive(Debug, Clone, PartialEq)]
pub struct Histogram {
    /// Left edge of the first bin
    pub lower: f64,
    /// Right edge of the last bin
    pub upper: f64,
    /// Number of values in each bin
    pub counts: Vec<usize>,
}

impl Histogram {
    /// Bins `values` into `bins` equal-width buckets.
    ///
    /// A `bins` of zero is treated as one. Returns [`None`] for an empty slice.
    pub fn from_values(values: &[f64], bins: usize) -> Option<Self> {
        if values.is_empty() {
            return None;
        }

        let bins = bins.max(1);
        let min = values.iter().copied().fold(f64::INFINITY, f64::min);
        let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let (lower, upper) = if min == max {
            (min - 0.5, max + 0.5)
        } else {
            (min, max)
        };

        // Halved so that the span of any two finite values stays finite
        let half_span = upper / 2.0 - lower / 2.0;
        let mut counts = vec![0usize; bins];
        for &value in values {
            let index = if value >= upper {
                bins - 1
            } else {
                let position = (value / 2.0 - lower / 2.0) / half_span;
                (position * bins as f64).floor() as usize
            };
            counts[index.min(bins - 1)] += 1;
        }

        Some(Self {
            lower,
            upper,
            counts,
        })
    }

    pub fn bin_width(&self) -> f64 {
        let bins = self.counts.len() as f64;
        self.upper / bins - self.lower / bins
    }

    /// Returns the `(left, right, count)` triple of every bin.
    pub fn bins(&self) -> impl Iterator<Item = (f64, f64, usize)> + '_ {
        let width = self.bin_width();
        self.counts.iter().enumerate().map(move |(index, &count)| {
            let left = self.lower + index as f64 * width;
            (left, left + width, count)
        })
    }

    pub fn max_count(&self) -> usize {
        self.counts.iter().copied().max().unwrap_or(0)
    }

    /// Number of bins holding at least one value
    pub fn populated_bins(&self) -> usize {
        self.counts.iter().filter(|&&count| count > 0).count()
    }
}

/// One label of a frequency chart, as shown in the terminal
#[derive(Debug, Clone, Tabled)]
pub struct FrequencyEntry {
    #[tabled(rename = "Configuration")]
    pub label: String,
    #[tabled(rename = "Count")]
    pub count: usize,
    #[tabled(rename = "Percentage")]
    pub percentage: String,
    #[tabled(rename = "Chart")]
    pub bar: String,
}

impl FrequencyEntry {
    /// Creates a new entry with formatted percentage and a bar scaled against `max_count`
    pub fn new(label: String, count: usize, total: usize, max_count: usize, width: usize) -> Self {
        let percentage = if total == 0 {
            "0.00%".to_string()
        } else {
            format!("{:.2}%", (count as f64 / total as f64) * 100.0)
        };

        let bar_length = if max_count == 0 {
            0
        } else {
            // Round up so that every present label shows at least one cell.
            (count * width).div_ceil(max_count)
        };

        Self {
            label,
            count,
            percentage,
            bar: "█".repeat(bar_length),
        }
    }
}

/// Builds the terminal chart rows for a frequency table, in table order.
pub fn create_frequency_entries(frequencies: &FrequencyTable, width: usize) -> Vec<FrequencyEntry> {
    let total = frequencies.total();
    let max_count = frequencies
        .entries()
        .first()
        .map(|(_, count)| *count)
        .unwrap_or(0);

    frequencies
        .entries()
        .iter()
        .map(|(label, count)| FrequencyEntry::new(label.clone(), *count, total, max_count, width))
        .collect()
}

/// Summary row for one dataset of a timing batch
#[derive(Debug, Clone, Tabled)]
pub struct DatasetOverview {
    #[tabled(rename = "Dataset")]
    pub dataset: String,
    #[tabled(rename = "Rows")]
    pub rows: usize,
    #[tabled(rename = "Median (ms)")]
    pub median: String,
    #[tabled(rename = "Mean (ms)")]
    pub mean: String,
    #[tabled(rename = "Min (ms)")]
    pub min: String,
    #[tabled(rename = "Max (ms)")]
    pub max: String,
}

impl DatasetOverview {
    pub fn new(dataset: String, stats: &SummaryStatistics) -> Self {
        Self {
            dataset,
            rows: stats.count,
            median: format!("{:.4}", stats.median),
            mean: format!("{:.4}", stats.mean),
            min: format!("{:.4}", stats.min),
            max: format!("{:.4}", stats.max),
        }
    }
}

/// Formats rows as an ASCII table using the [`tabled`] crate
///
/// # Arguments
/// * `rows` - The rows to format
/// * `title` - Optional title for the table
///
/// # Returns
/// A formatted ASCII table as a [`String`]
pub fn format_table<T: Tabled>(rows: &[T], title: Option<&str>) -> String {
    if rows.is_empty() {
        return "No data available".to_string();
    }

    let table = Table::new(rows).to_string();

    if let Some(title) = title {
        format!("{}\n{}\n{}", title, "=".repeat(title.len()), table)
    } else {
        table
    }
}
