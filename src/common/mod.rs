//! Common infrastructure modules shared across analysis pipelines
//!
//! This module provides reusable infrastructure for:
//! - Data structures for results tables and their derived statistics
//! - Histogram binning and ASCII table formatting
//! - Locating input tables and deriving output paths
//! - Plotting histograms and bar charts

pub mod buckets;
pub mod data_structures;
pub mod file_finder;
pub mod plots;

// Re-export commonly used items
pub use data_structures::{FrequencyTable, MeasurementTable, SummaryStatistics};
pub use plots::PlotError;
