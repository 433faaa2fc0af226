//! # SAT results analysis
//!
//! Statistics and charts for SAT solver benchmark results stored as CSV tables.
//!
//! Two pipelines are provided:
//! - [`analysis::timings`] summarises the `Elapsed_time_ms` column of every table in a
//!   results directory and renders a histogram per table.
//! - [`analysis::configs`] counts the `Config` column of one table and renders a bar chart.

pub mod analysis;
pub mod common;
pub mod error;
pub mod logging;
pub mod parsing;

pub use error::{AnalysisError, Result};
