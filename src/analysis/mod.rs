//! Domain-specific analysis modules
//!
//! This module contains domain-specific analysis logic for:
//! - Elapsed time summaries and histograms
//! - Configuration frequency reports

pub mod configs;
pub mod constants;
pub mod timings;

// Re-export analysis functions for convenience
pub use configs::{analyze_config_file, generate_config_chart};
pub use timings::{analyze_timing_file, generate_timing_histogram, summarize_batch};
