//! Elapsed time analysis functionality
//!
//! This module summarises the `Elapsed_time_ms` column of results tables:
//! median, mean, minimum and maximum are printed per file, and a histogram with
//! median/mean markers is written beside each input.

use super::constants::{ELAPSED_TIME_COLUMN, HISTOGRAM_BINS, HISTOGRAM_SUFFIX};
use crate::common::buckets::{format_table, DatasetOverview, Histogram};
use crate::common::file_finder::output_path_for;
use crate::common::plots::create_timing_histogram;
use crate::common::SummaryStatistics;
use crate::error::{AnalysisError, Result};
use crate::parsing::load_table;
use indicatif::ProgressBar;
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Settings of a batch run over a results directory
#[derive(Debug, Clone, Copy)]
pub struct BatchSettings {
    /// Number of histogram bins
    pub bins: usize,
    /// Process files on the rayon thread pool
    pub parallel: bool,
}

impl Default for BatchSettings {
    fn default() -> Self {
        Self {
            bins: HISTOGRAM_BINS,
            parallel: false,
        }
    }
}

/// Everything derived from one timing table
#[derive(Debug, Clone)]
pub struct TimingReport {
    /// Table the report was computed from
    pub path: PathBuf,
    pub stats: SummaryStatistics,
    pub histogram: Histogram,
    /// Where the histogram image is written
    pub output_path: PathBuf,
}

/// Loads a timing table and computes its statistics and histogram bins.
///
/// Nothing is written to disk.
///
/// # Errors
/// [`AnalysisError::MissingFile`], [`AnalysisError::EmptyTable`],
/// [`AnalysisError::MissingColumn`] or [`AnalysisError::TypeCoercion`].
pub fn analyze_timing_file(path: &Path, bins: usize) -> Result<TimingReport> {
    let table = load_table(path)?;
    let times = table.float_column(ELAPSED_TIME_COLUMN)?;

    // `load_table` guarantees at least one row, so both are always present.
    let (stats, histogram) = match (
        SummaryStatistics::from_values(&times),
        Histogram::from_values(&times, bins),
    ) {
        (Some(stats), Some(histogram)) => (stats, histogram),
        _ => {
            return Err(AnalysisError::EmptyTable {
                path: path.to_path_buf(),
            })
        }
    };

    debug!(
        path = %path.display(),
        samples = stats.count,
        populated_bins = histogram.populated_bins(),
        "computed timing statistics"
    );

    Ok(TimingReport {
        path: path.to_path_buf(),
        stats,
        histogram,
        output_path: output_path_for(path, HISTOGRAM_SUFFIX),
    })
}

/// Formats the per-file statistics block, one labelled line per statistic.
pub fn format_timing_report(report: &TimingReport) -> String {
    let stats = &report.stats;
    let mut output = String::new();
    output.push_str(&format!("Dataset: {}\n", report.path.display()));
    output.push_str(&format!("Median time: {:.4} ms\n", stats.median));
    output.push_str(&format!("Mean time: {:.4} ms\n", stats.mean));
    output.push_str(&format!("Min time: {:.4} ms\n", stats.min));
    output.push_str(&format!("Max time: {:.4} ms\n", stats.max));
    output
}

/// Renders the histogram of a report to its output path.
///
/// # Errors
/// [`AnalysisError::Plot`] if the image could not be drawn or saved.
pub fn generate_timing_histogram(report: &TimingReport) -> Result<()> {
    create_timing_histogram(&report.histogram, &report.stats, &report.output_path).map_err(
        |source| AnalysisError::Plot {
            path: report.output_path.clone(),
            source,
        },
    )?;

    debug!(path = %report.output_path.display(), "wrote timing histogram");
    Ok(())
}

/// Summarises every file of a batch, stopping at the first failure.
///
/// `on_report` is called once per file, in the order of `paths`. In sequential mode
/// each file's report is emitted before its histogram is rendered and the batch stops
/// at the first failing file. In parallel mode all files are processed first; reports
/// are then emitted in order up to the first failing file, whose error is returned.
///
/// # Returns
/// * `Ok(Vec<TimingReport>)` - One report per input, in input order
/// * `Err(AnalysisError)` - The first error in input order
pub fn summarize_batch<F>(
    paths: &[PathBuf],
    settings: &BatchSettings,
    progress: &ProgressBar,
    mut on_report: F,
) -> Result<Vec<TimingReport>>
where
    F: FnMut(&TimingReport),
{
    info!(
        files = paths.len(),
        parallel = settings.parallel,
        "summarizing timing batch"
    );

    let mut reports = Vec::with_capacity(paths.len());

    if settings.parallel {
        let results: Vec<Result<TimingReport>> = paths
            .par_iter()
            .map(|path| -> Result<TimingReport> {
                let report = analyze_timing_file(path, settings.bins)?;
                generate_timing_histogram(&report)?;
                progress.inc(1);
                Ok(report)
            })
            .collect();

        for result in results {
            let report = result?;
            on_report(&report);
            reports.push(report);
        }
    } else {
        for path in paths {
            let report = analyze_timing_file(path, settings.bins)?;
            on_report(&report);
            generate_timing_histogram(&report)?;
            progress.inc(1);
            reports.push(report);
        }
    }

    Ok(reports)
}

/// Formats the overview table printed after a batch.
pub fn format_batch_overview(reports: &[TimingReport]) -> String {
    let rows: Vec<DatasetOverview> = reports
        .iter()
        .map(|report| DatasetOverview::new(report.path.display().to_string(), &report.stats))
        .collect();

    format_table(&rows, Some("Batch Overview"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write_csv(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn repeated_value_report() {
        let temp_dir = TempDir::new().unwrap();
        let path = write_csv(&temp_dir, "x.csv", "Elapsed_time_ms\n10\n10\n10\n");

        let report = analyze_timing_file(&path, HISTOGRAM_BINS).unwrap();
        let text = format_timing_report(&report);

        assert_eq!(
            text,
            format!(
                "Dataset: {}\nMedian time: 10.0000 ms\nMean time: 10.0000 ms\nMin time: 10.0000 ms\nMax time: 10.0000 ms\n",
                path.display()
            )
        );
        assert_eq!(report.histogram.populated_bins(), 1);
        assert_eq!(report.output_path, temp_dir.path().join("x_histogram.png"));
    }

    #[test]
    fn statistics_of_mixed_column() {
        let temp_dir = TempDir::new().unwrap();
        let path = write_csv(
            &temp_dir,
            "uf20.csv",
            "Filename,Result,Elapsed_time_ms\na,SAT,5\nb,SAT,1\nc,UNSAT,4\nd,SAT,2\ne,SAT,3\n",
        );

        let report = analyze_timing_file(&path, HISTOGRAM_BINS).unwrap();
        assert_eq!(report.stats.median, 3.0);
        assert_eq!(report.stats.mean, 3.0);
        assert_eq!(report.stats.min, 1.0);
        assert_eq!(report.stats.max, 5.0);
        assert_eq!(report.histogram.counts.len(), HISTOGRAM_BINS);
    }

    #[test]
    fn empty_table_stops_before_statistics() {
        let temp_dir = TempDir::new().unwrap();
        let path = write_csv(&temp_dir, "empty.csv", "Elapsed_time_ms\n");

        let result = analyze_timing_file(&path, HISTOGRAM_BINS);
        assert!(matches!(result, Err(AnalysisError::EmptyTable { .. })));
    }

    #[test]
    fn non_numeric_time_is_a_coercion_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = write_csv(&temp_dir, "bad.csv", "Elapsed_time_ms\n1.5\n2ms\n");

        let result = analyze_timing_file(&path, HISTOGRAM_BINS);
        assert!(matches!(
            result,
            Err(AnalysisError::TypeCoercion { line: 3, .. })
        ));
    }

    #[test]
    fn missing_time_column() {
        let temp_dir = TempDir::new().unwrap();
        let path = write_csv(&temp_dir, "nocol.csv", "Config\nDLIS\n");

        let result = analyze_timing_file(&path, HISTOGRAM_BINS);
        assert!(matches!(result, Err(AnalysisError::MissingColumn { .. })));
    }

    #[test]
    fn batch_stops_at_first_failure() {
        let temp_dir = TempDir::new().unwrap();
        let bad = write_csv(&temp_dir, "a.csv", "Elapsed_time_ms\n");
        let good = write_csv(&temp_dir, "b.csv", "Elapsed_time_ms\n1\n2\n");

        for parallel in [false, true] {
            let settings = BatchSettings {
                parallel,
                ..BatchSettings::default()
            };
            let mut seen = Vec::new();
            let result = summarize_batch(
                &[bad.clone(), good.clone()],
                &settings,
                &ProgressBar::hidden(),
                |report| seen.push(report.path.clone()),
            );

            assert!(matches!(result, Err(AnalysisError::EmptyTable { .. })));
            assert!(seen.is_empty());
        }
    }

    #[test]
    #[ignore = "Font rendering not available in test environment"]
    fn batch_reports_in_input_order() {
        let temp_dir = TempDir::new().unwrap();
        let first = write_csv(&temp_dir, "a.csv", "Elapsed_time_ms\n1\n2\n3\n");
        let second = write_csv(&temp_dir, "b.csv", "Elapsed_time_ms\n10\n10\n10\n");

        for parallel in [false, true] {
            let settings = BatchSettings {
                parallel,
                ..BatchSettings::default()
            };
            let mut seen = Vec::new();
            let reports = summarize_batch(
                &[first.clone(), second.clone()],
                &settings,
                &ProgressBar::hidden(),
                |report| seen.push(report.path.clone()),
            )
            .unwrap();

            assert_eq!(seen, vec![first.clone(), second.clone()]);
            assert_eq!(reports.len(), 2);
            assert!(temp_dir.path().join("a_histogram.png").exists());
            assert!(temp_dir.path().join("b_histogram.png").exists());
        }
    }

    #[test]
    fn overview_lists_every_dataset() {
        let temp_dir = TempDir::new().unwrap();
        let first = write_csv(&temp_dir, "a.csv", "Elapsed_time_ms\n1\n2\n3\n");
        let second = write_csv(&temp_dir, "b.csv", "Elapsed_time_ms\n10\n");

        let reports = vec![
            analyze_timing_file(&first, HISTOGRAM_BINS).unwrap(),
            analyze_timing_file(&second, HISTOGRAM_BINS).unwrap(),
        ];
        let overview = format_batch_overview(&reports);

        assert!(overview.contains("Batch Overview"));
        assert!(overview.contains("a.csv"));
        assert!(overview.contains("b.csv"));
        assert!(overview.contains("2.0000"));
        assert!(overview.contains("10.0000"));
    }
}
