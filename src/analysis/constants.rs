//! Fixed names, suffixes and chart settings shared by the analysis pipelines.

/// Column holding per-run solver time in milliseconds.
pub const ELAPSED_TIME_COLUMN: &str = "Elapsed_time_ms";

/// Column holding the solver configuration label that produced a run.
pub const CONFIG_COLUMN: &str = "Config";

/// Suffix appended to the input's stem for timing histograms.
pub const HISTOGRAM_SUFFIX: &str = "_histogram.png";

/// Suffix appended to the input's stem for configuration bar charts.
pub const CONFIG_HISTOGRAM_SUFFIX: &str = "_config_histogram.png";

/// Extension of the tables picked up from the results directory.
pub const CSV_EXTENSION: &str = "csv";

/// Default directory scanned by the timing summarizer.
pub const DEFAULT_RESULTS_DIR: &str = "results";

/// Default table read by the configuration reporter.
pub const DEFAULT_CONFIG_TABLE: &str = "results/uf100-430_pa.csv";

/// Number of equal-width bins in a timing histogram.
pub const HISTOGRAM_BINS: usize = 30;

/// Largest bin count accepted on the command line.
pub const MAX_HISTOGRAM_BINS: usize = 10_000;

/// Output resolution of every chart (10x6 inches at 100 DPI).
pub const CHART_SIZE: (u32, u32) = (1000, 600);

/// Width in characters of the longest bar in the terminal chart.
pub const TERMINAL_BAR_WIDTH: usize = 40;
