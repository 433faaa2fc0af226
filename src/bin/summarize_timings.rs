use argh::FromArgs;
use indicatif::{ProgressBar, ProgressStyle};
use sat_results_analysis::analysis::constants::{
    CSV_EXTENSION, DEFAULT_RESULTS_DIR, HISTOGRAM_BINS, MAX_HISTOGRAM_BINS,
};
use sat_results_analysis::analysis::timings::{
    format_batch_overview, format_timing_report, summarize_batch, BatchSettings,
};
use sat_results_analysis::common::file_finder::find_files_with_extension;
use sat_results_analysis::logging::setup_logger;
use sat_results_analysis::Result;
use std::path::PathBuf;
use tracing::info;

/// Summarizes solver timings of every CSV table in a results directory
#[derive(FromArgs, Debug)]
struct Args {
    /// directory holding the CSV tables (default: results)
    #[argh(option, short = 'd', default = "PathBuf::from(DEFAULT_RESULTS_DIR)")]
    results_dir: PathBuf,

    /// number of histogram bins, 1 to 10000 (default: 30)
    #[argh(option, short = 'b', default = "HISTOGRAM_BINS")]
    bins: usize,

    /// process tables in parallel; reports still print in file order
    #[argh(switch, short = 'p')]
    parallel: bool,
}

fn run(args: &Args) -> Result<()> {
    let paths = find_files_with_extension(&args.results_dir, CSV_EXTENSION)?;
    if paths.is_empty() {
        println!("No CSV files found in {}", args.results_dir.display());
        return Ok(());
    }

    info!(dir = %args.results_dir.display(), files = paths.len(), "found results tables");

    let progress = ProgressBar::new(paths.len() as u64);
    if let Ok(style) = ProgressStyle::with_template("{bar:40.cyan/blue} {pos}/{len} {msg}") {
        progress.set_style(style);
    }

    let settings = BatchSettings {
        bins: args.bins,
        parallel: args.parallel,
    };
    let result = summarize_batch(&paths, &settings, &progress, |report| {
        progress.suspend(|| println!("{}", format_timing_report(report)));
    });
    progress.finish_and_clear();

    let reports = result?;
    println!("{}", format_batch_overview(&reports));
    Ok(())
}

fn main() {
    setup_logger();
    let args: Args = argh::from_env();

    if !(1..=MAX_HISTOGRAM_BINS).contains(&args.bins) {
        eprintln!(
            "Error: Number of bins must be between 1 and {}",
            MAX_HISTOGRAM_BINS
        );
        std::process::exit(1);
    }

    if let Err(e) = run(&args) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
