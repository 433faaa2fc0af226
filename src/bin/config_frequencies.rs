use argh::FromArgs;
use sat_results_analysis::analysis::configs::{
    analyze_config_file, format_frequencies, format_terminal_chart, generate_config_chart,
};
use sat_results_analysis::analysis::constants::DEFAULT_CONFIG_TABLE;
use sat_results_analysis::logging::setup_logger;
use sat_results_analysis::Result;
use std::path::PathBuf;

/// Reports how often each solver configuration appears in a results table
#[derive(FromArgs, Debug)]
struct Args {
    /// CSV table with a Config column (default: results/uf100-430_pa.csv)
    #[argh(option, short = 'i', default = "PathBuf::from(DEFAULT_CONFIG_TABLE)")]
    input: PathBuf,

    /// do not show the chart in the terminal
    #[argh(switch)]
    no_show: bool,
}

fn run(args: &Args) -> Result<()> {
    let report = analyze_config_file(&args.input)?;
    print!("{}", format_frequencies(&report.frequencies));

    generate_config_chart(&report)?;
    println!("Histogram saved to {}", report.output_path.display());

    if !args.no_show {
        println!();
        println!("{}", format_terminal_chart(&report));
    }

    Ok(())
}

fn main() {
    setup_logger();
    let args: Args = argh::from_env();

    if let Err(e) = run(&args) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
