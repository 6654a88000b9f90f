use std::error::Error;
use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use cattree::{render_summary, AnalysisConfig, Analyzer, Design};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Check whether a cat tree design can safely hold its cats.
#[derive(Parser, Debug)]
#[command(name = "cattree", version, about, long_about = None)]
struct Cli {
    /// Design file (JSON) with `pieces` and optional `pointLoads`
    design: PathBuf,

    /// Cat weight in pounds; repeat for several cats. Replaces the design's loads
    #[arg(long = "load", value_name = "LB")]
    loads: Vec<f64>,

    /// Analysis configuration file (JSON)
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Print the full report as JSON instead of a text summary
    #[arg(long)]
    json: bool,
}

fn main() -> Result<ExitCode, Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();
    let cli = Cli::parse();

    // Parameters and catalogs are validated once, then shared by the analysis.
    let config = match &cli.config {
        Some(path) => AnalysisConfig::from_json_str(&fs::read_to_string(path)?)?,
        None => AnalysisConfig::default(),
    };
    let analyzer = Analyzer::new(config)?;

    let mut design = Design::from_json_str(&fs::read_to_string(&cli.design)?)?;
    if !cli.loads.is_empty() {
        design.point_loads = cli.loads;
    }
    info!(
        path = %cli.design.display(),
        pieces = design.pieces.len(),
        "design loaded"
    );

    let report = analyzer.analyze(&design)?;
    if cli.json {
        println!("{}", report.to_json_pretty()?);
    } else {
        print!("{}", render_summary(&report));
    }

    // Exit code 2 marks a design that failed the load test.
    Ok(if report.summary.passed {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(2)
    })
}
