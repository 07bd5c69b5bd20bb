// McProd - bin/aggregate_logs.rs
//
// Entry point for the production log aggregator:
// 1. CLI argument parsing
// 2. Config loading and logging initialisation
// 3. Summary log aggregation
// 4. Report printing and persistence (plus optional JSON/CSV exports)

use clap::Parser;
use mcprod::app::aggregate;
use mcprod::core::discovery::DiscoveryConfig;
use mcprod::core::report;
use mcprod::platform::config;
use mcprod::util::{self, error::Result};
use std::path::PathBuf;
use std::process::ExitCode;

/// Aggregate and summarise per-job summary logs of a Monte Carlo production.
#[derive(Parser, Debug)]
#[command(name = "aggregate-logs", version, about)]
struct Cli {
    /// Directory containing job_<label>_summary.log files.
    log_dir: PathBuf,

    /// Output file for the summary report [default: <log_dir>/production_summary.txt].
    #[arg(short = 'o', long = "output")]
    output: Option<PathBuf>,

    /// Also write the per-job results as JSON to this path.
    #[arg(long = "json")]
    json: Option<PathBuf>,

    /// Also write the per-job results as CSV to this path.
    #[arg(long = "csv")]
    csv: Option<PathBuf>,

    /// Read settings from this config.toml instead of the platform default.
    #[arg(short = 'c', long = "config")]
    config: Option<PathBuf>,

    /// Enable debug logging (equivalent to RUST_LOG=debug).
    #[arg(short = 'd', long = "debug")]
    debug: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(code) => code,
        Err(e) => {
            tracing::error!(error = %e, "Aggregation failed");
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<ExitCode> {
    let (app_config, config_warnings) = config::resolve_config(cli.config.as_deref())?;
    util::logging::init(cli.debug, app_config.log_level.as_deref());
    for warning in &config_warnings {
        tracing::warn!(warning = %warning, "Config warning");
    }

    let discovery = DiscoveryConfig {
        pattern: app_config.summary_log_glob.clone(),
    };
    let aggregation = aggregate::aggregate_logs(&cli.log_dir, &discovery)?;
    if !aggregation.warnings.is_empty() {
        eprintln!(
            "Warning: skipped {} unreadable summary log(s) in {}",
            aggregation.warnings.len(),
            cli.log_dir.display()
        );
    }
    if aggregation.results.is_empty() {
        eprintln!("No job logs found in {}", cli.log_dir.display());
        return Ok(ExitCode::FAILURE);
    }

    let output = cli.output.unwrap_or_else(|| {
        aggregate::default_report_path(&cli.log_dir, &app_config.report_file_name)
    });

    let rendered = report::render_report(&aggregation.results);
    println!("{rendered}");

    aggregate::write_report(&rendered, &output)?;
    println!("\nSummary written to {}", output.display());

    if let Some(path) = cli.json {
        let count = aggregate::write_json(&aggregation.results, &path)?;
        tracing::info!(path = %path.display(), jobs = count, "JSON export written");
    }
    if let Some(path) = cli.csv {
        let count = aggregate::write_csv(&aggregation.results, &path)?;
        tracing::info!(path = %path.display(), jobs = count, "CSV export written");
    }

    Ok(ExitCode::SUCCESS)
}
