// McProd - bin/prepare_jobs.rs
//
// Entry point for the LHE job manifest generator:
// 1. CLI argument parsing (from-list / from-range)
// 2. Config loading and logging initialisation
// 3. Manifest construction and writing

use clap::{Parser, Subcommand};
use mcprod::app::prepare::{self, JobSource};
use mcprod::platform::config;
use mcprod::util::{self, constants, error::Result};
use std::path::PathBuf;
use std::process::ExitCode;

/// Prepare batch job manifests for the J/psi DPS workflow.
#[derive(Parser, Debug)]
#[command(name = "prepare-jobs", version, about)]
struct Cli {
    #[command(subcommand)]
    mode: Option<Mode>,

    /// Destination manifest [default: config/lhe_jobs.txt].
    #[arg(long = "output", global = true)]
    output: Option<PathBuf>,

    /// Read settings from this config.toml instead of the platform default.
    #[arg(short = 'c', long = "config", global = true)]
    config: Option<PathBuf>,

    /// Enable debug logging (equivalent to RUST_LOG=debug).
    #[arg(short = 'd', long = "debug", global = true)]
    debug: bool,
}

#[derive(Subcommand, Debug)]
enum Mode {
    /// Use an explicit LHE list file.
    FromList {
        /// Text file with one LHE entry per line.
        lhe_list: PathBuf,

        /// EOS base URI to prefix relative entries.
        #[arg(long = "eos-base")]
        eos_base: Option<String>,
    },

    /// Generate file names from a numeric block range.
    FromRange {
        /// First block number (inclusive).
        #[arg(allow_negative_numbers = true)]
        start: i64,

        /// Last block number (inclusive when reached by the stride).
        #[arg(allow_negative_numbers = true)]
        end: i64,

        /// Stride between block numbers.
        #[arg(long = "step", default_value_t = constants::DEFAULT_RANGE_STEP)]
        step: i64,

        /// EOS base URI.
        #[arg(long = "eos-base")]
        eos_base: Option<String>,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(code) => code,
        Err(e) => {
            tracing::error!(error = %e, "Manifest preparation failed");
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

    let Some(mode) = cli.mode else {
        eprintln!("Error: Please specify a mode (from-list or from-range)");
        return Ok(ExitCode::FAILURE);
    };

    let (source, eos_base) = match mode {
        Mode::FromList { lhe_list, eos_base } => (JobSource::List(lhe_list), eos_base),
        Mode::FromRange {
            start,
            end,
            step,
            eos_base,
        } => (JobSource::Range { start, end, step }, eos_base),
    };
    let eos_base = eos_base.unwrap_or(app_config.eos_base);

    let jobs = prepare::build_jobs(&source, &eos_base)?;
    if jobs.is_empty() {
        eprintln!("No jobs generated; check your inputs");
        return Ok(ExitCode::FAILURE);
    }

    let output = cli.output.unwrap_or(app_config.manifest_output);
    let count = prepare::write_jobs(&jobs, &output)?;
    println!("Wrote {count} entries to {}", output.display());

    Ok(ExitCode::SUCCESS)
}
