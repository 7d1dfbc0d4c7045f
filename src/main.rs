//! ncflatten - Convert netCDF files into CSV or Parquet tables.

use anyhow::{Context, Result};
use clap::Parser;
use ncflatten::engine::{ScalarKey, DEFAULT_PRIMARY_DIMENSION};
use ncflatten::output::{convert_file, ConvertReport, Method};
use ncflatten::ConvertConfig;
use rayon::prelude::*;
use std::path::PathBuf;
use std::sync::Mutex;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[derive(Parser, Debug)]
#[command(name = "ncflatten")]
#[command(about = "Convert netCDF files into CSV or Parquet tables", long_about = None)]
struct Args {
    /// How to convert the netCDF file(s)
    #[arg(value_enum)]
    method: Method,

    /// The netCDF files to convert
    #[arg(required = true)]
    files: Vec<PathBuf>,

    /// Directory the converted file(s) are written to
    #[arg(long, default_value = "./data")]
    output_dir: PathBuf,

    /// Do not write dataset metadata to a .json file
    #[arg(long)]
    no_metadata: bool,

    /// Dimension indexing the table in faceted mode
    #[arg(long, default_value = DEFAULT_PRIMARY_DIMENSION)]
    primary_dimension: String,

    /// Name the scalar table "<base>." instead of "<base>" in collection mode
    #[arg(long)]
    scalar_suffix: bool,

    /// Report every file written
    #[arg(short, long)]
    verbose: bool,

    /// Enable logging to specified file
    #[arg(long)]
    log: Option<PathBuf>,
}

impl Args {
    fn config(&self) -> ConvertConfig {
        ConvertConfig {
            output_dir: self.output_dir.clone(),
            metadata: !self.no_metadata,
            primary_dimension: self.primary_dimension.clone(),
            scalar_key: if self.scalar_suffix {
                ScalarKey::EmptySuffix
            } else {
                ScalarKey::BaseName
            },
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(&args)?;

    let config = args.config();
    tracing::info!(
        files = args.files.len(),
        method = ?args.method,
        output_dir = %config.output_dir.display(),
        "Starting ncflatten"
    );

    // Each file owns its dataset and output paths, so files convert independently.
    let bases = config.output_bases(&args.files);
    let results: Vec<_> = args
        .files
        .par_iter()
        .zip(bases.into_par_iter())
        .map(|(path, base)| {
            let result = base.and_then(|base| convert_file(path, &base, args.method, &config));
            (path, result)
        })
        .collect();

    let mut failures = 0;
    for (path, result) in &results {
        match result {
            Ok(report) => print_report(path, report, args.verbose),
            Err(err) => {
                failures += 1;
                tracing::error!(file = %path.display(), error = %err, "conversion failed");
                eprintln!("Error: {}: {}", path.display(), err);
            },
        }
    }

    if failures > 0 {
        anyhow::bail!("{} of {} file(s) failed to convert", failures, results.len());
    }

    if args.verbose {
        println!("Done!");
    }
    Ok(())
}

fn print_report(path: &std::path::Path, report: &ConvertReport, verbose: bool) {
    for issue in &report.read_issues {
        eprintln!("Warning: {}: {}", path.display(), issue);
    }
    for rejection in &report.rejected {
        eprintln!("Warning: {}: skipped {}", path.display(), rejection);
    }
    for collision in &report.collisions {
        eprintln!(
            "Warning: {}: column '{}' from '{}' duplicates an existing column",
            path.display(),
            collision.column,
            collision.variable
        );
    }

    if verbose {
        let files: Vec<String> = report
            .data_files
            .iter()
            .map(|p| p.display().to_string())
            .collect();
        println!("Wrote data to {}", files.join(", "));
        if let Some(metadata) = &report.metadata_file {
            println!("Wrote metadata to {}", metadata.display());
        }
    }
}

fn init_logging(args: &Args) -> Result<()> {
    // Set up logging to a file if --log option is provided
    if let Some(log_path) = &args.log {
        let file = std::fs::OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(log_path)
            .with_context(|| format!("Failed to open log file {}", log_path.display()))?;
        let subscriber = FmtSubscriber::builder()
            .with_max_level(tracing::Level::DEBUG)
            .with_ansi(false)
            .with_writer(Mutex::new(file))
            .finish();
        tracing::subscriber::set_global_default(subscriber)?;
        return Ok(());
    }

    let default_level = if args.verbose { "info" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}
