//! VNP46 granule conversion CLI.
//!
//! Converts NASA VNP46 HDF5 granules into GeoTIFFs georeferenced in
//! EPSG:4326, with:
//! - Single-granule or whole-directory input
//! - Bounds derived from the tile address embedded in each granule
//! - Optional JSON run report for downstream tooling

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::{fmt, EnvFilter};

use conversion::{BatchSummary, ConvertOptions, Converter, FileFailure};

#[derive(Parser, Debug)]
#[command(name = "converter")]
#[command(about = "Convert VNP46 HDF5 granules to georeferenced GeoTIFFs")]
struct Args {
    /// Granule file or directory of granules to convert
    #[arg(env = "VNP_INPUT")]
    input: PathBuf,

    /// Directory for output GeoTIFFs
    #[arg(short, long, default_value = "geotiffs", env = "VNP_OUTPUT_DIR")]
    output_dir: PathBuf,

    /// Zero-based index of the subdataset to convert
    #[arg(long, default_value = "0", env = "VNP_SUBDATASET")]
    subdataset: usize,

    /// Abort a directory run on the first failing granule
    #[arg(long)]
    fail_fast: bool,

    /// List the subdatasets of a granule and exit without converting
    #[arg(long)]
    list_subdatasets: bool,

    /// Write a JSON run report to this path
    #[arg(long, env = "VNP_REPORT")]
    report: Option<PathBuf>,

    /// Log level
    #[arg(long, default_value = "info", env = "RUST_LOG")]
    log_level: String,
}

fn main() -> Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let args = Args::parse();

    // Initialize tracing
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_level(true)
        .init();

    run(args)
}

fn run(args: Args) -> Result<()> {
    let converter = Converter::new(ConvertOptions {
        subdataset: args.subdataset,
        fail_fast: args.fail_fast,
    });

    if args.list_subdatasets {
        return print_subdatasets(&converter, &args.input);
    }

    std::fs::create_dir_all(&args.output_dir).with_context(|| {
        format!(
            "Failed to create output directory: {}",
            args.output_dir.display()
        )
    })?;

    let summary = if args.input.is_dir() {
        converter.convert_dir(&args.input, &args.output_dir)?
    } else {
        convert_single(&converter, &args.input, &args.output_dir)
    };

    if let Some(report_path) = &args.report {
        write_report(report_path, &summary)?;
    }

    info!(
        converted = summary.converted.len(),
        failed = summary.failed.len(),
        skipped = summary.skipped,
        "Conversion run complete"
    );

    if !summary.is_success() {
        error!(
            failed = summary.failed.len(),
            "Some granules failed to convert"
        );
        std::process::exit(1);
    }

    Ok(())
}

/// Convert one granule, folding the outcome into a batch-shaped summary
/// so reporting and exit codes work the same for both input modes.
fn convert_single(converter: &Converter, input: &Path, output_dir: &Path) -> BatchSummary {
    let mut summary = BatchSummary::default();

    match converter.convert_file(input, output_dir) {
        Ok(report) => summary.converted.push(report),
        Err(e) => {
            error!(input = %input.display(), error = %e, "Granule conversion failed");
            summary.failed.push(FileFailure {
                input: input.to_path_buf(),
                error: e.to_string(),
            });
        }
    }

    summary
}

/// Print a granule's subdatasets, one per line.
fn print_subdatasets(converter: &Converter, input: &Path) -> Result<()> {
    let subs = converter.list_subdatasets(input)?;

    println!("Subdatasets in {}:", input.display());
    println!();
    for sub in &subs {
        println!("  [{}] {}", sub.index, sub.name);
        if !sub.description.is_empty() {
            println!("      {}", sub.description);
        }
    }

    Ok(())
}

/// Write the run summary as pretty-printed JSON.
fn write_report(path: &Path, summary: &BatchSummary) -> Result<()> {
    let json = serde_json::to_string_pretty(summary)?;
    std::fs::write(path, json)
        .with_context(|| format!("Failed to write report: {}", path.display()))?;

    info!(path = %path.display(), "Wrote run report");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_args_defaults() {
        let args = Args::try_parse_from(["converter", "granules/sample.h5"]).unwrap();

        assert_eq!(args.input, PathBuf::from("granules/sample.h5"));
        assert_eq!(args.output_dir, PathBuf::from("geotiffs"));
        assert_eq!(args.subdataset, 0);
        assert!(!args.fail_fast);
        assert!(!args.list_subdatasets);
        assert!(args.report.is_none());
        assert_eq!(args.log_level, "info");
    }

    #[test]
    fn test_args_full_invocation() {
        let args = Args::try_parse_from([
            "converter",
            "granules",
            "--output-dir",
            "out",
            "--subdataset",
            "2",
            "--fail-fast",
            "--report",
            "run.json",
            "--log-level",
            "debug",
        ])
        .unwrap();

        assert_eq!(args.input, PathBuf::from("granules"));
        assert_eq!(args.output_dir, PathBuf::from("out"));
        assert_eq!(args.subdataset, 2);
        assert!(args.fail_fast);
        assert_eq!(args.report, Some(PathBuf::from("run.json")));
        assert_eq!(args.log_level, "debug");
    }

    #[test]
    fn test_args_reject_missing_input() {
        // Only applies when VNP_INPUT is not set in the environment
        if std::env::var_os("VNP_INPUT").is_none() {
            assert!(Args::try_parse_from(["converter"]).is_err());
        }
    }

    #[test]
    fn test_failed_single_conversion_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("missing.txt");

        let converter = Converter::new(ConvertOptions::default());
        let summary = convert_single(&converter, &input, dir.path());

        assert!(summary.converted.is_empty());
        assert_eq!(summary.failed.len(), 1);
        assert!(!summary.is_success());
    }
}
