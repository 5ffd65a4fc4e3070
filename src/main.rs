//! idl-counters CLI
//!
//! Keeps the `InstrumentedProps` annotations of a WebIDL tree in sync with
//! browser-compat-data.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use idl_counters::compat::CompatData;
use idl_counters::sync::{self, SyncOptions, SyncReport};
use idl_counters::{SyncConfig, init_tracing};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "idl-counters")]
#[command(about = "Maintain InstrumentedProps annotations from browser-compat-data")]
#[command(version = idl_counters::VERSION)]
#[command(
    long_about = "Edits WebIDL files in place, touching only the annotation's identifier list.\n\
\n\
Examples:\n  \
idl-counters add dom/webidl --data bcd.json --conf dom/base/UseCounters.conf\n  \
idl-counters remove dom/webidl --data bcd.json --dry-run\n  \
idl-counters check dom/webidl"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file (default: idl-counters.toml in the corpus directory)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Verbose output (can be used multiple times for increased verbosity)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Add features the target engine lacks while reference engines ship them
    Add(SyncArgs),
    /// Remove features the target engine now ships everywhere
    Remove(SyncArgs),
    /// Parse every file and verify it prints back unchanged
    Check {
        /// Directory holding the .webidl files
        corpus: PathBuf,
    },
}

#[derive(clap::Args)]
struct SyncArgs {
    /// Directory holding the .webidl files
    corpus: PathBuf,

    /// browser-compat-data JSON (full data.json or the bare `api` map)
    #[arg(short, long)]
    data: PathBuf,

    /// Use-counter conf file to keep in step with the annotations
    #[arg(long)]
    conf: Option<PathBuf>,

    /// Compute and report changes without writing any file
    #[arg(long)]
    dry_run: bool,
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Add(args) => {
            let (options, data, config) = prepare(args, cli.config.as_deref())?;
            let report = sync::add_unsupported(&options, &data, &config)
                .with_context(|| format!("add failed for {}", options.corpus.display()))?;
            print_report(&report);
            Ok(ExitCode::SUCCESS)
        }
        Commands::Remove(args) => {
            let (options, data, config) = prepare(args, cli.config.as_deref())?;
            let report = sync::remove_supported(&options, &data, &config)
                .with_context(|| format!("remove failed for {}", options.corpus.display()))?;
            print_report(&report);
            Ok(ExitCode::SUCCESS)
        }
        Commands::Check { corpus } => {
            let report = sync::check_corpus(&corpus)
                .with_context(|| format!("check failed for {}", corpus.display()))?;
            println!("{report}");
            Ok(if report.is_clean() {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            })
        }
    }
}

fn prepare(
    args: SyncArgs,
    config: Option<&Path>,
) -> Result<(SyncOptions, CompatData, SyncConfig)> {
    let config = SyncConfig::discover(config, &args.corpus).context("loading configuration")?;
    let data = CompatData::load(&args.data)
        .with_context(|| format!("loading compat data from {}", args.data.display()))?;
    let options = SyncOptions {
        corpus: args.corpus,
        conf: args.conf,
        dry_run: args.dry_run,
    };
    Ok((options, data, config))
}

fn print_report(report: &SyncReport) {
    for diagnostic in &report.diagnostics {
        eprintln!("{diagnostic}");
    }
    println!("{report}");
}
