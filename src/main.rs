//! Zipkin Trace Stats CLI
//!
//! Reads a list of tracing-UI URLs, fetches each trace from Zipkin and
//! writes batch latency statistics.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use env_logger::Env;
use std::path::PathBuf;

use zipkin_trace_stats::commands::{display_version, execute_run, inspect_stats_file, RunArgs};
use zipkin_trace_stats::utils::config::{Settings, SettingsOverrides};

/// Zipkin Trace Stats - batch latency statistics for Zipkin traces
#[derive(Parser, Debug)]
#[command(name = "zipkin-stats")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Fetch every trace in the URL list and write batch statistics
    Run {
        /// Config file (TOML); defaults to ./settings.conf when present
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Zipkin backend root URL
        #[arg(long, env = "ZIPKIN_BASE_URL")]
        zipkin_base_url: Option<String>,

        /// File with one tracing-UI URL per line
        #[arg(long, env = "URLS_FILE_PATH")]
        urls_file: Option<PathBuf>,

        /// Directory for trace archives and the statistics file [default: /data]
        #[arg(long, env = "OUTPUT_DIR")]
        output_dir: Option<PathBuf>,

        /// Do not save fetched traces
        #[arg(long)]
        no_archive: bool,

        /// Do not print the statistics to stdout
        #[arg(short, long)]
        quiet: bool,
    },

    /// Validate and display a statistics file
    Inspect {
        /// Path to a stats_*.json file
        #[arg(short, long)]
        file: PathBuf,
    },

    /// Display version information
    Version,
}

fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Setup logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(log_level)).init();

    // Execute command
    match cli.command {
        Commands::Run {
            config,
            zipkin_base_url,
            urls_file,
            output_dir,
            no_archive,
            quiet,
        } => {
            let overrides = SettingsOverrides {
                zipkin_base_url,
                urls_file_path: urls_file,
                output_dir,
            };

            let settings = Settings::load(config.as_deref(), overrides)
                .context("Failed to load settings")?;

            let args = RunArgs {
                settings,
                archive_traces: !no_archive,
                print_summary: !quiet,
            };

            execute_run(args)?;
        }

        Commands::Inspect { file } => {
            inspect_stats_file(&file)?;
        }

        Commands::Version => {
            display_version();
        }
    }

    Ok(())
}
