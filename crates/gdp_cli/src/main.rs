//! GDP CLI
//!
//! Command-line viewer for GStreamer Data Protocol streams.
//!
//! # Commands
//!
//! - `dump` - Print every record with its fields
//! - `verify` - Walk a stream and report record counts
//! - `version` - Show version information

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use gdp_cli::commands::{self, dump::DumpOptions, dump::OutputFormat};
use tracing_subscriber::EnvFilter;

/// GStreamer Data Protocol stream tools.
#[derive(Parser)]
#[command(name = "gdp")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(global = true, short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print every record with its fields
    Dump {
        /// GDP file to read
        file: PathBuf,

        /// Maximum number of records to dump
        #[arg(short, long)]
        limit: Option<usize>,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,

        /// Show a preview of buffer data
        #[arg(short, long)]
        data: bool,
    },

    /// Walk a stream and report record counts
    Verify {
        /// GDP file to read
        file: PathBuf,
    },

    /// Show version information
    Version,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    // Commands print their own report; failures are printed once here.
    match run(cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(command: Commands) -> Result<(), Box<dyn std::error::Error>> {
    match command {
        Commands::Dump {
            file,
            limit,
            format,
            data,
        } => {
            let options = DumpOptions {
                limit,
                format,
                data,
            };
            commands::dump::run(&file, &options)?;
        }
        Commands::Verify { file } => {
            commands::verify::run(&file)?;
        }
        Commands::Version => {
            println!("gdp v{}", env!("CARGO_PKG_VERSION"));
            println!(
                "GDP protocol up to {}.x",
                gdp_codec::MAX_MAJOR_VERSION
            );
        }
    }

    Ok(())
}
