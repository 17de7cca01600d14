//! LineDB CLI
//!
//! Command-line tools for inspecting LineDB record files.
//!
//! The commands operate on the raw line format and do not need the
//! record type's schema - they reason about token counts, which is
//! enough to spot drift and dump contents.
//!
//! # Commands
//!
//! - `inspect` - Display file statistics (size, lines, token counts)
//! - `dump` - Print raw record lines with their line numbers
//! - `verify` - Check every line against an expected field count

mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// LineDB command-line record file tools.
#[derive(Parser)]
#[command(name = "linedb")]
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
    /// Display record file statistics
    Inspect {
        /// Path to the record file
        file: PathBuf,

        /// Output format (text, json)
        #[arg(short, long, default_value = "text")]
        format: String,
    },

    /// Print raw record lines
    Dump {
        /// Path to the record file
        file: PathBuf,

        /// Maximum number of lines to print
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Check every line against an expected field count
    Verify {
        /// Path to the record file
        file: PathBuf,

        /// Expected number of fields per line (the schema's field count,
        /// including `id`)
        #[arg(short = 'n', long)]
        fields: usize,
    },

    /// Show version information
    Version,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    match cli.command {
        Commands::Inspect { file, format } => {
            commands::inspect::run(&file, &format)?;
        }
        Commands::Dump { file, limit } => {
            commands::dump::run(&file, limit)?;
        }
        Commands::Verify { file, fields } => {
            commands::verify::run(&file, fields)?;
        }
        Commands::Version => {
            println!("LineDB CLI v{}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}
