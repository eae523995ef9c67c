//! Command-line interface implementation
//!
//! This module provides the CLI entry point and dispatches to submodules
//! for specific command implementations.

mod check;
mod generate;
mod info;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

use crate::schema::DocumentKind;

/// Process exit codes
pub(crate) const EXIT_SUCCESS: u8 = 0;
pub(crate) const EXIT_ERROR: u8 = 1;
pub(crate) const EXIT_INVALID_ARGS: u8 = 2;

/// Skyfall - Generate validated runtime JSON for particle and weather scenes
#[derive(Parser)]
#[command(name = "skyfall")]
#[command(about = "Skyfall - Generate validated runtime JSON for particle and weather scenes")]
#[command(version)]
pub struct Cli {
    /// Enable debug logging (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate runtime documents and write them to the output directory
    Generate {
        /// Config file (.toml, .json or .json5); the built-in default is used if omitted
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Output directory (overrides output.dir)
        #[arg(short, long)]
        out_dir: Option<PathBuf>,

        /// Only generate these document kinds (repeatable)
        #[arg(long, value_enum)]
        only: Vec<DocumentKind>,

        /// Maximum emitter rate for the preset agent
        #[arg(long)]
        max_particles: Option<i64>,

        /// Maximum event speed for the forcefield agent
        #[arg(long)]
        max_speed: Option<f64>,

        /// Print the documents as JSON instead of writing files
        #[arg(long)]
        dry_run: bool,
    },

    /// Validate a config file without writing anything
    Check {
        /// Config file to check
        #[arg(short, long)]
        config: PathBuf,

        /// Output a machine-readable JSON report
        #[arg(long)]
        json: bool,
    },

    /// Print the built-in default configuration as JSON
    Defaults,

    /// List document kinds and their output file names
    Kinds,
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default))
        .format_timestamp(None)
        .try_init();
}

/// Run the CLI application
pub fn run() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Generate { config, out_dir, only, max_particles, max_speed, dry_run } => {
            generate::run_generate(
                config.as_deref(),
                out_dir,
                &only,
                max_particles,
                max_speed,
                dry_run,
            )
        }
        Commands::Check { config, json } => check::run_check(&config, json),
        Commands::Defaults => info::run_defaults(),
        Commands::Kinds => info::run_kinds(),
    }
}
