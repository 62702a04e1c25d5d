//! pkgwait - wait for Carvel packaging resources to finish applying
//!
//! `eval` judges manifests that already carry a status, `wait` polls a live
//! cluster until the resource is done.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use pkgwait::cli::{self, ConfigSubcommand, OutputFormat, WaitArgs};
use pkgwait::config::ConfigLoader;
use pkgwait::{EvaluatorRegistry, Scheme};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

/// pkgwait - wait for Carvel packaging resources to finish applying
#[derive(Parser, Debug)]
#[command(name = "pkgwait")]
#[command(about = "Decide when Carvel packaging resources have finished applying", long_about = None)]
struct Args {
    /// Enable debug logging
    #[arg(long, short = 'd', global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Command,
}

/// Main commands
#[derive(Subcommand, Debug)]
enum Command {
    /// Evaluate manifests (with status) read from files or stdin
    Eval {
        /// Manifest file(s); reads stdin when omitted
        #[arg(short = 'f', long = "file")]
        files: Vec<PathBuf>,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        output: OutputFormat,
    },
    /// Poll a resource in the cluster until it has finished applying
    Wait(WaitArgs),
    /// List supported resource kinds
    Kinds,
    /// Configuration management
    Config {
        #[command(subcommand)]
        subcommand: ConfigSubcommand,
    },
    /// Show version information
    Version,
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let args = Args::parse();

    // Handle commands that do not need the evaluator stack
    let command = match args.command {
        Command::Config { subcommand } => {
            cli::handle_config_command(subcommand)?;
            return Ok(ExitCode::SUCCESS);
        }
        Command::Version => {
            cli::display_version();
            return Ok(ExitCode::SUCCESS);
        }
        other => other,
    };

    let config = ConfigLoader::load().context("Failed to load configuration")?;
    cli::init_logging(args.debug, &config.logger.level);
    tracing::debug!("Configuration loaded: {:?}", config);

    // Registered once, shared read-only by every evaluator
    let scheme = Arc::new(Scheme::with_packaging());
    let registry = EvaluatorRegistry::with_defaults(scheme.clone());
    tracing::debug!("Evaluator chain: {:?}", registry.names());

    let code = match command {
        Command::Eval { files, output } => cli::handle_eval_command(&registry, &files, output)?,
        Command::Wait(wait_args) => cli::handle_wait_command(&registry, &config, wait_args).await?,
        Command::Kinds => {
            cli::handle_kinds_command(&scheme);
            0
        }
        Command::Config { .. } | Command::Version => 0,
    };

    Ok(ExitCode::from(code))
}
