//! CLI argument parsing with clap derive

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tokio_util::sync::CancellationToken;

use crate::app::{AppContext, AppFlags, OutputFlags};
use crate::commands;

/// Docker environment management: switch the runtime between named image sets
#[derive(Parser)]
#[command(
    name = "dem",
    version,
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    /// Alternate imgset root directory (defaults to the saved setting, then /var/lib/dem)
    #[arg(long = "dem-dir", global = true, env = "DEM_DIR")]
    pub dem_dir: Option<PathBuf>,

    /// Print debugging information
    #[arg(long, global = true)]
    pub debug: bool,

    /// Output in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress non-error output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output (also disabled when NO_COLOR is set)
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Create an imgset
    Create(commands::NameArgs),

    /// Remove an imgset
    Remove(commands::NameArgs),

    /// Activate an imgset, creating it if needed
    Use(commands::NameArgs),

    /// List imgsets, marking the active one
    List,

    /// Manage configuration
    #[command(subcommand)]
    Config(commands::config::ConfigCommand),

    /// Show version
    Version,
}

impl Cli {
    /// Execute the CLI command.
    ///
    /// # Errors
    ///
    /// Returns an error if settings cannot be loaded or the command fails.
    pub async fn run(self, cancel: CancellationToken) -> Result<ExitCode> {
        let Cli {
            dem_dir,
            json,
            quiet,
            no_color,
            command,
            ..
        } = self;
        let flags = AppFlags {
            output: OutputFlags {
                no_color,
                quiet,
                json,
            },
            dem_dir,
        };
        let app = AppContext::new(&flags, cancel)?;
        match command {
            Command::Create(args) => commands::create::run(&app, &args),
            Command::Remove(args) => commands::remove::run(&app, &args),
            Command::Use(args) => commands::activate::run(&app, &args).await,
            Command::List => commands::list::run(&app),
            Command::Config(cmd) => commands::config::run(&app, cmd),
            Command::Version => commands::version::run(&app),
        }
    }
}
