//! `dem config` — show and set configuration values.

use std::process::ExitCode;

use anyhow::Result;
use clap::Subcommand;

use crate::app::AppContext;
use crate::application::ports::ConfigStore;
use crate::application::services::config_service;
use crate::output::CommandOutcome;

/// Config subcommands.
#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration
    Show,
    /// Set configuration value
    Set {
        /// Configuration key
        key: String,
        /// Configuration value
        value: String,
    },
}

/// Run the config command.
///
/// # Errors
///
/// Returns an error if the settings file cannot be read or written, or the
/// key/value pair is invalid.
pub fn run(app: &AppContext, cmd: ConfigCommand) -> Result<ExitCode> {
    match cmd {
        ConfigCommand::Show => show_config(app),
        ConfigCommand::Set { key, value } => set_config(app, &key, &value),
    }
}

fn show_config(app: &AppContext) -> Result<ExitCode> {
    let path = app.config_store.path()?;
    app.renderer().render_config(&app.config, &path)?;
    Ok(ExitCode::SUCCESS)
}

fn set_config(app: &AppContext, key: &str, value: &str) -> Result<ExitCode> {
    config_service::set_value(&app.config_store, key, value)?;
    app.renderer()
        .render_outcome(&CommandOutcome::ok("config set", format!("Set {key} = {value}")))?;
    if key == "root" && app.config.root.exists() {
        app.output.info(&format!(
            "Imgsets under {} are not moved automatically.",
            app.config.root.display()
        ));
    }
    Ok(ExitCode::SUCCESS)
}
