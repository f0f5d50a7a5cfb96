//! `dem use <name>` — activate an imgset.

use std::process::ExitCode;

use anyhow::Result;

use crate::app::AppContext;
use crate::application::services::activation::{self, ActivationOptions};
use crate::commands::NameArgs;
use crate::output::CommandOutcome;

/// Run `dem use <name>`.
///
/// # Errors
///
/// Returns an error if the name is invalid or any activation step fails.
pub async fn run(app: &AppContext, args: &NameArgs) -> Result<ExitCode> {
    let reporter = app.reporter();
    let activated = activation::activate(
        &app.store,
        &app.store,
        &app.runtime_config,
        &app.service,
        args.name(),
        ActivationOptions {
            reporter: &reporter,
            config: &app.config,
            cancel: &app.cancel,
        },
    )
    .await?;
    app.renderer().render_outcome(
        &CommandOutcome::ok("use", format!("Now using imgset {}", activated.name))
            .with_imgset(&activated.name, &activated.path),
    )?;
    Ok(ExitCode::SUCCESS)
}
