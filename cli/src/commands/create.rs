//! `dem create <name>` — create an imgset.

use std::process::ExitCode;

use anyhow::Result;

use crate::app::AppContext;
use crate::application::services::imgset_crud;
use crate::commands::NameArgs;
use crate::domain::imgset;
use crate::output::CommandOutcome;

/// Run `dem create <name>`.
///
/// # Errors
///
/// Returns an error if the name is missing or invalid, or the directory
/// cannot be created.
pub fn run(app: &AppContext, args: &NameArgs) -> Result<ExitCode> {
    let name = imgset_crud::create_imgset(&app.store, &app.config.root, args.name())?;
    let path = imgset::resolve_path(&app.config.root, &name);
    app.renderer().render_outcome(
        &CommandOutcome::ok("create", format!("Imgset {name} created successfully"))
            .with_imgset(&name, &path),
    )?;
    Ok(ExitCode::SUCCESS)
}
