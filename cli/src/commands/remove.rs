//! `dem remove <name>` — remove an imgset.

use std::process::ExitCode;

use anyhow::Result;

use crate::app::AppContext;
use crate::application::services::imgset_crud::{self, RemoveOutcome};
use crate::commands::NameArgs;
use crate::domain::error::ImgsetError;
use crate::domain::imgset;
use crate::output::CommandOutcome;

/// Run `dem remove <name>`.
///
/// A missing imgset is only a warning.
///
/// # Errors
///
/// Returns an error if the name is missing, names the active imgset, or the
/// directory cannot be deleted.
pub fn run(app: &AppContext, args: &NameArgs) -> Result<ExitCode> {
    let name = args.name();
    let path = imgset::resolve_path(&app.config.root, name);
    let outcome = match imgset_crud::remove_imgset(&app.store, &app.store, &app.config.root, name)? {
        RemoveOutcome::Removed => {
            CommandOutcome::ok("remove", format!("Removed imgset {name} successfully."))
        }
        RemoveOutcome::NotInstalled => CommandOutcome::warning(
            "remove",
            ImgsetError::NotInstalled(name.to_string()).to_string(),
        ),
    };
    app.renderer()
        .render_outcome(&outcome.with_imgset(name, &path))?;
    Ok(ExitCode::SUCCESS)
}
