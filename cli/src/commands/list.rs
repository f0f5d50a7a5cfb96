//! `dem list` — list imgsets.

use std::process::ExitCode;

use anyhow::Result;

use crate::app::AppContext;
use crate::application::services::imgset_crud;

/// Run `dem list`.
///
/// # Errors
///
/// Returns an error if the root directory cannot be read.
pub fn run(app: &AppContext) -> Result<ExitCode> {
    let listing = imgset_crud::list_imgsets(&app.store, &app.store, &app.config.root)?;
    app.renderer().render_listing(&listing)?;
    Ok(ExitCode::SUCCESS)
}
