//! JSON output helpers.
//!
//! Provides the renderer behind `--json` and the error-object formatter used
//! when a command fails in JSON mode.

use anyhow::{Context, Result};

use crate::domain::config::DemConfig;
use crate::domain::imgset::ImgsetListing;
use crate::output::CommandOutcome;

/// Renders domain types as pretty-printed JSON on stdout.
pub struct JsonRenderer;

impl JsonRenderer {
    /// Render the imgset listing.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn render_listing(&self, listing: &ImgsetListing) -> Result<()> {
        let out = serde_json::to_string_pretty(listing).context("JSON serialization failed")?;
        println!("{out}");
        Ok(())
    }

    /// Render the effective configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn render_config(&self, config: &DemConfig, path: &std::path::Path) -> Result<()> {
        let obj = serde_json::json!({
            "path": path.display().to_string(),
            "config": config,
        });
        let out = serde_json::to_string_pretty(&obj).context("JSON serialization failed")?;
        println!("{out}");
        Ok(())
    }

    /// Render the result of a state-changing command.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn render_outcome(&self, outcome: &CommandOutcome) -> Result<()> {
        let out = serde_json::to_string_pretty(outcome).context("JSON serialization failed")?;
        println!("{out}");
        Ok(())
    }

    /// Render the CLI version.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn render_version(&self, version: &str) -> Result<()> {
        let out = serde_json::to_string_pretty(&serde_json::json!({ "version": version }))
            .context("JSON serialization failed")?;
        println!("{out}");
        Ok(())
    }
}

/// Format a JSON error object.
///
/// Output (pretty-printed):
/// ```json
/// {
///   "error": true,
///   "message": "...",
///   "code": 74
/// }
/// ```
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn format_error(message: &str, code: u8) -> Result<String> {
    let obj = serde_json::json!({
        "error": true,
        "message": message,
        "code": code,
    });
    serde_json::to_string_pretty(&obj).context("JSON serialization failed")
}
