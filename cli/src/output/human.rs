//! Human-readable terminal renderer.

use owo_colors::OwoColorize as _;

use crate::domain::config::DemConfig;
use crate::domain::imgset::{ImgsetEntry, ImgsetListing};
use crate::output::{CommandOutcome, OutcomeStatus, OutputContext};

/// Renders domain types as human-readable terminal output using `OutputContext`.
pub struct HumanRenderer<'a> {
    ctx: &'a OutputContext,
}

impl<'a> HumanRenderer<'a> {
    /// Create a new `HumanRenderer` wrapping the given output context.
    #[must_use]
    pub fn new(ctx: &'a OutputContext) -> Self {
        Self { ctx }
    }

    /// Render the CLI version information.
    pub fn render_version(&self, version: &str) {
        println!("dem {version}");
    }

    /// Render a command result as a success or warning line.
    pub fn render_outcome(&self, outcome: &CommandOutcome) {
        match outcome.status {
            OutcomeStatus::Ok => self.ctx.success(&outcome.message),
            OutcomeStatus::Warning => self.ctx.warn(&outcome.message),
        }
    }

    /// Render installed imgsets, the active one marked with `->`.
    pub fn render_listing(&self, listing: &ImgsetListing) {
        if listing.imgsets.is_empty() {
            if !self.ctx.quiet {
                println!("No imgsets installed. Create one: dem create <name>");
            }
            return;
        }
        for entry in &listing.imgsets {
            if entry.active {
                println!("{}", format_entry_line(entry).style(self.ctx.styles.active));
            } else {
                println!("{}", format_entry_line(entry));
            }
        }
    }

    /// Render the effective configuration.
    pub fn render_config(&self, config: &DemConfig, path: &std::path::Path) {
        println!();
        println!(
            "  {}",
            format!("Configuration ({})", path.display()).style(self.ctx.styles.header)
        );
        println!();
        for (key, value) in config.entries() {
            println!("  {:<18} {value}", format!("{key}:"));
        }
        println!();
        println!("  {}", "Environment:".style(self.ctx.styles.bold));
        for var in ["DEM_CONFIG", "DEM_DIR", "NO_COLOR"] {
            println!(
                "    {:<16} {}",
                format!("{var}:"),
                std::env::var(var).unwrap_or_else(|_| "(not set)".to_string())
            );
        }
        println!();
    }
}

/// One listing line: `->` and a tab before the active imgset, a tab otherwise.
#[must_use]
pub fn format_entry_line(entry: &ImgsetEntry) -> String {
    if entry.active {
        format!("->\t{}", entry.name)
    } else {
        format!("\t{}", entry.name)
    }
}
