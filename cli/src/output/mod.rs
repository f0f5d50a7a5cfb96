//! Output formatting module

pub mod human;
pub mod json;
pub mod reporter;
pub mod styles;

use console::Term;
use owo_colors::OwoColorize as _;
use serde::Serialize;

pub use human::HumanRenderer;
pub use json::JsonRenderer;
pub use reporter::TerminalReporter;
pub use styles::Styles;

use crate::domain::config::DemConfig;
use crate::domain::imgset::{ImgsetListing, to_slash};

/// Output context carrying styling and terminal state.
pub struct OutputContext {
    /// Stylesheet for colored output.
    pub styles: Styles,
    /// Whether to suppress non-error output.
    pub quiet: bool,
}

impl OutputContext {
    /// Create output context based on CLI flags and environment.
    #[must_use]
    pub fn new(no_color: bool, quiet: bool) -> Self {
        let is_tty = Term::stdout().is_term();
        let use_colors = !no_color && is_tty && std::env::var("NO_COLOR").is_err();

        let mut styles = Styles::default();
        if use_colors {
            styles.colorize();
        }

        Self { styles, quiet }
    }

    /// Print a success message prefixed with `✓`. Suppressed when `quiet`.
    pub fn success(&self, msg: &str) {
        if !self.quiet {
            println!("  {} {msg}", "✓".style(self.styles.success));
        }
    }

    /// Print a warning message prefixed with `⚠`. Suppressed when `quiet`.
    pub fn warn(&self, msg: &str) {
        if !self.quiet {
            println!("  {} {msg}", "⚠".style(self.styles.warning));
        }
    }

    /// Print an info message prefixed with `ℹ`. Suppressed when `quiet`.
    pub fn info(&self, msg: &str) {
        if !self.quiet {
            println!("  {} {msg}", "ℹ".style(self.styles.info));
        }
    }
}

/// Whether a command fully succeeded or completed with a warning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OutcomeStatus {
    Ok,
    Warning,
}

/// Result of a state-changing command (`create`, `remove`, `use`, `config set`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommandOutcome {
    pub command: &'static str,
    pub status: OutcomeStatus,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub imgset: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

impl CommandOutcome {
    #[must_use]
    pub fn ok(command: &'static str, message: impl Into<String>) -> Self {
        Self {
            command,
            status: OutcomeStatus::Ok,
            message: message.into(),
            imgset: None,
            path: None,
        }
    }

    #[must_use]
    pub fn warning(command: &'static str, message: impl Into<String>) -> Self {
        Self {
            status: OutcomeStatus::Warning,
            ..Self::ok(command, message)
        }
    }

    /// Attach the imgset the command acted on.
    #[must_use]
    pub fn with_imgset(mut self, name: &str, path: &std::path::Path) -> Self {
        self.imgset = Some(name.to_string());
        self.path = Some(to_slash(path));
        self
    }
}

/// Renders command results in the selected output mode.
pub enum Renderer<'a> {
    Human(HumanRenderer<'a>),
    Json(JsonRenderer),
}

impl Renderer<'_> {
    /// Render the imgset listing.
    ///
    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn render_listing(&self, listing: &ImgsetListing) -> anyhow::Result<()> {
        match self {
            Renderer::Human(r) => {
                r.render_listing(listing);
                Ok(())
            }
            Renderer::Json(r) => r.render_listing(listing),
        }
    }

    /// Render the effective configuration and where it is stored.
    ///
    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn render_config(&self, config: &DemConfig, path: &std::path::Path) -> anyhow::Result<()> {
        match self {
            Renderer::Human(r) => {
                r.render_config(config, path);
                Ok(())
            }
            Renderer::Json(r) => r.render_config(config, path),
        }
    }

    /// Render the result of a state-changing command.
    ///
    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn render_outcome(&self, outcome: &CommandOutcome) -> anyhow::Result<()> {
        match self {
            Renderer::Human(r) => {
                r.render_outcome(outcome);
                Ok(())
            }
            Renderer::Json(r) => r.render_outcome(outcome),
        }
    }

    /// Render the CLI version.
    ///
    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn render_version(&self, version: &str) -> anyhow::Result<()> {
        match self {
            Renderer::Human(r) => {
                r.render_version(version);
                Ok(())
            }
            Renderer::Json(r) => r.render_version(version),
        }
    }
}
