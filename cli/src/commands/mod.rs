//! Command implementations

pub mod activate;
pub mod config;
pub mod create;
pub mod list;
pub mod remove;
pub mod version;

use clap::Args;

/// Arguments for commands that act on a single imgset.
#[derive(Args)]
pub struct NameArgs {
    /// Imgset name
    pub name: Option<String>,
}

impl NameArgs {
    /// The given name, or `""` when omitted so validation reports it.
    #[must_use]
    pub fn name(&self) -> &str {
        self.name.as_deref().unwrap_or_default()
    }
}
