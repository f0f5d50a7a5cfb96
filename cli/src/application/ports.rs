//! Port trait definitions for the Application layer.
//!
//! Ports are the interfaces (contracts) that infrastructure must fulfill.
//! This file imports only from `crate::domain` — never from `crate::infra`,
//! `crate::commands`, or `crate::output`.

use std::path::{Path, PathBuf};
use std::process::Output;
use std::time::Duration;

use anyhow::Result;

use crate::domain::{DemConfig, PatchOutcome};

// ── Registry Ports ────────────────────────────────────────────────────────────

/// Directory-backed set of imgsets under a root.
///
/// Implementations do not validate names; services do that first.
pub trait ImgsetRegistry {
    /// Create `root/name` (and `root` itself) if missing, owner-only permissions.
    /// Returns the resolved imgset path.
    fn create(&self, root: &Path, name: &str) -> Result<PathBuf>;
    /// Whether `root/name` exists. Symlinks count even when dangling.
    fn exists(&self, root: &Path, name: &str) -> bool;
    /// Recursively delete `root/name`.
    fn remove(&self, root: &Path, name: &str) -> Result<()>;
    /// Base names of every immediate child of `root`, sorted ascending.
    fn list(&self, root: &Path) -> Result<Vec<String>>;
}

/// The `current` and `system` symlinks inside the root.
pub trait ActiveLink {
    /// Base name of the `current` link target, or `""` when absent or unreadable.
    fn current(&self, root: &Path) -> String;
    /// Atomically create or repoint `current` at `target`.
    fn make_current(&self, root: &Path, target: &Path) -> Result<()>;
    /// Create or repoint the `system` link at the runtime's default data root.
    fn link_system(&self, root: &Path, system_dir: &Path) -> Result<()>;
}

// ── Runtime Config Port ───────────────────────────────────────────────────────

/// Backup, patch and restore of the runtime configuration file.
pub trait RuntimeConfig {
    /// Copy `path` to its backup sibling, overwriting. Returns the backup path.
    fn backup(&self, path: &Path) -> Result<PathBuf>;
    /// Move the backup sibling back over `path`.
    fn restore(&self, path: &Path) -> Result<()>;
    /// Rewrite the data-root option in `path` to `data_root`.
    fn point_at(&self, path: &Path, data_root: &Path) -> Result<PatchOutcome>;
}

// ── Service Port ──────────────────────────────────────────────────────────────

/// Restarts the container runtime service.
#[allow(async_fn_in_trait)]
pub trait ServiceController {
    /// Restart `service`. Fails when the service manager reports failure.
    async fn restart(&self, service: &str) -> Result<()>;
}

// ── Command Runner Port ───────────────────────────────────────────────────────

/// Abstracts process execution so infrastructure can be swapped or mocked.
#[allow(async_fn_in_trait)]
pub trait CommandRunner {
    /// Run a program and capture its output.
    ///
    /// Implementations should delegate to `run_with_timeout` using the
    /// instance's configured default timeout.
    async fn run(&self, program: &str, args: &[&str]) -> Result<Output>;
    /// Run a program with a custom timeout override.
    ///
    /// # Errors
    ///
    /// Returns an error if the process cannot be spawned, exceeds `timeout`,
    /// or is cancelled. In the last two cases the child must be killed.
    async fn run_with_timeout(
        &self,
        program: &str,
        args: &[&str],
        timeout: Duration,
    ) -> Result<Output>;
}

// ── Progress Reporting Port ───────────────────────────────────────────────────

/// Abstracts progress reporting so services can emit events without
/// depending on the Presentation layer. Sync trait — no async needed.
pub trait ProgressReporter {
    /// Emit an in-progress step message.
    fn step(&self, message: &str);
    /// Emit a warning message.
    fn warn(&self, message: &str);
}

// ── Settings Port ─────────────────────────────────────────────────────────────

/// Abstracts persistence of dem's own settings.
pub trait ConfigStore {
    /// Load settings, returning `None` if the settings file does not exist.
    fn load(&self) -> Result<Option<DemConfig>>;
    /// Persist settings.
    fn save(&self, config: &DemConfig) -> Result<()>;
    /// Location of the settings file.
    fn path(&self) -> Result<PathBuf>;
}
