//! Application context — unified state passed to every command handler.
//!
//! `AppContext` resolves settings once and owns the production port
//! implementations, so command handlers only pick the ports they need.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::application::ports::ConfigStore;
use crate::domain::config::DemConfig;
use crate::domain::error::ImgsetError;
use crate::domain::imgset::validate_root;
use crate::infra::command_runner::TokioCommandRunner;
use crate::infra::config::YamlConfigStore;
use crate::infra::fs::LocalImgsetStore;
use crate::infra::runtime_config::FsRuntimeConfig;
use crate::infra::service::SysvServiceController;
use crate::output::{HumanRenderer, JsonRenderer, OutputContext, Renderer, TerminalReporter};

/// Output rendering mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Human-readable terminal output (default).
    Human,
    /// Machine-readable JSON output.
    Json,
}

/// Output rendering flags.
pub struct OutputFlags {
    /// Disable ANSI color output.
    pub no_color: bool,
    /// Suppress non-error output.
    pub quiet: bool,
    /// Enable JSON output mode.
    pub json: bool,
}

/// Flags passed from the top-level CLI to `AppContext::new`.
pub struct AppFlags {
    /// Output rendering options.
    pub output: OutputFlags,
    /// Root directory override from `--dem-dir` / `DEM_DIR`.
    pub dem_dir: Option<PathBuf>,
}

/// Unified application context passed to every command handler.
pub struct AppContext {
    /// Terminal output context (colors, quiet mode).
    pub output: OutputContext,
    /// Output rendering mode (human vs JSON).
    pub mode: OutputMode,
    /// Effective settings for this invocation.
    pub config: DemConfig,
    /// Settings persistence.
    pub config_store: YamlConfigStore,
    /// Imgset directories and the `current`/`system` links.
    pub store: LocalImgsetStore,
    /// Runtime configuration file access.
    pub runtime_config: FsRuntimeConfig,
    /// Runtime service restarts.
    pub service: SysvServiceController<TokioCommandRunner>,
    /// Cancelled on Ctrl-C.
    pub cancel: CancellationToken,
}

impl AppContext {
    /// Construct an `AppContext` from top-level CLI flags.
    ///
    /// # Errors
    ///
    /// Returns an error if the settings file exists but cannot be read or parsed.
    pub fn new(flags: &AppFlags, cancel: CancellationToken) -> Result<Self> {
        let mode = if flags.output.json {
            OutputMode::Json
        } else {
            OutputMode::Human
        };
        // JSON mode keeps stdout for the single result object.
        let output = OutputContext::new(
            flags.output.no_color,
            flags.output.quiet || flags.output.json,
        );
        let config_store = YamlConfigStore;
        let config = resolve_config(&config_store, flags.dem_dir.clone(), |msg| {
            if mode == OutputMode::Human {
                output.warn(msg);
            }
        })?;
        debug!(?config, "effective settings");

        let runner = TokioCommandRunner::new(
            Duration::from_secs(config.command_timeout_secs),
            cancel.clone(),
        );
        let service = SysvServiceController::new(runner, config.service_manager.clone());

        Ok(Self {
            output,
            mode,
            config,
            config_store,
            store: LocalImgsetStore,
            runtime_config: FsRuntimeConfig,
            service,
            cancel,
        })
    }

    /// Returns `true` when JSON output mode is active.
    #[must_use]
    pub fn is_json(&self) -> bool {
        self.mode == OutputMode::Json
    }

    /// Returns the appropriate `Renderer` variant for the current output mode.
    #[must_use]
    pub fn renderer(&self) -> Renderer<'_> {
        match self.mode {
            OutputMode::Human => Renderer::Human(HumanRenderer::new(&self.output)),
            OutputMode::Json => Renderer::Json(JsonRenderer),
        }
    }

    /// Progress reporter for application services.
    #[must_use]
    pub fn reporter(&self) -> TerminalReporter<'_> {
        TerminalReporter::new(&self.output)
    }
}

/// Resolve the effective settings.
///
/// The root comes from `dem_dir` if given, else from the settings file, else
/// the built-in default. A relative `dem_dir` is made absolute against the
/// working directory. When no settings file exists yet, the resolved
/// settings are written to it so later invocations find the same root.
///
/// # Errors
///
/// Returns an error if an existing settings file cannot be read or parsed,
/// or the effective root is not a usable absolute path.
pub fn resolve_config(
    store: &impl ConfigStore,
    dem_dir: Option<PathBuf>,
    warn: impl Fn(&str),
) -> Result<DemConfig> {
    let dem_dir = dem_dir
        .map(|dir| {
            std::path::absolute(&dir).map_err(|e| {
                ImgsetError::io(format!("Unable to resolve {}", dir.display()), e)
            })
        })
        .transpose()?;

    if let Some(mut config) = store.load()? {
        if let Some(root) = dem_dir {
            config.root = root;
        }
        validate_root(&config.root)?;
        return Ok(config);
    }

    let mut config = DemConfig::default();
    if let Some(root) = dem_dir {
        config.root = root;
    }
    validate_root(&config.root)?;
    let path = store
        .path()
        .map_or_else(|_| "settings file".to_string(), |p| p.display().to_string());
    warn(&format!("{path} is not found. Saving settings there."));
    if let Err(e) = store.save(&config) {
        warn(&format!("Could not save settings: {e:#}"));
    }
    Ok(config)
}
