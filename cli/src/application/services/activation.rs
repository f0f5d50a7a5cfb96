//! Application service — the `use` transition.
//!
//! `Idle → EnsureTarget → Patching → Restarting → Relinking → Done`, with a
//! failure exit from every state. The sequence is not transactional: only a
//! failed restart is rolled back, by restoring the runtime config backup.
//!
//! Imports only from `crate::domain` and `crate::application::ports`.

use std::fmt;
use std::path::PathBuf;

use anyhow::{Context, Result};
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::application::ports::{
    ActiveLink, ImgsetRegistry, ProgressReporter, RuntimeConfig, ServiceController,
};
use crate::domain::config::DemConfig;
use crate::domain::error::ImgsetError;
use crate::domain::imgset::{self, CURRENT_LINK, SYSTEM_LINK};
use crate::domain::runtime_config::PatchOutcome;

/// States of the activation state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivationState {
    Idle,
    EnsureTarget,
    Patching,
    Restarting,
    Relinking,
    Done,
}

impl fmt::Display for ActivationState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ActivationState::Idle => "idle",
            ActivationState::EnsureTarget => "preparing the imgset",
            ActivationState::Patching => "patching the runtime config",
            ActivationState::Restarting => "restarting the runtime service",
            ActivationState::Relinking => "moving the current link",
            ActivationState::Done => "done",
        };
        f.write_str(s)
    }
}

pub struct ActivationOptions<'a, R: ProgressReporter> {
    pub reporter: &'a R,
    pub config: &'a DemConfig,
    pub cancel: &'a CancellationToken,
}

/// Result of a successful activation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Activated {
    /// Activated imgset name.
    pub name: String,
    /// Resolved imgset path written into the runtime config.
    pub path: PathBuf,
    /// Whether the imgset directory had to be created first.
    pub created: bool,
    /// What happened to the runtime config's option line.
    pub patch: PatchOutcome,
}

struct Machine<'a, R: ProgressReporter> {
    state: ActivationState,
    reporter: &'a R,
    cancel: &'a CancellationToken,
}

impl<R: ProgressReporter> Machine<'_, R> {
    fn enter(&mut self, next: ActivationState) -> Result<()> {
        anyhow::ensure!(
            !self.cancel.is_cancelled(),
            "cancelled before {next} (stopped while {})",
            self.state
        );
        debug!(from = ?self.state, to = ?next, "activation transition");
        self.state = next;
        Ok(())
    }

    fn fail(&self, err: anyhow::Error) -> anyhow::Error {
        err.context(format!("failed while {}", self.state))
    }
}

/// Activate imgset `name`: create it if missing, point the runtime config at
/// it, restart the runtime service, then move the `current` link.
///
/// # Errors
///
/// Returns [`ImgsetError`] for a bad name, or the error of whichever state
/// failed. A failed restart restores the runtime config from its backup
/// before the error is returned.
pub async fn activate(
    registry: &impl ImgsetRegistry,
    links: &impl ActiveLink,
    runtime_config: &impl RuntimeConfig,
    service: &impl ServiceController,
    name: &str,
    opts: ActivationOptions<'_, impl ProgressReporter>,
) -> Result<Activated> {
    let ActivationOptions {
        reporter,
        config,
        cancel,
    } = opts;
    let root = config.root.as_path();
    let mut m = Machine {
        state: ActivationState::Idle,
        reporter,
        cancel,
    };

    // EnsureTarget
    m.enter(ActivationState::EnsureTarget)?;
    imgset::validate_name("use", name)?;
    if name == CURRENT_LINK {
        return Err(ImgsetError::ReservedName(name.to_string()).into());
    }
    let created = !registry.exists(root, name);
    let path = if name == SYSTEM_LINK {
        links
            .link_system(root, &config.system_dir)
            .map_err(|e| m.fail(e))?;
        imgset::resolve_path(root, SYSTEM_LINK)
    } else {
        registry.create(root, name).map_err(|e| m.fail(e))?
    };
    if created && name != SYSTEM_LINK {
        m.reporter.step(&format!("Created imgset {name}"));
    }

    // Patching
    m.enter(ActivationState::Patching)?;
    let cfg_path = config.runtime_config.as_path();
    m.reporter.step(&format!(
        "Pointing {} at {}",
        cfg_path.display(),
        imgset::to_slash(&path)
    ));
    let backup = runtime_config.backup(cfg_path).map_err(|e| m.fail(e))?;
    debug!(backup = %backup.display(), "runtime config backed up");
    let patch = runtime_config
        .point_at(cfg_path, &path)
        .map_err(|e| m.fail(e))?;
    if patch == PatchOutcome::OptionNotFound {
        m.reporter.warn(&format!(
            "No DOCKER_OPTS line found in {}; the runtime data root is unchanged",
            cfg_path.display()
        ));
    }

    // Restarting
    m.enter(ActivationState::Restarting)?;
    m.reporter
        .step(&format!("Restarting {} service", config.service));
    if let Err(e) = service.restart(&config.service).await {
        match runtime_config.restore(cfg_path) {
            Ok(()) => m.reporter.warn(&format!(
                "Restored {} from backup",
                cfg_path.display()
            )),
            Err(restore_err) => m.reporter.warn(&format!(
                "Could not restore {}: {restore_err:#}",
                cfg_path.display()
            )),
        }
        return Err(m.fail(e));
    }

    // Relinking
    m.enter(ActivationState::Relinking)?;
    links
        .make_current(root, &path)
        .with_context(|| format!("{} now runs {name} but the current link was not moved", config.service))
        .map_err(|e| m.fail(e))?;

    m.state = ActivationState::Done;
    debug!(imgset = name, "activation complete");
    Ok(Activated {
        name: name.to_string(),
        path,
        created,
        patch,
    })
}
