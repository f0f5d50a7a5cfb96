//! Shared mock infrastructure for unit tests.
//!
//! Hand-written port implementations that record every call into one shared
//! journal, so tests can assert on the order of side effects.

#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use anyhow::Result;
use dem_cli::application::ports::{
    ActiveLink, ImgsetRegistry, ProgressReporter, RuntimeConfig, ServiceController,
};
use dem_cli::domain::error::ImgsetError;
use dem_cli::domain::imgset;
use dem_cli::domain::runtime_config::PatchOutcome;

pub type Journal = Rc<RefCell<Vec<String>>>;

pub fn journal() -> Journal {
    Rc::new(RefCell::new(Vec::new()))
}

pub fn io_error(context: &str) -> anyhow::Error {
    ImgsetError::io(
        context,
        std::io::Error::from(std::io::ErrorKind::PermissionDenied),
    )
    .into()
}

// ── Registry + links ─────────────────────────────────────────────────────────

/// In-memory registry and `current` link.
pub struct MemStore {
    pub log: Journal,
    pub dirs: RefCell<BTreeSet<String>>,
    pub current: RefCell<String>,
    pub fail_relink: bool,
    pub missing_system_dir: bool,
}

impl MemStore {
    pub fn new(log: &Journal) -> Self {
        Self {
            log: Rc::clone(log),
            dirs: RefCell::new(BTreeSet::new()),
            current: RefCell::new(String::new()),
            fail_relink: false,
            missing_system_dir: false,
        }
    }

    pub fn with_dirs(self, names: &[&str]) -> Self {
        self.dirs
            .borrow_mut()
            .extend(names.iter().map(ToString::to_string));
        self
    }
}

impl ImgsetRegistry for MemStore {
    fn create(&self, root: &Path, name: &str) -> Result<PathBuf> {
        self.log.borrow_mut().push(format!("create {name}"));
        self.dirs.borrow_mut().insert(name.to_string());
        Ok(imgset::resolve_path(root, name))
    }
    fn exists(&self, _: &Path, name: &str) -> bool {
        self.dirs.borrow().contains(name)
    }
    fn remove(&self, _: &Path, name: &str) -> Result<()> {
        self.log.borrow_mut().push(format!("remove {name}"));
        self.dirs.borrow_mut().remove(name);
        Ok(())
    }
    fn list(&self, _: &Path) -> Result<Vec<String>> {
        Ok(self.dirs.borrow().iter().cloned().collect())
    }
}

impl ActiveLink for MemStore {
    fn current(&self, _: &Path) -> String {
        self.current.borrow().clone()
    }
    fn make_current(&self, _: &Path, target: &Path) -> Result<()> {
        self.log
            .borrow_mut()
            .push(format!("relink {}", target.display()));
        if self.fail_relink {
            return Err(io_error("Unable to move link current into place"));
        }
        *self.current.borrow_mut() = imgset::base_name(target);
        Ok(())
    }
    fn link_system(&self, _: &Path, system_dir: &Path) -> Result<()> {
        self.log
            .borrow_mut()
            .push(format!("link-system {}", system_dir.display()));
        if self.missing_system_dir {
            return Err(ImgsetError::MissingSystemDir(system_dir.display().to_string()).into());
        }
        self.dirs.borrow_mut().insert("system".to_string());
        Ok(())
    }
}

// ── Runtime config ───────────────────────────────────────────────────────────

/// Records backup/patch/restore calls and keeps the "file" in memory.
pub struct MemRuntimeConfig {
    pub log: Journal,
    pub text: RefCell<String>,
    pub backup: RefCell<Option<String>>,
    pub fail_backup: bool,
}

impl MemRuntimeConfig {
    pub fn new(log: &Journal, text: &str) -> Self {
        Self {
            log: Rc::clone(log),
            text: RefCell::new(text.to_string()),
            backup: RefCell::new(None),
            fail_backup: false,
        }
    }
}

impl RuntimeConfig for MemRuntimeConfig {
    fn backup(&self, path: &Path) -> Result<PathBuf> {
        self.log.borrow_mut().push("backup".to_string());
        if self.fail_backup {
            return Err(io_error("Unable to copy config"));
        }
        *self.backup.borrow_mut() = Some(self.text.borrow().clone());
        Ok(PathBuf::from(format!("{}.bak", path.display())))
    }
    fn restore(&self, _: &Path) -> Result<()> {
        self.log.borrow_mut().push("restore".to_string());
        let Some(saved) = self.backup.borrow_mut().take() else {
            return Err(io_error("No backup"));
        };
        *self.text.borrow_mut() = saved;
        Ok(())
    }
    fn point_at(&self, _: &Path, data_root: &Path) -> Result<PatchOutcome> {
        self.log
            .borrow_mut()
            .push(format!("point-at {}", data_root.display()));
        let outcome =
            dem_cli::domain::point_at(&self.text.borrow(), &imgset::to_slash(data_root));
        if let PatchOutcome::Patched(new_text) = &outcome {
            *self.text.borrow_mut() = new_text.clone();
        }
        Ok(outcome)
    }
}

// ── Service ──────────────────────────────────────────────────────────────────

pub struct MockService {
    pub log: Journal,
    pub fail: bool,
}

impl MockService {
    pub fn ok(log: &Journal) -> Self {
        Self {
            log: Rc::clone(log),
            fail: false,
        }
    }

    pub fn failing(log: &Journal) -> Self {
        Self {
            log: Rc::clone(log),
            fail: true,
        }
    }
}

impl ServiceController for MockService {
    async fn restart(&self, service: &str) -> Result<()> {
        self.log.borrow_mut().push(format!("restart {service}"));
        if self.fail {
            return Err(ImgsetError::ServiceRestart {
                service: service.to_string(),
                detail: "job failed".to_string(),
            }
            .into());
        }
        Ok(())
    }
}

// ── Reporter ─────────────────────────────────────────────────────────────────

#[derive(Default)]
pub struct RecordingReporter {
    pub steps: RefCell<Vec<String>>,
    pub warnings: RefCell<Vec<String>>,
}

impl ProgressReporter for RecordingReporter {
    fn step(&self, message: &str) {
        self.steps.borrow_mut().push(message.to_string());
    }
    fn warn(&self, message: &str) {
        self.warnings.borrow_mut().push(message.to_string());
    }
}
