//! Runtime config file infrastructure — implements the `RuntimeConfig` port
//! with native copy/rename and the in-process `DOCKER_OPTS` rewrite.

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::Result;
use tracing::debug;

use crate::application::ports::RuntimeConfig;
use crate::domain::error::ImgsetError;
use crate::domain::imgset;
use crate::domain::runtime_config::{self, BACKUP_SUFFIX, PatchOutcome};

/// Production `RuntimeConfig` operating on the real file in place.
pub struct FsRuntimeConfig;

/// Backup sibling of `path`: the same path with `.bak` appended.
#[must_use]
pub fn backup_path(path: &Path) -> PathBuf {
    let mut s = path.as_os_str().to_owned();
    s.push(BACKUP_SUFFIX);
    PathBuf::from(s)
}

impl RuntimeConfig for FsRuntimeConfig {
    fn backup(&self, path: &Path) -> Result<PathBuf> {
        let bak = backup_path(path);
        std::fs::copy(path, &bak).map_err(|e| {
            ImgsetError::io(
                format!("Unable to copy {} to {}", path.display(), bak.display()),
                e,
            )
        })?;
        debug!(from = %path.display(), to = %bak.display(), "config backed up");
        Ok(bak)
    }

    fn restore(&self, path: &Path) -> Result<()> {
        let bak = backup_path(path);
        std::fs::rename(&bak, path).map_err(|e| {
            ImgsetError::io(
                format!("Unable to restore {} from {}", path.display(), bak.display()),
                e,
            )
        })?;
        debug!(from = %bak.display(), to = %path.display(), "config restored");
        Ok(())
    }

    fn point_at(&self, path: &Path, data_root: &Path) -> Result<PatchOutcome> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| ImgsetError::io(format!("Unable to read {}", path.display()), e))?;
        let outcome = runtime_config::point_at(&text, &imgset::to_slash(data_root));
        match &outcome {
            PatchOutcome::Patched(new_text) => {
                write_in_place(path, new_text)?;
                debug!(path = %path.display(), "runtime config patched");
            }
            other => debug!(path = %path.display(), outcome = ?other, "runtime config left as is"),
        }
        Ok(outcome)
    }
}

/// Replace the contents of `path` atomically, keeping its permissions.
fn write_in_place(path: &Path, content: &str) -> Result<()> {
    let io_err = |e| ImgsetError::io(format!("Unable to write {}", path.display()), e);
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(Path::new("."));
    let perms = std::fs::metadata(path).map_err(io_err)?.permissions();

    let mut tmp = tempfile::NamedTempFile::new_in(dir).map_err(io_err)?;
    tmp.write_all(content.as_bytes()).map_err(io_err)?;
    tmp.as_file().sync_all().map_err(io_err)?;
    std::fs::set_permissions(tmp.path(), perms).map_err(io_err)?;
    tmp.persist(path).map_err(|e| io_err(e.error))?;
    Ok(())
}
