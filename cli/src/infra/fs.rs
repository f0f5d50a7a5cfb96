//! Filesystem infrastructure — implements `ImgsetRegistry` and `ActiveLink`
//! with native directory and symlink calls.

use std::io;
use std::path::{Path, PathBuf};

use anyhow::Result;
use tracing::debug;

use crate::application::ports::{ActiveLink, ImgsetRegistry};
use crate::domain::error::ImgsetError;
use crate::domain::imgset::{self, CURRENT_LINK, SYSTEM_LINK};

/// Production filesystem implementation of the registry and link ports.
pub struct LocalImgsetStore;

impl ImgsetRegistry for LocalImgsetStore {
    fn create(&self, root: &Path, name: &str) -> Result<PathBuf> {
        let path = imgset::resolve_path(root, name);
        create_private_dir(&path)
            .map_err(|e| ImgsetError::io(format!("Unable to create {}", path.display()), e))?;
        Ok(path)
    }

    fn exists(&self, root: &Path, name: &str) -> bool {
        imgset::resolve_path(root, name).symlink_metadata().is_ok()
    }

    fn remove(&self, root: &Path, name: &str) -> Result<()> {
        let path = imgset::resolve_path(root, name);
        let meta = path
            .symlink_metadata()
            .map_err(|e| ImgsetError::io(format!("Unable to inspect {}", path.display()), e))?;
        let result = if meta.is_dir() {
            std::fs::remove_dir_all(&path)
        } else {
            std::fs::remove_file(&path)
        };
        result.map_err(|e| {
            ImgsetError::io(
                format!("Unable to remove imgset {name} located in {}", path.display()),
                e,
            )
        })?;
        debug!(path = %path.display(), "imgset removed");
        Ok(())
    }

    fn list(&self, root: &Path) -> Result<Vec<String>> {
        let entries = match std::fs::read_dir(root) {
            Ok(entries) => entries,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => {
                return Err(ImgsetError::io(format!("Unable to read {}", root.display()), e).into());
            }
        };
        let mut names = Vec::new();
        for entry in entries {
            let entry =
                entry.map_err(|e| ImgsetError::io(format!("Unable to read {}", root.display()), e))?;
            names.push(entry.file_name().to_string_lossy().into_owned());
        }
        names.sort();
        Ok(names)
    }
}

impl ActiveLink for LocalImgsetStore {
    fn current(&self, root: &Path) -> String {
        let link = imgset::resolve_path(root, CURRENT_LINK);
        match std::fs::read_link(&link) {
            Ok(target) => imgset::base_name(&target),
            Err(e) => {
                debug!(link = %link.display(), error = %e, "no current imgset");
                String::new()
            }
        }
    }

    fn make_current(&self, root: &Path, target: &Path) -> Result<()> {
        std::fs::metadata(target).map_err(|e| {
            ImgsetError::io(format!("Cannot make {} current", target.display()), e)
        })?;
        replace_symlink(target, &imgset::resolve_path(root, CURRENT_LINK))?;
        debug!(target = %target.display(), "current link moved");
        Ok(())
    }

    fn link_system(&self, root: &Path, system_dir: &Path) -> Result<()> {
        if !system_dir.is_dir() {
            return Err(ImgsetError::MissingSystemDir(system_dir.display().to_string()).into());
        }
        create_private_dir(root)
            .map_err(|e| ImgsetError::io(format!("Unable to create {}", root.display()), e))?;
        replace_symlink(system_dir, &imgset::resolve_path(root, SYSTEM_LINK))?;
        debug!(system_dir = %system_dir.display(), "system link refreshed");
        Ok(())
    }
}

/// `mkdir -p` with owner-only permissions on every directory it creates.
fn create_private_dir(path: &Path) -> io::Result<()> {
    let mut builder = std::fs::DirBuilder::new();
    builder.recursive(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::DirBuilderExt;
        builder.mode(0o700);
    }
    builder.create(path)
}

/// Point `link` at `target`, replacing whatever `link` was.
///
/// The new link is created under a temporary name and renamed over `link`,
/// so readers never observe a missing link.
fn replace_symlink(target: &Path, link: &Path) -> Result<()> {
    let file_name = link
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let tmp = link.with_file_name(format!(".{file_name}.{}.tmp", std::process::id()));
    let _ = std::fs::remove_file(&tmp);
    symlink(target, &tmp).map_err(|e| {
        ImgsetError::io(
            format!("Unable to link {} to {}", tmp.display(), target.display()),
            e,
        )
    })?;
    if let Err(e) = std::fs::rename(&tmp, link) {
        let _ = std::fs::remove_file(&tmp);
        return Err(ImgsetError::io(
            format!("Unable to move link {} into place", link.display()),
            e,
        )
        .into());
    }
    Ok(())
}

#[cfg(unix)]
fn symlink(target: &Path, link: &Path) -> io::Result<()> {
    std::os::unix::fs::symlink(target, link)
}

#[cfg(not(unix))]
fn symlink(_target: &Path, _link: &Path) -> io::Result<()> {
    Err(io::Error::new(
        io::ErrorKind::Unsupported,
        "imgset links require a Unix host",
    ))
}
