//! Application service — imgset create/remove/list use-cases.
//!
//! Imports only from `crate::domain` and `crate::application::ports`.
//! All I/O is routed through injected port traits.

use std::path::Path;

use anyhow::Result;
use tracing::debug;

use crate::application::ports::{ActiveLink, ImgsetRegistry};
use crate::domain::error::ImgsetError;
use crate::domain::imgset::{self, ImgsetListing};

/// Outcome of the `remove_imgset` use-case.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemoveOutcome {
    /// The imgset directory was deleted.
    Removed,
    /// Nothing to delete. Callers report this as a warning, not an error.
    NotInstalled,
}

/// Create imgset `name` under `root`. Creating an existing imgset is a no-op.
///
/// Returns the created imgset's name.
///
/// # Errors
///
/// Returns [`ImgsetError`] for an empty, malformed or reserved name, or when
/// the directory cannot be created.
pub fn create_imgset(registry: &impl ImgsetRegistry, root: &Path, name: &str) -> Result<String> {
    imgset::validate_managed_name("create", name)?;
    let path = registry.create(root, name)?;
    debug!(path = %path.display(), "imgset directory ensured");
    Ok(imgset::base_name(&path))
}

/// Remove imgset `name` from `root`.
///
/// The active imgset can never be removed, whether or not its directory
/// still exists.
///
/// # Errors
///
/// Returns [`ImgsetError::RemoveActive`] when `name` is current, another
/// [`ImgsetError`] for a bad name, or an I/O error if deletion fails.
pub fn remove_imgset(
    registry: &impl ImgsetRegistry,
    links: &impl ActiveLink,
    root: &Path,
    name: &str,
) -> Result<RemoveOutcome> {
    imgset::validate_managed_name("remove", name)?;
    let current = links.current(root);
    debug!(%current, "current imgset");
    if current == name {
        return Err(ImgsetError::RemoveActive(name.to_string()).into());
    }
    if !registry.exists(root, name) {
        return Ok(RemoveOutcome::NotInstalled);
    }
    registry.remove(root, name)?;
    Ok(RemoveOutcome::Removed)
}

/// List installed imgsets, marking the active one.
///
/// Read-only: a missing root lists as empty. The `system` link shows up as an
/// entry once `use system` has created it.
///
/// # Errors
///
/// Returns an error if the root exists but cannot be read.
pub fn list_imgsets(
    registry: &impl ImgsetRegistry,
    links: &impl ActiveLink,
    root: &Path,
) -> Result<ImgsetListing> {
    let names = registry.list(root)?;
    let current = links.current(root);
    debug!(%current, count = names.len(), "registry scanned");
    Ok(imgset::build_listing(root, names, &current))
}
