//! Imgset domain types and pure path/name functions.
//!
//! This module is intentionally free of I/O, async, and external layer imports.
//! All functions take data in and return data out.

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::domain::error::ImgsetError;

/// Name of the symlink designating the active imgset.
pub const CURRENT_LINK: &str = "current";

/// Name of the symlink pointing at the runtime's default data root.
pub const SYSTEM_LINK: &str = "system";

/// Link names that live next to imgsets but are not imgsets themselves.
pub const RESERVED_NAMES: &[&str] = &[CURRENT_LINK, SYSTEM_LINK];

/// Resolve the path of imgset `name` under `root`.
///
/// Joins with the host's separator rules, then normalizes to forward slashes.
/// No validation and no existence check.
#[must_use]
pub fn resolve_path(root: &Path, name: &str) -> PathBuf {
    PathBuf::from(to_slash(&root.join(name)))
}

/// Render a path with forward slashes only.
#[must_use]
pub fn to_slash(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}

/// Base name of a link target, or an empty string when it has none.
#[must_use]
pub fn base_name(target: &Path) -> String {
    target
        .file_name()
        .map(|n| n.to_string_lossy().trim().to_string())
        .unwrap_or_default()
}

/// Validates that `name` is a usable imgset name for `command`.
///
/// The name must be non-empty and a single path segment. Whitespace and
/// double quotes are rejected too, since the resolved path is written
/// unquoted into the runtime option line.
///
/// # Errors
///
/// Returns [`ImgsetError::MissingName`] for an empty name and
/// [`ImgsetError::InvalidName`] for anything that is not a plain segment.
pub fn validate_name(command: &'static str, name: &str) -> Result<(), ImgsetError> {
    if name.is_empty() {
        return Err(ImgsetError::MissingName { command });
    }
    let bad_char = |c: char| c == '/' || c == '\\' || c == '"' || c.is_whitespace();
    if name == "." || name == ".." || name.chars().any(bad_char) {
        return Err(ImgsetError::InvalidName(name.to_string()));
    }
    Ok(())
}

/// Like [`validate_name`], and additionally rejects the reserved link names.
///
/// # Errors
///
/// Returns [`ImgsetError::ReservedName`] for `current` and `system`.
pub fn validate_managed_name(command: &'static str, name: &str) -> Result<(), ImgsetError> {
    validate_name(command, name)?;
    if RESERVED_NAMES.contains(&name) {
        return Err(ImgsetError::ReservedName(name.to_string()));
    }
    Ok(())
}

/// Validates the directory holding all imgsets.
///
/// Imgset paths are written unquoted into the runtime option line, so the
/// root must be absolute and free of whitespace and double quotes.
///
/// # Errors
///
/// Returns [`ImgsetError::InvalidRoot`] otherwise.
pub fn validate_root(root: &Path) -> Result<(), ImgsetError> {
    let text = root.to_string_lossy();
    if !root.is_absolute() || text.chars().any(|c| c == '"' || c.is_whitespace()) {
        return Err(ImgsetError::InvalidRoot(text.into_owned()));
    }
    Ok(())
}

// ── Listing ──────────────────────────────────────────────────────────────────

/// One line of `dem list`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImgsetEntry {
    pub name: String,
    pub path: String,
    pub active: bool,
}

/// Full result of `dem list`.
#[derive(Debug, Clone, Serialize)]
pub struct ImgsetListing {
    /// Registry root directory.
    pub root: String,
    /// Active imgset, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current: Option<String>,
    /// Installed imgsets in ascending name order.
    pub imgsets: Vec<ImgsetEntry>,
}

/// Build the listing from sorted registry names and the current imgset.
///
/// The `current` link is dropped; the entry equal to `current` is marked active.
#[must_use]
pub fn build_listing(root: &Path, names: Vec<String>, current: &str) -> ImgsetListing {
    let imgsets = names
        .into_iter()
        .filter(|name| name != CURRENT_LINK)
        .map(|name| ImgsetEntry {
            path: to_slash(&resolve_path(root, &name)),
            active: !current.is_empty() && name == current,
            name,
        })
        .collect();
    ImgsetListing {
        root: to_slash(root),
        current: (!current.is_empty()).then(|| current.to_string()),
        imgsets,
    }
}
