//! Typed domain error enums.
//!
//! This module has zero imports from `crate::infra`, `crate::commands`,
//! `crate::application`, `tokio`, `std::fs`, `std::process`, or `std::net`.
//! All error types implement `thiserror::Error` and convert to `anyhow::Error`
//! via the `?` operator.

use thiserror::Error;

// ── Error categories ──────────────────────────────────────────────────────────

/// Exit status for a missing or malformed argument (`EX_USAGE`).
pub const EXIT_INVALID_ARGUMENT: u8 = 64;
/// Exit status for an I/O failure (`EX_IOERR`).
pub const EXIT_IO: u8 = 74;
/// Exit status for a forbidden operation (`EX_NOPERM`).
pub const EXIT_FORBIDDEN: u8 = 77;
/// Exit status for anything that is not an [`ImgsetError`].
pub const EXIT_FAILURE: u8 = 1;

/// Category of an [`ImgsetError`], used to pick the process exit status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Missing or malformed imgset name.
    InvalidArgument,
    /// The operation is forbidden in the current state.
    PreconditionFailed,
    /// The target does not exist. Reported as a warning, never fatal.
    NotFound,
    /// Filesystem, symlink or service-command failure.
    Io,
}

impl ErrorKind {
    /// Process exit status for this category.
    #[must_use]
    pub fn exit_code(self) -> u8 {
        match self {
            ErrorKind::InvalidArgument => EXIT_INVALID_ARGUMENT,
            ErrorKind::PreconditionFailed => EXIT_FORBIDDEN,
            ErrorKind::Io => EXIT_IO,
            ErrorKind::NotFound => 0,
        }
    }
}

// ── Imgset errors ─────────────────────────────────────────────────────────────

/// Errors raised by the imgset lifecycle.
#[derive(Debug, Error)]
pub enum ImgsetError {
    #[error("The {command} command requires that an imgset name is specified.")]
    MissingName { command: &'static str },

    #[error("Invalid imgset name '{0}': must be a single path segment without whitespace or quotes.")]
    InvalidName(String),

    #[error("'{0}' is a reserved link name and cannot be managed as an imgset.")]
    ReservedName(String),

    #[error("Cannot remove current imgset '{0}'. Switch to another one first: dem use <name>")]
    RemoveActive(String),

    #[error("{0} is not installed.")]
    NotInstalled(String),

    #[error("Runtime data root {0} does not exist; set system-dir to the runtime's default data directory.")]
    MissingSystemDir(String),

    #[error("Invalid imgset root '{0}': must be an absolute path without whitespace or quotes.")]
    InvalidRoot(String),

    #[error("{context}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Restarting service '{service}' failed: {detail}")]
    ServiceRestart { service: String, detail: String },
}

impl ImgsetError {
    /// Wrap an I/O error with a human-readable description of what failed.
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        ImgsetError::Io {
            context: context.into(),
            source,
        }
    }

    /// Category of this error.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            ImgsetError::MissingName { .. }
            | ImgsetError::InvalidName(_)
            | ImgsetError::ReservedName(_)
            | ImgsetError::InvalidRoot(_) => ErrorKind::InvalidArgument,
            ImgsetError::RemoveActive(_) | ImgsetError::MissingSystemDir(_) => {
                ErrorKind::PreconditionFailed
            }
            ImgsetError::NotInstalled(_) => ErrorKind::NotFound,
            ImgsetError::Io { .. } | ImgsetError::ServiceRestart { .. } => ErrorKind::Io,
        }
    }
}

/// Exit status for an arbitrary error chain.
///
/// The first [`ImgsetError`] found in the chain decides; anything else maps
/// to [`EXIT_FAILURE`].
#[must_use]
pub fn exit_code_for(err: &anyhow::Error) -> u8 {
    err.chain()
        .find_map(|cause| cause.downcast_ref::<ImgsetError>())
        .map_or(EXIT_FAILURE, |e| match e.kind().exit_code() {
            0 => EXIT_FAILURE,
            code => code,
        })
}

// ── Config errors ─────────────────────────────────────────────────────────────

/// Errors related to configuration key/value validation.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Unknown setting: {key}\n\nValid settings: {valid}")]
    UnknownKey { key: String, valid: String },

    #[error("Invalid value for {key}: {value}\n\n{hint}")]
    InvalidValue {
        key: String,
        value: String,
        hint: String,
    },
}
