//! Domain layer — pure business logic, types, and validation.
//!
//! This module has zero imports from `crate::infra`, `crate::commands`,
//! `crate::application`, `tokio`, `std::fs`, `std::process`, or `std::net`.
//! All functions are synchronous and take data in, returning data out.

pub mod config;
pub mod error;
pub mod imgset;
pub mod runtime_config;

pub use config::{DemConfig, parse_settings, validate_config_key, validate_config_value};
pub use error::{ConfigError, ErrorKind, ImgsetError, exit_code_for};
pub use imgset::{ImgsetEntry, ImgsetListing, build_listing, resolve_path};
pub use runtime_config::{PatchOutcome, point_at};
