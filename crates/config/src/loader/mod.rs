//! Configuration loader for JSON files and environment variables.
//!
//! Responsibilities:
//! - Load `default.json` and `<environment>.json` from a folder, in that order.
//! - Overlay bound environment variables on the populated struct.
//! - Provide a builder-pattern `ConfigLoader` with optional `.env` support.
//!
//! Does NOT handle:
//! - Declaring field bindings (see `overlay`).
//! - Validating configuration values beyond type coercion.
//!
//! Invariants / Assumptions:
//! - Environment variables take precedence over file values.
//! - Environment files take precedence over the default file.
//! - The `DOTENV_DISABLED` variable is checked before any `.env` file is read.

mod builder;
mod env;
mod error;
mod file;
mod settings;

pub use builder::{ConfigLoader, LoadReport};
pub use error::ConfigError;
pub use file::{FileLoad, FileReport, FileStatus};
pub use settings::{SettingKey, UnknownSettingKey};

#[cfg(test)]
mod tests;
