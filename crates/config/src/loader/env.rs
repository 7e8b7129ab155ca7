//! Environment sources used by the loader.
//!
//! Responsibilities:
//! - Read `.env` files into memory without touching the process environment.
//! - Layer dotenv values underneath the primary `EnvSource`.
//!
//! Does NOT handle:
//! - Applying values to configuration fields (see `overlay`).
//! - Resolving the environment name (see `environment`).
//!
//! Invariants:
//! - Variables from the primary source always win over dotenv values.
//! - A missing `.env` file yields an empty map, not an error.
//! - `DOTENV_DISABLED=1`/`true` on the primary source skips reading entirely.

use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::Path;

use super::error::ConfigError;
use crate::constants::DOTENV_DISABLED_VAR;
use crate::environment::EnvSource;

/// Check if dotenv loading is disabled on `env`.
pub(crate) fn dotenv_disabled(env: &dyn EnvSource) -> bool {
    matches!(
        env.var(DOTENV_DISABLED_VAR).as_deref(),
        Some("true") | Some("1")
    )
}

/// Read every assignment in the dotenv file at `path`.
///
/// Later assignments of the same key win, as they would when exported.
pub(crate) fn read_dotenv(path: &Path) -> Result<HashMap<String, String>, ConfigError> {
    let iter = match dotenvy::from_path_iter(path) {
        Ok(iter) => iter,
        Err(dotenvy::Error::Io(io_err)) if io_err.kind() == ErrorKind::NotFound => {
            return Ok(HashMap::new());
        }
        Err(e) => return Err(e.into()),
    };

    let mut vars = HashMap::new();
    for item in iter {
        let (key, value) = item?;
        vars.insert(key, value);
    }
    Ok(vars)
}

/// The primary source with dotenv values as fallback.
pub(crate) struct LayeredEnv<'a> {
    pub(crate) primary: &'a dyn EnvSource,
    pub(crate) dotenv: &'a HashMap<String, String>,
}

impl EnvSource for LayeredEnv<'_> {
    fn var(&self, key: &str) -> Option<String> {
        self.primary
            .var(key)
            .or_else(|| self.dotenv.get(key).cloned())
    }
}
