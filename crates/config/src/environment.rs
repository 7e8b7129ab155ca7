//! Environment variable access and active environment resolution.
//!
//! Responsibilities:
//! - Abstract variable lookup behind `EnvSource` so loaders can run against
//!   the process environment or an in-memory map.
//! - Resolve the active environment name from `ENV` / `APP_ENV`.
//!
//! Does NOT handle:
//! - Applying variables to configuration fields (see `overlay`).
//! - Loading `.env` files (see `loader::env`).
//!
//! Invariants:
//! - Empty variables are treated as unset.
//! - Values are returned untrimmed; whitespace is significant.
//! - `resolve_environment_name` never returns an empty string.

use std::collections::{BTreeMap, HashMap};

use crate::constants::{DEFAULT_ENVIRONMENT, ENV_OVERRIDE_VAR, ENV_VAR};

/// A read-only view of environment variables.
pub trait EnvSource {
    /// Returns the raw value of `key`, or `None` when it is unset.
    fn var(&self, key: &str) -> Option<String>;

    /// Returns the value of `key`, treating an empty value as unset.
    fn non_empty_var(&self, key: &str) -> Option<String> {
        self.var(key).filter(|value| !value.is_empty())
    }
}

/// The real process environment.
///
/// Variables that are not valid unicode are reported as unset.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl EnvSource for ProcessEnv {
    fn var(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }
}

impl EnvSource for HashMap<String, String> {
    fn var(&self, key: &str) -> Option<String> {
        self.get(key).cloned()
    }
}

impl EnvSource for BTreeMap<String, String> {
    fn var(&self, key: &str) -> Option<String> {
        self.get(key).cloned()
    }
}

impl<S: EnvSource + ?Sized> EnvSource for &S {
    fn var(&self, key: &str) -> Option<String> {
        (**self).var(key)
    }
}

/// Determine the active environment name.
///
/// `APP_ENV` wins over `ENV`; with neither set the name is `development`.
pub fn resolve_environment_name(env: &dyn EnvSource) -> String {
    env.non_empty_var(ENV_OVERRIDE_VAR)
        .or_else(|| env.non_empty_var(ENV_VAR))
        .unwrap_or_else(|| DEFAULT_ENVIRONMENT.to_string())
}
