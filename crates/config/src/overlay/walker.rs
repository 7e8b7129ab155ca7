//! Depth-first application of environment bindings.
//!
//! Responsibilities:
//! - Read each bound variable once and assign coerced values to leaves.
//! - Recurse into nested bindings while tracking the dotted field path.
//! - Record applied overrides and coercion failures in `OverlayReport`.
//!
//! Does NOT handle:
//! - Declaring which fields are bound (see the `env_overlay!` macro).
//! - Parsing rules for individual types (see `value.rs`).
//!
//! Invariants:
//! - Absent or empty variables never touch the field.
//! - A failed coercion keeps the prior value and does not stop the walk.
//! - Raw variable values are never logged.

use tracing::{debug, warn};

use super::value::{EnvValue, ValueError};
use crate::environment::EnvSource;

/// A configuration type with a static table of environment bindings.
///
/// Implement it with [`env_overlay!`](crate::env_overlay) rather than by hand.
pub trait EnvOverlay {
    /// Visit every bound field in declaration order.
    fn walk_env(&mut self, walker: &mut OverlayWalker<'_>);
}

impl<T: EnvOverlay + ?Sized> EnvOverlay for Box<T> {
    fn walk_env(&mut self, walker: &mut OverlayWalker<'_>) {
        (**self).walk_env(walker);
    }
}

impl<T: EnvOverlay + ?Sized> EnvOverlay for &mut T {
    fn walk_env(&mut self, walker: &mut OverlayWalker<'_>) {
        (**self).walk_env(walker);
    }
}

/// A variable that replaced a field value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppliedOverride {
    /// Dotted path of the field, e.g. `database.pool_size`.
    pub field: String,
    /// Variable the value came from.
    pub var: String,
}

/// A variable whose value could not be coerced to its field type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoercionFailure {
    pub field: String,
    pub var: String,
    /// The field's declared kind, e.g. `i32`.
    pub expected: &'static str,
    pub error: ValueError,
}

/// Outcome of one overlay pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OverlayReport {
    pub applied: Vec<AppliedOverride>,
    pub failures: Vec<CoercionFailure>,
}

impl OverlayReport {
    /// True when every present variable was applied.
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Walks a configuration value and applies bound environment variables.
pub struct OverlayWalker<'a> {
    env: &'a dyn EnvSource,
    path: Vec<&'static str>,
    report: OverlayReport,
}

impl<'a> OverlayWalker<'a> {
    pub fn new(env: &'a dyn EnvSource) -> Self {
        Self {
            env,
            path: Vec::new(),
            report: OverlayReport::default(),
        }
    }

    /// Walk `target` and return everything that happened.
    pub fn run<T: EnvOverlay + ?Sized>(mut self, target: &mut T) -> OverlayReport {
        target.walk_env(&mut self);
        self.report
    }

    /// Apply the variable `var` to a leaf field.
    pub fn leaf<T: EnvValue>(&mut self, name: &'static str, field: &mut T, var: &str) {
        let Some(raw) = self.env.non_empty_var(var) else {
            return;
        };

        let path = self.field_path(name);
        match T::from_env_str(&raw) {
            Ok(value) => {
                *field = value;
                debug!(field = %path, var, "Applied environment override");
                self.report.applied.push(AppliedOverride {
                    field: path,
                    var: var.to_string(),
                });
            }
            Err(error) => {
                warn!(
                    field = %path,
                    var,
                    expected = T::KIND,
                    error = %error,
                    "Ignoring environment override that does not parse"
                );
                self.report.failures.push(CoercionFailure {
                    field: path,
                    var: var.to_string(),
                    expected: T::KIND,
                    error,
                });
            }
        }
    }

    /// Recurse into a nested configuration block.
    pub fn nested<T: EnvOverlay + ?Sized>(&mut self, name: &'static str, field: &mut T) {
        self.path.push(name);
        field.walk_env(self);
        self.path.pop();
    }

    fn field_path(&self, name: &str) -> String {
        let mut path = self.path.join(".");
        if !path.is_empty() {
            path.push('.');
        }
        path.push_str(name);
        path
    }
}
