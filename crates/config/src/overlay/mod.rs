//! Environment variable overlay for configuration structs.
//!
//! Responsibilities:
//! - Provide the `EnvOverlay` trait and the `env_overlay!` binding table.
//! - Coerce variable strings to the exact leaf type of each bound field.
//!
//! Does NOT handle:
//! - JSON file loading (see `loader::file`).
//! - Deciding which variables exist (delegated to `EnvSource`).
//!
//! Invariants:
//! - Bindings are declared statically per type; nothing is discovered at runtime.
//! - Fields without a binding are never modified.

mod value;
mod walker;

pub use value::{EnvValue, ValueError};
pub use walker::{AppliedOverride, CoercionFailure, EnvOverlay, OverlayReport, OverlayWalker};

/// Declare the environment bindings of a configuration struct.
///
/// Each entry maps a field to a variable name, to `nested`, which
/// recurses into a field whose type also implements `EnvOverlay`, or to
/// `none`, which leaves the field to the file layer.
/// Entries are visited in the order written. Types loaded from files use
/// [`config_table!`](crate::config_table), which expands to this macro.
///
/// ```rust,ignore
/// env_overlay!(ServerConfig {
///     host => "SERVER_HOST",
///     port => "SERVER_PORT",
///     tls => nested,
/// });
/// ```
#[macro_export]
macro_rules! env_overlay {
    ($ty:ty { $($field:ident => $binding:tt),* $(,)? }) => {
        impl $crate::EnvOverlay for $ty {
            #[allow(unused_variables)]
            fn walk_env(&mut self, walker: &mut $crate::OverlayWalker<'_>) {
                $( $crate::env_overlay!(@bind self, walker, $field, $binding); )*
            }
        }
    };
    (@bind $target:ident, $walker:ident, $field:ident, none) => {};
    (@bind $target:ident, $walker:ident, $field:ident, nested) => {
        $walker.nested(stringify!($field), &mut $target.$field);
    };
    (@bind $target:ident, $walker:ident, $field:ident, $var:literal) => {
        $walker.leaf(stringify!($field), &mut $target.$field, $var);
    };
}
