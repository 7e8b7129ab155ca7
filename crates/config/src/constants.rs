//! Centralized constants for the envlayer workspace.
//!
//! This module contains the default names and environment variables the
//! loader consults, so tests and callers never hard-code them.

// =============================================================================
// Environment Resolution
// =============================================================================

/// Environment name used when neither `ENV` nor `APP_ENV` is set.
pub const DEFAULT_ENVIRONMENT: &str = "development";

/// Primary variable naming the active environment.
pub const ENV_VAR: &str = "ENV";

/// Higher-priority variable that overrides `ENV` when set.
pub const ENV_OVERRIDE_VAR: &str = "APP_ENV";

// =============================================================================
// File Layout
// =============================================================================

/// Base name of the file loaded before the environment-specific file.
pub const DEFAULT_FILE: &str = "default";

/// Extension appended to every base name.
pub const DEFAULT_FILE_EXTENSION: &str = ".json";

// =============================================================================
// Dotenv
// =============================================================================

/// Name of the dotenv file looked up in the loader's folder.
pub const DOTENV_FILE: &str = ".env";

/// Setting this to `1` or `true` disables dotenv loading.
pub const DOTENV_DISABLED_VAR: &str = "DOTENV_DISABLED";
