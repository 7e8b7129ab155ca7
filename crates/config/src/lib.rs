//! Layered configuration loading for envlayer.
//!
//! This crate populates a caller-owned configuration struct from JSON
//! files (`default.json`, then `<environment>.json`) and finally from
//! environment variables bound to individual fields.
//!
//! ```rust,ignore
//! use envlayer_config::{ConfigLoader, config_table};
//!
//! #[derive(Debug, Default, Clone)]
//! struct Database {
//!     url: String,
//!     pool_size: u32,
//! }
//!
//! #[derive(Debug, Default, Clone)]
//! struct AppConfig {
//!     debug: bool,
//!     database: Database,
//! }
//!
//! config_table!(Database {
//!     url: "url" => "DATABASE_URL",
//!     pool_size: "poolSize" => "DATABASE_POOL_SIZE",
//! });
//! config_table!(AppConfig {
//!     debug: "debug" => "APP_DEBUG",
//!     database: "database" => nested,
//! });
//!
//! let loader = ConfigLoader::new()?;
//! let mut config = AppConfig::default();
//! let report = loader.unmarshal(&mut config)?;
//! ```

pub mod constants;
pub mod environment;
mod loader;
pub mod overlay;
mod table;

pub use environment::{EnvSource, ProcessEnv, resolve_environment_name};
pub use loader::{
    ConfigError, ConfigLoader, FileLoad, FileReport, FileStatus, LoadReport, SettingKey,
    UnknownSettingKey,
};
pub use overlay::{
    AppliedOverride, CoercionFailure, EnvOverlay, EnvValue, OverlayReport, OverlayWalker,
    ValueError,
};
pub use table::{JsonMerge, MergeError};

#[doc(hidden)]
pub mod __private {
    pub use crate::table::{merge_leaf, merge_nested};
    pub use serde_json::{Map, Value};
}
