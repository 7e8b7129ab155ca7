//! Configuration loader builder implementation.
//!
//! Responsibilities:
//! - Provide a builder-pattern `ConfigLoader` holding the folder, file
//!   extension, default base name and active environment.
//! - Run the file layer (`parse_file`), the overlay layer (`parse_env`),
//!   or both (`unmarshal`) against a caller-owned target.
//! - Expose the loader's own settings by name (`set_default` / `get_default`).
//!
//! Does NOT handle:
//! - JSON merging details (delegated to file.rs).
//! - Coercion of variable values (delegated to `overlay`).
//!
//! Invariants / Assumptions:
//! - The default file is loaded before the environment file.
//! - Files are fully applied before any environment variable.
//! - Missing files are never an error for `parse_file` / `unmarshal`.
//! - `load_dotenv()` must be called explicitly to enable `.env` file loading.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, warn};

use super::env::{LayeredEnv, dotenv_disabled, read_dotenv};
use super::error::ConfigError;
use super::file::{FileLoad, FileReport, FileStatus, load_path};
use super::settings::SettingKey;
use crate::constants::{DEFAULT_FILE, DEFAULT_FILE_EXTENSION, DOTENV_FILE};
use crate::environment::{EnvSource, ProcessEnv, resolve_environment_name};
use crate::overlay::{EnvOverlay, OverlayReport, OverlayWalker};
use crate::table::JsonMerge;

/// Combined outcome of `unmarshal`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadReport {
    pub files: FileReport,
    pub overlay: OverlayReport,
}

/// Loads layered JSON files and environment overrides into a target struct.
pub struct ConfigLoader {
    environment: String,
    environment_pinned: bool,
    folder: PathBuf,
    file_extension: String,
    default_file: String,
    env: Arc<dyn EnvSource + Send + Sync>,
    dotenv: HashMap<String, String>,
}

impl std::fmt::Debug for ConfigLoader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Dotenv values may hold secrets; only their count is shown.
        f.debug_struct("ConfigLoader")
            .field("environment", &self.environment)
            .field("folder", &self.folder)
            .field("file_extension", &self.file_extension)
            .field("default_file", &self.default_file)
            .field("dotenv_vars", &self.dotenv.len())
            .finish()
    }
}

impl ConfigLoader {
    /// Create a loader rooted at the current working directory.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::WorkingDirectory` if the working directory
    /// cannot be determined. Every file operation depends on it, so callers
    /// should treat this as fatal.
    pub fn new() -> Result<Self, ConfigError> {
        let folder = std::env::current_dir().map_err(ConfigError::WorkingDirectory)?;
        Ok(Self::from_folder(folder))
    }

    /// Create a loader rooted at `folder`, reading the process environment.
    pub fn from_folder(folder: impl Into<PathBuf>) -> Self {
        Self {
            environment: resolve_environment_name(&ProcessEnv),
            environment_pinned: false,
            folder: folder.into(),
            file_extension: DEFAULT_FILE_EXTENSION.to_string(),
            default_file: DEFAULT_FILE.to_string(),
            env: Arc::new(ProcessEnv),
            dotenv: HashMap::new(),
        }
    }

    /// Read variables from `source` instead of the process environment.
    ///
    /// The environment name is re-resolved from `source` unless it was set
    /// explicitly with `with_environment`.
    pub fn with_env_source(mut self, source: impl EnvSource + Send + Sync + 'static) -> Self {
        self.env = Arc::new(source);
        self.refresh_environment();
        self
    }

    /// Override the config folder.
    pub fn with_folder(mut self, folder: impl Into<PathBuf>) -> Self {
        self.folder = folder.into();
        self
    }

    /// Pin the active environment name.
    pub fn with_environment(mut self, name: impl Into<String>) -> Self {
        self.environment = name.into();
        self.environment_pinned = true;
        self
    }

    /// Set the extension appended to base names, including the dot.
    pub fn with_file_extension(mut self, extension: impl Into<String>) -> Self {
        self.file_extension = extension.into();
        self
    }

    /// Set the base name of the file loaded before the environment file.
    pub fn with_default_file(mut self, base_name: impl Into<String>) -> Self {
        self.default_file = base_name.into();
        self
    }

    /// Load variables from `<folder>/.env` as a fallback layer.
    ///
    /// If `DOTENV_DISABLED` is set to "true" or "1", the file is not read
    /// (useful for testing). Values never override variables already present
    /// in the environment source, and the process environment is not modified.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The `.env` file exists but has invalid syntax (`ConfigError::DotenvParse`)
    /// - The `.env` file exists but cannot be read due to I/O errors (`ConfigError::DotenvIo`)
    ///
    /// Missing `.env` files are silently ignored (returns `Ok(self)`).
    ///
    /// SAFETY: Error messages never include raw .env line contents to prevent secret leakage.
    pub fn load_dotenv(mut self) -> Result<Self, ConfigError> {
        if dotenv_disabled(&*self.env) {
            return Ok(self);
        }

        let path = self.folder.join(DOTENV_FILE);
        self.dotenv = read_dotenv(&path)?;
        debug!(
            path = %path.display(),
            count = self.dotenv.len(),
            "Loaded dotenv variables"
        );
        self.refresh_environment();
        Ok(self)
    }

    fn refresh_environment(&mut self) {
        if !self.environment_pinned {
            let name = resolve_environment_name(&self.layered_env());
            self.environment = name;
        }
    }

    fn layered_env(&self) -> LayeredEnv<'_> {
        LayeredEnv {
            primary: &*self.env,
            dotenv: &self.dotenv,
        }
    }

    /// Active environment name.
    pub fn environment(&self) -> &str {
        &self.environment
    }

    pub fn folder(&self) -> &Path {
        &self.folder
    }

    pub fn file_extension(&self) -> &str {
        &self.file_extension
    }

    pub fn default_file(&self) -> &str {
        &self.default_file
    }

    /// Path of the file with the given base name.
    pub fn file_path(&self, base_name: &str) -> PathBuf {
        self.folder.join(format!("{}{}", base_name, self.file_extension))
    }

    /// Set one of the loader's settings by name.
    ///
    /// Unknown keys are ignored.
    pub fn set_default(&mut self, key: &str, value: impl Into<String>) {
        let Ok(key) = key.parse::<SettingKey>() else {
            return;
        };
        let value = value.into();
        match key {
            SettingKey::Env => {
                self.environment = value;
                self.environment_pinned = true;
            }
            SettingKey::Folder => self.folder = PathBuf::from(value),
            SettingKey::FileType => self.file_extension = value,
            SettingKey::DefaultFile => self.default_file = value,
        }
    }

    /// Read one of the loader's settings by name.
    ///
    /// Unknown keys yield an empty string.
    pub fn get_default(&self, key: &str) -> String {
        match key.parse::<SettingKey>() {
            Ok(SettingKey::Env) => self.environment.clone(),
            Ok(SettingKey::Folder) => self.folder.to_string_lossy().into_owned(),
            Ok(SettingKey::FileType) => self.file_extension.clone(),
            Ok(SettingKey::DefaultFile) => self.default_file.clone(),
            Err(_) => String::new(),
        }
    }

    /// Load `<folder>/<base_name><ext>` into `target`.
    ///
    /// # Errors
    ///
    /// - `ConfigError::NotFound` if the file does not exist.
    /// - `ConfigError::Io` if the path cannot be inspected.
    ///
    /// Unreadable or malformed files are not errors; see the returned status.
    pub fn load_file<T>(&self, target: &mut T, base_name: &str) -> Result<FileLoad, ConfigError>
    where
        T: JsonMerge + Clone,
    {
        load_path(target, &self.file_path(base_name))
    }

    /// Apply the default file, then the environment file.
    ///
    /// # Errors
    ///
    /// Only a hard filesystem error on the default file is returned; missing
    /// files and every failure on the environment file are reported instead.
    pub fn parse_file<T>(&self, target: &mut T) -> Result<FileReport, ConfigError>
    where
        T: JsonMerge + Clone,
    {
        let mut report = FileReport::default();

        let default = match self.load_file(target, &self.default_file) {
            Ok(load) => load,
            Err(ConfigError::NotFound(path)) => FileLoad {
                path,
                status: FileStatus::Missing,
            },
            Err(e) => return Err(e),
        };
        report.files.push(default);

        let environment = match self.load_file(target, &self.environment) {
            Ok(load) => load,
            Err(ConfigError::NotFound(path)) => FileLoad {
                path,
                status: FileStatus::Missing,
            },
            Err(ConfigError::Io { path, source }) => {
                warn!(
                    path = %path.display(),
                    error = %source,
                    "Failed to access environment config file, skipping"
                );
                FileLoad {
                    path,
                    status: FileStatus::Unreadable(source.kind()),
                }
            }
            Err(e) => return Err(e),
        };
        report.files.push(environment);

        Ok(report)
    }

    /// Overwrite bound fields from environment variables.
    ///
    /// Never fails; coercion problems are logged and listed in the report.
    pub fn parse_env<T: EnvOverlay + ?Sized>(&self, target: &mut T) -> OverlayReport {
        let env = self.layered_env();
        let report = OverlayWalker::new(&env).run(target);
        debug!(
            applied = report.applied.len(),
            failed = report.failures.len(),
            "Applied environment overlay"
        );
        report
    }

    /// Run the full pipeline: files first, then environment variables.
    pub fn unmarshal<T>(&self, target: &mut T) -> Result<LoadReport, ConfigError>
    where
        T: JsonMerge + EnvOverlay + Clone,
    {
        let files = self.parse_file(target)?;
        let overlay = self.parse_env(target);
        Ok(LoadReport { files, overlay })
    }
}
