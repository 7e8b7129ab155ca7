//! Basic tests for loader construction and named settings.
//!
//! Responsibilities:
//! - Test constructor defaults and builder overrides.
//! - Test `set_default` / `get_default` including unknown keys.

use crate::loader::builder::ConfigLoader;
use serial_test::serial;
use std::path::Path;

use super::{env_lock, env_map};

#[test]
#[serial]
fn test_new_uses_working_directory_and_defaults() {
    let _lock = env_lock().lock().unwrap();
    temp_env::with_vars(
        [("ENV", None::<&str>), ("APP_ENV", None::<&str>)],
        || {
            let loader = ConfigLoader::new().unwrap();
            assert_eq!(loader.folder(), std::env::current_dir().unwrap());
            assert_eq!(loader.environment(), "development");
            assert_eq!(loader.file_extension(), ".json");
            assert_eq!(loader.default_file(), "default");
        },
    );
}

#[test]
fn test_env_source_resolves_environment() {
    let loader = ConfigLoader::from_folder("/etc/app")
        .with_env_source(env_map(&[("ENV", "production")]));
    assert_eq!(loader.environment(), "production");

    let loader = ConfigLoader::from_folder("/etc/app")
        .with_environment("staging")
        .with_env_source(env_map(&[("ENV", "production")]));
    assert_eq!(loader.environment(), "staging", "explicit name stays pinned");
}

#[test]
fn test_file_path_joins_folder_base_and_extension() {
    let loader = ConfigLoader::from_folder("/etc/app").with_file_extension(".conf.json");
    assert_eq!(
        loader.file_path("production"),
        Path::new("/etc/app/production.conf.json")
    );
}

#[test]
fn test_set_and_get_defaults_by_name() {
    let mut loader =
        ConfigLoader::from_folder("/etc/app").with_env_source(env_map(&[]));

    loader.set_default("env", "test");
    loader.set_default("Folder", "/srv/config");
    loader.set_default("fileType", ".cfg");
    loader.set_default("defaultFile", "base");

    assert_eq!(loader.get_default("Env"), "test");
    assert_eq!(loader.get_default("folder"), "/srv/config");
    assert_eq!(loader.get_default("FileType"), ".cfg");
    assert_eq!(loader.get_default("DefaultFile"), "base");
    assert_eq!(loader.environment(), "test");
    assert_eq!(loader.file_path("base"), Path::new("/srv/config/base.cfg"));
}

#[test]
fn test_unknown_setting_keys() {
    let mut loader =
        ConfigLoader::from_folder("/etc/app").with_env_source(env_map(&[]));

    loader.set_default("rootFolder", "/elsewhere");
    loader.set_default("", "x");

    assert_eq!(loader.get_default("rootFolder"), "");
    assert_eq!(loader.get_default("filetype"), "");
    assert_eq!(loader.folder(), Path::new("/etc/app"));
    assert_eq!(loader.environment(), "development");
}

#[test]
fn test_env_setting_survives_env_source_change() {
    let mut loader = ConfigLoader::from_folder("/etc/app");
    loader.set_default("env", "qa");

    let loader = loader.with_env_source(env_map(&[("ENV", "production")]));

    assert_eq!(loader.environment(), "qa");
}

#[test]
fn test_debug_does_not_print_dotenv_values() {
    let loader = ConfigLoader::from_folder("/etc/app").with_env_source(env_map(&[]));
    let debug = format!("{:?}", loader);
    assert!(debug.contains("ConfigLoader"));
    assert!(debug.contains("dotenv_vars: 0"));
}
