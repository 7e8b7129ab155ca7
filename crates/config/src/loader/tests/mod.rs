//! Tests for the configuration loader.
//!
//! Responsibilities:
//! - Test loader construction and named settings.
//! - Test file layering between the default and environment files.
//! - Test environment variable overlay and its precedence over files.
//! - Test `.env` loading.
//!
//! Does NOT handle:
//! - Coercion rules for individual types (tested in overlay/value.rs).
//! - JSON merge details (tested in file.rs).
//!
//! Invariants:
//! - Tests use `serial_test` to prevent environment variable pollution.
//! - Tests use `global_test_lock()` for additional synchronization.
//! - Temporary directories are cleaned up automatically via `tempfile`.

use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::sync::Mutex;

use crate::config_table;

pub mod basic_tests;

/// Returns the global test lock for environment variable isolation.
pub fn env_lock() -> &'static Mutex<()> {
    crate::test_util::global_test_lock()
}

/// Write `<base>.json` into `dir`.
pub fn write_json(dir: &Path, base: &str, contents: &str) {
    fs::write(dir.join(format!("{}.json", base)), contents).unwrap();
}

/// Build an in-memory environment from pairs.
pub fn env_map(pairs: &[(&str, &str)]) -> HashMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct ObjConfig {
    pub bval: bool,
    pub ival: isize,
    pub i32: i32,
    pub i64: i64,
    pub str: String,
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct SectionConfig {
    pub bval: bool,
    pub ival: isize,
    pub i32: i32,
    pub i64: i64,
    pub f32: f32,
    pub f64: f64,
    pub str: String,
    pub obj: ObjConfig,
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct TestConfig {
    pub str: String,
    pub section: SectionConfig,
    pub file_only: String,
}

config_table!(ObjConfig {
    bval: "bval" => "OBJ_BVAL",
    ival: "ival" => "OBJ_IVAL",
    i32: "i32" => "OBJ_I32",
    i64: "i64" => "OBJ_I64",
    str: "str" => "OBJ_STR",
});

config_table!(SectionConfig {
    bval: "bval" => "BVAL",
    ival: "ival" => "IVAL",
    i32: "i32" => "I32",
    i64: "i64" => "I64",
    f32: "f32" => "F32",
    f64: "f64" => "F64",
    str: "str" => "SECTION_STR",
    obj: "obj" => nested,
});

config_table!(TestConfig {
    str: "str" => "STR",
    section: "section" => nested,
    file_only: "fileOnly" => none,
});
