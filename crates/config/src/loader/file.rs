//! Layered JSON file loading.
//!
//! Responsibilities:
//! - Read `<folder>/<base><ext>` and merge its JSON object into the target.
//! - Classify missing files distinctly from hard filesystem errors.
//! - Record what happened to each file in a `FileReport`.
//!
//! Does NOT handle:
//! - Environment variable overrides (see `overlay`).
//! - Choosing base names or the folder (see `builder.rs`).
//! - Mapping JSON keys to fields (see `config_table!`).
//!
//! Invariants:
//! - Objects merge recursively; keys absent from the file keep their value.
//! - A JSON `null` never clears an existing value.
//! - Unreadable or malformed files leave the target exactly as it was.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde_json::Value;
use serde_json::error::Category;
use tracing::{debug, trace, warn};

use super::error::ConfigError;
use crate::table::{JsonMerge, not_an_object};

/// What happened to a single candidate file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileStatus {
    /// The file was decoded and merged into the target.
    Applied,
    /// No file exists at the path.
    Missing,
    /// The file exists but could not be read.
    Unreadable(ErrorKind),
    /// The file was read but is not valid JSON for the target type.
    Malformed {
        /// Dotted JSON key that failed to decode, if the document parsed.
        field: Option<String>,
        category: Category,
    },
}

/// A candidate file and its outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileLoad {
    pub path: PathBuf,
    pub status: FileStatus,
}

impl FileLoad {
    pub fn is_applied(&self) -> bool {
        self.status == FileStatus::Applied
    }
}

/// Outcomes of one `parse_file` pass, in load order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileReport {
    pub files: Vec<FileLoad>,
}

impl FileReport {
    /// Paths that were merged into the target, in load order.
    pub fn applied(&self) -> impl Iterator<Item = &Path> {
        self.files
            .iter()
            .filter(|load| load.is_applied())
            .map(|load| load.path.as_path())
    }
}

/// Load one config file into `target`.
///
/// Returns `ConfigError::NotFound` when nothing exists at `path` and
/// `ConfigError::Io` when the path cannot even be inspected. Read and
/// decode failures are tolerated and reported through the returned status.
pub(crate) fn load_path<T>(target: &mut T, path: &Path) -> Result<FileLoad, ConfigError>
where
    T: JsonMerge + Clone,
{
    if let Err(source) = std::fs::metadata(path) {
        if source.kind() == ErrorKind::NotFound {
            trace!(path = %path.display(), "Config file not present");
            return Err(ConfigError::NotFound(path.to_path_buf()));
        }
        return Err(ConfigError::Io {
            path: path.to_path_buf(),
            source,
        });
    }

    let status = match std::fs::read(path) {
        Err(e) => {
            warn!(path = %path.display(), error = %e, "Failed to read config file, skipping");
            FileStatus::Unreadable(e.kind())
        }
        Ok(bytes) => match merge_json_into(target, &bytes) {
            Ok(()) => {
                debug!(path = %path.display(), "Loaded config file");
                FileStatus::Applied
            }
            Err(status) => {
                warn!(path = %path.display(), status = ?status, "Failed to parse config file, skipping");
                status
            }
        },
    };

    Ok(FileLoad {
        path: path.to_path_buf(),
        status,
    })
}

/// Decode `bytes` as a JSON object and merge its keys into `target`.
///
/// The keys are decoded into a clone that replaces `target` only once every
/// key has succeeded, so a failure leaves `target` untouched.
pub(crate) fn merge_json_into<T>(target: &mut T, bytes: &[u8]) -> Result<(), FileStatus>
where
    T: JsonMerge + Clone,
{
    let document: Value = serde_json::from_slice(bytes).map_err(|e| FileStatus::Malformed {
        field: None,
        category: e.classify(),
    })?;
    let object = match document {
        Value::Object(object) => object,
        other => {
            return Err(FileStatus::Malformed {
                field: None,
                category: not_an_object(&other).classify(),
            });
        }
    };

    let mut merged = target.clone();
    merged
        .merge_json(&object)
        .map_err(|e| FileStatus::Malformed {
            field: Some(e.field().to_string()),
            category: e.category(),
        })?;
    *target = merged;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config_table;
    use std::fs;
    use tempfile::TempDir;

    #[derive(Debug, Default, Clone, PartialEq)]
    struct Inner {
        ival: i32,
        str: String,
    }

    #[derive(Debug, Default, Clone, PartialEq)]
    struct Target {
        str: String,
        max_items: u32,
        tags: Vec<String>,
        obj: Inner,
        timeout: Option<u64>,
        max_latency: f64,
        runtime_token: String,
    }

    config_table!(Inner {
        ival: "ival" => none,
        str: "str" => none,
    });

    config_table!(Target {
        str: "str" => none,
        max_items: "maxItems" => none,
        tags: "tags" => none,
        obj: "obj" => nested,
        timeout: "timeout" => none,
        max_latency: "maxLatency" => none,
    });

    #[test]
    fn test_merge_keeps_unmentioned_fields() {
        let mut target = Target {
            str: "keep".to_string(),
            max_items: 3,
            obj: Inner {
                ival: 1,
                str: "inner".to_string(),
            },
            ..Target::default()
        };

        merge_json_into(&mut target, br#"{"maxItems": 9, "obj": {"ival": 2}}"#).unwrap();

        assert_eq!(target.str, "keep");
        assert_eq!(target.max_items, 9);
        assert_eq!(target.obj.ival, 2);
        assert_eq!(target.obj.str, "inner");
    }

    #[test]
    fn test_arrays_replace_and_null_is_ignored() {
        let mut target = Target {
            tags: vec!["a".to_string(), "b".to_string()],
            timeout: Some(5),
            ..Target::default()
        };

        merge_json_into(&mut target, br#"{"tags": ["c"], "timeout": null, "str": null}"#)
            .unwrap();

        assert_eq!(target.tags, ["c"]);
        assert_eq!(target.timeout, Some(5));
        assert_eq!(target.str, "");
    }

    #[test]
    fn test_unknown_keys_are_ignored() {
        let mut target = Target::default();
        merge_json_into(&mut target, br#"{"unknown": {"deep": true}, "str": "x"}"#).unwrap();
        assert_eq!(target.str, "x");
    }

    #[test]
    fn test_type_mismatch_leaves_target_untouched() {
        let mut target = Target {
            str: "before".to_string(),
            ..Target::default()
        };

        let result = merge_json_into(&mut target, br#"{"str": "after", "maxItems": "many"}"#);

        assert_eq!(
            result,
            Err(FileStatus::Malformed {
                field: Some("maxItems".to_string()),
                category: Category::Data,
            })
        );
        assert_eq!(target.str, "before");
    }

    #[test]
    fn test_field_outside_the_table_survives_a_file_load() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("default.json");
        fs::write(&path, r#"{"str": "from-file"}"#).unwrap();
        let mut target = Target {
            runtime_token: "keep-me".to_string(),
            ..Target::default()
        };

        let load = load_path(&mut target, &path).unwrap();

        assert!(load.is_applied());
        assert_eq!(target.str, "from-file");
        assert_eq!(target.runtime_token, "keep-me");
    }

    #[test]
    fn test_non_finite_default_does_not_block_a_file_load() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("default.json");
        fs::write(&path, r#"{"str": "from-file"}"#).unwrap();
        let mut target = Target {
            max_latency: f64::INFINITY,
            ..Target::default()
        };

        let load = load_path(&mut target, &path).unwrap();

        assert_eq!(load.status, FileStatus::Applied);
        assert_eq!(target.str, "from-file");
        assert_eq!(target.max_latency, f64::INFINITY);
    }

    #[test]
    fn test_top_level_must_be_an_object() {
        let mut target = Target::default();

        let result = merge_json_into(&mut target, b"[1, 2]");

        assert_eq!(
            result,
            Err(FileStatus::Malformed {
                field: None,
                category: Category::Data,
            })
        );
    }

    #[test]
    fn test_load_path_reports_each_outcome() {
        let temp_dir = TempDir::new().unwrap();
        let good = temp_dir.path().join("good.json");
        let bad = temp_dir.path().join("bad.json");
        fs::write(&good, r#"{"str": "good"}"#).unwrap();
        fs::write(&bad, "{ not json").unwrap();
        let mut target = Target::default();

        let applied = load_path(&mut target, &good).unwrap();
        let malformed = load_path(&mut target, &bad).unwrap();
        let missing = load_path(&mut target, &temp_dir.path().join("absent.json"));

        assert!(applied.is_applied());
        assert!(matches!(
            malformed.status,
            FileStatus::Malformed {
                field: None,
                category: Category::Syntax
            }
        ));
        assert!(matches!(missing, Err(ConfigError::NotFound(_))));
        assert_eq!(target.str, "good");
    }

    #[test]
    fn test_truncated_file_is_classified_as_eof() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("cut.json");
        fs::write(&path, r#"{"str": "x", "#).unwrap();
        let mut target = Target::default();

        let load = load_path(&mut target, &path).unwrap();

        assert!(matches!(
            load.status,
            FileStatus::Malformed {
                category: Category::Eof,
                ..
            }
        ));
    }

    #[test]
    fn test_directory_in_place_of_file_is_unreadable() {
        let temp_dir = TempDir::new().unwrap();
        let dir_path = temp_dir.path().join("default.json");
        fs::create_dir(&dir_path).unwrap();
        let mut target = Target::default();

        let load = load_path(&mut target, &dir_path).unwrap();

        assert!(matches!(load.status, FileStatus::Unreadable(_)));
        assert_eq!(target, Target::default());
    }
}
