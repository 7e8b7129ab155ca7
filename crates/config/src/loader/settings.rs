//! Named access to the loader's own settings.
//!
//! Keys follow the exported field names `Env`, `Folder`, `FileType` and
//! `DefaultFile`; the first letter may be lower case (`env`, `fileType`).

use std::fmt;
use std::str::FromStr;

/// One of the loader settings reachable through `set_default` / `get_default`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SettingKey {
    /// Active environment name.
    Env,
    /// Folder the config files live in.
    Folder,
    /// Extension appended to base names, e.g. `.json`.
    FileType,
    /// Base name of the file loaded first.
    DefaultFile,
}

impl SettingKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Env => "Env",
            Self::Folder => "Folder",
            Self::FileType => "FileType",
            Self::DefaultFile => "DefaultFile",
        }
    }
}

impl fmt::Display for SettingKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned for keys that name no setting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownSettingKey(pub String);

impl FromStr for SettingKey {
    type Err = UnknownSettingKey;

    fn from_str(key: &str) -> Result<Self, Self::Err> {
        let mut chars = key.chars();
        let titled: String = match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        };

        match titled.as_str() {
            "Env" => Ok(Self::Env),
            "Folder" => Ok(Self::Folder),
            "FileType" => Ok(Self::FileType),
            "DefaultFile" => Ok(Self::DefaultFile),
            _ => Err(UnknownSettingKey(key.to_string())),
        }
    }
}
