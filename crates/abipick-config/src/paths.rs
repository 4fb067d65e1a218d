use crate::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_ALLOW_LIST: &str = "/vendor/etc/misc/.OEMWhiteList";
pub const DEFAULT_DENY_LIST: &str = "/vendor/etc/misc/.OEMBlackList";
pub const DEFAULT_THIRD_PARTY_LIST: &str = "/vendor/etc/misc/.ThirdPartySO";

/// Locations of the three vendor lists.
///
/// Every field falls back to the fixed vendor location, so a TOML file only
/// needs to name the lists it moves.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfigPaths {
    pub allow_list: PathBuf,
    pub deny_list: PathBuf,
    pub third_party_list: PathBuf,
}

impl Default for ConfigPaths {
    fn default() -> Self {
        Self {
            allow_list: PathBuf::from(DEFAULT_ALLOW_LIST),
            deny_list: PathBuf::from(DEFAULT_DENY_LIST),
            third_party_list: PathBuf::from(DEFAULT_THIRD_PARTY_LIST),
        }
    }
}

impl ConfigPaths {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// All three lists under one directory, with their usual file names.
    pub fn in_dir(dir: &Path) -> Self {
        Self {
            allow_list: dir.join(".OEMWhiteList"),
            deny_list: dir.join(".OEMBlackList"),
            third_party_list: dir.join(".ThirdPartySO"),
        }
    }
}
