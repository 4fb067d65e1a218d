pub mod completions;
pub mod config;
pub mod inventory;
pub mod pick;

use abipick_config::{ConfigPaths, ConfigStore};
use abipick_core::{AbiPicker, ScanSummary, ZipArchiveReader};
use std::path::Path;
use tracing::warn;

pub const EXIT_SUCCESS: u8 = 0;
pub const EXIT_FAILURE: u8 = 1;
pub const EXIT_CONFIG_ERROR: u8 = 2;
pub const EXIT_ARCHIVE_ERROR: u8 = 3;

pub fn json_pretty(value: &impl serde::Serialize) -> Result<String, String> {
    serde_json::to_string_pretty(value).map_err(|e| format!("JSON serialization failed: {e}"))
}

pub fn load_config(path: Option<&Path>) -> Result<ConfigStore, String> {
    let paths = match path {
        Some(p) => ConfigPaths::load(p).map_err(|e| format!("config error: {e}"))?,
        None => ConfigPaths::default(),
    };
    Ok(ConfigStore::new(paths))
}

/// Open `package` and scan it into `picker`.
///
/// A failure part way through is logged and the partial inventory kept;
/// only a package that cannot be opened at all is an error.
pub fn scan_package(
    picker: &mut AbiPicker<'_>,
    package: &Path,
) -> Result<Option<ScanSummary>, String> {
    let mut reader = ZipArchiveReader::open(package)
        .map_err(|e| format!("archive error: {}: {e}", package.display()))?;
    match picker.build_native_lib_list(&mut reader) {
        Ok(summary) => Ok(Some(summary)),
        Err(e) => {
            warn!("scan of {} stopped early: {e}", package.display());
            Ok(None)
        }
    }
}
