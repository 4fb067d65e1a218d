//! Vendor configuration for abipick.
//!
//! Three plain-text lists steer the selector: an allow list and a deny list of
//! package-name globs, and a list of third-party vendor library stems. They live
//! at fixed vendor locations (overridable through a TOML file, see
//! `ConfigPaths`) and are loaded lazily, once, by `ConfigStore`.

pub mod paths;
pub mod patterns;
pub mod store;
pub mod vendor;

pub use paths::ConfigPaths;
pub use patterns::{load_pattern_list, PatternSet};
pub use store::ConfigStore;
pub use vendor::{library_base, vendor_stem, ThirdPartyMatcher};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid config file: {0}")]
    Toml(#[from] toml::de::Error),
}
