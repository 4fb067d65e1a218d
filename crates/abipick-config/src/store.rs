use crate::paths::ConfigPaths;
use crate::patterns::{load_pattern_list, PatternSet};
use crate::vendor::ThirdPartyMatcher;
use std::path::Path;
use std::sync::OnceLock;
use tracing::{debug, info, warn};

/// Process-wide vendor configuration.
///
/// Each list is read from disk on first use and kept for the life of the
/// store. Concurrent first use loads a list exactly once.
#[derive(Debug, Default)]
pub struct ConfigStore {
    paths: ConfigPaths,
    allow: OnceLock<PatternSet>,
    deny: OnceLock<PatternSet>,
    third_party: OnceLock<ThirdPartyMatcher>,
}

impl ConfigStore {
    pub fn new(paths: ConfigPaths) -> Self {
        Self {
            paths,
            allow: OnceLock::new(),
            deny: OnceLock::new(),
            third_party: OnceLock::new(),
        }
    }

    /// A store whose lists are already known; nothing is read from disk.
    pub fn from_lists(allow: Vec<String>, deny: Vec<String>, third_party: Vec<String>) -> Self {
        Self {
            paths: ConfigPaths::default(),
            allow: OnceLock::from(PatternSet::new(allow)),
            deny: OnceLock::from(PatternSet::new(deny)),
            third_party: OnceLock::from(ThirdPartyMatcher::new(&third_party)),
        }
    }

    pub fn paths(&self) -> &ConfigPaths {
        &self.paths
    }

    pub fn allow_list(&self) -> &PatternSet {
        self.allow
            .get_or_init(|| PatternSet::new(read_list("allow", &self.paths.allow_list)))
    }

    pub fn deny_list(&self) -> &PatternSet {
        self.deny
            .get_or_init(|| PatternSet::new(read_list("deny", &self.paths.deny_list)))
    }

    pub fn third_party(&self) -> &ThirdPartyMatcher {
        self.third_party.get_or_init(|| {
            ThirdPartyMatcher::new(&read_list("third-party", &self.paths.third_party_list))
        })
    }

    pub fn is_allowed(&self, package: &str) -> bool {
        let found = self.allow_list().is_match(package);
        if found {
            info!("found {package} in allow list");
        }
        found
    }

    pub fn is_denied(&self, package: &str) -> bool {
        let found = self.deny_list().is_match(package);
        if found {
            info!("found {package} in deny list");
        }
        found
    }

    pub fn is_third_party(&self, lib_name: &str) -> bool {
        self.third_party().is_third_party(lib_name)
    }
}

fn read_list(kind: &str, path: &Path) -> Vec<String> {
    match load_pattern_list(path) {
        Ok(list) => {
            debug!("loaded {} {kind} entries from {}", list.len(), path.display());
            list
        }
        Err(e) => {
            warn!("failed to read {kind} list {}: {e}", path.display());
            Vec::new()
        }
    }
}
