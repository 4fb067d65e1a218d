use crate::ConfigError;
use globset::{Glob, GlobSet, GlobSetBuilder};
use std::io::ErrorKind;
use std::path::Path;
use tracing::{debug, warn};

/// Read a line-oriented list: one entry per line, surrounding whitespace
/// trimmed, blank lines and `#` comments dropped.
///
/// A missing file is an empty list, not an error.
pub fn load_pattern_list(path: &Path) -> Result<Vec<String>, ConfigError> {
    let content = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            debug!("pattern list {} not present", path.display());
            return Ok(Vec::new());
        }
        Err(e) => return Err(e.into()),
    };
    Ok(parse_pattern_list(&content))
}

pub fn parse_pattern_list(content: &str) -> Vec<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty() && !l.starts_with('#'))
        .map(str::to_owned)
        .collect()
}

/// Package-name globs from an allow or deny list.
///
/// An entry that is not a valid glob is kept as an exact name.
#[derive(Debug, Clone)]
pub struct PatternSet {
    patterns: Vec<String>,
    globs: GlobSet,
    literals: Vec<String>,
}

impl PatternSet {
    pub fn new(patterns: Vec<String>) -> Self {
        let mut builder = GlobSetBuilder::new();
        let mut literals = Vec::new();
        for p in &patterns {
            match Glob::new(p) {
                Ok(glob) => {
                    builder.add(glob);
                }
                Err(e) => {
                    warn!("invalid glob '{p}', matching it literally: {e}");
                    literals.push(p.clone());
                }
            }
        }
        let globs = match builder.build() {
            Ok(set) => set,
            Err(e) => {
                warn!("failed to compile pattern set, matching all entries literally: {e}");
                literals.clone_from(&patterns);
                GlobSet::empty()
            }
        };
        Self {
            patterns,
            globs,
            literals,
        }
    }

    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    pub fn is_match(&self, package: &str) -> bool {
        if package.is_empty() {
            return false;
        }
        self.literals.iter().any(|l| l == package) || self.globs.is_match(package)
    }

    pub fn patterns(&self) -> &[String] {
        &self.patterns
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}
