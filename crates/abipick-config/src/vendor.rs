/// Library file name without its `lib` prefix and `.so` suffix.
pub fn library_base(name: &str) -> &str {
    let name = name.strip_prefix("lib").unwrap_or(name);
    name.strip_suffix(".so").unwrap_or(name)
}

/// Reduce a library file name to its vendor stem.
///
/// Strips a leading `lib`, a trailing `.so`, then any trailing run of ASCII
/// digits, `-`, `_` and `.`, so `libfoo-1.2.3.so` and `libfoo-9.so` both
/// become `foo`. Bare stems pass through with only the version run removed.
pub fn vendor_stem(name: &str) -> &str {
    library_base(name)
        .trim_end_matches(|c: char| c.is_ascii_digit() || matches!(c, '-' | '_' | '.'))
}

/// Recognizes third-party vendor libraries by stem.
///
/// Vendor entries lose only a `lib` prefix and `.so` suffix; digits that are
/// part of the vendor name (`x264`) are kept.
#[derive(Debug, Clone, Default)]
pub struct ThirdPartyMatcher {
    stems: Vec<String>,
}

impl ThirdPartyMatcher {
    pub fn new<S: AsRef<str>>(entries: &[S]) -> Self {
        let stems = entries
            .iter()
            .map(|e| library_base(e.as_ref().trim()))
            .filter(|s| !s.is_empty())
            .map(str::to_owned)
            .collect();
        Self { stems }
    }

    /// True when the library's base name, or its base name without the
    /// version run, equals a vendor entry. ASCII case folding only; other
    /// bytes must match exactly.
    pub fn is_third_party(&self, lib_name: &str) -> bool {
        let base = library_base(lib_name);
        let stem = vendor_stem(lib_name);
        self.stems.iter().any(|s| {
            (!base.is_empty() && s.eq_ignore_ascii_case(base))
                || (!stem.is_empty() && s.eq_ignore_ascii_case(stem))
        })
    }

    pub fn stems(&self) -> &[String] {
        &self.stems
    }

    pub fn is_empty(&self) -> bool {
        self.stems.is_empty()
    }
}
