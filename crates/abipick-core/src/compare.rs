//! Library-set comparison between an ARM build and an x86 build.
//!
//! The reference is the ARM folder that binary translation would run; the
//! candidate is the x86 folder of the same bit width. The candidate wins when
//! it looks like an equivalent (or more specific) build of the same app.

use abipick_config::{library_base, ConfigStore};
use abipick_schema::{AbiInventory, AbiName};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Name fragments that mark a library as written for x86 hardware.
pub const RELIABILITY_KEYWORDS: [&str; 4] = ["intel", "atom", "x86", "x64"];

/// Which rule settled a comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Decision {
    NoReference,
    CandidateEmpty,
    ReliableCandidate,
    LibrariesMatch,
    ThirdPartyMismatch,
    CandidateAddsLibraries,
    ReferenceKept,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Verdict {
    pub winner: AbiName,
    pub candidate_won: bool,
    pub decision: Decision,
}

pub struct Comparator<'c> {
    config: &'c ConfigStore,
}

impl<'c> Comparator<'c> {
    pub fn new(config: &'c ConfigStore) -> Self {
        Self { config }
    }

    /// Decide between `reference` and `candidate`; `fallback` wins when
    /// neither has usable libraries. `None` or an invalid (empty or mixed)
    /// inventory counts as absent.
    pub fn compare(
        &self,
        reference: Option<&AbiInventory>,
        candidate: Option<&AbiInventory>,
        fallback: &AbiName,
    ) -> Verdict {
        let reference = reference.filter(|inv| inv.is_valid());
        let candidate = candidate.filter(|inv| inv.is_valid());

        let verdict = match (reference, candidate) {
            (None, Some(cand)) => won(cand, Decision::NoReference),
            (None, None) => Verdict {
                winner: fallback.clone(),
                candidate_won: false,
                decision: Decision::NoReference,
            },
            (Some(refr), None) => lost(refr, Decision::CandidateEmpty),
            (Some(refr), Some(cand)) => self.compare_libraries(refr, cand),
        };

        debug!(
            "{} vs. {}, return {} ({:?})",
            candidate.map_or("none", |c| c.abi.as_str()),
            reference.map_or("none", |r| r.abi.as_str()),
            verdict.winner,
            verdict.decision
        );
        verdict
    }

    fn compare_libraries(&self, reference: &AbiInventory, candidate: &AbiInventory) -> Verdict {
        if has_reliability_hint(candidate.libs()) {
            return won(candidate, Decision::ReliableCandidate);
        }

        if libs_match(reference.libs(), candidate.libs()) {
            return won(candidate, Decision::LibrariesMatch);
        }

        let third_party = self.config.third_party();
        let (ref_vendor, ref_other): (Vec<&String>, Vec<&String>) = reference
            .libs()
            .iter()
            .partition(|lib| third_party.is_third_party(lib));
        let (cand_vendor, cand_other): (Vec<&String>, Vec<&String>) = candidate
            .libs()
            .iter()
            .partition(|lib| third_party.is_third_party(lib));

        if !libs_match(&ref_vendor, &cand_vendor) {
            return lost(reference, Decision::ThirdPartyMismatch);
        }

        // Same vendor SDKs, and the x86 build adds its own code where the ARM
        // build has none.
        if ref_other.is_empty() && !cand_other.is_empty() {
            return won(candidate, Decision::CandidateAddsLibraries);
        }

        lost(reference, Decision::ReferenceKept)
    }
}

fn won(candidate: &AbiInventory, decision: Decision) -> Verdict {
    Verdict {
        winner: candidate.abi.clone(),
        candidate_won: true,
        decision,
    }
}

fn lost(reference: &AbiInventory, decision: Decision) -> Verdict {
    Verdict {
        winner: reference.abi.clone(),
        candidate_won: false,
        decision,
    }
}

/// True when every reference library claims a distinct candidate library of
/// the same length that is equal under ASCII case folding. Entry order does
/// not matter and the candidate may carry extra libraries.
pub fn libs_match<A: AsRef<str>, B: AsRef<str>>(reference: &[A], candidate: &[B]) -> bool {
    if candidate.len() < reference.len() {
        return false;
    }

    let mut claimed = vec![false; candidate.len()];
    for want in reference {
        let want = want.as_ref();
        let found = (0..candidate.len()).find(|&i| {
            let have = candidate[i].as_ref();
            !claimed[i] && have.len() == want.len() && have.eq_ignore_ascii_case(want)
        });
        match found {
            Some(i) => claimed[i] = true,
            None => return false,
        }
    }
    true
}

/// True when some library name carries one of the `RELIABILITY_KEYWORDS` as
/// a word: no ASCII letter directly before or after it.
pub fn has_reliability_hint<S: AsRef<str>>(libs: &[S]) -> bool {
    libs.iter().any(|lib| {
        let base = library_base(lib.as_ref()).to_ascii_lowercase();
        RELIABILITY_KEYWORDS.iter().any(|kw| contains_word(&base, kw))
    })
}

fn contains_word(haystack: &str, word: &str) -> bool {
    haystack.match_indices(word).any(|(start, _)| {
        let end = start + word.len();
        let before = haystack.as_bytes()[..start].last();
        let after = haystack.as_bytes().get(end);
        !before.is_some_and(u8::is_ascii_alphabetic)
            && !after.is_some_and(u8::is_ascii_alphabetic)
    })
}
