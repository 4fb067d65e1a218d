use crate::types::AbiName;
use serde::{Deserialize, Serialize};

/// Display form of a mixed inventory.
pub const MIXED_SENTINEL: &str = "/mixed/";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InventoryState {
    Libraries(Vec<String>),
    /// The folder held at least one binary for another architecture; its
    /// contents are discarded and it never takes part in comparisons.
    Mixed,
}

/// Native libraries found under one `lib/<abi>/` folder of a package.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbiInventory {
    pub abi: AbiName,
    pub state: InventoryState,
}

impl AbiInventory {
    pub fn new(abi: AbiName) -> Self {
        Self {
            abi,
            state: InventoryState::Libraries(Vec::new()),
        }
    }

    /// Record a library basename. Ignored once the inventory is mixed.
    pub fn push(&mut self, lib: impl Into<String>) {
        if let InventoryState::Libraries(libs) = &mut self.state {
            libs.push(lib.into());
        }
    }

    /// Discard everything recorded so far and flag the folder as mixed.
    pub fn mark_mixed(&mut self) {
        self.state = InventoryState::Mixed;
    }

    pub fn is_mixed(&self) -> bool {
        matches!(self.state, InventoryState::Mixed)
    }

    /// Library basenames; empty for a mixed inventory.
    pub fn libs(&self) -> &[String] {
        match &self.state {
            InventoryState::Libraries(libs) => libs,
            InventoryState::Mixed => &[],
        }
    }

    pub fn lib_count(&self) -> usize {
        self.libs().len()
    }

    /// Usable for comparison: at least one library and not mixed.
    pub fn is_valid(&self) -> bool {
        self.lib_count() > 0
    }

    /// Stable byte-wise ascending sort of the recorded basenames.
    pub fn sort(&mut self) {
        if let InventoryState::Libraries(libs) = &mut self.state {
            libs.sort();
        }
    }

    /// Entries as shown to users: the basenames, or the mixed sentinel.
    pub fn display_entries(&self) -> Vec<&str> {
        match &self.state {
            InventoryState::Libraries(libs) => libs.iter().map(String::as_str).collect(),
            InventoryState::Mixed => vec![MIXED_SENTINEL],
        }
    }
}
