use crate::archive::ArchiveReader;
use crate::compare::Comparator;
use crate::scan::{scan_archive, ScanSummary};
use crate::PickError;
use abipick_config::ConfigStore;
use abipick_schema::{AbiInventory, AbiName, ARM64_V8A, ARMEABI, ARMEABI_V7A, X86, X86_64};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Outcome of a selection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AbiChoice {
    /// The winning ABI and its position in the caller's list.
    Resolved { index: usize, abi: AbiName },
    /// No correction possible; the caller's preferred index is returned as is.
    Unchanged { index: usize },
}

impl AbiChoice {
    pub fn index(&self) -> usize {
        match self {
            Self::Resolved { index, .. } | Self::Unchanged { index } => *index,
        }
    }

    pub fn abi(&self) -> Option<&AbiName> {
        match self {
            Self::Resolved { abi, .. } => Some(abi),
            Self::Unchanged { .. } => None,
        }
    }
}

/// Install-time ABI decision for one package.
///
/// Holds one inventory per ABI the caller supports, in the caller's order;
/// that order is the index space of every answer.
pub struct AbiPicker<'c> {
    package: String,
    inventories: Vec<AbiInventory>,
    config: &'c ConfigStore,
}

impl<'c> AbiPicker<'c> {
    pub fn new<S: AsRef<str>>(
        package: &str,
        abi_list: &[S],
        config: &'c ConfigStore,
    ) -> Result<Self, PickError> {
        let inventories = abi_list
            .iter()
            .map(|name| AbiName::new(name.as_ref()).map(AbiInventory::new))
            .collect::<Result<Vec<_>, _>>()?;
        debug!("picker for {package} tracking {} ABIs", inventories.len());
        Ok(Self {
            package: package.to_owned(),
            inventories,
            config,
        })
    }

    pub fn package(&self) -> &str {
        &self.package
    }

    pub fn inventories(&self) -> &[AbiInventory] {
        &self.inventories
    }

    pub fn inventory(&self, abi: &str) -> Option<&AbiInventory> {
        self.inventories.iter().find(|inv| inv.abi == abi)
    }

    pub fn abi_name(&self, index: usize) -> Option<&AbiName> {
        self.inventories.get(index).map(|inv| &inv.abi)
    }

    pub fn abi_index(&self, abi: &str) -> Option<usize> {
        self.inventories.iter().position(|inv| inv.abi == abi)
    }

    pub fn found_mixed_elf(&self, abi: &str) -> bool {
        self.inventory(abi).is_some_and(AbiInventory::is_mixed)
    }

    /// Fill the inventories from the package's `lib/` entries.
    ///
    /// On error the libraries recorded before the failure are kept, so
    /// `select` still works on a partial scan.
    pub fn build_native_lib_list(
        &mut self,
        archive: &mut dyn ArchiveReader,
    ) -> Result<ScanSummary, PickError> {
        Ok(scan_archive(&mut self.inventories, archive)?)
    }

    /// Whether the package is on the vendor allow list.
    pub fn is_allow_listed(&self) -> bool {
        self.config.is_allowed(&self.package)
    }

    pub fn pickup_right_abi(&self, preferred: usize) -> usize {
        self.select(preferred).index()
    }

    pub fn select(&self, preferred: usize) -> AbiChoice {
        let Some(preferred_abi) = self.abi_name(preferred) else {
            return AbiChoice::Unchanged { index: preferred };
        };

        let valid = |abi: &str| self.inventory(abi).filter(|inv| inv.is_valid());
        let arm64 = valid(ARM64_V8A);
        let arm32 = valid(ARMEABI_V7A).or_else(|| valid(ARMEABI));
        let x86 = valid(X86);
        let x86_64 = valid(X86_64);
        debug!(
            "lib counts: arm64 {} arm32 {} x86 {} x86_64 {}",
            arm64.map_or(0, AbiInventory::lib_count),
            arm32.map_or(0, AbiInventory::lib_count),
            x86.map_or(0, AbiInventory::lib_count),
            x86_64.map_or(0, AbiInventory::lib_count),
        );

        // Deny-listed packages run their ARM build through translation even
        // when an x86 build exists.
        if self.config.is_denied(&self.package) {
            if let Some(arm) = arm32.or(arm64) {
                return self.resolve(preferred, &arm.abi);
            }
        }

        let comparator = Comparator::new(self.config);
        // Only an x86_64 preference starts at the 64-bit pair.
        let winner = if preferred_abi == X86_64 {
            let first = comparator.compare(arm64, x86_64, preferred_abi);
            if first.candidate_won {
                first.winner
            } else {
                comparator.compare(arm32, x86, &first.winner).winner
            }
        } else {
            comparator.compare(arm32, x86, preferred_abi).winner
        };

        self.resolve(preferred, &winner)
    }

    fn resolve(&self, preferred: usize, abi: &AbiName) -> AbiChoice {
        match self.abi_index(abi) {
            Some(index) => {
                info!("selected abi {abi}({index}) for {}", self.package);
                AbiChoice::Resolved {
                    index,
                    abi: abi.clone(),
                }
            }
            None => {
                info!(
                    "abi {abi} not in caller list, keeping index {preferred} for {}",
                    self.package
                );
                AbiChoice::Unchanged { index: preferred }
            }
        }
    }
}
