//! Library inventory construction from package archives.
//!
//! Every entry under `lib/<abi>/` that decompresses to an ELF object is
//! recorded in the inventory of its ABI folder. The x86 folders are checked
//! for binaries of another architecture; one such binary marks the whole
//! folder as mixed.

use crate::archive::{ArchiveError, ArchiveReader, MAX_ENTRY_PATH_LEN};
use crate::elf::{is_mixed_lib, is_valid_elf};
use abipick_schema::{AbiInventory, AbiName};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

pub const LIB_PREFIX: &str = "lib/";

/// Counters for one scan.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanSummary {
    pub entries: usize,
    pub libraries: usize,
    pub non_elf: usize,
    pub invalid: usize,
    pub untracked: usize,
    pub mixed: Vec<AbiName>,
}

/// Split `lib/<abi>/<name>` into its ABI folder and library basename.
///
/// The folder is everything between `lib/` and the last `/`. Returns `None`
/// for paths outside `lib/` and for degenerate shapes such as `lib/libfoo.so`,
/// `lib//libfoo.so` or a bare directory `lib/x86/`.
pub fn split_lib_path(path: &str) -> Option<(&str, &str)> {
    let rest = path.strip_prefix(LIB_PREFIX)?;
    let (abi, name) = rest.rsplit_once('/')?;
    if abi.is_empty() || name.is_empty() {
        return None;
    }
    Some((abi, name))
}

/// Populate `inventories` from `archive`.
///
/// Inventories are sorted afterwards even when the scan stops early, so a
/// partial result stays usable.
pub fn scan_archive(
    inventories: &mut [AbiInventory],
    archive: &mut dyn ArchiveReader,
) -> Result<ScanSummary, ArchiveError> {
    let mut summary = ScanSummary::default();
    let result = scan_entries(inventories, archive, &mut summary);
    for inv in inventories.iter_mut() {
        inv.sort();
    }
    result?;
    info!(
        "scanned {} entries: {} libraries, {} mixed folders",
        summary.entries,
        summary.libraries,
        summary.mixed.len()
    );
    Ok(summary)
}

fn scan_entries(
    inventories: &mut [AbiInventory],
    archive: &mut dyn ArchiveReader,
    summary: &mut ScanSummary,
) -> Result<(), ArchiveError> {
    for index in 0..archive.len() {
        let entry = archive.entry_info(index)?;
        summary.entries += 1;

        if !entry.path.starts_with(LIB_PREFIX) {
            continue;
        }
        if entry.path.len() > MAX_ENTRY_PATH_LEN {
            debug!("skip an over-long entry name ({} bytes)", entry.path.len());
            summary.invalid += 1;
            continue;
        }
        if entry.size == 0 {
            debug!("skip an empty file ({})", entry.path);
            continue;
        }

        let data = archive.read_entry(index)?;
        if !is_valid_elf(&data) {
            debug!("skip a non-ELF file ({})", entry.path);
            summary.non_elf += 1;
            continue;
        }

        let Some((abi, lib)) = split_lib_path(&entry.path) else {
            debug!("skip an invalid lib file ({})", entry.path);
            summary.invalid += 1;
            continue;
        };
        if AbiName::new(abi).is_err() {
            debug!("skip a lib file with an invalid ABI folder ({})", entry.path);
            summary.invalid += 1;
            continue;
        }

        let Some(inv) = inventories.iter_mut().find(|inv| inv.abi == abi) else {
            summary.untracked += 1;
            continue;
        };

        if inv.abi.is_x86_family() {
            if inv.is_mixed() {
                continue;
            }
            if is_mixed_lib(&inv.abi, &data) {
                debug!("found mixed lib {lib} in lib/{}/", inv.abi);
                summary.libraries -= inv.lib_count();
                inv.mark_mixed();
                summary.mixed.push(inv.abi.clone());
                continue;
            }
        }

        inv.push(lib);
        summary.libraries += 1;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::elf::{stub_elf, EM_386, EM_AARCH64, EM_ARM, EM_X86_64};
    use crate::memory::MemoryArchive;

    fn inventories(abis: &[&str]) -> Vec<AbiInventory> {
        abis.iter()
            .map(|a| AbiInventory::new(AbiName::new(*a).unwrap()))
            .collect()
    }

    fn find<'a>(invs: &'a [AbiInventory], abi: &str) -> &'a AbiInventory {
        invs.iter().find(|i| i.abi == abi).unwrap()
    }

    #[test]
    fn split_lib_path_shapes() {
        assert_eq!(split_lib_path("lib/x86/libfoo.so"), Some(("x86", "libfoo.so")));
        assert_eq!(split_lib_path("lib/x86/sub/libfoo.so"), Some(("x86/sub", "libfoo.so")));
        assert_eq!(split_lib_path("lib/libfoo.so"), None);
        assert_eq!(split_lib_path("lib//libfoo.so"), None);
        assert_eq!(split_lib_path("lib/x86/"), None);
        assert_eq!(split_lib_path("assets/lib/x86/libfoo.so"), None);
    }

    #[test]
    fn records_and_sorts_per_abi() {
        let mut invs = inventories(&["x86", "armeabi-v7a"]);
        let mut ar = MemoryArchive::new()
            .with_entry("lib/x86/libz.so", stub_elf(EM_386))
            .with_entry("lib/x86/liba.so", stub_elf(EM_386))
            .with_entry("lib/armeabi-v7a/liba.so", stub_elf(EM_ARM))
            .with_entry("classes.dex", b"dex\n035".to_vec());

        let summary = scan_archive(&mut invs, &mut ar).unwrap();
        assert_eq!(summary.entries, 4);
        assert_eq!(summary.libraries, 3);
        assert_eq!(find(&invs, "x86").libs(), ["liba.so", "libz.so"]);
        assert_eq!(find(&invs, "armeabi-v7a").libs(), ["liba.so"]);
    }

    #[test]
    fn skips_empty_non_elf_and_untracked() {
        let mut invs = inventories(&["x86"]);
        let mut ar = MemoryArchive::new()
            .with_entry("lib/x86/libempty.so", Vec::new())
            .with_entry("lib/x86/readme.txt", b"not a binary at all".to_vec())
            .with_entry("lib/mips/libfoo.so", stub_elf(8))
            .with_entry("lib/x86/libok.so", stub_elf(EM_386));

        let summary = scan_archive(&mut invs, &mut ar).unwrap();
        assert_eq!(summary.non_elf, 1);
        assert_eq!(summary.untracked, 1);
        assert_eq!(find(&invs, "x86").libs(), ["libok.so"]);
    }

    #[test]
    fn skips_degenerate_paths_and_long_abi_names() {
        let long_abi = format!("lib/{}/libfoo.so", "a".repeat(64));
        let mut invs = inventories(&["x86"]);
        let mut ar = MemoryArchive::new()
            .with_entry("lib/libfoo.so", stub_elf(EM_386))
            .with_entry("lib//libfoo.so", stub_elf(EM_386))
            .with_entry(&long_abi, stub_elf(EM_386));

        let summary = scan_archive(&mut invs, &mut ar).unwrap();
        assert_eq!(summary.invalid, 3);
        assert_eq!(find(&invs, "x86").lib_count(), 0);
    }

    #[test]
    fn skips_over_long_entry_paths() {
        let path = format!("lib/x86/{}.so", "n".repeat(MAX_ENTRY_PATH_LEN));
        let mut invs = inventories(&["x86"]);
        let mut ar = MemoryArchive::new().with_entry(&path, stub_elf(EM_386));

        let summary = scan_archive(&mut invs, &mut ar).unwrap();
        assert_eq!(summary.invalid, 1);
        assert_eq!(find(&invs, "x86").lib_count(), 0);
    }

    #[test]
    fn mismatched_machine_marks_folder_mixed() {
        let mut invs = inventories(&["x86_64", "arm64-v8a"]);
        let mut ar = MemoryArchive::new()
            .with_entry("lib/x86_64/libgood.so", stub_elf(EM_X86_64))
            .with_entry("lib/x86_64/libfoo.so", stub_elf(EM_AARCH64))
            .with_entry("lib/x86_64/liblater.so", stub_elf(EM_X86_64))
            .with_entry("lib/arm64-v8a/libfoo.so", stub_elf(EM_AARCH64));

        let summary = scan_archive(&mut invs, &mut ar).unwrap();
        let x86_64 = find(&invs, "x86_64");
        assert!(x86_64.is_mixed());
        assert_eq!(x86_64.lib_count(), 0);
        assert_eq!(summary.mixed.len(), 1);
        // libgood.so was recorded, then discarded with the folder.
        assert_eq!(summary.libraries, 1);
        assert_eq!(find(&invs, "arm64-v8a").libs(), ["libfoo.so"]);
    }

    #[test]
    fn x86_folder_rejects_x86_64_objects() {
        let mut invs = inventories(&["x86"]);
        let mut ar = MemoryArchive::new().with_entry("lib/x86/libfoo.so", stub_elf(EM_X86_64));
        scan_archive(&mut invs, &mut ar).unwrap();
        assert!(find(&invs, "x86").is_mixed());
    }

    #[test]
    fn arm_folders_are_not_checked_for_mixing() {
        let mut invs = inventories(&["armeabi-v7a"]);
        let mut ar =
            MemoryArchive::new().with_entry("lib/armeabi-v7a/libfoo.so", stub_elf(EM_386));
        scan_archive(&mut invs, &mut ar).unwrap();
        assert_eq!(find(&invs, "armeabi-v7a").libs(), ["libfoo.so"]);
    }

    #[test]
    fn read_failure_aborts_but_keeps_partial_sorted_inventory() {
        let mut invs = inventories(&["x86"]);
        let mut ar = MemoryArchive::new()
            .with_entry("lib/x86/libz.so", stub_elf(EM_386))
            .with_entry("lib/x86/liba.so", stub_elf(EM_386))
            .with_corrupt_entry("lib/x86/libbad.so", 32)
            .with_entry("lib/x86/libnever.so", stub_elf(EM_386));

        let err = scan_archive(&mut invs, &mut ar).unwrap_err();
        assert!(matches!(err, ArchiveError::Decompress { .. }));
        assert_eq!(find(&invs, "x86").libs(), ["liba.so", "libz.so"]);
    }

    #[test]
    fn broken_header_is_malformed() {
        let mut invs = inventories(&["x86"]);
        let mut ar = MemoryArchive::new()
            .with_entry("lib/x86/libfoo.so", stub_elf(EM_386))
            .with_broken_header();

        let err = scan_archive(&mut invs, &mut ar).unwrap_err();
        assert!(matches!(err, ArchiveError::Malformed(_)));
        assert_eq!(find(&invs, "x86").libs(), ["libfoo.so"]);
    }

    #[test]
    fn corrupt_entry_outside_lib_is_never_read() {
        let mut invs = inventories(&["x86"]);
        let mut ar = MemoryArchive::new()
            .with_corrupt_entry("res/raw/blob.bin", 16)
            .with_entry("lib/x86/libfoo.so", stub_elf(EM_386));
        assert!(scan_archive(&mut invs, &mut ar).is_ok());
    }

    #[test]
    fn empty_archive_scans_cleanly() {
        let mut invs = inventories(&["x86"]);
        let summary = scan_archive(&mut invs, &mut MemoryArchive::new()).unwrap();
        assert_eq!(summary, ScanSummary::default());
    }
}
