//! Install-time ABI selection for packages that ship native libraries for
//! several architectures.
//!
//! `AbiPicker` scans a package's `lib/<abi>/` folders through an
//! `ArchiveReader` (zip-backed `ZipArchiveReader` for real packages,
//! `MemoryArchive` for tests), records one `AbiInventory` per ABI the caller
//! supports, and then picks the ABI to install: the x86 build when it is an
//! equivalent of the ARM build, the ARM build (run through binary translation)
//! when the x86 build is missing, incomplete, or mixed with foreign binaries.

pub mod archive;
pub mod compare;
pub mod elf;
pub mod memory;
pub mod picker;
pub mod scan;
pub mod zip_reader;

pub use archive::{ArchiveError, ArchiveReader, EntryInfo, MAX_ENTRY_PATH_LEN};
pub use compare::{Comparator, Decision, Verdict, RELIABILITY_KEYWORDS};
pub use memory::MemoryArchive;
pub use picker::{AbiChoice, AbiPicker};
pub use scan::{scan_archive, split_lib_path, ScanSummary};
pub use zip_reader::ZipArchiveReader;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PickError {
    #[error("schema error: {0}")]
    Schema(#[from] abipick_schema::SchemaError),
    #[error("archive error: {0}")]
    Archive(#[from] ArchiveError),
}
