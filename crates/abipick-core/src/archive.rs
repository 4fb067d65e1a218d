use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Longest entry path the scanner looks at; longer names are skipped.
pub const MAX_ENTRY_PATH_LEN: usize = 4096;

#[derive(Debug, Error)]
pub enum ArchiveError {
    #[error("malformed archive: {0}")]
    Malformed(String),
    #[error("failed to decompress '{path}': {reason}")]
    Decompress { path: String, reason: String },
    #[error("cannot allocate {size} bytes for '{path}'")]
    Allocation { path: String, size: u64 },
    #[error("archive I/O error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryInfo {
    pub path: String,
    /// Decompressed size in bytes.
    pub size: u64,
}

/// Read access to the entries of a package archive.
///
/// A scan holds the reader mutably for its whole duration; that borrow is the
/// iteration session.
pub trait ArchiveReader {
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn entry_info(&mut self, index: usize) -> Result<EntryInfo, ArchiveError>;

    /// Full decompressed content of the entry at `index`.
    fn read_entry(&mut self, index: usize) -> Result<Vec<u8>, ArchiveError>;
}

/// Allocate a buffer for `size` decompressed bytes, reporting failure instead
/// of aborting.
pub(crate) fn entry_buffer(path: &str, size: u64) -> Result<Vec<u8>, ArchiveError> {
    let alloc_err = || ArchiveError::Allocation {
        path: path.to_owned(),
        size,
    };
    let len = usize::try_from(size).map_err(|_| alloc_err())?;
    let mut buf = Vec::new();
    buf.try_reserve_exact(len).map_err(|_| alloc_err())?;
    Ok(buf)
}
