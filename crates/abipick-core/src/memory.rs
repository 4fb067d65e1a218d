use crate::archive::{ArchiveError, ArchiveReader, EntryInfo};

#[derive(Debug, Clone)]
struct MemoryEntry {
    path: String,
    data: Vec<u8>,
    fail_read: bool,
    fail_info: bool,
}

/// In-memory archive with failure injection, used by tests and fixtures.
#[derive(Debug, Clone, Default)]
pub struct MemoryArchive {
    entries: Vec<MemoryEntry>,
}

impl MemoryArchive {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_entry(mut self, path: &str, data: impl Into<Vec<u8>>) -> Self {
        self.entries.push(MemoryEntry {
            path: path.to_owned(),
            data: data.into(),
            fail_read: false,
            fail_info: false,
        });
        self
    }

    /// An entry whose listing succeeds but whose content cannot be read.
    #[must_use]
    pub fn with_corrupt_entry(mut self, path: &str, size: usize) -> Self {
        self.entries.push(MemoryEntry {
            path: path.to_owned(),
            data: vec![0; size],
            fail_read: true,
            fail_info: false,
        });
        self
    }

    /// An entry whose header cannot be read at all.
    #[must_use]
    pub fn with_broken_header(mut self) -> Self {
        self.entries.push(MemoryEntry {
            path: String::new(),
            data: Vec::new(),
            fail_read: true,
            fail_info: true,
        });
        self
    }

    fn entry(&self, index: usize) -> Result<&MemoryEntry, ArchiveError> {
        self.entries
            .get(index)
            .ok_or_else(|| ArchiveError::Malformed(format!("no entry at index {index}")))
    }
}

impl ArchiveReader for MemoryArchive {
    fn len(&self) -> usize {
        self.entries.len()
    }

    fn entry_info(&mut self, index: usize) -> Result<EntryInfo, ArchiveError> {
        let entry = self.entry(index)?;
        if entry.fail_info {
            return Err(ArchiveError::Malformed(format!(
                "cannot read header of entry {index}"
            )));
        }
        Ok(EntryInfo {
            path: entry.path.clone(),
            size: entry.data.len() as u64,
        })
    }

    fn read_entry(&mut self, index: usize) -> Result<Vec<u8>, ArchiveError> {
        let entry = self.entry(index)?;
        if entry.fail_read {
            return Err(ArchiveError::Decompress {
                path: entry.path.clone(),
                reason: "injected read failure".to_owned(),
            });
        }
        Ok(entry.data.clone())
    }
}
