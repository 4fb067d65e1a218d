use crate::archive::{entry_buffer, ArchiveError, ArchiveReader, EntryInfo};
use std::fs::File;
use std::io::{BufReader, Read, Seek};
use std::path::Path;
use zip::result::ZipError;
use zip::ZipArchive;

/// `ArchiveReader` over a zip container (APK).
pub struct ZipArchiveReader<R: Read + Seek> {
    archive: ZipArchive<R>,
}

impl ZipArchiveReader<BufReader<File>> {
    pub fn open(path: &Path) -> Result<Self, ArchiveError> {
        let file = File::open(path)?;
        Self::new(BufReader::new(file))
    }
}

impl<R: Read + Seek> ZipArchiveReader<R> {
    pub fn new(reader: R) -> Result<Self, ArchiveError> {
        let archive = ZipArchive::new(reader).map_err(malformed)?;
        Ok(Self { archive })
    }
}

fn malformed(e: ZipError) -> ArchiveError {
    match e {
        ZipError::Io(io) => ArchiveError::Io(io),
        other => ArchiveError::Malformed(other.to_string()),
    }
}

impl<R: Read + Seek> ArchiveReader for ZipArchiveReader<R> {
    fn len(&self) -> usize {
        self.archive.len()
    }

    /// Central-directory metadata only; no decompressor is set up, so entries
    /// in unsupported formats can still be listed and skipped.
    fn entry_info(&mut self, index: usize) -> Result<EntryInfo, ArchiveError> {
        let file = self.archive.by_index_raw(index).map_err(malformed)?;
        Ok(EntryInfo {
            path: file.name().to_owned(),
            size: file.size(),
        })
    }

    fn read_entry(&mut self, index: usize) -> Result<Vec<u8>, ArchiveError> {
        let mut file = self.archive.by_index(index).map_err(malformed)?;
        let path = file.name().to_owned();
        let mut buf = entry_buffer(&path, file.size())?;
        file.read_to_end(&mut buf).map_err(|e| ArchiveError::Decompress {
            path,
            reason: e.to_string(),
        })?;
        Ok(buf)
    }
}
