//! Scoped staging of CSV payloads before upload.

use crate::error::Result;
use reqwest::multipart::Part;
use serde::{Deserialize, Serialize};
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

/// Where an upload payload lives until it is sent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StagingMode {
    /// Keep the CSV in memory.
    #[default]
    Memory,
    /// Spool the CSV to a temporary file, removed on drop.
    TempFile,
}

/// A staged CSV payload. Dropping it releases the buffer or deletes the file.
#[derive(Debug)]
pub struct StagedCsv {
    inner: Staged,
    len: u64,
}

#[derive(Debug)]
enum Staged {
    Memory(Vec<u8>),
    File(NamedTempFile),
}

impl StagedCsv {
    /// Stage `bytes` according to `mode`.
    pub fn stage(bytes: Vec<u8>, mode: StagingMode) -> Result<Self> {
        let len = bytes.len() as u64;
        let inner = match mode {
            StagingMode::Memory => Staged::Memory(bytes),
            StagingMode::TempFile => {
                let mut file = tempfile::Builder::new()
                    .prefix("feltmap-")
                    .suffix(".csv")
                    .tempfile()?;
                file.write_all(&bytes)?;
                file.flush()?;
                Staged::File(file)
            }
        };
        Ok(Self { inner, len })
    }

    /// Path of the spooled file, if staged on disk.
    pub fn path(&self) -> Option<&Path> {
        match &self.inner {
            Staged::Memory(_) => None,
            Staged::File(file) => Some(file.path()),
        }
    }

    /// Payload size in bytes.
    pub fn len(&self) -> u64 {
        self.len
    }

    /// Check if the payload has no bytes.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Read the whole payload back.
    pub fn contents(&self) -> Result<Vec<u8>> {
        match &self.inner {
            Staged::Memory(bytes) => Ok(bytes.clone()),
            Staged::File(file) => Ok(std::fs::read(file.path())?),
        }
    }

    /// Multipart part carrying the payload. File-backed payloads are streamed.
    pub(crate) async fn to_part(&self, file_name: &str) -> Result<Part> {
        let part = match &self.inner {
            Staged::Memory(bytes) => Part::bytes(bytes.clone()),
            Staged::File(file) => {
                let handle = tokio::fs::File::open(file.path()).await?;
                Part::stream_with_length(handle, self.len)
            }
        };
        Ok(part.file_name(file_name.to_string()).mime_str("text/csv")?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_staging_has_no_path() {
        let staged = StagedCsv::stage(b"a,b\n1,2\n".to_vec(), StagingMode::Memory).unwrap();
        assert!(staged.path().is_none());
        assert_eq!(staged.len(), 8);
        assert_eq!(staged.contents().unwrap(), b"a,b\n1,2\n");
    }

    #[test]
    fn test_temp_file_removed_on_drop() {
        let staged = StagedCsv::stage(b"a\n1\n".to_vec(), StagingMode::TempFile).unwrap();
        let path = staged.path().unwrap().to_path_buf();
        assert!(path.exists());
        assert_eq!(std::fs::read(&path).unwrap(), b"a\n1\n");

        drop(staged);
        assert!(!path.exists());
    }

    #[tokio::test]
    async fn test_to_part_from_temp_file() {
        let staged = StagedCsv::stage(b"x\n".to_vec(), StagingMode::TempFile).unwrap();
        tokio_test::assert_ok!(staged.to_part("dataframe.csv").await);
    }
}
