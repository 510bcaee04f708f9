//! Disk I/O for one collection: load a JSON array from a file and write it back
//! atomically.
//!
//! The rename-over approach is close to atomic on most platforms. On NTFS
//! (Windows) it's reliable; on FAT32 or network shares there are no hard
//! guarantees.

use crate::error::{Error, Result};
use crate::serializer::{JsonSerializer, Serializer};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Reads and writes one JSON array at one file path.
///
/// Loading never fails: a missing, unreadable, empty or corrupt file comes back
/// as an empty collection. Saving replaces the whole file and reports any I/O
/// failure to the caller.
#[derive(Debug, Clone)]
pub struct DocumentStore {
    path: PathBuf,
    serializer: JsonSerializer,
}

impl DocumentStore {
    /// Store backed by `path`, written with `serializer`.
    pub fn new(path: impl AsRef<Path>, serializer: JsonSerializer) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            serializer,
        }
    }

    /// Path to the backing JSON file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read every record from disk, or an empty sequence if there is nothing
    /// usable there.
    pub fn load<T: DeserializeOwned>(&self) -> Vec<T> {
        let bytes = match std::fs::read(&self.path) {
            Ok(b) => b,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(
                    path = %self.path.display(),
                    "no backing file yet, starting empty"
                );
                return Vec::new();
            }
            Err(e) => {
                warn!(
                    path = %self.path.display(),
                    error = %e,
                    "could not read backing file, starting empty"
                );
                return Vec::new();
            }
        };
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Vec::new();
        }
        match self.serializer.deserialize(&bytes) {
            Ok(records) => records,
            Err(e) => {
                warn!(
                    path = %self.path.display(),
                    error = %e,
                    "backing file is not a valid record array, starting empty"
                );
                Vec::new()
            }
        }
    }

    /// Serialize `records` and replace the file contents with them.
    pub fn save<T: Serialize>(&self, records: &[T]) -> Result<()> {
        let bytes = self.serializer.serialize(records)?;
        atomic_write(&self.path, &bytes)?;
        debug!(
            path = %self.path.display(),
            count = records.len(),
            bytes = bytes.len(),
            "collection persisted"
        );
        Ok(())
    }
}

/// Write `bytes` to `<path>.tmp` and then rename over `path`. This avoids
/// leaving a half-written file if the process crashes mid-write. On failure
/// the temp file is removed; a crash between the two steps can still leave it.
pub fn atomic_write(path: &Path, bytes: &[u8]) -> Result<()> {
    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("json");
    let tmp = path.with_extension(format!("{ext}.tmp"));
    let written = std::fs::write(&tmp, bytes).and_then(|()| std::fs::rename(&tmp, path));
    if let Err(e) = written {
        let _ = std::fs::remove_file(&tmp);
        return Err(Error::Io(e.to_string()));
    }
    Ok(())
}
