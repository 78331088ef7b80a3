//! File-backed durable store
//!
//! Persists each value to its own JSON file in a cache directory. Raw keys
//! are usually request URLs, so they are escaped into safe file names.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::error::StoreError;
use crate::store::DurableStore;

const FILE_EXTENSION: &str = ".json";

// == File Store ==
#[derive(Debug, Clone)]
pub struct FileStore {
    /// Directory where entry files are stored
    dir: PathBuf,
}

impl FileStore {
    /// Creates a store rooted at `dir`. The directory is created lazily on
    /// first write.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, raw_key: &str) -> PathBuf {
        self.dir
            .join(format!("{}{}", encode_file_name(raw_key), FILE_EXTENSION))
    }
}

impl DurableStore for FileStore {
    fn get(&self, raw_key: &str) -> Result<Option<String>, StoreError> {
        match fs::read_to_string(self.path_for(raw_key)) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StoreError::ReadFailed {
                key: raw_key.to_string(),
                reason: e.to_string(),
            }),
        }
    }

    fn set(&self, raw_key: &str, value: &str) -> Result<(), StoreError> {
        let write_failed = |e: std::io::Error| StoreError::WriteFailed {
            key: raw_key.to_string(),
            reason: e.to_string(),
        };

        fs::create_dir_all(&self.dir).map_err(write_failed)?;
        fs::write(self.path_for(raw_key), value).map_err(write_failed)
    }

    fn delete(&self, raw_key: &str) -> Result<(), StoreError> {
        match fs::remove_file(self.path_for(raw_key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StoreError::WriteFailed {
                key: raw_key.to_string(),
                reason: e.to_string(),
            }),
        }
    }

    fn list_keys(&self, prefix: &str) -> Result<Vec<String>, StoreError> {
        let entries = match fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => {
                return Err(StoreError::ReadFailed {
                    key: prefix.to_string(),
                    reason: e.to_string(),
                })
            }
        };

        Ok(entries
            .filter_map(|entry| entry.ok())
            .filter_map(|entry| {
                let name = entry.file_name().into_string().ok()?;
                decode_file_name(name.strip_suffix(FILE_EXTENSION)?)
            })
            .filter(|key| key.starts_with(prefix))
            .collect())
    }
}

// == File Name Escaping ==
/// Escapes every byte outside `[A-Za-z0-9_-]` as `%XX`.
fn encode_file_name(raw_key: &str) -> String {
    let mut out = String::with_capacity(raw_key.len());
    for byte in raw_key.bytes() {
        if byte.is_ascii_alphanumeric() || byte == b'_' || byte == b'-' {
            out.push(byte as char);
        } else {
            out.push_str(&format!("%{:02X}", byte));
        }
    }
    out
}

/// Inverse of `encode_file_name`. None for names this store did not write.
fn decode_file_name(name: &str) -> Option<String> {
    let bytes = name.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' {
            let hex = name.get(i + 1..i + 3)?;
            out.push(u8::from_str_radix(hex, 16).ok()?);
            i += 3;
        } else {
            out.push(bytes[i]);
            i += 1;
        }
    }
    String::from_utf8(out).ok()
}
