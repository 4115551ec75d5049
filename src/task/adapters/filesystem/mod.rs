//! Filesystem-backed key/value store.
//!
//! Each key maps to one `<key>.json` file inside a directory opened through
//! `cap-std`, so the store cannot reach outside that directory. Writes go to
//! a sibling temporary file first and are renamed over the target, which
//! keeps the previous document intact when a write fails part-way.

use camino::Utf8Path;
use cap_std::ambient_authority;
use cap_std::fs_utf8::Dir;
use std::io;

use crate::task::ports::{KeyValueStore, StorageError, StorageKey, StorageResult};

const DOCUMENT_EXTENSION: &str = "json";
const TEMPORARY_SUFFIX: &str = "tmp";

/// Key/value store keeping one JSON document per key in a directory.
#[derive(Debug)]
pub struct FileKeyValueStore {
    dir: Dir,
}

impl FileKeyValueStore {
    /// Opens `path` as the storage directory, creating it when missing.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Backend`] when the directory cannot be created
    /// or opened.
    pub fn open(path: &Utf8Path) -> StorageResult<Self> {
        Dir::create_ambient_dir_all(path, ambient_authority()).map_err(StorageError::backend)?;
        let dir = Dir::open_ambient_dir(path, ambient_authority()).map_err(StorageError::backend)?;
        Ok(Self { dir })
    }

    /// Wraps an already opened directory.
    #[must_use]
    pub const fn from_dir(dir: Dir) -> Self {
        Self { dir }
    }
}

/// Maps a storage key to its document file name.
fn document_name(key: &StorageKey) -> StorageResult<String> {
    let raw = key.as_str();
    let is_valid = !raw.is_empty()
        && !raw.starts_with('.')
        && !raw.chars().any(|ch| matches!(ch, '/' | '\\' | '\0'));
    if !is_valid {
        return Err(StorageError::InvalidKey(raw.to_owned()));
    }
    Ok(format!("{raw}.{DOCUMENT_EXTENSION}"))
}

impl KeyValueStore for FileKeyValueStore {
    fn get(&self, key: &StorageKey) -> StorageResult<Option<String>> {
        let name = document_name(key)?;
        match self.dir.read_to_string(&name) {
            Ok(contents) => Ok(Some(contents)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(StorageError::backend(err)),
        }
    }

    fn set(&self, key: &StorageKey, value: &str) -> StorageResult<()> {
        let name = document_name(key)?;
        let staging = format!("{name}.{TEMPORARY_SUFFIX}");
        self.dir
            .write(&staging, value)
            .map_err(StorageError::backend)?;
        self.dir
            .rename(&staging, &self.dir, &name)
            .map_err(StorageError::backend)
    }
}
