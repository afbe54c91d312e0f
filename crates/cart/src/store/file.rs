//! File-backed store.
//!
//! All keys live in one JSON object file. Writes go to a fresh temp file in
//! the same directory that is then renamed over the original, so a crash
//! mid-write leaves the previous contents in place. Every read-modify-write
//! holds an exclusive lock on a sibling `.lock` file, which serializes
//! writers across store handles and processes.

use std::collections::BTreeMap;
use std::fs::{self, File, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use fs2::FileExt;
use tempfile::NamedTempFile;
use tracing::warn;

use super::LocalStore;
use crate::error::StoreError;

type Items = BTreeMap<String, String>;

/// A [`LocalStore`] persisted to a single JSON file.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    lock_path: PathBuf,
}

impl FileStore {
    /// Open a store at `path`. The file, its lock file and its parent
    /// directory are created on the first write.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let mut lock_path = path.clone().into_os_string();
        lock_path.push(".lock");

        Self {
            path,
            lock_path: lock_path.into(),
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn dir(&self) -> &Path {
        match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        }
    }

    fn read_items(&self) -> Result<Items, StoreError> {
        match fs::read_to_string(&self.path) {
            Ok(content) if content.trim().is_empty() => Ok(Items::new()),
            Ok(content) => Ok(serde_json::from_str(&content)?),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(Items::new()),
            Err(e) => Err(e.into()),
        }
    }

    /// Read the current items for a write, starting over if the file is corrupt.
    fn read_items_for_write(&self) -> Result<Items, StoreError> {
        match self.read_items() {
            Err(StoreError::Corrupt(e)) => {
                warn!(path = %self.path.display(), error = %e, "Discarding corrupt store file");
                Ok(Items::new())
            }
            other => other,
        }
    }

    /// Take the writer lock. Released when the returned file is dropped.
    fn lock_for_write(&self) -> Result<File, StoreError> {
        fs::create_dir_all(self.dir())?;

        let lock = OpenOptions::new()
            .create(true)
            .truncate(false)
            .write(true)
            .open(&self.lock_path)?;
        FileExt::lock_exclusive(&lock)?;
        Ok(lock)
    }

    /// Apply `update` to the stored items under the writer lock.
    ///
    /// Nothing is written when `update` returns `false`.
    fn modify(&self, update: impl FnOnce(&mut Items) -> bool) -> Result<(), StoreError> {
        let _lock = self.lock_for_write()?;

        let mut items = self.read_items_for_write()?;
        if !update(&mut items) {
            return Ok(());
        }

        let mut tmp = NamedTempFile::new_in(self.dir())?;
        tmp.write_all(&serde_json::to_vec_pretty(&items)?)?;
        tmp.as_file().sync_all()?;
        tmp.persist(&self.path).map_err(|e| e.error)?;
        Ok(())
    }
}

impl LocalStore for FileStore {
    // Writers replace the file by rename, so a reader always sees a whole file
    fn get_item(&self, key: &str) -> Result<Option<String>, StoreError> {
        let mut items = self.read_items()?;
        Ok(items.remove(key))
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.modify(|items| {
            items.insert(key.to_string(), value.to_string());
            true
        })
    }

    fn remove_item(&self, key: &str) -> Result<(), StoreError> {
        self.modify(|items| items.remove(key).is_some())
    }
}
