//! Persistent key-value storage for the local cart.
//!
//! The local store plays the part browser storage plays on the storefront
//! page: string values under string keys, surviving restarts, read and
//! written synchronously. Each call is atomic on its own; nothing spans calls.

mod file;
mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use crate::error::StoreError;

/// Synchronous string key-value storage.
pub trait LocalStore: Send + Sync {
    /// Read the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing storage cannot be read.
    fn get_item(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Store `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing storage cannot be written.
    fn set_item(&self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Delete `key`. Deleting a missing key succeeds.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing storage cannot be written.
    fn remove_item(&self, key: &str) -> Result<(), StoreError>;
}
