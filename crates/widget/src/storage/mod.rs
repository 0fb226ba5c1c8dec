//! Key-value stores backing cart persistence.
//!
//! The cart is only ever read whole and overwritten whole, so the trait is
//! just `get` and `set`. Emptying the cart stores an empty list rather than
//! deleting the key. Backends:
//! - [`MemoryStore`] - process-local map, shared between clones
//! - [`FileStore`] - one file per key below a directory

mod file;
mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use std::io;

/// A string-to-string store with local-storage semantics.
///
/// `set` overwrites unconditionally; `get` on a missing key is `Ok(None)`.
pub trait KeyValueStore {
    /// Read the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the backend cannot be read.
    fn get(&self, key: &str) -> io::Result<Option<String>>;

    /// Store `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the backend cannot be written.
    fn set(&self, key: &str, value: &str) -> io::Result<()>;
}
