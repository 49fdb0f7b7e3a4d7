//! # Storage Layer
//!
//! Reading state survives restarts through a tiny string key-value store,
//! abstracted behind [`KeyValueStore`] so the navigator never knows where
//! its data lives.
//!
//! ## Implementations
//!
//! - [`fs::FileStore`]: production storage, one JSON file per key under the
//!   data directory, written atomically.
//! - [`memory::MemStore`]: in-memory fake for tests, with switches to
//!   simulate read and write failures.
//!
//! ## Keys
//!
//! Only two keys are used, see [`crate::hydrate`]:
//!
//! ```text
//! <data dir>/
//! ├── folio_bookmarks.json   # ["moon-phases", "stars-colour"]
//! ├── folio_last_read.json   # {"chapterId":"moon","sectionId":"moon-phases"}
//! └── config.json            # FolioConfig, not managed by the store
//! ```
//!
//! Values are opaque strings at this layer; encoding and tolerance of bad
//! data belong to the caller.

use crate::error::Result;

pub mod fs;
pub mod memory;

/// Synchronous string-keyed storage.
///
/// Methods take `&self`; folio is single-threaded and backends use interior
/// mutability where they need it.
pub trait KeyValueStore {
    /// Human-readable backend name for logs.
    fn name(&self) -> &str;

    /// Returns `Ok(None)` when the key has never been written.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Replaces the value for `key`. Must not leave a partial value behind.
    fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Removing a missing key is not an error.
    fn remove(&self, key: &str) -> Result<()>;
}
