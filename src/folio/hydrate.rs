//! Startup hydration and write-through of the two persisted values.
//!
//! Reads are fail-safe: a missing key, a store error, bad JSON or the wrong
//! JSON shape all produce the default value. Nothing here is ever surfaced
//! to the user; problems other than plain absence are logged at warn level.
//!
//! Writes are best-effort. A failed write is logged and dropped, the
//! in-memory state stays as the caller set it.

use crate::model::{Bookmarks, LastRead};
use crate::store::KeyValueStore;
use serde::de::DeserializeOwned;
use serde::Serialize;

pub const BOOKMARKS_KEY: &str = "folio_bookmarks";
pub const LAST_READ_KEY: &str = "folio_last_read";

fn load<S, T>(store: &S, key: &str) -> Option<T>
where
    S: KeyValueStore,
    T: DeserializeOwned,
{
    let raw = match store.get(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => return None,
        Err(e) => {
            tracing::warn!(key, backend = store.name(), error = %e, "failed to read stored value, using default");
            return None;
        }
    };
    match serde_json::from_str(&raw) {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::warn!(key, error = %e, "discarding malformed stored value");
            None
        }
    }
}

fn save<S, T>(store: &S, key: &str, value: &T)
where
    S: KeyValueStore,
    T: Serialize,
{
    let encoded = match serde_json::to_string(value) {
        Ok(encoded) => encoded,
        Err(e) => {
            tracing::warn!(key, error = %e, "failed to encode value, not persisted");
            return;
        }
    };
    if let Err(e) = store.set(key, &encoded) {
        tracing::warn!(key, backend = store.name(), error = %e, "failed to persist value");
    }
}

pub fn load_bookmarks<S: KeyValueStore>(store: &S) -> Bookmarks {
    let bookmarks: Bookmarks = load(store, BOOKMARKS_KEY).unwrap_or_default();
    tracing::debug!(count = bookmarks.len(), "hydrated bookmarks");
    bookmarks
}

pub fn load_last_read<S: KeyValueStore>(store: &S) -> Option<LastRead> {
    let last_read: Option<LastRead> = load(store, LAST_READ_KEY);
    tracing::debug!(?last_read, "hydrated last-read pointer");
    last_read
}

pub fn save_bookmarks<S: KeyValueStore>(store: &S, bookmarks: &Bookmarks) {
    save(store, BOOKMARKS_KEY, bookmarks);
}

pub fn save_last_read<S: KeyValueStore>(store: &S, last_read: &LastRead) {
    save(store, LAST_READ_KEY, last_read);
}
