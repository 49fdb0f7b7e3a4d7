use super::KeyValueStore;
use crate::error::{FolioError, Result};
use std::cell::{Cell, RefCell};
use std::collections::HashMap;

/// In-memory store for tests.
///
/// Uses `RefCell` for interior mutability since folio is single-threaded,
/// which lets [`KeyValueStore`] keep `&self` on every method.
#[derive(Default)]
pub struct MemStore {
    values: RefCell<HashMap<String, String>>,
    writes: RefCell<HashMap<String, usize>>,
    simulate_read_error: Cell<bool>,
    simulate_write_error: Cell<bool>,
}

impl MemStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-seeded with raw values, as if written by an earlier session.
    pub fn with_values<K, V>(values: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        let store = Self::new();
        store.values.borrow_mut().extend(
            values
                .into_iter()
                .map(|(k, v)| (k.into(), v.into())),
        );
        store
    }

    pub fn set_simulate_read_error(&self, simulate: bool) {
        self.simulate_read_error.set(simulate);
    }

    pub fn set_simulate_write_error(&self, simulate: bool) {
        self.simulate_write_error.set(simulate);
    }

    /// Number of successful `set` calls for `key` since creation.
    pub fn write_count(&self, key: &str) -> usize {
        self.writes.borrow().get(key).copied().unwrap_or(0)
    }

    /// Raw stored value, bypassing error simulation.
    pub fn raw(&self, key: &str) -> Option<String> {
        self.values.borrow().get(key).cloned()
    }
}

impl KeyValueStore for MemStore {
    fn name(&self) -> &str {
        "MemStore"
    }

    fn get(&self, key: &str) -> Result<Option<String>> {
        if self.simulate_read_error.get() {
            return Err(FolioError::Store("Simulated read error".to_string()));
        }
        Ok(self.values.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        if self.simulate_write_error.get() {
            return Err(FolioError::Store("Simulated write error".to_string()));
        }
        self.values
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        *self.writes.borrow_mut().entry(key.to_string()).or_insert(0) += 1;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        if self.simulate_write_error.get() {
            return Err(FolioError::Store("Simulated write error".to_string()));
        }
        self.values.borrow_mut().remove(key);
        Ok(())
    }
}
