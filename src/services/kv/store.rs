//! Lock-guarded string map backing the `/inmemory` endpoint.

use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;

/// Concurrent in-memory key-value store.
///
/// Entries live for the lifetime of the process and are lost on restart.
/// Writes are last-writer-wins; there is no delete.
///
/// # Thread Safety
///
/// `KvStore` is `Clone`; clones share the same underlying map. The map is
/// only reachable through [`get`](Self::get) and [`set`](Self::set), which
/// hold the lock for the map operation alone and never across an `.await`.
#[derive(Clone, Default)]
pub struct KvStore {
    data: Arc<RwLock<HashMap<String, String>>>,
}

impl KvStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-seeded with the given entries.
    ///
    /// Later duplicates of a key win, same as repeated [`set`](Self::set).
    pub fn with_entries<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let data = entries
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect::<HashMap<_, _>>();
        Self {
            data: Arc::new(RwLock::new(data)),
        }
    }

    /// Looks up `key` under a shared lock.
    ///
    /// Returns `None` when the key has never been set. Any string is a valid
    /// key, including the empty one.
    pub fn get(&self, key: &str) -> Option<String> {
        self.data.read().get(key).cloned()
    }

    /// Stores `value` under `key`, replacing any previous value.
    pub fn set(&self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        self.data.write().insert(key, value);
    }

    /// Returns the number of entries.
    pub fn len(&self) -> usize {
        self.data.read().len()
    }

    /// Returns true if no key has been set.
    pub fn is_empty(&self) -> bool {
        self.data.read().is_empty()
    }
}

impl std::fmt::Debug for KvStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KvStore")
            .field("entries", &self.len())
            .finish()
    }
}
