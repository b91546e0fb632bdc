use std::collections::HashMap;
use std::hash::Hash;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use super::StoreError;

/// In-memory document collection.
///
/// All mutation happens under the write lock, so [`Collection::update`] is a
/// single atomic read-modify-write — the conditional-update primitive the
/// like toggle needs to stay race-free under concurrent identical toggles.
/// A poisoned lock is reported as [`StoreError::Unavailable`] instead of
/// degrading silently.
#[derive(Debug)]
pub struct Collection<K, V> {
    inner: RwLock<HashMap<K, V>>,
}

impl<K, V> Collection<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(HashMap::new()),
        }
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, HashMap<K, V>>, StoreError> {
        self.inner
            .read()
            .map_err(|_| StoreError::Unavailable("collection lock poisoned"))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, HashMap<K, V>>, StoreError> {
        self.inner
            .write()
            .map_err(|_| StoreError::Unavailable("collection lock poisoned"))
    }

    pub fn insert(&self, key: K, value: V) -> Result<(), StoreError> {
        self.write()?.insert(key, value);
        Ok(())
    }

    pub fn get(&self, key: &K) -> Result<Option<V>, StoreError> {
        Ok(self.read()?.get(key).cloned())
    }

    /// Atomically mutate the document at `key`, returning the updated copy,
    /// or `None` when absent.
    pub fn update<F>(&self, key: &K, f: F) -> Result<Option<V>, StoreError>
    where
        F: FnOnce(&mut V),
    {
        let mut map = self.write()?;
        match map.get_mut(key) {
            Some(value) => {
                f(value);
                Ok(Some(value.clone()))
            }
            None => Ok(None),
        }
    }

    pub fn remove(&self, key: &K) -> Result<Option<V>, StoreError> {
        Ok(self.write()?.remove(key))
    }

    /// Delete every document matching the predicate, returning the removed
    /// documents (cascade callers need them for media cleanup).
    pub fn remove_where<P>(&self, pred: P) -> Result<Vec<V>, StoreError>
    where
        P: Fn(&V) -> bool,
    {
        let mut map = self.write()?;
        let keys: Vec<K> = map
            .iter()
            .filter(|(_, v)| pred(v))
            .map(|(k, _)| k.clone())
            .collect();

        let mut removed = Vec::with_capacity(keys.len());
        for key in keys {
            if let Some(v) = map.remove(&key) {
                removed.push(v);
            }
        }
        Ok(removed)
    }

    pub fn find<P>(&self, pred: P) -> Result<Vec<V>, StoreError>
    where
        P: Fn(&V) -> bool,
    {
        Ok(self.read()?.values().filter(|v| pred(v)).cloned().collect())
    }

    pub fn count(&self) -> Result<usize, StoreError> {
        Ok(self.read()?.len())
    }
}

impl<K, V> Default for Collection<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    fn default() -> Self {
        Self::new()
    }
}
