//! Binding registry
//!
//! Uses DashMap for concurrent access, with bindings of one type grouped
//! under their `TypeId` and ordered by name (the default binding first).
//!
//! The map itself sits behind an `RwLock<Arc<..>>`: every insert and lookup
//! takes the shared side, and [`ServiceStorage::clear`] takes the exclusive
//! side to swap in an empty map. A clear is therefore atomic with respect to
//! any concurrent bind or resolve.

use crate::binding::Binding;
use crate::key::BindingKey;
use ahash::RandomState;
use dashmap::DashMap;
use std::any::TypeId;
use std::collections::BTreeMap;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard};

/// All bindings of one abstract type, keyed by name
type TypeBindings = BTreeMap<String, Arc<Binding>>;

type BindingMap = DashMap<TypeId, TypeBindings, RandomState>;

/// Thread-safe registry of bindings
pub(crate) struct ServiceStorage {
    bindings: RwLock<Arc<BindingMap>>,
}

impl ServiceStorage {
    #[inline]
    pub(crate) fn new() -> Self {
        Self {
            bindings: RwLock::new(Arc::new(Self::empty_map())),
        }
    }

    /// 8 shards: registries rarely hold more than a few dozen types.
    #[inline]
    fn empty_map() -> BindingMap {
        DashMap::with_capacity_and_hasher_and_shard_amount(0, RandomState::new(), 8)
    }

    /// Current map generation. No binding code may run while this is held.
    #[inline]
    fn current(&self) -> RwLockReadGuard<'_, Arc<BindingMap>> {
        self.bindings.read().unwrap_or_else(PoisonError::into_inner)
    }

    /// Insert a binding, returning the one it replaced.
    pub(crate) fn insert(&self, binding: Arc<Binding>) -> Option<Arc<Binding>> {
        let key = binding.key();
        let map = self.current();
        let mut entry = map.entry(key.type_id()).or_default();
        entry.insert(key.name().to_owned(), binding)
    }

    #[inline]
    pub(crate) fn get(&self, key: &BindingKey) -> Option<Arc<Binding>> {
        let map = self.current();
        let entry = map.get(&key.type_id())?;
        entry.get(key.name()).cloned()
    }

    /// Every binding of one type, ordered by name.
    pub(crate) fn get_all(&self, type_id: TypeId) -> Vec<Arc<Binding>> {
        let map = self.current();
        map.get(&type_id)
            .map(|entry| entry.values().cloned().collect())
            .unwrap_or_default()
    }

    #[inline]
    pub(crate) fn contains(&self, key: &BindingKey) -> bool {
        let map = self.current();
        map.get(&key.type_id())
            .is_some_and(|entry| entry.contains_key(key.name()))
    }

    /// Total number of bindings across all types
    pub(crate) fn len(&self) -> usize {
        let map = self.current();
        map.iter().map(|entry| entry.value().len()).sum()
    }

    #[inline]
    pub(crate) fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop every binding, returning how many were removed.
    pub(crate) fn clear(&self) -> usize {
        let previous = {
            let mut current = self.bindings.write().unwrap_or_else(PoisonError::into_inner);
            std::mem::replace(&mut *current, Arc::new(Self::empty_map()))
        };
        // Cached instances are released here, outside the lock
        previous.iter().map(|entry| entry.value().len()).sum()
    }
}

impl Default for ServiceStorage {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ServiceStorage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceStorage")
            .field("count", &self.len())
            .finish()
    }
}
