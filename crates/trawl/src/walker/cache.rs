//! Memoized walkers.

use std::fmt;
use std::sync::{Arc, LazyLock, RwLock};

use indexmap::IndexMap;
use indexmap::map::Entry;
use trawl_core::{Field, Type};

use super::Walker;
use super::build::{Frame, build};
use crate::Result;
use crate::filter::{FilterRef, validate_filter};

#[derive(Clone, PartialEq, Eq, Hash)]
struct WalkerKey {
    ty: Type,
    field: Field,
    filter: FilterRef,
}

/// Cache of compiled walkers keyed by (type, field, filter).
///
/// Entries are never evicted. Equal keys always resolve to the same
/// [`Arc<Walker>`], and a key whose build produced no walker stays cached
/// as `None`.
pub struct WalkerCache {
    walkers: RwLock<IndexMap<WalkerKey, Option<Arc<Walker>>>>,
}

static GLOBAL: LazyLock<WalkerCache> = LazyLock::new(WalkerCache::new);

impl WalkerCache {
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            walkers: RwLock::new(IndexMap::with_capacity(capacity)),
        }
    }

    /// Process-wide cache used by the free functions.
    pub fn global() -> &'static WalkerCache {
        &GLOBAL
    }

    /// Number of cached keys, including those without a walker.
    pub fn len(&self) -> usize {
        self.walkers.read().expect("walker cache lock poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Walker for values of `ty` under `filter`.
    ///
    /// No type or no filter gives `Ok(None)` without touching the cache.
    /// A filter is validated the first time it misses, so an invalid filter
    /// is reported before anything is built.
    pub fn get_walker(
        &self,
        ty: Option<Type>,
        filter: Option<&FilterRef>,
    ) -> Result<Option<Arc<Walker>>> {
        let (Some(ty), Some(filter)) = (ty, filter) else {
            return Ok(None);
        };

        let key = WalkerKey {
            ty,
            field: Field::NONE,
            filter: filter.clone(),
        };
        if let Some(hit) = self.cached(&key) {
            return Ok(hit);
        }

        validate_filter(filter)?;
        Ok(self.install(key))
    }

    /// Lookup for a value discovered at walk time. Skips validation: the
    /// filter already passed it at the top-level entry.
    pub(super) fn resolve(
        &self,
        ty: Type,
        field: Field,
        filter: &FilterRef,
    ) -> Option<Arc<Walker>> {
        let key = WalkerKey {
            ty,
            field,
            filter: filter.clone(),
        };
        match self.cached(&key) {
            Some(hit) => hit,
            None => self.install(key),
        }
    }

    fn cached(&self, key: &WalkerKey) -> Option<Option<Arc<Walker>>> {
        self.walkers
            .read()
            .expect("walker cache lock poisoned")
            .get(key)
            .cloned()
    }

    /// Build outside the lock, then keep whichever entry landed first.
    fn install(&self, key: WalkerKey) -> Option<Arc<Walker>> {
        let built = build(&Frame::root(key.ty, key.field), &key.filter).map(Arc::new);
        tracing::debug!(
            ty = %key.ty,
            field = %key.field,
            filter = ?key.filter,
            built = built.is_some(),
            "built walker"
        );

        let mut walkers = self.walkers.write().expect("walker cache lock poisoned");
        match walkers.entry(key) {
            Entry::Occupied(entry) => {
                tracing::debug!(ty = %entry.key().ty, "walker already installed, dropping ours");
                entry.get().clone()
            }
            Entry::Vacant(entry) => entry.insert(built).clone(),
        }
    }
}

impl Default for WalkerCache {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for WalkerCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WalkerCache")
            .field("len", &self.len())
            .finish()
    }
}
