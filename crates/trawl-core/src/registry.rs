//! Process-wide type interning.
//!
//! Maps `std::any::TypeId` to a leaked `TypeInfo`. Reads take a shared lock;
//! a miss builds the description outside the lock and installs it under the
//! write lock, keeping whichever description got there first.

use std::any::TypeId;
use std::sync::{LazyLock, RwLock};

use indexmap::IndexMap;
use indexmap::map::Entry;

use crate::invariants::ensure_well_formed;
use crate::ty::{Type, TypeInfo};

static REGISTRY: LazyLock<RwLock<IndexMap<TypeId, &'static TypeInfo>>> =
    LazyLock::new(|| RwLock::new(IndexMap::new()));

pub(crate) fn intern<T: ?Sized + 'static>(build: impl FnOnce() -> TypeInfo) -> Type {
    let id = TypeId::of::<T>();

    {
        let types = REGISTRY.read().expect("type registry lock poisoned");
        if let Some(info) = types.get(&id) {
            return Type::from_static(*info);
        }
    }

    let info = build();
    ensure_well_formed(&info, id);

    let mut types = REGISTRY.write().expect("type registry lock poisoned");
    match types.entry(id) {
        Entry::Occupied(entry) => Type::from_static(*entry.get()),
        Entry::Vacant(entry) => {
            let leaked: &'static TypeInfo = Box::leak(Box::new(info));
            entry.insert(leaked);
            Type::from_static(leaked)
        }
    }
}

/// Number of types described so far.
pub fn registered() -> usize {
    REGISTRY.read().expect("type registry lock poisoned").len()
}
