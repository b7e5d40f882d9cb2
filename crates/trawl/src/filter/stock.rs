//! Constant, type, tag and capability filters.

use std::sync::{LazyLock, RwLock};

use indexmap::IndexMap;
use trawl_core::{Capability, Field, Type, Typed};

use super::{Filter, FilterRef};
use crate::{Decision, Reflect};

/// Visits nothing. Equivalent to passing no filter at all.
#[derive(Reflect, Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Nop;

impl Filter for Nop {
    fn visit(&self, _: Type, _: &Field) -> Decision {
        Decision::NONE
    }
}

/// Visits the top-level value only.
#[derive(Reflect, Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct VisitSelf;

impl Filter for VisitSelf {
    fn visit(&self, _: Type, _: &Field) -> Decision {
        Decision::SELF
    }
}

/// Descends everywhere, visits nothing.
#[derive(Reflect, Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct VisitDesc;

impl Filter for VisitDesc {
    fn visit(&self, _: Type, _: &Field) -> Decision {
        Decision::DESC
    }
}

/// Visits and descends everywhere.
#[derive(Reflect, Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct VisitBoth;

impl Filter for VisitBoth {
    fn visit(&self, _: Type, _: &Field) -> Decision {
        Decision::BOTH
    }
}

/// Like [`VisitBoth`], but sets every bit. Under [`InvertSelf`](super::InvertSelf)
/// only the self bit flips.
#[derive(Reflect, Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct All;

impl Filter for All {
    fn visit(&self, _: Type, _: &Field) -> Decision {
        Decision::ALL
    }
}

/// Visits values of exactly one type and descends into everything else.
#[derive(Reflect, Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct TypeFilter(pub Option<Type>);

impl TypeFilter {
    pub fn new(ty: Type) -> Self {
        Self(Some(ty))
    }
}

impl Filter for TypeFilter {
    fn visit(&self, ty: Type, _: &Field) -> Decision {
        match self.0 {
            None => Decision::NONE,
            Some(target) if target == ty => Decision::BOTH,
            Some(_) => Decision::DESC,
        }
    }
}

/// Visits fields whose tag carries `key:"value"`. An empty key matches
/// nothing but still lets the walk descend.
///
/// Tags belong to the field, not to what it holds: elements of a tagged
/// `Vec` or array are judged with an empty field and never match.
#[derive(Reflect, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct TagFilter {
    pub key: String,
    pub value: String,
}

impl TagFilter {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

impl Filter for TagFilter {
    fn visit(&self, _: Type, field: &Field) -> Decision {
        if !self.key.is_empty() && field.tag().get(&self.key) == self.value.as_str() {
            Decision::BOTH
        } else {
            Decision::DESC
        }
    }
}

/// Visits types whose address form satisfies a capability, and keeps
/// descending into them.
#[derive(Reflect, Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct CapabilityFilter(pub Option<Capability>);

impl Filter for CapabilityFilter {
    fn visit(&self, ty: Type, _: &Field) -> Decision {
        capability_visit(ty, self.0, Decision::BOTH)
    }
}

/// Like [`CapabilityFilter`], but stops descending at a match.
#[derive(Reflect, Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct ShallowCapabilityFilter(pub Option<Capability>);

impl Filter for ShallowCapabilityFilter {
    fn visit(&self, ty: Type, _: &Field) -> Decision {
        capability_visit(ty, self.0, Decision::SELF)
    }
}

fn capability_visit(ty: Type, capability: Option<Capability>, hit: Decision) -> Decision {
    match capability {
        None => Decision::NONE,
        Some(capability) if ty.satisfies(capability) => hit,
        Some(_) => Decision::DESC,
    }
}

// ============================================================================
// Shared type filters
// ============================================================================

static TYPE_FILTERS: LazyLock<RwLock<IndexMap<Type, FilterRef>>> =
    LazyLock::new(|| RwLock::new(IndexMap::new()));

/// Process-wide [`TypeFilter`] handle for `ty`. Repeated calls return the
/// same allocation.
pub fn type_filter(ty: Type) -> FilterRef {
    if let Some(hit) = TYPE_FILTERS
        .read()
        .expect("type filter cache lock poisoned")
        .get(&ty)
    {
        return hit.clone();
    }

    TYPE_FILTERS
        .write()
        .expect("type filter cache lock poisoned")
        .entry(ty)
        .or_insert_with(|| FilterRef::new(TypeFilter::new(ty)))
        .clone()
}

/// Shortcut for `type_filter(T::type_of())`.
pub fn type_filter_of<T: Typed>() -> FilterRef {
    type_filter(T::type_of())
}
