//! Filters decide, per node, whether to visit it and whether to descend.
//!
//! Filters are values. They take part in walker cache keys, so they must be
//! comparable and hashable, and they must not carry payloads whose equality
//! is meaningless (closures, maps, raw pointers). [`validate`] enforces this
//! by walking the filter's own reflected value graph.
//!
//! [`FilterRef`] is the shared, type-erased handle the engine works with.
//! Any [`Filter`] converts into one.

mod combine;
mod stock;
mod validate;

#[cfg(test)]
mod filter_tests;

use std::any::TypeId;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use trawl_core::{Field, Reflect, ReflectMut, ReflectRef, Type, TypeInfo, Typed};

use crate::Decision;

pub use combine::{And, FILTER_CAPACITY, InvertSelf, Or, and, or};
pub use stock::{
    All, CapabilityFilter, Nop, ShallowCapabilityFilter, TagFilter, TypeFilter, VisitBoth,
    VisitDesc, VisitSelf, type_filter, type_filter_of,
};
pub(crate) use validate::validate_filter;

/// Decides what to do with one node of a type graph.
///
/// Must be a pure function of its inputs: the result is baked into cached
/// walkers and reused for every later walk.
pub trait Filter: Reflect + fmt::Debug + Send + Sync + Eq + Hash {
    fn visit(&self, ty: Type, field: &Field) -> Decision;
}

/// Object-safe face of [`Filter`].
trait DynFilter: fmt::Debug + Send + Sync {
    fn visit(&self, ty: Type, field: &Field) -> Decision;

    fn as_reflect(&self) -> &dyn Reflect;

    fn dyn_eq(&self, other: &dyn DynFilter) -> bool;

    fn dyn_hash(&self, state: &mut dyn Hasher);
}

impl<F: Filter> DynFilter for F {
    fn visit(&self, ty: Type, field: &Field) -> Decision {
        Filter::visit(self, ty, field)
    }

    fn as_reflect(&self) -> &dyn Reflect {
        self
    }

    fn dyn_eq(&self, other: &dyn DynFilter) -> bool {
        other
            .as_reflect()
            .downcast_ref::<F>()
            .is_some_and(|other| self == other)
    }

    fn dyn_hash(&self, mut state: &mut dyn Hasher) {
        TypeId::of::<F>().hash(&mut state);
        self.hash(&mut state);
    }
}

/// Shared handle to a filter value.
///
/// Equality and hashing are by value, so two separately built handles to
/// equal filters select the same cached walkers.
#[derive(Clone)]
pub struct FilterRef(Arc<dyn DynFilter>);

impl FilterRef {
    pub fn new<F: Filter>(filter: F) -> Self {
        Self(Arc::new(filter))
    }

    pub fn visit(&self, ty: Type, field: &Field) -> Decision {
        self.0.visit(ty, field)
    }

    /// The filter value, for introspection.
    pub fn inner(&self) -> &dyn Reflect {
        self.0.as_reflect()
    }

    pub fn downcast_ref<F: Filter>(&self) -> Option<&F> {
        self.inner().downcast_ref::<F>()
    }

    /// Whether both handles share one allocation.
    pub fn ptr_eq(this: &Self, other: &Self) -> bool {
        Arc::ptr_eq(&this.0, &other.0)
    }
}

impl<F: Filter> From<F> for FilterRef {
    fn from(filter: F) -> Self {
        Self::new(filter)
    }
}

impl PartialEq for FilterRef {
    fn eq(&self, other: &Self) -> bool {
        Self::ptr_eq(self, other) || self.0.dyn_eq(&*other.0)
    }
}

impl Eq for FilterRef {}

impl Hash for FilterRef {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.dyn_hash(state);
    }
}

impl fmt::Debug for FilterRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&*self.0, f)
    }
}

// A handle reflects as a dynamic slot that always holds its filter. The
// filter is shared, so there is no mutable view of it.
impl Typed for FilterRef {
    fn type_of() -> Type {
        Type::intern::<Self>(|| TypeInfo::dynamic::<Self>().named("FilterRef"))
    }
}

impl Reflect for FilterRef {
    trawl_core::reflect_boilerplate!();

    fn reflect_ref(&self) -> ReflectRef<'_> {
        ReflectRef::Dynamic(Some(self.inner()))
    }

    fn reflect_mut(&mut self) -> ReflectMut<'_> {
        ReflectMut::Dynamic(None)
    }

    fn is_zero(&self) -> bool {
        false
    }
}
