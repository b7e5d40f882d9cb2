//! Compiled traversal plans.
//!
//! A [`Walker`] is built once per (type, field, filter) and then driven over
//! any number of values of that type. The absence of a walker (`None`
//! wherever an `Option<Walker>` appears) means there is nothing to visit.

mod build;
mod cache;
mod dump;


use trawl_core::{Field, Reflect, ReflectMut, ReflectRef};

use crate::filter::FilterRef;
use crate::invariants;
use crate::visitor::{Visitor, VisitorMut};

pub use cache::WalkerCache;

#[derive(Debug)]
pub enum Walker {
    /// Visit the value with an empty field.
    Bare,
    /// Visit the value with its field.
    Leaf(Field),
    /// Drive the inner walker on the pointee, if any.
    Pointer(Box<Walker>),
    /// Drive the inner walker on every element, in index order.
    Sequence(Box<Walker>),
    /// Drive each field walker, in declaration order.
    Aggregate(Vec<FieldWalker>),
    /// Resolve the held value's type at walk time.
    Dynamic(DynamicWalker),
    /// Visit the value with an empty field, then drive the inner walker.
    SelfBare(Box<Walker>),
    /// Visit the value with its field, then drive the inner walker.
    SelfField(Field, Box<Walker>),
}

/// Walker for one field of an aggregate.
#[derive(Debug)]
pub struct FieldWalker {
    pub index: usize,
    pub inner: Walker,
}

/// Late-bound walker for a dynamic slot. Remembers the slot's field and the
/// filter so the walker for the held value can be fetched from the cache.
#[derive(Debug)]
pub struct DynamicWalker {
    pub field: Field,
    pub filter: FilterRef,
}

impl Walker {
    pub(crate) fn aggregate(fields: Vec<FieldWalker>) -> Walker {
        invariants::ensure_field_walkers(&fields);
        Walker::Aggregate(fields)
    }

    /// Drive `visitor` over `value`, which must be of the type this walker
    /// was built for.
    pub fn walk(&self, cache: &WalkerCache, value: &dyn Reflect, visitor: &mut dyn Visitor) {
        match self {
            Walker::Bare => visitor.visit(value, &Field::NONE),
            Walker::Leaf(field) => visitor.visit(value, field),
            Walker::Pointer(inner) => match value.reflect_ref() {
                ReflectRef::Pointer(Some(target)) => inner.walk(cache, target, visitor),
                ReflectRef::Pointer(None) => {}
                _ => invariants::view_mismatch("pointer"),
            },
            Walker::Sequence(inner) => {
                let ReflectRef::Sequence(seq) = value.reflect_ref() else {
                    invariants::view_mismatch("sequence")
                };
                for index in 0..seq.len() {
                    if let Some(elem) = seq.get(index) {
                        inner.walk(cache, elem, visitor);
                    }
                }
            }
            Walker::Aggregate(fields) => {
                let ReflectRef::Struct(record) = value.reflect_ref() else {
                    invariants::view_mismatch("struct")
                };
                for field in fields {
                    let Some(child) = record.field(field.index) else {
                        invariants::view_mismatch("struct field")
                    };
                    field.inner.walk(cache, child, visitor);
                }
            }
            Walker::Dynamic(dynamic) => match value.reflect_ref() {
                ReflectRef::Dynamic(Some(held)) => dynamic.walk(cache, held, visitor),
                ReflectRef::Dynamic(None) => {}
                _ => invariants::view_mismatch("dynamic"),
            },
            Walker::SelfBare(inner) => {
                visitor.visit(value, &Field::NONE);
                inner.walk(cache, value, visitor);
            }
            Walker::SelfField(field, inner) => {
                visitor.visit(value, field);
                inner.walk(cache, value, visitor);
            }
        }
    }

    /// Like [`walk`](Self::walk), with mutable access to every visited value.
    pub fn walk_mut(
        &self,
        cache: &WalkerCache,
        value: &mut dyn Reflect,
        visitor: &mut dyn VisitorMut,
    ) {
        match self {
            Walker::Bare => visitor.visit_mut(value, &Field::NONE),
            Walker::Leaf(field) => visitor.visit_mut(value, field),
            Walker::Pointer(inner) => match value.reflect_mut() {
                ReflectMut::Pointer(Some(target)) => inner.walk_mut(cache, target, visitor),
                ReflectMut::Pointer(None) => {}
                _ => invariants::view_mismatch("pointer"),
            },
            Walker::Sequence(inner) => {
                let ReflectMut::Sequence(seq) = value.reflect_mut() else {
                    invariants::view_mismatch("sequence")
                };
                for index in 0..seq.len() {
                    if let Some(elem) = seq.get_mut(index) {
                        inner.walk_mut(cache, elem, visitor);
                    }
                }
            }
            Walker::Aggregate(fields) => {
                let ReflectMut::Struct(record) = value.reflect_mut() else {
                    invariants::view_mismatch("struct")
                };
                for field in fields {
                    let Some(child) = record.field_mut(field.index) else {
                        invariants::view_mismatch("struct field")
                    };
                    field.inner.walk_mut(cache, child, visitor);
                }
            }
            Walker::Dynamic(dynamic) => match value.reflect_mut() {
                ReflectMut::Dynamic(Some(held)) => dynamic.walk_mut(cache, held, visitor),
                ReflectMut::Dynamic(None) => {}
                _ => invariants::view_mismatch("dynamic"),
            },
            Walker::SelfBare(inner) => {
                visitor.visit_mut(value, &Field::NONE);
                inner.walk_mut(cache, value, visitor);
            }
            Walker::SelfField(field, inner) => {
                visitor.visit_mut(value, field);
                inner.walk_mut(cache, value, visitor);
            }
        }
    }
}

impl DynamicWalker {
    fn walk(&self, cache: &WalkerCache, held: &dyn Reflect, visitor: &mut dyn Visitor) {
        if let Some(walker) = cache.resolve(held.reflect_type(), self.field, &self.filter) {
            walker.walk(cache, held, visitor);
        }
    }

    fn walk_mut(&self, cache: &WalkerCache, held: &mut dyn Reflect, visitor: &mut dyn VisitorMut) {
        if let Some(walker) = cache.resolve(held.reflect_type(), self.field, &self.filter) {
            walker.walk_mut(cache, held, visitor);
        }
    }
}
