//! Entry points.
//!
//! Each operation exists twice: as a method on an explicit [`WalkerCache`],
//! and as a free function on the process-wide cache.

use std::sync::Arc;

use trawl_core::{Field, Reflect, ReflectMut, Type, TypeKind, Typed, validate_kind};

use crate::Result;
use crate::filter::{FilterRef, and};
use crate::invariants;
use crate::visitor::{Appender, Visitor, VisitorFn, VisitorMut, VisitorMutFn};
use crate::walker::{Walker, WalkerCache};

impl WalkerCache {
    /// Visit every value in `value` selected by `filter`.
    ///
    /// No filter, a no-op visitor, or a filter that selects nothing all
    /// return `Ok(())` without visiting.
    pub fn walk(
        &self,
        value: &dyn Reflect,
        filter: Option<&FilterRef>,
        visitor: &mut dyn Visitor,
    ) -> Result<()> {
        if visitor.is_noop() {
            return Ok(());
        }
        if let Some(walker) = self.get_walker(Some(value.reflect_type()), filter)? {
            walker.walk(self, value, visitor);
        }
        Ok(())
    }

    /// Like [`walk`](Self::walk), handing the visitor mutable access.
    pub fn walk_mut(
        &self,
        value: &mut dyn Reflect,
        filter: Option<&FilterRef>,
        visitor: &mut dyn VisitorMut,
    ) -> Result<()> {
        if visitor.is_noop() {
            return Ok(());
        }
        if let Some(walker) = self.get_walker(Some(value.reflect_type()), filter)? {
            walker.walk_mut(self, value, visitor);
        }
        Ok(())
    }

    pub fn walk_fn(
        &self,
        value: &dyn Reflect,
        filter: Option<&FilterRef>,
        visit: impl FnMut(&dyn Reflect, &Field),
    ) -> Result<()> {
        self.walk(value, filter, &mut VisitorFn(visit))
    }

    /// Walk the target of a pointer with mutable access.
    ///
    /// `ptr` must be a pointer kind (`Box`, `Option`, ...), otherwise this
    /// fails before touching the cache. An empty pointer is a no-op.
    pub fn walk_ptr(
        &self,
        ptr: &mut dyn Reflect,
        filter: Option<&FilterRef>,
        visitor: &mut dyn VisitorMut,
    ) -> Result<()> {
        validate_kind(ptr.reflect_type(), TypeKind::Pointer)?;
        match ptr.reflect_mut() {
            ReflectMut::Pointer(Some(target)) => self.walk_mut(target, filter, visitor),
            ReflectMut::Pointer(None) => Ok(()),
            _ => invariants::view_mismatch("pointer"),
        }
    }

    pub fn walk_ptr_fn(
        &self,
        ptr: &mut dyn Reflect,
        filter: Option<&FilterRef>,
        visit: impl FnMut(&mut dyn Reflect, &Field),
    ) -> Result<()> {
        self.walk_ptr(ptr, filter, &mut VisitorMutFn(visit))
    }

    /// Append every non-zero `T` reachable from `value` to `out`.
    pub fn trawl<T: Reflect + Typed + Clone>(
        &self,
        value: &dyn Reflect,
        out: &mut Vec<T>,
    ) -> Result<()> {
        self.trawl_with(value, None, out)
    }

    /// Like [`trawl`](Self::trawl), restricted further by `filter`.
    pub fn trawl_with<T: Reflect + Typed + Clone>(
        &self,
        value: &dyn Reflect,
        filter: Option<&FilterRef>,
        out: &mut Vec<T>,
    ) -> Result<()> {
        let filter = and([Some(Appender::<T>::filter()), filter.cloned()])?;
        self.walk(value, filter.as_ref(), &mut Appender::new(out))
    }
}

// ============================================================================
// Process-wide cache
// ============================================================================

pub fn get_walker(ty: Option<Type>, filter: Option<&FilterRef>) -> Result<Option<Arc<Walker>>> {
    WalkerCache::global().get_walker(ty, filter)
}

pub fn walk(value: &dyn Reflect, filter: Option<&FilterRef>, visitor: &mut dyn Visitor) -> Result<()> {
    WalkerCache::global().walk(value, filter, visitor)
}

pub fn walk_mut(
    value: &mut dyn Reflect,
    filter: Option<&FilterRef>,
    visitor: &mut dyn VisitorMut,
) -> Result<()> {
    WalkerCache::global().walk_mut(value, filter, visitor)
}

pub fn walk_fn(
    value: &dyn Reflect,
    filter: Option<&FilterRef>,
    visit: impl FnMut(&dyn Reflect, &Field),
) -> Result<()> {
    WalkerCache::global().walk_fn(value, filter, visit)
}

pub fn walk_ptr(
    ptr: &mut dyn Reflect,
    filter: Option<&FilterRef>,
    visitor: &mut dyn VisitorMut,
) -> Result<()> {
    WalkerCache::global().walk_ptr(ptr, filter, visitor)
}

pub fn walk_ptr_fn(
    ptr: &mut dyn Reflect,
    filter: Option<&FilterRef>,
    visit: impl FnMut(&mut dyn Reflect, &Field),
) -> Result<()> {
    WalkerCache::global().walk_ptr_fn(ptr, filter, visit)
}

pub fn trawl<T: Reflect + Typed + Clone>(value: &dyn Reflect, out: &mut Vec<T>) -> Result<()> {
    WalkerCache::global().trawl(value, out)
}

pub fn trawl_with<T: Reflect + Typed + Clone>(
    value: &dyn Reflect,
    filter: Option<&FilterRef>,
    out: &mut Vec<T>,
) -> Result<()> {
    WalkerCache::global().trawl_with(value, filter, out)
}
