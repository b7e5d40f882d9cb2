//! Visitors receive every value a walker selects.

use trawl_core::{Field, Reflect, Typed};

use crate::filter::{FilterRef, Nop, type_filter_of};

/// Receives selected values with shared access.
pub trait Visitor {
    fn visit(&mut self, value: &dyn Reflect, field: &Field);

    /// Whether visiting can be skipped entirely. Walks with a no-op visitor
    /// return before building anything.
    fn is_noop(&self) -> bool {
        false
    }
}

/// Receives selected values with mutable access.
pub trait VisitorMut {
    fn visit_mut(&mut self, value: &mut dyn Reflect, field: &Field);

    fn is_noop(&self) -> bool {
        false
    }
}

/// Adapts a closure into a [`Visitor`].
pub struct VisitorFn<F>(pub F);

impl<F: FnMut(&dyn Reflect, &Field)> Visitor for VisitorFn<F> {
    fn visit(&mut self, value: &dyn Reflect, field: &Field) {
        (self.0)(value, field)
    }
}

/// Adapts a closure into a [`VisitorMut`].
pub struct VisitorMutFn<F>(pub F);

impl<F: FnMut(&mut dyn Reflect, &Field)> VisitorMut for VisitorMutFn<F> {
    fn visit_mut(&mut self, value: &mut dyn Reflect, field: &Field) {
        (self.0)(value, field)
    }
}

impl Visitor for Nop {
    fn visit(&mut self, _: &dyn Reflect, _: &Field) {}

    fn is_noop(&self) -> bool {
        true
    }
}

impl VisitorMut for Nop {
    fn visit_mut(&mut self, _: &mut dyn Reflect, _: &Field) {}

    fn is_noop(&self) -> bool {
        true
    }
}

impl<V: Visitor> Visitor for Option<V> {
    fn visit(&mut self, value: &dyn Reflect, field: &Field) {
        if let Some(visitor) = self {
            visitor.visit(value, field);
        }
    }

    fn is_noop(&self) -> bool {
        self.as_ref().is_none_or(Visitor::is_noop)
    }
}

impl<V: VisitorMut> VisitorMut for Option<V> {
    fn visit_mut(&mut self, value: &mut dyn Reflect, field: &Field) {
        if let Some(visitor) = self {
            visitor.visit_mut(value, field);
        }
    }

    fn is_noop(&self) -> bool {
        self.as_ref().is_none_or(VisitorMut::is_noop)
    }
}

impl<V: Visitor + ?Sized> Visitor for &mut V {
    fn visit(&mut self, value: &dyn Reflect, field: &Field) {
        (**self).visit(value, field)
    }

    fn is_noop(&self) -> bool {
        (**self).is_noop()
    }
}

impl<V: VisitorMut + ?Sized> VisitorMut for &mut V {
    fn visit_mut(&mut self, value: &mut dyn Reflect, field: &Field) {
        (**self).visit_mut(value, field)
    }

    fn is_noop(&self) -> bool {
        (**self).is_noop()
    }
}

/// Collects clones of every non-zero `T` it is shown.
///
/// Values of other types are ignored, so pair it with [`Appender::filter`]
/// to avoid visiting them in the first place.
pub struct Appender<'a, T> {
    out: &'a mut Vec<T>,
}

impl<'a, T: Reflect + Typed + Clone> Appender<'a, T> {
    pub fn new(out: &'a mut Vec<T>) -> Self {
        Self { out }
    }

    /// Filter selecting exactly the values this appender keeps.
    pub fn filter() -> FilterRef {
        type_filter_of::<T>()
    }
}

impl<T: Reflect + Typed + Clone> Visitor for Appender<'_, T> {
    fn visit(&mut self, value: &dyn Reflect, _: &Field) {
        if value.is_zero() {
            return;
        }
        if let Some(value) = value.downcast_ref::<T>() {
            self.out.push(value.clone());
        }
    }
}
