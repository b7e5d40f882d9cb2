//! Open sum-type slot.
//!
//! A [`Dynamic`] holds any reflected `Send + Sync` value, or nothing. Its
//! static type says nothing about the contents, so walkers resolve the
//! concrete type each time they reach one.

use std::fmt;

use crate::reflect::{Reflect, ReflectMut, ReflectRef};
use crate::ty::{Type, TypeInfo, Typed};

#[derive(Default)]
pub struct Dynamic(Option<Box<dyn Reflect + Send + Sync>>);

impl Dynamic {
    pub fn new(value: impl Reflect + Send + Sync) -> Self {
        Self(Some(Box::new(value)))
    }

    pub const fn empty() -> Self {
        Self(None)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_none()
    }

    pub fn get(&self) -> Option<&dyn Reflect> {
        self.0.as_deref().map(|value| value as &dyn Reflect)
    }

    pub fn get_mut(&mut self) -> Option<&mut dyn Reflect> {
        self.0.as_deref_mut().map(|value| value as &mut dyn Reflect)
    }

    /// Concrete type of the held value.
    pub fn held_type(&self) -> Option<Type> {
        self.get().map(Reflect::reflect_type)
    }

    pub fn downcast_ref<T: Reflect>(&self) -> Option<&T> {
        self.get()?.downcast_ref::<T>()
    }

    pub fn downcast_mut<T: Reflect>(&mut self) -> Option<&mut T> {
        self.get_mut()?.downcast_mut::<T>()
    }

    pub fn set(&mut self, value: impl Reflect + Send + Sync) {
        self.0 = Some(Box::new(value));
    }

    pub fn take(&mut self) -> Option<Box<dyn Reflect>> {
        self.0.take().map(|value| value as Box<dyn Reflect>)
    }
}

impl fmt::Debug for Dynamic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.get() {
            Some(value) => write!(f, "Dynamic({})", value.reflect_type()),
            None => f.write_str("Dynamic(<empty>)"),
        }
    }
}

impl Typed for Dynamic {
    fn type_of() -> Type {
        Type::intern::<Self>(|| TypeInfo::dynamic::<Self>().named("Dynamic"))
    }
}

impl Reflect for Dynamic {
    crate::reflect_boilerplate!();

    fn reflect_ref(&self) -> ReflectRef<'_> {
        ReflectRef::Dynamic(self.get())
    }

    fn reflect_mut(&mut self) -> ReflectMut<'_> {
        ReflectMut::Dynamic(self.get_mut())
    }

    fn is_zero(&self) -> bool {
        self.is_empty()
    }
}
