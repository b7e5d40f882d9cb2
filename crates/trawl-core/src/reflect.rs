//! Runtime value access.
//!
//! [`Reflect`] is implemented for every value the engine can be pointed at.
//! It exposes the value's [`Type`] and a structural view whose shape matches
//! the type's [`TypeKind`](crate::TypeKind):
//!
//! | Kind | View |
//! |------|------|
//! | `Pointer` | [`ReflectRef::Pointer`], `None` when empty |
//! | `Array`, `Slice` | [`ReflectRef::Sequence`] |
//! | `Struct` | [`ReflectRef::Struct`] |
//! | `Dynamic` | [`ReflectRef::Dynamic`], `None` when empty |
//! | anything else | [`ReflectRef::Leaf`] |

use std::any::Any;

use crate::ty::Type;

pub trait Reflect: Any {
    /// Descriptor of the value's concrete type.
    fn reflect_type(&self) -> Type;

    fn as_any(&self) -> &dyn Any;

    fn as_any_mut(&mut self) -> &mut dyn Any;

    fn as_reflect(&self) -> &dyn Reflect;

    fn as_reflect_mut(&mut self) -> &mut dyn Reflect;

    fn reflect_ref(&self) -> ReflectRef<'_>;

    fn reflect_mut(&mut self) -> ReflectMut<'_>;

    /// Whether this is the zero value of its type: empty strings and
    /// collections, zero numbers, empty pointers, structs of zero fields.
    fn is_zero(&self) -> bool;
}

/// Shared structural view of a value.
pub enum ReflectRef<'a> {
    Leaf,
    Pointer(Option<&'a dyn Reflect>),
    Sequence(&'a dyn Sequence),
    Struct(&'a dyn Struct),
    Dynamic(Option<&'a dyn Reflect>),
}

/// Mutable structural view of a value.
pub enum ReflectMut<'a> {
    Leaf,
    Pointer(Option<&'a mut dyn Reflect>),
    Sequence(&'a mut dyn Sequence),
    Struct(&'a mut dyn Struct),
    Dynamic(Option<&'a mut dyn Reflect>),
}

/// Indexed elements of an array or vector.
pub trait Sequence {
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn get(&self, index: usize) -> Option<&dyn Reflect>;

    fn get_mut(&mut self, index: usize) -> Option<&mut dyn Reflect>;
}

/// Positional field access, indexes matching [`Type::fields`].
pub trait Struct {
    fn field(&self, index: usize) -> Option<&dyn Reflect>;

    fn field_mut(&mut self, index: usize) -> Option<&mut dyn Reflect>;
}

impl dyn Reflect + '_ {
    pub fn is<T: Any>(&self) -> bool {
        self.as_any().is::<T>()
    }

    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.as_any().downcast_ref::<T>()
    }

    pub fn downcast_mut<T: Any>(&mut self) -> Option<&mut T> {
        self.as_any_mut().downcast_mut::<T>()
    }
}

impl std::fmt::Debug for dyn Reflect + '_ {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "<{}>", self.reflect_type())
    }
}

/// Implements the boilerplate `Reflect` methods for a `Typed` type.
#[macro_export]
#[doc(hidden)]
macro_rules! reflect_boilerplate {
    () => {
        fn reflect_type(&self) -> $crate::Type {
            <Self as $crate::Typed>::type_of()
        }

        fn as_any(&self) -> &dyn ::std::any::Any {
            self
        }

        fn as_any_mut(&mut self) -> &mut dyn ::std::any::Any {
            self
        }

        fn as_reflect(&self) -> &dyn $crate::Reflect {
            self
        }

        fn as_reflect_mut(&mut self) -> &mut dyn $crate::Reflect {
            self
        }
    };
}
