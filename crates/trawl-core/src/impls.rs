//! `Typed` and `Reflect` for standard library types.

use std::collections::{BTreeMap, HashMap};
use std::sync::mpsc::Sender;

use crate::kind::TypeKind;
use crate::reflect::{Reflect, ReflectMut, ReflectRef, Sequence};
use crate::ty::{Capability, Type, TypeInfo, Typed};

macro_rules! impl_leaf {
    ($kind:ident => $($ty:ty),+ $(,)?) => {$(
        impl Typed for $ty {
            fn type_of() -> Type {
                Type::intern::<Self>(|| {
                    TypeInfo::leaf::<Self>(TypeKind::$kind).named(stringify!($ty))
                })
            }
        }

        impl Reflect for $ty {
            crate::reflect_boilerplate!();

            fn reflect_ref(&self) -> ReflectRef<'_> {
                ReflectRef::Leaf
            }

            fn reflect_mut(&mut self) -> ReflectMut<'_> {
                ReflectMut::Leaf
            }

            fn is_zero(&self) -> bool {
                *self == <$ty as Default>::default()
            }
        }
    )+};
}

impl_leaf!(Unit => ());
impl_leaf!(Bool => bool);
impl_leaf!(Int => i8, i16, i32, i64, i128, isize);
impl_leaf!(Uint => u8, u16, u32, u64, u128, usize);
impl_leaf!(Float => f32, f64);
impl_leaf!(Char => char);
impl_leaf!(Str => String, &'static str);

// ============================================================================
// Pointers
// ============================================================================

impl<T: Typed> Typed for Box<T> {
    fn type_of() -> Type {
        Type::intern::<Self>(|| {
            TypeInfo::pointer::<Self>(T::type_of).named(format!("Box<{}>", T::type_of()))
        })
    }
}

impl<T: Reflect + Typed> Reflect for Box<T> {
    crate::reflect_boilerplate!();

    fn reflect_ref(&self) -> ReflectRef<'_> {
        ReflectRef::Pointer(Some(&**self as &dyn Reflect))
    }

    fn reflect_mut(&mut self) -> ReflectMut<'_> {
        ReflectMut::Pointer(Some(&mut **self as &mut dyn Reflect))
    }

    fn is_zero(&self) -> bool {
        false
    }
}

impl<T: Typed> Typed for Option<T> {
    fn type_of() -> Type {
        Type::intern::<Self>(|| {
            TypeInfo::pointer::<Self>(T::type_of).named(format!("Option<{}>", T::type_of()))
        })
    }
}

impl<T: Reflect + Typed> Reflect for Option<T> {
    crate::reflect_boilerplate!();

    fn reflect_ref(&self) -> ReflectRef<'_> {
        ReflectRef::Pointer(self.as_ref().map(|value| value as &dyn Reflect))
    }

    fn reflect_mut(&mut self) -> ReflectMut<'_> {
        ReflectMut::Pointer(self.as_mut().map(|value| value as &mut dyn Reflect))
    }

    fn is_zero(&self) -> bool {
        self.is_none()
    }
}

// ============================================================================
// Sequences
// ============================================================================

impl<T: Typed> Typed for Vec<T> {
    fn type_of() -> Type {
        Type::intern::<Self>(|| {
            TypeInfo::slice::<Self>(T::type_of).named(format!("Vec<{}>", T::type_of()))
        })
    }
}

impl<T: Reflect + Typed> Sequence for Vec<T> {
    fn len(&self) -> usize {
        self.as_slice().len()
    }

    fn get(&self, index: usize) -> Option<&dyn Reflect> {
        self.as_slice().get(index).map(|value| value as &dyn Reflect)
    }

    fn get_mut(&mut self, index: usize) -> Option<&mut dyn Reflect> {
        self.as_mut_slice()
            .get_mut(index)
            .map(|value| value as &mut dyn Reflect)
    }
}

impl<T: Reflect + Typed> Reflect for Vec<T> {
    crate::reflect_boilerplate!();

    fn reflect_ref(&self) -> ReflectRef<'_> {
        ReflectRef::Sequence(self)
    }

    fn reflect_mut(&mut self) -> ReflectMut<'_> {
        ReflectMut::Sequence(self)
    }

    fn is_zero(&self) -> bool {
        self.is_empty()
    }
}

impl<T: Typed, const N: usize> Typed for [T; N] {
    fn type_of() -> Type {
        Type::intern::<Self>(|| {
            TypeInfo::array::<Self>(T::type_of).named(format!("[{}; {N}]", T::type_of()))
        })
    }
}

impl<T: Reflect + Typed, const N: usize> Sequence for [T; N] {
    fn len(&self) -> usize {
        N
    }

    fn get(&self, index: usize) -> Option<&dyn Reflect> {
        self.as_slice().get(index).map(|value| value as &dyn Reflect)
    }

    fn get_mut(&mut self, index: usize) -> Option<&mut dyn Reflect> {
        self.as_mut_slice()
            .get_mut(index)
            .map(|value| value as &mut dyn Reflect)
    }
}

impl<T: Reflect + Typed, const N: usize> Reflect for [T; N] {
    crate::reflect_boilerplate!();

    fn reflect_ref(&self) -> ReflectRef<'_> {
        ReflectRef::Sequence(self)
    }

    fn reflect_mut(&mut self) -> ReflectMut<'_> {
        ReflectMut::Sequence(self)
    }

    fn is_zero(&self) -> bool {
        self.iter().all(Reflect::is_zero)
    }
}

// ============================================================================
// Opaque kinds: described, never descended into
// ============================================================================

macro_rules! impl_opaque {
    (
        impl<$($param:ident),*> $ty:ty => $kind:ident,
        name = $name:expr,
        zero = |$this:ident| $zero:expr $(,)?
    ) => {
        impl<$($param: Typed),*> Typed for $ty {
            fn type_of() -> Type {
                Type::intern::<Self>(|| TypeInfo::leaf::<Self>(TypeKind::$kind).named($name))
            }
        }

        impl<$($param: Typed),*> Reflect for $ty {
            crate::reflect_boilerplate!();

            fn reflect_ref(&self) -> ReflectRef<'_> {
                ReflectRef::Leaf
            }

            fn reflect_mut(&mut self) -> ReflectMut<'_> {
                ReflectMut::Leaf
            }

            fn is_zero(&self) -> bool {
                let $this = self;
                $zero
            }
        }
    };
}

impl_opaque!(
    impl<K, V> HashMap<K, V> => Map,
    name = format!("HashMap<{}, {}>", K::type_of(), V::type_of()),
    zero = |this| this.is_empty(),
);

impl_opaque!(
    impl<K, V> BTreeMap<K, V> => Map,
    name = format!("BTreeMap<{}, {}>", K::type_of(), V::type_of()),
    zero = |this| this.is_empty(),
);

impl_opaque!(
    impl<R> fn() -> R => Func,
    name = format!("fn() -> {}", R::type_of()),
    zero = |_this| false,
);

impl_opaque!(
    impl<A, R> fn(A) -> R => Func,
    name = format!("fn({}) -> {}", A::type_of(), R::type_of()),
    zero = |_this| false,
);

impl_opaque!(
    impl<T> Sender<T> => Channel,
    name = format!("Sender<{}>", T::type_of()),
    zero = |_this| false,
);

impl_opaque!(
    impl<T> *const T => RawPointer,
    name = format!("*const {}", T::type_of()),
    zero = |this| this.is_null(),
);

impl_opaque!(
    impl<T> *mut T => RawPointer,
    name = format!("*mut {}", T::type_of()),
    zero = |this| this.is_null(),
);

// ============================================================================
// Descriptors
// ============================================================================

impl Typed for Type {
    fn type_of() -> Type {
        Type::intern::<Self>(|| TypeInfo::leaf::<Self>(TypeKind::Descriptor).named("Type"))
    }
}

impl Reflect for Type {
    crate::reflect_boilerplate!();

    fn reflect_ref(&self) -> ReflectRef<'_> {
        ReflectRef::Leaf
    }

    fn reflect_mut(&mut self) -> ReflectMut<'_> {
        ReflectMut::Leaf
    }

    fn is_zero(&self) -> bool {
        false
    }
}

impl Typed for Capability {
    fn type_of() -> Type {
        Type::intern::<Self>(|| TypeInfo::leaf::<Self>(TypeKind::Descriptor).named("Capability"))
    }
}

impl Reflect for Capability {
    crate::reflect_boilerplate!();

    fn reflect_ref(&self) -> ReflectRef<'_> {
        ReflectRef::Leaf
    }

    fn reflect_mut(&mut self) -> ReflectMut<'_> {
        ReflectMut::Leaf
    }

    fn is_zero(&self) -> bool {
        self.name().is_empty()
    }
}
