#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Type descriptors and value access for deep walking.
//!
//! Two layers:
//! - **Static layer**: [`Type`] handles describing the shape of a Rust type
//!   (kind, element type, fields, tags, capabilities)
//! - **Runtime layer**: the [`Reflect`] trait, which exposes a value's type
//!   and a structural view of its contents
//!
//! Struct types get both through `#[derive(Reflect)]`.

mod dynamic;
mod field;
mod impls;
mod invariants;
mod kind;
mod reflect;
mod registry;
mod tag;
mod ty;
mod validate;

#[cfg(test)]
mod tag_tests;
#[cfg(test)]
mod test_utils;

pub use dynamic::Dynamic;
pub use field::{DeepField, Field, FieldInfo, OffsetFields, deep_fields, offset_fields, type_fields};
pub use kind::TypeKind;
pub use reflect::{Reflect, ReflectMut, ReflectRef, Sequence, Struct};
pub use registry::registered;
pub use tag::{Tag, tag_ident};
pub use ty::{Capability, Type, TypeInfo, Typed};
pub use validate::{KindError, validate_kind, validate_pointer, validate_pointer_to};
