//! Filter value validation.
//!
//! Filters are cache keys. A filter whose value graph holds a closure, map,
//! channel, raw pointer or growable sequence could compare equal while
//! behaving differently (or never compare equal at all), so such filters
//! are rejected before their first walker is built. Pointers and dynamic
//! slots are allowed only around type descriptors and nested filters.

use trawl_core::{Reflect, ReflectRef, Type, TypeKind};

use super::FilterRef;
use crate::{Error, Result};

pub(crate) fn validate_filter(filter: &FilterRef) -> Result<()> {
    validate_value(filter, filter.inner())
}

fn validate_value(src: &FilterRef, value: &dyn Reflect) -> Result<()> {
    let ty = value.reflect_type();

    match ty.kind() {
        TypeKind::Func
        | TypeKind::Map
        | TypeKind::Channel
        | TypeKind::RawPointer
        | TypeKind::Slice => Err(invalid(src, ty)),

        TypeKind::Pointer => {
            if !ty.elem().is_some_and(is_permitted_target) {
                return Err(invalid(src, ty));
            }
            match value.reflect_ref() {
                ReflectRef::Pointer(Some(target)) => validate_value(src, target),
                _ => Ok(()),
            }
        }

        TypeKind::Dynamic => {
            if !ty.is::<FilterRef>() {
                return Err(invalid(src, ty));
            }
            match value.reflect_ref() {
                ReflectRef::Dynamic(Some(held)) => validate_value(src, held),
                _ => Ok(()),
            }
        }

        TypeKind::Array => match value.reflect_ref() {
            ReflectRef::Sequence(seq) => (0..seq.len())
                .filter_map(|index| seq.get(index))
                .try_for_each(|elem| validate_value(src, elem)),
            _ => Ok(()),
        },

        TypeKind::Struct => match value.reflect_ref() {
            ReflectRef::Struct(fields) => (0..ty.num_fields())
                .filter_map(|index| fields.field(index))
                .try_for_each(|field| validate_value(src, field)),
            _ => Ok(()),
        },

        _ => Ok(()),
    }
}

fn is_permitted_target(elem: Type) -> bool {
    elem.kind() == TypeKind::Descriptor || elem.is::<FilterRef>()
}

fn invalid(src: &FilterRef, ty: Type) -> Error {
    tracing::warn!(filter = ?src, %ty, kind = %ty.kind(), "rejecting invalid filter");
    Error::InvalidFilter {
        filter: format!("{src:?}"),
        ty,
        kind: ty.kind(),
    }
}
