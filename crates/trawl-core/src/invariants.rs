//! Invariant checks excluded from coverage reports.

#![cfg_attr(coverage_nightly, coverage(off))]

use std::any::TypeId;

use crate::ty::TypeInfo;

pub(crate) fn ensure_well_formed(info: &TypeInfo, id: TypeId) {
    if info.rust_id() != id {
        panic!(
            "TypeInfo: description of `{}` interned under a different TypeId \
             (Type::intern::<T> must describe T)",
            info.name()
        );
    }

    if info.kind().has_elem() != info.elem_fn().is_some() {
        panic!(
            "TypeInfo: `{}` of kind {} {} an element type",
            info.name(),
            info.kind(),
            if info.elem_fn().is_some() {
                "must not have"
            } else {
                "requires"
            }
        );
    }
}
