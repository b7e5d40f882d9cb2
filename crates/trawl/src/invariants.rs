//! Invariant checks excluded from coverage reports.

#![cfg_attr(coverage_nightly, coverage(off))]

use crate::walker::FieldWalker;

pub(crate) fn ensure_field_walkers(fields: &[FieldWalker]) {
    if fields.is_empty() {
        panic!("Walker: aggregate node without field walkers (builder must return no walker instead)");
    }
}

pub(crate) fn view_mismatch(expected: &str) -> ! {
    panic!("Walker: value does not expose a {expected} view (walker driven on a value of another type)")
}
