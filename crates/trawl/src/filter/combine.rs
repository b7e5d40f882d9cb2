//! Filter combinators.

use trawl_core::{Field, Type};

use super::{Filter, FilterRef};
use crate::{Decision, Error, Reflect, Result};

/// Number of member slots in [`And`] and [`Or`].
pub const FILTER_CAPACITY: usize = 8;

/// Flips the self bit of the inner filter's decision and keeps its descend
/// bit. With no inner filter, visits nothing.
#[derive(Reflect, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct InvertSelf(pub Option<FilterRef>);

impl InvertSelf {
    pub fn new(inner: impl Into<FilterRef>) -> Self {
        Self(Some(inner.into()))
    }
}

impl Filter for InvertSelf {
    fn visit(&self, ty: Type, field: &Field) -> Decision {
        match &self.0 {
            Some(inner) => inner.visit(ty, field) ^ Decision::SELF,
            None => Decision::NONE,
        }
    }
}

/// Bitwise AND of every present member. No members means no decision, not
/// a vacuous "everything".
#[derive(Reflect, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct And(pub [Option<FilterRef>; FILTER_CAPACITY]);

impl Filter for And {
    fn visit(&self, ty: Type, field: &Field) -> Decision {
        fold(&self.0, ty, field, |acc, next| acc & next)
    }
}

/// Bitwise OR of every present member.
#[derive(Reflect, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Or(pub [Option<FilterRef>; FILTER_CAPACITY]);

impl Filter for Or {
    fn visit(&self, ty: Type, field: &Field) -> Decision {
        fold(&self.0, ty, field, |acc, next| acc | next)
    }
}

fn fold(
    members: &[Option<FilterRef>],
    ty: Type,
    field: &Field,
    combine: impl Fn(Decision, Decision) -> Decision,
) -> Decision {
    members
        .iter()
        .flatten()
        .map(|member| member.visit(ty, field))
        .reduce(combine)
        .unwrap_or(Decision::NONE)
}

/// Conjunction of the present filters.
///
/// No filters gives `None`. A single filter is returned as is, sharing its
/// allocation. Two or more are packed into an [`And`].
pub fn and<I>(filters: I) -> Result<Option<FilterRef>>
where
    I: IntoIterator,
    I::Item: Into<Option<FilterRef>>,
{
    Ok(match pack(filters)? {
        Packed::Empty => None,
        Packed::Single(filter) => Some(filter),
        Packed::Many(slots) => Some(FilterRef::new(And(slots))),
    })
}

/// Disjunction of the present filters. Collapses like [`and`].
pub fn or<I>(filters: I) -> Result<Option<FilterRef>>
where
    I: IntoIterator,
    I::Item: Into<Option<FilterRef>>,
{
    Ok(match pack(filters)? {
        Packed::Empty => None,
        Packed::Single(filter) => Some(filter),
        Packed::Many(slots) => Some(FilterRef::new(Or(slots))),
    })
}

enum Packed {
    Empty,
    Single(FilterRef),
    Many([Option<FilterRef>; FILTER_CAPACITY]),
}

fn pack<I>(filters: I) -> Result<Packed>
where
    I: IntoIterator,
    I::Item: Into<Option<FilterRef>>,
{
    let mut slots: [Option<FilterRef>; FILTER_CAPACITY] = Default::default();
    let mut len = 0;

    for filter in filters.into_iter().filter_map(Into::into) {
        let slot = slots.get_mut(len).ok_or(Error::FilterCapacity)?;
        *slot = Some(filter);
        len += 1;
    }

    Ok(match len {
        0 => Packed::Empty,
        1 => match slots[0].take() {
            Some(filter) => Packed::Single(filter),
            None => Packed::Empty,
        },
        _ => Packed::Many(slots),
    })
}
