//! Walker construction.
//!
//! The builder asks the filter about every structurally reachable node and
//! keeps only the parts of the type graph that lead to a visit.

use trawl_core::{Field, Type, TypeKind};

use super::{DynamicWalker, FieldWalker, Walker};
use crate::filter::FilterRef;

/// One level of the build stack. Frames borrow their parent, so the ancestor
/// chain lives on the call stack and costs nothing to unwind.
#[derive(Clone, Copy)]
pub(super) struct Frame<'p> {
    ty: Type,
    field: Field,
    parent: Option<&'p Frame<'p>>,
}

impl<'p> Frame<'p> {
    pub(super) fn root(ty: Type, field: Field) -> Self {
        Self {
            ty,
            field,
            parent: None,
        }
    }

    fn child(&'p self, ty: Type, field: Field) -> Frame<'p> {
        Frame {
            ty,
            field,
            parent: Some(self),
        }
    }

    fn ancestors(&self) -> impl Iterator<Item = &'p Frame<'p>> {
        std::iter::successors(self.parent, |frame| frame.parent)
    }

    /// Whether this frame's type already appears further up the chain.
    fn is_cyclic(&self) -> bool {
        self.ancestors().any(|frame| frame.ty == self.ty)
    }
}

pub(super) fn build(frame: &Frame<'_>, filter: &FilterRef) -> Option<Walker> {
    if frame.is_cyclic() {
        tracing::trace!(ty = %frame.ty, field = %frame.field, "skipping recursive occurrence");
        return None;
    }

    let decision = filter.visit(frame.ty, &frame.field);

    let inner = if decision.descends() {
        descend(frame, filter)
    } else {
        None
    };

    match (inner, decision.visits_self()) {
        (None, false) => None,
        (Some(inner), false) => Some(inner),
        (None, true) if frame.field.is_valid() => Some(Walker::Leaf(frame.field)),
        (None, true) => Some(Walker::Bare),
        (Some(inner), true) if frame.field.is_valid() => {
            Some(Walker::SelfField(frame.field, Box::new(inner)))
        }
        (Some(inner), true) => Some(Walker::SelfBare(Box::new(inner))),
    }
}

fn descend(frame: &Frame<'_>, filter: &FilterRef) -> Option<Walker> {
    let ty = frame.ty;

    match ty.kind() {
        TypeKind::Pointer => {
            let elem = ty.elem()?;
            let inner = build(&frame.child(elem, frame.field), filter)?;
            Some(Walker::Pointer(Box::new(inner)))
        }
        TypeKind::Array | TypeKind::Slice => {
            let elem = ty.elem()?;
            let inner = build(&frame.child(elem, Field::NONE), filter)?;
            Some(Walker::Sequence(Box::new(inner)))
        }
        TypeKind::Struct => {
            let fields: Vec<FieldWalker> = ty
                .fields()
                .iter()
                .enumerate()
                .filter(|(_, info)| info.is_public())
                .filter_map(|(index, info)| {
                    let child = frame.child(info.ty(), Field::new(ty, index));
                    let inner = build(&child, filter)?;
                    Some(FieldWalker { index, inner })
                })
                .collect();

            if fields.is_empty() {
                None
            } else {
                Some(Walker::aggregate(fields))
            }
        }
        TypeKind::Dynamic => Some(Walker::Dynamic(DynamicWalker {
            field: frame.field,
            filter: filter.clone(),
        })),
        _ => None,
    }
}
