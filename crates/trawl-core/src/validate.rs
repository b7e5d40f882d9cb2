//! Kind checks for callers that need a value or type of a particular shape.

use crate::kind::TypeKind;
use crate::reflect::{Reflect, ReflectRef};
use crate::ty::Type;

/// Value or type of the wrong shape.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum KindError {
    #[error("expected kind {expected}, got type {ty} of kind {actual}")]
    Mismatch {
        expected: TypeKind,
        ty: Type,
        actual: TypeKind,
    },

    #[error("expected pointer to kind {expected}, got {ty}")]
    PointeeMismatch { expected: TypeKind, ty: Type },

    #[error("expected non-empty pointer {ty}, got none")]
    EmptyPointer { ty: Type },
}

/// Ensure `ty` has kind `expected`. Returns the type for chaining.
pub fn validate_kind(ty: Type, expected: TypeKind) -> Result<Type, KindError> {
    let actual = ty.kind();
    if actual != expected {
        return Err(KindError::Mismatch {
            expected,
            ty,
            actual,
        });
    }
    Ok(ty)
}

/// Ensure the value is a pointer holding something.
pub fn validate_pointer(value: &dyn Reflect) -> Result<&dyn Reflect, KindError> {
    let ty = validate_kind(value.reflect_type(), TypeKind::Pointer)?;
    match value.reflect_ref() {
        ReflectRef::Pointer(Some(_)) => Ok(value),
        _ => Err(KindError::EmptyPointer { ty }),
    }
}

/// Ensure the value is a non-empty pointer whose fully dereferenced type has
/// kind `expected`. Inner pointer layers may be empty.
pub fn validate_pointer_to(
    value: &dyn Reflect,
    expected: TypeKind,
) -> Result<&dyn Reflect, KindError> {
    let value = validate_pointer(value)?;
    let ty = value.reflect_type();
    if ty.deref().kind() != expected {
        return Err(KindError::PointeeMismatch { expected, ty });
    }
    Ok(value)
}
