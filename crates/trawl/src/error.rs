use trawl_core::{KindError, Type, TypeKind};

use crate::filter::FILTER_CAPACITY;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// The filter's value graph holds something that cannot take part in
    /// cache-key equality.
    #[error("invalid filter {filter}: contains {ty} of kind {kind}")]
    InvalidFilter {
        filter: String,
        ty: Type,
        kind: TypeKind,
    },

    /// More non-empty filters than a combinator has slots for.
    #[error("exceeding filter capacity {}", FILTER_CAPACITY)]
    FilterCapacity,

    #[error(transparent)]
    Kind(#[from] KindError),
}

/// Result type for walking operations.
pub type Result<T> = std::result::Result<T, Error>;
