//! Canonical structural kinds.
//!
//! Every type descriptor carries exactly one kind. The walker builder
//! dispatches on it; filter validation uses it to reject payloads that
//! cannot take part in cache-key equality.

use std::fmt;

/// Structural kind of a type.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
#[repr(u8)]
pub enum TypeKind {
    /// `()`.
    Unit = 0,
    Bool = 1,
    /// Signed integers.
    Int = 2,
    /// Unsigned integers.
    Uint = 3,
    Float = 4,
    Char = 5,
    /// `String` and `&'static str`.
    Str = 6,
    /// `Box<T>`, `Option<T>`: zero or one pointee.
    Pointer = 7,
    /// `[T; N]`: fixed-length sequence.
    Array = 8,
    /// `Vec<T>`: growable sequence.
    Slice = 9,
    /// Record with ordered fields.
    Struct = 10,
    /// Open sum-type slot whose concrete type is only known at runtime.
    Dynamic = 11,
    /// Associative containers. Never walked.
    Map = 12,
    /// Function pointers.
    Func = 13,
    /// Channel endpoints.
    Channel = 14,
    /// `*const T`, `*mut T`.
    RawPointer = 15,
    /// Type and capability handles.
    Descriptor = 16,
}

impl TypeKind {
    /// Convert from raw discriminant.
    pub fn from_u8(v: u8) -> Option<Self> {
        match v {
            0 => Some(Self::Unit),
            1 => Some(Self::Bool),
            2 => Some(Self::Int),
            3 => Some(Self::Uint),
            4 => Some(Self::Float),
            5 => Some(Self::Char),
            6 => Some(Self::Str),
            7 => Some(Self::Pointer),
            8 => Some(Self::Array),
            9 => Some(Self::Slice),
            10 => Some(Self::Struct),
            11 => Some(Self::Dynamic),
            12 => Some(Self::Map),
            13 => Some(Self::Func),
            14 => Some(Self::Channel),
            15 => Some(Self::RawPointer),
            16 => Some(Self::Descriptor),
            _ => None,
        }
    }

    /// Whether this is a scalar value kind (unit, bool, numbers, char, str).
    pub fn is_primitive(self) -> bool {
        matches!(
            self,
            Self::Unit
                | Self::Bool
                | Self::Int
                | Self::Uint
                | Self::Float
                | Self::Char
                | Self::Str
        )
    }

    /// Whether this is a sequence kind (Array, Slice).
    pub fn is_sequence(self) -> bool {
        matches!(self, Self::Array | Self::Slice)
    }

    /// Whether the type has a single element type (Pointer, Array, Slice).
    pub fn has_elem(self) -> bool {
        matches!(self, Self::Pointer | Self::Array | Self::Slice)
    }

    /// Whether the walker builder can descend into values of this kind.
    pub fn is_walkable(self) -> bool {
        matches!(
            self,
            Self::Pointer | Self::Array | Self::Slice | Self::Struct | Self::Dynamic
        )
    }

    /// Whether a value of this kind can be empty without being zero-sized:
    /// pointers, slices, maps, dynamic slots, functions and channels.
    pub fn is_nilable(self) -> bool {
        matches!(
            self,
            Self::Pointer
                | Self::Slice
                | Self::Map
                | Self::Dynamic
                | Self::Func
                | Self::Channel
                | Self::RawPointer
        )
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Unit => "unit",
            Self::Bool => "bool",
            Self::Int => "int",
            Self::Uint => "uint",
            Self::Float => "float",
            Self::Char => "char",
            Self::Str => "string",
            Self::Pointer => "ptr",
            Self::Array => "array",
            Self::Slice => "slice",
            Self::Struct => "struct",
            Self::Dynamic => "dynamic",
            Self::Map => "map",
            Self::Func => "func",
            Self::Channel => "chan",
            Self::RawPointer => "raw pointer",
            Self::Descriptor => "descriptor",
        }
    }
}

impl fmt::Display for TypeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
