//! Visit decisions.

use std::fmt;
use std::ops::{BitAnd, BitOr, BitXor, Not};

/// What a filter wants done with one node: visit it, descend into it, both,
/// or neither. The two facets are independent bits.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Decision(u8);

impl Decision {
    pub const NONE: Decision = Decision(0b00);
    /// Invoke the visitor on this node.
    pub const SELF: Decision = Decision(0b01);
    /// Build walkers for this node's children.
    pub const DESC: Decision = Decision(0b10);
    pub const BOTH: Decision = Decision(0b11);
    /// Every bit set, including ones with no meaning yet.
    pub const ALL: Decision = Decision(0xFF);

    pub const fn from_bits(bits: u8) -> Self {
        Self(bits)
    }

    pub const fn bits(self) -> u8 {
        self.0
    }

    pub const fn visits_self(self) -> bool {
        self.0 & Self::SELF.0 != 0
    }

    pub const fn descends(self) -> bool {
        self.0 & Self::DESC.0 != 0
    }

    pub const fn is_none(self) -> bool {
        self.0 == 0
    }
}

impl BitAnd for Decision {
    type Output = Self;

    fn bitand(self, rhs: Self) -> Self {
        Self(self.0 & rhs.0)
    }
}

impl BitOr for Decision {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitXor for Decision {
    type Output = Self;

    fn bitxor(self, rhs: Self) -> Self {
        Self(self.0 ^ rhs.0)
    }
}

impl Not for Decision {
    type Output = Self;

    fn not(self) -> Self {
        Self(!self.0)
    }
}

impl From<bool> for Decision {
    fn from(hit: bool) -> Self {
        if hit { Self::BOTH } else { Self::NONE }
    }
}

impl fmt::Debug for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::NONE => f.write_str("NONE"),
            Self::SELF => f.write_str("SELF"),
            Self::DESC => f.write_str("DESC"),
            Self::BOTH => f.write_str("BOTH"),
            Self::ALL => f.write_str("ALL"),
            Self(bits) => write!(f, "Decision({bits:#04x})"),
        }
    }
}
