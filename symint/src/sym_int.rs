//! SymInt: a shape integer, either concrete or symbolic
//!
//! Concrete: a plain i64, no allocation, cloning is a copy.
//!
//! Symbolic: an owning handle to a SymIntNode. Cloning bumps the node's
//! reference count, dropping releases it.
//!
//! The packed word form reserves the top two bits for the tag (`10` marks a
//! symbolic word), so concrete values must stay out of that range. The range
//! is enforced on every construction, including results of the fast path.
use std::{fmt, panic::Location};

use crate::{SymFloat, SymIntError, SymIntNode, SymIntNodeImpl};

/// Tag bits of a packed symbolic word.
pub const SYMBOLIC_TAG: u64 = 1 << 63;
pub const TAG_MASK: u64 = 0b11 << 62;

/// Largest integer whose bit pattern collides with [`SYMBOLIC_TAG`].
/// Everything at or below it cannot be a concrete `SymInt`.
pub const MAX_UNREPRESENTABLE_INT: i64 = -(1 << 62) - 1;

#[derive(Clone)]
pub struct SymInt {
    repr: Repr,
}

#[derive(Clone)]
enum Repr {
    Concrete(i64),
    Symbolic(SymIntNode),
}

impl SymInt {
    /// Create a concrete value.
    ///
    /// # Panics
    /// if `value` lies in the reserved tag range.
    #[inline]
    #[track_caller]
    pub fn new(value: i64) -> Self {
        assert!(
            Self::check_range(value),
            "integer {value} collides with the symbolic tag"
        );
        Self {
            repr: Repr::Concrete(value),
        }
    }

    /// Take ownership of a node handle.
    #[inline]
    pub fn from_node(node: SymIntNode) -> Self {
        Self {
            repr: Repr::Symbolic(node),
        }
    }

    /// Whether `value` can be stored as a concrete `SymInt`.
    #[inline]
    pub const fn check_range(value: i64) -> bool {
        value.cast_unsigned() & TAG_MASK != SYMBOLIC_TAG
    }

    #[inline]
    pub fn is_symbolic(&self) -> bool {
        matches!(self.repr, Repr::Symbolic(_))
    }

    /// # Panics
    /// if the value is symbolic.
    #[inline]
    #[track_caller]
    pub fn as_int_unchecked(&self) -> i64 {
        match self.repr {
            Repr::Concrete(value) => value,
            Repr::Symbolic(_) => panic!("as_int_unchecked called on a symbolic SymInt"),
        }
    }

    #[inline]
    pub fn maybe_as_int(&self) -> Option<i64> {
        match self.repr {
            Repr::Concrete(value) => Some(value),
            Repr::Symbolic(_) => None,
        }
    }

    /// Borrow the node without touching its reference count.
    #[inline]
    pub fn as_node(&self) -> Option<&SymIntNode> {
        match &self.repr {
            Repr::Concrete(_) => None,
            Repr::Symbolic(node) => Some(node),
        }
    }

    /// Get a new owning handle to the node. `self` keeps its own reference.
    ///
    /// # Panics
    /// if the value is concrete.
    #[track_caller]
    pub fn to_node(&self) -> SymIntNode {
        match &self.repr {
            Repr::Symbolic(node) => node.clone(),
            Repr::Concrete(value) => panic!("to_node called on concrete SymInt {value}"),
        }
    }

    /// Force a concrete value, asking the node for a witness if symbolic.
    #[track_caller]
    pub fn guard_int(&self) -> Result<i64, SymIntError> {
        match &self.repr {
            Repr::Concrete(value) => Ok(*value),
            Repr::Symbolic(node) => node.guard_int(Location::caller()),
        }
    }

    pub fn to_sym_float(&self) -> SymFloat {
        match &self.repr {
            Repr::Concrete(value) => SymFloat::new(*value as f64),
            Repr::Symbolic(node) => SymFloat::from_node(node.sym_float()),
        }
    }
}

impl From<i64> for SymInt {
    #[inline]
    #[track_caller]
    fn from(value: i64) -> Self {
        Self::new(value)
    }
}

impl From<SymIntNode> for SymInt {
    fn from(node: SymIntNode) -> Self {
        Self::from_node(node)
    }
}

impl From<&SymInt> for SymFloat {
    fn from(value: &SymInt) -> Self {
        value.to_sym_float()
    }
}

impl From<SymInt> for SymFloat {
    fn from(value: SymInt) -> Self {
        value.to_sym_float()
    }
}

impl fmt::Display for SymInt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.repr {
            Repr::Concrete(value) => write!(f, "{value}"),
            Repr::Symbolic(node) => f.write_str(&node.str()),
        }
    }
}

impl fmt::Debug for SymInt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.repr {
            Repr::Concrete(value) => write!(f, "Concrete({value})"),
            Repr::Symbolic(node) => write!(f, "Symbolic({})", node.str()),
        }
    }
}
