use std::{fmt, panic::Location};

use crate::{SymFloatNode, SymFloatNodeImpl, SymIntError};

/// Float counterpart of [`SymInt`](crate::SymInt), either a concrete `f64` or
/// an owning handle to a symbolic float node.
#[derive(Clone)]
pub struct SymFloat {
    repr: Repr,
}

#[derive(Clone)]
enum Repr {
    Concrete(f64),
    Symbolic(SymFloatNode),
}

impl SymFloat {
    #[inline]
    pub fn new(value: f64) -> Self {
        Self {
            repr: Repr::Concrete(value),
        }
    }

    #[inline]
    pub fn from_node(node: SymFloatNode) -> Self {
        Self {
            repr: Repr::Symbolic(node),
        }
    }

    #[inline]
    pub fn is_symbolic(&self) -> bool {
        matches!(self.repr, Repr::Symbolic(_))
    }

    pub fn maybe_as_float(&self) -> Option<f64> {
        match self.repr {
            Repr::Concrete(value) => Some(value),
            Repr::Symbolic(_) => None,
        }
    }

    /// # Panics
    /// if the value is concrete.
    #[track_caller]
    pub fn to_node(&self) -> SymFloatNode {
        match &self.repr {
            Repr::Symbolic(node) => node.clone(),
            Repr::Concrete(value) => panic!("to_node called on concrete SymFloat {value}"),
        }
    }

    #[track_caller]
    pub fn guard_float(&self) -> Result<f64, SymIntError> {
        match &self.repr {
            Repr::Concrete(value) => Ok(*value),
            Repr::Symbolic(node) => node.guard_float(Location::caller()),
        }
    }
}

impl From<f64> for SymFloat {
    fn from(value: f64) -> Self {
        Self::new(value)
    }
}

impl fmt::Display for SymFloat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.repr {
            Repr::Concrete(value) => write!(f, "{value}"),
            Repr::Symbolic(node) => f.write_str(&node.str()),
        }
    }
}

impl fmt::Debug for SymFloat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.repr {
            Repr::Concrete(value) => write!(f, "Concrete({value})"),
            Repr::Symbolic(node) => write!(f, "Symbolic({})", node.str()),
        }
    }
}
