//! Capability interface of symbolic nodes.
//!
//! `SymInt` never looks inside a node. Everything it needs goes through
//! [`SymIntNodeImpl`]: building new nodes from two operands, collapsing a
//! comparison node into a `bool`, forcing a concrete witness and printing.
//!
//! Nodes are shared through `Arc`, so a node implementation must be
//! `Send + Sync` for distinct `SymInt`s to be usable from several threads.
//! The `Any` bound lets a family downcast the other operand of a binary
//! capability to its own node type.
use std::{any::Any, fmt, panic::Location, sync::Arc};

use crate::SymIntError;

/// Owning handle to a symbolic integer node.
pub type SymIntNode = Arc<dyn SymIntNodeImpl>;

/// Owning handle to a symbolic float node.
pub type SymFloatNode = Arc<dyn SymFloatNodeImpl>;

pub trait SymIntNodeImpl: Any + fmt::Debug + Send + Sync {
    /// Build a node of this node's family holding a concrete value.
    fn wrap(&self, value: i64) -> SymIntNode;

    fn add(&self, other: &SymIntNode) -> SymIntNode;
    fn sub(&self, other: &SymIntNode) -> SymIntNode;
    fn mul(&self, other: &SymIntNode) -> SymIntNode;
    /// Division rounding towards negative infinity.
    fn floordiv(&self, other: &SymIntNode) -> SymIntNode;
    /// Remainder with the sign of the divisor.
    fn modulo(&self, other: &SymIntNode) -> SymIntNode;
    fn sym_min(&self, other: &SymIntNode) -> SymIntNode;
    fn sym_max(&self, other: &SymIntNode) -> SymIntNode;
    fn neg(&self) -> SymIntNode;

    fn sym_eq(&self, other: &SymIntNode) -> SymIntNode;
    fn sym_lt(&self, other: &SymIntNode) -> SymIntNode;
    fn sym_le(&self, other: &SymIntNode) -> SymIntNode;
    fn sym_gt(&self, other: &SymIntNode) -> SymIntNode;
    fn sym_ge(&self, other: &SymIntNode) -> SymIntNode;

    /// Collapse a comparison node into a native boolean.
    /// `location` is where the comparison was made.
    fn to_bool(&self, location: &'static Location<'static>) -> bool;

    /// Force a concrete witness for this node.
    /// `location` is where the guard was requested from.
    fn guard_int(&self, location: &'static Location<'static>) -> Result<i64, SymIntError>;

    fn sym_float(&self) -> SymFloatNode;

    fn str(&self) -> String;

    /// Identifies the node family. Operands of one operation are expected to
    /// share a family.
    fn family(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}

pub trait SymFloatNodeImpl: fmt::Debug + Send + Sync {
    fn guard_float(&self, location: &'static Location<'static>) -> Result<f64, SymIntError>;

    fn str(&self) -> String;
}
