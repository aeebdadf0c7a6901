use thiserror::Error;

/// Recoverable failures of symbolic integer operations.
///
/// Contract violations (reading the payload of a symbolic value, building a
/// concrete value inside the reserved tag range) are panics, not errors.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SymIntError {
    #[error("division by zero")]
    DivisionByZero,

    /// The expression depends on a symbol that has no hint to guard on.
    #[error("cannot guard on unbacked expression {expr}")]
    Unbacked { expr: String },

    /// Any other failure reported by a node while producing a witness.
    #[error("failed to guard on {expr}: {reason}")]
    Guard { expr: String, reason: String },
}
