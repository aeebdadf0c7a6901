//! Reference node family.
//!
//! A `ShapeEnv` hands out symbols, each optionally backed by a hint (the value
//! it stands for while tracing). Capabilities build expression trees over
//! those symbols without simplifying anything. Forcing a value out of a tree
//! (`guard_int`, or a comparison collapsing to `bool`) evaluates it against
//! the hints and records a guard in the environment.
use std::{
    any::Any,
    fmt,
    panic::Location,
    sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    },
};

use log::debug;
use parking_lot::Mutex;

use crate::{
    SymFloatNode, SymFloatNodeImpl, SymInt, SymIntError, SymIntNode, SymIntNodeImpl, floor_div,
    floor_mod,
};

/// A concrete value some expression was forced to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Guard {
    pub expr: String,
    pub value: i64,
    pub file: &'static str,
    pub line: u32,
}

#[derive(Debug, Clone, Default)]
pub struct ShapeEnv {
    inner: Arc<EnvInner>,
}

#[derive(Debug, Default)]
struct EnvInner {
    next_symbol: AtomicUsize,
    next_unbacked: AtomicUsize,
    guards: Mutex<Vec<Guard>>,
}

impl ShapeEnv {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a fresh symbol `s<n>` that guards to `hint`.
    pub fn create_symbol(&self, hint: i64) -> SymInt {
        let id = self.inner.next_symbol.fetch_add(1, Ordering::Relaxed);
        let name = format!("s{id}");
        debug!("created symbol {name} with hint {hint}");
        self.leaf(Expr::Symbol {
            name,
            hint: Some(hint),
        })
    }

    /// Create a fresh symbol `u<n>` without a hint. Nothing depending on it
    /// can be guarded.
    pub fn create_unbacked_symbol(&self) -> SymInt {
        let id = self.inner.next_unbacked.fetch_add(1, Ordering::Relaxed);
        let name = format!("u{id}");
        debug!("created unbacked symbol {name}");
        self.leaf(Expr::Symbol { name, hint: None })
    }

    /// Snapshot of the guards recorded so far, oldest first.
    pub fn guards(&self) -> Vec<Guard> {
        self.inner.guards.lock().clone()
    }

    fn leaf(&self, expr: Expr) -> SymInt {
        SymInt::from_node(Arc::new(ExprNode {
            env: self.inner.clone(),
            expr: Arc::new(expr),
        }))
    }
}

impl EnvInner {
    fn guard(&self, expr: &Expr, location: &'static Location<'static>) -> Result<i64, SymIntError> {
        let value = expr.eval().map_err(|err| match err {
            EvalError::Unbacked => SymIntError::Unbacked {
                expr: expr.to_string(),
            },
            EvalError::DivisionByZero => SymIntError::DivisionByZero,
        })?;

        let guard = Guard {
            expr: expr.to_string(),
            value,
            file: location.file(),
            line: location.line(),
        };
        debug!(
            "guard {} == {} at {}:{}",
            guard.expr, guard.value, guard.file, guard.line
        );
        self.guards.lock().push(guard);
        Ok(value)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BinaryOp {
    Add,
    Sub,
    Mul,
    FloorDiv,
    Mod,
    Min,
    Max,
    Eq,
    Lt,
    Le,
    Gt,
    Ge,
}

impl BinaryOp {
    fn symbol(self) -> &'static str {
        match self {
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::FloorDiv => "//",
            BinaryOp::Mod => "%",
            BinaryOp::Min => "min",
            BinaryOp::Max => "max",
            BinaryOp::Eq => "==",
            BinaryOp::Lt => "<",
            BinaryOp::Le => "<=",
            BinaryOp::Gt => ">",
            BinaryOp::Ge => ">=",
        }
    }

    fn apply(self, a: i64, b: i64) -> Result<i64, EvalError> {
        let value = match self {
            BinaryOp::Add => a.wrapping_add(b),
            BinaryOp::Sub => a.wrapping_sub(b),
            BinaryOp::Mul => a.wrapping_mul(b),
            BinaryOp::FloorDiv | BinaryOp::Mod if b == 0 => {
                return Err(EvalError::DivisionByZero);
            }
            BinaryOp::FloorDiv => floor_div(a, b),
            BinaryOp::Mod => floor_mod(a, b),
            BinaryOp::Min => a.min(b),
            BinaryOp::Max => a.max(b),
            BinaryOp::Eq => (a == b) as i64,
            BinaryOp::Lt => (a < b) as i64,
            BinaryOp::Le => (a <= b) as i64,
            BinaryOp::Gt => (a > b) as i64,
            BinaryOp::Ge => (a >= b) as i64,
        };
        Ok(value)
    }
}

#[derive(Debug)]
enum Expr {
    Constant(i64),
    Symbol { name: String, hint: Option<i64> },
    Binary(BinaryOp, Arc<Expr>, Arc<Expr>),
    Neg(Arc<Expr>),
}

enum EvalError {
    Unbacked,
    DivisionByZero,
}

impl Expr {
    fn eval(&self) -> Result<i64, EvalError> {
        match self {
            Expr::Constant(value) => Ok(*value),
            Expr::Symbol { hint, .. } => hint.ok_or(EvalError::Unbacked),
            Expr::Binary(op, lhs, rhs) => op.apply(lhs.eval()?, rhs.eval()?),
            Expr::Neg(inner) => Ok(inner.eval()?.wrapping_neg()),
        }
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Constant(value) => write!(f, "{value}"),
            Expr::Symbol { name, .. } => f.write_str(name),
            Expr::Binary(op @ (BinaryOp::Min | BinaryOp::Max), lhs, rhs) => {
                write!(f, "{}({lhs}, {rhs})", op.symbol())
            }
            Expr::Binary(op, lhs, rhs) => write!(f, "({lhs} {} {rhs})", op.symbol()),
            Expr::Neg(inner) => match &**inner {
                Expr::Neg(_) | Expr::Constant(i64::MIN..0) => write!(f, "-({inner})"),
                _ => write!(f, "-{inner}"),
            },
        }
    }
}

#[derive(Debug)]
struct ExprNode {
    env: Arc<EnvInner>,
    expr: Arc<Expr>,
}

impl ExprNode {
    fn sibling(&self, expr: Expr) -> SymIntNode {
        Arc::new(ExprNode {
            env: self.env.clone(),
            expr: Arc::new(expr),
        })
    }

    fn binary(&self, op: BinaryOp, other: &SymIntNode) -> SymIntNode {
        let Some(rhs) = (&**other as &dyn Any).downcast_ref::<ExprNode>() else {
            panic!("{} is not an expression node", other.str());
        };
        self.sibling(Expr::Binary(op, self.expr.clone(), rhs.expr.clone()))
    }
}

impl SymIntNodeImpl for ExprNode {
    fn wrap(&self, value: i64) -> SymIntNode {
        self.sibling(Expr::Constant(value))
    }

    fn add(&self, other: &SymIntNode) -> SymIntNode {
        self.binary(BinaryOp::Add, other)
    }

    fn sub(&self, other: &SymIntNode) -> SymIntNode {
        self.binary(BinaryOp::Sub, other)
    }

    fn mul(&self, other: &SymIntNode) -> SymIntNode {
        self.binary(BinaryOp::Mul, other)
    }

    fn floordiv(&self, other: &SymIntNode) -> SymIntNode {
        self.binary(BinaryOp::FloorDiv, other)
    }

    fn modulo(&self, other: &SymIntNode) -> SymIntNode {
        self.binary(BinaryOp::Mod, other)
    }

    fn sym_min(&self, other: &SymIntNode) -> SymIntNode {
        self.binary(BinaryOp::Min, other)
    }

    fn sym_max(&self, other: &SymIntNode) -> SymIntNode {
        self.binary(BinaryOp::Max, other)
    }

    fn neg(&self) -> SymIntNode {
        self.sibling(Expr::Neg(self.expr.clone()))
    }

    fn sym_eq(&self, other: &SymIntNode) -> SymIntNode {
        self.binary(BinaryOp::Eq, other)
    }

    fn sym_lt(&self, other: &SymIntNode) -> SymIntNode {
        self.binary(BinaryOp::Lt, other)
    }

    fn sym_le(&self, other: &SymIntNode) -> SymIntNode {
        self.binary(BinaryOp::Le, other)
    }

    fn sym_gt(&self, other: &SymIntNode) -> SymIntNode {
        self.binary(BinaryOp::Gt, other)
    }

    fn sym_ge(&self, other: &SymIntNode) -> SymIntNode {
        self.binary(BinaryOp::Ge, other)
    }

    /// # Panics
    /// if the comparison depends on an unbacked symbol.
    fn to_bool(&self, location: &'static Location<'static>) -> bool {
        match self.env.guard(&self.expr, location) {
            Ok(value) => value != 0,
            Err(err) => panic!("{err}"),
        }
    }

    fn guard_int(&self, location: &'static Location<'static>) -> Result<i64, SymIntError> {
        self.env.guard(&self.expr, location)
    }

    fn sym_float(&self) -> SymFloatNode {
        Arc::new(FloatExprNode {
            env: self.env.clone(),
            expr: self.expr.clone(),
        })
    }

    fn str(&self) -> String {
        self.expr.to_string()
    }
}

/// An integer expression viewed as a float.
#[derive(Debug)]
struct FloatExprNode {
    env: Arc<EnvInner>,
    expr: Arc<Expr>,
}

impl SymFloatNodeImpl for FloatExprNode {
    fn guard_float(&self, location: &'static Location<'static>) -> Result<f64, SymIntError> {
        let value = self.env.guard(&self.expr, location)?;
        Ok(value as f64)
    }

    fn str(&self) -> String {
        format!("float({})", self.expr)
    }
}
