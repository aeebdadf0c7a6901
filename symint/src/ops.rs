//! Arithmetic and comparison on SymInt.
//!
//! Every entry point checks both tags first. Two concrete operands are
//! computed directly on the payloads. Anything else is normalized into a pair
//! of nodes and handed to the node's capability, and the result is wrapped
//! back up (arithmetic) or collapsed with `to_bool` (comparisons).
//!
//! Division and modulo round towards negative infinity on both paths, like
//! the node's `floordiv` and `modulo`, not like Rust's truncating `/` and `%`.
use std::{cmp::Ordering, ops, panic::Location};

use log::trace;

use crate::{SymInt, SymIntError, SymIntNode, SymIntNodeImpl, normalize::normalize};

type FixnumOp = fn(i64, i64) -> i64;
type NodeOp = fn(&SymIntNode, &SymIntNode) -> SymIntNode;
type FixnumCompare = fn(&i64, &i64) -> bool;

/// Floor division.
///
/// # Panics
/// if `b` is zero.
#[inline]
pub fn floor_div(a: i64, b: i64) -> i64 {
    let quotient = a.wrapping_div(b);
    if a.wrapping_rem(b) != 0 && ((a < 0) != (b < 0)) {
        quotient - 1
    } else {
        quotient
    }
}

/// Floor modulo, the result takes the sign of `b`.
///
/// # Panics
/// if `b` is zero.
#[inline]
pub fn floor_mod(a: i64, b: i64) -> i64 {
    let remainder = a.wrapping_rem(b);
    if remainder != 0 && ((remainder < 0) != (b < 0)) {
        remainder + b
    } else {
        remainder
    }
}

impl SymInt {
    #[track_caller]
    fn binop(&self, other: &SymInt, fixnum: FixnumOp, node: NodeOp) -> SymInt {
        if let (Some(a), Some(b)) = (self.maybe_as_int(), other.maybe_as_int()) {
            return SymInt::new(fixnum(a, b));
        }
        let [a, b] = normalize(self, other);
        let result = node(&a, &b);
        trace!("symbolic result {}", result.str());
        SymInt::from_node(result)
    }

    /// A guard taken by `to_bool` is attributed to the caller's comparison.
    #[track_caller]
    fn compare(&self, other: &SymInt, fixnum: FixnumCompare, node: NodeOp) -> bool {
        if let (Some(a), Some(b)) = (self.maybe_as_int(), other.maybe_as_int()) {
            return fixnum(&a, &b);
        }
        let [a, b] = normalize(self, other);
        node(&a, &b).to_bool(Location::caller())
    }

    pub fn min(&self, other: &SymInt) -> SymInt {
        self.binop(other, i64::min, |a, b| a.sym_min(b))
    }

    pub fn max(&self, other: &SymInt) -> SymInt {
        self.binop(other, i64::max, |a, b| a.sym_max(b))
    }

    /// Floor division that reports a concrete zero divisor as an error.
    pub fn checked_div(&self, other: &SymInt) -> Result<SymInt, SymIntError> {
        if other.maybe_as_int() == Some(0) {
            return Err(SymIntError::DivisionByZero);
        }
        Ok(self / other)
    }

    /// Floor modulo that reports a concrete zero divisor as an error.
    pub fn checked_rem(&self, other: &SymInt) -> Result<SymInt, SymIntError> {
        if other.maybe_as_int() == Some(0) {
            return Err(SymIntError::DivisionByZero);
        }
        Ok(self % other)
    }
}

impl ops::Add<&SymInt> for &SymInt {
    type Output = SymInt;

    fn add(self, rhs: &SymInt) -> SymInt {
        self.binop(rhs, i64::wrapping_add, |a, b| a.add(b))
    }
}

impl ops::Sub<&SymInt> for &SymInt {
    type Output = SymInt;

    fn sub(self, rhs: &SymInt) -> SymInt {
        self.binop(rhs, i64::wrapping_sub, |a, b| a.sub(b))
    }
}

impl ops::Mul<&SymInt> for &SymInt {
    type Output = SymInt;

    fn mul(self, rhs: &SymInt) -> SymInt {
        self.binop(rhs, i64::wrapping_mul, |a, b| a.mul(b))
    }
}

impl ops::Div<&SymInt> for &SymInt {
    type Output = SymInt;

    fn div(self, rhs: &SymInt) -> SymInt {
        self.binop(rhs, floor_div, |a, b| a.floordiv(b))
    }
}

impl ops::Rem<&SymInt> for &SymInt {
    type Output = SymInt;

    fn rem(self, rhs: &SymInt) -> SymInt {
        self.binop(rhs, floor_mod, |a, b| a.modulo(b))
    }
}

// owned operands forward to the borrowed impls above
macro_rules! forward_binop {
    ($($trait:ident::$method:ident),* $(,)?) => {$(
        impl ops::$trait<SymInt> for SymInt {
            type Output = SymInt;

            fn $method(self, rhs: SymInt) -> SymInt {
                ops::$trait::$method(&self, &rhs)
            }
        }

        impl ops::$trait<&SymInt> for SymInt {
            type Output = SymInt;

            fn $method(self, rhs: &SymInt) -> SymInt {
                ops::$trait::$method(&self, rhs)
            }
        }

        impl ops::$trait<SymInt> for &SymInt {
            type Output = SymInt;

            fn $method(self, rhs: SymInt) -> SymInt {
                ops::$trait::$method(self, &rhs)
            }
        }
    )*};
}

forward_binop!(Add::add, Sub::sub, Mul::mul, Div::div, Rem::rem);

impl ops::Mul<i64> for &SymInt {
    type Output = SymInt;

    fn mul(self, rhs: i64) -> SymInt {
        self * &SymInt::new(rhs)
    }
}

impl ops::Mul<i64> for SymInt {
    type Output = SymInt;

    fn mul(self, rhs: i64) -> SymInt {
        &self * &SymInt::new(rhs)
    }
}

impl ops::Neg for &SymInt {
    type Output = SymInt;

    fn neg(self) -> SymInt {
        match self.as_node() {
            None => SymInt::new(self.as_int_unchecked().wrapping_neg()),
            Some(node) => SymInt::from_node(node.neg()),
        }
    }
}

impl ops::Neg for SymInt {
    type Output = SymInt;

    fn neg(self) -> SymInt {
        -&self
    }
}

impl ops::AddAssign<&SymInt> for SymInt {
    fn add_assign(&mut self, rhs: &SymInt) {
        *self = &*self + rhs;
    }
}

impl ops::AddAssign<SymInt> for SymInt {
    fn add_assign(&mut self, rhs: SymInt) {
        *self += &rhs;
    }
}

impl ops::MulAssign<&SymInt> for SymInt {
    fn mul_assign(&mut self, rhs: &SymInt) {
        *self = &*self * rhs;
    }
}

impl ops::MulAssign<SymInt> for SymInt {
    fn mul_assign(&mut self, rhs: SymInt) {
        *self *= &rhs;
    }
}

impl PartialEq for SymInt {
    #[track_caller]
    fn eq(&self, other: &SymInt) -> bool {
        self.compare(other, i64::eq, |a, b| a.sym_eq(b))
    }

    #[track_caller]
    fn ne(&self, other: &SymInt) -> bool {
        !(self == other)
    }
}

impl PartialOrd for SymInt {
    #[track_caller]
    fn partial_cmp(&self, other: &SymInt) -> Option<Ordering> {
        if let (Some(a), Some(b)) = (self.maybe_as_int(), other.maybe_as_int()) {
            return Some(a.cmp(&b));
        }
        let ordering = if self == other {
            Ordering::Equal
        } else if self < other {
            Ordering::Less
        } else {
            Ordering::Greater
        };
        Some(ordering)
    }

    #[track_caller]
    fn lt(&self, other: &SymInt) -> bool {
        self.compare(other, i64::lt, |a, b| a.sym_lt(b))
    }

    #[track_caller]
    fn le(&self, other: &SymInt) -> bool {
        self.compare(other, i64::le, |a, b| a.sym_le(b))
    }

    #[track_caller]
    fn gt(&self, other: &SymInt) -> bool {
        self.compare(other, i64::gt, |a, b| a.sym_gt(b))
    }

    #[track_caller]
    fn ge(&self, other: &SymInt) -> bool {
        self.compare(other, i64::ge, |a, b| a.sym_ge(b))
    }
}

impl PartialEq<i64> for SymInt {
    #[track_caller]
    fn eq(&self, other: &i64) -> bool {
        *self == SymInt::new(*other)
    }

    #[track_caller]
    fn ne(&self, other: &i64) -> bool {
        *self != SymInt::new(*other)
    }
}

impl PartialOrd<i64> for SymInt {
    #[track_caller]
    fn partial_cmp(&self, other: &i64) -> Option<Ordering> {
        self.partial_cmp(&SymInt::new(*other))
    }

    #[track_caller]
    fn lt(&self, other: &i64) -> bool {
        *self < SymInt::new(*other)
    }

    #[track_caller]
    fn le(&self, other: &i64) -> bool {
        *self <= SymInt::new(*other)
    }

    #[track_caller]
    fn gt(&self, other: &i64) -> bool {
        *self > SymInt::new(*other)
    }

    #[track_caller]
    fn ge(&self, other: &i64) -> bool {
        *self >= SymInt::new(*other)
    }
}
