//! Instrumented stub nodes for unit tests.
//!
//! A `StubNode` just wraps an integer; every capability computes eagerly on
//! the wrapped values. A shared `Tracker` counts constructions and drops so
//! tests can check that no node leaks or is freed twice.
use std::{
    panic::Location,
    sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    },
};

use crate::{
    SymFloatNode, SymFloatNodeImpl, SymIntError, SymIntNode, SymIntNodeImpl, floor_div, floor_mod,
};

#[derive(Debug, Default)]
pub(crate) struct Tracker {
    created: AtomicUsize,
    dropped: AtomicUsize,
}

impl Tracker {
    pub(crate) fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub(crate) fn created(&self) -> usize {
        self.created.load(Ordering::SeqCst)
    }

    pub(crate) fn dropped(&self) -> usize {
        self.dropped.load(Ordering::SeqCst)
    }

    pub(crate) fn live(&self) -> usize {
        self.created() - self.dropped()
    }
}

#[derive(Debug)]
pub(crate) struct StubNode {
    value: i64,
    tracker: Arc<Tracker>,
}

impl StubNode {
    pub(crate) fn create(tracker: &Arc<Tracker>, value: i64) -> SymIntNode {
        tracker.created.fetch_add(1, Ordering::SeqCst);
        Arc::new(Self {
            value,
            tracker: tracker.clone(),
        })
    }

    fn value_of(node: &SymIntNode) -> i64 {
        node.guard_int(Location::caller())
            .expect("stub nodes always guard")
    }

    fn lift(&self, other: &SymIntNode, op: fn(i64, i64) -> i64) -> SymIntNode {
        self.wrap(op(self.value, Self::value_of(other)))
    }

    fn compare(&self, other: &SymIntNode, op: fn(&i64, &i64) -> bool) -> SymIntNode {
        self.wrap(op(&self.value, &Self::value_of(other)) as i64)
    }
}

impl Drop for StubNode {
    fn drop(&mut self) {
        self.tracker.dropped.fetch_add(1, Ordering::SeqCst);
    }
}

impl SymIntNodeImpl for StubNode {
    fn wrap(&self, value: i64) -> SymIntNode {
        Self::create(&self.tracker, value)
    }

    fn add(&self, other: &SymIntNode) -> SymIntNode {
        self.lift(other, i64::wrapping_add)
    }

    fn sub(&self, other: &SymIntNode) -> SymIntNode {
        self.lift(other, i64::wrapping_sub)
    }

    fn mul(&self, other: &SymIntNode) -> SymIntNode {
        self.lift(other, i64::wrapping_mul)
    }

    fn floordiv(&self, other: &SymIntNode) -> SymIntNode {
        self.lift(other, floor_div)
    }

    fn modulo(&self, other: &SymIntNode) -> SymIntNode {
        self.lift(other, floor_mod)
    }

    fn sym_min(&self, other: &SymIntNode) -> SymIntNode {
        self.lift(other, i64::min)
    }

    fn sym_max(&self, other: &SymIntNode) -> SymIntNode {
        self.lift(other, i64::max)
    }

    fn neg(&self) -> SymIntNode {
        self.wrap(self.value.wrapping_neg())
    }

    fn sym_eq(&self, other: &SymIntNode) -> SymIntNode {
        self.compare(other, i64::eq)
    }

    fn sym_lt(&self, other: &SymIntNode) -> SymIntNode {
        self.compare(other, i64::lt)
    }

    fn sym_le(&self, other: &SymIntNode) -> SymIntNode {
        self.compare(other, i64::le)
    }

    fn sym_gt(&self, other: &SymIntNode) -> SymIntNode {
        self.compare(other, i64::gt)
    }

    fn sym_ge(&self, other: &SymIntNode) -> SymIntNode {
        self.compare(other, i64::ge)
    }

    fn to_bool(&self, _location: &'static Location<'static>) -> bool {
        self.value != 0
    }

    fn guard_int(&self, _location: &'static Location<'static>) -> Result<i64, SymIntError> {
        Ok(self.value)
    }

    fn sym_float(&self) -> SymFloatNode {
        Arc::new(StubFloatNode(self.value as f64))
    }

    fn str(&self) -> String {
        format!("stub({})", self.value)
    }
}

#[derive(Debug)]
pub(crate) struct StubFloatNode(f64);

impl SymFloatNodeImpl for StubFloatNode {
    fn guard_float(&self, _location: &'static Location<'static>) -> Result<f64, SymIntError> {
        Ok(self.0)
    }

    fn str(&self) -> String {
        format!("stub({})", self.0)
    }
}

/// A node of a different family, used to trip the family check.
#[derive(Debug)]
pub(crate) struct ForeignNode(pub(crate) i64);

impl ForeignNode {
    pub(crate) fn create(value: i64) -> SymIntNode {
        Arc::new(Self(value))
    }
}

impl SymIntNodeImpl for ForeignNode {
    fn wrap(&self, value: i64) -> SymIntNode {
        Self::create(value)
    }

    fn add(&self, _other: &SymIntNode) -> SymIntNode {
        unimplemented!()
    }

    fn sub(&self, _other: &SymIntNode) -> SymIntNode {
        unimplemented!()
    }

    fn mul(&self, _other: &SymIntNode) -> SymIntNode {
        unimplemented!()
    }

    fn floordiv(&self, _other: &SymIntNode) -> SymIntNode {
        unimplemented!()
    }

    fn modulo(&self, _other: &SymIntNode) -> SymIntNode {
        unimplemented!()
    }

    fn sym_min(&self, _other: &SymIntNode) -> SymIntNode {
        unimplemented!()
    }

    fn sym_max(&self, _other: &SymIntNode) -> SymIntNode {
        unimplemented!()
    }

    fn neg(&self) -> SymIntNode {
        Self::create(-self.0)
    }

    fn sym_eq(&self, _other: &SymIntNode) -> SymIntNode {
        unimplemented!()
    }

    fn sym_lt(&self, _other: &SymIntNode) -> SymIntNode {
        unimplemented!()
    }

    fn sym_le(&self, _other: &SymIntNode) -> SymIntNode {
        unimplemented!()
    }

    fn sym_gt(&self, _other: &SymIntNode) -> SymIntNode {
        unimplemented!()
    }

    fn sym_ge(&self, _other: &SymIntNode) -> SymIntNode {
        unimplemented!()
    }

    fn to_bool(&self, _location: &'static Location<'static>) -> bool {
        self.0 != 0
    }

    fn guard_int(&self, _location: &'static Location<'static>) -> Result<i64, SymIntError> {
        Ok(self.0)
    }

    fn sym_float(&self) -> SymFloatNode {
        Arc::new(StubFloatNode(self.0 as f64))
    }

    fn str(&self) -> String {
        format!("foreign({})", self.0)
    }
}
