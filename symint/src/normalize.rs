use log::{trace, warn};

use crate::{SymInt, SymIntNode, SymIntNodeImpl};

/// Turn two operands into node handles so a binary capability can be called.
///
/// At least one operand must be symbolic. A concrete operand is wrapped
/// through its symbolic sibling, so it ends up in the same node family. The
/// operands themselves are left untouched; promotion only produces new
/// handles.
///
/// Both symbolic operands are expected to come from the same node family.
/// This is not checked in release builds.
///
/// # Panics
/// if both operands are concrete.
#[track_caller]
pub(crate) fn normalize(a: &SymInt, b: &SymInt) -> [SymIntNode; 2] {
    let common = match (a.as_node(), b.as_node()) {
        (Some(node), _) | (None, Some(node)) => node,
        (None, None) => panic!("normalize needs at least one symbolic operand"),
    };

    if let (Some(lhs), Some(rhs)) = (a.as_node(), b.as_node()) {
        if lhs.family() != rhs.family() {
            warn!(
                "mixing node families {} and {} in one operation",
                lhs.family(),
                rhs.family()
            );
            debug_assert_eq!(lhs.family(), rhs.family(), "mismatched node families");
        }
    }

    [promote(a, common), promote(b, common)]
}

fn promote(value: &SymInt, common: &SymIntNode) -> SymIntNode {
    match value.as_node() {
        Some(node) => node.clone(),
        None => {
            let concrete = value.as_int_unchecked();
            trace!("promoting {concrete} to a {} node", common.family());
            common.wrap(concrete)
        }
    }
}

#[cfg(test)]
mod normalize_tests {
    use std::sync::Arc;

    use super::*;
    use crate::test_node::{ForeignNode, StubNode, Tracker};

    #[test]
    fn concrete_operand_adopts_sibling_family() {
        let tracker = Tracker::new();
        let node = StubNode::create(&tracker, 5);
        let a = SymInt::new(3);
        let b = SymInt::from_node(node.clone());

        let [na, nb] = normalize(&a, &b);
        assert_eq!(na.family(), node.family());
        assert_eq!(na.str(), "stub(3)");
        assert!(Arc::ptr_eq(&nb, &node));
        assert_eq!(tracker.created(), 2);

        // the operands themselves stay as they were
        assert!(!a.is_symbolic());
        assert_eq!(a.as_int_unchecked(), 3);
    }

    #[test]
    fn symbolic_on_either_side() {
        let tracker = Tracker::new();
        let a = SymInt::from_node(StubNode::create(&tracker, 1));
        let b = SymInt::new(2);

        let [na, nb] = normalize(&a, &b);
        assert_eq!(na.str(), "stub(1)");
        assert_eq!(nb.str(), "stub(2)");
    }

    #[test]
    fn promoted_nodes_are_released() {
        let tracker = Tracker::new();
        let b = SymInt::from_node(StubNode::create(&tracker, 8));
        {
            let _nodes = normalize(&SymInt::new(1), &b);
            assert_eq!(tracker.live(), 2);
        }
        assert_eq!(tracker.live(), 1);
        drop(b);
        assert_eq!(tracker.live(), 0);
    }

    #[test]
    #[should_panic(expected = "at least one symbolic operand")]
    fn two_concrete_operands_panic() {
        normalize(&SymInt::new(1), &SymInt::new(2));
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "mismatched node families")]
    fn mismatched_families_assert_in_debug() {
        let tracker = Tracker::new();
        let a = SymInt::from_node(StubNode::create(&tracker, 1));
        let b = SymInt::from_node(ForeignNode::create(2));
        normalize(&a, &b);
    }
}
