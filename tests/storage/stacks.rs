//! Stack pointer semantics.

use proptest::prelude::*;
use threadcell::foundation::{ErrorKind, StackKind};
use threadcell::storage::Stack;

#[test]
fn empty_stack_operations_underflow() {
    let mut stack: Stack<i64> = Stack::new(StackKind::Return);
    for err in [
        stack.pointer().unwrap_err(),
        stack.peek().unwrap_err(),
        stack.pop().unwrap_err(),
    ] {
        assert_eq!(err.kind, ErrorKind::StackUnderflow(StackKind::Return));
    }
}

#[test]
fn index_access_is_bounded() {
    let mut stack = Stack::new(StackKind::Parameter);
    stack.push(1);
    stack.push(2);
    assert_eq!(stack.item(0).copied().unwrap(), 1);
    assert!(matches!(
        stack.item(2).unwrap_err().kind,
        ErrorKind::InvalidStackPointer { index: 2, len: 2, .. }
    ));
    assert!(stack.set_pointer(2).is_err());
    assert_eq!(stack.len(), 2);
}

proptest! {
    #[test]
    fn pushes_move_the_pointer(values in prop::collection::vec(any::<i64>(), 1..50)) {
        let mut stack = Stack::new(StackKind::Parameter);
        for &v in &values {
            stack.push(v);
        }
        let n = values.len();
        prop_assert_eq!(stack.pointer().unwrap(), n - 1);
        prop_assert_eq!(*stack.item(n - 1).unwrap(), values[n - 1]);
    }

    #[test]
    fn push_then_pop_restores(values in prop::collection::vec(any::<i64>(), 0..20), v in any::<i64>()) {
        let mut stack = Stack::new(StackKind::Parameter);
        for &x in &values {
            stack.push(x);
        }
        let before = stack.pointer().ok();
        stack.push(v);
        prop_assert_eq!(stack.pop().unwrap(), v);
        prop_assert_eq!(stack.pointer().ok(), before);
    }

    #[test]
    fn set_pointer_truncates(len in 1usize..40, seed in any::<usize>()) {
        let mut stack = Stack::new(StackKind::Parameter);
        for i in 0..len {
            stack.push(i);
        }
        let p = seed % len;
        stack.set_pointer(p).unwrap();
        prop_assert_eq!(stack.pointer().unwrap(), p);
        prop_assert_eq!(stack.len(), p + 1);
    }
}
