//! Address space behavior.

use threadcell::foundation::Value;
use threadcell::storage::{AddressSpace, Cell, PrimitiveId};

#[test]
fn unwritten_addresses_read_empty() {
    let memory = AddressSpace::new();
    assert_eq!(memory.get(0), &Cell::Empty);
    assert_eq!(memory.get(-5), &Cell::Empty);
    assert_eq!(memory.get(i64::MAX), &Cell::Empty);
}

#[test]
fn any_address_is_writable() {
    let mut memory = AddressSpace::new();
    memory.set(-1, Cell::Literal(Value::Int(1)));
    memory.set(1 << 40, Cell::ThreadRef(3));
    assert_eq!(memory.get(-1), &Cell::Literal(Value::Int(1)));
    assert_eq!(memory.get(1 << 40), &Cell::ThreadRef(3));
    assert_eq!(memory.highest(), Some(1 << 40));
}

#[test]
fn snapshots_are_independent() {
    let mut memory = AddressSpace::new();
    memory.set(10, Cell::NativeOp(PrimitiveId(0)));
    let snapshot = memory.clone();
    memory.set(10, Cell::Literal(Value::Int(9)));
    memory.set(11, Cell::ThreadRef(10));

    assert_eq!(snapshot.get(10), &Cell::NativeOp(PrimitiveId(0)));
    assert_eq!(snapshot.len(), 1);
    assert_eq!(memory.len(), 2);
}

#[test]
fn range_walks_written_cells_in_order() {
    let mut memory = AddressSpace::new();
    for addr in [5, 1, 3, 9] {
        memory.set(addr, Cell::Literal(Value::Int(addr)));
    }
    let addresses: Vec<i64> = memory.range(2, 9).map(|(a, _)| a).collect();
    assert_eq!(addresses, vec![3, 5]);
}

#[test]
fn cells_read_as_data() {
    assert_eq!(Cell::Literal(Value::Int(4)).to_value(), Some(Value::Int(4)));
    assert_eq!(Cell::ThreadRef(12).to_value(), Some(Value::Int(12)));
    assert_eq!(Cell::NativeOp(PrimitiveId(1)).to_value(), None);
    assert_eq!(Cell::Empty.to_value(), None);
}
