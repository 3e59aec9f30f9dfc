//! Single-step dispatch and subroutine linkage.

use threadcell::engine::{Status, Variable};
use threadcell::foundation::{ErrorKind, StackKind, Value};
use threadcell::storage::Cell;

use crate::{address_of, ints, machine};

#[test]
fn native_op_pushes_and_advances() {
    let (mut m, _) = machine();
    let foo = m.primitives().find("FOO").unwrap();
    m.memory_mut().set(200, Cell::NativeOp(foo));
    m.set_ip(200);

    assert_eq!(m.step().unwrap(), Status::Running);
    assert_eq!(ints(&m), vec![42]);
    assert_eq!(m.ip(), 201);
}

#[test]
fn thread_ref_sets_nip_only_inside_a_body() {
    let (mut m, _) = machine();
    m.memory_mut().set(300, Cell::ThreadRef(500));

    m.set_ip(300);
    m.set_nip(7);
    m.set_depth(0);
    m.step().unwrap();
    assert_eq!((m.ip(), m.nip()), (500, 7));

    m.set_ip(300);
    m.set_depth(1);
    m.step().unwrap();
    assert_eq!((m.ip(), m.nip()), (500, 301));
}

#[test]
fn literal_cells_are_inert() {
    let (mut m, _) = machine();
    m.memory_mut().set(400, Cell::Literal(Value::Int(5)));
    m.set_ip(400);
    m.step().unwrap();
    assert_eq!(m.ip(), 401);
    assert!(m.params().is_empty());
}

#[test]
fn empty_cell_is_unknown() {
    let (mut m, _) = machine();
    m.set_ip(9999);
    let err = m.step().unwrap_err();
    assert_eq!(err.kind, ErrorKind::UnknownCell(9999));
    assert_eq!(m.ip(), 9999);
}

#[test]
fn enter_exit_pair_restores_linkage() {
    let (mut m, _) = machine();
    m.run_source(": NOOP ;").unwrap();
    let noop = address_of(&m, "NOOP");

    m.set_depth(1);
    m.set_nip(777);
    let returns_before = m.returns().len();
    m.set_ip(noop);

    m.step().unwrap(); // DOCOL
    assert_eq!(m.depth(), 2);
    assert_eq!(m.returns().len(), returns_before + 1);
    m.step().unwrap(); // ThreadRef(EXIT)
    m.step().unwrap(); // EXIT

    assert_eq!(m.returns().len(), returns_before);
    assert_eq!(m.nip(), 777);
    assert_eq!(m.ip(), 777);
    assert_eq!(m.depth(), 1);
}

#[test]
fn exit_with_empty_return_stack_is_unbalanced() {
    let (mut m, _) = machine();
    m.returns_mut().clear();
    m.set_depth(1);
    m.set_ip(address_of(&m, "EXIT"));
    assert_eq!(m.step().unwrap_err().kind, ErrorKind::UnbalancedReturn);
}

#[test]
fn exit_at_depth_zero_is_invalid() {
    let (mut m, _) = machine();
    m.returns_mut().push(Value::Int(5));
    m.set_depth(0);
    m.set_ip(address_of(&m, "EXIT"));
    assert_eq!(m.step().unwrap_err().kind, ErrorKind::InvalidDepth);
    assert_eq!(m.returns().len(), 1);
}

#[test]
fn underflow_leaves_memory_and_dictionary_alone() {
    let (mut m, _) = machine();
    let memory = m.memory().clone();
    let dictionary = m.dictionary().clone();
    let returns = m.returns().len();
    let here = m.variable(Variable::Here).unwrap();

    m.set_ip(address_of(&m, "DROP"));
    let err = m.step().unwrap_err();

    assert_eq!(err.kind, ErrorKind::StackUnderflow(StackKind::Parameter));
    assert_eq!(m.memory(), &memory);
    assert_eq!(m.dictionary(), &dictionary);
    assert_eq!(m.returns().len(), returns);
    assert_eq!(m.variable(Variable::Here).unwrap(), here);
}

#[test]
fn step_n_runs_exact_transitions() {
    let (mut m, _) = machine();
    let foo = m.primitives().find("FOO").unwrap();
    for addr in 600..603 {
        m.memory_mut().set(addr, Cell::NativeOp(foo));
    }
    m.set_ip(600);
    m.step_n(2).unwrap();
    assert_eq!(ints(&m), vec![42, 42]);
    assert_eq!(m.ip(), 602);
}
