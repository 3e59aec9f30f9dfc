//! Image snapshots across sessions and resets.

use crate::session;

#[test]
fn reset_forgets_user_words() {
    let mut s = session();
    s.eval(": TWICE 2 * ; 4 TWICE").unwrap();
    s.reset().unwrap();

    assert!(s.machine().params().is_empty());
    assert!(s.eval("4 TWICE").is_err());
    assert_eq!(s.eval("3 DUP + .").unwrap(), "6 ");
}

#[test]
fn snapshot_is_isolated_from_later_definitions() {
    let mut s = session();
    s.eval(": A 1 ;").unwrap();
    let image = s.machine().snapshot();

    s.eval(": A 2 ;").unwrap();
    assert_eq!(s.eval("A .").unwrap(), "2 ");

    s.machine_mut().restore(&image).unwrap();
    assert_eq!(s.eval("A .").unwrap(), "1 ");
}

#[test]
fn variables_are_part_of_the_image() {
    let mut s = session();
    s.eval("VARIABLE X 5 X !").unwrap();
    let image = s.machine().snapshot();

    s.eval("9 X !").unwrap();
    s.machine_mut().restore(&image).unwrap();
    assert_eq!(s.eval("X @ .").unwrap(), "5 ");
}
