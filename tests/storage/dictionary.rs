//! Dictionary resolution rules.

use proptest::prelude::*;
use threadcell::storage::Dictionary;

#[test]
fn names_fold_to_upper_case() {
    let mut dict = Dictionary::new();
    dict.define("square", 40, false, false);
    assert_eq!(dict.resolve_by_name("SQUARE").map(|e| e.address), Some(40));
    assert_eq!(dict.resolve_for_execution("Square").map(|e| e.address), Some(40));
    assert_eq!(dict.name_of(40), Some("SQUARE"));
}

#[test]
fn redefinition_shadows_but_keeps_reverse_binding() {
    let mut dict = Dictionary::new();
    dict.define("W", 10, false, false);
    dict.define("W", 20, false, false);
    assert_eq!(dict.resolve_by_name("W").map(|e| e.address), Some(20));
    assert_eq!(dict.resolve_by_address(10).map(|e| e.name.to_string()), Some("W".into()));
    assert_eq!(dict.resolve_by_address(10).map(|e| e.address), Some(10));
}

#[test]
fn first_name_at_an_address_wins() {
    let mut dict = Dictionary::new();
    dict.define("FIRST", 10, false, false);
    dict.define("ALIAS", 10, false, false);
    assert_eq!(dict.name_of(10), Some("FIRST"));
    assert_eq!(dict.resolve_by_name("ALIAS").map(|e| e.address), Some(10));
}

#[test]
fn hidden_words_resolve_by_name_only() {
    let mut dict = Dictionary::new();
    dict.define("W", 10, false, false);
    dict.define("W", 20, false, true);
    assert_eq!(dict.resolve_by_name("W").map(|e| e.address), Some(20));
    assert_eq!(dict.resolve_for_execution("W").map(|e| e.address), Some(10));
}

#[test]
fn remove_keeps_reverse_bindings() {
    let mut dict = Dictionary::new();
    dict.define("GONE", 30, true, false);
    assert!(dict.remove("gone"));
    assert!(!dict.remove("GONE"));
    assert!(dict.resolve_by_name("GONE").is_none());
    assert_eq!(dict.name_of(30), Some("GONE"));
    let entry = dict.resolve_by_address(30).unwrap();
    assert!(!entry.immediate);
}

#[test]
fn flags_change_in_place() {
    let mut dict = Dictionary::new();
    dict.define("W", 10, false, false);
    assert!(dict.set_immediate(10, true));
    assert!(dict.resolve_by_name("W").unwrap().immediate);
    assert!(dict.toggle_hidden(10));
    assert!(dict.resolve_for_execution("W").is_none());
    assert!(dict.toggle_hidden(10));
    assert!(dict.resolve_for_execution("W").is_some());
    assert!(!dict.set_hidden(99, true));
}

#[test]
fn visible_names_newest_first() {
    let mut dict = Dictionary::new();
    dict.define("A", 1, false, false);
    dict.define("B", 2, false, false);
    dict.define("C", 3, false, true);
    let names: Vec<String> = dict.visible_names().iter().map(ToString::to_string).collect();
    assert_eq!(names, vec!["B", "A"]);
}

#[test]
fn containing_finds_the_enclosing_word() {
    let mut dict = Dictionary::new();
    dict.define("A", 10, false, false);
    dict.define("B", 20, false, false);
    assert_eq!(dict.containing(15), Some((10, "A")));
    assert_eq!(dict.containing(20), Some((20, "B")));
    assert_eq!(dict.containing(5), None);
}

proptest! {
    #[test]
    fn most_recent_definition_wins(addresses in prop::collection::vec(0i64..1000, 1..20)) {
        let mut dict = Dictionary::new();
        for &a in &addresses {
            dict.define("X", a, false, false);
        }
        let last = addresses.last().copied();
        prop_assert_eq!(dict.resolve_by_name("X").map(|e| e.address), last);
        prop_assert_eq!(dict.name_of(addresses[0]), Some("X"));
    }
}
