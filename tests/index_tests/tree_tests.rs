//! ContactIndex Tests
//!
//! Tests verify:
//! - Insert / lookup / update / delete outcomes
//! - Ordering, balance and cached heights after every mutation
//! - Two-child delete moving the successor's whole payload
//! - Linear scans (number, group, name fragment)
//! - Clear and restartable enumeration

use std::collections::BTreeMap;

use contactdex::index::{Contact, ContactIndex, DeleteOutcome, InsertOutcome, UpdateOutcome};
use proptest::prelude::*;

// =============================================================================
// Helper Functions
// =============================================================================

/// 0..n visited with a prime stride, so inserts land all over the tree
fn scrambled(n: usize) -> Vec<usize> {
    (0..n).map(|i| (i * 7919) % n).collect()
}

fn name(i: usize) -> String {
    format!("name{:05}", i)
}

fn number(i: usize) -> String {
    format!("555-{:05}", i)
}

fn group(i: usize) -> String {
    format!("group{}", i % 4)
}

fn build(order: &[usize]) -> ContactIndex {
    let mut index = ContactIndex::new();
    for &i in order {
        assert_eq!(index.insert(name(i), number(i), group(i)), InsertOutcome::Inserted);
        index.check_invariants().unwrap();
    }
    index
}

/// Upper bound on AVL height for n nodes: 1.4405 * log2(n + 2)
fn avl_height_bound(n: usize) -> usize {
    (1.4405 * ((n + 2) as f64).log2()).floor() as usize
}

fn names_of(index: &ContactIndex) -> Vec<String> {
    index.iter().map(|c| c.name.clone()).collect()
}

// =============================================================================
// Basic Operations Tests
// =============================================================================

#[test]
fn test_new_index_is_empty() {
    let index = ContactIndex::new();
    assert!(index.is_empty());
    assert_eq!(index.len(), 0);
    assert_eq!(index.height(), 0);
    assert_eq!(index.iter().count(), 0);
    assert!(index.min().is_none());
    index.check_invariants().unwrap();
}

#[test]
fn test_three_contact_scenario() {
    let mut index = ContactIndex::new();
    index.insert("Bob", "555-1", "Friends");
    index.insert("Alice", "555-2", "Work");
    index.insert("Carl", "555-3", "Friends");

    assert_eq!(names_of(&index), vec!["Alice", "Bob", "Carl"]);
    assert!(index.height() <= 2);

    assert_eq!(index.update_number("Alice", "555-9"), UpdateOutcome::Updated);
    let alice = index.get("Alice").unwrap();
    assert_eq!(alice.number, "555-9");
    assert_eq!(alice.group, "Work");

    assert_eq!(index.remove("Bob"), DeleteOutcome::Deleted);
    assert!(index.get("Bob").is_none());
    assert!(index.get("Alice").is_some());
    assert!(index.get("Carl").is_some());
    index.check_invariants().unwrap();
}

#[test]
fn test_get_missing_key() {
    let mut index = ContactIndex::new();
    index.insert("Bob", "555-1", "Friends");

    assert!(index.get("Bobby").is_none());
    assert!(!index.contains("Al"));
    assert!(index.contains("Bob"));
}

#[test]
fn test_duplicate_insert_keeps_first_payload() {
    let mut index = ContactIndex::new();

    assert_eq!(index.insert("Bob", "555-1", "Friends"), InsertOutcome::Inserted);
    assert_eq!(index.insert("Bob", "999", "Work"), InsertOutcome::AlreadyExists);

    assert_eq!(index.len(), 1);
    assert_eq!(index.get("Bob"), Some(&Contact::new("Bob", "555-1", "Friends")));
}

#[test]
fn test_update_missing_key_is_not_found() {
    let mut index = ContactIndex::new();
    index.insert("Bob", "555-1", "Friends");

    assert_eq!(index.update_number("Alice", "1"), UpdateOutcome::NotFound);
    assert_eq!(index.get("Bob").unwrap().number, "555-1");
}

#[test]
fn test_update_does_not_change_shape() {
    let mut index = build(&scrambled(100));
    let height = index.height();

    for i in 0..100 {
        index.update_number(&name(i), "0");
    }

    assert_eq!(index.height(), height);
    assert!(index.iter().all(|c| c.number == "0"));
    index.check_invariants().unwrap();
}

#[test]
fn test_delete_missing_key_is_not_found() {
    let mut index = build(&[2, 1, 3]);

    assert_eq!(index.remove(&name(9)), DeleteOutcome::NotFound);
    assert_eq!(index.len(), 3);

    let mut empty = ContactIndex::new();
    assert_eq!(empty.remove("anyone"), DeleteOutcome::NotFound);
}

// =============================================================================
// Balance Tests
// =============================================================================

#[test]
fn test_sorted_inserts_stay_logarithmic() {
    let ascending: Vec<usize> = (0..1000).collect();
    let index = build(&ascending);
    assert!(index.height() <= avl_height_bound(1000));

    let descending: Vec<usize> = (0..1000).rev().collect();
    let index = build(&descending);
    assert!(index.height() <= avl_height_bound(1000));
}

// =============================================================================
// Delete Correctness Tests
// =============================================================================

#[test]
fn test_two_child_delete_keeps_successor_group() {
    let mut index = ContactIndex::new();
    index.insert("m", "1", "root");
    index.insert("f", "2", "left");
    index.insert("t", "3", "right");
    index.insert("p", "4", "successor");

    assert_eq!(index.remove("m"), DeleteOutcome::Deleted);

    assert_eq!(index.get("p"), Some(&Contact::new("p", "4", "successor")));
    assert_eq!(names_of(&index), vec!["f", "p", "t"]);
    index.check_invariants().unwrap();
}

#[test]
fn test_delete_root_until_empty() {
    let mut index = build(&scrambled(64));

    while let Some(first) = index.min().map(|c| c.name.clone()) {
        assert_eq!(index.remove(&first), DeleteOutcome::Deleted);
        index.check_invariants().unwrap();
    }
    assert!(index.is_empty());
}

// =============================================================================
// Enumeration Tests
// =============================================================================

#[test]
fn test_enumeration_is_sorted_and_complete() {
    let n = 257;
    let index = build(&scrambled(n));

    let names = names_of(&index);
    assert_eq!(names.len(), n);
    assert!(names.windows(2).all(|w| w[0] < w[1]));
}

#[test]
fn test_enumeration_restarts() {
    let index = build(&[3, 1, 2]);

    let mut first = index.iter();
    assert_eq!(first.next().unwrap().name, name(1));

    let again: Vec<_> = index.iter().collect();
    assert_eq!(again.len(), 3);
    assert_eq!(again[0].name, name(1));

    let via_into_iter: Vec<&Contact> = (&index).into_iter().collect();
    assert_eq!(via_into_iter, again);
}

#[test]
fn test_min_and_max() {
    let index = build(&scrambled(50));
    assert_eq!(index.min().unwrap().name, name(0));
    assert_eq!(index.max().unwrap().name, name(49));
}

// =============================================================================
// Scan Tests
// =============================================================================

#[test]
fn test_find_by_number_scans_whole_tree() {
    let mut index = ContactIndex::new();
    // Numbers deliberately not in name order
    index.insert("a", "999", "g");
    index.insert("b", "111", "g");
    index.insert("c", "555", "g");
    index.insert("d", "000", "g");

    assert_eq!(index.find_by_number("111").unwrap().name, "b");
    assert_eq!(index.find_by_number("000").unwrap().name, "d");
    assert_eq!(index.find_by_number("999").unwrap().name, "a");
    assert!(index.find_by_number("123").is_none());
}

#[test]
fn test_filter_group_in_name_order() {
    let mut index = ContactIndex::new();
    index.insert("Bob", "555-1", "Friends");
    index.insert("Alice", "555-2", "Work");
    index.insert("Carl", "555-3", "Friends");

    let friends: Vec<&str> = index.filter_group("Friends").map(|c| c.name.as_str()).collect();
    assert_eq!(friends, vec!["Bob", "Carl"]);
    assert_eq!(index.filter_group("Family").count(), 0);
}

#[test]
fn test_search_partial_matches_substrings() {
    let mut index = ContactIndex::new();
    for n in ["Annabel", "Hannah", "Joanna", "Bob"] {
        index.insert(n, "1", "g");
    }

    let matches: Vec<&str> = index.search_partial("nna").map(|c| c.name.as_str()).collect();
    assert_eq!(matches, vec!["Annabel", "Hannah", "Joanna"]);
}

// =============================================================================
// Clear Tests
// =============================================================================

#[test]
fn test_clear_empty_index() {
    let mut index = ContactIndex::new();
    index.clear();
    index.clear();
    assert!(index.is_empty());
    assert_eq!(index.iter().count(), 0);
}

#[test]
fn test_clear_populated_index_then_reuse() {
    let mut index = build(&scrambled(100));

    index.clear();
    assert!(index.is_empty());
    assert_eq!(index.height(), 0);
    assert_eq!(index.iter().count(), 0);
    index.clear();

    assert_eq!(index.insert("x", "1", "g"), InsertOutcome::Inserted);
    assert_eq!(index.len(), 1);
    index.check_invariants().unwrap();
}

#[test]
fn test_scan_iterators_borrow_only_the_index() {
    let mut index = ContactIndex::new();
    index.insert("Bob", "555-1", "Friends");
    index.insert("Carl", "555-3", "Friends");

    let friends = {
        let group = String::from("Friends");
        index.filter_group(&group)
    };
    let matches = {
        let fragment = "ar".to_string();
        index.search_partial(&fragment)
    };

    assert_eq!(friends.count(), 2);
    assert_eq!(matches.map(|c| c.name.as_str()).collect::<Vec<_>>(), vec!["Carl"]);
}

// =============================================================================
// Property Tests
// =============================================================================

/// Small key space so operations keep hitting the same contacts
const N_KEYS: usize = 64;

#[derive(Debug, Clone)]
enum Op {
    Insert(usize, String),
    Update(usize, String),
    Remove(usize),
    Get(usize),
}

fn arbitrary_op() -> impl Strategy<Value = Op> {
    prop_oneof![
        (0..N_KEYS, "[0-9]{3}").prop_map(|(k, n)| Op::Insert(k, n)),
        (0..N_KEYS, "[0-9]{3}").prop_map(|(k, n)| Op::Update(k, n)),
        (0..N_KEYS).prop_map(Op::Remove),
        (0..N_KEYS).prop_map(Op::Get),
    ]
}

proptest! {
    /// Insert a set of keys, then remove them in another order; the tree
    /// must stay an AVL tree with the right size after every step.
    #[test]
    fn prop_insert_then_remove_all(
        keys in prop::collection::hash_set(0..2000usize, 0..300),
        extra in prop::collection::hash_set(0..2000usize, 0..50),
    ) {
        let order: Vec<usize> = keys.iter().copied().collect();
        let mut index = ContactIndex::new();

        for (step, &i) in order.iter().enumerate() {
            prop_assert_eq!(index.insert(name(i), number(i), group(i)), InsertOutcome::Inserted);
            prop_assert!(index.check_invariants().is_ok());
            prop_assert_eq!(index.len(), step + 1);
        }
        prop_assert!(index.height() <= avl_height_bound(index.len()).max(1) || index.is_empty());

        for i in extra.difference(&keys) {
            prop_assert!(index.get(&name(*i)).is_none());
        }

        let mut removal = order.clone();
        removal.sort_unstable_by_key(|&i| (i * 7919) % 2003);
        for (step, &i) in removal.iter().enumerate() {
            prop_assert_eq!(index.remove(&name(i)), DeleteOutcome::Deleted);
            prop_assert_eq!(index.remove(&name(i)), DeleteOutcome::NotFound);
            prop_assert!(index.check_invariants().is_ok());
            prop_assert_eq!(index.len(), order.len() - step - 1);
        }
        prop_assert!(index.is_empty());
        prop_assert_eq!(index.height(), 0);
    }

    /// Removing any subset leaves every surviving contact's number and group
    /// attached to the right name.
    #[test]
    fn prop_remove_keeps_other_payloads(
        keys in prop::collection::hash_set(0..500usize, 1..200),
        victims in prop::collection::hash_set(0..500usize, 0..200),
    ) {
        let mut index = ContactIndex::new();
        for &i in &keys {
            index.insert(name(i), number(i), group(i));
        }

        for &i in &victims {
            let expected = if keys.contains(&i) { DeleteOutcome::Deleted } else { DeleteOutcome::NotFound };
            prop_assert_eq!(index.remove(&name(i)), expected);
            prop_assert!(index.check_invariants().is_ok());
        }

        let survivors: Vec<usize> = {
            let mut s: Vec<usize> = keys.difference(&victims).copied().collect();
            s.sort_unstable_by_key(|&i| name(i));
            s
        };
        let contacts: Vec<&Contact> = index.iter().collect();
        prop_assert_eq!(contacts.len(), survivors.len());
        for (c, &i) in contacts.iter().zip(&survivors) {
            prop_assert_eq!(&c.name, &name(i));
            prop_assert_eq!(&c.number, &number(i));
            prop_assert_eq!(&c.group, &group(i));
        }
    }

    /// Random mixes of operations agree with a BTreeMap model, and the tree
    /// upholds its invariants after each one.
    #[test]
    fn prop_operations_match_model(
        ops in prop::collection::vec(arbitrary_op(), 1..200),
    ) {
        let mut index = ContactIndex::new();
        let mut model: BTreeMap<String, (String, String)> = BTreeMap::new();

        for op in ops {
            match op {
                Op::Insert(k, n) => {
                    let expected = if model.contains_key(&name(k)) {
                        InsertOutcome::AlreadyExists
                    } else {
                        model.insert(name(k), (n.clone(), group(k)));
                        InsertOutcome::Inserted
                    };
                    prop_assert_eq!(index.insert(name(k), n, group(k)), expected);
                }
                Op::Update(k, n) => {
                    let expected = match model.get_mut(&name(k)) {
                        Some(entry) => {
                            entry.0 = n.clone();
                            UpdateOutcome::Updated
                        }
                        None => UpdateOutcome::NotFound,
                    };
                    prop_assert_eq!(index.update_number(&name(k), &n), expected);
                }
                Op::Remove(k) => {
                    let expected = match model.remove(&name(k)) {
                        Some(_) => DeleteOutcome::Deleted,
                        None => DeleteOutcome::NotFound,
                    };
                    prop_assert_eq!(index.remove(&name(k)), expected);
                }
                Op::Get(k) => {
                    let got = index.get(&name(k)).map(|c| (c.number.clone(), c.group.clone()));
                    prop_assert_eq!(got.as_ref(), model.get(&name(k)));
                }
            }

            prop_assert!(index.check_invariants().is_ok());
            prop_assert_eq!(index.len(), model.len());
        }

        let contacts: Vec<(String, String, String)> = index
            .iter()
            .map(|c| (c.name.clone(), c.number.clone(), c.group.clone()))
            .collect();
        let expected: Vec<(String, String, String)> = model
            .into_iter()
            .map(|(name, (number, group))| (name, number, group))
            .collect();
        prop_assert_eq!(contacts, expected);
    }
}
