//! Integration test: end-to-end list behaviour.
//!
//! Walks the canonical three-element scenario (create with capacity 2,
//! insert 10/20/30, remove the middle) and checks growth, ordering, search,
//! index translation, LIFO slot reuse and that rejected calls leave the list
//! untouched.

use arenalist::{ErrorFlags, ListError, NodeIndex};
use arenalist_test_utils::{assert_invariants, list_from, recorded_list, values, ListSnapshot};

#[test]
fn three_inserts_into_capacity_two_grow_once() {
    let mut list = recorded_list(2);
    list.insert(0, 10).unwrap();
    list.insert(1, 20).unwrap();
    assert_eq!(list.growth_count(), 0);
    list.insert(2, 30).unwrap();

    assert_eq!(list.growth_count(), 1);
    assert!(list.capacity() >= 3);
    assert_eq!(list.len(), 3);
    assert_eq!(values(&list), vec![10, 20, 30]);
    assert_invariants(&list);

    let ten = list.search(&10).unwrap();
    let twenty = list.search(&20).unwrap();
    let thirty = list.search(&30).unwrap();
    assert_eq!(list.logical_index_of(ten).unwrap(), 0);
    assert_eq!(list.logical_index_of(twenty).unwrap(), 1);
    assert_eq!(list.logical_index_of(thirty).unwrap(), 2);
}

#[test]
fn removing_the_middle_keeps_neighbours_in_order() {
    let mut list = list_from(2, &[10, 20, 30]);
    let ten = list.search(&10).unwrap();
    let thirty = list.search(&30).unwrap();

    assert_eq!(list.remove_at(1).unwrap(), 20);
    assert_eq!(list.len(), 2);
    assert_eq!(list.search(&20), Err(ListError::NotFound));
    assert_eq!(list.search(&10), Ok(ten));
    assert_eq!(list.search(&30), Ok(thirty));
    assert_eq!(values(&list), vec![10, 30]);
    assert_invariants(&list);
}

#[test]
fn logical_index_tracks_removal() {
    let mut list = list_from(2, &[10, 20, 30]);
    let thirty = list.search(&30).unwrap();
    assert_eq!(list.logical_index_of(thirty).unwrap(), 2);
    list.remove_at(1).unwrap();
    assert_eq!(list.logical_index_of(thirty).unwrap(), 1);
    // Physical index unchanged by the removal.
    assert_eq!(list.search(&30).unwrap(), thirty);
}

#[test]
fn released_slot_is_reused_before_growth() {
    let mut list = list_from(3, &[1, 2, 3]);
    let capacity = list.capacity();
    let first = list.head().unwrap();

    list.remove_at(0).unwrap();
    let reused = list.insert(0, 4).unwrap();

    assert_eq!(reused, first);
    assert_eq!(list.capacity(), capacity);
    assert_eq!(list.growth_count(), 0);
    assert_invariants(&list);
}

#[test]
fn growth_hands_out_new_slots_before_older_free_ones() {
    let mut list = list_from(2, &[1, 2]);
    list.remove_at(0).unwrap(); // slot #1 back on the free chain
    list.grow().unwrap();

    let order: Vec<u32> = list.free_indices().map(NodeIndex::get).collect();
    assert_eq!(order, vec![3, 4, 1]);
    assert_eq!(list.push_back(5).unwrap().get(), 3);
    assert_invariants(&list);
}

#[test]
fn out_of_range_insert_changes_nothing() {
    let mut list = list_from(4, &[1, 2, 3]);
    let before = ListSnapshot::of(&list);

    assert_eq!(
        list.insert(4, 99),
        Err(ListError::InvalidPosition { pos: 4, len: 3 })
    );
    assert_eq!(
        list.insert(usize::MAX, 99),
        Err(ListError::InvalidPosition {
            pos: usize::MAX,
            len: 3
        })
    );

    assert_eq!(ListSnapshot::of(&list), before);
    assert_eq!(list.errors(), ErrorFlags::INVALID_INDEX);
}

#[test]
fn out_of_range_remove_changes_nothing() {
    let mut list = list_from(4, &[1, 2, 3]);
    let before = ListSnapshot::of(&list);

    assert_eq!(
        list.remove_at(3),
        Err(ListError::InvalidPosition { pos: 3, len: 3 })
    );
    assert!(list.remove_at(100).is_err());

    assert_eq!(ListSnapshot::of(&list), before);
}

#[test]
fn empty_list_rejects_removal_and_misses_search() {
    let mut list = recorded_list(1);
    let before = ListSnapshot::of(&list);
    assert!(matches!(
        list.remove_at(0),
        Err(ListError::InvalidPosition { pos: 0, len: 0 })
    ));
    assert_eq!(list.search(&0), Err(ListError::NotFound));
    assert_eq!(ListSnapshot::of(&list), before);
}

#[test]
fn logical_index_of_rejects_free_and_out_of_range_slots() {
    let mut list = list_from(4, &[1]);
    let free = list.free_head().unwrap();
    assert_eq!(list.logical_index_of(free), Err(ListError::NotFound));

    let beyond = NodeIndex::new(5).unwrap();
    assert_eq!(
        list.logical_index_of(beyond),
        Err(ListError::InvalidIndex {
            index: 5,
            capacity: 4
        })
    );
}

#[test]
fn duplicates_resolve_to_first_in_logical_order() {
    let mut list = recorded_list(4);
    list.push_back(7).unwrap();
    let second = list.push_back(7).unwrap();
    let first = list.push_front(7).unwrap();
    assert_ne!(first, second);
    assert_eq!(list.search(&7).unwrap(), first);
}

#[test]
fn create_populate_destroy_cycles_leave_no_residue() {
    for round in 0..5 {
        let mut list = list_from(2, &[1, 2, 3, 4, 5]);
        list.remove_at(round % 5).unwrap();
        assert_invariants(&list);

        list.destroy().unwrap();
        assert_eq!(list.capacity(), 0);
        assert_eq!(list.len(), 0);
        assert_eq!(list.head(), None);
        assert_eq!(list.free_head(), None);
    }
}

#[test]
fn recreate_after_destroy_starts_fresh() {
    let mut list = list_from(2, &[1, 2, 3]);
    for capacity in [1, 4, 2] {
        list.destroy().unwrap();
        assert_eq!(list.capacity(), 0);

        list.recreate(capacity).unwrap();
        assert_eq!(list.capacity(), capacity);
        assert_eq!(list.free_len(), capacity);
        assert!(list.is_empty());
        assert_invariants(&list);

        list.try_extend([9, 8, 7]).unwrap();
        assert_eq!(values(&list), vec![9, 8, 7]);
        assert_invariants(&list);
    }
}
