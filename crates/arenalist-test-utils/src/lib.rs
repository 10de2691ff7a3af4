//! Test utilities for arenalist development.
//!
//! Provides an independent partition check ([`assert_invariants`]), a
//! [`RecordingReporter`] that keeps every reported error, [`ListSnapshot`]
//! for before/after comparisons, and small list fixtures.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

use std::collections::HashSet;

use arenalist::{ArenaList, ErrorKind, ErrorReporter, ListConfig, ListError, NodeIndex};

/// Reporter that stores every error it is given.
#[derive(Clone, Debug, Default)]
pub struct RecordingReporter {
    errors: Vec<ListError>,
}

impl RecordingReporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// All errors reported so far, oldest first.
    pub fn errors(&self) -> &[ListError] {
        &self.errors
    }

    /// Kinds of all errors reported so far.
    pub fn kinds(&self) -> Vec<ErrorKind> {
        self.errors.iter().map(ListError::kind).collect()
    }

    pub fn clear(&mut self) {
        self.errors.clear();
    }
}

impl ErrorReporter for RecordingReporter {
    fn report(&mut self, error: &ListError) {
        self.errors.push(error.clone());
    }
}

/// List type used throughout the integration tests.
pub type RecordedList = ArenaList<i32, RecordingReporter>;

/// Build a recorded list with the given initial capacity.
pub fn recorded_list(capacity: usize) -> RecordedList {
    recorded_list_with(ListConfig::new(capacity))
}

/// Build a recorded list from a config.
///
/// # Panics
///
/// Panics if the config is rejected.
pub fn recorded_list_with(config: ListConfig) -> RecordedList {
    ArenaList::with_reporter(config, RecordingReporter::new())
        .unwrap_or_else(|e| panic!("fixture config rejected: {e}"))
}

/// Build a recorded list containing `values` in order.
pub fn list_from(capacity: usize, values: &[i32]) -> RecordedList {
    let mut list = recorded_list(capacity);
    for (pos, &value) in values.iter().enumerate() {
        list.insert(pos, value)
            .unwrap_or_else(|e| panic!("fixture insert {value} at {pos} failed: {e}"));
    }
    list
}

/// Values in logical order.
pub fn values<R>(list: &ArenaList<i32, R>) -> Vec<i32> {
    list.iter().copied().collect()
}

/// Describe the first way `list` violates the chain invariants, if any.
///
/// Checked independently of [`ArenaList::check_integrity`]:
/// - the occupied chain has exactly `len` distinct, filled, in-range slots;
/// - the free chain has exactly `capacity - len` distinct, vacant, in-range slots;
/// - no slot is on both chains, and every slot is on one.
pub fn invariant_violation<T, R>(list: &ArenaList<T, R>) -> Option<String> {
    let capacity = list.capacity();
    let arena = list.arena();

    let mut occupied = HashSet::new();
    let mut current = list.head();
    while let Some(index) = current {
        if index.get() as usize > capacity {
            return Some(format!("occupied chain links to {index} beyond capacity {capacity}"));
        }
        if !occupied.insert(index) {
            return Some(format!("occupied chain revisits {index}"));
        }
        if !arena.is_occupied(index) {
            return Some(format!("occupied chain reaches vacant slot {index}"));
        }
        current = arena.next(index);
    }
    if occupied.len() != list.len() {
        return Some(format!(
            "occupied chain has {} nodes but len is {}",
            occupied.len(),
            list.len()
        ));
    }

    let mut free = HashSet::new();
    let mut current = list.free_head();
    while let Some(index) = current {
        if index.get() as usize > capacity {
            return Some(format!("free chain links to {index} beyond capacity {capacity}"));
        }
        if occupied.contains(&index) {
            return Some(format!("slot {index} is on both chains"));
        }
        if !free.insert(index) {
            return Some(format!("free chain revisits {index}"));
        }
        if arena.is_occupied(index) {
            return Some(format!("free chain reaches filled slot {index}"));
        }
        current = arena.next(index);
    }
    if free.len() != capacity - list.len() {
        return Some(format!(
            "free chain has {} slots but capacity - len is {}",
            free.len(),
            capacity - list.len()
        ));
    }
    if free.len() != list.free_len() {
        return Some(format!(
            "free chain has {} slots but free_len is {}",
            free.len(),
            list.free_len()
        ));
    }

    for raw in 1..=capacity {
        let Some(index) = u32::try_from(raw).ok().and_then(NodeIndex::new) else {
            return Some(format!("capacity {capacity} exceeds the index space"));
        };
        if !occupied.contains(&index) && !free.contains(&index) {
            return Some(format!("slot {index} is on neither chain"));
        }
    }
    None
}

/// Panic if `list` violates the chain invariants.
pub fn assert_invariants<T, R>(list: &ArenaList<T, R>) {
    if let Some(violation) = invariant_violation(list) {
        panic!("arena list invariant violated: {violation}");
    }
}

/// Observable state of a list, for checking that a rejected call changed
/// nothing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ListSnapshot<T> {
    pub len: usize,
    pub capacity: usize,
    pub head: Option<NodeIndex>,
    pub free_head: Option<NodeIndex>,
    pub nodes: Vec<(NodeIndex, T)>,
    pub free: Vec<NodeIndex>,
}

impl<T: Clone> ListSnapshot<T> {
    pub fn of<R>(list: &ArenaList<T, R>) -> Self {
        Self {
            len: list.len(),
            capacity: list.capacity(),
            head: list.head(),
            free_head: list.free_head(),
            nodes: list
                .indices()
                .map(|(index, value)| (index, value.clone()))
                .collect(),
            free: list.free_indices().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixture_lists_satisfy_invariants() {
        let list = list_from(2, &[1, 2, 3, 4, 5]);
        assert_eq!(values(&list), vec![1, 2, 3, 4, 5]);
        assert_invariants(&list);
        assert!(list.reporter().errors().is_empty());
    }

    #[test]
    fn recording_reporter_keeps_errors() {
        let mut list = recorded_list(1);
        let _ = list.remove_at(0);
        let _ = list.search(&3);
        assert_eq!(
            list.reporter().kinds(),
            vec![ErrorKind::InvalidIndex, ErrorKind::NotFound]
        );
        list.reporter_mut().clear();
        assert!(list.reporter().errors().is_empty());
    }

    #[test]
    fn snapshot_captures_both_chains() {
        let list = list_from(4, &[7, 8]);
        let snap = ListSnapshot::of(&list);
        assert_eq!(snap.len, 2);
        assert_eq!(snap.nodes.len(), 2);
        assert_eq!(snap.free.len(), 2);
        assert_eq!(snap, ListSnapshot::of(&list));
    }
}
