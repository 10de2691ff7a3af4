//! Benchmark workloads for arenalist.
//!
//! - [`filled_list`]: a list of `0..n` built by appending
//! - [`scatter_positions`]: deterministic insert/remove positions that
//!   exercise the whole list rather than one end

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use arenalist::{ArenaList, ListConfig, NullReporter};

/// List type used by the benchmarks. Errors are not reported.
pub type BenchList = ArenaList<u64, NullReporter>;

/// Build an empty list with `capacity` preallocated slots.
pub fn empty_list(capacity: usize) -> BenchList {
    ArenaList::with_reporter(ListConfig::new(capacity), NullReporter)
        .unwrap_or_else(|e| panic!("bench config rejected: {e}"))
}

/// Build a list holding `0..n` in order, starting from a single slot so the
/// arena grows the whole way.
pub fn filled_list(n: u64) -> BenchList {
    let mut list = empty_list(1);
    list.try_extend(0..n)
        .unwrap_or_else(|e| panic!("bench fill failed: {e}"));
    list
}

/// Generate `count` positions for a list whose length starts at `len` and
/// changes by `delta` after each operation (+1 for inserts, -1 for removes).
///
/// Each position is valid for the length at that step: in `0..=len` for
/// inserts, `0..len` for removes. Uses a fixed multiplicative stride so runs
/// are repeatable.
pub fn scatter_positions(len: usize, count: usize, delta: isize) -> Vec<usize> {
    let mut positions = Vec::with_capacity(count);
    let mut current = len;
    for i in 0..count {
        let bound = if delta >= 0 { current + 1 } else { current };
        if bound == 0 {
            break;
        }
        positions.push(i.wrapping_mul(7919) % bound);
        current = current.saturating_add_signed(delta);
    }
    positions
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filled_list_holds_values_in_order() {
        let list = filled_list(10);
        assert_eq!(list.len(), 10);
        assert!(list.iter().copied().eq(0..10));
        assert!(list.growth_count() > 0);
    }

    #[test]
    fn insert_positions_stay_in_range() {
        let positions = scatter_positions(5, 50, 1);
        assert_eq!(positions.len(), 50);
        for (step, &pos) in positions.iter().enumerate() {
            assert!(pos <= 5 + step, "position {pos} out of range at step {step}");
        }
    }

    #[test]
    fn remove_positions_stop_when_empty() {
        let positions = scatter_positions(4, 10, -1);
        assert_eq!(positions.len(), 4);
        for (step, &pos) in positions.iter().enumerate() {
            assert!(pos < 4 - step);
        }
    }

    #[test]
    fn positions_are_deterministic() {
        assert_eq!(scatter_positions(100, 20, 1), scatter_positions(100, 20, 1));
    }
}
