//! Contiguous slot storage with index-stable growth.
//!
//! An [`Arena`] owns a single `Vec` of slots addressed by [`NodeIndex`]
//! (1-based; slot `#i` lives at vector offset `i - 1`). Unused slots are
//! threaded into an intrusive free chain; the allocator half of the arena
//! lives in [`free_list`](crate::free_list).
//!
//! Growth doubles the slot count. Existing slots are never moved in index
//! space, so a [`NodeIndex`] handed out before a growth stays valid after it.
//! The new slots are linked in ascending order and *prepended* to the free
//! chain, so they are handed out before any slot freed earlier.

use crate::error::{Chain, CorruptionReason, ListError};
use crate::handle::NodeIndex;

/// One arena slot.
///
/// Occupied slots hold `Some(value)`; free slots hold `None`. `next` links
/// the slot into whichever chain it belongs to.
#[derive(Clone, Debug)]
pub(crate) struct Slot<T> {
    pub(crate) value: Option<T>,
    pub(crate) next: Option<NodeIndex>,
}

impl<T> Slot<T> {
    fn vacant(next: Option<NodeIndex>) -> Self {
        Self { value: None, next }
    }
}

/// Growable slot storage plus its free chain.
#[derive(Clone, Debug)]
pub struct Arena<T> {
    slots: Vec<Slot<T>>,
    /// First slot of the free chain.
    pub(crate) free_head: Option<NodeIndex>,
    /// Number of slots on the free chain.
    pub(crate) free_len: usize,
    /// Growth never takes the capacity past this many slots.
    max_capacity: u32,
    growths: u64,
}

impl<T> Arena<T> {
    /// Create an arena with `capacity` free slots and no ceiling beyond the
    /// index space.
    pub fn new(capacity: u32) -> Result<Self, ListError> {
        Self::with_limit(capacity, u32::MAX)
    }

    /// Create an arena with `capacity` free slots that may grow to at most
    /// `max_capacity` slots.
    ///
    /// A `capacity` above the ceiling is clamped to it. An arena of capacity
    /// 0 is valid; its first allocation grows it to one slot.
    pub fn with_limit(capacity: u32, max_capacity: u32) -> Result<Self, ListError> {
        let mut arena = Self {
            slots: Vec::new(),
            free_head: None,
            free_len: 0,
            max_capacity,
            growths: 0,
        };
        arena.extend_to(capacity.min(max_capacity) as usize)?;
        debug!(target: "arenalist", "arena created with {} slots", arena.capacity());
        Ok(arena)
    }

    /// Number of slots, occupied and free.
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// The growth ceiling in slots.
    pub fn max_capacity(&self) -> u32 {
        self.max_capacity
    }

    /// First slot of the free chain, if any.
    pub fn free_head(&self) -> Option<NodeIndex> {
        self.free_head
    }

    /// Number of slots on the free chain.
    pub fn free_len(&self) -> usize {
        self.free_len
    }

    /// Number of occupied slots.
    pub fn occupied_len(&self) -> usize {
        self.capacity().saturating_sub(self.free_len)
    }

    /// How many times the arena has grown since creation.
    pub fn growth_count(&self) -> u64 {
        self.growths
    }

    /// Whether `index` lies within `1..=capacity`.
    pub fn in_range(&self, index: NodeIndex) -> bool {
        index.slot() < self.slots.len()
    }

    /// The value in an occupied slot.
    pub fn get(&self, index: NodeIndex) -> Option<&T> {
        self.slots.get(index.slot())?.value.as_ref()
    }

    /// Mutable access to the value in an occupied slot.
    pub fn get_mut(&mut self, index: NodeIndex) -> Option<&mut T> {
        self.slots.get_mut(index.slot())?.value.as_mut()
    }

    /// Whether `index` is currently occupied.
    pub fn is_occupied(&self, index: NodeIndex) -> bool {
        self.get(index).is_some()
    }

    /// The link stored in slot `index`, whichever chain it is on.
    pub fn next(&self, index: NodeIndex) -> Option<NodeIndex> {
        self.slots.get(index.slot())?.next
    }

    /// Double the capacity (an empty arena grows to one slot).
    ///
    /// New slots are prepended to the free chain. If doubling would pass the
    /// ceiling the arena grows to the ceiling instead; an arena already at its
    /// ceiling fails with [`ListError::AllocationFailed`] and is left
    /// unchanged.
    pub fn grow(&mut self) -> Result<(), ListError> {
        let old = self.capacity();
        let doubled = old.saturating_mul(2).max(1);
        let target = doubled.min(self.max_capacity as usize);
        if target <= old {
            return Err(ListError::AllocationFailed {
                requested: doubled,
                limit: self.max_capacity,
            });
        }
        self.extend_to(target)?;
        self.growths += 1;
        debug!(target: "arenalist", "arena grew from {old} to {target} slots");
        Ok(())
    }

    /// Drop all slots and reset to an empty arena. The ceiling is kept.
    pub fn clear(&mut self) {
        self.slots = Vec::new();
        self.free_head = None;
        self.free_len = 0;
        self.growths = 0;
    }

    /// Append vacant slots up to `target` and prepend them to the free chain.
    fn extend_to(&mut self, target: usize) -> Result<(), ListError> {
        let old = self.slots.len();
        if target <= old {
            return Ok(());
        }
        self.slots
            .try_reserve_exact(target - old)
            .map_err(|_| ListError::AllocationFailed {
                requested: target,
                limit: self.max_capacity,
            })?;

        let tail_next = self.free_head;
        for slot in old..target {
            let next = if slot + 1 == target {
                tail_next
            } else {
                NodeIndex::from_slot(slot + 1)
            };
            self.slots.push(Slot::vacant(next));
        }
        self.free_head = NodeIndex::from_slot(old);
        self.free_len += target - old;
        Ok(())
    }

    /// Slot `index`, or a corruption error naming `chain` if it is out of range.
    pub(crate) fn slot(&self, index: NodeIndex, chain: Chain) -> Result<&Slot<T>, ListError> {
        let capacity = self.slots.len();
        self.slots
            .get(index.slot())
            .ok_or(ListError::corrupted(CorruptionReason::LinkOutOfRange {
                chain,
                index: index.get(),
                capacity,
            }))
    }

    /// Mutable slot `index`, or a corruption error naming `chain`.
    pub(crate) fn slot_mut(
        &mut self,
        index: NodeIndex,
        chain: Chain,
    ) -> Result<&mut Slot<T>, ListError> {
        let capacity = self.slots.len();
        self.slots
            .get_mut(index.slot())
            .ok_or(ListError::corrupted(CorruptionReason::LinkOutOfRange {
                chain,
                index: index.get(),
                capacity,
            }))
    }

    /// Walk `chain` from `start` and check it holds exactly `expected`
    /// in-range slots in the right state (filled for occupied, vacant for
    /// free). At most `expected + 1` links are followed, so a loop is caught
    /// as [`CorruptionReason::ChainTooLong`].
    pub(crate) fn verify_chain(
        &self,
        start: Option<NodeIndex>,
        chain: Chain,
        expected: usize,
    ) -> Result<(), CorruptionReason> {
        let capacity = self.slots.len();
        let mut current = start;
        for found in 0..expected {
            let index = current.ok_or(CorruptionReason::ChainTooShort {
                chain,
                expected,
                found,
            })?;
            let slot = self
                .slots
                .get(index.slot())
                .ok_or(CorruptionReason::LinkOutOfRange {
                    chain,
                    index: index.get(),
                    capacity,
                })?;
            let filled = slot.value.is_some();
            if filled != (chain == Chain::Occupied) {
                return Err(CorruptionReason::SlotStateMismatch {
                    chain,
                    index: index.get(),
                });
            }
            current = slot.next;
        }
        match current {
            None => Ok(()),
            Some(_) => Err(CorruptionReason::ChainTooLong { chain, expected }),
        }
    }
}
