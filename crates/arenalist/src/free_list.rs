//! O(1) slot allocation over the arena's intrusive free chain.
//!
//! [`Arena::allocate`] pops the head of the free chain (growing the arena
//! first when the chain is empty) and [`Arena::release`] pushes a slot back on
//! the front. Reuse is therefore LIFO: the most recently released slot is the
//! next one handed out.

use crate::arena::Arena;
use crate::error::{Chain, CorruptionReason, ListError};
use crate::handle::NodeIndex;

impl<T> Arena<T> {
    /// Take a slot off the free chain and store `value` in it.
    ///
    /// Grows the arena first if the free chain is empty; a failed growth is
    /// returned as [`ListError::AllocationFailed`] with the arena unchanged.
    /// A free head that is out of range or already filled means the chain is
    /// broken and is reported as [`ListError::Corrupted`].
    pub fn allocate(&mut self, value: T) -> Result<NodeIndex, ListError> {
        if self.free_head.is_none() {
            self.grow()?;
        }
        let index = self.free_head.ok_or(ListError::corrupted(
            CorruptionReason::ChainTooShort {
                chain: Chain::Free,
                expected: self.free_len,
                found: 0,
            },
        ))?;
        let remaining = self
            .free_len
            .checked_sub(1)
            .ok_or(ListError::corrupted(CorruptionReason::ChainTooLong {
                chain: Chain::Free,
                expected: 0,
            }))?;

        let slot = self.slot_mut(index, Chain::Free)?;
        if slot.value.is_some() {
            return Err(ListError::corrupted(CorruptionReason::SlotStateMismatch {
                chain: Chain::Free,
                index: index.get(),
            }));
        }
        let next = slot.next.take();
        slot.value = Some(value);

        self.free_head = next;
        self.free_len = remaining;
        trace!(target: "arenalist", "allocated slot {index}");
        Ok(index)
    }

    /// Clear slot `index` and push it onto the front of the free chain.
    ///
    /// Returns the value the slot held. Only the range `1..=capacity` is
    /// checked: the caller must release each slot exactly once, after
    /// unlinking it from wherever it was used.
    pub fn release(&mut self, index: NodeIndex) -> Result<Option<T>, ListError> {
        let capacity = self.capacity();
        if !self.in_range(index) {
            return Err(ListError::InvalidIndex {
                index: index.get(),
                capacity,
            });
        }
        let free_head = self.free_head;
        let slot = self.slot_mut(index, Chain::Free)?;
        let value = slot.value.take();
        slot.next = free_head;

        self.free_head = Some(index);
        self.free_len += 1;
        trace!(target: "arenalist", "released slot {index}");
        Ok(value)
    }

    /// Walk the free chain from its head.
    ///
    /// Stops after `capacity` slots even if the chain loops.
    pub fn free_indices(&self) -> FreeIndices<'_, T> {
        FreeIndices {
            arena: self,
            next: self.free_head,
            remaining: self.capacity(),
        }
    }
}

/// Iterator over the free chain, returned by [`Arena::free_indices`].
pub struct FreeIndices<'a, T> {
    arena: &'a Arena<T>,
    next: Option<NodeIndex>,
    remaining: usize,
}

impl<T> Iterator for FreeIndices<'_, T> {
    type Item = NodeIndex;

    fn next(&mut self) -> Option<NodeIndex> {
        if self.remaining == 0 {
            return None;
        }
        let index = self.next?;
        if !self.arena.in_range(index) {
            self.next = None;
            return None;
        }
        self.next = self.arena.next(index);
        self.remaining -= 1;
        Some(index)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        // A damaged chain can end early, so only the upper bound is exact.
        (0, Some(self.remaining))
    }
}
