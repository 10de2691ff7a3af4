//! The arena-backed singly linked list.
//!
//! [`ArenaList`] keeps its nodes in an [`Arena`] and threads the occupied
//! chain through it from `head`. Positions are 0-based logical ranks along
//! that chain; [`NodeIndex`] values are physical slots and stay put while
//! their node is alive.
//!
//! Every failing operation goes through one path: the error is recorded in
//! the list's error state, passed to the [`ErrorReporter`], checked against
//! the [`ErrorPolicy`](crate::ErrorPolicy), and returned.

use std::fmt;

use crate::arena::Arena;
use crate::config::ListConfig;
use crate::error::{Chain, CorruptionReason, ErrorFlags, ListError};
use crate::free_list::FreeIndices;
use crate::handle::NodeIndex;
use crate::iter::{Indices, Iter};
use crate::policy::{ErrorReporter, ErrorState, LogReporter};

/// Singly linked list whose nodes live in a growable arena.
///
/// Mutating operations take `&mut self`, as do the queries that record
/// [`ListError::NotFound`]. Side-effect-free lookups ([`find`](Self::find),
/// [`get`](Self::get), [`iter`](Self::iter)) take `&self`.
pub struct ArenaList<T, R = LogReporter> {
    arena: Arena<T>,
    head: Option<NodeIndex>,
    len: usize,
    config: ListConfig,
    errors: ErrorState,
    reporter: R,
    initialized: bool,
}

impl<T> ArenaList<T> {
    /// Create a list with room for `capacity` nodes before the first growth.
    ///
    /// Uses the default [`Accumulate`](crate::ErrorPolicy::Accumulate)
    /// policy, so a capacity of 0 is coerced to 1 (and recorded).
    pub fn new(capacity: usize) -> Result<Self, ListError> {
        Self::with_config(ListConfig::new(capacity))
    }

    /// Create a list from a full configuration, reporting through `log`.
    pub fn with_config(config: ListConfig) -> Result<Self, ListError> {
        Self::with_reporter(config, LogReporter)
    }
}

impl<T, R: ErrorReporter> ArenaList<T, R> {
    /// Create a list that reports errors to `reporter`.
    pub fn with_reporter(config: ListConfig, mut reporter: R) -> Result<Self, ListError> {
        let (arena, coerced) = match Self::prepare(&config) {
            Ok(prepared) => prepared,
            Err(err) => {
                reporter.report(&err);
                return Err(err);
            }
        };
        let mut list = Self {
            arena,
            head: None,
            len: 0,
            config,
            errors: ErrorState::default(),
            reporter,
            initialized: true,
        };
        if let Some(err) = coerced {
            list.fail(err);
        }
        Ok(list)
    }

    fn prepare(config: &ListConfig) -> Result<(Arena<T>, Option<ListError>), ListError> {
        let (capacity, coerced) = config.resolve_initial_capacity()?;
        let arena = Arena::with_limit(capacity, config.ceiling())?;
        Ok((arena, coerced))
    }

    /// Release all storage and mark the list unusable.
    ///
    /// Afterwards capacity and length are 0 and both chains are empty. Every
    /// later operation fails with [`ListError::NotInitialized`] until
    /// [`recreate`](Self::recreate). Destroying twice is an error.
    pub fn destroy(&mut self) -> Result<(), ListError> {
        if !self.initialized {
            return Err(self.fail(ListError::NotInitialized));
        }
        self.arena.clear();
        self.head = None;
        self.len = 0;
        self.initialized = false;
        debug!(target: "arenalist", "list destroyed");
        Ok(())
    }

    /// Rebuild the list in place with a fresh arena of `capacity` slots.
    ///
    /// Drops any existing nodes and clears all error state, corruption
    /// included. The configured ceiling and policy are kept. On failure the
    /// list is left as it was.
    pub fn recreate(&mut self, capacity: usize) -> Result<(), ListError> {
        let config = ListConfig {
            initial_capacity: capacity,
            ..self.config.clone()
        };
        let (arena, coerced) = match Self::prepare(&config) {
            Ok(prepared) => prepared,
            Err(err) => return Err(self.fail(err)),
        };
        self.arena = arena;
        self.head = None;
        self.len = 0;
        self.config = config;
        self.errors.reset();
        self.initialized = true;
        if let Some(err) = coerced {
            self.fail(err);
        }
        Ok(())
    }

    /// Insert `value` so that it ends up at logical position `pos`.
    ///
    /// `pos` may be anything in `0..=len`; `len` appends. Returns the new
    /// node's physical index. An out-of-range `pos` fails with
    /// [`ListError::InvalidPosition`] and changes nothing.
    pub fn insert(&mut self, pos: usize, value: T) -> Result<NodeIndex, ListError> {
        let result = self.try_insert(pos, value);
        self.settle(result)
    }

    fn try_insert(&mut self, pos: usize, value: T) -> Result<NodeIndex, ListError> {
        self.check_mutable()?;
        if pos > self.len {
            return Err(ListError::InvalidPosition { pos, len: self.len });
        }
        // Find the predecessor before allocating so a broken chain costs no slot.
        let prev = match pos {
            0 => None,
            _ => Some(self.nth_index(pos - 1)?),
        };
        let index = self.arena.allocate(value)?;
        let next = match prev {
            None => self.head.replace(index),
            Some(prev) => self
                .arena
                .slot_mut(prev, Chain::Occupied)?
                .next
                .replace(index),
        };
        self.arena.slot_mut(index, Chain::Occupied)?.next = next;
        self.len += 1;
        trace!(target: "arenalist", "inserted {index} at position {pos}");
        Ok(index)
    }

    /// Remove the node at logical position `pos` and return its value.
    ///
    /// `pos` must be in `0..len`. The freed slot goes to the front of the free
    /// chain and is the next one reused. An out-of-range `pos` (including
    /// any `pos` on an empty list) fails with [`ListError::InvalidPosition`]
    /// and changes nothing.
    pub fn remove_at(&mut self, pos: usize) -> Result<T, ListError> {
        let result = self.try_remove(pos);
        self.settle(result)
    }

    fn try_remove(&mut self, pos: usize) -> Result<T, ListError> {
        self.check_mutable()?;
        let head = match self.head {
            Some(head) if pos < self.len => head,
            _ => return Err(ListError::InvalidPosition { pos, len: self.len }),
        };
        let (prev, target) = match pos {
            0 => (None, head),
            _ => {
                let prev = self.nth_index(pos - 1)?;
                let target = self.arena.slot(prev, Chain::Occupied)?.next.ok_or(
                    ListError::corrupted(CorruptionReason::ChainTooShort {
                        chain: Chain::Occupied,
                        expected: pos + 1,
                        found: pos,
                    }),
                )?;
                (Some(prev), target)
            }
        };

        let vacant = ListError::corrupted(CorruptionReason::SlotStateMismatch {
            chain: Chain::Occupied,
            index: target.get(),
        });
        let slot = self.arena.slot_mut(target, Chain::Occupied)?;
        if slot.value.is_none() {
            return Err(vacant);
        }
        let after = slot.next.take();
        match prev {
            None => self.head = after,
            Some(prev) => self.arena.slot_mut(prev, Chain::Occupied)?.next = after,
        }

        let value = self.arena.release(target)?;
        self.len -= 1;
        trace!(target: "arenalist", "removed {target} from position {pos}");
        value.ok_or(vacant)
    }

    /// Insert at the front.
    pub fn push_front(&mut self, value: T) -> Result<NodeIndex, ListError> {
        self.insert(0, value)
    }

    /// Append at the logical end.
    pub fn push_back(&mut self, value: T) -> Result<NodeIndex, ListError> {
        self.insert(self.len, value)
    }

    /// Remove the first node, or return `Ok(None)` if the list is empty.
    ///
    /// A halted or poisoned list refuses the call even when empty.
    pub fn pop_front(&mut self) -> Result<Option<T>, ListError> {
        let checked = self.check_mutable();
        self.settle(checked)?;
        if self.len == 0 {
            return Ok(None);
        }
        self.remove_at(0).map(Some)
    }

    /// Append every value from `values`, walking to the tail only once.
    ///
    /// Stops at the first failure; values appended before it stay.
    pub fn try_extend<I>(&mut self, values: I) -> Result<(), ListError>
    where
        I: IntoIterator<Item = T>,
    {
        let result = self.try_extend_inner(values);
        self.settle(result)
    }

    fn try_extend_inner<I>(&mut self, values: I) -> Result<(), ListError>
    where
        I: IntoIterator<Item = T>,
    {
        self.check_mutable()?;
        let mut tail = match self.len {
            0 => None,
            n => Some(self.nth_index(n - 1)?),
        };
        for value in values {
            let index = self.arena.allocate(value)?;
            match tail {
                None => self.head = Some(index),
                Some(tail) => self.arena.slot_mut(tail, Chain::Occupied)?.next = Some(index),
            }
            tail = Some(index);
            self.len += 1;
        }
        Ok(())
    }

    /// Grow the arena now instead of waiting for the free chain to run out.
    pub fn grow(&mut self) -> Result<(), ListError> {
        let result = self.check_mutable().and_then(|()| self.arena.grow());
        self.settle(result)
    }

    /// Physical index of the first node equal to `value`, in logical order.
    ///
    /// Fails with [`ListError::NotFound`] (recorded like any other error) when
    /// nothing matches. Use [`find`](Self::find) for an unrecorded lookup.
    pub fn search(&mut self, value: &T) -> Result<NodeIndex, ListError>
    where
        T: PartialEq,
    {
        let result = self
            .check_initialized()
            .and_then(|()| self.find(value).ok_or(ListError::NotFound));
        self.settle(result)
    }

    /// Logical position of the node stored at physical `index`.
    ///
    /// Fails with [`ListError::InvalidIndex`] if `index` is beyond the
    /// capacity, or [`ListError::NotFound`] if the slot is not on the occupied
    /// chain (it is free).
    pub fn logical_index_of(&mut self, index: NodeIndex) -> Result<usize, ListError> {
        let result = self.try_logical_index_of(index);
        self.settle(result)
    }

    fn try_logical_index_of(&self, index: NodeIndex) -> Result<usize, ListError> {
        self.check_initialized()?;
        if !self.arena.in_range(index) {
            return Err(ListError::InvalidIndex {
                index: index.get(),
                capacity: self.arena.capacity(),
            });
        }
        self.indices()
            .position(|(candidate, _)| candidate == index)
            .ok_or(ListError::NotFound)
    }

    /// Walk both chains and check that they partition the arena.
    ///
    /// Verifies that the occupied chain holds exactly `len` filled slots, the
    /// free chain exactly `capacity - len` vacant slots, and neither loops
    /// or links out of range. Together these mean every slot is on exactly
    /// one chain. A failure poisons the list.
    pub fn check_integrity(&mut self) -> Result<(), ListError> {
        let result = self
            .check_initialized()
            .and_then(|()| self.verify().map_err(ListError::corrupted));
        self.settle(result)
    }

    fn verify(&self) -> Result<(), CorruptionReason> {
        let capacity = self.arena.capacity();
        self.arena
            .verify_chain(self.head, Chain::Occupied, self.len)?;
        let expected = capacity
            .checked_sub(self.len)
            .ok_or(CorruptionReason::ChainTooLong {
                chain: Chain::Occupied,
                expected: capacity,
            })?;
        if self.arena.free_len() != expected {
            return Err(CorruptionReason::FreeCountMismatch {
                recorded: self.arena.free_len(),
                expected,
            });
        }
        self.arena
            .verify_chain(self.arena.free_head(), Chain::Free, expected)
    }

    /// Forget recorded errors and lift a fail-fast halt.
    ///
    /// Corruption is not cleared; a poisoned list must be
    /// [`recreate`](Self::recreate)d.
    pub fn clear_errors(&mut self) {
        self.errors.clear();
    }

    /// Mutable access to the value at physical `index`, if occupied.
    pub fn get_mut(&mut self, index: NodeIndex) -> Option<&mut T> {
        self.arena.get_mut(index)
    }

    /// Mutable access to the reporter.
    pub fn reporter_mut(&mut self) -> &mut R {
        &mut self.reporter
    }

    fn check_initialized(&self) -> Result<(), ListError> {
        if self.initialized {
            Ok(())
        } else {
            Err(ListError::NotInitialized)
        }
    }

    fn check_mutable(&self) -> Result<(), ListError> {
        self.check_initialized()?;
        match self.errors.refusal() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    /// Physical index of the node at logical position `n`.
    fn nth_index(&self, n: usize) -> Result<NodeIndex, ListError> {
        let short = |found| {
            ListError::corrupted(CorruptionReason::ChainTooShort {
                chain: Chain::Occupied,
                expected: n + 1,
                found,
            })
        };
        let mut current = self.head.ok_or_else(|| short(0))?;
        for step in 1..=n {
            current = self
                .arena
                .slot(current, Chain::Occupied)?
                .next
                .ok_or_else(|| short(step))?;
        }
        Ok(current)
    }

    fn settle<U>(&mut self, result: Result<U, ListError>) -> Result<U, ListError> {
        result.map_err(|err| self.fail(err))
    }

    /// Record, report and return `err`.
    fn fail(&mut self, err: ListError) -> ListError {
        self.errors.absorb(&err, self.config.policy);
        self.reporter.report(&err);
        err
    }
}

impl<T, R> ArenaList<T, R> {
    /// Number of nodes.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the list has no nodes.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of arena slots, occupied and free.
    pub fn capacity(&self) -> usize {
        self.arena.capacity()
    }

    /// Physical index of the first node.
    pub fn head(&self) -> Option<NodeIndex> {
        self.head
    }

    /// First slot of the free chain.
    pub fn free_head(&self) -> Option<NodeIndex> {
        self.arena.free_head()
    }

    /// Number of free slots.
    pub fn free_len(&self) -> usize {
        self.arena.free_len()
    }

    /// How many times the arena has grown.
    pub fn growth_count(&self) -> u64 {
        self.arena.growth_count()
    }

    /// Whether the list is usable (not destroyed).
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Whether corruption has been detected.
    pub fn is_poisoned(&self) -> bool {
        self.errors.is_poisoned()
    }

    /// Whether a fail-fast list has stopped accepting mutations.
    pub fn is_halted(&self) -> bool {
        self.errors.is_halted()
    }

    /// Every error kind raised since the last [`clear_errors`](Self::clear_errors).
    pub fn errors(&self) -> ErrorFlags {
        self.errors.flags()
    }

    /// The most recent error.
    pub fn last_error(&self) -> Option<&ListError> {
        self.errors.last()
    }

    /// The configuration the list was built with.
    pub fn config(&self) -> &ListConfig {
        &self.config
    }

    /// The error reporter.
    pub fn reporter(&self) -> &R {
        &self.reporter
    }

    /// The backing arena.
    pub fn arena(&self) -> &Arena<T> {
        &self.arena
    }

    /// The value at physical `index`, if that slot is occupied.
    pub fn get(&self, index: NodeIndex) -> Option<&T> {
        self.arena.get(index)
    }

    /// Physical index of the first node equal to `value`, without recording
    /// anything.
    pub fn find(&self, value: &T) -> Option<NodeIndex>
    where
        T: PartialEq,
    {
        self.indices()
            .find(|(_, candidate)| *candidate == value)
            .map(|(index, _)| index)
    }

    /// Values in logical order.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter::new(self.indices())
    }

    /// `(physical index, value)` pairs in logical order.
    pub fn indices(&self) -> Indices<'_, T> {
        Indices::new(&self.arena, self.head, self.len)
    }

    /// Slots on the free chain, head first.
    pub fn free_indices(&self) -> FreeIndices<'_, T> {
        self.arena.free_indices()
    }
}

impl<'a, T, R> IntoIterator for &'a ArenaList<T, R> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Iter<'a, T> {
        self.iter()
    }
}

impl<T: fmt::Debug, R> fmt::Debug for ArenaList<T, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}
