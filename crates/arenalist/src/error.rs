//! List error types.
//!
//! Every fallible operation returns a [`ListError`]. Each error belongs to one
//! of five [`ErrorKind`]s, and the list keeps the union of the kinds it has
//! raised as [`ErrorFlags`].

use std::error::Error;
use std::fmt;

use bitflags::bitflags;

/// The two intrusive chains threaded through an arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Chain {
    /// Live nodes in logical order, rooted at the list head.
    Occupied,
    /// Unused slots, rooted at the free head.
    Free,
}

impl fmt::Display for Chain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Occupied => f.write_str("occupied"),
            Self::Free => f.write_str("free"),
        }
    }
}

/// Which structural check failed when corruption was detected.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CorruptionReason {
    /// A chain reached its end before covering the expected number of nodes.
    ChainTooShort {
        /// The chain being walked.
        chain: Chain,
        /// Number of nodes the bookkeeping says the chain holds.
        expected: usize,
        /// Number of nodes actually reached.
        found: usize,
    },
    /// A chain continues past the expected number of nodes (or loops).
    ChainTooLong {
        /// The chain being walked.
        chain: Chain,
        /// Number of nodes the bookkeeping says the chain holds.
        expected: usize,
    },
    /// A link points outside `1..=capacity`.
    LinkOutOfRange {
        /// The chain being walked.
        chain: Chain,
        /// The offending raw index.
        index: u32,
        /// Arena capacity at the time of the walk.
        capacity: usize,
    },
    /// A slot's contents disagree with the chain it was reached from
    /// (a vacant slot on the occupied chain, or a filled slot on the free chain).
    SlotStateMismatch {
        /// The chain being walked.
        chain: Chain,
        /// The offending raw index.
        index: u32,
    },
    /// The allocator's free-slot counter disagrees with `capacity - len`.
    FreeCountMismatch {
        /// Value held by the allocator.
        recorded: usize,
        /// Value implied by capacity and list length.
        expected: usize,
    },
}

impl fmt::Display for CorruptionReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ChainTooShort {
                chain,
                expected,
                found,
            } => write!(
                f,
                "{chain} chain ended after {found} nodes, expected {expected}"
            ),
            Self::ChainTooLong { chain, expected } => {
                write!(f, "{chain} chain runs past {expected} nodes")
            }
            Self::LinkOutOfRange {
                chain,
                index,
                capacity,
            } => write!(
                f,
                "{chain} chain links to #{index}, outside arena of capacity {capacity}"
            ),
            Self::SlotStateMismatch { chain, index } => {
                write!(f, "slot #{index} does not belong on the {chain} chain")
            }
            Self::FreeCountMismatch { recorded, expected } => write!(
                f,
                "free slot count is {recorded}, expected {expected}"
            ),
        }
    }
}

/// Coarse classification of a [`ListError`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Operation on a destroyed or never-initialised list.
    NullReference,
    /// A position, physical index or capacity outside its valid range.
    InvalidIndex,
    /// Backing storage could not be grown.
    AllocationFailure,
    /// A chain-consistency invariant was violated.
    CorruptedStructure,
    /// A query found no matching element.
    NotFound,
}

impl ErrorKind {
    /// Bit for this kind in an [`ErrorFlags`] set.
    pub fn flag(self) -> ErrorFlags {
        match self {
            Self::NullReference => ErrorFlags::NULL_REFERENCE,
            Self::InvalidIndex => ErrorFlags::INVALID_INDEX,
            Self::AllocationFailure => ErrorFlags::ALLOCATION_FAILURE,
            Self::CorruptedStructure => ErrorFlags::CORRUPTED,
            Self::NotFound => ErrorFlags::NOT_FOUND,
        }
    }

    /// Whether this kind is a fault, as opposed to a negative query result.
    pub fn is_fault(self) -> bool {
        self != Self::NotFound
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::NullReference => "null reference",
            Self::InvalidIndex => "invalid index",
            Self::AllocationFailure => "allocation failure",
            Self::CorruptedStructure => "corrupted structure",
            Self::NotFound => "not found",
        };
        f.write_str(name)
    }
}

bitflags! {
    /// Accumulated set of error kinds raised by a list.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    pub struct ErrorFlags: u8 {
        /// An operation ran on a destroyed list.
        const NULL_REFERENCE = 1 << 0;
        /// A position or index was out of range.
        const INVALID_INDEX = 1 << 1;
        /// Growth failed.
        const ALLOCATION_FAILURE = 1 << 2;
        /// Corruption was detected.
        const CORRUPTED = 1 << 3;
        /// A query came back empty.
        const NOT_FOUND = 1 << 4;
    }
}

/// Errors that can occur during list, allocator or arena operations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ListError {
    /// The list has been destroyed.
    NotInitialized,
    /// A logical position outside the range allowed by the operation.
    InvalidPosition {
        /// The requested position.
        pos: usize,
        /// List length at the time of the call.
        len: usize,
    },
    /// A physical index outside `1..=capacity`.
    InvalidIndex {
        /// The requested raw index.
        index: u32,
        /// Arena capacity at the time of the call.
        capacity: usize,
    },
    /// An initial capacity outside `1..=max`.
    InvalidCapacity {
        /// The requested capacity.
        requested: usize,
        /// The largest capacity the configuration allows.
        max: u32,
    },
    /// The arena could not grow to the requested number of slots.
    AllocationFailed {
        /// Capacity (in slots) that growth attempted to reach.
        requested: usize,
        /// The configured capacity ceiling.
        limit: u32,
    },
    /// A structural invariant was found broken.
    Corrupted {
        /// The check that failed.
        reason: CorruptionReason,
    },
    /// No element matched the query.
    NotFound,
    /// A fail-fast list refused the operation because of an earlier fault.
    Halted {
        /// Kind of the fault that halted the list.
        kind: ErrorKind,
    },
}

impl ListError {
    /// Classify this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::NotInitialized => ErrorKind::NullReference,
            Self::InvalidPosition { .. }
            | Self::InvalidIndex { .. }
            | Self::InvalidCapacity { .. } => ErrorKind::InvalidIndex,
            Self::AllocationFailed { .. } => ErrorKind::AllocationFailure,
            Self::Corrupted { .. } => ErrorKind::CorruptedStructure,
            Self::NotFound => ErrorKind::NotFound,
            Self::Halted { kind } => *kind,
        }
    }

    pub(crate) fn corrupted(reason: CorruptionReason) -> Self {
        Self::Corrupted { reason }
    }
}

impl fmt::Display for ListError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotInitialized => write!(f, "list is not initialized"),
            Self::InvalidPosition { pos, len } => {
                write!(f, "position {pos} out of range for list of length {len}")
            }
            Self::InvalidIndex { index, capacity } => {
                write!(
                    f,
                    "physical index {index} out of range for arena of capacity {capacity}"
                )
            }
            Self::InvalidCapacity { requested, max } => {
                write!(f, "invalid capacity {requested}: must be in 1..={max}")
            }
            Self::AllocationFailed { requested, limit } => {
                write!(
                    f,
                    "arena growth to {requested} slots failed (limit {limit} slots)"
                )
            }
            Self::Corrupted { reason } => write!(f, "list structure corrupted: {reason}"),
            Self::NotFound => write!(f, "no matching element"),
            Self::Halted { kind } => {
                write!(f, "list halted after an earlier {kind} error")
            }
        }
    }
}

impl Error for ListError {}
