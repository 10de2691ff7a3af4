//! Physical node indices.
//!
//! A [`NodeIndex`] names one slot of an [`Arena`](crate::arena::Arena). Indices
//! are 1-based: the value 0 is the "no node" sentinel and cannot be
//! represented, so an absent link is spelled `Option<NodeIndex>` and costs no
//! extra space.

use std::fmt;
use std::num::NonZeroU32;

/// Stable physical position of a node in its arena.
///
/// An index is assigned when a slot is allocated and stays the same until the
/// slot is released, across any number of arena growths.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct NodeIndex(NonZeroU32);

impl NodeIndex {
    /// Wrap a raw 1-based index. Returns `None` for the sentinel value 0.
    pub const fn new(raw: u32) -> Option<Self> {
        match NonZeroU32::new(raw) {
            Some(n) => Some(Self(n)),
            None => None,
        }
    }

    /// The raw 1-based index.
    pub const fn get(self) -> u32 {
        self.0.get()
    }

    /// Offset of this index within the arena's backing vector.
    pub(crate) fn slot(self) -> usize {
        (self.0.get() - 1) as usize
    }

    /// Index for the slot stored at vector offset `slot`.
    ///
    /// `None` if the resulting index does not fit the index space.
    pub(crate) fn from_slot(slot: usize) -> Option<Self> {
        slot.checked_add(1)
            .and_then(|raw| u32::try_from(raw).ok())
            .and_then(Self::new)
    }
}

impl fmt::Display for NodeIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

impl From<NodeIndex> for u32 {
    fn from(index: NodeIndex) -> Self {
        index.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_is_not_an_index() {
        assert!(NodeIndex::new(0).is_none());
        assert_eq!(NodeIndex::new(1).map(NodeIndex::get), Some(1));
    }

    #[test]
    fn slot_offsets_are_zero_based() {
        let idx = NodeIndex::new(5).unwrap();
        assert_eq!(idx.slot(), 4);
        assert_eq!(NodeIndex::from_slot(4), Some(idx));
    }

    #[test]
    fn from_slot_rejects_overflow() {
        assert!(NodeIndex::from_slot(u32::MAX as usize).is_none());
        assert_eq!(
            NodeIndex::from_slot(u32::MAX as usize - 1).map(NodeIndex::get),
            Some(u32::MAX)
        );
    }

    #[test]
    fn option_is_niche_optimised() {
        assert_eq!(
            std::mem::size_of::<Option<NodeIndex>>(),
            std::mem::size_of::<u32>()
        );
    }

    #[test]
    fn display_uses_hash_prefix() {
        assert_eq!(NodeIndex::new(12).unwrap().to_string(), "#12");
    }
}
