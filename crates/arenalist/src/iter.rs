//! Iterators over the occupied chain.

use crate::arena::Arena;
use crate::handle::NodeIndex;

/// Iterator over `(physical index, value)` pairs in logical order.
///
/// Yields at most the list's length, so a damaged chain cannot make it loop.
pub struct Indices<'a, T> {
    arena: &'a Arena<T>,
    next: Option<NodeIndex>,
    remaining: usize,
}

impl<'a, T> Indices<'a, T> {
    pub(crate) fn new(arena: &'a Arena<T>, head: Option<NodeIndex>, len: usize) -> Self {
        Self {
            arena,
            next: head,
            remaining: len,
        }
    }
}

impl<'a, T> Iterator for Indices<'a, T> {
    type Item = (NodeIndex, &'a T);

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let index = self.next.take()?;
        let value = self.arena.get(index)?;
        self.next = self.arena.next(index);
        self.remaining -= 1;
        Some((index, value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        // A damaged chain can end early, so only the upper bound is exact.
        (0, Some(self.remaining))
    }
}

/// Iterator over values in logical order.
pub struct Iter<'a, T> {
    inner: Indices<'a, T>,
}

impl<'a, T> Iter<'a, T> {
    pub(crate) fn new(inner: Indices<'a, T>) -> Self {
        Self { inner }
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        self.inner.next().map(|(_, value)| value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

#[cfg(test)]
mod tests {
    use crate::{ArenaList, ListConfig, NullReporter};

    #[test]
    fn size_hint_upper_bound_is_the_length() {
        let mut list = ArenaList::with_reporter(ListConfig::new(2), NullReporter).unwrap();
        list.try_extend([4, 5, 6]).unwrap();

        let mut iter = list.iter();
        assert_eq!(iter.size_hint(), (0, Some(3)));
        iter.next();
        assert_eq!(iter.size_hint(), (0, Some(2)));
        assert_eq!(iter.count(), 2);
        assert_eq!(list.free_indices().size_hint(), (0, Some(4)));
    }
}
