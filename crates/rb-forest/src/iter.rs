//! Std iterators over the in-order sequence, built on the same
//! successor/predecessor walks as [`Cursor`](crate::Cursor).

use std::iter::FusedIterator;

use crate::types::{RbNode, NIL};
use crate::util::{first, last, next, prev, root};

pub struct Iter<'a, K, V> {
    arena: &'a [RbNode<K, V>],
    front: u32,
    back: u32,
    remaining: usize,
}

impl<'a, K, V> Iter<'a, K, V> {
    pub(crate) fn new(arena: &'a [RbNode<K, V>], len: usize) -> Self {
        let r = root(arena);
        Self {
            arena,
            front: first(arena, r),
            back: last(arena, r),
            remaining: len,
        }
    }
}

impl<K, V> Clone for Iter<'_, K, V> {
    fn clone(&self) -> Self {
        Self {
            arena: self.arena,
            front: self.front,
            back: self.back,
            remaining: self.remaining,
        }
    }
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let arena = self.arena;
        let n = self.front;
        self.front = next(arena, n);
        self.remaining -= 1;
        arena[n as usize].entry()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> DoubleEndedIterator for Iter<'_, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let arena = self.arena;
        let n = self.back;
        self.back = prev(arena, n);
        self.remaining -= 1;
        arena[n as usize].entry()
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}

impl<K, V> FusedIterator for Iter<'_, K, V> {}

pub struct Keys<'a, K, V> {
    pub(crate) inner: Iter<'a, K, V>,
}

impl<K, V> Clone for Keys<'_, K, V> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<'a, K, V> Iterator for Keys<'a, K, V> {
    type Item = &'a K;

    fn next(&mut self) -> Option<&'a K> {
        self.inner.next().map(|(k, _)| k)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> DoubleEndedIterator for Keys<'_, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(|(k, _)| k)
    }
}

impl<K, V> ExactSizeIterator for Keys<'_, K, V> {}

impl<K, V> FusedIterator for Keys<'_, K, V> {}

pub struct Values<'a, K, V> {
    pub(crate) inner: Iter<'a, K, V>,
}

impl<K, V> Clone for Values<'_, K, V> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<'a, K, V> Iterator for Values<'a, K, V> {
    type Item = &'a V;

    fn next(&mut self) -> Option<&'a V> {
        self.inner.next().map(|(_, v)| v)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> DoubleEndedIterator for Values<'_, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(|(_, v)| v)
    }
}

impl<K, V> ExactSizeIterator for Values<'_, K, V> {}

impl<K, V> FusedIterator for Values<'_, K, V> {}

/// Owning in-order iterator. Links are only read while entries are moved
/// out, so the walk stays valid; whatever is left is dropped with the arena.
pub struct IntoIter<K, V> {
    arena: Vec<RbNode<K, V>>,
    front: u32,
    back: u32,
    remaining: usize,
}

impl<K, V> IntoIter<K, V> {
    pub(crate) fn new(arena: Vec<RbNode<K, V>>, len: usize) -> Self {
        let r = root(&arena);
        let front = first(&arena, r);
        let back = last(&arena, r);
        Self {
            arena,
            front,
            back,
            remaining: len,
        }
    }

    fn take(&mut self, n: u32) -> Option<(K, V)> {
        debug_assert_ne!(n, NIL);
        self.remaining -= 1;
        self.arena[n as usize].kv.take()
    }
}

impl<K, V> Iterator for IntoIter<K, V> {
    type Item = (K, V);

    fn next(&mut self) -> Option<(K, V)> {
        if self.remaining == 0 {
            return None;
        }
        let n = self.front;
        self.front = next(&self.arena, n);
        self.take(n)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> DoubleEndedIterator for IntoIter<K, V> {
    fn next_back(&mut self) -> Option<(K, V)> {
        if self.remaining == 0 {
            return None;
        }
        let n = self.back;
        self.back = prev(&self.arena, n);
        self.take(n)
    }
}

impl<K, V> ExactSizeIterator for IntoIter<K, V> {}

impl<K, V> FusedIterator for IntoIter<K, V> {}
