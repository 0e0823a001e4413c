//! Bidirectional cursor over a tree's in-order sequence.
//!
//! A cursor references one node, or the sentinel for the end position, and
//! moves purely by successor/predecessor link walking. Reading through the
//! end position yields `None`. Stepping past either boundary is a contract
//! violation and panics.

use std::fmt;

use crate::tree::RbTree;
use crate::types::{NodeRef, NIL};
use crate::util::{next, prev};

pub struct Cursor<'a, K, V, C = fn(&K, &K) -> bool>
where
    C: Fn(&K, &K) -> bool,
{
    tree: &'a RbTree<K, V, C>,
    node: u32,
}

impl<'a, K, V, C> Cursor<'a, K, V, C>
where
    C: Fn(&K, &K) -> bool,
{
    pub(crate) fn new(tree: &'a RbTree<K, V, C>, node: u32) -> Self {
        Self { tree, node }
    }

    /// Handle of the current position; survives later mutations of the tree
    /// until this node is erased.
    pub fn node(&self) -> NodeRef {
        NodeRef(self.node)
    }

    pub fn is_end(&self) -> bool {
        self.node == NIL
    }

    pub fn key(&self) -> Option<&'a K> {
        self.entry().map(|(k, _)| k)
    }

    pub fn value(&self) -> Option<&'a V> {
        self.entry().map(|(_, v)| v)
    }

    pub fn entry(&self) -> Option<(&'a K, &'a V)> {
        self.tree.arena()[self.node as usize].entry()
    }

    /// Steps to the in-order successor; from the maximum this reaches end.
    ///
    /// # Panics
    ///
    /// When already at end.
    pub fn move_next(&mut self) {
        assert!(self.node != NIL, "cursor advanced past end");
        self.node = next(self.tree.arena(), self.node);
    }

    /// Steps to the in-order predecessor; from end this reaches the maximum.
    ///
    /// # Panics
    ///
    /// When already at the first element (or at end of an empty tree).
    pub fn move_prev(&mut self) {
        let p = prev(self.tree.arena(), self.node);
        assert!(p != NIL, "cursor moved before begin");
        self.node = p;
    }

    /// Copy of this cursor advanced by one.
    pub fn next_cursor(mut self) -> Self {
        self.move_next();
        self
    }

    /// Copy of this cursor stepped back by one.
    pub fn prev_cursor(mut self) -> Self {
        self.move_prev();
        self
    }
}

impl<K, V, C> Clone for Cursor<'_, K, V, C>
where
    C: Fn(&K, &K) -> bool,
{
    fn clone(&self) -> Self {
        *self
    }
}

impl<K, V, C> Copy for Cursor<'_, K, V, C> where C: Fn(&K, &K) -> bool {}

/// Equal iff both cursors are over the same tree and at the same node.
impl<K, V, C> PartialEq for Cursor<'_, K, V, C>
where
    C: Fn(&K, &K) -> bool,
{
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.tree, other.tree) && self.node == other.node
    }
}

impl<K, V, C> Eq for Cursor<'_, K, V, C> where C: Fn(&K, &K) -> bool {}

impl<K, V, C> fmt::Debug for Cursor<'_, K, V, C>
where
    K: fmt::Debug,
    V: fmt::Debug,
    C: Fn(&K, &K) -> bool,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cursor")
            .field("node", &self.node)
            .field("entry", &self.entry())
            .finish()
    }
}
