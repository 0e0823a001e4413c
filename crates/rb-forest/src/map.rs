//! Ordered map façade over [`RbTree`].
//!
//! Keys are unique under the comparator. Inserting a key that is already
//! present keeps the stored entry; use [`TreeMap::get_or_insert_default`] or
//! [`TreeMap::get_mut`] to overwrite.

use std::cmp::Ordering;
use std::fmt;
use std::ops::Index;

use crate::cursor::Cursor;
use crate::error::{Result, TreeError};
use crate::iter::{IntoIter, Iter, Keys, Values};
use crate::tree::{default_less, RbTree};
use crate::types::NodeRef;

#[derive(Clone)]
pub struct TreeMap<K, V, C = fn(&K, &K) -> bool>
where
    C: Fn(&K, &K) -> bool,
{
    tree: RbTree<K, V, C>,
}

impl<K, V> TreeMap<K, V, fn(&K, &K) -> bool>
where
    K: Ord,
{
    pub fn new() -> Self {
        Self::with_comparator(default_less::<K>)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            tree: RbTree::with_capacity(capacity),
        }
    }
}

impl<K, V> Default for TreeMap<K, V, fn(&K, &K) -> bool>
where
    K: Ord,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V, C> TreeMap<K, V, C>
where
    C: Fn(&K, &K) -> bool,
{
    pub fn with_comparator(comparator: C) -> Self {
        Self {
            tree: RbTree::with_comparator(comparator),
        }
    }

    /// Underlying engine, for handle-level inspection.
    pub fn tree(&self) -> &RbTree<K, V, C> {
        &self.tree
    }

    pub fn len(&self) -> usize {
        self.tree.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }

    pub fn max_size(&self) -> usize {
        self.tree.max_size()
    }

    /// Inserts `key` unless an equivalent key is present.
    ///
    /// Returns the handle of the entry holding the key and whether it was
    /// newly inserted.
    ///
    /// # Errors
    ///
    /// When no node can be allocated. The map is then unchanged.
    pub fn insert(&mut self, key: K, value: V) -> Result<(NodeRef, bool)> {
        self.tree.insert(key, value)
    }

    /// Inserts with a position hint: the entry is placed right before `hint`
    /// when that keeps the order, otherwise by a normal descent.
    ///
    /// # Errors
    ///
    /// As [`TreeMap::insert`].
    pub fn insert_hint(&mut self, hint: NodeRef, key: K, value: V) -> Result<NodeRef> {
        self.tree
            .insert_with_hint(hint, key, value)
            .map(|(node, _)| node)
    }

    /// Value for `key`, inserting `V::default()` first when absent.
    ///
    /// # Errors
    ///
    /// When the missing entry cannot be allocated.
    pub fn get_or_insert_default(&mut self, key: K) -> Result<&mut V>
    where
        V: Default,
    {
        let node = match self.tree.find(&key) {
            Some(node) => node,
            None => self.tree.insert(key, V::default())?.0,
        };
        self.tree.value_mut(node).ok_or(TreeError::KeyNotFound)
    }

    /// Checked access.
    ///
    /// # Errors
    ///
    /// [`TreeError::KeyNotFound`] when no equivalent key is stored.
    pub fn at(&self, key: &K) -> Result<&V> {
        self.get(key).ok_or(TreeError::KeyNotFound)
    }

    /// Checked mutable access.
    ///
    /// # Errors
    ///
    /// [`TreeError::KeyNotFound`] when no equivalent key is stored.
    pub fn at_mut(&mut self, key: &K) -> Result<&mut V> {
        self.get_mut(key).ok_or(TreeError::KeyNotFound)
    }

    pub fn get(&self, key: &K) -> Option<&V> {
        self.tree.find(key).and_then(|node| self.tree.value(node))
    }

    pub fn get_key_value(&self, key: &K) -> Option<(&K, &V)> {
        self.tree.find(key).and_then(|node| self.tree.get(node))
    }

    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        let node = self.tree.find(key)?;
        self.tree.value_mut(node)
    }

    pub fn contains_key(&self, key: &K) -> bool {
        self.tree.contains(key)
    }

    /// Number of entries equivalent to `key`: `0` or `1`.
    pub fn count(&self, key: &K) -> usize {
        usize::from(self.contains_key(key))
    }

    /// Cursor at `key`, or the end cursor when absent.
    pub fn find(&self, key: &K) -> Cursor<'_, K, V, C> {
        self.tree.cursor(self.tree.find(key).unwrap_or(NodeRef::END))
    }

    /// Removes the entry for `key`; returns the number of entries removed.
    pub fn erase(&mut self, key: &K) -> usize {
        self.tree.erase_key(key)
    }

    /// Removes the entry at `node` and returns the handle of its successor.
    ///
    /// # Panics
    ///
    /// If `node` is the end position or names an erased entry.
    pub fn erase_at(&mut self, node: NodeRef) -> NodeRef {
        let after = self.tree.successor(node);
        self.tree.erase(node);
        after
    }

    /// Removes the half-open run `[first, last)` and returns `last`.
    ///
    /// # Panics
    ///
    /// If `last` is not reachable from `first` by successor steps.
    pub fn erase_range(&mut self, first: NodeRef, last: NodeRef) -> NodeRef {
        let mut curr = first;
        while curr != last {
            curr = self.erase_at(curr);
        }
        last
    }

    pub fn remove(&mut self, key: &K) -> Option<V> {
        self.tree.remove_entry(key).map(|(_, v)| v)
    }

    pub fn remove_entry(&mut self, key: &K) -> Option<(K, V)> {
        self.tree.remove_entry(key)
    }

    pub fn clear(&mut self) {
        self.tree.clear();
    }

    /// Exchanges contents (comparators included) with `other`.
    pub fn swap(&mut self, other: &mut Self) {
        std::mem::swap(&mut self.tree, &mut other.tree);
    }

    pub fn lower_bound(&self, key: &K) -> Cursor<'_, K, V, C> {
        self.tree.cursor(self.tree.lower_bound(key))
    }

    pub fn upper_bound(&self, key: &K) -> Cursor<'_, K, V, C> {
        self.tree.cursor(self.tree.upper_bound(key))
    }

    /// `(lower_bound(key), upper_bound(key))`; empty when `key` is absent.
    pub fn equal_range(&self, key: &K) -> (Cursor<'_, K, V, C>, Cursor<'_, K, V, C>) {
        (self.lower_bound(key), self.upper_bound(key))
    }

    pub fn key_comp(&self) -> &C {
        self.tree.comparator()
    }

    /// Orders `(key, value)` pairs by key only.
    pub fn value_comp(&self) -> impl Fn(&(K, V), &(K, V)) -> bool + '_ {
        let less = self.tree.comparator();
        move |a: &(K, V), b: &(K, V)| less(&a.0, &b.0)
    }

    pub fn first_key_value(&self) -> Option<(&K, &V)> {
        self.tree.minimum().and_then(|node| self.tree.get(node))
    }

    pub fn last_key_value(&self) -> Option<(&K, &V)> {
        self.tree.maximum().and_then(|node| self.tree.get(node))
    }

    pub fn begin(&self) -> Cursor<'_, K, V, C> {
        self.tree.begin()
    }

    pub fn end(&self) -> Cursor<'_, K, V, C> {
        self.tree.end()
    }

    pub fn iter(&self) -> Iter<'_, K, V> {
        self.tree.iter()
    }

    pub fn keys(&self) -> Keys<'_, K, V> {
        Keys {
            inner: self.tree.iter(),
        }
    }

    pub fn values(&self) -> Values<'_, K, V> {
        Values {
            inner: self.tree.iter(),
        }
    }
}

impl<K, V, C> fmt::Debug for TreeMap<K, V, C>
where
    K: fmt::Debug,
    V: fmt::Debug,
    C: Fn(&K, &K) -> bool,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K, V, C> PartialEq for TreeMap<K, V, C>
where
    K: PartialEq,
    V: PartialEq,
    C: Fn(&K, &K) -> bool,
{
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<K, V, C> Eq for TreeMap<K, V, C>
where
    K: Eq,
    V: Eq,
    C: Fn(&K, &K) -> bool,
{
}

/// Lexicographic over the in-order entries.
impl<K, V, C> PartialOrd for TreeMap<K, V, C>
where
    K: PartialOrd,
    V: PartialOrd,
    C: Fn(&K, &K) -> bool,
{
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.iter().partial_cmp(other.iter())
    }
}

impl<K, V, C> Ord for TreeMap<K, V, C>
where
    K: Ord,
    V: Ord,
    C: Fn(&K, &K) -> bool,
{
    fn cmp(&self, other: &Self) -> Ordering {
        self.iter().cmp(other.iter())
    }
}

impl<K, V, C> Index<&K> for TreeMap<K, V, C>
where
    C: Fn(&K, &K) -> bool,
{
    type Output = V;

    /// # Panics
    ///
    /// If the key is not present.
    fn index(&self, key: &K) -> &V {
        self.get(key).expect("no entry found for key")
    }
}

impl<K, V, C> Extend<(K, V)> for TreeMap<K, V, C>
where
    C: Fn(&K, &K) -> bool,
{
    /// Entries whose key is already present are dropped.
    ///
    /// # Panics
    ///
    /// If a node cannot be allocated.
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (k, v) in iter {
            if let Err(err) = self.insert(k, v) {
                panic!("TreeMap::extend: {err}");
            }
        }
    }
}

impl<K, V> FromIterator<(K, V)> for TreeMap<K, V, fn(&K, &K) -> bool>
where
    K: Ord,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::new();
        map.extend(iter);
        map
    }
}

impl<K, V, const N: usize> From<[(K, V); N]> for TreeMap<K, V, fn(&K, &K) -> bool>
where
    K: Ord,
{
    fn from(entries: [(K, V); N]) -> Self {
        entries.into_iter().collect()
    }
}

impl<'a, K, V, C> IntoIterator for &'a TreeMap<K, V, C>
where
    C: Fn(&K, &K) -> bool,
{
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K, V, C> IntoIterator for TreeMap<K, V, C>
where
    C: Fn(&K, &K) -> bool,
{
    type Item = (K, V);
    type IntoIter = IntoIter<K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.tree.into_iter()
    }
}
