use std::fmt;

use log::{debug, trace};

use crate::cursor::Cursor;
use crate::error::{Result, TreeError};
use crate::iter::{IntoIter, Iter};
use crate::red_black::{self, assert_red_black_tree, attach, insert_position, remove, Slot};
use crate::types::{NodeRef, RbNode, NIL};
use crate::util::{self, first, get_l, get_r, key_of, last, next, prev};

pub(crate) fn default_less<K: Ord>(a: &K, b: &K) -> bool {
    a < b
}

/// Red-black tree engine.
///
/// Nodes live in a tree-owned arena. Slot [`NIL`] is the sentinel: its left
/// link is the root slot and it doubles as every leaf terminator and as the
/// end position. Erased slots are chained into a free list through their
/// right link and reused by later inserts.
///
/// `C` is a strict weak "less than" ordering fixed at construction; two keys
/// are equivalent when neither is less than the other.
#[derive(Clone)]
pub struct RbTree<K, V, C = fn(&K, &K) -> bool>
where
    C: Fn(&K, &K) -> bool,
{
    arena: Vec<RbNode<K, V>>,
    free: u32,
    len: usize,
    /// Arena slots allowed, sentinel included.
    slot_limit: usize,
    comparator: C,
}

/// Every `u32` index is addressable.
const SLOT_LIMIT: usize = (u32::MAX as usize).saturating_add(1);

impl<K, V> RbTree<K, V, fn(&K, &K) -> bool>
where
    K: Ord,
{
    pub fn new() -> Self {
        Self::with_comparator(default_less::<K>)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_capacity_and_comparator(capacity, default_less::<K>)
    }
}

impl<K, V> Default for RbTree<K, V, fn(&K, &K) -> bool>
where
    K: Ord,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V, C> RbTree<K, V, C>
where
    C: Fn(&K, &K) -> bool,
{
    pub fn with_comparator(comparator: C) -> Self {
        Self::with_capacity_and_comparator(0, comparator)
    }

    /// Pre-sizes the arena for `capacity` nodes besides the sentinel.
    pub fn with_capacity_and_comparator(capacity: usize, comparator: C) -> Self {
        let mut arena = Vec::with_capacity(capacity.saturating_add(1));
        arena.push(RbNode::sentinel());
        Self {
            arena,
            free: NIL,
            len: 0,
            slot_limit: SLOT_LIMIT,
            comparator,
        }
    }

    /// Raw arena, sentinel included.
    pub fn arena(&self) -> &[RbNode<K, V>] {
        &self.arena
    }

    pub fn comparator(&self) -> &C {
        &self.comparator
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Upper bound on the number of nodes the tree can ever hold.
    pub fn max_size(&self) -> usize {
        let node = std::mem::size_of::<RbNode<K, V>>().max(1);
        (isize::MAX as usize / node).min(self.slot_limit) - 1
    }

    #[cfg(test)]
    pub(crate) fn set_slot_limit(&mut self, slots: usize) {
        self.slot_limit = slots.max(1);
    }

    /// Nodes the arena can hold without growing.
    pub fn capacity(&self) -> usize {
        self.arena.capacity() - 1
    }

    pub fn root(&self) -> Option<NodeRef> {
        self.live(util::root(&self.arena))
    }

    /// Longest root-to-leaf path in nodes; `0` for an empty tree.
    pub fn height(&self) -> usize {
        util::height(&self.arena, util::root(&self.arena))
    }

    #[inline]
    fn is_live(&self, idx: u32) -> bool {
        idx != NIL
            && self
                .arena
                .get(idx as usize)
                .is_some_and(RbNode::is_occupied)
    }

    #[inline]
    fn live(&self, idx: u32) -> Option<NodeRef> {
        (idx != NIL).then_some(NodeRef(idx))
    }

    #[inline]
    fn less(&self, a: &K, b: &K) -> bool {
        (self.comparator)(a, b)
    }

    /// Entry stored at `node`; `None` for the end position or an erased slot.
    pub fn get(&self, node: NodeRef) -> Option<(&K, &V)> {
        self.arena.get(node.0 as usize).and_then(RbNode::entry)
    }

    pub fn get_mut(&mut self, node: NodeRef) -> Option<(&K, &mut V)> {
        self.arena
            .get_mut(node.0 as usize)
            .and_then(|n| n.kv.as_mut())
            .map(|(k, v)| (&*k, v))
    }

    pub fn key(&self, node: NodeRef) -> Option<&K> {
        self.get(node).map(|(k, _)| k)
    }

    pub fn value(&self, node: NodeRef) -> Option<&V> {
        self.get(node).map(|(_, v)| v)
    }

    pub fn value_mut(&mut self, node: NodeRef) -> Option<&mut V> {
        self.get_mut(node).map(|(_, v)| v)
    }

    pub fn find(&self, key: &K) -> Option<NodeRef> {
        self.live(util::find(
            &self.arena,
            util::root(&self.arena),
            key,
            &self.comparator,
        ))
    }

    pub fn contains(&self, key: &K) -> bool {
        self.find(key).is_some()
    }

    /// First node not less than `key`, or [`NodeRef::END`].
    pub fn lower_bound(&self, key: &K) -> NodeRef {
        NodeRef(util::lower_bound(
            &self.arena,
            util::root(&self.arena),
            key,
            &self.comparator,
        ))
    }

    /// First node greater than `key`, or [`NodeRef::END`].
    pub fn upper_bound(&self, key: &K) -> NodeRef {
        NodeRef(util::upper_bound(
            &self.arena,
            util::root(&self.arena),
            key,
            &self.comparator,
        ))
    }

    pub fn minimum(&self) -> Option<NodeRef> {
        self.live(first(&self.arena, util::root(&self.arena)))
    }

    pub fn maximum(&self) -> Option<NodeRef> {
        self.live(last(&self.arena, util::root(&self.arena)))
    }

    /// In-order successor; [`NodeRef::END`] after the maximum.
    ///
    /// # Panics
    ///
    /// If `node` is the end position or names an erased slot.
    pub fn successor(&self, node: NodeRef) -> NodeRef {
        assert!(
            self.is_live(node.0),
            "successor of the end position or of an erased node"
        );
        NodeRef(next(&self.arena, node.0))
    }

    /// In-order predecessor; [`NodeRef::END`] before the minimum. The
    /// predecessor of the end position is the maximum.
    ///
    /// # Panics
    ///
    /// If `node` names an erased slot.
    pub fn predecessor(&self, node: NodeRef) -> NodeRef {
        assert!(
            node.is_end() || self.is_live(node.0),
            "predecessor of an erased node"
        );
        NodeRef(prev(&self.arena, node.0))
    }

    /// Secures a slot for a new red leaf. Nothing is linked yet, so a
    /// failure leaves the tree untouched.
    fn alloc(&mut self, key: K, value: V) -> Result<u32> {
        if self.free != NIL {
            let idx = self.free;
            let slot = &mut self.arena[idx as usize];
            self.free = slot.r;
            *slot = RbNode::new(key, value);
            return Ok(idx);
        }
        let slots = self.arena.len();
        let idx = match u32::try_from(slots) {
            Ok(idx) if slots < self.slot_limit => idx,
            _ => {
                debug!("node index space exhausted at {slots} slots");
                return Err(TreeError::IndexSpaceExhausted(slots));
            }
        };
        if let Err(err) = self.arena.try_reserve(1) {
            debug!("arena growth refused at {} nodes: {err}", self.len);
            return Err(err.into());
        }
        self.arena.push(RbNode::new(key, value));
        Ok(idx)
    }

    /// Returns the payload of the detached node `idx` and frees its slot.
    fn release(&mut self, idx: u32) -> (K, V) {
        let slot = &mut self.arena[idx as usize];
        let kv = slot.kv.take().expect("released slot was live");
        slot.b = true;
        slot.r = self.free;
        self.free = idx;
        self.len -= 1;
        if self.len == 0 {
            self.reset();
        }
        kv
    }

    /// Drops every slot but the sentinel.
    fn reset(&mut self) {
        trace!("resetting arena of {} slots", self.arena.len());
        self.arena.truncate(1);
        self.arena[NIL as usize] = RbNode::sentinel();
        self.free = NIL;
        self.len = 0;
    }

    /// Inserts `key` unless an equivalent key is present.
    ///
    /// Returns the node holding the key and whether it was inserted. An
    /// existing entry is left untouched and `value` is dropped.
    ///
    /// # Errors
    ///
    /// [`TreeError::AllocationFailure`] or [`TreeError::IndexSpaceExhausted`]
    /// when no slot can be obtained; the tree is then unchanged.
    pub fn insert(&mut self, key: K, value: V) -> Result<(NodeRef, bool)> {
        match insert_position(&self.arena, &key, &self.comparator) {
            Slot::Occupied(idx) => Ok((NodeRef(idx), false)),
            Slot::Vacant { parent, left } => self.link(parent, left, key, value),
        }
    }

    /// Inserts `key`, trying the position right before `hint` first.
    ///
    /// When `key` sorts strictly between `hint`'s predecessor and `hint`
    /// (with [`NodeRef::END`] meaning "after the maximum"), the leaf is
    /// attached there without a descent from the root. Otherwise this is
    /// [`RbTree::insert`]. A stale hint is ignored.
    ///
    /// # Errors
    ///
    /// As [`RbTree::insert`].
    pub fn insert_with_hint(&mut self, hint: NodeRef, key: K, value: V) -> Result<(NodeRef, bool)> {
        match self.hinted_position(hint.0, &key) {
            Some((parent, left)) => self.link(parent, left, key, value),
            None => self.insert(key, value),
        }
    }

    fn hinted_position(&self, hint: u32, key: &K) -> Option<(u32, bool)> {
        if hint != NIL && !self.is_live(hint) {
            return None;
        }
        if hint != NIL && !self.less(key, key_of(&self.arena, hint)) {
            return None;
        }
        let before = prev(&self.arena, hint);
        if before != NIL && !self.less(key_of(&self.arena, before), key) {
            return None;
        }
        if hint != NIL && get_l(&self.arena, hint) == NIL {
            Some((hint, true))
        } else if before != NIL {
            debug_assert_eq!(get_r(&self.arena, before), NIL);
            Some((before, false))
        } else {
            Some((NIL, true))
        }
    }

    fn link(&mut self, parent: u32, left: bool, key: K, value: V) -> Result<(NodeRef, bool)> {
        let n = self.alloc(key, value)?;
        attach(&mut self.arena, n, parent, left);
        self.len += 1;
        Ok((NodeRef(n), true))
    }

    /// Removes the node at `node`, returning its entry.
    ///
    /// The end position and erased handles are ignored. Handles to every
    /// other node stay valid.
    pub fn erase(&mut self, node: NodeRef) -> Option<(K, V)> {
        if !self.is_live(node.0) {
            return None;
        }
        remove(&mut self.arena, node.0);
        Some(self.release(node.0))
    }

    /// Removes the entry with a key equivalent to `key`; returns `0` or `1`.
    pub fn erase_key(&mut self, key: &K) -> usize {
        usize::from(self.remove_entry(key).is_some())
    }

    pub fn remove_entry(&mut self, key: &K) -> Option<(K, V)> {
        let node = self.find(key)?;
        self.erase(node)
    }

    /// Drops every entry exactly once and empties the tree.
    pub fn clear(&mut self) {
        debug!("clearing tree of {} nodes", self.len);
        self.reset();
    }

    pub fn begin(&self) -> Cursor<'_, K, V, C> {
        Cursor::new(self, first(&self.arena, util::root(&self.arena)))
    }

    pub fn end(&self) -> Cursor<'_, K, V, C> {
        Cursor::new(self, NIL)
    }

    /// Cursor at `node`.
    ///
    /// # Panics
    ///
    /// If `node` names an erased slot.
    pub fn cursor(&self, node: NodeRef) -> Cursor<'_, K, V, C> {
        assert!(
            node.is_end() || self.is_live(node.0),
            "cursor at an erased node"
        );
        Cursor::new(self, node.0)
    }

    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter::new(&self.arena, self.len)
    }

    /// Checks every red-black invariant plus the cached length.
    pub fn assert_valid(&self) -> std::result::Result<(), String> {
        assert_red_black_tree(&self.arena, &self.comparator)?;
        let counted = util::size(&self.arena, util::root(&self.arena));
        if counted != self.len {
            return Err(format!("Length mismatch: cached {} vs linked {counted}", self.len));
        }
        Ok(())
    }

    pub fn print(&self) -> String
    where
        K: fmt::Debug,
        V: fmt::Debug,
    {
        red_black::print(&self.arena, util::root(&self.arena), "")
    }
}

impl<K, V, C> fmt::Debug for RbTree<K, V, C>
where
    K: fmt::Debug,
    V: fmt::Debug,
    C: Fn(&K, &K) -> bool,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<'a, K, V, C> IntoIterator for &'a RbTree<K, V, C>
where
    C: Fn(&K, &K) -> bool,
{
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K, V, C> IntoIterator for RbTree<K, V, C>
where
    C: Fn(&K, &K) -> bool,
{
    type Item = (K, V);
    type IntoIter = IntoIter<K, V>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter::new(self.arena, self.len)
    }
}
