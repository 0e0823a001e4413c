//! Node storage and handles.
//!
//! Every "pointer" in the tree is a `u32` index into the tree-owned arena.
//! Index [`NIL`] is the sentinel: the black leaf terminator for all missing
//! children, the parent of the structural root, and the end position.

/// Arena index of the sentinel.
pub const NIL: u32 = 0;

/// Stable handle to a tree slot.
///
/// A handle stays valid across insertions and across erasures of other
/// nodes. It is invalidated exactly when the node it names is erased; the
/// slot may then be reused by a later insertion.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeRef(pub(crate) u32);

impl NodeRef {
    /// Handle of the sentinel, i.e. the end position.
    pub const END: NodeRef = NodeRef(NIL);

    /// Raw arena index.
    pub fn index(self) -> u32 {
        self.0
    }

    pub fn is_end(self) -> bool {
        self.0 == NIL
    }
}

/// Red-black tree node.
///
/// `kv` is `None` for the sentinel and for vacant (freed) slots. A vacant
/// slot keeps the next free slot index in `r`.
#[derive(Clone, Debug)]
pub struct RbNode<K, V> {
    pub(crate) p: u32,
    pub(crate) l: u32,
    pub(crate) r: u32,
    pub(crate) kv: Option<(K, V)>,
    /// Node color: `true` = black, `false` = red.
    pub(crate) b: bool,
}

impl<K, V> RbNode<K, V> {
    /// A fresh red leaf.
    pub fn new(k: K, v: V) -> Self {
        Self {
            p: NIL,
            l: NIL,
            r: NIL,
            kv: Some((k, v)),
            b: false,
        }
    }

    /// The black sentinel for slot [`NIL`].
    pub fn sentinel() -> Self {
        Self {
            p: NIL,
            l: NIL,
            r: NIL,
            kv: None,
            b: true,
        }
    }

    pub fn p(&self) -> u32 {
        self.p
    }

    pub fn l(&self) -> u32 {
        self.l
    }

    pub fn r(&self) -> u32 {
        self.r
    }

    pub fn is_black(&self) -> bool {
        self.b
    }

    pub fn is_occupied(&self) -> bool {
        self.kv.is_some()
    }

    /// Key of a live node.
    ///
    /// # Panics
    ///
    /// On the sentinel or a vacant slot; live links never lead there.
    pub fn key(&self) -> &K {
        &self.kv.as_ref().expect("live link reached a vacant slot").0
    }

    /// Value of a live node. Panics like [`RbNode::key`].
    pub fn value(&self) -> &V {
        &self.kv.as_ref().expect("live link reached a vacant slot").1
    }

    pub fn value_mut(&mut self) -> &mut V {
        &mut self.kv.as_mut().expect("live link reached a vacant slot").1
    }

    pub fn entry(&self) -> Option<(&K, &V)> {
        self.kv.as_ref().map(|(k, v)| (k, v))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_node_is_a_red_leaf() {
        let n = RbNode::new(1, "one");
        assert!(!n.is_black());
        assert_eq!((n.p(), n.l(), n.r()), (NIL, NIL, NIL));
        assert_eq!(n.entry(), Some((&1, &"one")));
    }

    #[test]
    fn sentinel_is_black_and_empty() {
        let s = RbNode::<i32, i32>::sentinel();
        assert!(s.is_black());
        assert!(!s.is_occupied());
        assert!(NodeRef::END.is_end());
    }
}
