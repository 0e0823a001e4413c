//! Read-only walks over a sentinel-terminated arena.
//!
//! All functions take the arena as a slice and work with `u32` indices.
//! [`NIL`] (the sentinel) stands for "no node" both as input and output, so
//! `next(last)` and `prev(first)` return [`NIL`], the end position.
//!
//! The sentinel's left link is the root slot, which lets [`prev`] called on
//! [`NIL`] land on the maximum without a special case.

use crate::types::{RbNode, NIL};

#[inline]
pub(crate) fn get_p<K, V>(arena: &[RbNode<K, V>], idx: u32) -> u32 {
    arena[idx as usize].p
}

#[inline]
pub(crate) fn get_l<K, V>(arena: &[RbNode<K, V>], idx: u32) -> u32 {
    arena[idx as usize].l
}

#[inline]
pub(crate) fn get_r<K, V>(arena: &[RbNode<K, V>], idx: u32) -> u32 {
    arena[idx as usize].r
}

#[inline]
pub(crate) fn key_of<K, V>(arena: &[RbNode<K, V>], idx: u32) -> &K {
    arena[idx as usize].key()
}

/// Structural root, read from the sentinel's root slot.
#[inline]
pub fn root<K, V>(arena: &[RbNode<K, V>]) -> u32 {
    get_l(arena, NIL)
}

/// Leftmost node under `root`.
pub fn first<K, V>(arena: &[RbNode<K, V>], root: u32) -> u32 {
    let mut curr = root;
    if curr == NIL {
        return NIL;
    }
    while get_l(arena, curr) != NIL {
        curr = get_l(arena, curr);
    }
    curr
}

/// Rightmost node under `root`.
pub fn last<K, V>(arena: &[RbNode<K, V>], root: u32) -> u32 {
    let mut curr = root;
    if curr == NIL {
        return NIL;
    }
    while get_r(arena, curr) != NIL {
        curr = get_r(arena, curr);
    }
    curr
}

/// In-order successor.
pub fn next<K, V>(arena: &[RbNode<K, V>], mut curr: u32) -> u32 {
    let r = get_r(arena, curr);
    if r != NIL {
        return first(arena, r);
    }
    let mut p = get_p(arena, curr);
    while p != NIL && get_r(arena, p) == curr {
        curr = p;
        p = get_p(arena, p);
    }
    p
}

/// In-order predecessor. On [`NIL`] this is the maximum.
pub fn prev<K, V>(arena: &[RbNode<K, V>], mut curr: u32) -> u32 {
    let l = get_l(arena, curr);
    if l != NIL {
        return last(arena, l);
    }
    if curr == NIL {
        return NIL;
    }
    let mut p = get_p(arena, curr);
    while p != NIL && get_l(arena, p) == curr {
        curr = p;
        p = get_p(arena, p);
    }
    p
}

/// Number of nodes under `root`.
pub fn size<K, V>(arena: &[RbNode<K, V>], root: u32) -> usize {
    if root == NIL {
        return 0;
    }
    1 + size(arena, get_l(arena, root)) + size(arena, get_r(arena, root))
}

/// Longest root-to-leaf path, counted in nodes.
pub fn height<K, V>(arena: &[RbNode<K, V>], root: u32) -> usize {
    if root == NIL {
        return 0;
    }
    1 + height(arena, get_l(arena, root)).max(height(arena, get_r(arena, root)))
}

/// Finds a node whose key is equivalent to `key`.
pub fn find<K, V, C>(arena: &[RbNode<K, V>], root: u32, key: &K, less: &C) -> u32
where
    C: Fn(&K, &K) -> bool,
{
    let mut curr = root;
    while curr != NIL {
        let curr_key = key_of(arena, curr);
        curr = if less(key, curr_key) {
            get_l(arena, curr)
        } else if less(curr_key, key) {
            get_r(arena, curr)
        } else {
            return curr;
        };
    }
    NIL
}

/// First node whose key is not less than `key`.
pub fn lower_bound<K, V, C>(arena: &[RbNode<K, V>], root: u32, key: &K, less: &C) -> u32
where
    C: Fn(&K, &K) -> bool,
{
    let mut curr = root;
    let mut res = NIL;
    while curr != NIL {
        if less(key_of(arena, curr), key) {
            curr = get_r(arena, curr);
        } else {
            res = curr;
            curr = get_l(arena, curr);
        }
    }
    res
}

/// First node whose key is greater than `key`.
pub fn upper_bound<K, V, C>(arena: &[RbNode<K, V>], root: u32, key: &K, less: &C) -> u32
where
    C: Fn(&K, &K) -> bool,
{
    let mut curr = root;
    let mut res = NIL;
    while curr != NIL {
        if less(key, key_of(arena, curr)) {
            res = curr;
            curr = get_l(arena, curr);
        } else {
            curr = get_r(arena, curr);
        }
    }
    res
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lt(a: &i32, b: &i32) -> bool {
        a < b
    }

    /// Hand-linked tree:
    ///
    /// ```text
    ///       2
    ///      / \
    ///     1   4
    ///        /
    ///       3
    /// ```
    fn arena() -> Vec<RbNode<i32, i32>> {
        let mut arena = vec![RbNode::sentinel()];
        for k in [2, 1, 4, 3] {
            arena.push(RbNode::new(k, k * 10));
        }
        arena[0].l = 1;
        arena[1].l = 2;
        arena[1].r = 3;
        arena[2].p = 1;
        arena[3].p = 1;
        arena[3].l = 4;
        arena[4].p = 3;
        arena
    }

    #[test]
    fn first_last_next_prev_follow_in_order_links() {
        let a = arena();
        let root = root(&a);
        assert_eq!(root, 1);
        assert_eq!(first(&a, root), 2);
        assert_eq!(last(&a, root), 3);
        assert_eq!(next(&a, 2), 1);
        assert_eq!(next(&a, 1), 4);
        assert_eq!(next(&a, 4), 3);
        assert_eq!(next(&a, 3), NIL);
        assert_eq!(prev(&a, NIL), 3);
        assert_eq!(prev(&a, 4), 1);
        assert_eq!(prev(&a, 2), NIL);
    }

    #[test]
    fn empty_walks_return_nil() {
        let a = vec![RbNode::<i32, i32>::sentinel()];
        assert_eq!(first(&a, root(&a)), NIL);
        assert_eq!(last(&a, root(&a)), NIL);
        assert_eq!(prev(&a, NIL), NIL);
        assert_eq!(size(&a, root(&a)), 0);
        assert_eq!(height(&a, root(&a)), 0);
    }

    #[test]
    fn size_and_height_of_subtrees() {
        let a = arena();
        assert_eq!(size(&a, 1), 4);
        assert_eq!(size(&a, 3), 2);
        assert_eq!(size(&a, 2), 1);
        assert_eq!(height(&a, 1), 3);
    }

    #[test]
    fn find_and_bounds() {
        let a = arena();
        let r = root(&a);
        assert_eq!(find(&a, r, &3, &lt), 4);
        assert_eq!(find(&a, r, &5, &lt), NIL);
        assert_eq!(lower_bound(&a, r, &0, &lt), 2);
        assert_eq!(lower_bound(&a, r, &3, &lt), 4);
        assert_eq!(lower_bound(&a, r, &5, &lt), NIL);
        assert_eq!(upper_bound(&a, r, &3, &lt), 3);
        assert_eq!(upper_bound(&a, r, &4, &lt), NIL);
    }
}
