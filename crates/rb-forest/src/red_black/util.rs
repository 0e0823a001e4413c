use log::trace;

use crate::types::{RbNode, NIL};
use crate::util::{first, get_l, get_p, get_r, key_of, next, root};

#[path = "util/print.rs"]
mod print_impl;

pub use print_impl::print;

#[inline]
fn set_p<K, V>(arena: &mut [RbNode<K, V>], i: u32, v: u32) {
    arena[i as usize].p = v;
}

#[inline]
fn set_l<K, V>(arena: &mut [RbNode<K, V>], i: u32, v: u32) {
    arena[i as usize].l = v;
}

#[inline]
fn set_r<K, V>(arena: &mut [RbNode<K, V>], i: u32, v: u32) {
    arena[i as usize].r = v;
}

#[inline]
fn is_black<K, V>(arena: &[RbNode<K, V>], i: u32) -> bool {
    arena[i as usize].b
}

#[inline]
fn set_black<K, V>(arena: &mut [RbNode<K, V>], i: u32, v: bool) {
    debug_assert!(i != NIL || v, "sentinel must stay black");
    arena[i as usize].b = v;
}

/// Where a key lives, or where it would be attached.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Slot {
    /// A node with an equivalent key already exists.
    Occupied(u32),
    /// Empty child slot of `parent` (`NIL` parent = empty tree).
    Vacant { parent: u32, left: bool },
}

/// Descends like `find`, reporting the matching node or the empty slot.
pub fn insert_position<K, V, C>(arena: &[RbNode<K, V>], key: &K, less: &C) -> Slot
where
    C: Fn(&K, &K) -> bool,
{
    let mut parent = NIL;
    let mut left = true;
    let mut curr = root(arena);
    while curr != NIL {
        let curr_key = key_of(arena, curr);
        parent = curr;
        if less(key, curr_key) {
            left = true;
            curr = get_l(arena, curr);
        } else if less(curr_key, key) {
            left = false;
            curr = get_r(arena, curr);
        } else {
            return Slot::Occupied(curr);
        }
    }
    Slot::Vacant { parent, left }
}

/// Inserts the detached node `n` by its key.
///
/// Returns `n` when it was linked in, or the index of the node already
/// holding an equivalent key (then `n` is left detached).
pub fn insert<K, V, C>(arena: &mut [RbNode<K, V>], n: u32, less: &C) -> u32
where
    C: Fn(&K, &K) -> bool,
{
    match insert_position(arena, key_of(arena, n), less) {
        Slot::Occupied(existing) => existing,
        Slot::Vacant { parent, left } => {
            attach(arena, n, parent, left);
            n
        }
    }
}

/// Links the detached node `n` as a red leaf under `parent` and rebalances.
///
/// A `NIL` parent makes `n` the root of an empty tree.
pub fn attach<K, V>(arena: &mut [RbNode<K, V>], n: u32, parent: u32, left: bool) {
    set_l(arena, n, NIL);
    set_r(arena, n, NIL);
    set_p(arena, n, parent);
    set_black(arena, n, false);
    if parent == NIL {
        set_l(arena, NIL, n);
    } else if left {
        debug_assert_eq!(get_l(arena, parent), NIL);
        set_l(arena, parent, n);
    } else {
        debug_assert_eq!(get_r(arena, parent), NIL);
        set_r(arena, parent, n);
    }
    insert_fixup(arena, n);
}

pub fn insert_left<K, V>(arena: &mut [RbNode<K, V>], n: u32, p: u32) {
    attach(arena, n, p, true);
}

pub fn insert_right<K, V>(arena: &mut [RbNode<K, V>], n: u32, p: u32) {
    attach(arena, n, p, false);
}

fn insert_fixup<K, V>(arena: &mut [RbNode<K, V>], mut n: u32) {
    while !is_black(arena, get_p(arena, n)) {
        let p = get_p(arena, n);
        let g = get_p(arena, p);
        if get_l(arena, g) == p {
            let u = get_r(arena, g);
            if !is_black(arena, u) {
                set_black(arena, p, true);
                set_black(arena, u, true);
                set_black(arena, g, false);
                n = g;
                continue;
            }
            if get_r(arena, p) == n {
                n = p;
                l_rotate(arena, n);
            }
            let p = get_p(arena, n);
            let g = get_p(arena, p);
            set_black(arena, p, true);
            set_black(arena, g, false);
            r_rotate(arena, g);
        } else {
            let u = get_l(arena, g);
            if !is_black(arena, u) {
                set_black(arena, p, true);
                set_black(arena, u, true);
                set_black(arena, g, false);
                n = g;
                continue;
            }
            if get_l(arena, p) == n {
                n = p;
                r_rotate(arena, n);
            }
            let p = get_p(arena, n);
            let g = get_p(arena, p);
            set_black(arena, p, true);
            set_black(arena, g, false);
            l_rotate(arena, g);
        }
    }
    let r = root(arena);
    set_black(arena, r, true);
}

/// Points `p`'s link to `old` at `new`. With `p == NIL` this rewrites the
/// root slot, because the sentinel's left link holds the root.
#[inline]
fn replace_child<K, V>(arena: &mut [RbNode<K, V>], p: u32, old: u32, new: u32) {
    if get_l(arena, p) == old {
        set_l(arena, p, new);
    } else {
        set_r(arena, p, new);
    }
}

/// Rotates left around `n`: its right child takes its place.
pub fn l_rotate<K, V>(arena: &mut [RbNode<K, V>], n: u32) {
    let nr = get_r(arena, n);
    debug_assert_ne!(nr, NIL, "l_rotate requires a right child");
    let nrl = get_l(arena, nr);

    set_r(arena, n, nrl);
    if nrl != NIL {
        set_p(arena, nrl, n);
    }

    let p = get_p(arena, n);
    set_p(arena, nr, p);
    replace_child(arena, p, n, nr);

    set_l(arena, nr, n);
    set_p(arena, n, nr);
}

/// Rotates right around `n`: its left child takes its place.
pub fn r_rotate<K, V>(arena: &mut [RbNode<K, V>], n: u32) {
    let nl = get_l(arena, n);
    debug_assert_ne!(nl, NIL, "r_rotate requires a left child");
    let nlr = get_r(arena, nl);

    set_l(arena, n, nlr);
    if nlr != NIL {
        set_p(arena, nlr, n);
    }

    let p = get_p(arena, n);
    set_p(arena, nl, p);
    replace_child(arena, p, n, nl);

    set_r(arena, nl, n);
    set_p(arena, n, nl);
}

/// Puts `v` where `u` hangs. `v` may be `NIL`; its parent is then parked in
/// the sentinel's scratch parent link for [`remove_fixup`].
fn transplant<K, V>(arena: &mut [RbNode<K, V>], u: u32, v: u32) {
    let up = get_p(arena, u);
    replace_child(arena, up, u, v);
    set_p(arena, v, up);
}

/// Unlinks the live node `n` and rebalances.
///
/// A node with two children is replaced by relinking its in-order successor
/// into its position, so every other node keeps its index. On return `n` is
/// fully detached (all links `NIL`); its slot still holds the payload.
pub fn remove<K, V>(arena: &mut [RbNode<K, V>], n: u32) {
    debug_assert_ne!(n, NIL, "cannot remove the sentinel");
    let l = get_l(arena, n);
    let r = get_r(arena, n);
    let mut removed_black = is_black(arena, n);
    let child;

    if l == NIL {
        child = r;
        transplant(arena, n, r);
    } else if r == NIL {
        child = l;
        transplant(arena, n, l);
    } else {
        let successor = first(arena, r);
        removed_black = is_black(arena, successor);
        child = get_r(arena, successor);
        if get_p(arena, successor) == n {
            set_p(arena, child, successor);
        } else {
            transplant(arena, successor, child);
            set_r(arena, successor, r);
            set_p(arena, r, successor);
        }
        transplant(arena, n, successor);
        set_l(arena, successor, l);
        set_p(arena, l, successor);
        let n_black = is_black(arena, n);
        set_black(arena, successor, n_black);
    }

    if removed_black {
        remove_fixup(arena, child);
    }

    set_p(arena, NIL, NIL);
    set_p(arena, n, NIL);
    set_l(arena, n, NIL);
    set_r(arena, n, NIL);
}

fn remove_fixup<K, V>(arena: &mut [RbNode<K, V>], mut n: u32) {
    while n != root(arena) && is_black(arena, n) {
        let p = get_p(arena, n);
        if get_l(arena, p) == n {
            let mut s = get_r(arena, p);
            if !is_black(arena, s) {
                set_black(arena, s, true);
                set_black(arena, p, false);
                l_rotate(arena, p);
                s = get_r(arena, p);
            }
            if is_black(arena, get_l(arena, s)) && is_black(arena, get_r(arena, s)) {
                set_black(arena, s, false);
                n = p;
                continue;
            }
            if is_black(arena, get_r(arena, s)) {
                let sl = get_l(arena, s);
                set_black(arena, sl, true);
                set_black(arena, s, false);
                r_rotate(arena, s);
                s = get_r(arena, p);
            }
            let parent_black = is_black(arena, p);
            set_black(arena, s, parent_black);
            set_black(arena, p, true);
            let sr = get_r(arena, s);
            set_black(arena, sr, true);
            l_rotate(arena, p);
        } else {
            let mut s = get_l(arena, p);
            if !is_black(arena, s) {
                set_black(arena, s, true);
                set_black(arena, p, false);
                r_rotate(arena, p);
                s = get_l(arena, p);
            }
            if is_black(arena, get_l(arena, s)) && is_black(arena, get_r(arena, s)) {
                set_black(arena, s, false);
                n = p;
                continue;
            }
            if is_black(arena, get_l(arena, s)) {
                let sr = get_r(arena, s);
                set_black(arena, sr, true);
                set_black(arena, s, false);
                l_rotate(arena, s);
                s = get_l(arena, p);
            }
            let parent_black = is_black(arena, p);
            set_black(arena, s, parent_black);
            set_black(arena, p, true);
            let sl = get_l(arena, s);
            set_black(arena, sl, true);
            r_rotate(arena, p);
        }
        trace!("remove_fixup resolved at node {p}");
        n = root(arena);
    }
    set_black(arena, n, true);
}

/// Checks every red-black and linkage invariant of the arena's tree.
///
/// Returns a description of the first violation found.
pub fn assert_red_black_tree<K, V, C>(arena: &[RbNode<K, V>], less: &C) -> Result<(), String>
where
    C: Fn(&K, &K) -> bool,
{
    let Some(sentinel) = arena.get(NIL as usize) else {
        return Err("Arena has no sentinel".to_string());
    };
    if !sentinel.is_black() {
        return Err("Sentinel is not black".to_string());
    }
    if sentinel.is_occupied() {
        return Err("Sentinel holds an entry".to_string());
    }
    if sentinel.p() != NIL {
        return Err("Sentinel scratch parent link left set".to_string());
    }

    let root = root(arena);
    if root == NIL {
        return Ok(());
    }
    if get_p(arena, root) != NIL {
        return Err("Root has parent".to_string());
    }
    if !is_black(arena, root) {
        return Err("Root is not black".to_string());
    }

    fn black_height<K, V>(arena: &[RbNode<K, V>], node: u32) -> Result<usize, String> {
        if node == NIL {
            return Ok(0);
        }
        if !arena[node as usize].is_occupied() {
            return Err(format!("Link reaches vacant slot {node}"));
        }

        let l = get_l(arena, node);
        let r = get_r(arena, node);

        if l != NIL && get_p(arena, l) != node {
            return Err("Broken parent link on left child".to_string());
        }
        if r != NIL && get_p(arena, r) != node {
            return Err("Broken parent link on right child".to_string());
        }

        if !is_black(arena, node) {
            if !is_black(arena, l) {
                return Err("Red node has red left child".to_string());
            }
            if !is_black(arena, r) {
                return Err("Red node has red right child".to_string());
            }
        }

        let lh = black_height(arena, l)?;
        let rh = black_height(arena, r)?;
        if lh != rh {
            return Err("Black height mismatch".to_string());
        }

        Ok(lh + usize::from(is_black(arena, node)))
    }

    black_height(arena, root)?;

    let mut curr = first(arena, root);
    let mut prev_node = NIL;
    while curr != NIL {
        if prev_node != NIL && !less(key_of(arena, prev_node), key_of(arena, curr)) {
            return Err("Node order violated".to_string());
        }
        prev_node = curr;
        curr = next(arena, curr);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lt(a: &i32, b: &i32) -> bool {
        a < b
    }

    fn arena_with(keys: &[i32]) -> Vec<RbNode<i32, i32>> {
        let mut arena = vec![RbNode::sentinel()];
        for &k in keys {
            arena.push(RbNode::new(k, k));
            let n = (arena.len() - 1) as u32;
            assert_eq!(insert(&mut arena, n, &lt), n);
            assert_red_black_tree(&arena, &lt).unwrap();
        }
        arena
    }

    #[test]
    fn l_rotate_at_root_repoints_root_slot() {
        // 1 -> 2 (right) -> 3 (left of 2), rotate at 1.
        let mut arena = vec![RbNode::sentinel()];
        for k in [10, 20, 15] {
            arena.push(RbNode::new(k, k));
        }
        arena[0].l = 1;
        arena[1].r = 2;
        arena[2].p = 1;
        arena[2].l = 3;
        arena[3].p = 2;

        l_rotate(&mut arena, 1);

        assert_eq!(root(&arena), 2);
        assert_eq!(arena[2].p, NIL);
        assert_eq!(arena[2].l, 1);
        assert_eq!(arena[1].p, 2);
        assert_eq!(arena[1].r, 3);
        assert_eq!(arena[3].p, 1);
        assert_eq!(arena[0].p, NIL);
    }

    #[test]
    fn r_rotate_inside_tree_keeps_parent_link() {
        let mut arena = vec![RbNode::sentinel()];
        for k in [1, 10, 5, 7] {
            arena.push(RbNode::new(k, k));
        }
        // 1 -> r: 10 -> l: 5 -> r: 7
        arena[0].l = 1;
        arena[1].r = 2;
        arena[2].p = 1;
        arena[2].l = 3;
        arena[3].p = 2;
        arena[3].r = 4;
        arena[4].p = 3;

        r_rotate(&mut arena, 2);

        assert_eq!(root(&arena), 1);
        assert_eq!(arena[1].r, 3);
        assert_eq!(arena[3].p, 1);
        assert_eq!(arena[3].r, 2);
        assert_eq!(arena[2].p, 3);
        assert_eq!(arena[2].l, 4);
        assert_eq!(arena[4].p, 2);
    }

    #[test]
    fn first_insert_becomes_black_root() {
        let arena = arena_with(&[42]);
        assert_eq!(root(&arena), 1);
        assert!(arena[1].is_black());
        assert_eq!(arena[1].p, NIL);
    }

    #[test]
    fn duplicate_insert_returns_existing_node() {
        let mut arena = arena_with(&[1, 2, 3]);
        arena.push(RbNode::new(2, 99));
        assert_eq!(insert(&mut arena, 4, &lt), 2);
        assert_eq!(arena[4].p, NIL);
        assert_eq!(*arena[2].value(), 2);
    }

    #[test]
    fn remove_two_child_node_relinks_successor() {
        let mut arena = arena_with(&[10, 5, 15, 3, 7, 12, 18]);
        let ten = 1;
        let twelve = 6;
        let root_before = root(&arena);
        assert_eq!(root_before, ten);

        remove(&mut arena, ten);

        assert_eq!(root(&arena), twelve);
        assert_eq!(*arena[twelve as usize].key(), 12);
        assert_eq!((arena[1].p, arena[1].l, arena[1].r), (NIL, NIL, NIL));
        arena[1].kv = None;
        assert_red_black_tree(&arena, &lt).unwrap();
    }

    #[test]
    fn remove_last_node_empties_root_slot() {
        let mut arena = arena_with(&[1]);
        remove(&mut arena, 1);
        assert_eq!(root(&arena), NIL);
        assert_eq!(arena[0].p, NIL);
    }

    #[test]
    fn validator_reports_red_red() {
        let mut arena = arena_with(&[2, 1, 3]);
        arena.push(RbNode::new(4, 4));
        arena[4].p = 3;
        arena[3].r = 4;
        arena[3].b = false;
        assert_eq!(
            assert_red_black_tree(&arena, &lt),
            Err("Red node has red right child".to_string())
        );
    }

    #[test]
    fn validator_reports_order_violation() {
        let mut arena = arena_with(&[2, 1, 3]);
        arena[2].kv = Some((5, 5));
        assert_eq!(
            assert_red_black_tree(&arena, &lt),
            Err("Node order violated".to_string())
        );
    }
}
