use rb_forest::{NodeRef, RbTree};

fn tree() -> RbTree<i32, String> {
    let mut tree = RbTree::new();
    for k in [8, 3, 10, 1, 6, 14, 4, 7, 13] {
        tree.insert(k, format!("v{k}")).unwrap();
    }
    tree
}

#[test]
fn cursor_forward_matches_iter_matrix() {
    let tree = tree();
    let mut from_cursor = Vec::new();
    let mut c = tree.begin();
    while !c.is_end() {
        from_cursor.push(*c.key().unwrap());
        c.move_next();
    }
    let from_iter: Vec<i32> = tree.iter().map(|(k, _)| *k).collect();
    assert_eq!(from_cursor, from_iter);
    assert_eq!(from_iter, vec![1, 3, 4, 6, 7, 8, 10, 13, 14]);
}

#[test]
fn cursor_reverse_matches_iter_rev_matrix() {
    let tree = tree();
    let mut from_cursor = Vec::new();
    let mut c = tree.end();
    while c != tree.begin() {
        c.move_prev();
        from_cursor.push(*c.key().unwrap());
    }
    let from_iter: Vec<i32> = tree.iter().rev().map(|(k, _)| *k).collect();
    assert_eq!(from_cursor, from_iter);
}

#[test]
fn cursor_boundaries_matrix() {
    let tree = tree();
    let max = tree.end().prev_cursor();
    assert_eq!(max.key(), Some(&14));
    assert!(max.next_cursor().is_end());
    assert_eq!(tree.end().value(), None);
    assert_eq!(tree.begin().value().map(String::as_str), Some("v1"));
}

#[test]
fn cursor_from_handle_matrix() {
    let tree = tree();
    let six = tree.find(&6).unwrap();
    let c = tree.cursor(six);
    assert_eq!(c.node(), six);
    assert_eq!(c.next_cursor().key(), Some(&7));
    assert_eq!(c.prev_cursor().key(), Some(&4));
    assert!(tree.cursor(NodeRef::END).is_end());
}

#[test]
#[should_panic(expected = "cursor at an erased node")]
fn cursor_at_erased_handle_panics() {
    let mut tree = tree();
    let six = tree.find(&6).unwrap();
    tree.erase(six);
    tree.cursor(six);
}

#[test]
#[should_panic(expected = "cursor moved before begin")]
fn cursor_back_from_end_of_empty_panics() {
    let tree = RbTree::<i32, i32>::new();
    tree.end().move_prev();
}

#[test]
fn iter_is_exact_and_fused_matrix() {
    let tree = tree();
    let mut it = tree.iter();
    assert_eq!(it.len(), 9);
    it.next();
    it.next_back();
    assert_eq!(it.len(), 7);
    assert_eq!(it.by_ref().count(), 7);
    assert_eq!(it.next(), None);
    assert_eq!(it.next_back(), None);
}

#[test]
fn iter_over_empty_tree_matrix() {
    let tree = RbTree::<i32, i32>::new();
    assert_eq!(tree.iter().next(), None);
    assert_eq!(tree.iter().next_back(), None);
    assert_eq!((&tree).into_iter().len(), 0);
    assert_eq!(tree.into_iter().next(), None);
}

#[test]
fn iter_after_mutation_matrix() {
    let mut tree = tree();
    tree.erase_key(&8);
    tree.erase_key(&1);
    tree.insert(9, "v9".to_string()).unwrap();
    let keys: Vec<i32> = tree.iter().map(|(k, _)| *k).collect();
    assert_eq!(keys, vec![3, 4, 6, 7, 9, 10, 13, 14]);
    let owned: Vec<(i32, String)> = tree.into_iter().rev().take(2).collect();
    assert_eq!(owned, vec![(14, "v14".to_string()), (13, "v13".to_string())]);
}

#[test]
fn debug_formats_as_map_matrix() {
    let mut tree = RbTree::new();
    tree.insert(2, 'b').unwrap();
    tree.insert(1, 'a').unwrap();
    assert_eq!(format!("{tree:?}"), "{1: 'a', 2: 'b'}");
    let c = tree.begin();
    assert_eq!(format!("{c:?}"), format!("Cursor {{ node: {}, entry: Some((1, 'a')) }}", c.node().index()));
}
