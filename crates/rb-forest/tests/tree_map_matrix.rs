use rb_forest::{NodeRef, TreeError, TreeMap};

fn sample() -> TreeMap<String, i32> {
    ["delta", "alpha", "echo", "charlie", "bravo"]
        .iter()
        .enumerate()
        .map(|(i, k)| (k.to_string(), i as i32))
        .collect()
}

#[test]
fn tree_map_smoke_matrix() {
    let map = sample();
    let keys: Vec<&str> = map.keys().map(String::as_str).collect();
    assert_eq!(keys, vec!["alpha", "bravo", "charlie", "delta", "echo"]);
    let values: Vec<i32> = map.values().copied().collect();
    assert_eq!(values, vec![1, 4, 3, 0, 2]);
    assert_eq!(map.len(), 5);
    assert!(!map.is_empty());
    assert!(map.max_size() >= map.len());
    map.tree().assert_valid().unwrap();
}

#[test]
fn tree_map_lookup_matrix() {
    let mut map = sample();
    let echo = "echo".to_string();
    let zulu = "zulu".to_string();
    assert_eq!(map.get(&echo), Some(&2));
    assert_eq!(map.get(&zulu), None);
    assert_eq!(map.count(&echo), 1);
    assert_eq!(map.count(&zulu), 0);
    assert!(map.contains_key(&echo));
    assert_eq!(map.at(&zulu), Err(TreeError::KeyNotFound));
    assert_eq!(map.find(&echo).value(), Some(&2));
    assert!(map.find(&zulu).is_end());
    assert_eq!(
        map.get_key_value(&echo),
        Some((&"echo".to_string(), &2))
    );

    *map.get_mut(&echo).unwrap() = 20;
    assert_eq!(map[&echo], 20);
}

#[test]
fn tree_map_subscript_matrix() {
    let mut counts: TreeMap<char, usize> = TreeMap::new();
    for ch in "mississippi".chars() {
        *counts.get_or_insert_default(ch).unwrap() += 1;
    }
    let entries: Vec<(char, usize)> = counts.iter().map(|(k, v)| (*k, *v)).collect();
    assert_eq!(entries, vec![('i', 4), ('m', 1), ('p', 2), ('s', 4)]);
}

#[test]
fn tree_map_erase_variants_matrix() {
    let mut map: TreeMap<i32, i32> = (1..=8).map(|k| (k, k * k)).collect();

    assert_eq!(map.erase(&3), 1);
    assert_eq!(map.erase(&3), 0);
    assert_eq!(map.remove(&4), Some(16));
    assert_eq!(map.remove(&4), None);
    assert_eq!(map.remove_entry(&5), Some((5, 25)));

    let six = map.find(&6).node();
    let after = map.erase_at(six);
    assert_eq!(map.tree().key(after), Some(&7));

    let last = map.end().prev_cursor().node();
    assert_eq!(map.erase_at(last), NodeRef::END);

    let first = map.begin().node();
    let end = map.end().node();
    assert_eq!(map.erase_range(first, end), NodeRef::END);
    assert!(map.is_empty());
    map.tree().assert_valid().unwrap();
}

#[test]
fn tree_map_bounds_matrix() {
    let map: TreeMap<i32, ()> = [10, 20, 30].into_iter().map(|k| (k, ())).collect();

    assert_eq!(map.lower_bound(&20).key(), Some(&20));
    assert_eq!(map.upper_bound(&20).key(), Some(&30));
    assert!(map.upper_bound(&30).is_end());

    let (lo, hi) = map.equal_range(&20);
    assert_eq!(lo.key(), Some(&20));
    assert_eq!(lo.next_cursor(), hi);

    let (lo, hi) = map.equal_range(&25);
    assert_eq!(lo, hi);
    assert_eq!(lo.key(), Some(&30));

    let mut in_range = Vec::new();
    let mut c = map.lower_bound(&15);
    let stop = map.upper_bound(&30);
    while c != stop {
        in_range.push(*c.key().unwrap());
        c.move_next();
    }
    assert_eq!(in_range, vec![20, 30]);
}

#[test]
fn tree_map_hint_insert_matrix() {
    let mut map = TreeMap::new();
    let mut hint = map.end().node();
    for k in 0..100 {
        hint = map.insert_hint(hint, k, k).unwrap();
        hint = map.tree().successor(hint);
    }
    assert_eq!(map.len(), 100);
    assert_eq!(map.first_key_value(), Some((&0, &0)));
    assert_eq!(map.last_key_value(), Some((&99, &99)));
    map.tree().assert_valid().unwrap();

    let start = map.begin().node();
    let existing = map.insert_hint(start, 50, -1).unwrap();
    assert_eq!(map.tree().value(existing), Some(&50));
}

#[test]
fn tree_map_comparators_matrix() {
    let mut map = TreeMap::with_comparator(|a: &String, b: &String| {
        a.to_lowercase() < b.to_lowercase()
    });
    map.insert("Beta".to_string(), 1).unwrap();
    map.insert("alpha".to_string(), 2).unwrap();
    let (_, inserted) = map.insert("BETA".to_string(), 3).unwrap();
    assert!(!inserted);
    assert_eq!(map.get(&"beta".to_string()), Some(&1));

    let less = map.key_comp();
    assert!(less(&"ALPHA".to_string(), &"beta".to_string()));
    let by_key = map.value_comp();
    assert!(by_key(&("a".to_string(), 9), &("B".to_string(), 0)));
}

#[test]
fn tree_map_equality_and_order_matrix() {
    let a: TreeMap<i32, &str> = TreeMap::from([(1, "x"), (2, "y")]);
    let b: TreeMap<i32, &str> = TreeMap::from([(2, "y"), (1, "x")]);
    let c: TreeMap<i32, &str> = TreeMap::from([(1, "x"), (2, "z")]);
    assert_eq!(a, b);
    assert_ne!(a, c);
    assert!(a < c);
    assert!(c > b);
    assert!(TreeMap::<i32, &str>::new() < a);
    assert_eq!(a.clone(), a);
}

#[test]
fn tree_map_swap_and_clear_matrix() {
    let mut a = TreeMap::from([(1, 1), (2, 2)]);
    let mut b = TreeMap::from([(9, 9)]);
    a.swap(&mut b);
    assert_eq!(a.keys().copied().collect::<Vec<_>>(), vec![9]);
    assert_eq!(b.keys().copied().collect::<Vec<_>>(), vec![1, 2]);
    b.clear();
    assert!(b.is_empty());
    assert!(b.begin().is_end());
    b.insert(3, 3).unwrap();
    assert_eq!(b.len(), 1);
}

#[test]
fn tree_map_into_iter_matrix() {
    let map = TreeMap::from([(3, 'c'), (1, 'a'), (2, 'b')]);
    let mut borrowed = Vec::new();
    for (k, v) in &map {
        borrowed.push((*k, *v));
    }
    let owned: Vec<(i32, char)> = map.into_iter().collect();
    assert_eq!(owned, borrowed);
    assert_eq!(owned, vec![(1, 'a'), (2, 'b'), (3, 'c')]);
}

#[test]
fn tree_map_debug_matrix() {
    let map = TreeMap::from([(2, "two"), (1, "one")]);
    assert_eq!(format!("{map:?}"), r#"{1: "one", 2: "two"}"#);
}
