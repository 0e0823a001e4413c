use std::fmt::Debug;

use crate::types::{RbNode, NIL};

/// Debug printer for red-black trees. The sentinel prints as `∅`.
pub fn print<K, V>(arena: &[RbNode<K, V>], node: u32, tab: &str) -> String
where
    K: Debug,
    V: Debug,
{
    if node == NIL {
        return "∅".to_string();
    }
    let n = &arena[node as usize];
    let color = if n.is_black() { "black" } else { "red" };
    let left = print(arena, n.l(), &format!("{tab}  "));
    let right = print(arena, n.r(), &format!("{tab}  "));
    format!(
        "Node[{node}] {color} {{ {:?} = {:?} }}\n{tab}L={left}\n{tab}R={right}",
        n.key(),
        n.value()
    )
}
