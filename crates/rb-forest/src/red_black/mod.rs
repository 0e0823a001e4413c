//! Red-black rebalancing over the sentinel arena.

pub mod util;

pub use util::{
    assert_red_black_tree, attach, insert, insert_left, insert_position, insert_right, l_rotate,
    print, r_rotate, remove, Slot,
};
