//! Arena-backed red-black tree with a shared sentinel, plus an ordered map
//! built on it.
//!
//! All "pointers" are `u32` indices into a tree-owned `Vec<RbNode<K, V>>`.
//! Index `0` is the sentinel: the black terminator for every missing child,
//! the holder of the root slot, and the end position of iteration. Walking
//! back from the end position therefore reaches the maximum with no special
//! casing.
//!
//! # Module layout
//!
//! | Module | Contents |
//! |--------|----------|
//! [`types`] | [`RbNode`], [`NodeRef`] handles, the [`NIL`] sentinel index |
//! [`util`] | Read-only walks: `first`, `last`, `next`, `prev`, bounds |
//! [`red_black`] | Rotations, insert/remove fixups, invariant checker, printer |
//! [`tree`] | [`RbTree`] engine: arena, free list, handle API |
//! [`cursor`] | [`Cursor`], a bidirectional position |
//! [`iter`] | [`Iter`], [`Keys`], [`Values`], [`IntoIter`] |
//! [`map`] | [`TreeMap`] façade |
//! [`error`] | [`TreeError`] |
//!
//! The `serde` feature makes [`TreeMap`] serialize as a map.

pub mod cursor;
pub mod error;
pub mod iter;
pub mod map;
pub mod red_black;
pub mod tree;
pub mod types;
pub mod util;

#[cfg(feature = "serde")]
mod serde_impl;

pub use cursor::Cursor;
pub use error::{Result, TreeError};
pub use iter::{IntoIter, Iter, Keys, Values};
pub use map::TreeMap;
pub use tree::RbTree;
pub use types::{NodeRef, RbNode, NIL};
