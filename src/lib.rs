//! AVL-G trees for Rust.
//!
//! This crate provides [`AvlgTree`], an ordered set backed by a binary
//! search tree whose balance tolerance is a parameter `G` fixed at
//! construction:
//!
//! - **`G = 1`** is the classic AVL tree: subtree heights never differ by more than one.
//! - **`G > 1`** relaxes the bound, trading slightly deeper searches for fewer rotations.
//!
//! # Example
//!
//! ```
//! use avlg_tree::{AvlgTree, Error};
//!
//! let mut tree = AvlgTree::new(2)?;
//! tree.extend([50, 20, 80, 10, 30]);
//!
//! assert_eq!(tree.search(&30), Ok(Some(&30)));
//! assert_eq!(tree.search(&40), Ok(None));
//!
//! assert_eq!(tree.delete(&20), Ok(Some(20)));
//! assert!(tree.is_bst());
//! assert!(tree.is_balanced());
//!
//! let keys: Vec<_> = tree.iter().copied().collect();
//! assert_eq!(keys, [10, 30, 50, 80]);
//! # Ok::<(), Error>(())
//! ```
//!
//! # Features
//!
//! - **`no_std` compatible** - Only requires `alloc`, no standard library dependency
//! - **Configurable balance** - Any tolerance `G >= 1` via [`MaxImbalance`]
//! - **Self-checking** - Whole-tree checks for the search-tree, balance and height invariants
//!
//! # Implementation
//!
//! Nodes live in an arena and link to their children by handle; there are no
//! parent links. Insertion and deletion record the path down from the root, then
//! walk it back up; every node on the way refreshes its height and balance. A node whose balance
//! leaves `[-G, G]` is repaired by a single rotation, or a double rotation
//! when its heavy child leans the other way.

#![no_std]
#![forbid(unsafe_code)]
#![forbid(keyword_idents)]
#![forbid(non_ascii_idents)]
#![forbid(unreachable_pub)]
#![warn(clippy::all)]
#![warn(clippy::cargo)]
#![warn(clippy::pedantic)]
// Enable coverage attributes for nightly builds.
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

extern crate alloc;

mod error;
mod max_imbalance;
mod raw;

pub mod avlg_tree;

pub use avlg_tree::AvlgTree;
pub use error::Error;
pub use max_imbalance::MaxImbalance;
