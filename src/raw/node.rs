use core::cmp::max;
use core::mem;

use super::handle::Handle;

/// Height reported for a missing subtree.
pub(crate) const EMPTY_HEIGHT: i32 = -1;

/// Which child link a descent followed.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Side {
    Left,
    Right,
}

// A single key plus the cached shape of the subtree below it.
#[derive(Clone)]
pub(crate) struct Node<T> {
    key: T,
    // Longest downward path to a leaf; 0 for a leaf.
    height: i32,
    // height(left) - height(right).
    balance: i32,
    left: Option<Handle>,
    right: Option<Handle>,
}

impl<T> Node<T> {
    /// Creates a leaf holding `key`.
    pub(crate) const fn leaf(key: T) -> Self {
        Self {
            key,
            height: 0,
            balance: 0,
            left: None,
            right: None,
        }
    }

    pub(crate) const fn key(&self) -> &T {
        &self.key
    }

    /// Swaps in a new key, returning the old one.
    pub(crate) fn replace_key(&mut self, key: T) -> T {
        mem::replace(&mut self.key, key)
    }

    pub(crate) fn into_key(self) -> T {
        self.key
    }

    pub(crate) const fn height(&self) -> i32 {
        self.height
    }

    pub(crate) const fn balance(&self) -> i32 {
        self.balance
    }

    pub(crate) const fn left(&self) -> Option<Handle> {
        self.left
    }

    pub(crate) const fn right(&self) -> Option<Handle> {
        self.right
    }

    pub(crate) fn set_left(&mut self, left: Option<Handle>) {
        self.left = left;
    }

    pub(crate) fn set_right(&mut self, right: Option<Handle>) {
        self.right = right;
    }

    pub(crate) const fn child(&self, side: Side) -> Option<Handle> {
        match side {
            Side::Left => self.left,
            Side::Right => self.right,
        }
    }

    pub(crate) fn set_child(&mut self, side: Side, child: Option<Handle>) {
        match side {
            Side::Left => self.left = child,
            Side::Right => self.right = child,
        }
    }

    /// Recomputes height and balance from the heights of the two children.
    pub(crate) fn set_child_heights(&mut self, left_height: i32, right_height: i32) {
        self.height = max(left_height, right_height) + 1;
        self.balance = left_height - right_height;
    }
}
