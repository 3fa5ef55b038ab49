use core::borrow::Borrow;
use core::cmp::Ordering::{Equal, Greater, Less};

use log::{debug, trace};

use smallvec::SmallVec;

use super::arena::Arena;
use super::handle::Handle;
use super::node::{EMPTY_HEIGHT, Node, Side};
use crate::MaxImbalance;

/// The relaxed-balance binary search tree backing `AvlgTree`.
///
/// Mutations descend from the root recording a [`Path`], then walk it back
/// bottom-up: each ancestor relinks the subtree below it, refreshes its
/// height and balance, and may rotate, handing its new root to its own
/// parent. No parent links are stored, and tree depth never costs call
/// stack, however far a wide tolerance lets the tree lean.
#[derive(Clone)]
pub(crate) struct RawAvlgTree<T> {
    /// Arena owning every node.
    nodes: Arena<Node<T>>,
    /// Handle to the root node, if the tree is non-empty.
    root: Option<Handle>,
    /// Number of keys in the tree.
    len: usize,
    /// Largest tolerated `|balance|` at any node.
    max_imbalance: MaxImbalance,
    /// Single rotations applied since construction or the last clear.
    rotations: u64,
}

/// One step of a descent: the node visited and the child followed.
struct PathElement {
    node: Handle,
    side: Side,
}

/// A descent from the root, shallowest first. Spills to the heap for the
/// deep chains a wide tolerance allows.
type Path = SmallVec<[PathElement; 32]>;

/// Direction a rebalance rotates in, named after the primitive applied.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum Rotation {
    Left,
    Right,
    LeftRight,
    RightLeft,
}

impl<T> RawAvlgTree<T> {
    /// Creates a new, empty tree.
    pub(crate) const fn new(max_imbalance: MaxImbalance) -> Self {
        Self {
            nodes: Arena::new(),
            root: None,
            len: 0,
            max_imbalance,
            rotations: 0,
        }
    }

    /// Creates a new tree with room for `capacity` keys.
    pub(crate) fn with_capacity(max_imbalance: MaxImbalance, capacity: usize) -> Self {
        Self {
            nodes: Arena::with_capacity(capacity),
            root: None,
            len: 0,
            max_imbalance,
            rotations: 0,
        }
    }

    pub(crate) const fn len(&self) -> usize {
        self.len
    }

    pub(crate) const fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub(crate) fn capacity(&self) -> usize {
        self.nodes.capacity()
    }

    pub(crate) const fn max_imbalance(&self) -> MaxImbalance {
        self.max_imbalance
    }

    pub(crate) const fn rotations(&self) -> u64 {
        self.rotations
    }

    pub(crate) const fn root(&self) -> Option<Handle> {
        self.root
    }

    pub(crate) fn node(&self, handle: Handle) -> &Node<T> {
        self.nodes.get(handle)
    }

    /// Height of the whole tree; -1 when empty.
    pub(crate) fn height(&self) -> i32 {
        self.height_of(self.root)
    }

    /// Drops every key. The tolerance is kept.
    pub(crate) fn clear(&mut self) {
        debug!("clearing {} tree holding {} keys", self.max_imbalance, self.len);
        self.nodes.clear();
        self.root = None;
        self.len = 0;
        self.rotations = 0;
    }

    fn height_of(&self, link: Option<Handle>) -> i32 {
        link.map_or(EMPTY_HEIGHT, |handle| self.nodes.get(handle).height())
    }

    fn balance_of(&self, link: Option<Handle>) -> i32 {
        link.map_or(0, |handle| self.nodes.get(handle).balance())
    }

    /// Refreshes the cached height and balance of `handle` from its children.
    fn update(&mut self, handle: Handle) {
        let node = self.nodes.get(handle);
        let left_height = self.height_of(node.left());
        let right_height = self.height_of(node.right());
        self.nodes.get_mut(handle).set_child_heights(left_height, right_height);
    }

    // ─── Rotation primitives ────────────────────────────────────────────────

    fn rotate_right(&mut self, handle: Handle) -> Handle {
        let pivot = self.nodes.get(handle).left().expect("`RawAvlgTree::rotate_right()` - no left child!");
        let inner = self.nodes.get(pivot).right();

        self.nodes.get_mut(handle).set_left(inner);
        self.nodes.get_mut(pivot).set_right(Some(handle));

        // The demoted node is now below the pivot, so it goes first.
        self.update(handle);
        self.update(pivot);
        self.rotations += 1;
        trace!("rotate right: {pivot} promoted over {handle}");
        pivot
    }

    fn rotate_left(&mut self, handle: Handle) -> Handle {
        let pivot = self.nodes.get(handle).right().expect("`RawAvlgTree::rotate_left()` - no right child!");
        let inner = self.nodes.get(pivot).left();

        self.nodes.get_mut(handle).set_right(inner);
        self.nodes.get_mut(pivot).set_left(Some(handle));

        self.update(handle);
        self.update(pivot);
        self.rotations += 1;
        trace!("rotate left: {pivot} promoted over {handle}");
        pivot
    }

    fn rotate_left_right(&mut self, handle: Handle) -> Handle {
        let left = self.nodes.get(handle).left().expect("`RawAvlgTree::rotate_left_right()` - no left child!");
        let left = self.rotate_left(left);
        self.nodes.get_mut(handle).set_left(Some(left));
        self.rotate_right(handle)
    }

    fn rotate_right_left(&mut self, handle: Handle) -> Handle {
        let right = self.nodes.get(handle).right().expect("`RawAvlgTree::rotate_right_left()` - no right child!");
        let right = self.rotate_right(right);
        self.nodes.get_mut(handle).set_right(Some(right));
        self.rotate_left(handle)
    }

    // ─── Rebalancing ────────────────────────────────────────────────────────

    /// Picks the rotation that repairs a node whose `|balance|` exceeds `G`.
    ///
    /// Only the sign of the heavy child's balance matters: when the child
    /// leans away from the parent's heavy side the shape is a zig-zag and a
    /// double rotation is needed.
    fn select_rotation(&self, handle: Handle) -> Option<Rotation> {
        let node = self.nodes.get(handle);
        let balance = node.balance();
        if !self.max_imbalance.is_exceeded_by(balance) {
            return None;
        }

        if balance > 0 {
            if self.balance_of(node.left()) >= 0 {
                Some(Rotation::Right)
            } else {
                Some(Rotation::LeftRight)
            }
        } else if self.balance_of(node.right()) <= 0 {
            Some(Rotation::Left)
        } else {
            Some(Rotation::RightLeft)
        }
    }

    /// Refreshes `handle` after a child changed and rotates if it is now out
    /// of tolerance. Returns the root of the repaired subtree.
    fn rebalance(&mut self, handle: Handle) -> Handle {
        self.update(handle);
        match self.select_rotation(handle) {
            None => handle,
            Some(Rotation::Right) => self.rotate_right(handle),
            Some(Rotation::Left) => self.rotate_left(handle),
            Some(Rotation::LeftRight) => self.rotate_left_right(handle),
            Some(Rotation::RightLeft) => self.rotate_right_left(handle),
        }
    }
}

impl<T: Ord> RawAvlgTree<T> {
    /// Finds the node holding `key` by ordered descent.
    pub(crate) fn search<Q>(&self, key: &Q) -> Option<Handle>
    where
        T: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let mut current = self.root;
        while let Some(handle) = current {
            let node = self.nodes.get(handle);
            current = match key.cmp(node.key().borrow()) {
                Less => node.left(),
                Greater => node.right(),
                Equal => return Some(handle),
            };
        }
        None
    }

    pub(crate) fn get<Q>(&self, key: &Q) -> Option<&T>
    where
        T: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.search(key).map(|handle| self.nodes.get(handle).key())
    }

    /// Inserts `key`. Returns `false` and leaves the tree untouched when an
    /// equal key is already present.
    pub(crate) fn insert(&mut self, key: T) -> bool {
        let mut path = Path::new();
        let mut current = self.root;

        while let Some(handle) = current {
            let node = self.nodes.get(handle);
            let side = match key.cmp(node.key()) {
                Less => Side::Left,
                Greater => Side::Right,
                Equal => return false,
            };
            current = node.child(side);
            path.push(PathElement {
                node: handle,
                side,
            });
        }

        let leaf = self.nodes.alloc(Node::leaf(key));
        self.root = self.unwind(&mut path, Some(leaf));
        self.len += 1;
        true
    }

    /// Removes `key` and returns it, or `None` when it is absent.
    ///
    /// A node with a right subtree takes over its in-order successor's key and
    /// the successor is unlinked instead, so the path always ends at a node
    /// with at most one child.
    pub(crate) fn remove<Q>(&mut self, key: &Q) -> Option<T>
    where
        T: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let mut path = Path::new();
        let mut current = self.root;

        let target = loop {
            let handle = current?;
            let node = self.nodes.get(handle);
            let side = match key.cmp(node.key().borrow()) {
                Less => Side::Left,
                Greater => Side::Right,
                Equal => break handle,
            };
            current = node.child(side);
            path.push(PathElement {
                node: handle,
                side,
            });
        };

        let target_node = self.nodes.get(target);
        let (left, right) = (target_node.left(), target_node.right());
        let (orphan, removed) = match right {
            Some(right) => {
                path.push(PathElement {
                    node: target,
                    side: Side::Right,
                });
                let mut successor = right;
                while let Some(left) = self.nodes.get(successor).left() {
                    path.push(PathElement {
                        node: successor,
                        side: Side::Left,
                    });
                    successor = left;
                }

                // The successor has no left child; its right subtree takes its place.
                let orphan = self.nodes.get(successor).right();
                let successor_key = self.nodes.take(successor).into_key();
                trace!("splicing successor {successor} into {target}");
                (orphan, self.nodes.get_mut(target).replace_key(successor_key))
            }
            None => (left, self.nodes.take(target).into_key()),
        };

        self.root = self.unwind(&mut path, orphan);
        self.len -= 1;
        Some(removed)
    }

    // ─── Whole-tree diagnostics ─────────────────────────────────────────────

    /// Checks that every key sits strictly between the bounds its ancestors
    /// impose.
    pub(crate) fn is_bst(&self) -> bool {
        let mut pending: SmallVec<[(Handle, Option<&T>, Option<&T>); 32]> = SmallVec::new();
        pending.extend(self.root.map(|root| (root, None, None)));

        while let Some((handle, lower, upper)) = pending.pop() {
            let node = self.nodes.get(handle);
            let key = node.key();
            if lower.is_some_and(|lower| key <= lower) || upper.is_some_and(|upper| key >= upper) {
                return false;
            }
            pending.extend(node.left().map(|left| (left, lower, Some(key))));
            pending.extend(node.right().map(|right| (right, Some(key), upper)));
        }
        true
    }
}

impl<T> RawAvlgTree<T> {
    /// Walks back up a recorded descent. `child` is the new subtree below the
    /// deepest entry; each ancestor relinks it, is rebalanced, and hands its
    /// own repaired root to the next entry up. Returns the new tree root.
    fn unwind(&mut self, path: &mut Path, mut child: Option<Handle>) -> Option<Handle> {
        while let Some(PathElement {
            node,
            side,
        }) = path.pop()
        {
            self.nodes.get_mut(node).set_child(side, child);
            child = Some(self.rebalance(node));
        }
        child
    }

    /// Returns `true` if `check` holds for every reachable node. Stops at the
    /// first failure.
    fn all_nodes(&self, mut check: impl FnMut(&Node<T>) -> bool) -> bool {
        let mut pending: SmallVec<[Handle; 32]> = self.root.into_iter().collect();
        while let Some(handle) = pending.pop() {
            let node = self.nodes.get(handle);
            if !check(node) {
                return false;
            }
            pending.extend(node.left());
            pending.extend(node.right());
        }
        true
    }

    /// Checks `|balance| <= G` at every node.
    pub(crate) fn is_balanced(&self) -> bool {
        self.all_nodes(|node| !self.max_imbalance.is_exceeded_by(node.balance()))
    }

    /// Checks that the cached heights and balances match the real shape, and
    /// that the key count matches the number of reachable nodes.
    ///
    /// Leaves see absent children as height -1, so if every node agrees with
    /// its children's cached heights, every cached height is the real one.
    pub(crate) fn is_height_consistent(&self) -> bool {
        let mut reachable = 0;
        let consistent = self.all_nodes(|node| {
            reachable += 1;
            let left = self.height_of(node.left());
            let right = self.height_of(node.right());
            node.height() == left.max(right) + 1 && node.balance() == left - right
        });
        consistent && reachable == self.len && reachable == self.nodes.len()
    }
}
