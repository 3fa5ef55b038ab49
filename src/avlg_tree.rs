use core::borrow::Borrow;
use core::fmt;

use log::debug;

use crate::raw::RawAvlgTree;
use crate::{Error, MaxImbalance};

mod capacity;
mod iter;

pub use iter::Iter;

/// An ordered set of keys stored in an AVL-G tree.
///
/// An AVL-G tree is a binary search tree in which the heights of the two
/// subtrees of any node differ by at most `G`, the tree's
/// [`MaxImbalance`]. `G = 1` gives the classic AVL tree. A larger `G` lets
/// the tree drift further from perfect balance before it rotates, so
/// mutations rotate less often at the cost of somewhat deeper searches.
///
/// Keys are unique. Inserting a key that is already present leaves the tree
/// unchanged.
///
/// It is a logic error for a key to be modified in such a way that its
/// ordering relative to any other key, as determined by the [`Ord`] trait,
/// changes while it is in the tree. The behavior resulting from such a logic
/// error is not specified, but will be encapsulated to the `AvlgTree` that
/// observed it and not result in undefined behavior.
///
/// # Examples
///
/// ```
/// use avlg_tree::{AvlgTree, Error};
///
/// let mut tree = AvlgTree::new(1)?;
/// tree.insert(10);
/// tree.insert(20);
/// tree.insert(30);
///
/// // Ascending inserts into an AVL-1 tree rotate 20 up to the root.
/// assert_eq!(tree.root(), Ok(&20));
/// assert_eq!(tree.height(), 1);
///
/// assert_eq!(tree.search(&20), Ok(Some(&20)));
/// assert_eq!(tree.delete(&20), Ok(Some(20)));
/// assert_eq!(tree.delete(&20), Ok(None));
/// assert_eq!(tree.len(), 2);
///
/// tree.clear();
/// assert_eq!(tree.delete(&10), Err(Error::EmptyTree));
/// # Ok::<(), Error>(())
/// ```
pub struct AvlgTree<T> {
    raw: RawAvlgTree<T>,
}

impl<T> AvlgTree<T> {
    /// Makes a new, empty `AvlgTree` that tolerates subtree heights
    /// differing by up to `max_imbalance` at every node.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParameter`] when `max_imbalance` is 0.
    ///
    /// # Examples
    ///
    /// ```
    /// use avlg_tree::{AvlgTree, Error};
    ///
    /// let tree: AvlgTree<u32> = AvlgTree::new(3)?;
    /// assert_eq!(tree.max_imbalance().get(), 3);
    /// assert!(AvlgTree::<u32>::new(0).is_err());
    /// # Ok::<(), Error>(())
    /// ```
    pub fn new(max_imbalance: u32) -> Result<Self, Error> {
        let max_imbalance = MaxImbalance::new(max_imbalance)?;
        Ok(Self::with_max_imbalance(max_imbalance))
    }

    /// Makes a new, empty `AvlgTree` from an already validated tolerance.
    ///
    /// # Examples
    ///
    /// ```
    /// use avlg_tree::{AvlgTree, MaxImbalance};
    ///
    /// let tree: AvlgTree<&str> = AvlgTree::with_max_imbalance(MaxImbalance::AVL);
    /// assert_eq!(tree.height(), -1);
    /// ```
    #[must_use]
    pub fn with_max_imbalance(max_imbalance: MaxImbalance) -> Self {
        debug!("new {max_imbalance} tree");
        AvlgTree {
            raw: RawAvlgTree::new(max_imbalance),
        }
    }

    /// Returns the tolerance `G` this tree was built with.
    #[must_use]
    pub const fn max_imbalance(&self) -> MaxImbalance {
        self.raw.max_imbalance()
    }

    /// Returns the height of the tree: the number of edges on the longest
    /// path from the root down to a leaf.
    ///
    /// A single key has height 0 and the empty tree has height -1.
    ///
    /// # Examples
    ///
    /// ```
    /// use avlg_tree::AvlgTree;
    ///
    /// let mut tree = AvlgTree::new(1)?;
    /// assert_eq!(tree.height(), -1);
    /// tree.insert('m');
    /// assert_eq!(tree.height(), 0);
    /// # Ok::<(), avlg_tree::Error>(())
    /// ```
    ///
    /// # Complexity
    ///
    /// O(1)
    #[must_use]
    pub fn height(&self) -> i32 {
        self.raw.height()
    }

    /// Returns the number of keys in the tree.
    ///
    /// # Complexity
    ///
    /// O(1)
    #[doc(alias = "count")]
    #[must_use]
    pub const fn len(&self) -> usize {
        self.raw.len()
    }

    /// Returns `true` if the tree holds no keys.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }

    /// Returns the key stored at the root.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyTree`] when the tree holds no keys.
    pub fn root(&self) -> Result<&T, Error> {
        let root = self.raw.root().ok_or(Error::EmptyTree)?;
        Ok(self.raw.node(root).key())
    }

    /// Returns the number of single rotations performed since the tree was
    /// created or last cleared. A double rotation counts as two.
    ///
    /// # Examples
    ///
    /// ```
    /// use avlg_tree::AvlgTree;
    ///
    /// let mut avl = AvlgTree::new(1)?;
    /// let mut relaxed = AvlgTree::new(4)?;
    /// avl.extend(0..100);
    /// relaxed.extend(0..100);
    /// assert!(relaxed.rotation_count() < avl.rotation_count());
    /// # Ok::<(), avlg_tree::Error>(())
    /// ```
    #[must_use]
    pub const fn rotation_count(&self) -> u64 {
        self.raw.rotations()
    }

    /// Removes every key. The tolerance is kept.
    ///
    /// # Examples
    ///
    /// ```
    /// use avlg_tree::AvlgTree;
    ///
    /// let mut tree = AvlgTree::new(2)?;
    /// tree.extend([1, 2, 3]);
    /// tree.clear();
    /// assert!(tree.is_empty());
    /// assert_eq!(tree.height(), -1);
    /// # Ok::<(), avlg_tree::Error>(())
    /// ```
    pub fn clear(&mut self) {
        self.raw.clear();
    }

    /// Checks that no node's subtree heights differ by more than `G`.
    ///
    /// Walks the whole tree; meant for tests and diagnostics.
    ///
    /// # Complexity
    ///
    /// O(n)
    #[must_use]
    pub fn is_balanced(&self) -> bool {
        self.raw.is_balanced()
    }

    /// Checks that every node's cached height and balance match its
    /// children, and that [`len`](AvlgTree::len) matches the number of
    /// reachable nodes.
    ///
    /// Walks the whole tree; meant for tests and diagnostics.
    ///
    /// # Complexity
    ///
    /// O(n)
    #[must_use]
    pub fn is_height_consistent(&self) -> bool {
        self.raw.is_height_consistent()
    }
}

impl<T: Ord> AvlgTree<T> {
    /// Adds a key to the tree, rotating on the way back to the root wherever
    /// a subtree drifts more than `G` out of balance.
    ///
    /// Returns whether the key was newly inserted. If an equal key is already
    /// present, nothing changes and `false` is returned.
    ///
    /// # Examples
    ///
    /// ```
    /// use avlg_tree::AvlgTree;
    ///
    /// let mut tree = AvlgTree::new(1)?;
    /// assert!(tree.insert(2));
    /// assert!(!tree.insert(2));
    /// assert_eq!(tree.len(), 1);
    /// # Ok::<(), avlg_tree::Error>(())
    /// ```
    ///
    /// # Complexity
    ///
    /// O(height)
    pub fn insert(&mut self, key: T) -> bool {
        self.raw.insert(key)
    }

    /// Removes a key from the tree and returns it.
    ///
    /// A node with a right subtree takes over its in-order successor's key
    /// and the successor is unlinked instead. Every node on the path back to
    /// the root is rebalanced.
    ///
    /// The key may be any borrowed form of the tree's key type, but the
    /// ordering on the borrowed form *must* match the ordering on the key
    /// type.
    ///
    /// Returns `Ok(None)` if the key is not present.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyTree`] when the tree holds no keys.
    ///
    /// # Examples
    ///
    /// ```
    /// use avlg_tree::{AvlgTree, Error};
    ///
    /// let mut tree = AvlgTree::new(2)?;
    /// assert_eq!(tree.delete(&1), Err(Error::EmptyTree));
    ///
    /// tree.insert(1);
    /// assert_eq!(tree.delete(&7), Ok(None));
    /// assert_eq!(tree.delete(&1), Ok(Some(1)));
    /// # Ok::<(), Error>(())
    /// ```
    ///
    /// # Complexity
    ///
    /// O(height)
    pub fn delete<Q>(&mut self, key: &Q) -> Result<Option<T>, Error>
    where
        T: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        if self.is_empty() {
            return Err(Error::EmptyTree);
        }
        Ok(self.raw.remove(key))
    }

    /// Looks a key up by ordered descent.
    ///
    /// Returns a reference to the stored key, or `Ok(None)` if it is absent.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyTree`] when the tree holds no keys.
    ///
    /// # Examples
    ///
    /// ```
    /// use avlg_tree::{AvlgTree, Error};
    ///
    /// let mut tree = AvlgTree::new(1)?;
    /// assert_eq!(tree.search("b"), Err(Error::EmptyTree));
    ///
    /// tree.extend([String::from("a"), String::from("b")]);
    /// assert_eq!(tree.search("b"), Ok(Some(&String::from("b"))));
    /// assert_eq!(tree.search("c"), Ok(None));
    /// # Ok::<(), Error>(())
    /// ```
    ///
    /// # Complexity
    ///
    /// O(height)
    pub fn search<Q>(&self, key: &Q) -> Result<Option<&T>, Error>
    where
        T: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        if self.is_empty() {
            return Err(Error::EmptyTree);
        }
        Ok(self.raw.get(key))
    }

    /// Returns `true` if the tree holds the key. Unlike
    /// [`search`](AvlgTree::search), an empty tree simply answers `false`.
    ///
    /// # Complexity
    ///
    /// O(height)
    #[must_use]
    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.raw.search(key).is_some()
    }

    /// Checks the binary search tree property over the whole tree: every key
    /// in a left subtree is smaller than its ancestor, every key in a right
    /// subtree is greater.
    ///
    /// # Complexity
    ///
    /// O(n)
    #[must_use]
    pub fn is_bst(&self) -> bool {
        self.raw.is_bst()
    }
}

impl<T: Clone> Clone for AvlgTree<T> {
    fn clone(&self) -> Self {
        AvlgTree {
            raw: self.raw.clone(),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for AvlgTree<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

/// Trees are equal when they hold the same keys, whatever their shape or
/// tolerance.
impl<T: PartialEq> PartialEq for AvlgTree<T> {
    fn eq(&self, other: &AvlgTree<T>) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<T: Eq> Eq for AvlgTree<T> {}

impl<T: Ord> Extend<T> for AvlgTree<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for key in iter {
            self.insert(key);
        }
    }
}

impl<'a, T: 'a + Ord + Copy> Extend<&'a T> for AvlgTree<T> {
    fn extend<I: IntoIterator<Item = &'a T>>(&mut self, iter: I) {
        for &key in iter {
            self.insert(key);
        }
    }
}
