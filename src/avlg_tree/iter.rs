use core::fmt;
use core::iter::FusedIterator;

use smallvec::SmallVec;

use super::AvlgTree;
use crate::raw::{Handle, RawAvlgTree};

// Deep enough for any AVL-1 tree of a few billion keys; relaxed trees spill.
type Spine = SmallVec<[Handle; 32]>;

/// An iterator over the keys of an `AvlgTree`, in ascending order.
///
/// This `struct` is created by the [`iter`] method on [`AvlgTree`].
/// See its documentation for more.
///
/// # Examples
///
/// ```
/// use avlg_tree::AvlgTree;
///
/// let mut tree = AvlgTree::new(2)?;
/// tree.extend([3, 1, 2]);
/// let mut iter = tree.iter();
/// assert_eq!(iter.next(), Some(&1));
/// assert_eq!(iter.next(), Some(&2));
/// assert_eq!(iter.next(), Some(&3));
/// assert_eq!(iter.next(), None);
/// # Ok::<(), avlg_tree::Error>(())
/// ```
///
/// [`iter`]: AvlgTree::iter
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Iter<'a, T: 'a> {
    raw: &'a RawAvlgTree<T>,
    // Ancestors whose key has not been yielded yet, deepest last.
    spine: Spine,
    remaining: usize,
}

impl<'a, T> Iter<'a, T> {
    pub(super) fn new(raw: &'a RawAvlgTree<T>) -> Self {
        let mut iter = Iter {
            raw,
            spine: Spine::new(),
            remaining: raw.len(),
        };
        iter.descend_left(raw.root());
        iter
    }

    fn descend_left(&mut self, mut link: Option<Handle>) {
        while let Some(handle) = link {
            self.spine.push(handle);
            link = self.raw.node(handle).left();
        }
    }
}

impl<T> AvlgTree<T> {
    /// Gets an iterator that visits the keys in ascending order.
    ///
    /// This walks the tree on demand; no position is stored on the nodes.
    ///
    /// # Examples
    ///
    /// ```
    /// use avlg_tree::AvlgTree;
    ///
    /// let mut tree = AvlgTree::new(1)?;
    /// tree.extend([30, 10, 20]);
    ///
    /// let keys: Vec<_> = tree.iter().copied().collect();
    /// assert_eq!(keys, [10, 20, 30]);
    /// # Ok::<(), avlg_tree::Error>(())
    /// ```
    ///
    /// # Complexity
    ///
    /// O(height) to create the iterator; amortized O(1) per step.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter::new(&self.raw)
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        let raw = self.raw;
        let handle = self.spine.pop()?;
        let node = raw.node(handle);
        self.descend_left(node.right());
        self.remaining -= 1;
        Some(node.key())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {
    fn len(&self) -> usize {
        self.remaining
    }
}

impl<T> FusedIterator for Iter<'_, T> {}

impl<T> Clone for Iter<'_, T> {
    fn clone(&self) -> Self {
        Iter {
            raw: self.raw,
            spine: self.spine.clone(),
            remaining: self.remaining,
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Iter<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}

impl<'a, T> IntoIterator for &'a AvlgTree<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Iter<'a, T> {
        self.iter()
    }
}
