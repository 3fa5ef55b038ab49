use super::AvlgTree;
use crate::raw::RawAvlgTree;
use crate::{Error, MaxImbalance};

impl<T> AvlgTree<T> {
    /// Creates an empty tree with tolerance `max_imbalance` and room for at
    /// least `capacity` keys before node storage reallocates.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParameter`] when `max_imbalance` is 0.
    ///
    /// # Examples
    ///
    /// ```
    /// use avlg_tree::AvlgTree;
    ///
    /// let tree: AvlgTree<i32> = AvlgTree::with_capacity(2, 16)?;
    /// assert!(tree.is_empty());
    /// assert!(tree.capacity() >= 16);
    /// # Ok::<(), avlg_tree::Error>(())
    /// ```
    ///
    /// # Complexity
    ///
    /// O(capacity) for memory allocation.
    pub fn with_capacity(max_imbalance: u32, capacity: usize) -> Result<Self, Error> {
        let max_imbalance = MaxImbalance::new(max_imbalance)?;
        Ok(AvlgTree {
            raw: RawAvlgTree::with_capacity(max_imbalance, capacity),
        })
    }

    /// Returns how many keys the tree can hold without reallocating.
    ///
    /// Slots freed by [`delete`](AvlgTree::delete) are reused first.
    ///
    /// # Examples
    ///
    /// ```
    /// use avlg_tree::AvlgTree;
    ///
    /// let tree: AvlgTree<i32> = AvlgTree::with_capacity(1, 32)?;
    /// assert!(tree.capacity() >= 32);
    /// # Ok::<(), avlg_tree::Error>(())
    /// ```
    ///
    /// # Complexity
    ///
    /// O(1)
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.raw.capacity()
    }
}
