use core::fmt;
use core::num::NonZero;

use crate::Error;

/// The balance tolerance `G` of an [`AvlgTree`](crate::AvlgTree).
///
/// Every node of the tree keeps `|height(left) - height(right)| <= G`.
/// `G = 1` is the classic AVL tree; larger values trade search depth for
/// fewer rotations.
///
/// # Examples
///
/// ```
/// use avlg_tree::{Error, MaxImbalance};
///
/// let g = MaxImbalance::new(3)?;
/// assert_eq!(g.get(), 3);
/// assert_eq!(MaxImbalance::new(0), Err(Error::InvalidParameter));
/// assert_eq!(MaxImbalance::AVL.get(), 1);
/// # Ok::<(), Error>(())
/// ```
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[repr(transparent)]
pub struct MaxImbalance(NonZero<u32>);

impl MaxImbalance {
    /// `G = 1`, the classic AVL bound.
    pub const AVL: Self = Self(NonZero::<u32>::MIN);

    /// Validates `max_imbalance` as a balance tolerance.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParameter`] when `max_imbalance` is 0.
    pub const fn new(max_imbalance: u32) -> Result<Self, Error> {
        match NonZero::new(max_imbalance) {
            Some(g) => Ok(Self(g)),
            None => Err(Error::InvalidParameter),
        }
    }

    /// Returns `G`.
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0.get()
    }

    /// Returns `true` when a node with this `balance` must be rotated.
    #[inline]
    pub(crate) const fn is_exceeded_by(self, balance: i32) -> bool {
        balance.unsigned_abs() > self.get()
    }
}

impl Default for MaxImbalance {
    fn default() -> Self {
        Self::AVL
    }
}

impl TryFrom<u32> for MaxImbalance {
    type Error = Error;

    fn try_from(max_imbalance: u32) -> Result<Self, Self::Error> {
        Self::new(max_imbalance)
    }
}

impl From<MaxImbalance> for u32 {
    fn from(max_imbalance: MaxImbalance) -> Self {
        max_imbalance.get()
    }
}

impl fmt::Display for MaxImbalance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AVL-{}", self.get())
    }
}
