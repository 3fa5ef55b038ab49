use thiserror::Error;

/// Errors reported by [`AvlgTree`](crate::AvlgTree) operations.
///
/// A failed operation never mutates the tree.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum Error {
    /// The maximum imbalance `G` was smaller than 1.
    #[error("maximum imbalance must be at least 1")]
    InvalidParameter,
    /// The operation needs at least one key in the tree.
    #[error("tree is empty")]
    EmptyTree,
}
