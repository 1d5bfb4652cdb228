use thiserror::Error;

/// Errors reported by fallible sequence and cursor operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SequenceError {
    /// An index-based operation named a position outside the sequence.
    #[error("index {index} out of bounds in a sequence of length {len}")]
    OutOfBounds { index: usize, len: usize },

    /// A cursor was asked to move across the past-the-end boundary.
    #[error("cursor cannot cross the past-the-end boundary")]
    Boundary,

    /// A [`Position`](crate::Position) referred to a node that has since
    /// been removed from the sequence.
    #[error("position refers to a removed node")]
    Stale,
}
