use thiserror::Error;

/// Reasons a [`StrDeque`](crate::StrDeque) operation can fail.
///
/// An absent structure is not represented here; the [`handle`](crate::handle) functions
/// report it as a plain `false`.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum DequeError {
    #[error("AllocFailed couldn't allocate {bytes} bytes")]
    AllocFailed { bytes: usize },
    #[error("Empty the deque has no elements")]
    Empty,
    #[error("ZeroCapacity output buffer has no room for the terminator")]
    ZeroCapacity,
    #[error("WouldTruncate text needs {needed} bytes but the buffer holds {capacity}")]
    WouldTruncate { needed: usize, capacity: usize },
}
