use std::fmt::Debug;

/// Removal silently cuts the text down to what fits in the output buffer.
#[derive(Copy, Clone, Debug, Default)]
pub struct Truncate;

/// Removal fails instead of cutting the text, and the deque is left as it was.
#[derive(Copy, Clone, Debug, Default)]
pub struct Reject;

/// What a bounded-copy removal does when the stored text is longer than the buffer allows.
pub trait OverflowBehavior: seal_overflow_behavior::Sealed + Debug + Copy + Default {}
pub(crate) mod seal_overflow_behavior {
    pub trait Sealed {
        const REJECTS: bool;
    }
}

impl OverflowBehavior for Truncate {}
impl OverflowBehavior for Reject {}

impl seal_overflow_behavior::Sealed for Truncate {
    const REJECTS: bool = false;
}
impl seal_overflow_behavior::Sealed for Reject {
    const REJECTS: bool = true;
}
