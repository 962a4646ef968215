//! Nullable entry points for drivers that hold a deque which may not exist.
//!
//! Every function here accepts an absent deque and treats it as a failure (or a no-op), never as a bug.
//! Success is reported as a plain `bool`; the reason for a failure is logged at `debug` level and otherwise dropped.
//!
//! # Examples
//! ```
//! use linkstr::handle;
//! let mut deque = handle::create();
//! assert!(handle::insert_tail(deque.as_deref_mut(), "a"));
//! assert!(handle::insert_head(deque.as_deref_mut(), "z"));
//! assert_eq!(handle::size(deque.as_deref()), 2);
//!
//! let mut buf = [0u8; 10];
//! assert!(handle::remove_head(deque.as_deref_mut(), Some(&mut buf[..])));
//! assert_eq!(&buf[..2], b"z\0");
//! handle::destroy(deque);
//!
//! assert!(!handle::insert_head::<linkstr::Truncate>(None, "nowhere"));
//! ```

use crate::{raw, OverflowBehavior, StrDeque};
use tracing::debug;

/// Allocates a new, empty deque on the heap. Returns `None` if the allocation fails.
pub fn create() -> Option<Box<StrDeque>> {
    match raw::alloc(StrDeque::new()) {
        // memory from `raw::alloc` has exactly the layout `Box` expects
        Ok(ptr) => Some(unsafe { Box::from_raw(ptr.as_ptr()) }),
        Err(err) => {
            debug!(%err, "couldn't create deque");
            None
        }
    }
}

/// Frees the deque along with every string it still holds. Passing `None` does nothing.
pub fn destroy<O: OverflowBehavior>(deque: Option<Box<StrDeque<O>>>) {
    drop(deque);
}

/// Copies `text` to the front of the deque.
/// Returns `false` if there is no deque or the copy couldn't be allocated; the deque is unchanged in that case.
pub fn insert_head<O: OverflowBehavior>(deque: Option<&mut StrDeque<O>>, text: &str) -> bool {
    let Some(deque) = deque else {
        return false;
    };
    match deque.push_front(text) {
        Ok(()) => true,
        Err(err) => {
            debug!(%err, "insert_head failed");
            false
        }
    }
}

/// Copies `text` to the back of the deque. Same failure contract as [`insert_head`].
pub fn insert_tail<O: OverflowBehavior>(deque: Option<&mut StrDeque<O>>, text: &str) -> bool {
    let Some(deque) = deque else {
        return false;
    };
    match deque.push_back(text) {
        Ok(()) => true,
        Err(err) => {
            debug!(%err, "insert_tail failed");
            false
        }
    }
}

/// Removes the front string.
///
/// With `Some(buf)` the text is copied into `buf` as by [`StrDeque::pop_front_into`]:
/// an empty `buf` is a failure, and a long text is cut to `buf.len() - 1` bytes plus a `0`.
/// With `None` the string is discarded.
/// Returns `false` if there is no deque, it is empty, or the copy was refused.
pub fn remove_head<O: OverflowBehavior>(
    deque: Option<&mut StrDeque<O>>,
    buf: Option<&mut [u8]>,
) -> bool {
    let Some(deque) = deque else {
        return false;
    };
    let result = match buf {
        Some(buf) => deque.pop_front_into(buf).map(drop),
        None => deque.pop_front().map(drop).ok_or(crate::DequeError::Empty),
    };
    match result {
        Ok(()) => true,
        Err(err) => {
            debug!(%err, "remove_head failed");
            false
        }
    }
}

/// Number of strings in the deque, or `0` if there is no deque.
pub fn size<O: OverflowBehavior>(deque: Option<&StrDeque<O>>) -> usize {
    deque.map_or(0, StrDeque::len)
}

/// Reverses the deque in place. Does nothing if there is no deque.
pub fn reverse<O: OverflowBehavior>(deque: Option<&mut StrDeque<O>>) {
    if let Some(deque) = deque {
        deque.reverse();
    }
}

#[cfg(test)]
mod handle_tests {
    use super::*;
    use crate::raw::fault;
    use crate::Reject;

    #[test]
    fn absent_deque_is_handled() {
        assert!(!insert_head::<crate::Truncate>(None, "a"));
        assert!(!insert_tail::<crate::Truncate>(None, "a"));
        let mut buf = [0u8; 4];
        assert!(!remove_head::<crate::Truncate>(None, Some(&mut buf[..])));
        assert_eq!(size::<crate::Truncate>(None), 0);
        reverse::<crate::Truncate>(None);
        destroy::<crate::Truncate>(None);
    }

    #[test]
    fn scenario_through_handles() {
        let mut deque = create();
        assert!(insert_tail(deque.as_deref_mut(), "a"));
        assert!(insert_tail(deque.as_deref_mut(), "b"));
        assert!(insert_head(deque.as_deref_mut(), "z"));
        assert_eq!(size(deque.as_deref()), 3);

        let mut buf = [0u8; 10];
        assert!(remove_head(deque.as_deref_mut(), Some(&mut buf[..])));
        assert_eq!(&buf[..2], b"z\0");
        assert_eq!(size(deque.as_deref()), 2);

        reverse(deque.as_deref_mut());
        assert_eq!(deque.as_deref().map(StrDeque::to_vec).unwrap(), ["b", "a"]);
        destroy(deque);
    }

    #[test]
    fn remove_without_buffer_discards() {
        let mut deque = create();
        assert!(insert_tail(deque.as_deref_mut(), "gone"));
        assert!(remove_head(deque.as_deref_mut(), None));
        assert_eq!(size(deque.as_deref()), 0);
        assert!(!remove_head(deque.as_deref_mut(), None));
    }

    #[test]
    fn remove_into_zero_capacity_fails() {
        let mut deque = create();
        assert!(insert_tail(deque.as_deref_mut(), "kept"));
        assert!(!remove_head(deque.as_deref_mut(), Some(&mut [0u8; 0][..])));
        assert_eq!(size(deque.as_deref()), 1);
    }

    #[test]
    fn remove_from_empty_fails() {
        let mut deque = create();
        let mut buf = [0u8; 4];
        assert!(!remove_head(deque.as_deref_mut(), Some(&mut buf[..])));
        assert_eq!(size(deque.as_deref()), 0);
    }

    #[test]
    fn rejecting_deque_reports_failure() {
        let mut deque = Box::new(StrDeque::new_with_overflow_behavior::<Reject>());
        assert!(insert_tail(Some(&mut *deque), "abcdef"));
        let mut buf = [0u8; 3];
        assert!(!remove_head(Some(&mut *deque), Some(&mut buf[..])));
        assert_eq!(size(Some(&*deque)), 1);
        destroy(Some(deque));
    }

    #[test]
    fn create_reports_allocation_failure() {
        fault::fail_after(0);
        assert!(create().is_none());
        assert!(create().is_some());
    }

    #[test]
    fn failed_insert_does_not_leak() {
        let mut deque = create();
        let live = fault::live_nodes();
        fault::fail_after(1);
        assert!(!insert_head(deque.as_deref_mut(), "lost"));
        assert_eq!(fault::live_nodes(), live);
        assert_eq!(size(deque.as_deref()), 0);
        destroy(deque);
    }

    #[test]
    fn destroy_frees_remaining_nodes() {
        let live = fault::live_nodes();
        let mut deque = create();
        for text in ["a", "b", "c"] {
            assert!(insert_tail(deque.as_deref_mut(), text));
        }
        assert_eq!(fault::live_nodes(), live + 3);
        destroy(deque);
        assert_eq!(fault::live_nodes(), live);
    }
}
