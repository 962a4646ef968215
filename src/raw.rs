//! Fallible allocation for the text copies, the nodes and the deque itself.
//! Nothing in here aborts on out-of-memory; every failure comes back as [`DequeError::AllocFailed`].

use crate::DequeError;
use std::alloc::Layout;
use std::ptr::NonNull;
use tracing::warn;

#[inline]
fn alloc_failed(bytes: usize) -> DequeError {
    warn!(bytes, "allocation failed");
    DequeError::AllocFailed { bytes }
}

/// Copies `text` into freshly owned storage, so the caller's buffer is never aliased.
#[inline]
pub(crate) fn copy_str(text: &str) -> Result<String, DequeError> {
    #[cfg(test)]
    fault::check(text.len())?;

    let mut copy = String::new();
    copy.try_reserve_exact(text.len())
        .map_err(|_| alloc_failed(text.len()))?;
    copy.push_str(text);
    Ok(copy)
}

/// Moves `value` onto the heap. If the allocation fails, `value` is dropped before returning,
/// which releases anything it owns.
#[inline]
pub(crate) fn alloc<T>(value: T) -> Result<NonNull<T>, DequeError> {
    let layout = Layout::new::<T>();

    #[cfg(test)]
    fault::check(layout.size())?;

    let ptr = if layout.size() == 0 {
        NonNull::dangling()
    } else {
        let raw = unsafe { std::alloc::alloc(layout) } as *mut T;
        match NonNull::new(raw) {
            Some(ptr) => ptr,
            None => return Err(alloc_failed(layout.size())),
        }
    };

    unsafe {
        // "semantically, [the value] is moved" into the new allocation
        std::ptr::write(ptr.as_ptr(), value);
    }
    Ok(ptr)
}

/// Moves the value back out of an allocation made by [`alloc`] and frees the memory.
///
/// # Safety
/// `ptr` must come from [`alloc::<T>`](alloc) and must not be used again afterwards.
#[inline]
pub(crate) unsafe fn release<T>(ptr: NonNull<T>) -> T {
    let value = std::ptr::read(ptr.as_ptr());
    let layout = Layout::new::<T>();
    if layout.size() != 0 {
        std::alloc::dealloc(ptr.as_ptr() as *mut u8, layout);
    }
    value
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn copy_is_independent_of_source() {
        let mut source = String::from("hello");
        let copy = copy_str(&source).unwrap();
        source.make_ascii_uppercase();
        assert_eq!(copy, "hello");
        assert_ne!(copy.as_ptr(), source.as_ptr());
    }

    #[test]
    fn alloc_release_roundtrip() {
        let ptr = alloc(String::from("boxed")).unwrap();
        let value = unsafe { release(ptr) };
        assert_eq!(value, "boxed");
    }

    #[test]
    fn zst_alloc_does_not_touch_the_allocator() {
        let ptr = alloc(()).unwrap();
        assert_eq!(ptr, NonNull::dangling());
        unsafe { release(ptr) };
    }

    #[test]
    fn injected_failure_hits_the_requested_attempt() {
        fault::fail_after(1);
        assert!(copy_str("first").is_ok());
        assert_eq!(copy_str("second"), Err(DequeError::AllocFailed { bytes: 6 }));
        assert!(copy_str("third").is_ok());
    }
}
