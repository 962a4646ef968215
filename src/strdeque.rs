//! A [`StrDeque`] is a double-ended queue of owned strings built on a singly-linked list.
//! It supports pushing at either end, popping from the front, and reversing the whole chain in place.
//! Every push copies its text, so the deque never borrows from the caller once a call returns.

use crate::raw;
use crate::{DequeError, OverflowBehavior, Truncate};
use std::fmt::Debug;
use std::marker::PhantomData;
use std::ptr::NonNull;
use tracing::trace;

type Link = Option<NonNull<Node>>;

// each node owns its text and, logically, the node after it
struct Node {
    value: String,
    next: Link,
}

impl Node {
    #[inline]
    fn alloc(value: String) -> Result<NonNull<Node>, DequeError> {
        let node = raw::alloc(Node { value, next: None })?;
        #[cfg(test)]
        raw::fault::track_node(1);
        Ok(node)
    }

    /// # Safety
    /// `node` must be unlinked from the chain and never touched again.
    #[inline]
    unsafe fn free(node: NonNull<Node>) -> Node {
        #[cfg(test)]
        raw::fault::track_node(-1);
        raw::release(node)
    }
}

/// A double-ended queue of owned strings.
/// Pushing at the front or back and popping from the front are O(1); [`reverse`](StrDeque::reverse) is a single O(n) pass.
///
/// # Examples
/// ```
/// use linkstr::StrDeque;
/// let mut deque = StrDeque::new();
/// deque.push_back("a").unwrap();
/// deque.push_back("b").unwrap();
/// deque.push_front("z").unwrap();
/// assert_eq!(deque.len(), 3);
/// assert_eq!(deque.pop_front().as_deref(), Some("z"));
/// deque.reverse();
/// assert_eq!(deque.front(), Some("b"));
/// ```
///
/// # Overflow Behavior
/// [`pop_front_into`](StrDeque::pop_front_into) copies into a caller-provided buffer.
/// The default ([`Truncate`]) silently cuts the text down to fit.
/// With [`Reject`](crate::Reject) a text that doesn't fit is an error and stays in the deque.
pub struct StrDeque<Overflow = Truncate>
where
    Overflow: OverflowBehavior,
{
    head: Link,
    tail: Link,
    len: usize,
    overflow: Overflow,
}

// the deque exclusively owns every node, so moving it or sharing `&` to it across threads is fine.
// mutation still needs `&mut`, which callers serialize themselves.
unsafe impl<Overflow: OverflowBehavior> Send for StrDeque<Overflow> {}
unsafe impl<Overflow: OverflowBehavior> Sync for StrDeque<Overflow> {}

/// What a bounded-copy removal wrote, returned by [`StrDeque::pop_front_into`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Removed {
    text_len: usize,
    written: usize,
}

impl Removed {
    /// Length in bytes of the text that was removed.
    #[inline]
    pub fn text_len(&self) -> usize {
        self.text_len
    }

    /// Bytes of text written to the buffer, not counting the terminating `0`.
    #[inline]
    pub fn written(&self) -> usize {
        self.written
    }

    #[inline]
    pub fn is_truncated(&self) -> bool {
        self.written < self.text_len
    }
}

// buf must be non-empty
#[inline]
fn copy_bounded(text: &[u8], buf: &mut [u8]) -> Removed {
    let written = text.len().min(buf.len() - 1);
    buf[..written].copy_from_slice(&text[..written]);
    buf[written] = 0;
    Removed {
        text_len: text.len(),
        written,
    }
}

impl StrDeque<Truncate> {
    /// Creates a new, empty `StrDeque`. This does not allocate.
    ///
    /// # Examples
    /// ```
    /// # use linkstr::StrDeque;
    /// let deque = StrDeque::new();
    /// assert!(deque.is_empty());
    /// ```
    #[inline]
    pub const fn new() -> Self {
        StrDeque {
            head: None,
            tail: None,
            len: 0,
            overflow: Truncate,
        }
    }

    /// Creates a new, empty `StrDeque` with a different overflow behavior.
    ///
    /// # Examples
    /// ```
    /// # use linkstr::{DequeError, Reject, StrDeque};
    /// let mut deque = StrDeque::new_with_overflow_behavior::<Reject>();
    /// deque.push_back("too long").unwrap();
    /// let mut buf = [0u8; 4];
    /// assert!(matches!(deque.pop_front_into(&mut buf), Err(DequeError::WouldTruncate { .. })));
    /// assert_eq!(deque.len(), 1);
    /// ```
    #[inline]
    pub fn new_with_overflow_behavior<R: OverflowBehavior>() -> StrDeque<R> {
        StrDeque {
            head: None,
            tail: None,
            len: 0,
            overflow: R::default(),
        }
    }
}

impl<Overflow> StrDeque<Overflow>
where
    Overflow: OverflowBehavior,
{
    /// Converts the deque to a different overflow behavior, keeping its elements.
    #[inline]
    pub fn with_overflow_behavior<R: OverflowBehavior>(mut self) -> StrDeque<R> {
        // `self` is dropped empty afterwards
        StrDeque {
            head: self.head.take(),
            tail: self.tail.take(),
            len: std::mem::take(&mut self.len),
            overflow: R::default(),
        }
    }

    #[inline]
    pub fn overflow_behavior(&self) -> Overflow {
        self.overflow
    }

    /// Copies `text` and pushes it to the front of the `StrDeque`.
    ///
    /// On failure nothing is allocated and the deque is unchanged.
    ///
    /// # Examples
    /// ```
    /// # use linkstr::StrDeque;
    /// let mut deque = StrDeque::new();
    /// deque.push_front("b").unwrap();
    /// deque.push_front("a").unwrap();
    /// assert_eq!(deque.front(), Some("a"));
    /// assert_eq!(deque.back(), Some("b"));
    /// ```
    #[inline]
    pub fn push_front(&mut self, text: &str) -> Result<(), DequeError> {
        let value = raw::copy_str(text)?;
        // if this fails, `value` has already been dropped with the node
        let mut node = Node::alloc(value)?;

        unsafe {
            node.as_mut().next = self.head;
        }
        if self.tail.is_none() {
            self.tail = Some(node);
        }
        self.head = Some(node);
        self.len += 1;
        Ok(())
    }

    /// Copies `text` and pushes it to the back of the `StrDeque`.
    /// The last node is tracked, so this never walks the chain.
    ///
    /// # Examples
    /// ```
    /// # use linkstr::StrDeque;
    /// let mut deque = StrDeque::new();
    /// deque.push_back("a").unwrap();
    /// deque.push_back("b").unwrap();
    /// assert_eq!(deque.front(), Some("a"));
    /// assert_eq!(deque.back(), Some("b"));
    /// ```
    #[inline]
    pub fn push_back(&mut self, text: &str) -> Result<(), DequeError> {
        let value = raw::copy_str(text)?;
        let node = Node::alloc(value)?;

        match self.tail {
            Some(mut tail) => unsafe { tail.as_mut().next = Some(node) },
            None => self.head = Some(node),
        }
        self.tail = Some(node);
        self.len += 1;
        Ok(())
    }

    fn unlink_front(&mut self) -> Option<String> {
        let head = self.head?;
        debug_assert!(self.len > 0, "linked head with a zero count");

        let node = unsafe { Node::free(head) };
        self.head = node.next;
        if self.head.is_none() {
            self.tail = None;
        }
        self.len -= 1;
        Some(node.value)
    }

    /// Pops the string at the front of the `StrDeque`, returning `None` if it is empty.
    /// The stored string is handed over as-is, without copying.
    ///
    /// # Examples
    /// ```
    /// # use linkstr::StrDeque;
    /// let mut deque = StrDeque::new();
    /// deque.push_back("a").unwrap();
    /// assert_eq!(deque.pop_front(), Some(String::from("a")));
    /// assert_eq!(deque.pop_front(), None);
    /// ```
    #[inline]
    pub fn pop_front(&mut self) -> Option<String> {
        self.unlink_front()
    }

    /// Pops the front element, copying its text into `buf` followed by a `0` terminator.
    ///
    /// At most `buf.len() - 1` bytes of text are written. Longer texts are cut short under [`Truncate`],
    /// and refused (leaving the deque untouched) under [`Reject`](crate::Reject).
    /// The removed node and its text are freed either way once the copy is made.
    ///
    /// # Errors
    /// - [`DequeError::ZeroCapacity`] if `buf` is empty.
    /// - [`DequeError::Empty`] if there is nothing to pop.
    /// - [`DequeError::WouldTruncate`] if the text doesn't fit and the behavior is `Reject`.
    ///
    /// # Examples
    /// ```
    /// # use linkstr::StrDeque;
    /// let mut deque = StrDeque::new();
    /// deque.push_back("hello").unwrap();
    /// let mut buf = [0xffu8; 4];
    /// let removed = deque.pop_front_into(&mut buf).unwrap();
    /// assert!(removed.is_truncated());
    /// assert_eq!(&buf, b"hel\0");
    /// assert!(deque.is_empty());
    /// ```
    #[inline]
    pub fn pop_front_into(&mut self, buf: &mut [u8]) -> Result<Removed, DequeError> {
        let capacity = buf.len();
        if capacity == 0 {
            return Err(DequeError::ZeroCapacity);
        }
        let text_len = self.front().ok_or(DequeError::Empty)?.len();
        if Overflow::REJECTS && text_len >= capacity {
            return Err(DequeError::WouldTruncate {
                needed: text_len + 1,
                capacity,
            });
        }

        let value = self.unlink_front().ok_or(DequeError::Empty)?;
        Ok(copy_bounded(value.as_bytes(), buf))
    }

    /// Returns the number of strings in the `StrDeque`. This reads a counter and never walks the chain.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the string at the front, if any.
    #[inline]
    pub fn front(&self) -> Option<&str> {
        self.head
            .map(|node| unsafe { (*node.as_ptr()).value.as_str() })
    }

    /// Returns the string at the back, if any.
    #[inline]
    pub fn back(&self) -> Option<&str> {
        self.tail
            .map(|node| unsafe { (*node.as_ptr()).value.as_str() })
    }

    /// Reverses the order of the strings in place.
    ///
    /// Nothing is allocated or freed: each node's link is pointed back at its predecessor in one forward pass,
    /// then the front and back are swapped.
    ///
    /// # Examples
    /// ```
    /// # use linkstr::StrDeque;
    /// let mut deque = StrDeque::new();
    /// for text in ["a", "b", "c"] {
    ///     deque.push_back(text).unwrap();
    /// }
    /// deque.reverse();
    /// assert_eq!(deque.pop_front().as_deref(), Some("c"));
    /// assert_eq!(deque.back(), Some("a"));
    /// ```
    pub fn reverse(&mut self) {
        if self.len < 2 {
            return;
        }

        let mut prev: Link = None;
        let mut current = self.head;
        while let Some(mut node) = current {
            unsafe {
                // grab the successor before the link is overwritten
                let next = node.as_ref().next;
                node.as_mut().next = prev;
                prev = Some(node);
                current = next;
            }
        }
        std::mem::swap(&mut self.head, &mut self.tail);
        trace!(len = self.len, "reversed deque");
    }

    /// Frees every node and string, leaving the deque empty and reusable.
    ///
    /// # Examples
    /// ```
    /// # use linkstr::StrDeque;
    /// let mut deque = StrDeque::new();
    /// deque.push_back("a").unwrap();
    /// deque.clear();
    /// assert!(deque.is_empty());
    /// assert_eq!(deque.front(), None);
    /// ```
    #[inline]
    pub fn clear(&mut self) {
        let len = self.len;
        while self.unlink_front().is_some() {}
        if len != 0 {
            trace!(len, "cleared deque");
        }
    }

    #[inline]
    pub(crate) fn iter(&self) -> Iter<'_> {
        Iter {
            next: self.head,
            remaining: self.len,
            _marker: PhantomData,
        }
    }
}

impl Default for StrDeque<Truncate> {
    #[inline]
    fn default() -> Self {
        StrDeque::new()
    }
}

impl<Overflow> Drop for StrDeque<Overflow>
where
    Overflow: OverflowBehavior,
{
    #[inline]
    fn drop(&mut self) {
        self.clear();
    }
}

impl<Overflow> Debug for StrDeque<Overflow>
where
    Overflow: OverflowBehavior,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

pub(crate) struct Iter<'a> {
    next: Link,
    remaining: usize,
    _marker: PhantomData<&'a Node>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = &'a str;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let node = self.next?;
        let node = unsafe { &*node.as_ptr() };
        self.next = node.next;
        self.remaining -= 1;
        Some(node.value.as_str())
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

#[cfg(test)]
impl<Overflow> StrDeque<Overflow>
where
    Overflow: OverflowBehavior,
{
    pub(crate) fn to_vec(&self) -> Vec<String> {
        self.iter().map(String::from).collect()
    }

    /// Walks the chain and checks the head/tail/count relationship.
    pub(crate) fn assert_links(&self) {
        match (self.head, self.tail) {
            (None, None) => assert_eq!(self.len, 0),
            (Some(head), Some(tail)) => {
                assert!(self.len > 0);
                assert_eq!(head == tail, self.len == 1);
                let mut steps = 0;
                let mut node = head;
                while let Some(next) = unsafe { node.as_ref().next } {
                    node = next;
                    steps += 1;
                    assert!(steps < self.len, "chain is longer than the count");
                }
                assert_eq!(node, tail, "chain doesn't end at the tail");
                assert_eq!(steps, self.len - 1);
            }
            (head, tail) => panic!("head {head:?} and tail {tail:?} disagree"),
        }
    }
}
