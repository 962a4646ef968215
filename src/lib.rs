//! A double-ended queue of owned strings, kept on a singly-linked list.
//!
//! [`StrDeque`] copies every string it is given, so it never borrows from the caller.
//! Insertion at either end and removal from the front are O(1); [`StrDeque::reverse`] relinks the chain in a single pass.
//! All allocation is fallible: running out of memory is reported as [`DequeError::AllocFailed`], never an abort.
//!
//! The [`handle`] module wraps the same operations for drivers that work with a deque that may be absent.
//!
//! # Examples
//! ```
//! use linkstr::StrDeque;
//! let mut deque = StrDeque::new();
//! deque.push_back("a").unwrap();
//! deque.push_back("b").unwrap();
//! deque.push_front("z").unwrap();
//!
//! let mut buf = [0u8; 10];
//! deque.pop_front_into(&mut buf).unwrap();
//! assert_eq!(&buf[..2], b"z\0");
//!
//! deque.reverse();
//! assert_eq!(deque.pop_front().as_deref(), Some("b"));
//! assert_eq!(deque.pop_front().as_deref(), Some("a"));
//! ```

mod error;
pub mod handle;
mod raw;
pub mod settings;
pub mod strdeque;


pub use error::DequeError;
pub use settings::{OverflowBehavior, Reject, Truncate};
pub use strdeque::{Removed, StrDeque};
