#![no_std]
#![warn(missing_docs)]

//! A growable double-ended queue backed by a ring buffer.
//!
//! [`Deque`] owns a contiguous slot array and tracks a logical window into
//! it, giving amortized O(1) pushes and pops at both ends, O(1) indexed
//! access, and O(min(k, len - k)) insertion and removal at arbitrary logical
//! positions. When a push finds the buffer full, capacity doubles and the
//! elements are relinearized into a fresh allocation.
//!
//! Positions inside the deque can also be addressed with [`Cursor`]s, which
//! support pointer-like arithmetic and comparisons. A cursor captures a
//! snapshot of the deque's shape at creation time, and every use of it is
//! re-validated against the deque's current state: once the deque changes
//! its capacity, front offset, or length, earlier cursors fail with
//! [`Error::Stale`] instead of quietly addressing relocated storage.
//!
//! # Examples
//! ```
//! use ringdeque::Deque;
//!
//! let mut deque = Deque::new();
//! deque.push_back(2);
//! deque.push_front(1);
//! deque.push_back(4);
//! deque.pop_back()?;
//! deque.push_back(3);
//!
//! assert_eq!(deque.to_string(), "[ 1 2 3 ]");
//! # Ok::<(), ringdeque::Error>(())
//! ```

extern crate alloc;

pub mod cursor;
pub mod deque;
mod error;

pub use crate::cursor::Cursor;
pub use crate::deque::{Deque, IntoIter, Iter, IterMut};
pub use crate::error::Error;

/// The number of slots a deque created with [`Deque::new`] starts out with.
pub const DEFAULT_CAPACITY: usize = 64;
