//! Position handles into a [`Deque`](crate::Deque).
//!
//! A [`Cursor`] is a detached handle: it never borrows the deque it came
//! from, never owns storage, and never extends any lifetime. It pairs a
//! [`Snapshot`] of the deque's shape with a signed logical index, and all
//! element access goes back through the deque, which re-validates the
//! snapshot first. A cursor left over from before a structural mutation
//! fails with [`Error::Stale`](crate::Error::Stale) rather than addressing
//! storage that may have moved.

use core::cmp::Ordering;
use core::fmt::{self, Debug, Formatter};
use core::ops::{Add, AddAssign, Sub, SubAssign};

/// The shape of a deque at the moment a cursor was created.
///
/// Two cursors address the same container only if all five fields are
/// pairwise equal. The storage pointer is an identity token and is never
/// dereferenced.
pub(crate) struct Snapshot<T> {
    pub(crate) storage: *const T,
    pub(crate) capacity: usize,
    pub(crate) len: usize,
    pub(crate) front: usize,
    pub(crate) generation: u64,
}

impl<T> Clone for Snapshot<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Snapshot<T> {}

impl<T> PartialEq for Snapshot<T> {
    fn eq(&self, other: &Self) -> bool {
        self.storage == other.storage
            && self.capacity == other.capacity
            && self.len == other.len
            && self.front == other.front
            && self.generation == other.generation
    }
}

/// A position inside a [`Deque`](crate::Deque), created by
/// [`begin`](crate::Deque::begin) and [`end`](crate::Deque::end) or by
/// arithmetic on an existing cursor.
///
/// Cursors support pointer-like arithmetic: `+` and `-` with an `isize`
/// offset, `+=` and `-=`, and cursor-minus-cursor yielding the signed
/// logical distance. Use `+= 1` and `-= 1` where a pointer would be
/// incremented or decremented. Out-of-window positions, including `end()`
/// and negative intermediates, are legal cursor values; they only fail when
/// handed back to the deque.
///
/// Comparisons are meaningful only between cursors created against the same
/// snapshot. Across differing snapshots, `==`, `<`, `<=`, `>`, and `>=` are
/// all `false` and `!=` is `true`; this is encoded by
/// [`partial_cmp`](PartialOrd::partial_cmp) returning `None`, which is also
/// why `Cursor` implements neither `Eq` nor `Ord`.
///
/// # Examples
/// ```
/// use ringdeque::Deque;
///
/// let deque: Deque<i32> = [10, 20, 30].into();
/// let mut c = deque.begin();
/// assert_eq!(deque.at_cursor(&c), Ok(&10));
///
/// c += 2;
/// assert_eq!(deque.at_cursor(&c), Ok(&30));
/// assert_eq!(deque.end() - c, 1);
/// assert!(c < deque.end());
/// ```
pub struct Cursor<T> {
    pub(crate) snap: Snapshot<T>,
    pub(crate) index: isize,
}

impl<T> Cursor<T> {
    /// Returns the cursor's logical index; 0 is the front of the deque as it
    /// was when the snapshot was taken.
    ///
    /// The index is not required to lie inside the live window.
    #[inline]
    pub fn index(&self) -> isize {
        self.index
    }

    #[inline]
    fn same_container(&self, other: &Self) -> bool {
        self.snap == other.snap
    }
}

impl<T> Clone for Cursor<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Cursor<T> {}

impl<T> Debug for Cursor<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cursor")
            .field("index", &self.index)
            .field("generation", &self.snap.generation)
            .finish()
    }
}

impl<T> Add<isize> for Cursor<T> {
    type Output = Cursor<T>;

    #[inline]
    fn add(self, offset: isize) -> Cursor<T> {
        Cursor {
            snap: self.snap,
            index: self.index + offset,
        }
    }
}

impl<T> Sub<isize> for Cursor<T> {
    type Output = Cursor<T>;

    #[inline]
    fn sub(self, offset: isize) -> Cursor<T> {
        Cursor {
            snap: self.snap,
            index: self.index - offset,
        }
    }
}

impl<T> AddAssign<isize> for Cursor<T> {
    #[inline]
    fn add_assign(&mut self, offset: isize) {
        self.index += offset;
    }
}

impl<T> SubAssign<isize> for Cursor<T> {
    #[inline]
    fn sub_assign(&mut self, offset: isize) {
        self.index -= offset;
    }
}

impl<T> Sub for Cursor<T> {
    type Output = isize;

    /// Returns the signed logical distance between two cursors.
    #[inline]
    fn sub(self, other: Cursor<T>) -> isize {
        self.index - other.index
    }
}

impl<T> PartialEq for Cursor<T> {
    fn eq(&self, other: &Self) -> bool {
        self.same_container(other) && self.index == other.index
    }
}

impl<T> PartialOrd for Cursor<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        if !self.same_container(other) {
            return None;
        }

        Some(self.index.cmp(&other.index))
    }
}
