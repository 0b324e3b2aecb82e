//! A double-ended queue implemented with a growable ring buffer.
//!
//! This queue has amortized O(1) inserts and removals from both ends of the
//! sequence, O(1) indexing like a vector, and O(min(k, len - k)) insertion
//! and removal at an arbitrary logical position k, achieved by shifting
//! whichever side of the buffer is shorter.

use core::fmt::{self, Debug, Display, Formatter};
use core::hash::{Hash, Hasher};
use core::iter::FusedIterator;
use core::mem::MaybeUninit;
use core::ops::{Index, IndexMut};

use alloc::boxed::Box;
use alloc::vec::Vec;

use crate::cursor::{Cursor, Snapshot};
use crate::error::Error;
use crate::DEFAULT_CAPACITY;

/// A double-ended queue implemented with a growable ring buffer.
///
/// The "default" usage of this type as a queue is to use
/// [`push_back`](Deque::push_back) to add to the queue, and
/// [`pop_front`](Deque::pop_front) to remove from it.
///
/// The deque exclusively owns a slot array of `capacity` entries; the `len`
/// live elements occupy the slots `(front + i) % capacity` for logical
/// indices `i` in `0..len`, so the live window may wrap around the physical
/// end of the array. Pushing into a full deque doubles the capacity and
/// relinearizes the elements, in logical order, into a fresh allocation
/// starting at slot 0.
///
/// Arbitrary positions can be addressed either by logical index
/// ([`insert`](Deque::insert), [`remove`](Deque::remove)) or by [`Cursor`]
/// ([`insert_at`](Deque::insert_at), [`remove_at`](Deque::remove_at)).
/// Any operation that changes the capacity, front offset, or length marks
/// all previously created cursors stale; using one afterwards reports
/// [`Error::Stale`] rather than reading through a moved buffer.
pub struct Deque<T> {
    buf: Box<[MaybeUninit<T>]>,
    front: usize,
    len: usize,
    generation: u64,
}

impl<T> Deque<T> {
    /// Creates an empty deque with [`DEFAULT_CAPACITY`] slots.
    ///
    /// # Examples
    /// ```
    /// let deque = ringdeque::Deque::<u32>::new();
    /// assert_eq!(deque.capacity(), 64);
    /// assert!(deque.is_empty());
    /// ```
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// Creates an empty deque with exactly `capacity` slots.
    ///
    /// The capacity is not required to be a power of two; it only ever
    /// changes by explicit [`reserve`](Deque::reserve) calls or by doubling
    /// when a push finds the buffer full.
    ///
    /// # Examples
    /// ```
    /// let deque = ringdeque::Deque::<u32>::with_capacity(8);
    /// assert_eq!(deque.capacity(), 8);
    /// assert_eq!(deque.len(), 0);
    /// ```
    pub fn with_capacity(capacity: usize) -> Self {
        Deque {
            buf: Box::new_uninit_slice(capacity),
            front: 0,
            len: 0,
            generation: 0,
        }
    }

    /// Returns the number of slots the deque currently owns.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.buf.len()
    }

    /// Returns the number of elements currently in the deque.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` exactly when the deque contains zero elements.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns `true` exactly when every slot holds a live element, meaning
    /// the next push will double the capacity.
    #[inline]
    pub fn is_full(&self) -> bool {
        self.len == self.capacity()
    }

    #[inline(always)]
    fn physical_index(&self, index: usize) -> usize {
        (self.front + index) % self.capacity()
    }

    /// Marks every outstanding cursor stale. Must accompany any change to
    /// capacity, front, or len.
    #[inline]
    fn invalidate(&mut self) {
        self.generation = self.generation.wrapping_add(1);
    }

    /// Moves the value in logical-window slot `src` into slot `dst`.
    ///
    /// # Safety
    /// `src` must hold an initialized value, and `dst` must be vacant or
    /// already moved out of. Afterwards `src` is vacant.
    #[inline]
    unsafe fn move_slot(&mut self, src: usize, dst: usize) {
        let value = self.buf[src].assume_init_read();
        self.buf[dst].write(value);
    }

    /// Moves the logical range `[begin, end)` by `offset` slots toward the
    /// front, one slot at a time with modulo-wrapped addressing.
    ///
    /// Iterates front-to-back, so an overlapping destination is always a
    /// slot that has already been vacated.
    ///
    /// # Safety
    /// `begin..end` must lie within the live window, `offset <= capacity`,
    /// and the `offset` slots in front of the window must be vacant.
    unsafe fn shift_toward_front(&mut self, begin: usize, end: usize, offset: usize) {
        let cap = self.capacity();
        for i in begin..end {
            let src = (self.front + i) % cap;
            let dst = (self.front + i + cap - offset) % cap;
            self.move_slot(src, dst);
        }
    }

    /// Moves the logical range `[begin, end)` by `offset` slots toward the
    /// back, iterating back-to-front.
    ///
    /// # Safety
    /// Same contract as [`shift_toward_front`](Deque::shift_toward_front),
    /// with the vacant slots behind the window.
    unsafe fn shift_toward_back(&mut self, begin: usize, end: usize, offset: usize) {
        let cap = self.capacity();
        for i in (begin..end).rev() {
            let src = (self.front + i) % cap;
            let dst = (self.front + i + offset) % cap;
            self.move_slot(src, dst);
        }
    }

    /// Returns a reference to the element at the given logical index, or
    /// [`None`] if the index is out of bounds.
    ///
    /// The element at index 0 is the front of the queue.
    ///
    /// # Examples
    /// ```
    /// let deque: ringdeque::Deque<u32> = [1, 2, 3].into();
    /// assert_eq!(deque.get(1), Some(&2));
    /// assert_eq!(deque.get(3), None);
    /// ```
    #[inline]
    pub fn get(&self, index: usize) -> Option<&T> {
        if index >= self.len {
            return None;
        }

        let slot = self.physical_index(index);
        // SAFETY: index is inside the live window, so the slot is initialized
        unsafe { Some(self.buf[slot].assume_init_ref()) }
    }

    /// Returns a mutable reference to the element at the given logical
    /// index, or [`None`] if the index is out of bounds.
    #[inline]
    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        if index >= self.len {
            return None;
        }

        let slot = self.physical_index(index);
        // SAFETY: index is inside the live window, so the slot is initialized
        unsafe { Some(self.buf[slot].assume_init_mut()) }
    }

    /// Returns a reference to the element at the given logical index,
    /// reporting both the index and the current length on failure.
    ///
    /// # Examples
    /// ```
    /// use ringdeque::{Deque, Error};
    ///
    /// let deque: Deque<u32> = [1, 2, 3].into();
    /// assert_eq!(deque.at(0), Ok(&1));
    /// assert_eq!(deque.at(7), Err(Error::Index { index: 7, len: 3 }));
    /// ```
    pub fn at(&self, index: usize) -> Result<&T, Error> {
        let len = self.len;
        self.get(index).ok_or(Error::Index { index, len })
    }

    /// Returns a mutable reference to the element at the given logical
    /// index, reporting both the index and the current length on failure.
    pub fn at_mut(&mut self, index: usize) -> Result<&mut T, Error> {
        let len = self.len;
        self.get_mut(index).ok_or(Error::Index { index, len })
    }

    /// Returns a reference to the first element, or [`Error::Empty`] if the
    /// deque is empty.
    ///
    /// # Examples
    /// ```
    /// use ringdeque::{Deque, Error};
    ///
    /// let mut deque = Deque::new();
    /// assert_eq!(deque.front(), Err(Error::Empty));
    /// deque.push_back(1);
    /// assert_eq!(deque.front(), Ok(&1));
    /// ```
    pub fn front(&self) -> Result<&T, Error> {
        self.get(0).ok_or(Error::Empty)
    }

    /// Returns a mutable reference to the first element, or [`Error::Empty`]
    /// if the deque is empty.
    pub fn front_mut(&mut self) -> Result<&mut T, Error> {
        self.get_mut(0).ok_or(Error::Empty)
    }

    /// Returns a reference to the last element, or [`Error::Empty`] if the
    /// deque is empty.
    pub fn back(&self) -> Result<&T, Error> {
        self.len
            .checked_sub(1)
            .and_then(|i| self.get(i))
            .ok_or(Error::Empty)
    }

    /// Returns a mutable reference to the last element, or [`Error::Empty`]
    /// if the deque is empty.
    pub fn back_mut(&mut self) -> Result<&mut T, Error> {
        let i = self.len.checked_sub(1).ok_or(Error::Empty)?;
        self.get_mut(i).ok_or(Error::Empty)
    }

    /// Prepends an element to the front of the deque, doubling the capacity
    /// first if the buffer is full.
    ///
    /// # Examples
    /// ```
    /// let mut deque = ringdeque::Deque::new();
    /// deque.push_back(2);
    /// deque.push_front(1);
    /// assert_eq!(deque, &[1, 2]);
    /// ```
    pub fn push_front(&mut self, value: T) {
        if self.is_full() {
            self.grow();
        }

        let idx = if self.front == 0 {
            self.capacity() - 1
        } else {
            self.front - 1
        };
        self.buf[idx].write(value);
        self.front = idx;
        self.len += 1;
        self.invalidate();
    }

    /// Appends an element to the back of the deque, doubling the capacity
    /// first if the buffer is full.
    ///
    /// # Examples
    /// ```
    /// let mut deque = ringdeque::Deque::with_capacity(2);
    /// deque.push_back(1);
    /// deque.push_back(2);
    /// deque.push_back(3);
    /// assert_eq!(deque, &[1, 2, 3]);
    /// assert_eq!(deque.capacity(), 4);
    /// ```
    pub fn push_back(&mut self, value: T) {
        if self.is_full() {
            self.grow();
        }

        let end = self.physical_index(self.len);
        self.buf[end].write(value);
        self.len += 1;
        self.invalidate();
    }

    /// Removes the first element and returns it, or [`Error::Empty`] if the
    /// deque is empty.
    ///
    /// The vacated slot is excluded from the logical window; capacity is
    /// unchanged.
    ///
    /// # Examples
    /// ```
    /// use ringdeque::{Deque, Error};
    ///
    /// let mut deque: Deque<u32> = [1, 2].into();
    /// assert_eq!(deque.pop_front(), Ok(1));
    /// assert_eq!(deque.pop_front(), Ok(2));
    /// assert_eq!(deque.pop_front(), Err(Error::Empty));
    /// ```
    pub fn pop_front(&mut self) -> Result<T, Error> {
        if self.is_empty() {
            return Err(Error::Empty);
        }

        let front = self.front;
        // SAFETY: the deque is non-empty, so the front slot is initialized;
        // the slot is excluded from the window below
        let value = unsafe { self.buf[front].assume_init_read() };
        self.front = (front + 1) % self.capacity();
        self.len -= 1;
        self.invalidate();

        Ok(value)
    }

    /// Removes the last element and returns it, or [`Error::Empty`] if the
    /// deque is empty.
    ///
    /// # Examples
    /// ```
    /// use ringdeque::{Deque, Error};
    ///
    /// let mut deque: Deque<u32> = [1, 2].into();
    /// assert_eq!(deque.pop_back(), Ok(2));
    /// assert_eq!(deque.pop_back(), Ok(1));
    /// assert_eq!(deque.pop_back(), Err(Error::Empty));
    /// ```
    pub fn pop_back(&mut self) -> Result<T, Error> {
        if self.is_empty() {
            return Err(Error::Empty);
        }

        let idx = self.physical_index(self.len - 1);
        // SAFETY: the deque is non-empty, so the back slot is initialized
        let value = unsafe { self.buf[idx].assume_init_read() };
        self.len -= 1;
        self.invalidate();

        Ok(value)
    }

    fn grow(&mut self) {
        self.reserve(usize::max(1, self.capacity() * 2));
    }

    /// Grows the buffer to exactly `capacity` slots; a no-op when the deque
    /// already owns at least that many.
    ///
    /// Growing relinearizes the elements, in logical order, into a fresh
    /// allocation starting at slot 0, and releases the old buffer. Logical
    /// order and element identity are preserved; outstanding cursors become
    /// stale.
    ///
    /// # Examples
    /// ```
    /// let mut deque: ringdeque::Deque<u32> = [1, 2, 3].into();
    /// deque.reserve(100);
    /// assert_eq!(deque.capacity(), 100);
    /// deque.reserve(10);
    /// assert_eq!(deque.capacity(), 100);
    /// assert_eq!(deque, &[1, 2, 3]);
    /// ```
    pub fn reserve(&mut self, capacity: usize) {
        if capacity <= self.capacity() {
            return;
        }

        let mut new_buf: Box<[MaybeUninit<T>]> = Box::new_uninit_slice(capacity);
        for i in 0..self.len {
            let slot = self.physical_index(i);
            // SAFETY: every slot in the live window is initialized, and each
            // value is moved out exactly once; dropping the old buffer does
            // not touch the moved-out values
            let value = unsafe { self.buf[slot].assume_init_read() };
            new_buf[i].write(value);
        }

        self.buf = new_buf;
        self.front = 0;
        self.invalidate();
    }

    /// Resizes the deque to `new_len` elements, filling new slots at the
    /// back with clones of `value`.
    ///
    /// Shrinking drops the vacated elements immediately.
    ///
    /// # Examples
    /// ```
    /// let mut deque: ringdeque::Deque<u32> = [1, 2].into();
    /// deque.resize(4, 0);
    /// assert_eq!(deque, &[1, 2, 0, 0]);
    /// deque.resize(1, 0);
    /// assert_eq!(deque, &[1]);
    /// ```
    pub fn resize(&mut self, new_len: usize, value: T)
    where
        T: Clone,
    {
        self.resize_with(new_len, || value.clone());
    }

    /// Resizes the deque to `new_len` elements, filling new slots at the
    /// back with `T::default()`.
    pub fn resize_with_default(&mut self, new_len: usize)
    where
        T: Default,
    {
        self.resize_with(new_len, T::default);
    }

    /// Resizes the deque to `new_len` elements, filling new slots at the
    /// back with values produced by `f`.
    pub fn resize_with<F: FnMut() -> T>(&mut self, new_len: usize, mut f: F) {
        if new_len > self.capacity() {
            self.reserve(new_len);
        }

        if new_len > self.len {
            for i in self.len..new_len {
                let slot = self.physical_index(i);
                self.buf[slot].write(f());
            }
            self.len = new_len;
            self.invalidate();
        } else {
            self.truncate(new_len);
        }
    }

    /// Shortens the deque, keeping the first `new_len` elements and dropping
    /// the rest.
    ///
    /// If `new_len` is greater than or equal to the deque's current length,
    /// this has no effect.
    pub fn truncate(&mut self, new_len: usize) {
        if new_len >= self.len {
            return;
        }

        for i in new_len..self.len {
            let slot = self.physical_index(i);
            // SAFETY: the slot is inside the live window and is excluded
            // from it below
            unsafe { self.buf[slot].assume_init_drop() };
        }

        self.len = new_len;
        self.invalidate();
    }

    /// Removes all elements, dropping each, and resets the front offset.
    /// Capacity is unchanged.
    ///
    /// # Examples
    /// ```
    /// let mut deque: ringdeque::Deque<u32> = [1, 2, 3].into();
    /// deque.clear();
    /// assert!(deque.is_empty());
    /// assert_eq!(deque.capacity(), 6);
    /// ```
    pub fn clear(&mut self) {
        if self.len == 0 && self.front == 0 {
            return;
        }

        self.truncate(0);
        self.front = 0;
        self.invalidate();
    }

    /// Inserts an element at logical position `pos`, shifting whichever side
    /// of the buffer is shorter to make room.
    ///
    /// `pos` may be anywhere in `[0, len]`; `pos == len` appends. Fails with
    /// [`Error::Position`] otherwise, before any mutation.
    ///
    /// # Examples
    /// ```
    /// let mut deque: ringdeque::Deque<u32> = [1, 2, 4].into();
    /// deque.insert(2, 3)?;
    /// assert_eq!(deque, &[1, 2, 3, 4]);
    /// # Ok::<(), ringdeque::Error>(())
    /// ```
    pub fn insert(&mut self, pos: usize, value: T) -> Result<(), Error> {
        if pos > self.len {
            return Err(Error::Position {
                pos: pos as isize,
                len: self.len,
            });
        }

        if self.is_full() {
            self.grow();
        }

        if pos < self.len / 2 {
            // fewer elements in front of the insertion point: relocate the
            // prefix one slot further from the front
            unsafe { self.shift_toward_front(0, pos, 1) };
            self.front = if self.front == 0 {
                self.capacity() - 1
            } else {
                self.front - 1
            };
        } else {
            unsafe { self.shift_toward_back(pos, self.len, 1) };
        }

        let slot = self.physical_index(pos);
        self.buf[slot].write(value);
        self.len += 1;
        self.invalidate();
        Ok(())
    }

    /// Removes and returns the element at logical position `pos`, closing
    /// the gap by shifting whichever side is shorter.
    ///
    /// Equivalent to removing the range `[pos, pos + 1)`. Fails with
    /// [`Error::Position`] when `pos >= len`.
    ///
    /// # Examples
    /// ```
    /// let mut deque: ringdeque::Deque<u32> = [1, 2, 3].into();
    /// assert_eq!(deque.remove(1), Ok(2));
    /// assert_eq!(deque, &[1, 3]);
    /// ```
    pub fn remove(&mut self, pos: usize) -> Result<T, Error> {
        if pos >= self.len {
            return Err(Error::Position {
                pos: pos as isize,
                len: self.len,
            });
        }

        let slot = self.physical_index(pos);
        // SAFETY: pos is inside the live window; the slot is vacated here
        // and refilled by the shift below (or excluded from the window)
        let value = unsafe { self.buf[slot].assume_init_read() };

        // same cost heuristic as remove_range with the range [pos, pos + 1)
        if pos + pos + 1 < self.len {
            unsafe { self.shift_toward_back(0, pos, 1) };
            self.front = (self.front + 1) % self.capacity();
        } else {
            unsafe { self.shift_toward_front(pos + 1, self.len, 1) };
        }

        self.len -= 1;
        self.invalidate();
        Ok(value)
    }

    /// Removes the logical half-open range `[start, end)`, dropping the
    /// removed elements.
    ///
    /// Fails with [`Error::Range`] when `start > end` or `end > len`, before
    /// any mutation. An empty range is a no-op and does not invalidate
    /// cursors.
    ///
    /// Which side of the buffer shifts to close the gap is a cost heuristic
    /// (`start + end < len` moves the prefix); both choices produce the same
    /// logical result.
    ///
    /// # Examples
    /// ```
    /// let mut deque: ringdeque::Deque<u32> = [1, 2, 3, 4, 5].into();
    /// deque.remove_range(1, 3)?;
    /// assert_eq!(deque, &[1, 4, 5]);
    /// # Ok::<(), ringdeque::Error>(())
    /// ```
    pub fn remove_range(&mut self, start: usize, end: usize) -> Result<(), Error> {
        if start > end || end > self.len {
            return Err(Error::Range {
                start: start as isize,
                end: end as isize,
                len: self.len,
            });
        }

        let offset = end - start;
        if offset == 0 {
            return Ok(());
        }

        for i in start..end {
            let slot = self.physical_index(i);
            // SAFETY: the slot is inside the live window; it is treated as
            // vacant from here on
            unsafe { self.buf[slot].assume_init_drop() };
        }

        if start + end < self.len {
            // the range sits in the front half: shift the prefix backward
            unsafe { self.shift_toward_back(0, start, offset) };
            self.front = (self.front + offset) % self.capacity();
        } else {
            unsafe { self.shift_toward_front(end, self.len, offset) };
        }

        self.len -= offset;
        self.invalidate();
        Ok(())
    }

    fn snapshot(&self) -> Snapshot<T> {
        Snapshot {
            storage: self.buf.as_ptr().cast::<T>(),
            capacity: self.capacity(),
            len: self.len,
            front: self.front,
            generation: self.generation,
        }
    }

    fn check_fresh(&self, cursor: &Cursor<T>) -> Result<(), Error> {
        if cursor.snap == self.snapshot() {
            Ok(())
        } else {
            Err(Error::Stale)
        }
    }

    /// Returns a cursor at the front of the deque (logical index 0).
    pub fn begin(&self) -> Cursor<T> {
        Cursor {
            snap: self.snapshot(),
            index: 0,
        }
    }

    /// Returns a cursor one past the last element (logical index `len`).
    ///
    /// An `end()` cursor is a legal position for [`insert_at`](Deque::insert_at)
    /// and as the exclusive bound of [`remove_between`](Deque::remove_between),
    /// but dereferencing it fails.
    pub fn end(&self) -> Cursor<T> {
        Cursor {
            snap: self.snapshot(),
            index: self.len as isize,
        }
    }

    /// Dereferences a cursor, returning the element it addresses.
    ///
    /// Fails with [`Error::Stale`] if the deque has structurally changed
    /// since the cursor was created, and with [`Error::Position`] if the
    /// cursor sits outside the live window (an `end()` cursor, for
    /// instance).
    ///
    /// # Examples
    /// ```
    /// use ringdeque::{Deque, Error};
    ///
    /// let mut deque: Deque<u32> = [1, 2, 3].into();
    /// let c = deque.begin() + 1;
    /// assert_eq!(deque.at_cursor(&c), Ok(&2));
    ///
    /// deque.push_back(4);
    /// assert_eq!(deque.at_cursor(&c), Err(Error::Stale));
    /// ```
    pub fn at_cursor(&self, cursor: &Cursor<T>) -> Result<&T, Error> {
        self.check_fresh(cursor)?;

        let pos = cursor.index();
        if pos < 0 || pos as usize >= self.len {
            return Err(Error::Position { pos, len: self.len });
        }

        let slot = self.physical_index(pos as usize);
        // SAFETY: the position is inside the live window
        unsafe { Ok(self.buf[slot].assume_init_ref()) }
    }

    /// Dereferences a cursor mutably. Same failure modes as
    /// [`at_cursor`](Deque::at_cursor).
    pub fn at_cursor_mut(&mut self, cursor: &Cursor<T>) -> Result<&mut T, Error> {
        self.check_fresh(cursor)?;

        let pos = cursor.index();
        if pos < 0 || pos as usize >= self.len {
            return Err(Error::Position { pos, len: self.len });
        }

        let slot = self.physical_index(pos as usize);
        // SAFETY: the position is inside the live window
        unsafe { Ok(self.buf[slot].assume_init_mut()) }
    }

    /// Inserts an element at the position addressed by `cursor`.
    ///
    /// The cursor's logical offset is converted against the deque's own
    /// current state after freshness is verified; the cursor (and all others
    /// from the same snapshot) is stale afterwards.
    ///
    /// # Examples
    /// ```
    /// let mut deque: ringdeque::Deque<u32> = [1, 3].into();
    /// let c = deque.begin() + 1;
    /// deque.insert_at(&c, 2)?;
    /// assert_eq!(deque, &[1, 2, 3]);
    /// # Ok::<(), ringdeque::Error>(())
    /// ```
    pub fn insert_at(&mut self, cursor: &Cursor<T>, value: T) -> Result<(), Error> {
        self.check_fresh(cursor)?;

        let pos = cursor.index();
        if pos < 0 || pos as usize > self.len {
            return Err(Error::Position { pos, len: self.len });
        }

        self.insert(pos as usize, value)
    }

    /// Removes and returns the element addressed by `cursor`.
    pub fn remove_at(&mut self, cursor: &Cursor<T>) -> Result<T, Error> {
        self.check_fresh(cursor)?;

        let pos = cursor.index();
        if pos < 0 {
            return Err(Error::Position { pos, len: self.len });
        }

        self.remove(pos as usize)
    }

    /// Removes the half-open range between two cursors, dropping the removed
    /// elements.
    ///
    /// Both cursors must be fresh; the range must satisfy
    /// `0 <= begin <= end <= len`.
    ///
    /// # Examples
    /// ```
    /// let mut deque: ringdeque::Deque<u32> = [1, 2, 3, 4, 5].into();
    /// let (b, e) = (deque.begin() + 1, deque.begin() + 3);
    /// deque.remove_between(&b, &e)?;
    /// assert_eq!(deque, &[1, 4, 5]);
    /// # Ok::<(), ringdeque::Error>(())
    /// ```
    pub fn remove_between(&mut self, begin: &Cursor<T>, end: &Cursor<T>) -> Result<(), Error> {
        self.check_fresh(begin)?;
        self.check_fresh(end)?;

        let (start, stop) = (begin.index(), end.index());
        if start < 0 || start > stop || stop as usize > self.len {
            return Err(Error::Range {
                start,
                end: stop,
                len: self.len,
            });
        }

        self.remove_range(start as usize, stop as usize)
    }

    /// Returns a pair of slices which contain, in order, the contents of the
    /// deque.
    ///
    /// The second slice is empty unless the live window wraps around the
    /// physical end of the buffer.
    ///
    /// # Examples
    /// ```
    /// let mut deque = ringdeque::Deque::with_capacity(4);
    /// deque.push_back(2);
    /// deque.push_back(3);
    /// deque.push_front(1);
    /// assert_eq!(deque.as_slices(), (&[1][..], &[2, 3][..]));
    /// ```
    pub fn as_slices(&self) -> (&[T], &[T]) {
        let front = self.front;
        let back = front + self.len;
        let ptr = self.buf.as_ptr().cast::<T>();
        if back <= self.capacity() {
            // SAFETY: the live window is contiguous and initialized
            let fst = unsafe { core::slice::from_raw_parts(ptr.add(front), self.len) };
            (fst, &[])
        } else {
            let wrapped = back - self.capacity();
            // SAFETY: both halves of the wrapped window are initialized
            let fst =
                unsafe { core::slice::from_raw_parts(ptr.add(front), self.capacity() - front) };
            let snd = unsafe { core::slice::from_raw_parts(ptr, wrapped) };
            (fst, snd)
        }
    }

    /// Returns a front-to-back iterator.
    ///
    /// # Examples
    /// ```
    /// let deque: ringdeque::Deque<u32> = [5, 3, 4].into();
    /// let mut it = deque.iter();
    /// assert_eq!(it.next(), Some(&5));
    /// assert_eq!(it.next(), Some(&3));
    /// assert_eq!(it.next(), Some(&4));
    /// assert!(it.next().is_none());
    /// ```
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            front: self.front,
            len: self.len,
            buf: &self.buf,
        }
    }

    /// Returns a front-to-back iterator that yields mutable references.
    ///
    /// # Examples
    /// ```
    /// let mut deque: ringdeque::Deque<u32> = [5, 3, 4].into();
    /// for num in deque.iter_mut() {
    ///     *num -= 2;
    /// }
    /// assert_eq!(deque, &[3, 1, 2]);
    /// ```
    pub fn iter_mut(&mut self) -> IterMut<'_, T> {
        IterMut {
            front: self.front,
            len: self.len,
            buf: &mut self.buf,
        }
    }
}

impl<T> Default for Deque<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Drop for Deque<T> {
    fn drop(&mut self) {
        for i in 0..self.len {
            let slot = (self.front + i) % self.buf.len();
            // SAFETY: exactly the live window is dropped, each slot once
            unsafe { self.buf[slot].assume_init_drop() };
        }
    }
}

impl<T: Clone> Clone for Deque<T> {
    /// Reproduces the source's logical contents relinearized to `front = 0`,
    /// with the source's capacity.
    fn clone(&self) -> Self {
        let mut result = Deque::with_capacity(self.capacity());
        for value in self {
            result.buf[result.len].write(value.clone());
            result.len += 1;
        }
        result
    }

    /// Reuses the existing buffer when it is large enough; otherwise
    /// replaces it with one of the source's capacity. Either way the
    /// previous storage is released exactly once and the old elements are
    /// dropped.
    fn clone_from(&mut self, source: &Self) {
        self.truncate(0);
        if self.capacity() < source.capacity() {
            self.buf = Box::new_uninit_slice(source.capacity());
        }
        self.front = 0;
        for value in source {
            self.buf[self.len].write(value.clone());
            self.len += 1;
        }
        self.invalidate();
    }
}

impl<T> Index<usize> for Deque<T> {
    type Output = T;

    /// Unchecked-contract equivalent of [`at`](Deque::at): the caller
    /// guarantees `index < len`.
    ///
    /// # Panics
    /// Panics if the index is out of bounds.
    #[inline]
    fn index(&self, index: usize) -> &T {
        self.get(index).expect("out of bounds access")
    }
}

impl<T> IndexMut<usize> for Deque<T> {
    #[inline]
    fn index_mut(&mut self, index: usize) -> &mut T {
        self.get_mut(index).expect("out of bounds access")
    }
}

impl<T: Debug> Debug for Deque<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let (front, back) = self.as_slices();
        f.debug_list().entries(front).entries(back).finish()
    }
}

impl<T: Display> Display for Deque<T> {
    /// Renders `"[ e0 e1 ... ]"`: one space after `[`, between elements, and
    /// before `]`; an empty deque renders as `"[ ]"`.
    ///
    /// # Examples
    /// ```
    /// let deque: ringdeque::Deque<u32> = [1, 2, 3].into();
    /// assert_eq!(deque.to_string(), "[ 1 2 3 ]");
    /// assert_eq!(ringdeque::Deque::<u32>::new().to_string(), "[ ]");
    /// ```
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str("[ ")?;
        for value in self {
            write!(f, "{} ", value)?;
        }
        f.write_str("]")
    }
}

impl<T: Hash> Hash for Deque<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.len().hash(state);
        let (front, back) = self.as_slices();
        Hash::hash_slice(front, state);
        Hash::hash_slice(back, state);
    }
}

impl<T: PartialEq<U>, U> PartialEq<Deque<U>> for Deque<T> {
    fn eq(&self, other: &Deque<U>) -> bool {
        self.len() == other.len() && self.iter().zip(other.iter()).all(|(a, b)| a == b)
    }
}

impl<T: Eq> Eq for Deque<T> {}

impl<T: PartialEq, R: AsRef<[T]>> PartialEq<R> for Deque<T> {
    fn eq(&self, other: &R) -> bool {
        let other = other.as_ref();
        if self.len() != other.len() {
            return false;
        }

        let (front, back) = self.as_slices();
        let mid = front.len();
        front == &other[..mid] && back == &other[mid..]
    }
}

impl<T: PartialOrd> PartialOrd for Deque<T> {
    fn partial_cmp(&self, other: &Self) -> Option<core::cmp::Ordering> {
        self.iter().partial_cmp(other.iter())
    }
}

impl<T: Ord> Ord for Deque<T> {
    fn cmp(&self, other: &Self) -> core::cmp::Ordering {
        self.iter().cmp(other.iter())
    }
}

impl<T> Extend<T> for Deque<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        iter.into_iter().for_each(|item| self.push_back(item));
    }
}

impl<'a, T: 'a + Clone> Extend<&'a T> for Deque<T> {
    fn extend<I: IntoIterator<Item = &'a T>>(&mut self, iter: I) {
        iter.into_iter().for_each(|item| self.push_back(item.clone()));
    }
}

impl<T> FromIterator<T> for Deque<T> {
    /// Builds a deque from `N` initial values with capacity `max(1, 2 * N)`,
    /// the values occupying slots `0..N`.
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let values: Vec<T> = iter.into_iter().collect();
        let mut deque = Deque::with_capacity(usize::max(1, values.len() * 2));
        deque.extend(values);
        deque
    }
}

impl<T, const N: usize> From<[T; N]> for Deque<T> {
    fn from(values: [T; N]) -> Self {
        values.into_iter().collect()
    }
}

impl<T: Clone> From<&[T]> for Deque<T> {
    fn from(values: &[T]) -> Self {
        values.iter().cloned().collect()
    }
}

/// An iterator over the elements of a deque.
///
/// This `struct` is created by the [`iter`](Deque::iter) method on [`Deque`].
/// See its documentation for more.
pub struct Iter<'a, T> {
    front: usize,
    len: usize,
    buf: &'a [MaybeUninit<T>],
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    #[inline]
    fn next(&mut self) -> Option<&'a T> {
        if self.len == 0 {
            return None;
        }

        let front = self.front;
        self.front = (front + 1) % self.buf.len();
        self.len -= 1;
        // SAFETY: the slot is inside the live window captured at creation,
        // and the shared borrow keeps the deque unchanged
        Some(unsafe { self.buf[front].assume_init_ref() })
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.len, Some(self.len))
    }
}

impl<T> DoubleEndedIterator for Iter<'_, T> {
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.len == 0 {
            return None;
        }

        let idx = (self.front + self.len - 1) % self.buf.len();
        self.len -= 1;
        // SAFETY: the slot is inside the live window captured at creation
        Some(unsafe { self.buf[idx].assume_init_ref() })
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}
impl<T> FusedIterator for Iter<'_, T> {}

/// A mutable iterator over the elements of a deque.
///
/// This `struct` is created by the [`iter_mut`](Deque::iter_mut) method on
/// [`Deque`]. See its documentation for more.
pub struct IterMut<'a, T> {
    front: usize,
    len: usize,
    buf: &'a mut [MaybeUninit<T>],
}

impl<'a, T> Iterator for IterMut<'a, T> {
    type Item = &'a mut T;

    #[inline]
    fn next(&mut self) -> Option<&'a mut T> {
        if self.len == 0 {
            return None;
        }

        let front = self.front;
        self.front = (front + 1) % self.buf.len();
        self.len -= 1;
        // SAFETY: each slot is handed out at most once, so no two returned
        // references alias
        unsafe {
            let ptr = self.buf.as_mut_ptr().cast::<T>();
            Some(&mut *ptr.add(front))
        }
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.len, Some(self.len))
    }
}

impl<T> DoubleEndedIterator for IterMut<'_, T> {
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.len == 0 {
            return None;
        }

        let idx = (self.front + self.len - 1) % self.buf.len();
        self.len -= 1;
        // SAFETY: each slot is handed out at most once
        unsafe {
            let ptr = self.buf.as_mut_ptr().cast::<T>();
            Some(&mut *ptr.add(idx))
        }
    }
}

impl<T> ExactSizeIterator for IterMut<'_, T> {}
impl<T> FusedIterator for IterMut<'_, T> {}

/// An owning iterator over the elements of a deque.
///
/// This `struct` is created by the [`into_iter`](Deque::into_iter) method on
/// [`Deque`] (provided by the `IntoIterator` trait).
pub struct IntoIter<T> {
    inner: Deque<T>,
}

impl<T: Debug> Debug for IntoIter<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_tuple("IntoIter").field(&self.inner).finish()
    }
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    #[inline]
    fn next(&mut self) -> Option<T> {
        self.inner.pop_front().ok()
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.inner.len();
        (len, Some(len))
    }
}

impl<T> DoubleEndedIterator for IntoIter<T> {
    #[inline]
    fn next_back(&mut self) -> Option<T> {
        self.inner.pop_back().ok()
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {}
impl<T> FusedIterator for IntoIter<T> {}

impl<T> IntoIterator for Deque<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    /// Converts the deque into a front-to-back iterator yielding elements by
    /// value.
    fn into_iter(self) -> IntoIter<T> {
        IntoIter { inner: self }
    }
}

impl<'a, T> IntoIterator for &'a Deque<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Iter<'a, T> {
        self.iter()
    }
}

impl<'a, T> IntoIterator for &'a mut Deque<T> {
    type Item = &'a mut T;
    type IntoIter = IterMut<'a, T>;

    fn into_iter(self) -> IterMut<'a, T> {
        self.iter_mut()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::collections::VecDeque;
    use alloc::string::ToString;
    use alloc::vec::Vec;
    use core::cell::Cell;

    #[test]
    fn mixed_pushes_and_pops_preserve_logical_order() {
        let mut deque = Deque::new();
        deque.push_back(2);
        deque.push_front(1);
        deque.push_back(4);
        assert_eq!(deque.pop_back(), Ok(4));
        deque.push_back(3);

        assert_eq!(deque, &[1, 2, 3]);
        assert_eq!(deque.to_string(), "[ 1 2 3 ]");
        assert_eq!(deque.front(), Ok(&1));
        assert_eq!(deque.back(), Ok(&3));
    }

    #[test]
    fn construction_from_initial_values() {
        let deque: Deque<i32> = [1, 2, 3, 4, 5].into();
        assert_eq!(deque.len(), 5);
        assert_eq!(deque.capacity(), 10);
        assert_eq!(deque.to_string(), "[ 1 2 3 4 5 ]");

        let empty: Deque<i32> = Deque::from_iter(core::iter::empty());
        assert_eq!(empty.capacity(), 1);
        assert_eq!(empty.to_string(), "[ ]");
    }

    #[test]
    fn capacity_doubles_only_when_a_push_finds_the_buffer_full() {
        let mut deque = Deque::with_capacity(4);
        for x in 0..4 {
            deque.push_back(x);
            assert_eq!(deque.capacity(), 4);
        }
        deque.push_back(4);
        assert_eq!(deque.capacity(), 8);

        let mut deque = Deque::new();
        deque.push_back(0);
        deque.clear();
        for x in 0..100 {
            deque.push_back(x);
        }
        assert_eq!(deque.len(), 100);
        assert_eq!(deque.capacity(), 128);
        assert!(deque.capacity().is_power_of_two());
        assert!(deque.iter().copied().eq(0..100));
    }

    #[test]
    fn fifo_and_lifo_laws() {
        let mut deque = Deque::with_capacity(2);
        for x in 0..50 {
            deque.push_back(x);
        }
        for x in 0..50 {
            assert_eq!(deque.pop_front(), Ok(x));
        }

        for x in 0..50 {
            deque.push_front(x);
        }
        for x in 0..50 {
            assert_eq!(deque.pop_back(), Ok(x));
        }
        assert!(deque.is_empty());
    }

    #[test]
    fn pops_on_empty_fail_without_underflow() {
        let mut deque: Deque<i32> = Deque::new();
        assert_eq!(deque.pop_front(), Err(Error::Empty));
        assert_eq!(deque.pop_back(), Err(Error::Empty));
        assert_eq!(deque.front(), Err(Error::Empty));
        assert_eq!(deque.back(), Err(Error::Empty));
        assert_eq!(deque.len(), 0);
    }

    #[test]
    fn checked_access_reports_index_and_len() {
        let mut deque: Deque<i32> = [10, 20].into();
        assert_eq!(deque.at(1), Ok(&20));
        assert_eq!(deque.at(2), Err(Error::Index { index: 2, len: 2 }));
        *deque.at_mut(0).unwrap() = 11;
        assert_eq!(deque[0], 11);
        deque[1] = 21;
        assert_eq!(deque.get(1), Some(&21));
        assert_eq!(deque.get(5), None);
    }

    #[test]
    #[should_panic(expected = "out of bounds access")]
    fn index_operator_panics_past_the_end() {
        let deque: Deque<i32> = [1].into();
        let _ = deque[1];
    }

    #[test]
    fn traversal_matches_indexed_access_when_wrapped() {
        let mut deque = Deque::with_capacity(8);
        for x in [4, 5, 6, 7] {
            deque.push_back(x);
        }
        for x in [3, 2, 1, 0] {
            deque.push_front(x);
        }
        // the window now wraps around the physical end
        assert!(!deque.as_slices().1.is_empty());

        let via_iter: Vec<i32> = deque.iter().copied().collect();
        let via_index: Vec<i32> = (0..deque.len()).map(|i| *deque.at(i).unwrap()).collect();
        assert_eq!(via_iter, via_index);
        assert_eq!(via_iter, [0, 1, 2, 3, 4, 5, 6, 7]);

        let reversed: Vec<i32> = deque.iter().rev().copied().collect();
        assert_eq!(reversed, [7, 6, 5, 4, 3, 2, 1, 0]);
    }

    #[test]
    fn iter_mut_and_into_iter() {
        let mut deque: Deque<i32> = [5, 3, 4].into();
        for value in &mut deque {
            *value *= 10;
        }
        assert_eq!(deque, &[50, 30, 40]);

        let drained: Vec<i32> = deque.into_iter().collect();
        assert_eq!(drained, [50, 30, 40]);
    }

    // Builds a deque whose first `offset` elements were pushed to the front,
    // so the live window starts `offset` slots before the initial front and
    // usually wraps.
    fn build(len: usize, offset: usize) -> Deque<usize> {
        let mut deque = Deque::with_capacity(len + 1);
        for x in (0..offset).rev() {
            deque.push_front(x);
        }
        for x in offset..len {
            deque.push_back(x);
        }
        deque
    }

    #[test]
    fn insert_matches_a_vec_model_at_every_position() {
        for len in 0..8 {
            for offset in 0..=len {
                for pos in 0..=len {
                    let mut deque = build(len, offset);
                    let mut model: Vec<usize> = (0..len).collect();

                    deque.insert(pos, 1000).unwrap();
                    model.insert(pos, 1000);

                    assert_eq!(deque.len(), model.len());
                    assert_eq!(deque.at(pos), Ok(&1000));
                    assert!(deque.iter().eq(model.iter()), "len {} offset {} pos {}", len, offset, pos);
                }
            }
        }
    }

    #[test]
    fn remove_range_matches_a_vec_model_on_both_heuristic_branches() {
        for len in 0..8 {
            for offset in 0..=len {
                for end in 0..=len {
                    for start in 0..=end {
                        let mut deque = build(len, offset);
                        let mut model: Vec<usize> = (0..len).collect();

                        deque.remove_range(start, end).unwrap();
                        model.drain(start..end);

                        assert_eq!(deque.len(), model.len());
                        assert!(
                            deque.iter().eq(model.iter()),
                            "len {} offset {} range {}..{}",
                            len,
                            offset,
                            start,
                            end
                        );
                    }
                }
            }
        }
    }

    #[test]
    fn remove_returns_the_element_and_shrinks_by_one() {
        let mut deque: Deque<i32> = [1, 2, 3, 4, 5].into();
        assert_eq!(deque.remove(1), Ok(2));
        assert_eq!(deque, &[1, 3, 4, 5]);
        assert_eq!(deque.remove(3), Ok(5));
        assert_eq!(deque, &[1, 3, 4]);
        assert_eq!(deque.remove(3), Err(Error::Position { pos: 3, len: 3 }));
    }

    #[test]
    fn invalid_positions_and_ranges_are_rejected_before_mutation() {
        let mut deque: Deque<i32> = [1, 2, 3].into();
        assert_eq!(deque.insert(4, 9), Err(Error::Position { pos: 4, len: 3 }));
        assert_eq!(
            deque.remove_range(2, 1),
            Err(Error::Range { start: 2, end: 1, len: 3 })
        );
        assert_eq!(
            deque.remove_range(0, 4),
            Err(Error::Range { start: 0, end: 4, len: 3 })
        );
        assert_eq!(deque, &[1, 2, 3]);

        // a failed call leaves earlier cursors valid
        let c = deque.begin();
        assert_eq!(deque.insert(9, 9), Err(Error::Position { pos: 9, len: 3 }));
        assert_eq!(deque.at_cursor(&c), Ok(&1));
    }

    #[test]
    fn erase_between_cursors() {
        let mut deque: Deque<i32> = [1, 2, 3, 4, 5].into();
        let begin = deque.begin();
        deque.remove_between(&(begin + 1), &(begin + 3)).unwrap();
        assert_eq!(deque, &[1, 4, 5]);
        assert_eq!(deque.len(), 3);
    }

    #[test]
    fn cursor_ops_validate_the_window() {
        let mut deque: Deque<i32> = [1, 2, 3].into();

        let end = deque.end();
        assert_eq!(deque.at_cursor(&end), Err(Error::Position { pos: 3, len: 3 }));
        let before = deque.begin() - 1;
        assert_eq!(deque.at_cursor(&before), Err(Error::Position { pos: -1, len: 3 }));
        assert_eq!(deque.remove_at(&before), Err(Error::Position { pos: -1, len: 3 }));
        assert_eq!(
            deque.insert_at(&(end + 1), 9),
            Err(Error::Position { pos: 4, len: 3 })
        );
        assert_eq!(
            deque.remove_between(&end, &deque.begin()),
            Err(Error::Range { start: 3, end: 0, len: 3 })
        );
        assert_eq!(deque, &[1, 2, 3]);
    }

    #[test]
    fn insert_at_end_cursor_appends() {
        let mut deque: Deque<i32> = [1, 2, 3].into();
        let end = deque.end();
        deque.insert_at(&end, 4).unwrap();
        assert_eq!(deque, &[1, 2, 3, 4]);

        let begin = deque.begin();
        assert_eq!(deque.remove_at(&(begin + 1)), Ok(2));
        assert_eq!(deque, &[1, 3, 4]);
    }

    #[test]
    fn structural_mutations_make_cursors_stale() {
        let mut deque: Deque<i32> = [1, 2, 3].into();

        macro_rules! goes_stale {
            ($op:expr) => {{
                let c = deque.begin();
                $op;
                assert_eq!(deque.at_cursor(&c), Err(Error::Stale));
            }};
        }

        goes_stale!(deque.push_back(4));
        goes_stale!(deque.push_front(0));
        goes_stale!(assert!(deque.pop_back().is_ok()));
        goes_stale!(assert!(deque.pop_front().is_ok()));
        goes_stale!(deque.insert(1, 7).unwrap());
        goes_stale!(assert!(deque.remove(1).is_ok()));
        goes_stale!(deque.remove_range(0, 1).unwrap());
        goes_stale!(deque.reserve(1000));
        goes_stale!(deque.resize(1, 0));
        goes_stale!(deque.clear());

        deque.extend([1, 2, 3]);
        let c = deque.begin() + 1;
        let mut other = deque.clone();
        assert_eq!(other.at_cursor(&c), Err(Error::Stale));
        assert_eq!(deque.remove_at(&c), Ok(2));
    }

    #[test]
    fn non_mutations_keep_cursors_fresh() {
        let mut deque: Deque<i32> = [1, 2, 3].into();
        let c = deque.begin() + 2;

        deque.reserve(3); // no-op, capacity is already 6
        deque.remove_range(1, 1).unwrap(); // empty range
        deque.truncate(5); // already shorter
        assert_eq!(deque.at(0), Ok(&1)); // reads never invalidate
        assert_eq!(*deque.at_cursor_mut(&c).unwrap(), 3);

        deque.truncate(1);
        assert_eq!(deque.at_cursor(&c), Err(Error::Stale));
    }

    #[test]
    fn reserve_allocates_exactly_and_relinearizes() {
        let mut deque = build(6, 4);
        assert!(!deque.as_slices().1.is_empty());

        deque.reserve(100);
        assert_eq!(deque.capacity(), 100);
        assert_eq!(deque.as_slices(), (&[0, 1, 2, 3, 4, 5][..], &[][..]));

        deque.reserve(10);
        assert_eq!(deque.capacity(), 100);
    }

    #[test]
    fn resize_fills_truncates_and_grows() {
        let mut deque: Deque<i32> = [1, 2].into();
        deque.resize(5, 0);
        assert_eq!(deque, &[1, 2, 0, 0, 0]);

        deque.resize(1, 9);
        assert_eq!(deque, &[1]);

        deque.resize(100, 7);
        assert_eq!(deque.capacity(), 100);
        assert_eq!(deque.len(), 100);
        assert_eq!(deque.at(99), Ok(&7));

        let mut defaulted: Deque<i32> = Deque::with_capacity(2);
        defaulted.resize_with_default(3);
        assert_eq!(defaulted, &[0, 0, 0]);
    }

    #[test]
    fn clear_keeps_capacity_and_resets_front() {
        let mut deque = build(5, 3);
        let capacity = deque.capacity();
        deque.clear();
        assert!(deque.is_empty());
        assert_eq!(deque.capacity(), capacity);
        deque.push_back(1);
        assert_eq!(deque.as_slices(), (&[1][..], &[][..]));
    }

    #[test]
    fn clone_relinearizes_and_clone_from_reuses_storage() {
        let source = build(6, 4);
        let clone = source.clone();
        assert_eq!(clone, source);
        assert_eq!(clone.capacity(), source.capacity());
        assert!(clone.as_slices().1.is_empty());

        let mut small: Deque<usize> = Deque::with_capacity(2);
        small.push_back(9);
        small.clone_from(&source);
        assert_eq!(small, source);
        assert!(small.capacity() >= source.capacity());

        let mut large: Deque<usize> = Deque::with_capacity(64);
        large.clone_from(&source);
        assert_eq!(large, source);
        assert_eq!(large.capacity(), 64);
    }

    struct Droppable<'a> {
        counter: &'a Cell<usize>,
    }

    impl Drop for Droppable<'_> {
        fn drop(&mut self) {
            self.counter.set(self.counter.get() + 1);
        }
    }

    #[test]
    fn removal_operations_drop_exactly_the_vacated_elements() {
        let drop_count = Cell::new(0);
        let mut deque = Deque::with_capacity(16);
        for _ in 0..10 {
            deque.push_back(Droppable { counter: &drop_count });
        }

        let popped = deque.pop_back().unwrap();
        assert_eq!(drop_count.get(), 0); // moved out, not dropped
        drop(popped);
        assert_eq!(drop_count.get(), 1);

        deque.remove_range(2, 5).unwrap();
        assert_eq!(drop_count.get(), 4);

        deque.truncate(4);
        assert_eq!(drop_count.get(), 6);

        deque.resize_with(2, || Droppable { counter: &drop_count });
        assert_eq!(drop_count.get(), 8);

        drop(deque.remove(0).unwrap());
        assert_eq!(drop_count.get(), 9);

        drop(deque);
        assert_eq!(drop_count.get(), 10);
    }

    #[test]
    fn clearing_and_growth_drop_nothing_twice() {
        let drop_count = Cell::new(0);
        let mut deque = Deque::with_capacity(4);
        for _ in 0..4 {
            deque.push_back(Droppable { counter: &drop_count });
        }

        // growth moves the elements without dropping them
        deque.push_back(Droppable { counter: &drop_count });
        assert_eq!(deque.capacity(), 8);
        assert_eq!(drop_count.get(), 0);

        deque.clear();
        assert_eq!(drop_count.get(), 5);
        drop(deque);
        assert_eq!(drop_count.get(), 5);
    }

    #[test]
    fn equality_ordering_and_hashing_ignore_physical_layout() {
        use core::hash::{Hash, Hasher};
        use rustc_hash::FxHasher;

        fn fx_hash<T: Hash>(value: &T) -> u64 {
            let mut hasher = FxHasher::default();
            value.hash(&mut hasher);
            hasher.finish()
        }

        let wrapped = build(6, 4);
        let straight: Deque<usize> = (0..6).collect();
        assert!(!wrapped.as_slices().1.is_empty());
        assert!(straight.as_slices().1.is_empty());

        assert_eq!(wrapped, straight);
        assert_eq!(fx_hash(&wrapped), fx_hash(&straight));
        assert_eq!(wrapped.cmp(&straight), core::cmp::Ordering::Equal);

        let bigger: Deque<usize> = (0..7).collect();
        assert!(wrapped < bigger);
        assert_ne!(wrapped, bigger);
    }

    #[test]
    fn randomized_operations_match_the_std_model() {
        use rand::{rngs::SmallRng, Rng, SeedableRng};

        let mut rng = SmallRng::seed_from_u64(0x5EED);
        let mut deque: Deque<u32> = Deque::with_capacity(4);
        let mut model: VecDeque<u32> = VecDeque::new();

        for step in 0..10_000u32 {
            match rng.gen_range(0..10) {
                0..=2 => {
                    deque.push_back(step);
                    model.push_back(step);
                }
                3..=5 => {
                    deque.push_front(step);
                    model.push_front(step);
                }
                6 => assert_eq!(deque.pop_front().ok(), model.pop_front()),
                7 => assert_eq!(deque.pop_back().ok(), model.pop_back()),
                8 => {
                    let pos = rng.gen_range(0..=model.len());
                    deque.insert(pos, step).unwrap();
                    model.insert(pos, step);
                }
                _ => {
                    if model.is_empty() {
                        assert_eq!(deque.pop_front(), Err(Error::Empty));
                    } else {
                        let pos = rng.gen_range(0..model.len());
                        assert_eq!(deque.remove(pos).ok(), model.remove(pos));
                    }
                }
            }

            assert_eq!(deque.len(), model.len());
            assert_eq!(deque.front().ok(), model.front());
            assert_eq!(deque.back().ok(), model.back());
            if step % 64 == 0 {
                assert!(deque.iter().eq(model.iter()));
            }
        }

        assert!(deque.iter().eq(model.iter()));
    }

    #[test]
    fn display_format_is_exact() {
        let empty: Deque<i32> = Deque::new();
        assert_eq!(empty.to_string(), "[ ]");

        let deque: Deque<i32> = [1, 2, 3].into();
        assert_eq!(deque.to_string(), "[ 1 2 3 ]");
        assert_eq!(alloc::format!("{}", deque), "[ 1 2 3 ]");
    }

    #[test]
    fn zero_capacity_deques_grow_on_first_push() {
        let mut deque = Deque::with_capacity(0);
        deque.push_back(1);
        assert_eq!(deque.capacity(), 1);
        deque.push_front(0);
        assert_eq!(deque, &[0, 1]);
    }
}
