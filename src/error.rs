//! The error taxonomy shared by all checked deque operations.

use core::fmt::{self, Display, Formatter};

/// The ways a checked deque operation can fail.
///
/// Every variant is raised at the call site as soon as the violated
/// precondition is detected, before any mutation takes place; a failed call
/// leaves the deque exactly as it was. No operation clamps an out-of-range
/// argument.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Error {
    /// `front`, `back`, `pop_front`, or `pop_back` was called on an empty deque.
    Empty,
    /// A checked element access reached past the end of the live window.
    Index {
        /// The offending logical index.
        index: usize,
        /// The number of live elements at the time of the call.
        len: usize,
    },
    /// An insertion, removal, or cursor dereference addressed a logical
    /// position outside the live window.
    Position {
        /// The offending logical position. Signed, because cursor arithmetic
        /// may legally produce negative intermediate positions.
        pos: isize,
        /// The number of live elements at the time of the call.
        len: usize,
    },
    /// A range removal was given `start > end` or `end > len`.
    Range {
        /// Start of the offending half-open range.
        start: isize,
        /// End of the offending half-open range.
        end: isize,
        /// The number of live elements at the time of the call.
        len: usize,
    },
    /// A cursor was used after the deque it was created from changed its
    /// capacity, front offset, or length.
    Stale,
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match *self {
            Error::Empty => f.write_str("cannot access element in empty deque"),
            Error::Index { index, len } => {
                write!(f, "index (which is {}) >= len (which is {})", index, len)
            }
            Error::Position { pos, len } => {
                write!(f, "position (which is {}) is outside the deque (len is {})", pos, len)
            }
            Error::Range { start, end, len } => {
                write!(f, "invalid range {}..{} for a deque of len {}", start, end, len)
            }
            Error::Stale => {
                f.write_str("stale cursor: the deque was structurally modified after its creation")
            }
        }
    }
}

impl core::error::Error for Error {}
