use thiserror::Error;

/// Errors reported by the strict and positional entry points of the dense
/// containers.
///
/// The `Option`-returning counterparts (`get`, `try_get_index`,
/// `try_get_at`, ...) never produce these; they report absence instead.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// A strict `add` found the key or item already present.
    #[error("an entry with the same key already exists")]
    DuplicateKey,

    /// A lookup that requires the key to be present did not find it.
    #[error("the given key was not present")]
    KeyNotFound,

    /// A positional accessor was given an index outside `[0, len)`.
    #[error("index {index} out of range for length {len}")]
    IndexOutOfRange {
        /// The rejected index
        index: usize,
        /// The number of live entries at the time of the call
        len: usize,
    },

    /// A bulk range helper was given a range that does not fit `[0, len)`.
    #[error("range {start}..{end} out of bounds for length {len}")]
    RangeOutOfBounds {
        /// Start of the rejected range
        start: usize,
        /// End (exclusive) of the rejected range
        end: usize,
        /// The number of live entries at the time of the call
        len: usize,
    },
}

/// Result alias used throughout the crate.
pub type Result<T> = core::result::Result<T, Error>;

/// Resolves a `RangeBounds` against `len`, rejecting inverted or overlong
/// ranges.
pub(crate) fn checked_range(
    range: impl core::ops::RangeBounds<usize>,
    len: usize,
) -> Result<core::ops::Range<usize>> {
    use core::ops::Bound;

    let start = match range.start_bound() {
        Bound::Included(&s) => s,
        Bound::Excluded(&s) => s.saturating_add(1),
        Bound::Unbounded => 0,
    };
    let end = match range.end_bound() {
        Bound::Included(&e) => e.saturating_add(1),
        Bound::Excluded(&e) => e,
        Bound::Unbounded => len,
    };

    if start > end || end > len {
        return Err(Error::RangeOutOfBounds { start, end, len });
    }
    Ok(start..end)
}
