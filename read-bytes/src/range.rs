//! Deferred byte ranges.

use std::ops::Range;

use crate::read::ParseError;

/// A pair of byte offsets remembered for later parsing.
///
/// A `ByteRange` carries no borrow of the region it was sliced from, so it
/// can be stored freely and handed back to a cursor later. Offsets always
/// refer to the underlying region; they are validated against the region's
/// length when a cursor seeks to the range (see
/// [`Cursor::seek_to_range`](crate::Cursor::seek_to_range)).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ByteRange {
    lower: usize,
    upper: usize,
}

impl ByteRange {
    /// Create a range from its bounds.
    ///
    /// Fails with an invalid-value fault if `lower > upper`.
    pub fn new(lower: usize, upper: usize) -> Result<ByteRange, ParseError> {
        if lower > upper {
            return Err(ParseError::invalid_value(lower));
        }
        Ok(ByteRange { lower, upper })
    }

    // invariant lower <= upper is the caller's responsibility
    pub(crate) fn new_unchecked(lower: usize, upper: usize) -> ByteRange {
        debug_assert!(lower <= upper);
        ByteRange { lower, upper }
    }

    /// The inclusive lower bound.
    pub fn lower(&self) -> usize {
        self.lower
    }

    /// The exclusive upper bound.
    pub fn upper(&self) -> usize {
        self.upper
    }

    /// The number of bytes the range spans.
    pub fn len(&self) -> usize {
        self.upper.saturating_sub(self.lower)
    }

    /// `true` if the range spans zero bytes.
    pub fn is_empty(&self) -> bool {
        self.lower == self.upper
    }

    /// The range as a standard half-open `Range`.
    pub fn to_range(self) -> Range<usize> {
        self.lower..self.upper
    }
}

impl From<ByteRange> for Range<usize> {
    fn from(src: ByteRange) -> Range<usize> {
        src.to_range()
    }
}

impl TryFrom<Range<usize>> for ByteRange {
    type Error = ParseError;

    fn try_from(src: Range<usize>) -> Result<ByteRange, ParseError> {
        ByteRange::new(src.start, src.end)
    }
}
