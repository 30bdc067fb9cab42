//! raw byte regions and the parsing cursor

#![deny(clippy::arithmetic_side_effects)]

use std::ops::{Range, RangeBounds};

use bytemuck::AnyBitPattern;
use byte_types::{FixedSize, Scalar, ScalarLE};

use crate::algebra::OptArith;
use crate::range::ByteRange;
use crate::read::ParseError;

/// A reference to a region of raw binary data.
///
/// This is a wrapper around a byte slice, that provides convenience methods
/// for deriving cursors and validating reads against the region's bounds.
#[derive(Debug, Default, Clone, Copy)]
pub struct ByteData<'a> {
    bytes: &'a [u8],
}

/// A bounded view over a byte region with a movable start offset.
///
/// A cursor tracks the next byte to be consumed (`position`), an exclusive
/// read limit (`limit`), and the full underlying region. Reads and slices
/// move `position` forward; only absolute seeks may move `limit`. The
/// invariant `position <= limit <= region_len` holds after every public
/// operation, and no operation ever reads outside `position..limit`.
///
/// Cursors are cheap to copy; a copy observes the same region but carries
/// its own offsets. Sub-cursors produced by the `take_*` family keep the
/// full region reference, so absolute offsets always refer to the original
/// region rather than to the sub-view.
#[derive(Debug, Clone, Copy)]
pub struct Cursor<'a> {
    data: ByteData<'a>,
    start: usize,
    end: usize,
}

impl<'a> ByteData<'a> {
    /// Empty data, useful for some tests and examples
    pub const EMPTY: ByteData<'static> = ByteData { bytes: &[] };

    /// Create a new `ByteData` with these bytes.
    pub const fn new(bytes: &'a [u8]) -> Self {
        ByteData { bytes }
    }

    /// The length of the data, in bytes
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// `true` if the data has a length of zero bytes.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn slice(&self, range: impl RangeBounds<usize>) -> Option<ByteData<'a>> {
        let bounds = (range.start_bound().cloned(), range.end_bound().cloned());
        self.bytes.get(bounds).map(|bytes| ByteData { bytes })
    }

    /// Read a big-endian scalar at the provided location in the data.
    pub fn read_at<T: Scalar>(&self, offset: usize) -> Result<T, ParseError> {
        let end = offset
            .checked_add(T::RAW_BYTE_LEN)
            .ok_or(ParseError::insufficient_data(offset))?;
        self.bytes
            .get(offset..end)
            .and_then(T::read)
            .ok_or(ParseError::insufficient_data(offset))
    }

    /// Read a little-endian scalar at the provided location in the data.
    pub fn read_le_at<T: ScalarLE>(&self, offset: usize) -> Result<T, ParseError> {
        let end = offset
            .checked_add(T::RAW_BYTE_LEN)
            .ok_or(ParseError::insufficient_data(offset))?;
        self.bytes
            .get(offset..end)
            .and_then(T::read_le)
            .ok_or(ParseError::insufficient_data(offset))
    }

    /// Interpret the bytes at the provided range as a slice of `T`.
    ///
    /// Returns an error if `range` is out of bounds for the underlying data,
    /// or if the length of the range is not a multiple of `T::RAW_BYTE_LEN`.
    pub fn read_array<T: AnyBitPattern + FixedSize>(
        &self,
        range: Range<usize>,
    ) -> Result<&'a [T], ParseError> {
        let start = range.start;
        let bytes = self
            .bytes
            .get(range)
            .ok_or(ParseError::insufficient_data(start))?;
        bytemuck::try_cast_slice(bytes).map_err(|_| ParseError::invalid_value(start))
    }

    /// A cursor over the whole region.
    pub fn cursor(&self) -> Cursor<'a> {
        Cursor {
            data: *self,
            start: 0,
            end: self.len(),
        }
    }

    /// Derive a cursor over the whole region and run `body` with it.
    ///
    /// This is the sanctioned way to obtain a cursor: the cursor lives for
    /// the duration of the callback and the callback's result (or fault) is
    /// returned as-is.
    pub fn with_cursor<R>(
        &self,
        body: impl FnOnce(&mut Cursor<'a>) -> Result<R, ParseError>,
    ) -> Result<R, ParseError> {
        let mut cursor = self.cursor();
        body(&mut cursor)
    }

    /// Derive a cursor positioned to `range` and run `body` with it.
    ///
    /// On success `range` is updated in place to the cursor's final state,
    /// so a caller can resume later parsing where the callback stopped.
    pub fn with_cursor_at<R>(
        &self,
        range: &mut ByteRange,
        body: impl FnOnce(&mut Cursor<'a>) -> Result<R, ParseError>,
    ) -> Result<R, ParseError> {
        let mut cursor = self.cursor();
        cursor.seek_to_range(*range)?;
        let value = body(&mut cursor)?;
        *range = cursor.current_range();
        Ok(value)
    }

    /// Return the data as a byte slice
    pub fn as_bytes(&self) -> &'a [u8] {
        self.bytes
    }
}

impl<'a> Cursor<'a> {
    /// The offset of the next byte to be consumed.
    ///
    /// Offsets are relative to the underlying region, not to any sub-view.
    pub fn position(&self) -> usize {
        self.start
    }

    /// The exclusive upper bound for reads.
    pub fn limit(&self) -> usize {
        self.end
    }

    /// The fixed length of the underlying region.
    pub fn region_len(&self) -> usize {
        self.data.len()
    }

    /// The number of bytes still readable.
    pub fn remaining(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    /// `true` if no bytes remain readable.
    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }

    /// The readable region as a deferred range, without consuming anything.
    pub fn current_range(&self) -> ByteRange {
        ByteRange::new_unchecked(self.start, self.end)
    }

    /// The remaining bytes as a slice.
    ///
    /// The borrow is tied to the region, so it stays valid however the
    /// cursor moves afterwards.
    pub fn as_bytes(&self) -> &'a [u8] {
        debug_assert!(self.start <= self.end && self.end <= self.data.len());
        self.data
            .as_bytes()
            .get(self.start..self.end)
            .unwrap_or_default()
    }

    /// A view of the next `n` bytes, without consuming them.
    pub(crate) fn peek(&self, n: usize) -> Result<&'a [u8], ParseError> {
        self.as_bytes()
            .get(..n)
            .ok_or(ParseError::insufficient_data(self.start))
    }

    // Advance past bytes already vended by `peek`; `n <= remaining` must hold.
    pub(crate) fn bump(&mut self, n: usize) {
        debug_assert!(n <= self.remaining());
        self.start = self.start.saturating_add(n).min(self.end);
    }

    /// Consume and return the next `n` bytes.
    pub(crate) fn take_slice(&mut self, n: usize) -> Result<&'a [u8], ParseError> {
        let bytes = self.peek(n)?;
        self.bump(n);
        Ok(bytes)
    }

    /// Consume and return all remaining bytes.
    pub(crate) fn take_rest(&mut self) -> &'a [u8] {
        let bytes = self.as_bytes();
        self.start = self.end;
        bytes
    }

    /// Split off a sub-cursor covering the next `n` bytes.
    ///
    /// The sub-cursor shares the region, so absolute seeks within it still
    /// address the original region. This cursor is advanced past the split
    /// bytes; on failure it is unchanged.
    pub fn take_bytes(&mut self, n: usize) -> Result<Cursor<'a>, ParseError> {
        let start = self.start;
        let end = start
            .checked_add(n)
            .filter(|end| *end <= self.end)
            .ok_or(ParseError::insufficient_data(start))?;
        self.start = end;
        Ok(Cursor {
            data: self.data,
            start,
            end,
        })
    }

    /// Split off a sub-cursor covering `count` items of `stride` bytes each.
    ///
    /// The byte count is computed with overflow-checked multiplication, so a
    /// hostile `count` can never wrap into a small allocation.
    pub fn take_strided(&mut self, stride: usize, count: usize) -> Result<Cursor<'a>, ParseError> {
        let n = stride
            .opt_mul(count)
            .ok_or(ParseError::invalid_value(self.start))?;
        self.take_bytes(n)
    }

    /// Like [`take_bytes`](Self::take_bytes), but returns a deferred range
    /// instead of a cursor.
    pub fn take_range(&mut self, n: usize) -> Result<ByteRange, ParseError> {
        self.take_bytes(n).map(|cursor| cursor.current_range())
    }

    /// Like [`take_strided`](Self::take_strided), but returns a deferred
    /// range instead of a cursor.
    pub fn take_strided_range(
        &mut self,
        stride: usize,
        count: usize,
    ) -> Result<ByteRange, ParseError> {
        self.take_strided(stride, count)
            .map(|cursor| cursor.current_range())
    }

    /// Return the readable region as a deferred range and advance to its end.
    pub fn take_remaining_range(&mut self) -> ByteRange {
        let range = self.current_range();
        self.start = self.end;
        range
    }

    /// Consume `n` bytes and validate them as UTF-8, without copying.
    ///
    /// Unlike the repairing string parsers, invalid UTF-8 here is a fault: a
    /// user-error fault locating the first invalid byte. The cursor is
    /// unchanged on failure.
    pub fn take_utf8(&mut self, n: usize) -> Result<&'a str, ParseError> {
        let bytes = self.peek(n)?;
        match std::str::from_utf8(bytes) {
            Ok(value) => {
                self.bump(n);
                Ok(value)
            }
            Err(inner) => {
                let location = self.start.saturating_add(inner.valid_up_to());
                let err = ParseError::user_error(location);
                #[cfg(feature = "std")]
                let err = err.with_cause(inner);
                Err(err)
            }
        }
    }

    /// Move the position forward by `k` bytes.
    ///
    /// Relative seeks cannot move backward; retrograde navigation goes
    /// through [`seek_to`](Self::seek_to) or
    /// [`seek_to_range`](Self::seek_to_range). Fails with an invalid-value
    /// fault if `k` exceeds [`remaining`](Self::remaining); the cursor is
    /// unchanged on failure.
    pub fn seek_by(&mut self, k: usize) -> Result<(), ParseError> {
        if k > self.remaining() {
            return Err(ParseError::invalid_value(self.start));
        }
        self.start = self.start.saturating_add(k);
        Ok(())
    }

    /// Move the position to `k` bytes before the limit.
    ///
    /// `k` must not exceed [`remaining`](Self::remaining); the limit is
    /// unchanged.
    pub fn seek_from_end(&mut self, k: usize) -> Result<(), ParseError> {
        if k > self.remaining() {
            return Err(ParseError::invalid_value(self.start));
        }
        self.start = self.end.saturating_sub(k);
        Ok(())
    }

    /// Move the position to absolute offset `k` in the region.
    ///
    /// This is the only operation that may move the limit forward: the
    /// cursor is restored to `k..region_len`, whatever sub-view it
    /// previously covered.
    pub fn seek_to(&mut self, k: usize) -> Result<(), ParseError> {
        if k > self.data.len() {
            return Err(ParseError::invalid_value(self.start));
        }
        self.start = k;
        self.end = self.data.len();
        Ok(())
    }

    /// Restore the cursor to a previously captured range.
    ///
    /// The range's offsets address the region, and its upper bound must not
    /// exceed the region length.
    pub fn seek_to_range(&mut self, range: ByteRange) -> Result<(), ParseError> {
        if range.upper() > self.data.len() {
            return Err(ParseError::invalid_value(self.start));
        }
        self.start = range.lower();
        self.end = range.upper();
        Ok(())
    }

    /// By-copy form of [`seek_by`](Self::seek_by): returns the moved cursor,
    /// leaving `self` untouched.
    pub fn seeking_by(&self, k: usize) -> Result<Cursor<'a>, ParseError> {
        let mut copy = *self;
        copy.seek_by(k)?;
        Ok(copy)
    }

    /// By-copy form of [`seek_from_end`](Self::seek_from_end).
    pub fn seeking_from_end(&self, k: usize) -> Result<Cursor<'a>, ParseError> {
        let mut copy = *self;
        copy.seek_from_end(k)?;
        Ok(copy)
    }

    /// By-copy form of [`seek_to`](Self::seek_to).
    pub fn seeking_to(&self, k: usize) -> Result<Cursor<'a>, ParseError> {
        let mut copy = *self;
        copy.seek_to(k)?;
        Ok(copy)
    }

    /// By-copy form of [`seek_to_range`](Self::seek_to_range).
    pub fn seeking_to_range(&self, range: ByteRange) -> Result<Cursor<'a>, ParseError> {
        let mut copy = *self;
        copy.seek_to_range(range)?;
        Ok(copy)
    }

    /// Run `body` on a copy of the cursor, committing the copy's state back
    /// only if `body` succeeds.
    ///
    /// This is the one sanctioned recovery primitive: a failing speculative
    /// parse leaves `self` exactly as it was, so the caller can retry with
    /// alternate logic or propagate the fault.
    pub fn atomically<T>(
        &mut self,
        body: impl FnOnce(&mut Cursor<'a>) -> Result<T, ParseError>,
    ) -> Result<T, ParseError> {
        let mut probe = *self;
        let value = body(&mut probe)?;
        *self = probe;
        Ok(value)
    }
}

impl AsRef<[u8]> for ByteData<'_> {
    fn as_ref(&self) -> &[u8] {
        self.bytes
    }
}

impl<'a> From<&'a [u8]> for ByteData<'a> {
    fn from(src: &'a [u8]) -> ByteData<'a> {
        ByteData::new(src)
    }
}

impl<'a, const N: usize> From<&'a [u8; N]> for ByteData<'a> {
    fn from(src: &'a [u8; N]) -> ByteData<'a> {
        ByteData::new(src)
    }
}

#[cfg(feature = "std")]
impl<'a> From<&'a Vec<u8>> for ByteData<'a> {
    fn from(src: &'a Vec<u8>) -> ByteData<'a> {
        ByteData::new(src)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::read::ErrorKind;

    fn cursor(bytes: &[u8]) -> Cursor<'_> {
        ByteData::new(bytes).cursor()
    }

    #[track_caller]
    fn assert_bounds(cursor: &Cursor) {
        assert!(cursor.position() <= cursor.limit());
        assert!(cursor.limit() <= cursor.region_len());
    }

    #[test]
    fn fresh_cursor_covers_region() {
        let cursor = cursor(&[1, 2, 3, 4]);
        assert_eq!(cursor.position(), 0);
        assert_eq!(cursor.limit(), 4);
        assert_eq!(cursor.remaining(), 4);
        assert!(!cursor.is_empty());
        assert_eq!(cursor.as_bytes(), &[1, 2, 3, 4]);
        assert_eq!(cursor.current_range(), ByteRange::new(0, 4).unwrap());
    }

    #[test]
    fn slice_conservation() {
        let mut parent = cursor(&[1, 2, 3, 4, 5]);
        let child = parent.take_bytes(3).unwrap();
        assert_eq!(child.position(), 0);
        assert_eq!(child.limit(), 3);
        assert_eq!(child.region_len(), 5);
        assert_eq!(parent.position(), 3);
        assert_eq!(parent.limit(), 5);
        assert_bounds(&child);
        assert_bounds(&parent);
    }

    #[test]
    fn take_bytes_past_limit_leaves_cursor_unchanged() {
        let mut cursor = cursor(&[1, 2, 3]);
        cursor.take_bytes(2).unwrap();
        let err = cursor.take_bytes(2).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InsufficientData);
        assert_eq!(err.location(), Some(2));
        assert_eq!(cursor.position(), 2);
    }

    #[test]
    fn strided_slices_check_overflow() {
        let mut cursor = cursor(&[0; 16]);
        let err = cursor.take_strided(usize::MAX, 2).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidValue);

        let err = cursor.take_strided(4, 5).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InsufficientData);

        let child = cursor.take_strided(4, 4).unwrap();
        assert_eq!(child.remaining(), 16);
        assert!(cursor.is_empty());
    }

    #[test]
    fn deferred_ranges_from_slicing() {
        let mut cursor = cursor(&[0; 10]);
        let head = cursor.take_range(4).unwrap();
        assert_eq!(head.to_range(), 0..4);
        let rest = cursor.take_remaining_range();
        assert_eq!(rest.to_range(), 4..10);
        assert!(cursor.is_empty());
    }

    #[test]
    fn seek_by_is_forward_only() {
        let mut cursor = cursor(&[0; 8]);
        cursor.seek_by(5).unwrap();
        assert_eq!(cursor.position(), 5);
        let err = cursor.seek_by(4).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidValue);
        assert_eq!(cursor.position(), 5);
        cursor.seek_by(3).unwrap();
        assert!(cursor.is_empty());
    }

    #[test]
    fn seek_from_end() {
        let mut cursor = cursor(&[0; 8]);
        cursor.seek_from_end(2).unwrap();
        assert_eq!(cursor.position(), 6);
        assert_eq!(cursor.limit(), 8);
        assert!(cursor.seek_from_end(3).is_err());
        cursor.seek_from_end(0).unwrap();
        assert!(cursor.is_empty());
    }

    #[test]
    fn absolute_seek_restores_limit() {
        let mut parent = cursor(&[0; 10]);
        parent.seek_by(2).unwrap();
        let mut child = parent.take_bytes(4).unwrap();
        assert_eq!(child.limit(), 6);
        child.seek_to(1).unwrap();
        assert_eq!(child.position(), 1);
        assert_eq!(child.limit(), 10);
        assert!(child.seek_to(11).is_err());
    }

    #[test]
    fn seek_to_range_validates_against_region() {
        let mut cursor = cursor(&[0; 6]);
        let range = ByteRange::new(2, 5).unwrap();
        cursor.seek_to_range(range).unwrap();
        assert_eq!(cursor.position(), 2);
        assert_eq!(cursor.limit(), 5);

        let bogus = ByteRange::new(3, 7).unwrap();
        let err = cursor.seek_to_range(bogus).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidValue);
        assert_eq!(cursor.position(), 2);
    }

    #[test]
    fn by_copy_seeks_leave_original_alone() {
        let cursor = cursor(&[0; 8]);
        let moved = cursor.seeking_by(3).unwrap();
        assert_eq!(moved.position(), 3);
        assert_eq!(cursor.position(), 0);
        let moved = cursor.seeking_from_end(1).unwrap();
        assert_eq!(moved.position(), 7);
        let moved = cursor.seeking_to(4).unwrap();
        assert_eq!(moved.position(), 4);
        let moved = cursor
            .seeking_to_range(ByteRange::new(1, 2).unwrap())
            .unwrap();
        assert_eq!(moved.current_range().to_range(), 1..2);
        assert_eq!(cursor.position(), 0);
    }

    #[test]
    fn atomically_rolls_back_on_failure() {
        // a 2-byte read succeeds, then a 4-byte read fails: the whole
        // speculative parse must leave the cursor at offset 0.
        let mut cursor = cursor(&[1, 2, 3, 4, 5]);
        let result = cursor.atomically(|c| {
            c.read_be::<u16>()?;
            c.read_be::<u32>()
        });
        let err = result.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InsufficientData);
        assert_eq!(cursor.position(), 0);
        assert_eq!(cursor.remaining(), 5);
    }

    #[test]
    fn atomically_commits_on_success() {
        let mut cursor = cursor(&[0, 1, 0, 2]);
        let pair = cursor
            .atomically(|c| Ok((c.read_be::<u16>()?, c.read_be::<u16>()?)))
            .unwrap();
        assert_eq!(pair, (1, 2));
        assert!(cursor.is_empty());
    }

    #[test]
    fn validated_utf8_slices() {
        let mut cursor = cursor(b"hello!");
        assert_eq!(cursor.take_utf8(5).unwrap(), "hello");
        assert_eq!(cursor.remaining(), 1);

        let mut cursor = cursor_from(&[0x68, 0x69, 0xC0, 0x21]);
        let err = cursor.take_utf8(4).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UserError);
        assert_eq!(err.location(), Some(2));
        assert_eq!(cursor.position(), 0);
    }

    fn cursor_from(bytes: &[u8]) -> Cursor<'_> {
        ByteData::new(bytes).cursor()
    }

    #[test]
    fn with_cursor_at_updates_range() {
        let data = ByteData::new(&[0u8, 7, 1, 2, 3]);
        let mut range = ByteRange::new(1, 4).unwrap();
        let value = data
            .with_cursor_at(&mut range, |cursor| cursor.read_be::<u16>())
            .unwrap();
        assert_eq!(value, 0x0701);
        assert_eq!(range.to_range(), 3..4);
    }

    #[test]
    fn region_level_reads() {
        let data = ByteData::new(&[0x12, 0x34, 0x56]);
        assert_eq!(data.read_at::<u16>(1).unwrap(), 0x3456);
        assert_eq!(data.read_le_at::<u16>(1).unwrap(), 0x5634);
        let err = data.read_at::<u32>(1).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InsufficientData);
        assert_eq!(err.location(), Some(1));
    }
}
