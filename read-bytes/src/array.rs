//! Sequence, buffer, and range parsers.

#![deny(clippy::arithmetic_side_effects)]

use std::ops::{Range, RangeInclusive};

use bytemuck::AnyBitPattern;
use byte_types::FixedSize;

use crate::algebra::{CheckedInt, OptArith};
use crate::byte_data::Cursor;
use crate::read::ParseError;

#[cfg(feature = "std")]
use std::vec::Vec;

impl<'a> Cursor<'a> {
    /// Interpret the next `count` items of `T` as a borrowed slice.
    ///
    /// `T` is typically one of the endian wrapper types, e.g.
    /// `BigEndian<u16>`; the slice points into the underlying region, so
    /// nothing is copied. The byte count is computed with overflow-checked
    /// multiplication.
    pub fn read_array<T: AnyBitPattern + FixedSize>(
        &mut self,
        count: usize,
    ) -> Result<&'a [T], ParseError> {
        let base = self.position();
        let len = count
            .opt_mul(T::RAW_BYTE_LEN)
            .ok_or(ParseError::invalid_value(base))?;
        let bytes = self.peek(len)?;
        let items =
            bytemuck::try_cast_slice(bytes).map_err(|_| ParseError::invalid_value(base))?;
        self.bump(len);
        Ok(items)
    }

    /// Copy the next `count` bytes into an owned buffer.
    #[cfg(feature = "std")]
    pub fn read_vec(&mut self, count: usize) -> Result<Vec<u8>, ParseError> {
        self.take_slice(count).map(<[u8]>::to_vec)
    }

    /// Copy all remaining bytes into an owned buffer, advancing the cursor
    /// to empty. Never fails.
    #[cfg(feature = "std")]
    pub fn read_remaining_vec(&mut self) -> Vec<u8> {
        self.take_rest().to_vec()
    }

    /// Run `parser` exactly `count` times, collecting the results.
    ///
    /// `count` is untrusted, so no storage is reserved up front; the vector
    /// grows only as items actually parse.
    #[cfg(feature = "std")]
    pub fn read_count<T>(
        &mut self,
        count: usize,
        mut parser: impl FnMut(&mut Cursor<'a>) -> Result<T, ParseError>,
    ) -> Result<Vec<T>, ParseError> {
        let mut items = Vec::new();
        for _ in 0..count {
            items.push(parser(self)?);
        }
        Ok(items)
    }

    /// Run `parser` repeatedly until the cursor is empty, collecting the
    /// results.
    ///
    /// An iteration that consumes no bytes while bytes remain would never
    /// terminate, so it is reported as an invalid-value fault at the stuck
    /// position.
    #[cfg(feature = "std")]
    pub fn read_exhaustive<T>(
        &mut self,
        mut parser: impl FnMut(&mut Cursor<'a>) -> Result<T, ParseError>,
    ) -> Result<Vec<T>, ParseError> {
        let mut items = Vec::new();
        while !self.is_empty() {
            let before = self.remaining();
            items.push(parser(self)?);
            if self.remaining() >= before {
                return Err(ParseError::invalid_value(self.position()));
            }
        }
        Ok(items)
    }

    /// Read a half-open range as a start bound followed by an end bound.
    ///
    /// Both bounds are read with `bound`; `start > end` is an invalid-value
    /// fault located at the second bound.
    pub fn read_range<B: CheckedInt>(
        &mut self,
        mut bound: impl FnMut(&mut Cursor<'a>) -> Result<B, ParseError>,
    ) -> Result<Range<B>, ParseError> {
        let start = bound(self)?;
        let position = self.position();
        let end = bound(self)?;
        start
            .opt_range(end)
            .ok_or(ParseError::invalid_value(position))
    }

    /// Read a closed range as a start bound followed by an end bound.
    pub fn read_range_through<B: CheckedInt>(
        &mut self,
        mut bound: impl FnMut(&mut Cursor<'a>) -> Result<B, ParseError>,
    ) -> Result<RangeInclusive<B>, ParseError> {
        let start = bound(self)?;
        let position = self.position();
        let end = bound(self)?;
        start
            .opt_range_through(end)
            .ok_or(ParseError::invalid_value(position))
    }

    /// Read a half-open range as a start bound followed by a count.
    ///
    /// A negative count, or a `start + count` that overflows, is an
    /// invalid-value fault located at the count field.
    pub fn read_range_counted<B: CheckedInt>(
        &mut self,
        mut bound: impl FnMut(&mut Cursor<'a>) -> Result<B, ParseError>,
    ) -> Result<Range<B>, ParseError> {
        let start = bound(self)?;
        let position = self.position();
        let count = bound(self)?;
        if count < B::ZERO {
            return Err(ParseError::invalid_value(position));
        }
        let end = start
            .opt_add(count)
            .ok_or(ParseError::invalid_value(position))?;
        Ok(start..end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::byte_data::ByteData;
    use crate::read::ErrorKind;
    use byte_types::{BigEndian, BytesWrapper};
    #[cfg(feature = "std")]
    use std::vec::Vec;

    fn cursor(bytes: &[u8]) -> Cursor<'_> {
        ByteData::new(bytes).cursor()
    }

    #[cfg(feature = "std")]
    #[test]
    fn counted_sequence() {
        let bytes = [0x00, 0x01, 0x00, 0x02, 0x00, 0x03, 0x00, 0x04];
        let mut cursor = cursor(&bytes);
        let values = cursor
            .read_count(4, |c| c.read_be::<u16>())
            .unwrap();
        assert_eq!(values, vec![1, 2, 3, 4]);
        assert!(cursor.is_empty());

        let err = cursor_from(&bytes)
            .read_count(5, |c| c.read_be::<u16>())
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InsufficientData);
    }

    #[cfg(feature = "std")]
    fn cursor_from(bytes: &[u8]) -> Cursor<'_> {
        ByteData::new(bytes).cursor()
    }

    #[cfg(feature = "std")]
    #[test]
    fn exhaustive_sequence() {
        let mut cursor = cursor(&[1, 2, 3, 4, 5, 6]);
        let values = cursor
            .read_exhaustive(|c| c.read_be::<u16>())
            .unwrap();
        assert_eq!(values, vec![0x0102, 0x0304, 0x0506]);
        assert!(cursor.is_empty());
    }

    #[cfg(feature = "std")]
    #[test]
    fn exhaustive_requires_progress() {
        let mut cursor = cursor(&[1, 2, 3]);
        let err = cursor.read_exhaustive(|c| Ok(c.position())).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidValue);
        assert_eq!(err.location(), Some(0));
    }

    #[test]
    fn zero_copy_array() {
        let bytes = [0x00, 0x01, 0x00, 0x02, 0xFF];
        let mut cursor = cursor(&bytes);
        let values: &[BigEndian<u16>] = cursor.read_array(2).unwrap();
        assert_eq!(values[0].get(), 1);
        assert_eq!(values[1].get(), 2);
        assert_eq!(cursor.remaining(), 1);

        let err = cursor.read_array::<BigEndian<u16>>(1).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InsufficientData);
        let err = cursor
            .read_array::<BigEndian<u16>>(usize::MAX)
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidValue);
    }

    #[cfg(feature = "std")]
    #[test]
    fn byte_buffers() {
        let mut cursor = cursor(&[9, 8, 7, 6]);
        assert_eq!(cursor.read_vec(3).unwrap(), vec![9, 8, 7]);
        assert_eq!(cursor.read_remaining_vec(), vec![6]);
        assert!(cursor.is_empty());
        assert!(cursor.read_vec(1).is_err());
        assert_eq!(cursor.read_remaining_vec(), Vec::<u8>::new());
    }

    #[test]
    fn range_from_bounds() {
        let bytes = [0x00, 0x02, 0x00, 0x08];
        let range = cursor(&bytes).read_range(|c| c.read_be::<u16>()).unwrap();
        assert_eq!(range, 2..8);
        let range = cursor(&bytes)
            .read_range_through(|c| c.read_be::<u16>())
            .unwrap();
        assert_eq!(range, 2..=8);

        let backwards = [0x00, 0x08, 0x00, 0x02];
        let err = cursor(&backwards)
            .read_range(|c| c.read_be::<u16>())
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidValue);
        assert_eq!(err.location(), Some(2));
    }

    #[test]
    fn range_from_start_and_count() {
        let bytes = [0x00, 0x02, 0x00, 0x06];
        let range = cursor(&bytes)
            .read_range_counted(|c| c.read_be::<u16>())
            .unwrap();
        assert_eq!(range, 2..8);

        // a negative count never forms a range
        let negative = [0x00, 0x02, 0xFF, 0xFF];
        let err = cursor(&negative)
            .read_range_counted(|c| c.read_be::<i16>())
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidValue);
        assert_eq!(err.location(), Some(2));

        let overflowing = [0xFF, 0xFF, 0x00, 0x01];
        let err = cursor(&overflowing)
            .read_range_counted(|c| c.read_be::<u16>())
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidValue);
    }
}
