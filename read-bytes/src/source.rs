//! Byte-source adapters: scoped cursor access over contiguous containers.

use crate::byte_data::{ByteData, Cursor};
use crate::range::ByteRange;
use crate::read::ParseError;

/// A contiguous byte container that can lend out a cursor.
///
/// The `with_cursor` family is the sanctioned way to obtain a cursor: the
/// cursor is derived for the duration of the callback and cannot escape it
/// with the source's bytes still borrowed, so every exit path — normal or
/// fault — releases the view.
///
/// A blanket implementation covers anything that exposes its bytes as a
/// slice: `[u8]`, `[u8; N]`, `Vec<u8>`, `Box<[u8]>`, [`ByteData`], and so
/// on.
pub trait ByteSource {
    /// The contiguous bytes of this source.
    fn bytes(&self) -> &[u8];

    /// Derive a cursor over this source's bytes and run `body` with it.
    ///
    /// Returns the callback's value or propagates its fault.
    fn with_cursor<'s, R>(
        &'s self,
        body: impl FnOnce(&mut Cursor<'s>) -> Result<R, ParseError>,
    ) -> Result<R, ParseError> {
        ByteData::new(self.bytes()).with_cursor(body)
    }

    /// Derive a cursor positioned to `range` and run `body` with it.
    ///
    /// On success `range` is updated in place to the cursor's final state.
    fn with_cursor_at<'s, R>(
        &'s self,
        range: &mut ByteRange,
        body: impl FnOnce(&mut Cursor<'s>) -> Result<R, ParseError>,
    ) -> Result<R, ParseError> {
        ByteData::new(self.bytes()).with_cursor_at(range, body)
    }
}

impl<T: AsRef<[u8]> + ?Sized> ByteSource for T {
    fn bytes(&self) -> &[u8] {
        self.as_ref()
    }
}
