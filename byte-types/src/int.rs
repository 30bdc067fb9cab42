//! Fixed-width integers and their widening rules.

use crate::raw::sealed::ByteArray;
use crate::{Scalar, ScalarLE};

/// The canonical extension byte for a value whose most significant stored
/// byte is `top`.
///
/// This is the byte that fills the unused positions when a value is widened,
/// and the byte every padding position must hold in a canonical over-wide
/// encoding: `0xFF` when a signed value is negative, `0x00` otherwise.
pub const fn extension_byte(signed: bool, top: u8) -> u8 {
    if signed && top & 0x80 != 0 {
        0xFF
    } else {
        0x00
    }
}

/// A fixed-width integer scalar.
///
/// Adds the signedness metadata and short-window widening used by variable
/// byte-count loads. Floating point scalars are deliberately excluded: they
/// have no meaningful sign/zero extension, so they only support loads at
/// their natural width.
pub trait Int: Scalar + ScalarLE + Copy {
    /// `true` for two's-complement signed types.
    const SIGNED: bool;

    /// Widen big-endian `bytes` to the full width of this type.
    ///
    /// `bytes` must hold between 1 and `RAW_BYTE_LEN` bytes. The value is
    /// sign-extended for signed types and zero-extended otherwise. Returns
    /// `None` if `bytes` is empty or longer than the natural width.
    fn extend_be(bytes: &[u8]) -> Option<Self> {
        let len = bytes.len();
        let width = <Self::Raw as ByteArray>::LEN;
        if len == 0 || len > width {
            return None;
        }
        let fill = extension_byte(Self::SIGNED, bytes[0]);
        let mut raw = <Self::Raw as ByteArray>::filled(fill);
        raw.as_mut()[width - len..].copy_from_slice(bytes);
        Some(Self::from_raw(raw))
    }

    /// Widen little-endian `bytes` to the full width of this type.
    ///
    /// The little-endian counterpart of [`extend_be`](Int::extend_be); the
    /// most significant stored byte is the last one.
    fn extend_le(bytes: &[u8]) -> Option<Self> {
        let len = bytes.len();
        let width = <Self::Raw as ByteArray>::LEN;
        if len == 0 || len > width {
            return None;
        }
        let fill = extension_byte(Self::SIGNED, bytes[len - 1]);
        let mut raw = <Self::Raw as ByteArray>::filled(fill);
        raw.as_mut()[..len].copy_from_slice(bytes);
        Some(Self::from_raw_le(raw))
    }
}

macro_rules! impl_int {
    (unsigned: $($ty:ty),* $(,)?) => {
        $(
            impl Int for $ty {
                const SIGNED: bool = false;
            }
        )*
    };
    (signed: $($ty:ty),* $(,)?) => {
        $(
            impl Int for $ty {
                const SIGNED: bool = true;
            }
        )*
    };
}

impl_int!(unsigned: u8, u16, u32, u64, usize);
impl_int!(signed: i8, i16, i32, i64, isize);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_extension() {
        assert_eq!(u32::extend_be(&[0x01]), Some(1));
        assert_eq!(u32::extend_be(&[0x01, 0x00]), Some(0x100));
        assert_eq!(u32::extend_le(&[0x01]), Some(1));
        assert_eq!(u32::extend_le(&[0x01, 0x00]), Some(1));
        assert_eq!(u64::extend_be(&[0xFF]), Some(0xFF));
    }

    #[test]
    fn sign_extension() {
        assert_eq!(i32::extend_be(&[0xFF]), Some(-1));
        assert_eq!(i32::extend_be(&[0xFF, 0xFE]), Some(-2));
        assert_eq!(i32::extend_le(&[0xFE, 0xFF]), Some(-2));
        assert_eq!(i32::extend_be(&[0x7F]), Some(127));
        assert_eq!(i64::extend_be(&[0x80]), Some(-128));
        assert_eq!(i64::extend_le(&[0x80]), Some(-128));
    }

    #[test]
    fn window_bounds() {
        assert!(u16::extend_be(&[]).is_none());
        assert!(u16::extend_be(&[0, 0, 1]).is_none());
        assert_eq!(u16::extend_be(&[0x12, 0x34]), Some(0x1234));
    }

    #[test]
    fn extension_bytes() {
        assert_eq!(extension_byte(false, 0xFF), 0x00);
        assert_eq!(extension_byte(true, 0x7F), 0x00);
        assert_eq!(extension_byte(true, 0x80), 0xFF);
    }
}
