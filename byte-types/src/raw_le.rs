//! Types for working with raw little-endian data.

use crate::{BytesWrapper, FixedSize, Scalar};

/// A trait for scalars stored as little-endian bytes.
///
/// Every [`ScalarLE`] is also a [`Scalar`]; the two traits share the same raw
/// byte array type and differ only in the byte order of the mapping.
pub trait ScalarLE: Scalar {
    /// Create an instance of this type from raw little-endian bytes
    fn from_raw_le(raw: <Self as Scalar>::Raw) -> Self;

    /// Encode this type as raw little-endian bytes
    fn to_raw_le(self) -> <Self as Scalar>::Raw;

    /// Attempt to read a scalar from a slice.
    ///
    /// This will always succeed if `slice.len() == Self::RAW_BYTE_LEN`, and will
    /// always return `None` otherwise.
    fn read_le(slice: &[u8]) -> Option<Self> {
        crate::raw::sealed::ByteArray::from_slice(slice).map(Self::from_raw_le)
    }
}

/// A wrapper around raw little-endian bytes for some type.
///
/// See [`crate::BigEndian`] for this type's big-endian counterpart.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(transparent)]
pub struct LittleEndian<T: ScalarLE>(pub(crate) T::Raw);

// # SAFETY:
//
// `LittleEndian<T>` has the bound `T: Scalar`, and contains only a single value,
// `<T as Scalar>::Raw` which is only ever a byte array.
#[cfg(feature = "bytemuck")]
unsafe impl<T> bytemuck::Zeroable for LittleEndian<T> where T: ScalarLE + Copy {}
#[cfg(feature = "bytemuck")]
unsafe impl<T> bytemuck::AnyBitPattern for LittleEndian<T> where T: ScalarLE + Copy + 'static {}

impl<T: ScalarLE> BytesWrapper for LittleEndian<T> {
    type Inner = T;

    /// Attempt to construct a new raw value from this slice.
    ///
    /// This will fail if `slice.len() != T::RAW_BYTE_LEN`.
    fn from_slice(slice: &[u8]) -> Option<Self> {
        crate::raw::sealed::ByteArray::from_slice(slice).map(Self)
    }

    /// Convert this raw type to its native representation.
    #[inline(always)]
    fn get(&self) -> T {
        T::from_raw_le(self.0)
    }

    /// Set the value, overwriting the bytes.
    fn set(&mut self, value: T) {
        self.0 = value.to_raw_le();
    }
}

impl<T: ScalarLE> LittleEndian<T> {
    /// construct a new `LittleEndian<T>` from raw bytes
    pub fn new(raw: T::Raw) -> LittleEndian<T> {
        LittleEndian(raw)
    }

    /// Get the raw little-endian bytes.
    pub fn le_bytes(&self) -> &[u8] {
        self.0.as_ref()
    }
}

impl<T: ScalarLE> From<T> for LittleEndian<T> {
    #[inline]
    fn from(val: T) -> Self {
        LittleEndian(val.to_raw_le())
    }
}

impl<T: ScalarLE + Default> Default for LittleEndian<T> {
    fn default() -> Self {
        Self::from(T::default())
    }
}

// NOTE: due to the orphan rules, we cannot impl the inverse of this, e.g.
// impl<T> PartialEq<LittleEndian<T>> for T (<https://doc.rust-lang.org/error_codes/E0210.html>)
impl<T: ScalarLE + Copy + PartialEq> PartialEq<T> for LittleEndian<T> {
    fn eq(&self, other: &T) -> bool {
        self.get() == *other
    }
}

impl<T: ScalarLE + Copy + PartialOrd + PartialEq> PartialOrd for LittleEndian<T>
where
    <T as Scalar>::Raw: PartialEq,
{
    fn partial_cmp(&self, other: &Self) -> Option<core::cmp::Ordering> {
        self.get().partial_cmp(&other.get())
    }
}

impl<T: ScalarLE + Copy + Ord + Eq> Ord for LittleEndian<T>
where
    <T as Scalar>::Raw: Eq,
{
    fn cmp(&self, other: &Self) -> core::cmp::Ordering {
        self.get().cmp(&other.get())
    }
}

impl<T: FixedSize + ScalarLE> FixedSize for LittleEndian<T> {
    const RAW_BYTE_LEN: usize = T::RAW_BYTE_LEN;
}

impl<T: ScalarLE + Copy + std::fmt::Debug> std::fmt::Debug for LittleEndian<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.get().fmt(f)
    }
}

macro_rules! int_scalar_le {
    ($($ty:ty),* $(,)?) => {
        $(
            impl crate::raw_le::ScalarLE for $ty {
                fn to_raw_le(self) -> Self::Raw {
                    self.to_le_bytes()
                }

                #[inline(always)]
                fn from_raw_le(raw: Self::Raw) -> $ty {
                    Self::from_le_bytes(raw)
                }
            }
        )*
    };
}

int_scalar_le!(u8, i8, u16, i16, u32, i32, u64, i64, usize, isize, f32, f64);
