//! Raw scalar types: unaligned big-endian bytes.

pub(crate) mod sealed {
    /// A fixed-size byte array.
    ///
    /// This is always `[u8; N]`; the trait exists so that generic code can
    /// name the length and construct arrays without exposing the raw
    /// representation as public API.
    pub trait ByteArray: AsRef<[u8]> + AsMut<[u8]> + Copy {
        /// The number of bytes in the array.
        const LEN: usize;

        /// Attempt to construct an array from a slice of exactly `LEN` bytes.
        fn from_slice(slice: &[u8]) -> Option<Self>;

        /// An array with every byte set to `fill`.
        fn filled(fill: u8) -> Self;
    }

    impl<const N: usize> ByteArray for [u8; N] {
        const LEN: usize = N;

        fn from_slice(slice: &[u8]) -> Option<Self> {
            slice.try_into().ok()
        }

        fn filled(fill: u8) -> Self {
            [fill; N]
        }
    }
}

/// A trait for scalars stored as big-endian bytes.
///
/// This describes the mapping between a native value and its raw bytes in
/// the stream. See [`ScalarLE`](crate::ScalarLE) for this trait's
/// little-endian counterpart.
pub trait Scalar: FixedSize {
    /// The raw byte representation of this type, always a `[u8; N]`.
    type Raw: sealed::ByteArray;

    /// Encode this type as raw big-endian bytes.
    fn to_raw(self) -> Self::Raw;

    /// Create an instance of this type from raw big-endian bytes.
    fn from_raw(raw: Self::Raw) -> Self;

    /// Attempt to read a scalar from a slice.
    ///
    /// This will always succeed if `slice.len() == Self::RAW_BYTE_LEN`, and
    /// will always return `None` otherwise.
    fn read(slice: &[u8]) -> Option<Self> {
        sealed::ByteArray::from_slice(slice).map(Self::from_raw)
    }
}

/// A type with a known, constant size in the stream.
pub trait FixedSize: Sized {
    /// The number of bytes occupied by this type in the stream.
    const RAW_BYTE_LEN: usize;
}

/// A transparent wrapper around the raw bytes of some scalar.
pub trait BytesWrapper: Sized {
    /// The native type this wrapper stores.
    type Inner;

    /// Attempt to construct a new raw value from this slice.
    ///
    /// This will fail if `slice.len() != Self::Inner::RAW_BYTE_LEN`.
    fn from_slice(slice: &[u8]) -> Option<Self>;

    /// Convert this raw type to its native representation.
    fn get(&self) -> Self::Inner;

    /// Set the value, overwriting the bytes.
    fn set(&mut self, value: Self::Inner);
}

/// A wrapper around raw big-endian bytes for some type.
///
/// The wrapper has no alignment requirement, so a byte region can be viewed
/// as a slice of these without copying. See [`LittleEndian`](crate::LittleEndian)
/// for this type's little-endian counterpart.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(transparent)]
pub struct BigEndian<T: Scalar>(pub(crate) T::Raw);

// # SAFETY:
//
// `BigEndian<T>` has the bound `T: Scalar`, and contains only a single value,
// `<T as Scalar>::Raw` which is only ever a byte array.
#[cfg(feature = "bytemuck")]
unsafe impl<T> bytemuck::Zeroable for BigEndian<T> where T: Scalar + Copy {}
#[cfg(feature = "bytemuck")]
unsafe impl<T> bytemuck::AnyBitPattern for BigEndian<T> where T: Scalar + Copy + 'static {}

impl<T: Scalar> BytesWrapper for BigEndian<T> {
    type Inner = T;

    fn from_slice(slice: &[u8]) -> Option<Self> {
        sealed::ByteArray::from_slice(slice).map(Self)
    }

    #[inline(always)]
    fn get(&self) -> T {
        T::from_raw(self.0)
    }

    fn set(&mut self, value: T) {
        self.0 = value.to_raw();
    }
}

impl<T: Scalar> BigEndian<T> {
    /// construct a new `BigEndian<T>` from raw bytes
    pub fn new(raw: T::Raw) -> BigEndian<T> {
        BigEndian(raw)
    }

    /// Get the raw big-endian bytes.
    pub fn be_bytes(&self) -> &[u8] {
        self.0.as_ref()
    }
}

impl<T: Scalar> From<T> for BigEndian<T> {
    #[inline]
    fn from(val: T) -> Self {
        BigEndian(val.to_raw())
    }
}

impl<T: Scalar + Default> Default for BigEndian<T> {
    fn default() -> Self {
        Self::from(T::default())
    }
}

// NOTE: due to the orphan rules, we cannot impl the inverse of this, e.g.
// impl<T> PartialEq<BigEndian<T>> for T (<https://doc.rust-lang.org/error_codes/E0210.html>)
impl<T: Scalar + Copy + PartialEq> PartialEq<T> for BigEndian<T> {
    fn eq(&self, other: &T) -> bool {
        self.get() == *other
    }
}

impl<T: Scalar + Copy + PartialOrd + PartialEq> PartialOrd for BigEndian<T>
where
    <T as Scalar>::Raw: PartialEq,
{
    fn partial_cmp(&self, other: &Self) -> Option<core::cmp::Ordering> {
        self.get().partial_cmp(&other.get())
    }
}

impl<T: Scalar + Copy + Ord + Eq> Ord for BigEndian<T>
where
    <T as Scalar>::Raw: Eq,
{
    fn cmp(&self, other: &Self) -> core::cmp::Ordering {
        self.get().cmp(&other.get())
    }
}

impl<T: FixedSize + Scalar> FixedSize for BigEndian<T> {
    const RAW_BYTE_LEN: usize = T::RAW_BYTE_LEN;
}

impl<T: Scalar + Copy + std::fmt::Debug> std::fmt::Debug for BigEndian<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.get().fmt(f)
    }
}

macro_rules! int_scalar {
    ($($ty:ty),* $(,)?) => {
        $(
            impl crate::raw::FixedSize for $ty {
                const RAW_BYTE_LEN: usize = std::mem::size_of::<$ty>();
            }

            impl crate::raw::Scalar for $ty {
                type Raw = [u8; std::mem::size_of::<$ty>()];

                fn to_raw(self) -> Self::Raw {
                    self.to_be_bytes()
                }

                #[inline(always)]
                fn from_raw(raw: Self::Raw) -> $ty {
                    Self::from_be_bytes(raw)
                }
            }
        )*
    };
}

int_scalar!(u8, i8, u16, i16, u32, i32, u64, i64, usize, isize, f32, f64);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trip_be() {
        assert_eq!(u32::from_raw(0xDEAD_BEEFu32.to_raw()), 0xDEAD_BEEF);
        assert_eq!(i16::to_raw(-2), [0xFF, 0xFE]);
        assert_eq!(i16::from_raw([0xFF, 0xFE]), -2);
    }

    #[test]
    fn read_requires_exact_len() {
        assert_eq!(u16::read(&[0x00, 0x01]), Some(1));
        assert!(u16::read(&[0x00]).is_none());
        assert!(u16::read(&[0x00, 0x01, 0x02]).is_none());
    }

    #[test]
    fn wrapper_get_set() {
        let mut be = BigEndian::from(0x0102u16);
        assert_eq!(be.be_bytes(), &[0x01, 0x02]);
        assert_eq!(be.get(), 0x0102);
        be.set(0xFFFE);
        assert_eq!(be.be_bytes(), &[0xFF, 0xFE]);
        assert!(be == 0xFFFEu16);
    }

    #[test]
    fn wrapper_from_slice() {
        let be = BigEndian::<u32>::from_slice(&[0, 0, 0, 7]).unwrap();
        assert_eq!(be.get(), 7);
        assert!(BigEndian::<u32>::from_slice(&[0, 0, 7]).is_none());
    }
}
