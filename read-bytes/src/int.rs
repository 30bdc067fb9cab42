//! Integer decoding: fixed-width, variable-width, and converting loads.

#![deny(clippy::arithmetic_side_effects)]

use byte_types::{extension_byte, Endian, FixedSize, Int, Scalar, ScalarLE};

use crate::algebra::OptArith;
use crate::byte_data::Cursor;
use crate::read::{ParseError, RawEnum};

impl<'a> Cursor<'a> {
    /// Read a big-endian scalar and advance the cursor.
    ///
    /// Fails with an insufficient-data fault at the current position when
    /// fewer than `T::RAW_BYTE_LEN` bytes remain; the cursor is unchanged on
    /// failure.
    pub fn read_be<T: Scalar>(&mut self) -> Result<T, ParseError> {
        let bytes = self.peek(T::RAW_BYTE_LEN)?;
        let value = T::read(bytes).ok_or(ParseError::insufficient_data(self.position()))?;
        self.bump(T::RAW_BYTE_LEN);
        Ok(value)
    }

    /// Read a little-endian scalar and advance the cursor.
    pub fn read_le<T: ScalarLE>(&mut self) -> Result<T, ParseError> {
        let bytes = self.peek(T::RAW_BYTE_LEN)?;
        let value = T::read_le(bytes).ok_or(ParseError::insufficient_data(self.position()))?;
        self.bump(T::RAW_BYTE_LEN);
        Ok(value)
    }

    /// Read a scalar in the given byte order and advance the cursor.
    pub fn read_endian<T: Scalar + ScalarLE>(&mut self, endian: Endian) -> Result<T, ParseError> {
        match endian {
            Endian::Big => self.read_be(),
            Endian::Little => self.read_le(),
        }
    }

    /// Read a single byte and advance the cursor.
    pub fn read_byte(&mut self) -> Result<u8, ParseError> {
        self.read_be()
    }

    /// Read a big-endian integer stored in `byte_count` bytes.
    ///
    /// See [`read_var_endian`](Self::read_var_endian) for the contract.
    pub fn read_var_be<T: Int>(&mut self, byte_count: usize) -> Result<T, ParseError> {
        self.read_var_endian(byte_count, Endian::Big)
    }

    /// Read a little-endian integer stored in `byte_count` bytes.
    ///
    /// See [`read_var_endian`](Self::read_var_endian) for the contract.
    pub fn read_var_le<T: Int>(&mut self, byte_count: usize) -> Result<T, ParseError> {
        self.read_var_endian(byte_count, Endian::Little)
    }

    /// Read a `T` stored in `byte_count` bytes of the given byte order.
    ///
    /// A window narrower than `T` is widened with two's-complement sign
    /// extension for signed types and zero extension otherwise. A wider
    /// window is a padded load: `T` occupies the significant end of the
    /// window (the low end for little-endian, the high end for big-endian)
    /// and every remaining byte must equal the extension byte of the stored
    /// value. This accepts exactly the canonical `byte_count`-byte encoding
    /// of any value representable in `T`.
    ///
    /// Fails with an invalid-value fault at the current position when
    /// `byte_count` is zero, or at the first deviating padding byte; the
    /// cursor is unchanged on failure.
    pub fn read_var_endian<T: Int>(
        &mut self,
        byte_count: usize,
        endian: Endian,
    ) -> Result<T, ParseError> {
        if byte_count == 0 {
            return Err(ParseError::invalid_value(self.position()));
        }
        let bytes = self.peek(byte_count)?;
        let value = if byte_count <= T::RAW_BYTE_LEN {
            match endian {
                Endian::Big => T::extend_be(bytes),
                Endian::Little => T::extend_le(bytes),
            }
            .ok_or(ParseError::invalid_value(self.position()))?
        } else {
            decode_padded::<T>(bytes, endian, self.position())?
        };
        self.bump(byte_count);
        Ok(value)
    }

    /// Read a big-endian storage type `S`, then convert losslessly to `D`.
    ///
    /// The conversion preserves the decoded value exactly; a value of `S`
    /// not representable in `D` is an invalid-value fault at the field
    /// start, and the cursor is unchanged.
    pub fn read_as_be<S, D>(&mut self) -> Result<D, ParseError>
    where
        S: Scalar,
        D: TryFrom<S>,
    {
        let base = self.position();
        let bytes = self.peek(S::RAW_BYTE_LEN)?;
        let stored = S::read(bytes).ok_or(ParseError::insufficient_data(base))?;
        let value = D::try_from(stored).map_err(|_| ParseError::invalid_value(base))?;
        self.bump(S::RAW_BYTE_LEN);
        Ok(value)
    }

    /// Little-endian form of [`read_as_be`](Self::read_as_be).
    pub fn read_as_le<S, D>(&mut self) -> Result<D, ParseError>
    where
        S: ScalarLE,
        D: TryFrom<S>,
    {
        let base = self.position();
        let bytes = self.peek(S::RAW_BYTE_LEN)?;
        let stored = S::read_le(bytes).ok_or(ParseError::insufficient_data(base))?;
        let value = D::try_from(stored).map_err(|_| ParseError::invalid_value(base))?;
        self.bump(S::RAW_BYTE_LEN);
        Ok(value)
    }

    /// Byte-order-parametric form of [`read_as_be`](Self::read_as_be).
    pub fn read_as_endian<S, D>(&mut self, endian: Endian) -> Result<D, ParseError>
    where
        S: Scalar + ScalarLE,
        D: TryFrom<S>,
    {
        match endian {
            Endian::Big => self.read_as_be::<S, D>(),
            Endian::Little => self.read_as_le::<S, D>(),
        }
    }

    /// Read an enumeration by its big-endian integer backing.
    ///
    /// A backing value outside the accepted set is an invalid-value fault at
    /// the field start, and the cursor is unchanged.
    pub fn read_enum_be<E: RawEnum>(&mut self) -> Result<E, ParseError> {
        let base = self.position();
        let bytes = self.peek(<E::Raw as FixedSize>::RAW_BYTE_LEN)?;
        let raw =
            <E::Raw as Scalar>::read(bytes).ok_or(ParseError::insufficient_data(base))?;
        let value = E::from_raw(raw).ok_or(ParseError::invalid_value(base))?;
        self.bump(<E::Raw as FixedSize>::RAW_BYTE_LEN);
        Ok(value)
    }

    /// Read an enumeration by its little-endian integer backing.
    pub fn read_enum_le<E: RawEnum>(&mut self) -> Result<E, ParseError> {
        let base = self.position();
        let bytes = self.peek(<E::Raw as FixedSize>::RAW_BYTE_LEN)?;
        let raw =
            <E::Raw as ScalarLE>::read_le(bytes).ok_or(ParseError::insufficient_data(base))?;
        let value = E::from_raw(raw).ok_or(ParseError::invalid_value(base))?;
        self.bump(<E::Raw as FixedSize>::RAW_BYTE_LEN);
        Ok(value)
    }

    /// Byte-order-parametric form of [`read_enum_be`](Self::read_enum_be).
    pub fn read_enum_endian<E: RawEnum>(&mut self, endian: Endian) -> Result<E, ParseError> {
        match endian {
            Endian::Big => self.read_enum_be(),
            Endian::Little => self.read_enum_le(),
        }
    }
}

/// Decode `T` from a window wider than its natural size, validating that the
/// extra bytes carry the canonical sign extension of the stored value.
fn decode_padded<T: Int>(bytes: &[u8], endian: Endian, base: usize) -> Result<T, ParseError> {
    let width = T::RAW_BYTE_LEN;
    let Some(pad_len) = bytes.len().checked_sub(width) else {
        return Err(ParseError::invalid_value(base));
    };
    // the significant window sits at the big end for BE, the low end for LE
    let (padding, window, pad_offset) = match endian {
        Endian::Big => (&bytes[..pad_len], &bytes[pad_len..], 0usize),
        Endian::Little => (&bytes[width..], &bytes[..width], width),
    };
    let top = match endian {
        Endian::Big => window.first(),
        Endian::Little => window.last(),
    };
    let fill = extension_byte(T::SIGNED, top.copied().unwrap_or_default());
    if let Some(bad) = padding.iter().position(|&byte| byte != fill) {
        let location = base.checked_add(pad_offset).opt_add(bad);
        return Err(ParseError::invalid_value(location));
    }
    let value = match endian {
        Endian::Big => T::extend_be(window),
        Endian::Little => T::extend_le(window),
    };
    value.ok_or(ParseError::invalid_value(base))
}

macro_rules! sized_read_fns {
    ($($be:ident, $le:ident: $ty:ty;)*) => {
        /// Width-specialized spellings of the generic loads.
        impl<'a> Cursor<'a> {
            $(
                #[doc = concat!("Read a big-endian `", stringify!($ty), "` and advance the cursor.")]
                pub fn $be(&mut self) -> Result<$ty, ParseError> {
                    self.read_be()
                }

                #[doc = concat!("Read a little-endian `", stringify!($ty), "` and advance the cursor.")]
                pub fn $le(&mut self) -> Result<$ty, ParseError> {
                    self.read_le()
                }
            )*

            /// Read a `u8` and advance the cursor.
            pub fn read_u8(&mut self) -> Result<u8, ParseError> {
                self.read_be()
            }

            /// Read an `i8` and advance the cursor.
            pub fn read_i8(&mut self) -> Result<i8, ParseError> {
                self.read_be()
            }
        }
    };
}

sized_read_fns! {
    read_u16_be, read_u16_le: u16;
    read_i16_be, read_i16_le: i16;
    read_u32_be, read_u32_le: u32;
    read_i32_be, read_i32_le: i32;
    read_u64_be, read_u64_le: u64;
    read_i64_be, read_i64_le: i64;
    read_usize_be, read_usize_le: usize;
    read_isize_be, read_isize_le: isize;
}
