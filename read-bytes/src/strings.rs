//! String parsers: UTF-8 and UTF-16 with repair.
//!
//! Unlike [`Cursor::take_utf8`], which faults on malformed input, these
//! parsers repair invalid sequences to U+FFFD the way lossy decoding
//! conventionally does; the fallible part of their contracts is about byte
//! counts and terminators, not encoding validity.

use std::string::String;

use crate::algebra::OptArith;
use crate::byte_data::Cursor;
use crate::read::ParseError;

impl<'a> Cursor<'a> {
    /// Decode all remaining bytes as UTF-8, advancing the cursor to empty.
    ///
    /// Never fails; invalid sequences are repaired.
    pub fn read_utf8_remaining(&mut self) -> String {
        let bytes = self.take_rest();
        String::from_utf8_lossy(bytes).into_owned()
    }

    /// Decode exactly `byte_count` bytes as UTF-8.
    pub fn read_utf8(&mut self, byte_count: usize) -> Result<String, ParseError> {
        let bytes = self.take_slice(byte_count)?;
        Ok(String::from_utf8_lossy(bytes).into_owned())
    }

    /// Decode a NUL-terminated UTF-8 string.
    ///
    /// The prefix before the first `0x00` in the readable region is decoded
    /// (with repair) and the terminator is consumed; bytes after it remain
    /// readable. Fails with an invalid-value fault if no terminator is
    /// present, leaving the cursor unchanged.
    pub fn read_utf8_nul_terminated(&mut self) -> Result<String, ParseError> {
        let bytes = self.as_bytes();
        let nul = bytes
            .iter()
            .position(|&byte| byte == 0)
            .ok_or(ParseError::invalid_value(self.position()))?;
        let value = String::from_utf8_lossy(&bytes[..nul]).into_owned();
        self.bump(nul.saturating_add(1));
        Ok(value)
    }

    /// Decode all remaining bytes as UTF-16 in the platform's byte order,
    /// advancing the cursor to empty.
    ///
    /// Fails with an invalid-value fault if an odd number of bytes remain;
    /// unpaired surrogates are repaired.
    pub fn read_utf16_remaining(&mut self) -> Result<String, ParseError> {
        if self.remaining() % 2 != 0 {
            return Err(ParseError::invalid_value(self.position()));
        }
        let bytes = self.take_rest();
        Ok(decode_utf16_units(bytes))
    }

    /// Decode exactly `code_units` 16-bit code units as UTF-16 in the
    /// platform's byte order.
    ///
    /// Fails with an invalid-value fault if the byte count `code_units * 2`
    /// overflows.
    pub fn read_utf16(&mut self, code_units: usize) -> Result<String, ParseError> {
        let byte_count = code_units
            .opt_mul(2usize)
            .ok_or(ParseError::invalid_value(self.position()))?;
        let bytes = self.take_slice(byte_count)?;
        Ok(decode_utf16_units(bytes))
    }
}

fn decode_utf16_units(bytes: &[u8]) -> String {
    let units = bytes
        .chunks_exact(2)
        .map(|pair| u16::from_ne_bytes([pair[0], pair[1]]));
    char::decode_utf16(units)
        .map(|unit| unit.unwrap_or(char::REPLACEMENT_CHARACTER))
        .collect()
}
