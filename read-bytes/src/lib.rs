//! Safe, declarative reading of untrusted binary data.
//!
//! The entry point is a [`Cursor`]: a bounded, non-owning view over an
//! immutable byte region, obtained through a [`ByteSource`] or a
//! [`ByteData`] and passed by exclusive borrow into parsing primitives.
//! Primitives either return a value, advancing the cursor past the bytes
//! they consumed, or a [`ParseError`] carrying the kind of fault and the
//! offending byte offset. All offset and size arithmetic goes through the
//! overflow-checked [`algebra`] operations, so hostile lengths and counts
//! fault instead of wrapping.
//!
//! ```
//! use read_bytes::{ByteSource, ParseError};
//!
//! let data = [0x00u8, 0x02, 0x00, 0x01, 0x00, 0x02];
//! let sum = data.with_cursor(|cursor| {
//!     let count = cursor.read_be::<u16>()?;
//!     let mut sum = 0u32;
//!     for _ in 0..count {
//!         sum += u32::from(cursor.read_be::<u16>()?);
//!     }
//!     Ok(sum)
//! })?;
//! assert_eq!(sum, 3);
//! # Ok::<(), ParseError>(())
//! ```

#![deny(rustdoc::broken_intra_doc_links)]
#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(any(feature = "std", test))]
#[macro_use]
extern crate std;

#[cfg(all(not(feature = "std"), not(test)))]
#[macro_use]
extern crate core as std;

pub mod algebra;
mod array;
mod byte_data;
mod int;
mod range;
mod read;
mod source;
#[cfg(feature = "std")]
mod strings;

pub use algebra::{checked_cast, try_cast, CheckedInt, OptArith, TryArith, TryIndex};
pub use byte_data::{ByteData, Cursor};
pub use range::ByteRange;
pub use read::{ErrorKind, Parse, ParseError, RawEnum};
pub use source::ByteSource;

/// Public re-export of the byte-types crate.
pub use byte_types as types;
