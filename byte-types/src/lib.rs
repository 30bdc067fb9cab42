//! Common scalar data types used in binary streams.
//!
//! This crate knows nothing about cursors or parsing; it provides the
//! byte-level vocabulary that the `read-bytes` crate builds on: byte-order
//! tags, traits describing how a scalar maps to raw bytes in either byte
//! order, unaligned endian wrapper types, and the widening rules for loading
//! a fixed-width integer from a shorter byte window.

#![cfg_attr(docsrs, feature(doc_auto_cfg))]
#![deny(rustdoc::broken_intra_doc_links)]
#![warn(clippy::doc_markdown)]
#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(feature = "std")]
#[macro_use]
extern crate std;

#[cfg(not(feature = "std"))]
#[macro_use]
extern crate core as std;

mod endian;
mod int;
mod raw;
mod raw_le;

pub use endian::Endian;
pub use int::{extension_byte, Int};
pub use raw::{BigEndian, BytesWrapper, FixedSize, Scalar};
pub use raw_le::{LittleEndian, ScalarLE};
