//! Traits and errors for interpreting binary data

#![deny(clippy::arithmetic_side_effects)]

use crate::byte_data::{ByteData, Cursor};

/// A type that can be read from a cursor over raw bytes.
///
/// Implementations are responsible for validating their own structure: any
/// lengths, counts, or offsets decoded from the stream must be checked
/// before they are used, which in practice means computing them with the
/// [`algebra`](crate::algebra) operations and reading through the cursor's
/// checked primitives.
pub trait Parse<'a>: Sized {
    /// Read an instance of `Self`, advancing `cursor` past the consumed bytes.
    ///
    /// On failure the cursor is left wherever the failing primitive left it;
    /// callers that need all-or-nothing behavior wrap the call in
    /// [`Cursor::atomically`].
    fn parse(cursor: &mut Cursor<'a>) -> Result<Self, ParseError>;

    /// Parse an instance of `Self` from an entire region of bytes.
    fn from_bytes(data: impl Into<ByteData<'a>>) -> Result<Self, ParseError> {
        data.into().with_cursor(|cursor| Self::parse(cursor))
    }
}

/// A type whose wire form is a fixed-width integer, validated against a
/// finite set of accepted values.
///
/// Decoding reads the backing integer and then checks membership; a value
/// outside the accepted set is an [`ErrorKind::InvalidValue`] fault. The
/// [`raw_enum!`](crate::raw_enum) macro implements this trait for a C-like
/// enum from its case list.
pub trait RawEnum: Sized {
    /// The integer type that carries this value in the stream.
    type Raw: byte_types::Int;

    /// Map a decoded backing value to a case, or `None` if no case matches.
    fn from_raw(raw: Self::Raw) -> Option<Self>;
}

/// Declare a C-like enum decodable from its fixed-width integer backing.
///
/// ```
/// read_bytes::raw_enum! {
///     /// A chunk type.
///     #[derive(Debug, Clone, Copy, PartialEq, Eq)]
///     pub enum ChunkKind: u8 {
///         Header = 0x01,
///         Payload = 0x02,
///         Trailer = 0xFF,
///     }
/// }
/// ```
#[macro_export]
macro_rules! raw_enum {
    (
        $(#[$attr:meta])*
        $vis:vis enum $name:ident: $raw:ty {
            $($(#[$variant_attr:meta])* $variant:ident = $value:literal),+ $(,)?
        }
    ) => {
        $(#[$attr])*
        #[repr($raw)]
        $vis enum $name {
            $($(#[$variant_attr])* $variant = $value),+
        }

        impl $crate::RawEnum for $name {
            type Raw = $raw;

            fn from_raw(raw: $raw) -> Option<Self> {
                match raw {
                    $($value => Some(Self::$variant),)+
                    _ => None,
                }
            }
        }
    };
}

/// What went wrong while reading binary data.
///
/// The taxonomy is deliberately coarse; the byte offset carried by
/// [`ParseError`] is usually the more useful diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// A read would cross the cursor's end offset.
    InsufficientData,
    /// A decoded or computed value violated a structural constraint.
    InvalidValue,
    /// A user-supplied callback or validation failed.
    UserError,
}

/// An error that occurs when reading binary data.
#[derive(Debug)]
pub struct ParseError {
    kind: ErrorKind,
    location: Option<usize>,
    #[cfg(feature = "std")]
    cause: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl ParseError {
    fn new(kind: ErrorKind, location: Option<usize>) -> Self {
        ParseError {
            kind,
            location,
            #[cfg(feature = "std")]
            cause: None,
        }
    }

    /// A read would have crossed the readable region's end.
    ///
    /// `location` is the offset the read started from.
    pub fn insufficient_data(location: usize) -> Self {
        Self::new(ErrorKind::InsufficientData, Some(location))
    }

    /// A decoded or computed value violated a structural constraint.
    ///
    /// `location` identifies the first offending byte when one exists;
    /// faults from pure arithmetic carry no location.
    pub fn invalid_value(location: impl Into<Option<usize>>) -> Self {
        Self::new(ErrorKind::InvalidValue, location.into())
    }

    /// A user-supplied callback or validation failed.
    pub fn user_error(location: impl Into<Option<usize>>) -> Self {
        Self::new(ErrorKind::UserError, location.into())
    }

    /// Attach an underlying cause to this error.
    #[cfg(feature = "std")]
    pub fn with_cause(mut self, cause: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.cause = Some(Box::new(cause));
        self
    }

    /// Which of the three fault kinds this is.
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// The offset of the first byte contributing to the failure, when that
    /// is unambiguous. Offsets are relative to the underlying region, not to
    /// any sub-cursor.
    pub fn location(&self) -> Option<usize> {
        self.location
    }

    /// The wrapped underlying error, if any.
    #[cfg(feature = "std")]
    pub fn cause(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.cause.as_deref().map(|cause| cause as _)
    }
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self.kind {
            ErrorKind::InsufficientData => write!(f, "A read crossed the end of the region")?,
            ErrorKind::InvalidValue => write!(f, "A value violated a structural constraint")?,
            ErrorKind::UserError => write!(f, "A user-supplied operation failed")?,
        }
        if let Some(location) = self.location {
            write!(f, " (at byte offset {location})")?;
        }
        Ok(())
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ParseError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.cause()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    crate::raw_enum! {
        #[derive(Debug, Clone, Copy, PartialEq, Eq)]
        pub enum Compression: u8 {
            None = 0,
            Deflate = 1,
        }
    }

    #[test]
    fn raw_enum_membership() {
        assert_eq!(Compression::from_raw(0), Some(Compression::None));
        assert_eq!(Compression::from_raw(1), Some(Compression::Deflate));
        assert_eq!(Compression::from_raw(2), None);
    }

    #[test]
    fn display_carries_location() {
        let err = ParseError::insufficient_data(12);
        assert_eq!(err.kind(), ErrorKind::InsufficientData);
        assert!(format!("{err}").contains("offset 12"));

        let err = ParseError::invalid_value(None);
        assert_eq!(err.location(), None);
        assert!(!format!("{err}").contains("offset"));
    }

    #[cfg(feature = "std")]
    #[test]
    fn cause_is_preserved() {
        let utf8_err = core::str::from_utf8(&[0x80]).unwrap_err();
        let err = ParseError::user_error(3).with_cause(utf8_err);
        assert_eq!(err.kind(), ErrorKind::UserError);
        assert!(err.cause().is_some());
    }
}
