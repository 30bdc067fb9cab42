/// The byte order of a multi-byte scalar in a stream.
///
/// Endianness is orthogonal to width and signedness; single-byte values have
/// no byte order and decode identically under either tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Endian {
    /// Most significant byte first.
    Big,
    /// Least significant byte first.
    Little,
}

impl Endian {
    /// The byte order of the host platform.
    pub const NATIVE: Endian = if cfg!(target_endian = "big") {
        Endian::Big
    } else {
        Endian::Little
    };

    /// `true` if this is the host platform's byte order.
    pub const fn is_native(self) -> bool {
        matches!(
            (self, Endian::NATIVE),
            (Endian::Big, Endian::Big) | (Endian::Little, Endian::Little)
        )
    }

    /// The opposite byte order.
    pub const fn swapped(self) -> Endian {
        match self {
            Endian::Big => Endian::Little,
            Endian::Little => Endian::Big,
        }
    }
}
