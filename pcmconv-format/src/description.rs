use core::fmt;

use derive_more::Display;

use crate::error::FormatError;

/// How the bits of one sample are interpreted.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NumberKind {
    SignedInteger,
    UnsignedInteger,
    FloatingPoint,
}

impl NumberKind {
    pub const fn is_integer(self) -> bool {
        !matches!(self, NumberKind::FloatingPoint)
    }

    pub const fn is_signed(self) -> bool {
        !matches!(self, NumberKind::UnsignedInteger)
    }

    /// Leading character of the textual format grammar.
    pub const fn code(self) -> char {
        match self {
            NumberKind::SignedInteger => 's',
            NumberKind::UnsignedInteger => 'u',
            NumberKind::FloatingPoint => 'f',
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum BitWidth {
    B8 = 8,
    B16 = 16,
    B24 = 24,
    B32 = 32,
    B64 = 64,
}

impl BitWidth {
    pub const fn bits(self) -> usize {
        self as usize
    }

    pub const fn bytes(self) -> usize {
        self.bits() / 8
    }

    pub fn from_bits(bits: usize) -> Result<Self, FormatError> {
        match bits {
            8 => Ok(BitWidth::B8),
            16 => Ok(BitWidth::B16),
            24 => Ok(BitWidth::B24),
            32 => Ok(BitWidth::B32),
            64 => Ok(BitWidth::B64),
            _ => Err(FormatError::InvalidBitwidth(bits)),
        }
    }
}

impl fmt::Display for BitWidth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.bits())
    }
}

impl TryFrom<usize> for BitWidth {
    type Error = FormatError;

    fn try_from(bits: usize) -> Result<Self, FormatError> {
        BitWidth::from_bits(bits)
    }
}

/// Byte order of one sample. There is no stored "native" order, use
/// [`Endian::NATIVE`] to pick whichever of the two matches this host.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endian {
    Big,
    Little,
}

impl Endian {
    #[cfg(target_endian = "little")]
    pub const NATIVE: Endian = Endian::Little;

    #[cfg(target_endian = "big")]
    pub const NATIVE: Endian = Endian::Big;

    pub const fn code(self) -> &'static str {
        match self {
            Endian::Big => "be",
            Endian::Little => "le",
        }
    }
}
