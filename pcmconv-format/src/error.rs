use core::fmt::{self, Display};

use crate::description::{BitWidth, Endian, NumberKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatError {
    /// The triple is well formed but is not one of the catalogued formats,
    /// eg. a 16 bit float.
    InvalidFormat {
        number: NumberKind,
        bitwidth: BitWidth,
        endian: Endian,
    },
    InvalidBitwidth(usize),
    UnparsableFormat,
}

impl Display for FormatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormatError::InvalidFormat { number, bitwidth, endian } => {
                write!(f, "unsupported format: {bitwidth} bit {number} ({endian} endian)")
            }
            FormatError::InvalidBitwidth(bits) => {
                write!(f, "unsupported bit width: {bits}")
            }
            FormatError::UnparsableFormat => {
                write!(f, "unparsable format, expected eg. s16le, u8be or f32ne")
            }
        }
    }
}

impl core::error::Error for FormatError {}
