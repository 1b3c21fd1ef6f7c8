use core::fmt::{self, Display};
use core::hash::{Hash, Hasher};
use core::str::FromStr;

use crate::description::{BitWidth, Endian, NumberKind};
use crate::error::FormatError;
use crate::tag::Format;
use crate::CATALOGUE;

/// A format chosen at run time, eg. from a file header or the command line.
///
/// Always one of the catalogued formats. Equality and hashing only look at
/// the catalogue index.
#[derive(Debug, Clone, Copy)]
pub struct RuntimeFormat {
    number: NumberKind,
    bitwidth: BitWidth,
    endian: Endian,
    index: u8,
}

impl RuntimeFormat {
    pub(crate) const fn from_parts(
        number: NumberKind,
        bitwidth: BitWidth,
        endian: Endian,
        index: u8,
    ) -> Self {
        RuntimeFormat { number, bitwidth, endian, index }
    }

    pub fn new(number: NumberKind, bitwidth: BitWidth, endian: Endian) -> Result<Self, FormatError> {
        CATALOGUE.iter()
            .find(|format| {
                format.number == number
                    && format.bitwidth == bitwidth
                    && format.endian == endian
            })
            .copied()
            .ok_or(FormatError::InvalidFormat { number, bitwidth, endian })
    }

    pub fn with_bits(number: NumberKind, bits: usize, endian: Endian) -> Result<Self, FormatError> {
        RuntimeFormat::new(number, BitWidth::from_bits(bits)?, endian)
    }

    /// Format in host byte order
    pub fn native(number: NumberKind, bitwidth: BitWidth) -> Result<Self, FormatError> {
        RuntimeFormat::new(number, bitwidth, Endian::NATIVE)
    }

    /// Parses `[fsu][0-9]{1,2}(le|be|ne)`, eg. `s16le` or `f32ne`.
    /// `ne` resolves to the host byte order here, it is not stored.
    pub fn parse(text: &str) -> Result<Self, FormatError> {
        let mut chars = text.chars();

        let number = match chars.next() {
            Some('s') => NumberKind::SignedInteger,
            Some('u') => NumberKind::UnsignedInteger,
            Some('f') => NumberKind::FloatingPoint,
            _ => return Err(FormatError::UnparsableFormat),
        };

        let rest = chars.as_str();
        let split = rest.len().checked_sub(2).ok_or(FormatError::UnparsableFormat)?;
        if !rest.is_char_boundary(split) {
            return Err(FormatError::UnparsableFormat);
        }
        let (digits, suffix) = rest.split_at(split);

        if digits.is_empty() || digits.len() > 2 || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(FormatError::UnparsableFormat);
        }

        let endian = match suffix {
            "le" => Endian::Little,
            "be" => Endian::Big,
            "ne" => Endian::NATIVE,
            _ => return Err(FormatError::UnparsableFormat),
        };

        let bits = digits.parse().map_err(|_| FormatError::UnparsableFormat)?;

        RuntimeFormat::with_bits(number, bits, endian)
            .map_err(|_| FormatError::UnparsableFormat)
    }
}

impl Format for RuntimeFormat {
    fn number(&self) -> NumberKind {
        self.number
    }

    fn bitwidth(&self) -> BitWidth {
        self.bitwidth
    }

    fn endian(&self) -> Endian {
        self.endian
    }

    fn index(&self) -> usize {
        usize::from(self.index)
    }

    fn to_runtime(&self) -> RuntimeFormat {
        *self
    }
}

impl PartialEq for RuntimeFormat {
    fn eq(&self, other: &Self) -> bool {
        self.index == other.index
    }
}

impl Eq for RuntimeFormat {}

impl Hash for RuntimeFormat {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.index.hash(state)
    }
}

impl Display for RuntimeFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.number.code(), self.bitwidth, self.endian.code())
    }
}

impl FromStr for RuntimeFormat {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self, FormatError> {
        RuntimeFormat::parse(s)
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use std::string::ToString;

    use super::*;
    use crate::catalogue;

    #[test]
    fn parse_matches_new() {
        let parsed = RuntimeFormat::parse("s16le").unwrap();
        let built = RuntimeFormat::new(NumberKind::SignedInteger, BitWidth::B16, Endian::Little).unwrap();
        assert_eq!(parsed, built);
        assert_eq!(parsed.index(), 3);
    }

    #[test]
    fn parse_native_suffix() {
        let parsed = RuntimeFormat::parse("f32ne").unwrap();
        assert_eq!(parsed.endian(), Endian::NATIVE);
        assert_eq!(parsed.number(), NumberKind::FloatingPoint);
    }

    #[test]
    fn parse_rejects_garbage() {
        for text in ["", "s", "s16", "x16le", "s16xe", "s016le", "s1le", "s 16le", "S16LE", "s16lé", "16le"] {
            assert_eq!(RuntimeFormat::parse(text), Err(FormatError::UnparsableFormat), "{text:?}");
        }
    }

    #[test]
    fn parse_rejects_uncatalogued() {
        assert_eq!(RuntimeFormat::parse("f16le"), Err(FormatError::UnparsableFormat));
        assert_eq!(RuntimeFormat::parse("f8be"), Err(FormatError::UnparsableFormat));
        assert_eq!(RuntimeFormat::parse("s12le"), Err(FormatError::UnparsableFormat));
    }

    #[test]
    fn display_round_trips_through_parse() {
        for format in catalogue() {
            let text = format.to_string();
            assert_eq!(RuntimeFormat::parse(&text), Ok(format));
        }
        assert_eq!(crate::CATALOGUE[14].to_string(), "u24be");
    }

    #[test]
    fn new_rejects_half_float() {
        assert_eq!(
            RuntimeFormat::new(NumberKind::FloatingPoint, BitWidth::B16, Endian::Little),
            Err(FormatError::InvalidFormat {
                number: NumberKind::FloatingPoint,
                bitwidth: BitWidth::B16,
                endian: Endian::Little,
            }),
        );
    }

    #[test]
    fn with_bits_rejects_odd_widths() {
        assert_eq!(
            RuntimeFormat::with_bits(NumberKind::SignedInteger, 20, Endian::Big),
            Err(FormatError::InvalidBitwidth(20)),
        );
        assert!(RuntimeFormat::with_bits(NumberKind::UnsignedInteger, 24, Endian::Big).is_ok());
    }

    #[test]
    fn native_picks_host_order() {
        let format = RuntimeFormat::native(NumberKind::SignedInteger, BitWidth::B32).unwrap();
        assert_eq!(format.endian(), Endian::NATIVE);
    }
}
