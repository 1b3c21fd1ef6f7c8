use core::fmt::Debug;

use bytemuck::Pod;
use pcmconv_format::tag::{self, NativeEndian, Pcm};
use pcmconv_format::NumberKind;

use crate::marshal::Encoding;

/// A native numeric type that samples are converted to and from.
///
/// Bit level access goes through `u64`: `to_bits` zero extends the value's
/// own representation and `from_bits` keeps only the low `BITS` bits.
pub trait Sample: Pod + Default + PartialEq + PartialOrd + Debug + Send + Sync + 'static {
    const KIND: NumberKind;

    /// Storage width in bits
    const BITS: u32;

    /// Host byte order format whose staging type is `Self`
    type Native: Encoding<Staging = Self>;

    fn to_bits(self) -> u64;
    fn from_bits(bits: u64) -> Self;

    fn to_f64(self) -> f64;
    fn from_f64(value: f64) -> Self;

    fn to_f32(self) -> f32;
    fn from_f32(value: f32) -> Self;
}

macro_rules! integer_samples {
    ($($ty:ident($unsigned:ident, $number:ident, $width:ident)),* $(,)?) => {
        $(
            impl Sample for $ty {
                const KIND: NumberKind = <tag::$number as tag::Number>::KIND;
                const BITS: u32 = <$ty>::BITS;

                type Native = Pcm<tag::$number, tag::$width, NativeEndian>;

                fn to_bits(self) -> u64 {
                    self as $unsigned as u64
                }

                fn from_bits(bits: u64) -> Self {
                    bits as $ty
                }

                fn to_f64(self) -> f64 {
                    self as f64
                }

                fn from_f64(value: f64) -> Self {
                    value as $ty
                }

                fn to_f32(self) -> f32 {
                    self as f32
                }

                fn from_f32(value: f32) -> Self {
                    value as $ty
                }
            }
        )*
    };
}

integer_samples!(
    i8(u8, Signed, B8),
    i16(u16, Signed, B16),
    i32(u32, Signed, B32),
    i64(u64, Signed, B64),
    u8(u8, Unsigned, B8),
    u16(u16, Unsigned, B16),
    u32(u32, Unsigned, B32),
    u64(u64, Unsigned, B64),
);

macro_rules! float_samples {
    ($($ty:ident($width:ident)),* $(,)?) => {
        $(
            impl Sample for $ty {
                const KIND: NumberKind = NumberKind::FloatingPoint;
                const BITS: u32 = core::mem::size_of::<$ty>() as u32 * 8;

                type Native = Pcm<tag::Float, tag::$width, NativeEndian>;

                fn to_bits(self) -> u64 {
                    u64::from(<$ty>::to_bits(self))
                }

                fn from_bits(bits: u64) -> Self {
                    <$ty>::from_bits(bits as _)
                }

                fn to_f64(self) -> f64 {
                    self as f64
                }

                fn from_f64(value: f64) -> Self {
                    value as $ty
                }

                fn to_f32(self) -> f32 {
                    self as f32
                }

                fn from_f32(value: f32) -> Self {
                    value as $ty
                }
            }
        )*
    };
}

float_samples!(f32(B32), f64(B64));

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bits_are_zero_extended() {
        assert_eq!((-1i8).to_bits(), 0xff);
        assert_eq!((-2i16).to_bits(), 0xfffe);
        assert_eq!(i8::from_bits(0x1ff), -1);
        assert_eq!(u16::from_bits(0x1_2345), 0x2345);
        assert_eq!(1.0f32.to_bits(), 0x3f80_0000);
        assert_eq!(<f64 as Sample>::from_bits(0x3ff0_0000_0000_0000), 1.0);
    }
}
