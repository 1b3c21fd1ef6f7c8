//! Numeric landmarks of each sample type, and `numspace` for generating
//! evenly spaced values across a type's whole range.
//!
//! Integer arithmetic here wraps, so for unsigned types `zero()` is the
//! offset binary midpoint (128 for `u8`).

use crate::sample::Sample;

pub trait Limits: Sample {
    /// Significant bits: storage width for integers, mantissa digits for
    /// floats
    const DIGITS: u32;

    /// Distance between neighbouring values when only `bits` bits of
    /// resolution are used
    fn step(bits: u32) -> Self;
    fn min() -> Self;
    fn max(bits: u32) -> Self;
    fn zero() -> Self;

    fn scale() -> Self {
        Self::step(1)
    }

    /// `k`th value of `numspace(bits)`
    fn nth(k: u64, bits: u32) -> Self;
}

macro_rules! integer_limits {
    ($($ty:ident($unsigned:ident)),* $(,)?) => {
        $(
            impl Limits for $ty {
                const DIGITS: u32 = <$ty>::BITS;

                fn step(bits: u32) -> Self {
                    ((1 as $unsigned) << (Self::DIGITS - bits)) as $ty
                }

                fn min() -> Self {
                    <$ty>::MIN
                }

                fn max(bits: u32) -> Self {
                    <$ty>::MAX.wrapping_sub(Self::step(bits)).wrapping_add(1)
                }

                fn zero() -> Self {
                    <$ty as Limits>::min().wrapping_add(Self::scale())
                }

                fn nth(k: u64, bits: u32) -> Self {
                    Self::step(bits).wrapping_mul(k as $ty).wrapping_add(<$ty as Limits>::min())
                }
            }
        )*
    };
}

integer_limits!(
    i8(u8), i16(u16), i32(u32), i64(u64),
    u8(u8), u16(u16), u32(u32), u64(u64),
);

macro_rules! float_limits {
    ($($ty:ident),*) => {
        $(
            impl Limits for $ty {
                const DIGITS: u32 = <$ty>::MANTISSA_DIGITS;

                fn step(bits: u32) -> Self {
                    2.0 / (1u64 << bits) as $ty
                }

                fn min() -> Self {
                    -1.0
                }

                fn max(bits: u32) -> Self {
                    1.0 - Self::step(bits)
                }

                fn zero() -> Self {
                    0.0
                }

                fn nth(k: u64, bits: u32) -> Self {
                    Self::step(bits) * k as $ty + <$ty as Limits>::min()
                }
            }
        )*
    };
}

float_limits!(f32, f64);

/// The `2^bits` values `min(), min() + step(bits), ..., max(bits)`.
///
/// `bits` must be between 1 and `T::DIGITS`.
pub fn numspace<T: Limits>(bits: u32) -> impl DoubleEndedIterator<Item = T> {
    assert!(bits >= 1 && bits <= T::DIGITS, "numspace: {bits} bits out of range");
    (0..1u64 << bits).map(move |k| T::nth(k, bits))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn check<T: Limits>(bits: u32) {
        let values: Vec<T> = numspace(bits).collect();
        assert_eq!(values.len(), 1 << bits);
        assert_eq!(values[0], T::min());
        assert_eq!(values[values.len() - 1], T::max(bits));
        assert_eq!(values[values.len() / 2], T::zero());
        assert!(values.windows(2).all(|pair| pair[0] < pair[1]));
    }

    #[test]
    fn numspace_spans_range() {
        check::<i8>(8);
        check::<i16>(8);
        check::<i32>(8);
        check::<i64>(8);
        check::<u8>(8);
        check::<u16>(8);
        check::<u32>(8);
        check::<u64>(8);
        check::<f32>(8);
        check::<f64>(8);
        check::<i16>(16);
        check::<f32>(16);
    }

    #[test]
    fn landmarks() {
        assert_eq!(i8::zero(), 0);
        assert_eq!(u8::zero(), 128);
        assert_eq!(u16::zero(), 0x8000);
        assert_eq!(<i16 as Limits>::max(8), 32512);
        assert_eq!(i16::step(8), 256);
        assert_eq!(u32::scale(), 1 << 31);
        assert_eq!(<f32 as Limits>::DIGITS, 24);
        assert_eq!(<f64 as Limits>::max(8), 1.0 - 1.0 / 128.0);
        assert_eq!(f64::scale(), 1.0);
    }
}
