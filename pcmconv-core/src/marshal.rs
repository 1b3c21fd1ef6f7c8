use core::mem::size_of;

use pcmconv_format::tag::{Float, Order, Pcm, Signed, StaticFormat, Unsigned, B16, B24, B32, B64, B8};
use pcmconv_format::Endian;

use crate::sample::Sample;

/// A compile time format together with the native type its samples are
/// staged in between the byte level and the converter.
///
/// 24 bit samples are staged in 32 bit integers, occupying the high three
/// bytes with the low byte zero.
pub trait Encoding: StaticFormat + Send + Sync {
    type Staging: Sample;
}

macro_rules! staging {
    ($($number:ident $width:ident => $staging:ty),* $(,)?) => {
        $(
            impl<E: Order> Encoding for Pcm<$number, $width, E> where Self: StaticFormat {
                type Staging = $staging;
            }
        )*
    };
}

staging! {
    Signed B8 => i8,
    Signed B16 => i16,
    Signed B24 => i32,
    Signed B32 => i32,
    Signed B64 => i64,
    Unsigned B8 => u8,
    Unsigned B16 => u16,
    Unsigned B24 => u32,
    Unsigned B32 => u32,
    Unsigned B64 => u64,
    Float B32 => f32,
    Float B64 => f64,
}

/// Reads `width` bytes in `endian` order into the top of a `stage` byte
/// wide value, returned zero extended.
pub fn load_bits(bytes: &[u8], width: usize, stage: usize, endian: Endian) -> u64 {
    let bytes = &bytes[..width];
    let mut raw = [0u8; 8];

    let value = match endian {
        Endian::Big => {
            raw[..width].copy_from_slice(bytes);
            u64::from_be_bytes(raw)
        }
        Endian::Little => {
            raw[8 - width..].copy_from_slice(bytes);
            u64::from_le_bytes(raw)
        }
    };

    value >> (64 - 8 * stage)
}

/// Inverse of [`load_bits`]: writes the top `width` bytes of a `stage`
/// byte wide value. Anything below them is dropped.
pub fn store_bits(bytes: &mut [u8], bits: u64, width: usize, stage: usize, endian: Endian) {
    let value = bits << (64 - 8 * stage);

    match endian {
        Endian::Big => bytes[..width].copy_from_slice(&value.to_be_bytes()[..width]),
        Endian::Little => bytes[..width].copy_from_slice(&value.to_le_bytes()[8 - width..]),
    }
}

pub fn load<F: Encoding>(bytes: &[u8]) -> F::Staging {
    let format = F::default();
    let bits = load_bits(bytes, format.sample_size(), size_of::<F::Staging>(), format.endian());
    F::Staging::from_bits(bits)
}

pub fn store<F: Encoding>(bytes: &mut [u8], value: F::Staging) {
    let format = F::default();
    store_bits(bytes, value.to_bits(), format.sample_size(), size_of::<F::Staging>(), format.endian());
}

#[cfg(test)]
mod tests {
    use pcmconv_format::tag::*;

    use super::*;

    #[test]
    fn byte_order() {
        assert_eq!(load::<S16Be>(&[0x12, 0x34]), 0x1234);
        assert_eq!(load::<S16Le>(&[0x12, 0x34]), 0x3412);
        assert_eq!(load::<U32Be>(&[1, 2, 3, 4]), 0x0102_0304);
        assert_eq!(load::<U64Le>(&[1, 2, 3, 4, 5, 6, 7, 8]), 0x0807_0605_0403_0201);
    }

    #[test]
    fn twenty_four_bit_staging() {
        assert_eq!(load::<U24Be>(&[0xab, 0xcd, 0xef]), 0xabcd_ef00);
        assert_eq!(load::<U24Le>(&[0xab, 0xcd, 0xef]), 0xefcd_ab00);
        assert_eq!(load::<S24Be>(&[0xff, 0xff, 0xff]), -256);

        let mut bytes = [0u8; 3];
        store::<S24Le>(&mut bytes, 0x1234_56ff);
        assert_eq!(bytes, [0x56, 0x34, 0x12]);
        store::<S24Be>(&mut bytes, 0x1234_56ff);
        assert_eq!(bytes, [0x12, 0x34, 0x56]);
    }

    #[test]
    fn floats_keep_their_bits() {
        assert_eq!(load::<F32Be>(&[0x3f, 0x80, 0, 0]), 1.0);
        assert_eq!(load::<F64Le>(&(-0.5f64).to_le_bytes()), -0.5);

        let mut bytes = [0u8; 4];
        store::<F32Le>(&mut bytes, 0.25);
        assert_eq!(bytes, 0.25f32.to_le_bytes());
    }

    #[test]
    fn store_leaves_the_rest_alone() {
        let mut bytes = [0xaa; 4];
        store::<U16Le>(&mut bytes, 0x0102);
        assert_eq!(bytes, [0x02, 0x01, 0xaa, 0xaa]);
    }
}
