#![no_std]

pub mod description;
pub mod error;
pub mod runtime;
pub mod tag;

pub use description::{BitWidth, Endian, NumberKind};
pub use error::FormatError;
pub use runtime::RuntimeFormat;
pub use tag::{Format, StaticFormat};

/// Expands `$callback! { index => Tag(Number, Width, Order), ... }` once
/// with every supported format, in catalogue order.
///
/// This is the only place the set of supported formats is written down.
/// The catalogue, the compile time tags and the dispatch match arms in
/// `pcmconv-core` are all generated from it.
#[macro_export]
macro_rules! for_each_format {
    ($callback:ident) => {
        $callback! {
            0  => S8Be(Signed, B8, Big),
            1  => S8Le(Signed, B8, Little),
            2  => S16Be(Signed, B16, Big),
            3  => S16Le(Signed, B16, Little),
            4  => S24Be(Signed, B24, Big),
            5  => S24Le(Signed, B24, Little),
            6  => S32Be(Signed, B32, Big),
            7  => S32Le(Signed, B32, Little),
            8  => S64Be(Signed, B64, Big),
            9  => S64Le(Signed, B64, Little),
            10 => U8Be(Unsigned, B8, Big),
            11 => U8Le(Unsigned, B8, Little),
            12 => U16Be(Unsigned, B16, Big),
            13 => U16Le(Unsigned, B16, Little),
            14 => U24Be(Unsigned, B24, Big),
            15 => U24Le(Unsigned, B24, Little),
            16 => U32Be(Unsigned, B32, Big),
            17 => U32Le(Unsigned, B32, Little),
            18 => U64Be(Unsigned, B64, Big),
            19 => U64Le(Unsigned, B64, Little),
            20 => F32Be(Float, B32, Big),
            21 => F32Le(Float, B32, Little),
            22 => F64Be(Float, B64, Big),
            23 => F64Le(Float, B64, Little),
        }
    };
}

pub const FORMAT_COUNT: usize = 24;

macro_rules! catalogue_table {
    ($($index:literal => $tag:ident($number:ident, $width:ident, $endian:ident)),* $(,)?) => {
        [$(
            RuntimeFormat::from_parts(
                <tag::$number as tag::Number>::KIND,
                <tag::$width as tag::Width>::WIDTH,
                <tag::$endian as tag::Order>::ENDIAN,
                $index,
            ),
        )*]
    };
}

/// Every supported format, ordered so that `CATALOGUE[f.index()] == f`.
pub const CATALOGUE: [RuntimeFormat; FORMAT_COUNT] = for_each_format!(catalogue_table);

pub fn catalogue() -> impl ExactSizeIterator<Item = RuntimeFormat> {
    CATALOGUE.into_iter()
}
