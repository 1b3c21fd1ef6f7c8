use core::fmt::{self, Debug, Display};
use core::hash::{Hash, Hasher};
use core::marker::PhantomData;

use static_assertions::{assert_eq_size, const_assert_eq};

use crate::description::{BitWidth, Endian, NumberKind};
use crate::runtime::RuntimeFormat;
use crate::{CATALOGUE, FORMAT_COUNT};

/// Common interface of compile time tags and [`RuntimeFormat`].
pub trait Format: Copy + Debug + Send + Sync {
    fn number(&self) -> NumberKind;
    fn bitwidth(&self) -> BitWidth;
    fn endian(&self) -> Endian;

    /// Position in [`CATALOGUE`]
    fn index(&self) -> usize;

    fn to_runtime(&self) -> RuntimeFormat {
        CATALOGUE[self.index()]
    }

    /// Size in bytes of one encoded sample
    fn sample_size(&self) -> usize {
        self.bitwidth().bytes()
    }
}

/// A format fixed at compile time. Only catalogued combinations of
/// [`Pcm`] parameters implement this, so `Pcm<Float, B16, Little>` can be
/// named but never used as a format.
pub trait StaticFormat: Format + Default + 'static {
    const INDEX: usize;
    const RUNTIME: RuntimeFormat;
}

pub trait Number: Copy + Default + Debug + Send + Sync + 'static {
    const KIND: NumberKind;
}

pub trait Width: Copy + Default + Debug + Send + Sync + 'static {
    const WIDTH: BitWidth;
}

pub trait Order: Copy + Default + Debug + Send + Sync + 'static {
    const ENDIAN: Endian;
}

macro_rules! markers {
    ($trait:ident :: $const:ident : $ty:ident { $($marker:ident => $value:ident),* $(,)? }) => {
        $(
            #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
            pub struct $marker;

            impl $trait for $marker {
                const $const: $ty = $ty::$value;
            }
        )*
    };
}

markers!(Number::KIND: NumberKind {
    Signed => SignedInteger,
    Unsigned => UnsignedInteger,
    Float => FloatingPoint,
});

markers!(Width::WIDTH: BitWidth {
    B8 => B8,
    B16 => B16,
    B24 => B24,
    B32 => B32,
    B64 => B64,
});

markers!(Order::ENDIAN: Endian {
    Big => Big,
    Little => Little,
});

#[cfg(target_endian = "little")]
pub type NativeEndian = Little;

#[cfg(target_endian = "big")]
pub type NativeEndian = Big;

/// Zero sized compile time format tag.
#[derive(Clone, Copy, Default)]
pub struct Pcm<N, B, E>(PhantomData<(N, B, E)>);

impl<N, B, E> Pcm<N, B, E> {
    pub const fn new() -> Self {
        Pcm(PhantomData)
    }
}

macro_rules! static_formats {
    ($($index:literal => $tag:ident($number:ident, $width:ident, $endian:ident)),* $(,)?) => {
        $(
            pub type $tag = Pcm<$number, $width, $endian>;

            impl Format for $tag {
                fn number(&self) -> NumberKind { $number::KIND }
                fn bitwidth(&self) -> BitWidth { $width::WIDTH }
                fn endian(&self) -> Endian { $endian::ENDIAN }
                fn index(&self) -> usize { $index }
            }

            impl StaticFormat for $tag {
                const INDEX: usize = $index;
                const RUNTIME: RuntimeFormat = CATALOGUE[$index];
            }

            assert_eq_size!($tag, ());
        )*

        const_assert_eq!([$($index),*].len(), FORMAT_COUNT);
    };
}

crate::for_each_format!(static_formats);

impl<N: Number, B: Width, E: Order> Debug for Pcm<N, B, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Pcm<{:?}, {:?}, {:?}>", N::default(), B::default(), E::default())
    }
}

impl<N, B, E> Display for Pcm<N, B, E> where Self: StaticFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Display::fmt(&Self::RUNTIME, f)
    }
}

impl<N, B, E, N2, B2, E2> PartialEq<Pcm<N2, B2, E2>> for Pcm<N, B, E>
where
    Self: StaticFormat,
    Pcm<N2, B2, E2>: StaticFormat,
{
    fn eq(&self, _: &Pcm<N2, B2, E2>) -> bool {
        Self::INDEX == <Pcm<N2, B2, E2>>::INDEX
    }
}

impl<N, B, E> Eq for Pcm<N, B, E> where Self: StaticFormat {}

impl<N, B, E> Hash for Pcm<N, B, E> where Self: StaticFormat {
    fn hash<H: Hasher>(&self, state: &mut H) {
        Self::RUNTIME.hash(state)
    }
}

impl<N, B, E> PartialEq<RuntimeFormat> for Pcm<N, B, E> where Self: StaticFormat {
    fn eq(&self, other: &RuntimeFormat) -> bool {
        Self::INDEX == other.index()
    }
}

impl<N, B, E> PartialEq<Pcm<N, B, E>> for RuntimeFormat where Pcm<N, B, E>: StaticFormat {
    fn eq(&self, _: &Pcm<N, B, E>) -> bool {
        self.index() == <Pcm<N, B, E>>::INDEX
    }
}

impl<N, B, E> From<Pcm<N, B, E>> for RuntimeFormat where Pcm<N, B, E>: StaticFormat {
    fn from(_: Pcm<N, B, E>) -> Self {
        <Pcm<N, B, E>>::RUNTIME
    }
}
