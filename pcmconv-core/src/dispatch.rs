//! Selecting the compile time specialisation that matches operands whose
//! formats may only be known at run time.
//!
//! An [`Operand`] is anything carrying a format: a cursor, a range of
//! samples, a plain slice of native values. A kernel ([`Visit`] or
//! [`Visit2`]) is written once, generic over the operands' [`Encoding`]s.
//! Visiting an operand with a static format calls the kernel directly.
//! Visiting one with a [`RuntimeFormat`] goes through a `match` over the
//! catalogue with one arm per format, each arm calling the kernel
//! instantiated for that format after checking that everything else in the
//! operand agrees with it.

use core::marker::PhantomData;

use pcmconv_format::RuntimeFormat;
use thiserror::Error;

use crate::marshal::Encoding;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("runtime format mismatch: operand is {found}, expected {expected}")]
pub struct DispatchMismatch {
    pub found: RuntimeFormat,
    pub expected: RuntimeFormat,
}

impl DispatchMismatch {
    pub fn new(found: RuntimeFormat, expected: RuntimeFormat) -> Self {
        DispatchMismatch { found, expected }
    }
}

pub trait Operand: Sized {
    /// This operand with its format fixed to `F`
    type Bound<F: Encoding>;

    /// Fails if any format carried by the operand differs from `F`.
    fn rebind<F: Encoding>(self) -> Result<Self::Bound<F>, DispatchMismatch>;

    /// Undoes [`Operand::rebind`]. Only called with the `F` that `rebind`
    /// succeeded with.
    fn restore<F: Encoding>(bound: Self::Bound<F>) -> Self;

    fn visit<K: Visit<Self>>(self, kernel: K) -> Result<K::Output, DispatchMismatch>;
}

pub trait Visit<A: Operand> {
    type Output;

    fn call<F: Encoding>(self, operand: A::Bound<F>) -> Self::Output;
}

pub trait Visit2<A: Operand, B: Operand> {
    type Output;

    fn call<F: Encoding, G: Encoding>(self, a: A::Bound<F>, b: B::Bound<G>) -> Self::Output;
}

pub fn dispatch<A: Operand, K: Visit<A>>(operand: A, kernel: K) -> Result<K::Output, DispatchMismatch> {
    operand.visit(kernel)
}

/// Two operand dispatch. With both formats dynamic this monomorphises the
/// kernel for every pair of catalogue entries.
pub fn dispatch2<A, B, K>(a: A, b: B, kernel: K) -> Result<K::Output, DispatchMismatch>
where
    A: Operand,
    B: Operand,
    K: Visit2<A, B>,
{
    a.visit(First { b, kernel, _a: PhantomData })?
}

struct First<A, B, K> {
    b: B,
    kernel: K,
    _a: PhantomData<fn(A)>,
}

impl<A, B, K> Visit<A> for First<A, B, K>
where
    A: Operand,
    B: Operand,
    K: Visit2<A, B>,
{
    type Output = Result<K::Output, DispatchMismatch>;

    fn call<F: Encoding>(self, a: A::Bound<F>) -> Self::Output {
        self.b.visit(Second::<A, F, K> { a, kernel: self.kernel })
    }
}

struct Second<A: Operand, F: Encoding, K> {
    a: A::Bound<F>,
    kernel: K,
}

impl<A, B, F, K> Visit<B> for Second<A, F, K>
where
    A: Operand,
    B: Operand,
    F: Encoding,
    K: Visit2<A, B>,
{
    type Output = K::Output;

    fn call<G: Encoding>(self, b: B::Bound<G>) -> K::Output {
        self.kernel.call::<F, G>(self.a, b)
    }
}
