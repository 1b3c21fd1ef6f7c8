use core::mem;

use crate::dispatch::{DispatchMismatch, Operand, Visit};
use crate::marshal::Encoding;
use crate::sample::Sample;

/// An operand that yields values once bound to a format.
pub trait Source: Operand {
    type Value: Sample;

    fn pull<F: Encoding>(bound: &mut Self::Bound<F>) -> Option<Self::Value>;

    /// Number of values left, if known without consuming them
    fn remaining<F: Encoding>(bound: &Self::Bound<F>) -> Option<usize>;
}

/// An operand that accepts values once bound to a format.
pub trait Sink: Operand {
    type Value: Sample;

    /// Panics if the sink is full.
    fn push<F: Encoding>(bound: &mut Self::Bound<F>, value: Self::Value);

    /// Number of values that can still be pushed
    fn capacity<F: Encoding>(bound: &Self::Bound<F>) -> usize;
}

// native values are format independent, any binding is accepted and the
// kernel is instantiated once with the host format of `V`

impl<'a, V: Sample> Operand for &'a [V] {
    type Bound<F: Encoding> = &'a [V];

    fn rebind<F: Encoding>(self) -> Result<&'a [V], DispatchMismatch> {
        Ok(self)
    }

    fn restore<F: Encoding>(bound: &'a [V]) -> Self {
        bound
    }

    fn visit<K: Visit<Self>>(self, kernel: K) -> Result<K::Output, DispatchMismatch> {
        Ok(kernel.call::<V::Native>(self))
    }
}

impl<'a, V: Sample> Source for &'a [V] {
    type Value = V;

    fn pull<F: Encoding>(bound: &mut &'a [V]) -> Option<V> {
        let (first, rest) = bound.split_first()?;
        *bound = rest;
        Some(*first)
    }

    fn remaining<F: Encoding>(bound: &&'a [V]) -> Option<usize> {
        Some(bound.len())
    }
}

impl<'a, V: Sample> Operand for &'a mut [V] {
    type Bound<F: Encoding> = &'a mut [V];

    fn rebind<F: Encoding>(self) -> Result<&'a mut [V], DispatchMismatch> {
        Ok(self)
    }

    fn restore<F: Encoding>(bound: &'a mut [V]) -> Self {
        bound
    }

    fn visit<K: Visit<Self>>(self, kernel: K) -> Result<K::Output, DispatchMismatch> {
        Ok(kernel.call::<V::Native>(self))
    }
}

impl<'a, V: Sample> Sink for &'a mut [V] {
    type Value = V;

    fn push<F: Encoding>(bound: &mut &'a mut [V], value: V) {
        let (first, rest) = mem::take(bound)
            .split_first_mut()
            .expect("push into full slice");
        *first = value;
        *bound = rest;
    }

    fn capacity<F: Encoding>(bound: &&'a mut [V]) -> usize {
        bound.len()
    }
}

impl<'a, V: Sample> Operand for &'a mut Vec<V> {
    type Bound<F: Encoding> = &'a mut Vec<V>;

    fn rebind<F: Encoding>(self) -> Result<&'a mut Vec<V>, DispatchMismatch> {
        Ok(self)
    }

    fn restore<F: Encoding>(bound: &'a mut Vec<V>) -> Self {
        bound
    }

    fn visit<K: Visit<Self>>(self, kernel: K) -> Result<K::Output, DispatchMismatch> {
        Ok(kernel.call::<V::Native>(self))
    }
}

/// Unbounded sink, appends
impl<'a, V: Sample> Sink for &'a mut Vec<V> {
    type Value = V;

    fn push<F: Encoding>(bound: &mut &'a mut Vec<V>, value: V) {
        bound.push(value);
    }

    fn capacity<F: Encoding>(_: &&'a mut Vec<V>) -> usize {
        usize::MAX
    }
}
