use core::marker::PhantomData;

use pcmconv_format::{for_each_format, tag, Format, RuntimeFormat, FORMAT_COUNT};

use crate::convert::convert;
use crate::dispatch::{DispatchMismatch, Operand, Visit};
use crate::marshal::{self, Encoding};
use crate::sample::Sample;

/// A format that can encode and decode samples, implemented by every
/// compile time format tag and by [`RuntimeFormat`].
pub trait SampleFormat: Format {
    /// Decodes the sample at the start of `bytes` as a `V`.
    fn read<V: Sample>(&self, bytes: &[u8]) -> V;

    /// Encodes `value` into the start of `bytes`.
    fn write<V: Sample>(&self, bytes: &mut [u8], value: V);

    /// Calls `kernel` with `operand` bound to the static format equal to
    /// `self`.
    fn select<A: Operand, K: Visit<A>>(&self, operand: A, kernel: K) -> Result<K::Output, DispatchMismatch>;

    /// Recovers a `Self` from the static format it was bound to.
    fn restore<G: Encoding>(format: G) -> Self;

    fn bind<G: Encoding>(&self) -> Result<G, DispatchMismatch> {
        if self.index() == G::INDEX {
            Ok(G::default())
        } else {
            Err(DispatchMismatch::new(self.to_runtime(), G::RUNTIME))
        }
    }
}

impl<F: Encoding> SampleFormat for F {
    fn read<V: Sample>(&self, bytes: &[u8]) -> V {
        convert(marshal::load::<F>(bytes))
    }

    fn write<V: Sample>(&self, bytes: &mut [u8], value: V) {
        marshal::store::<F>(bytes, convert(value))
    }

    fn select<A: Operand, K: Visit<A>>(&self, operand: A, kernel: K) -> Result<K::Output, DispatchMismatch> {
        Ok(kernel.call::<F>(operand.rebind::<F>()?))
    }

    fn restore<G: Encoding>(_: G) -> Self {
        debug_assert_eq!(F::INDEX, G::INDEX);
        F::default()
    }
}

fn read_as<F: Encoding, V: Sample>(bytes: &[u8]) -> V {
    F::default().read(bytes)
}

fn write_as<F: Encoding, V: Sample>(bytes: &mut [u8], value: V) {
    F::default().write(bytes, value)
}

fn candidate<G, A, K>(operand: A, kernel: K) -> Result<K::Output, DispatchMismatch>
where
    G: Encoding,
    A: Operand,
    K: Visit<A>,
{
    log::trace!("dispatching to {}", G::RUNTIME);
    Ok(kernel.call::<G>(operand.rebind::<G>()?))
}

macro_rules! codec_tables {
    ($($index:literal => $tag:ident($($params:ident),*)),* $(,)?) => {
        /// Per element codec for run time formats, one entry per catalogue
        /// index.
        struct Codec<V>(PhantomData<V>);

        impl<V: Sample> Codec<V> {
            const READ: [fn(&[u8]) -> V; FORMAT_COUNT] = [$(read_as::<tag::$tag, V>),*];
            const WRITE: [fn(&mut [u8], V); FORMAT_COUNT] = [$(write_as::<tag::$tag, V>),*];
        }
    };
}

for_each_format!(codec_tables);

macro_rules! runtime_select {
    ($($index:literal => $tag:ident($($params:ident),*)),* $(,)?) => {
        fn select<A: Operand, K: Visit<A>>(&self, operand: A, kernel: K) -> Result<K::Output, DispatchMismatch> {
            match self.index() {
                $($index => candidate::<tag::$tag, A, K>(operand, kernel),)*
                index => unreachable!("catalogue index {index} out of range"),
            }
        }
    };
}

impl SampleFormat for RuntimeFormat {
    fn read<V: Sample>(&self, bytes: &[u8]) -> V {
        Codec::<V>::READ[self.index()](bytes)
    }

    fn write<V: Sample>(&self, bytes: &mut [u8], value: V) {
        Codec::<V>::WRITE[self.index()](bytes, value)
    }

    for_each_format!(runtime_select);

    fn restore<G: Encoding>(_: G) -> Self {
        G::RUNTIME
    }
}

#[cfg(test)]
mod tests {
    use pcmconv_format::tag::*;
    use pcmconv_format::CATALOGUE;

    use super::*;

    #[test]
    fn runtime_read_matches_static() {
        let bytes = [0x81, 0x7f, 0x00, 0x40, 0x12, 0x34, 0x56, 0x78];
        assert_eq!(S16Le::RUNTIME.read::<f64>(&bytes), S16Le::new().read::<f64>(&bytes));
        assert_eq!(U24Be::RUNTIME.read::<i32>(&bytes), U24Be::new().read::<i32>(&bytes));
        assert_eq!(F64Be::RUNTIME.read::<f32>(&bytes), F64Be::new().read::<f32>(&bytes));
    }

    #[test]
    fn reads_are_idempotent() {
        let bytes = [0x80u8, 0x01];
        for format in CATALOGUE.iter().filter(|f| f.sample_size() <= 2) {
            assert_eq!(format.read::<i64>(&bytes), format.read::<i64>(&bytes));
        }
    }

    #[test]
    fn bind_checks_index() {
        let format = S24Be::RUNTIME;
        assert_eq!(format.bind::<S24Be>(), Ok(S24Be::new()));
        assert_eq!(
            format.bind::<S16Le>(),
            Err(DispatchMismatch::new(S24Be::RUNTIME, S16Le::RUNTIME)),
        );
    }

    #[test]
    fn write_then_read() {
        let mut bytes = [0u8; 3];
        S24Le::RUNTIME.write(&mut bytes, -0.5f32);
        assert_eq!(bytes, [0x00, 0x00, 0xc0]);
        assert_eq!(S24Le::RUNTIME.read::<f32>(&bytes), -0.5);
    }
}
