use crate::dispatch::{DispatchMismatch, Operand, Visit};
use crate::format::SampleFormat;
use crate::marshal::Encoding;
use crate::operand::Source;
use crate::sample::Sample;

/// Decodes samples from a single pass byte iterator.
///
/// The underlying bytes can't be revisited, so each sample is decoded as
/// soon as the stream reaches it and cached until it is taken. Bytes that
/// don't make up a whole sample at the end are dropped.
pub struct Stream<I, V, F> {
    bytes: I,
    format: F,
    current: Option<V>,
}

impl<I: Iterator<Item = u8>, V: Sample, F: SampleFormat> Stream<I, V, F> {
    pub fn new(bytes: I, format: F) -> Self {
        let mut stream = Stream { bytes, format, current: None };
        stream.current = stream.fetch();
        stream
    }

    /// The sample under the stream position, already decoded
    pub fn peek(&self) -> Option<V> {
        self.current
    }

    pub fn format(&self) -> F {
        self.format
    }

    fn fetch(&mut self) -> Option<V> {
        let size = self.format.sample_size();
        let mut buffer = [0u8; 8];

        for slot in &mut buffer[..size] {
            *slot = self.bytes.next()?;
        }

        Some(self.format.read(&buffer[..size]))
    }
}

impl<I: Iterator<Item = u8>, V: Sample, F: SampleFormat> Iterator for Stream<I, V, F> {
    type Item = V;

    fn next(&mut self) -> Option<V> {
        let value = self.current.take()?;
        self.current = self.fetch();
        Some(value)
    }
}

impl<I: Iterator<Item = u8>, V: Sample, F: SampleFormat> Operand for Stream<I, V, F> {
    type Bound<G: Encoding> = Stream<I, V, G>;

    fn rebind<G: Encoding>(self) -> Result<Stream<I, V, G>, DispatchMismatch> {
        let format = self.format.bind::<G>()?;
        Ok(Stream { bytes: self.bytes, format, current: self.current })
    }

    fn restore<G: Encoding>(bound: Stream<I, V, G>) -> Self {
        Stream { bytes: bound.bytes, format: F::restore(bound.format), current: bound.current }
    }

    fn visit<K: Visit<Self>>(self, kernel: K) -> Result<K::Output, DispatchMismatch> {
        let format = self.format;
        format.select(self, kernel)
    }
}

impl<I: Iterator<Item = u8>, V: Sample, F: SampleFormat> Source for Stream<I, V, F> {
    type Value = V;

    fn pull<G: Encoding>(bound: &mut Stream<I, V, G>) -> Option<V> {
        bound.next()
    }

    fn remaining<G: Encoding>(_: &Stream<I, V, G>) -> Option<usize> {
        None
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use pcmconv_format::tag::*;

    use super::*;

    #[test]
    fn decodes_eagerly() {
        let pulled = Cell::new(0);
        let bytes = [0x00u8, 0x40, 0x00, 0xc0].into_iter().inspect(|_| pulled.set(pulled.get() + 1));

        let mut stream = Stream::<_, f32, _>::new(bytes, S16Le::RUNTIME);
        assert_eq!(pulled.get(), 2);
        assert_eq!(stream.peek(), Some(0.5));

        assert_eq!(stream.next(), Some(0.5));
        assert_eq!(pulled.get(), 4);
        assert_eq!(stream.peek(), Some(-0.5));

        assert_eq!(stream.next(), Some(-0.5));
        assert_eq!(stream.next(), None);
    }

    #[test]
    fn drops_trailing_partial_sample() {
        let bytes = [1u8, 2, 3, 4, 5];
        let stream = Stream::<_, u16, _>::new(bytes.iter().copied(), U16Be::new());
        assert_eq!(stream.collect::<Vec<_>>(), [0x0102, 0x0304]);
    }
}
