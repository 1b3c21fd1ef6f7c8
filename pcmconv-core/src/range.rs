use core::fmt::{self, Debug};

use pcmconv_format::{Format, RuntimeFormat};

use crate::cursor::Cursor;
use crate::dispatch::{DispatchMismatch, Operand, Visit};
use crate::error::TrailingBytes;
use crate::format::SampleFormat;
use crate::marshal::Encoding;
use crate::operand::Source;
use crate::sample::Sample;

/// The samples between two cursors over the same buffer.
pub struct Samples<'a, V, F> {
    begin: Cursor<'a, V, F>,
    end: Cursor<'a, V, F>,
}

impl<'a, V, F: Copy> Clone for Samples<'a, V, F> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<'a, V, F: Copy> Copy for Samples<'a, V, F> {}

impl<'a, V, F: Format> Debug for Samples<'a, V, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Samples")
            .field("begin", &self.begin)
            .field("end", &self.end)
            .finish()
    }
}

impl<'a, V: Sample, F: SampleFormat> Samples<'a, V, F> {
    /// Every whole sample in `bytes`. A trailing partial sample is ignored.
    pub fn new(bytes: &'a [u8], format: F) -> Self {
        let size = format.sample_size();
        let trailing = bytes.len() % size;

        if trailing != 0 {
            log::debug!("ignoring {trailing} trailing bytes after last {} sample", format.to_runtime());
        }

        Samples {
            begin: Cursor::new(bytes, format),
            end: Cursor::at(bytes, bytes.len() - trailing, format),
        }
    }

    /// Like [`Samples::new`] but rejects a trailing partial sample.
    pub fn exact(bytes: &'a [u8], format: F) -> Result<Self, TrailingBytes> {
        let sample_size = format.sample_size();

        if bytes.len() % sample_size == 0 {
            Ok(Samples::new(bytes, format))
        } else {
            Err(TrailingBytes { length: bytes.len(), sample_size })
        }
    }

    /// Panics if the cursors are over different buffers, out of order, not
    /// a whole number of samples apart, or if `end` is past the buffer.
    /// Their formats are not compared here, a disagreement surfaces as a
    /// [`DispatchMismatch`] when the range is used as an operand.
    pub fn between(begin: Cursor<'a, V, F>, end: Cursor<'a, V, F>) -> Self {
        assert!(begin.same_buffer(end.bytes()), "range ends are in different buffers");
        assert!(begin.offset() <= end.offset(), "range ends are out of order");
        assert!(end.offset() <= end.bytes().len(), "range end is past the buffer");

        let size = begin.format().sample_size();
        assert!(
            (end.offset() - begin.offset()) % size == 0,
            "range ends are not a whole number of {} samples apart", begin.format().to_runtime(),
        );

        Samples { begin, end }
    }

    pub fn begin(&self) -> Cursor<'a, V, F> {
        self.begin
    }

    pub fn end(&self) -> Cursor<'a, V, F> {
        self.end
    }

    pub fn format(&self) -> F {
        self.begin.format()
    }

    pub fn cast<W: Sample>(self) -> Samples<'a, W, F> {
        Samples { begin: self.begin.cast(), end: self.end.cast() }
    }

    pub fn into_dynamic(self) -> Samples<'a, V, RuntimeFormat> {
        Samples { begin: self.begin.into_dynamic(), end: self.end.into_dynamic() }
    }

    fn remaining(&self) -> usize {
        (self.end.offset() - self.begin.offset()) / self.begin.format().sample_size()
    }
}

impl<'a, V: Sample, F: SampleFormat> Iterator for Samples<'a, V, F> {
    type Item = V;

    fn next(&mut self) -> Option<V> {
        if self.remaining() == 0 {
            return None;
        }

        let value = self.begin.get();
        self.begin.advance();
        Some(value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.remaining();
        (remaining, Some(remaining))
    }
}

impl<'a, V: Sample, F: SampleFormat> ExactSizeIterator for Samples<'a, V, F> {}

impl<'a, V: Sample, F: SampleFormat> DoubleEndedIterator for Samples<'a, V, F> {
    fn next_back(&mut self) -> Option<V> {
        if self.remaining() == 0 {
            return None;
        }

        self.end.retreat();
        Some(self.end.get())
    }
}

impl<'a, V: Sample, F: SampleFormat> Operand for Samples<'a, V, F> {
    type Bound<G: Encoding> = Samples<'a, V, G>;

    fn rebind<G: Encoding>(self) -> Result<Samples<'a, V, G>, DispatchMismatch> {
        Ok(Samples { begin: self.begin.rebind()?, end: self.end.rebind()? })
    }

    fn restore<G: Encoding>(bound: Samples<'a, V, G>) -> Self {
        Samples { begin: Cursor::restore(bound.begin), end: Cursor::restore(bound.end) }
    }

    fn visit<K: Visit<Self>>(self, kernel: K) -> Result<K::Output, DispatchMismatch> {
        self.format().select(self, kernel)
    }
}

impl<'a, V: Sample, F: SampleFormat> Source for Samples<'a, V, F> {
    type Value = V;

    fn pull<G: Encoding>(bound: &mut Samples<'a, V, G>) -> Option<V> {
        bound.next()
    }

    fn remaining<G: Encoding>(bound: &Samples<'a, V, G>) -> Option<usize> {
        Some(bound.len())
    }
}
