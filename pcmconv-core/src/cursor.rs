use core::fmt::{self, Debug};
use core::marker::PhantomData;
use core::ptr;

use pcmconv_format::{Format, RuntimeFormat};

use crate::dispatch::{DispatchMismatch, Operand, Visit};
use crate::format::SampleFormat;
use crate::marshal::Encoding;
use crate::operand::Sink;
use crate::sample::Sample;

/// Read only position in a byte buffer of samples encoded as `F`, yielding
/// them as `V`. Every [`Cursor::get`] decodes afresh.
pub struct Cursor<'a, V, F> {
    bytes: &'a [u8],
    offset: usize,
    format: F,
    _value: PhantomData<fn() -> V>,
}

impl<'a, V, F: Copy> Clone for Cursor<'a, V, F> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<'a, V, F: Copy> Copy for Cursor<'a, V, F> {}

impl<'a, V: Sample, F: SampleFormat> Cursor<'a, V, F> {
    pub fn new(bytes: &'a [u8], format: F) -> Self {
        Cursor::at(bytes, 0, format)
    }

    /// `offset` is in bytes.
    pub fn at(bytes: &'a [u8], offset: usize, format: F) -> Self {
        Cursor { bytes, offset, format, _value: PhantomData }
    }

    pub fn get(&self) -> V {
        self.format.read(&self.bytes[self.offset..])
    }

    pub fn advance(&mut self) {
        self.offset += self.format.sample_size();
    }

    pub fn retreat(&mut self) {
        self.offset = self.offset.checked_sub(self.format.sample_size())
            .expect("cursor moved before start of buffer");
    }

    pub fn advance_by(&mut self, samples: isize) {
        let delta = samples * self.format.sample_size() as isize;
        self.offset = self.offset.checked_add_signed(delta)
            .expect("cursor moved before start of buffer");
    }

    /// Samples from `self` to `other`, which must be over the same buffer.
    pub fn distance_to(&self, other: &Cursor<'_, V, F>) -> isize {
        assert!(self.same_buffer(other.bytes), "distance between cursors over different buffers");
        (other.offset as isize - self.offset as isize) / self.format.sample_size() as isize
    }

    /// Byte offset into the buffer
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Sample index into the buffer
    pub fn index(&self) -> usize {
        self.offset / self.format.sample_size()
    }

    pub fn format(&self) -> F {
        self.format
    }

    pub fn bytes(&self) -> &'a [u8] {
        self.bytes
    }

    /// Same position, yielding another value type
    pub fn cast<W: Sample>(self) -> Cursor<'a, W, F> {
        Cursor::at(self.bytes, self.offset, self.format)
    }

    pub fn rebind<G: Encoding>(self) -> Result<Cursor<'a, V, G>, DispatchMismatch> {
        Ok(Cursor::at(self.bytes, self.offset, self.format.bind::<G>()?))
    }

    pub fn into_dynamic(self) -> Cursor<'a, V, RuntimeFormat> {
        Cursor::at(self.bytes, self.offset, self.format.to_runtime())
    }

    pub(crate) fn restore<G: Encoding>(bound: Cursor<'a, V, G>) -> Self {
        Cursor::at(bound.bytes, bound.offset, F::restore(bound.format))
    }

    pub(crate) fn same_buffer(&self, bytes: &[u8]) -> bool {
        ptr::eq(self.bytes, bytes)
    }
}

/// Comparing cursors over different formats is a bug in the caller and
/// panics.
impl<'a, 'b, V, F: Format, G: Format> PartialEq<Cursor<'b, V, G>> for Cursor<'a, V, F> {
    fn eq(&self, other: &Cursor<'b, V, G>) -> bool {
        assert_eq!(
            self.format.index(), other.format.index(),
            "comparing cursors over {} and {}", self.format.to_runtime(), other.format.to_runtime(),
        );
        ptr::eq(self.bytes, other.bytes) && self.offset == other.offset
    }
}

impl<'a, V, F: Format> Debug for Cursor<'a, V, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cursor")
            .field("offset", &self.offset)
            .field("len", &self.bytes.len())
            .field("format", &self.format.to_runtime())
            .finish()
    }
}

/// Writable position in a byte buffer of samples encoded as `F`.
///
/// Converts into a [`Cursor`] but not the other way around.
pub struct CursorMut<'a, V, F> {
    bytes: &'a mut [u8],
    offset: usize,
    format: F,
    _value: PhantomData<fn(V) -> V>,
}

impl<'a, V: Sample, F: SampleFormat> CursorMut<'a, V, F> {
    pub fn new(bytes: &'a mut [u8], format: F) -> Self {
        CursorMut::at(bytes, 0, format)
    }

    pub fn at(bytes: &'a mut [u8], offset: usize, format: F) -> Self {
        CursorMut { bytes, offset, format, _value: PhantomData }
    }

    pub fn get(&self) -> V {
        self.format.read(&self.bytes[self.offset..])
    }

    pub fn set(&mut self, value: V) {
        self.format.write(&mut self.bytes[self.offset..], value)
    }

    /// Accessor for the sample under the cursor
    pub fn sample(&mut self) -> SampleRef<'_, V, F> {
        let end = self.offset + self.format.sample_size();
        SampleRef {
            slot: &mut self.bytes[self.offset..end],
            format: self.format,
            _value: PhantomData,
        }
    }

    pub fn advance(&mut self) {
        self.offset += self.format.sample_size();
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn format(&self) -> F {
        self.format
    }

    /// Whole samples between the cursor and the end of the buffer
    pub fn remaining(&self) -> usize {
        self.bytes.len().saturating_sub(self.offset) / self.format.sample_size()
    }

    pub fn as_cursor(&self) -> Cursor<'_, V, F> {
        Cursor::at(self.bytes, self.offset, self.format)
    }

    pub fn reborrow(&mut self) -> CursorMut<'_, V, F> {
        CursorMut::at(self.bytes, self.offset, self.format)
    }

    pub fn cast<W: Sample>(self) -> CursorMut<'a, W, F> {
        CursorMut::at(self.bytes, self.offset, self.format)
    }

    pub fn rebind<G: Encoding>(self) -> Result<CursorMut<'a, V, G>, DispatchMismatch> {
        let format = self.format.bind::<G>()?;
        Ok(CursorMut::at(self.bytes, self.offset, format))
    }

    pub fn into_dynamic(self) -> CursorMut<'a, V, RuntimeFormat> {
        let format = self.format.to_runtime();
        CursorMut::at(self.bytes, self.offset, format)
    }
}

impl<'a, V: Sample, F: SampleFormat> From<CursorMut<'a, V, F>> for Cursor<'a, V, F> {
    fn from(cursor: CursorMut<'a, V, F>) -> Self {
        Cursor::at(cursor.bytes, cursor.offset, cursor.format)
    }
}

impl<'a, V, F: Format> Debug for CursorMut<'a, V, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CursorMut")
            .field("offset", &self.offset)
            .field("len", &self.bytes.len())
            .field("format", &self.format.to_runtime())
            .finish()
    }
}

impl<'a, V: Sample, F: SampleFormat> Operand for CursorMut<'a, V, F> {
    type Bound<G: Encoding> = CursorMut<'a, V, G>;

    fn rebind<G: Encoding>(self) -> Result<CursorMut<'a, V, G>, DispatchMismatch> {
        CursorMut::rebind(self)
    }

    fn restore<G: Encoding>(bound: CursorMut<'a, V, G>) -> Self {
        CursorMut::at(bound.bytes, bound.offset, F::restore(bound.format))
    }

    fn visit<K: Visit<Self>>(self, kernel: K) -> Result<K::Output, DispatchMismatch> {
        let format = self.format;
        format.select(self, kernel)
    }
}

impl<'a, V: Sample, F: SampleFormat> Sink for CursorMut<'a, V, F> {
    type Value = V;

    fn push<G: Encoding>(bound: &mut CursorMut<'a, V, G>, value: V) {
        assert!(bound.remaining() > 0, "write past end of {} buffer", bound.format.to_runtime());
        bound.set(value);
        bound.advance();
    }

    fn capacity<G: Encoding>(bound: &CursorMut<'a, V, G>) -> usize {
        bound.remaining()
    }
}

/// Get/set access to one encoded sample.
pub struct SampleRef<'s, V, F> {
    slot: &'s mut [u8],
    format: F,
    _value: PhantomData<fn(V) -> V>,
}

impl<'s, V: Sample, F: SampleFormat> SampleRef<'s, V, F> {
    pub fn get(&self) -> V {
        self.format.read(self.slot)
    }

    pub fn set(&mut self, value: V) {
        self.format.write(self.slot, value)
    }
}
