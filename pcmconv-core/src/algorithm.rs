use crate::cursor::{Cursor, CursorMut};
use crate::dispatch::{dispatch2, DispatchMismatch, Visit2};
use crate::format::SampleFormat;
use crate::marshal::Encoding;
use crate::operand::{Sink, Source};
use crate::range::Samples;
use crate::sample::Sample;

/// Copies every value of `source` into `destination`, which is returned
/// positioned after the last value written.
///
/// Panics if `destination` fills up first, use [`copy_bounded`] when it may
/// be shorter than the source.
pub fn copy<S, D>(source: S, destination: D) -> Result<D, DispatchMismatch>
where
    S: Source,
    D: Sink<Value = S::Value>,
{
    dispatch2(source, destination, CopyAll)
}

/// Copies as many values as both sides allow. Returns both operands
/// positioned after the last value copied.
pub fn copy_bounded<S, D>(source: S, destination: D) -> Result<(S, D), DispatchMismatch>
where
    S: Source,
    D: Sink<Value = S::Value>,
{
    dispatch2(source, destination, CopyBounded)
}

/// Copies exactly `count` values. Panics if either side runs out first.
pub fn copy_n<S, D>(source: S, count: usize, destination: D) -> Result<(S, D), DispatchMismatch>
where
    S: Source,
    D: Sink<Value = S::Value>,
{
    dispatch2(source, destination, CopyN(count))
}

/// [`copy`] over the samples between two cursors.
pub fn copy_between<'a, V, F, D>(
    begin: Cursor<'a, V, F>,
    end: Cursor<'a, V, F>,
    destination: D,
) -> Result<D, DispatchMismatch>
where
    V: Sample,
    F: SampleFormat,
    D: Sink<Value = V>,
{
    copy(Samples::between(begin, end), destination)
}

/// Decodes the whole samples of `bytes` into `out`, returning how many
/// were written. Stops early if `out` is shorter.
pub fn read<V, F>(bytes: &[u8], format: F, out: &mut [V]) -> Result<usize, DispatchMismatch>
where
    V: Sample,
    F: SampleFormat,
{
    let capacity = out.len();
    let (_, rest) = copy_bounded(Samples::new(bytes, format), out)?;
    Ok(capacity - rest.len())
}

/// Encodes `values` into `bytes`, returning how many samples were written.
/// Stops early if `bytes` can't hold them all.
pub fn write<V, F>(values: &[V], format: F, bytes: &mut [u8]) -> Result<usize, DispatchMismatch>
where
    V: Sample,
    F: SampleFormat,
{
    let (rest, _) = copy_bounded(values, CursorMut::new(bytes, format))?;
    Ok(values.len() - rest.len())
}

struct CopyAll;

impl<S, D> Visit2<S, D> for CopyAll
where
    S: Source,
    D: Sink<Value = S::Value>,
{
    type Output = D;

    fn call<F: Encoding, G: Encoding>(self, mut source: S::Bound<F>, mut destination: D::Bound<G>) -> D {
        while let Some(value) = S::pull::<F>(&mut source) {
            D::push::<G>(&mut destination, value);
        }

        D::restore::<G>(destination)
    }
}

struct CopyBounded;

impl<S, D> Visit2<S, D> for CopyBounded
where
    S: Source,
    D: Sink<Value = S::Value>,
{
    type Output = (S, D);

    fn call<F: Encoding, G: Encoding>(self, mut source: S::Bound<F>, mut destination: D::Bound<G>) -> (S, D) {
        while D::capacity::<G>(&destination) > 0 {
            match S::pull::<F>(&mut source) {
                Some(value) => D::push::<G>(&mut destination, value),
                None => break,
            }
        }

        (S::restore::<F>(source), D::restore::<G>(destination))
    }
}

struct CopyN(usize);

impl<S, D> Visit2<S, D> for CopyN
where
    S: Source,
    D: Sink<Value = S::Value>,
{
    type Output = (S, D);

    fn call<F: Encoding, G: Encoding>(self, mut source: S::Bound<F>, mut destination: D::Bound<G>) -> (S, D) {
        if let Some(remaining) = S::remaining::<F>(&source) {
            assert!(remaining >= self.0, "copy_n: source has {remaining} values, {} requested", self.0);
        }

        for _ in 0..self.0 {
            let value = S::pull::<F>(&mut source)
                .expect("copy_n: source exhausted");
            D::push::<G>(&mut destination, value);
        }

        (S::restore::<F>(source), D::restore::<G>(destination))
    }
}

#[cfg(test)]
mod tests {
    use pcmconv_format::tag::*;
    use pcmconv_format::RuntimeFormat;

    use super::*;
    use crate::stream::Stream;

    #[test]
    fn copy_into_floats() {
        let bytes = [0x00u8, 0x40, 0x80, 0xff];
        let mut out = [0.0f32; 4];
        let rest = copy(Samples::new(&bytes, S8Le::RUNTIME), &mut out[..]).unwrap();
        assert!(rest.is_empty());

        let expected: Vec<f32> = bytes.iter().map(|&b| crate::convert::convert::<f32, i8>(b as i8)).collect();
        assert_eq!(out.to_vec(), expected);
        assert_eq!(out, [0.0, 0.5, -1.0, -1.0 / 128.0]);
    }

    #[test]
    fn copy_between_formats() {
        let input = [0x7fu8, 0xff, 0x80, 0x00];
        let mut output = [0u8; 6];
        let source = Samples::<i64, _>::new(&input, S16Be::RUNTIME);
        let destination = CursorMut::new(&mut output, S24Le::RUNTIME);
        let destination = copy(source, destination).unwrap();
        assert_eq!(destination.remaining(), 0);
        assert_eq!(output, [0x00, 0xff, 0x7f, 0x00, 0x00, 0x80]);
    }

    #[test]
    fn bounded_stops_at_shorter_side() {
        let input = [1u8, 2, 3, 4, 5];
        let mut out = [0u8; 3];
        let (rest, filled) = copy_bounded(Samples::<u8, _>::new(&input, U8Le::new()), &mut out[..]).unwrap();
        assert_eq!(rest.len(), 2);
        assert!(filled.is_empty());
        assert_eq!(out, [1, 2, 3]);

        let mut wide = [0u8; 8];
        let (rest, open) = copy_bounded(&input[..], &mut wide[..]).unwrap();
        assert!(rest.is_empty());
        assert_eq!(open.len(), 3);
    }

    #[test]
    fn unbounded_destination_grows() {
        let input = [0x00u8, 0x00, 0x80, 0x3f];
        let mut out = Vec::new();
        copy(Samples::<f64, _>::new(&input, F32Le::RUNTIME), &mut out).unwrap();
        assert_eq!(out, [1.0]);
    }

    #[test]
    #[should_panic(expected = "push into full slice")]
    fn unbounded_copy_into_short_slice_panics() {
        let input = [0u8; 4];
        let mut out = [0i8; 2];
        let _ = copy(Samples::<i8, _>::new(&input, S8Be::new()), &mut out[..]);
    }

    #[test]
    fn copy_n_advances_both() {
        let input = [1u8, 2, 3, 4];
        let mut out = [0u8; 4];
        let (source, dest) = copy_n(Samples::<u8, _>::new(&input, U8Be::RUNTIME), 3, &mut out[..]).unwrap();
        assert_eq!(source.collect::<Vec<_>>(), [4]);
        assert_eq!(dest.len(), 1);
        assert_eq!(out, [1, 2, 3, 0]);
    }

    #[test]
    fn copy_from_single_pass_stream() {
        let input = [0x12u8, 0x34, 0x56, 0x78];
        let mut out = Vec::new();
        let stream = Stream::<_, u16, _>::new(input.into_iter(), U16Le::RUNTIME);
        copy(stream, &mut out).unwrap();
        assert_eq!(out, [0x3412, 0x7856]);
    }

    #[test]
    fn mismatched_range_ends_fail_to_dispatch() {
        let input = [0u8; 12];
        let begin = Cursor::<f32, _>::new(&input, S24Be::RUNTIME);
        let end = Cursor::at(&input, 12, S16Le::RUNTIME);
        let mut out = [0.0f32; 4];
        let err = copy_between(begin, end, &mut out[..]).unwrap_err();
        assert_eq!(err, DispatchMismatch::new(S16Le::RUNTIME, S24Be::RUNTIME));
    }

    #[test]
    fn read_and_write_count_samples() {
        let format = RuntimeFormat::parse("u24be").unwrap();
        let values = [0.0f64, 0.5, -1.0];
        let mut bytes = [0u8; 8];
        assert_eq!(write(&values, format, &mut bytes).unwrap(), 2);
        assert_eq!(bytes[..6], [0x80, 0x00, 0x00, 0xc0, 0x00, 0x00]);

        let mut decoded = [9.0f64; 4];
        assert_eq!(read(&bytes, format, &mut decoded).unwrap(), 2);
        assert_eq!(decoded, [0.0, 0.5, 9.0, 9.0]);
    }
}
