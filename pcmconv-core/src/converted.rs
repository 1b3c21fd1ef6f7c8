use crate::cursor::CursorMut;
use crate::format::SampleFormat;
use crate::range::Samples;
use crate::sample::Sample;

/// Views a byte buffer as samples of a given format.
///
/// ```
/// use pcmconv_core::Converted;
/// use pcmconv_format::RuntimeFormat;
///
/// let format: RuntimeFormat = "s16be".parse().unwrap();
/// let bytes = [0x40u8, 0x00, 0xc0, 0x00];
/// let values: Vec<f32> = bytes.converted(format).collect();
/// assert_eq!(values, [0.5, -0.5]);
/// ```
pub trait Converted {
    fn converted<V: Sample, F: SampleFormat>(&self, format: F) -> Samples<'_, V, F>;
    fn converted_mut<V: Sample, F: SampleFormat>(&mut self, format: F) -> CursorMut<'_, V, F>;
}

impl Converted for [u8] {
    fn converted<V: Sample, F: SampleFormat>(&self, format: F) -> Samples<'_, V, F> {
        Samples::new(self, format)
    }

    fn converted_mut<V: Sample, F: SampleFormat>(&mut self, format: F) -> CursorMut<'_, V, F> {
        CursorMut::new(self, format)
    }
}

#[cfg(test)]
mod tests {
    use pcmconv_format::tag::*;

    use super::*;
    use crate::algorithm::copy;

    #[test]
    fn converted_range_into_converted_buffer() {
        let input = [0x00u8, 0x01, 0xff, 0xff];
        let mut output = [0u8; 2];
        copy(input.converted::<i32, _>(S16Be::new()), output.converted_mut(U8Le::new())).unwrap();
        assert_eq!(output, [0x80, 0x7f]);
    }
}
