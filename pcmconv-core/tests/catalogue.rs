use pcmconv_core::{copy, numspace, read, write, Cursor, CursorMut, Encoding, Samples, Visit};
use pcmconv_format::tag::{self, NativeEndian, Pcm, Signed, B16};
use pcmconv_format::{catalogue, for_each_format, Format, NumberKind, RuntimeFormat};

fn pattern(len: usize) -> Vec<u8> {
    (0..len).map(|i| (i.wrapping_mul(97) ^ 0x5a) as u8).collect()
}

fn static_matches_runtime<F: Encoding>() {
    let bytes = pattern(96);

    let by_static: Vec<i64> = Samples::new(&bytes, F::default()).collect();
    let by_runtime: Vec<i64> = Samples::new(&bytes, F::RUNTIME).collect();
    assert_eq!(by_static, by_runtime, "{}", F::RUNTIME);

    let mut dispatched = vec![0i64; by_static.len()];
    copy(Samples::new(&bytes, F::RUNTIME), &mut dispatched[..]).unwrap();
    assert_eq!(dispatched, by_static, "{}", F::RUNTIME);
}

macro_rules! check_every_format {
    ($($index:literal => $tag:ident($($params:ident),*)),* $(,)?) => {
        $(static_matches_runtime::<tag::$tag>();)*
    };
}

#[test]
fn static_runtime_and_dispatched_reads_agree() {
    for_each_format!(check_every_format);
}

#[test]
fn every_format_round_trips_numspace() {
    let values: Vec<f64> = numspace(8).collect();

    for format in catalogue() {
        let mut bytes = vec![0u8; values.len() * format.sample_size()];
        assert_eq!(write(&values, format, &mut bytes).unwrap(), values.len());

        let mut decoded = vec![f64::NAN; values.len()];
        assert_eq!(read(&bytes, format, &mut decoded).unwrap(), values.len());
        assert_eq!(decoded, values, "{format}");
    }
}

fn bytes_survive<V: pcmconv_core::Sample>(format: RuntimeFormat, bytes: &[u8]) {
    let mut values = vec![V::default(); bytes.len() / format.sample_size()];
    assert_eq!(read(bytes, format, &mut values).unwrap(), values.len());

    let mut written = vec![0u8; bytes.len()];
    assert_eq!(write(&values, format, &mut written).unwrap(), values.len());
    assert_eq!(written, bytes, "{format}");
}

#[test]
fn every_format_round_trips_bytes() {
    let bytes = pattern(96);

    for format in catalogue() {
        match format.number() {
            NumberKind::FloatingPoint => {
                // NaN payloads needn't survive, keep to finite values
                let finite: Vec<f64> = Samples::new(&bytes, format).filter(|v: &f64| v.is_finite()).collect();
                let mut clean = vec![0u8; finite.len() * format.sample_size()];
                write(&finite, format, &mut clean).unwrap();
                bytes_survive::<f64>(format, &clean);
            }
            _ => bytes_survive::<i64>(format, &bytes),
        }
    }
}

#[test]
fn representable_values_are_idempotent() {
    for format in catalogue() {
        let mut bytes = vec![0u8; 256 * format.sample_size()];
        let values: Vec<f64> = numspace(8).collect();
        write(&values, format, &mut bytes).unwrap();

        let mut again = bytes.clone();
        let decoded: Vec<f64> = Samples::new(&bytes, format).collect();
        write(&decoded, format, &mut again).unwrap();
        assert_eq!(again, bytes, "{format}");
    }
}

#[test]
fn every_format_pair_converts_like_per_element_access() {
    let bytes = pattern(48);

    for from in catalogue() {
        for to in catalogue() {
            let source = Samples::<f64, _>::new(&bytes, from);
            let count = source.len();

            let mut dispatched = vec![0u8; count * to.sample_size()];
            copy(source, CursorMut::new(&mut dispatched, to)).unwrap();

            let mut per_element = vec![0u8; count * to.sample_size()];
            let mut cursor = CursorMut::<f64, _>::new(&mut per_element, to);
            for index in 0..count {
                let value = Cursor::<f64, _>::at(&bytes, index * from.sample_size(), from).get();
                cursor.set(value);
                cursor.advance();
            }

            assert_eq!(dispatched, per_element, "{from} -> {to}");
        }
    }
}

#[test]
fn native_byte_views() {
    let values = [1i16, -2, i16::MAX, i16::MIN];
    let bytes: &[u8] = bytemuck::cast_slice(&values);

    let native = Pcm::<Signed, B16, NativeEndian>::new();
    let decoded: Vec<i16> = Samples::new(bytes, native).collect();
    assert_eq!(decoded, values);

    let runtime = RuntimeFormat::parse("s16ne").unwrap();
    assert_eq!(runtime, native);
    let decoded: Vec<i16> = Samples::new(bytes, runtime).collect();
    assert_eq!(decoded, values);
}

struct Peak;

impl<'a> Visit<Samples<'a, f64, RuntimeFormat>> for Peak {
    type Output = f64;

    fn call<F: Encoding>(self, samples: Samples<'a, f64, F>) -> f64 {
        samples.fold(0.0f64, |peak, value| peak.max(value.abs()))
    }
}

#[test]
fn custom_kernel_dispatches_on_runtime_format() {
    let bytes = [0x00u8, 0x20, 0x00, 0xa0];
    let format = RuntimeFormat::parse("s16le").unwrap();
    let peak = pcmconv_core::dispatch(Samples::<f64, _>::new(&bytes, format), Peak).unwrap();
    assert_eq!(peak, 0.75);
}
