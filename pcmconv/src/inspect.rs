use std::path::PathBuf;

use pcmconv_core::Samples;
use pcmconv_format::{Format, RuntimeFormat};
use structopt::StructOpt;

use crate::convert::open_error;
use crate::RunError;

#[derive(StructOpt)]
pub struct InspectOpt {
    /// Sample format of the input, eg. s16le
    #[structopt(long)]
    pub format: RuntimeFormat,

    /// Number of samples to print
    #[structopt(long, default_value = "16")]
    pub count: usize,

    pub input: PathBuf,
}

pub fn run(opt: InspectOpt) -> Result<(), RunError> {
    let bytes = std::fs::read(&opt.input)
        .map_err(|err| open_error(&opt.input, err))?;

    for line in describe(&bytes, opt.format, opt.count) {
        println!("{line}");
    }

    Ok(())
}

/// One line per sample: its index, raw bytes and value as a float.
pub fn describe(bytes: &[u8], format: RuntimeFormat, count: usize) -> Vec<String> {
    let size = format.sample_size();

    Samples::<f64, _>::new(bytes, format)
        .take(count)
        .enumerate()
        .map(|(index, value)| {
            let raw = &bytes[index * size..][..size];
            let hex: String = raw.iter().map(|byte| format!("{byte:02x}")).collect();
            format!("{index:>6}  {hex:>16}  {value:+.9}")
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn describes_leading_samples() {
        let bytes = [0x00u8, 0x40, 0x00, 0xc0, 0xff, 0x7f];
        let format = "s16le".parse().unwrap();

        let lines = describe(&bytes, format, 2);
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("0040"));
        assert!(lines[0].ends_with("+0.500000000"));
        assert!(lines[1].ends_with("-0.500000000"));
    }

    #[test]
    fn stops_at_end_of_input() {
        let bytes = [0x80u8, 0x00, 0x7f];
        let lines = describe(&bytes, "u8le".parse().unwrap(), 16);
        assert_eq!(lines.len(), 3);
        assert!(lines[0].ends_with("+0.000000000"));
    }
}
