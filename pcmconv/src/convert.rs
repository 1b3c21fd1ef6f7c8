use std::fs::File;
use std::io::{self, BufWriter, Read, Write};
use std::path::{Path, PathBuf};

use pcmconv_core::{copy_bounded, write, Sample, Samples};
use pcmconv_format::{Format, RuntimeFormat};
use structopt::StructOpt;

use crate::config::Via;
use crate::RunError;

#[derive(StructOpt)]
pub struct ConvertOpt {
    /// Input sample format, eg. s16le
    #[structopt(long, env = "PCMCONV_FROM")]
    pub from: RuntimeFormat,

    /// Output sample format, eg. f32le
    #[structopt(long, env = "PCMCONV_TO")]
    pub to: RuntimeFormat,

    /// Intermediate value type. Defaults to f64 if either format is
    /// floating point, i64 otherwise
    #[structopt(long, env = "PCMCONV_VIA")]
    pub via: Option<Via>,

    /// Number of samples converted at a time
    #[structopt(long, env = "PCMCONV_CHUNK_SAMPLES", default_value = "4096")]
    pub chunk_samples: usize,

    /// Fail instead of dropping a trailing partial sample
    #[structopt(long)]
    pub strict: bool,

    pub input: PathBuf,
    pub output: PathBuf,
}

#[derive(Debug, Default, PartialEq, Eq)]
pub struct Totals {
    pub samples: usize,
    pub dropped_bytes: usize,
}

pub fn run(opt: ConvertOpt) -> Result<(), RunError> {
    let input = File::open(&opt.input)
        .map_err(|err| open_error(&opt.input, err))?;
    let output = File::create(&opt.output)
        .map_err(|err| open_error(&opt.output, err))?;
    let mut output = BufWriter::new(output);

    let via = opt.via.unwrap_or_else(|| default_via(opt.from, opt.to));

    log::info!("converting {} -> {} via {}", opt.from, opt.to, via);

    let totals = match via {
        Via::F64 => convert::<f64>(&opt, input, &mut output)?,
        Via::I64 => convert::<i64>(&opt, input, &mut output)?,
    };

    output.flush().map_err(RunError::Write)?;

    log::info!("wrote {} samples to {}", totals.samples, opt.output.display());
    Ok(())
}

pub fn open_error(path: &Path, err: io::Error) -> RunError {
    RunError::Open { path: path.display().to_string(), err }
}

pub fn default_via(from: RuntimeFormat, to: RuntimeFormat) -> Via {
    if from.number().is_integer() && to.number().is_integer() {
        Via::I64
    } else {
        Via::F64
    }
}

pub fn convert<V: Sample>(
    opt: &ConvertOpt,
    mut input: impl Read,
    mut output: impl Write,
) -> Result<Totals, RunError> {
    let chunk = opt.chunk_samples.max(1);
    let in_size = opt.from.sample_size();
    let out_size = opt.to.sample_size();

    let mut in_buf = vec![0u8; chunk * in_size];
    let mut values: Vec<V> = bytemuck::zeroed_vec(chunk);
    let mut out_buf = vec![0u8; chunk * out_size];

    let mut totals = Totals::default();

    loop {
        let filled = read_full(&mut input, &mut in_buf).map_err(RunError::Read)?;
        if filled == 0 {
            break;
        }

        let bytes = &in_buf[..filled];

        let samples = if opt.strict {
            Samples::exact(bytes, opt.from)?
        } else {
            Samples::new(bytes, opt.from)
        };

        let (_, rest) = copy_bounded(samples, &mut values[..])?;
        let count = chunk - rest.len();

        let written = write(&values[..count], opt.to, &mut out_buf)?;
        output.write_all(&out_buf[..written * out_size]).map_err(RunError::Write)?;

        totals.samples += written;

        let trailing = filled - count * in_size;
        if trailing > 0 {
            log::warn!("dropped {trailing} trailing bytes, not a whole {} sample", opt.from);
            totals.dropped_bytes += trailing;
        }

        if filled < in_buf.len() {
            break;
        }
    }

    Ok(totals)
}

/// Fills `buf` unless the reader hits end of file first.
fn read_full(input: &mut impl Read, buf: &mut [u8]) -> io::Result<usize> {
    let mut filled = 0;

    while filled < buf.len() {
        match input.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }

    Ok(filled)
}
