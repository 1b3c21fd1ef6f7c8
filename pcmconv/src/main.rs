mod config;
mod convert;
mod formats;
mod inspect;

use std::process::ExitCode;

use log::LevelFilter;
use structopt::StructOpt;
use thiserror::Error;

#[derive(StructOpt)]
enum Opt {
    /// Convert a raw PCM file from one sample format to another
    Convert(convert::ConvertOpt),
    /// List supported sample formats
    Formats(formats::FormatsOpt),
    /// Print the first samples of a raw PCM file
    Inspect(inspect::InspectOpt),
}

#[derive(Debug, Error)]
pub enum RunError {
    #[error("opening {path}: {err}")]
    Open { path: String, err: std::io::Error },
    #[error("reading input: {0}")]
    Read(std::io::Error),
    #[error("writing output: {0}")]
    Write(std::io::Error),
    #[error("converting samples: {0}")]
    Convert(#[from] pcmconv_core::Error),
    #[error("config: {0}")]
    Config(#[from] config::ConfigError),
}

impl From<pcmconv_core::DispatchMismatch> for RunError {
    fn from(err: pcmconv_core::DispatchMismatch) -> Self {
        RunError::Convert(err.into())
    }
}

impl From<pcmconv_core::TrailingBytes> for RunError {
    fn from(err: pcmconv_core::TrailingBytes) -> Self {
        RunError::Convert(err.into())
    }
}

fn main() -> Result<(), ExitCode> {
    init_log();

    run().map_err(|err| {
        log::error!("fatal: {err}");
        ExitCode::FAILURE
    })
}

fn run() -> Result<(), RunError> {
    if let Some(config) = config::read()? {
        config::load_into_env(&config);
    }

    match Opt::from_args() {
        Opt::Convert(opt) => convert::run(opt),
        Opt::Formats(opt) => formats::run(opt),
        Opt::Inspect(opt) => inspect::run(opt),
    }
}

fn init_log() {
    env_logger::builder()
        .format_timestamp_millis()
        .filter_level(default_log_level())
        .parse_default_env()
        .init();
}

fn default_log_level() -> LevelFilter {
    if cfg!(debug_assertions) {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    }
}
