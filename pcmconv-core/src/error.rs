use pcmconv_format::FormatError;
use thiserror::Error;

use crate::dispatch::DispatchMismatch;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("buffer of {length} bytes is not a whole number of {sample_size} byte samples")]
pub struct TrailingBytes {
    pub length: usize,
    pub sample_size: usize,
}

impl TrailingBytes {
    /// Bytes after the last whole sample
    pub fn trailing(&self) -> usize {
        self.length % self.sample_size
    }
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid format: {0}")]
    Format(#[from] FormatError),
    #[error("dispatch failed: {0}")]
    Dispatch(#[from] DispatchMismatch),
    #[error("{0}")]
    TrailingBytes(#[from] TrailingBytes),
}
