pub mod algorithm;
pub mod convert;
pub mod converted;
pub mod cursor;
pub mod dispatch;
pub mod error;
pub mod format;
pub mod limits;
pub mod marshal;
pub mod operand;
pub mod range;
pub mod sample;
pub mod stream;

pub use algorithm::{copy, copy_between, copy_bounded, copy_n, read, write};
pub use convert::convert;
pub use converted::Converted;
pub use cursor::{Cursor, CursorMut, SampleRef};
pub use dispatch::{dispatch, dispatch2, DispatchMismatch, Operand, Visit, Visit2};
pub use error::{Error, TrailingBytes};
pub use format::SampleFormat;
pub use limits::{numspace, Limits};
pub use marshal::Encoding;
pub use operand::{Sink, Source};
pub use range::Samples;
pub use sample::Sample;
pub use stream::Stream;
