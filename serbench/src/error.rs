//! Error types and helpers.
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("Attempting to read {0} bytes")]
    ReadSizeLimit(usize),
    #[error("Attempting to write {0} bytes")]
    WriteSizeLimit(usize),
    #[error(
        "Encoded sequence length exceeded preallocation limit of {limit} bytes (needed {needed} \
         bytes)"
    )]
    PreallocationSizeLimit { needed: usize, limit: usize },
    #[error("Encoded sequence length would overflow {0}")]
    SizeHintOverflow(&'static str),
    #[error("Could not cast integer type to pointer sized type")]
    PointerSizedDecodeError,
    #[error("Writer has trailing bytes: {0}")]
    WriterTrailingBytes(usize),
    #[error("Computing size of type would overflow usize::MAX")]
    SizeOfOverflow,
    #[error("External format error: {0}")]
    External(String),
}

pub type Result<T> = core::result::Result<T, Error>;

#[cold]
pub const fn read_size_limit(len: usize) -> Error {
    Error::ReadSizeLimit(len)
}

#[cold]
pub const fn write_size_limit(len: usize) -> Error {
    Error::WriteSizeLimit(len)
}

#[cold]
pub const fn preallocation_size_limit(needed: usize, limit: usize) -> Error {
    Error::PreallocationSizeLimit { needed, limit }
}

#[cold]
pub const fn size_hint_overflow(max_length: &'static str) -> Error {
    Error::SizeHintOverflow(max_length)
}

#[cold]
pub const fn pointer_sized_decode_error() -> Error {
    Error::PointerSizedDecodeError
}

#[cold]
pub const fn writer_trailing_bytes(bytes: usize) -> Error {
    Error::WriterTrailingBytes(bytes)
}

#[cold]
pub const fn size_of_overflow() -> Error {
    Error::SizeOfOverflow
}

#[cold]
pub fn external(err: impl core::fmt::Display) -> Error {
    Error::External(err.to_string())
}
