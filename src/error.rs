//! Crate-wide error type.
//!
//! Every fallible operation in the library returns [`Result`]. Buffer errors,
//! codec errors and misuse of a retired driver all surface immediately to the
//! caller; nothing is retried or swallowed.

use std::io;

use thiserror::Error;

/// Errors produced by byte streams, codecs, drivers and the file adapter.
#[derive(Debug, Error)]
pub enum Error {
    /// A byte stream could not reserve its initial capacity.
    #[error("failed to allocate memory stream of {requested} bytes")]
    Allocation { requested: usize },

    /// A byte stream could not grow to hold an append.
    #[error("failed to write {len} bytes to the memory stream")]
    Write { len: usize },

    /// The requested operation is outside the abstraction (e.g. seeking).
    #[error("unsupported operation: {0}")]
    Unsupported(&'static str),

    /// A byte stream was used after `close()`.
    #[error("operation on a closed memory stream")]
    UseAfterClose,

    /// The codec failed to encode a block.
    #[error("{codec}: failed to encode the data: {msg}")]
    Codec { codec: &'static str, msg: String },

    /// The compressed input is corrupt or truncated.
    #[error("{codec}: failed to decode the data: {msg}")]
    Decode { codec: &'static str, msg: String },

    /// A driver was used after it was flushed or closed.
    #[error("usage error: {0}")]
    Usage(&'static str),

    /// A caller-supplied argument is out of range or malformed.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Read attempted on a file adapter opened for writing.
    #[error("file not open for reading")]
    NotReadable,

    /// Write attempted on a file adapter opened for reading.
    #[error("file not open for writing")]
    NotWritable,

    /// Operation on a file adapter after `close()`.
    #[error("I/O operation on closed file")]
    Closed,

    /// Failure of the underlying handle.
    #[error(transparent)]
    Io(#[from] io::Error),
}

impl Error {
    pub(crate) fn decode(codec: &'static str, msg: impl Into<String>) -> Self {
        Error::Decode { codec, msg: msg.into() }
    }

    pub(crate) fn codec(codec: &'static str, msg: impl Into<String>) -> Self {
        Error::Codec { codec, msg: msg.into() }
    }

    /// `true` for corrupt or truncated compressed input.
    pub fn is_corrupt_input(&self) -> bool {
        matches!(self, Error::Decode { .. })
    }
}

impl From<Error> for io::Error {
    fn from(e: Error) -> Self {
        let kind = match &e {
            Error::Io(inner) => inner.kind(),
            Error::Decode { .. } => io::ErrorKind::InvalidData,
            Error::Unsupported(_) => io::ErrorKind::Unsupported,
            Error::Allocation { .. } | Error::Write { .. } => io::ErrorKind::OutOfMemory,
            Error::InvalidArgument(_) | Error::NotReadable | Error::NotWritable => {
                io::ErrorKind::InvalidInput
            }
            _ => io::ErrorKind::Other,
        };
        io::Error::new(kind, e)
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;
