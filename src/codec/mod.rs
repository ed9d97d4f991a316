//! Block codecs behind a common trait.
//!
//! The drivers only ever see [`BlockCodec`]: encode one whole block into a
//! frame, or decode as many complete frames as an input run contains. All
//! codecs share the frame layout in [`frame`].

pub mod frame;
pub mod lz4;
pub mod stored;

use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};
use crate::stream::ByteStream;

pub use lz4::Lz4Codec;
pub use stored::StoredCodec;

/// A block-at-a-time encoder/decoder.
pub trait BlockCodec {
    /// Short name used in diagnostics.
    fn name(&self) -> &'static str;

    /// Encode `block` as exactly one frame appended to `out`.
    fn encode(&mut self, block: &[u8], out: &mut ByteStream) -> Result<()>;

    /// Decode every complete frame at the start of `input`, appending the
    /// decoded bytes to `out`. Returns the number of input bytes consumed.
    ///
    /// A trailing incomplete frame is not an error; it is left unconsumed.
    /// Malformed input fails with [`Error::Decode`].
    fn decode(&mut self, input: &[u8], out: &mut ByteStream) -> Result<usize>;
}

impl<T: BlockCodec + ?Sized> BlockCodec for Box<T> {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn encode(&mut self, block: &[u8], out: &mut ByteStream) -> Result<()> {
        (**self).encode(block, out)
    }

    fn decode(&mut self, input: &[u8], out: &mut ByteStream) -> Result<usize> {
        (**self).decode(input, out)
    }
}

/// Runtime codec selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CodecKind {
    Stored,
    #[default]
    Lz4,
}

impl CodecKind {
    pub fn build(self) -> Box<dyn BlockCodec + Send> {
        match self {
            CodecKind::Stored => Box::new(StoredCodec),
            CodecKind::Lz4 => Box::new(Lz4Codec),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            CodecKind::Stored => StoredCodec::NAME,
            CodecKind::Lz4 => Lz4Codec::NAME,
        }
    }
}

impl fmt::Display for CodecKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for CodecKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "stored" | "none" => Ok(CodecKind::Stored),
            "lz4" => Ok(CodecKind::Lz4),
            other => Err(Error::InvalidArgument(format!("unknown codec: {other}"))),
        }
    }
}
