//! Decompression driver.
//!
//! Frames are self-describing, so [`Decompressor`] has no block size of its
//! own: it accumulates input, lets the codec decode every complete frame, and
//! keeps the unconsumed tail (an incomplete frame) for the next call.

use log::{debug, trace};

use crate::codec::{BlockCodec, Lz4Codec};
use crate::error::{Error, Result};
use crate::stream::ByteStream;

/// Incremental decompressor. Not safe for concurrent use without a lock.
pub struct Decompressor<C: BlockCodec = Lz4Codec> {
    codec: C,
    closed: bool,
    input: ByteStream,
    output: ByteStream,
    total_in: u64,
    total_out: u64,
}

impl Decompressor<Lz4Codec> {
    /// Decompressor using the LZ4 codec (which also reads stored frames).
    /// `mem_limit` sizes the staging streams.
    pub fn new(mem_limit: usize) -> Result<Self> {
        Self::with_codec(Lz4Codec, mem_limit)
    }
}

impl<C: BlockCodec> Decompressor<C> {
    pub fn with_codec(codec: C, mem_limit: usize) -> Result<Self> {
        if mem_limit == 0 {
            return Err(Error::InvalidArgument("memory limit must be positive".into()));
        }
        Ok(Decompressor {
            codec,
            closed: false,
            input: ByteStream::open(mem_limit)?,
            output: ByteStream::open(mem_limit)?,
            total_in: 0,
            total_out: 0,
        })
    }

    /// Decompress `data`, returning the bytes of every frame it completes.
    ///
    /// If the accumulated input is the concatenation of several frames, all
    /// of them are decoded and their outputs concatenated. Corrupt input
    /// fails with [`Error::Decode`] and returns nothing.
    pub fn decompress(&mut self, data: &[u8]) -> Result<Vec<u8>> {
        if self.closed {
            return Err(Error::Usage("decompress called on a closed decompressor"));
        }
        self.input.write(data)?;
        self.total_in += data.len() as u64;

        let consumed = match self.codec.decode(self.input.snapshot()?, &mut self.output) {
            Ok(n) => n,
            Err(e) => {
                self.output.rewind()?;
                return Err(e);
            }
        };

        let decoding = self.output.to_vec()?;
        self.output.rewind()?;

        if consumed > 0 {
            let tail = self.input.snapshot()?[consumed..].to_vec();
            self.input.rewind()?;
            self.input.write(&tail)?;
        }
        self.total_out += decoding.len() as u64;

        trace!(
            "{}: consumed {} bytes, {} pending",
            self.codec.name(),
            consumed,
            self.input.len()?
        );
        if !decoding.is_empty() {
            debug!("{}: decoded {} bytes", self.codec.name(), decoding.len());
        }

        Ok(decoding)
    }

    /// Release both streams.
    ///
    /// If an incomplete frame was still pending the streams are released
    /// anyway and [`Error::Decode`] reports the truncation. A second call
    /// fails with [`Error::Usage`].
    pub fn close(&mut self) -> Result<()> {
        if self.closed {
            return Err(Error::Usage("close called on a closed decompressor"));
        }
        let pending = self.input.len()?;
        self.input.close()?;
        self.output.close()?;
        self.closed = true;

        if pending > 0 {
            return Err(Error::decode(
                self.codec.name(),
                format!("truncated input: {pending} bytes of an incomplete block"),
            ));
        }
        Ok(())
    }

    pub fn codec(&self) -> &C {
        &self.codec
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Bytes received but not yet decoded (an incomplete frame).
    pub fn unused_len(&self) -> usize {
        if self.closed {
            0
        } else {
            self.input.len().unwrap_or(0)
        }
    }

    /// `true` while a partial frame is waiting for more input.
    pub fn needs_input(&self) -> bool {
        self.unused_len() > 0
    }

    pub fn total_in(&self) -> u64 {
        self.total_in
    }

    pub fn total_out(&self) -> u64 {
        self.total_out
    }
}
