//! Block-chunked compression driver.
//!
//! [`Compressor`] accepts writes of any length and hands the codec only whole
//! blocks of exactly `block_size` bytes. Bytes that do not complete a block
//! stay staged in the input stream until the next [`Compressor::compress`]
//! or the terminal [`Compressor::flush`], which encodes them as one final
//! short block.
//!
//! Feeding the same data in any split produces the same output as a single
//! call, because block boundaries depend only on the running byte count.

use log::{debug, trace};

use crate::codec::{BlockCodec, Lz4Codec};
use crate::error::{Error, Result};
use crate::prefs::validate_block_size;
use crate::stream::ByteStream;

/// Incremental compressor. Not safe for concurrent use without a lock.
pub struct Compressor<C: BlockCodec = Lz4Codec> {
    codec: C,
    block_size: usize,
    flushed: bool,
    input: ByteStream,
    output: ByteStream,
    total_in: u64,
    total_out: u64,
    blocks: u64,
}

impl Compressor<Lz4Codec> {
    /// Compressor using the default LZ4 codec.
    pub fn new(block_size: usize) -> Result<Self> {
        Self::with_codec(Lz4Codec, block_size)
    }
}

impl<C: BlockCodec> Compressor<C> {
    /// Compressor with an explicit codec. `block_size` must be positive.
    pub fn with_codec(codec: C, block_size: usize) -> Result<Self> {
        let block_size = validate_block_size(block_size)?;
        Ok(Compressor {
            codec,
            block_size,
            flushed: false,
            input: ByteStream::open(block_size)?,
            output: ByteStream::open(block_size)?,
            total_in: 0,
            total_out: 0,
            blocks: 0,
        })
    }

    fn encode_staged(&mut self) -> Result<u64> {
        let mut blocks = 0u64;
        for block in self.input.snapshot()?.chunks(self.block_size) {
            trace!("{}: encoding block of {} bytes", self.codec.name(), block.len());
            self.codec.encode(block, &mut self.output)?;
            blocks += 1;
        }
        Ok(blocks)
    }

    /// Encode the staged bytes, or on failure drop the partial frames and
    /// cut the input back to its first `staged` bytes.
    fn encode_or_restore(&mut self, staged: usize) -> Result<u64> {
        match self.encode_staged() {
            Ok(blocks) => Ok(blocks),
            Err(e) => {
                self.output.rewind()?;
                self.input.truncate(staged)?;
                debug!("{}: encode failed, {} staged bytes kept: {}", self.codec.name(), staged, e);
                Err(e)
            }
        }
    }

    /// Provide `data` to the compressor.
    ///
    /// Returns the frames of every block completed by this call, or an empty
    /// vector if no block was completed. Fails with [`Error::Usage`] after
    /// [`flush`](Self::flush).
    pub fn compress(&mut self, data: &[u8]) -> Result<Vec<u8>> {
        if self.flushed {
            return Err(Error::Usage("compress called on a flushed compressor"));
        }

        let staged = self.input.len()?;
        let total = staged + data.len();
        let num_blocks = total / self.block_size;
        let block_bytes = num_blocks * self.block_size;

        let mut encoding = Vec::new();
        let mut take = 0usize;

        if num_blocks > 0 {
            // staged < block_size, so block_bytes always covers it.
            take = block_bytes - staged;
            self.input.write(&data[..take])?;

            let emitted = self.encode_or_restore(staged)?;
            encoding = self.output.to_vec()?;
            self.input.rewind()?;
            self.output.rewind()?;

            self.blocks += emitted;
            self.total_out += encoding.len() as u64;
            debug!(
                "{}: {} block(s), {} -> {} bytes",
                self.codec.name(),
                emitted,
                block_bytes,
                encoding.len()
            );
        }

        if take < data.len() {
            self.input.write(&data[take..])?;
        }
        self.total_in += data.len() as u64;

        Ok(encoding)
    }

    /// Encode whatever is staged as a final, possibly short, block and retire
    /// the compressor. A second call fails with [`Error::Usage`].
    pub fn flush(&mut self) -> Result<Vec<u8>> {
        if self.flushed {
            return Err(Error::Usage("flush called on a flushed compressor"));
        }

        let staged = self.input.len()?;
        let mut encoding = Vec::new();
        if staged > 0 {
            self.blocks += self.encode_or_restore(staged)?;
            encoding = self.output.to_vec()?;
            self.total_out += encoding.len() as u64;
        }
        debug!(
            "{}: flushed {} staged bytes into {} bytes ({} blocks total)",
            self.codec.name(),
            staged,
            encoding.len(),
            self.blocks
        );

        self.input.close()?;
        self.output.close()?;
        self.flushed = true;

        Ok(encoding)
    }

    pub fn block_size(&self) -> usize {
        self.block_size
    }

    pub fn codec(&self) -> &C {
        &self.codec
    }

    pub fn is_flushed(&self) -> bool {
        self.flushed
    }

    /// Bytes waiting for a block to complete (0 once flushed).
    pub fn staged_len(&self) -> usize {
        if self.flushed {
            0
        } else {
            self.input.len().unwrap_or(0)
        }
    }

    /// Bytes accepted by `compress` so far.
    pub fn total_in(&self) -> u64 {
        self.total_in
    }

    /// Compressed bytes returned so far.
    pub fn total_out(&self) -> u64 {
        self.total_out
    }

    /// Blocks handed to the codec so far.
    pub fn blocks_emitted(&self) -> u64 {
        self.blocks
    }
}
