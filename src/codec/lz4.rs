//! LZ4 block codec backed by `lz4_flex`.
//!
//! Each block is compressed independently. When LZ4 does not make a block
//! strictly smaller the block is written as a stored frame instead, so the
//! worst case costs only the frame overhead.

use std::borrow::Cow;

use lz4_flex::block::{compress, decompress};

use super::frame::{decode_frames, write_frame, FrameHeader};
use super::BlockCodec;
use crate::error::{Error, Result};
use crate::stream::ByteStream;

/// LZ4 block codec. Decodes both compressed and stored frames.
#[derive(Debug, Default, Clone, Copy)]
pub struct Lz4Codec;

impl Lz4Codec {
    pub const NAME: &'static str = "lz4";

    pub fn new() -> Self {
        Lz4Codec
    }
}

fn lz4_payload<'a>(codec: &'static str, header: &FrameHeader, payload: &'a [u8]) -> Result<Cow<'a, [u8]>> {
    if header.stored {
        return Ok(Cow::Borrowed(payload));
    }
    decompress(payload, header.raw_len)
        .map(Cow::Owned)
        .map_err(|e| Error::decode(codec, e.to_string()))
}

impl BlockCodec for Lz4Codec {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn encode(&mut self, block: &[u8], out: &mut ByteStream) -> Result<()> {
        let packed = compress(block);
        if packed.len() < block.len() {
            write_frame(Self::NAME, out, false, block, &packed)
        } else {
            write_frame(Self::NAME, out, true, block, block)
        }
    }

    fn decode(&mut self, input: &[u8], out: &mut ByteStream) -> Result<usize> {
        decode_frames(Self::NAME, input, out, lz4_payload)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FRAME_HEADER_SIZE;

    #[test]
    fn repetitive_block_is_compressed() {
        let block = b"abcdabcdabcdabcd".repeat(64);
        let mut out = ByteStream::open(64).unwrap();
        Lz4Codec.encode(&block, &mut out).unwrap();
        let frame = out.to_vec().unwrap();
        assert_eq!(frame[4], 0, "expected a compressed frame");
        assert!(frame.len() < block.len());
    }

    #[test]
    fn incompressible_block_falls_back_to_stored() {
        let block: Vec<u8> = (0u32..256).map(|i| (i.wrapping_mul(2_654_435_761) >> 13) as u8).collect();
        let mut out = ByteStream::open(64).unwrap();
        Lz4Codec.encode(&block[..8], &mut out).unwrap();
        let frame = out.to_vec().unwrap();
        assert_eq!(frame[4], crate::config::FLAG_STORED);
        assert_eq!(&frame[FRAME_HEADER_SIZE..FRAME_HEADER_SIZE + 8], &block[..8]);
    }

    #[test]
    fn corrupt_payload_is_reported() {
        let block = vec![b'z'; 4096];
        let mut out = ByteStream::open(64).unwrap();
        Lz4Codec.encode(&block, &mut out).unwrap();
        let mut frame = out.to_vec().unwrap();
        // Scramble the token stream; either LZ4 or the checksum must object.
        for b in &mut frame[FRAME_HEADER_SIZE..FRAME_HEADER_SIZE + 4] {
            *b ^= 0xA5;
        }
        let mut decoded = ByteStream::open(64).unwrap();
        let err = Lz4Codec.decode(&frame, &mut decoded).unwrap_err();
        assert!(err.is_corrupt_input());
    }
}
