//! Codec that frames blocks without transforming them.

use std::borrow::Cow;

use super::frame::{decode_frames, write_frame, FrameHeader};
use super::BlockCodec;
use crate::error::{Error, Result};
use crate::stream::ByteStream;

/// Identity codec: every block is written as a stored frame.
///
/// Useful for already-compressed data and as a reference codec in tests.
/// Frames with a compressed payload are rejected.
#[derive(Debug, Default, Clone, Copy)]
pub struct StoredCodec;

impl StoredCodec {
    pub const NAME: &'static str = "stored";

    pub fn new() -> Self {
        StoredCodec
    }
}

fn stored_payload<'a>(codec: &'static str, header: &FrameHeader, payload: &'a [u8]) -> Result<Cow<'a, [u8]>> {
    if !header.stored {
        return Err(Error::decode(codec, "compressed block requires the lz4 codec"));
    }
    Ok(Cow::Borrowed(payload))
}

impl BlockCodec for StoredCodec {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn encode(&mut self, block: &[u8], out: &mut ByteStream) -> Result<()> {
        write_frame(Self::NAME, out, true, block, block)
    }

    fn decode(&mut self, input: &[u8], out: &mut ByteStream) -> Result<usize> {
        decode_frames(Self::NAME, input, out, stored_payload)
    }
}
