//! Self-describing block frame shared by every codec.
//!
//! ```text
//! magic(4) flags(1) raw_len(4) payload_len(4) hc(1) | payload | xxh32(raw)(4)
//! ```
//!
//! All integers are little-endian. `hc` is the header checksum over the
//! first 13 bytes. Flag bit 0 marks a payload stored without transformation.

use std::borrow::Cow;

use crate::config::{
    FLAG_RESERVED_MASK, FLAG_STORED, FRAME_CHECKSUM_SIZE, FRAME_HEADER_SIZE, FRAME_MAGIC,
    MAX_BLOCK_SIZE,
};
use crate::error::{Error, Result};
use crate::stream::ByteStream;
use crate::xxhash::{header_checksum, xxh32_oneshot};

/// Decoded view of a frame header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameHeader {
    pub stored: bool,
    pub raw_len: usize,
    pub payload_len: usize,
}

impl FrameHeader {
    /// Total encoded size of the frame, header and trailer included.
    pub fn frame_len(&self) -> usize {
        FRAME_HEADER_SIZE + self.payload_len + FRAME_CHECKSUM_SIZE
    }
}

#[inline]
fn read_le32(src: &[u8], offset: usize) -> u32 {
    u32::from_le_bytes([src[offset], src[offset + 1], src[offset + 2], src[offset + 3]])
}

/// Append one frame carrying `payload` for the decoded block `raw`.
pub fn write_frame(
    codec: &'static str,
    out: &mut ByteStream,
    stored: bool,
    raw: &[u8],
    payload: &[u8],
) -> Result<()> {
    if raw.len() > MAX_BLOCK_SIZE {
        return Err(Error::codec(
            codec,
            format!("block of {} bytes exceeds the {} byte limit", raw.len(), MAX_BLOCK_SIZE),
        ));
    }
    let mut header = [0u8; FRAME_HEADER_SIZE];
    header[0..4].copy_from_slice(&FRAME_MAGIC.to_le_bytes());
    header[4] = if stored { FLAG_STORED } else { 0 };
    header[5..9].copy_from_slice(&(raw.len() as u32).to_le_bytes());
    header[9..13].copy_from_slice(&(payload.len() as u32).to_le_bytes());
    header[13] = header_checksum(&header[..13]);

    out.write(&header)?;
    out.write(payload)?;
    out.write(&xxh32_oneshot(raw, 0).to_le_bytes())?;
    Ok(())
}

/// Parse the header at the start of `input`.
///
/// Returns `Ok(None)` when fewer than a header's worth of bytes are present.
/// A wrong magic is reported as soon as four bytes are available.
pub fn parse_header(codec: &'static str, input: &[u8]) -> Result<Option<FrameHeader>> {
    if input.len() >= 4 && read_le32(input, 0) != FRAME_MAGIC {
        return Err(Error::decode(codec, "invalid block magic number"));
    }
    if input.len() < FRAME_HEADER_SIZE {
        return Ok(None);
    }
    if header_checksum(&input[..13]) != input[13] {
        return Err(Error::decode(codec, "block header checksum mismatch"));
    }
    let flags = input[4];
    if flags & FLAG_RESERVED_MASK != 0 {
        return Err(Error::decode(codec, "reserved block flag set"));
    }
    let header = FrameHeader {
        stored: flags & FLAG_STORED != 0,
        raw_len: read_le32(input, 5) as usize,
        payload_len: read_le32(input, 9) as usize,
    };
    if header.raw_len > MAX_BLOCK_SIZE {
        return Err(Error::decode(
            codec,
            format!("declared block size {} exceeds the {} byte limit", header.raw_len, MAX_BLOCK_SIZE),
        ));
    }
    if header.stored && header.payload_len != header.raw_len {
        return Err(Error::decode(codec, "stored block length mismatch"));
    }
    if !header.stored && header.payload_len >= header.raw_len {
        return Err(Error::decode(codec, "compressed block is not smaller than its content"));
    }
    Ok(Some(header))
}

/// Payload decoder plugged into [`decode_frames`].
pub type PayloadDecoder = for<'a> fn(&'static str, &FrameHeader, &'a [u8]) -> Result<Cow<'a, [u8]>>;

/// Decode every complete frame at the start of `input` into `out`.
///
/// Returns the number of bytes consumed. A trailing incomplete frame is left
/// unconsumed.
pub fn decode_frames(
    codec: &'static str,
    input: &[u8],
    out: &mut ByteStream,
    decode_payload: PayloadDecoder,
) -> Result<usize> {
    let mut consumed = 0usize;
    while consumed < input.len() {
        let rest = &input[consumed..];
        let header = match parse_header(codec, rest)? {
            Some(h) => h,
            None => break,
        };
        let frame_len = header.frame_len();
        if rest.len() < frame_len {
            break;
        }
        let payload = &rest[FRAME_HEADER_SIZE..FRAME_HEADER_SIZE + header.payload_len];
        let decoded = decode_payload(codec, &header, payload)?;
        if decoded.len() != header.raw_len {
            return Err(Error::decode(
                codec,
                format!("decoded {} bytes, header declares {}", decoded.len(), header.raw_len),
            ));
        }
        let expected = read_le32(rest, FRAME_HEADER_SIZE + header.payload_len);
        if xxh32_oneshot(&decoded, 0) != expected {
            return Err(Error::decode(codec, "block content checksum mismatch"));
        }
        out.write(&decoded)?;
        consumed += frame_len;
    }
    Ok(consumed)
}
