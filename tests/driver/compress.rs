// Integration tests for src/driver/compress.rs — block-chunked Compressor.
//
// Verifies:
//   - whole blocks are emitted exactly when the running total crosses a
//     block boundary; the remainder stays staged
//   - remainder conservation before flush
//   - flush encodes the final short block and retires the driver
//   - use after flush is a Usage error
//   - a codec failure leaves staged bytes and counters as they were

use blockfile::config::{FRAME_CHECKSUM_SIZE, FRAME_HEADER_SIZE};
use blockfile::{decompress_all, BlockCodec, ByteStream, Compressor, Error, Result, StoredCodec};

const OVERHEAD: usize = FRAME_HEADER_SIZE + FRAME_CHECKSUM_SIZE;

fn cycling_bytes(len: usize) -> Vec<u8> {
    (0u8..=255).cycle().take(len).collect()
}

#[test]
fn emits_on_block_boundaries_only() {
    let mut c = Compressor::with_codec(StoredCodec, 10).unwrap();
    assert!(c.compress(&[0u8; 9]).unwrap().is_empty());
    assert_eq!(c.staged_len(), 9);

    let out = c.compress(&[1u8; 1]).unwrap();
    assert_eq!(out.len(), 10 + OVERHEAD);
    assert_eq!(c.staged_len(), 0);

    let out = c.compress(&[2u8; 35]).unwrap();
    assert_eq!(out.len(), 3 * (10 + OVERHEAD));
    assert_eq!(c.staged_len(), 5);
    assert_eq!(c.blocks_emitted(), 4);
}

#[test]
fn block_contents_follow_the_running_count() {
    // Blocks are [staged tail of call 1 + head of call 2], then the rest.
    let mut c = Compressor::with_codec(StoredCodec, 4).unwrap();
    c.compress(b"ab").unwrap();
    let out = c.compress(b"cdefgh").unwrap();
    assert_eq!(&out[FRAME_HEADER_SIZE..FRAME_HEADER_SIZE + 4], b"abcd");
    let second = 4 + OVERHEAD;
    assert_eq!(&out[second + FRAME_HEADER_SIZE..second + FRAME_HEADER_SIZE + 4], b"efgh");
}

#[test]
fn remainder_is_conserved_before_flush() {
    let block_size = 7;
    let data = cycling_bytes(500);
    let mut c = Compressor::with_codec(StoredCodec, block_size).unwrap();
    let mut emitted_raw = 0u64;
    for chunk in data.chunks(13) {
        let out = c.compress(chunk).unwrap();
        emitted_raw += (out.len() / (block_size + OVERHEAD) * block_size) as u64;
        assert_eq!(emitted_raw + c.staged_len() as u64, c.total_in());
        assert!(c.staged_len() < block_size);
    }
    assert_eq!(c.total_in(), 500);
}

#[test]
fn flush_emits_short_block_once() {
    let mut c = Compressor::new(64).unwrap();
    c.compress(b"short").unwrap();
    let tail = c.flush().unwrap();
    assert!(!tail.is_empty());
    assert!(c.is_flushed());
    assert!(matches!(c.flush(), Err(Error::Usage(_))));
    assert!(matches!(c.compress(b"more"), Err(Error::Usage(_))));
}

#[test]
fn empty_input_flushes_to_nothing() {
    let mut c = Compressor::new(64).unwrap();
    assert!(c.compress(b"").unwrap().is_empty());
    assert!(c.flush().unwrap().is_empty());
    assert_eq!(c.blocks_emitted(), 0);
}

#[test]
fn counters_track_output() {
    let mut c = Compressor::with_codec(StoredCodec, 3).unwrap();
    let a = c.compress(b"abcdefg").unwrap();
    let b = c.flush().unwrap();
    assert_eq!(c.total_out(), (a.len() + b.len()) as u64);
    assert_eq!(c.blocks_emitted(), 3);
    assert_eq!(c.block_size(), 3);
}

#[test]
fn oversized_block_size_rejected() {
    let too_big = blockfile::config::MAX_BLOCK_SIZE + 1;
    assert!(matches!(Compressor::new(too_big), Err(Error::InvalidArgument(_))));
}

/// Stored codec that fails on the `fail_on`-th encode call (1-based).
struct FlakyCodec {
    calls: usize,
    fail_on: usize,
}

impl BlockCodec for FlakyCodec {
    fn name(&self) -> &'static str {
        "flaky"
    }

    fn encode(&mut self, block: &[u8], out: &mut ByteStream) -> Result<()> {
        self.calls += 1;
        if self.calls == self.fail_on {
            return Err(Error::Codec { codec: "flaky", msg: "injected failure".into() });
        }
        StoredCodec.encode(block, out)
    }

    fn decode(&mut self, input: &[u8], out: &mut ByteStream) -> Result<usize> {
        StoredCodec.decode(input, out)
    }
}

#[test]
fn failed_compress_neither_loses_nor_duplicates_bytes() {
    let mut c = Compressor::with_codec(FlakyCodec { calls: 0, fail_on: 2 }, 4).unwrap();
    assert!(c.compress(b"ab").unwrap().is_empty());

    let err = c.compress(b"cdefghij").unwrap_err();
    assert!(matches!(err, Error::Codec { .. }));
    assert_eq!(c.staged_len(), 2);
    assert_eq!(c.total_in(), 2);
    assert_eq!(c.total_out(), 0);
    assert_eq!(c.blocks_emitted(), 0);

    // Retrying the same bytes succeeds and the stream is intact.
    let mut packed = c.compress(b"cdefghij").unwrap();
    packed.extend(c.flush().unwrap());
    assert_eq!(decompress_all(&packed, 64).unwrap(), b"abcdefghij");
    assert_eq!(c.total_in(), 10);
}

#[test]
fn failed_flush_keeps_the_tail_for_a_retry() {
    let mut c = Compressor::with_codec(FlakyCodec { calls: 0, fail_on: 2 }, 4).unwrap();
    let mut packed = c.compress(b"abcdef").unwrap();

    assert!(matches!(c.flush(), Err(Error::Codec { .. })));
    assert!(!c.is_flushed());
    assert_eq!(c.staged_len(), 2);

    packed.extend(c.flush().unwrap());
    assert_eq!(decompress_all(&packed, 64).unwrap(), b"abcdef");
}
