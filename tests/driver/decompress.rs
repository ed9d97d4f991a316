// Integration tests for src/driver/decompress.rs — Decompressor.
//
// Verifies:
//   - concatenated outputs decode to the concatenation of the inputs
//   - incomplete frames are carried to the next call
//   - corrupt input (mutated header, mutated payload, garbage) is a Decode
//     error and yields no data
//   - truncation is reported at close

use blockfile::config::FRAME_HEADER_SIZE;
use blockfile::{compress_all, Decompressor, Error, StoredCodec};
use blockfile::driver::store_all;

#[test]
fn concatenated_outputs_decode_in_order() {
    let parts: [&[u8]; 3] = [b"first part, ", b"", b"third part with more text"];
    let mut stream = Vec::new();
    for (i, p) in parts.iter().enumerate() {
        stream.extend(compress_all(p, 4 + i).unwrap());
    }
    let mut d = Decompressor::new(32).unwrap();
    let out = d.decompress(&stream).unwrap();
    assert_eq!(out, parts.concat());
    d.close().unwrap();
}

#[test]
fn split_feed_matches_single_feed() {
    let data: Vec<u8> = b"lorem ipsum dolor sit amet ".repeat(40);
    let packed = compress_all(&data, 50).unwrap();
    for split in [1usize, 3, 17, 200] {
        let mut d = Decompressor::new(16).unwrap();
        let mut out = Vec::new();
        for chunk in packed.chunks(split) {
            out.extend(d.decompress(chunk).unwrap());
        }
        d.close().unwrap();
        assert_eq!(out, data, "split {split}");
    }
}

#[test]
fn mutated_header_is_rejected() {
    let mut packed = store_all(b"some data to protect", 64).unwrap();
    packed[5] ^= 0x01;
    let mut d = Decompressor::with_codec(StoredCodec, 64).unwrap();
    let err = d.decompress(&packed).unwrap_err();
    assert!(matches!(err, Error::Decode { .. }));
}

#[test]
fn mutated_payload_is_rejected() {
    let mut packed = store_all(b"some data to protect", 64).unwrap();
    packed[FRAME_HEADER_SIZE] ^= 0x80;
    let mut d = Decompressor::with_codec(StoredCodec, 64).unwrap();
    assert!(d.decompress(&packed).unwrap_err().is_corrupt_input());
}

#[test]
fn corrupt_second_frame_returns_nothing() {
    let mut packed = store_all(b"aaaabbbb", 4).unwrap();
    let last = packed.len() - 1;
    packed[last] ^= 0xFF;
    let mut d = Decompressor::new(64).unwrap();
    assert!(d.decompress(&packed).is_err());
}

#[test]
fn garbage_is_rejected() {
    let mut d = Decompressor::new(64).unwrap();
    let err = d.decompress(b"this is not a compressed stream").unwrap_err();
    assert!(err.to_string().contains("magic"));
}

#[test]
fn truncated_input_reported_at_close() {
    let packed = compress_all(&[7u8; 1000], 300).unwrap();
    let mut d = Decompressor::new(64).unwrap();
    let out = d.decompress(&packed[..packed.len() - 3]).unwrap();
    assert_eq!(out.len(), 900, "complete blocks decode, the short tail waits");
    assert!(d.needs_input());
    assert!(d.close().unwrap_err().is_corrupt_input());
}

#[test]
fn counters() {
    let packed = compress_all(b"counted", 4).unwrap();
    let mut d = Decompressor::new(8).unwrap();
    d.decompress(&packed).unwrap();
    assert_eq!(d.total_in(), packed.len() as u64);
    assert_eq!(d.total_out(), 7);
    assert_eq!(d.unused_len(), 0);
}

#[test]
fn zero_mem_limit_rejected() {
    assert!(matches!(Decompressor::new(0), Err(Error::InvalidArgument(_))));
}
