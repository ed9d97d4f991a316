// Integration tests for the one-shot helpers in src/driver/mod.rs.

use blockfile::config::{BUFFER_1KIB, BUFFER_64KIB};
use blockfile::{
    compress_all, compress_with, decompress_all, decompress_with, CodecKind, Compressor,
    Preferences,
};

const PRINTABLE: &[u8] =
    b"0123456789abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ!\"#$%&'()*+,-./:;<=>?@[\\]^_`{|}~ \t\n\r\x0b\x0c";

#[test]
fn printable_round_trip_with_small_limits() {
    let packed = compress_all(PRINTABLE, BUFFER_1KIB).unwrap();
    assert_eq!(decompress_all(&packed, BUFFER_1KIB).unwrap(), PRINTABLE);
}

#[test]
fn block_size_one() {
    let packed = compress_all(b"tiny", 1).unwrap();
    assert_eq!(decompress_all(&packed, 1).unwrap(), b"tiny");
}

#[test]
fn shorter_than_one_block() {
    let packed = compress_all(b"abc", BUFFER_64KIB).unwrap();
    assert_eq!(decompress_all(&packed, BUFFER_64KIB).unwrap(), b"abc");
}

#[test]
fn one_shot_equals_incremental() {
    let data: Vec<u8> = b"incremental equivalence ".repeat(100);
    let one_shot = compress_all(&data, 64).unwrap();

    let mut c = Compressor::new(64).unwrap();
    let mut pieces = Vec::new();
    for chunk in data.chunks(37) {
        pieces.extend(c.compress(chunk).unwrap());
    }
    pieces.extend(c.flush().unwrap());
    assert_eq!(pieces, one_shot);
}

#[test]
fn truncated_one_shot_fails() {
    let packed = compress_all(b"needs every byte", 8).unwrap();
    let err = decompress_all(&packed[..packed.len() - 1], 64).unwrap_err();
    assert!(err.is_corrupt_input());
}

#[test]
fn both_codecs_through_preferences() {
    let data: Vec<u8> = (0..10_000u32).map(|i| (i % 251) as u8).collect();
    for kind in [CodecKind::Stored, CodecKind::Lz4] {
        let mut prefs = Preferences::new();
        prefs.set_codec(kind).set_block_size(4096).unwrap();
        let packed = compress_with(&data, &prefs).unwrap();
        assert_eq!(decompress_with(&packed, &prefs).unwrap(), data, "{kind}");
    }
}

#[test]
fn lz4_shrinks_repetitive_input() {
    let data = vec![b'a'; 100_000];
    let packed = compress_all(&data, 16 * 1024).unwrap();
    assert!(packed.len() < data.len() / 10);
}
