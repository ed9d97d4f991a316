//! E2E Test Suite: File API
//!
//! Validates `BlockFile` against real files on disk: open modes, append
//! semantics, exclusive create, direction and closed-file errors, and
//! round-trips with both codecs.

use std::fs;
use std::io::{self, Read, Write};

use blockfile::{decompress_all, BlockFile, CodecKind, Error, Preferences};
use tempfile::TempDir;

fn cycling_bytes(len: usize) -> Vec<u8> {
    (0u8..=255).cycle().take(len).collect()
}

fn read_all(path: &std::path::Path) -> Vec<u8> {
    let mut f = BlockFile::open(path, "rb").expect("open for reading");
    let mut out = Vec::new();
    f.read_to_end(&mut out).expect("read_to_end");
    f.close().unwrap();
    out
}

#[test]
fn test_write_read_roundtrip_on_disk() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("data.huf");
    let original = cycling_bytes(300 * 1024);

    let mut f = BlockFile::open(&path, "wb").unwrap();
    for chunk in original.chunks(10_000) {
        f.write_all(chunk).unwrap();
    }
    f.close().unwrap();

    assert_eq!(read_all(&path), original);
    // The file content is an ordinary compressed stream.
    let raw = fs::read(&path).unwrap();
    assert_eq!(decompress_all(&raw, 1024).unwrap(), original);
}

#[test]
fn test_empty_file_roundtrip() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("empty.huf");
    BlockFile::open(&path, "w").unwrap().close().unwrap();
    assert_eq!(fs::metadata(&path).unwrap().len(), 0);
    assert!(read_all(&path).is_empty());
}

#[test]
fn test_append_adds_a_new_run() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("log.huf");

    let mut f = BlockFile::open(&path, "w").unwrap();
    f.write_all(b"first;").unwrap();
    f.close().unwrap();

    let mut f = BlockFile::open(&path, "a").unwrap();
    f.write_all(b"second").unwrap();
    f.close().unwrap();

    assert_eq!(read_all(&path), b"first;second");
}

#[test]
fn test_exclusive_create_refuses_existing_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("x.huf");
    BlockFile::open(&path, "xb").unwrap().close().unwrap();
    match BlockFile::open(&path, "x") {
        Err(Error::Io(e)) => assert_eq!(e.kind(), io::ErrorKind::AlreadyExists),
        Err(e) => panic!("unexpected error: {e}"),
        Ok(_) => panic!("exclusive create must fail on an existing file"),
    }
}

#[test]
fn test_invalid_mode() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("m.huf");
    assert!(matches!(BlockFile::open(&path, "r+"), Err(Error::InvalidArgument(_))));
    assert!(!path.exists());
}

#[test]
fn test_drop_finishes_the_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("dropped.huf");
    {
        let mut f = BlockFile::open(&path, "wb").unwrap();
        f.write_all(b"written before drop").unwrap();
    }
    assert_eq!(read_all(&path), b"written before drop");
}

#[test]
fn test_stored_codec_preferences() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("stored.huf");
    let mut prefs = Preferences::new();
    prefs.set_codec(CodecKind::Stored).set_block_size(1000).unwrap();

    let data = cycling_bytes(4500);
    let mut f = BlockFile::open_with(&path, "wb", &prefs).unwrap();
    f.write_all(&data).unwrap();
    f.close().unwrap();

    let mut r = BlockFile::open_with(&path, "rb", &prefs).unwrap();
    let mut out = Vec::new();
    r.read_to_end(&mut out).unwrap();
    assert_eq!(out, data);
}

#[test]
fn test_corrupt_file_is_invalid_data() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("corrupt.huf");
    let mut f = BlockFile::open(&path, "wb").unwrap();
    f.write_all(&cycling_bytes(2048)).unwrap();
    f.close().unwrap();

    let mut raw = fs::read(&path).unwrap();
    raw[0] = b'X';
    fs::write(&path, raw).unwrap();

    let mut r = BlockFile::open(&path, "rb").unwrap();
    let err = r.read_to_end(&mut Vec::new()).unwrap_err();
    assert_eq!(err.kind(), io::ErrorKind::InvalidData);
}

#[test]
fn test_small_read_buffer_loop() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("small.huf");
    let data = cycling_bytes(5000);
    let mut f = BlockFile::open(&path, "wb").unwrap();
    f.write_all(&data).unwrap();
    f.close().unwrap();

    let mut r = BlockFile::open(&path, "rb").unwrap();
    let mut out = Vec::new();
    let mut buf = [0u8; 7];
    loop {
        let n = r.read(&mut buf).unwrap();
        if n == 0 {
            break;
        }
        out.extend_from_slice(&buf[..n]);
    }
    assert_eq!(out, data);
    assert!(r.readable().unwrap());
    assert!(!r.writable().unwrap());
}
