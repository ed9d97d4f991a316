// e2e/cli_integration.rs — CLI integration tests
//
// Tests the `blockfile` binary as a black-box CLI tool using
// std::process::Command. Covers compress/decompress dispatch, output name
// derivation, overwrite policy, exit codes and error reporting.

use std::fs;
use std::path::PathBuf;
use std::process::Command;
use tempfile::TempDir;

/// Locate the `blockfile` binary produced by Cargo.
fn blockfile_bin() -> PathBuf {
    // CARGO_BIN_EXE_blockfile is set by Cargo when running integration tests.
    if let Some(p) = option_env!("CARGO_BIN_EXE_blockfile") {
        return PathBuf::from(p);
    }
    let mut p = std::env::current_exe().unwrap();
    p.pop();
    if p.ends_with("deps") {
        p.pop();
    }
    p.push("blockfile");
    p
}

/// Create a TempDir containing a text file with ~4 KB of content.
fn make_temp_input() -> (TempDir, PathBuf) {
    let dir = TempDir::new().unwrap();
    let input_path = dir.path().join("input.txt");
    let content = "Hello, blocks!\n".repeat(280);
    fs::write(&input_path, content).unwrap();
    (dir, input_path)
}

// ── 1. Compress / decompress roundtrip ───────────────────────────────────────

#[test]
fn test_cli_compress_decompress_roundtrip() {
    let (dir, input) = make_temp_input();
    let original = fs::read(&input).unwrap();
    let compressed = dir.path().join("output.huf");
    let roundtrip = dir.path().join("roundtrip.txt");

    let status = Command::new(blockfile_bin())
        .args(["-B", "1K", input.to_str().unwrap(), compressed.to_str().unwrap()])
        .status()
        .expect("failed to run blockfile");
    assert!(status.success(), "compress step should exit 0");
    assert!(compressed.exists());

    let status = Command::new(blockfile_bin())
        .args(["-d", compressed.to_str().unwrap(), roundtrip.to_str().unwrap()])
        .status()
        .expect("failed to run blockfile -d");
    assert!(status.success(), "decompress step should exit 0");

    assert_eq!(fs::read(&roundtrip).unwrap(), original);
}

// ── 2. Default output names ──────────────────────────────────────────────────

#[test]
fn test_cli_default_output_names() {
    let (dir, input) = make_temp_input();
    let original = fs::read(&input).unwrap();

    let status = Command::new(blockfile_bin())
        .args(["--codec", "stored", input.to_str().unwrap()])
        .status()
        .unwrap();
    assert!(status.success());
    let compressed = dir.path().join("input.txt.huf");
    assert!(compressed.exists(), "compress should append .huf");

    fs::remove_file(&input).unwrap();
    let status = Command::new(blockfile_bin())
        .args(["-d", compressed.to_str().unwrap()])
        .status()
        .unwrap();
    assert!(status.success());
    assert_eq!(fs::read(&input).unwrap(), original);
}

// ── 3. Overwrite policy ──────────────────────────────────────────────────────

#[test]
fn test_cli_refuses_to_overwrite_without_force() {
    let (dir, input) = make_temp_input();
    let out = dir.path().join("exists.huf");
    fs::write(&out, b"keep me").unwrap();

    let status = Command::new(blockfile_bin())
        .args([input.to_str().unwrap(), out.to_str().unwrap()])
        .status()
        .unwrap();
    assert!(!status.success());
    assert_eq!(fs::read(&out).unwrap(), b"keep me");

    let status = Command::new(blockfile_bin())
        .args(["-f", input.to_str().unwrap(), out.to_str().unwrap()])
        .status()
        .unwrap();
    assert!(status.success());
    assert_ne!(fs::read(&out).unwrap(), b"keep me");
}

// ── 4. --rm removes the source ───────────────────────────────────────────────

#[test]
fn test_cli_rm_removes_source() {
    let (dir, input) = make_temp_input();
    let status = Command::new(blockfile_bin())
        .args(["--rm", input.to_str().unwrap()])
        .status()
        .unwrap();
    assert!(status.success());
    assert!(!input.exists());
    assert!(dir.path().join("input.txt.huf").exists());
}

// ── 5. Errors ────────────────────────────────────────────────────────────────

#[test]
fn test_cli_corrupt_input_fails() {
    let (dir, input) = make_temp_input();
    let bogus = dir.path().join("bogus.huf");
    fs::copy(&input, &bogus).unwrap();

    let output = Command::new(blockfile_bin())
        .args(["-d", "-c", bogus.to_str().unwrap()])
        .output()
        .unwrap();
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("blockfile:"), "stderr: {stderr}");
}

#[test]
fn test_cli_missing_input_creates_no_output() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("missing.txt");
    let status = Command::new(blockfile_bin())
        .arg(missing.to_str().unwrap())
        .status()
        .unwrap();
    assert!(!status.success());
    assert!(!dir.path().join("missing.txt.huf").exists());
}

#[test]
fn test_cli_failed_decode_removes_output_and_allows_retry() {
    let (dir, input) = make_temp_input();
    let bad = dir.path().join("bad.huf");
    fs::copy(&input, &bad).unwrap();
    let out = dir.path().join("bad");

    for _ in 0..2 {
        let output = Command::new(blockfile_bin())
            .args(["-d", bad.to_str().unwrap()])
            .output()
            .unwrap();
        assert!(!output.status.success());
        let stderr = String::from_utf8_lossy(&output.stderr);
        assert!(!stderr.contains("cannot create output"), "stderr: {stderr}");
        assert!(!out.exists(), "failed run left {}", out.display());
    }
}

#[test]
fn test_cli_same_file_through_different_paths() {
    let (dir, input) = make_temp_input();
    let original = fs::read(&input).unwrap();

    // Relative input, absolute output: same file, different spellings.
    let status = Command::new(blockfile_bin())
        .current_dir(dir.path())
        .args(["-f", "input.txt", input.to_str().unwrap()])
        .status()
        .unwrap();
    assert!(!status.success());
    assert_eq!(fs::read(&input).unwrap(), original);
}

#[test]
fn test_cli_unknown_suffix_on_decompress() {
    let (_dir, input) = make_temp_input();
    let output = Command::new(blockfile_bin())
        .args(["-d", input.to_str().unwrap()])
        .output()
        .unwrap();
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("unknown suffix"));
}

#[test]
fn test_cli_stdout() {
    let (_dir, input) = make_temp_input();
    let output = Command::new(blockfile_bin())
        .args(["-c", input.to_str().unwrap()])
        .output()
        .unwrap();
    assert!(output.status.success());
    let decoded = blockfile::decompress_all(&output.stdout, 1024).unwrap();
    assert_eq!(decoded, fs::read(&input).unwrap());
}

#[test]
fn test_cli_help() {
    let output = Command::new(blockfile_bin()).arg("--help").output().unwrap();
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).to_lowercase().contains("usage"));
}
