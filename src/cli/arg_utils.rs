// arg_utils.rs — helpers for the `blockfile` command line.

use std::path::{Path, PathBuf};

use crate::config::FILE_EXTENSION;

/// Parses a size with an optional binary suffix.
///
/// Recognised suffixes (case-sensitive):
///   `K` / `KB` / `KiB`  → multiply by 1 024
///   `M` / `MB` / `MiB`  → multiply by 1 048 576
///   `G` / `GB` / `GiB`  → multiply by 1 073 741 824
///
/// Overflow and trailing garbage are errors. Usable directly as a clap
/// `value_parser`.
pub fn parse_size(s: &str) -> Result<usize, String> {
    let digits_end = s.bytes().position(|b| !b.is_ascii_digit()).unwrap_or(s.len());
    if digits_end == 0 {
        return Err(format!("{s:?}: expected a number"));
    }
    let value: usize = s[..digits_end]
        .parse()
        .map_err(|_| format!("{s:?}: number too large"))?;

    let shift = match &s[digits_end..] {
        "" => 0,
        "K" | "KB" | "KiB" => 10,
        "M" | "MB" | "MiB" => 20,
        "G" | "GB" | "GiB" => 30,
        other => return Err(format!("{s:?}: unknown size suffix {other:?}")),
    };
    value
        .checked_mul(1usize << shift)
        .ok_or_else(|| format!("{s:?}: number too large"))
}

/// Default output path for `input`.
///
/// Compressing appends `.huf`. Decompressing strips it, and yields `None`
/// when the input does not carry the suffix.
pub fn default_output_name(input: &Path, decompress: bool) -> Option<PathBuf> {
    let name = input.to_str()?;
    if decompress {
        let stem = name.strip_suffix(FILE_EXTENSION)?;
        if stem.is_empty() || stem.ends_with('/') || stem.ends_with('\\') {
            return None;
        }
        Some(PathBuf::from(stem))
    } else {
        Some(PathBuf::from(format!("{name}{FILE_EXTENSION}")))
    }
}
