// blockfile — block-chunked streaming compression over pluggable block codecs

pub mod config;
pub mod error;
pub mod xxhash;
pub mod stream;
pub mod codec;
pub mod prefs;
pub mod driver;
pub mod file;
pub mod cli;

pub const VERSION_STRING: &str = env!("CARGO_PKG_VERSION");

/// Returns the library version string.
pub fn version_string() -> &'static str {
    VERSION_STRING
}

// ── Top-level re-exports ──────────────────────────────────────────────────────
pub use codec::{BlockCodec, CodecKind, Lz4Codec, StoredCodec};
pub use driver::{compress_all, compress_with, decompress_all, decompress_with, Compressor, Decompressor};
pub use error::{Error, Result};
pub use file::{BlockFile, Mode};
pub use prefs::Preferences;
pub use stream::ByteStream;
