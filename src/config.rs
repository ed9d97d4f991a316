// config.rs — Compile-time configuration constants.
//
// Buffer presets, defaults for the drivers, block frame constants and the
// environment variables read by `Preferences::from_env`.

// ── Buffer size presets ──────────────────────────────────────────────────────
pub const KB: usize = 1 << 10;
pub const MB: usize = 1 << 20;

pub const BUFFER_1KIB: usize = KB;
pub const BUFFER_64KIB: usize = 64 * KB;
pub const BUFFER_128KIB: usize = 128 * KB;
pub const BUFFER_256KIB: usize = 256 * KB;
pub const BUFFER_512KIB: usize = 512 * KB;
pub const BUFFER_1MIB: usize = MB;

// Default compressor block size (bytes).
// Overridable by BLOCKFILE_BLOCK_SIZE or `-B#` on the command line.
pub const DEFAULT_BLOCK_SIZE: usize = BUFFER_128KIB;

// Default decompressor memory limit (bytes), used as the initial capacity of
// the staging streams. Overridable by BLOCKFILE_MEM_LIMIT or `-M#`.
pub const DEFAULT_MEM_LIMIT: usize = BUFFER_256KIB;

// Largest block a frame may declare. Decoders reject anything bigger before
// allocating for it.
pub const MAX_BLOCK_SIZE: usize = 64 * MB;

// ── Block frame layout ───────────────────────────────────────────────────────
// "HUF\x01" read little-endian.
pub const FRAME_MAGIC: u32 = 0x0146_5548;
pub const FRAME_HEADER_SIZE: usize = 14;
pub const FRAME_CHECKSUM_SIZE: usize = 4;
pub const FLAG_STORED: u8 = 0x01;
pub const FLAG_RESERVED_MASK: u8 = !FLAG_STORED;

// ── Files ────────────────────────────────────────────────────────────────────
pub const FILE_EXTENSION: &str = ".huf";

// ── Environment overrides ────────────────────────────────────────────────────
pub const ENV_BLOCK_SIZE: &str = "BLOCKFILE_BLOCK_SIZE";
pub const ENV_MEM_LIMIT: &str = "BLOCKFILE_MEM_LIMIT";
pub const ENV_CODEC: &str = "BLOCKFILE_CODEC";
