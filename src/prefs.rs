//! User preferences shared by the drivers, the file adapter and the CLI.
//!
//! [`Preferences`] carries the compressor block size, the decompressor memory
//! limit and the codec choice. Setters validate their argument and return
//! `Result<&mut Self>` so they chain with `?`.

use std::env;

use log::warn;

use crate::codec::CodecKind;
use crate::config::{
    DEFAULT_BLOCK_SIZE, DEFAULT_MEM_LIMIT, ENV_BLOCK_SIZE, ENV_CODEC, ENV_MEM_LIMIT,
    MAX_BLOCK_SIZE,
};
use crate::error::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Preferences {
    block_size: usize,
    mem_limit: usize,
    codec: CodecKind,
}

impl Default for Preferences {
    fn default() -> Self {
        Preferences {
            block_size: DEFAULT_BLOCK_SIZE,
            mem_limit: DEFAULT_MEM_LIMIT,
            codec: CodecKind::default(),
        }
    }
}

/// Check a compressor block size: `1..=MAX_BLOCK_SIZE`.
pub fn validate_block_size(block_size: usize) -> Result<usize> {
    if block_size == 0 {
        return Err(Error::InvalidArgument("block size must be positive".into()));
    }
    if block_size > MAX_BLOCK_SIZE {
        return Err(Error::InvalidArgument(format!(
            "block size {block_size} exceeds the {MAX_BLOCK_SIZE} byte limit"
        )));
    }
    Ok(block_size)
}

impl Preferences {
    pub fn new() -> Self {
        Self::default()
    }

    /// Defaults overridden by `BLOCKFILE_BLOCK_SIZE`, `BLOCKFILE_MEM_LIMIT`
    /// and `BLOCKFILE_CODEC`. Unparseable values are ignored with a warning.
    pub fn from_env() -> Self {
        let mut prefs = Self::default();
        if let Ok(v) = env::var(ENV_BLOCK_SIZE) {
            match v.trim().parse::<usize>() {
                Ok(n) => {
                    if let Err(e) = prefs.set_block_size(n) {
                        warn!("ignoring {ENV_BLOCK_SIZE}={v}: {e}");
                    }
                }
                Err(e) => warn!("ignoring {ENV_BLOCK_SIZE}={v}: {e}"),
            }
        }
        if let Ok(v) = env::var(ENV_MEM_LIMIT) {
            match v.trim().parse::<usize>() {
                Ok(n) => {
                    if let Err(e) = prefs.set_mem_limit(n) {
                        warn!("ignoring {ENV_MEM_LIMIT}={v}: {e}");
                    }
                }
                Err(e) => warn!("ignoring {ENV_MEM_LIMIT}={v}: {e}"),
            }
        }
        if let Ok(v) = env::var(ENV_CODEC) {
            match v.trim().parse::<CodecKind>() {
                Ok(kind) => {
                    prefs.set_codec(kind);
                }
                Err(e) => warn!("ignoring {ENV_CODEC}={v}: {e}"),
            }
        }
        prefs
    }

    pub fn block_size(&self) -> usize {
        self.block_size
    }

    pub fn mem_limit(&self) -> usize {
        self.mem_limit
    }

    pub fn codec(&self) -> CodecKind {
        self.codec
    }

    pub fn set_block_size(&mut self, block_size: usize) -> Result<&mut Self> {
        self.block_size = validate_block_size(block_size)?;
        Ok(self)
    }

    pub fn set_mem_limit(&mut self, mem_limit: usize) -> Result<&mut Self> {
        if mem_limit == 0 {
            return Err(Error::InvalidArgument("memory limit must be positive".into()));
        }
        self.mem_limit = mem_limit;
        Ok(self)
    }

    pub fn set_codec(&mut self, codec: CodecKind) -> &mut Self {
        self.codec = codec;
        self
    }
}
