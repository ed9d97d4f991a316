//! Block-chunked codec drivers and one-shot helpers.

pub mod compress;
pub mod decompress;

pub use compress::Compressor;
pub use decompress::Decompressor;

use crate::codec::{BlockCodec, StoredCodec};
use crate::error::Result;
use crate::prefs::Preferences;

/// Compress `data` in one go with the LZ4 codec.
///
/// Equivalent to one [`Compressor::compress`] followed by
/// [`Compressor::flush`].
pub fn compress_all(data: &[u8], block_size: usize) -> Result<Vec<u8>> {
    let mut comp = Compressor::new(block_size)?;
    run_compressor(&mut comp, data)
}

/// Decompress a complete compressed buffer.
///
/// Several concatenated compressed outputs decode to the concatenation of
/// their inputs. Truncated input is an error.
pub fn decompress_all(data: &[u8], mem_limit: usize) -> Result<Vec<u8>> {
    let mut decomp = Decompressor::new(mem_limit)?;
    run_decompressor(&mut decomp, data)
}

/// [`compress_all`] with block size and codec taken from `prefs`.
pub fn compress_with(data: &[u8], prefs: &Preferences) -> Result<Vec<u8>> {
    let mut comp = Compressor::with_codec(prefs.codec().build(), prefs.block_size())?;
    run_compressor(&mut comp, data)
}

/// [`decompress_all`] with memory limit and codec taken from `prefs`.
pub fn decompress_with(data: &[u8], prefs: &Preferences) -> Result<Vec<u8>> {
    let mut decomp = Decompressor::with_codec(prefs.codec().build(), prefs.mem_limit())?;
    run_decompressor(&mut decomp, data)
}

/// [`compress_all`] without transforming the blocks.
pub fn store_all(data: &[u8], block_size: usize) -> Result<Vec<u8>> {
    let mut comp = Compressor::with_codec(StoredCodec, block_size)?;
    run_compressor(&mut comp, data)
}

fn run_compressor<C: BlockCodec>(comp: &mut Compressor<C>, data: &[u8]) -> Result<Vec<u8>> {
    let mut out = comp.compress(data)?;
    out.extend(comp.flush()?);
    Ok(out)
}

fn run_decompressor<C: BlockCodec>(decomp: &mut Decompressor<C>, data: &[u8]) -> Result<Vec<u8>> {
    let out = decomp.decompress(data)?;
    decomp.close()?;
    Ok(out)
}
