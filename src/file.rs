//! File-like streaming wrapper over the block drivers.
//!
//! [`BlockFile`] wraps a handle (a [`File`] by default) and behaves like a
//! binary file object: in read mode [`Read`] yields decompressed bytes, in
//! write, append and exclusive-create modes [`Write`] compresses what it is
//! given. Seeking is not supported.
//!
//! # Usage
//! ```no_run
//! use blockfile::file::BlockFile;
//! use std::io::{Read, Write};
//!
//! let mut f = BlockFile::open("data.huf", "wb").unwrap();
//! f.write_all(b"hello").unwrap();
//! f.close().unwrap();
//!
//! let mut text = Vec::new();
//! BlockFile::open("data.huf", "rb").unwrap().read_to_end(&mut text).unwrap();
//! ```

use std::fmt;
use std::fs::{File, OpenOptions};
use std::io::{self, Read, SeekFrom, Write};
use std::path::Path;
use std::str::FromStr;

use log::debug;

use crate::codec::BlockCodec;
use crate::driver::{Compressor, Decompressor};
use crate::error::{Error, Result};
use crate::prefs::Preferences;

/// Codec trait object used by [`BlockFile`].
pub type DynCodec = Box<dyn BlockCodec + Send>;

/// Open mode of a [`BlockFile`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// `"r"` / `"rb"`
    Read,
    /// `"w"` / `"wb"`: create or truncate.
    Write,
    /// `"a"` / `"ab"`: create or append a new run of frames.
    Append,
    /// `"x"` / `"xb"`: create, failing if the file exists.
    Create,
}

impl Mode {
    pub fn is_read(self) -> bool {
        self == Mode::Read
    }

    fn as_str(self) -> &'static str {
        match self {
            Mode::Read => "rb",
            Mode::Write => "wb",
            Mode::Append => "ab",
            Mode::Create => "xb",
        }
    }
}

impl FromStr for Mode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "r" | "rb" => Ok(Mode::Read),
            "w" | "wb" => Ok(Mode::Write),
            "a" | "ab" => Ok(Mode::Append),
            "x" | "xb" => Ok(Mode::Create),
            other => Err(Error::InvalidArgument(format!("invalid mode: {other:?}"))),
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn read_chunk(len: usize) -> Result<Vec<u8>> {
    let mut chunk = Vec::new();
    chunk
        .try_reserve_exact(len)
        .map_err(|_| Error::Allocation { requested: len })?;
    chunk.resize(len, 0);
    Ok(chunk)
}

enum State {
    Reading {
        decomp: Decompressor<DynCodec>,
        /// Decoded bytes not yet handed to the caller.
        pending: Vec<u8>,
        pos: usize,
        chunk: Vec<u8>,
        eof: bool,
    },
    Writing {
        comp: Compressor<DynCodec>,
    },
    Closed,
}

/// Compressed file object over a handle `F`.
pub struct BlockFile<F: Read + Write = File> {
    inner: Option<F>,
    mode: Mode,
    state: State,
}

impl BlockFile<File> {
    /// Open `path` with default preferences.
    pub fn open<P: AsRef<Path>>(path: P, mode: &str) -> Result<Self> {
        Self::open_with(path, mode, &Preferences::default())
    }

    /// Open `path` with explicit preferences.
    pub fn open_with<P: AsRef<Path>>(path: P, mode: &str, prefs: &Preferences) -> Result<Self> {
        let mode: Mode = mode.parse()?;
        let path = path.as_ref();
        let mut opts = OpenOptions::new();
        match mode {
            Mode::Read => opts.read(true),
            Mode::Write => opts.write(true).create(true).truncate(true),
            Mode::Append => opts.append(true).create(true),
            Mode::Create => opts.write(true).create_new(true),
        };
        let file = opts.open(path)?;
        debug!("opened {} in mode {}", path.display(), mode);
        Self::from_handle(file, mode, prefs)
    }
}

impl<F: Read + Write> BlockFile<F> {
    /// Wrap an already-open handle.
    pub fn from_handle(handle: F, mode: Mode, prefs: &Preferences) -> Result<Self> {
        Self::with_codec(handle, mode, prefs.codec().build(), prefs)
    }

    /// Wrap a handle with a caller-supplied codec; `prefs.codec()` is ignored.
    pub fn with_codec(handle: F, mode: Mode, codec: DynCodec, prefs: &Preferences) -> Result<Self> {
        let state = if mode.is_read() {
            let chunk = read_chunk(prefs.mem_limit())?;
            State::Reading {
                decomp: Decompressor::with_codec(codec, prefs.mem_limit())?,
                pending: Vec::new(),
                pos: 0,
                chunk,
                eof: false,
            }
        } else {
            State::Writing {
                comp: Compressor::with_codec(codec, prefs.block_size())?,
            }
        };
        Ok(BlockFile { inner: Some(handle), mode, state })
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn closed(&self) -> bool {
        matches!(self.state, State::Closed)
    }

    pub fn readable(&self) -> Result<bool> {
        self.check_open()?;
        Ok(self.mode.is_read())
    }

    pub fn writable(&self) -> Result<bool> {
        self.check_open()?;
        Ok(!self.mode.is_read())
    }

    pub fn seekable(&self) -> Result<bool> {
        self.check_open()?;
        Ok(false)
    }

    /// Always fails: compressed files are not seekable.
    pub fn seek(&mut self, _pos: SeekFrom) -> Result<u64> {
        self.check_open()?;
        Err(Error::Unsupported("seeking is not supported on compressed files"))
    }

    fn check_open(&self) -> Result<()> {
        if self.closed() {
            return Err(Error::Closed);
        }
        Ok(())
    }

    fn handle(&mut self) -> Result<&mut F> {
        self.inner.as_mut().ok_or(Error::Closed)
    }

    fn read_decoded(&mut self, buf: &mut [u8]) -> Result<usize> {
        let inner = self.inner.as_mut().ok_or(Error::Closed)?;
        let (decomp, pending, pos, chunk, eof) = match &mut self.state {
            State::Closed => return Err(Error::Closed),
            State::Writing { .. } => return Err(Error::NotReadable),
            State::Reading { decomp, pending, pos, chunk, eof } => (decomp, pending, pos, chunk, eof),
        };
        if buf.is_empty() {
            return Ok(0);
        }
        loop {
            if *pos < pending.len() {
                let n = buf.len().min(pending.len() - *pos);
                buf[..n].copy_from_slice(&pending[*pos..*pos + n]);
                *pos += n;
                return Ok(n);
            }
            if *eof {
                return Ok(0);
            }
            let n = match inner.read(chunk) {
                Ok(n) => n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            };
            if n == 0 {
                *eof = true;
                decomp.close()?;
                continue;
            }
            *pending = decomp.decompress(&chunk[..n])?;
            *pos = 0;
        }
    }

    fn write_encoded(&mut self, buf: &[u8]) -> Result<usize> {
        let inner = self.inner.as_mut().ok_or(Error::Closed)?;
        let comp = match &mut self.state {
            State::Closed => return Err(Error::Closed),
            State::Reading { .. } => return Err(Error::NotWritable),
            State::Writing { comp } => comp,
        };
        let encoded = comp.compress(buf)?;
        if !encoded.is_empty() {
            inner.write_all(&encoded)?;
        }
        Ok(buf.len())
    }

    /// Finish the file: flush the compressor (write modes) or release the
    /// decompressor (read mode), then flush the handle. Closing a closed file
    /// does nothing.
    pub fn close(&mut self) -> Result<()> {
        if let State::Writing { comp } = &mut self.state {
            // A failed flush leaves the writer open so close can be retried.
            let tail = comp.flush()?;
            let (total_in, total_out) = (comp.total_in(), comp.total_out());
            self.state = State::Closed;
            let inner = self.inner.as_mut().ok_or(Error::Closed)?;
            inner.write_all(&tail)?;
            inner.flush()?;
            debug!("closed writer: {total_in} -> {total_out} bytes");
            return Ok(());
        }
        if let State::Reading { mut decomp, eof, .. } = std::mem::replace(&mut self.state, State::Closed) {
            if !eof {
                // Unread input cannot be judged truncated; just release it.
                let pending = decomp.unused_len();
                if let Err(e) = decomp.close() {
                    debug!("closing before end of input ({pending} bytes pending): {e}");
                }
            }
        }
        Ok(())
    }

    /// Close the file and return the handle.
    pub fn into_inner(mut self) -> Result<F> {
        self.close()?;
        self.inner.take().ok_or(Error::Closed)
    }
}

impl<F: Read + Write> Read for BlockFile<F> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.read_decoded(buf).map_err(io::Error::from)
    }
}

impl<F: Read + Write> Write for BlockFile<F> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.write_encoded(buf).map_err(io::Error::from)
    }

    /// Flushes the handle only; staged bytes stay staged until `close`.
    fn flush(&mut self) -> io::Result<()> {
        match self.state {
            State::Closed => Err(Error::Closed.into()),
            State::Reading { .. } => Err(Error::NotWritable.into()),
            State::Writing { .. } => self.handle().map_err(io::Error::from)?.flush(),
        }
    }
}

impl<F: Read + Write> Drop for BlockFile<F> {
    /// Errors during drop are ignored; call [`BlockFile::close`] to see them.
    fn drop(&mut self) {
        if self.inner.is_some() && !self.closed() {
            let _ = self.close();
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
