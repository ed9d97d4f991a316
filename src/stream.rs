//! Growable in-memory byte stream.
//!
//! [`ByteStream`] is the staging buffer the drivers hand to a codec: append
//! bytes, pass the whole staged region on, rewind, repeat. It deliberately
//! supports only appends and rewind-to-start; general random access is
//! rejected with [`Error::Unsupported`].
//!
//! The backing `Vec<u8>` is owned exclusively by the stream and is never
//! lent out mutably. After [`ByteStream::close`] the buffer is released and
//! every further call fails with [`Error::UseAfterClose`].

use std::io::{self, SeekFrom, Write};

use crate::error::{Error, Result};

/// Append/rewind byte buffer with an explicit close.
#[derive(Debug)]
pub struct ByteStream {
    /// `None` once closed.
    buf: Option<Vec<u8>>,
    initial_capacity: usize,
}

impl ByteStream {
    /// Allocate a stream with room for at least `initial_capacity` bytes.
    pub fn open(initial_capacity: usize) -> Result<Self> {
        let mut buf = Vec::new();
        buf.try_reserve_exact(initial_capacity)
            .map_err(|_| Error::Allocation { requested: initial_capacity })?;
        Ok(ByteStream { buf: Some(buf), initial_capacity })
    }

    fn buf(&self) -> Result<&Vec<u8>> {
        self.buf.as_ref().ok_or(Error::UseAfterClose)
    }

    fn buf_mut(&mut self) -> Result<&mut Vec<u8>> {
        self.buf.as_mut().ok_or(Error::UseAfterClose)
    }

    /// Append `bytes` at the current length, growing the buffer if needed.
    ///
    /// All-or-nothing: on failure the stream is left unchanged.
    pub fn write(&mut self, bytes: &[u8]) -> Result<usize> {
        let buf = self.buf_mut()?;
        buf.try_reserve(bytes.len())
            .map_err(|_| Error::Write { len: bytes.len() })?;
        buf.extend_from_slice(bytes);
        Ok(bytes.len())
    }

    /// Number of bytes written since the last rewind.
    pub fn len(&self) -> Result<usize> {
        Ok(self.buf()?.len())
    }

    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.buf()?.is_empty())
    }

    /// Currently allocated capacity.
    pub fn capacity(&self) -> Result<usize> {
        Ok(self.buf()?.capacity())
    }

    /// Capacity hint the stream was opened with.
    pub fn initial_capacity(&self) -> usize {
        self.initial_capacity
    }

    /// Immutable view of `[0, len)`.
    pub fn snapshot(&self) -> Result<&[u8]> {
        Ok(self.buf()?.as_slice())
    }

    /// Owned copy of `[0, len)`.
    pub fn to_vec(&self) -> Result<Vec<u8>> {
        Ok(self.buf()?.clone())
    }

    /// Reset the length to zero, keeping the allocation.
    pub fn rewind(&mut self) -> Result<()> {
        self.buf_mut()?.clear();
        Ok(())
    }

    /// Drop everything past `len`. A no-op when `len` is not shorter.
    pub fn truncate(&mut self, len: usize) -> Result<()> {
        self.buf_mut()?.truncate(len);
        Ok(())
    }

    /// Only `SeekFrom::Start(0)` is accepted, and it rewinds.
    pub fn seek(&mut self, pos: SeekFrom) -> Result<u64> {
        self.buf()?;
        match pos {
            SeekFrom::Start(0) => {
                self.rewind()?;
                Ok(0)
            }
            SeekFrom::Start(_) => Err(Error::Unsupported(
                "memory stream seeks allow only rewinds to offset 0",
            )),
            SeekFrom::Current(_) | SeekFrom::End(_) => Err(Error::Unsupported(
                "memory stream seeks allow only SeekFrom::Start",
            )),
        }
    }

    /// Release the backing memory. A second call is an error.
    pub fn close(&mut self) -> Result<()> {
        match self.buf.take() {
            Some(_) => Ok(()),
            None => Err(Error::UseAfterClose),
        }
    }

    pub fn is_closed(&self) -> bool {
        self.buf.is_none()
    }
}

impl Write for ByteStream {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        ByteStream::write(self, buf).map_err(io::Error::from)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.buf().map(|_| ()).map_err(io::Error::from)
    }
}
