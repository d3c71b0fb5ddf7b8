use std::io::{self, ErrorKind, Read, Write};

use crate::error::{BzError, Result};

/// Allocate a zeroed buffer of exactly `capacity` bytes, reporting allocation failure as an error.
fn allocate(capacity: usize) -> Result<Vec<u8>> {
    if capacity == 0 {
        return Err(BzError::InvalidBufferSize);
    }
    let mut buf = Vec::new();
    buf.try_reserve_exact(capacity)
        .map_err(|_| BzError::ResourceExhausted {
            requested: capacity,
        })?;
    buf.resize(capacity, 0);
    Ok(buf)
}

/// Input staging buffer. Holds one chunk read from the source and tracks how far the engine has
/// consumed it.
#[derive(Debug)]
pub(crate) struct InputStage {
    buf: Vec<u8>,
    pos: usize,
    filled: usize,
}

impl InputStage {
    pub(crate) fn with_capacity(capacity: usize) -> Result<Self> {
        Ok(Self {
            buf: allocate(capacity)?,
            pos: 0,
            filled: 0,
        })
    }

    /// Bytes read from the source but not yet taken by the engine.
    pub(crate) fn pending(&self) -> &[u8] {
        &self.buf[self.pos..self.filled]
    }

    pub(crate) fn is_exhausted(&self) -> bool {
        self.pos == self.filled
    }

    pub(crate) fn consume(&mut self, n: usize) {
        self.pos = (self.pos + n).min(self.filled);
    }

    /// Replace the (fully consumed) contents with the next chunk from `source`. Returns the number
    /// of bytes read, 0 at end of input.
    pub(crate) fn refill<R: Read>(&mut self, source: &mut R) -> Result<usize> {
        debug_assert!(self.is_exhausted());
        let n = loop {
            match source.read(&mut self.buf) {
                Ok(n) => break n,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(BzError::SourceReadFailed(e)),
            }
        };
        if n > self.buf.len() {
            return Err(BzError::SourceReadFailed(io::Error::new(
                ErrorKind::InvalidData,
                "source reported more bytes than the buffer holds",
            )));
        }
        self.pos = 0;
        self.filled = n;
        Ok(n)
    }
}

/// Output staging buffer. The engine writes into its front; each step's output is drained to the
/// sink before the next step, so the whole capacity is offered every time.
#[derive(Debug)]
pub(crate) struct OutputStage {
    buf: Vec<u8>,
}

impl OutputStage {
    pub(crate) fn with_capacity(capacity: usize) -> Result<Self> {
        Ok(Self {
            buf: allocate(capacity)?,
        })
    }

    pub(crate) fn space(&mut self) -> &mut [u8] {
        &mut self.buf
    }

    /// Write the first `produced` bytes to the sink.
    pub(crate) fn drain_to<W: Write>(&self, produced: usize, sink: &mut W) -> Result<()> {
        if produced == 0 {
            return Ok(());
        }
        sink.write_all(&self.buf[..produced])
            .map_err(BzError::SinkWriteFailed)
    }
}
