//! The stream module is the chunked I/O driver for the Rust bzip2 stream library.
//!
//! A stream is read from any `Read` source in chunks of the staging buffer size, handed to the
//! engine, and the engine output is written to any `Write` sink as it appears. Nothing is held in
//! memory beyond the two staging buffers and the engine's block state.
//!
//! Sequencing rules the driver keeps:
//! - A chunk is stepped until a step produces nothing and the chunk is fully consumed.
//! - End of input (a read of 0 bytes) switches the engine to finish mode, which is stepped until
//!   the engine reports the end of the stream.
//! - The engine session is ended exactly once on every path out of the driver.
//!
pub mod driver;
pub mod progress;
mod session;
mod staging;

use std::io::{self, Read, Write};

pub use driver::StreamDriver;
pub use progress::ProgressReporter;

use crate::error::Result;
use crate::tools::options::{BzOpts, Mode};

/// Byte counts for one completed stream.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StreamSummary {
    /// Bytes read from the source.
    pub bytes_read: u64,
    /// Bytes written to the sink.
    pub bytes_written: u64,
}

/// Compress everything `source` yields into `sink`.
pub fn compress_stream<R: Read, W: Write>(
    source: R,
    sink: W,
    opts: &BzOpts,
    progress: Option<&mut dyn FnMut(u64)>,
) -> Result<StreamSummary> {
    StreamDriver::new(opts.clone()).run(Mode::Zip, source, sink, progress)
}

/// Decompress the bzip2 stream, or concatenated streams, from `source` into `sink`.
pub fn decompress_stream<R: Read, W: Write>(
    source: R,
    sink: W,
    opts: &BzOpts,
    progress: Option<&mut dyn FnMut(u64)>,
) -> Result<StreamSummary> {
    StreamDriver::new(opts.clone()).run(Mode::Unzip, source, sink, progress)
}

/// Check that `source` holds an intact bzip2 stream. The decompressed bytes are counted and thrown
/// away.
pub fn test_stream<R: Read>(source: R, opts: &BzOpts) -> Result<StreamSummary> {
    StreamDriver::new(opts.clone()).run(Mode::Test, source, io::sink(), None)
}
