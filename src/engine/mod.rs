//! The engine module defines the seam between the stream driver and the block-sorting compressor.
//!
//! BZIP2 compression (RLE1, Burrow Wheeler Transform, Move To Front, RLE2 and huffman coding) is
//! done by an engine that the driver treats as a black box. An engine opens a session for one
//! stream. The session is stepped with a slice of input and a slice of output space, reports how
//! much of each it used, and is ended exactly once.
//!
//! The engine may consume less input or produce less output than the slices allow. The driver
//! re-offers whatever was not consumed on the next step.
//!
//! The production engine is [`libbz2::Libbz2Engine`].
//!
pub mod libbz2;

use crate::error::{BzError, Result};
use crate::tools::options::MAX_WORK_FACTOR;

/// Which way a session transforms its input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Compress,
    Decompress,
}

/// Parameters fixed for the lifetime of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineParams {
    /// Block size factor, 1-9.
    pub block_size: u8,
    /// 0-250, 0 selects the engine default.
    pub work_factor: u32,
    /// Use the slower, low memory decompression algorithm.
    pub small: bool,
}

impl EngineParams {
    /// Reject parameters the engine can't start with.
    pub fn validate(&self) -> Result<()> {
        if !(1..=9).contains(&self.block_size) {
            return Err(BzError::EngineInitFailed {
                reason: format!("block size {} is outside 1-9", self.block_size),
            });
        }
        if self.work_factor > MAX_WORK_FACTOR {
            return Err(BzError::EngineInitFailed {
                reason: format!(
                    "work factor {} is outside 0-{}",
                    self.work_factor, MAX_WORK_FACTOR
                ),
            });
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepStatus {
    /// More steps are needed, either to take more input or to emit pending output.
    Continue,
    /// The stream is complete. No further steps may be made.
    StreamEnd,
}

/// What a single step did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Step {
    /// Bytes taken from the front of the input slice.
    pub consumed: usize,
    /// Bytes written to the front of the output slice.
    pub produced: usize,
    pub status: StepStatus,
}

impl Step {
    pub fn is_stream_end(&self) -> bool {
        self.status == StepStatus::StreamEnd
    }
}

/// A block compression engine able to open sessions.
pub trait BlockEngine {
    type Session: EngineSession;

    /// Start a session. Fails with `EngineInitFailed` when the parameters are rejected.
    fn begin(&self, direction: Direction, params: &EngineParams) -> Result<Self::Session>;
}

/// One open engine session, owned by a single stream.
pub trait EngineSession {
    /// Offer `input` and `output` space to the engine.
    ///
    /// `finish` tells a compressing session that no input follows, so buffered state must be
    /// flushed. Once `finish` has been passed it must be passed on every later step, with
    /// whatever input the previous step left unconsumed.
    fn step(&mut self, input: &[u8], output: &mut [u8], finish: bool) -> Result<Step>;

    /// Release the engine state.
    fn end(self);
}
