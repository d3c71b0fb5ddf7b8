//! Stream options - structs and impls for the settings that shape one compression stream.
use std::{fmt::Display, fmt::Formatter};

use crate::engine::{Direction, EngineParams};
use crate::error::{BzError, Result};

/// Staging buffer capacity used when the caller does not choose one.
pub const DEFAULT_BUFFER_SIZE: usize = 1024 * 10;
/// Minimum number of source bytes between two progress reports.
pub const DEFAULT_REPORT_INTERVAL: u64 = 1024 * 100;
pub const DEFAULT_BLOCK_SIZE: u8 = 9;
/// Zero lets the engine pick its own work factor (30 for libbz2).
pub const DEFAULT_WORK_FACTOR: u32 = 0;
pub const MAX_WORK_FACTOR: u32 = 250;

/// Zip, Unzip, Test
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Zip,
    Unzip,
    /// Decompress and discard the output, checking integrity only.
    Test,
}

impl Mode {
    /// Which way the engine runs for this mode.
    pub fn direction(&self) -> Direction {
        match self {
            Mode::Zip => Direction::Compress,
            Mode::Unzip | Mode::Test => Direction::Decompress,
        }
    }
}

impl Display for Mode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// Verbosity of user information
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Verbosity {
    Quiet,
    Errors,
    Warnings,
    Info,
    Debug,
    Trace,
}

/// Defines all user settable options that control one stream
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BzOpts {
    /// Block size factor, 1-9. The engine uses blocks of this many 100k.
    pub block_size: u8,
    /// Fallback threshold for highly repetitive data, 0-250. Zero means engine default.
    pub work_factor: u32,
    /// Capacity of each staging buffer, in bytes
    pub buffer_size: usize,
    /// Minimum growth of the bytes-read counter between two progress reports
    pub report_interval: u64,
    /// Small memory footprint requested for decompression
    pub small: bool,
}

impl BzOpts {
    pub fn new() -> Self {
        Self {
            block_size: DEFAULT_BLOCK_SIZE,
            work_factor: DEFAULT_WORK_FACTOR,
            buffer_size: DEFAULT_BUFFER_SIZE,
            report_interval: DEFAULT_REPORT_INTERVAL,
            small: false,
        }
    }

    pub fn with_block_size(mut self, block_size: u8) -> Self {
        self.block_size = block_size;
        self
    }

    pub fn with_work_factor(mut self, work_factor: u32) -> Self {
        self.work_factor = work_factor;
        self
    }

    pub fn with_buffer_size(mut self, buffer_size: usize) -> Self {
        self.buffer_size = buffer_size;
        self
    }

    pub fn with_report_interval(mut self, report_interval: u64) -> Self {
        self.report_interval = report_interval;
        self
    }

    pub fn with_small(mut self, small: bool) -> Self {
        self.small = small;
        self
    }

    /// The subset of options handed to the engine when a session begins.
    pub fn engine_params(&self) -> EngineParams {
        EngineParams {
            block_size: self.block_size,
            work_factor: self.work_factor,
            small: self.small,
        }
    }

    /// Check every option without starting a stream.
    pub fn validate(&self) -> Result<()> {
        if self.buffer_size == 0 {
            return Err(BzError::InvalidBufferSize);
        }
        self.engine_params().validate()
    }
}

impl Default for BzOpts {
    fn default() -> Self {
        Self::new()
    }
}
