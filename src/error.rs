//! Error type shared by every layer of the bzip2 stream driver.
//!
//! Engine failures carry the libbz2 status code so callers can tell corrupt input
//! apart from parameter or sequencing problems. Source and sink failures keep the
//! underlying `io::Error`.

use std::{io, path::PathBuf};

use thiserror::Error;

/// The engine was driven out of order (libbz2 `BZ_SEQUENCE_ERROR`).
pub const BZ_SEQUENCE_ERROR: i32 = -1;
/// The engine rejected a parameter (libbz2 `BZ_PARAM_ERROR`).
pub const BZ_PARAM_ERROR: i32 = -2;
/// The engine could not allocate its internal state (libbz2 `BZ_MEM_ERROR`).
pub const BZ_MEM_ERROR: i32 = -3;
/// The compressed data failed an integrity check (libbz2 `BZ_DATA_ERROR`).
pub const BZ_DATA_ERROR: i32 = -4;
/// The compressed data does not start with the bzip2 magic (libbz2 `BZ_DATA_ERROR_MAGIC`).
pub const BZ_DATA_ERROR_MAGIC: i32 = -5;
/// The compressed data ended before the stream-end marker (libbz2 `BZ_UNEXPECTED_EOF`).
pub const BZ_UNEXPECTED_EOF: i32 = -7;

pub type Result<T> = std::result::Result<T, BzError>;

#[derive(Error, Debug)]
pub enum BzError {
    /// The engine refused to start a session with the requested parameters.
    #[error("bzip2 engine initialization failed: {reason}")]
    EngineInitFailed { reason: String },
    /// A step call failed. Corrupt or truncated input during decompression lands here.
    #[error("bzip2 engine error {code}: {}", describe_code(.code))]
    EngineStepFailed { code: i32 },
    #[error("error while reading from the source stream")]
    SourceReadFailed(#[source] io::Error),
    #[error("error while writing to the sink stream")]
    SinkWriteFailed(#[source] io::Error),
    #[error("can't allocate a staging buffer of {requested} bytes")]
    ResourceExhausted { requested: usize },
    #[error("staging buffer size must be greater than zero")]
    InvalidBufferSize,
    #[error("can't open {}", .path.display())]
    File {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl BzError {
    /// True when the error means the compressed input is damaged or incomplete.
    pub fn is_corrupt_input(&self) -> bool {
        matches!(
            self,
            BzError::EngineStepFailed {
                code: BZ_DATA_ERROR | BZ_DATA_ERROR_MAGIC | BZ_UNEXPECTED_EOF
            }
        )
    }

    /// The libbz2 status code, if the error came from the engine.
    pub fn engine_code(&self) -> Option<i32> {
        match self {
            BzError::EngineStepFailed { code } => Some(*code),
            _ => None,
        }
    }
}

/// Short description of a libbz2 status code, in the spirit of `BZ2_bzerror`.
pub fn describe_code(code: &i32) -> &'static str {
    match *code {
        BZ_SEQUENCE_ERROR => "SEQUENCE_ERROR",
        BZ_PARAM_ERROR => "PARAM_ERROR",
        BZ_MEM_ERROR => "MEM_ERROR",
        BZ_DATA_ERROR => "DATA_ERROR",
        BZ_DATA_ERROR_MAGIC => "DATA_ERROR_MAGIC",
        BZ_UNEXPECTED_EOF => "UNEXPECTED_EOF",
        _ => "???",
    }
}
