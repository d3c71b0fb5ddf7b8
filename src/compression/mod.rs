//! The compression module holds the convenience layers built on top of the stream driver.
//!
//! - buffer: Compress or decompress a whole in-memory buffer in one call.
//! - file: Compress or decompress between files, or between a file and memory.
//!
//! The block-sorting transforms themselves live behind the engine seam in `crate::engine`.
//!

pub mod buffer;
pub mod file;
