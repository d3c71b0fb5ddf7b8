//! Streaming bzip2 compression and decompression for Rust.
//!
//! Provides bzip2 compression and decompression of in-memory buffers, files and any
//! `Read`/`Write` pair. Streams are pumped through two fixed-size staging buffers, so
//! arbitrarily large data is handled in bounded memory. Output is the standard bzip2 format
//! and can be read by the reference `bzip2` tool.
//!
//! Basic usage to compress and restore a buffer is as follows:
//!
//! ```
//! let data = b"Performance will only suffer significantly for very tiny buffers.";
//! let packed = bzip2_stream::compress(data).unwrap();
//! assert_eq!(bzip2_stream::decompress(&packed).unwrap(), data);
//! ```
//!
//! Streams with progress reporting:
//!
//! ```
//! use bzip2_stream::{compress_stream, BzOpts};
//!
//! let source = vec![7_u8; 300_000];
//! let mut packed = Vec::new();
//! let mut reports = Vec::new();
//! let mut on_progress = |n: u64| reports.push(n);
//! compress_stream(source.as_slice(), &mut packed, &BzOpts::default(), Some(&mut on_progress))
//!     .unwrap();
//! assert!(!reports.is_empty());
//! ```
//!
#![warn(rust_2018_idioms)]

pub mod compression;
pub mod engine;
pub mod error;
pub mod stream;
pub mod tools;

pub use compression::buffer::{compress, compress_with, decompress, decompress_with, Bz2Ext};
pub use error::{BzError, Result};
pub use stream::{compress_stream, decompress_stream, test_stream, StreamDriver, StreamSummary};
pub use tools::logging::init_logging;
pub use tools::options::{BzOpts, Mode, Verbosity};
