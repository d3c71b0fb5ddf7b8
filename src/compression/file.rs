//! File helpers. Paths are opened as plain files; the data itself always goes through the
//! streaming driver, so files of any size are handled in bounded memory.
use std::fs::File;
use std::path::Path;

use log::info;

use crate::error::{BzError, Result};
use crate::stream::{StreamDriver, StreamSummary};
use crate::tools::options::{BzOpts, Mode};

fn open(path: &Path) -> Result<File> {
    File::open(path).map_err(|source| BzError::File {
        path: path.to_path_buf(),
        source,
    })
}

fn create(path: &Path) -> Result<File> {
    File::create(path).map_err(|source| BzError::File {
        path: path.to_path_buf(),
        source,
    })
}

/// Compress the file at `src` into a new file at `dst` (replaced if it exists).
pub fn compress_file(
    src: &Path,
    dst: &Path,
    opts: &BzOpts,
    progress: Option<&mut dyn FnMut(u64)>,
) -> Result<StreamSummary> {
    let fin = open(src)?;
    let fout = create(dst)?;
    info!("Compressing {} to {}.", src.display(), dst.display());
    StreamDriver::new(opts.clone()).run(Mode::Zip, fin, fout, progress)
}

/// Decompress the bzip2 file at `src` into a new file at `dst` (replaced if it exists).
pub fn decompress_file(
    src: &Path,
    dst: &Path,
    opts: &BzOpts,
    progress: Option<&mut dyn FnMut(u64)>,
) -> Result<StreamSummary> {
    let fin = open(src)?;
    let fout = create(dst)?;
    info!("Decompressing {} to {}.", src.display(), dst.display());
    StreamDriver::new(opts.clone()).run(Mode::Unzip, fin, fout, progress)
}

/// Compress an in-memory buffer straight into a file.
pub fn compress_to_file(
    data: &[u8],
    dst: &Path,
    opts: &BzOpts,
    progress: Option<&mut dyn FnMut(u64)>,
) -> Result<StreamSummary> {
    let fout = create(dst)?;
    info!("Compressing {} bytes to {}.", data.len(), dst.display());
    StreamDriver::new(opts.clone()).run(Mode::Zip, data, fout, progress)
}

/// Decompress the bzip2 file at `src` into memory.
pub fn decompress_file_to_vec(
    src: &Path,
    opts: &BzOpts,
    progress: Option<&mut dyn FnMut(u64)>,
) -> Result<Vec<u8>> {
    let fin = open(src)?;
    let mut data = Vec::new();
    StreamDriver::new(opts.clone()).run(Mode::Unzip, fin, &mut data, progress)?;
    Ok(data)
}

/// Check the integrity of the bzip2 file at `src` without writing anything.
pub fn test_file(src: &Path, opts: &BzOpts) -> Result<StreamSummary> {
    let fin = open(src)?;
    info!("Testing {}.", src.display());
    StreamDriver::new(opts.clone()).run(Mode::Test, fin, std::io::sink(), None)
}
