use crate::error::Result;
use crate::stream::StreamDriver;
use crate::tools::options::{BzOpts, Mode};

/// Compress `data` with the default options.
pub fn compress(data: &[u8]) -> Result<Vec<u8>> {
    compress_with(data, &BzOpts::default())
}

/// Compress `data`. Empty input gives empty output and never reaches the engine.
pub fn compress_with(data: &[u8], opts: &BzOpts) -> Result<Vec<u8>> {
    if data.is_empty() {
        return Ok(Vec::new());
    }
    let mut compressed = Vec::with_capacity(data.len() / 2 + 64);
    StreamDriver::new(opts.clone()).run(Mode::Zip, data, &mut compressed, None)?;
    Ok(compressed)
}

/// Decompress `data` with the default options.
pub fn decompress(data: &[u8]) -> Result<Vec<u8>> {
    decompress_with(data, &BzOpts::default())
}

/// Decompress `data`. Empty input gives empty output and never reaches the engine.
pub fn decompress_with(data: &[u8], opts: &BzOpts) -> Result<Vec<u8>> {
    if data.is_empty() {
        return Ok(Vec::new());
    }
    let mut decompressed = Vec::new();
    StreamDriver::new(opts.clone()).run(Mode::Unzip, data, &mut decompressed, None)?;
    Ok(decompressed)
}

/// bzip2 shorthands on byte slices.
pub trait Bz2Ext {
    /// Compressed copy of the bytes.
    fn bz2(&self) -> Result<Vec<u8>>;
    /// Decompressed copy of the bytes.
    fn from_bz2(&self) -> Result<Vec<u8>>;
}

impl Bz2Ext for [u8] {
    fn bz2(&self) -> Result<Vec<u8>> {
        compress(self)
    }

    fn from_bz2(&self) -> Result<Vec<u8>> {
        decompress(self)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::error::BzError;

    const XZ_CONTACT: &str = "\
6. Contact information
----------------------

    If you have questions, bug reports, patches etc. related to XZ Utils,
    contact Lasse Collin <lasse.collin@tukaani.org> (in Finnish or English).
    I'm sometimes slow at replying. If you haven't got a reply within two
    weeks, assume that your email has got lost and resend it or use IRC.
";

    #[test]
    fn empty_in_empty_out() {
        assert!(compress(&[]).unwrap().is_empty());
        assert!(decompress(&[]).unwrap().is_empty());
    }

    #[test]
    fn text_round_trip() {
        let compressed = compress(XZ_CONTACT.as_bytes()).unwrap();
        assert_eq!(&compressed[..4], b"BZh9");
        assert_eq!(decompress(&compressed).unwrap(), XZ_CONTACT.as_bytes());
    }

    #[test]
    fn extension_trait_round_trip() {
        let data = b"abababababababababab".as_slice();
        let packed = data.bz2().unwrap();
        assert_eq!(packed.from_bz2().unwrap(), data);
    }

    #[test]
    fn block_size_lands_in_header() {
        let opts = BzOpts::new().with_block_size(1);
        let compressed = compress_with(b"x", &opts).unwrap();
        assert_eq!(&compressed[..4], b"BZh1");
        assert_eq!(decompress_with(&compressed, &opts).unwrap(), b"x");
    }

    #[test]
    fn small_input_expands_far_past_its_own_size() {
        let data = vec![b'z'; 1 << 20];
        let compressed = compress(&data).unwrap();
        assert!(compressed.len() * 100 < data.len());
        let restored = decompress(&compressed).unwrap();
        assert_eq!(restored.len(), data.len());
        assert!(restored.iter().all(|&b| b == b'z'));
    }

    #[test]
    fn invalid_options_fail_fast() {
        let opts = BzOpts::new().with_block_size(12);
        assert!(matches!(
            compress_with(b"data", &opts),
            Err(BzError::EngineInitFailed { .. })
        ));
    }
}
