//! Engine backed by libbz2 through the `bzip2` crate's raw stream API.
//!
//! The container written here is the standard bzip2 format (magic, blocks, stream-end marker and
//! combined CRC), so the output can be read by the reference `bzip2` tool and vice versa.
//!
use bzip2::{Action, Compress, Compression, Decompress, Status};
use log::debug;

use super::{BlockEngine, Direction, EngineParams, EngineSession, Step, StepStatus};
use crate::error::{
    BzError, Result, BZ_DATA_ERROR, BZ_DATA_ERROR_MAGIC, BZ_MEM_ERROR, BZ_PARAM_ERROR,
    BZ_SEQUENCE_ERROR,
};

/// The libbz2 block engine, reached through the `bzip2` crate.
///
/// Out-of-range parameters are reported by [`BlockEngine::begin`] as
/// [`BzError::EngineInitFailed`]. If libbz2 itself fails to initialise, which in practice means it
/// could not allocate its block state, the `bzip2` crate panics instead of returning the code and
/// the panic propagates out of `begin`.
#[derive(Debug, Default, Clone, Copy)]
pub struct Libbz2Engine;

/// An open libbz2 stream. Dropping the inner stream calls `BZ2_bzCompressEnd` or
/// `BZ2_bzDecompressEnd`.
pub enum Libbz2Session {
    Compress(Compress),
    Decompress(Decompress),
}

impl BlockEngine for Libbz2Engine {
    type Session = Libbz2Session;

    fn begin(&self, direction: Direction, params: &EngineParams) -> Result<Libbz2Session> {
        // The bzip2 crate panics on init codes other than BZ_OK. Screening the parameters leaves
        // an allocation failure as the only way to reach that panic.
        params.validate()?;
        let session = match direction {
            Direction::Compress => Libbz2Session::Compress(Compress::new(
                Compression::new(params.block_size as u32),
                params.work_factor,
            )),
            Direction::Decompress => Libbz2Session::Decompress(Decompress::new(params.small)),
        };
        debug!(
            "Opened libbz2 {:?} session (block size {}, work factor {}, small {}).",
            direction, params.block_size, params.work_factor, params.small
        );
        Ok(session)
    }
}

impl EngineSession for Libbz2Session {
    fn step(&mut self, input: &[u8], output: &mut [u8], finish: bool) -> Result<Step> {
        match self {
            Libbz2Session::Compress(stream) => compress_step(stream, input, output, finish),
            Libbz2Session::Decompress(stream) => decompress_step(stream, input, output),
        }
    }

    fn end(self) {
        let (total_in, total_out) = match &self {
            Libbz2Session::Compress(stream) => (stream.total_in(), stream.total_out()),
            Libbz2Session::Decompress(stream) => (stream.total_in(), stream.total_out()),
        };
        debug!(
            "Closed libbz2 session after {} bytes in, {} bytes out.",
            total_in, total_out
        );
    }
}

fn compress_step(
    stream: &mut Compress,
    input: &[u8],
    output: &mut [u8],
    finish: bool,
) -> Result<Step> {
    let (before_in, before_out) = (stream.total_in(), stream.total_out());
    let action = if finish { Action::Finish } else { Action::Run };
    let status = match stream.compress(input, output, action) {
        Ok(status) => status,
        // BZ_RUN with nothing to take and nothing pending comes back as BZ_PARAM_ERROR.
        Err(bzip2::Error::Param) if !finish && input.is_empty() => Status::RunOk,
        Err(err) => return Err(step_error(err)),
    };
    measure(
        status,
        stream.total_in() - before_in,
        stream.total_out() - before_out,
    )
}

fn decompress_step(stream: &mut Decompress, input: &[u8], output: &mut [u8]) -> Result<Step> {
    let (before_in, before_out) = (stream.total_in(), stream.total_out());
    let status = stream.decompress(input, output).map_err(step_error)?;
    measure(
        status,
        stream.total_in() - before_in,
        stream.total_out() - before_out,
    )
}

fn measure(status: Status, consumed: u64, produced: u64) -> Result<Step> {
    let status = match status {
        Status::StreamEnd => StepStatus::StreamEnd,
        Status::MemNeeded => return Err(BzError::EngineStepFailed { code: BZ_MEM_ERROR }),
        Status::Ok | Status::RunOk | Status::FlushOk | Status::FinishOk => StepStatus::Continue,
    };
    Ok(Step {
        consumed: consumed as usize,
        produced: produced as usize,
        status,
    })
}

fn step_error(err: bzip2::Error) -> BzError {
    let code = match err {
        bzip2::Error::Sequence => BZ_SEQUENCE_ERROR,
        bzip2::Error::Data => BZ_DATA_ERROR,
        bzip2::Error::DataMagic => BZ_DATA_ERROR_MAGIC,
        bzip2::Error::Param => BZ_PARAM_ERROR,
    };
    BzError::EngineStepFailed { code }
}

#[cfg(test)]
mod test {
    use super::*;

    const EMPTY_STREAM: [u8; 14] = [
        0x42, 0x5a, 0x68, 0x39, 0x17, 0x72, 0x45, 0x38, 0x50, 0x90, 0, 0, 0, 0,
    ];

    fn params() -> EngineParams {
        EngineParams {
            block_size: 9,
            work_factor: 0,
            small: false,
        }
    }

    #[test]
    fn rejects_bad_params() {
        let engine = Libbz2Engine;
        let mut bad = params();
        bad.block_size = 0;
        assert!(matches!(
            engine.begin(Direction::Compress, &bad),
            Err(BzError::EngineInitFailed { .. })
        ));
        bad.block_size = 9;
        bad.work_factor = 300;
        assert!(matches!(
            engine.begin(Direction::Compress, &bad),
            Err(BzError::EngineInitFailed { .. })
        ));
    }

    #[test]
    fn idle_run_step_is_not_an_error() {
        let mut session = Libbz2Engine.begin(Direction::Compress, &params()).unwrap();
        let mut out = [0_u8; 64];
        let step = session.step(&[], &mut out, false).unwrap();
        assert_eq!(step.consumed, 0);
        assert_eq!(step.produced, 0);
        assert_eq!(step.status, StepStatus::Continue);
        session.end();
    }

    #[test]
    fn finish_on_empty_input_writes_minimal_stream() {
        let mut session = Libbz2Engine.begin(Direction::Compress, &params()).unwrap();
        let mut out = [0_u8; 64];
        let step = session.step(&[], &mut out, true).unwrap();
        assert!(step.is_stream_end());
        assert_eq!(&out[..step.produced], &EMPTY_STREAM);
        session.end();
    }

    #[test]
    fn decodes_minimal_stream() {
        let mut session = Libbz2Engine
            .begin(Direction::Decompress, &params())
            .unwrap();
        let mut out = [0_u8; 16];
        let step = session.step(&EMPTY_STREAM, &mut out, true).unwrap();
        assert!(step.is_stream_end());
        assert_eq!(step.consumed, EMPTY_STREAM.len());
        assert_eq!(step.produced, 0);
        session.end();
    }

    #[test]
    fn bad_magic_is_a_data_error() {
        let mut session = Libbz2Engine
            .begin(Direction::Decompress, &params())
            .unwrap();
        let mut out = [0_u8; 16];
        let err = session
            .step(b"not a bzip2 stream", &mut out, false)
            .unwrap_err();
        assert_eq!(err.engine_code(), Some(BZ_DATA_ERROR_MAGIC));
        assert!(err.is_corrupt_input());
    }
}
