use std::io::{Read, Write};

use log::{debug, error, info, trace, warn};

use super::progress::ProgressReporter;
use super::session::SessionGuard;
use super::staging::{InputStage, OutputStage};
use super::StreamSummary;
use crate::engine::libbz2::Libbz2Engine;
use crate::engine::{BlockEngine, Direction, EngineSession};
use crate::error::{BzError, Result, BZ_SEQUENCE_ERROR, BZ_UNEXPECTED_EOF};
use crate::tools::options::{BzOpts, Mode};

/// Pumps a byte stream through a block engine using two fixed-size staging buffers.
///
/// Memory use is bounded by the staging buffers plus the engine's own block state, whatever the
/// length of the stream. Each call to [`StreamDriver::run`] opens its own engine session, so one
/// driver can be reused for any number of streams.
#[derive(Debug, Clone)]
pub struct StreamDriver<E: BlockEngine> {
    engine: E,
    opts: BzOpts,
}

impl StreamDriver<Libbz2Engine> {
    /// A driver backed by libbz2.
    pub fn new(opts: BzOpts) -> Self {
        Self::with_engine(Libbz2Engine, opts)
    }
}

impl<E: BlockEngine> StreamDriver<E> {
    pub fn with_engine(engine: E, opts: BzOpts) -> Self {
        Self { engine, opts }
    }

    pub fn opts(&self) -> &BzOpts {
        &self.opts
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    /// Run one complete stream from `source` to `sink`.
    ///
    /// When decompressing, bzip2 streams concatenated in `source` are decoded one after another
    /// into `sink`, as `bzip2 -d` does. Anything after a stream end that is not another stream is
    /// an error.
    ///
    /// On success every byte the engine produced has been written and the sink flushed. On any
    /// error the engine session has already been ended when the error is returned.
    pub fn run<R: Read, W: Write>(
        &self,
        mode: Mode,
        mut source: R,
        mut sink: W,
        progress: Option<&mut dyn FnMut(u64)>,
    ) -> Result<StreamSummary> {
        if self.opts.buffer_size == 0 {
            return Err(BzError::InvalidBufferSize);
        }
        let direction = mode.direction();
        let session = self.engine.begin(direction, &self.opts.engine_params())?;
        let mut session = SessionGuard::new(session);

        let mut input = InputStage::with_capacity(self.opts.buffer_size)?;
        let mut output = OutputStage::with_capacity(self.opts.buffer_size)?;
        let mut reporter = ProgressReporter::new(self.opts.report_interval, progress);
        info!(
            "Starting {} stream with {} byte staging buffers.",
            mode, self.opts.buffer_size
        );

        // A decompress source may hold several concatenated streams, each decoded by a fresh
        // session. A compress run always produces exactly one.
        let params = self.opts.engine_params();
        let mut begin_next = || self.engine.begin(direction, &params);
        let reopen: Option<&mut dyn FnMut() -> Result<E::Session>> = match direction {
            Direction::Decompress => Some(&mut begin_next),
            Direction::Compress => None,
        };
        let result = pump(
            reopen,
            &mut session,
            &mut input,
            &mut output,
            &mut source,
            &mut sink,
            &mut reporter,
        );
        match result {
            Ok(bytes_read) => {
                let summary = StreamSummary {
                    bytes_read,
                    bytes_written: session.total_out(),
                };
                debug!("Engine consumed {} of the bytes read.", session.total_in());
                session.end();
                info!(
                    "{} stream done: {} bytes read, {} bytes written.",
                    mode, summary.bytes_read, summary.bytes_written
                );
                Ok(summary)
            }
            Err(err) => {
                drop(session);
                error!("{} stream failed: {}", mode, err);
                Err(err)
            }
        }
    }
}

/// The driver loop proper. Returns the number of bytes read from the source.
///
/// With `reopen` set, input that follows a stream end is treated as the start of another stream
/// and decoded by a new session. Without it the first stream end finishes the run.
fn pump<S, R, W>(
    mut reopen: Option<&mut dyn FnMut() -> Result<S>>,
    session: &mut SessionGuard<S>,
    input: &mut InputStage,
    output: &mut OutputStage,
    source: &mut R,
    sink: &mut W,
    reporter: &mut ProgressReporter<'_>,
) -> Result<u64>
where
    S: EngineSession,
    R: Read,
    W: Write,
{
    let mut bytes_read = 0_u64;
    let mut streams = 1_u32;
    // Set once the current session has reached its stream end.
    let mut between_streams = false;

    'chunks: loop {
        if input.is_exhausted() {
            let n = input.refill(source)?;
            bytes_read += n as u64;
            reporter.update(bytes_read);
            if n == 0 {
                break 'chunks;
            }
            trace!("Read {} bytes ({} total).", n, bytes_read);
        }

        if between_streams {
            if let Some(reopen) = reopen.as_mut() {
                session.restart(reopen()?);
                streams += 1;
                between_streams = false;
                info!(
                    "Found stream {} after {} bytes of input.",
                    streams,
                    bytes_read - input.pending().len() as u64
                );
            }
        }

        // Keep stepping until a step yields nothing and the chunk is used up. One chunk can
        // expand into many buffers of output.
        loop {
            let step = session.step(input.pending(), output.space(), false)?;
            input.consume(step.consumed);
            output.drain_to(step.produced, sink)?;
            trace!(
                "Step took {} bytes, gave {} bytes.",
                step.consumed,
                step.produced
            );

            if step.is_stream_end() {
                if reopen.is_none() {
                    if !input.is_exhausted() {
                        warn!(
                            "Ignoring {} bytes left over after the end of the stream.",
                            input.pending().len()
                        );
                    }
                    sink.flush().map_err(BzError::SinkWriteFailed)?;
                    return Ok(bytes_read);
                }
                debug!("Stream {} ended after {} bytes of input.", streams, session.total_in());
                between_streams = true;
                continue 'chunks;
            }
            if step.produced == 0 {
                if input.is_exhausted() {
                    break;
                }
                if step.consumed == 0 {
                    error!("Engine made no progress with {} bytes pending.", input.pending().len());
                    return Err(BzError::EngineStepFailed {
                        code: BZ_SEQUENCE_ERROR,
                    });
                }
            }
        }
    }

    if between_streams {
        debug!("Source ended cleanly after {} streams.", streams);
        sink.flush().map_err(BzError::SinkWriteFailed)?;
        return Ok(bytes_read);
    }

    // The source is exhausted: ask the engine to flush whatever it is still holding. A decoder
    // that never saw a stream end, including one given no input at all, fails here.
    loop {
        let step = session.step(&[], output.space(), true)?;
        output.drain_to(step.produced, sink)?;
        trace!("Finish step gave {} bytes.", step.produced);
        if step.is_stream_end() {
            break;
        }
        if step.produced == 0 {
            error!(
                "Input ended after {} bytes without a stream-end marker.",
                bytes_read
            );
            return Err(BzError::EngineStepFailed {
                code: BZ_UNEXPECTED_EOF,
            });
        }
    }

    sink.flush().map_err(BzError::SinkWriteFailed)?;
    Ok(bytes_read)
}
