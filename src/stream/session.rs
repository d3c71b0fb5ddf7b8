use log::debug;

use crate::engine::{EngineSession, Step};
use crate::error::{BzError, Result, BZ_SEQUENCE_ERROR};

/// Owns the engine session for one stream and guarantees it is ended exactly once, whether the
/// stream completes or bails out with an error.
pub(crate) struct SessionGuard<S: EngineSession> {
    session: Option<S>,
    total_in: u64,
    total_out: u64,
}

impl<S: EngineSession> SessionGuard<S> {
    pub(crate) fn new(session: S) -> Self {
        Self {
            session: Some(session),
            total_in: 0,
            total_out: 0,
        }
    }

    pub(crate) fn step(&mut self, input: &[u8], output: &mut [u8], finish: bool) -> Result<Step> {
        let session = self
            .session
            .as_mut()
            .ok_or(BzError::EngineStepFailed {
                code: BZ_SEQUENCE_ERROR,
            })?;
        let step = session.step(input, output, finish)?;
        if step.consumed > input.len() || step.produced > output.len() {
            return Err(BzError::EngineStepFailed {
                code: BZ_SEQUENCE_ERROR,
            });
        }
        self.total_in += step.consumed as u64;
        self.total_out += step.produced as u64;
        Ok(step)
    }

    /// Bytes the engine has consumed so far.
    pub(crate) fn total_in(&self) -> u64 {
        self.total_in
    }

    /// Bytes the engine has produced so far.
    pub(crate) fn total_out(&self) -> u64 {
        self.total_out
    }

    /// End the current session and continue with `session`. Byte counters carry over.
    pub(crate) fn restart(&mut self, session: S) {
        if let Some(previous) = self.session.replace(session) {
            previous.end();
        }
    }

    pub(crate) fn end(mut self) {
        if let Some(session) = self.session.take() {
            session.end();
        }
    }
}

impl<S: EngineSession> Drop for SessionGuard<S> {
    fn drop(&mut self) {
        if let Some(session) = self.session.take() {
            debug!(
                "Ending engine session early after {} bytes in, {} bytes out.",
                self.total_in, self.total_out
            );
            session.end();
        }
    }
}
