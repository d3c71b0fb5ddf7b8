//! Test doubles shared by the integration tests.
#![allow(dead_code)]

use std::io::{self, Read, Write};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use bzip2_stream::engine::libbz2::{Libbz2Engine, Libbz2Session};
use bzip2_stream::engine::{BlockEngine, Direction, EngineParams, EngineSession, Step};
use bzip2_stream::error::{BzError, Result, BZ_DATA_ERROR};
use rand::{rngs::StdRng, RngCore, SeedableRng};

pub const SENTENCE: &[u8] = b"Performance will only suffer significantly for very tiny buffers.";

/// Seeded random bytes.
pub fn random_bytes(len: usize, seed: u64) -> Vec<u8> {
    let mut data = vec![0_u8; len];
    StdRng::seed_from_u64(seed).fill_bytes(&mut data);
    data
}

/// A short pattern repeated out to `len` bytes.
pub fn repeating_bytes(len: usize) -> Vec<u8> {
    b"ACGTTGCA-the quick brown fox-"
        .iter()
        .copied()
        .cycle()
        .take(len)
        .collect()
}

#[derive(Debug, Default)]
pub struct Counts {
    pub begins: AtomicUsize,
    pub ends: AtomicUsize,
    pub steps: AtomicUsize,
}

impl Counts {
    pub fn begins(&self) -> usize {
        self.begins.load(Ordering::SeqCst)
    }

    pub fn ends(&self) -> usize {
        self.ends.load(Ordering::SeqCst)
    }

    pub fn steps(&self) -> usize {
        self.steps.load(Ordering::SeqCst)
    }
}

/// Wraps libbz2, counting session begins, steps and ends. Can be told to fail a given step, or to
/// offer the real engine only a few bytes of each slice.
#[derive(Debug, Default, Clone)]
pub struct CountingEngine {
    pub counts: Arc<Counts>,
    /// Fail the step with this (1-based) index.
    pub fail_on_step: Option<usize>,
    /// Cap on the input and output bytes offered per step.
    pub max_slice: Option<usize>,
}

impl CountingEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_on_step(step: usize) -> Self {
        Self {
            fail_on_step: Some(step),
            ..Self::default()
        }
    }

    pub fn stingy(max_slice: usize) -> Self {
        Self {
            max_slice: Some(max_slice),
            ..Self::default()
        }
    }
}

pub struct CountingSession {
    inner: Libbz2Session,
    counts: Arc<Counts>,
    fail_on_step: Option<usize>,
    max_slice: Option<usize>,
}

impl BlockEngine for CountingEngine {
    type Session = CountingSession;

    fn begin(&self, direction: Direction, params: &EngineParams) -> Result<CountingSession> {
        let inner = Libbz2Engine.begin(direction, params)?;
        self.counts.begins.fetch_add(1, Ordering::SeqCst);
        Ok(CountingSession {
            inner,
            counts: Arc::clone(&self.counts),
            fail_on_step: self.fail_on_step,
            max_slice: self.max_slice,
        })
    }
}

impl EngineSession for CountingSession {
    fn step(&mut self, input: &[u8], output: &mut [u8], finish: bool) -> Result<Step> {
        let n = self.counts.steps.fetch_add(1, Ordering::SeqCst) + 1;
        if self.fail_on_step == Some(n) {
            return Err(BzError::EngineStepFailed {
                code: BZ_DATA_ERROR,
            });
        }
        match self.max_slice {
            // Only shorten input while running; in finish mode libbz2 expects the full remainder.
            Some(cap) if !finish => {
                let take_in = input.len().min(cap);
                let take_out = output.len().min(cap);
                self.inner
                    .step(&input[..take_in], &mut output[..take_out], finish)
            }
            Some(cap) => {
                let take_out = output.len().min(cap);
                self.inner.step(input, &mut output[..take_out], finish)
            }
            None => self.inner.step(input, output, finish),
        }
    }

    fn end(self) {
        self.counts.ends.fetch_add(1, Ordering::SeqCst);
        self.inner.end();
    }
}

/// Yields `data` in pieces of at most `chunk` bytes, then fails once `fail_after` bytes have been
/// handed out.
pub struct FlakySource {
    data: Vec<u8>,
    pos: usize,
    chunk: usize,
    fail_after: Option<usize>,
}

impl FlakySource {
    pub fn new(data: Vec<u8>, chunk: usize) -> Self {
        Self {
            data,
            pos: 0,
            chunk,
            fail_after: None,
        }
    }

    pub fn failing_after(mut self, bytes: usize) -> Self {
        self.fail_after = Some(bytes);
        self
    }
}

impl Read for FlakySource {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if let Some(limit) = self.fail_after {
            if self.pos >= limit {
                return Err(io::Error::new(io::ErrorKind::BrokenPipe, "source went away"));
            }
        }
        let n = buf.len().min(self.chunk).min(self.data.len() - self.pos);
        buf[..n].copy_from_slice(&self.data[self.pos..self.pos + n]);
        self.pos += n;
        Ok(n)
    }
}

/// Accepts `capacity` bytes, then refuses every write.
pub struct FullSink {
    pub written: Vec<u8>,
    capacity: usize,
}

impl FullSink {
    pub fn new(capacity: usize) -> Self {
        Self {
            written: Vec::new(),
            capacity,
        }
    }
}

impl Write for FullSink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let room = self.capacity - self.written.len();
        if room == 0 {
            return Err(io::Error::new(io::ErrorKind::Other, "sink is full"));
        }
        let n = buf.len().min(room);
        self.written.extend_from_slice(&buf[..n]);
        Ok(n)
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
