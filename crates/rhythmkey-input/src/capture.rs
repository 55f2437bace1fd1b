// Capture assembly: turns a live keystroke stream into a rhythm key.

use std::io;
use std::time::Duration;

use rhythmkey_model::{RhythmKey, TimedEvent};
use thiserror::Error;
use tracing::debug;

/// One accepted keystroke as measured by a source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyStroke {
    pub key: u8,
    /// Time since the previous accepted keystroke (or since the source opened).
    pub elapsed: Duration,
}

impl KeyStroke {
    pub fn new(key: u8, elapsed: Duration) -> Self {
        Self { key, elapsed }
    }

    /// Elapsed time truncated to whole milliseconds.
    pub fn elapsed_ms(&self) -> u64 {
        u64::try_from(self.elapsed.as_millis()).unwrap_or(u64::MAX)
    }

    /// Elapsed time in whole microseconds, saturating at `u64::MAX`.
    pub fn elapsed_us(&self) -> u64 {
        u64::try_from(self.elapsed.as_micros()).unwrap_or(u64::MAX)
    }
}

#[derive(Debug, Error)]
pub enum CaptureError {
    #[error("capture source failed: {0}")]
    SourceFailure(#[from] io::Error),

    #[error("capture interrupted")]
    Interrupted,
}

/// Producer of timed keystrokes.
///
/// `Ok(None)` is a clean end of input: a terminator key or end of stream.
pub trait CaptureSource {
    fn next_stroke(&mut self) -> Result<Option<KeyStroke>, CaptureError>;
}

impl<S: CaptureSource + ?Sized> CaptureSource for &mut S {
    fn next_stroke(&mut self) -> Result<Option<KeyStroke>, CaptureError> {
        (**self).next_stroke()
    }
}

/// Accumulates keystrokes into timed events.
#[derive(Debug, Default)]
pub struct KeyRecorder {
    events: Vec<TimedEvent>,
}

impl KeyRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a keystroke. The first one always gets a zero delay.
    pub fn record(&mut self, stroke: KeyStroke) {
        let elapsed = if self.events.is_empty() {
            0
        } else {
            stroke.elapsed_ms()
        };
        debug!(
            key = %(stroke.key as char).escape_default(),
            elapsed,
            measured_us = stroke.elapsed_us(),
            "accepted key"
        );
        self.events.push(TimedEvent::new(elapsed, stroke.key));
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn into_rhythm_key(self) -> RhythmKey {
        RhythmKey::from_events(self.events)
    }
}

/// Drain `source` until it reports end of input.
///
/// A source error aborts the capture; nothing recorded so far is returned.
pub fn capture<S: CaptureSource>(mut source: S) -> Result<RhythmKey, CaptureError> {
    let mut recorder = KeyRecorder::new();
    while let Some(stroke) = source.next_stroke()? {
        recorder.record(stroke);
    }
    debug!(keys = recorder.len(), "capture finished");
    Ok(recorder.into_rhythm_key())
}
