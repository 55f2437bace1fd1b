// Terminal keystroke capture in raw (no echo, no line buffering) mode.

use std::io::{self, IsTerminal, Stdin};

use crossterm::terminal;
use tracing::{debug, warn};

use crate::capture::{CaptureError, CaptureSource, KeyStroke};
use crate::stream::ByteStreamSource;

/// Holds the terminal in raw mode until dropped.
///
/// The previous mode is restored on drop, so every exit path of a capture
/// (success, early return, error, unwind) leaves the terminal as it was.
#[derive(Debug)]
pub struct RawModeGuard {
    restore: bool,
}

impl RawModeGuard {
    /// Enter raw mode. If it was already enabled, dropping the guard leaves it on.
    pub fn acquire() -> io::Result<Self> {
        let already_raw = terminal::is_raw_mode_enabled()?;
        if !already_raw {
            terminal::enable_raw_mode()?;
            debug!("terminal raw mode enabled");
        }
        Ok(Self {
            restore: !already_raw,
        })
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        if !self.restore {
            return;
        }
        match terminal::disable_raw_mode() {
            Ok(()) => debug!("terminal raw mode restored"),
            Err(e) => warn!("failed to restore terminal mode: {e}"),
        }
    }
}

/// Keystroke source reading the process's stdin.
///
/// Raw mode is only entered when stdin is a terminal; piped input is read as is.
pub struct TerminalSource {
    inner: ByteStreamSource<Stdin>,
    guard: Option<RawModeGuard>,
}

impl TerminalSource {
    pub fn open(terminators: &[u8]) -> Result<Self, CaptureError> {
        let stdin = io::stdin();
        let guard = if stdin.is_terminal() {
            Some(RawModeGuard::acquire()?)
        } else {
            debug!("stdin is not a terminal, reading without raw mode");
            None
        };
        Ok(Self {
            inner: ByteStreamSource::with_terminators(stdin, terminators),
            guard,
        })
    }

    pub fn is_raw(&self) -> bool {
        self.guard.is_some()
    }
}

impl CaptureSource for TerminalSource {
    fn next_stroke(&mut self) -> Result<Option<KeyStroke>, CaptureError> {
        self.inner.next_stroke()
    }
}
