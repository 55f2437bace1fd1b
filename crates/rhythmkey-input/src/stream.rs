// Byte-at-a-time keystroke source over any reader.

use std::io::{self, Read};
use std::time::{Duration, Instant};

use crate::capture::{CaptureError, CaptureSource, KeyStroke};

/// Default end-of-input keys: newline and carriage return (Enter in raw mode).
pub const DEFAULT_TERMINATORS: &[u8] = b"\n\r";

/// Ctrl-C as delivered by a terminal in raw mode.
pub const INTERRUPT: u8 = 0x03;
/// Ctrl-D as delivered by a terminal in raw mode.
pub const END_OF_TRANSMISSION: u8 = 0x04;

/// Reads one byte per keystroke and times each against the previous one.
pub struct ByteStreamSource<R> {
    reader: R,
    terminators: Vec<u8>,
    last_accept: Instant,
    finished: bool,
}

impl<R: Read> ByteStreamSource<R> {
    pub fn new(reader: R) -> Self {
        Self::with_terminators(reader, DEFAULT_TERMINATORS)
    }

    pub fn with_terminators(reader: R, terminators: &[u8]) -> Self {
        Self {
            reader,
            terminators: terminators.to_vec(),
            last_accept: Instant::now(),
            finished: false,
        }
    }

    fn read_byte(&mut self) -> io::Result<Option<u8>> {
        let mut buf = [0u8; 1];
        loop {
            match self.reader.read(&mut buf) {
                Ok(0) => return Ok(None),
                Ok(_) => return Ok(Some(buf[0])),
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            }
        }
    }

    fn accept(&mut self, key: u8) -> KeyStroke {
        let now = Instant::now();
        let elapsed: Duration = now.duration_since(self.last_accept);
        self.last_accept = now;
        KeyStroke::new(key, elapsed)
    }
}

impl<R: Read> CaptureSource for ByteStreamSource<R> {
    fn next_stroke(&mut self) -> Result<Option<KeyStroke>, CaptureError> {
        if self.finished {
            return Ok(None);
        }
        let next = match self.read_byte()? {
            None | Some(END_OF_TRANSMISSION) => None,
            Some(INTERRUPT) => {
                self.finished = true;
                return Err(CaptureError::Interrupted);
            }
            Some(b) if self.terminators.contains(&b) => None,
            Some(b) => Some(self.accept(b)),
        };
        if next.is_none() {
            self.finished = true;
        }
        Ok(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn keys<R: Read>(source: &mut ByteStreamSource<R>) -> Vec<u8> {
        let mut out = Vec::new();
        while let Some(stroke) = source.next_stroke().unwrap() {
            out.push(stroke.key);
        }
        out
    }

    #[test]
    fn test_stops_at_newline() {
        let mut source = ByteStreamSource::new(Cursor::new(b"abc\ndef".to_vec()));
        assert_eq!(keys(&mut source), b"abc");
        // stays finished
        assert!(source.next_stroke().unwrap().is_none());
    }

    #[test]
    fn test_stops_at_carriage_return() {
        let mut source = ByteStreamSource::new(Cursor::new(b"pw\r".to_vec()));
        assert_eq!(keys(&mut source), b"pw");
    }

    #[test]
    fn test_stops_at_eof() {
        let mut source = ByteStreamSource::new(Cursor::new(b"xyz".to_vec()));
        assert_eq!(keys(&mut source), b"xyz");
    }

    #[test]
    fn test_stops_at_ctrl_d() {
        let mut source = ByteStreamSource::new(Cursor::new(b"ab\x04cd".to_vec()));
        assert_eq!(keys(&mut source), b"ab");
    }

    #[test]
    fn test_ctrl_c_interrupts() {
        let mut source = ByteStreamSource::new(Cursor::new(b"a\x03b".to_vec()));
        assert_eq!(source.next_stroke().unwrap().map(|s| s.key), Some(b'a'));
        assert!(matches!(
            source.next_stroke(),
            Err(CaptureError::Interrupted)
        ));
    }

    #[test]
    fn test_custom_terminators() {
        let mut source =
            ByteStreamSource::with_terminators(Cursor::new(b"a\nb;c".to_vec()), b";");
        assert_eq!(keys(&mut source), b"a\nb");
    }

    #[test]
    fn test_elapsed_is_monotonic_sum() {
        let start = Instant::now();
        let mut source = ByteStreamSource::new(Cursor::new(b"abc".to_vec()));
        let mut total = Duration::ZERO;
        while let Some(stroke) = source.next_stroke().unwrap() {
            total += stroke.elapsed;
        }
        assert!(total <= start.elapsed());
    }
}
