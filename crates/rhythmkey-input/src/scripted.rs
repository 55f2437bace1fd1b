// Pre-recorded keystroke source, for tests and replays.

use std::collections::VecDeque;
use std::time::Duration;

use crate::capture::{CaptureError, CaptureSource, KeyStroke};

/// Replays a fixed list of keystrokes, then reports end of input.
#[derive(Debug, Default)]
pub struct ScriptedSource {
    strokes: VecDeque<KeyStroke>,
}

impl ScriptedSource {
    pub fn new(strokes: impl IntoIterator<Item = KeyStroke>) -> Self {
        Self {
            strokes: strokes.into_iter().collect(),
        }
    }

    /// Build from `(key, delay in ms)` pairs.
    pub fn from_millis(pairs: &[(u8, u64)]) -> Self {
        Self::new(
            pairs
                .iter()
                .map(|&(key, ms)| KeyStroke::new(key, Duration::from_millis(ms))),
        )
    }

    pub fn remaining(&self) -> usize {
        self.strokes.len()
    }
}

impl CaptureSource for ScriptedSource {
    fn next_stroke(&mut self) -> Result<Option<KeyStroke>, CaptureError> {
        Ok(self.strokes.pop_front())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_replays_in_order() {
        let mut source = ScriptedSource::from_millis(&[(b'a', 5), (b'b', 10)]);
        assert_eq!(source.remaining(), 2);
        assert_eq!(
            source.next_stroke().unwrap(),
            Some(KeyStroke::new(b'a', Duration::from_millis(5)))
        );
        assert_eq!(
            source.next_stroke().unwrap(),
            Some(KeyStroke::new(b'b', Duration::from_millis(10)))
        );
        assert_eq!(source.next_stroke().unwrap(), None);
    }
}
