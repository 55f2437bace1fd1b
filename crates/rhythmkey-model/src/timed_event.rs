// A single keystroke of a rhythm key.

use serde::{Deserialize, Serialize};

/// One key byte plus the delay that preceded it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TimedEvent {
    /// Milliseconds since the previous accepted key. Zero for the first key of a capture.
    pub elapsed: u64,
    /// The key byte as typed.
    pub key: u8,
}

impl TimedEvent {
    pub fn new(elapsed: u64, key: u8) -> Self {
        Self { elapsed, key }
    }

    /// Appends the `t<elapsed><key>` field to `out`.
    pub(crate) fn encode_into(&self, out: &mut Vec<u8>) {
        out.push(b't');
        out.extend_from_slice(self.elapsed.to_string().as_bytes());
        out.push(self.key);
    }
}
