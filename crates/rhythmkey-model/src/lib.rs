// Rhythm key model: timed keystrokes, token codec, quantized digest

pub mod digest;
pub mod error;
pub mod parse;
pub mod rhythm_key;
pub mod timed_event;

pub use digest::{DEFAULT_BUCKET_WIDTH, quantize};
pub use error::{Result, RhythmKeyError};
pub use rhythm_key::RhythmKey;
pub use timed_event::TimedEvent;
