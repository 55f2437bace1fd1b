// Keystroke capture: sources, raw terminal mode, rhythm key assembly

pub mod capture;
pub mod scripted;
pub mod stream;
pub mod terminal;

pub use capture::{CaptureError, CaptureSource, KeyRecorder, KeyStroke, capture};
pub use scripted::ScriptedSource;
pub use stream::{ByteStreamSource, DEFAULT_TERMINATORS};
pub use terminal::{RawModeGuard, TerminalSource};
