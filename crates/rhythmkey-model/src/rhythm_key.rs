// Rhythm key: ordered keystrokes with their inter-key delays.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::RhythmKeyError;
use crate::timed_event::TimedEvent;

/// An ordered sequence of timed keystrokes.
///
/// Keys built by capture always start with a zero delay. Keys built by
/// [`RhythmKey::parse`] keep whatever the first field encoded.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RhythmKey {
    events: Vec<TimedEvent>,
}

impl RhythmKey {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_events(events: Vec<TimedEvent>) -> Self {
        Self { events }
    }

    pub fn events(&self) -> &[TimedEvent] {
        &self.events
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TimedEvent> {
        self.events.iter()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Serializes to the `t<elapsed><key>...` token.
    ///
    /// Returns bytes because a key byte is not necessarily valid UTF-8 on its own.
    pub fn encode(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.events.len() * 4);
        for event in &self.events {
            event.encode_into(&mut out);
        }
        out
    }
}

impl<'a> IntoIterator for &'a RhythmKey {
    type Item = &'a TimedEvent;
    type IntoIter = std::slice::Iter<'a, TimedEvent>;

    fn into_iter(self) -> Self::IntoIter {
        self.events.iter()
    }
}

impl fmt::Display for RhythmKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for event in &self.events {
            write!(f, "{}({})", event.key as char, event.elapsed)?;
        }
        Ok(())
    }
}

impl FromStr for RhythmKey {
    type Err = RhythmKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
