// Token parser: `( 't' DIGIT+ KEY )+`

use crate::error::{Result, RhythmKeyError};
use crate::rhythm_key::RhythmKey;
use crate::timed_event::TimedEvent;

const MARKER: u8 = b't';

impl RhythmKey {
    /// Parse a `t<elapsed><key>...` token.
    ///
    /// A digit run stops where the byte after it can be the key and the rest
    /// of the token still splits into whole fields, preferring the longest
    /// such run. So a digit key (`t105` is `10` then `5`) or a `t` key is read
    /// back exactly as [`RhythmKey::encode`] wrote it. The first field keeps
    /// its encoded timing; it is not forced to zero.
    pub fn parse(token: impl AsRef<[u8]>) -> Result<Self> {
        let token = token.as_ref();
        if token.is_empty() {
            return Err(RhythmKeyError::EmptyInput);
        }

        let splits = FieldSplits::scan(token);
        let mut events = Vec::new();
        let mut pos = 0;
        while pos < token.len() {
            let (event, next) = parse_field(token, pos, &splits)?;
            events.push(event);
            pos = next;
        }

        Ok(RhythmKey::from_events(events))
    }
}

/// Right-to-left tables used to pick each field's digit run.
struct FieldSplits {
    /// `digit_runs[i]`: number of consecutive ASCII digits starting at `i`.
    digit_runs: Vec<usize>,
    /// `complete[i]`: `token[i..]` is empty or splits into whole fields.
    complete: Vec<bool>,
}

impl FieldSplits {
    fn scan(token: &[u8]) -> Self {
        let n = token.len();
        let mut digit_runs = vec![0; n + 1];
        let mut complete = vec![false; n + 1];
        complete[n] = true;

        for i in (0..n).rev() {
            if token[i].is_ascii_digit() {
                digit_runs[i] = digit_runs[i + 1] + 1;
            }
            if token[i] == MARKER && i + 1 < n {
                let splits = (1..=digit_runs[i + 1]).any(|len| {
                    let key = i + 1 + len;
                    key < n && complete[key + 1]
                });
                complete[i] = splits;
            }
        }

        Self {
            digit_runs,
            complete,
        }
    }

    /// Longest digit run at `digits_start` that leaves a completable remainder.
    fn run_len(&self, digits_start: usize) -> Option<usize> {
        let n = self.complete.len() - 1;
        (1..=self.digit_runs[digits_start])
            .rev()
            .find(|len| {
                let key = digits_start + len;
                key < n && self.complete[key + 1]
            })
    }
}

/// Parse one field starting at `pos`. Returns the event and the offset just past it.
///
/// When no run length completes the token, the full digit run is taken so the
/// error points at the first byte that cannot be parsed.
fn parse_field(token: &[u8], pos: usize, splits: &FieldSplits) -> Result<(TimedEvent, usize)> {
    let found = token[pos];
    if found != MARKER {
        return Err(RhythmKeyError::MalformedHeader { offset: pos, found });
    }

    let digits_start = pos + 1;
    let max_len = splits.digit_runs[digits_start];
    if max_len == 0 {
        return Err(RhythmKeyError::MissingTiming {
            offset: digits_start,
        });
    }
    let digits_len = splits.run_len(digits_start).unwrap_or(max_len);
    let digits_end = digits_start + digits_len;

    let elapsed = parse_decimal(&token[digits_start..digits_end]).ok_or(
        RhythmKeyError::TimingOverflow {
            offset: digits_start,
        },
    )?;

    let Some(&key) = token.get(digits_end) else {
        return Err(RhythmKeyError::TruncatedField { offset: digits_end });
    };

    Ok((TimedEvent::new(elapsed, key), digits_end + 1))
}

/// Parse ASCII decimal digits into a `u64`, returning `None` on overflow.
fn parse_decimal(digits: &[u8]) -> Option<u64> {
    digits.iter().try_fold(0u64, |acc, &d| {
        acc.checked_mul(10)?.checked_add(u64::from(d - b'0'))
    })
}
