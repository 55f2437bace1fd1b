// Jitter-tolerant SHA-256 fingerprint of a rhythm key.

use sha2::{Digest, Sha256};
use tracing::debug;

use crate::error::{Result, RhythmKeyError};
use crate::rhythm_key::RhythmKey;
use crate::timed_event::TimedEvent;

/// Bucket width (ms) used when none is configured.
pub const DEFAULT_BUCKET_WIDTH: i64 = 20;

/// Round `elapsed` up to the next bucket boundary.
///
/// Computes `((elapsed + bucket) / bucket) * bucket`, so values in
/// `[(n-1)*bucket, n*bucket)` land on `n*bucket` and zero lands on `bucket`.
/// Returns `None` if the result does not fit in a `u64`.
pub fn quantize(elapsed: u64, bucket: u64) -> Option<u64> {
    debug_assert!(bucket > 0);
    elapsed
        .checked_add(bucket)
        .map(|sum| sum / bucket)
        .and_then(|n| n.checked_mul(bucket))
}

fn bucket_width(bucket: i64) -> Result<u64> {
    u64::try_from(bucket)
        .ok()
        .filter(|&b| b > 0)
        .ok_or(RhythmKeyError::InvalidBucketWidth(bucket))
}

impl RhythmKey {
    /// Copy of this key with every delay snapped to its bucket boundary.
    pub fn quantized(&self, bucket: i64) -> Result<RhythmKey> {
        let width = bucket_width(bucket)?;
        let events = self
            .iter()
            .enumerate()
            .map(|(index, event)| {
                quantize(event.elapsed, width)
                    .map(|elapsed| TimedEvent::new(elapsed, event.key))
                    .ok_or(RhythmKeyError::QuantizationOverflow { index })
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(RhythmKey::from_events(events))
    }

    /// Lowercase hex SHA-256 of the quantized encoding.
    pub fn digest(&self, bucket: i64) -> Result<String> {
        let quantized = self.quantized(bucket)?.encode();
        debug!(
            raw = %String::from_utf8_lossy(&self.encode()),
            quantized = %String::from_utf8_lossy(&quantized),
            bucket,
            "digesting rhythm key"
        );

        let mut hasher = Sha256::new();
        hasher.update(&quantized);
        Ok(format!("{:x}", hasher.finalize()))
    }

    /// Whether two keys share a digest under the same bucket width.
    pub fn matches(&self, other: &RhythmKey, bucket: i64) -> Result<bool> {
        Ok(self.digest(bucket)? == other.digest(bucket)?)
    }
}
