use thiserror::Error;

/// Failures raised while parsing or digesting a rhythm key.
///
/// Offsets are byte positions into the token being parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RhythmKeyError {
    #[error("empty rhythm key")]
    EmptyInput,

    #[error("expected 't' marker at byte {offset}, found {found:#04x}")]
    MalformedHeader { offset: usize, found: u8 },

    #[error("missing timing digits after 't' at byte {offset}")]
    MissingTiming { offset: usize },

    #[error("timing at byte {offset} does not fit in 64 bits")]
    TimingOverflow { offset: usize },

    #[error("missing key byte after timing at byte {offset}")]
    TruncatedField { offset: usize },

    #[error("bucket width must be positive, got {0}")]
    InvalidBucketWidth(i64),

    #[error("quantized timing of event {index} overflows 64 bits")]
    QuantizationOverflow { index: usize },
}

pub type Result<T> = std::result::Result<T, RhythmKeyError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        let err = RhythmKeyError::MalformedHeader {
            offset: 0,
            found: b'5',
        };
        assert_eq!(err.to_string(), "expected 't' marker at byte 0, found 0x35");
        assert_eq!(
            RhythmKeyError::InvalidBucketWidth(-1).to_string(),
            "bucket width must be positive, got -1"
        );
    }
}
