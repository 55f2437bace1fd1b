use std::io::{self, Cursor, Read};
use std::time::Duration;

use rhythmkey_input::{
    ByteStreamSource, CaptureError, CaptureSource, KeyStroke, ScriptedSource, capture,
};
use rhythmkey_model::{RhythmKey, TimedEvent};

/// Reader that yields its bytes and then fails.
struct FailingReader {
    data: Cursor<Vec<u8>>,
}

impl Read for FailingReader {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match self.data.read(buf)? {
            0 => Err(io::Error::new(io::ErrorKind::UnexpectedEof, "device gone")),
            n => Ok(n),
        }
    }
}

#[test]
fn test_capture_forces_first_delay_to_zero() {
    let source = ScriptedSource::from_millis(&[(b'p', 2_500), (b'w', 121), (b'd', 83)]);
    let rk = capture(source).unwrap();
    assert_eq!(
        rk.events(),
        &[
            TimedEvent::new(0, b'p'),
            TimedEvent::new(121, b'w'),
            TimedEvent::new(83, b'd'),
        ]
    );
}

#[test]
fn test_capture_truncates_to_millis() {
    let source = ScriptedSource::new([
        KeyStroke::new(b'a', Duration::from_micros(10)),
        KeyStroke::new(b'b', Duration::from_micros(149_999)),
    ]);
    let rk = capture(source).unwrap();
    assert_eq!(rk.events()[1], TimedEvent::new(149, b'b'));
}

#[test]
fn test_capture_empty_stream() {
    let rk = capture(ScriptedSource::default()).unwrap();
    assert!(rk.is_empty());
}

#[test]
fn test_capture_round_trips_through_token() {
    let source = ScriptedSource::from_millis(&[(b'1', 40), (b't', 7), (b'9', 1_000)]);
    let rk = capture(source).unwrap();
    assert_eq!(RhythmKey::parse(rk.encode()).unwrap(), rk);
}

#[test]
fn test_capture_from_stream_excludes_terminator() {
    let source = ByteStreamSource::new(Cursor::new(b"secret\nignored".to_vec()));
    let rk = capture(source).unwrap();
    let keys: Vec<u8> = rk.iter().map(|e| e.key).collect();
    assert_eq!(keys, b"secret");
    assert_eq!(rk.events()[0].elapsed, 0);
}

#[test]
fn test_capture_by_mut_ref_leaves_source_usable() {
    let mut source = ScriptedSource::from_millis(&[(b'a', 1)]);
    let rk = capture(&mut source).unwrap();
    assert_eq!(rk.len(), 1);
    assert_eq!(source.next_stroke().unwrap(), None);
}

#[test]
fn test_capture_propagates_source_failure() {
    let reader = FailingReader {
        data: Cursor::new(b"ab".to_vec()),
    };
    let err = capture(ByteStreamSource::new(reader)).unwrap_err();
    match err {
        CaptureError::SourceFailure(e) => assert_eq!(e.kind(), io::ErrorKind::UnexpectedEof),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn test_capture_interrupted() {
    let source = ByteStreamSource::new(Cursor::new(b"ab\x03".to_vec()));
    assert!(matches!(capture(source), Err(CaptureError::Interrupted)));
}
