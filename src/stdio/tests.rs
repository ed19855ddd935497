#![allow(clippy::unwrap_used)]

use super::*;

/// Wide source handing out a fixed number of units per read so boundaries
/// can be forced anywhere, including inside a surrogate pair.
struct DribbleSource {
    units: Vec<u16>,
    cursor: usize,
    per_read: usize,
}

impl DribbleSource {
    fn new(text: &str, per_read: usize) -> Self {
        Self {
            units: text.encode_utf16().collect(),
            cursor: 0,
            per_read,
        }
    }
}

impl WideSource for DribbleSource {
    fn read_wide(&mut self, buf: &mut [u16]) -> io::Result<usize> {
        let left = self.units.len() - self.cursor;
        let take = left.min(self.per_read).min(buf.len());
        buf[..take].copy_from_slice(&self.units[self.cursor..self.cursor + take]);
        self.cursor += take;
        Ok(take)
    }
}

#[test]
fn writer_bridges_ascii() {
    let mut writer = Utf8Writer::new(Vec::new());
    writer.write_all(b"hello").unwrap();
    writer.flush().unwrap();
    assert_eq!(writer.into_inner(), "hello".encode_utf16().collect::<Vec<u16>>());
}

#[test]
fn writer_carries_split_sequence_across_writes() {
    let euro = "\u{20AC}".as_bytes();
    let mut writer = Utf8Writer::new(Vec::new());

    // First two bytes of the three-byte sequence: nothing reaches the sink.
    writer.write_all(&euro[..2]).unwrap();
    assert!(writer.get_ref().is_empty());

    // The final byte completes the sequence.
    writer.write_all(&euro[2..]).unwrap();
    assert_eq!(writer.into_inner(), vec![0x20AC]);
}

#[test]
fn writer_byte_at_a_time_produces_whole_stream() {
    let text = "a\u{20AC}\u{1F40D}z";
    let mut writer = Utf8Writer::new(Vec::new());
    for byte in text.as_bytes() {
        writer.write_all(&[*byte]).unwrap();
    }
    assert_eq!(writer.into_inner(), text.encode_utf16().collect::<Vec<u16>>());
}

#[test]
fn writer_rejects_invalid_bytes() {
    let mut writer = Utf8Writer::new(Vec::new());
    let err = writer.write(&[0xFF]).unwrap_err();
    assert_eq!(err.kind(), io::ErrorKind::InvalidData);
}

#[test]
fn reader_bridges_whole_text() {
    let text = "acci\u{00F3}n \u{1F40D}";
    let mut reader = Utf8Reader::new(DribbleSource::new(text, 512));
    let mut narrow = String::new();
    reader.read_to_string(&mut narrow).unwrap();
    assert_eq!(narrow, text);
}

#[test]
fn reader_holds_back_split_surrogate_pair() {
    // One unit per read forces every surrogate pair to split across reads.
    let text = "\u{1F40D}\u{1F40E}";
    let mut reader = Utf8Reader::new(DribbleSource::new(text, 1));
    let mut narrow = String::new();
    reader.read_to_string(&mut narrow).unwrap();
    assert_eq!(narrow, text);
}

#[test]
fn reader_errors_on_unpaired_surrogate_at_end() {
    struct Lone(bool);
    impl WideSource for Lone {
        fn read_wide(&mut self, buf: &mut [u16]) -> io::Result<usize> {
            if self.0 {
                return Ok(0);
            }
            self.0 = true;
            buf[0] = 0xD83D;
            Ok(1)
        }
    }

    let mut reader = Utf8Reader::new(Lone(false));
    let mut narrow = String::new();
    let err = reader.read_to_string(&mut narrow).unwrap_err();
    assert_eq!(err.kind(), io::ErrorKind::InvalidData);
}

#[test]
fn bridged_stdio_round_trips() {
    let mut stdio = Utf8Stdio::from_wide(
        DribbleSource::new("ping\n", 2),
        Vec::new(),
        Vec::new(),
    );

    let mut line = String::new();
    stdio.stdin().read_to_string(&mut line).unwrap();
    assert_eq!(line, "ping\n");

    stdio.stdout().write_all("pong \u{20AC}\n".as_bytes()).unwrap();
    stdio.stdout().flush().unwrap();
}

#[test]
fn init_claims_streams_exactly_once() {
    let first = Utf8Stdio::init();
    assert!(first.is_some());
    assert!(Utf8Stdio::init().is_none());
}
