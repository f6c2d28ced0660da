//! Decoder for the engine's fixed-layout event records
//!
//! During a synthesis call the engine delivers event-record bytes in
//! blocks, interleaved with sample chunks. Each record is 36 bytes,
//! little-endian: a type tag at offset 0, the 1-based text position at 8,
//! a length field at 12, the audio position in milliseconds at 16, and an
//! 8-byte union region at 28 whose meaning depends on the tag. A block is
//! terminated by a record whose tag is the list-terminated sentinel.
//!
//! Decoding is a pure byte parse: it makes no engine calls and cannot
//! fail on well-formed input. A truncated record, an unknown tag, or a
//! speech record after message termination means the engine binding broke
//! its binary contract, which panics rather than returning an error.

use std::time::Duration;

use tracing::trace;

use crate::event::{EventKind, SynthEvent};

/// Size of one event record in bytes.
pub const EVENT_SIZE: usize = 36;

const TYPE_OFFSET: usize = 0;
const TEXT_POSITION_OFFSET: usize = 8;
const LENGTH_OFFSET: usize = 12;
const AUDIO_POSITION_OFFSET: usize = 16;
const UNION_OFFSET: usize = 28;
const UNION_LEN: usize = 8;

// Engine-native event type tags.
const TAG_LIST_TERMINATED: u32 = 0;
const TAG_WORD: u32 = 1;
const TAG_SENTENCE: u32 = 2;
const TAG_MARK: u32 = 3;
const TAG_PLAY: u32 = 4;
const TAG_END: u32 = 5;
const TAG_MSG_TERMINATED: u32 = 6;
const TAG_PHONEME: u32 = 7;
const TAG_SAMPLERATE: u32 = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DecoderState {
    Streaming,
    Terminated,
}

/// Incremental decoder for one synthesis call's event stream.
///
/// Feed it each raw event block the engine delivers; decoded events are
/// appended to the caller's buffer. After the engine's message-terminated
/// event, only the sentinel may follow.
#[derive(Debug)]
pub struct EventDecoder {
    state: DecoderState,
}

impl Default for EventDecoder {
    fn default() -> Self {
        Self::new()
    }
}

impl EventDecoder {
    pub fn new() -> Self {
        Self {
            state: DecoderState::Streaming,
        }
    }

    /// True once the message-terminated event has been decoded.
    pub fn is_terminated(&self) -> bool {
        self.state == DecoderState::Terminated
    }

    /// Decodes one block of records into `out`.
    ///
    /// Stops consuming at the sentinel record and ignores any bytes after
    /// it within this block; the stream may continue in a later block of
    /// the same synthesis call. Sample-rate notification records are
    /// decoded and discarded.
    ///
    /// # Panics
    ///
    /// Panics if the block is malformed: a record shorter than
    /// [`EVENT_SIZE`], an unknown type tag, a missing sentinel, or a
    /// speech record arriving after message termination. These indicate
    /// the engine binding violated its binary contract.
    pub fn feed(&mut self, raw: &[u8], out: &mut Vec<SynthEvent>) {
        let mut cursor = raw;
        loop {
            assert!(
                cursor.len() >= EVENT_SIZE,
                "truncated event block: {} bytes remain, record is {} bytes",
                cursor.len(),
                EVENT_SIZE
            );
            let record = &cursor[..EVENT_SIZE];
            cursor = &cursor[EVENT_SIZE..];

            let tag = read_u32(record, TYPE_OFFSET);
            if tag == TAG_LIST_TERMINATED {
                return;
            }
            if tag == TAG_SAMPLERATE {
                // Engine housekeeping, not a speech milestone.
                trace!("skipping sample-rate notification record");
                continue;
            }
            assert!(
                self.state == DecoderState::Streaming,
                "event record (tag {tag}) after message termination"
            );

            let event = decode_record(record, tag);
            trace!(?event, "decoded synthesis event");
            if event.is_terminal() {
                self.state = DecoderState::Terminated;
            }
            out.push(event);
        }
    }
}

fn decode_record(record: &[u8], tag: u32) -> SynthEvent {
    let text_position = read_u32(record, TEXT_POSITION_OFFSET);
    let length = read_u32(record, LENGTH_OFFSET);
    // The engine reports audio position in milliseconds.
    let audio_position = Duration::from_millis(u64::from(read_u32(record, AUDIO_POSITION_OFFSET)));

    let kind = match tag {
        TAG_WORD => EventKind::Word {
            length,
            number: read_i32(record, UNION_OFFSET),
        },
        TAG_SENTENCE => EventKind::Sentence {
            number: read_i32(record, UNION_OFFSET),
        },
        TAG_MARK => EventKind::Mark {
            name: read_union_str(record),
        },
        TAG_PLAY => EventKind::Play {
            name: read_union_str(record),
        },
        TAG_END => EventKind::End,
        TAG_MSG_TERMINATED => EventKind::MsgTerminated,
        TAG_PHONEME => EventKind::Phoneme {
            phoneme: read_union_str(record),
        },
        other => panic!("unknown event type tag {other} from engine"),
    };

    SynthEvent {
        text_position,
        audio_position,
        kind,
    }
}

fn read_u32(buf: &[u8], offset: usize) -> u32 {
    let mut bytes = [0u8; 4];
    bytes.copy_from_slice(&buf[offset..offset + 4]);
    u32::from_le_bytes(bytes)
}

fn read_i32(buf: &[u8], offset: usize) -> i32 {
    read_u32(buf, offset) as i32
}

/// Reads the NUL-terminated string embedded in the union region.
fn read_union_str(record: &[u8]) -> String {
    let region = &record[UNION_OFFSET..UNION_OFFSET + UNION_LEN];
    let end = region.iter().position(|&b| b == 0).unwrap_or(UNION_LEN);
    String::from_utf8_lossy(&region[..end]).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(tag: u32, text_position: u32, length: u32, audio_ms: u32, union: [u8; 8]) -> [u8; EVENT_SIZE] {
        let mut rec = [0u8; EVENT_SIZE];
        rec[TYPE_OFFSET..TYPE_OFFSET + 4].copy_from_slice(&tag.to_le_bytes());
        rec[TEXT_POSITION_OFFSET..TEXT_POSITION_OFFSET + 4]
            .copy_from_slice(&text_position.to_le_bytes());
        rec[LENGTH_OFFSET..LENGTH_OFFSET + 4].copy_from_slice(&length.to_le_bytes());
        rec[AUDIO_POSITION_OFFSET..AUDIO_POSITION_OFFSET + 4]
            .copy_from_slice(&audio_ms.to_le_bytes());
        rec[UNION_OFFSET..UNION_OFFSET + UNION_LEN].copy_from_slice(&union);
        rec
    }

    fn number_union(n: i32) -> [u8; 8] {
        let mut union = [0u8; 8];
        union[..4].copy_from_slice(&n.to_le_bytes());
        union
    }

    fn str_union(s: &str) -> [u8; 8] {
        let mut union = [0u8; 8];
        union[..s.len()].copy_from_slice(s.as_bytes());
        union
    }

    fn sentinel() -> [u8; EVENT_SIZE] {
        record(TAG_LIST_TERMINATED, 0, 0, 0, [0; 8])
    }

    fn block(records: &[[u8; EVENT_SIZE]]) -> Vec<u8> {
        records.iter().flatten().copied().collect()
    }

    #[test]
    fn decodes_records_until_sentinel_in_order() {
        let raw = block(&[
            record(TAG_SENTENCE, 1, 0, 0, number_union(1)),
            record(TAG_WORD, 1, 5, 0, number_union(1)),
            record(TAG_WORD, 7, 5, 310, number_union(2)),
            record(TAG_END, 13, 0, 700, [0; 8]),
            sentinel(),
        ]);

        let mut decoder = EventDecoder::new();
        let mut events = Vec::new();
        decoder.feed(&raw, &mut events);

        assert_eq!(events.len(), 4);
        assert_eq!(events[0].kind, EventKind::Sentence { number: 1 });
        assert_eq!(
            events[1].kind,
            EventKind::Word {
                length: 5,
                number: 1
            }
        );
        assert_eq!(events[1].text_position, 1);
        assert_eq!(events[2].text_position, 7);
        assert_eq!(events[2].audio_position, Duration::from_millis(310));
        assert_eq!(events[3].kind, EventKind::End);
        assert!(!decoder.is_terminated());
    }

    #[test]
    fn bytes_after_sentinel_are_ignored() {
        let mut raw = block(&[record(TAG_WORD, 1, 5, 0, number_union(1)), sentinel()]);
        // Garbage trailing the sentinel must not be parsed.
        raw.extend_from_slice(&[0xFF; 7]);

        let mut events = Vec::new();
        EventDecoder::new().feed(&raw, &mut events);
        assert_eq!(events.len(), 1);
    }

    #[test]
    fn mark_and_play_carry_embedded_names() {
        let raw = block(&[
            record(TAG_MARK, 12, 0, 450, str_union("intro")),
            record(TAG_PLAY, 30, 0, 900, str_union("chime")),
            sentinel(),
        ]);

        let mut events = Vec::new();
        EventDecoder::new().feed(&raw, &mut events);

        assert_eq!(
            events[0].kind,
            EventKind::Mark {
                name: "intro".into()
            }
        );
        assert_eq!(
            events[1].kind,
            EventKind::Play {
                name: "chime".into()
            }
        );
    }

    #[test]
    fn phoneme_string_without_nul_uses_full_union() {
        let raw = block(&[
            record(TAG_PHONEME, 3, 0, 120, str_union("@")),
            record(TAG_PHONEME, 4, 0, 200, *b"aIeInOne"),
            sentinel(),
        ]);

        let mut events = Vec::new();
        EventDecoder::new().feed(&raw, &mut events);

        assert_eq!(events[0].kind, EventKind::Phoneme { phoneme: "@".into() });
        assert_eq!(
            events[1].kind,
            EventKind::Phoneme {
                phoneme: "aIeInOne".into()
            }
        );
    }

    #[test]
    fn sample_rate_records_are_skipped() {
        let raw = block(&[
            record(TAG_SAMPLERATE, 0, 0, 0, number_union(22050)),
            record(TAG_WORD, 1, 5, 0, number_union(1)),
            sentinel(),
        ]);

        let mut events = Vec::new();
        EventDecoder::new().feed(&raw, &mut events);
        assert_eq!(events.len(), 1);
        assert!(matches!(events[0].kind, EventKind::Word { .. }));
    }

    #[test]
    fn stream_continues_across_blocks() {
        let mut decoder = EventDecoder::new();
        let mut events = Vec::new();

        decoder.feed(
            &block(&[record(TAG_WORD, 1, 5, 0, number_union(1)), sentinel()]),
            &mut events,
        );
        decoder.feed(
            &block(&[
                record(TAG_MSG_TERMINATED, 13, 0, 950, [0; 8]),
                sentinel(),
            ]),
            &mut events,
        );

        assert_eq!(events.len(), 2);
        assert!(decoder.is_terminated());
        assert_eq!(events[1].kind, EventKind::MsgTerminated);
    }

    #[test]
    fn sentinel_alone_after_termination_is_accepted() {
        let mut decoder = EventDecoder::new();
        let mut events = Vec::new();
        decoder.feed(
            &block(&[record(TAG_MSG_TERMINATED, 1, 0, 0, [0; 8]), sentinel()]),
            &mut events,
        );
        decoder.feed(&block(&[sentinel()]), &mut events);
        assert_eq!(events.len(), 1);
    }

    #[test]
    #[should_panic(expected = "after message termination")]
    fn speech_record_after_termination_panics() {
        let raw = block(&[
            record(TAG_MSG_TERMINATED, 1, 0, 0, [0; 8]),
            record(TAG_WORD, 1, 5, 0, number_union(1)),
            sentinel(),
        ]);
        EventDecoder::new().feed(&raw, &mut Vec::new());
    }

    #[test]
    #[should_panic(expected = "truncated event block")]
    fn truncated_record_panics() {
        let raw = block(&[record(TAG_WORD, 1, 5, 0, number_union(1))]);
        // One record, no sentinel: the decoder must fault rather than
        // silently stop.
        EventDecoder::new().feed(&raw[..raw.len() - 1], &mut Vec::new());
    }

    #[test]
    #[should_panic(expected = "truncated event block")]
    fn missing_sentinel_panics() {
        let raw = block(&[record(TAG_WORD, 1, 5, 0, number_union(1))]);
        EventDecoder::new().feed(&raw, &mut Vec::new());
    }

    #[test]
    #[should_panic(expected = "unknown event type tag")]
    fn unknown_tag_panics() {
        let raw = block(&[record(99, 1, 0, 0, [0; 8]), sentinel()]);
        EventDecoder::new().feed(&raw, &mut Vec::new());
    }
}
