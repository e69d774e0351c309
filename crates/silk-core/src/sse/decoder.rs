//! Incremental SSE frame decoder.
//!
//! The transport delivers the event stream as byte chunks that respect
//! neither line nor frame boundaries, so the decoder keeps a byte buffer
//! and extracts as many complete newline-terminated lines as possible per
//! fed chunk. Frames are the OpenAI chat-completions shape: `data: <json>`
//! lines terminated by a literal `data: [DONE]` sentinel.
//!
//! Frame-level rules:
//! - a single trailing `\r` is stripped from each line
//! - empty lines and `:`-prefixed comment lines are skipped
//! - lines without the `data: ` prefix are skipped
//! - the `[DONE]` sentinel ends the stream; bytes still buffered at that
//!   point are discarded, as is any unterminated partial line at end of
//!   data (no partial-line flush)
//! - a payload that fails JSON parsing is logged and skipped; one
//!   malformed frame never poisons the rest of the stream

use silk_types::gateway::{ChatCompletionChunk, DONE_SENTINEL};

const DATA_PREFIX: &str = "data: ";

/// Events produced while feeding chunks to the decoder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FrameEvent {
    /// A text fragment extracted from a well-formed frame, to be appended
    /// to the accumulating assistant message.
    Delta(String),
    /// The `[DONE]` sentinel was seen; the stream is logically finished.
    Done,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DecoderState {
    /// Accumulating bytes until the next newline.
    AwaitingLine,
    /// The sentinel was seen; all further input is ignored.
    Done,
}

/// Stateful line-oriented decoder for one completion stream.
#[derive(Debug)]
pub struct SseDecoder {
    buffer: Vec<u8>,
    state: DecoderState,
}

impl SseDecoder {
    pub fn new() -> Self {
        Self {
            buffer: Vec::new(),
            state: DecoderState::AwaitingLine,
        }
    }

    /// Whether the `[DONE]` sentinel has been consumed.
    pub fn is_done(&self) -> bool {
        self.state == DecoderState::Done
    }

    /// Feed one transport chunk, returning the frame events it completed.
    ///
    /// Fragments are returned in arrival order; callers must merge them in
    /// that order. After [`FrameEvent::Done`] every further feed is a no-op.
    pub fn feed(&mut self, chunk: &[u8]) -> Vec<FrameEvent> {
        if self.state == DecoderState::Done {
            return Vec::new();
        }

        self.buffer.extend_from_slice(chunk);

        let mut events = Vec::new();
        while let Some(pos) = self.buffer.iter().position(|&b| b == b'\n') {
            // Split at the first newline; the remainder stays buffered.
            let line_bytes: Vec<u8> = self.buffer.drain(..=pos).collect();
            let mut line = String::from_utf8_lossy(&line_bytes[..pos]).into_owned();

            if line.ends_with('\r') {
                line.pop();
            }
            if line.is_empty() || line.starts_with(':') {
                continue;
            }
            let Some(payload) = line.strip_prefix(DATA_PREFIX) else {
                continue;
            };
            let payload = payload.trim();

            if payload == DONE_SENTINEL {
                // Logical end of stream: stop decoding entirely and drop
                // whatever is still buffered.
                self.state = DecoderState::Done;
                self.buffer.clear();
                events.push(FrameEvent::Done);
                break;
            }

            match serde_json::from_str::<ChatCompletionChunk>(payload) {
                Ok(parsed) => {
                    if let Some(fragment) = parsed.text_fragment() {
                        events.push(FrameEvent::Delta(fragment.to_string()));
                    }
                }
                Err(err) => {
                    tracing::warn!(error = %err, "skipping malformed stream frame");
                }
            }
        }

        events
    }
}

impl Default for SseDecoder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn delta_frame(text: &str) -> String {
        format!("data: {{\"choices\":[{{\"delta\":{{\"content\":\"{text}\"}}}}]}}\n")
    }

    fn collect_text(events: &[FrameEvent]) -> String {
        events
            .iter()
            .filter_map(|e| match e {
                FrameEvent::Delta(t) => Some(t.as_str()),
                FrameEvent::Done => None,
            })
            .collect()
    }

    #[test]
    fn test_single_frame() {
        let mut decoder = SseDecoder::new();
        let events = decoder.feed(delta_frame("Hello").as_bytes());
        assert_eq!(events, vec![FrameEvent::Delta("Hello".to_string())]);
    }

    #[test]
    fn test_frame_split_mid_line_across_chunks() {
        let frame = delta_frame("Hello");
        let (a, b) = frame.split_at(17);

        let mut decoder = SseDecoder::new();
        assert!(decoder.feed(a.as_bytes()).is_empty());
        let events = decoder.feed(b.as_bytes());
        assert_eq!(events, vec![FrameEvent::Delta("Hello".to_string())]);
    }

    #[test]
    fn test_chunk_split_equivalence() {
        // Decoding a byte sequence must be invariant under arbitrary chunking.
        let raw = format!(
            "{}{}\n{}data: [DONE]\n",
            delta_frame("Hel"),
            ":keepalive",
            delta_frame("lo")
        );

        let whole = {
            let mut d = SseDecoder::new();
            collect_text(&d.feed(raw.as_bytes()))
        };

        for split in 1..raw.len() {
            let (a, b) = raw.as_bytes().split_at(split);
            let mut d = SseDecoder::new();
            let mut events = d.feed(a);
            events.extend(d.feed(b));
            assert_eq!(collect_text(&events), whole, "split at {split}");
        }

        assert_eq!(whole, "Hello");
    }

    #[test]
    fn test_multibyte_fragment_split_across_chunks() {
        let frame = delta_frame("héllo");
        let bytes = frame.as_bytes();
        // Split inside the two-byte UTF-8 sequence for 'é'.
        let split = frame.find('é').unwrap() + 1;

        let mut decoder = SseDecoder::new();
        let mut events = decoder.feed(&bytes[..split]);
        events.extend(decoder.feed(&bytes[split..]));
        assert_eq!(collect_text(&events), "héllo");
    }

    #[test]
    fn test_malformed_frame_does_not_poison_stream() {
        let input = format!(
            "{}data: {{not json!!\n{}",
            delta_frame("Hel"),
            delta_frame("lo")
        );

        let mut decoder = SseDecoder::new();
        let events = decoder.feed(input.as_bytes());
        assert_eq!(collect_text(&events), "Hello");
    }

    #[test]
    fn test_comments_and_blank_lines_are_skipped() {
        let input = format!(": comment\n\r\n\n{}: another\n", delta_frame("hi"));
        let mut decoder = SseDecoder::new();
        let events = decoder.feed(input.as_bytes());
        assert_eq!(events, vec![FrameEvent::Delta("hi".to_string())]);
    }

    #[test]
    fn test_non_data_lines_are_skipped() {
        let input = format!("event: message\n{}", delta_frame("hi"));
        let mut decoder = SseDecoder::new();
        let events = decoder.feed(input.as_bytes());
        assert_eq!(events, vec![FrameEvent::Delta("hi".to_string())]);
    }

    #[test]
    fn test_crlf_line_endings() {
        let input = "data: {\"choices\":[{\"delta\":{\"content\":\"ok\"}}]}\r\n";
        let mut decoder = SseDecoder::new();
        let events = decoder.feed(input.as_bytes());
        assert_eq!(events, vec![FrameEvent::Delta("ok".to_string())]);
    }

    #[test]
    fn test_done_halts_processing() {
        let input = format!("data: [DONE]\n{}", delta_frame("ignored"));
        let mut decoder = SseDecoder::new();
        let events = decoder.feed(input.as_bytes());
        assert_eq!(events, vec![FrameEvent::Done]);
        assert!(decoder.is_done());

        // Further feeds are no-ops.
        assert!(decoder.feed(delta_frame("still ignored").as_bytes()).is_empty());
    }

    #[test]
    fn test_buffered_partial_line_after_done_is_discarded() {
        let mut decoder = SseDecoder::new();
        // A partial line with no terminating newline, then the sentinel.
        decoder.feed(b"data: {\"choices\":[{\"delta\":{\"content\":\"lost");
        let events = decoder.feed(b"\ndata: [DONE]\n");
        // The partial line completes into a malformed frame (skipped), and
        // nothing after the sentinel is ever parsed.
        assert_eq!(events, vec![FrameEvent::Done]);
    }

    #[test]
    fn test_unterminated_trailing_line_is_never_emitted() {
        let mut decoder = SseDecoder::new();
        let events = decoder.feed(b"data: {\"choices\":[{\"delta\":{\"content\":\"x\"}}]}");
        // No newline seen, so nothing is emitted; end-of-data discards it.
        assert!(events.is_empty());
    }

    #[test]
    fn test_empty_delta_is_not_emitted() {
        let mut decoder = SseDecoder::new();
        let events = decoder.feed(delta_frame("").as_bytes());
        assert!(events.is_empty());
    }

    #[test]
    fn test_end_to_end_hello_scenario() {
        let chunks: [&[u8]; 2] = [
            b"data: {\"choices\":[{\"delta\":{\"content\":\"Hel\"}}]}\n",
            b"data: {\"choices\":[{\"delta\":{\"content\":\"lo\"}}]}\n\ndata: [DONE]\n",
        ];

        let mut decoder = SseDecoder::new();
        let mut text = String::new();
        let mut done = false;
        for chunk in chunks {
            for event in decoder.feed(chunk) {
                match event {
                    FrameEvent::Delta(t) => text.push_str(&t),
                    FrameEvent::Done => done = true,
                }
            }
        }

        assert_eq!(text, "Hello");
        assert!(done);
    }
}
