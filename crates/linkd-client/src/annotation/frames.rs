//! Framing of decoded generation text.
//!
//! Two wire conventions are understood:
//!
//! - **Plain text** (`text/plain`): every decoded chunk is text, except a
//!   chunk starting with `Error:`, which carries a terminal error message.
//! - **Server-Sent Events** (`text/event-stream`): `data:` lines carry text,
//!   an `event: error` event carries a terminal error message and an
//!   `event: done` event completes the stream.

/// Marker that opens an in-band error chunk on plain-text streams.
pub(crate) const ERROR_MARKER: &str = "Error:";

const FALLBACK_ERROR: &str = "text generation failed";

/// Body framing of a generation response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamProtocol {
    PlainText,
    EventStream,
}

impl StreamProtocol {
    /// Picks the framing from a `Content-Type` header value.
    #[must_use]
    pub fn from_content_type(content_type: Option<&str>) -> Self {
        match content_type {
            Some(ct)
                if ct
                    .split(';')
                    .next()
                    .is_some_and(|mime| mime.trim().eq_ignore_ascii_case("text/event-stream")) =>
            {
                StreamProtocol::EventStream
            }
            _ => StreamProtocol::PlainText,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Frame {
    Text(String),
    Error(String),
    Done,
}

#[derive(Debug)]
pub(crate) enum FrameDecoder {
    Plain,
    EventStream(SseParser),
}

impl FrameDecoder {
    pub(crate) fn new(protocol: StreamProtocol) -> Self {
        match protocol {
            StreamProtocol::PlainText => FrameDecoder::Plain,
            StreamProtocol::EventStream => FrameDecoder::EventStream(SseParser::default()),
        }
    }

    /// Frames produced by one decoded chunk.
    pub(crate) fn push(&mut self, chunk: &str) -> Vec<Frame> {
        match self {
            FrameDecoder::Plain => plain_frame(chunk).into_iter().collect(),
            FrameDecoder::EventStream(parser) => parser.push(chunk),
        }
    }
}

fn plain_frame(chunk: &str) -> Option<Frame> {
    if chunk.is_empty() {
        return None;
    }
    if let Some(rest) = chunk.strip_prefix(ERROR_MARKER) {
        return Some(Frame::Error(error_text(rest)));
    }
    Some(Frame::Text(chunk.to_owned()))
}

fn error_text(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        FALLBACK_ERROR.to_owned()
    } else {
        trimmed.to_owned()
    }
}

/// Line-oriented SSE parser. Events dispatch on a blank line; an event left
/// incomplete at end of stream is dropped.
#[derive(Debug, Default)]
pub(crate) struct SseParser {
    line: String,
    event: Option<String>,
    data: Vec<String>,
}

impl SseParser {
    fn push(&mut self, chunk: &str) -> Vec<Frame> {
        let mut frames = Vec::new();
        for ch in chunk.chars() {
            if ch == '\n' {
                let line = std::mem::take(&mut self.line);
                let line = line.strip_suffix('\r').unwrap_or(&line);
                if let Some(frame) = self.process_line(line) {
                    frames.push(frame);
                }
            } else {
                self.line.push(ch);
            }
        }
        frames
    }

    fn process_line(&mut self, line: &str) -> Option<Frame> {
        if line.is_empty() {
            return self.dispatch();
        }
        if line.starts_with(':') {
            return None;
        }

        let (field, value) = match line.split_once(':') {
            Some((field, value)) => (field, value.strip_prefix(' ').unwrap_or(value)),
            None => (line, ""),
        };
        match field {
            "event" => self.event = Some(value.to_owned()),
            "data" => self.data.push(value.to_owned()),
            _ => {}
        }
        None
    }

    fn dispatch(&mut self) -> Option<Frame> {
        let event = self.event.take();
        let data = std::mem::take(&mut self.data);
        let has_data = !data.is_empty();
        let payload = data.join("\n");

        match event.as_deref() {
            Some("error") => Some(Frame::Error(error_text(&payload))),
            Some("done") => Some(Frame::Done),
            _ if has_data && !payload.is_empty() => Some(Frame::Text(payload)),
            _ => None,
        }
    }
}
