//! Incremental UTF-8 decoding across network chunk boundaries.

/// Streaming UTF-8 decoder.
///
/// A multi-byte sequence split across two chunks is held back until the rest
/// arrives. Invalid sequences decode to U+FFFD.
#[derive(Debug, Default)]
pub(crate) struct Utf8Decoder {
    pending: Vec<u8>,
}

impl Utf8Decoder {
    /// Decodes as much of `pending + bytes` as forms complete characters.
    pub(crate) fn decode(&mut self, bytes: &[u8]) -> String {
        self.pending.extend_from_slice(bytes);
        let mut out = String::new();

        loop {
            match std::str::from_utf8(&self.pending) {
                Ok(text) => {
                    out.push_str(text);
                    self.pending.clear();
                    break;
                }
                Err(err) => {
                    let valid = err.valid_up_to();
                    out.push_str(&String::from_utf8_lossy(&self.pending[..valid]));
                    match err.error_len() {
                        // Truncated sequence at the end: wait for more bytes.
                        None => {
                            self.pending.drain(..valid);
                            break;
                        }
                        Some(len) => {
                            out.push(char::REPLACEMENT_CHARACTER);
                            self.pending.drain(..valid + len);
                        }
                    }
                }
            }
        }

        out
    }

    /// Flushes bytes still held back at end of stream.
    pub(crate) fn finish(&mut self) -> String {
        if self.pending.is_empty() {
            return String::new();
        }
        let out = String::from_utf8_lossy(&self.pending).into_owned();
        self.pending.clear();
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ascii_passes_through() {
        let mut decoder = Utf8Decoder::default();
        assert_eq!(decoder.decode(b"hello"), "hello");
        assert_eq!(decoder.finish(), "");
    }

    #[test]
    fn split_multibyte_character_is_held_back() {
        let bytes = "café".as_bytes();
        let (head, tail) = bytes.split_at(bytes.len() - 1);
        let mut decoder = Utf8Decoder::default();
        assert_eq!(decoder.decode(head), "caf");
        assert_eq!(decoder.decode(tail), "é");
    }

    #[test]
    fn four_byte_character_split_three_ways() {
        let bytes = "🎓".as_bytes();
        let mut decoder = Utf8Decoder::default();
        assert_eq!(decoder.decode(&bytes[..1]), "");
        assert_eq!(decoder.decode(&bytes[1..3]), "");
        assert_eq!(decoder.decode(&bytes[3..]), "🎓");
    }

    #[test]
    fn invalid_byte_becomes_replacement_character() {
        let mut decoder = Utf8Decoder::default();
        assert_eq!(decoder.decode(b"a\xffb"), "a\u{FFFD}b");
    }

    #[test]
    fn truncated_tail_flushes_as_replacement() {
        let mut decoder = Utf8Decoder::default();
        assert_eq!(decoder.decode(&"é".as_bytes()[..1]), "");
        assert_eq!(decoder.finish(), "\u{FFFD}");
        assert_eq!(decoder.finish(), "");
    }
}
