//! Byte-at-a-time UTF-8 decoding.
//!
//! [`Utf8Automaton`] is the push-driven core: feed it one byte, get back at
//! most one `char`. Multi-byte sequences are carried across calls, so input
//! may arrive in arbitrarily small chunks. [`Utf8Decoder`] wraps the automaton
//! around any byte iterator and yields `char`s lazily.
//!
//! Decoding is strict: overlong forms, encoded surrogates, code points above
//! U+10FFFF, stray continuation bytes and truncated sequences are rejected.
//! [`DecoderOptions::replace_invalid`] trades the fault for U+FFFD.
//!
//! # Examples
//!
//! ```
//! use jsonpull::decode_utf8;
//!
//! let chars: Result<String, _> = decode_utf8([0x61, 0xE2, 0x99, 0xA5]).collect();
//! assert_eq!(chars.unwrap(), "a♥");
//! ```
use core::iter::FusedIterator;

use crate::{
    error::{DecodeError, DecodeErrorKind},
    options::DecoderOptions,
};

/// A partially decoded multi-byte sequence.
#[derive(Debug, Clone, Copy)]
struct Partial {
    code: u32,
    len: u8,
    remaining: u8,
    start: usize,
}

impl Partial {
    fn finish(self) -> Result<char, DecodeErrorKind> {
        let min = match self.len {
            2 => 0x80,
            3 => 0x800,
            _ => 0x1_0000,
        };
        if self.code < min {
            return Err(DecodeErrorKind::Overlong(self.code));
        }
        if (0xD800..=0xDFFF).contains(&self.code) {
            return Err(DecodeErrorKind::Surrogate(self.code));
        }
        char::from_u32(self.code).ok_or(DecodeErrorKind::OutOfRange(self.code))
    }
}

/// Push-driven UTF-8 decoder state.
///
/// ```
/// use jsonpull::Utf8Automaton;
///
/// let mut utf8 = Utf8Automaton::new();
/// assert_eq!(utf8.feed(0xE2), Ok(None));
/// assert_eq!(utf8.feed(0x99), Ok(None));
/// assert_eq!(utf8.feed(0xA5), Ok(Some('♥')));
/// assert!(utf8.finish().is_ok());
/// ```
#[derive(Debug, Clone, Default)]
pub struct Utf8Automaton {
    partial: Option<Partial>,
    offset: usize,
}

impl Utf8Automaton {
    /// Creates an automaton positioned at byte offset zero.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of bytes consumed so far.
    #[must_use]
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Returns `true` while a multi-byte sequence is incomplete.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.partial.is_some()
    }

    /// Feeds one byte.
    ///
    /// Returns `Ok(Some(ch))` when `byte` completes a scalar value and
    /// `Ok(None)` while a sequence is still open.
    ///
    /// # Errors
    ///
    /// Returns a [`DecodeError`] positioned at the start of the offending
    /// sequence. The automaton is reset and may be fed again. For
    /// [`DecodeErrorKind::InvalidContinuationByte`] the byte is *not*
    /// consumed: feed it again to decode it as the start of a new sequence.
    pub fn feed(&mut self, byte: u8) -> Result<Option<char>, DecodeError> {
        let Some(mut partial) = self.partial.take() else {
            return self.lead(byte);
        };

        if byte & 0xC0 != 0x80 {
            return Err(DecodeError {
                kind: DecodeErrorKind::InvalidContinuationByte(byte),
                offset: partial.start,
            });
        }

        self.offset += 1;
        partial.code = (partial.code << 6) | u32::from(byte & 0x3F);
        partial.remaining -= 1;
        if partial.remaining > 0 {
            self.partial = Some(partial);
            return Ok(None);
        }

        partial.finish().map(Some).map_err(|kind| DecodeError {
            kind,
            offset: partial.start,
        })
    }

    fn lead(&mut self, byte: u8) -> Result<Option<char>, DecodeError> {
        let start = self.offset;
        self.offset += 1;
        match byte.leading_ones() {
            0 => Ok(Some(char::from(byte))),
            n @ 2..=4 => {
                #[allow(clippy::cast_possible_truncation)]
                let len = n as u8;
                self.partial = Some(Partial {
                    code: u32::from(byte & (0x7F >> n)),
                    len,
                    remaining: len - 1,
                    start,
                });
                Ok(None)
            }
            _ => Err(DecodeError {
                kind: DecodeErrorKind::InvalidLeadByte(byte),
                offset: start,
            }),
        }
    }

    /// Signals end of input.
    ///
    /// # Errors
    ///
    /// Returns [`DecodeErrorKind::Truncated`] if a sequence is still open. The
    /// automaton is reset either way.
    pub fn finish(&mut self) -> Result<(), DecodeError> {
        match self.partial.take() {
            Some(partial) => Err(DecodeError {
                kind: DecodeErrorKind::Truncated,
                offset: partial.start,
            }),
            None => Ok(()),
        }
    }
}

/// Lazily decodes a byte iterator into `char`s.
///
/// Not rewindable: decoding again requires a fresh byte source. In strict
/// mode the first fault is yielded once and the decoder then ends.
#[derive(Debug, Clone)]
pub struct Utf8Decoder<I> {
    bytes: I,
    automaton: Utf8Automaton,
    replay: Option<u8>,
    replace_invalid: bool,
    done: bool,
}

impl<I: Iterator<Item = u8>> Utf8Decoder<I> {
    /// Creates a strict decoder over `bytes`.
    pub fn new(bytes: impl IntoIterator<Item = u8, IntoIter = I>) -> Self {
        Self::with_options(bytes, DecoderOptions::default())
    }

    /// Creates a decoder over `bytes` with the given options.
    pub fn with_options(
        bytes: impl IntoIterator<Item = u8, IntoIter = I>,
        options: DecoderOptions,
    ) -> Self {
        Self {
            bytes: bytes.into_iter(),
            automaton: Utf8Automaton::new(),
            replay: None,
            replace_invalid: options.replace_invalid,
            done: false,
        }
    }

    /// Number of bytes consumed so far.
    #[must_use]
    pub fn offset(&self) -> usize {
        self.automaton.offset()
    }

    fn fail(&mut self, err: DecodeError) -> Option<Result<char, DecodeError>> {
        if self.replace_invalid {
            log::trace!("replacing malformed utf-8: {err}");
            return Some(Ok(char::REPLACEMENT_CHARACTER));
        }
        log::debug!("utf-8 decoding failed: {err}");
        self.done = true;
        self.replay = None;
        Some(Err(err))
    }
}

impl<I: Iterator<Item = u8>> Iterator for Utf8Decoder<I> {
    type Item = Result<char, DecodeError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        loop {
            let Some(byte) = self.replay.take().or_else(|| self.bytes.next()) else {
                self.done = true;
                return match self.automaton.finish() {
                    Ok(()) => None,
                    Err(err) => self.fail(err),
                };
            };

            match self.automaton.feed(byte) {
                Ok(Some(ch)) => return Some(Ok(ch)),
                Ok(None) => {}
                Err(err) => {
                    if matches!(err.kind, DecodeErrorKind::InvalidContinuationByte(_)) {
                        self.replay = Some(byte);
                    }
                    return self.fail(err);
                }
            }
        }
    }
}

impl<I: Iterator<Item = u8>> FusedIterator for Utf8Decoder<I> {}

#[cfg(test)]
mod tests {
    use alloc::{string::String, vec::Vec};

    use quickcheck_macros::quickcheck;
    use rstest::rstest;

    use super::*;

    fn strict(bytes: &[u8]) -> Result<String, DecodeError> {
        Utf8Decoder::new(bytes.iter().copied()).collect()
    }

    fn lossy(bytes: &[u8]) -> String {
        Utf8Decoder::with_options(
            bytes.iter().copied(),
            DecoderOptions {
                replace_invalid: true,
            },
        )
        .map(|r| r.expect("lossy mode never fails"))
        .collect()
    }

    #[test]
    fn ascii_passes_through() {
        assert_eq!(strict(&[0x61, 0x62, 0x63]).unwrap(), "abc");
    }

    #[test]
    fn three_byte_heart() {
        let chars: Vec<char> = Utf8Decoder::new([0xE2, 0x99, 0xA5])
            .map(Result::unwrap)
            .collect();
        assert_eq!(chars, ['♥']);
    }

    #[rstest]
    #[case(&[0xC3, 0xA9], "é")]
    #[case(&[0xF0, 0x9F, 0x98, 0x80], "😀")]
    #[case(&[0xEF, 0xBF, 0xBF], "\u{FFFF}")]
    #[case(&[0xF4, 0x8F, 0xBF, 0xBF], "\u{10FFFF}")]
    #[case(&[], "")]
    fn multi_byte_sequences(#[case] bytes: &[u8], #[case] expected: &str) {
        assert_eq!(strict(bytes).unwrap(), expected);
    }

    #[rstest]
    #[case(&[0x80], DecodeErrorKind::InvalidLeadByte(0x80), 0)]
    #[case(&[0x61, 0xFF], DecodeErrorKind::InvalidLeadByte(0xFF), 1)]
    #[case(&[0xC0, 0xAF], DecodeErrorKind::Overlong(0x2F), 0)]
    #[case(&[0xE0, 0x80, 0xAF], DecodeErrorKind::Overlong(0x2F), 0)]
    #[case(&[0xED, 0xA0, 0x80], DecodeErrorKind::Surrogate(0xD800), 0)]
    #[case(&[0xF4, 0x90, 0x80, 0x80], DecodeErrorKind::OutOfRange(0x11_0000), 0)]
    #[case(&[0x61, 0xE2, 0x99], DecodeErrorKind::Truncated, 1)]
    #[case(&[0xE2, 0x41], DecodeErrorKind::InvalidContinuationByte(0x41), 0)]
    fn rejects_malformed(
        #[case] bytes: &[u8],
        #[case] kind: DecodeErrorKind,
        #[case] offset: usize,
    ) {
        let err = strict(bytes).unwrap_err();
        assert_eq!(err.kind(), kind);
        assert_eq!(err.offset(), offset);
    }

    #[test]
    fn strict_mode_stops_after_fault() {
        let mut decoder = Utf8Decoder::new([0x61, 0x80, 0x62]);
        assert_eq!(decoder.next(), Some(Ok('a')));
        assert!(matches!(decoder.next(), Some(Err(_))));
        assert_eq!(decoder.next(), None);
        assert_eq!(decoder.next(), None);
    }

    #[test]
    fn lossy_mode_replays_interrupting_byte() {
        assert_eq!(lossy(&[0xE2, 0x41, 0x42]), "\u{FFFD}AB");
    }

    #[test]
    fn lossy_mode_replaces_truncated_tail() {
        assert_eq!(lossy(&[0x61, 0xF0, 0x9F]), "a\u{FFFD}");
    }

    #[test]
    fn automaton_resumes_after_fault() {
        let mut utf8 = Utf8Automaton::new();
        assert!(utf8.feed(0xFF).is_err());
        assert_eq!(utf8.feed(0x7A), Ok(Some('z')));
        assert_eq!(utf8.offset(), 2);
    }

    #[test]
    fn automaton_does_not_consume_interrupting_byte() {
        let mut utf8 = Utf8Automaton::new();
        assert_eq!(utf8.feed(0xC3), Ok(None));
        assert!(utf8.is_pending());
        assert!(utf8.feed(b'x').is_err());
        assert_eq!(utf8.offset(), 1);
        assert!(!utf8.is_pending());
    }

    #[allow(clippy::needless_pass_by_value)]
    #[quickcheck]
    fn agrees_with_std_on_valid_text(text: String) -> bool {
        strict(text.as_bytes()).as_deref() == Ok(text.as_str())
    }

    #[allow(clippy::needless_pass_by_value)]
    #[quickcheck]
    fn rejects_exactly_what_std_rejects(bytes: Vec<u8>) -> bool {
        strict(&bytes).is_ok() == core::str::from_utf8(&bytes).is_ok()
    }

    #[allow(clippy::needless_pass_by_value)]
    #[quickcheck]
    fn byte_at_a_time_matches_iterator(text: String) -> bool {
        let mut utf8 = Utf8Automaton::new();
        let mut out = String::new();
        for &byte in text.as_bytes() {
            if let Ok(Some(ch)) = utf8.feed(byte) {
                out.push(ch);
            }
        }
        utf8.finish().is_ok() && out == text
    }
}
