use alloc::string::String;

use thiserror::Error;

/// A fault raised by [`TokenStream`](crate::TokenStream).
///
/// Carries the position of the last character read before the fault. For
/// faults raised at end of input this is the final character of the document
/// (or `0:0` if nothing was read at all).
#[derive(Error, Debug, Clone, PartialEq)]
#[error("{kind} at {line}:{column}")]
pub struct TokenizeError {
    pub(crate) kind: ErrorKind,
    pub(crate) offset: usize,
    pub(crate) line: usize,
    pub(crate) column: usize,
}

impl TokenizeError {
    pub(crate) fn new(kind: ErrorKind, position: Position) -> Self {
        Self {
            kind,
            offset: position.offset,
            line: position.line,
            column: position.column,
        }
    }

    /// What went wrong.
    #[must_use]
    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }

    /// Zero-based character offset of the offending character.
    #[must_use]
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// One-based line of the offending character.
    #[must_use]
    pub fn line(&self) -> usize {
        self.line
    }

    /// One-based column of the offending character.
    #[must_use]
    pub fn column(&self) -> usize {
        self.column
    }

    /// Returns `true` for faults caused by malformed JSON text.
    #[must_use]
    pub fn is_syntax(&self) -> bool {
        matches!(self.kind, ErrorKind::Syntax(_))
    }
}

/// The category of a [`TokenizeError`].
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ErrorKind {
    /// A character is not valid in the current grammar state.
    #[error("syntax error: {0}")]
    Syntax(#[from] SyntaxError),
    /// A numeral accepted by the grammar could not be converted to `f64`.
    #[error("invalid numeric literal {0:?}")]
    NumericConversion(String),
    /// The input ended while a value was still open.
    #[error("unexpected end of input")]
    UnexpectedEndOfInput,
    /// The stream was cancelled before the document was complete.
    #[error("tokenization cancelled before the document was complete")]
    PrematureTermination,
    /// The byte source could not be decoded.
    #[error("decode error: {0}")]
    Decode(#[from] DecodeError),
}

/// Grammar violations.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyntaxError {
    /// The character cannot appear here.
    #[error("invalid character {0:?}")]
    InvalidCharacter(char),
    /// Unescaped control characters (below U+0020) are not allowed in strings.
    #[error("unescaped control character {0:?} in string")]
    ControlCharacterInString(char),
    /// Unknown escape sequence in a string.
    #[error("invalid escape character {0:?}")]
    InvalidEscape(char),
    /// A `\u` escape contained a non-hexadecimal character.
    #[error("invalid unicode escape sequence at character: {0:?}")]
    InvalidUnicodeEscapeChar(char),
    /// A UTF-16 surrogate escape without its partner.
    #[error("unpaired surrogate in unicode escape \\u{0:04X}")]
    LoneSurrogate(u16),
    /// A number started with `0` followed by another digit.
    #[error("leading zeros are not allowed in numbers")]
    LeadingZero,
    /// Non-whitespace after a complete root value.
    #[error("trailing character {0:?} after the end of the document")]
    TrailingCharacter(char),
}

/// A malformed UTF-8 sequence.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("{kind} at byte {offset}")]
pub struct DecodeError {
    pub(crate) kind: DecodeErrorKind,
    pub(crate) offset: usize,
}

impl DecodeError {
    /// What was wrong with the sequence.
    #[must_use]
    pub fn kind(&self) -> DecodeErrorKind {
        self.kind
    }

    /// Byte offset where the offending sequence starts.
    #[must_use]
    pub fn offset(&self) -> usize {
        self.offset
    }
}

/// The ways a byte sequence can fail to be UTF-8.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeErrorKind {
    /// The byte cannot start a sequence.
    #[error("invalid lead byte 0x{0:02X}")]
    InvalidLeadByte(u8),
    /// A sequence was interrupted by a byte that is not `10xxxxxx`.
    #[error("invalid continuation byte 0x{0:02X}")]
    InvalidContinuationByte(u8),
    /// The code point was encoded with more bytes than necessary.
    #[error("overlong encoding of U+{0:04X}")]
    Overlong(u32),
    /// UTF-8 must not encode UTF-16 surrogates.
    #[error("encoded surrogate U+{0:04X}")]
    Surrogate(u32),
    /// The code point is above U+10FFFF.
    #[error("code point 0x{0:X} is out of range")]
    OutOfRange(u32),
    /// The input ended in the middle of a sequence.
    #[error("truncated sequence")]
    Truncated,
}

/// Location of the last character the tokenizer read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Position {
    /// Zero-based character offset.
    pub offset: usize,
    /// One-based line number; `0` before the first character.
    pub line: usize,
    /// One-based column number; `0` before the first character.
    pub column: usize,
}
