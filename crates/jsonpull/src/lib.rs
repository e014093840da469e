//! A pull-based JSON tokenizer.
//!
//! `jsonpull` turns a stream of bytes or characters into JSON [`Token`]s one
//! at a time, without building the document in memory. Tokenization is a
//! pushdown automaton with an explicit frame stack, so it can suspend after
//! every token; a small UTF-8 automaton feeds it from raw bytes.
//!
//! ```rust
//! use jsonpull::{Token, tokenize_bytes};
//!
//! let tokens: Vec<Token> = tokenize_bytes(br#"{"a": [true, -0.27e+10]}"#.iter().copied())
//!     .collect::<Result<_, _>>()
//!     .unwrap();
//! assert_eq!(
//!     tokens,
//!     [
//!         Token::ObjectStart,
//!         Token::String("a".into()),
//!         Token::ArrayStart,
//!         Token::True,
//!         Token::Number(-2.7e9),
//!         Token::ArrayEnd,
//!         Token::ObjectEnd,
//!     ]
//! );
//! ```

#![no_std]
extern crate alloc;

#[cfg(test)]
extern crate std;

mod error;
mod escape;
mod frame;
mod literal;
mod options;
mod source;
mod token;
mod tokenizer;
mod utf8;

#[cfg(test)]
mod tests;

pub use error::{DecodeError, DecodeErrorKind, ErrorKind, Position, SyntaxError, TokenizeError};
pub use options::{DecoderOptions, TokenizerOptions};
pub use source::{CharIter, CharSource};
pub use token::Token;
pub use tokenizer::{Pulled, TokenStream};
pub use utf8::{Utf8Automaton, Utf8Decoder};

/// Tokenizes a sequence of characters.
pub fn tokenize<I>(chars: I) -> TokenStream<CharIter<I::IntoIter>>
where
    I: IntoIterator<Item = char>,
{
    tokenize_with(chars, TokenizerOptions::default())
}

/// Tokenizes a sequence of characters with the given options.
pub fn tokenize_with<I>(
    chars: I,
    options: TokenizerOptions,
) -> TokenStream<CharIter<I::IntoIter>>
where
    I: IntoIterator<Item = char>,
{
    TokenStream::with_options(CharIter::new(chars), options)
}

/// Tokenizes a string slice.
///
/// ```rust
/// use jsonpull::{ErrorKind, SyntaxError, tokenize_str};
///
/// let err = tokenize_str("01").next().unwrap().unwrap_err();
/// assert_eq!(err.kind(), &ErrorKind::Syntax(SyntaxError::LeadingZero));
/// ```
#[must_use]
pub fn tokenize_str(text: &str) -> TokenStream<CharIter<core::str::Chars<'_>>> {
    tokenize(text.chars())
}

/// Tokenizes UTF-8 bytes, failing on malformed encodings.
pub fn tokenize_bytes<I>(bytes: I) -> TokenStream<Utf8Decoder<I::IntoIter>>
where
    I: IntoIterator<Item = u8>,
{
    tokenize_bytes_with(bytes, TokenizerOptions::default(), DecoderOptions::default())
}

/// Tokenizes UTF-8 bytes with the given tokenizer and decoder options.
pub fn tokenize_bytes_with<I>(
    bytes: I,
    options: TokenizerOptions,
    decoder: DecoderOptions,
) -> TokenStream<Utf8Decoder<I::IntoIter>>
where
    I: IntoIterator<Item = u8>,
{
    TokenStream::with_options(Utf8Decoder::with_options(bytes, decoder), options)
}

/// Decodes UTF-8 bytes into characters.
pub fn decode_utf8<I>(bytes: I) -> Utf8Decoder<I::IntoIter>
where
    I: IntoIterator<Item = u8>,
{
    Utf8Decoder::new(bytes)
}
