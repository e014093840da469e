use crate::{error::DecodeError, utf8::Utf8Decoder};

/// A pull source of Unicode scalar values for [`TokenStream`].
///
/// Implemented for [`Utf8Decoder`] and, through [`CharIter`], for any
/// iterator of `char`s.
///
/// [`TokenStream`]: crate::TokenStream
pub trait CharSource {
    /// Returns the next character, a decoding fault, or `None` at end of
    /// input.
    fn next_char(&mut self) -> Option<Result<char, DecodeError>>;
}

/// Adapts an iterator of `char`s into an infallible [`CharSource`].
#[derive(Debug, Clone)]
pub struct CharIter<I>(I);

impl<I: Iterator<Item = char>> CharIter<I> {
    /// Wraps `chars`.
    pub fn new(chars: impl IntoIterator<Item = char, IntoIter = I>) -> Self {
        Self(chars.into_iter())
    }
}

impl<I: Iterator<Item = char>> CharSource for CharIter<I> {
    fn next_char(&mut self) -> Option<Result<char, DecodeError>> {
        self.0.next().map(Ok)
    }
}

impl<I: Iterator<Item = u8>> CharSource for Utf8Decoder<I> {
    fn next_char(&mut self) -> Option<Result<char, DecodeError>> {
        self.next()
    }
}

impl<S: CharSource + ?Sized> CharSource for &mut S {
    fn next_char(&mut self) -> Option<Result<char, DecodeError>> {
        (**self).next_char()
    }
}
