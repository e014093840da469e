//! The pull-driven JSON tokenizer.
//!
//! [`TokenStream`] is a pushdown automaton over a [`CharSource`]. It holds an
//! explicit stack of [`Frame`]s in place of a recursive-descent call stack,
//! so it can stop after any token and resume on the next request. Nothing is
//! computed ahead of demand: each call reads exactly as many characters as
//! the next token needs.
//!
//! # Examples
//!
//! ```rust
//! use jsonpull::{Pulled, Token, tokenize_str};
//!
//! let mut tokens = tokenize_str("[1, null]");
//! assert_eq!(tokens.pull(), Pulled::Token(Token::ArrayStart));
//! assert_eq!(tokens.pull(), Pulled::Token(Token::Number(1.0)));
//! assert_eq!(tokens.pull(), Pulled::Token(Token::Null));
//! assert_eq!(tokens.pull(), Pulled::Token(Token::ArrayEnd));
//! assert_eq!(tokens.pull(), Pulled::End);
//! assert_eq!(tokens.pull(), Pulled::End);
//! ```
use alloc::vec::Vec;
use core::iter::FusedIterator;

use crate::{
    error::{ErrorKind, Position, SyntaxError, TokenizeError},
    frame::{self, Action, Frame},
    options::TokenizerOptions,
    source::CharSource,
    token::Token,
};

/// Result of one [`TokenStream::pull`].
#[derive(Debug, Clone, PartialEq)]
pub enum Pulled {
    /// The next token.
    Token(Token),
    /// The input is exhausted and every value was complete.
    End,
    /// Tokenization failed. Repeats on every later pull.
    Fault(TokenizeError),
}

#[derive(Debug, Clone, PartialEq)]
enum State {
    Running,
    Ended,
    Faulted(TokenizeError),
}

/// A lazy sequence of [`Token`]s read from a [`CharSource`].
///
/// Use [`pull`](Self::pull) for an explicit `Token | End | Fault` result, or
/// iterate to get `Result<Token, TokenizeError>` items: a fault is yielded
/// once, after which the iterator is exhausted.
#[derive(Debug)]
pub struct TokenStream<S> {
    source: S,
    stack: Vec<Frame>,
    /// A character seen by a finished number frame, owed to its parent.
    lookahead: Option<char>,
    end_of_input: bool,
    state: State,
    fault_reported: bool,

    position: Position,
    read: usize,
    next_line: usize,
    next_column: usize,

    allow_unicode_whitespace: bool,
    multiple_values: bool,

    /// Panic on faults instead of returning them
    #[cfg(any(test, feature = "fuzzing"))]
    panic_on_error: bool,
}

impl<S: CharSource> TokenStream<S> {
    /// Creates a tokenizer over `source` with default options.
    #[must_use]
    pub fn new(source: S) -> Self {
        Self::with_options(source, TokenizerOptions::default())
    }

    /// Creates a tokenizer over `source`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use jsonpull::{CharIter, TokenStream, TokenizerOptions};
    ///
    /// let stream = TokenStream::with_options(
    ///     CharIter::new("1 2 3".chars()),
    ///     TokenizerOptions {
    ///         allow_multiple_values: true,
    ///         ..Default::default()
    ///     },
    /// );
    /// assert_eq!(stream.count(), 3);
    /// ```
    #[must_use]
    pub fn with_options(source: S, options: TokenizerOptions) -> Self {
        let mut stack = Vec::with_capacity(16);
        if !options.allow_multiple_values {
            stack.push(Frame::ExpectValue);
        }
        Self {
            source,
            stack,
            lookahead: None,
            end_of_input: false,
            state: State::Running,
            fault_reported: false,

            position: Position::default(),
            read: 0,
            next_line: 1,
            next_column: 1,

            allow_unicode_whitespace: options.allow_unicode_whitespace,
            multiple_values: options.allow_multiple_values,
            #[cfg(any(test, feature = "fuzzing"))]
            panic_on_error: options.panic_on_error,
        }
    }

    /// Advances until the next token, the end of input, or a fault.
    ///
    /// Once `End` or `Fault` has been returned, every later call returns the
    /// same result.
    pub fn pull(&mut self) -> Pulled {
        match &self.state {
            State::Running => {}
            State::Ended => return Pulled::End,
            State::Faulted(err) => return Pulled::Fault(err.clone()),
        }

        match self.advance() {
            Ok(Some(token)) => {
                log::trace!("token {token:?} at depth {}", self.stack.len());
                Pulled::Token(token)
            }
            Ok(None) => {
                log::trace!("end of input after {} characters", self.read);
                self.state = State::Ended;
                self.release();
                Pulled::End
            }
            Err(err) => {
                #[cfg(any(test, feature = "fuzzing"))]
                assert!(!self.panic_on_error, "Tokenizer fault: {err}");
                log::debug!("tokenizer fault: {err}");
                self.state = State::Faulted(err.clone());
                self.release();
                Pulled::Fault(err)
            }
        }
    }

    /// Abandons the stream.
    ///
    /// All frames and buffers are released. If a value was still open the
    /// stream ends with [`ErrorKind::PrematureTermination`]; otherwise it
    /// simply ends. Calling this on a finished stream has no effect.
    pub fn cancel(&mut self) {
        if self.state != State::Running {
            return;
        }
        if self.stack.is_empty() {
            self.state = State::Ended;
        } else {
            log::debug!("cancelled with {} open frames", self.stack.len());
            self.state = State::Faulted(TokenizeError::new(
                ErrorKind::PrematureTermination,
                self.position,
            ));
        }
        self.release();
    }

    /// Number of open frames.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    /// Location of the last character read.
    #[must_use]
    pub fn position(&self) -> Position {
        self.position
    }

    /// Returns `true` once the stream has ended or faulted.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.state != State::Running
    }

    fn release(&mut self) {
        self.stack = Vec::new();
        self.lookahead = None;
    }

    fn error(&self, kind: impl Into<ErrorKind>) -> TokenizeError {
        TokenizeError::new(kind.into(), self.position)
    }

    fn is_whitespace(&self, c: char) -> bool {
        matches!(c, ' ' | '\t' | '\n' | '\r')
            || (self.allow_unicode_whitespace && c.is_whitespace())
    }

    /// Next character: the owed lookahead if any, else a fresh one from the
    /// source.
    fn read_char(&mut self) -> Result<Option<char>, TokenizeError> {
        if let Some(c) = self.lookahead.take() {
            return Ok(Some(c));
        }
        if self.end_of_input {
            return Ok(None);
        }
        match self.source.next_char() {
            Some(Ok(c)) => {
                self.position = Position {
                    offset: self.read,
                    line: self.next_line,
                    column: self.next_column,
                };
                self.read += 1;
                if c == '\n' {
                    self.next_line += 1;
                    self.next_column = 1;
                } else {
                    self.next_column += 1;
                }
                Ok(Some(c))
            }
            Some(Err(err)) => Err(self.error(err)),
            None => {
                self.end_of_input = true;
                Ok(None)
            }
        }
    }

    fn push(&mut self, frame: Frame) {
        log::trace!("push {} frame at depth {}", frame.name(), self.stack.len());
        self.stack.push(frame);
    }

    fn pop(&mut self) {
        if let Some(frame) = self.stack.pop() {
            log::trace!("pop {} frame at depth {}", frame.name(), self.stack.len());
        }
    }

    /// Drives the automaton until it produces one token (`Some`) or the
    /// input ends cleanly (`None`).
    fn advance(&mut self) -> Result<Option<Token>, TokenizeError> {
        loop {
            let Some(c) = self.read_char()? else {
                return self.end_of_input();
            };
            let whitespace = self.is_whitespace(c);

            let Some(top) = self.stack.last_mut() else {
                // Between root values.
                if whitespace {
                    continue;
                }
                if !self.multiple_values {
                    return Err(self.error(SyntaxError::TrailingCharacter(c)));
                }
                self.push(Frame::ExpectValue);
                self.lookahead = Some(c);
                continue;
            };

            let action = match top.step(c, whitespace) {
                Ok(action) => action,
                Err(kind) => return Err(self.error(kind)),
            };

            match action {
                Action::Consume => {}
                Action::Emit(token) => return Ok(Some(token)),
                Action::Push(frame) => self.push(frame),
                Action::PushReplay(frame) => {
                    self.push(frame);
                    self.lookahead = Some(c);
                }
                Action::Pop(token) => {
                    self.pop();
                    return Ok(Some(token));
                }
                Action::PopReplay(token) => {
                    self.pop();
                    self.lookahead = Some(c);
                    return Ok(Some(token));
                }
            }
        }
    }

    /// Input is exhausted. Only a complete root number may still finish; any
    /// other open frame is an error.
    fn end_of_input(&mut self) -> Result<Option<Token>, TokenizeError> {
        let number = match self.stack.as_slice() {
            [] => return Ok(None),
            [Frame::ExpectNumber { state, buffer }] if state.is_complete() => {
                frame::parse_number(buffer).map_err(|kind| self.error(kind))?
            }
            _ => return Err(self.error(ErrorKind::UnexpectedEndOfInput)),
        };
        self.pop();
        Ok(Some(Token::Number(number)))
    }
}

impl<S: CharSource> Iterator for TokenStream<S> {
    type Item = Result<Token, TokenizeError>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.pull() {
            Pulled::Token(token) => Some(Ok(token)),
            Pulled::End => None,
            Pulled::Fault(_) if self.fault_reported => None,
            Pulled::Fault(err) => {
                self.fault_reported = true;
                Some(Err(err))
            }
        }
    }
}

impl<S: CharSource> FusedIterator for TokenStream<S> {}
