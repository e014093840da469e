//! Frames of the tokenizer's pushdown automaton.
//!
//! Each [`Frame`] is one paused level of a recursive-descent parser. The
//! frame on top of the stack receives every input character and answers with
//! an [`Action`] telling the stack what to do next. Frames never touch the
//! stack themselves.
#![allow(clippy::enum_glob_use)]

use alloc::string::String;
use core::mem;

use crate::{
    error::{ErrorKind, SyntaxError},
    escape::{self, HexAccumulator},
    literal::{self, LiteralMatcher},
    token::Token,
};

/// Where inside a string literal the automaton is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum StringState {
    /// Plain characters.
    ExpectCharPoint,
    /// Just saw `\`.
    ExpectEscapedChar,
    /// Inside `\uXXXX`.
    ExpectHex(HexAccumulator),
    /// A high surrogate was decoded; its low half must follow as `\u`.
    ExpectLowSurrogateEscape { high: u16 },
    /// Saw the `\` of the low half, `u` must follow.
    ExpectLowSurrogateU { high: u16 },
    /// Inside the hex digits of the low half.
    ExpectLowSurrogateHex { high: u16, hex: HexAccumulator },
}

/// Position inside an object.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ObjectState {
    /// Right after `{`.
    ExpectEndOrFieldName,
    /// Right after `,`.
    ExpectFieldName,
    /// A key was read; `:` and a value must follow.
    ExpectFieldValue,
    /// A value was read.
    ExpectEndOrNext,
}

/// Position inside an array.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ArrayState {
    /// Right after `[`.
    ExpectEndOrValue,
    /// A value was read.
    ExpectEndOrNext,
}

/// Position inside a number. The buffer always holds a valid prefix of a
/// JSON numeral; the complete states are the ones where it is a whole one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum NumberState {
    Sign,
    Zero,
    Integer,
    Point,
    Fraction,
    Exponent,
    ExponentSign,
    ExponentDigits,
}

impl NumberState {
    pub(crate) fn is_complete(self) -> bool {
        matches!(
            self,
            Self::Zero | Self::Integer | Self::Fraction | Self::ExponentDigits
        )
    }

    fn next(self, c: char) -> Option<Self> {
        use NumberState::*;
        match (self, c) {
            (Sign, '0') => Some(Zero),
            (Sign, '1'..='9') | (Integer, '0'..='9') => Some(Integer),
            (Zero | Integer, '.') => Some(Point),
            (Point | Fraction, '0'..='9') => Some(Fraction),
            (Zero | Integer | Fraction, 'e' | 'E') => Some(Exponent),
            (Exponent, '+' | '-') => Some(ExponentSign),
            (Exponent | ExponentSign | ExponentDigits, '0'..='9') => Some(ExponentDigits),
            _ => None,
        }
    }
}

/// One entry of the automaton's stack.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Frame {
    ExpectValue,
    ExpectString { state: StringState, buffer: String },
    ExpectObject(ObjectState),
    ExpectArray(ArrayState),
    ExpectLiteral(LiteralMatcher),
    ExpectNumber { state: NumberState, buffer: String },
}

/// What the stack must do after a frame has seen a character.
#[derive(Debug, PartialEq)]
pub(crate) enum Action {
    /// The character was absorbed.
    Consume,
    /// The character was absorbed and produced a token; the frame stays.
    Emit(Token),
    /// The character was absorbed and opened a nested frame.
    Push(Frame),
    /// Open a nested frame and hand it the same character.
    PushReplay(Frame),
    /// The character completed this frame.
    Pop(Token),
    /// This frame is complete without the character, which the parent frame
    /// must see next.
    PopReplay(Token),
}

impl Frame {
    pub(crate) fn string() -> Self {
        Self::ExpectString {
            state: StringState::ExpectCharPoint,
            buffer: String::new(),
        }
    }

    fn number(state: NumberState, first: char) -> Self {
        let mut buffer = String::new();
        buffer.push(first);
        Self::ExpectNumber { state, buffer }
    }

    /// Short label used in trace logs.
    pub(crate) fn name(&self) -> &'static str {
        match self {
            Self::ExpectValue => "value",
            Self::ExpectString { .. } => "string",
            Self::ExpectObject(_) => "object",
            Self::ExpectArray(_) => "array",
            Self::ExpectLiteral(_) => "literal",
            Self::ExpectNumber { .. } => "number",
        }
    }

    /// Feeds one character to this frame. `whitespace` tells whether the
    /// character counts as insignificant whitespace between tokens.
    pub(crate) fn step(&mut self, c: char, whitespace: bool) -> Result<Action, ErrorKind> {
        match self {
            Self::ExpectValue => self.begin_value(c, whitespace),
            Self::ExpectString { state, buffer } => {
                string_step(state, buffer, c).map_err(Into::into)
            }
            Self::ExpectObject(state) => object_step(state, c, whitespace).map_err(Into::into),
            Self::ExpectArray(state) => array_step(state, c, whitespace).map_err(Into::into),
            Self::ExpectLiteral(matcher) => match matcher.step(c) {
                literal::Step::NeedMore => Ok(Action::Consume),
                literal::Step::Done(token) => Ok(Action::Pop(token)),
                literal::Step::Reject => {
                    log::trace!(
                        "literal mismatch on {c:?}, expected one of {:?}",
                        matcher.remaining()
                    );
                    Err(SyntaxError::InvalidCharacter(c).into())
                }
            },
            Self::ExpectNumber { state, buffer } => number_step(state, buffer, c),
        }
    }

    /// Turns an `ExpectValue` frame into the frame of the value that `c`
    /// starts.
    fn begin_value(&mut self, c: char, whitespace: bool) -> Result<Action, ErrorKind> {
        if whitespace {
            return Ok(Action::Consume);
        }
        let (frame, action) = match c {
            '{' => (
                Self::ExpectObject(ObjectState::ExpectEndOrFieldName),
                Action::Emit(Token::ObjectStart),
            ),
            '[' => (
                Self::ExpectArray(ArrayState::ExpectEndOrValue),
                Action::Emit(Token::ArrayStart),
            ),
            '"' => (Self::string(), Action::Consume),
            '-' => (Self::number(NumberState::Sign, c), Action::Consume),
            '0' => (Self::number(NumberState::Zero, c), Action::Consume),
            '1'..='9' => (Self::number(NumberState::Integer, c), Action::Consume),
            _ => match LiteralMatcher::after(c) {
                Some(matcher) => (Self::ExpectLiteral(matcher), Action::Consume),
                None => return Err(SyntaxError::InvalidCharacter(c).into()),
            },
        };
        *self = frame;
        Ok(action)
    }
}

fn string_step(
    state: &mut StringState,
    buffer: &mut String,
    c: char,
) -> Result<Action, SyntaxError> {
    use StringState::*;
    match *state {
        ExpectCharPoint => match c {
            '"' => return Ok(Action::Pop(Token::String(mem::take(buffer)))),
            '\\' => *state = ExpectEscapedChar,
            '\0'..='\x1F' => return Err(SyntaxError::ControlCharacterInString(c)),
            _ => buffer.push(c),
        },
        ExpectEscapedChar => {
            let unescaped = match c {
                '"' | '\\' | '/' => c,
                'b' => '\u{0008}',
                'f' => '\u{000C}',
                'n' => '\n',
                'r' => '\r',
                't' => '\t',
                'u' => {
                    *state = ExpectHex(HexAccumulator::new());
                    return Ok(Action::Consume);
                }
                _ => return Err(SyntaxError::InvalidEscape(c)),
            };
            buffer.push(unescaped);
            *state = ExpectCharPoint;
        }
        ExpectHex(mut hex) => match hex.feed(c)? {
            None => *state = ExpectHex(hex),
            Some(unit) if escape::is_high_surrogate(unit) => {
                *state = ExpectLowSurrogateEscape { high: unit };
            }
            Some(unit) => {
                buffer.push(escape::unit_to_char(unit)?);
                *state = ExpectCharPoint;
            }
        },
        ExpectLowSurrogateEscape { high } => match c {
            '\\' => *state = ExpectLowSurrogateU { high },
            _ => return Err(SyntaxError::LoneSurrogate(high)),
        },
        ExpectLowSurrogateU { high } => match c {
            'u' => {
                *state = ExpectLowSurrogateHex {
                    high,
                    hex: HexAccumulator::new(),
                };
            }
            _ => return Err(SyntaxError::LoneSurrogate(high)),
        },
        ExpectLowSurrogateHex { high, mut hex } => match hex.feed(c)? {
            None => *state = ExpectLowSurrogateHex { high, hex },
            Some(low) => {
                buffer.push(escape::combine_surrogates(high, low)?);
                *state = ExpectCharPoint;
            }
        },
    }
    Ok(Action::Consume)
}

fn object_step(state: &mut ObjectState, c: char, whitespace: bool) -> Result<Action, SyntaxError> {
    use ObjectState::*;
    if whitespace {
        return Ok(Action::Consume);
    }
    match (*state, c) {
        (ExpectEndOrFieldName | ExpectEndOrNext, '}') => Ok(Action::Pop(Token::ObjectEnd)),
        (ExpectEndOrFieldName | ExpectFieldName, '"') => {
            *state = ExpectFieldValue;
            Ok(Action::Push(Frame::string()))
        }
        (ExpectFieldValue, ':') => {
            *state = ExpectEndOrNext;
            Ok(Action::Push(Frame::ExpectValue))
        }
        (ExpectEndOrNext, ',') => {
            *state = ExpectFieldName;
            Ok(Action::Consume)
        }
        _ => Err(SyntaxError::InvalidCharacter(c)),
    }
}

fn array_step(state: &mut ArrayState, c: char, whitespace: bool) -> Result<Action, SyntaxError> {
    use ArrayState::*;
    if whitespace {
        return Ok(Action::Consume);
    }
    match (*state, c) {
        (_, ']') => Ok(Action::Pop(Token::ArrayEnd)),
        (ExpectEndOrValue, _) => {
            *state = ExpectEndOrNext;
            Ok(Action::PushReplay(Frame::ExpectValue))
        }
        (ExpectEndOrNext, ',') => Ok(Action::Push(Frame::ExpectValue)),
        (ExpectEndOrNext, _) => Err(SyntaxError::InvalidCharacter(c)),
    }
}

fn number_step(state: &mut NumberState, buffer: &mut String, c: char) -> Result<Action, ErrorKind> {
    if let Some(next) = state.next(c) {
        buffer.push(c);
        *state = next;
        return Ok(Action::Consume);
    }
    if *state == NumberState::Zero && c.is_ascii_digit() {
        return Err(SyntaxError::LeadingZero.into());
    }
    if !state.is_complete() {
        return Err(SyntaxError::InvalidCharacter(c).into());
    }
    Ok(Action::PopReplay(Token::Number(parse_number(buffer)?)))
}

/// Converts a complete numeral to `f64`.
pub(crate) fn parse_number(buffer: &str) -> Result<f64, ErrorKind> {
    buffer
        .parse::<f64>()
        .map_err(|_| ErrorKind::NumericConversion(buffer.into()))
}
