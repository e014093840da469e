//! Tokens emitted by the tokenizer.
//!
//! A well-formed document produces `ObjectStart`/`ObjectEnd` and
//! `ArrayStart`/`ArrayEnd` in balanced order, with scalar tokens in between in
//! document order. Object keys are reported as ordinary [`Token::String`]s;
//! the consumer tells keys from values by position (inside an object, tokens
//! alternate key, value).
//!
//! # Examples
//!
//! ```
//! use jsonpull::{Token, tokenize_str};
//!
//! let tokens: Result<Vec<_>, _> = tokenize_str(r#"{"on": [true, 2]}"#).collect();
//! assert_eq!(
//!     tokens.unwrap(),
//!     vec![
//!         Token::ObjectStart,
//!         Token::String("on".into()),
//!         Token::ArrayStart,
//!         Token::True,
//!         Token::Number(2.0),
//!         Token::ArrayEnd,
//!         Token::ObjectEnd,
//!     ]
//! );
//! ```
use alloc::string::String;
use core::fmt;

/// One structural or scalar event of a JSON document.
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(tag = "kind", content = "value")
)]
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    /// `{`
    ObjectStart,
    /// `}`
    ObjectEnd,
    /// `[`
    ArrayStart,
    /// `]`
    ArrayEnd,
    /// A string value or object key, with escapes resolved.
    String(String),
    /// A number, resolved to the nearest `f64`.
    Number(f64),
    /// `true`
    True,
    /// `false`
    False,
    /// `null`
    Null,
}

impl Token {
    /// Returns `true` for `ObjectStart`, `ObjectEnd`, `ArrayStart` and
    /// `ArrayEnd`.
    #[must_use]
    pub fn is_structural(&self) -> bool {
        matches!(
            self,
            Self::ObjectStart | Self::ObjectEnd | Self::ArrayStart | Self::ArrayEnd
        )
    }

    /// Returns `true` if the token is a scalar value.
    #[must_use]
    pub fn is_scalar(&self) -> bool {
        !self.is_structural()
    }

    /// The string payload, if this is a [`Token::String`].
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// The numeric payload, if this is a [`Token::Number`].
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Nesting change caused by this token: `+1` for starts, `-1` for ends.
    #[must_use]
    pub fn depth_delta(&self) -> isize {
        match self {
            Self::ObjectStart | Self::ArrayStart => 1,
            Self::ObjectEnd | Self::ArrayEnd => -1,
            _ => 0,
        }
    }
}

impl From<bool> for Token {
    fn from(value: bool) -> Self {
        if value { Self::True } else { Self::False }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ObjectStart => f.write_str("{"),
            Self::ObjectEnd => f.write_str("}"),
            Self::ArrayStart => f.write_str("["),
            Self::ArrayEnd => f.write_str("]"),
            Self::String(s) => write!(f, "{s:?}"),
            Self::Number(n) => write!(f, "{n}"),
            Self::True => f.write_str("true"),
            Self::False => f.write_str("false"),
            Self::Null => f.write_str("null"),
        }
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::ToString;

    use super::Token;

    #[test]
    fn depth_delta_balances() {
        let tokens = [
            Token::ObjectStart,
            Token::String("a".into()),
            Token::ArrayStart,
            Token::Null,
            Token::ArrayEnd,
            Token::ObjectEnd,
        ];
        assert_eq!(tokens.iter().map(Token::depth_delta).sum::<isize>(), 0);
    }

    #[test]
    fn display_is_compact() {
        assert_eq!(Token::Number(1.5).to_string(), "1.5");
        assert_eq!(Token::from(false).to_string(), "false");
        assert_eq!(Token::ArrayStart.to_string(), "[");
    }

    #[test]
    fn accessors() {
        assert_eq!(Token::String("x".into()).as_str(), Some("x"));
        assert_eq!(Token::Null.as_str(), None);
        assert_eq!(Token::Number(-2.0).as_f64(), Some(-2.0));
        assert!(Token::ObjectEnd.is_structural());
        assert!(Token::True.is_scalar());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn serde_uses_adjacent_tags() {
        let json = serde_json::to_string(&[
            Token::ObjectStart,
            Token::String("a".into()),
            Token::Number(1.5),
        ])
        .unwrap();
        assert_eq!(
            json,
            r#"[{"kind":"ObjectStart"},{"kind":"String","value":"a"},{"kind":"Number","value":1.5}]"#
        );
        let back: alloc::vec::Vec<Token> = serde_json::from_str(&json).unwrap();
        assert_eq!(back[2], Token::Number(1.5));
    }
}
