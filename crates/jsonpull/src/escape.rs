//! Decoding of `\uXXXX` escapes.
//!
//! [`HexAccumulator`] folds four hexadecimal digits into one UTF-16 code
//! unit. Pairing surrogate code units into a scalar value is done by
//! [`combine_surrogates`] once both halves are known.
use crate::error::SyntaxError;

/// Running value of a `\u` escape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct HexAccumulator {
    remaining: u8,
    value: u16,
}

impl HexAccumulator {
    pub(crate) fn new() -> Self {
        Self {
            remaining: 4,
            value: 0,
        }
    }

    /// Feeds one hex digit.
    ///
    /// Returns `Ok(Some(unit))` once the fourth digit arrives.
    pub(crate) fn feed(&mut self, c: char) -> Result<Option<u16>, SyntaxError> {
        let nibble = c
            .to_digit(16)
            .ok_or(SyntaxError::InvalidUnicodeEscapeChar(c))?;
        #[allow(clippy::cast_possible_truncation)]
        {
            self.value = (self.value << 4) | nibble as u16;
        }
        self.remaining -= 1;
        if self.remaining == 0 {
            Ok(Some(self.value))
        } else {
            Ok(None)
        }
    }
}

pub(crate) fn is_high_surrogate(unit: u16) -> bool {
    (0xD800..=0xDBFF).contains(&unit)
}

pub(crate) fn is_low_surrogate(unit: u16) -> bool {
    (0xDC00..=0xDFFF).contains(&unit)
}

/// Maps a non-surrogate code unit to its `char`.
pub(crate) fn unit_to_char(unit: u16) -> Result<char, SyntaxError> {
    char::from_u32(u32::from(unit)).ok_or(SyntaxError::LoneSurrogate(unit))
}

/// Joins a high and a low surrogate into one scalar value.
pub(crate) fn combine_surrogates(high: u16, low: u16) -> Result<char, SyntaxError> {
    if !is_low_surrogate(low) {
        return Err(SyntaxError::LoneSurrogate(high));
    }
    let code = 0x1_0000 + ((u32::from(high) - 0xD800) << 10) + (u32::from(low) - 0xDC00);
    char::from_u32(code).ok_or(SyntaxError::LoneSurrogate(high))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn feed_all(digits: &str) -> Result<Option<u16>, SyntaxError> {
        let mut acc = HexAccumulator::new();
        let mut out = Ok(None);
        for c in digits.chars() {
            out = acc.feed(c);
            if out.is_err() {
                break;
            }
        }
        out
    }

    #[test]
    fn basic_decoding() {
        let mut acc = HexAccumulator::new();
        assert_eq!(acc.feed('0'), Ok(None));
        assert_eq!(acc.feed('0'), Ok(None));
        assert_eq!(acc.feed('4'), Ok(None));
        assert_eq!(acc.feed('1'), Ok(Some(0x41)));
    }

    #[test]
    fn mixed_case_hex() {
        assert_eq!(feed_all("AbCd"), Ok(Some(0xABCD)));
    }

    #[test]
    fn invalid_hex_error() {
        assert_eq!(
            feed_all("00G0"),
            Err(SyntaxError::InvalidUnicodeEscapeChar('G'))
        );
    }

    #[test]
    fn pairs_surrogates() {
        assert!(is_high_surrogate(0xD83D));
        assert_eq!(combine_surrogates(0xD83D, 0xDE00), Ok('😀'));
        assert_eq!(
            combine_surrogates(0xD83D, 0x0041),
            Err(SyntaxError::LoneSurrogate(0xD83D))
        );
    }

    #[test]
    fn lone_low_surrogate_is_rejected() {
        assert_eq!(unit_to_char(0xDC00), Err(SyntaxError::LoneSurrogate(0xDC00)));
        assert_eq!(unit_to_char(0x00E9), Ok('é'));
    }
}
