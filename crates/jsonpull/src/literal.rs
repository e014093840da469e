use crate::token::Token;

/// What happened after feeding one more character into the literal matcher?
#[derive(Debug, PartialEq)]
pub(crate) enum Step {
    /// Character matched, but the literal is not finished yet.
    NeedMore,
    /// Character matched *and* it was the last one of the literal.
    Done(Token),
    /// Character did **not** match the expected one.
    Reject,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Literal {
    Null,
    True,
    False,
}

/// The unmatched remainder of `true`, `false` or `null`.
///
/// Matching is strictly left-to-right: each accepted character shrinks the
/// expected suffix by one byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct LiteralMatcher {
    rest: &'static [u8],
    kind: Literal,
}

impl LiteralMatcher {
    /// Start matching after the *first* character (`n`, `t`, or `f`).
    pub(crate) fn after(first: char) -> Option<Self> {
        let (rest, kind): (&'static [u8], _) = match first {
            'n' => (b"ull", Literal::Null),
            't' => (b"rue", Literal::True),
            'f' => (b"alse", Literal::False),
            _ => return None,
        };
        Some(Self { rest, kind })
    }

    /// Give the matcher the next input character and learn what to do next.
    pub(crate) fn step(&mut self, c: char) -> Step {
        let Some((&expected, rest)) = self.rest.split_first() else {
            return Step::Reject;
        };
        if char::from(expected) != c {
            return Step::Reject;
        }

        self.rest = rest;
        if rest.is_empty() {
            Step::Done(match self.kind {
                Literal::Null => Token::Null,
                Literal::True => Token::True,
                Literal::False => Token::False,
            })
        } else {
            Step::NeedMore
        }
    }

    /// The characters still expected.
    pub(crate) fn remaining(&self) -> &'static [u8] {
        self.rest
    }
}
