#![no_main]
use arbitrary::{Arbitrary, Unstructured};
use jsonpull::{DecoderOptions, Pulled, Token, TokenizerOptions, tokenize_bytes_with};
use libfuzzer_sys::fuzz_target;
use serde_json::{Map, Value};

const WHITESPACE: [&str; 8] = [
    " ",
    "\t",
    "\n",
    "\r",
    "\u{a0}",
    "\u{1680}",
    "\u{2028}",
    "\u{3000}",
];

/// One fuzz case: option flags plus either raw bytes or a generated
/// document wrapped in whitespace.
#[derive(Debug, Arbitrary)]
struct Case {
    flags: u8,
    padding: Vec<u8>,
    body: Body,
}

#[derive(Debug, Arbitrary)]
enum Body {
    Raw(Vec<u8>),
    Document { value: ArbitraryValue, pretty: bool },
}

impl Case {
    /// Whitespace run picked by `seed`. Only the first four entries are JSON
    /// whitespace; the rest need `allow_unicode_whitespace`.
    fn pad(&self, out: &mut String) {
        for &seed in &self.padding {
            out.push_str(WHITESPACE[usize::from(seed) % WHITESPACE.len()]);
        }
    }

    fn bytes(&self) -> Vec<u8> {
        match &self.body {
            Body::Raw(bytes) => bytes.clone(),
            Body::Document { value, pretty } => {
                let json = if *pretty {
                    serde_json::to_string_pretty(&value.0)
                } else {
                    serde_json::to_string(&value.0)
                };
                let mut out = String::new();
                self.pad(&mut out);
                out.push_str(&json.unwrap_or_default());
                self.pad(&mut out);
                out.into_bytes()
            }
        }
    }
}

#[derive(Debug)]
struct ArbitraryValue(Value);

impl<'a> Arbitrary<'a> for ArbitraryValue {
    fn arbitrary(u: &mut Unstructured<'a>) -> arbitrary::Result<Self> {
        let value = match u.choose_index(21)? {
            0 => Value::Null,
            1 => Value::Bool(u.arbitrary()?),
            2 => {
                let n: f64 = u.arbitrary()?;
                Value::Number(
                    serde_json::Number::from_f64(n).ok_or(arbitrary::Error::IncorrectFormat)?,
                )
            }
            3..=10 => Value::String(u.arbitrary()?),
            11..=15 => {
                let elems: Vec<ArbitraryValue> = u.arbitrary()?;
                Value::Array(elems.into_iter().map(|v| v.0).collect())
            }
            _ => {
                let fields: Vec<(String, ArbitraryValue)> = u.arbitrary()?;
                Value::Object(fields.into_iter().map(|(k, v)| (k, v.0)).collect())
            }
        };
        Ok(ArbitraryValue(value))
    }
}

type Tokens = std::iter::Peekable<std::vec::IntoIter<Token>>;

/// Rebuilds one value from a token stream. `None` means the stream did not
/// describe a well-formed value.
fn rebuild(tokens: &mut Tokens) -> Option<Value> {
    let value = match tokens.next()? {
        Token::Null => Value::Null,
        Token::True => Value::Bool(true),
        Token::False => Value::Bool(false),
        Token::Number(n) => Value::Number(serde_json::Number::from_f64(n)?),
        Token::String(s) => Value::String(s),
        Token::ArrayStart => {
            let mut items = Vec::new();
            while tokens.peek()? != &Token::ArrayEnd {
                items.push(rebuild(tokens)?);
            }
            tokens.next();
            Value::Array(items)
        }
        Token::ObjectStart => {
            let mut fields = Map::new();
            loop {
                match tokens.next()? {
                    Token::ObjectEnd => break,
                    Token::String(key) => {
                        let value = rebuild(tokens)?;
                        fields.insert(key, value);
                    }
                    _ => return None,
                }
            }
            Value::Object(fields)
        }
        Token::ArrayEnd | Token::ObjectEnd => return None,
    };
    Some(value)
}

fn same_value(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => x.as_f64().is_some() && x.as_f64() == y.as_f64(),
        (Value::Array(x), Value::Array(y)) => {
            x.len() == y.len() && x.iter().zip(y).all(|(x, y)| same_value(x, y))
        }
        (Value::Object(x), Value::Object(y)) => {
            x.len() == y.len()
                && x.iter()
                    .all(|(k, v)| y.get(k).is_some_and(|other| same_value(v, other)))
        }
        _ => a == b,
    }
}

fn tokenizer(case: &Case) {
    let flags = case.flags;
    let bytes = case.bytes();
    let body = bytes.as_slice();

    let options = TokenizerOptions {
        allow_multiple_values: flags & 1 != 0,
        allow_unicode_whitespace: flags & 2 != 0,
        panic_on_error: false,
    };
    let decoder = DecoderOptions {
        replace_invalid: flags & 4 != 0,
    };
    let strict = flags & 7 == 0;

    let mut stream = tokenize_bytes_with(body.iter().copied(), options, decoder);
    let mut tokens = Vec::new();
    let mut depth = 0isize;
    let fault = loop {
        match stream.pull() {
            Pulled::Token(token) => {
                depth += token.depth_delta();
                assert!(depth >= 0, "unbalanced token stream: {tokens:?} {token:?}");
                tokens.push(token);
            }
            Pulled::End => break None,
            Pulled::Fault(err) => break Some(err),
        }
    };

    // Terminal results repeat.
    match &fault {
        Some(err) => assert_eq!(stream.pull(), Pulled::Fault(err.clone())),
        None => {
            assert_eq!(depth, 0, "stream ended with open containers");
            assert_eq!(stream.pull(), Pulled::End);
        }
    }
    assert_eq!(stream.depth(), 0);

    if !strict {
        return;
    }

    // Anything serde_json accepts must tokenize cleanly into the same value.
    if let Ok(expected) = serde_json::from_slice::<Value>(body) {
        assert!(fault.is_none(), "rejected valid JSON: {fault:?}");
        let mut iter = tokens.into_iter().peekable();
        let actual = rebuild(&mut iter).expect("tokens must describe a value");
        assert!(iter.next().is_none(), "tokens left after the root value");
        assert!(same_value(&expected, &actual), "{expected} != {actual}");
    }
}

fuzz_target!(|case: Case| tokenizer(&case));
