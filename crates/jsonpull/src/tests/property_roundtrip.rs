use alloc::vec::Vec;

use quickcheck::QuickCheck;
use rstest::rstest;

use super::arbitrary::{Doc, Padding};
use crate::{ErrorKind, Token, tokenize_bytes, tokenize_str};

fn tests() -> u64 {
    if is_ci::cached() { 10_000 } else { 1_000 }
}

/// Property: tokenizing a serialized document yields exactly the tokens the
/// document describes, whether it arrives as characters or as UTF-8 bytes.
#[test]
fn roundtrip_quickcheck() {
    #[allow(clippy::needless_pass_by_value)]
    fn prop(doc: Doc, ascii_only: bool) -> bool {
        let text = doc.to_json(&mut Padding::none(), ascii_only);
        let expected = doc.tokens();

        let from_chars: Result<Vec<Token>, _> = tokenize_str(&text).collect();
        let from_bytes: Result<Vec<Token>, _> = tokenize_bytes(text.bytes()).collect();
        from_chars.as_ref() == Ok(&expected) && from_bytes.as_ref() == Ok(&expected)
    }

    QuickCheck::new()
        .tests(tests())
        .quickcheck(prop as fn(Doc, bool) -> bool);
}

/// Property: cutting a container document short yields a strict prefix of its
/// tokens followed by an end-of-input fault.
#[test]
fn truncation_yields_prefix_quickcheck() {
    #[allow(clippy::needless_pass_by_value)]
    fn prop(doc: Doc, cut: usize) -> bool {
        if !doc.is_container() {
            return true;
        }
        let text = doc.to_json(&mut Padding::none(), false);
        let chars: Vec<char> = text.chars().collect();
        let truncated: alloc::string::String = chars[..cut % chars.len()].iter().collect();
        let expected = doc.tokens();

        let mut seen = Vec::new();
        for item in tokenize_str(&truncated) {
            match item {
                Ok(token) => seen.push(token),
                Err(err) => {
                    return err.kind() == &ErrorKind::UnexpectedEndOfInput
                        && seen.len() < expected.len()
                        && expected.starts_with(&seen);
                }
            }
        }
        false
    }

    QuickCheck::new()
        .tests(tests())
        .quickcheck(prop as fn(Doc, usize) -> bool);
}

/// Property: the tokenizer agrees with `serde_json` about which documents
/// are valid and what they contain.
#[test]
fn agrees_with_serde_json_quickcheck() {
    #[allow(clippy::needless_pass_by_value)]
    fn prop(doc: Doc) -> bool {
        let text = doc.to_json(&mut Padding::none(), true);
        let reference: serde_json::Value = match serde_json::from_str(&text) {
            Ok(value) => value,
            Err(_) => return false,
        };
        let tokens: Vec<Token> = match tokenize_str(&text).collect() {
            Ok(tokens) => tokens,
            Err(_) => return false,
        };
        let mut index = 0;
        matches_value(&reference, &tokens, &mut index) && index == tokens.len()
    }

    QuickCheck::new()
        .tests(tests())
        .quickcheck(prop as fn(Doc) -> bool);
}

#[rstest]
#[case(f64::MAX)]
#[case(f64::MIN)]
#[case(f64::MIN_POSITIVE)]
#[case(5e-324)]
#[case(1e19)]
#[case(-0.0)]
fn extreme_numbers_agree_with_serde_json(#[case] n: f64) {
    let doc = Doc::Array(alloc::vec![Doc::Number(n)]);
    let text = doc.to_json(&mut Padding::none(), false);
    let reference: serde_json::Value = serde_json::from_str(&text).unwrap();
    let tokens: Vec<Token> = tokenize_str(&text).collect::<Result<_, _>>().unwrap();
    assert_eq!(tokens, doc.tokens());
    let mut index = 0;
    assert!(matches_value(&reference, &tokens, &mut index), "{text}");
    assert_eq!(index, tokens.len());
}

fn expect(tokens: &[Token], index: &mut usize, expected: &Token) -> bool {
    let found = tokens.get(*index) == Some(expected);
    *index += 1;
    found
}

fn matches_value(value: &serde_json::Value, tokens: &[Token], index: &mut usize) -> bool {
    let Some(token) = tokens.get(*index) else {
        return false;
    };
    *index += 1;
    match (value, token) {
        (serde_json::Value::Null, Token::Null)
        | (serde_json::Value::Bool(true), Token::True)
        | (serde_json::Value::Bool(false), Token::False) => true,
        (serde_json::Value::Number(n), Token::Number(t)) => {
            n.as_f64() == Some(*t)
        }
        (serde_json::Value::String(s), Token::String(t)) => s == t,
        (serde_json::Value::Array(items), Token::ArrayStart) => {
            items.iter().all(|item| matches_value(item, tokens, index))
                && expect(tokens, index, &Token::ArrayEnd)
        }
        (serde_json::Value::Object(fields), Token::ObjectStart) => {
            fields.iter().all(|(key, item)| {
                expect(tokens, index, &Token::String(key.clone()))
                    && matches_value(item, tokens, index)
            }) && expect(tokens, index, &Token::ObjectEnd)
        }
        _ => false,
    }
}
