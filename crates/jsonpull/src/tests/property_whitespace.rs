use alloc::vec::Vec;

use quickcheck::QuickCheck;

use super::arbitrary::{Doc, Padding};
use crate::{Token, tokenize_str};

/// Property: inserting runs of space, tab, CR and LF between tokens never
/// changes the emitted sequence.
#[test]
fn whitespace_insensitivity_quickcheck() {
    #[allow(clippy::needless_pass_by_value)]
    fn prop(doc: Doc, seeds: Vec<u8>) -> bool {
        let compact = doc.to_json(&mut Padding::none(), false);
        let padded = doc.to_json(&mut Padding::new(seeds), false);

        let compact: Result<Vec<Token>, _> = tokenize_str(&compact).collect();
        let padded: Result<Vec<Token>, _> = tokenize_str(&padded).collect();
        compact.is_ok() && compact == padded
    }

    #[cfg(not(miri))]
    let tests = if is_ci::cached() { 10_000 } else { 1_000 };
    #[cfg(miri)]
    let tests = 10;

    QuickCheck::new()
        .tests(tests)
        .quickcheck(prop as fn(Doc, Vec<u8>) -> bool);
}
