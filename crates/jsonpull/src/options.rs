/// Configuration options for [`TokenStream`](crate::TokenStream).
///
/// # Default
///
/// All options default to `false`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokenizerOptions {
    /// Whether to allow any Unicode whitespace between tokens.
    ///
    /// By default, the tokenizer only recognizes the four whitespace
    /// characters defined by the JSON specification: space (U+0020), line
    /// feed (U+000A), carriage return (U+000D), and horizontal tab (U+0009).
    ///
    /// # Default
    ///
    /// `false`
    pub allow_unicode_whitespace: bool,

    /// Whether to tokenize multiple JSON values from a single input stream.
    ///
    /// When `true`, completing a root value does not end the stream; any
    /// further whitespace-delimited JSON values are tokenized in turn. This
    /// supports formats such as JSON Lines (JSONL) and newline-delimited JSON
    /// (ND-JSON), and arbitrary concatenation of JSON values. An input that
    /// holds only whitespace yields an empty stream instead of a fault.
    ///
    /// # Examples
    ///
    /// ```json
    /// {}{}{}
    /// ```
    ///
    /// ```json
    /// 123 45 678 9
    /// ```
    ///
    /// # Default
    ///
    /// `false`
    pub allow_multiple_values: bool,

    #[cfg(any(test, feature = "fuzzing"))]
    /// Panic on faults instead of returning them.
    ///
    /// Enabled only in test builds to produce backtraces on tokenizer
    /// failures.
    pub panic_on_error: bool,
}

/// Configuration options for [`Utf8Decoder`](crate::Utf8Decoder).
///
/// # Default
///
/// Strict decoding.
#[derive(Debug, Clone, Copy, Default)]
pub struct DecoderOptions {
    /// Replace malformed sequences with U+FFFD instead of failing.
    ///
    /// Each malformed sequence becomes a single replacement character; a byte
    /// that interrupted a sequence is decoded afresh as a lead byte.
    ///
    /// # Default
    ///
    /// `false`
    pub replace_invalid: bool,
}
