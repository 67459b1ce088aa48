#![allow(dead_code)]

use swiftkotlin::{Config, tokenize, transpile, transpile_with};

/// Transpile with the default configuration and compare.
pub fn assert_converts(input: &str, expected: &str) {
    let output = transpile(input).expect("transpile failed");
    assert_eq!(
        output, expected,
        "conversion mismatch:\n--- input ---\n{input}\n--- expected ---\n{expected}\n--- got ---\n{output}"
    );
}

/// Transpile with four-space indentation and compare.
pub fn assert_converts_spaces(input: &str, expected: &str) {
    let config = Config::new().indent_unit("    ");
    let output = transpile_with(input, &config).expect("transpile failed");
    assert_eq!(
        output, expected,
        "conversion mismatch:\n--- input ---\n{input}\n--- expected ---\n{expected}\n--- got ---\n{output}"
    );
}

/// Input with nothing to rewrite comes back unchanged.
pub fn assert_unchanged(input: &str) {
    assert_converts(input, input);
}

/// Tokens concatenate back to the input.
pub fn assert_lossless(input: &str) {
    let tokens = tokenize(input).expect("tokenize failed");
    let joined: String = tokens.iter().map(|t| t.text.as_str()).collect();
    assert_eq!(joined, input);
}
