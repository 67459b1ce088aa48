//! Property-based tests with proptest.
//!
//! Generated names carry a digit suffix where they must never
//! collide with a Swift keyword.

use proptest::prelude::*;
use swiftkotlin::{TokenBuffer, tokenize, transpile};

const DECLARATION_WORDS: &[&str] = &["var", "let", "class", "struct", "enum", "init", "func"];

// -- Leaf strategies --

/// Source made of names, numbers, spacing and punctuation. Never
/// contains quotes, slashes or control characters, so it always lexes.
fn punctuated_source() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9_ \t\n:;,.(){}<>!?=+*\\[\\]-]{0,60}".prop_map(|s| s)
}

/// Lowercase word that is not a declaration keyword.
fn plain_word() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9]{0,6}".prop_filter("declaration keyword", |s| {
        !DECLARATION_WORDS.contains(&s.as_str())
    })
}

/// Lowercase name with a digit suffix.
fn name() -> impl Strategy<Value = String> {
    "[a-z]{1,5}[0-9]".prop_map(|s| s)
}

/// Capitalized type name with a digit suffix.
fn type_name() -> impl Strategy<Value = String> {
    "[A-Z][a-z]{0,5}[0-9]".prop_map(|s| s)
}

proptest! {
    /// Tokens concatenate back to the source.
    #[test]
    fn lexing_is_lossless(source in punctuated_source()) {
        let tokens = tokenize(&source).map_err(|e| {
            TestCaseError::fail(std::format!("lex error: {e}\n--- source ---\n{source}"))
        })?;
        let joined: String = tokens.iter().map(|t| t.text.as_str()).collect();
        prop_assert_eq!(joined, source);
    }

    /// Rewrites never leave an unpaired scope token behind.
    #[test]
    fn transpile_keeps_scope_balance(source in punctuated_source()) {
        let output = transpile(&source).map_err(|e| {
            TestCaseError::fail(std::format!("error: {e}\n--- source ---\n{source}"))
        })?;
        let before = TokenBuffer::parse(&source).map_err(|e| TestCaseError::fail(e.to_string()))?;
        let after = TokenBuffer::parse(&output).map_err(|e| TestCaseError::fail(e.to_string()))?;
        prop_assert_eq!(before.scope_balance(), after.scope_balance());
    }

    /// Constant and stored declarations pass through untouched.
    #[test]
    fn stored_declarations_unchanged(
        keyword in prop_oneof![Just("let"), Just("var")],
        name in name(),
        ty in type_name(),
    ) {
        let source = std::format!("{keyword} {name}: {ty}\n");
        let output = transpile(&source).map_err(|e| TestCaseError::fail(e.to_string()))?;
        prop_assert_eq!(output, source);
    }

    /// A labelled argument of a member call is assigned.
    #[test]
    fn member_call_arguments_assigned(
        receiver in plain_word(),
        method in plain_word(),
        label in plain_word(),
        value in "[0-9]{1,4}",
    ) {
        let source = std::format!("{receiver}.{method}({label}: {value})");
        let output = transpile(&source).map_err(|e| TestCaseError::fail(e.to_string()))?;
        prop_assert_eq!(output, std::format!("{receiver}.{method}({label} = {value})"));
    }

    /// The external label of a two-name parameter is dropped.
    #[test]
    fn external_labels_dropped(
        function in name(),
        external in name(),
        internal in name(),
        ty in type_name(),
    ) {
        let source = std::format!("func {function}({external} {internal}: {ty}) {{}}");
        let output = transpile(&source).map_err(|e| TestCaseError::fail(e.to_string()))?;
        prop_assert_eq!(output, std::format!("func {function}({internal}: {ty}) {{}}"));
    }

    /// The return arrow hugs the parameter list as a colon.
    #[test]
    fn return_arrow_becomes_colon(
        function in name(),
        spacing in prop_oneof![Just(""), Just(" "), Just("\n\t")],
        ty in type_name(),
    ) {
        let source = std::format!("func {function}(){spacing}-> {ty} {{}}");
        let output = transpile(&source).map_err(|e| TestCaseError::fail(e.to_string()))?;
        prop_assert_eq!(output, std::format!("func {function}(): {ty} {{}}"));
    }

    /// An implicitly unwrapped property becomes `lateinit`.
    #[test]
    fn unwrapped_property_becomes_lateinit(name in name(), ty in type_name()) {
        let source = std::format!("var {name}: {ty}!\n");
        let output = transpile(&source).map_err(|e| TestCaseError::fail(e.to_string()))?;
        prop_assert_eq!(output, std::format!("lateinit var {name}: {ty}\n"));
    }
}
