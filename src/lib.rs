//! Token-level rewriter from Swift declaration and call syntax to
//! Kotlin syntax.
//!
//! Source is split into a lossless token stream, rewritten in place
//! by two transformers, then concatenated back. No syntax tree is
//! built and no types are resolved: every rewrite is a local pattern
//! match over tokens.
//!
//! # Quick start
//!
//! ```
//! let kotlin = swiftkotlin::transpile(
//!     "func greet(with name: String) -> String {\n\treturn name\n}\n",
//! )
//! .unwrap();
//! assert_eq!(kotlin, "func greet(name: String): String {\n\treturn name\n}\n");
//! ```
//!
//! ## Properties
//!
//! ```
//! let kotlin = swiftkotlin::transpile("private(set) var count: Int = 0\n").unwrap();
//! assert_eq!(kotlin, "var count: Int = 0\n\tprivate set\n");
//!
//! let kotlin = swiftkotlin::transpile("var name: String!").unwrap();
//! assert_eq!(kotlin, "lateinit var name: String");
//! ```

// Allow noisy pedantic lints that don't add value for
// a library crate.
#![allow(
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::module_name_repetitions
)]

pub mod buffer;
pub mod config;
pub mod lexer;
pub mod token;
pub mod transform;

pub use buffer::TokenBuffer;
pub use config::Config;
pub use lexer::{LexError, LexErrorKind, tokenize};
pub use token::{Span, Token, TokenKind};
pub use transform::{
    ColonRole, FunctionParametersTransformer, PropertyTransformer, Stage, StageReport,
    TransformError, TransformReport, Transformer, classify_colon, transform_all,
};

/// Unified error type covering lexing and transformation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// A lexer error.
    #[error("{0}")]
    Lex(#[from] LexError),
    /// A transformer error.
    #[error("{0}")]
    Transform(#[from] TransformError),
}

/// Rewrite Swift source with the default configuration.
pub fn transpile(input: &str) -> Result<String, Error> {
    transpile_with(input, &Config::default())
}

/// Rewrite Swift source with a custom configuration.
pub fn transpile_with(input: &str, config: &Config) -> Result<String, Error> {
    transpile_report(input, config).map(|(output, _)| output)
}

/// Rewrite Swift source and return the per-stage report as well.
pub fn transpile_report(input: &str, config: &Config) -> Result<(String, TransformReport), Error> {
    let mut buffer = TokenBuffer::parse(input)?;
    let report = transform_all(&mut buffer, config)?;
    Ok((buffer.render(), report))
}
