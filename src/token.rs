use std::hash::{Hash, Hasher};

/// Source location for error reporting.
///
/// Tokens inserted by a rewrite have no source position and carry
/// the default span, line 0.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Span {
    pub line: usize,
    pub column: usize,
}

/// Token kinds produced by the lexer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// Plain or backtick-escaped name, including contextual words
    /// such as `get`, `set` and `newValue`.
    Identifier,
    /// Reserved word, `@attribute` or `#directive`.
    Keyword,
    /// Numeric literal.
    Number,
    /// String literal including its quotes.
    StringLiteral,
    /// Operator or punctuation (`:`, `.`, `->`, `!`, ...).
    Symbol,
    /// Opening `(`, `[` or `{`.
    StartOfScope,
    /// Closing `)`, `]` or `}`.
    EndOfScope,
    /// Run of spaces and tabs.
    Whitespace,
    /// Line separator (`\n` or `\r\n`).
    Linebreak,
    /// Line or block comment.
    Comment,
}

/// A single token with its kind, text, and source location. Two
/// tokens are equal when kind and text match, wherever they sit.
#[derive(Debug, Clone)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
    pub span: Span,
}

impl PartialEq for Token {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind && self.text == other.text
    }
}

impl Eq for Token {}

impl Hash for Token {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.kind.hash(state);
        self.text.hash(state);
    }
}

impl Token {
    #[must_use]
    pub fn new(kind: TokenKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
            span: Span::default(),
        }
    }

    /// Attach the source position the token was read from.
    #[must_use]
    pub const fn with_span(mut self, span: Span) -> Self {
        self.span = span;
        self
    }

    #[must_use]
    pub fn identifier(text: impl Into<String>) -> Self {
        Self::new(TokenKind::Identifier, text)
    }

    #[must_use]
    pub fn keyword(text: impl Into<String>) -> Self {
        Self::new(TokenKind::Keyword, text)
    }

    #[must_use]
    pub fn symbol(text: impl Into<String>) -> Self {
        Self::new(TokenKind::Symbol, text)
    }

    #[must_use]
    pub fn start_of_scope(text: impl Into<String>) -> Self {
        Self::new(TokenKind::StartOfScope, text)
    }

    #[must_use]
    pub fn end_of_scope(text: impl Into<String>) -> Self {
        Self::new(TokenKind::EndOfScope, text)
    }

    #[must_use]
    pub fn whitespace(text: impl Into<String>) -> Self {
        Self::new(TokenKind::Whitespace, text)
    }

    #[must_use]
    pub fn linebreak() -> Self {
        Self::new(TokenKind::Linebreak, "\n")
    }

    /// Single space, the separator most rewrites insert.
    #[must_use]
    pub fn space() -> Self {
        Self::whitespace(" ")
    }

    /// Whether this token has the given kind and text.
    #[must_use]
    pub fn is(&self, kind: TokenKind, text: &str) -> bool {
        self.kind == kind && self.text == text
    }

    #[must_use]
    pub const fn is_identifier(&self) -> bool {
        matches!(self.kind, TokenKind::Identifier)
    }

    #[must_use]
    pub const fn is_whitespace(&self) -> bool {
        matches!(self.kind, TokenKind::Whitespace)
    }

    #[must_use]
    pub const fn is_linebreak(&self) -> bool {
        matches!(self.kind, TokenKind::Linebreak)
    }

    #[must_use]
    pub const fn is_whitespace_or_linebreak(&self) -> bool {
        matches!(self.kind, TokenKind::Whitespace | TokenKind::Linebreak)
    }

    /// Whitespace, linebreaks and comments: tokens that carry no syntax.
    #[must_use]
    pub const fn is_trivia(&self) -> bool {
        matches!(
            self.kind,
            TokenKind::Whitespace | TokenKind::Linebreak | TokenKind::Comment
        )
    }
}
