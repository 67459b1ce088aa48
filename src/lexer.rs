use std::fmt;

use crate::token::{Span, Token, TokenKind};

/// Reserved words emitted as [`TokenKind::Keyword`].
///
/// Contextual words that only act as keywords inside accessor
/// blocks (`get`, `set`, `willSet`, `didSet`) are deliberately absent.
const KEYWORDS: &[&str] = &[
    "associatedtype",
    "class",
    "deinit",
    "enum",
    "extension",
    "fileprivate",
    "func",
    "import",
    "init",
    "inout",
    "internal",
    "let",
    "open",
    "operator",
    "private",
    "protocol",
    "public",
    "rethrows",
    "static",
    "struct",
    "subscript",
    "typealias",
    "var",
    "break",
    "case",
    "continue",
    "default",
    "defer",
    "do",
    "else",
    "fallthrough",
    "for",
    "guard",
    "if",
    "in",
    "repeat",
    "return",
    "switch",
    "where",
    "while",
    "as",
    "catch",
    "false",
    "is",
    "nil",
    "super",
    "self",
    "Self",
    "throw",
    "throws",
    "true",
    "try",
    "lazy",
    "weak",
    "unowned",
    "mutating",
    "override",
    "final",
    "required",
    "convenience",
    "dynamic",
    "indirect",
];

const THREE_CHAR_SYMBOLS: &[&str] = &["...", "..<", "===", "!=="];

const TWO_CHAR_SYMBOLS: &[&str] = &[
    "->", "==", "!=", "<=", ">=", "&&", "||", "??", "+=", "-=", "*=", "/=",
];

/// Classifies a lexer error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LexErrorKind {
    /// String literal without its closing quote.
    UnterminatedString,
    /// Block comment without its closing `*/`.
    UnterminatedComment,
    /// Byte that cannot start any token.
    UnexpectedCharacter(char),
}

impl fmt::Display for LexErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnterminatedString => {
                write!(f, "unterminated string literal")
            }
            Self::UnterminatedComment => {
                write!(f, "unterminated block comment")
            }
            Self::UnexpectedCharacter(ch) => {
                write!(f, "unexpected character: {}", ch.escape_debug())
            }
        }
    }
}

/// Error produced during lexing.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind} at line {}, column {}", span.line, span.column)]
pub struct LexError {
    pub kind: LexErrorKind,
    pub span: Span,
}

/// Tokenize Swift source into a lossless token sequence.
///
/// Concatenating the text of every returned token reproduces the
/// input, except for a leading byte order mark which is dropped.
///
/// # Errors
///
/// Returns `LexError` on unterminated strings or block comments
/// and on control characters outside of literals.
pub fn tokenize(input: &str) -> Result<Vec<Token>, LexError> {
    Lexer::new(input).tokenize()
}

struct Lexer<'a> {
    input: &'a [u8],
    pos: usize,
    line: usize,
    col: usize,
}

impl<'a> Lexer<'a> {
    fn new(input: &'a str) -> Self {
        let bytes = input.as_bytes();
        let start = if bytes.starts_with(&[0xEF, 0xBB, 0xBF]) {
            3
        } else {
            0
        };
        Self {
            input: bytes,
            pos: start,
            line: 1,
            col: 1,
        }
    }

    fn tokenize(mut self) -> Result<Vec<Token>, LexError> {
        let mut tokens = Vec::new();

        while let Some(ch) = self.peek() {
            let span = self.span();
            let token = match ch {
                b'\n' | b'\r' => self.read_linebreak(),
                b' ' | b'\t' => self.read_while(TokenKind::Whitespace, |b| {
                    b == b' ' || b == b'\t'
                }),
                b'/' if self.peek_at(1) == Some(b'/') => self.read_line_comment(),
                b'/' if self.peek_at(1) == Some(b'*') => self.read_block_comment()?,
                b'"' => self.read_string()?,
                b'#' if self.is_raw_string_start() => self.read_string()?,
                b'(' | b'[' | b'{' => self.read_single(TokenKind::StartOfScope),
                b')' | b']' | b'}' => self.read_single(TokenKind::EndOfScope),
                b'`' => self.read_escaped_identifier()?,
                b'@' | b'#' if self.peek_at(1).is_some_and(is_identifier_start) => {
                    self.read_attribute()
                }
                b'0'..=b'9' => self.read_number(),
                _ if is_identifier_start(ch) => self.read_word(),
                _ if ch.is_ascii_graphic() => self.read_symbol(),
                _ => {
                    return Err(LexError {
                        kind: LexErrorKind::UnexpectedCharacter(char::from(ch)),
                        span,
                    });
                }
            };
            tokens.push(token.with_span(span));
        }

        Ok(tokens)
    }

    const fn span(&self) -> Span {
        Span {
            line: self.line,
            column: self.col,
        }
    }

    fn peek(&self) -> Option<u8> {
        self.input.get(self.pos).copied()
    }

    fn peek_at(&self, offset: usize) -> Option<u8> {
        self.input.get(self.pos + offset).copied()
    }

    fn starts_with(&self, s: &str) -> bool {
        self.input[self.pos..].starts_with(s.as_bytes())
    }

    fn advance(&mut self) {
        if self.pos < self.input.len() {
            if self.input[self.pos] == b'\n' {
                self.line += 1;
                self.col = 1;
            } else {
                self.col += 1;
            }
            self.pos += 1;
        }
    }

    fn advance_by(&mut self, n: usize) {
        for _ in 0..n {
            self.advance();
        }
    }

    fn text_from(&self, start: usize) -> String {
        String::from_utf8_lossy(&self.input[start..self.pos]).into_owned()
    }

    fn token_from(&self, kind: TokenKind, start: usize) -> Token {
        Token::new(kind, self.text_from(start))
    }

    fn read_single(&mut self, kind: TokenKind) -> Token {
        let start = self.pos;
        self.advance();
        self.token_from(kind, start)
    }

    fn read_while(&mut self, kind: TokenKind, pred: impl Fn(u8) -> bool) -> Token {
        let start = self.pos;
        while self.peek().is_some_and(&pred) {
            self.advance();
        }
        self.token_from(kind, start)
    }

    fn read_linebreak(&mut self) -> Token {
        let start = self.pos;
        if self.peek() == Some(b'\r') {
            // a bare \r does not bump the line counter in advance()
            self.pos += 1;
            if self.peek() == Some(b'\n') {
                self.advance();
            } else {
                self.line += 1;
                self.col = 1;
            }
        } else {
            self.advance();
        }
        self.token_from(TokenKind::Linebreak, start)
    }

    fn read_line_comment(&mut self) -> Token {
        self.read_while(TokenKind::Comment, |b| b != b'\n' && b != b'\r')
    }

    fn read_block_comment(&mut self) -> Result<Token, LexError> {
        let span = self.span();
        let start = self.pos;
        let mut depth = 0usize;

        loop {
            if self.starts_with("/*") {
                depth += 1;
                self.advance_by(2);
            } else if self.starts_with("*/") {
                depth -= 1;
                self.advance_by(2);
                if depth == 0 {
                    return Ok(self.token_from(TokenKind::Comment, start));
                }
            } else if self.peek().is_some() {
                self.advance();
            } else {
                return Err(LexError {
                    kind: LexErrorKind::UnterminatedComment,
                    span,
                });
            }
        }
    }

    fn is_raw_string_start(&self) -> bool {
        let hashes = self.input[self.pos..]
            .iter()
            .take_while(|&&b| b == b'#')
            .count();
        self.peek_at(hashes) == Some(b'"')
    }

    fn read_string(&mut self) -> Result<Token, LexError> {
        let span = self.span();
        let start = self.pos;
        self.consume_string()
            .map(|()| self.token_from(TokenKind::StringLiteral, start))
            .map_err(|()| LexError {
                kind: LexErrorKind::UnterminatedString,
                span,
            })
    }

    /// Consume one string literal, raw (`#"..."#`) or multiline
    /// (`"""`) included, along with any interpolated expressions.
    fn consume_string(&mut self) -> Result<(), ()> {
        let mut hashes = 0;
        while self.peek() == Some(b'#') {
            hashes += 1;
            self.advance();
        }
        let multiline = self.starts_with("\"\"\"");
        let quote = if multiline { "\"\"\"" } else { "\"" };
        self.advance_by(quote.len());

        let closing = format!("{quote}{}", "#".repeat(hashes));
        let escape = format!("\\{}", "#".repeat(hashes));

        loop {
            match self.peek() {
                None => return Err(()),
                Some(b'\n' | b'\r') if !multiline => return Err(()),
                Some(_) if self.starts_with(&closing) => {
                    self.advance_by(closing.len());
                    return Ok(());
                }
                Some(_) if self.starts_with(&escape) => {
                    self.advance_by(escape.len());
                    if self.peek() == Some(b'(') {
                        self.consume_interpolation()?;
                    } else {
                        self.advance();
                    }
                }
                Some(_) => self.advance(),
            }
        }
    }

    /// Consume `( ... )` inside a string, which may itself hold
    /// nested parentheses and string literals.
    fn consume_interpolation(&mut self) -> Result<(), ()> {
        let mut depth = 0usize;
        loop {
            match self.peek() {
                None => return Err(()),
                Some(b'(') => {
                    depth += 1;
                    self.advance();
                }
                Some(b')') => {
                    depth -= 1;
                    self.advance();
                    if depth == 0 {
                        return Ok(());
                    }
                }
                Some(b'"') => self.consume_string()?,
                Some(_) => self.advance(),
            }
        }
    }

    fn read_escaped_identifier(&mut self) -> Result<Token, LexError> {
        let span = self.span();
        let start = self.pos;
        self.advance();
        while let Some(b) = self.peek() {
            match b {
                b'`' => {
                    self.advance();
                    return Ok(self.token_from(TokenKind::Identifier, start));
                }
                b'\n' | b'\r' => break,
                _ => self.advance(),
            }
        }
        Err(LexError {
            kind: LexErrorKind::UnexpectedCharacter('`'),
            span,
        })
    }

    fn read_attribute(&mut self) -> Token {
        let start = self.pos;
        self.advance();
        while self.peek().is_some_and(is_identifier_continue) {
            self.advance();
        }
        self.token_from(TokenKind::Keyword, start)
    }

    fn read_number(&mut self) -> Token {
        let start = self.pos;
        loop {
            match self.peek() {
                Some(b) if b.is_ascii_alphanumeric() || b == b'_' => self.advance(),
                Some(b'.') if self.peek_at(1).is_some_and(|b| b.is_ascii_digit()) => {
                    self.advance();
                }
                _ => break,
            }
        }
        self.token_from(TokenKind::Number, start)
    }

    fn read_word(&mut self) -> Token {
        let start = self.pos;
        while self.peek().is_some_and(is_identifier_continue) {
            self.advance();
        }
        let text = self.text_from(start);
        let kind = if KEYWORDS.contains(&text.as_str()) {
            TokenKind::Keyword
        } else {
            TokenKind::Identifier
        };
        Token::new(kind, text)
    }

    fn read_symbol(&mut self) -> Token {
        let start = self.pos;
        let len = THREE_CHAR_SYMBOLS
            .iter()
            .chain(TWO_CHAR_SYMBOLS)
            .find(|op| self.starts_with(op))
            .map_or(1, |op| op.len());
        self.advance_by(len);
        self.token_from(TokenKind::Symbol, start)
    }
}

const fn is_identifier_start(b: u8) -> bool {
    b.is_ascii_alphabetic() || b == b'_' || b == b'$' || b >= 0x80
}

const fn is_identifier_continue(b: u8) -> bool {
    is_identifier_start(b) || b.is_ascii_digit()
}
