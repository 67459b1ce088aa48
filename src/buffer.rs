//! Mutable token sequence shared by the rewrite passes.
//!
//! Every query is bounds-checked and answers `None` past either end,
//! so a scan can never walk off the buffer. Mutations shift every
//! later index; callers re-read positions after each one.

use std::ops::Range;

use crate::lexer::{LexError, tokenize};
use crate::token::{Token, TokenKind};

/// Index-addressable token sequence, mutated in place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TokenBuffer {
    tokens: Vec<Token>,
}

impl From<Vec<Token>> for TokenBuffer {
    fn from(tokens: Vec<Token>) -> Self {
        Self { tokens }
    }
}

impl TokenBuffer {
    /// Tokenize `source` into a fresh buffer.
    pub fn parse(source: &str) -> Result<Self, LexError> {
        tokenize(source).map(Self::from)
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.tokens.len()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    #[must_use]
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    #[must_use]
    pub fn into_tokens(self) -> Vec<Token> {
        self.tokens
    }

    /// Token at `index`, or `None` past the end.
    #[must_use]
    pub fn token(&self, index: usize) -> Option<&Token> {
        self.tokens.get(index)
    }

    /// Whether the token at `index` has this kind and text.
    #[must_use]
    pub fn is_at(&self, index: usize, kind: TokenKind, text: &str) -> bool {
        self.token(index).is_some_and(|t| t.is(kind, text))
    }

    /// First index after `from` whose token satisfies `pred`.
    pub fn index_of_next(&self, from: usize, pred: impl Fn(&Token) -> bool) -> Option<usize> {
        let start = from.checked_add(1)?;
        self.tokens
            .get(start..)?
            .iter()
            .position(pred)
            .map(|offset| start + offset)
    }

    /// Last index before `from` whose token satisfies `pred`.
    pub fn index_of_previous(&self, from: usize, pred: impl Fn(&Token) -> bool) -> Option<usize> {
        let end = from.min(self.tokens.len());
        self.tokens[..end].iter().rposition(pred)
    }

    /// First index after `from` holding neither whitespace,
    /// linebreak nor comment.
    #[must_use]
    pub fn next_significant(&self, from: usize) -> Option<usize> {
        self.index_of_next(from, |t| !t.is_trivia())
    }

    /// Last index before `from` holding neither whitespace,
    /// linebreak nor comment.
    #[must_use]
    pub fn previous_significant(&self, from: usize) -> Option<usize> {
        self.index_of_previous(from, |t| !t.is_trivia())
    }

    /// Index at or after `from` of the first token that is not trivia.
    #[must_use]
    pub fn skip_trivia(&self, from: usize) -> usize {
        let mut index = from;
        while self.token(index).is_some_and(Token::is_trivia) {
            index += 1;
        }
        index
    }

    /// Index of the end-of-scope token balancing the start-of-scope
    /// token at `open`, counting nested scopes of the same bracket.
    #[must_use]
    pub fn matching_close(&self, open: usize) -> Option<usize> {
        let opener = self.token(open)?;
        if opener.kind != TokenKind::StartOfScope {
            return None;
        }
        let closer = match opener.text.as_str() {
            "(" => ")",
            "[" => "]",
            "{" => "}",
            _ => return None,
        };

        let mut depth = 0usize;
        for (offset, token) in self.tokens[open..].iter().enumerate() {
            if token.is(TokenKind::StartOfScope, &opener.text) {
                depth += 1;
            } else if token.is(TokenKind::EndOfScope, closer) {
                depth -= 1;
                if depth == 0 {
                    return Some(open + offset);
                }
            }
        }
        None
    }

    /// Start-of-scope tokens minus end-of-scope tokens.
    #[must_use]
    pub fn scope_balance(&self) -> isize {
        self.tokens.iter().fold(0, |acc, t| match t.kind {
            TokenKind::StartOfScope => acc + 1,
            TokenKind::EndOfScope => acc - 1,
            _ => acc,
        })
    }

    /// Insert one token, shifting later tokens right. Indices past
    /// the end append.
    pub fn insert(&mut self, index: usize, token: Token) {
        let index = index.min(self.tokens.len());
        self.tokens.insert(index, token);
    }

    /// Insert a run of tokens starting at `index`.
    pub fn insert_all(&mut self, index: usize, tokens: impl IntoIterator<Item = Token>) {
        let index = index.min(self.tokens.len());
        self.tokens.splice(index..index, tokens);
    }

    /// Remove the token at `index`, if any.
    pub fn remove(&mut self, index: usize) -> Option<Token> {
        (index < self.tokens.len()).then(|| self.tokens.remove(index))
    }

    /// Remove every token in `range`, clamped to the buffer.
    pub fn remove_range(&mut self, range: Range<usize>) {
        let end = range.end.min(self.tokens.len());
        let start = range.start.min(end);
        self.tokens.drain(start..end);
    }

    /// Replace the token at `index`, returning the old one.
    pub fn replace(&mut self, index: usize, token: Token) -> Option<Token> {
        self.tokens
            .get_mut(index)
            .map(|slot| std::mem::replace(slot, token))
    }

    /// Insert a single space at `index` unless whitespace is already
    /// there. Returns whether a token was inserted.
    pub fn ensure_space_at(&mut self, index: usize) -> bool {
        if self.token(index).is_some_and(Token::is_whitespace) {
            return false;
        }
        self.insert(index, Token::space());
        true
    }

    /// Insert a single space in front of the token at `index` unless
    /// whitespace already precedes it. Returns whether a token was
    /// inserted, in which case that token now sits at `index + 1`.
    pub fn ensure_space_before(&mut self, index: usize) -> bool {
        let spaced = index
            .checked_sub(1)
            .and_then(|prev| self.token(prev))
            .is_none_or(Token::is_whitespace);
        if spaced {
            return false;
        }
        self.insert(index, Token::space());
        true
    }

    /// Remove the run of whitespace and linebreak tokens starting at
    /// `index`. Returns how many tokens were removed.
    pub fn remove_spacing_at(&mut self, index: usize) -> usize {
        let mut end = index;
        while self
            .token(end)
            .is_some_and(Token::is_whitespace_or_linebreak)
        {
            end += 1;
        }
        self.remove_range(index..end);
        end - index
    }

    /// Index of the first token on the line holding `index`.
    #[must_use]
    pub fn line_start(&self, index: usize) -> usize {
        self.index_of_previous(index, Token::is_linebreak)
            .map_or(0, |lb| lb + 1)
    }

    /// Index of the linebreak ending the line holding `index`.
    #[must_use]
    pub fn line_end(&self, index: usize) -> Option<usize> {
        self.index_of_next(index, Token::is_linebreak)
    }

    /// Leading whitespace of the line holding `index`.
    #[must_use]
    pub fn indent_for_line(&self, index: usize) -> Option<&Token> {
        self.token(self.line_start(index))
            .filter(|t| t.is_whitespace())
    }

    /// Concatenate every token's text.
    #[must_use]
    pub fn render(&self) -> String {
        self.tokens.iter().map(|t| t.text.as_str()).collect()
    }
}
