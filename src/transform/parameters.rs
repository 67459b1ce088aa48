//! Named arguments, parameter labels and return types.
//!
//! Swift separates named arguments with `:` and declares return types
//! with `->`; Kotlin uses `=` for the former and `:` for the latter.
//! Neither pass has a symbol table: a colon's role is guessed from
//! the tokens in front of it.

use crate::buffer::TokenBuffer;
use crate::config::Config;
use crate::token::{Token, TokenKind};
use crate::transform::{Stage, Transformer};

/// Declarations that never appear inside a function signature,
/// besides the configured declaration keywords.
const DECLARATION_BOUNDARIES: &[&str] = &["typealias", "subscript", "associatedtype", "deinit"];

/// Keywords that may continue a signature on its own line.
const EFFECT_KEYWORDS: &[&str] = &["throws", "rethrows"];

/// Role of a colon, inferred by scanning backward from it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColonRole {
    /// A declaration keyword came first: type annotation.
    Declaration,
    /// A `{` opening a closure signature came first.
    Closure,
    /// A `.` or `->` came first: named argument of a call.
    CallSite,
    /// Nothing decisive before the start of the buffer. Treated
    /// as a call site.
    Ambiguous,
}

impl ColonRole {
    /// Whether the colon should become an assignment separator.
    #[must_use]
    pub const fn is_call_site(self) -> bool {
        matches!(self, Self::CallSite | Self::Ambiguous)
    }
}

/// Classify the colon at `colon` by walking backward one token at
/// a time.
///
/// The closure test is approximate: any `{` whose first significant
/// token is one of [`Config::closure_openers`] counts, so a
/// dictionary or array literal opening right inside a brace is
/// taken for a closure signature too.
#[must_use]
pub fn classify_colon(buffer: &TokenBuffer, colon: usize, config: &Config) -> ColonRole {
    let mut index = colon;
    while let Some(prev) = index.checked_sub(1) {
        index = prev;
        let Some(token) = buffer.token(index) else {
            continue;
        };

        if config.is_declaration_keyword(&token.text) {
            return ColonRole::Declaration;
        }
        if token.is(TokenKind::StartOfScope, "{") {
            let opens_closure = buffer
                .next_significant(index)
                .and_then(|i| buffer.token(i))
                .is_some_and(|t| config.is_closure_opener(&t.text));
            if opens_closure {
                return ColonRole::Closure;
            }
        }
        if token.is(TokenKind::Symbol, ".") || token.is(TokenKind::Symbol, "->") {
            return ColonRole::CallSite;
        }
    }
    ColonRole::Ambiguous
}

/// Turn every call-site colon into `=` with one space on each side.
pub fn rewrite_named_argument_calls(buffer: &mut TokenBuffer, config: &Config) -> usize {
    let mut rewrites = 0;
    let mut index = 0;

    while index < buffer.len() {
        if buffer.is_at(index, TokenKind::Symbol, ":")
            && classify_colon(buffer, index, config).is_call_site()
        {
            buffer.replace(index, Token::symbol("="));
            if buffer.ensure_space_before(index) {
                index += 1;
            }
            buffer.ensure_space_at(index + 1);
            rewrites += 1;
        }
        index += 1;
    }

    rewrites
}

/// Drop the external label of every parameter that declares one.
pub fn remove_external_parameter_names(buffer: &mut TokenBuffer) -> usize {
    let mut rewrites = 0;
    let mut index = 0;

    while index < buffer.len() {
        if let Some(open) = parameter_list_start(buffer, index) {
            rewrites += strip_parameter_labels(buffer, open);
        }
        index += 1;
    }

    rewrites
}

/// Replace the first `->` after each `func` parameter list with `:`,
/// hugging the closing parenthesis.
pub fn rewrite_return_arrows(buffer: &mut TokenBuffer, config: &Config) -> usize {
    let mut rewrites = 0;
    let mut index = 0;

    while index < buffer.len() {
        if let Some(arrow) = return_arrow(buffer, index, config) {
            buffer.replace(arrow, Token::symbol(":"));
            buffer.ensure_space_at(arrow + 1);

            let mut colon = arrow;
            if let Some(prev) = buffer.index_of_previous(arrow, |t| !t.is_whitespace_or_linebreak())
            {
                colon -= buffer.remove_spacing_at(prev + 1);
            }
            rewrites += 1;
            index = colon;
        }
        index += 1;
    }

    rewrites
}

fn is_function_keyword(buffer: &TokenBuffer, index: usize) -> bool {
    buffer.is_at(index, TokenKind::Keyword, "func")
}

/// The `(` opening the parameter list of the `func` keyword at
/// `func`, skipping the name and any generic clause.
fn parameter_list_start(buffer: &TokenBuffer, func: usize) -> Option<usize> {
    if !is_function_keyword(buffer, func) {
        return None;
    }
    let open = buffer.index_of_next(func, |t| {
        t.is(TokenKind::StartOfScope, "(") || t.is(TokenKind::StartOfScope, "{")
    })?;
    buffer
        .is_at(open, TokenKind::StartOfScope, "(")
        .then_some(open)
}

/// The return arrow of the `func` at `func`: the first `->` after
/// its parameter list, before the signature ends.
fn return_arrow(buffer: &TokenBuffer, func: usize, config: &Config) -> Option<usize> {
    let open = parameter_list_start(buffer, func)?;
    let mut index = buffer.matching_close(open)?;

    while let Some(next) = buffer.next_significant(index) {
        if buffer.is_at(next, TokenKind::Symbol, "->") {
            return Some(next);
        }
        if ends_signature(buffer, index, next, config) {
            return None;
        }
        index = next;
    }
    None
}

/// Whether the token at `next` can no longer belong to the signature
/// whose previous significant token sits at `prev`: a body, the end
/// of the enclosing scope, or the start of another declaration.
fn ends_signature(buffer: &TokenBuffer, prev: usize, next: usize, config: &Config) -> bool {
    let Some(token) = buffer.token(next) else {
        return true;
    };
    if token.is(TokenKind::StartOfScope, "{")
        || token.is(TokenKind::EndOfScope, "}")
        || config.is_declaration_keyword(&token.text)
        || DECLARATION_BOUNDARIES.contains(&token.text.as_str())
    {
        return true;
    }

    // a keyword opening a new line starts the next member
    let starts_line = buffer.tokens()[prev + 1..next]
        .iter()
        .any(Token::is_linebreak);
    starts_line
        && token.kind == TokenKind::Keyword
        && !EFFECT_KEYWORDS.contains(&token.text.as_str())
}

/// Strip labels inside the parameter list opened at `open`.
///
/// A parameter whose first two significant tokens are both names
/// carries an external label; the first one is removed together
/// with the spacing after it. `_` counts as a name.
fn strip_parameter_labels(buffer: &mut TokenBuffer, open: usize) -> usize {
    let mut rewrites = 0;
    let mut separator = open;

    loop {
        let Some(close) = buffer.matching_close(open) else {
            return rewrites;
        };

        if let Some(first) = labelled_parameter(buffer, separator, close) {
            buffer.remove(first);
            buffer.remove_spacing_at(first);
            rewrites += 1;
        }

        let Some(close) = buffer.matching_close(open) else {
            return rewrites;
        };
        match next_top_level_comma(buffer, separator, close) {
            Some(comma) => separator = comma,
            None => return rewrites,
        }
    }
}

/// Index of the external label of the parameter following
/// `separator`, if that parameter has one.
fn labelled_parameter(buffer: &TokenBuffer, separator: usize, close: usize) -> Option<usize> {
    let first = buffer.next_significant(separator)?;
    let second = buffer.next_significant(first)?;
    let labelled = second < close
        && buffer.token(first).is_some_and(is_label)
        && buffer.token(second).is_some_and(Token::is_identifier);
    labelled.then_some(first)
}

/// Names and reserved words can label a parameter; `@attribute`
/// and `#directive` tokens cannot.
fn is_label(token: &Token) -> bool {
    match token.kind {
        TokenKind::Identifier => true,
        TokenKind::Keyword => !token.text.starts_with(['@', '#']),
        _ => false,
    }
}

/// First `,` after `from` and before `close` that is not nested in
/// an inner scope.
fn next_top_level_comma(buffer: &TokenBuffer, from: usize, close: usize) -> Option<usize> {
    let mut depth = 0usize;
    for index in from + 1..close {
        let token = buffer.token(index)?;
        match token.kind {
            TokenKind::StartOfScope => depth += 1,
            TokenKind::EndOfScope => depth = depth.saturating_sub(1),
            TokenKind::Symbol if depth == 0 && token.text == "," => return Some(index),
            _ => {}
        }
    }
    None
}

/// Rewrites call and declaration syntax of functions.
#[derive(Debug, Clone, Default)]
pub struct FunctionParametersTransformer {
    config: Config,
}

impl FunctionParametersTransformer {
    #[must_use]
    pub const fn new(config: Config) -> Self {
        Self { config }
    }
}

impl Transformer for FunctionParametersTransformer {
    fn name(&self) -> &'static str {
        "function parameters"
    }

    fn config(&self) -> &Config {
        &self.config
    }

    fn stages(&self) -> &'static [Stage] {
        &[
            Stage::NamedArgumentCalls,
            Stage::ExternalParameterNames,
            Stage::ReturnArrows,
        ]
    }
}
