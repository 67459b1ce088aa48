//! Computed, restricted-setter and late-initialized properties.

use std::cmp::Reverse;

use crate::buffer::TokenBuffer;
use crate::config::Config;
use crate::token::{Token, TokenKind};
use crate::transform::{Stage, Transformer};

/// Symbols allowed in the type of a computed property, besides names.
const TYPE_SYMBOLS: &[&str] = &["<", ">", "[", "]", "?", "!", "."];

/// Symbols allowed in the type of a late-initialized property. The
/// trailing `!` is what marks the declaration, so it is excluded.
const LATE_INIT_TYPE_SYMBOLS: &[&str] = &["<", ">", "[", "]", "."];

/// Accessor words that mark a body as observers, not a computed value.
const OBSERVERS: &[&str] = &["willSet", "didSet"];

const ACCESSOR_MODIFIERS: &[&str] = &["mutating", "nonmutating"];

/// `var <name>: <type> {` with the positions of `var` and `{`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct PropertyBody {
    keyword: usize,
    open: usize,
}

#[derive(Debug, Clone, Copy)]
enum Accessor {
    Get(usize),
    Set(usize),
}

impl Accessor {
    const fn index(self) -> usize {
        match self {
            Self::Get(index) | Self::Set(index) => index,
        }
    }
}

/// Rewrite every computed property into accessor-suffix form.
pub fn rewrite_computed_properties(buffer: &mut TokenBuffer, config: &Config) -> usize {
    let mut rewrites = 0;
    let mut from = 0;

    while let Some(property) = find_property_body(buffer, from) {
        if rewrite_computed_property(buffer, property, config) {
            rewrites += 1;
        }
        from = property.keyword + 1;
    }

    rewrites
}

/// Returns `false`, leaving the property untouched, when the body
/// is malformed or holds observers rather than accessors.
fn rewrite_computed_property(
    buffer: &mut TokenBuffer,
    property: PropertyBody,
    config: &Config,
) -> bool {
    let PropertyBody { keyword, open } = property;
    let Some(close) = buffer.matching_close(open) else {
        return false;
    };
    if OBSERVERS
        .iter()
        .any(|name| accessor_index(buffer, open, close, name).is_some())
    {
        return false;
    }

    let getter = accessor_index(buffer, open, close, "get");
    let setter = accessor_index(buffer, open, close, "set");
    if getter
        .into_iter()
        .chain(setter)
        .any(|accessor| accessor_body(buffer, accessor).is_none())
    {
        return false;
    }

    if getter.is_none() && setter.is_none() {
        insert_implicit_getter(buffer, open);
    } else {
        remove_closing_brace(buffer, close);

        let mut accessors: Vec<Accessor> = getter
            .map(Accessor::Get)
            .into_iter()
            .chain(setter.map(Accessor::Set))
            .collect();
        // right to left, so earlier indices stay valid
        accessors.sort_unstable_by_key(|accessor| Reverse(accessor.index()));
        for accessor in accessors {
            match accessor {
                Accessor::Get(index) => add_getter_parameters(buffer, index),
                Accessor::Set(index) => name_setter_parameter(buffer, index, config),
            }
        }

        remove_opening_brace(buffer, open);
    }

    if setter.is_none() {
        buffer.replace(keyword, Token::keyword("val"));
    }
    true
}

/// First `var` at or after `from` shaped like a computed property.
fn find_property_body(buffer: &TokenBuffer, from: usize) -> Option<PropertyBody> {
    (from..buffer.len()).find_map(|keyword| {
        let type_start = declaration_type_start(buffer, keyword)?;
        if !buffer
            .token(type_start)
            .is_some_and(|t| is_type_token(t, TYPE_SYMBOLS))
        {
            return None;
        }

        // spacing and comments may sit between type tokens, linebreaks may not
        let mut index = type_start;
        while buffer.token(index).is_some_and(|t| {
            is_type_token(t, TYPE_SYMBOLS)
                || matches!(t.kind, TokenKind::Whitespace | TokenKind::Comment)
        }) {
            index += 1;
        }

        let open = buffer.skip_trivia(index);
        buffer
            .is_at(open, TokenKind::StartOfScope, "{")
            .then_some(PropertyBody { keyword, open })
    })
}

/// For `var <name> : <type>` starting at `keyword`, the index where
/// the type starts.
fn declaration_type_start(buffer: &TokenBuffer, keyword: usize) -> Option<usize> {
    if !buffer.is_at(keyword, TokenKind::Keyword, "var") {
        return None;
    }
    let name = buffer.skip_trivia(keyword + 1);
    if !buffer.token(name).is_some_and(Token::is_identifier) {
        return None;
    }
    let colon = buffer.skip_trivia(name + 1);
    if !buffer.is_at(colon, TokenKind::Symbol, ":") {
        return None;
    }
    Some(buffer.skip_trivia(colon + 1))
}

fn is_type_token(token: &Token, symbols: &[&str]) -> bool {
    token.is_identifier() || symbols.contains(&token.text.as_str())
}

/// Index of the accessor word `name` directly inside the scope
/// between `open` and `close`.
fn accessor_index(buffer: &TokenBuffer, open: usize, close: usize, name: &str) -> Option<usize> {
    let mut depth = 0usize;
    for index in open + 1..close {
        let token = buffer.token(index)?;
        match token.kind {
            TokenKind::StartOfScope => depth += 1,
            TokenKind::EndOfScope => depth = depth.saturating_sub(1),
            TokenKind::Identifier
                if depth == 0 && token.text == name && starts_accessor(buffer, open, index) =>
            {
                return Some(index);
            }
            _ => {}
        }
    }
    None
}

/// An accessor opens the property body, follows the body of the
/// previous accessor, or follows a mutation modifier.
fn starts_accessor(buffer: &TokenBuffer, open: usize, index: usize) -> bool {
    buffer.previous_significant(index).is_some_and(|prev| {
        prev == open
            || buffer.is_at(prev, TokenKind::EndOfScope, "}")
            || buffer
                .token(prev)
                .is_some_and(|t| ACCESSOR_MODIFIERS.contains(&t.text.as_str()))
    })
}

/// The `{` of the accessor at `accessor`, past an optional
/// parameter list.
fn accessor_body(buffer: &TokenBuffer, accessor: usize) -> Option<usize> {
    let mut index = buffer.skip_trivia(accessor + 1);
    if buffer.is_at(index, TokenKind::StartOfScope, "(") {
        index = buffer.skip_trivia(buffer.matching_close(index)? + 1);
    }
    buffer
        .is_at(index, TokenKind::StartOfScope, "{")
        .then_some(index)
}

/// `get {` becomes `get() {`.
fn add_getter_parameters(buffer: &mut TokenBuffer, get: usize) {
    buffer.insert_all(get + 1, [Token::start_of_scope("("), Token::end_of_scope(")")]);
    buffer.ensure_space_before(get);
}

/// `set {` becomes `set(newValue) {`; a named parameter is kept.
fn name_setter_parameter(buffer: &mut TokenBuffer, set: usize, config: &Config) {
    let next = buffer.skip_trivia(set + 1);
    if buffer.is_at(next, TokenKind::StartOfScope, "{") {
        buffer.insert_all(
            set + 1,
            [
                Token::start_of_scope("("),
                Token::identifier(config.implicit_setter_parameter.as_str()),
                Token::end_of_scope(")"),
            ],
        );
    }
}

/// `var x: T { expr }` becomes `var x: T get() { expr }`; the
/// property braces turn into the getter body.
fn insert_implicit_getter(buffer: &mut TokenBuffer, open: usize) {
    let at = open + usize::from(buffer.ensure_space_before(open));
    buffer.insert_all(
        at,
        [
            Token::identifier("get"),
            Token::start_of_scope("("),
            Token::end_of_scope(")"),
            Token::space(),
        ],
    );
}

/// Remove the `{` at `open` and the whitespace right before it.
fn remove_opening_brace(buffer: &mut TokenBuffer, open: usize) {
    buffer.remove(open);
    if let Some(prev) = open
        .checked_sub(1)
        .filter(|&prev| buffer.token(prev).is_some_and(Token::is_whitespace))
    {
        buffer.remove(prev);
    }
}

/// Remove the `}` at `close` and the whitespace right before it.
/// A brace that sat alone on its line takes the line with it.
fn remove_closing_brace(buffer: &mut TokenBuffer, close: usize) {
    buffer.remove(close);
    let mut index = close;
    if let Some(prev) = index
        .checked_sub(1)
        .filter(|&prev| buffer.token(prev).is_some_and(Token::is_whitespace))
    {
        buffer.remove(prev);
        index = prev;
    }

    let mut after = index;
    while buffer.token(after).is_some_and(Token::is_whitespace) {
        after += 1;
    }
    let alone = buffer.token(after).is_none_or(Token::is_linebreak);
    if !alone {
        return;
    }
    if let Some(prev) = index
        .checked_sub(1)
        .filter(|&prev| buffer.token(prev).is_some_and(Token::is_linebreak))
    {
        buffer.remove(prev);
    }
}

/// Move every `modifier(set)` prefix to a `modifier set` line after
/// the declaration.
pub fn relocate_restricted_setters(buffer: &mut TokenBuffer, config: &Config) -> usize {
    let mut rewrites = 0;
    let mut index = 0;

    while index < buffer.len() {
        if let Some(resume) = relocate_restricted_setter(buffer, index, config) {
            rewrites += 1;
            index = resume;
        } else {
            index += 1;
        }
    }

    rewrites
}

/// Relocate the `modifier(set)` whose `set` sits at `set`. Returns
/// the index just past the inserted line.
fn relocate_restricted_setter(
    buffer: &mut TokenBuffer,
    set: usize,
    config: &Config,
) -> Option<usize> {
    if !buffer.is_at(set, TokenKind::Identifier, "set")
        || !buffer.is_at(set + 1, TokenKind::EndOfScope, ")")
    {
        return None;
    }
    let open = set.checked_sub(1)?;
    if !buffer.is_at(open, TokenKind::StartOfScope, "(") {
        return None;
    }
    let modifier_index = buffer.index_of_previous(open, |t| !t.is_whitespace_or_linebreak())?;
    let modifier = buffer.token(modifier_index)?.clone();
    if modifier.kind != TokenKind::Keyword {
        return None;
    }
    let next_word = buffer.index_of_next(set + 1, |t| !t.is_whitespace_or_linebreak())?;
    let indent = buffer
        .indent_for_line(modifier_index)
        .map_or("", |t| t.text.as_str());
    let indent = Token::whitespace(format!("{indent}{}", config.indent_unit));

    // the declaration now starts where the modifier was
    buffer.remove_range(modifier_index..next_word);

    let line_end = buffer.line_end(modifier_index);
    let linebreak = line_end
        .and_then(|lb| buffer.token(lb))
        .cloned()
        .unwrap_or_else(Token::linebreak);
    let at = line_end.unwrap_or(buffer.len());

    let line = [
        linebreak,
        indent,
        modifier,
        Token::space(),
        Token::identifier("set"),
    ];
    let inserted = line.len();
    buffer.insert_all(at, line);
    Some(at + inserted)
}

/// `var x: T!` with the positions of `var` and `!`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct LateInitDeclaration {
    keyword: usize,
    unwrap: usize,
}

/// Turn every `var x: T!` into `lateinit var x: T`.
pub fn rewrite_late_init_properties(buffer: &mut TokenBuffer) -> usize {
    let mut rewrites = 0;
    let mut from = 0;

    while let Some(LateInitDeclaration { keyword, unwrap }) = find_late_init(buffer, from) {
        buffer.remove(unwrap);
        buffer.insert_all(keyword, [Token::keyword("lateinit"), Token::space()]);
        rewrites += 1;
        from = keyword + 3;
    }

    rewrites
}

fn find_late_init(buffer: &TokenBuffer, from: usize) -> Option<LateInitDeclaration> {
    (from..buffer.len()).find_map(|keyword| {
        let mut index = declaration_type_start(buffer, keyword)?;
        let type_start = index;
        while buffer
            .token(index)
            .is_some_and(|t| is_type_token(t, LATE_INIT_TYPE_SYMBOLS))
        {
            index += 1;
        }
        let unwrapped = index > type_start && buffer.is_at(index, TokenKind::Symbol, "!");
        unwrapped.then_some(LateInitDeclaration {
            keyword,
            unwrap: index,
        })
    })
}

/// Rewrites property declarations.
#[derive(Debug, Clone, Default)]
pub struct PropertyTransformer {
    config: Config,
}

impl PropertyTransformer {
    #[must_use]
    pub const fn new(config: Config) -> Self {
        Self { config }
    }
}

impl Transformer for PropertyTransformer {
    fn name(&self) -> &'static str {
        "properties"
    }

    fn config(&self) -> &Config {
        &self.config
    }

    fn stages(&self) -> &'static [Stage] {
        &[
            Stage::ComputedProperties,
            Stage::RestrictedSetters,
            Stage::LateInitProperties,
        ]
    }
}
