//! Token buffer queries and mutations.

use swiftkotlin::{Token, TokenBuffer, TokenKind};

fn buffer(source: &str) -> TokenBuffer {
    TokenBuffer::parse(source).expect("tokenize")
}

#[test]
fn parse_and_render_roundtrip() {
    let source = "var a: Int { return 1 }\n";
    assert_eq!(buffer(source).render(), source);
}

#[test]
fn from_token_vec() {
    let buf = TokenBuffer::from(vec![Token::identifier("a"), Token::symbol(":")]);
    assert_eq!(buf.len(), 2);
    assert_eq!(buf.render(), "a:");
}

#[test]
fn is_at_past_end() {
    let buf = buffer("a");
    assert!(buf.is_at(0, TokenKind::Identifier, "a"));
    assert!(!buf.is_at(5, TokenKind::Identifier, "a"));
}

#[test]
fn next_and_previous_significant() {
    let buf = buffer("f( // c\n  x )");
    // f ( ' ' comment \n ' ' x ' ' )
    assert_eq!(buf.next_significant(1), Some(6));
    assert_eq!(buf.previous_significant(6), Some(1));
    assert_eq!(buf.next_significant(8), None);
}

#[test]
fn skip_trivia_returns_start_when_significant() {
    let buf = buffer("a  b");
    assert_eq!(buf.skip_trivia(0), 0);
    assert_eq!(buf.skip_trivia(1), 2);
    assert_eq!(buf.skip_trivia(3), 3);
}

#[test]
fn matching_close_ignores_other_brackets() {
    let buf = buffer("( [ ) ] )");
    assert_eq!(buf.matching_close(0), Some(4));
    assert_eq!(buf.matching_close(2), Some(6));
}

#[test]
fn insert_all_and_remove() {
    let mut buf = buffer("a c");
    buf.insert_all(2, [Token::identifier("b"), Token::space()]);
    assert_eq!(buf.render(), "a b c");
    assert_eq!(buf.remove(0), Some(Token::identifier("a")));
    assert_eq!(buf.remove(99), None);
    assert_eq!(buf.render(), " b c");
}

#[test]
fn insert_past_end_appends() {
    let mut buf = buffer("a");
    buf.insert(10, Token::identifier("b"));
    assert_eq!(buf.render(), "ab");
}

#[test]
fn replace_returns_previous() {
    let mut buf = buffer("a:b");
    let old = buf.replace(1, Token::symbol("="));
    assert_eq!(old, Some(Token::symbol(":")));
    assert_eq!(buf.replace(9, Token::symbol("=")), None);
    assert_eq!(buf.render(), "a=b");
}

#[test]
fn line_end_and_start() {
    let buf = buffer("a b\nc\n");
    assert_eq!(buf.line_end(0), Some(3));
    assert_eq!(buf.line_start(4), 4);
    assert_eq!(buf.line_end(5), None);
}

#[test]
fn into_tokens_keeps_order() {
    let tokens = buffer("x y").into_tokens();
    assert_eq!(tokens[0], Token::identifier("x"));
    assert_eq!(tokens[2], Token::identifier("y"));
}
