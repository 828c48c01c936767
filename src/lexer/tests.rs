//! Unit tests for the lexer module.
//!
//! This module contains tests for tokenization including:
//! - Keywords and identifiers
//! - Integer literals
//! - Operators and punctuation, including two-character operators
//! - Illegal bytes and end-of-input behavior

use test_log::test;

use super::{
    lexer::{tokenize, Lexer},
    tokens::{lookup_identifier, TokenKind},
};

#[test]
fn test_tokenize_keywords() {
    let source = "fn let true false if else return".to_string();
    let tokens = tokenize(source, Some("test.monkey".to_string()));

    assert_eq!(tokens[0].kind, TokenKind::Fn);
    assert_eq!(tokens[1].kind, TokenKind::Let);
    assert_eq!(tokens[2].kind, TokenKind::True);
    assert_eq!(tokens[3].kind, TokenKind::False);
    assert_eq!(tokens[4].kind, TokenKind::If);
    assert_eq!(tokens[5].kind, TokenKind::Else);
    assert_eq!(tokens[6].kind, TokenKind::Return);
    assert_eq!(tokens[7].kind, TokenKind::EOF);
}

#[test]
fn test_tokenize_identifiers() {
    let source = "foo bar_baz _underscore CamelCase lets".to_string();
    let tokens = tokenize(source, None);

    assert_eq!(tokens[0].kind, TokenKind::Identifier);
    assert_eq!(tokens[0].value, "foo");
    assert_eq!(tokens[1].kind, TokenKind::Identifier);
    assert_eq!(tokens[1].value, "bar_baz");
    assert_eq!(tokens[2].kind, TokenKind::Identifier);
    assert_eq!(tokens[2].value, "_underscore");
    assert_eq!(tokens[3].kind, TokenKind::Identifier);
    assert_eq!(tokens[3].value, "CamelCase");
    // Keywords only match whole words.
    assert_eq!(tokens[4].kind, TokenKind::Identifier);
    assert_eq!(tokens[4].value, "lets");
    assert_eq!(tokens[5].kind, TokenKind::EOF);
}

#[test]
fn test_identifiers_stop_at_digits() {
    let tokens = tokenize("abc123".to_string(), None);

    assert_eq!(tokens[0].kind, TokenKind::Identifier);
    assert_eq!(tokens[0].value, "abc");
    assert_eq!(tokens[1].kind, TokenKind::Int);
    assert_eq!(tokens[1].value, "123");
    assert_eq!(tokens[2].kind, TokenKind::EOF);
}

#[test]
fn test_tokenize_numbers() {
    let source = "5 10 0 99999999999999999999".to_string();
    let tokens = tokenize(source, None);

    assert_eq!(tokens[0].kind, TokenKind::Int);
    assert_eq!(tokens[0].value, "5");
    assert_eq!(tokens[1].kind, TokenKind::Int);
    assert_eq!(tokens[1].value, "10");
    assert_eq!(tokens[2].kind, TokenKind::Int);
    assert_eq!(tokens[2].value, "0");
    // Conversion is left to the parser, so oversized lexemes survive here.
    assert_eq!(tokens[3].kind, TokenKind::Int);
    assert_eq!(tokens[3].value, "99999999999999999999");
    assert_eq!(tokens[4].kind, TokenKind::EOF);
}

#[test]
fn test_tokenize_operators() {
    let source = "= + - ! * / < > == !=".to_string();
    let tokens = tokenize(source, None);

    assert_eq!(tokens[0].kind, TokenKind::Assignment);
    assert_eq!(tokens[1].kind, TokenKind::Plus);
    assert_eq!(tokens[2].kind, TokenKind::Dash);
    assert_eq!(tokens[3].kind, TokenKind::Not);
    assert_eq!(tokens[4].kind, TokenKind::Star);
    assert_eq!(tokens[5].kind, TokenKind::Slash);
    assert_eq!(tokens[6].kind, TokenKind::Less);
    assert_eq!(tokens[7].kind, TokenKind::Greater);
    assert_eq!(tokens[8].kind, TokenKind::Equals);
    assert_eq!(tokens[8].value, "==");
    assert_eq!(tokens[9].kind, TokenKind::NotEquals);
    assert_eq!(tokens[9].value, "!=");
    assert_eq!(tokens[10].kind, TokenKind::EOF);
}

#[test]
fn test_tokenize_greedy_two_character_operators() {
    let tokens = tokenize("a===b!!=c".to_string(), None);
    let kinds: Vec<TokenKind> = tokens.iter().map(|t| t.kind).collect();

    assert_eq!(
        kinds,
        vec![
            TokenKind::Identifier,
            TokenKind::Equals,
            TokenKind::Assignment,
            TokenKind::Identifier,
            TokenKind::Not,
            TokenKind::NotEquals,
            TokenKind::Identifier,
            TokenKind::EOF,
        ]
    );
}

#[test]
fn test_tokenize_punctuation() {
    let source = "( ) { } , ;".to_string();
    let tokens = tokenize(source, None);

    assert_eq!(tokens[0].kind, TokenKind::OpenParen);
    assert_eq!(tokens[1].kind, TokenKind::CloseParen);
    assert_eq!(tokens[2].kind, TokenKind::OpenCurly);
    assert_eq!(tokens[3].kind, TokenKind::CloseCurly);
    assert_eq!(tokens[4].kind, TokenKind::Comma);
    assert_eq!(tokens[5].kind, TokenKind::Semicolon);
    assert_eq!(tokens[6].kind, TokenKind::EOF);
}

#[test]
fn test_tokenize_simple_program() {
    let source = "let five = 5;".to_string();
    let tokens = tokenize(source, None);

    assert_eq!(tokens.len(), 6); // let, five, =, 5, ;, EOF
    assert_eq!(tokens[0].kind, TokenKind::Let);
    assert_eq!(tokens[1].kind, TokenKind::Identifier);
    assert_eq!(tokens[1].value, "five");
    assert_eq!(tokens[2].kind, TokenKind::Assignment);
    assert_eq!(tokens[3].kind, TokenKind::Int);
    assert_eq!(tokens[3].value, "5");
    assert_eq!(tokens[4].kind, TokenKind::Semicolon);
    assert_eq!(tokens[5].kind, TokenKind::EOF);
}

#[test]
fn test_tokenize_function_literal() {
    let source = "let add = fn(x, y) {\n  x + y;\n};".to_string();
    let expected = [
        (TokenKind::Let, "let"),
        (TokenKind::Identifier, "add"),
        (TokenKind::Assignment, "="),
        (TokenKind::Fn, "fn"),
        (TokenKind::OpenParen, "("),
        (TokenKind::Identifier, "x"),
        (TokenKind::Comma, ","),
        (TokenKind::Identifier, "y"),
        (TokenKind::CloseParen, ")"),
        (TokenKind::OpenCurly, "{"),
        (TokenKind::Identifier, "x"),
        (TokenKind::Plus, "+"),
        (TokenKind::Identifier, "y"),
        (TokenKind::Semicolon, ";"),
        (TokenKind::CloseCurly, "}"),
        (TokenKind::Semicolon, ";"),
        (TokenKind::EOF, ""),
    ];

    let tokens = tokenize(source, None);
    assert_eq!(tokens.len(), expected.len());

    for (token, (kind, value)) in tokens.iter().zip(expected) {
        assert_eq!(token.kind, kind);
        assert_eq!(token.value, value);
    }
}

#[test]
fn test_tokenize_illegal_characters() {
    let tokens = tokenize("let x = @;".to_string(), None);

    assert_eq!(tokens[3].kind, TokenKind::Illegal);
    assert_eq!(tokens[3].value, "@");
    assert_eq!(tokens[4].kind, TokenKind::Semicolon);
}

#[test]
fn test_non_ascii_bytes_are_single_illegal_tokens() {
    // `é` is two bytes in UTF-8, so it becomes two illegal markers.
    let tokens = tokenize("é".to_string(), None);

    assert_eq!(tokens.len(), 3);
    assert_eq!(tokens[0].kind, TokenKind::Illegal);
    assert_eq!(tokens[0].span.start.0, 0);
    assert_eq!(tokens[1].kind, TokenKind::Illegal);
    assert_eq!(tokens[1].span.start.0, 1);
    assert_eq!(tokens[2].kind, TokenKind::EOF);
}

#[test]
fn test_tokenize_whitespace_handling() {
    let source = " \t let \r\n  x\n=\t42  ".to_string();
    let tokens = tokenize(source, None);

    assert_eq!(tokens[0].kind, TokenKind::Let);
    assert_eq!(tokens[1].kind, TokenKind::Identifier);
    assert_eq!(tokens[2].kind, TokenKind::Assignment);
    assert_eq!(tokens[3].kind, TokenKind::Int);
    assert_eq!(tokens[4].kind, TokenKind::EOF);
}

#[test]
fn test_empty_input_is_only_eof() {
    let tokens = tokenize("   \n".to_string(), None);

    assert_eq!(tokens.len(), 1);
    assert_eq!(tokens[0].kind, TokenKind::EOF);
    assert_eq!(tokens[0].value, "");
}

#[test]
fn test_eof_is_stable() {
    let mut lexer = Lexer::new("x".to_string(), None);

    assert_eq!(lexer.next_token().kind, TokenKind::Identifier);
    for _ in 0..3 {
        let token = lexer.next_token();
        assert_eq!(token.kind, TokenKind::EOF);
        assert_eq!(token.span.start.0, 1);
    }
    assert!(lexer.at_eof());
}

#[test]
fn test_token_spans() {
    let tokens = tokenize("let ab == 10".to_string(), Some("spans.monkey".to_string()));

    assert_eq!((tokens[1].span.start.0, tokens[1].span.end.0), (4, 6));
    assert_eq!((tokens[2].span.start.0, tokens[2].span.end.0), (7, 9));
    assert_eq!((tokens[3].span.start.0, tokens[3].span.end.0), (10, 12));
    assert_eq!(tokens[3].span.start.1.as_str(), "spans.monkey");
}

#[test]
fn test_lexer_iterator_stops_before_eof() {
    let lexer = Lexer::new("a + 1".to_string(), None);
    let values: Vec<String> = lexer.map(|token| token.value).collect();

    assert_eq!(values, vec!["a", "+", "1"]);
}

#[test]
fn test_scanning_is_deterministic() {
    let source = "if (a != 10) { return !b; } else { c(1, 2) }";
    let first = tokenize(source.to_string(), None);
    let second = tokenize(source.to_string(), None);

    assert_eq!(first, second);
}

#[test]
fn test_lookup_identifier() {
    assert_eq!(lookup_identifier("fn"), TokenKind::Fn);
    assert_eq!(lookup_identifier("return"), TokenKind::Return);
    assert_eq!(lookup_identifier("function"), TokenKind::Identifier);
}

#[test]
fn test_token_kind_names() {
    assert_eq!(TokenKind::Assignment.to_string(), "=");
    assert_eq!(TokenKind::Identifier.to_string(), "IDENT");
    assert_eq!(TokenKind::Int.to_string(), "INT");
    assert_eq!(TokenKind::Fn.to_string(), "FUNCTION");
    assert_eq!(TokenKind::EOF.to_string(), "EOF");
}
