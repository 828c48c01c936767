use std::sync::Arc;

use lazy_static::lazy_static;
use regex::bytes::Regex;
use tracing::{debug, trace};

use crate::{Position, Span, MK_SPAN, MK_TOKEN};

use super::tokens::{lookup_identifier, Token, TokenKind};

lazy_static! {
    static ref IDENTIFIER_PATTERN: Regex = Regex::new("^[a-zA-Z_]+").unwrap();
    static ref INTEGER_PATTERN: Regex = Regex::new("^[0-9]+").unwrap();
}

/// Pull-based scanner over a single source buffer.
///
/// `pos` is the offset of `ch`, `read_pos` the offset of the byte after it.
/// `ch` is `None` once the buffer is exhausted.
#[derive(Clone)]
pub struct Lexer {
    source: String,
    pos: usize,
    read_pos: usize,
    ch: Option<u8>,
    file: Arc<String>,
}

impl Lexer {
    pub fn new(source: String, file: Option<String>) -> Lexer {
        let file_name = if let Some(file) = file {
            Arc::new(file)
        } else {
            Arc::new(String::from("shell"))
        };

        let mut lexer = Lexer {
            source,
            pos: 0,
            read_pos: 0,
            ch: None,
            file: file_name,
        };
        lexer.read_char();
        lexer
    }

    pub fn file(&self) -> &Arc<String> {
        &self.file
    }

    fn read_char(&mut self) {
        self.ch = self.source.as_bytes().get(self.read_pos).copied();
        self.pos = self.read_pos.min(self.source.len());
        self.read_pos += 1;
    }

    fn peek_char(&self) -> Option<u8> {
        self.source.as_bytes().get(self.read_pos).copied()
    }

    fn advance_n(&mut self, n: usize) {
        for _ in 0..n {
            self.read_char();
        }
    }

    fn skip_whitespace(&mut self) {
        while matches!(self.ch, Some(b' ' | b'\t' | b'\n' | b'\r')) {
            self.read_char();
        }
    }

    fn remainder(&self) -> &[u8] {
        &self.source.as_bytes()[self.pos..]
    }

    /// Scans `pattern` at the cursor and consumes the whole match.
    fn read_run(&mut self, pattern: &Regex) -> Option<String> {
        let length = pattern.find(self.remainder())?.end();
        let start = self.pos;
        self.advance_n(length);

        Some(String::from_utf8_lossy(&self.source.as_bytes()[start..self.pos]).into_owned())
    }

    /// Emits `kind` for the current byte, or `pair` if the next byte is `second`.
    fn one_or_two(&mut self, kind: TokenKind, second: u8, pair: TokenKind) -> TokenKind {
        if self.peek_char() == Some(second) {
            self.read_char();
            pair
        } else {
            kind
        }
    }

    pub fn at_eof(&self) -> bool {
        self.ch.is_none()
    }

    /// Returns the next token, or EOF for every call once the input is spent.
    pub fn next_token(&mut self) -> Token {
        self.skip_whitespace();

        let start = self.pos;

        let Some(ch) = self.ch else {
            return MK_TOKEN!(TokenKind::EOF, String::new(), MK_SPAN!(start, start, self.file));
        };

        let kind = match ch {
            b'=' => self.one_or_two(TokenKind::Assignment, b'=', TokenKind::Equals),
            b'!' => self.one_or_two(TokenKind::Not, b'=', TokenKind::NotEquals),
            b'+' => TokenKind::Plus,
            b'-' => TokenKind::Dash,
            b'*' => TokenKind::Star,
            b'/' => TokenKind::Slash,
            b'<' => TokenKind::Less,
            b'>' => TokenKind::Greater,
            b',' => TokenKind::Comma,
            b';' => TokenKind::Semicolon,
            b'(' => TokenKind::OpenParen,
            b')' => TokenKind::CloseParen,
            b'{' => TokenKind::OpenCurly,
            b'}' => TokenKind::CloseCurly,
            _ => {
                if let Some(word) = self.read_run(&IDENTIFIER_PATTERN) {
                    let kind = lookup_identifier(&word);
                    return MK_TOKEN!(kind, word, MK_SPAN!(start, self.pos, self.file));
                }
                if let Some(digits) = self.read_run(&INTEGER_PATTERN) {
                    return MK_TOKEN!(TokenKind::Int, digits, MK_SPAN!(start, self.pos, self.file));
                }

                debug!("illegal byte {:#04x} at offset {}", ch, start);
                self.read_char();
                return MK_TOKEN!(
                    TokenKind::Illegal,
                    char::from(ch).to_string(),
                    MK_SPAN!(start, self.pos, self.file)
                );
            }
        };

        self.read_char();

        let value = String::from_utf8_lossy(&self.source.as_bytes()[start..self.pos]).into_owned();
        trace!("token {} {:?} at {}", kind, value, start);

        MK_TOKEN!(kind, value, MK_SPAN!(start, self.pos, self.file))
    }
}

/// Yields every token before end-of-input.
impl Iterator for Lexer {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        let token = self.next_token();
        if token.kind == TokenKind::EOF {
            None
        } else {
            Some(token)
        }
    }
}

/// Scans `source` to completion; the final token is always EOF.
pub fn tokenize(source: String, file: Option<String>) -> Vec<Token> {
    let mut lex = Lexer::new(source, file);
    let mut tokens = vec![];

    loop {
        let token = lex.next_token();
        let at_end = token.kind == TokenKind::EOF;
        tokens.push(token);

        if at_end {
            return tokens;
        }
    }
}
