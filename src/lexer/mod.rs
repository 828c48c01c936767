//! Lexical analysis module.
//!
//! This module contains the lexer (tokenizer) that turns source text into
//! tokens on demand. It handles:
//!
//! - Single- and two-character operators with one byte of lookahead
//! - Recognition of keywords, identifiers and integer literals
//! - Token position tracking for error reporting
//! - Whitespace skipping and illegal-byte markers

pub mod lexer;
pub mod tokens;

#[cfg(test)]
mod tests;
