//! Parser implementation for building the Abstract Syntax Tree.
//!
//! This module contains the main Parser struct and the program loop.
//! The parser pulls tokens from a Lexer through a two-token window
//! (current + peek) and uses NUD/LED handlers for expression parsing.
//!
//! It maintains lookup tables for:
//! - Statement handlers
//! - NUD (null denotation) handlers for prefix expressions
//! - LED (left denotation) handlers for infix expressions
//! - Binding powers for operator precedence

use std::{collections::HashMap, mem};

use tracing::{debug, trace};

use crate::{
    ast::ast::Program,
    errors::errors::{Error, ErrorImpl},
    lexer::{
        lexer::Lexer,
        tokens::{Token, TokenKind},
    },
    Position,
};

use super::{
    lookups::{
        create_token_lookups, BPLookup, BindingPower, LEDHandler, LEDLookup, NUDHandler, NUDLookup,
        StmtHandler, StmtLookup,
    },
    stmt::parse_stmt,
};

/// The main parser structure that maintains parsing state.
///
/// A parser owns the lexer it reads from and is consumed by
/// [`Parser::parse_program`], so one instance parses exactly one program.
pub struct Parser {
    /// The token source
    lexer: Lexer,
    /// Token under examination
    current: Token,
    /// One token of lookahead
    peek: Token,
    /// Diagnostics in the order they were raised
    errors: Vec<Error>,
    /// Lookup table for statement parsing handlers
    stmt_lookup: StmtLookup,
    /// Lookup table for null denotation (prefix) expression handlers
    nud_lookup: NUDLookup,
    /// Lookup table for left denotation (infix) expression handlers
    led_lookup: LEDLookup,
    /// Lookup table for expression binding powers (precedence)
    binding_power_lookup: BPLookup,
}

impl Parser {
    /// Creates a new Parser over `lexer` and primes the lookahead window.
    pub fn new(mut lexer: Lexer) -> Self {
        let current = lexer.next_token();
        let peek = lexer.next_token();

        let mut parser = Parser {
            lexer,
            current,
            peek,
            errors: vec![],
            stmt_lookup: HashMap::new(),
            nud_lookup: HashMap::new(),
            led_lookup: HashMap::new(),
            binding_power_lookup: HashMap::new(),
        };
        create_token_lookups(&mut parser);

        parser
    }

    /// Returns the current token without advancing.
    pub fn current_token(&self) -> &Token {
        &self.current
    }

    /// Returns the kind of the current token.
    pub fn current_token_kind(&self) -> TokenKind {
        self.current.kind
    }

    /// Returns the lookahead token.
    pub fn peek_token(&self) -> &Token {
        &self.peek
    }

    /// Returns the kind of the lookahead token.
    pub fn peek_token_kind(&self) -> TokenKind {
        self.peek.kind
    }

    pub fn current_token_is(&self, kind: TokenKind) -> bool {
        self.current.kind == kind
    }

    pub fn peek_token_is(&self, kind: TokenKind) -> bool {
        self.peek.kind == kind
    }

    /// Shifts the window by one token and returns the token that was current.
    pub fn advance(&mut self) -> Token {
        let next = self.lexer.next_token();
        let previous = mem::replace(&mut self.current, mem::replace(&mut self.peek, next));
        trace!("advanced past {} {:?}", previous.kind, previous.value);
        previous
    }

    /// Advances onto the peek token if it has the expected kind.
    ///
    /// # Returns
    ///
    /// The new current token, or an `UnexpectedToken` error located at the
    /// peek token. The window does not move on failure.
    pub fn expect_peek(&mut self, expected_kind: TokenKind) -> Result<Token, Error> {
        if self.peek_token_is(expected_kind) {
            self.advance();
            Ok(self.current.clone())
        } else {
            Err(Error::new(
                ErrorImpl::UnexpectedToken {
                    expected: expected_kind,
                    found: self.peek.kind,
                },
                self.peek.span.start.clone(),
            ))
        }
    }

    /// Builds an error located at the current token.
    pub fn error(&self, error_impl: ErrorImpl) -> Error {
        Error::new(error_impl, self.get_position())
    }

    /// Appends a diagnostic to the session.
    pub fn record_error(&mut self, error: Error) {
        debug!("diagnostic at offset {}: {}", error.get_position().0, error);
        self.errors.push(error);
    }

    /// Returns the diagnostics recorded so far.
    pub fn get_errors(&self) -> &[Error] {
        &self.errors
    }

    /// Returns a reference to the statement lookup table.
    pub fn get_stmt_lookup(&self) -> &StmtLookup {
        &self.stmt_lookup
    }

    /// Returns a reference to the NUD (null denotation) lookup table.
    pub fn get_nud_lookup(&self) -> &NUDLookup {
        &self.nud_lookup
    }

    /// Returns a reference to the LED (left denotation) lookup table.
    pub fn get_led_lookup(&self) -> &LEDLookup {
        &self.led_lookup
    }

    /// Returns a reference to the binding power lookup table.
    pub fn get_bp_lookup(&self) -> &BPLookup {
        &self.binding_power_lookup
    }

    /// Binding power of the peek token, `Lowest` if it is not an operator.
    pub fn peek_binding_power(&self) -> BindingPower {
        self.binding_power_of(self.peek.kind)
    }

    /// Binding power of the current token, `Lowest` if it is not an operator.
    pub fn current_binding_power(&self) -> BindingPower {
        self.binding_power_of(self.current.kind)
    }

    fn binding_power_of(&self, kind: TokenKind) -> BindingPower {
        self.binding_power_lookup
            .get(&kind)
            .copied()
            .unwrap_or(BindingPower::Lowest)
    }

    /// Registers a left denotation (infix) handler for a token.
    /// The tables are only filled while the parser is being constructed.
    ///
    /// # Arguments
    ///
    /// * `kind` - The token kind to register
    /// * `binding_power` - The precedence/binding power for this operator
    /// * `led_fn` - The handler function for this infix operator
    pub(super) fn led(&mut self, kind: TokenKind, binding_power: BindingPower, led_fn: LEDHandler) {
        self.binding_power_lookup.insert(kind, binding_power);
        self.led_lookup.insert(kind, led_fn);
    }

    /// Registers a null denotation (prefix) handler for a token.
    ///
    /// Prefix registration leaves the binding power table alone, so a kind
    /// with both roles (`-`, `(`) keeps its infix power.
    pub(super) fn nud(&mut self, kind: TokenKind, nud_fn: NUDHandler) {
        self.nud_lookup.insert(kind, nud_fn);
    }

    /// Registers a statement handler for a leading token.
    pub(super) fn stmt(&mut self, kind: TokenKind, stmt_fn: StmtHandler) {
        self.stmt_lookup.insert(kind, stmt_fn);
    }

    /// Returns the position of the current token.
    pub fn get_position(&self) -> Position {
        self.current.span.start.clone()
    }

    /// Parses statements until end-of-input.
    ///
    /// A statement that fails records its diagnostic and is dropped; the loop
    /// then moves on one token at a time, so a single malformed construct may
    /// produce further diagnostics downstream.
    pub fn parse_program(mut self) -> (Program, Vec<Error>) {
        let mut statements = vec![];

        while !self.current_token_is(TokenKind::EOF) {
            if let Some(stmt) = parse_stmt(&mut self) {
                statements.push(stmt);
            }
            self.advance();
        }

        debug!(
            "parsed {} statements from {} with {} diagnostics",
            statements.len(),
            self.lexer.file(),
            self.errors.len()
        );

        (Program { statements }, self.errors)
    }
}

/// Parses one source string into a Program and its diagnostics.
///
/// This is the main entry point for parsing.
///
/// # Arguments
///
/// * `source` - The program text
/// * `file` - Name reported in diagnostic positions, `"shell"` when absent
///
/// # Returns
///
/// The (possibly partial) Program together with every diagnostic raised.
/// Callers must treat a non-empty diagnostic list as a failed parse.
pub fn parse(source: &str, file: Option<String>) -> (Program, Vec<Error>) {
    Parser::new(Lexer::new(source.to_string(), file)).parse_program()
}
