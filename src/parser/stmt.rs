use crate::{
    ast::{
        ast::Stmt,
        expressions::Identifier,
        statements::{BlockStmt, ExpressionStmt, LetStmt, ReturnStmt},
    },
    errors::errors::Error,
    lexer::tokens::TokenKind,
    parser::{expr::parse_expr, lookups::BindingPower},
};

use super::parser::Parser;

/// Parses one statement, recording its diagnostic if it fails.
///
/// On return the current token is the last one the statement consumed.
pub fn parse_stmt(parser: &mut Parser) -> Option<Stmt> {
    let handler = parser
        .get_stmt_lookup()
        .get(&parser.current_token_kind())
        .copied();

    let result = match handler {
        Some(stmt_fn) => stmt_fn(parser),
        None => parse_expression_stmt(parser),
    };

    match result {
        Ok(stmt) => Some(stmt),
        Err(error) => {
            parser.record_error(error);
            // A failed statement still owns its terminator.
            if parser.peek_token_is(TokenKind::Semicolon) {
                parser.advance();
            }
            None
        }
    }
}

pub fn parse_expression_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let token = parser.current_token().clone();
    let expression = parse_expr(parser, BindingPower::Lowest)?;

    if parser.peek_token_is(TokenKind::Semicolon) {
        parser.advance();
    }

    Ok(Stmt::Expression(ExpressionStmt { token, expression }))
}

pub fn parse_let_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let token = parser.current_token().clone();

    let name_token = parser.expect_peek(TokenKind::Identifier)?;
    let name = Identifier {
        value: name_token.value.clone(),
        token: name_token,
    };

    parser.expect_peek(TokenKind::Assignment)?;
    parser.advance();

    let value = parse_expr(parser, BindingPower::Lowest)?;

    if parser.peek_token_is(TokenKind::Semicolon) {
        parser.advance();
    }

    Ok(Stmt::Let(LetStmt { token, name, value }))
}

pub fn parse_return_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let token = parser.current_token().clone();

    let value = if parser.peek_token_is(TokenKind::Semicolon) {
        None
    } else {
        parser.advance();
        Some(parse_expr(parser, BindingPower::Lowest)?)
    };

    if parser.peek_token_is(TokenKind::Semicolon) {
        parser.advance();
    }

    Ok(Stmt::Return(ReturnStmt { token, value }))
}

/// Parses `{ ... }` with the current token on the opening brace.
///
/// Stops on the closing brace, or at end-of-input for an unterminated block.
/// Failed inner statements are recorded and skipped like top-level ones.
pub fn parse_block_stmt(parser: &mut Parser) -> BlockStmt {
    let token = parser.advance();

    let mut body = Vec::new();
    while !parser
        .current_token()
        .is_one_of_many(&[TokenKind::CloseCurly, TokenKind::EOF])
    {
        if let Some(stmt) = parse_stmt(parser) {
            body.push(stmt);
        }
        parser.advance();
    }

    BlockStmt { token, body }
}
