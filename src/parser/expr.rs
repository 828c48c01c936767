use tracing::trace;

use crate::{
    ast::{
        ast::Expr,
        expressions::{
            BooleanExpr, CallExpr, FunctionLiteral, Identifier, IfExpr, InfixExpr, IntegerLiteral,
            PrefixExpr,
        },
    },
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::TokenKind,
};

use super::{lookups::BindingPower, parser::Parser, stmt::parse_block_stmt};

/// Parses an expression starting at the current token.
///
/// Handlers leave the last token of whatever they parsed as the current
/// token; operators are only consumed while they bind tighter than `bp`.
pub fn parse_expr(parser: &mut Parser, bp: BindingPower) -> Result<Expr, Error> {
    // First parse NUD
    let token_kind = parser.current_token_kind();
    trace!("parse_expr at {} with {:?}", token_kind, bp);

    let Some(nud_fn) = parser.get_nud_lookup().get(&token_kind).copied() else {
        return Err(parser.error(ErrorImpl::NoPrefixParseFn {
            kind: token_kind,
            token: parser.current_token().value.clone(),
        }));
    };

    let mut left = nud_fn(parser)?;

    // While the next operator binds tighter than bp, fold it into lhs
    while !parser.peek_token_is(TokenKind::Semicolon) && bp < parser.peek_binding_power() {
        let Some(led_fn) = parser.get_led_lookup().get(&parser.peek_token_kind()).copied() else {
            return Ok(left);
        };

        parser.advance();
        let operator_bp = parser.current_binding_power();
        left = led_fn(parser, left, operator_bp)?;
    }

    Ok(left)
}

pub fn parse_primary_expr(parser: &mut Parser) -> Result<Expr, Error> {
    let token = parser.current_token().clone();

    match token.kind {
        TokenKind::Int => match parse_integer_literal(&token.value) {
            Some(value) => Ok(Expr::Integer(IntegerLiteral { token, value })),
            None => Err(parser.error(ErrorImpl::NumberParseError { token: token.value })),
        },
        TokenKind::True | TokenKind::False => Ok(Expr::Boolean(BooleanExpr {
            value: token.kind == TokenKind::True,
            token,
        })),
        _ => Ok(Expr::Identifier(Identifier {
            value: token.value.clone(),
            token,
        })),
    }
}

/// Converts an integer lexeme; a leading `0` on a multi-digit literal means octal.
fn parse_integer_literal(literal: &str) -> Option<i64> {
    match literal.strip_prefix('0') {
        Some(octal) if !octal.is_empty() => i64::from_str_radix(octal, 8).ok(),
        _ => literal.parse::<i64>().ok(),
    }
}

pub fn parse_prefix_expr(parser: &mut Parser) -> Result<Expr, Error> {
    let operator_token = parser.advance();
    let rhs = parse_expr(parser, BindingPower::Prefix)?;

    Ok(Expr::Prefix(PrefixExpr {
        operator: operator_token.value.clone(),
        token: operator_token,
        right_expr: Box::new(rhs),
    }))
}

pub fn parse_binary_expr(parser: &mut Parser, left: Expr, bp: BindingPower) -> Result<Expr, Error> {
    let operator_token = parser.advance();
    let right = parse_expr(parser, bp)?;

    Ok(Expr::Infix(InfixExpr {
        operator: operator_token.value.clone(),
        token: operator_token,
        left: Box::new(left),
        right: Box::new(right),
    }))
}

pub fn parse_grouping_expr(parser: &mut Parser) -> Result<Expr, Error> {
    parser.advance();
    let expr = parse_expr(parser, BindingPower::Lowest)?;
    parser.expect_peek(TokenKind::CloseParen)?;

    Ok(expr)
}

pub fn parse_if_expr(parser: &mut Parser) -> Result<Expr, Error> {
    // if (x < y) { x } else { y }
    let token = parser.current_token().clone();

    parser.expect_peek(TokenKind::OpenParen)?;
    parser.advance();
    let condition = parse_expr(parser, BindingPower::Lowest)?;
    parser.expect_peek(TokenKind::CloseParen)?;

    parser.expect_peek(TokenKind::OpenCurly)?;
    let consequence = parse_block_stmt(parser);

    let alternative = if parser.peek_token_is(TokenKind::Else) {
        parser.advance();
        parser.expect_peek(TokenKind::OpenCurly)?;
        Some(parse_block_stmt(parser))
    } else {
        None
    };

    Ok(Expr::If(IfExpr {
        token,
        condition: Box::new(condition),
        consequence,
        alternative,
    }))
}

pub fn parse_fn_literal_expr(parser: &mut Parser) -> Result<Expr, Error> {
    let token = parser.current_token().clone();

    parser.expect_peek(TokenKind::OpenParen)?;
    let parameters = parse_fn_parameters(parser)?;

    parser.expect_peek(TokenKind::OpenCurly)?;
    let body = parse_block_stmt(parser);

    Ok(Expr::Function(FunctionLiteral {
        token,
        parameters,
        body,
    }))
}

/// Parses `ident, ident, ...` up to and including the closing `)`.
fn parse_fn_parameters(parser: &mut Parser) -> Result<Vec<Identifier>, Error> {
    let mut parameters = vec![];

    if parser.peek_token_is(TokenKind::CloseParen) {
        parser.advance();
        return Ok(parameters);
    }

    loop {
        let token = parser.expect_peek(TokenKind::Identifier)?;
        parameters.push(Identifier {
            value: token.value.clone(),
            token,
        });

        if !parser.peek_token_is(TokenKind::Comma) {
            break;
        }
        parser.advance();
    }

    parser.expect_peek(TokenKind::CloseParen)?;

    Ok(parameters)
}

pub fn parse_call_expr(parser: &mut Parser, left: Expr, _bp: BindingPower) -> Result<Expr, Error> {
    let token = parser.current_token().clone();

    let mut args = vec![];

    if parser.peek_token_is(TokenKind::CloseParen) {
        parser.advance();
    } else {
        parser.advance();
        args.push(parse_expr(parser, BindingPower::Lowest)?);

        while parser.peek_token_is(TokenKind::Comma) {
            parser.advance();
            parser.advance();
            args.push(parse_expr(parser, BindingPower::Lowest)?);
        }

        parser.expect_peek(TokenKind::CloseParen)?;
    }

    Ok(Expr::Call(CallExpr {
        token,
        callee: Box::new(left),
        arguments: args,
    }))
}
