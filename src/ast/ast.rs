use std::fmt::{Display, Formatter};

use crate::Span;

use super::{
    expressions::{
        BooleanExpr, CallExpr, FunctionLiteral, Identifier, IfExpr, InfixExpr, IntegerLiteral,
        PrefixExpr,
    },
    statements::{BlockStmt, ExpressionStmt, LetStmt, ReturnStmt},
};

/// Node Trait
///
/// Capabilities shared by every node in the tree. The canonical textual form
/// comes from `Display`, which fully parenthesizes prefix and infix operations.
pub trait Node: Display {
    /// Returns the literal text of the token the node was built from.
    fn token_literal(&self) -> &str;
    /// Returns the span of the originating token.
    fn get_span(&self) -> &Span;
}

/// Statement
///
/// The closed set of statement kinds.
#[derive(Debug, Clone)]
pub enum Stmt {
    Let(LetStmt),
    Return(ReturnStmt),
    Expression(ExpressionStmt),
    Block(BlockStmt),
}

impl Node for Stmt {
    fn token_literal(&self) -> &str {
        match self {
            Stmt::Let(stmt) => stmt.token_literal(),
            Stmt::Return(stmt) => stmt.token_literal(),
            Stmt::Expression(stmt) => stmt.token_literal(),
            Stmt::Block(stmt) => stmt.token_literal(),
        }
    }
    fn get_span(&self) -> &Span {
        match self {
            Stmt::Let(stmt) => stmt.get_span(),
            Stmt::Return(stmt) => stmt.get_span(),
            Stmt::Expression(stmt) => stmt.get_span(),
            Stmt::Block(stmt) => stmt.get_span(),
        }
    }
}

impl Display for Stmt {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Stmt::Let(stmt) => stmt.fmt(f),
            Stmt::Return(stmt) => stmt.fmt(f),
            Stmt::Expression(stmt) => stmt.fmt(f),
            Stmt::Block(stmt) => stmt.fmt(f),
        }
    }
}

/// Expression
///
/// The closed set of expression kinds. Recursive children are boxed inside
/// each variant's struct, and every child is owned by exactly one parent.
#[derive(Debug, Clone)]
pub enum Expr {
    Identifier(Identifier),
    Integer(IntegerLiteral),
    Boolean(BooleanExpr),
    Prefix(PrefixExpr),
    Infix(InfixExpr),
    If(IfExpr),
    Function(FunctionLiteral),
    Call(CallExpr),
}

impl Expr {
    fn as_node(&self) -> &dyn Node {
        match self {
            Expr::Identifier(expr) => expr,
            Expr::Integer(expr) => expr,
            Expr::Boolean(expr) => expr,
            Expr::Prefix(expr) => expr,
            Expr::Infix(expr) => expr,
            Expr::If(expr) => expr,
            Expr::Function(expr) => expr,
            Expr::Call(expr) => expr,
        }
    }
}

impl Node for Expr {
    fn token_literal(&self) -> &str {
        self.as_node().token_literal()
    }
    fn get_span(&self) -> &Span {
        self.as_node().get_span()
    }
}

impl Display for Expr {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        self.as_node().fmt(f)
    }
}

/// Program
///
/// Root of the tree: the top-level statements in source order.
#[derive(Debug, Clone, Default)]
pub struct Program {
    pub statements: Vec<Stmt>,
}

impl Program {
    pub fn token_literal(&self) -> &str {
        self.statements
            .first()
            .map(|stmt| stmt.token_literal())
            .unwrap_or("")
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Stmt> {
        self.statements.iter()
    }
}

impl Display for Program {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        for stmt in &self.statements {
            write!(f, "{}", stmt)?;
        }
        Ok(())
    }
}
