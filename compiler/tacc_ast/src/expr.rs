// SPDX-License-Identifier: MIT
// Copyright (c) 2023 Kagati Foundation

use std::fmt;

use tacc_token::{OpKind, Token, TokenKind};

/// A single value inside a statement: a name, a number, a string literal,
/// or a number preceded by a minus sign.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Operand<'src> {
    pub token: Token<'src>,
    pub negated: bool,
}

impl<'src> Operand<'src> {
    /// Reads an operand from the front of `tokens`. Returns the operand and
    /// how many tokens it took.
    pub fn parse(tokens: &[Token<'src>]) -> Option<(Operand<'src>, usize)> {
        match tokens {
            [minus, num, ..] if minus.is_op("-") && num.kind == TokenKind::Number => {
                Some((Operand { token: *num, negated: true }, 2))
            },
            [tok, ..] if tok.is_operand() => Some((Operand { token: *tok, negated: false }, 1)),
            _ => None,
        }
    }

    /// Parses `tokens` as exactly one operand.
    pub fn parse_exact(tokens: &[Token<'src>]) -> Option<Operand<'src>> {
        match Operand::parse(tokens) {
            Some((operand, used)) if used == tokens.len() => Some(operand),
            _ => None,
        }
    }
}

impl fmt::Display for Operand<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.token.kind {
            TokenKind::StringLiteral => write!(f, "\"{}\"", self.token.lexeme),
            _ if self.negated => write!(f, "-{}", self.token.lexeme),
            _ => f.write_str(self.token.lexeme),
        }
    }
}

/// Right-hand sides simple enough to lower directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Expr<'src> {
    Operand(Operand<'src>),

    /// `lhs op rhs` with an arithmetic or comparison operator.
    Binary {
        lhs: Operand<'src>,
        op: Token<'src>,
        rhs: Operand<'src>,
    },
}

impl<'src> Expr<'src> {
    pub fn parse(tokens: &[Token<'src>]) -> Option<Expr<'src>> {
        if let Some(operand) = Operand::parse_exact(tokens) {
            return Some(Expr::Operand(operand));
        }
        let (lhs, used) = Operand::parse(tokens)?;
        let op = *tokens.get(used)?;
        if !(op.is_op_kind(OpKind::Arithmetic) || op.is_op_kind(OpKind::Comparison)) {
            return None;
        }
        let rhs = Operand::parse_exact(&tokens[used + 1..])?;
        Some(Expr::Binary { lhs, op, rhs })
    }

    /// Like `parse`, but only accepts `a CMP b`.
    pub fn parse_comparison(tokens: &[Token<'src>]) -> Option<Expr<'src>> {
        match Expr::parse(tokens)? {
            bin @ Expr::Binary { op, .. } if op.is_op_kind(OpKind::Comparison) => Some(bin),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use tacc_token::TokenPos;

    use super::*;

    fn t(kind: TokenKind, lexeme: &str) -> Token<'_> {
        Token::new(kind, lexeme, TokenPos { line: 1, column: 0 })
    }

    #[test]
    fn test_signed_literal_operand() {
        let toks = [t(TokenKind::Operator(OpKind::Arithmetic), "-"), t(TokenKind::Number, "4")];
        let operand = Operand::parse_exact(&toks).unwrap();
        assert!(operand.negated);
        assert_eq!(operand.to_string(), "-4");
    }

    #[test]
    fn test_binary_expr() {
        let toks = [
            t(TokenKind::Identifier, "a"),
            t(TokenKind::Operator(OpKind::Arithmetic), "+"),
            t(TokenKind::Number, "1"),
        ];
        let Some(Expr::Binary { lhs, op, rhs }) = Expr::parse(&toks) else {
            panic!("expected a binary expression");
        };
        assert!(lhs.token.is_identifier());
        assert_eq!(lhs.token.lexeme, "a");
        assert_eq!(op.lexeme, "+");
        assert_eq!(rhs.to_string(), "1");
        assert!(Expr::parse_comparison(&toks).is_none());
    }

    #[test]
    fn test_longer_chains_are_not_simple() {
        let toks = [
            t(TokenKind::Identifier, "a"),
            t(TokenKind::Operator(OpKind::Arithmetic), "+"),
            t(TokenKind::Identifier, "b"),
            t(TokenKind::Operator(OpKind::Arithmetic), "*"),
            t(TokenKind::Identifier, "c"),
        ];
        assert!(Expr::parse(&toks).is_none());
    }
}
