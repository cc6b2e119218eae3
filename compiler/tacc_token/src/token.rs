// SPDX-License-Identifier: MIT
// Copyright (c) 2023 Kagati Foundation

use std::fmt;

use tacc_span::{HasSpan, SourcePos, Span};

use super::{Keyword, OpKind, TokenKind};

#[derive(Debug, PartialEq, Eq, Clone, Copy, Default)]
pub struct TokenPos {
    pub line: usize,
    pub column: usize,
}

impl From<TokenPos> for SourcePos {
    fn from(pos: TokenPos) -> Self {
        SourcePos { line: pos.line, column: pos.column }
    }
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct Token<'src> {
    pub kind: TokenKind,
    pub lexeme: &'src str,
    pub pos: TokenPos,
}

impl<'src> Token<'src> {
    pub fn new(kind: TokenKind, lexeme: &'src str, pos: TokenPos) -> Token<'src> {
        Token { kind, lexeme, pos }
    }

    pub fn is_punct(&self, ch: char) -> bool {
        self.kind == TokenKind::Punctuation && self.lexeme.len() == 1 && self.lexeme.starts_with(ch)
    }

    pub fn is_op(&self, op: &str) -> bool {
        self.kind.is_operator() && self.lexeme == op
    }

    pub fn is_keyword(&self, kw: Keyword) -> bool {
        self.kind == TokenKind::Keyword(kw)
    }

    pub fn is_op_kind(&self, kind: OpKind) -> bool {
        self.kind == TokenKind::Operator(kind)
    }

    pub fn is_identifier(&self) -> bool {
        self.kind == TokenKind::Identifier
    }

    /// Identifiers, numbers and string literals: anything that can stand on
    /// either side of a binary operator.
    pub fn is_operand(&self) -> bool {
        matches!(self.kind, TokenKind::Identifier | TokenKind::Number | TokenKind::StringLiteral)
    }

    /// `;` or `}`, the two tokens a well-formed input may end with.
    pub fn is_terminator(&self) -> bool {
        self.is_punct(';') || self.is_punct('}')
    }
}

impl HasSpan for Token<'_> {
    fn span(&self) -> Span {
        let len = match self.kind {
            TokenKind::StringLiteral => self.lexeme.len() + 2,
            _ => self.lexeme.len(),
        };
        Span::on_line(self.pos.into(), len.max(1))
    }
}

impl fmt::Display for Token<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            TokenKind::StringLiteral => write!(f, "Token: \"{}\", Type: {}", self.lexeme, self.kind),
            _ => write!(f, "Token: {}, Type: {}", self.lexeme, self.kind),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tok(kind: TokenKind, lexeme: &str) -> Token<'_> {
        Token::new(kind, lexeme, TokenPos { line: 1, column: 0 })
    }

    #[test]
    fn test_punct_matching() {
        let semi = tok(TokenKind::Punctuation, ";");
        assert!(semi.is_punct(';'));
        assert!(semi.is_terminator());
        assert!(!semi.is_punct('}'));
        assert!(!tok(TokenKind::Unknown, ";").is_punct(';'));
    }

    #[test]
    fn test_string_literal_span_counts_quotes() {
        let lit = tok(TokenKind::StringLiteral, "hi");
        assert_eq!(lit.span().width(), 4);
    }

    #[test]
    fn test_display_matches_token_dump_format() {
        let id = tok(TokenKind::Identifier, "x");
        assert_eq!(id.to_string(), "Token: x, Type: Identifier");
        let eq = tok(TokenKind::Operator(OpKind::Comparison), "==");
        assert_eq!(eq.to_string(), "Token: ==, Type: Comparison Operator");
    }
}
