// SPDX-License-Identifier: MIT
// Copyright (c) 2023 Kagati Foundation

use std::fmt;

use tacc_types::DeclType;

/// Reserved words of the language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Keyword {
    Int,
    Float,
    Char,
    If,
    Else,
    While,
    For,
    Do,
    Return,
    Break,
    Continue,
    Switch,
    Case,
}

impl Keyword {
    /// The declared type a type keyword stands for. `None` for every
    /// other keyword.
    pub fn decl_type(&self) -> Option<DeclType> {
        match self {
            Keyword::Int => Some(DeclType::Int),
            Keyword::Float => Some(DeclType::Float),
            Keyword::Char => Some(DeclType::Char),
            _ => None,
        }
    }

    pub fn is_type(&self) -> bool {
        self.decl_type().is_some()
    }

    /// Keywords that introduce a block and thereby a new scope.
    pub fn opens_scope(&self) -> bool {
        matches!(self, Keyword::If | Keyword::Else | Keyword::While | Keyword::For | Keyword::Do)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Keyword::Int => "int",
            Keyword::Float => "float",
            Keyword::Char => "char",
            Keyword::If => "if",
            Keyword::Else => "else",
            Keyword::While => "while",
            Keyword::For => "for",
            Keyword::Do => "do",
            Keyword::Return => "return",
            Keyword::Break => "break",
            Keyword::Continue => "continue",
            Keyword::Switch => "switch",
            Keyword::Case => "case",
        }
    }
}

impl fmt::Display for Keyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Category of an operator token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OpKind {
    /// `=`
    Assign,

    /// `+=`, `-=`, `*=`, `/=`
    CompoundAssign,

    /// `+`, `-`, `*`, `/`
    Arithmetic,

    /// `==`, `!=`, `<`, `<=`, `>`, `>=`
    Comparison,

    /// `!`, `&&`, `||`
    Logical,

    /// `&`, `|`
    Bitwise,
}

impl fmt::Display for OpKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            OpKind::Assign => "Assignment Operator",
            OpKind::CompoundAssign => "Compound Assignment Operator",
            OpKind::Arithmetic => "Operator",
            OpKind::Comparison => "Comparison Operator",
            OpKind::Logical => "Logical Operator",
            OpKind::Bitwise => "Bitwise Operator",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Keyword(Keyword),
    Identifier,
    Number,

    /// Lexeme excludes the surrounding quotes.
    StringLiteral,
    Operator(OpKind),

    /// One of `; ( ) { } [ ] , . : ?`
    Punctuation,

    /// A printable character the language has no use for. Scanning
    /// carries on past it.
    Unknown,
}

impl TokenKind {
    pub fn is_keyword(&self) -> bool {
        matches!(self, TokenKind::Keyword(_))
    }

    pub fn is_operator(&self) -> bool {
        matches!(self, TokenKind::Operator(_))
    }

    pub fn as_keyword(&self) -> Option<Keyword> {
        match self {
            TokenKind::Keyword(kw) => Some(*kw),
            _ => None,
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::Keyword(_) => f.write_str("Keyword"),
            TokenKind::Identifier => f.write_str("Identifier"),
            TokenKind::Number => f.write_str("Number"),
            TokenKind::StringLiteral => f.write_str("String Literal"),
            TokenKind::Operator(op) => write!(f, "{op}"),
            TokenKind::Punctuation => f.write_str("Punctuation"),
            TokenKind::Unknown => f.write_str("Unknown"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_type_keywords_carry_a_decl_type() {
        assert_eq!(Keyword::Int.decl_type(), Some(DeclType::Int));
        assert_eq!(Keyword::Float.decl_type(), Some(DeclType::Float));
        assert_eq!(Keyword::Char.decl_type(), Some(DeclType::Char));
        assert!(Keyword::If.decl_type().is_none());
        assert!(!Keyword::Return.is_type());
    }

    #[test]
    fn test_scope_opening_keywords() {
        assert!(Keyword::If.opens_scope());
        assert!(Keyword::While.opens_scope());
        assert!(Keyword::For.opens_scope());
        assert!(!Keyword::Break.opens_scope());
    }
}
