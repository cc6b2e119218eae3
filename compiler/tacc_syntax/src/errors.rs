// SPDX-License-Identifier: MIT
// Copyright (c) 2023 Kagati Foundation

use std::fmt;

use tacc_errors::code::ErrCode;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delim {
    Paren,
    Brace,
}

impl Delim {
    pub fn from_open(ch: char) -> Option<Delim> {
        match ch {
            '(' => Some(Delim::Paren),
            '{' => Some(Delim::Brace),
            _ => None,
        }
    }

    pub fn from_close(ch: char) -> Option<Delim> {
        match ch {
            ')' => Some(Delim::Paren),
            '}' => Some(Delim::Brace),
            _ => None,
        }
    }

    pub fn open_char(&self) -> char {
        match self {
            Delim::Paren => '(',
            Delim::Brace => '{',
        }
    }

    pub fn close_char(&self) -> char {
        match self {
            Delim::Paren => ')',
            Delim::Brace => '}',
        }
    }
}

impl fmt::Display for Delim {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Delim::Paren => f.write_str("parenthesis"),
            Delim::Brace => f.write_str("brace"),
        }
    }
}

/// Structural defects. `index` is the position of the offending token in
/// the token stream; errors found at end of input use the token count.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SyntaxError {
    #[error("unmatched closing {delim} '{}'", delim.close_char())]
    UnmatchedClose { index: usize, delim: Delim },

    #[error("unmatched opening {delim} '{}'", delim.open_char())]
    UnmatchedOpen {
        index: usize,
        delim: Delim,
        opened_at: usize,
    },

    #[error("identifier '{name}' found where it wasn't expected")]
    UnexpectedIdentifier { index: usize, name: String },

    #[error("operator '{op}' found without an operand")]
    OperatorWithoutOperand { index: usize, op: String },

    #[error("missing semicolon or unexpected symbol '{symbol}'")]
    MissingSemicolonOrUnexpectedSymbol { index: usize, symbol: String },

    #[error("missing semicolon at the end of the statement")]
    MissingTrailingSemicolon { index: usize },
}

impl SyntaxError {
    pub fn index(&self) -> usize {
        match self {
            SyntaxError::UnmatchedClose { index, .. }
            | SyntaxError::UnmatchedOpen { index, .. }
            | SyntaxError::UnexpectedIdentifier { index, .. }
            | SyntaxError::OperatorWithoutOperand { index, .. }
            | SyntaxError::MissingSemicolonOrUnexpectedSymbol { index, .. }
            | SyntaxError::MissingTrailingSemicolon { index } => *index,
        }
    }

    pub fn code(&self) -> ErrCode {
        match self {
            SyntaxError::MissingTrailingSemicolon { .. } => ErrCode::SYN1000,
            SyntaxError::UnmatchedClose { .. } => ErrCode::SYN1001,
            SyntaxError::UnmatchedOpen { .. } => ErrCode::SYN1002,
            SyntaxError::UnexpectedIdentifier { .. } => ErrCode::SYN1003,
            SyntaxError::OperatorWithoutOperand { .. } => ErrCode::SYN1004,
            SyntaxError::MissingSemicolonOrUnexpectedSymbol { .. } => ErrCode::SYN1005,
        }
    }
}

/// Verdict of one validation pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyntaxReport {
    pub errors: Vec<SyntaxError>,
}

impl SyntaxReport {
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn first_error(&self) -> Option<&SyntaxError> {
        self.errors.first()
    }
}

impl fmt::Display for SyntaxReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.first_error() {
            None => f.write_str("Syntax analysis completed successfully."),
            Some(err) => write!(f, "Syntax Error: {err}"),
        }
    }
}
