/*
MIT License

Copyright (c) 2023 Kagati Foundation

Permission is hereby granted, free of charge, to any person obtaining a copy
of this software and associated documentation files (the "Software"), to deal
in the Software without restriction, including without limitation the rights
to use, copy, modify, merge, publish, distribute, sublicense, and/or sell
copies of the Software, and to permit persons to whom the Software is
furnished to do so, subject to the following conditions:

The above copyright notice and this permission notice shall be included in all
copies or substantial portions of the Software.

THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE
SOFTWARE.
*/

use std::fmt;

use tacc_errors::code::ErrCode;
use tacc_errors::CapacityExceeded;
use tacc_symbol::{ScopeDepth, SymbolTable};
use tacc_types::DeclType;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SemaError {
    #[error("invalid type '{name}'")]
    InvalidType { name: String },

    #[error("variable '{name}' already declared in scope {scope_depth}")]
    DuplicateDeclaration { name: String, scope_depth: ScopeDepth },

    #[error("variable '{name}' not declared{}", condition_suffix(.in_condition))]
    UndeclaredVariable { name: String, in_condition: bool },

    #[error("type mismatch in expression: `{lhs}` is not compatible with `{rhs}`")]
    TypeMismatch { lhs: DeclType, rhs: DeclType },

    #[error("unrecognized statement: {text}")]
    UnrecognizedStatement { text: String },

    #[error("block closed but no scope is open")]
    UnmatchedScopeClose,

    #[error(transparent)]
    CapacityExceeded(#[from] CapacityExceeded),
}

fn condition_suffix(in_condition: &bool) -> &'static str {
    if *in_condition { " in condition" } else { "" }
}

impl SemaError {
    pub fn code(&self) -> ErrCode {
        match self {
            SemaError::UndeclaredVariable { .. } => ErrCode::SEM2000,
            SemaError::DuplicateDeclaration { .. } => ErrCode::SEM2001,
            SemaError::InvalidType { .. } => ErrCode::SEM2002,
            SemaError::UnrecognizedStatement { .. } => ErrCode::SEM2003,
            SemaError::UnmatchedScopeClose => ErrCode::SEM2004,
            SemaError::TypeMismatch { .. } => ErrCode::TYP3002,
            SemaError::CapacityExceeded(_) => ErrCode::CAP9000,
        }
    }
}

/// One semantic problem and the line it was found on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SemaFinding {
    pub line: usize,
    pub error: SemaError,
}

impl fmt::Display for SemaFinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}: {}", self.line, self.error)
    }
}

/// Everything one analysis run found, plus the symbol table as it stood
/// at the end of the input.
#[derive(Debug, Clone, Default)]
pub struct SemaReport {
    pub findings: Vec<SemaFinding>,
    pub symbols: SymbolTable,
}

impl SemaReport {
    pub fn is_clean(&self) -> bool {
        self.findings.is_empty()
    }

    pub fn errors(&self) -> impl Iterator<Item = &SemaError> {
        self.findings.iter().map(|f| &f.error)
    }
}
