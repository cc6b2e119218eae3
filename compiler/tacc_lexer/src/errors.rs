// SPDX-License-Identifier: MIT
// Copyright (c) 2023 Kagati Foundation

use tacc_errors::code::ErrCode;
use tacc_errors::diagnostic::Diagnostic;
use tacc_errors::CapacityExceeded;
use tacc_span::Span;
use tacc_token::TokenPos;
use thiserror::Error;

/// Errors that end a run. Once one of these comes back no token of the
/// run can be trusted.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LexError {
    #[error("{}:{}: unterminated block comment", pos.line, pos.column + 1)]
    UnterminatedComment { pos: TokenPos },

    #[error("{}:{}: unterminated string literal", pos.line, pos.column + 1)]
    UnterminatedStringLiteral { pos: TokenPos },

    #[error(transparent)]
    Capacity(#[from] CapacityExceeded),
}

impl LexError {
    pub fn code(&self) -> ErrCode {
        match self {
            LexError::UnterminatedComment { .. } => ErrCode::LEX0001,
            LexError::UnterminatedStringLiteral { .. } => ErrCode::LEX0002,
            LexError::Capacity(_) => ErrCode::CAP9000,
        }
    }

    /// Where the offending construct starts, if it has a location.
    pub fn pos(&self) -> Option<TokenPos> {
        match self {
            LexError::UnterminatedComment { pos } | LexError::UnterminatedStringLiteral { pos } => Some(*pos),
            LexError::Capacity(_) => None,
        }
    }

    pub fn to_diagnostic(&self) -> Diagnostic {
        let span = self.pos().map(|p| Span::on_line(p.into(), 2)).unwrap_or_default();
        Diagnostic::error(self.code(), span, self.to_string())
    }
}
