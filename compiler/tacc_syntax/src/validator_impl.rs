// SPDX-License-Identifier: MIT
// Copyright (c) 2023 Kagati Foundation

use std::cell::RefCell;
use std::rc::Rc;

use tacc_ctx::CompilerCtx;
use tacc_errors::diagnostic::{Diagnostic, Severity};
use tacc_span::HasSpan;
use tacc_token::{Token, TokenKind};
use tacc_types::DeclType;

use crate::{Delim, SyntaxError, SyntaxReport};

/// What the validator is waiting to see next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Expectation {
    Neutral,

    /// A type name was just read; a declared name must follow.
    IdentAfterType,

    /// An operator was just read; an operand must follow.
    OperandAfterOperator,
}

#[derive(Debug, Clone, Copy)]
struct OpenDelim {
    delim: Delim,
    index: usize,
}

/// Single-pass structural checker.
///
/// Delimiters are matched against an explicit stack while a small state
/// machine checks that names and operators show up where they can.
pub struct SyntaxValidator {
    ctx: Rc<RefCell<CompilerCtx>>,
    stack: Vec<OpenDelim>,
    state: Expectation,

    /// Whether a bare identifier is allowed at this point: at the start of
    /// input and right after `; { } ( ,` or a non-type keyword.
    has_context: bool,
    block_opened: bool,
    errors: Vec<SyntaxError>,
}

impl SyntaxValidator {
    pub fn new(ctx: Rc<RefCell<CompilerCtx>>) -> Self {
        Self {
            ctx,
            stack: vec![],
            state: Expectation::Neutral,
            has_context: true,
            block_opened: false,
            errors: vec![],
        }
    }

    fn reset(&mut self) {
        self.stack.clear();
        self.state = Expectation::Neutral;
        self.has_context = true;
        self.block_opened = false;
        self.errors.clear();
    }

    #[tracing::instrument(skip_all, fields(tokens = tokens.len()))]
    pub fn validate(&mut self, tokens: &[Token]) -> SyntaxReport {
        self.reset();
        let halt_on_first = self.ctx.borrow().config.halt_on_first_syntax_error;

        for (index, tok) in tokens.iter().enumerate() {
            if let Err(err) = self.step(tokens, index, tok) {
                self.report(tokens, err);
                if halt_on_first {
                    return self.finish();
                }
            }
        }

        // whatever is still open was never closed, innermost first
        let count = tokens.len();
        let residual: Vec<OpenDelim> = self.stack.drain(..).rev().collect();
        for open in residual {
            self.report(tokens, SyntaxError::UnmatchedOpen { index: count, delim: open.delim, opened_at: open.index });
            if halt_on_first {
                return self.finish();
            }
        }

        if tokens.last().is_some_and(|t| !t.is_terminator()) {
            self.report(tokens, SyntaxError::MissingTrailingSemicolon { index: count });
        }
        self.finish()
    }

    fn finish(&mut self) -> SyntaxReport {
        let report = SyntaxReport { errors: std::mem::take(&mut self.errors) };
        tracing::debug!(errors = report.errors.len(), "syntax validation done");
        report
    }

    fn step(&mut self, tokens: &[Token], index: usize, tok: &Token) -> Result<(), SyntaxError> {
        match tok.kind {
            TokenKind::Keyword(kw) if kw.is_type() => self.on_type_name(),
            TokenKind::Keyword(_) => {
                self.has_context = true;
                Ok(())
            },
            TokenKind::Identifier if self.state == Expectation::Neutral && tok.lexeme.parse::<DeclType>().is_ok() => {
                self.on_type_name()
            },
            TokenKind::Identifier => self.on_identifier(index, tok),
            TokenKind::Number | TokenKind::StringLiteral => {
                if self.state == Expectation::OperandAfterOperator {
                    self.state = Expectation::Neutral;
                }
                self.has_context = false;
                Ok(())
            },
            TokenKind::Operator(_) => self.on_operator(tokens, index, tok),
            TokenKind::Punctuation => self.on_punctuation(index, tok),
            TokenKind::Unknown => self.on_stray_symbol(index, tok),
        }
    }

    fn on_type_name(&mut self) -> Result<(), SyntaxError> {
        self.state = Expectation::IdentAfterType;
        self.has_context = false;
        Ok(())
    }

    fn on_identifier(&mut self, index: usize, tok: &Token) -> Result<(), SyntaxError> {
        let allowed = match self.state {
            Expectation::IdentAfterType | Expectation::OperandAfterOperator => true,
            Expectation::Neutral => self.has_context,
        };
        self.state = Expectation::Neutral;
        self.has_context = false;
        if !allowed {
            return Err(SyntaxError::UnexpectedIdentifier { index, name: tok.lexeme.to_string() });
        }
        Ok(())
    }

    fn on_operator(&mut self, tokens: &[Token], index: usize, tok: &Token) -> Result<(), SyntaxError> {
        match self.state {
            Expectation::IdentAfterType => {
                self.state = Expectation::Neutral;
                Err(SyntaxError::OperatorWithoutOperand { index, op: tok.lexeme.to_string() })
            },
            // a minus in front of a number is its sign
            Expectation::OperandAfterOperator
                if tok.is_op("-") && tokens.get(index + 1).is_some_and(|t| t.kind == TokenKind::Number) =>
            {
                Ok(())
            },
            Expectation::OperandAfterOperator => Err(SyntaxError::OperatorWithoutOperand {
                index,
                op: tok.lexeme.to_string(),
            }),
            Expectation::Neutral => {
                self.state = Expectation::OperandAfterOperator;
                self.has_context = false;
                Ok(())
            },
        }
    }

    fn on_punctuation(&mut self, index: usize, tok: &Token) -> Result<(), SyntaxError> {
        let Some(ch) = tok.lexeme.chars().next() else {
            return Ok(());
        };
        match ch {
            ';' => {
                self.state = Expectation::Neutral;
                self.has_context = true;
                Ok(())
            },
            ',' => {
                self.has_context = true;
                Ok(())
            },
            '(' | '{' => {
                if ch == '{' {
                    self.block_opened = true;
                    self.state = Expectation::Neutral;
                }
                if let Some(delim) = Delim::from_open(ch) {
                    self.stack.push(OpenDelim { delim, index });
                }
                self.has_context = true;
                Ok(())
            },
            ')' | '}' => {
                if ch == '}' {
                    self.state = Expectation::Neutral;
                    self.has_context = true;
                } else {
                    self.has_context = false;
                }
                let Some(delim) = Delim::from_close(ch) else {
                    return Ok(());
                };
                match self.stack.last() {
                    Some(top) if top.delim == delim => {
                        self.stack.pop();
                        Ok(())
                    },
                    _ => Err(SyntaxError::UnmatchedClose { index, delim }),
                }
            },
            _ => self.on_stray_symbol(index, tok),
        }
    }

    fn on_stray_symbol(&mut self, index: usize, tok: &Token) -> Result<(), SyntaxError> {
        if self.block_opened {
            return Err(SyntaxError::MissingSemicolonOrUnexpectedSymbol { index, symbol: tok.lexeme.to_string() });
        }
        Ok(())
    }

    fn report(&mut self, tokens: &[Token], err: SyntaxError) {
        tracing::trace!(code = %err.code(), index = err.index(), "syntax error");
        let span = tokens
            .get(err.index())
            .or_else(|| tokens.last())
            .map(|t| t.span())
            .unwrap_or_default();
        let mut diag = Diagnostic::new(err.code(), Severity::Error, span, err.to_string());
        if let SyntaxError::UnmatchedOpen { opened_at, .. } = &err {
            if let Some(open) = tokens.get(*opened_at) {
                diag = diag.with_note(format!("opened at {}", open.span().start));
            }
        }
        self.ctx.borrow_mut().diagnostics.push(diag);
        self.errors.push(err);
    }
}
