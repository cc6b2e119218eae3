// SPDX-License-Identifier: MIT
// Copyright (c) 2023 Kagati Foundation

use std::cell::RefCell;
use std::rc::Rc;

use tacc_ast::{split_statements, Statement};
use tacc_ctx::builder::CompilerCtxBuilder;
use tacc_ctx::{CompilerConfig, CompilerCtx};
use tacc_errors::diagnostic::DiagnosticBag;
use tacc_ir::{TacError, TacProgram};
use tacc_lexer::{LexError, Tokenizer};
use tacc_lowering::TacGenerator;
use tacc_sema::{SemaReport, SemanticAnalyzer};
use tacc_syntax::{SyntaxReport, SyntaxValidator};
use tacc_token::Token;

/// Everything a run produced.
#[derive(Debug)]
pub struct CompileOutput<'src> {
    pub tokens: Vec<Token<'src>>,
    pub statements: Vec<Statement<'src>>,
    pub syntax: SyntaxReport,
    pub sema: SemaReport,

    /// Generated code, or why generation had to stop.
    pub tac: Result<TacProgram, TacError>,
    pub diagnostics: DiagnosticBag,
}

impl CompileOutput<'_> {
    /// Whether any stage found an error. Warnings do not count.
    pub fn has_errors(&self) -> bool {
        !self.syntax.is_ok() || !self.sema.is_clean() || self.tac.is_err() || self.diagnostics.has_errors()
    }
}

/// Drives tokenizer, syntax validator, semantic analyzer and TAC
/// generator over one input.
#[derive(Debug, Clone, Copy, Default)]
pub struct CompilerPipeline {
    pub config: CompilerConfig,
}

impl CompilerPipeline {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: CompilerConfig) -> Self {
        Self { config }
    }

    /// Compiles `source` on a fresh context.
    ///
    /// A fatal lexical error ends the run before any later stage sees the
    /// input. Syntax and semantic findings do not stop code generation;
    /// the generator lowers whatever shapes it recognizes.
    #[tracing::instrument(skip_all, fields(len = source.len()))]
    pub fn run<'src>(&self, source: &'src str) -> Result<CompileOutput<'src>, LexError> {
        let ctx: Rc<RefCell<CompilerCtx>> = Rc::new(RefCell::new(CompilerCtxBuilder::new().config(self.config).build()));

        let mut tokenizer = Tokenizer::new(ctx.clone());
        let tokens = tokenizer.tokenize(source)?;

        let syntax = SyntaxValidator::new(ctx.clone()).validate(&tokens);

        let statements = split_statements(&tokens);
        let sema = SemanticAnalyzer::new(ctx.clone()).analyze(&statements);
        let tac = TacGenerator::new(ctx.clone()).generate(&statements);
        if let Err(err) = &tac {
            tracing::debug!(%err, "code generation stopped");
        }

        let diagnostics = std::mem::take(&mut ctx.borrow_mut().diagnostics);
        Ok(CompileOutput {
            tokens,
            statements,
            syntax,
            sema,
            tac,
            diagnostics,
        })
    }
}
