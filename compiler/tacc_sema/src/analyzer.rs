// SPDX-License-Identifier: MIT
// Copyright (c) 2023 Kagati Foundation

use std::cell::RefCell;
use std::rc::Rc;

use itertools::Itertools;
use tacc_ast::*;
use tacc_ctx::CompilerCtx;
use tacc_errors::diagnostic::Diagnostic;
use tacc_scope::{ScopeStack, ScopeType};
use tacc_span::{HasSpan, Span};
use tacc_symbol::SymbolError;
use tacc_token::{Keyword, Token};
use tacc_types::{are_types_compatible, DeclType};

use crate::errors::{SemaError, SemaFinding, SemaReport};

/// Statement-by-statement checker for declarations, name resolution and
/// operand types. Nothing it finds stops the run; every finding is
/// recorded and analysis moves on to the next statement.
pub struct SemanticAnalyzer {
    pub ctx: Rc<RefCell<CompilerCtx>>,
    scopes: ScopeStack,
    findings: Vec<SemaFinding>,
}

impl SemanticAnalyzer {
    pub fn new(ctx: Rc<RefCell<CompilerCtx>>) -> Self {
        Self {
            ctx,
            scopes: ScopeStack::new(),
            findings: vec![],
        }
    }

    #[tracing::instrument(skip_all, fields(statements = statements.len()))]
    pub fn analyze(&mut self, statements: &[Statement]) -> SemaReport {
        self.scopes = ScopeStack::new();
        self.findings.clear();

        for stmt in statements {
            self.analyze_statement(stmt);
        }

        tracing::debug!(findings = self.findings.len(), open_scopes = self.scopes.depth(), "semantic analysis done");
        SemaReport {
            findings: std::mem::take(&mut self.findings),
            symbols: self.ctx.borrow().symbols.clone(),
        }
    }

    fn analyze_statement(&mut self, stmt: &Statement) {
        tracing::trace!(line = stmt.line, text = %stmt, "analyzing statement");
        match stmt.classify() {
            Stmt::VarDecl(decl) => self.analyze_var_decl(stmt.line, &decl),
            Stmt::Assign(assign) => self.analyze_assign(stmt.line, &assign),
            Stmt::Control(ctrl) => self.analyze_control(stmt.line, &ctrl),
            Stmt::Printf(printf) => {
                for arg in printf.args.iter().filter(|t| t.is_identifier()) {
                    self.resolve(stmt.line, arg, false);
                }
            },
            Stmt::BlockOpen => {
                self.scopes.push(ScopeType::Block, stmt.line);
            },
            Stmt::BlockClose => self.close_block(stmt),
            Stmt::Unrecognized => {
                let span = stmt.tokens.first().map(|t| t.span()).unwrap_or_default();
                self.report(stmt.line, span, SemaError::UnrecognizedStatement { text: stmt.to_string() });
            },
        }
    }

    fn analyze_var_decl(&mut self, line: usize, decl: &VarDeclStmt) {
        let ty = match decl.decl_type() {
            Ok(ty) => ty,
            Err(unknown) => {
                self.report(line, decl.ty.span(), SemaError::InvalidType { name: unknown.0 });
                return;
            },
        };

        // the initializer is checked before the name exists, so `int x = x;`
        // refers to an outer `x` or to nothing
        if let Some(init) = &decl.init {
            let types: Vec<DeclType> =
                init.iter().filter(|t| t.is_identifier()).filter_map(|tok| self.resolve(line, tok, false)).collect();
            self.check_types(line, decl.name.span(), &types);
        }

        let depth = self.scopes.depth();
        let result = self.ctx.borrow_mut().symbols.declare(decl.name.lexeme, ty, depth).map(|_| ());
        match result {
            Ok(()) => tracing::trace!(name = decl.name.lexeme, %ty, depth, "declared"),
            Err(SymbolError::DuplicateInScope { name, scope_depth, .. }) => {
                self.report(line, decl.name.span(), SemaError::DuplicateDeclaration { name, scope_depth });
            },
            Err(SymbolError::Capacity(cap)) => self.report(line, decl.name.span(), cap.into()),
        }
    }

    fn analyze_assign(&mut self, line: usize, assign: &AssignStmt) {
        let target_ty = self.resolve(line, &assign.target, false);

        // `x += y` reads `x` as well
        let mut types = vec![];
        if assign.compound_op().is_some() {
            types.extend(target_ty);
        }
        for tok in assign.rhs_operands().filter(|t| t.is_identifier()) {
            types.extend(self.resolve(line, tok, false));
        }
        self.check_types(line, assign.target.span(), &types);
    }

    fn analyze_control(&mut self, line: usize, ctrl: &ControlStmt) {
        if ctrl.opens_block {
            let scope_ty = match ctrl.keyword {
                Keyword::If => ScopeType::If,
                Keyword::Else if ctrl.is_else_if => ScopeType::If,
                Keyword::Else => ScopeType::Else,
                _ => ScopeType::Loop,
            };
            self.scopes.push(scope_ty, line);
        }

        let clauses = ctrl.for_clauses();
        let checked: &[Token] = match clauses.as_slice() {
            [init, ..] if ctrl.keyword == Keyword::For => match VarDeclStmt::from_clause(init) {
                Some(decl) => {
                    self.analyze_var_decl(line, &decl);
                    // everything after the init clause and its `;`
                    let skip = (init.len() + 1).min(ctrl.condition().len());
                    &ctrl.condition()[skip..]
                },
                None => ctrl.condition(),
            },
            _ => ctrl.header.as_slice(),
        };
        for name in checked.iter().filter(|t| t.is_identifier()) {
            self.resolve(line, name, true);
        }
    }

    fn close_block(&mut self, stmt: &Statement) {
        let mut ctx = self.ctx.borrow_mut();
        let result = self.scopes.pop_and_close(stmt.line, &mut ctx.symbols);
        drop(ctx);
        if result.is_err() {
            let span = stmt.tokens.first().map(|t| t.span()).unwrap_or_default();
            self.report(stmt.line, span, SemaError::UnmatchedScopeClose);
        }
    }

    /// Looks `tok` up from the current scope outwards. Reports and returns
    /// `None` when no visible declaration exists.
    fn resolve(&mut self, line: usize, tok: &Token, in_condition: bool) -> Option<DeclType> {
        let found = self.ctx.borrow().symbols.lookup(tok.lexeme, self.scopes.depth()).map(|sym| sym.ty);
        if found.is_none() {
            let err = SemaError::UndeclaredVariable { name: tok.lexeme.to_string(), in_condition };
            self.report(line, tok.span(), err);
        }
        found
    }

    /// Checks neighbouring operand types pairwise; reports the first pair
    /// that does not go together.
    fn check_types(&mut self, line: usize, span: Span, types: &[DeclType]) {
        let mismatch = types.iter().tuple_windows().find(|(a, b)| !are_types_compatible(**a, **b));
        if let Some((lhs, rhs)) = mismatch {
            self.report(line, span, SemaError::TypeMismatch { lhs: *lhs, rhs: *rhs });
        }
    }

    fn report(&mut self, line: usize, span: Span, error: SemaError) {
        tracing::trace!(line, code = %error.code(), "semantic finding");
        let diag = Diagnostic::error(error.code(), span, error.to_string());
        self.ctx.borrow_mut().diagnostics.push(diag);
        self.findings.push(SemaFinding { line, error });
    }
}

#[cfg(test)]
mod tests {
    use tacc_ctx::builder::CompilerCtxBuilder;
    use tacc_ctx::Limits;
    use tacc_errors::code::ErrCode;
    use tacc_errors::{CapacityExceeded, Resource};
    use tacc_lexer::Tokenizer;

    use super::*;

    fn analyze_with(ctx: Rc<RefCell<CompilerCtx>>, src: &str) -> SemaReport {
        let mut tokenizer = Tokenizer::new(ctx.clone());
        let tokens = tokenizer.tokenize(src).unwrap();
        let statements = split_statements(&tokens);
        SemanticAnalyzer::new(ctx).analyze(&statements)
    }

    fn analyze(src: &str) -> SemaReport {
        analyze_with(Rc::new(RefCell::new(CompilerCtxBuilder::new().build())), src)
    }

    fn symbol_strings(report: &SemaReport) -> Vec<String> {
        report.symbols.history().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_end_to_end_program_is_clean() {
        let report = analyze("int x = 5;\nint y = 10;\nif x > y {\nx = x + 1;\n}\n");
        assert!(report.is_clean(), "{:?}", report.findings);
        assert_eq!(symbol_strings(&report), vec!["x:int@0", "y:int@0"]);
    }

    #[test]
    fn test_undeclared_assignment_target() {
        let report = analyze("z = 3;");
        assert_eq!(
            report.findings,
            vec![SemaFinding {
                line: 1,
                error: SemaError::UndeclaredVariable { name: "z".to_string(), in_condition: false },
            }]
        );
        assert_eq!(report.findings[0].error.to_string(), "variable 'z' not declared");
    }

    #[test]
    fn test_redeclaration_and_shadowing() {
        let report = analyze("int x = 1;\nint x = 2;\n{\nfloat x = 1.5;\nfloat f = x;\n}\nx = x + 1;");
        assert_eq!(report.findings.len(), 1);
        assert_eq!(report.findings[0].line, 2);
        assert_eq!(
            report.findings[0].error,
            SemaError::DuplicateDeclaration { name: "x".to_string(), scope_depth: 0 }
        );
        assert_eq!(symbol_strings(&report), vec!["x:int@0", "x:float@1", "f:float@1"]);
        // the inner block is closed, only the outer `x` is still visible
        assert_eq!(report.symbols.lookup("x", 0).map(|s| s.ty), Some(DeclType::Int));
        assert!(report.symbols.lookup("f", 0).is_none());
    }

    #[test]
    fn test_invalid_type() {
        let report = analyze("bool b;");
        assert_eq!(report.findings[0].error, SemaError::InvalidType { name: "bool".to_string() });
        assert!(report.symbols.is_empty());
        assert!(analyze("string s = \"hi\";").is_clean());
    }

    #[test]
    fn test_type_mismatch_is_pairwise() {
        assert!(analyze("int a; float b; a = a + b;").is_clean());

        let report = analyze("int a; char c; a = a + c;");
        assert_eq!(report.findings.len(), 1);
        assert_eq!(report.findings[0].error, SemaError::TypeMismatch { lhs: DeclType::Int, rhs: DeclType::Char });

        // char only mixes with nothing, not even another char
        let report = analyze("char c; char d; c = c + d;");
        assert!(matches!(report.findings[0].error, SemaError::TypeMismatch { .. }));
    }

    #[test]
    fn test_initializer_checks_like_an_assignment() {
        assert!(analyze("char a; char b = a;").is_clean());
        assert!(analyze("string s = \"x\"; string t = s;").is_clean());

        let report = analyze("int i; char c; int sum = i + c;");
        assert_eq!(report.findings.len(), 1);
        assert_eq!(report.findings[0].error, SemaError::TypeMismatch { lhs: DeclType::Int, rhs: DeclType::Char });
    }

    #[test]
    fn test_compound_assignment_reads_target() {
        let report = analyze("char c; int i; c += i;");
        assert_eq!(report.findings[0].error, SemaError::TypeMismatch { lhs: DeclType::Char, rhs: DeclType::Int });
        // a plain assignment leaves the target out of the check
        assert!(analyze("char c; int i; c = i;").is_clean());
    }

    #[test]
    fn test_condition_names_must_be_declared() {
        let report = analyze("int x;\nwhile (x < limit) {\n}");
        assert_eq!(
            report.findings,
            vec![SemaFinding {
                line: 2,
                error: SemaError::UndeclaredVariable { name: "limit".to_string(), in_condition: true },
            }]
        );
    }

    #[test]
    fn test_for_init_is_scoped_to_the_loop() {
        let report = analyze("for (int i = 0; i < 3; i += 1) {\nprintf(\"%d\", i);\n}\ni = 1;");
        assert_eq!(report.findings.len(), 1);
        assert_eq!(report.findings[0].line, 4);
        assert_eq!(symbol_strings(&report), vec!["i:int@1"]);
    }

    #[test]
    fn test_unrecognized_statement_and_scope_close() {
        let report = analyze("5;\n}\nint ok;");
        assert_eq!(report.findings.len(), 2);
        assert_eq!(report.findings[0].error, SemaError::UnrecognizedStatement { text: "5 ;".to_string() });
        assert_eq!(report.findings[1], SemaFinding { line: 2, error: SemaError::UnmatchedScopeClose });
        assert_eq!(symbol_strings(&report), vec!["ok:int@0"]);
    }

    #[test]
    fn test_all_findings_surface_in_one_run() {
        let report = analyze("a = 1;\nint b = c;\nif (d == 1) {\n}\nbool e;");
        let lines: Vec<usize> = report.findings.iter().map(|f| f.line).collect();
        assert_eq!(lines, vec![1, 2, 3, 5]);
    }

    #[test]
    fn test_symbol_limit_is_a_finding() {
        let ctx = Rc::new(RefCell::new(
            CompilerCtxBuilder::new()
                .limits(Limits { max_symbols: Some(1), ..Limits::default() })
                .build(),
        ));
        let report = analyze_with(ctx.clone(), "int a; int b;");
        assert_eq!(
            report.findings[0].error,
            SemaError::CapacityExceeded(CapacityExceeded { resource: Resource::Symbols, limit: 1 })
        );
        assert_eq!(ctx.borrow().diagnostics.with_code(ErrCode::CAP9000).count(), 1);
    }

    #[test]
    fn test_placeholders_are_not_declarations() {
        let ctx = Rc::new(RefCell::new(CompilerCtxBuilder::new().build()));
        let report = analyze_with(ctx, "y = 1;\nint x;");
        assert_eq!(report.findings.len(), 1);
        assert!(report.symbols.is_pending("y"));
        assert!(!report.symbols.is_pending("x"));
    }
}
