// SPDX-License-Identifier: MIT
// Copyright (c) 2023 Kagati Foundation

use std::cell::RefCell;
use std::rc::Rc;

use itertools::Itertools;
use tacc_ast::*;
use tacc_ctx::CompilerCtx;
use tacc_errors::{CapacityExceeded, Resource};
use tacc_ir::tac_instr::Quad;
use tacc_ir::tac_operands::{ArithOp, CmpOp};
use tacc_ir::{TacError, TacProgram};

use crate::gen_ctx::GenCtx;

/// Best-effort three-address code generator.
///
/// Works over whatever statements it is given, validated or not. Shapes
/// it can lower are lowered; everything else is skipped without a word,
/// since reporting is the analyzers' job.
pub struct TacGenerator {
    ctx: Rc<RefCell<CompilerCtx>>,
    gen_ctx: GenCtx,
    program: TacProgram,
}

impl TacGenerator {
    pub fn new(ctx: Rc<RefCell<CompilerCtx>>) -> Self {
        Self {
            ctx,
            gen_ctx: GenCtx::new(),
            program: TacProgram::default(),
        }
    }

    /// Lowers `statements`. Temporaries and labels start over from `t0`
    /// and `L0` on every call.
    #[tracing::instrument(skip_all, fields(statements = statements.len()))]
    pub fn generate(&mut self, statements: &[Statement]) -> Result<TacProgram, TacError> {
        self.gen_ctx = GenCtx::new();
        self.program = TacProgram::default();

        for stmt in statements {
            self.lower_statement(stmt)?;
        }

        // exits of blocks that never closed go at the very end
        if self.place_exit_labels() {
            for label in self.gen_ctx.unclosed_exits() {
                self.emit(Quad::label(label))?;
            }
        }

        let program = std::mem::take(&mut self.program);
        tracing::debug!(instrs = program.len(), pending = program.pending_exits.len(), "generated TAC");
        Ok(program)
    }

    fn place_exit_labels(&self) -> bool {
        self.ctx.borrow().config.place_exit_labels
    }

    fn lower_statement(&mut self, stmt: &Statement) -> Result<(), TacError> {
        match stmt.classify() {
            Stmt::VarDecl(decl) => self.lower_var_decl(&decl),
            Stmt::Assign(assign) => self.lower_assign(&assign),
            Stmt::Control(ctrl) => self.lower_control(&ctrl),
            Stmt::Printf(printf) => {
                let args = printf.args.iter().map(|t| t.lexeme).join(", ");
                self.emit(Quad::printf(printf.literal.lexeme, args))
            },
            Stmt::BlockOpen => {
                self.gen_ctx.enter_block(None);
                Ok(())
            },
            Stmt::BlockClose => match self.gen_ctx.exit_block() {
                Some(Some(exit)) if self.place_exit_labels() => self.emit(Quad::label(exit)),
                _ => Ok(()),
            },
            Stmt::Unrecognized => {
                tracing::trace!(line = stmt.line, "skipped");
                Ok(())
            },
        }
    }

    fn lower_var_decl(&mut self, decl: &VarDeclStmt) -> Result<(), TacError> {
        let name = decl.name.lexeme;
        match (&decl.init, decl.init_expr()) {
            (None, _) => self.emit(Quad::assign("0", name)),
            (Some(_), Some(expr)) => self.lower_expr_into(expr, name),
            (Some(_), None) => Ok(()),
        }
    }

    fn lower_assign(&mut self, assign: &AssignStmt) -> Result<(), TacError> {
        let target = assign.target.lexeme;
        let Some(expr) = assign.rhs_expr() else {
            return Ok(());
        };

        let Some(compound) = assign.compound_op() else {
            return self.lower_expr_into(expr, target);
        };
        // `x op= e` is `t = x op e; x = t`
        match (ArithOp::from_lexeme(compound), expr) {
            (Some(op), Expr::Operand(rhs)) => {
                let temp = self.gen_ctx.next_temp();
                self.emit(Quad::arith(op, target, rhs.to_string(), temp))?;
                self.emit(Quad::assign(temp.to_string(), target))
            },
            _ => Ok(()),
        }
    }

    /// `dest = operand`, or `t = a op b; dest = t` for a binary expression.
    fn lower_expr_into(&mut self, expr: Expr, dest: &str) -> Result<(), TacError> {
        match expr {
            Expr::Operand(operand) => self.emit(Quad::assign(operand.to_string(), dest)),
            Expr::Binary { lhs, op, rhs } => {
                let Some(op) = ArithOp::from_lexeme(op.lexeme) else {
                    return Ok(());
                };
                let temp = self.gen_ctx.next_temp();
                self.emit(Quad::arith(op, lhs.to_string(), rhs.to_string(), temp))?;
                self.emit(Quad::assign(temp.to_string(), dest))
            },
        }
    }

    fn lower_control(&mut self, ctrl: &ControlStmt) -> Result<(), TacError> {
        let jump = match ctrl.comparison() {
            Some(Expr::Binary { lhs, op, rhs }) if ctrl.is_conditional_jump() => {
                CmpOp::from_lexeme(op.lexeme).map(|cmp| (lhs, cmp, rhs))
            },
            _ => None,
        };

        let Some((lhs, cmp, rhs)) = jump else {
            if ctrl.opens_block {
                self.gen_ctx.enter_block(None);
            }
            return Ok(());
        };

        let true_label = self.gen_ctx.get_next_label();
        let end_label = self.gen_ctx.get_next_label();
        self.emit(Quad::cond_jump(cmp, lhs.to_string(), rhs.to_string(), true_label))?;
        self.emit(Quad::goto(end_label))?;
        self.emit(Quad::label(true_label))?;

        self.gen_ctx.enter_block(Some(end_label));
        if !self.place_exit_labels() {
            self.program.pending_exits.push(end_label);
        }
        Ok(())
    }

    fn emit(&mut self, quad: Quad) -> Result<(), TacError> {
        let limit = self.ctx.borrow().config.limits.max_instructions;
        CapacityExceeded::check(Resource::Instructions, self.program.len(), limit)?;
        debug_assert!(quad.operand_count() <= 2, "{quad} has more than two operands");
        tracing::trace!(%quad, "emit");
        self.program.instrs.push(quad);
        Ok(())
    }
}
