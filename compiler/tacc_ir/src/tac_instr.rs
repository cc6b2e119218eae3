// SPDX-License-Identifier: MIT
// Copyright (c) 2023 Kagati Foundation

use std::fmt;

use crate::tac_operands::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TacOp {
    /// `result = arg1`
    Assign,

    /// `result = arg1 op arg2`
    Arith(ArithOp),

    /// `if arg1 cmp arg2 goto result`
    CondJump(CmpOp),

    /// `goto result`
    Goto,

    /// `label result`
    Label,

    /// `printf("arg1", arg2)`; `arg2` holds the comma-joined arguments,
    /// if any.
    Printf,
}

impl TacOp {
    /// The textual opcode: the operator itself for arithmetic, otherwise
    /// one of `=`, `if`, `goto`, `label`, `printf`.
    pub fn as_str(&self) -> &'static str {
        match self {
            TacOp::Assign => "=",
            TacOp::Arith(op) => op.as_str(),
            TacOp::CondJump(_) => "if",
            TacOp::Goto => "goto",
            TacOp::Label => "label",
            TacOp::Printf => "printf",
        }
    }
}

/// One three-address instruction. Unused fields are empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Quad {
    pub op: TacOp,
    pub arg1: String,
    pub arg2: String,
    pub result: String,
}

impl Quad {
    fn new(op: TacOp, arg1: impl Into<String>, arg2: impl Into<String>, result: impl Into<String>) -> Self {
        Self {
            op,
            arg1: arg1.into(),
            arg2: arg2.into(),
            result: result.into(),
        }
    }

    pub fn assign(src: impl Into<String>, dest: impl Into<String>) -> Self {
        Self::new(TacOp::Assign, src, "", dest)
    }

    pub fn arith(op: ArithOp, lhs: impl Into<String>, rhs: impl Into<String>, dest: Temp) -> Self {
        Self::new(TacOp::Arith(op), lhs, rhs, dest.to_string())
    }

    pub fn cond_jump(cmp: CmpOp, lhs: impl Into<String>, rhs: impl Into<String>, target: Label) -> Self {
        Self::new(TacOp::CondJump(cmp), lhs, rhs, target.to_string())
    }

    pub fn goto(target: Label) -> Self {
        Self::new(TacOp::Goto, "", "", target.to_string())
    }

    pub fn label(label: Label) -> Self {
        Self::new(TacOp::Label, "", "", label.to_string())
    }

    pub fn printf(literal: impl Into<String>, args: impl Into<String>) -> Self {
        Self::new(TacOp::Printf, literal, args, "")
    }

    /// Number of source operands. Never more than two.
    pub fn operand_count(&self) -> usize {
        [&self.arg1, &self.arg2].iter().filter(|a| !a.is_empty()).count()
    }
}

impl fmt::Display for Quad {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.op {
            TacOp::Assign => write!(f, "{} = {}", self.result, self.arg1),
            TacOp::Arith(op) => write!(f, "{} = {} {op} {}", self.result, self.arg1, self.arg2),
            TacOp::CondJump(cmp) => write!(f, "if {} {cmp} {} goto {}", self.arg1, self.arg2, self.result),
            TacOp::Goto => write!(f, "goto {}", self.result),
            TacOp::Label => write!(f, "label {}", self.result),
            TacOp::Printf if self.arg2.is_empty() => write!(f, "printf(\"{}\")", self.arg1),
            TacOp::Printf => write!(f, "printf(\"{}\", {})", self.arg1, self.arg2),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quad_rendering() {
        assert_eq!(Quad::assign("5", "x").to_string(), "x = 5");
        assert_eq!(Quad::arith(ArithOp::Add, "x", "1", Temp(0)).to_string(), "t0 = x + 1");
        assert_eq!(Quad::cond_jump(CmpOp::Gt, "x", "y", Label(0)).to_string(), "if x > y goto L0");
        assert_eq!(Quad::goto(Label(1)).to_string(), "goto L1");
        assert_eq!(Quad::label(Label(0)).to_string(), "label L0");
        assert_eq!(Quad::printf("hi", "").to_string(), "printf(\"hi\")");
        assert_eq!(Quad::printf("%d %d", "a, b").to_string(), "printf(\"%d %d\", a, b)");
    }

    #[test]
    fn test_binary_quad_fields() {
        let quad = Quad::arith(ArithOp::Mul, "a", "b", Temp(3));
        assert_eq!(quad.op.as_str(), "*");
        assert_eq!((quad.arg1.as_str(), quad.arg2.as_str(), quad.result.as_str()), ("a", "b", "t3"));
        assert_eq!(quad.operand_count(), 2);
        assert_eq!(Quad::goto(Label(2)).operand_count(), 0);
    }

    #[test]
    fn test_operator_lexemes() {
        assert_eq!(ArithOp::from_lexeme("/"), Some(ArithOp::Div));
        assert_eq!(CmpOp::from_lexeme("<="), Some(CmpOp::Le));
        assert!(CmpOp::from_lexeme("=").is_none());
        assert!(ArithOp::from_lexeme("%").is_none());
    }
}
