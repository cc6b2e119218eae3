// SPDX-License-Identifier: MIT
// Copyright (c) 2023 Kagati Foundation

use tacc_token::{Keyword, OpKind, Token, TokenKind};
use tacc_types::{DeclType, UnknownType};

use crate::Expr;

/// `T name [= init];`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VarDeclStmt<'src> {
    /// A type keyword, or an identifier spelling a type name (`string`,
    /// or something unknown the analyzer will reject).
    pub ty: Token<'src>,
    pub name: Token<'src>,
    pub init: Option<Vec<Token<'src>>>,
}

impl<'src> VarDeclStmt<'src> {
    /// Reads `T name [= init]` with no terminator, as found in a statement
    /// body or in the first clause of a `for` header.
    pub fn from_clause(tokens: &[Token<'src>]) -> Option<VarDeclStmt<'src>> {
        let is_type_name = |t: &Token| t.kind.as_keyword().is_some_and(|kw| kw.is_type()) || t.is_identifier();
        match tokens {
            [ty, name] if is_type_name(ty) && name.is_identifier() => {
                Some(VarDeclStmt { ty: *ty, name: *name, init: None })
            },
            [ty, name, eq, init @ ..]
                if is_type_name(ty) && name.is_identifier() && eq.is_op_kind(OpKind::Assign) && !init.is_empty() =>
            {
                Some(VarDeclStmt { ty: *ty, name: *name, init: Some(init.to_vec()) })
            },
            _ => None,
        }
    }

    pub fn decl_type(&self) -> Result<DeclType, UnknownType> {
        match self.ty.kind.as_keyword().and_then(|kw| kw.decl_type()) {
            Some(ty) => Ok(ty),
            None => self.ty.lexeme.parse(),
        }
    }

    pub fn init_expr(&self) -> Option<Expr<'src>> {
        self.init.as_deref().and_then(Expr::parse)
    }
}

/// `name = rhs;` or `name op= rhs;`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssignStmt<'src> {
    pub target: Token<'src>,
    pub op: Token<'src>,
    pub rhs: Vec<Token<'src>>,
}

impl<'src> AssignStmt<'src> {
    pub fn rhs_expr(&self) -> Option<Expr<'src>> {
        Expr::parse(&self.rhs)
    }

    /// The arithmetic operator of a compound assignment: `+` for `+=`.
    pub fn compound_op(&self) -> Option<&'src str> {
        match self.op.kind {
            TokenKind::Operator(OpKind::CompoundAssign) => self.op.lexeme.strip_suffix('='),
            _ => None,
        }
    }

    /// Operand tokens of the right-hand side, arithmetic operators dropped.
    pub fn rhs_operands(&self) -> impl Iterator<Item = &Token<'src>> {
        self.rhs.iter().filter(|t| !t.is_op_kind(OpKind::Arithmetic))
    }
}

/// Header of `if`, `else`, `while`, `for` and `do`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControlStmt<'src> {
    pub keyword: Keyword,
    pub is_else_if: bool,

    /// Tokens between the keyword and the trailing `{` or `;`.
    pub header: Vec<Token<'src>>,
    pub opens_block: bool,
}

impl<'src> ControlStmt<'src> {
    /// Header with one pair of enclosing parentheses removed.
    pub fn condition(&self) -> &[Token<'src>] {
        match self.header.as_slice() {
            [open, inner @ .., close] if open.is_punct('(') && close.is_punct(')') => inner,
            other => other,
        }
    }

    /// `a CMP b` when the condition is exactly that.
    pub fn comparison(&self) -> Option<Expr<'src>> {
        Expr::parse_comparison(self.condition())
    }

    /// `init; cond; step` of a `for` header. Empty for other keywords.
    pub fn for_clauses(&self) -> Vec<&[Token<'src>]> {
        if self.keyword != Keyword::For {
            return vec![];
        }
        self.condition().split(|t| t.is_punct(';')).collect()
    }

    /// Whether control flow for this header is lowered to jumps.
    pub fn is_conditional_jump(&self) -> bool {
        (self.keyword == Keyword::If || self.is_else_if) && self.opens_block
    }
}

/// `printf("lit", args...);`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrintfStmt<'src> {
    pub literal: Token<'src>,
    pub args: Vec<Token<'src>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Stmt<'src> {
    VarDecl(VarDeclStmt<'src>),
    Assign(AssignStmt<'src>),
    Control(ControlStmt<'src>),
    Printf(PrintfStmt<'src>),
    BlockOpen,
    BlockClose,
    Unrecognized,
}

impl<'src> Stmt<'src> {
    pub fn classify(tokens: &[Token<'src>]) -> Stmt<'src> {
        match tokens {
            [] => Stmt::Unrecognized,
            [t] if t.is_punct('{') => Stmt::BlockOpen,
            [t] if t.is_punct('}') => Stmt::BlockClose,
            [first, ..] if first.kind.as_keyword().is_some_and(|kw| kw.opens_scope()) => {
                Self::classify_control(tokens)
            },
            [first, ..] if first.is_identifier() && first.lexeme == "printf" => Self::classify_printf(tokens),
            [ty, name, ..] if (ty.kind.as_keyword().is_some_and(|kw| kw.is_type()) || ty.is_identifier())
                && name.is_identifier() =>
            {
                Self::classify_decl(tokens)
            },
            [target, op, ..] if target.is_identifier()
                && (op.is_op_kind(OpKind::Assign) || op.is_op_kind(OpKind::CompoundAssign)) =>
            {
                Self::classify_assign(tokens)
            },
            _ => Stmt::Unrecognized,
        }
    }

    fn classify_control(tokens: &[Token<'src>]) -> Stmt<'src> {
        let Some(keyword) = tokens[0].kind.as_keyword() else {
            return Stmt::Unrecognized;
        };
        let mut rest = &tokens[1..];
        let is_else_if = keyword == Keyword::Else && rest.first().is_some_and(|t| t.is_keyword(Keyword::If));
        if is_else_if {
            rest = &rest[1..];
        }

        let opens_block = rest.last().is_some_and(|t| t.is_punct('{'));
        let header = match rest {
            [inner @ .., last] if last.is_punct('{') || last.is_punct(';') => inner,
            other => other,
        };
        Stmt::Control(ControlStmt { keyword, is_else_if, header: header.to_vec(), opens_block })
    }

    fn classify_printf(tokens: &[Token<'src>]) -> Stmt<'src> {
        match tokens {
            [_, open, lit, rest @ .., close, semi]
                if open.is_punct('(')
                    && lit.kind == TokenKind::StringLiteral
                    && close.is_punct(')')
                    && semi.is_punct(';') =>
            {
                // every argument must be `, operand`
                if rest.len() % 2 != 0 || rest.chunks(2).any(|pair| !pair[0].is_punct(',') || !pair[1].is_operand()) {
                    return Stmt::Unrecognized;
                }
                let args = rest.iter().skip(1).step_by(2).copied().collect();
                Stmt::Printf(PrintfStmt { literal: *lit, args })
            },
            _ => Stmt::Unrecognized,
        }
    }

    fn classify_decl(tokens: &[Token<'src>]) -> Stmt<'src> {
        match tokens {
            [clause @ .., semi] if semi.is_punct(';') => {
                VarDeclStmt::from_clause(clause).map_or(Stmt::Unrecognized, Stmt::VarDecl)
            },
            _ => Stmt::Unrecognized,
        }
    }

    fn classify_assign(tokens: &[Token<'src>]) -> Stmt<'src> {
        match tokens {
            [target, op, rhs @ .., semi] if semi.is_punct(';') && !rhs.is_empty() => {
                Stmt::Assign(AssignStmt { target: *target, op: *op, rhs: rhs.to_vec() })
            },
            _ => Stmt::Unrecognized,
        }
    }
}

#[cfg(test)]
mod tests {
    use tacc_token::TokenPos;

    use super::*;

    fn kw(k: Keyword, s: &str) -> Token<'_> {
        Token::new(TokenKind::Keyword(k), s, TokenPos::default())
    }

    fn id(s: &str) -> Token<'_> {
        Token::new(TokenKind::Identifier, s, TokenPos::default())
    }

    fn num(s: &str) -> Token<'_> {
        Token::new(TokenKind::Number, s, TokenPos::default())
    }

    fn op(kind: OpKind, s: &str) -> Token<'_> {
        Token::new(TokenKind::Operator(kind), s, TokenPos::default())
    }

    fn p(s: &str) -> Token<'_> {
        Token::new(TokenKind::Punctuation, s, TokenPos::default())
    }

    #[test]
    fn test_classify_declarations() {
        let toks = [kw(Keyword::Int, "int"), id("x"), op(OpKind::Assign, "="), num("5"), p(";")];
        let Stmt::VarDecl(decl) = Stmt::classify(&toks) else {
            panic!("expected a declaration");
        };
        assert_eq!(decl.name.lexeme, "x");
        assert_eq!(decl.decl_type(), Ok(DeclType::Int));
        assert!(matches!(decl.init_expr(), Some(Expr::Operand(_))));

        let toks = [id("string"), id("s"), p(";")];
        let Stmt::VarDecl(decl) = Stmt::classify(&toks) else {
            panic!("expected a declaration");
        };
        assert_eq!(decl.decl_type(), Ok(DeclType::Str));
        assert!(decl.init.is_none());

        let toks = [id("bool"), id("b"), p(";")];
        let Stmt::VarDecl(decl) = Stmt::classify(&toks) else {
            panic!("expected a declaration");
        };
        assert!(decl.decl_type().is_err());
    }

    #[test]
    fn test_classify_assignments() {
        let toks = [id("x"), op(OpKind::Assign, "="), id("x"), op(OpKind::Arithmetic, "+"), num("1"), p(";")];
        let Stmt::Assign(assign) = Stmt::classify(&toks) else {
            panic!("expected an assignment");
        };
        assert!(assign.compound_op().is_none());
        assert!(matches!(assign.rhs_expr(), Some(Expr::Binary { .. })));
        assert_eq!(assign.rhs_operands().count(), 2);

        let toks = [id("x"), op(OpKind::CompoundAssign, "*="), num("2"), p(";")];
        let Stmt::Assign(assign) = Stmt::classify(&toks) else {
            panic!("expected an assignment");
        };
        assert_eq!(assign.compound_op(), Some("*"));
    }

    #[test]
    fn test_classify_control_headers() {
        let toks = [kw(Keyword::If, "if"), id("x"), op(OpKind::Comparison, ">"), id("y"), p("{")];
        let Stmt::Control(ctrl) = Stmt::classify(&toks) else {
            panic!("expected a control header");
        };
        assert!(ctrl.opens_block);
        assert!(ctrl.is_conditional_jump());
        assert!(ctrl.comparison().is_some());

        let toks = [
            kw(Keyword::Else, "else"),
            kw(Keyword::If, "if"),
            p("("),
            id("a"),
            op(OpKind::Comparison, "=="),
            num("1"),
            p(")"),
            p("{"),
        ];
        let Stmt::Control(ctrl) = Stmt::classify(&toks) else {
            panic!("expected a control header");
        };
        assert!(ctrl.is_else_if);
        assert_eq!(ctrl.condition().len(), 3);
    }

    #[test]
    fn test_for_clauses() {
        let toks = [
            kw(Keyword::For, "for"),
            p("("),
            kw(Keyword::Int, "int"),
            id("i"),
            op(OpKind::Assign, "="),
            num("0"),
            p(";"),
            id("i"),
            op(OpKind::Comparison, "<"),
            num("3"),
            p(";"),
            id("i"),
            op(OpKind::CompoundAssign, "+="),
            num("1"),
            p(")"),
            p("{"),
        ];
        let Stmt::Control(ctrl) = Stmt::classify(&toks) else {
            panic!("expected a control header");
        };
        let clauses = ctrl.for_clauses();
        assert_eq!(clauses.len(), 3);
        assert_eq!(clauses[0].len(), 4);
        let init = VarDeclStmt::from_clause(clauses[0]).unwrap();
        assert_eq!(init.name.lexeme, "i");
        assert!(VarDeclStmt::from_clause(clauses[1]).is_none());
        assert!(!ctrl.is_conditional_jump());
    }

    #[test]
    fn test_classify_printf() {
        let lit = Token::new(TokenKind::StringLiteral, "x=%d", TokenPos::default());
        let toks = [id("printf"), p("("), lit, p(","), id("x"), p(")"), p(";")];
        let Stmt::Printf(printf) = Stmt::classify(&toks) else {
            panic!("expected printf");
        };
        assert_eq!(printf.literal.lexeme, "x=%d");
        assert_eq!(printf.args.len(), 1);
        assert!(printf.args[0].is_identifier());
    }

    #[test]
    fn test_unrecognized_shapes() {
        assert_eq!(Stmt::classify(&[num("5"), p(";")]), Stmt::Unrecognized);
        assert_eq!(Stmt::classify(&[id("x"), op(OpKind::Assign, "="), num("1")]), Stmt::Unrecognized);
        assert_eq!(Stmt::classify(&[p("}")]), Stmt::BlockClose);
    }
}
