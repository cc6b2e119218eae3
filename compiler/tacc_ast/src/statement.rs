// SPDX-License-Identifier: MIT
// Copyright (c) 2023 Kagati Foundation

use std::fmt;

use itertools::Itertools;
use tacc_token::{Token, TokenKind};

use crate::Stmt;

/// The tokens of one statement, terminator included.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Statement<'src> {
    /// Line of the statement's first token.
    pub line: usize,
    pub tokens: Vec<Token<'src>>,
}

impl<'src> Statement<'src> {
    pub fn last(&self) -> Option<&Token<'src>> {
        self.tokens.last()
    }

    pub fn classify(&self) -> Stmt<'src> {
        Stmt::classify(&self.tokens)
    }
}

impl fmt::Display for Statement<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = self
            .tokens
            .iter()
            .map(|t| match t.kind {
                TokenKind::StringLiteral => format!("\"{}\"", t.lexeme),
                _ => t.lexeme.to_string(),
            })
            .join(" ");
        f.write_str(&text)
    }
}

/// Cuts a token stream into statements.
///
/// A statement ends at a `;` outside parentheses (so a `for` header stays
/// whole), at a `{`, or is a lone `}`. Whatever trails the last terminator
/// becomes a final, unterminated statement.
pub fn split_statements<'src>(tokens: &[Token<'src>]) -> Vec<Statement<'src>> {
    let mut statements = vec![];
    let mut current: Vec<Token<'src>> = vec![];
    let mut paren_depth = 0usize;

    let mut flush = |current: &mut Vec<Token<'src>>| {
        if let Some(first) = current.first() {
            statements.push(Statement { line: first.pos.line, tokens: std::mem::take(current) });
        }
    };

    for tok in tokens {
        if tok.is_punct('}') {
            flush(&mut current);
            current.push(*tok);
            flush(&mut current);
            paren_depth = 0;
            continue;
        }

        current.push(*tok);
        if tok.is_punct('(') {
            paren_depth += 1;
        } else if tok.is_punct(')') {
            paren_depth = paren_depth.saturating_sub(1);
        } else if tok.is_punct('{') || (tok.is_punct(';') && paren_depth == 0) {
            flush(&mut current);
            paren_depth = 0;
        }
    }
    flush(&mut current);
    statements
}

#[cfg(test)]
mod tests {
    use tacc_token::{Keyword, OpKind, TokenPos};

    use super::*;

    /// Whitespace-separated mini lexer good enough for splitter tests.
    fn lex(src: &str) -> Vec<Token<'_>> {
        let mut tokens = vec![];
        for (line_idx, line) in src.lines().enumerate() {
            for word in line.split_whitespace() {
                let kind = match word {
                    "int" => TokenKind::Keyword(Keyword::Int),
                    "if" => TokenKind::Keyword(Keyword::If),
                    "for" => TokenKind::Keyword(Keyword::For),
                    "=" => TokenKind::Operator(OpKind::Assign),
                    "+" | "++" => TokenKind::Operator(OpKind::Arithmetic),
                    "<" | ">" => TokenKind::Operator(OpKind::Comparison),
                    ";" | "{" | "}" | "(" | ")" => TokenKind::Punctuation,
                    w if w.chars().all(|c| c.is_ascii_digit()) => TokenKind::Number,
                    _ => TokenKind::Identifier,
                };
                tokens.push(Token::new(kind, word, TokenPos { line: line_idx + 1, column: 0 }));
            }
        }
        tokens
    }

    #[test]
    fn test_split_on_terminators() {
        let tokens = lex("int x = 5 ;\nif x > 1 {\nx = x + 1 ;\n}");
        let stmts = split_statements(&tokens);
        assert_eq!(stmts.len(), 4);
        assert_eq!(stmts[0].to_string(), "int x = 5 ;");
        assert!(matches!(stmts[1].classify(), Stmt::Control(ctrl) if ctrl.keyword == Keyword::If && ctrl.opens_block));
        assert_eq!(stmts[1].line, 2);
        assert!(matches!(stmts[3].classify(), Stmt::BlockClose));
        assert_eq!(stmts[3].line, 4);
    }

    #[test]
    fn test_for_header_stays_whole() {
        let tokens = lex("for ( i = 0 ; i < 3 ; i ++ ) {");
        let stmts = split_statements(&tokens);
        assert_eq!(stmts.len(), 1);
        assert!(stmts[0].last().is_some_and(|t| t.is_punct('{')));
    }

    #[test]
    fn test_close_brace_splits_off_preceding_tokens() {
        let tokens = lex("x = 1 }");
        let stmts = split_statements(&tokens);
        assert_eq!(stmts.len(), 2);
        assert!(matches!(stmts[0].classify(), Stmt::Unrecognized));
        assert!(matches!(stmts[1].classify(), Stmt::BlockClose));
    }

    #[test]
    fn test_trailing_tokens_form_unterminated_statement() {
        let tokens = lex("x = 1 ;\ny = 2");
        let stmts = split_statements(&tokens);
        assert_eq!(stmts.len(), 2);
        assert_eq!(stmts[1].line, 2);
        assert!(!stmts[1].last().is_some_and(|t| t.is_punct(';')));
    }
}
