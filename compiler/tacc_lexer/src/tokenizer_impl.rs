// SPDX-License-Identifier: MIT
// Copyright (c) 2023 Kagati Foundation

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use lazy_static::lazy_static;
use tacc_ctx::CompilerCtx;
use tacc_errors::code::ErrCode;
use tacc_errors::diagnostic::{Diagnostic, Severity};
use tacc_errors::{CapacityExceeded, Resource};
use tacc_token::{Keyword, OpKind, Token, TokenKind, TokenPos};

use crate::LexError;

lazy_static! {
    static ref KEYWORDS: HashMap<&'static str, Keyword> = {
        let mut _keys: HashMap<&'static str, Keyword> = HashMap::new();
        _keys.insert("int", Keyword::Int);
        _keys.insert("float", Keyword::Float);
        _keys.insert("char", Keyword::Char);
        _keys.insert("if", Keyword::If);
        _keys.insert("else", Keyword::Else);
        _keys.insert("while", Keyword::While);
        _keys.insert("for", Keyword::For);
        _keys.insert("do", Keyword::Do);
        _keys.insert("return", Keyword::Return);
        _keys.insert("break", Keyword::Break);
        _keys.insert("continue", Keyword::Continue);
        _keys.insert("switch", Keyword::Switch);
        _keys.insert("case", Keyword::Case);
        _keys
    };
}

/// Character-level scanner.
///
/// A tokenizer is bound to one run's context. `start` points it at an
/// input and it then yields tokens lazily through `Iterator`; `tokenize`
/// does the same but collects, failing on the first fatal error.
pub struct Tokenizer<'src> {
    source: &'src str,
    next_char_pos: usize, // byte offset of the next unread char
    line: usize,
    col_counter: usize,
    emitted: usize,
    finished: bool,
    ctx: Rc<RefCell<CompilerCtx>>,
}

impl<'src> Tokenizer<'src> {
    pub fn new(ctx: Rc<RefCell<CompilerCtx>>) -> Self {
        Self {
            source: "",
            next_char_pos: 0,
            line: 1,
            col_counter: 0,
            emitted: 0,
            finished: true,
            ctx,
        }
    }

    /// Resets the scanner onto `input`.
    pub fn start(&mut self, input: &'src str) -> &mut Self {
        self.source = input;
        self.next_char_pos = 0;
        self.line = 1;
        self.col_counter = 0;
        self.emitted = 0;
        self.finished = false;
        self
    }

    #[tracing::instrument(skip_all, fields(len = input.len()))]
    pub fn tokenize(&mut self, input: &'src str) -> Result<Vec<Token<'src>>, LexError> {
        let tokens = self.start(input).collect::<Result<Vec<_>, _>>()?;
        tracing::debug!(count = tokens.len(), "tokenized input");
        Ok(tokens)
    }

    fn get_token(&mut self) -> Result<Option<Token<'src>>, LexError> {
        self.skip_trivia()?;
        let Some(curr) = self.peek() else {
            return Ok(None);
        };

        let limit = self.ctx.borrow().config.limits.max_tokens;
        CapacityExceeded::check(Resource::Tokens, self.emitted, limit)?;

        let pos = self.pos();
        let start = self.next_char_pos;
        let kind = match curr {
            b'0'..=b'9' => return Ok(Some(self.parse_number_from(pos))),
            b'.' if self.peek_at(1).is_some_and(|c| c.is_ascii_digit()) => {
                return Ok(Some(self.parse_number_from(pos)));
            },
            b'_' | b'a'..=b'z' | b'A'..=b'Z' => return Ok(Some(self.parse_word_from(pos))),
            b'"' => return self.parse_string_from(pos).map(Some),
            b'=' => self.operator_with(b'=', OpKind::Assign, OpKind::Comparison),
            b'+' | b'-' | b'*' | b'/' => self.operator_with(b'=', OpKind::Arithmetic, OpKind::CompoundAssign),
            b'<' | b'>' => self.operator_with(b'=', OpKind::Comparison, OpKind::Comparison),
            b'!' => self.operator_with(b'=', OpKind::Logical, OpKind::Comparison),
            b'&' => self.operator_with(b'&', OpKind::Bitwise, OpKind::Logical),
            b'|' => self.operator_with(b'|', OpKind::Bitwise, OpKind::Logical),
            b';' | b'(' | b')' | b'{' | b'}' | b'[' | b']' | b',' | b'.' | b':' | b'?' => {
                self.advance_to_next_char_pos();
                TokenKind::Punctuation
            },
            _ => {
                self.advance_to_next_char_pos();
                let diag = Diagnostic::new(
                    ErrCode::LEX0003,
                    Severity::Warning,
                    tacc_span::Span::point(pos.into()),
                    format!("unknown token: {}", curr as char),
                );
                self.ctx.borrow_mut().diagnostics.push(diag);
                TokenKind::Unknown
            }
        };
        Ok(Some(Token::new(kind, &self.source[start..self.next_char_pos], pos)))
    }

    /// Consumes the current char, plus `second` if it follows, choosing
    /// between the one- and two-character operator kinds.
    fn operator_with(&mut self, second: u8, single: OpKind, double: OpKind) -> TokenKind {
        self.advance_to_next_char_pos();
        if self.peek() == Some(second) {
            self.advance_to_next_char_pos();
            return TokenKind::Operator(double);
        }
        TokenKind::Operator(single)
    }

    fn parse_number_from(&mut self, pos: TokenPos) -> Token<'src> {
        let start = self.next_char_pos;
        let mut period_detected = false;
        while let Some(c) = self.peek() {
            if c.is_ascii_digit() {
                self.advance_to_next_char_pos();
            } else if c == b'.' && !period_detected {
                period_detected = true;
                self.advance_to_next_char_pos();
            } else {
                break;
            }
        }
        Token::new(TokenKind::Number, &self.source[start..self.next_char_pos], pos)
    }

    fn parse_word_from(&mut self, pos: TokenPos) -> Token<'src> {
        let start = self.next_char_pos;
        while self.peek().is_some_and(|c| c.is_ascii_alphanumeric() || c == b'_') {
            self.advance_to_next_char_pos();
        }
        let name = &self.source[start..self.next_char_pos];
        if let Some(key) = KEYWORDS.get(name) {
            return Token::new(TokenKind::Keyword(*key), name, pos);
        }

        let mut ctx = self.ctx.borrow_mut();
        if ctx.config.collect_identifiers {
            ctx.symbols.observe(name);
        }
        Token::new(TokenKind::Identifier, name, pos)
    }

    fn parse_string_from(&mut self, pos: TokenPos) -> Result<Token<'src>, LexError> {
        self.advance_to_next_char_pos(); // skip '"'
        let start = self.next_char_pos;
        while self.peek().is_some_and(|c| c != b'"') {
            self.advance_to_next_char_pos();
        }
        if self.is_at_end() {
            return Err(LexError::UnterminatedStringLiteral { pos });
        }
        let end = self.next_char_pos;
        self.advance_to_next_char_pos(); // skip closing '"'
        Ok(Token::new(TokenKind::StringLiteral, &self.source[start..end], pos))
    }

    /// Skips whitespace, comments and bytes outside printable ASCII.
    fn skip_trivia(&mut self) -> Result<(), LexError> {
        while let Some(c) = self.peek() {
            match c {
                b'/' if self.peek_at(1) == Some(b'/') => self.advance_to_next_line(),
                b'/' if self.peek_at(1) == Some(b'*') => self.skip_block_comment()?,
                c if c.is_ascii_whitespace() || c == 0x0b => self.advance_to_next_char_pos(),
                c if !(32..=126).contains(&c) => self.advance_to_next_char_pos(),
                _ => break,
            }
        }
        Ok(())
    }

    fn skip_block_comment(&mut self) -> Result<(), LexError> {
        let pos = self.pos();
        self.advance_to_next_char_pos();
        self.advance_to_next_char_pos();
        loop {
            match self.peek() {
                None => return Err(LexError::UnterminatedComment { pos }),
                Some(b'*') if self.peek_at(1) == Some(b'/') => {
                    self.advance_to_next_char_pos();
                    self.advance_to_next_char_pos();
                    return Ok(());
                },
                Some(_) => self.advance_to_next_char_pos(),
            }
        }
    }

    fn pos(&self) -> TokenPos {
        TokenPos { line: self.line, column: self.col_counter }
    }

    fn peek(&self) -> Option<u8> {
        self.peek_at(0)
    }

    fn peek_at(&self, offset: usize) -> Option<u8> {
        self.source.as_bytes().get(self.next_char_pos + offset).copied()
    }

    fn is_at_end(&self) -> bool {
        self.next_char_pos >= self.source.len()
    }

    fn advance_to_next_char_pos(&mut self) {
        if let Some(c) = self.peek() {
            self.next_char_pos += 1;
            if c == b'\n' {
                self.line += 1;
                self.col_counter = 0;
            } else {
                self.col_counter += 1;
            }
        }
    }

    /// Leaves the scanner on the newline ending the current line.
    fn advance_to_next_line(&mut self) {
        while self.peek().is_some_and(|c| c != b'\n') {
            self.advance_to_next_char_pos();
        }
    }
}

impl<'src> Iterator for Tokenizer<'src> {
    type Item = Result<Token<'src>, LexError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        match self.get_token() {
            Ok(Some(token)) => {
                self.emitted += 1;
                tracing::trace!(kind = %token.kind, lexeme = token.lexeme, line = token.pos.line, "token");
                Some(Ok(token))
            },
            Ok(None) => {
                self.finished = true;
                None
            },
            Err(err) => {
                self.finished = true;
                Some(Err(err))
            }
        }
    }
}
