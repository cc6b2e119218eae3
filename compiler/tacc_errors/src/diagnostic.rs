// SPDX-License-Identifier: MIT
// Copyright (c) 2023 Kagati Foundation

use std::fmt;

use tacc_span::Span;

use crate::code::ErrCode;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
}

#[derive(Debug, Clone)]
pub struct Diagnostic {
    pub code:               Option<ErrCode>,
    pub severity:           Severity,
    pub primary_span:       Span,
    pub message:            String,
    pub notes:              Vec<String>,
}

impl Diagnostic {
    pub fn new(code: ErrCode, severity: Severity, span: Span, msg: impl Into<String>) -> Self {
        Self {
            code: Some(code),
            severity,
            primary_span: span,
            message: msg.into(),
            notes: vec![],
        }
    }

    pub fn error(code: ErrCode, span: Span, msg: impl Into<String>) -> Self {
        Self::new(code, Severity::Error, span, msg)
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }

    pub fn is_error(&self) -> bool {
        matches!(self.severity, Severity::Error)
    }

    /// Renders the diagnostic against the input it was produced from, with
    /// the offending line and a caret underline.
    pub fn render(&self, source: &str) -> String {
        let line_num = self.primary_span.start.line;
        let col_num = self.primary_span.start.column;
        let source_line = source.lines().nth(line_num.saturating_sub(1)).unwrap_or("");

        let mut out = String::new();
        match self.code {
            Some(code) => out.push_str(&format!("{:?}[{code}]: {}\n", self.severity, self.message)),
            None => out.push_str(&format!("{:?}: {}\n", self.severity, self.message)),
        }
        out.push_str(&format!(" --> {}:{}\n", line_num, col_num + 1));
        out.push_str("  |\n");
        out.push_str(&format!("{: >4} | {}\n", line_num, source_line));
        out.push_str(&format!("     | {}{}", " ".repeat(col_num), "^".repeat(self.primary_span.width())));
        for note in &self.notes {
            out.push_str(&format!("\n     = note: {note}"));
        }
        out
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.primary_span.start, self.message)
    }
}

#[derive(Debug, Default, Clone)]
pub struct DiagnosticBag {
    diagnostics: Vec<Diagnostic>,
}

impl DiagnosticBag {
    pub fn push(&mut self, diag: Diagnostic) {
        self.diagnostics.push(diag);
    }

    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(Diagnostic::is_error)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter()
    }

    pub fn with_code(&self, code: ErrCode) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter().filter(move |d| d.code == Some(code))
    }

    pub fn render_all(&self, source: &str) -> Vec<String> {
        self.diagnostics.iter().map(|d| d.render(source)).collect()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.diagnostics.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }
}
