// SPDX-License-Identifier: MIT
// Copyright (c) 2023 Kagati Foundation

use tacc_symbol::{ScopeDepth, SymbolTable};
use thiserror::Error;

use crate::scope::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ScopeError {
    #[error("block closed on line {line} but no block is open")]
    UnmatchedClose { line: usize },
}

/// Depth counter plus the stack of blocks that are currently open.
///
/// The depth equals the number of open blocks and never goes below zero;
/// closing with nothing open is an error value, not a panic.
#[derive(Debug, Default, Clone)]
pub struct ScopeStack {
    stack: Vec<ScopeMarker>,
}

impl ScopeStack {
    pub fn new() -> Self {
        Self::default()
    }

    /// Depth new declarations land at.
    pub fn depth(&self) -> ScopeDepth {
        self.stack.len()
    }

    /// Opens a block. Returns the depth of its body.
    pub fn push(&mut self, ty: ScopeType, line: usize) -> ScopeDepth {
        let depth = self.stack.len() + 1;
        self.stack.push(ScopeMarker { ty, depth, opened_at: line });
        depth
    }

    /// Closes the innermost block and returns its marker.
    pub fn pop(&mut self, line: usize) -> Result<ScopeMarker, ScopeError> {
        self.stack.pop().ok_or(ScopeError::UnmatchedClose { line })
    }

    /// Closes the innermost block and hides everything declared in it.
    pub fn pop_and_close(&mut self, line: usize, symbols: &mut SymbolTable) -> Result<ScopeMarker, ScopeError> {
        let marker = self.pop(line)?;
        symbols.close_scope(marker.depth);
        Ok(marker)
    }
}
