// SPDX-License-Identifier: MIT
// Copyright (c) 2023 Kagati Foundation

use tacc_symbol::ScopeDepth;

#[derive(Debug, Default, Eq, PartialEq, Clone, Copy)]
pub enum ScopeType {
    If,
    Else,
    Loop,

    /// Bare `{ ... }`
    #[default]
    Block,
}

/// Marker for one opened block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScopeMarker {
    pub ty: ScopeType,

    /// Depth the block's body lives at.
    pub depth: ScopeDepth,

    /// Line of the statement that opened the block.
    pub opened_at: usize,
}
