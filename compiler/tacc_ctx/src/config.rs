// SPDX-License-Identifier: MIT
// Copyright (c) 2023 Kagati Foundation

/// Optional upper bounds on per-run storage. `None` means unbounded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Limits {
    pub max_tokens: Option<usize>,
    pub max_symbols: Option<usize>,
    pub max_instructions: Option<usize>,
}

/// Knobs for one compilation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompilerConfig {
    /// Register every identifier the tokenizer sees as a pending symbol.
    pub collect_identifiers: bool,

    /// Stop the syntax validator at its first structural error instead of
    /// collecting all of them.
    pub halt_on_first_syntax_error: bool,

    /// Emit the exit label of an `if` when its block closes. When off, the
    /// labels are handed back as pending exits.
    pub place_exit_labels: bool,

    pub limits: Limits,
}

impl Default for CompilerConfig {
    fn default() -> Self {
        Self {
            collect_identifiers: true,
            halt_on_first_syntax_error: false,
            place_exit_labels: false,
            limits: Limits::default(),
        }
    }
}
