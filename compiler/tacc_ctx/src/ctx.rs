// SPDX-License-Identifier: MIT
// Copyright (c) 2023 Kagati Foundation

use tacc_errors::diagnostic::DiagnosticBag;
use tacc_symbol::SymbolTable;

use crate::CompilerConfig;

/// State owned by exactly one compilation run.
///
/// Nothing in here is shared between runs; compiling two inputs side by
/// side takes two contexts.
#[derive(Debug, Default)]
pub struct CompilerCtx {
    pub config: CompilerConfig,

    pub diagnostics: DiagnosticBag,

    pub symbols: SymbolTable,
}

impl CompilerCtx {
    pub fn new(config: CompilerConfig, symbols: SymbolTable, diagnostics: DiagnosticBag) -> Self {
        Self {
            config,
            diagnostics,
            symbols,
        }
    }
}
