// SPDX-License-Identifier: MIT
// Copyright (c) 2023 Kagati Foundation

use tacc_errors::diagnostic::DiagnosticBag;
use tacc_symbol::SymbolTable;

use crate::{CompilerConfig, CompilerCtx, Limits};

#[derive(Debug, Default)]
pub struct CompilerCtxBuilder {
    config: Option<CompilerConfig>,
    symbols: Option<SymbolTable>,
    diagnostics: Option<DiagnosticBag>,
}

impl CompilerCtxBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn config(mut self, config: CompilerConfig) -> Self {
        self.config = Some(config);
        self
    }

    pub fn limits(mut self, limits: Limits) -> Self {
        self.config.get_or_insert_with(CompilerConfig::default).limits = limits;
        self
    }

    pub fn symbols(mut self, symbols: SymbolTable) -> Self {
        self.symbols = Some(symbols);
        self
    }

    pub fn diagnostics(mut self, diags: DiagnosticBag) -> Self {
        self.diagnostics = Some(diags);
        self
    }

    /// Without an explicit symbol table, one is created honouring the
    /// configured symbol limit.
    pub fn build(self) -> CompilerCtx {
        let config = self.config.unwrap_or_default();
        let symbols = self
            .symbols
            .unwrap_or_else(|| SymbolTable::with_limit(config.limits.max_symbols));
        CompilerCtx::new(config, symbols, self.diagnostics.unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_build() {
        let ctx = CompilerCtxBuilder::new().build();
        assert!(ctx.config.collect_identifiers);
        assert!(!ctx.config.place_exit_labels);
        assert!(ctx.symbols.is_empty());
        assert!(ctx.diagnostics.is_empty());
    }

    #[test]
    fn test_symbol_limit_reaches_the_table() {
        let mut ctx = CompilerCtxBuilder::new()
            .limits(Limits { max_symbols: Some(0), ..Limits::default() })
            .build();
        assert!(ctx.symbols.declare("x", tacc_types::DeclType::Int, 0).is_err());
    }
}
