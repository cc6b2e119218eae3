// SPDX-License-Identifier: MIT
// Copyright (c) 2023 Kagati Foundation

use indexmap::IndexSet;
use tacc_errors::{CapacityExceeded, Resource};
use tacc_types::DeclType;
use thiserror::Error;

use crate::{ScopeDepth, Symbol};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SymbolError {
    #[error("'{name}' is already declared in scope {scope_depth}")]
    DuplicateInScope {
        name: String,
        scope_depth: ScopeDepth,
        existing: DeclType,
    },

    #[error(transparent)]
    Capacity(#[from] CapacityExceeded),
}

/// Scope-stamped registry of declared names.
///
/// Declarations are kept in the order they were made. Closing a scope
/// hides its symbols from lookups without dropping them, so the full
/// declaration history stays available for diagnostics.
#[derive(Debug, Default, Clone)]
pub struct SymbolTable {
    symbols: Vec<Symbol>,

    /// Identifiers the tokenizer saw that no declaration has claimed yet.
    placeholders: IndexSet<String>,

    limit: Option<usize>,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_limit(limit: Option<usize>) -> Self {
        Self {
            limit,
            ..Self::default()
        }
    }

    /// Declares `name` in the scope at `scope_depth`.
    ///
    /// Only a live symbol with the same name at the same depth is a
    /// conflict; shadowing a name from an enclosing scope is fine and the
    /// new symbol wins subsequent lookups.
    pub fn declare(&mut self, name: &str, ty: DeclType, scope_depth: ScopeDepth) -> Result<&Symbol, SymbolError> {
        if let Some(existing) = self.live().find(|s| s.name == name && s.scope_depth == scope_depth) {
            return Err(SymbolError::DuplicateInScope {
                name: name.to_string(),
                scope_depth,
                existing: existing.ty,
            });
        }
        CapacityExceeded::check(Resource::Symbols, self.symbols.len(), self.limit)?;

        self.placeholders.shift_remove(name);
        self.symbols.push(Symbol::new(name, ty, scope_depth));
        Ok(&self.symbols[self.symbols.len() - 1])
    }

    /// Nearest visible declaration of `name` from the scope at `at_scope`
    /// outwards.
    pub fn lookup(&self, name: &str, at_scope: ScopeDepth) -> Option<&Symbol> {
        self.live()
            .filter(|s| s.name == name && s.scope_depth <= at_scope)
            .max_by_key(|s| s.scope_depth)
    }

    /// Hides every symbol declared at `depth`. Returns how many were hidden.
    pub fn close_scope(&mut self, depth: ScopeDepth) -> usize {
        let mut closed = 0;
        for sym in self.symbols.iter_mut().filter(|s| s.live && s.scope_depth == depth) {
            sym.live = false;
            closed += 1;
        }
        closed
    }

    /// Registers an identifier the tokenizer came across, pending a
    /// declaration. Names that are already declared or already pending are
    /// left alone. Returns `true` if a new placeholder was added.
    pub fn observe(&mut self, name: &str) -> bool {
        if self.symbols.iter().any(|s| s.name == name) {
            return false;
        }
        self.placeholders.insert(name.to_string())
    }

    /// Symbols currently visible from some open scope.
    pub fn live(&self) -> impl Iterator<Item = &Symbol> {
        self.symbols.iter().filter(|s| s.live)
    }

    /// Every symbol ever declared, closed scopes included, in declaration order.
    pub fn history(&self) -> impl Iterator<Item = &Symbol> {
        self.symbols.iter()
    }

    /// Identifiers seen in the input that were never declared.
    pub fn placeholders(&self) -> impl Iterator<Item = &str> {
        self.placeholders.iter().map(String::as_str)
    }

    pub fn is_pending(&self, name: &str) -> bool {
        self.placeholders.contains(name)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_declare_and_lookup() {
        let mut table = SymbolTable::new();
        table.declare("x", DeclType::Int, 0).unwrap();
        let sym = table.lookup("x", 0).unwrap();
        assert_eq!(sym.ty, DeclType::Int);
        assert_eq!(sym.scope_depth, 0);
        assert!(table.lookup("y", 0).is_none());
    }

    #[test]
    fn test_same_scope_redeclaration_is_rejected() {
        let mut table = SymbolTable::new();
        table.declare("x", DeclType::Int, 0).unwrap();
        let err = table.declare("x", DeclType::Float, 0).unwrap_err();
        assert_eq!(
            err,
            SymbolError::DuplicateInScope { name: "x".to_string(), scope_depth: 0, existing: DeclType::Int }
        );
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_shadowing_in_nested_scope() {
        let mut table = SymbolTable::new();
        table.declare("x", DeclType::Int, 0).unwrap();
        table.declare("x", DeclType::Float, 1).unwrap();
        assert_eq!(table.lookup("x", 1).unwrap().ty, DeclType::Float);
        // the outer scope does not see the inner declaration
        assert_eq!(table.lookup("x", 0).unwrap().ty, DeclType::Int);
    }

    #[test]
    fn test_close_scope_hides_but_keeps_history() {
        let mut table = SymbolTable::new();
        table.declare("x", DeclType::Int, 0).unwrap();
        table.declare("x", DeclType::Char, 1).unwrap();
        table.declare("y", DeclType::Char, 1).unwrap();
        assert_eq!(table.close_scope(1), 2);

        assert_eq!(table.lookup("x", 1).unwrap().ty, DeclType::Int);
        assert!(table.lookup("y", 1).is_none());
        assert_eq!(table.history().count(), 3);
        assert_eq!(table.live().count(), 1);

        // a closed name can be declared again at the same depth
        assert!(table.declare("y", DeclType::Int, 1).is_ok());
    }

    #[test]
    fn test_placeholders_are_refined_by_declaration() {
        let mut table = SymbolTable::new();
        assert!(table.observe("x"));
        assert!(!table.observe("x"));
        assert!(table.observe("z"));
        assert!(table.lookup("x", 0).is_none());

        table.declare("x", DeclType::Int, 0).unwrap();
        assert!(!table.is_pending("x"));
        assert_eq!(table.placeholders().collect::<Vec<_>>(), vec!["z"]);
        assert!(!table.observe("x"));
    }

    #[test]
    fn test_symbol_limit_is_reported() {
        let mut table = SymbolTable::with_limit(Some(1));
        table.declare("a", DeclType::Int, 0).unwrap();
        let err = table.declare("b", DeclType::Int, 0).unwrap_err();
        assert!(matches!(err, SymbolError::Capacity(CapacityExceeded { resource: Resource::Symbols, limit: 1 })));
    }
}
