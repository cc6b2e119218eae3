// SPDX-License-Identifier: MIT
// Copyright (c) 2023 Kagati Foundation

use std::fmt;

use tacc_types::DeclType;

use crate::ScopeDepth;

/// A declared name.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Symbol {
    /// The name of the symbol.
    pub name: String,

    /// The type given at the declaration.
    pub ty: DeclType,

    /// Depth of the scope that was open when the symbol got declared.
    pub scope_depth: ScopeDepth,

    /// Cleared once the owning scope closes. Closed symbols stay in the
    /// table's history but are never returned by lookups.
    pub(crate) live: bool,
}

impl Symbol {
    pub fn new(name: impl Into<String>, ty: DeclType, scope_depth: ScopeDepth) -> Self {
        Self {
            name: name.into(),
            ty,
            scope_depth,
            live: true,
        }
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}@{}", self.name, self.ty, self.scope_depth)
    }
}
