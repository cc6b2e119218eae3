// SPDX-License-Identifier: MIT
// Copyright (c) 2023 Kagati Foundation

use std::fmt;

use thiserror::Error;

/// Storage that may carry an upper bound during a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    Tokens,
    Symbols,
    Instructions,
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Resource::Tokens => f.write_str("tokens"),
            Resource::Symbols => f.write_str("symbols"),
            Resource::Instructions => f.write_str("instructions"),
        }
    }
}

/// A configured bound was reached. Storage is never truncated silently;
/// whoever hits the bound hands this back instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("capacity exceeded: more than {limit} {resource}")]
pub struct CapacityExceeded {
    pub resource: Resource,
    pub limit: usize,
}

impl CapacityExceeded {
    /// Fails once `used` has reached `limit`, i.e. when one more item
    /// would not fit.
    pub fn check(resource: Resource, used: usize, limit: Option<usize>) -> Result<(), CapacityExceeded> {
        match limit {
            Some(limit) if used >= limit => Err(CapacityExceeded { resource, limit }),
            _ => Ok(()),
        }
    }
}
