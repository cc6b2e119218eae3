// SPDX-License-Identifier: MIT
// Copyright (c) 2023 Kagati Foundation

use std::fmt;

use tacc_errors::CapacityExceeded;
use thiserror::Error;

use crate::tac_instr::Quad;
use crate::tac_operands::Label;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TacError {
    #[error("code generation stopped: {0}")]
    Capacity(#[from] CapacityExceeded),
}

/// Output of one generation run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TacProgram {
    pub instrs: Vec<Quad>,

    /// Exit labels of `if` blocks that the generator was told not to place
    /// itself. The surrounding pipeline owns putting them down.
    pub pending_exits: Vec<Label>,
}

impl TacProgram {
    pub fn iter(&self) -> impl Iterator<Item = &Quad> {
        self.instrs.iter()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.instrs.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.instrs.is_empty()
    }
}

impl fmt::Display for TacProgram {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for quad in &self.instrs {
            writeln!(f, "{quad}")?;
        }
        Ok(())
    }
}
