// SPDX-License-Identifier: MIT
// Copyright (c) 2023 Kagati Foundation

pub mod tac_instr;
pub mod tac_operands;
mod program;

pub use program::*;

/// Label ID
pub type LabelId = usize;

/// Temporary ID
pub type TempId = usize;
