// SPDX-License-Identifier: MIT
// Copyright (c) 2023 Kagati Foundation

mod expr;
mod statement;
mod stmt;

pub use expr::*;
pub use statement::*;
pub use stmt::*;
