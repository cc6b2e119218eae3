// SPDX-License-Identifier: MIT
// Copyright (c) 2023 Kagati Foundation

pub mod gen_ctx;
mod stmt_to_tac;

pub use stmt_to_tac::*;
