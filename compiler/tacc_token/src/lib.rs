// SPDX-License-Identifier: MIT
// Copyright (c) 2023 Kagati Foundation

mod token;
mod token_kind;

pub use token::*;
pub use token_kind::*;
