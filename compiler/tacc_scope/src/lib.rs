// SPDX-License-Identifier: MIT
// Copyright (c) 2023 Kagati Foundation

mod scope;
mod stack;

pub use scope::*;
pub use stack::*;
