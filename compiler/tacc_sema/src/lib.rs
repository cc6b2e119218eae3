// SPDX-License-Identifier: MIT
// Copyright (c) 2023 Kagati Foundation

mod analyzer;
pub mod errors;

pub use analyzer::*;
pub use errors::{SemaError, SemaFinding, SemaReport};
