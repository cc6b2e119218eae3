// SPDX-License-Identifier: MIT
// Copyright (c) 2023 Kagati Foundation

mod errors;
mod tokenizer_impl;

pub use errors::*;
pub use tokenizer_impl::*;
