// SPDX-License-Identifier: MIT
// Copyright (c) 2023 Kagati Foundation

mod errors;
mod validator_impl;

pub use errors::*;
pub use validator_impl::*;
