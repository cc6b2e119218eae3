// SPDX-License-Identifier: MIT
// Copyright (c) 2023 Kagati Foundation

pub mod capacity;
pub mod code;
pub mod diagnostic;

pub use capacity::{CapacityExceeded, Resource};
