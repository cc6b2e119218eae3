// SPDX-License-Identifier: MIT
// Copyright (c) 2023 Kagati Foundation

pub mod compiler;

use compiler::{CompileOutput, CompilerPipeline};
use tacc_lexer::LexError;

/// Runs the whole pipeline on `source` with the default configuration.
pub fn compile_source(source: &str) -> Result<CompileOutput<'_>, LexError> {
    CompilerPipeline::new().run(source)
}
