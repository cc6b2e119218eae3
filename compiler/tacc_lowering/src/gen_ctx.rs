// SPDX-License-Identifier: MIT
// Copyright (c) 2023 Kagati Foundation

use tacc_ir::tac_operands::{Label, Temp};
use tacc_ir::{LabelId, TempId};

/// Per-run generation state.
#[derive(Debug, Default)]
pub struct GenCtx {
    /// Counter for generating fresh temporaries.
    pub temp_counter: TempId,

    /// Counter for generating unique labels.
    pub next_label: LabelId,

    /// One entry per open block. Blocks opened by an `if` carry the label
    /// their exit jumps to.
    block_stack: Vec<Option<Label>>,
}

impl GenCtx {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_temp(&mut self) -> Temp {
        let nt = self.temp_counter;
        self.temp_counter += 1;
        Temp(nt)
    }

    pub fn get_next_label(&mut self) -> Label {
        let current = self.next_label;
        self.next_label += 1;
        Label(current)
    }

    pub fn enter_block(&mut self, exit: Option<Label>) {
        self.block_stack.push(exit);
    }

    /// Leaves the innermost block. `None` if no block was open.
    pub fn exit_block(&mut self) -> Option<Option<Label>> {
        self.block_stack.pop()
    }

    /// Drains the exit labels of blocks still open, innermost first.
    pub fn unclosed_exits(&mut self) -> Vec<Label> {
        self.block_stack.drain(..).rev().flatten().collect()
    }
}
