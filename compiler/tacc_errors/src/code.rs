// SPDX-License-Identifier: MIT
// Copyright (c) 2023 Kagati Foundation

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrCode {
    /// Block comment never closed
    LEX0001     = 1,

    /// String literal never closed
    LEX0002     = 2,

    /// Character the language does not use
    LEX0003     = 3,

    /// Missing semicolon
    SYN1000     = 1000,

    /// Closing delimiter without an opener
    SYN1001     = 1001,

    /// Opening delimiter never closed
    SYN1002     = 1002,

    /// Identifier without preceding context
    SYN1003     = 1003,

    /// Operator where an operand was expected
    SYN1004     = 1004,

    /// Stray symbol inside a block
    SYN1005     = 1005,

    /// Symbol not found
    SEM2000     = 2000,

    /// Symbol already defined
    SEM2001     = 2001,

    /// Unknown type name
    SEM2002     = 2002,

    /// Statement of no known shape
    SEM2003     = 2003,

    /// Block closed with no scope open
    SEM2004     = 2004,

    /// Types are not compatible
    TYP3002     = 3002,

    /// Storage bound hit
    CAP9000     = 9000,
}

impl fmt::Display for ErrCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self:?}")
    }
}
