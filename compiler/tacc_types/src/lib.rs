/*
MIT License

Copyright (c) 2023 Kagati Foundation

Permission is hereby granted, free of charge, to any person obtaining a copy
of this software and associated documentation files (the "Software"), to deal
in the Software without restriction, including without limitation the rights
to use, copy, modify, merge, publish, distribute, sublicense, and/or sell
copies of the Software, and to permit persons to whom the Software is
furnished to do so, subject to the following conditions:

The above copyright notice and this permission notice shall be included in all
copies or substantial portions of the Software.

THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE
SOFTWARE.
*/

use std::collections::HashMap;
use std::fmt::Display;
use std::str::FromStr;

use lazy_static::lazy_static;

/// Types a variable can be declared with.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum DeclType {
    /// `int`
    Int,

    /// `float`
    Float,

    /// `char`
    Char,

    /// `string`. Not a reserved word; it is recognized by name when it
    /// shows up in the type position of a declaration.
    Str,
}

lazy_static! {
    static ref TYPE_NAMES: HashMap<&'static str, DeclType> = {
        let mut names: HashMap<&'static str, DeclType> = HashMap::new();
        names.insert("int", DeclType::Int);
        names.insert("float", DeclType::Float);
        names.insert("char", DeclType::Char);
        names.insert("string", DeclType::Str);
        names
    };
}

/// Returned when a word in type position names none of the known types.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownType(pub String);

impl FromStr for DeclType {
    type Err = UnknownType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TYPE_NAMES.get(s).copied().ok_or_else(|| UnknownType(s.to_string()))
    }
}

impl Display for DeclType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            DeclType::Int => "int",
            DeclType::Float => "float",
            DeclType::Char => "char",
            DeclType::Str => "string",
        };
        write!(f, "{name}")
    }
}

impl DeclType {
    pub fn is_numeric(&self) -> bool {
        matches!(self, DeclType::Int | DeclType::Float)
    }
}

/// Whether two operands of the given types may appear side by side in an
/// arithmetic expression.
///
/// `int` and `float` mix freely through implicit widening. Every other
/// pairing, including `char` with `char`, is rejected.
pub fn are_types_compatible(a: DeclType, b: DeclType) -> bool {
    a.is_numeric() && b.is_numeric()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_names_parse() {
        assert_eq!("int".parse::<DeclType>(), Ok(DeclType::Int));
        assert_eq!("float".parse::<DeclType>(), Ok(DeclType::Float));
        assert_eq!("char".parse::<DeclType>(), Ok(DeclType::Char));
        assert_eq!("string".parse::<DeclType>(), Ok(DeclType::Str));
        assert_eq!("double".parse::<DeclType>(), Err(UnknownType("double".to_string())));
    }

    #[test]
    fn test_type_compatibility_table() {
        assert!(are_types_compatible(DeclType::Int, DeclType::Int));
        assert!(are_types_compatible(DeclType::Float, DeclType::Float));
        assert!(are_types_compatible(DeclType::Int, DeclType::Float));
        assert!(are_types_compatible(DeclType::Float, DeclType::Int));
        assert!(!are_types_compatible(DeclType::Char, DeclType::Int));
        assert!(!are_types_compatible(DeclType::Char, DeclType::Char));
        assert!(!are_types_compatible(DeclType::Str, DeclType::Float));
    }

    #[test]
    fn test_display_round_trips_through_from_str() {
        for ty in [DeclType::Int, DeclType::Float, DeclType::Char, DeclType::Str] {
            assert_eq!(ty.to_string().parse::<DeclType>(), Ok(ty));
        }
    }
}
