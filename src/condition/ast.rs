// SPDX-License-Identifier: MIT

//! Syntax tree for guard expressions

use std::fmt;

/// A guard expression
#[derive(Debug, Clone, PartialEq)]
pub enum Condition {
    /// `path == literal` / `path != literal`
    Compare {
        path: String,
        op: CompareOp,
        right: Literal,
    },
    /// `path in [a, b, ...]`
    OneOf { path: String, options: Vec<Literal> },
    /// `path is set`: the path holds a non-blank value
    IsSet(String),
    And(Box<Condition>, Box<Condition>),
    Or(Box<Condition>, Box<Condition>),
    Not(Box<Condition>),
    True,
    False,
}

/// Comparison operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareOp {
    Eq,
    NotEq,
}

/// Literal values in expressions
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Literal {
    String(String),
    Boolean(bool),
    Null,
}

impl fmt::Display for CompareOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CompareOp::Eq => write!(f, "=="),
            CompareOp::NotEq => write!(f, "!="),
        }
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Literal::String(s) => write!(f, "'{}'", s),
            Literal::Boolean(b) => write!(f, "{}", b),
            Literal::Null => write!(f, "null"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(CompareOp::Eq.to_string(), "==");
        assert_eq!(CompareOp::NotEq.to_string(), "!=");
        assert_eq!(Literal::String("eligible".into()).to_string(), "'eligible'");
        assert_eq!(Literal::Boolean(true).to_string(), "true");
        assert_eq!(Literal::Null.to_string(), "null");
    }
}
