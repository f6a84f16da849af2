// SPDX-License-Identifier: MIT

//! Guard expression evaluator

use super::ast::{CompareOp, Condition, Literal};
use crate::record::{ApplicationRecord, FieldValue};

/// Evaluate a guard against the record.
///
/// Missing paths compare equal to `null` and to nothing else.
pub fn evaluate(condition: &Condition, record: &ApplicationRecord) -> bool {
    match condition {
        Condition::True => true,
        Condition::False => false,
        Condition::Compare { path, op, right } => {
            let equal = matches(record.get_value(path), right);
            match op {
                CompareOp::Eq => equal,
                CompareOp::NotEq => !equal,
            }
        }
        Condition::OneOf { path, options } => {
            let value = record.get_value(path);
            options.iter().any(|option| matches(value, option))
        }
        Condition::IsSet(path) => record.is_filled(path),
        Condition::And(left, right) => evaluate(left, record) && evaluate(right, record),
        Condition::Or(left, right) => evaluate(left, record) || evaluate(right, record),
        Condition::Not(inner) => !evaluate(inner, record),
    }
}

fn matches(value: Option<&FieldValue>, literal: &Literal) -> bool {
    match (value, literal) {
        (None, Literal::Null) => true,
        (None, _) => false,
        (Some(FieldValue::Text(s)), Literal::String(expected)) => s == expected,
        (Some(FieldValue::Flag(b)), Literal::Boolean(expected)) => b == expected,
        _ => false,
    }
}
