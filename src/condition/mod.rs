// SPDX-License-Identifier: MIT

//! Guard expressions over the application record
//!
//! Guards decide which wizard actions are on offer and which form fields or
//! certificate rows are shown. Examples:
//! - `tier1.officerReport.recommendation == 'eligible'`
//! - `tier2.exams.ecg.result == 'abnormal'`
//! - `tier2.recommendation.status in ['ineligible', 'deferred', 'pending']`
//! - `tier1.personal.email is set and not consent.agreed == true`

mod ast;
mod evaluator;
mod parser;

pub use ast::{CompareOp, Condition, Literal};
pub use evaluator::evaluate;
pub use parser::parse;

use crate::error::ConditionError;
use crate::record::ApplicationRecord;

/// Parse `source` and evaluate it against `record` in one go
pub fn check(source: &str, record: &ApplicationRecord) -> Result<bool, ConditionError> {
    let condition = parse(source)?;
    Ok(evaluate(&condition, record))
}
