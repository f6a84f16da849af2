// SPDX-License-Identifier: MIT

//! The application record and its nested field binder
//!
//! This module provides:
//! - `RecordNode` / `FieldValue` - tagged tree nodes (branch vs leaf)
//! - `FieldPath` - a validated dotted path such as `tier1.personal.surname`
//! - `ApplicationRecord` - the accumulating record with pure `set` and `get`
//! - `Recommendation` - the examining officer's outcome for a tier

mod node;
mod path;
mod recommendation;
mod store;

pub use node::{FieldValue, RecordNode};
pub use path::FieldPath;
pub use recommendation::{Recommendation, Tier};
pub use store::ApplicationRecord;
