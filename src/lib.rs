// SPDX-License-Identifier: MIT

//! Recruit medical examination wizard
//!
//! Collects a Tier 1 exam, issues a Tier 1 certificate, records consent,
//! collects a Tier 2 exam and issues the final certificate.

pub mod certificate;
pub mod condition;
pub mod config;
pub mod error;
pub mod forms;
pub mod print;
pub mod record;
pub mod wizard;
