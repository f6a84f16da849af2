// SPDX-License-Identifier: MIT

//! Examination outcomes

use serde::{Deserialize, Serialize};
use std::fmt;

/// Examination phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    Tier1,
    Tier2,
}

/// The examining officer's categorical outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Recommendation {
    Eligible,
    Ineligible,
    Deferred,
    /// Tier 2 only
    Pending,
}

impl Recommendation {
    /// Parse a stored value, honouring which outcomes each tier allows
    pub fn parse_for(tier: Tier, value: &str) -> Option<Self> {
        let rec = match value {
            "eligible" => Recommendation::Eligible,
            "ineligible" => Recommendation::Ineligible,
            "deferred" => Recommendation::Deferred,
            "pending" => Recommendation::Pending,
            _ => return None,
        };
        if rec == Recommendation::Pending && tier == Tier::Tier1 {
            return None;
        }
        Some(rec)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Recommendation::Eligible => "eligible",
            Recommendation::Ineligible => "ineligible",
            Recommendation::Deferred => "deferred",
            Recommendation::Pending => "pending",
        }
    }

    /// Text shown on certificates
    pub fn badge(&self) -> &'static str {
        match self {
            Recommendation::Eligible => "ELIGIBLE",
            Recommendation::Ineligible => "INELIGIBLE",
            Recommendation::Deferred => "DEFERRED",
            Recommendation::Pending => "PENDING REVIEW",
        }
    }
}

impl fmt::Display for Recommendation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
