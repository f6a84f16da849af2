// SPDX-License-Identifier: MIT

//! Wizard steps and the progress indicator

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::certificate::CertificateKind;
use crate::error::WizardError;

/// Position in the fixed five-stage sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Step {
    Tier1Exam,
    Tier1Certificate,
    Consent,
    Tier2Exam,
    FinalCertificate,
}

impl Step {
    /// All steps in order
    pub const ALL: [Step; 5] = [
        Step::Tier1Exam,
        Step::Tier1Certificate,
        Step::Consent,
        Step::Tier2Exam,
        Step::FinalCertificate,
    ];

    pub const INITIAL: Step = Step::Tier1Exam;

    pub fn label(&self) -> &'static str {
        match self {
            Step::Tier1Exam => "Tier 1 Exam",
            Step::Tier1Certificate => "Tier 1 Certificate",
            Step::Consent => "Consent",
            Step::Tier2Exam => "Tier 2 Exam",
            Step::FinalCertificate => "Final Certificate",
        }
    }

    pub fn id(&self) -> &'static str {
        match self {
            Step::Tier1Exam => "tier1_exam",
            Step::Tier1Certificate => "tier1_certificate",
            Step::Consent => "consent",
            Step::Tier2Exam => "tier2_exam",
            Step::FinalCertificate => "final_certificate",
        }
    }

    /// Zero-based position in the sequence
    pub fn index(&self) -> usize {
        Step::ALL.iter().position(|s| s == self).unwrap_or(0)
    }

    pub fn is_terminal(&self) -> bool {
        *self == Step::FinalCertificate
    }

    /// Catalog id of the form this step collects, if any
    pub fn form_id(&self) -> Option<&'static str> {
        match self {
            Step::Tier1Exam => Some("tier1"),
            Step::Consent => Some("consent"),
            Step::Tier2Exam => Some("tier2"),
            Step::Tier1Certificate | Step::FinalCertificate => None,
        }
    }

    /// Certificate shown at this step, if any
    pub fn certificate(&self) -> Option<CertificateKind> {
        match self {
            Step::Tier1Certificate => Some(CertificateKind::Tier1),
            Step::FinalCertificate => Some(CertificateKind::Final),
            _ => None,
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for Step {
    type Err = WizardError;

    /// Accepts either the id (`tier2_exam`) or the label (`Tier 2 Exam`)
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Step::ALL
            .iter()
            .copied()
            .find(|step| step.id() == s || step.label() == s)
            .ok_or_else(|| WizardError::UnknownStep(s.to_string()))
    }
}

/// Where a step sits relative to the current one
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ProgressStatus {
    Done,
    Current,
    Upcoming,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProgressEntry {
    pub step: Step,
    pub label: &'static str,
    pub status: ProgressStatus,
}

/// Progress indicator for `current`
pub fn progress(current: Step) -> Vec<ProgressEntry> {
    let at = current.index();
    Step::ALL
        .iter()
        .enumerate()
        .map(|(i, step)| ProgressEntry {
            step: *step,
            label: step.label(),
            status: match i.cmp(&at) {
                std::cmp::Ordering::Less => ProgressStatus::Done,
                std::cmp::Ordering::Equal => ProgressStatus::Current,
                std::cmp::Ordering::Greater => ProgressStatus::Upcoming,
            },
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order() {
        assert_eq!(Step::INITIAL, Step::Tier1Exam);
        assert!(Step::Tier1Exam < Step::FinalCertificate);
        assert_eq!(Step::Consent.index(), 2);
        assert!(Step::FinalCertificate.is_terminal());
        assert!(!Step::Tier2Exam.is_terminal());
    }

    #[test]
    fn test_parse_id_and_label() {
        assert_eq!("tier2_exam".parse::<Step>().unwrap(), Step::Tier2Exam);
        assert_eq!("Tier 1 Certificate".parse::<Step>().unwrap(), Step::Tier1Certificate);
    }

    #[test]
    fn test_parse_unknown_step() {
        assert_eq!(
            "Tier 3 Exam".parse::<Step>(),
            Err(WizardError::UnknownStep("Tier 3 Exam".to_string()))
        );
    }

    #[test]
    fn test_serde_ids_match() {
        for step in Step::ALL {
            let json = serde_json::to_value(step).unwrap();
            assert_eq!(json, serde_json::Value::String(step.id().to_string()));
        }
    }

    #[test]
    fn test_progress() {
        let entries = progress(Step::Consent);
        let statuses: Vec<ProgressStatus> = entries.iter().map(|e| e.status).collect();
        assert_eq!(
            statuses,
            vec![
                ProgressStatus::Done,
                ProgressStatus::Done,
                ProgressStatus::Current,
                ProgressStatus::Upcoming,
                ProgressStatus::Upcoming,
            ]
        );
        assert_eq!(entries[3].label, "Tier 2 Exam");
    }

    #[test]
    fn test_step_outputs() {
        assert_eq!(Step::Tier1Exam.form_id(), Some("tier1"));
        assert_eq!(Step::Tier1Exam.certificate(), None);
        assert_eq!(
            Step::FinalCertificate.certificate(),
            Some(CertificateKind::Final)
        );
    }
}
