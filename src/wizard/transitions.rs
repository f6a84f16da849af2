// SPDX-License-Identifier: MIT

//! Completion events and the transition table

use serde::Serialize;
use std::fmt;

use super::step::Step;
use crate::condition;
use crate::error::ConditionError;
use crate::record::ApplicationRecord;

/// A user action that may complete the current step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WizardEvent {
    /// Tier 1 form submitted
    SubmitTier1,
    /// "Proceed to Tier 2" clicked on the Tier 1 certificate
    Proceed,
    /// Consent form submitted with the checkbox state
    SubmitConsent { agreed: bool },
    /// Tier 2 form submitted
    SubmitTier2,
    /// "Start New" clicked
    Reset,
}

impl WizardEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            WizardEvent::SubmitTier1 => EventKind::SubmitTier1,
            WizardEvent::Proceed => EventKind::Proceed,
            WizardEvent::SubmitConsent { .. } => EventKind::SubmitConsent,
            WizardEvent::SubmitTier2 => EventKind::SubmitTier2,
            WizardEvent::Reset => EventKind::Reset,
        }
    }
}

/// Event discriminant, used as the transition table key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    SubmitTier1,
    Proceed,
    SubmitConsent,
    SubmitTier2,
    Reset,
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EventKind::SubmitTier1 => "submit tier 1",
            EventKind::Proceed => "proceed to tier 2",
            EventKind::SubmitConsent => "confirm consent",
            EventKind::SubmitTier2 => "submit tier 2",
            EventKind::Reset => "start new",
        };
        write!(f, "{}", name)
    }
}

/// One row of the transition table
#[derive(Debug, Clone, Copy)]
pub struct Transition {
    pub from: Step,
    pub event: EventKind,
    pub to: Step,
    /// Guard on the record that must hold for the event to be offered
    pub guard: Option<&'static str>,
}

impl Transition {
    pub fn guard_met(&self, record: &ApplicationRecord) -> Result<bool, ConditionError> {
        match self.guard {
            None => Ok(true),
            Some(source) => condition::check(source, record),
        }
    }
}

/// Forward transitions. Reset is valid from every step and is not listed.
pub const TRANSITIONS: &[Transition] = &[
    Transition {
        from: Step::Tier1Exam,
        event: EventKind::SubmitTier1,
        to: Step::Tier1Certificate,
        guard: None,
    },
    Transition {
        from: Step::Tier1Certificate,
        event: EventKind::Proceed,
        to: Step::Consent,
        guard: Some("tier1.officerReport.recommendation == 'eligible'"),
    },
    Transition {
        from: Step::Consent,
        event: EventKind::SubmitConsent,
        to: Step::Tier2Exam,
        guard: None,
    },
    Transition {
        from: Step::Tier2Exam,
        event: EventKind::SubmitTier2,
        to: Step::FinalCertificate,
        guard: None,
    },
];

/// Look up the transition for `event` at `from`
pub fn transition_for(from: Step, event: EventKind) -> Option<&'static Transition> {
    TRANSITIONS
        .iter()
        .find(|t| t.from == from && t.event == event)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_non_terminal_step_has_one_exit() {
        for step in Step::ALL {
            let exits = TRANSITIONS.iter().filter(|t| t.from == step).count();
            if step.is_terminal() {
                assert_eq!(exits, 0, "{} should be terminal", step);
            } else {
                assert_eq!(exits, 1, "{} should have one forward exit", step);
            }
        }
    }

    #[test]
    fn test_transitions_move_forward_by_one() {
        for t in TRANSITIONS {
            assert_eq!(t.to.index(), t.from.index() + 1);
        }
    }

    #[test]
    fn test_lookup() {
        let t = transition_for(Step::Tier1Exam, EventKind::SubmitTier1).unwrap();
        assert_eq!(t.to, Step::Tier1Certificate);
        assert!(transition_for(Step::Tier1Exam, EventKind::Proceed).is_none());
        assert!(transition_for(Step::FinalCertificate, EventKind::SubmitTier2).is_none());
    }

    #[test]
    fn test_guards_parse() {
        for t in TRANSITIONS {
            if let Some(source) = t.guard {
                assert!(condition::parse(source).is_ok(), "bad guard: {}", source);
            }
        }
    }

    #[test]
    fn test_proceed_guard() {
        let t = transition_for(Step::Tier1Certificate, EventKind::Proceed).unwrap();
        let eligible = ApplicationRecord::empty()
            .set("tier1.officerReport.recommendation", "eligible")
            .unwrap();
        let deferred = eligible
            .set("tier1.officerReport.recommendation", "deferred")
            .unwrap();

        assert!(t.guard_met(&eligible).unwrap());
        assert!(!t.guard_met(&deferred).unwrap());
    }

    #[test]
    fn test_event_kind() {
        assert_eq!(
            WizardEvent::SubmitConsent { agreed: false }.kind(),
            EventKind::SubmitConsent
        );
        assert_eq!(EventKind::Proceed.to_string(), "proceed to tier 2");
    }
}
