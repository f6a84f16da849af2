// SPDX-License-Identifier: MIT

//! Five-step examination wizard
//!
//! `Tier 1 Exam -> Tier 1 Certificate -> Consent -> Tier 2 Exam -> Final Certificate`
//!
//! The controller owns the current step and the record. Views are a pure
//! function of the two, and every forward move goes through the transition
//! table so guards such as the Tier 1 eligibility gate live in one place.

mod clock;
mod controller;
mod step;
mod transitions;
mod view;

pub use clock::{Clock, FixedClock, SystemClock};
pub use controller::WizardController;
pub use step::{progress, ProgressEntry, ProgressStatus, Step};
pub use transitions::{transition_for, EventKind, Transition, WizardEvent, TRANSITIONS};
pub use view::{
    select_view, select_view_by_id, Action, CertificateView, ConsentView, FieldState, FormView,
    View, ViewContext,
};
