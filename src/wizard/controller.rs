// SPDX-License-Identifier: MIT

//! The wizard controller: owner of the current step and the record

use chrono::NaiveDate;

use super::clock::{Clock, SystemClock};
use super::step::{progress, ProgressEntry, Step};
use super::transitions::{transition_for, EventKind, WizardEvent, TRANSITIONS};
use super::view::{select_view, View, ViewContext};
use crate::certificate::{self, Certificate, Letterhead};
use crate::error::{FormError, RecordError, WizardError};
use crate::forms::{FormCatalog, FormLoader};
use crate::record::{ApplicationRecord, FieldValue};

/// Holds `(step, record)` and exposes the only operations that change them.
///
/// Two entry points complete a step:
/// - `fire` is the completion event itself: it follows the transition
///   table, honours its guard and applies side effects.
/// - `submit` is what a front-end calls on form submit: it runs the step's
///   own input validation first and then fires.
pub struct WizardController {
    step: Step,
    record: ApplicationRecord,
    forms: FormCatalog,
    letterhead: Letterhead,
    clock: Box<dyn Clock>,
}

impl WizardController {
    /// Create a controller at the initial step with an empty record
    pub fn new(forms: FormCatalog) -> Self {
        Self {
            step: Step::INITIAL,
            record: ApplicationRecord::empty(),
            forms,
            letterhead: Letterhead::default(),
            clock: Box::new(SystemClock),
        }
    }

    /// Create a controller using the built-in form catalog
    pub fn builtin() -> Result<Self, FormError> {
        Ok(Self::new(FormLoader::builtin()?.clone()))
    }

    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    pub fn with_letterhead(mut self, letterhead: Letterhead) -> Self {
        self.letterhead = letterhead;
        self
    }

    pub fn current_step(&self) -> Step {
        self.step
    }

    pub fn record(&self) -> &ApplicationRecord {
        &self.record
    }

    pub fn forms(&self) -> &FormCatalog {
        &self.forms
    }

    pub fn letterhead(&self) -> &Letterhead {
        &self.letterhead
    }

    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    /// Move to `target` unconditionally
    pub fn advance(&mut self, target: Step) {
        log::info!("Wizard: {} -> {}", self.step, target);
        self.step = target;
    }

    /// Clear the record and return to the first step
    pub fn reset(&mut self) {
        log::info!("Wizard: reset from {}", self.step);
        self.record.clear();
        self.step = Step::INITIAL;
    }

    /// Bind `value` to the dotted `path`
    pub fn set_field(
        &mut self,
        path: &str,
        value: impl Into<FieldValue>,
    ) -> Result<(), RecordError> {
        self.record = self.record.set(path, value)?;
        Ok(())
    }

    pub fn field(&self, path: &str) -> Option<&FieldValue> {
        self.record.get_value(path)
    }

    /// Fire a completion event
    pub fn fire(&mut self, event: WizardEvent) -> Result<Step, WizardError> {
        if event == WizardEvent::Reset {
            self.reset();
            return Ok(self.step);
        }

        let transition =
            transition_for(self.step, event.kind()).ok_or(WizardError::InvalidTransition {
                step: self.step,
                event: event.kind(),
            })?;

        if !transition.guard_met(&self.record)? {
            log::warn!("Wizard: '{}' refused at {}: guard not met", event.kind(), self.step);
            return Err(WizardError::NotEligible);
        }

        if let WizardEvent::SubmitConsent { agreed } = event {
            if !agreed {
                log::warn!("Wizard: consent submitted without agreement");
                return Err(WizardError::ConsentNotGiven);
            }
            self.record_consent()?;
        }

        self.advance(transition.to);
        Ok(self.step)
    }

    /// Validate the current step's input, then fire
    pub fn submit(&mut self, event: WizardEvent) -> Result<Step, WizardError> {
        if transition_for(self.step, event.kind()).is_some() {
            let missing = self.missing_required()?;
            if !missing.is_empty() {
                log::warn!("Wizard: {} submitted with missing fields {:?}", self.step, missing);
                return Err(WizardError::MissingRequired {
                    step: self.step,
                    fields: missing,
                });
            }
        }
        self.fire(event)
    }

    /// Required fields of the current step's form that are still blank
    pub fn missing_required(&self) -> Result<Vec<String>, WizardError> {
        match self.step.form_id() {
            None => Ok(Vec::new()),
            Some(id) => self
                .forms
                .form(id)
                .map(|form| form.missing_required(&self.record))
                .ok_or_else(|| WizardError::MissingForm(id.to_string())),
        }
    }

    /// Events the user can trigger right now
    pub fn available_events(&self) -> Vec<EventKind> {
        let mut events: Vec<EventKind> = TRANSITIONS
            .iter()
            .filter(|t| t.from == self.step)
            .filter(|t| match t.guard_met(&self.record) {
                Ok(met) => met,
                Err(e) => {
                    log::error!("Failed to evaluate guard for '{}': {}", t.event, e);
                    false
                }
            })
            .map(|t| t.event)
            .collect();
        events.push(EventKind::Reset);
        events
    }

    /// The view for the current step
    pub fn view(&self) -> Result<View<'_>, WizardError> {
        select_view(self.step, &self.record, &self.view_context())
    }

    pub fn view_context(&self) -> ViewContext<'_> {
        ViewContext {
            forms: &self.forms,
            letterhead: &self.letterhead,
            today: self.today(),
        }
    }

    pub fn progress(&self) -> Vec<ProgressEntry> {
        progress(self.step)
    }

    /// The certificate shown at the current step, if any
    pub fn current_certificate(&self) -> Option<Certificate> {
        self.step
            .certificate()
            .map(|kind| certificate::project(kind, &self.record, &self.letterhead, self.today()))
    }

    fn record_consent(&mut self) -> Result<(), RecordError> {
        let date = self.today().format("%Y-%m-%d").to_string();
        self.record = self
            .record
            .set("consent.agreed", true)?
            .set("consent.date", date)?;
        Ok(())
    }
}
