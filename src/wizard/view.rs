// SPDX-License-Identifier: MIT

//! View selection: what the front-end renders for each step

use chrono::NaiveDate;

use super::step::Step;
use super::transitions::{transition_for, EventKind};
use crate::certificate::{self, Certificate, CertificateKind, Letterhead};
use crate::error::WizardError;
use crate::forms::{FieldDefinition, FormCatalog, FormDefinition};
use crate::record::{ApplicationRecord, FieldValue};

/// Actions offered on a certificate view
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Print,
    Proceed,
    Reset,
}

/// A form input together with its current value
#[derive(Debug, Clone)]
pub struct FieldState<'a> {
    pub definition: &'a FieldDefinition,
    pub value: Option<FieldValue>,
    pub visible: bool,
}

#[derive(Debug, Clone)]
pub struct FormView<'a> {
    pub form: &'a FormDefinition,
    pub fields: Vec<FieldState<'a>>,
}

#[derive(Debug, Clone)]
pub struct ConsentView<'a> {
    pub form: &'a FormDefinition,
    /// Name used in "I, <name>, agree to the terms..."
    pub applicant: String,
}

#[derive(Debug, Clone)]
pub struct CertificateView {
    pub certificate: Certificate,
    pub actions: Vec<Action>,
}

/// The view for one step
#[derive(Debug, Clone)]
pub enum View<'a> {
    Tier1Exam(FormView<'a>),
    Tier1Certificate(CertificateView),
    Consent(ConsentView<'a>),
    Tier2Exam(FormView<'a>),
    FinalCertificate(CertificateView),
}

impl View<'_> {
    pub fn step(&self) -> Step {
        match self {
            View::Tier1Exam(_) => Step::Tier1Exam,
            View::Tier1Certificate(_) => Step::Tier1Certificate,
            View::Consent(_) => Step::Consent,
            View::Tier2Exam(_) => Step::Tier2Exam,
            View::FinalCertificate(_) => Step::FinalCertificate,
        }
    }
}

/// Everything besides the record that views need
#[derive(Debug, Clone, Copy)]
pub struct ViewContext<'a> {
    pub forms: &'a FormCatalog,
    pub letterhead: &'a Letterhead,
    pub today: NaiveDate,
}

/// Pure mapping from `(step, record)` to the view to render
pub fn select_view<'a>(
    step: Step,
    record: &ApplicationRecord,
    ctx: &ViewContext<'a>,
) -> Result<View<'a>, WizardError> {
    let view = match step {
        Step::Tier1Exam => View::Tier1Exam(form_view(step, record, ctx)?),
        Step::Tier1Certificate => View::Tier1Certificate(certificate_view(
            step,
            CertificateKind::Tier1,
            record,
            ctx,
        )?),
        Step::Consent => View::Consent(ConsentView {
            form: form_for(step, ctx)?,
            applicant: applicant_name(record),
        }),
        Step::Tier2Exam => View::Tier2Exam(form_view(step, record, ctx)?),
        Step::FinalCertificate => View::FinalCertificate(certificate_view(
            step,
            CertificateKind::Final,
            record,
            ctx,
        )?),
    };
    Ok(view)
}

/// Parse a raw step identifier and select its view
pub fn select_view_by_id<'a>(
    step_id: &str,
    record: &ApplicationRecord,
    ctx: &ViewContext<'a>,
) -> Result<View<'a>, WizardError> {
    let step: Step = step_id.parse()?;
    select_view(step, record, ctx)
}

fn form_for<'a>(step: Step, ctx: &ViewContext<'a>) -> Result<&'a FormDefinition, WizardError> {
    let id = step
        .form_id()
        .ok_or_else(|| WizardError::MissingForm(step.id().to_string()))?;
    ctx.forms
        .form(id)
        .ok_or_else(|| WizardError::MissingForm(id.to_string()))
}

fn form_view<'a>(
    step: Step,
    record: &ApplicationRecord,
    ctx: &ViewContext<'a>,
) -> Result<FormView<'a>, WizardError> {
    let form = form_for(step, ctx)?;
    let fields = form
        .fields()
        .map(|definition| FieldState {
            definition,
            value: record.get_value(&definition.path).cloned(),
            visible: definition.is_visible(record),
        })
        .collect();
    Ok(FormView { form, fields })
}

fn certificate_view(
    step: Step,
    kind: CertificateKind,
    record: &ApplicationRecord,
    ctx: &ViewContext<'_>,
) -> Result<CertificateView, WizardError> {
    let mut actions = vec![Action::Reset, Action::Print];
    if let Some(proceed) = transition_for(step, EventKind::Proceed) {
        if proceed.guard_met(record)? {
            actions.push(Action::Proceed);
        }
    }

    Ok(CertificateView {
        certificate: certificate::project(kind, record, ctx.letterhead, ctx.today),
        actions,
    })
}

fn applicant_name(record: &ApplicationRecord) -> String {
    let given = record
        .text("tier1.personal.givenNames")
        .unwrap_or("[Applicant Name]");
    match record.text("tier1.personal.surname") {
        Some(surname) => format!("{} {}", given.trim(), surname.trim()),
        None => given.trim().to_string(),
    }
}
