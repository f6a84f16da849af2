// SPDX-License-Identifier: MIT

use serde::Serialize;
use uuid::Uuid;

use crate::certificate::{render_text, Certificate, CertificateKind};
use crate::error::PrintError;

/// Read-only snapshot of the certificate handed to a surface
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PrintDocument {
    pub job_id: Uuid,
    pub kind: CertificateKind,
    pub title: String,
    /// Rendered certificate text, nothing else
    pub body: String,
}

impl PrintDocument {
    pub fn from_certificate(certificate: &Certificate) -> Self {
        Self {
            job_id: Uuid::new_v4(),
            kind: certificate.kind,
            title: certificate.title.clone(),
            body: render_text(certificate),
        }
    }

    /// `<certificate slug>-<job id>.txt`
    pub fn file_name(&self) -> String {
        format!("{}-{}.txt", self.kind.slug(), self.job_id)
    }
}

/// What happened to a print request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PrintOutcome {
    Printed { destination: String },
    Cancelled,
}

/// An output the current certificate can be printed to.
///
/// Callers go through `PrintJob`, which pairs every `enter_print_mode`
/// with a `restore`.
pub trait PrintSurface {
    /// Switch the surface to showing certificate content only
    fn enter_print_mode(&mut self) -> Result<(), PrintError>;

    fn print(&mut self, document: &PrintDocument) -> Result<PrintOutcome, PrintError>;

    /// Return the surface to its normal state. Must be safe to call twice.
    fn restore(&mut self);
}
