// SPDX-License-Identifier: MIT

//! Scoped print jobs

use super::surface::{PrintDocument, PrintOutcome, PrintSurface};
use crate::error::PrintError;
use crate::wizard::WizardController;

/// Holds a surface in print mode; restores it when dropped
pub struct PrintJob<'s> {
    surface: &'s mut dyn PrintSurface,
}

impl<'s> PrintJob<'s> {
    /// Put `surface` into print mode
    pub fn begin(surface: &'s mut dyn PrintSurface) -> Result<Self, PrintError> {
        if let Err(e) = surface.enter_print_mode() {
            surface.restore();
            return Err(e);
        }
        Ok(Self { surface })
    }

    pub fn print(&mut self, document: &PrintDocument) -> Result<PrintOutcome, PrintError> {
        self.surface.print(document)
    }
}

impl Drop for PrintJob<'_> {
    fn drop(&mut self) {
        self.surface.restore();
        log::debug!("Print surface restored");
    }
}

/// Print the certificate shown at the controller's current step.
///
/// The controller is only borrowed, so step and record are the same
/// afterwards whatever the outcome.
pub fn print_current(
    controller: &WizardController,
    surface: &mut dyn PrintSurface,
) -> Result<PrintOutcome, PrintError> {
    let certificate = controller
        .current_certificate()
        .ok_or(PrintError::NothingToPrint(controller.current_step()))?;
    let document = PrintDocument::from_certificate(&certificate);

    let mut job = PrintJob::begin(surface)?;
    match job.print(&document) {
        Ok(outcome) => {
            match &outcome {
                PrintOutcome::Printed { destination } => {
                    log::info!("Printed '{}' to {}", document.title, destination)
                }
                PrintOutcome::Cancelled => log::info!("Print of '{}' cancelled", document.title),
            }
            Ok(outcome)
        }
        Err(e) => {
            log::error!("Failed to print '{}': {}", document.title, e);
            Err(e)
        }
    }
}
