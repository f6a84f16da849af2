// SPDX-License-Identifier: MIT

use super::surface::{PrintDocument, PrintOutcome, PrintSurface};
use crate::error::PrintError;

/// How a `MemorySurface` answers print requests
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MemoryBehaviour {
    #[default]
    Print,
    Cancel,
    Fail,
}

/// Keeps printed documents in memory. Used for dry runs and tests.
#[derive(Debug, Default)]
pub struct MemorySurface {
    behaviour: MemoryBehaviour,
    documents: Vec<PrintDocument>,
    in_print_mode: bool,
    restore_count: usize,
}

impl MemorySurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_behaviour(behaviour: MemoryBehaviour) -> Self {
        Self {
            behaviour,
            ..Self::default()
        }
    }

    pub fn documents(&self) -> &[PrintDocument] {
        &self.documents
    }

    pub fn in_print_mode(&self) -> bool {
        self.in_print_mode
    }

    /// Number of times the surface was restored
    pub fn restore_count(&self) -> usize {
        self.restore_count
    }
}

impl PrintSurface for MemorySurface {
    fn enter_print_mode(&mut self) -> Result<(), PrintError> {
        self.in_print_mode = true;
        Ok(())
    }

    fn print(&mut self, document: &PrintDocument) -> Result<PrintOutcome, PrintError> {
        if !self.in_print_mode {
            return Err(PrintError::Unavailable("not in print mode".to_string()));
        }
        match self.behaviour {
            MemoryBehaviour::Print => {
                self.documents.push(document.clone());
                Ok(PrintOutcome::Printed {
                    destination: format!("memory:{}", self.documents.len() - 1),
                })
            }
            MemoryBehaviour::Cancel => Ok(PrintOutcome::Cancelled),
            MemoryBehaviour::Fail => Err(PrintError::Unavailable("printer offline".to_string())),
        }
    }

    fn restore(&mut self) {
        self.in_print_mode = false;
        self.restore_count += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::certificate::{tier1_certificate, Letterhead};
    use crate::record::ApplicationRecord;
    use chrono::NaiveDate;

    fn document() -> PrintDocument {
        let cert = tier1_certificate(
            &ApplicationRecord::empty(),
            &Letterhead::default(),
            NaiveDate::from_ymd_opt(2026, 10, 19).unwrap(),
        );
        PrintDocument::from_certificate(&cert)
    }

    #[test]
    fn test_print_requires_print_mode() {
        let mut surface = MemorySurface::new();
        assert!(matches!(
            surface.print(&document()),
            Err(PrintError::Unavailable(_))
        ));
        assert!(surface.documents().is_empty());
    }

    #[test]
    fn test_records_documents() {
        let mut surface = MemorySurface::new();
        surface.enter_print_mode().unwrap();
        let outcome = surface.print(&document()).unwrap();
        assert_eq!(
            outcome,
            PrintOutcome::Printed {
                destination: "memory:0".to_string()
            }
        );
        surface.restore();
        surface.restore();
        assert_eq!(surface.documents().len(), 1);
        assert!(!surface.in_print_mode());
        assert_eq!(surface.restore_count(), 2);
    }
}
