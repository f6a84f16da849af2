// SPDX-License-Identifier: MIT

use std::fs;
use std::path::{Path, PathBuf};

use super::surface::{PrintDocument, PrintOutcome, PrintSurface};
use crate::error::PrintError;

/// Writes each printed certificate to its own text file in `dir`
#[derive(Debug, Clone)]
pub struct FileSurface {
    dir: PathBuf,
    active: bool,
}

impl FileSurface {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            active: false,
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl PrintSurface for FileSurface {
    fn enter_print_mode(&mut self) -> Result<(), PrintError> {
        fs::create_dir_all(&self.dir)?;
        self.active = true;
        Ok(())
    }

    fn print(&mut self, document: &PrintDocument) -> Result<PrintOutcome, PrintError> {
        if !self.active {
            return Err(PrintError::Unavailable(format!(
                "{} is not in print mode",
                self.dir.display()
            )));
        }
        let path = self.dir.join(document.file_name());
        fs::write(&path, &document.body)?;
        Ok(PrintOutcome::Printed {
            destination: path.display().to_string(),
        })
    }

    fn restore(&mut self) {
        self.active = false;
    }
}
