// SPDX-License-Identifier: MIT

//! Printing the current certificate through an injected surface
//!
//! A `PrintJob` holds the surface in print mode for exactly one print call
//! and restores it on drop, whether the print succeeded, was cancelled or
//! failed.

mod file;
mod job;
mod memory;
mod surface;

pub use file::FileSurface;
pub use job::{print_current, PrintJob};
pub use memory::{MemoryBehaviour, MemorySurface};
pub use surface::{PrintDocument, PrintOutcome, PrintSurface};
