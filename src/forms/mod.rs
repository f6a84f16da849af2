// SPDX-License-Identifier: MIT

//! Declarative form catalog
//!
//! Forms are data: each data-entry step is described in YAML and bound to
//! the record purely through dotted field paths.

mod loader;
mod types;

pub use loader::FormLoader;
pub use types::{
    ChoiceOption, FieldDefinition, FieldKind, FormCatalog, FormDefinition, SectionDefinition,
};
