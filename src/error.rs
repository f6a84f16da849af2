// SPDX-License-Identifier: MIT

//! Typed error handling for medcert-rs
//!
//! Every module reports failures through its own enum; `MedcertError`
//! gathers them for callers that drive the whole wizard.

use thiserror::Error;

use crate::wizard::{EventKind, Step};

/// Top-level error type for medcert-rs
#[derive(Debug, Error)]
pub enum MedcertError {
    /// Nested field binder errors
    #[error("Record error: {0}")]
    Record(#[from] RecordError),

    /// Step sequencing and validation errors
    #[error("Wizard error: {0}")]
    Wizard(#[from] WizardError),

    /// Guard expression errors
    #[error("Condition error: {0}")]
    Condition(#[from] ConditionError),

    /// Form catalog errors
    #[error("Form error: {0}")]
    Form(#[from] FormError),

    /// Print surface errors
    #[error("Print error: {0}")]
    Print(#[from] PrintError),

    /// Configuration errors (invalid env vars)
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// I/O errors
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// JSON serialization errors
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// YAML parsing errors
    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),
}

/// Errors raised while reading or writing the application record
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RecordError {
    /// Path is empty or contains an empty segment
    #[error("Invalid field path '{path}': {reason}")]
    InvalidPath { path: String, reason: &'static str },

    /// An intermediate segment already holds a value
    #[error("Cannot write '{path}': '{blocked_at}' already holds a value")]
    PathConflict { path: String, blocked_at: String },
}

/// Errors raised by the wizard controller
#[derive(Debug, Error, PartialEq)]
pub enum WizardError {
    /// Step identifier outside the known sequence
    #[error("Unknown wizard step: {0}")]
    UnknownStep(String),

    /// Event does not belong to the current step
    #[error("Event '{event}' is not available at step '{step}'")]
    InvalidTransition { step: Step, event: EventKind },

    /// Required inputs left blank on submit
    #[error("Missing required fields at '{step}': {}", .fields.join(", "))]
    MissingRequired { step: Step, fields: Vec<String> },

    /// Consent checkbox not ticked
    #[error("You must agree to the terms to proceed.")]
    ConsentNotGiven,

    /// Tier 1 recommendation does not allow Tier 2
    #[error("Tier 2 is only available when the Tier 1 recommendation is eligible")]
    NotEligible,

    /// No form registered for a form step
    #[error("No form definition for '{0}'")]
    MissingForm(String),

    #[error(transparent)]
    Record(#[from] RecordError),

    #[error(transparent)]
    Condition(#[from] ConditionError),
}

/// Guard expression parse errors
#[derive(Debug, Error, PartialEq)]
pub enum ConditionError {
    #[error("Unexpected character '{ch}' at position {pos}")]
    UnexpectedChar { ch: char, pos: usize },

    #[error("Unterminated string starting at position {0}")]
    UnterminatedString(usize),

    #[error("Expected {expected}, found {found}")]
    UnexpectedToken { expected: String, found: String },

    #[error("Expected {0}, found end of input")]
    UnexpectedEnd(String),
}

/// Form catalog errors
#[derive(Debug, Error)]
pub enum FormError {
    /// Catalog file could not be read
    #[error("Form catalog not readable: {0}")]
    Io(#[from] std::io::Error),

    /// Catalog YAML is malformed
    #[error("Form catalog is not valid YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// A field path in the catalog is malformed
    #[error("Field '{path}' in form '{form}' has an invalid path: {source}")]
    BadPath {
        form: String,
        path: String,
        source: RecordError,
    },

    /// A visibility guard in the catalog does not parse
    #[error("Field '{path}' in form '{form}' has an invalid 'when' guard: {source}")]
    BadGuard {
        form: String,
        path: String,
        source: ConditionError,
    },

    /// A field path appears twice
    #[error("Field '{0}' is declared more than once")]
    DuplicateField(String),

    /// One field path is an ancestor of another
    #[error("Field '{parent}' cannot hold a value and also contain '{child}'")]
    PathOverlap { parent: String, child: String },

    /// A choice field without options
    #[error("Choice field '{0}' declares no options")]
    NoOptions(String),

    /// Entered value does not fit the field kind
    #[error("Invalid value for '{label}': {reason}")]
    InvalidValue { label: String, reason: String },
}

/// Print capability errors
#[derive(Debug, Error)]
pub enum PrintError {
    /// Current step has no certificate
    #[error("Nothing to print at step '{0}'")]
    NothingToPrint(Step),

    /// Surface could not be acquired
    #[error("Print surface unavailable: {0}")]
    Unavailable(String),

    /// Surface failed while printing
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Configuration errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// Variable present but blank
    #[error("Environment variable {0} is set but empty")]
    Empty(&'static str),
}
