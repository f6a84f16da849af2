// SPDX-License-Identifier: MIT

//! Form catalog schema types
//!
//! The catalog describes every data-entry step: which record paths a form
//! binds, how each input is presented and which inputs must be filled
//! before the step can be submitted.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::condition;
use crate::error::FormError;
use crate::record::ApplicationRecord;

/// All forms known to the wizard
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct FormCatalog {
    #[serde(default)]
    pub forms: Vec<FormDefinition>,
}

impl FormCatalog {
    pub fn form(&self, id: &str) -> Option<&FormDefinition> {
        self.forms.iter().find(|f| f.id == id)
    }
}

/// One data-entry step
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FormDefinition {
    pub id: String,
    pub title: String,
    /// Paragraphs shown above the inputs (the consent wording)
    #[serde(default)]
    pub statement: Vec<String>,
    #[serde(default)]
    pub sections: Vec<SectionDefinition>,
}

impl FormDefinition {
    /// Every field in catalog order
    pub fn fields(&self) -> impl Iterator<Item = &FieldDefinition> {
        self.sections.iter().flat_map(|s| s.fields.iter())
    }

    pub fn field(&self, path: &str) -> Option<&FieldDefinition> {
        self.fields().find(|f| f.path == path)
    }

    /// Paths of required, visible fields that are still blank
    pub fn missing_required(&self, record: &ApplicationRecord) -> Vec<String> {
        self.fields()
            .filter(|f| f.required && f.is_visible(record))
            .filter(|f| !record.is_filled(&f.path))
            .map(|f| f.path.clone())
            .collect()
    }
}

/// A titled group of fields
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SectionDefinition {
    pub title: String,
    #[serde(default)]
    pub fields: Vec<FieldDefinition>,
}

/// A single input bound to a record path
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FieldDefinition {
    pub path: String,
    pub label: String,
    #[serde(default)]
    pub kind: FieldKind,
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub options: Vec<ChoiceOption>,
    pub placeholder: Option<String>,
    /// Guard that must hold for the field to be shown
    pub when: Option<String>,
}

impl FieldDefinition {
    pub fn is_visible(&self, record: &ApplicationRecord) -> bool {
        match &self.when {
            None => true,
            Some(guard) => match condition::check(guard, record) {
                Ok(visible) => visible,
                Err(e) => {
                    log::error!("Failed to evaluate guard '{}' on {}: {}", guard, self.path, e);
                    true
                }
            },
        }
    }

    /// Check raw input against the field kind and return the value to store.
    ///
    /// Choice fields accept either the option value or, case-insensitively,
    /// its label or 1-based position.
    pub fn accept(&self, raw: &str) -> Result<String, FormError> {
        let input = raw.trim();
        let invalid = |reason: String| FormError::InvalidValue {
            label: self.label.clone(),
            reason,
        };

        match self.kind {
            FieldKind::Text | FieldKind::TextArea => Ok(input.to_string()),
            FieldKind::Number => match input.parse::<f64>() {
                Ok(n) if n.is_finite() => Ok(input.to_string()),
                _ => Err(invalid(format!("'{}' is not a number", input))),
            },
            FieldKind::Date => NaiveDate::parse_from_str(input, "%Y-%m-%d")
                .map(|d| d.format("%Y-%m-%d").to_string())
                .map_err(|_| invalid(format!("'{}' is not a date (YYYY-MM-DD)", input))),
            FieldKind::Email => {
                let valid = input
                    .split_once('@')
                    .map(|(user, domain)| !user.is_empty() && domain.contains('.'))
                    .unwrap_or(false);
                if valid {
                    Ok(input.to_string())
                } else {
                    Err(invalid(format!("'{}' is not an email address", input)))
                }
            }
            FieldKind::Choice => {
                let by_position = input
                    .parse::<usize>()
                    .ok()
                    .and_then(|n| n.checked_sub(1))
                    .and_then(|i| self.options.get(i));
                by_position
                    .or_else(|| {
                        self.options.iter().find(|o| {
                            o.value == input || o.label.eq_ignore_ascii_case(input)
                        })
                    })
                    .map(|o| o.value.clone())
                    .ok_or_else(|| {
                        let allowed: Vec<&str> =
                            self.options.iter().map(|o| o.value.as_str()).collect();
                        invalid(format!(
                            "'{}' is not one of: {}",
                            input,
                            allowed.join(", ")
                        ))
                    })
            }
        }
    }
}

/// How an input is presented and checked
#[derive(Debug, Clone, Copy, Deserialize, Serialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    #[default]
    Text,
    TextArea,
    Number,
    Date,
    Email,
    Choice,
}

impl FieldKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldKind::Text => "text",
            FieldKind::TextArea => "textarea",
            FieldKind::Number => "number",
            FieldKind::Date => "date",
            FieldKind::Email => "email",
            FieldKind::Choice => "choice",
        }
    }
}

/// One option of a choice field
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct ChoiceOption {
    pub label: String,
    pub value: String,
}
