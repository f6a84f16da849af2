// SPDX-License-Identifier: MIT

use serde::Serialize;
use std::fmt;

/// Which certificate a document is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CertificateKind {
    Tier1,
    Final,
}

impl CertificateKind {
    pub fn title(&self) -> &'static str {
        match self {
            CertificateKind::Tier1 => "Tier 1 Medical Certificate",
            CertificateKind::Final => "Occupational Medical Certificate",
        }
    }

    /// File-name friendly identifier
    pub fn slug(&self) -> &'static str {
        match self {
            CertificateKind::Tier1 => "tier1-certificate",
            CertificateKind::Final => "final-certificate",
        }
    }
}

impl fmt::Display for CertificateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.title())
    }
}

/// Issuing organisation shown on every certificate
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Letterhead {
    pub organisation: String,
    pub issuer: String,
}

impl Default for Letterhead {
    fn default() -> Self {
        Self {
            organisation: "ROYAL PAPUA NEW GUINEA CONSTABULARY".to_string(),
            issuer: "RPNGC Medical Services".to_string(),
        }
    }
}

/// A rendered-ready certificate
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Certificate {
    pub kind: CertificateKind,
    pub organisation: String,
    pub title: String,
    pub sections: Vec<CertificateSection>,
    pub footer: Vec<String>,
}

impl Certificate {
    /// Value of the first field with this label, in any section
    pub fn field(&self, label: &str) -> Option<&str> {
        self.sections
            .iter()
            .flat_map(|s| s.fields.iter())
            .find(|f| f.label == label)
            .map(|f| f.value.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CertificateSection {
    pub heading: String,
    pub fields: Vec<CertificateField>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CertificateField {
    pub label: String,
    pub value: String,
}

impl CertificateField {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }
}
