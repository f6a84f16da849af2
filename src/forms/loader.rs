// SPDX-License-Identifier: MIT

//! Form catalog loader - YAML parsing and checks
//!
//! The built-in catalog is compiled into the binary; `load_catalog` reads an
//! alternative one from disk.

use once_cell::sync::OnceCell;
use std::collections::HashSet;
use std::fs;
use std::path::Path;

use super::types::{FieldKind, FormCatalog};
use crate::condition;
use crate::error::{FormError, RecordError};
use crate::record::FieldPath;

const BUILTIN_CATALOG: &str = include_str!("../../forms/catalog.yaml");

static BUILTIN: OnceCell<FormCatalog> = OnceCell::new();

/// Loads form catalogs from YAML
pub struct FormLoader;

impl FormLoader {
    pub fn new() -> Self {
        Self
    }

    /// The catalog shipped with the crate, parsed once
    pub fn builtin() -> Result<&'static FormCatalog, FormError> {
        BUILTIN.get_or_try_init(|| Self::parse_yaml(BUILTIN_CATALOG))
    }

    /// Load a catalog from a YAML file
    pub fn load_catalog<P: AsRef<Path>>(&self, path: P) -> Result<FormCatalog, FormError> {
        let content = fs::read_to_string(path)?;
        Self::parse_yaml(&content)
    }

    /// Parse and check a catalog from a YAML string
    pub fn parse_yaml(content: &str) -> Result<FormCatalog, FormError> {
        let catalog: FormCatalog = serde_yaml::from_str(content)?;
        Self::check(&catalog)?;
        log::debug!("Loaded form catalog with {} forms", catalog.forms.len());
        Ok(catalog)
    }

    fn check(catalog: &FormCatalog) -> Result<(), FormError> {
        let mut seen: HashSet<&str> = HashSet::new();
        let mut paths: Vec<FieldPath> = Vec::new();

        for form in &catalog.forms {
            for field in form.fields() {
                let path = FieldPath::parse(&field.path).map_err(|source: RecordError| {
                    FormError::BadPath {
                        form: form.id.clone(),
                        path: field.path.clone(),
                        source,
                    }
                })?;

                if !seen.insert(field.path.as_str()) {
                    return Err(FormError::DuplicateField(field.path.clone()));
                }

                // a leaf field cannot also be the parent of another field
                if let Some(other) = paths
                    .iter()
                    .find(|p| p.is_prefix_of(&path) || path.is_prefix_of(p))
                {
                    let (parent, child) = if other.is_prefix_of(&path) {
                        (other.to_string(), field.path.clone())
                    } else {
                        (field.path.clone(), other.to_string())
                    };
                    return Err(FormError::PathOverlap { parent, child });
                }
                paths.push(path);

                if field.kind == FieldKind::Choice && field.options.is_empty() {
                    return Err(FormError::NoOptions(field.path.clone()));
                }

                if let Some(guard) = &field.when {
                    condition::parse(guard).map_err(|source| FormError::BadGuard {
                        form: form.id.clone(),
                        path: field.path.clone(),
                        source,
                    })?;
                }
            }
        }

        Ok(())
    }
}

impl Default for FormLoader {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_catalog_loads() {
        let catalog = FormLoader::builtin().unwrap();
        assert!(catalog.form("tier1").is_some());
        assert!(catalog.form("consent").is_some());
        assert!(catalog.form("tier2").is_some());
        assert!(catalog.form("tier3").is_none());
    }

    #[test]
    fn test_builtin_required_fields() {
        let catalog = FormLoader::builtin().unwrap();
        let tier1: Vec<&str> = catalog
            .form("tier1")
            .unwrap()
            .fields()
            .filter(|f| f.required)
            .map(|f| f.path.as_str())
            .collect();
        assert_eq!(
            tier1,
            vec![
                "tier1.personal.surname",
                "tier1.personal.givenNames",
                "tier1.personal.dob",
                "tier1.personal.phone",
                "tier1.officerReport.recommendation",
            ]
        );

        let tier2 = catalog.form("tier2").unwrap();
        assert!(tier2.field("tier2.recommendation.status").unwrap().required);
        assert_eq!(
            tier2.field("tier2.recommendation.status").unwrap().options.len(),
            4
        );
    }

    #[test]
    fn test_builtin_aliases_resolve() {
        let catalog = FormLoader::builtin().unwrap();
        let q7 = catalog
            .form("tier1")
            .unwrap()
            .field("tier1.history.q7")
            .unwrap();
        assert_eq!(q7.kind, FieldKind::Choice);
        assert_eq!(q7.options.len(), 2);
        assert_eq!(q7.options[0].value, "yes");
    }

    #[test]
    fn test_builtin_deepest_path() {
        let catalog = FormLoader::builtin().unwrap();
        let deepest = catalog
            .forms
            .iter()
            .flat_map(|f| f.fields())
            .map(|f| f.path.split('.').count())
            .max();
        assert_eq!(deepest, Some(4));
    }

    #[test]
    fn test_consent_statement() {
        let catalog = FormLoader::builtin().unwrap();
        let consent = catalog.form("consent").unwrap();
        assert!(consent.fields().next().is_none());
        assert!(consent
            .statement
            .iter()
            .any(|p| p.contains("Blood Grouping and Typing")));
    }

    #[test]
    fn test_rejects_bad_path() {
        let yaml = r#"
forms:
  - id: broken
    title: Broken
    sections:
      - title: S
        fields:
          - { path: "a..b", label: Bad }
"#;
        assert!(matches!(
            FormLoader::parse_yaml(yaml),
            Err(FormError::BadPath { .. })
        ));
    }

    #[test]
    fn test_rejects_duplicate_field() {
        let yaml = r#"
forms:
  - id: one
    title: One
    sections:
      - title: S
        fields:
          - { path: a.b, label: First }
  - id: two
    title: Two
    sections:
      - title: S
        fields:
          - { path: a.b, label: Second }
"#;
        assert!(matches!(
            FormLoader::parse_yaml(yaml),
            Err(FormError::DuplicateField(p)) if p == "a.b"
        ));
    }

    #[test]
    fn test_rejects_overlapping_paths() {
        let yaml = r#"
forms:
  - id: one
    title: One
    sections:
      - title: S
        fields:
          - { path: tier1.personal.surname, label: Surname }
  - id: two
    title: Two
    sections:
      - title: S
        fields:
          - { path: tier1.personal, label: Personal }
"#;
        match FormLoader::parse_yaml(yaml) {
            Err(FormError::PathOverlap { parent, child }) => {
                assert_eq!(parent, "tier1.personal");
                assert_eq!(child, "tier1.personal.surname");
            }
            other => panic!("expected PathOverlap, got {:?}", other),
        }
    }

    #[test]
    fn test_sibling_prefix_names_do_not_overlap() {
        let yaml = r#"
forms:
  - id: one
    title: One
    sections:
      - title: S
        fields:
          - { path: tier1.personal.phone, label: Phone }
          - { path: tier1.personal.phoneAlt, label: Alternate Phone }
"#;
        assert!(FormLoader::parse_yaml(yaml).is_ok());
    }

    #[test]
    fn test_rejects_choice_without_options() {
        let yaml = r#"
forms:
  - id: one
    title: One
    sections:
      - title: S
        fields:
          - { path: a.b, label: Pick, kind: choice }
"#;
        assert!(matches!(
            FormLoader::parse_yaml(yaml),
            Err(FormError::NoOptions(_))
        ));
    }

    #[test]
    fn test_rejects_bad_guard() {
        let yaml = r#"
forms:
  - id: one
    title: One
    sections:
      - title: S
        fields:
          - { path: a.b, label: B, when: "a.c = 'x'" }
"#;
        assert!(matches!(
            FormLoader::parse_yaml(yaml),
            Err(FormError::BadGuard { .. })
        ));
    }

    #[test]
    fn test_invalid_yaml() {
        assert!(matches!(
            FormLoader::parse_yaml("forms: [unclosed"),
            Err(FormError::Yaml(_))
        ));
    }

    #[test]
    fn test_load_missing_file() {
        let loader = FormLoader::new();
        assert!(matches!(
            loader.load_catalog("/definitely/not/here.yaml"),
            Err(FormError::Io(_))
        ));
    }
}
