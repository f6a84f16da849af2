// SPDX-License-Identifier: MIT

//! Dotted field paths

use std::fmt;
use std::str::FromStr;

use crate::error::RecordError;

/// A validated path into the record, e.g. `tier2.exams.serology.hepatitis`
///
/// A path has at least one segment and no segment is empty. There is no
/// depth limit.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FieldPath {
    segments: Vec<String>,
}

impl FieldPath {
    pub fn parse(raw: &str) -> Result<Self, RecordError> {
        if raw.is_empty() {
            return Err(RecordError::InvalidPath {
                path: raw.to_string(),
                reason: "path is empty",
            });
        }

        let segments: Vec<String> = raw.split('.').map(str::to_string).collect();
        if segments.iter().any(String::is_empty) {
            return Err(RecordError::InvalidPath {
                path: raw.to_string(),
                reason: "path contains an empty segment",
            });
        }

        Ok(Self { segments })
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    pub fn depth(&self) -> usize {
        self.segments.len()
    }

    /// Split into the parent segments and the terminal segment
    pub fn split_last(&self) -> (&[String], &str) {
        // parse() guarantees at least one segment
        let (last, parents) = self
            .segments
            .split_last()
            .map(|(l, p)| (l.as_str(), p))
            .unwrap_or(("", &[][..]));
        (parents, last)
    }

    /// The first `len` segments joined back into a dotted string
    pub fn prefix(&self, len: usize) -> String {
        self.segments[..len.min(self.segments.len())].join(".")
    }

    /// True when `self` names `other` or one of its ancestors
    pub fn is_prefix_of(&self, other: &FieldPath) -> bool {
        other.segments.len() >= self.segments.len()
            && other.segments[..self.segments.len()] == self.segments[..]
    }
}

impl FromStr for FieldPath {
    type Err = RecordError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.segments.join("."))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_segments() {
        let path = FieldPath::parse("tier2.exams.serology.hepatitis").unwrap();
        assert_eq!(path.depth(), 4);
        assert_eq!(path.segments()[2], "serology");
        assert_eq!(path.to_string(), "tier2.exams.serology.hepatitis");
    }

    #[test]
    fn test_single_segment() {
        let path = FieldPath::parse("consent").unwrap();
        let (parents, last) = path.split_last();
        assert!(parents.is_empty());
        assert_eq!(last, "consent");
    }

    #[test]
    fn test_rejects_empty_segments() {
        for raw in ["", ".", "a..b", ".a", "a."] {
            assert!(
                matches!(
                    FieldPath::parse(raw),
                    Err(RecordError::InvalidPath { .. })
                ),
                "expected '{}' to be rejected",
                raw
            );
        }
    }

    #[test]
    fn test_prefix() {
        let path: FieldPath = "tier1.officerReport.height".parse().unwrap();
        assert_eq!(path.prefix(1), "tier1");
        assert_eq!(path.prefix(2), "tier1.officerReport");
        assert_eq!(path.prefix(9), "tier1.officerReport.height");
    }

    #[test]
    fn test_is_prefix_of() {
        let parent = FieldPath::parse("tier1.personal").unwrap();
        let child = FieldPath::parse("tier1.personal.surname").unwrap();
        let sibling = FieldPath::parse("tier1.personalia").unwrap();

        assert!(parent.is_prefix_of(&child));
        assert!(parent.is_prefix_of(&parent));
        assert!(!child.is_prefix_of(&parent));
        assert!(!parent.is_prefix_of(&sibling));
    }

    #[test]
    fn test_deep_path() {
        let raw = (0..32).map(|i| format!("s{}", i)).collect::<Vec<_>>().join(".");
        let path = FieldPath::parse(&raw).unwrap();
        assert_eq!(path.depth(), 32);
    }
}
