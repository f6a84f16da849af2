// SPDX-License-Identifier: MIT

//! Runtime storage for the accumulating application record

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

use super::node::{FieldValue, RecordNode};
use super::path::FieldPath;
use crate::error::RecordError;

/// The single nested record collected across all wizard steps
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(transparent)]
pub struct ApplicationRecord {
    root: BTreeMap<String, RecordNode>,
}

impl ApplicationRecord {
    /// Create an empty record
    pub fn empty() -> Self {
        Self {
            root: BTreeMap::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_empty()
    }

    /// Return a new record with `path` set to `value`.
    ///
    /// `self` is left untouched; the result is an independent copy.
    pub fn set(&self, path: &str, value: impl Into<FieldValue>) -> Result<Self, RecordError> {
        let mut next = self.clone();
        next.set_in_place(path, value)?;
        Ok(next)
    }

    /// Set `path` to `value` on this record
    pub fn set_in_place(
        &mut self,
        path: &str,
        value: impl Into<FieldValue>,
    ) -> Result<(), RecordError> {
        let path = FieldPath::parse(path)?;
        self.set_path(&path, value.into())
    }

    /// Walk `path`, creating missing branches, and replace the terminal value.
    ///
    /// A conflict can only be met on a node that already existed, so an
    /// error never leaves freshly created branches behind.
    pub fn set_path(&mut self, path: &FieldPath, value: FieldValue) -> Result<(), RecordError> {
        let (parents, last) = path.split_last();

        let mut children = &mut self.root;
        for (depth, segment) in parents.iter().enumerate() {
            let node = children
                .entry(segment.clone())
                .or_insert_with(RecordNode::empty_branch);
            children = match node {
                RecordNode::Branch(map) => map,
                RecordNode::Leaf(_) => {
                    return Err(RecordError::PathConflict {
                        path: path.to_string(),
                        blocked_at: path.prefix(depth + 1),
                    })
                }
            };
        }

        log::debug!("record: set {} = {}", path, value);
        children.insert(last.to_string(), RecordNode::Leaf(value));
        Ok(())
    }

    /// Look up the node at `path`.
    ///
    /// Missing segments and malformed paths both yield `None`.
    pub fn get(&self, path: &str) -> Option<&RecordNode> {
        let path = FieldPath::parse(path).ok()?;
        self.get_path(&path)
    }

    pub fn get_path(&self, path: &FieldPath) -> Option<&RecordNode> {
        let (first, rest) = path.segments().split_first()?;
        let mut current = self.root.get(first)?;
        for segment in rest {
            current = current.children()?.get(segment)?;
        }
        Some(current)
    }

    /// Leaf value at `path`; branches yield `None`
    pub fn get_value(&self, path: &str) -> Option<&FieldValue> {
        self.get(path).and_then(RecordNode::as_value)
    }

    /// Non-blank text at `path`
    pub fn text(&self, path: &str) -> Option<&str> {
        self.get_value(path)
            .filter(|v| !v.is_blank())
            .and_then(FieldValue::as_text)
    }

    pub fn flag(&self, path: &str) -> Option<bool> {
        self.get_value(path).and_then(FieldValue::as_flag)
    }

    /// True when `path` holds a non-blank value
    pub fn is_filled(&self, path: &str) -> bool {
        self.get_value(path).map(|v| !v.is_blank()).unwrap_or(false)
    }

    /// Drop everything
    pub fn clear(&mut self) {
        self.root.clear();
    }

    /// Dotted paths of every leaf, in sorted order
    pub fn leaf_paths(&self) -> Vec<String> {
        let mut out = Vec::new();
        for (key, node) in &self.root {
            collect_leaf_paths(key.clone(), node, &mut out);
        }
        out
    }

    /// Convert the record to a JSON object
    pub fn to_json(&self) -> Value {
        Value::Object(
            self.root
                .iter()
                .map(|(k, v)| (k.clone(), v.to_json()))
                .collect(),
        )
    }
}

fn collect_leaf_paths(prefix: String, node: &RecordNode, out: &mut Vec<String>) {
    match node {
        RecordNode::Leaf(_) => out.push(prefix),
        RecordNode::Branch(map) => {
            for (key, child) in map {
                collect_leaf_paths(format!("{}.{}", prefix, key), child, out);
            }
        }
    }
}
