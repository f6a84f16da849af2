// SPDX-License-Identifier: MIT

//! Tree nodes backing the application record

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fmt;

/// A single value entered into the record
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    /// Free text, dates, numbers and choice values as entered
    Text(String),
    /// Checkbox-style values
    Flag(bool),
}

impl FieldValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s),
            FieldValue::Flag(_) => None,
        }
    }

    pub fn as_flag(&self) -> Option<bool> {
        match self {
            FieldValue::Flag(b) => Some(*b),
            FieldValue::Text(_) => None,
        }
    }

    /// Whitespace-only text counts as not filled in
    pub fn is_blank(&self) -> bool {
        matches!(self, FieldValue::Text(s) if s.trim().is_empty())
    }

    pub fn to_json(&self) -> Value {
        match self {
            FieldValue::Text(s) => Value::String(s.clone()),
            FieldValue::Flag(b) => Value::Bool(*b),
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Text(s) => write!(f, "{}", s),
            FieldValue::Flag(b) => write!(f, "{}", b),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::Text(s.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        FieldValue::Text(s)
    }
}

impl From<bool> for FieldValue {
    fn from(b: bool) -> Self {
        FieldValue::Flag(b)
    }
}

/// A node in the record tree: either a mapping of named children or a value
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum RecordNode {
    Leaf(FieldValue),
    Branch(BTreeMap<String, RecordNode>),
}

impl RecordNode {
    pub fn empty_branch() -> Self {
        RecordNode::Branch(BTreeMap::new())
    }

    pub fn is_branch(&self) -> bool {
        matches!(self, RecordNode::Branch(_))
    }

    /// The leaf value, if this node is a leaf
    pub fn as_value(&self) -> Option<&FieldValue> {
        match self {
            RecordNode::Leaf(v) => Some(v),
            RecordNode::Branch(_) => None,
        }
    }

    /// Child nodes, if this node is a branch
    pub fn children(&self) -> Option<&BTreeMap<String, RecordNode>> {
        match self {
            RecordNode::Branch(map) => Some(map),
            RecordNode::Leaf(_) => None,
        }
    }

    pub fn to_json(&self) -> Value {
        node_to_json(self)
    }
}

fn node_to_json(node: &RecordNode) -> Value {
    match node {
        RecordNode::Leaf(v) => v.to_json(),
        RecordNode::Branch(map) => Value::Object(
            map.iter()
                .map(|(k, child)| (k.clone(), node_to_json(child)))
                .collect::<Map<String, Value>>(),
        ),
    }
}
