//! Snapshot tree value types.
//!
//! All types implement `Debug, Clone, Serialize, Deserialize, PartialEq`
//! and default to empty collections so partially-populated raw input maps
//! onto them without ceremony.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One labeled field change inside a snapshot node.
///
/// `label` is the raw label carried by the payload, when any; display code
/// resolves a missing label through the field-label resolver.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct ChangeEntry {
    /// Raw or semantic field key
    pub field: String,
    /// Explicit display label, when the payload carried one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// Raw value before the change (`Null` when absent)
    pub before: Value,
    /// Raw value after the change (`Null` when absent)
    pub after: Value,
}

/// One display-ready summary row: a [`ChangeEntry`] whose label has been
/// resolved.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct SummaryEntry {
    /// Raw or semantic field key
    pub field: String,
    /// Resolved display label
    pub label: String,
    /// Raw value before the change (`Null` when absent)
    pub before: Value,
    /// Raw value after the change (`Null` when absent)
    pub after: Value,
}

/// One node of a possibly-recursive diff tree.
///
/// A snapshot with no populated field is "empty"; normalizers collapse it
/// to `None` rather than returning it.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct Snapshot {
    /// Full object state before the change, when supplied
    #[serde(skip_serializing_if = "Option::is_none")]
    pub before: Option<Map<String, Value>>,
    /// Full object state after the change, when supplied
    #[serde(skip_serializing_if = "Option::is_none")]
    pub after: Option<Map<String, Value>>,
    /// Flat field changes at this node
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub changes: Vec<ChangeEntry>,
    /// Nested per-entity diffs (batch rows)
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub items: Vec<ItemDiff>,
}

/// One row of a batch (list) diff, itself possibly carrying nested
/// changes/items.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct ItemDiff {
    /// Entity identifier, in whatever shape the payload used
    #[serde(skip_serializing_if = "Value::is_null")]
    pub id: Value,
    /// Explicit row label
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// Entity name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Entity display name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    /// Entity title
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Row state before the change
    #[serde(skip_serializing_if = "Option::is_none")]
    pub before: Option<Map<String, Value>>,
    /// Row state after the change
    #[serde(skip_serializing_if = "Option::is_none")]
    pub after: Option<Map<String, Value>>,
    /// Flat field changes for this row
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub changes: Vec<ChangeEntry>,
    /// Nested rows below this one
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub items: Vec<ItemDiff>,
}

impl Snapshot {
    /// True when the node still has something to display, directly or in
    /// any descendant item.
    pub fn has_content(&self) -> bool {
        if !self.changes.is_empty() {
            return true;
        }
        if !self.items.is_empty() {
            return self.items.iter().any(|item| item.as_snapshot().has_content());
        }
        if self.after.as_ref().is_some_and(|m| !m.is_empty()) {
            return true;
        }
        self.before.as_ref().is_some_and(|m| !m.is_empty())
    }
}

impl ItemDiff {
    /// View this row as a snapshot node for uniform traversal.
    pub fn as_snapshot(&self) -> Snapshot {
        Snapshot {
            before: self.before.clone(),
            after: self.after.clone(),
            changes: self.changes.clone(),
            items: self.items.clone(),
        }
    }

    /// The row's own path label: `label`, then `display_name`, then `name`.
    /// Blank candidates fall through to the next one.
    pub fn path_label(&self) -> Option<&str> {
        [
            self.label.as_deref(),
            self.display_name.as_deref(),
            self.name.as_deref(),
        ]
        .into_iter()
        .flatten()
        .map(str::trim)
        .find(|s| !s.is_empty())
    }
}
