//! Snapshot normalization from arbitrary raw diff fragments.
//!
//! Accepts an object or a JSON-encoded string and produces the canonical
//! [`Snapshot`] tree, or `None` when the input holds nothing displayable.
//! No field exclusion happens here; stripping menu-owned fields is the
//! pruner's job (see [`crate::menu`]).

use serde_json::{Map, Value};

use crate::layer::{coerce_array, coerce_record, non_empty_str};
use crate::snapshot::model::{ChangeEntry, ItemDiff, Snapshot};

/// Normalize a raw value into a canonical snapshot.
///
/// Returns `None` when the value is neither an object nor a string parsing
/// to one, or when the resulting snapshot would be empty.
pub fn from_raw(raw: &Value) -> Option<Snapshot> {
    let record = coerce_record(raw)?;
    let snapshot = snapshot_from_record(&record);
    snapshot.has_content().then_some(snapshot)
}

fn snapshot_from_record(record: &Map<String, Value>) -> Snapshot {
    Snapshot {
        before: record.get("before").and_then(coerce_record),
        after: record.get("after").and_then(coerce_record),
        changes: record
            .get("changes")
            .and_then(coerce_array)
            .map(|entries| parse_change_entries(&entries))
            .unwrap_or_default(),
        items: record
            .get("items")
            .and_then(coerce_array)
            .map(|entries| parse_items(&entries))
            .unwrap_or_default(),
    }
}

fn parse_change_entries(entries: &[Value]) -> Vec<ChangeEntry> {
    entries
        .iter()
        .filter_map(|entry| {
            let record = coerce_record(entry)?;
            let field = record
                .get("field")
                .and_then(non_empty_str)
                .unwrap_or_default();
            let label = record.get("label").and_then(non_empty_str);
            if field.is_empty() && label.is_none() {
                return None;
            }
            Some(ChangeEntry {
                field,
                label,
                before: record.get("before").cloned().unwrap_or(Value::Null),
                after: record.get("after").cloned().unwrap_or(Value::Null),
            })
        })
        .collect()
}

fn parse_items(entries: &[Value]) -> Vec<ItemDiff> {
    entries
        .iter()
        .filter_map(|entry| {
            let record = coerce_record(entry)?;
            Some(ItemDiff {
                id: record.get("id").cloned().unwrap_or(Value::Null),
                label: record.get("label").and_then(non_empty_str),
                name: record.get("name").and_then(non_empty_str),
                display_name: record.get("displayName").and_then(non_empty_str),
                title: record.get("title").and_then(non_empty_str),
                before: record.get("before").and_then(coerce_record),
                after: record.get("after").and_then(coerce_record),
                changes: record
                    .get("changes")
                    .and_then(coerce_array)
                    .map(|list| parse_change_entries(&list))
                    .unwrap_or_default(),
                items: record
                    .get("items")
                    .and_then(coerce_array)
                    .map(|list| parse_items(&list))
                    .unwrap_or_default(),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_object_with_before_after() {
        let raw = json!({"before": {"name": "a"}, "after": {"name": "b"}});
        let snap = from_raw(&raw).unwrap();
        assert_eq!(snap.before.unwrap().get("name"), Some(&json!("a")));
        assert_eq!(snap.after.unwrap().get("name"), Some(&json!("b")));
    }

    #[test]
    fn test_json_string_input() {
        let raw = json!("{\"changes\":[{\"field\":\"username\",\"before\":\"alice\",\"after\":\"alice2\"}]}");
        let snap = from_raw(&raw).unwrap();
        assert_eq!(snap.changes.len(), 1);
        assert_eq!(snap.changes[0].field, "username");
        assert_eq!(snap.changes[0].before, json!("alice"));
    }

    #[test]
    fn test_unparsable_input_is_absent() {
        assert!(from_raw(&json!("not json")).is_none());
        assert!(from_raw(&json!([1, 2])).is_none());
        assert!(from_raw(&Value::Null).is_none());
    }

    #[test]
    fn test_empty_object_collapses_to_none() {
        assert!(from_raw(&json!({})).is_none());
        assert!(from_raw(&json!({"before": {}, "after": {}})).is_none());
    }

    #[test]
    fn test_items_recurse() {
        let raw = json!({
            "items": [
                {
                    "id": 5,
                    "name": "Reports",
                    "changes": [{"field": "enabled", "before": true, "after": false}],
                    "items": [
                        {"label": "Child", "changes": [{"field": "title", "before": "x", "after": "y"}]}
                    ]
                }
            ]
        });
        let snap = from_raw(&raw).unwrap();
        assert_eq!(snap.items.len(), 1);
        let item = &snap.items[0];
        assert_eq!(item.id, json!(5));
        assert_eq!(item.changes[0].field, "enabled");
        assert_eq!(item.items[0].changes[0].field, "title");
    }

    #[test]
    fn test_change_entry_without_field_or_label_is_dropped() {
        let raw = json!({"changes": [{"before": 1, "after": 2}, {"field": "kept"}]});
        let snap = from_raw(&raw).unwrap();
        assert_eq!(snap.changes.len(), 1);
        assert_eq!(snap.changes[0].field, "kept");
    }
}
