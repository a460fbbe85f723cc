//! Budget-bounded snapshot flattening.
//!
//! Turns a snapshot tree into the top-N most relevant change lines for
//! compact list-row previews. Traversal is breadth-first over an explicit
//! work queue, so the budget is enforced exactly and malformed
//! deeply-nested input cannot cause runaway recursion.

use std::collections::VecDeque;

use crate::label::label_for_field;
use crate::snapshot::model::{Snapshot, SummaryEntry};
use crate::vocabulary::Vocabulary;

/// Separator between a path prefix and an entry label.
const PATH_SEPARATOR: &str = " · ";

/// Collect up to `max_entries` display-ready change lines from a snapshot.
///
/// Entries from nested items are labeled `path · label`, the path being the
/// chain of item labels from the root. Traversal stops as soon as the
/// budget is exhausted; fewer entries are returned only when the whole tree
/// has fewer changes.
pub fn collect_changes(
    snapshot: &Snapshot,
    max_entries: usize,
    vocab: &Vocabulary,
) -> Vec<SummaryEntry> {
    let mut collected = Vec::new();
    if max_entries == 0 {
        return collected;
    }

    let mut queue: VecDeque<(Snapshot, String)> = VecDeque::new();
    queue.push_back((snapshot.clone(), String::new()));

    while let Some((node, path)) = queue.pop_front() {
        for entry in &node.changes {
            if collected.len() >= max_entries {
                return collected;
            }
            let base_label = match &entry.label {
                Some(label) => label.clone(),
                None => label_for_field(&entry.field, vocab),
            };
            let label = if path.is_empty() {
                base_label
            } else {
                format!("{path}{PATH_SEPARATOR}{base_label}")
            };
            collected.push(SummaryEntry {
                field: entry.field.clone(),
                label,
                before: entry.before.clone(),
                after: entry.after.clone(),
            });
        }
        if collected.len() >= max_entries {
            return collected;
        }
        for item in &node.items {
            let item_label = item.path_label().unwrap_or_default();
            let child_path = match (path.is_empty(), item_label.is_empty()) {
                (_, true) => path.clone(),
                (true, false) => item_label.to_string(),
                (false, false) => format!("{path}{PATH_SEPARATOR}{item_label}"),
            };
            queue.push_back((item.as_snapshot(), child_path));
        }
    }

    collected
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snapshot::normalize::from_raw;
    use serde_json::json;

    fn tree() -> Snapshot {
        from_raw(&json!({
            "changes": [
                {"field": "name", "before": "a", "after": "b"},
                {"field": "status", "before": "PENDING", "after": "APPROVED"}
            ],
            "items": [
                {
                    "label": "Reports",
                    "changes": [{"field": "enabled", "before": true, "after": false}],
                    "items": [
                        {"name": "Monthly", "changes": [{"field": "title", "before": "x", "after": "y"}]}
                    ]
                }
            ]
        }))
        .unwrap()
    }

    #[test]
    fn test_budget_is_exact() {
        let vocab = Vocabulary::default();
        for n in 0..5 {
            let lines = collect_changes(&tree(), n, &vocab);
            assert!(lines.len() <= n);
        }
        assert_eq!(collect_changes(&tree(), 10, &vocab).len(), 4);
    }

    #[test]
    fn test_breadth_first_order() {
        let vocab = Vocabulary::default();
        let lines = collect_changes(&tree(), 10, &vocab);
        let fields: Vec<&str> = lines.iter().map(|l| l.field.as_str()).collect();
        assert_eq!(fields, ["name", "status", "enabled", "title"]);
    }

    #[test]
    fn test_nested_entries_carry_path_labels() {
        let vocab = Vocabulary::default();
        let lines = collect_changes(&tree(), 10, &vocab);
        assert_eq!(lines[2].label, "Reports · Status");
        assert_eq!(lines[3].label, "Reports · Monthly · Title");
    }

    #[test]
    fn test_explicit_entry_label_wins_over_dictionary() {
        let vocab = Vocabulary::default();
        let snap = from_raw(&json!({
            "changes": [{"field": "username", "label": "Login", "before": "a", "after": "b"}]
        }))
        .unwrap();
        let lines = collect_changes(&snap, 5, &vocab);
        assert_eq!(lines[0].label, "Login");
    }
}
