//! Flat change-summary aggregation across redundant layers.
//!
//! Several layers may repeat the same flat change list under synonymous
//! keys. `build_summary` walks every layer in order and appends each row
//! whose dedupe key (`field|json(before)|json(after)`) has not been seen,
//! so the first occurrence wins and order is preserved.
//!
//! Hidden-row filtering is the caller's concern, not the aggregator's:
//! [`filter_hidden_summary_rows`] and [`filter_menu_summary_rows`] run on
//! the finished list.

use std::collections::BTreeSet;

use serde_json::{Map, Value};

use crate::label::candidate_keys;
use crate::layer::{coerce_array, coerce_record, non_empty_str};
use crate::snapshot::SummaryEntry;
use crate::vocabulary::{Vocabulary, HIDDEN_SUMMARY_FIELDS, MENU_DIFF_FIELDS};

/// Synonymous layer keys holding a flat summary list.
const SUMMARY_KEYS: &[&str] = &["changeSummary", "change_summary", "summary"];

/// Keys tried in order for a row's field identifier.
const FIELD_ID_KEYS: &[&str] = &["field", "code", "name", "key"];

/// Keys tried in order for a row's explicit label.
const LABEL_KEYS: &[&str] = &["label", "title", "name"];

/// The dedupe key collapsing repeated rows across layers.
pub(crate) fn dedupe_key(field: &str, before: &Value, after: &Value) -> String {
    format!("{field}|{before}|{after}")
}

/// Merge flat summary rows from `base` and every layer, in order,
/// deduplicated by `field|json(before)|json(after)`.
pub fn build_summary(
    layers: &[Value],
    base: &[SummaryEntry],
    vocab: &Vocabulary,
) -> Vec<SummaryEntry> {
    let mut seen: BTreeSet<String> = BTreeSet::new();
    let mut rows: Vec<SummaryEntry> = Vec::new();

    for entry in base {
        push_unique(&mut rows, &mut seen, entry.clone());
    }

    for layer in layers {
        let Some(record) = coerce_record(layer) else {
            continue;
        };
        for key in SUMMARY_KEYS {
            let Some(items) = record.get(*key).and_then(coerce_array) else {
                continue;
            };
            for (index, item) in items.iter().enumerate() {
                if let Some(entry) = parse_summary_row(item, index, vocab) {
                    push_unique(&mut rows, &mut seen, entry);
                }
            }
        }
    }

    rows
}

fn push_unique(rows: &mut Vec<SummaryEntry>, seen: &mut BTreeSet<String>, entry: SummaryEntry) {
    let key = dedupe_key(&entry.field, &entry.before, &entry.after);
    if seen.insert(key) {
        rows.push(entry);
    }
}

fn parse_summary_row(raw: &Value, index: usize, vocab: &Vocabulary) -> Option<SummaryEntry> {
    let record = coerce_record(raw)?;
    // A row without any identifier still carries before/after data; it is
    // kept under a synthesized positional id rather than dropped.
    let field =
        first_string(&record, FIELD_ID_KEYS).unwrap_or_else(|| format!("field_{index}"));
    let label = first_string(&record, LABEL_KEYS)
        .or_else(|| dictionary_label(&field, vocab))
        .unwrap_or_else(|| title_case_field(&field));
    Some(SummaryEntry {
        field,
        label,
        before: record.get("before").cloned().unwrap_or(Value::Null),
        after: record.get("after").cloned().unwrap_or(Value::Null),
    })
}

fn first_string(record: &Map<String, Value>, keys: &[&str]) -> Option<String> {
    keys.iter()
        .find_map(|key| record.get(*key).and_then(non_empty_str))
}

/// A dictionary hit through the same candidate-key derivation the label
/// resolver uses, without its tail-segment fallback.
fn dictionary_label(field: &str, vocab: &Vocabulary) -> Option<String> {
    candidate_keys(field)
        .into_iter()
        .find_map(|candidate| vocab.field_labels.get(&candidate).cloned())
}

/// Title-case the separator-split tokens of a field id: `max_data_level`
/// becomes `Max Data Level`.
fn title_case_field(field: &str) -> String {
    field
        .split(|c: char| matches!(c, '_' | '-' | '.') || c.is_whitespace())
        .filter(|token| !token.is_empty())
        .map(|token| {
            let mut chars = token.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().to_string() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Lower-case a field or label for block-list comparison, dropping
/// separator characters so `change_summary` matches `changesummary`.
fn blocklist_token(text: &str) -> String {
    text.chars()
        .filter(|c| !matches!(c, '_' | '-' | '.' | ' '))
        .collect::<String>()
        .to_lowercase()
}

/// Drop internal bookkeeping rows before display. The block-list is
/// compared case-insensitively against both field and label.
pub fn filter_hidden_summary_rows(rows: Vec<SummaryEntry>) -> Vec<SummaryEntry> {
    rows.into_iter()
        .filter(|row| {
            let field = blocklist_token(&row.field);
            let label = blocklist_token(&row.label);
            !HIDDEN_SUMMARY_FIELDS
                .iter()
                .any(|hidden| field == *hidden || label == *hidden)
        })
        .collect()
}

/// Drop rows already claimed by the menu-change viewer: rows whose field
/// is in the menu-field set, names the menu-change list itself, or carries
/// a `menu#` path prefix. A row with a blank field is judged by its label.
pub fn filter_menu_summary_rows(rows: Vec<SummaryEntry>) -> Vec<SummaryEntry> {
    rows.into_iter()
        .filter(|row| {
            let source = if row.field.trim().is_empty() {
                row.label.as_str()
            } else {
                row.field.as_str()
            };
            let lowered = source.to_lowercase();
            if lowered.starts_with("menu#") {
                return false;
            }
            let token = blocklist_token(source);
            token != "menuchanges" && !MENU_DIFF_FIELDS.contains(&lowered.as_str())
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_duplicate_rows_across_layers_collapse() {
        let layer = json!({"changeSummary": [{"field": "status", "before": "PENDING", "after": "APPROVED"}]});
        let layers = vec![layer.clone(), layer];
        let rows = build_summary(&layers, &[], &Vocabulary::default());
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].field, "status");
    }

    #[test]
    fn test_base_rows_seed_the_dedupe_set() {
        let base = vec![SummaryEntry {
            field: "status".into(),
            label: "Status".into(),
            before: json!("PENDING"),
            after: json!("APPROVED"),
        }];
        let layers = vec![json!({"summary": [{"field": "status", "before": "PENDING", "after": "APPROVED"}]})];
        let rows = build_summary(&layers, &base, &Vocabulary::default());
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].label, "Status");
    }

    #[test]
    fn test_same_field_different_values_both_kept() {
        let layers = vec![json!({"changeSummary": [
            {"field": "status", "before": "PENDING", "after": "PROCESSING"},
            {"field": "status", "before": "PROCESSING", "after": "APPROVED"}
        ]})];
        let rows = build_summary(&layers, &[], &Vocabulary::default());
        assert_eq!(rows.len(), 2);
    }

    #[test]
    fn test_snake_case_key_and_json_string_list() {
        let layers = vec![json!({
            "change_summary": "[{\"field\": \"username\", \"before\": \"a\", \"after\": \"b\"}]"
        })];
        let rows = build_summary(&layers, &[], &Vocabulary::default());
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].label, "Username");
    }

    #[test]
    fn test_field_id_synonyms_and_label_derivation() {
        let layers = vec![json!({"summary": [
            {"code": "max_data_level_x", "before": 1, "after": 2},
            {"name": "unnamedThing", "title": "Explicit", "before": 1, "after": 2}
        ]})];
        let rows = build_summary(&layers, &[], &Vocabulary::default());
        assert_eq!(rows[0].field, "max_data_level_x");
        assert_eq!(rows[0].label, "Max Data Level X");
        assert_eq!(rows[1].field, "unnamedThing");
        assert_eq!(rows[1].label, "Explicit");
    }

    #[test]
    fn test_rows_without_field_identifier_get_positional_ids() {
        let layers = vec![json!({"summary": [
            {"field": "named", "before": 0, "after": 1},
            {"before": 1, "after": 2},
            {"label": "Labelled only", "before": 3, "after": 4}
        ]})];
        let rows = build_summary(&layers, &[], &Vocabulary::default());
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[1].field, "field_1");
        assert_eq!(rows[1].label, "Field 1");
        assert_eq!(rows[1].before, json!(1));
        assert_eq!(rows[1].after, json!(2));
        assert_eq!(rows[2].field, "field_2");
        assert_eq!(rows[2].label, "Labelled only");
    }

    #[test]
    fn test_hidden_rows_are_caller_filtered() {
        let layers = vec![json!({"summary": [
            {"field": "change_summary", "before": "x", "after": "y"},
            {"field": "username", "before": "a", "after": "b"}
        ]})];
        let rows = build_summary(&layers, &[], &Vocabulary::default());
        // The aggregator keeps internal rows; the caller strips them.
        assert_eq!(rows.len(), 2);
        let visible = filter_hidden_summary_rows(rows);
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].field, "username");
    }

    #[test]
    fn test_menu_rows_filtered_when_menu_view_active() {
        let rows = vec![
            SummaryEntry {
                field: "allowedRoles".into(),
                label: "Allowed roles".into(),
                before: json!(["A"]),
                after: json!(["B"]),
            },
            SummaryEntry {
                field: "menu#12.enabled".into(),
                label: "Status".into(),
                before: json!(true),
                after: json!(false),
            },
            SummaryEntry {
                field: "description".into(),
                label: "Description".into(),
                before: json!("a"),
                after: json!("b"),
            },
        ];
        let kept = filter_menu_summary_rows(rows);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].field, "description");
    }

    #[test]
    fn test_menu_filter_falls_back_to_label_for_blank_fields() {
        let rows = vec![
            SummaryEntry {
                field: "".into(),
                label: "menu#12.allowedRoles".into(),
                before: json!(["A"]),
                after: json!(["B"]),
            },
            SummaryEntry {
                field: "".into(),
                label: "Reason".into(),
                before: json!("a"),
                after: json!("b"),
            },
        ];
        let kept = filter_menu_summary_rows(rows);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].label, "Reason");
    }
}
