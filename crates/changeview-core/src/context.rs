//! The display-context orchestrator.
//!
//! `build_change_display_context` is the main entry point: it assembles
//! the raw layers of one change request, runs menu extraction, summary
//! aggregation, and snapshot lookup over them, and reconciles the three
//! renderings so no field is displayed twice.

use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

use changeview_core_types::{schema, ChangeRequest};

use crate::layer::first_non_empty;
use crate::menu::{extract_menu_changes, prune_menu_snapshot, MenuChangeEntry};
use crate::request::request_layers;
use crate::snapshot::{collect_changes, from_raw, ChangeEntry, Snapshot, SummaryEntry};
use crate::summary::{build_summary, filter_hidden_summary_rows, filter_menu_summary_rows};
use crate::value::{values_equal, FormatContext};
use crate::vocabulary::Vocabulary;

/// The aggregate result handed to a renderer.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct ChangeDisplayContext {
    /// The generic snapshot, pruned of menu-owned fields when a menu view
    /// is active
    #[serde(skip_serializing_if = "Option::is_none")]
    pub snapshot: Option<Snapshot>,
    /// Deduplicated flat summary rows, internal rows already stripped
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub summary: Vec<SummaryEntry>,
    /// Structured menu-change entries, when any layer carried them
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub menu_changes: Vec<MenuChangeEntry>,
}

/// Layer keys holding a nested snapshot object.
const SNAPSHOT_KEYS: &[&str] = &["changeSnapshot", "change_snapshot", "snapshot"];

/// Layer keys holding a list of per-entity snapshots (batch requests).
const SNAPSHOT_LIST_KEYS: &[&str] = &["changeSnapshots", "change_snapshots"];

/// Build the display context for one change request.
///
/// Layer order (see [`request_layers`]) fixes precedence for every
/// first-match-wins scan. When structured menu changes are found, the
/// generic snapshot is pruned and menu-owned summary rows are dropped, so
/// the menu view is the only place those fields appear.
pub fn build_change_display_context(
    request: &ChangeRequest,
    ctx: &FormatContext,
) -> ChangeDisplayContext {
    let vocab = &ctx.vocabulary;
    let layers = request_layers(request);

    let menu_changes = extract_menu_changes(&layers, vocab);
    let snapshot = lookup_snapshot(&layers);

    let mut summary = build_summary(&layers, &[], vocab);
    if summary.is_empty() {
        if let Some(snap) = &snapshot {
            summary = derived_summary(snap, vocab);
        }
    }
    summary = filter_hidden_summary_rows(summary);

    let snapshot = if menu_changes.is_empty() {
        snapshot
    } else {
        summary = filter_menu_summary_rows(summary);
        snapshot.as_ref().and_then(prune_menu_snapshot)
    };

    tracing::debug!(
        event = schema::EVENT_CONTEXT_BUILT,
        request_id = request.id,
        summary_rows = summary.len(),
        menu_entries = menu_changes.len(),
        has_snapshot = snapshot.is_some(),
    );

    ChangeDisplayContext {
        snapshot,
        summary,
        menu_changes,
    }
}

/// The first snapshot found in the layers: a nested snapshot object, a
/// non-empty snapshot list (wrapped as items), or the layer itself when
/// it is snapshot-shaped.
pub(crate) fn lookup_snapshot(layers: &[Value]) -> Option<Snapshot> {
    first_non_empty(layers, |record| {
        SNAPSHOT_KEYS
            .iter()
            .find_map(|key| record.get(*key).and_then(from_raw))
            .or_else(|| {
                SNAPSHOT_LIST_KEYS.iter().find_map(|key| {
                    let list = record.get(*key)?;
                    from_raw(&json!({ "items": list }))
                })
            })
            .or_else(|| from_raw(&Value::Object(record.clone())))
    })
}

/// Summary rows derived from the snapshot when no layer carried a flat
/// summary list. A snapshot holding only before/after states gets its
/// entries synthesized from the differing keys.
fn derived_summary(snapshot: &Snapshot, vocab: &Vocabulary) -> Vec<SummaryEntry> {
    if snapshot.changes.is_empty() && snapshot.items.is_empty() {
        let synthesized = Snapshot {
            changes: diff_states(snapshot.before.as_ref(), snapshot.after.as_ref()),
            ..snapshot.clone()
        };
        collect_changes(&synthesized, usize::MAX, vocab)
    } else {
        collect_changes(snapshot, usize::MAX, vocab)
    }
}

/// Synthesize change entries from before/after state maps, skipping keys
/// whose values did not actually change. After-keys come first in their
/// own order; keys only present before follow.
fn diff_states(
    before: Option<&Map<String, Value>>,
    after: Option<&Map<String, Value>>,
) -> Vec<ChangeEntry> {
    let empty = Map::new();
    let before = before.unwrap_or(&empty);
    let after = after.unwrap_or(&empty);

    let mut entries: Vec<ChangeEntry> = Vec::new();
    for (key, after_value) in after {
        let before_value = before.get(key).cloned().unwrap_or(Value::Null);
        if values_equal(&before_value, after_value) {
            continue;
        }
        entries.push(ChangeEntry {
            field: key.clone(),
            label: None,
            before: before_value,
            after: after_value.clone(),
        });
    }
    for (key, before_value) in before {
        if after.contains_key(key) || before_value.is_null() {
            continue;
        }
        entries.push(ChangeEntry {
            field: key.clone(),
            label: None,
            before: before_value.clone(),
            after: Value::Null,
        });
    }
    entries
}
