//! Menu-change extraction and generic-snapshot pruning.
//!
//! Navigation-menu edits arrive as a structured per-menu diff list under
//! `menuChanges` (or its snake_case synonym). Extraction is first-match-
//! wins across layers. When a menu view is active, the complementary
//! pruner strips menu-owned fields from the generic snapshot so no field
//! is displayed twice.

use serde_json::{Map, Value};
use serde::{Deserialize, Serialize};

use crate::layer::{coerce_array, first_non_empty, non_empty_str, parse_json};
use crate::snapshot::{ItemDiff, Snapshot};
use crate::vocabulary::{Vocabulary, MENU_DIFF_FIELDS};

/// One role/permission/data-level access rule attached to a menu.
///
/// A rule carrying none of its three facets is meaningless and is
/// discarded during parsing.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct VisibilityRule {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub permission: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_level_label: Option<String>,
}

impl VisibilityRule {
    fn is_empty(&self) -> bool {
        self.role.is_none() && self.permission.is_none() && self.data_level_label.is_none()
    }
}

/// The structured diff for one navigation-menu node.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct MenuChangeEntry {
    /// Menu identifier, in whatever shape the payload used
    #[serde(skip_serializing_if = "Value::is_null")]
    pub id: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub allowed_roles_before: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub allowed_roles_after: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub added_roles: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub removed_roles: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub allowed_permissions_before: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub allowed_permissions_after: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub added_permissions: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub removed_permissions: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub added_rules: Vec<VisibilityRule>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub removed_rules: Vec<VisibilityRule>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_before: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_after: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub security_level_before: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub security_level_after: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_data_level_before: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_data_level_after: Option<String>,
}

impl MenuChangeEntry {
    /// The entry's display title: `title`, then `name`, then `path`.
    pub fn display_title(&self) -> Option<&str> {
        [self.title.as_deref(), self.name.as_deref(), self.path.as_deref()]
            .into_iter()
            .flatten()
            .map(str::trim)
            .find(|s| !s.is_empty())
    }
}

/// Layer keys holding the structured menu-change list.
const MENU_CHANGE_KEYS: &[&str] = &["menuChanges", "menu_changes"];

/// Delimiters accepted by [`normalize_string_list`] when splitting a
/// plain string, alongside any whitespace.
const LIST_DELIMITERS: &[char] = &[',', '，', '、', ';', '；'];

/// Extract the structured menu-change list from the first layer that has
/// a non-empty one. Later layers are ignored once a match is found.
pub fn extract_menu_changes(layers: &[Value], vocab: &Vocabulary) -> Vec<MenuChangeEntry> {
    first_non_empty(layers, |record| {
        let items = MENU_CHANGE_KEYS
            .iter()
            .find_map(|key| record.get(*key).and_then(coerce_array))
            .filter(|items| !items.is_empty())?;
        let parsed: Vec<MenuChangeEntry> = items
            .iter()
            .filter_map(|item| parse_menu_entry(item, vocab))
            .collect();
        (!parsed.is_empty()).then_some(parsed)
    })
    .unwrap_or_default()
}

fn parse_menu_entry(raw: &Value, vocab: &Vocabulary) -> Option<MenuChangeEntry> {
    let record = crate::layer::coerce_record(raw)?;
    Some(MenuChangeEntry {
        id: pick(&record, &["menuId", "menu_id", "id"])
            .cloned()
            .unwrap_or(Value::Null),
        name: pick_string(&record, &["menuName", "menu_name", "name"]),
        title: pick_string(&record, &["menuTitle", "menu_title", "title", "label"]),
        path: pick_string(&record, &["menuPath", "menu_path", "path", "route"]),
        allowed_roles_before: pick_list(&record, &["allowedRolesBefore", "allowed_roles_before", "rolesBefore"]),
        allowed_roles_after: pick_list(&record, &["allowedRolesAfter", "allowed_roles_after", "rolesAfter"]),
        added_roles: pick_list(&record, &["addedRoles", "added_roles"]),
        removed_roles: pick_list(&record, &["removedRoles", "removed_roles"]),
        allowed_permissions_before: pick_list(
            &record,
            &["allowedPermissionsBefore", "allowed_permissions_before", "permissionsBefore"],
        ),
        allowed_permissions_after: pick_list(
            &record,
            &["allowedPermissionsAfter", "allowed_permissions_after", "permissionsAfter"],
        ),
        added_permissions: pick_list(&record, &["addedPermissions", "added_permissions"]),
        removed_permissions: pick_list(&record, &["removedPermissions", "removed_permissions"]),
        added_rules: pick_rules(&record, &["addedRules", "added_rules"]),
        removed_rules: pick_rules(&record, &["removedRules", "removed_rules"]),
        status_before: pick_labeled(&record, "statusBefore", "status_before", |raw| {
            status_label(raw, vocab)
        }),
        status_after: pick_labeled(&record, "statusAfter", "status_after", |raw| {
            status_label(raw, vocab)
        }),
        security_level_before: pick_labeled(&record, "securityLevelBefore", "security_level_before", |raw| {
            level_label(raw, vocab)
        }),
        security_level_after: pick_labeled(&record, "securityLevelAfter", "security_level_after", |raw| {
            level_label(raw, vocab)
        }),
        max_data_level_before: pick_labeled(&record, "maxDataLevelBefore", "max_data_level_before", |raw| {
            level_label(raw, vocab)
        }),
        max_data_level_after: pick_labeled(&record, "maxDataLevelAfter", "max_data_level_after", |raw| {
            level_label(raw, vocab)
        }),
    })
}

fn pick<'a>(record: &'a Map<String, Value>, keys: &[&str]) -> Option<&'a Value> {
    keys.iter()
        .find_map(|key| record.get(*key))
        .filter(|v| !v.is_null())
}

fn pick_string(record: &Map<String, Value>, keys: &[&str]) -> Option<String> {
    keys.iter()
        .find_map(|key| record.get(*key).and_then(non_empty_str))
}

fn pick_list(record: &Map<String, Value>, keys: &[&str]) -> Vec<String> {
    keys.iter()
        .find_map(|key| {
            let value = record.get(*key)?;
            let list = normalize_string_list(value);
            (!list.is_empty()).then_some(list)
        })
        .unwrap_or_default()
}

fn pick_rules(record: &Map<String, Value>, keys: &[&str]) -> Vec<VisibilityRule> {
    keys.iter()
        .find_map(|key| record.get(*key).and_then(coerce_array))
        .map(|items| items.iter().filter_map(parse_rule).collect())
        .unwrap_or_default()
}

/// A labeled transition value: the explicit `…Label` key wins, else the
/// raw code is mapped through `fallback`.
fn pick_labeled<F>(
    record: &Map<String, Value>,
    camel: &str,
    snake: &str,
    fallback: F,
) -> Option<String>
where
    F: Fn(&str) -> String,
{
    let label_camel = format!("{camel}Label");
    let label_snake = format!("{snake}_label");
    pick_string(record, &[label_camel.as_str(), label_snake.as_str()])
        .or_else(|| pick_string(record, &[camel, snake]).map(|raw| fallback(&raw)))
}

fn status_label(raw: &str, vocab: &Vocabulary) -> String {
    vocab
        .status_labels
        .get(&raw.to_uppercase())
        .cloned()
        .unwrap_or_else(|| raw.to_string())
}

fn level_label(raw: &str, vocab: &Vocabulary) -> String {
    vocab
        .data_level_labels
        .get(raw)
        .or_else(|| vocab.person_level_labels.get(&raw.to_uppercase()))
        .cloned()
        .unwrap_or_else(|| raw.to_string())
}

fn parse_rule(raw: &Value) -> Option<VisibilityRule> {
    let record = crate::layer::coerce_record(raw)?;
    let rule = VisibilityRule {
        role: pick_string(&record, &["role", "roleCode", "role_code"]),
        permission: pick_string(&record, &["permission", "permissionCode", "permission_code"]),
        data_level_label: pick_string(
            &record,
            &["dataLevelLabel", "data_level_label", "dataLevel", "data_level", "level"],
        ),
    };
    (!rule.is_empty()).then_some(rule)
}

/// Normalize a role/permission list from any of its observed shapes:
/// a native array, a JSON-encoded array string, or a delimiter-separated
/// string. Elements are trimmed and empties dropped.
pub fn normalize_string_list(value: &Value) -> Vec<String> {
    match value {
        Value::Array(items) => items.iter().filter_map(non_empty_str).collect(),
        Value::String(text) => {
            let trimmed = text.trim();
            if trimmed.is_empty() {
                return Vec::new();
            }
            if trimmed.starts_with('[') {
                if let Some(Value::Array(items)) = parse_json(trimmed) {
                    return items.iter().filter_map(non_empty_str).collect();
                }
            }
            trimmed
                .split(|c: char| LIST_DELIMITERS.contains(&c) || c.is_whitespace())
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect()
        }
        Value::Number(_) | Value::Bool(_) => non_empty_str(value).into_iter().collect(),
        _ => Vec::new(),
    }
}

/// Rebuild a snapshot without menu-owned fields.
///
/// Changes whose lower-cased field is in [`MENU_DIFF_FIELDS`] are removed
/// at every level; items whose pruned subtree is empty are dropped; an
/// all-empty result collapses to `None`.
pub fn prune_menu_snapshot(snapshot: &Snapshot) -> Option<Snapshot> {
    let pruned = Snapshot {
        before: snapshot.before.clone(),
        after: snapshot.after.clone(),
        changes: prune_changes(&snapshot.changes),
        items: prune_items(&snapshot.items),
    };
    pruned.has_content().then_some(pruned)
}

fn prune_changes(changes: &[crate::snapshot::ChangeEntry]) -> Vec<crate::snapshot::ChangeEntry> {
    changes
        .iter()
        .filter(|entry| !MENU_DIFF_FIELDS.contains(&entry.field.to_lowercase().as_str()))
        .cloned()
        .collect()
}

fn prune_items(items: &[ItemDiff]) -> Vec<ItemDiff> {
    items
        .iter()
        .filter_map(|item| {
            let pruned = ItemDiff {
                id: item.id.clone(),
                label: item.label.clone(),
                name: item.name.clone(),
                display_name: item.display_name.clone(),
                title: item.title.clone(),
                before: item.before.clone(),
                after: item.after.clone(),
                changes: prune_changes(&item.changes),
                items: prune_items(&item.items),
            };
            pruned.as_snapshot().has_content().then_some(pruned)
        })
        .collect()
}
