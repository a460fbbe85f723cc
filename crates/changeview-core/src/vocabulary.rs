//! Injectable locale dictionaries and display configuration.
//!
//! Every human-facing token the engine emits comes from a [`Vocabulary`]:
//! field labels, closed value dictionaries (data level, scope, status,
//! operation type), the truthy token set, and fixed display tokens
//! (placeholders, separators, fallback words). The engine ships an English
//! `Default`; deployments swap tables without code changes.
//!
//! Two field-name sets are kept deliberately independent:
//! [`HIDDEN_SUMMARY_FIELDS`] (internal rows a caller strips before display)
//! and [`MENU_DIFF_FIELDS`] (fields the menu pruner removes from a generic
//! snapshot once a menu-specific view claims them). They serve different
//! purposes and are not merged.

use std::collections::{BTreeMap, BTreeSet};

/// Summary rows whose field or label matches one of these (compared
/// case-insensitively) are internal bookkeeping and are filtered out by the
/// caller before display, not inside the aggregator.
pub const HIDDEN_SUMMARY_FIELDS: &[&str] = &[
    "menuchanges",
    "changesummary",
    "payloadjson",
    "diffjson",
    "extraattributes",
];

/// Lower-cased field names owned by the menu-change viewer. When a layer
/// carries structured menu changes, the pruner removes these from the
/// generic snapshot so no field is displayed twice.
pub const MENU_DIFF_FIELDS: &[&str] = &[
    "allowedroles",
    "allowed_permissions",
    "allowedpermissions",
    "visibilityrules",
    "allowedorgcodes",
    "deleted",
    "enabled",
    "securitylevel",
    "maxdatalevel",
];

/// Locale dictionaries and fixed display tokens for one deployment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Vocabulary {
    /// Normalized field key -> display label
    pub field_labels: BTreeMap<String, String>,
    /// Personnel security level code (upper-cased) -> label
    pub person_level_labels: BTreeMap<String, String>,
    /// Data level code -> label
    pub data_level_labels: BTreeMap<String, String>,
    /// Scope code -> label
    pub scope_labels: BTreeMap<String, String>,
    /// Share-scope code -> label
    pub share_scope_labels: BTreeMap<String, String>,
    /// Data operation code (read/write/export) -> label
    pub operation_labels: BTreeMap<String, String>,
    /// Workflow status code (upper-cased) -> label
    pub status_labels: BTreeMap<String, String>,
    /// Operation type code (upper-cased) -> label
    pub operation_type_labels: BTreeMap<String, String>,
    /// Lower-cased string tokens treated as true by the truthy predicate
    pub truthy_tokens: BTreeSet<String>,
    /// Token for a truthy boolean-like field
    pub on_token: String,
    /// Token for a falsy boolean-like field
    pub off_token: String,
    /// Token for a truthy yes/no field
    pub yes_token: String,
    /// Token for a falsy yes/no field
    pub no_token: String,
    /// Placeholder for null/undefined/empty values
    pub empty_placeholder: String,
    /// Replacement for secret-like values
    pub masked_token: String,
    /// Separator used when joining array elements
    pub list_separator: String,
    /// Collapsed label for `DEFAULT-ROLES-*` role codes
    pub default_role_label: String,
    /// Word substituted for a `BATCH_` operation prefix
    pub batch_word: String,
    /// Template for labeling a batch item by id; `{id}` is replaced
    pub item_id_template: String,
    /// Ordinal fallback for an unlabelable batch item; `{n}` is replaced
    pub item_ordinal_template: String,
    /// Fallback word when a one-line summary cannot resolve the action
    pub unknown_action: String,
    /// Fallback word when a one-line summary cannot resolve the subject
    pub unknown_subject: String,
    /// Fallback word when a one-line summary cannot resolve a field
    pub unknown_field: String,
    /// Generic label for a field whose name is empty or unresolvable
    pub generic_field_label: String,
    /// Literal values replaced by the masked token wherever they appear in
    /// structural dumps. Ships with the internal identity-provider id;
    /// deployments add their own literals.
    pub secret_literals: BTreeSet<String>,
}

/// Identity-provider id masked in every structural dump.
const IDP_CLIENT_ID: &str = "7f3868a1-9c8c-4122-b7e4-7f921a40c019";

impl Default for Vocabulary {
    fn default() -> Self {
        Self {
            field_labels: default_field_labels(),
            person_level_labels: table(&[
                ("NON_SECRET", "Non-secret"),
                ("GENERAL", "General"),
                ("IMPORTANT", "Important"),
                ("CORE", "Core"),
            ]),
            data_level_labels: table(&[
                ("DATA_PUBLIC", "Public"),
                ("DATA_INTERNAL", "Internal"),
                ("DATA_SECRET", "Secret"),
                ("DATA_CONFIDENTIAL", "Confidential"),
            ]),
            scope_labels: table(&[
                ("DEPARTMENT", "Department"),
                ("DEPT", "Department"),
                ("INSTITUTE", "Institute shared area"),
            ]),
            share_scope_labels: table(&[
                ("SHARE_INST", "Institute-wide shared"),
                ("PUBLIC_INST", "Institute-wide public"),
            ]),
            operation_labels: table(&[("read", "Read"), ("write", "Write"), ("export", "Export")]),
            status_labels: table(&[
                ("PENDING", "Pending"),
                ("PROCESSING", "Processing"),
                ("APPROVED", "Approved"),
                ("APPLIED", "Applied"),
                ("FAILED", "Failed"),
                ("REJECTED", "Rejected"),
                ("ON_HOLD", "On hold"),
                ("COMPLETED", "Completed"),
                ("ENABLED", "Enabled"),
                ("DISABLED", "Disabled"),
                ("ENABLE", "Enabled"),
                ("DISABLE", "Disabled"),
            ]),
            operation_type_labels: table(&[
                ("CREATE", "Create"),
                ("UPDATE", "Update"),
                ("DELETE", "Delete"),
                ("GRANT", "Grant"),
                ("REVOKE", "Revoke"),
                ("ENABLE", "Enable"),
                ("DISABLE", "Disable"),
                ("BATCH_CREATE", "Batch create"),
                ("BATCH_UPDATE", "Batch update"),
                ("BATCH_DELETE", "Batch delete"),
                ("BATCH_ENABLE", "Batch enable"),
                ("BATCH_DISABLE", "Batch disable"),
            ]),
            truthy_tokens: ["true", "yes", "y", "1", "enabled", "on"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            on_token: "Enabled".into(),
            off_token: "Disabled".into(),
            yes_token: "Yes".into(),
            no_token: "No".into(),
            empty_placeholder: "—".into(),
            masked_token: "***".into(),
            list_separator: ", ".into(),
            default_role_label: "Default role".into(),
            batch_word: "Batch".into(),
            item_id_template: "Item {id}".into(),
            item_ordinal_template: "Item {n}".into(),
            unknown_action: "unknown action".into(),
            unknown_subject: "unknown subject".into(),
            unknown_field: "unknown field".into(),
            generic_field_label: "Field".into(),
            secret_literals: [IDP_CLIENT_ID.to_string()].into_iter().collect(),
        }
    }
}

fn table(entries: &[(&str, &str)]) -> BTreeMap<String, String> {
    entries
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

fn default_field_labels() -> BTreeMap<String, String> {
    table(&[
        // Common fields
        ("username", "Username"),
        ("name", "Name"),
        ("displayName", "Display name"),
        ("fullName", "Full name"),
        ("fullname", "Full name"),
        ("description", "Description"),
        ("reason", "Approval note"),
        ("operations", "Operation permissions"),
        ("action", "Action"),
        ("actionDisplay", "Action"),
        ("allowRoles", "Allowed roles"),
        ("allowedRoles", "Allowed roles"),
        ("allowedPermissions", "Allowed permissions"),
        ("allowedRules", "Allowed rules"),
        ("allowRules", "Allowed rules"),
        ("allowedrules", "Allowed rules"),
        ("enabled", "Status"),
        ("status", "Status"),
        ("email", "Email"),
        ("mobile", "Mobile"),
        ("phone", "Phone"),
        ("groupPaths", "Organization"),
        ("orgPath", "Organization"),
        ("orgPaths", "Organization"),
        ("orgName", "Organization name"),
        ("orgId", "Organization id"),
        ("securityLevel", "Security level"),
        ("personSecurityLevel", "Personnel security level"),
        ("personLevel", "Personnel security level"),
        ("personnelSecurityLevel", "Personnel security level"),
        ("personnelLevel", "Personnel security level"),
        ("deptCode", "Department code"),
        ("dept_code", "Department code"),
        ("department", "Department"),
        ("title", "Title"),
        ("allowDesensitize", "Allow masking"),
        ("allowDesensitizeJson", "Allow masking"),
        ("allowDesensitizeFlag", "Allow masking"),
        ("allowDesensitizeData", "Allow masking"),
        ("datasetName", "Dataset name"),
        ("targetRef", "Target reference"),
        ("targetReference", "Target reference"),
        // Data level / scope
        ("dataLevel", "Data level"),
        ("dataLevels", "Data level"),
        ("maxDataLevel", "Max data level"),
        ("maxDataLevels", "Max data level"),
        ("scope", "Scope"),
        ("shareScope", "Share scope"),
        // Roles / menus
        ("roles", "Roles"),
        ("resultRoles", "Roles"),
        ("realmRoles", "Roles"),
        ("clientRoles", "Client roles"),
        ("members", "Role members"),
        ("memberCount", "Member count"),
        ("memberAdds", "Members added"),
        ("memberRemoves", "Members removed"),
        ("memberAddsRequested", "Members requested to add"),
        ("memberRemovesRequested", "Members requested to remove"),
        ("menuIds", "Menu bindings"),
        ("menuBindings", "Menu bindings"),
        ("deleted", "Disabled state"),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_tables_populated() {
        let v = Vocabulary::default();
        assert_eq!(v.field_labels.get("username").unwrap(), "Username");
        assert_eq!(v.data_level_labels.get("DATA_SECRET").unwrap(), "Secret");
        assert_eq!(v.status_labels.get("PENDING").unwrap(), "Pending");
        assert!(v.truthy_tokens.contains("yes"));
    }

    #[test]
    fn test_hidden_and_menu_sets_are_distinct_configs() {
        // The two sets intentionally overlap in purpose but not in content
        // ownership; both must stay independently addressable.
        assert!(HIDDEN_SUMMARY_FIELDS.contains(&"menuchanges"));
        assert!(MENU_DIFF_FIELDS.contains(&"allowedroles"));
        assert!(!MENU_DIFF_FIELDS.contains(&"menuchanges"));
    }

    #[test]
    fn test_idp_id_is_a_default_secret_literal() {
        let v = Vocabulary::default();
        assert!(v.secret_literals.contains(IDP_CLIENT_ID));
    }

    #[test]
    fn test_menu_fields_are_lower_cased() {
        for f in MENU_DIFF_FIELDS {
            assert_eq!(*f, f.to_lowercase());
        }
    }
}
