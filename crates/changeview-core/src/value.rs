//! Contextual value formatting.
//!
//! `format_value` maps a (field key, raw value) pair to a display string.
//! The key is normalized to one camelCase token and dispatched against the
//! recognized field families; unknown shapes fall through to a generic
//! branch. The formatter is total: it never fails and never panics.

use serde_json::Value;

use changeview_core_types::DisplayNames;

use crate::label::{normalize_key, strip_decorators};
use crate::vocabulary::Vocabulary;

/// Read-only formatting context for one summarization call.
#[derive(Debug, Clone, Default)]
pub struct FormatContext {
    /// Locale dictionaries and display tokens
    pub vocabulary: Vocabulary,
    /// Caller-supplied role/user display-name tables
    pub display_names: DisplayNames,
}

/// Key suffixes recognized as the personnel-security-level family.
const PERSON_LEVEL_SUFFIXES: &[&str] = &[
    "personsecuritylevel",
    "person_level",
    "person_security_level",
    "personlevel",
    "personnelsecuritylevel",
    "personnel_security_level",
];

/// Truthiness for boolean-like fields.
///
/// Explicit booleans pass through; numbers are a non-zero test; strings are
/// matched case-insensitively against the vocabulary's truthy token set;
/// anything else is falsy.
pub fn truthy(value: &Value, vocab: &Vocabulary) -> bool {
    match value {
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => vocab.truthy_tokens.contains(&s.trim().to_lowercase()),
        _ => false,
    }
}

/// Equality by JSON serialization, used to drop no-op change entries.
pub fn values_equal(a: &Value, b: &Value) -> bool {
    a == b || a.to_string() == b.to_string()
}

/// Format a raw value for display under the given field key.
///
/// Null and empty-string input short-circuit to the empty placeholder
/// before any family dispatch.
pub fn format_value(key: &str, value: &Value, ctx: &FormatContext) -> String {
    let vocab = &ctx.vocabulary;
    if is_empty_input(value) {
        return vocab.empty_placeholder.clone();
    }

    if is_person_level_key(key) {
        return map_array(value, vocab, |item| {
            let raw = scalar_string(item, vocab);
            vocab
                .person_level_labels
                .get(&raw.to_uppercase())
                .cloned()
                .unwrap_or(raw)
        });
    }

    let normalized = normalize_key(key).to_lowercase();
    match normalized.as_str() {
        "datalevel" | "datalevels" | "maxdatalevel" | "maxdatalevels" => {
            map_array(value, vocab, |item| {
                let raw = scalar_string(item, vocab);
                vocab.data_level_labels.get(&raw).cloned().unwrap_or(raw)
            })
        }
        "operations" | "dataoperations" => map_array(value, vocab, |item| {
            let raw = scalar_string(item, vocab);
            vocab.operation_labels.get(&raw).cloned().unwrap_or(raw)
        }),
        "role" | "roles" | "resultroles" | "realmroles" | "clientroles" | "allowroles" => {
            map_array(value, vocab, |item| format_role(item, ctx))
        }
        "username" => {
            let raw = scalar_string(value, vocab);
            let trimmed = raw.trim();
            if trimmed.is_empty() {
                return vocab.empty_placeholder.clone();
            }
            ctx.display_names
                .user(trimmed)
                .map(str::to_string)
                .unwrap_or_else(|| trimmed.to_string())
        }
        "scope" => {
            let raw = scalar_string(value, vocab);
            vocab.scope_labels.get(&raw).cloned().unwrap_or(raw)
        }
        "sharescope" => {
            let raw = scalar_string(value, vocab);
            vocab.share_scope_labels.get(&raw).cloned().unwrap_or(raw)
        }
        "keycloakid" => vocab.masked_token.clone(),
        "enabled" | "active" | "isenabled" | "available" | "statusenabled" => {
            if truthy(value, vocab) {
                vocab.on_token.clone()
            } else {
                vocab.off_token.clone()
            }
        }
        "allowdesensitize" | "allowdesensitizejson" | "allowdesensitizeflag"
        | "allowdesensitizedata" => {
            if truthy(value, vocab) {
                vocab.yes_token.clone()
            } else {
                vocab.no_token.clone()
            }
        }
        "status" => {
            let raw = scalar_string(value, vocab);
            vocab
                .status_labels
                .get(&raw.to_uppercase())
                .cloned()
                .unwrap_or(raw)
        }
        "operationtype" => {
            let raw = scalar_string(value, vocab);
            vocab
                .operation_type_labels
                .get(&raw.to_uppercase())
                .cloned()
                .unwrap_or(raw)
        }
        "allowedrules" | "allowrules" => map_array(value, vocab, |item| format_rule(item, vocab)),
        _ => format_generic(value, vocab),
    }
}

fn is_empty_input(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        _ => false,
    }
}

fn is_person_level_key(key: &str) -> bool {
    let normalized = strip_decorators(key).to_lowercase();
    PERSON_LEVEL_SUFFIXES
        .iter()
        .any(|suffix| normalized.ends_with(suffix))
}

/// Apply `mapper` to each element of an array-or-scalar and join the
/// results. An empty list formats to the empty placeholder.
fn map_array<F>(value: &Value, vocab: &Vocabulary, mapper: F) -> String
where
    F: Fn(&Value) -> String,
{
    let rendered: Vec<String> = match value {
        Value::Array(items) => items.iter().map(&mapper).collect(),
        Value::Null => Vec::new(),
        other => vec![mapper(other)],
    };
    if rendered.is_empty() {
        return vocab.empty_placeholder.clone();
    }
    rendered.join(&vocab.list_separator)
}

fn format_role(item: &Value, ctx: &FormatContext) -> String {
    let vocab = &ctx.vocabulary;
    let raw = scalar_string(item, vocab);
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return vocab.empty_placeholder.clone();
    }
    if let Some(mapped) = ctx.display_names.role(trimmed) {
        return mapped.to_string();
    }
    if trimmed.to_uppercase().starts_with("DEFAULT-ROLES-") {
        return vocab.default_role_label.clone();
    }
    trimmed.to_string()
}

fn format_rule(item: &Value, vocab: &Vocabulary) -> String {
    match item {
        Value::Null => vocab.empty_placeholder.clone(),
        Value::String(s) => s.clone(),
        Value::Object(map) => {
            let display = map
                .get("label")
                .or_else(|| map.get("name"))
                .and_then(Value::as_str);
            match display {
                Some(text) => text.to_string(),
                None => dump(item, vocab),
            }
        }
        other => scalar_string(other, vocab),
    }
}

fn format_generic(value: &Value, vocab: &Vocabulary) -> String {
    match value {
        Value::Array(_) => map_array(value, vocab, |item| match item {
            Value::String(s) => s.clone(),
            other => dump(other, vocab),
        }),
        Value::Bool(b) => {
            if *b {
                vocab.yes_token.clone()
            } else {
                vocab.no_token.clone()
            }
        }
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.clone(),
        other => dump(other, vocab),
    }
}

/// Stringify a scalar; non-scalars fall back to a structural dump.
fn scalar_string(value: &Value, vocab: &Vocabulary) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        other => dump(other, vocab),
    }
}

/// Compact structural dump with secret literals masked.
fn dump(value: &Value, vocab: &Vocabulary) -> String {
    let mut text = value.to_string();
    for secret in &vocab.secret_literals {
        if !secret.is_empty() {
            text = text.replace(secret.as_str(), &vocab.masked_token);
        }
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn ctx() -> FormatContext {
        let mut ctx = FormatContext::default();
        ctx.display_names
            .roles
            .insert("SYSADMIN".into(), "System Admin".into());
        ctx.display_names
            .users
            .insert("alice".into(), "Alice L.".into());
        ctx
    }

    #[test]
    fn test_empty_inputs_short_circuit() {
        let ctx = ctx();
        for key in ["enabled", "username", "anything.at_all"] {
            assert_eq!(format_value(key, &Value::Null, &ctx), "—");
            assert_eq!(format_value(key, &json!(""), &ctx), "—");
        }
    }

    #[test]
    fn test_boolean_like_returns_exactly_two_tokens() {
        let ctx = ctx();
        assert_eq!(format_value("enabled", &json!("yes"), &ctx), "Enabled");
        assert_eq!(format_value("enabled", &json!(true), &ctx), "Enabled");
        assert_eq!(format_value("enabled", &json!(1), &ctx), "Enabled");
        assert_eq!(format_value("enabled", &json!(0), &ctx), "Disabled");
        assert_eq!(format_value("enabled", &json!("nope"), &ctx), "Disabled");
        assert_eq!(format_value("active", &json!("TRUE"), &ctx), "Enabled");
    }

    #[test]
    fn test_person_level_family_matches_by_suffix() {
        let ctx = ctx();
        assert_eq!(
            format_value("attributes.person_security_level", &json!("GENERAL"), &ctx),
            "General"
        );
        assert_eq!(
            format_value("personnelSecurityLevel", &json!(["CORE", "X9"]), &ctx),
            "Core, X9"
        );
    }

    #[test]
    fn test_data_level_dictionary() {
        let ctx = ctx();
        assert_eq!(format_value("dataLevel", &json!("DATA_SECRET"), &ctx), "Secret");
        assert_eq!(format_value("data_level", &json!("DATA_PUBLIC"), &ctx), "Public");
        // unknown codes pass through unchanged
        assert_eq!(format_value("dataLevel", &json!("DATA_X"), &ctx), "DATA_X");
    }

    #[test]
    fn test_roles_map_through_display_names() {
        let ctx = ctx();
        assert_eq!(
            format_value("roles", &json!(["sysadmin", "OPS"]), &ctx),
            "System Admin, OPS"
        );
        assert_eq!(
            format_value("roles", &json!("default-roles-master"), &ctx),
            "Default role"
        );
    }

    #[test]
    fn test_username_lookup_degrades_to_raw() {
        let ctx = ctx();
        assert_eq!(format_value("username", &json!("ALICE"), &ctx), "Alice L.");
        assert_eq!(format_value("username", &json!("bob"), &ctx), "bob");
    }

    #[test]
    fn test_secret_key_always_masked() {
        let ctx = ctx();
        assert_eq!(
            format_value("keycloakId", &json!("7f38-uuid-value"), &ctx),
            "***"
        );
    }

    #[test]
    fn test_status_and_operation_type() {
        let ctx = ctx();
        assert_eq!(format_value("status", &json!("pending"), &ctx), "Pending");
        assert_eq!(format_value("status", &json!("ODD"), &ctx), "ODD");
        assert_eq!(
            format_value("operationType", &json!("BATCH_UPDATE"), &ctx),
            "Batch update"
        );
    }

    #[test]
    fn test_rule_lists_prefer_label_then_name() {
        let ctx = ctx();
        let rules = json!([
            "plain-rule",
            {"label": "Labelled"},
            {"name": "Named"},
            {"weight": 3}
        ]);
        assert_eq!(
            format_value("allowedRules", &rules, &ctx),
            "plain-rule, Labelled, Named, {\"weight\":3}"
        );
    }

    #[test]
    fn test_generic_branch() {
        let ctx = ctx();
        assert_eq!(format_value("misc", &json!(["a", {"b": 1}]), &ctx), "a, {\"b\":1}");
        assert_eq!(format_value("misc", &json!(true), &ctx), "Yes");
        assert_eq!(format_value("misc", &json!(12.5), &ctx), "12.5");
        assert_eq!(format_value("misc", &json!("text"), &ctx), "text");
        assert_eq!(format_value("misc", &json!({"k": "v"}), &ctx), "{\"k\":\"v\"}");
    }

    #[test]
    fn test_default_context_masks_idp_id_in_dumps() {
        let ctx = FormatContext::default();
        assert_eq!(
            format_value(
                "attributes",
                &json!({"idp": "7f3868a1-9c8c-4122-b7e4-7f921a40c019"}),
                &ctx
            ),
            "{\"idp\":\"***\"}"
        );
    }

    #[test]
    fn test_secret_literals_masked_in_dumps() {
        let mut ctx = ctx();
        ctx.vocabulary
            .secret_literals
            .insert("7f3868a1-9c8c-4122".into());
        assert_eq!(
            format_value("misc", &json!({"idp": "7f3868a1-9c8c-4122"}), &ctx),
            "{\"idp\":\"***\"}"
        );
    }

    #[test]
    fn test_truthy_predicate() {
        let vocab = Vocabulary::default();
        assert!(truthy(&json!(true), &vocab));
        assert!(truthy(&json!(2), &vocab));
        assert!(truthy(&json!(" Yes "), &vocab));
        assert!(!truthy(&json!(0), &vocab));
        assert!(!truthy(&json!("off"), &vocab));
        assert!(!truthy(&json!([1]), &vocab));
        assert!(!truthy(&Value::Null, &vocab));
    }

    #[test]
    fn test_values_equal_by_serialization() {
        assert!(values_equal(&json!({"a": 1}), &json!({"a": 1})));
        assert!(!values_equal(&json!(1), &json!("1")));
    }
}
