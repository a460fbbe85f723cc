//! Change-request boundary helpers: parsing, layer assembly, mode
//! classification, target resolution, and the one-line description.

use serde_json::Value;

use changeview_core_types::ChangeRequest;

use crate::context::lookup_snapshot;
use crate::errors::{CvError, Result};
use crate::layer::{coerce_record, first_non_empty, non_empty_str, parse_json};
use crate::snapshot::collect_changes;
use crate::value::{format_value, FormatContext};

/// Parse one raw change-request record.
///
/// This is the only fallible entry point in the crate: the record is
/// supposed to be well-formed, so a non-object root or a deserialization
/// failure is reported instead of swallowed.
pub fn parse_change_request(text: &str) -> Result<ChangeRequest> {
    const OP: &str = "parse_change_request";
    let root: Value = serde_json::from_str(text).map_err(|err| CvError::Serialization {
        op: OP.into(),
        message: err.to_string(),
    })?;
    if !root.is_object() {
        return Err(CvError::InvalidRequest { op: OP.into() });
    }
    serde_json::from_value(root).map_err(|err| CvError::Serialization {
        op: OP.into(),
        message: err.to_string(),
    })
}

/// Sub-objects of the diff promoted to layers of their own.
const DIFF_SUB_KEYS: &[&str] = &["detail", "context", "metadata", "extraAttributes"];

/// Assemble the ordered raw layers for one request.
///
/// Order fixes precedence for every first-match-wins scan: the diff, its
/// detail/context/metadata/extraAttributes sub-objects, the payload, then
/// the original and updated value snapshots. Absent or unparsable pieces
/// are skipped.
pub fn request_layers(request: &ChangeRequest) -> Vec<Value> {
    let mut layers: Vec<Value> = Vec::new();

    let diff = request
        .diff_json
        .as_deref()
        .and_then(parse_json)
        .and_then(|v| coerce_record(&v));
    if let Some(diff) = &diff {
        layers.push(Value::Object(diff.clone()));
        for key in DIFF_SUB_KEYS {
            if let Some(sub) = diff.get(*key).and_then(coerce_record) {
                layers.push(Value::Object(sub));
            }
        }
    }

    if let Some(payload) = request
        .payload_json
        .as_deref()
        .and_then(parse_json)
        .and_then(|v| coerce_record(&v))
    {
        layers.push(Value::Object(payload));
    }
    for raw in [request.original_value.as_deref(), request.updated_value.as_deref()] {
        if let Some(record) = raw.and_then(parse_json).and_then(|v| coerce_record(&v)) {
            layers.push(Value::Object(record));
        }
    }

    layers
}

/// Coarse classification of what a request does to its target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeMode {
    Create,
    Update,
    Delete,
}

impl ChangeMode {
    /// Classify from the request's action token. Creation verbs (`create`,
    /// `add`, `new`) and deletion verbs (`delete`, `remove`) are matched as
    /// substrings, case-insensitively; everything else is an update.
    pub fn classify(request: &ChangeRequest) -> ChangeMode {
        let token = request.action_token().unwrap_or("").to_lowercase();
        if ["create", "add", "new"].iter().any(|verb| token.contains(verb)) {
            ChangeMode::Create
        } else if ["delete", "remove"].iter().any(|verb| token.contains(verb)) {
            ChangeMode::Delete
        } else {
            ChangeMode::Update
        }
    }
}

/// Keys tried on a layer when resolving the request's target name.
const TARGET_NAME_KEYS: &[&str] = &["username", "name", "displayName", "title"];

/// Resolve a display name for the request's target.
///
/// Tries the explicit `resource_id`, then a username/name from any layer
/// (including a diff's `after` state), mapping usernames through the
/// caller-supplied user directory when possible.
pub fn resolve_target(
    request: &ChangeRequest,
    layers: &[Value],
    ctx: &FormatContext,
) -> Option<String> {
    let raw = request
        .resource_id
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .or_else(|| {
            first_non_empty(layers, |record| {
                TARGET_NAME_KEYS
                    .iter()
                    .find_map(|key| record.get(*key).and_then(non_empty_str))
                    .or_else(|| {
                        let after = record.get("after").and_then(coerce_record)?;
                        TARGET_NAME_KEYS
                            .iter()
                            .find_map(|key| after.get(*key).and_then(non_empty_str))
                    })
            })
        })?;
    Some(
        ctx.display_names
            .user(&raw)
            .map(str::to_string)
            .unwrap_or(raw),
    )
}

/// How many change lines the one-line description carries at most.
const DESCRIPTION_CHANGE_BUDGET: usize = 3;

/// Build the compact one-line description of a request:
/// `"<action> <subject> <field>: <before> → <after>; …"`.
///
/// Unresolvable components fall back to the vocabulary's fixed words;
/// the description never fails.
pub fn describe_change_request(request: &ChangeRequest, ctx: &FormatContext) -> String {
    let vocab = &ctx.vocabulary;
    let layers = request_layers(request);

    let action = request
        .action_token()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|token| {
            vocab
                .operation_type_labels
                .get(&token.to_uppercase())
                .cloned()
                .unwrap_or_else(|| token.to_string())
        })
        .unwrap_or_else(|| vocab.unknown_action.clone());

    let subject = resolve_target(request, &layers, ctx)
        .or_else(|| request.resource_token().map(str::to_string))
        .unwrap_or_else(|| vocab.unknown_subject.clone());

    let snapshot = lookup_snapshot(&layers);
    let parts: Vec<String> = snapshot
        .map(|snap| collect_changes(&snap, DESCRIPTION_CHANGE_BUDGET, vocab))
        .unwrap_or_default()
        .into_iter()
        .map(|entry| {
            let label = if entry.label.trim().is_empty() {
                vocab.unknown_field.clone()
            } else {
                entry.label
            };
            format!(
                "{label}: {} → {}",
                format_value(&entry.field, &entry.before, ctx),
                format_value(&entry.field, &entry.after, ctx)
            )
        })
        .collect();

    if parts.is_empty() {
        format!("{action} {subject}")
    } else {
        format!("{action} {subject} {}", parts.join("; "))
    }
}
