//! The change-request boundary record.
//!
//! A `ChangeRequest` is one row of the approval workflow as returned by the
//! REST collaborator. The engine never fetches these itself; callers hand
//! fully-resident records in. `payload_json` and `diff_json` are
//! JSON-encoded strings that downstream code must parse defensively —
//! a malformed payload is treated as absent, never as an error.

use serde::{Deserialize, Serialize};

/// One change request produced by the approval workflow.
///
/// Every field except `id` is optional: backends differ in which columns
/// they populate, and several expose snake_case names. Serde aliases accept
/// both conventions on input; output is camelCase.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct ChangeRequest {
    /// Numeric request id
    pub id: Option<i64>,
    /// Resource kind the request targets (e.g. `USER`, `ROLE`, `PORTAL_MENU`)
    #[serde(alias = "resource_type")]
    pub resource_type: Option<String>,
    /// Coarse category hint (e.g. `USER_MANAGEMENT`), used when `resource_type` is absent
    pub category: Option<String>,
    /// Identifier of the targeted resource, when known
    #[serde(alias = "resource_id")]
    pub resource_id: Option<String>,
    /// Requested action verb (e.g. `CREATE`, `UPDATE`, `BATCH_UPDATE`)
    pub action: Option<String>,
    /// Operation type code, a second action vocabulary some backends emit
    #[serde(alias = "operation_type_code")]
    pub operation_type_code: Option<String>,
    /// JSON-encoded submitted payload (parse defensively)
    #[serde(alias = "payload_json")]
    pub payload_json: Option<String>,
    /// JSON-encoded before/after diff (parse defensively)
    #[serde(alias = "diff_json")]
    pub diff_json: Option<String>,
    /// Workflow status (e.g. `PENDING`, `APPROVED`, `REJECTED`)
    pub status: Option<String>,
    /// Username of the requester
    #[serde(alias = "requested_by")]
    pub requested_by: Option<String>,
    /// Submission timestamp, as delivered (not parsed)
    #[serde(alias = "requested_at")]
    pub requested_at: Option<String>,
    /// Username of the approver, once decided
    #[serde(alias = "decided_by")]
    pub decided_by: Option<String>,
    /// Decision timestamp, as delivered (not parsed)
    #[serde(alias = "decided_at")]
    pub decided_at: Option<String>,
    /// Approval note / rejection reason
    pub reason: Option<String>,
    /// JSON-encoded snapshot of the value before the change, when supplied
    #[serde(alias = "original_value")]
    pub original_value: Option<String>,
    /// JSON-encoded snapshot of the value after the change, when supplied
    #[serde(alias = "updated_value")]
    pub updated_value: Option<String>,
}

impl ChangeRequest {
    /// The action token used for mode classification: `action` falling back
    /// to `operation_type_code`.
    pub fn action_token(&self) -> Option<&str> {
        self.action
            .as_deref()
            .filter(|s| !s.trim().is_empty())
            .or(self.operation_type_code.as_deref())
    }

    /// The resource token used for categorization: `resource_type` falling
    /// back to `category`.
    pub fn resource_token(&self) -> Option<&str> {
        self.resource_type
            .as_deref()
            .filter(|s| !s.trim().is_empty())
            .or(self.category.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_camel_case() {
        let raw = r#"{"id":7,"resourceType":"USER","action":"UPDATE","diffJson":"{}"}"#;
        let req: ChangeRequest = serde_json::from_str(raw).unwrap();
        assert_eq!(req.id, Some(7));
        assert_eq!(req.resource_type.as_deref(), Some("USER"));
        assert_eq!(req.diff_json.as_deref(), Some("{}"));
    }

    #[test]
    fn test_deserialize_snake_case_aliases() {
        let raw = r#"{"resource_type":"ROLE","payload_json":"{\"name\":\"ops\"}","requested_by":"alice"}"#;
        let req: ChangeRequest = serde_json::from_str(raw).unwrap();
        assert_eq!(req.resource_token(), Some("ROLE"));
        assert_eq!(req.requested_by.as_deref(), Some("alice"));
    }

    #[test]
    fn test_action_token_prefers_action() {
        let req = ChangeRequest {
            action: Some("UPDATE".into()),
            operation_type_code: Some("BATCH_UPDATE".into()),
            ..Default::default()
        };
        assert_eq!(req.action_token(), Some("UPDATE"));
    }

    #[test]
    fn test_action_token_falls_back_when_blank() {
        let req = ChangeRequest {
            action: Some("  ".into()),
            operation_type_code: Some("DELETE".into()),
            ..Default::default()
        };
        assert_eq!(req.action_token(), Some("DELETE"));
    }

    #[test]
    fn test_missing_fields_default_to_none() {
        let req: ChangeRequest = serde_json::from_str("{}").unwrap();
        assert_eq!(req, ChangeRequest::default());
    }
}
