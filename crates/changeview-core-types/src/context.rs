//! Caller-supplied display-name lookups.
//!
//! The directory collaborator maps role and user codes to human-readable
//! names. The tables are optional: an absent or incomplete table degrades
//! gracefully to showing the raw code.

use std::collections::BTreeMap;

/// Read-only role/user display-name tables for one summarization call.
///
/// Lookups try the code as given, then upper-cased, then lower-cased, so
/// a table keyed in any one convention still resolves codes delivered in
/// another.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DisplayNames {
    /// Role code -> display name
    pub roles: BTreeMap<String, String>,
    /// Username -> display name
    pub users: BTreeMap<String, String>,
}

impl DisplayNames {
    /// Look up a role display name; `None` when the code is unknown.
    pub fn role(&self, code: &str) -> Option<&str> {
        lookup(&self.roles, code)
    }

    /// Look up a user display name; `None` when the username is unknown.
    pub fn user(&self, username: &str) -> Option<&str> {
        lookup(&self.users, username)
    }
}

fn lookup<'a>(table: &'a BTreeMap<String, String>, code: &str) -> Option<&'a str> {
    if let Some(hit) = table.get(code) {
        return Some(hit.as_str());
    }
    if let Some(hit) = table.get(&code.to_uppercase()) {
        return Some(hit.as_str());
    }
    table.get(&code.to_lowercase()).map(String::as_str)
}
