//! Field-label resolution across naming conventions.
//!
//! Raw change payloads name the same logical field many ways:
//! `user_name`, `userName`, `attributes.user_name`, `UserName[0]`. The
//! resolver derives an ordered, deduplicated candidate list from a raw key
//! and returns the first dictionary hit; when nothing matches it falls back
//! to the last dotted segment so the display never shows a full path.
//!
//! Resolution is total: it never fails and never returns an empty string
//! for a non-empty key.

use crate::vocabulary::Vocabulary;

/// Remove bracketed index decorations: `roles[0]` -> `roles`.
pub fn strip_decorators(key: &str) -> String {
    let mut out = String::with_capacity(key.len());
    let mut depth = 0usize;
    for ch in key.chars() {
        match ch {
            '[' => depth += 1,
            ']' => depth = depth.saturating_sub(1),
            _ if depth == 0 => out.push(ch),
            _ => {}
        }
    }
    out
}

/// Convert a key to camelCase: lower-case everything, then upper-case each
/// character that follows a `-`, `_`, `.`, or whitespace separator.
pub fn to_camel_case(input: &str) -> String {
    let trimmed = input.trim_start_matches(|c: char| matches!(c, '_' | '.' | '-') || c.is_whitespace());
    let mut out = String::with_capacity(trimmed.len());
    let mut upper_next = false;
    for ch in trimmed.chars() {
        if matches!(ch, '-' | '_' | '.') || ch.is_whitespace() {
            upper_next = true;
            continue;
        }
        let lowered = ch.to_ascii_lowercase();
        if upper_next {
            out.push(lowered.to_ascii_uppercase());
            upper_next = false;
        } else {
            out.push(lowered);
        }
    }
    out
}

/// The last dot-separated path segment of a stripped key.
fn tail_segment(stripped: &str) -> &str {
    match stripped.rfind('.') {
        Some(idx) => &stripped[idx + 1..],
        None => stripped,
    }
}

/// Normalize a key to a single lower-first camelCase token.
///
/// This is the dictionary-free variant of candidate derivation used by the
/// value formatter's dispatch.
pub fn normalize_key(key: &str) -> String {
    let stripped = strip_decorators(key);
    let tail = tail_segment(&stripped);
    let camel = to_camel_case(tail);
    if camel.is_empty() {
        return tail.to_lowercase();
    }
    lower_first(&camel)
}

fn lower_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_ascii_lowercase().to_string() + chars.as_str(),
        None => String::new(),
    }
}

fn upper_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
        None => String::new(),
    }
}

/// Derive the ordered, deduplicated candidate-key list for a raw key.
///
/// Order is fixed: stripped key, its lowercase, the last dotted segment,
/// its lowercase, the camelCase form (lower- and upper-first variants),
/// the snake_case form, and its lowercase.
pub fn candidate_keys(raw_key: &str) -> Vec<String> {
    let mut candidates: Vec<String> = Vec::new();
    let mut push = |value: String| {
        if !value.is_empty() && !candidates.contains(&value) {
            candidates.push(value);
        }
    };

    let stripped = strip_decorators(raw_key);
    push(stripped.clone());
    push(stripped.to_lowercase());

    let tail = tail_segment(&stripped).to_string();
    push(tail.clone());
    push(tail.to_lowercase());

    let camel = to_camel_case(&tail);
    if !camel.is_empty() {
        push(camel.clone());
        push(lower_first(&camel));
        push(upper_first(&camel));
    }

    let snake: String = tail
        .chars()
        .map(|c| if matches!(c, '-' | '.') || c.is_whitespace() { '_' } else { c })
        .collect();
    push(snake.clone());
    push(snake.to_lowercase());

    candidates
}

/// Resolve the display label for a raw field key.
///
/// Tries every candidate against the vocabulary's field-label table in
/// order; when nothing hits, falls back to the last dotted segment (or the
/// raw key when it has no path separators) so the caller gets a short,
/// readable token rather than a full dotted path.
pub fn label_for_field(key: &str, vocab: &Vocabulary) -> String {
    for candidate in candidate_keys(key) {
        if let Some(label) = vocab.field_labels.get(&candidate) {
            return label.clone();
        }
    }
    let stripped = strip_decorators(key);
    let tail = tail_segment(&stripped);
    if !tail.is_empty() {
        return tail.to_string();
    }
    if !stripped.is_empty() {
        return stripped;
    }
    if key.is_empty() {
        vocab.generic_field_label.clone()
    } else {
        key.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_decorators() {
        assert_eq!(strip_decorators("roles[0]"), "roles");
        assert_eq!(strip_decorators("a[10].b[x]"), "a.b");
        assert_eq!(strip_decorators("plain"), "plain");
    }

    #[test]
    fn test_to_camel_case() {
        assert_eq!(to_camel_case("user_name"), "userName");
        assert_eq!(to_camel_case("USER_NAME"), "userName");
        assert_eq!(to_camel_case("person-security-level"), "personSecurityLevel");
        assert_eq!(to_camel_case("__leading"), "leading");
        assert_eq!(to_camel_case(""), "");
    }

    #[test]
    fn test_normalize_key_takes_tail_segment() {
        assert_eq!(normalize_key("attributes.person_security_level"), "personSecurityLevel");
        assert_eq!(normalize_key("UserName[0]"), "username");
        assert_eq!(normalize_key("enabled"), "enabled");
    }

    #[test]
    fn test_candidate_order_and_dedup() {
        let candidates = candidate_keys("attributes.user_name");
        assert_eq!(candidates[0], "attributes.user_name");
        assert!(candidates.contains(&"user_name".to_string()));
        assert!(candidates.contains(&"userName".to_string()));
        assert!(candidates.contains(&"UserName".to_string()));
        let mut unique = candidates.clone();
        unique.dedup();
        assert_eq!(unique.len(), candidates.len());
    }

    #[test]
    fn test_same_label_across_conventions() {
        let vocab = Vocabulary::default();
        let expected = label_for_field("username", &vocab);
        for key in ["user_name", "userName", "attributes.user_name", "UserName[0]"] {
            assert_eq!(label_for_field(key, &vocab), expected, "key {key}");
        }
    }

    #[test]
    fn test_fallback_is_tail_segment_not_full_path() {
        let vocab = Vocabulary::default();
        assert_eq!(label_for_field("attributes.obscure_field", &vocab), "obscure_field");
        assert_eq!(label_for_field("obscureField", &vocab), "obscureField");
    }

    #[test]
    fn test_empty_key_resolves_to_generic_label() {
        let vocab = Vocabulary::default();
        assert_eq!(label_for_field("", &vocab), vocab.generic_field_label);
    }
}
