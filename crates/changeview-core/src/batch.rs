//! Labels for one row of a batch diff.
//!
//! A batch payload carries one [`ItemDiff`] per affected entity; rows are
//! often sparsely named. The labeler tries the row itself, then its after
//! and before states, then the id, then an ordinal.

use crate::layer::non_empty_str;
use crate::snapshot::ItemDiff;
use crate::vocabulary::Vocabulary;

/// Name keys tried on a row's before/after state, in order.
const STATE_NAME_KEYS: &[&str] = &["label", "name", "displayName", "title"];

/// Resolve the display label for one batch row.
///
/// Preference order: the row's own `label`/`name`/`displayName`/`title`;
/// the same four keys on the after state; then on the before state; the
/// row id in the id template; finally the 1-based ordinal template.
/// Note the own-name order differs from the flattener's path labels,
/// which prefer `displayName` over `name`.
pub fn batch_item_label(item: &ItemDiff, index: usize, vocab: &Vocabulary) -> String {
    let own = [
        item.label.as_deref(),
        item.name.as_deref(),
        item.display_name.as_deref(),
        item.title.as_deref(),
    ]
    .into_iter()
    .flatten()
    .map(str::trim)
    .find(|s| !s.is_empty());
    if let Some(own) = own {
        return own.to_string();
    }
    for state in [item.after.as_ref(), item.before.as_ref()].into_iter().flatten() {
        for key in STATE_NAME_KEYS {
            if let Some(name) = state.get(*key).and_then(non_empty_str) {
                return name;
            }
        }
    }
    if let Some(id) = non_empty_str(&item.id) {
        return vocab.item_id_template.replace("{id}", &id);
    }
    vocab
        .item_ordinal_template
        .replace("{n}", &(index + 1).to_string())
}

/// Cosmetic rewrite of a recognized operation-type prefix in a row label.
///
/// The label is split on the first `·`; when the prefix matches an
/// operation-type code it is replaced by the dictionary label, a `BATCH_`
/// prefix being rendered through the batch word. Unrecognized labels pass
/// through untouched.
pub fn beautify_batch_label(label: &str, vocab: &Vocabulary) -> String {
    match label.split_once('·') {
        Some((head, tail)) => {
            let rewritten = rewrite_operation_token(head.trim(), vocab);
            format!("{rewritten} · {}", tail.trim())
        }
        None => rewrite_operation_token(label.trim(), vocab),
    }
}

fn rewrite_operation_token(token: &str, vocab: &Vocabulary) -> String {
    let code = token.to_uppercase().replace([' ', '-'], "_");
    if let Some(mapped) = vocab.operation_type_labels.get(&code) {
        return mapped.clone();
    }
    if let Some(rest) = code.strip_prefix("BATCH_") {
        let tail = vocab
            .operation_type_labels
            .get(rest)
            .map(|s| s.to_lowercase())
            .unwrap_or_else(|| rest.to_lowercase());
        return format!("{} {}", vocab.batch_word, tail);
    }
    token.to_string()
}
