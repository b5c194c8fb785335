//! Tag normalization and the tag modification expression grammar.
//!
//! Tags are short, case-insensitive strings. A modification expression is a
//! comma-separated list where each item is either:
//!
//! - a bare tag — replace semantics,
//! - `+tag` — add the tag to the existing set,
//! - `~tag` — remove the tag from the existing set.
//!
//! The presence of *any* bare item causes the entire expression to be
//! treated as a full replacement with just the bare items listed; mixing
//! bare and prefixed items is therefore not meaningful beyond that rule
//! (full-replace wins).

use crate::defaults::{TAG_OR_OPERATOR, TAG_REMOVE_OPERATOR};
use crate::error::{Error, Result};

/// Lowercase, deduplicate, and sort a tag list, dropping empty entries.
pub fn normalize_tags(tags: Vec<String>) -> Vec<String> {
    let mut tags: Vec<String> = tags
        .into_iter()
        .map(|t| t.trim().to_lowercase())
        .filter(|t| !t.is_empty())
        .collect();
    tags.sort();
    tags.dedup();
    tags
}

/// Apply a tag modification expression to an existing tag set.
///
/// Returns the new, normalized tag set. An empty expression leaves the
/// existing set unchanged. An operator with no tag name (`+` or `~` alone)
/// is rejected.
///
/// ```
/// use jot_core::modify_tags;
///
/// let tags = vec!["a".to_string(), "b".to_string()];
/// assert_eq!(modify_tags(&tags, "+c").unwrap(), vec!["a", "b", "c"]);
/// assert_eq!(modify_tags(&tags, "~a").unwrap(), vec!["b"]);
/// assert_eq!(modify_tags(&tags, "c,d").unwrap(), vec!["c", "d"]);
/// ```
pub fn modify_tags(existing: &[String], expr: &str) -> Result<Vec<String>> {
    let expr = expr.trim();
    if expr.is_empty() {
        return Ok(existing.to_vec());
    }

    enum Item {
        Bare(String),
        Add(String),
        Remove(String),
    }

    let mut items = Vec::new();
    for raw in expr.split(',') {
        let raw = raw.trim();
        if raw.is_empty() {
            continue;
        }
        let item = if let Some(tag) = raw.strip_prefix(TAG_OR_OPERATOR) {
            Item::Add(require_tag_name(tag, raw)?)
        } else if let Some(tag) = raw.strip_prefix(TAG_REMOVE_OPERATOR) {
            Item::Remove(require_tag_name(tag, raw)?)
        } else {
            Item::Bare(raw.to_lowercase())
        };
        items.push(item);
    }

    // Any bare item means the whole expression is a replacement.
    let bare: Vec<String> = items
        .iter()
        .filter_map(|i| match i {
            Item::Bare(t) => Some(t.clone()),
            _ => None,
        })
        .collect();
    if !bare.is_empty() {
        return Ok(normalize_tags(bare));
    }

    let mut tags: Vec<String> = existing.iter().map(|t| t.to_lowercase()).collect();
    for item in items {
        match item {
            Item::Add(tag) => {
                if !tags.iter().any(|t| *t == tag) {
                    tags.push(tag);
                }
            }
            Item::Remove(tag) => tags.retain(|t| *t != tag),
            Item::Bare(_) => unreachable!("bare items handled above"),
        }
    }
    Ok(normalize_tags(tags))
}

fn require_tag_name(tag: &str, raw: &str) -> Result<String> {
    let tag = tag.trim();
    if tag.is_empty() {
        return Err(Error::InvalidInput(format!(
            "tag operator '{}' carries no tag name",
            raw
        )));
    }
    Ok(tag.to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tags(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_normalize_lowercases_sorts_dedups() {
        let out = normalize_tags(tags(&["Dev", "testing", "dev", "  a  "]));
        assert_eq!(out, vec!["a", "dev", "testing"]);
    }

    #[test]
    fn test_normalize_drops_empty() {
        let out = normalize_tags(tags(&["", "  ", "a"]));
        assert_eq!(out, vec!["a"]);
    }

    #[test]
    fn test_add_tag() {
        let out = modify_tags(&tags(&["a", "b"]), "+c").unwrap();
        assert_eq!(out, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_remove_tag() {
        let out = modify_tags(&tags(&["a", "b"]), "~a").unwrap();
        assert_eq!(out, vec!["b"]);
    }

    #[test]
    fn test_full_replace() {
        let out = modify_tags(&tags(&["a", "b"]), "c,d").unwrap();
        assert_eq!(out, vec!["c", "d"]);
    }

    #[test]
    fn test_mixed_adds_and_removes_apply_in_sequence() {
        let out = modify_tags(&tags(&["a", "b"]), "+c,~a,+d").unwrap();
        assert_eq!(out, vec!["b", "c", "d"]);
    }

    #[test]
    fn test_bare_item_wins_over_operators() {
        // Mixing replace-style and operator-style items resolves to a
        // full replacement with just the bare items.
        let out = modify_tags(&tags(&["a", "b"]), "+c,x,~a").unwrap();
        assert_eq!(out, vec!["x"]);
    }

    #[test]
    fn test_empty_expression_is_noop() {
        let existing = tags(&["a", "b"]);
        assert_eq!(modify_tags(&existing, "").unwrap(), existing);
        assert_eq!(modify_tags(&existing, "   ").unwrap(), existing);
    }

    #[test]
    fn test_add_existing_tag_is_noop() {
        let out = modify_tags(&tags(&["a", "b"]), "+a").unwrap();
        assert_eq!(out, vec!["a", "b"]);
    }

    #[test]
    fn test_remove_missing_tag_is_noop() {
        let out = modify_tags(&tags(&["a", "b"]), "~z").unwrap();
        assert_eq!(out, vec!["a", "b"]);
    }

    #[test]
    fn test_remove_all_tags() {
        let out = modify_tags(&tags(&["a", "b"]), "~a,~b").unwrap();
        assert!(out.is_empty());
    }

    #[test]
    fn test_case_insensitive_operations() {
        let out = modify_tags(&tags(&["dev"]), "~DEV,+Testing").unwrap();
        assert_eq!(out, vec!["testing"]);
    }

    #[test]
    fn test_bare_operator_rejected() {
        assert!(modify_tags(&tags(&["a"]), "+").is_err());
        assert!(modify_tags(&tags(&["a"]), "~").is_err());
        assert!(modify_tags(&tags(&["a"]), "+c,~").is_err());
    }

    #[test]
    fn test_replacement_is_normalized() {
        let out = modify_tags(&[], "B,a,b").unwrap();
        assert_eq!(out, vec!["a", "b"]);
    }
}
