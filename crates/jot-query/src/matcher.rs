//! Per-field clause matching.
//!
//! Deterministic and side-effect free. All non-regex matching is
//! case-insensitive; regex matching is case-sensitive as written unless
//! the pattern itself opts out (e.g. `(?i)`).
//!
//! Body (`note`) matching is line-oriented: a literal term is a
//! case-insensitive substring test per body line, and a regex is tested
//! against each line. The matching lines double as the search excerpt.

use jot_core::defaults::MATCH_ANY;
use jot_core::Note;

use crate::parse::{Clause, FieldType, Query, Term};

/// Test a single clause against a note.
///
/// `default_notebook` supplies the logical notebook for notes that carry
/// none. A clause targeting an absent optional field never matches.
pub fn clause_matches(clause: &Clause, note: &Note, default_notebook: &str) -> bool {
    match clause.field {
        FieldType::Uid => literal_contains(&clause.term, &note.uid.to_string()),
        FieldType::Alias => literal_contains(&clause.term, &note.alias),
        FieldType::Title => literal_contains(&clause.term, &note.title),
        FieldType::Description => match &note.description {
            Some(description) => literal_contains(&clause.term, description),
            None => false,
        },
        FieldType::Notebook => {
            literal_contains(&clause.term, note.effective_notebook(default_notebook))
        }
        FieldType::Tags => match &clause.term {
            Term::AnyTags(tags) => tags.iter().any(|t| note.has_tag(t)),
            _ => false,
        },
        FieldType::Note => body_matches(&clause.term, &note.body),
    }
}

/// Test a whole query against a note: every clause must match. The empty
/// (match-all) query matches everything.
pub fn query_matches(query: &Query, note: &Note, default_notebook: &str) -> bool {
    query
        .clauses
        .iter()
        .all(|clause| clause_matches(clause, note, default_notebook))
}

/// Case-insensitive substring test for plain metadata fields.
fn literal_contains(term: &Term, field: &str) -> bool {
    match term {
        Term::Literal(t) => field.to_lowercase().contains(&t.to_lowercase()),
        // Regex on these fields is rejected at parse time; AnyTags never
        // targets them.
        _ => false,
    }
}

fn body_matches(term: &Term, body: &str) -> bool {
    match term {
        Term::Literal(t) => {
            if t.eq_ignore_ascii_case(MATCH_ANY) {
                return true;
            }
            let needle = t.to_lowercase();
            body.lines().any(|line| line.to_lowercase().contains(&needle))
        }
        Term::Regex(regex) => body.lines().any(|line| regex.is_match(line)),
        Term::AnyTags(_) => false,
    }
}

/// Test one body line against a `note` clause term, used for excerpt
/// extraction. The `any` term contributes no excerpt lines.
pub(crate) fn line_matches(term: &Term, line: &str) -> bool {
    match term {
        Term::Literal(t) => {
            !t.eq_ignore_ascii_case(MATCH_ANY)
                && line.to_lowercase().contains(&t.to_lowercase())
        }
        Term::Regex(regex) => regex.is_match(line),
        Term::AnyTags(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::parse;
    use jot_core::NoteMetadata;

    fn note() -> Note {
        NoteMetadata {
            uid: Some("5e6f29be-1f1b-4326-9a29-e26b7e1f101c".to_string()),
            alias: Some("ab12".to_string()),
            title: Some("Project planning".to_string()),
            description: Some("Quarterly roadmap".to_string()),
            notebook: Some("Work".to_string()),
            tags: Some(vec!["Dev".to_string(), "planning".to_string()]),
            ..Default::default()
        }
        .into_note(
            "First line about projects\nSecond line\nProjectA kickoff".to_string(),
            None,
            None,
        )
        .unwrap()
    }

    fn matches(raw: &str, note: &Note) -> bool {
        let parsed = parse(raw, None).unwrap();
        query_matches(&parsed.search, note, "default")
    }

    #[test]
    fn test_title_substring_case_insensitive() {
        let n = note();
        assert!(matches("title=PLAN", &n));
        assert!(matches("title=project plan", &n));
        assert!(!matches("title=retro", &n));
    }

    #[test]
    fn test_uid_substring() {
        let n = note();
        assert!(matches("uid=5e6f29be", &n));
        assert!(!matches("uid=ffffffff", &n));
    }

    #[test]
    fn test_alias_substring() {
        let n = note();
        assert!(matches("alias=AB1", &n));
    }

    #[test]
    fn test_description_substring_and_absent() {
        let mut n = note();
        assert!(matches("description=roadmap", &n));
        n.description = None;
        assert!(!matches("description=roadmap", &n));
    }

    #[test]
    fn test_notebook_substring_uses_default_fallback() {
        let mut n = note();
        assert!(matches("notebook=wor", &n));
        n.notebook = None;
        assert!(matches("notebook=default", &n));
        assert!(!matches("notebook=work", &n));
    }

    #[test]
    fn test_tags_exact_not_substring() {
        let n = note();
        assert!(matches("tags=dev", &n));
        assert!(matches("tags=DEV", &n));
        assert!(!matches("tags=de", &n));
    }

    #[test]
    fn test_tags_any_of() {
        let n = note();
        assert!(matches("tags=dev+testing", &n));
        assert!(matches("tags=testing+planning", &n));
        assert!(!matches("tags=testing+qa", &n));
    }

    #[test]
    fn test_body_literal_per_line() {
        let n = note();
        assert!(matches("second LINE", &n));
        assert!(!matches("nowhere", &n));
        // Substrings never span line boundaries.
        assert!(!matches("projects\nSecond", &n));
    }

    #[test]
    fn test_body_any_matches_even_empty_body() {
        let mut n = note();
        n.body = String::new();
        assert!(matches("any", &n));
        assert!(matches("note=any", &n));
    }

    #[test]
    fn test_body_regex_case_sensitive_as_written() {
        let n = note();
        assert!(matches("/Project[AB]/", &n));
        assert!(!matches("/project[AB]/", &n));
        assert!(matches("/(?i)project[AB]/", &n));
    }

    #[test]
    fn test_empty_body_fails_body_terms() {
        let mut n = note();
        n.body = String::new();
        assert!(!matches("project", &n));
        assert!(!matches("/x/", &n));
    }

    #[test]
    fn test_all_clauses_must_match() {
        let n = note();
        assert!(matches("notebook=work,tags=dev+testing", &n));
        assert!(!matches("notebook=work,tags=qa", &n));
        assert!(!matches("notebook=home,tags=dev", &n));
    }

    #[test]
    fn test_match_all_query_matches_everything() {
        let n = note();
        assert!(matches("any", &n));
        assert!(matches("", &n));
    }

    #[test]
    fn test_line_matches_literal() {
        let parsed = parse("project", None).unwrap();
        let term = &parsed.search.clauses[0].term;
        assert!(line_matches(term, "First line about projects"));
        assert!(!line_matches(term, "Second line"));
    }

    #[test]
    fn test_line_matches_any_contributes_nothing() {
        let parsed = parse("note=any", None).unwrap();
        assert!(!line_matches(&parsed.search.clauses[0].term, "anything at all"));
    }
}
