//! Query evaluation against a collection snapshot.
//!
//! Combines clause results (AND across clauses), applies the exclusion
//! query as a negation filter, and yields the final result set in
//! collection order (notebook, then alias) with an excerpt for body
//! matches. No ranking or scoring is performed.

use tracing::debug;

use jot_core::defaults::MATCH_ANY;
use jot_core::{Note, NoteCollection, Result};

use crate::matcher::{line_matches, query_matches};
use crate::parse::{parse, FieldType, ParsedSearch, Query, Term};

/// One search hit: the matching note plus, for body matches, the matching
/// body lines as a contextual excerpt.
#[derive(Debug, Clone)]
pub struct SearchResult {
    pub note: Note,
    pub excerpt: Option<String>,
}

/// Evaluate a parsed search against a collection snapshot.
///
/// A note is a result iff the search query matches it and the exclusion
/// query (when present) does not. Evaluation is deterministic: the same
/// query against an unchanged snapshot yields identical ordered results.
/// An empty result set is a valid outcome, not an error.
pub fn evaluate(collection: &NoteCollection, parsed: &ParsedSearch) -> Vec<SearchResult> {
    let default_notebook = collection.default_notebook();
    let mut results = Vec::new();
    for note in collection.iter() {
        if !query_matches(&parsed.search, note, default_notebook) {
            continue;
        }
        if let Some(exclusion) = &parsed.exclusion {
            if query_matches(exclusion, note, default_notebook) {
                continue;
            }
        }
        results.push(SearchResult {
            excerpt: extract_excerpt(&parsed.search, note),
            note: note.clone(),
        });
    }
    debug!(result_count = results.len(), "evaluated search query");
    results
}

/// Parse and evaluate in one step.
///
/// A syntax error in either expression is fatal to the whole call; the
/// result set is never silently unfiltered or partial.
pub fn search(
    collection: &NoteCollection,
    raw_search: &str,
    raw_exclusion: Option<&str>,
) -> Result<Vec<SearchResult>> {
    let parsed = parse(raw_search, raw_exclusion)?;
    Ok(evaluate(collection, &parsed))
}

/// Matching body lines for the query's `note` clauses, trimmed and
/// newline-joined, in body order. `None` when the query has no body
/// clause (or the clause was the unconditional `any`).
fn extract_excerpt(query: &Query, note: &Note) -> Option<String> {
    let terms: Vec<&Term> = query
        .clauses
        .iter()
        .filter(|c| c.field == FieldType::Note)
        .filter(|c| match &c.term {
            Term::Literal(t) => !t.eq_ignore_ascii_case(MATCH_ANY),
            Term::Regex(_) => true,
            Term::AnyTags(_) => false,
        })
        .map(|c| &c.term)
        .collect();
    if terms.is_empty() {
        return None;
    }

    let lines: Vec<&str> = note
        .body
        .lines()
        .filter(|line| terms.iter().any(|term| line_matches(term, line)))
        .map(str::trim)
        .collect();
    if lines.is_empty() {
        None
    } else {
        Some(lines.join("\n"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jot_core::{Error, NoteMetadata};
    use uuid::Uuid;

    fn note(alias: &str, notebook: &str, tags: &[&str], title: &str, body: &str) -> Note {
        NoteMetadata {
            uid: Some(Uuid::new_v4().to_string()),
            alias: Some(alias.to_string()),
            title: Some(title.to_string()),
            notebook: Some(notebook.to_string()),
            tags: Some(tags.iter().map(|t| t.to_string()).collect()),
            ..Default::default()
        }
        .into_note(body.to_string(), None, None)
        .unwrap()
    }

    fn collection() -> NoteCollection {
        NoteCollection::from_notes(
            vec![
                note(
                    "gm01",
                    "projects",
                    &["development", "planning"],
                    "Garden makeover",
                    "Dig up the ProjectA garden bed\nOrder soil",
                ),
                note(
                    "sv02",
                    "projects",
                    &["testing"],
                    "Server validation",
                    "Run the projectB suite\nCollect results",
                ),
                note(
                    "jr03",
                    "journal",
                    &["archived"],
                    "January retrospective",
                    "Mostly rain\nSome progress on the garden",
                ),
            ],
            "default",
        )
    }

    fn aliases(results: &[SearchResult]) -> Vec<String> {
        results.iter().map(|r| r.note.alias.clone()).collect()
    }

    #[test]
    fn test_any_returns_every_active_note() {
        let c = collection();
        let results = search(&c, "any", None).unwrap();
        assert_eq!(results.len(), 3);
    }

    #[test]
    fn test_results_ordered_by_notebook_then_alias() {
        let c = collection();
        let results = search(&c, "any", None).unwrap();
        assert_eq!(aliases(&results), vec!["jr03", "gm01", "sv02"]);
    }

    #[test]
    fn test_title_substring_property() {
        let c = collection();
        let results = search(&c, "title=makeover", None).unwrap();
        assert_eq!(aliases(&results), vec!["gm01"]);
    }

    #[test]
    fn test_exclusion_by_tag() {
        let c = collection();
        let results = search(&c, "any%tags=archived", None).unwrap();
        assert_eq!(aliases(&results), vec!["gm01", "sv02"]);
    }

    #[test]
    fn test_tag_union() {
        let c = collection();
        let results = search(&c, "tags=development+testing", None).unwrap();
        assert_eq!(aliases(&results), vec!["gm01", "sv02"]);
    }

    #[test]
    fn test_notebook_and_tag_intersection() {
        let c = collection();
        let results = search(&c, "notebook=projects,tags=development+testing", None).unwrap();
        assert_eq!(aliases(&results), vec!["gm01", "sv02"]);
        let results = search(&c, "notebook=projects,tags=planning", None).unwrap();
        assert_eq!(aliases(&results), vec!["gm01"]);
    }

    #[test]
    fn test_regex_exclusion() {
        let c = collection();
        let results = search(&c, "any%/[Pp]roject[aAbB]/", None).unwrap();
        assert_eq!(aliases(&results), vec!["jr03"]);
    }

    #[test]
    fn test_exclusion_clauses_and_together() {
        // Both exclusion clauses must match a note for it to be removed.
        let c = collection();
        let results = search(&c, "any%notebook=projects,tags=testing", None).unwrap();
        assert_eq!(aliases(&results), vec!["jr03", "gm01"]);
    }

    #[test]
    fn test_excerpt_for_literal_body_match() {
        let c = collection();
        let results = search(&c, "garden", None).unwrap();
        assert_eq!(results.len(), 2);
        let jr = results.iter().find(|r| r.note.alias == "jr03").unwrap();
        assert_eq!(jr.excerpt.as_deref(), Some("Some progress on the garden"));
        let gm = results.iter().find(|r| r.note.alias == "gm01").unwrap();
        assert_eq!(gm.excerpt.as_deref(), Some("Dig up the ProjectA garden bed"));
    }

    #[test]
    fn test_excerpt_for_regex_match() {
        let c = collection();
        let results = search(&c, "/[Pp]roject[aAbB]/", None).unwrap();
        assert_eq!(aliases(&results), vec!["gm01", "sv02"]);
        assert_eq!(
            results[0].excerpt.as_deref(),
            Some("Dig up the ProjectA garden bed")
        );
    }

    #[test]
    fn test_no_excerpt_for_metadata_matches() {
        let c = collection();
        let results = search(&c, "title=makeover", None).unwrap();
        assert!(results[0].excerpt.is_none());
    }

    #[test]
    fn test_no_excerpt_for_any() {
        let c = collection();
        let results = search(&c, "any", None).unwrap();
        assert!(results.iter().all(|r| r.excerpt.is_none()));
    }

    #[test]
    fn test_idempotent_evaluation() {
        let c = collection();
        let parsed = parse("notebook=projects", None).unwrap();
        let first = evaluate(&c, &parsed);
        let second = evaluate(&c, &parsed);
        assert_eq!(aliases(&first), aliases(&second));
    }

    #[test]
    fn test_unknown_field_behaves_as_note_clause() {
        let c = collection();
        let by_unknown = search(&c, "foo=garden", None).unwrap();
        let by_note = search(&c, "note=garden", None).unwrap();
        assert_eq!(aliases(&by_unknown), aliases(&by_note));
    }

    #[test]
    fn test_comma_in_regex_is_fatal() {
        let c = collection();
        let err = search(&c, "/a{1,3}/", None).unwrap_err();
        assert!(matches!(err, Error::QuerySyntax(_)));
    }

    #[test]
    fn test_empty_result_is_not_an_error() {
        let c = collection();
        let results = search(&c, "title=nonexistent", None).unwrap();
        assert!(results.is_empty());
    }

    #[test]
    fn test_match_all_exclusion_excludes_everything() {
        let c = collection();
        let results = search(&c, "any%any", None).unwrap();
        assert!(results.is_empty());
    }
}
