//! The in-memory note collection.
//!
//! A [`NoteCollection`] is one consistent snapshot of all active notes,
//! ordered by notebook then alias (case-insensitive). Snapshots are
//! immutable once built; a reload produces a whole new snapshot and the
//! caller swaps the reference, so an in-flight evaluation always sees the
//! snapshot it started with.

use std::collections::HashSet;

use tracing::warn;

use crate::error::Result;
use crate::models::Note;

/// Source of note records, implemented by the storage collaborator.
///
/// Loads are atomic: either a full, consistent set of records is produced,
/// or an error is surfaced and the caller retains its previous snapshot.
pub trait NoteSource {
    /// Load all active notes.
    fn load(&self) -> Result<Vec<Note>>;
}

/// An ordered snapshot of the active note collection.
#[derive(Debug, Clone, Default)]
pub struct NoteCollection {
    notes: Vec<Note>,
    default_notebook: String,
}

impl NoteCollection {
    /// Build a snapshot from raw note records.
    ///
    /// Duplicate uids and duplicate aliases violate the collection
    /// invariants; the later record is skipped with a warning rather than
    /// failing the whole load.
    pub fn from_notes(notes: Vec<Note>, default_notebook: &str) -> Self {
        let mut seen_uids = HashSet::new();
        let mut seen_aliases = HashSet::new();
        let mut kept = Vec::with_capacity(notes.len());
        for note in notes {
            if !seen_uids.insert(note.uid) {
                warn!(note_uid = %note.uid, "duplicate uid detected, skipping note");
                continue;
            }
            if !seen_aliases.insert(note.alias.clone()) {
                warn!(alias = %note.alias, "duplicate alias detected, skipping note");
                continue;
            }
            kept.push(note);
        }

        let default = default_notebook.to_lowercase();
        kept.sort_by(|a, b| {
            let nb_a = a.effective_notebook(&default).to_lowercase();
            let nb_b = b.effective_notebook(&default).to_lowercase();
            nb_a.cmp(&nb_b).then_with(|| a.alias.cmp(&b.alias))
        });

        Self {
            notes: kept,
            default_notebook: default,
        }
    }

    /// Iterate notes in collection order (notebook, then alias).
    pub fn iter(&self) -> impl Iterator<Item = &Note> {
        self.notes.iter()
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    /// The notebook notes fall back to when they carry none.
    pub fn default_notebook(&self) -> &str {
        &self.default_notebook
    }

    /// Look up a note by alias, case-insensitively.
    pub fn get_by_alias(&self, alias: &str) -> Option<&Note> {
        let alias = alias.to_lowercase();
        self.notes.iter().find(|n| n.alias == alias)
    }

    /// All notebooks present in the collection, default notebook first and
    /// the rest sorted.
    pub fn notebooks(&self) -> Vec<String> {
        let mut rest: Vec<String> = Vec::new();
        for note in &self.notes {
            let nb = note.effective_notebook(&self.default_notebook);
            if nb != self.default_notebook && !rest.iter().any(|n| n == nb) {
                rest.push(nb.to_string());
            }
        }
        rest.sort();
        let mut notebooks = vec![self.default_notebook.clone()];
        notebooks.extend(rest);
        notebooks
    }

    /// Notes grouped under the given notebook, in collection order.
    pub fn in_notebook<'a>(&'a self, notebook: &'a str) -> impl Iterator<Item = &'a Note> {
        let notebook = notebook.to_lowercase();
        self.notes
            .iter()
            .filter(move |n| n.effective_notebook(&self.default_notebook) == notebook)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::NoteMetadata;
    use uuid::Uuid;

    fn note(alias: &str, notebook: Option<&str>) -> Note {
        NoteMetadata {
            uid: Some(Uuid::new_v4().to_string()),
            alias: Some(alias.to_string()),
            notebook: notebook.map(|n| n.to_string()),
            ..Default::default()
        }
        .into_note(String::new(), None, None)
        .unwrap()
    }

    #[test]
    fn test_ordered_by_notebook_then_alias() {
        let collection = NoteCollection::from_notes(
            vec![
                note("zz99", Some("work")),
                note("aa11", Some("work")),
                note("mm55", Some("home")),
            ],
            "default",
        );
        let aliases: Vec<&str> = collection.iter().map(|n| n.alias.as_str()).collect();
        assert_eq!(aliases, vec!["mm55", "aa11", "zz99"]);
    }

    #[test]
    fn test_missing_notebook_sorts_under_default() {
        let collection = NoteCollection::from_notes(
            vec![note("ab12", Some("work")), note("cd34", None)],
            "default",
        );
        let aliases: Vec<&str> = collection.iter().map(|n| n.alias.as_str()).collect();
        // "default" < "work"
        assert_eq!(aliases, vec!["cd34", "ab12"]);
    }

    #[test]
    fn test_duplicate_alias_skipped() {
        let collection = NoteCollection::from_notes(
            vec![note("ab12", None), note("ab12", Some("work"))],
            "default",
        );
        assert_eq!(collection.len(), 1);
    }

    #[test]
    fn test_duplicate_uid_skipped() {
        let a = note("ab12", None);
        let mut b = note("cd34", None);
        b.uid = a.uid;
        let collection = NoteCollection::from_notes(vec![a, b], "default");
        assert_eq!(collection.len(), 1);
    }

    #[test]
    fn test_get_by_alias_case_insensitive() {
        let collection = NoteCollection::from_notes(vec![note("ab12", None)], "default");
        assert!(collection.get_by_alias("AB12").is_some());
        assert!(collection.get_by_alias("zz99").is_none());
    }

    #[test]
    fn test_notebooks_default_first_rest_sorted() {
        let collection = NoteCollection::from_notes(
            vec![
                note("a1", Some("work")),
                note("a2", Some("home")),
                note("a3", None),
            ],
            "default",
        );
        assert_eq!(collection.notebooks(), vec!["default", "home", "work"]);
    }

    #[test]
    fn test_in_notebook_includes_defaulted_notes() {
        let collection = NoteCollection::from_notes(
            vec![note("a1", None), note("a2", Some("work"))],
            "default",
        );
        let defaulted: Vec<&str> = collection
            .in_notebook("default")
            .map(|n| n.alias.as_str())
            .collect();
        assert_eq!(defaulted, vec!["a1"]);
    }

    #[test]
    fn test_empty_collection() {
        let collection = NoteCollection::from_notes(vec![], "default");
        assert!(collection.is_empty());
        assert_eq!(collection.notebooks(), vec!["default"]);
    }
}
