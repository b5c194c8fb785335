//! Note data model.
//!
//! A note is a plain-text file carrying a small YAML metadata block
//! (identifier, alias, title, description, notebook, tags, creation time)
//! followed by free-form body text. [`Note`] is the parsed, normalized
//! in-memory record the query engine evaluates; [`NoteMetadata`] is the
//! serializable shape of the metadata block itself.

use std::path::PathBuf;

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, TimeZone};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::tags::normalize_tags;

/// One note's searchable fields and body.
///
/// Invariants upheld at construction:
/// - `uid` and `created` are never modified after creation.
/// - `alias` is stored lowercase; uniqueness among active notes is
///   enforced by [`crate::NoteCollection`].
/// - `notebook` is stored lowercase; `None` means the note logically
///   belongs to the configured default notebook.
/// - `tags` are lowercase, deduplicated, and sorted.
#[derive(Debug, Clone, Serialize)]
pub struct Note {
    /// Opaque unique identifier, assigned at creation.
    pub uid: Uuid,
    /// Short user-facing identifier, unique within the active collection.
    pub alias: String,
    /// Free-text title.
    pub title: String,
    /// Optional free-text description.
    pub description: Option<String>,
    /// Grouping key; absent means the configured default notebook.
    pub notebook: Option<String>,
    /// Case-insensitive, deduplicated tag set.
    pub tags: Vec<String>,
    /// Creation timestamp; may be missing on hand-edited files.
    pub created: Option<DateTime<Local>>,
    /// File modification time, supplied by the storage layer.
    pub updated: Option<DateTime<Local>>,
    /// Source file, supplied by the storage layer.
    pub path: Option<PathBuf>,
    /// Free-form body text, not subject to metadata constraints.
    pub body: String,
}

impl Note {
    /// The notebook this note is grouped under, falling back to the
    /// configured default when the note carries none.
    pub fn effective_notebook<'a>(&'a self, default_notebook: &'a str) -> &'a str {
        self.notebook.as_deref().unwrap_or(default_notebook)
    }

    /// Case-insensitive exact tag membership test.
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t.eq_ignore_ascii_case(tag))
    }

    /// The serializable metadata block for this note.
    pub fn metadata(&self) -> NoteMetadata {
        NoteMetadata {
            uid: Some(self.uid.to_string()),
            created: self.created.map(|t| t.to_rfc3339()),
            alias: Some(self.alias.clone()),
            title: Some(self.title.clone()),
            description: self.description.clone(),
            notebook: self.notebook.clone(),
            tags: if self.tags.is_empty() {
                None
            } else {
                Some(self.tags.clone())
            },
        }
    }
}

/// The YAML metadata block at the top of a note file.
///
/// All fields are optional at the serialization layer so a single
/// malformed file can be reported and skipped rather than failing a whole
/// collection load; [`NoteMetadata::into_note`] enforces what is actually
/// required.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct NoteMetadata {
    pub uid: Option<String>,
    pub created: Option<String>,
    pub alias: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub notebook: Option<String>,
    pub tags: Option<Vec<String>>,
}

impl NoteMetadata {
    /// Build a normalized [`Note`] from this metadata block.
    ///
    /// Requires `uid` (a valid UUID) and `alias`; everything else is
    /// defaulted. Alias, notebook, and tags are lowercased here so the
    /// matcher never has to re-normalize per comparison.
    pub fn into_note(
        self,
        body: String,
        path: Option<PathBuf>,
        updated: Option<DateTime<Local>>,
    ) -> Result<Note> {
        let uid = self
            .uid
            .as_deref()
            .ok_or_else(|| Error::Metadata("missing uid".to_string()))?;
        let uid = Uuid::parse_str(uid)
            .map_err(|_| Error::Metadata(format!("invalid uid '{}'", uid)))?;
        let alias = self
            .alias
            .as_deref()
            .ok_or_else(|| Error::Metadata("missing alias".to_string()))?
            .to_lowercase();
        if alias.is_empty() {
            return Err(Error::Metadata("empty alias".to_string()));
        }

        Ok(Note {
            uid,
            alias,
            title: self.title.unwrap_or_default(),
            description: self.description,
            notebook: self.notebook.map(|n| n.to_lowercase()),
            tags: normalize_tags(self.tags.unwrap_or_default()),
            created: self.created.as_deref().and_then(parse_timestamp),
            updated,
            path,
            body,
        })
    }
}

/// Parse a timestamp string leniently.
///
/// Accepts RFC 3339 as written by jot itself, plus the naive
/// `%Y-%m-%d %H:%M:%S` / `%Y-%m-%d %H:%M` / `%Y-%m-%d` forms found in
/// hand-edited files. Returns `None` rather than failing the note.
pub fn parse_timestamp(s: &str) -> Option<DateTime<Local>> {
    let s = s.trim();
    if let Ok(t) = DateTime::parse_from_rfc3339(s) {
        return Some(t.with_timezone(&Local));
    }
    for fmt in ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%d %H:%M:%S", "%Y-%m-%d %H:%M"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, fmt) {
            return Local.from_local_datetime(&naive).earliest();
        }
    }
    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        let naive = date.and_hms_opt(0, 0, 0)?;
        return Local.from_local_datetime(&naive).earliest();
    }
    None
}

/// Format a timestamp for display.
///
/// The pretty form drops a midnight time component entirely.
pub fn format_timestamp(t: &DateTime<Local>, pretty: bool) -> String {
    if pretty {
        if t.format("%H:%M").to_string() == "00:00" {
            t.format("%Y-%m-%d").to_string()
        } else {
            t.format("%Y-%m-%d %H:%M").to_string()
        }
    } else {
        t.format("%Y-%m-%d %H:%M:%S").to_string()
    }
}
