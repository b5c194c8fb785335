//! Plain-text rendering of notes, notebooks, and search results.
//!
//! Output is written for a terminal: a titled block, one formatted entry
//! per note, entries sorted by title within each notebook.

use jot_core::{format_timestamp, Note, NoteCollection};
use jot_query::SearchResult;

const LABEL_WIDTH: usize = 13;

/// The notebook index: every notebook with its note count, default
/// notebook first.
pub fn notebook_list(collection: &NoteCollection) -> String {
    let mut out = String::from("\nNotebooks\n\n");
    for notebook in collection.notebooks() {
        let count = collection.in_notebook(&notebook).count();
        out.push_str(&format!(" - {} ({})\n", notebook, count));
    }
    out
}

/// All notes arranged by notebook, default notebook first.
pub fn all_notes(collection: &NoteCollection) -> String {
    let mut out = String::from("\nNotes - all\n\n");
    if collection.is_empty() {
        out.push_str("None\n");
        return out;
    }
    let mut first = true;
    for notebook in collection.notebooks() {
        let notes: Vec<&Note> = sorted_by_title(collection.in_notebook(&notebook));
        if notes.is_empty() {
            continue;
        }
        if !first {
            out.push('\n');
        }
        first = false;
        out.push_str(&format!(" - {} ({})\n", notebook, notes.len()));
        for note in notes {
            out.push_str(&indent(&note_block(note, None, None), 3));
            out.push('\n');
        }
    }
    out
}

/// The notes of a single notebook.
pub fn notebook_notes(collection: &NoteCollection, notebook: &str) -> String {
    let mut out = format!("\nNotes - {}\n\n", notebook);
    let notes: Vec<&Note> = sorted_by_title(collection.in_notebook(notebook));
    if notes.is_empty() {
        out.push_str("None\n");
        return out;
    }
    for note in notes {
        out.push_str(&indent(&note_block(note, None, None), 1));
        out.push('\n');
    }
    out
}

/// Search results: note entries with notebook and excerpt lines.
pub fn search_results(results: &[SearchResult], default_notebook: &str) -> String {
    let mut out = String::from("\nNotes - search results\n\n");
    if results.is_empty() {
        out.push_str("None\n");
        return out;
    }
    let mut sorted: Vec<&SearchResult> = results.iter().collect();
    sorted.sort_by(|a, b| a.note.title.cmp(&b.note.title));
    for result in sorted {
        let block = note_block(
            &result.note,
            Some(result.note.effective_notebook(default_notebook)),
            result.excerpt.as_deref(),
        );
        out.push_str(&indent(&block, 1));
        out.push('\n');
    }
    out
}

/// The metadata table for one note.
pub fn note_info(note: &Note, default_notebook: &str) -> String {
    let mut out = format!("\nNote info - {}\n\n", note.alias);
    push_row(&mut out, "title:", &note.title);
    push_row(&mut out, "description:", note.description.as_deref().unwrap_or(""));
    push_row(&mut out, "notebook:", note.effective_notebook(default_notebook));
    if !note.tags.is_empty() {
        push_row(&mut out, "tags:", &note.tags.join(","));
    }
    push_row(&mut out, "uid:", &note.uid.to_string());
    if let Some(created) = &note.created {
        push_row(&mut out, "created:", &format_timestamp(created, true));
    }
    if let Some(updated) = &note.updated {
        push_row(&mut out, "updated:", &format_timestamp(updated, true));
    }
    if let Some(path) = &note.path {
        push_row(&mut out, "file:", &path.display().to_string());
    }
    out
}

/// One formatted note entry:
///
/// ```text
/// - (alias) Title
///    + description: ...
///    + notebook: ...
///    + tags: a,b
///    + matches:
///      first matching line
///      ...
///      second matching line
/// ```
fn note_block(note: &Note, notebook: Option<&str>, excerpt: Option<&str>) -> String {
    let mut out = format!("- ({}) {}", note.alias, note.title);
    if let Some(description) = &note.description {
        out.push_str(&format!("\n   + description: {}", description));
    }
    if let Some(notebook) = notebook {
        out.push_str(&format!("\n   + notebook: {}", notebook));
    }
    if !note.tags.is_empty() {
        out.push_str(&format!("\n   + tags: {}", note.tags.join(",")));
    }
    if let Some(excerpt) = excerpt {
        out.push_str("\n   + matches:");
        let lines: Vec<&str> = excerpt.split('\n').collect();
        for (i, line) in lines.iter().enumerate() {
            out.push_str(&format!("\n     {}", line));
            if i + 1 < lines.len() {
                out.push_str("\n     ...");
            }
        }
    }
    out.push('\n');
    out
}

fn sorted_by_title<'a>(notes: impl Iterator<Item = &'a Note>) -> Vec<&'a Note> {
    let mut notes: Vec<&Note> = notes.collect();
    notes.sort_by(|a, b| a.title.cmp(&b.title));
    notes
}

fn push_row(out: &mut String, label: &str, value: &str) {
    out.push_str(&format!("{:<width$}{}\n", label, value, width = LABEL_WIDTH));
}

fn indent(block: &str, spaces: usize) -> String {
    let pad = " ".repeat(spaces);
    block
        .lines()
        .map(|line| {
            if line.is_empty() {
                String::new()
            } else {
                format!("{}{}", pad, line)
            }
        })
        .collect::<Vec<String>>()
        .join("\n")
        + "\n"
}
