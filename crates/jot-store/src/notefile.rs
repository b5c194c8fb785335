//! Note file serialization.
//!
//! A note file is a YAML metadata block fenced by `---` lines, with the
//! body following the closing fence verbatim:
//!
//! ```text
//! ---
//! uid: 5e6f29be-1f1b-4326-9a29-e26b7e1f101c
//! alias: ab12
//! title: Garden makeover
//! ---
//! Dig up the old bed.
//! ```

use std::path::Path;

use chrono::{DateTime, Local};

use jot_core::defaults::METADATA_FENCE;
use jot_core::{Error, Note, NoteMetadata, Result};

/// Parse note file contents into a normalized [`Note`].
///
/// `path` and `updated` are attached to the record for the rendering
/// collaborator; they take no part in matching.
pub fn parse_note_file(
    contents: &str,
    path: &Path,
    updated: Option<DateTime<Local>>,
) -> Result<Note> {
    let rest = contents.strip_prefix(METADATA_FENCE).ok_or_else(|| {
        Error::Metadata(format!("{}: no metadata block", path.display()))
    })?;
    let close = rest.find(&format!("\n{}", METADATA_FENCE)).ok_or_else(|| {
        Error::Metadata(format!("{}: unterminated metadata block", path.display()))
    })?;
    let header = &rest[..close];
    let body = rest[close + 1 + METADATA_FENCE.len()..].to_string();

    let metadata: NoteMetadata = serde_yaml::from_str(header)
        .map_err(|e| Error::Metadata(format!("{}: {}", path.display(), e)))?;
    metadata.into_note(body, Some(path.to_path_buf()), updated)
}

/// Render a note's metadata block and body as file contents.
///
/// The body is written verbatim immediately after the closing fence, so
/// parse and render round-trip.
pub fn render_note_file(metadata: &NoteMetadata, body: &str) -> Result<String> {
    let header = serde_yaml::to_string(metadata)
        .map_err(|e| Error::Metadata(format!("metadata serialization: {}", e)))?;
    Ok(format!(
        "{fence}\n{header}{fence}{body}",
        fence = METADATA_FENCE,
        header = header,
        body = body
    ))
}
