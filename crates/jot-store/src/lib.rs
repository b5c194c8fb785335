//! # jot-store
//!
//! File-based note storage for jot.
//!
//! Notes live as plain-text files in a single data directory, each
//! carrying a YAML metadata block fenced by `---` lines followed by the
//! free-form body. Archiving moves a file into the `archive/`
//! subdirectory, which the loader never scans, so archived notes are
//! invisible to the query engine.

pub mod notefile;
pub mod store;

pub use notefile::{parse_note_file, render_note_file};
pub use store::{FileStore, NewNote, NoteUpdate};
