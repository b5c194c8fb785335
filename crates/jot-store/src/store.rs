//! File-backed note store.
//!
//! One file per note under the configured data directory, named by uid
//! (plus the configured extension, when set). Loads are atomic from the
//! caller's point of view: a scan either yields a full set of records or
//! fails, and individually malformed files are reported and skipped so
//! one bad note never hides the rest.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use rand::Rng;
use tracing::{info, warn};

use jot_core::defaults::{ALIAS_CHARSET, ALIAS_LEN, ARCHIVE_DIR, RESERVED_NOTEBOOKS};
use jot_core::{
    modify_tags, normalize_tags, Config, Error, Note, NoteCollection, NoteSource, Result,
};
use uuid::Uuid;

use crate::notefile::{parse_note_file, render_note_file};

/// Parameters for creating a note.
#[derive(Debug, Clone, Default)]
pub struct NewNote {
    /// Title; defaults to `"New note - <timestamp>"`.
    pub title: Option<String>,
    pub description: Option<String>,
    /// Notebook; defaults to the configured default notebook.
    pub notebook: Option<String>,
    /// Comma-separated tag list.
    pub tags: Option<String>,
}

/// Metadata changes for an existing note. `None` fields are left alone.
#[derive(Debug, Clone, Default)]
pub struct NoteUpdate {
    pub alias: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub notebook: Option<String>,
    /// Tag modification expression (see [`jot_core::modify_tags`]).
    pub tags: Option<String>,
}

/// The file-system storage collaborator.
#[derive(Debug, Clone)]
pub struct FileStore {
    config: Config,
}

impl FileStore {
    /// Open a store over the configured data directory, creating it if
    /// necessary.
    pub fn new(config: Config) -> Result<Self> {
        if config.data_dir.exists() {
            if !config.data_dir.is_dir() {
                return Err(Error::Config(format!(
                    "{} is not a directory",
                    config.data_dir.display()
                )));
            }
        } else {
            fs::create_dir_all(&config.data_dir)?;
        }
        Ok(Self { config })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Load a fresh, ordered collection snapshot.
    pub fn load_collection(&self) -> Result<NoteCollection> {
        let notes = self.load()?;
        Ok(NoteCollection::from_notes(
            notes,
            &self.config.default_notebook,
        ))
    }

    /// Create a new note file and return the record.
    pub fn create(&self, new: NewNote) -> Result<Note> {
        let notebook = match new.notebook {
            Some(nb) => {
                let nb = nb.to_lowercase();
                check_reserved_notebook(&nb)?;
                Some(nb)
            }
            None => None,
        };

        let collection = self.load_collection()?;
        let taken: HashSet<String> = collection.iter().map(|n| n.alias.clone()).collect();
        let now = Local::now();
        let note = Note {
            uid: Uuid::new_v4(),
            alias: generate_alias(&taken),
            title: new
                .title
                .unwrap_or_else(|| format!("New note - {}", now.format("%Y-%m-%d %H:%M"))),
            description: new.description,
            notebook,
            tags: normalize_tags(
                new.tags
                    .map(|t| t.split(',').map(str::to_string).collect())
                    .unwrap_or_default(),
            ),
            created: Some(now),
            updated: None,
            path: None,
            body: String::new(),
        };

        let path = self.note_path(&note.uid);
        self.write_note(&note, &path)?;
        info!(note_uid = %note.uid, alias = %note.alias, "created note");
        Ok(Note {
            path: Some(path),
            ..note
        })
    }

    /// Apply metadata changes to the note carrying `alias`.
    pub fn modify(&self, alias: &str, update: NoteUpdate) -> Result<Note> {
        let collection = self.load_collection()?;
        let note = collection
            .get_by_alias(alias)
            .ok_or_else(|| Error::AliasNotFound(alias.to_lowercase()))?;
        let mut updated = note.clone();

        if let Some(new_alias) = update.alias {
            let new_alias = new_alias.trim().to_lowercase();
            if new_alias.is_empty() {
                return Err(Error::InvalidInput("alias must not be empty".to_string()));
            }
            if new_alias != note.alias && collection.get_by_alias(&new_alias).is_some() {
                return Err(Error::InvalidInput(format!(
                    "alias '{}' already exists",
                    new_alias
                )));
            }
            updated.alias = new_alias;
        }
        if let Some(title) = update.title {
            updated.title = title;
        }
        if let Some(description) = update.description {
            updated.description = Some(description);
        }
        if let Some(notebook) = update.notebook {
            let notebook = notebook.to_lowercase();
            check_reserved_notebook(&notebook)?;
            updated.notebook = Some(notebook);
        }
        if let Some(expr) = update.tags {
            updated.tags = modify_tags(&note.tags, &expr)?;
        }

        let path = match &note.path {
            Some(path) => path.clone(),
            None => self.note_path(&note.uid),
        };
        self.write_note(&updated, &path)?;
        info!(note_uid = %updated.uid, alias = %updated.alias, "modified note");
        Ok(updated)
    }

    /// Move the note's file into the archive directory, removing it from
    /// the active collection.
    pub fn archive(&self, alias: &str) -> Result<PathBuf> {
        let (path, uid) = self.locate(alias)?;
        let archive_dir = self.config.data_dir.join(ARCHIVE_DIR);
        fs::create_dir_all(&archive_dir)?;
        let file_name = path
            .file_name()
            .ok_or_else(|| Error::Metadata(format!("{}: no file name", path.display())))?;
        let target = archive_dir.join(file_name);
        fs::rename(&path, &target)?;
        info!(note_uid = %uid, alias = %alias.to_lowercase(), "archived note");
        Ok(target)
    }

    /// Delete the note's file permanently.
    pub fn delete(&self, alias: &str) -> Result<PathBuf> {
        let (path, uid) = self.locate(alias)?;
        fs::remove_file(&path)?;
        info!(note_uid = %uid, alias = %alias.to_lowercase(), "deleted note");
        Ok(path)
    }

    /// The file path holding `alias`, plus its uid.
    fn locate(&self, alias: &str) -> Result<(PathBuf, Uuid)> {
        let collection = self.load_collection()?;
        let note = collection
            .get_by_alias(alias)
            .ok_or_else(|| Error::AliasNotFound(alias.to_lowercase()))?;
        let path = match &note.path {
            Some(path) => path.clone(),
            None => self.note_path(&note.uid),
        };
        Ok((path, note.uid))
    }

    fn note_path(&self, uid: &Uuid) -> PathBuf {
        let file_name = match &self.config.file_ext {
            Some(ext) => format!("{}.{}", uid, ext),
            None => uid.to_string(),
        };
        self.config.data_dir.join(file_name)
    }

    fn write_note(&self, note: &Note, path: &Path) -> Result<()> {
        let contents = render_note_file(&note.metadata(), &note.body)?;
        fs::write(path, contents)?;
        Ok(())
    }

    fn wants_file(&self, path: &Path) -> bool {
        match &self.config.file_ext {
            Some(ext) => path.extension().map(|e| e == ext.as_str()).unwrap_or(false),
            None => true,
        }
    }
}

impl NoteSource for FileStore {
    /// Scan the data directory (non-recursive, so `archive/` is never
    /// seen) and parse every note file. Malformed files are skipped with
    /// a warning.
    fn load(&self) -> Result<Vec<Note>> {
        let mut notes = Vec::new();
        let mut skipped = 0usize;
        for entry in fs::read_dir(&self.config.data_dir)? {
            let entry = entry?;
            let path = entry.path();
            if !entry.file_type()?.is_file() || !self.wants_file(&path) {
                continue;
            }
            let contents = match fs::read_to_string(&path) {
                Ok(contents) => contents,
                Err(e) => {
                    warn!(file = %path.display(), error = %e, "failure reading note file, skipping");
                    skipped += 1;
                    continue;
                }
            };
            let updated = entry
                .metadata()
                .ok()
                .and_then(|m| m.modified().ok())
                .map(DateTime::<Local>::from);
            match parse_note_file(&contents, &path, updated) {
                Ok(note) => notes.push(note),
                Err(e) => {
                    warn!(file = %path.display(), error = %e, "failure parsing note file, skipping");
                    skipped += 1;
                }
            }
        }
        if skipped > 0 {
            warn!(note_count = notes.len(), skipped_count = skipped, "load completed with skips");
        }
        Ok(notes)
    }
}

/// Generate a short random alias not present in `taken`.
fn generate_alias(taken: &HashSet<String>) -> String {
    let mut rng = rand::thread_rng();
    loop {
        let alias: String = (0..ALIAS_LEN)
            .map(|_| ALIAS_CHARSET[rng.gen_range(0..ALIAS_CHARSET.len())] as char)
            .collect();
        if !taken.contains(&alias) {
            return alias;
        }
    }
}

fn check_reserved_notebook(notebook: &str) -> Result<()> {
    if RESERVED_NOTEBOOKS.contains(&notebook) {
        return Err(Error::InvalidInput(format!(
            "'{}' is a reserved name and cannot be used",
            notebook
        )));
    }
    Ok(())
}
