//! jot: terminal-based notes management.
//!
//! One-shot subcommands plus an interactive shell. All state lives in
//! note files under the configured data directory; every invocation
//! reads them fresh.

use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use jot_core::{Config, Error, NoteCollection};
use jot_store::{FileStore, NewNote, NoteUpdate};

mod editor;
mod render;
mod shell;

#[derive(Parser)]
#[command(name = "jot")]
#[command(author, version, about = "Terminal-based notes management")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Config file
    #[arg(short, long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create a new note
    New {
        /// Note title
        title: String,

        /// Note description
        #[arg(long, value_name = "DESCRIPTION")]
        description: Option<String>,

        /// Notebook for the note
        #[arg(long, value_name = "NOTEBOOK")]
        notebook: Option<String>,

        /// Comma-separated note tags
        #[arg(long, value_name = "TAG[,TAG]")]
        tags: Option<String>,
    },

    /// List notes
    #[command(visible_alias = "ls")]
    List {
        /// Notebook to list, or 'all' for every note, or 'notebooks'
        /// for the notebook index
        notebook: String,
    },

    /// List all notes, arranged by notebook
    Lsa,

    /// List notebooks
    Lsn,

    /// Show metadata about a note
    Info {
        /// Note alias
        alias: String,
    },

    /// Edit a note file (uses $EDITOR)
    Edit {
        /// Note alias
        alias: String,

        /// $EDITOR options
        #[arg(short = 'o', long = "editor-opts", value_name = "OPTIONS")]
        editor_opts: Option<String>,
    },

    /// Modify metadata for a note
    #[command(visible_alias = "mod")]
    Modify {
        /// Note alias
        alias: String,

        /// A new alias for the note
        #[arg(long = "new-alias", value_name = "ALIAS")]
        new_alias: Option<String>,

        /// Note title
        #[arg(long, value_name = "TITLE")]
        title: Option<String>,

        /// Note description
        #[arg(long, value_name = "DESCRIPTION")]
        description: Option<String>,

        /// Notebook containing the note
        #[arg(long, value_name = "NOTEBOOK")]
        notebook: Option<String>,

        /// Tag expression: a bare list replaces, `+tag` adds, `~tag` removes
        #[arg(long, value_name = "TAG[,TAG]")]
        tags: Option<String>,
    },

    /// Archive a note
    Archive {
        /// Note alias
        alias: String,

        /// Archive without confirmation
        #[arg(short, long)]
        force: bool,
    },

    /// Delete a note file
    #[command(visible_alias = "rm")]
    Delete {
        /// Note alias
        alias: String,

        /// Delete without confirmation
        #[arg(short, long)]
        force: bool,
    },

    /// Search notes
    Search {
        /// Search expression
        term: String,
    },

    /// Interactive shell
    Shell,

    /// Edit configuration file
    Config,

    /// Show version info
    Version,
}

/// Shared command execution state: the store plus a cached collection
/// snapshot that is reloaded when marked stale.
pub struct Session {
    store: FileStore,
    config_path: PathBuf,
    collection: NoteCollection,
    dirty: Arc<AtomicBool>,
}

impl Session {
    pub fn new(config: Config, config_path: PathBuf) -> Result<Self> {
        let store = FileStore::new(config)?;
        let collection = store.load_collection()?;
        Ok(Self {
            store,
            config_path,
            collection,
            dirty: Arc::new(AtomicBool::new(false)),
        })
    }

    /// The current collection snapshot, reloaded first if stale.
    pub fn collection(&mut self) -> Result<&NoteCollection> {
        if self.dirty.swap(false, Ordering::SeqCst) {
            self.collection = self.store.load_collection()?;
        }
        Ok(&self.collection)
    }

    /// Mark the snapshot stale; the next [`Session::collection`] call
    /// reloads from disk.
    pub fn invalidate(&self) {
        self.dirty.store(true, Ordering::SeqCst);
    }

    /// Handle on the staleness flag, for the shell's file watcher.
    pub fn dirty_flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.dirty)
    }

    pub fn store(&self) -> &FileStore {
        &self.store
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }
}

fn main() -> ExitCode {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let config_path = cli.config.unwrap_or_else(Config::default_path);
    let config = Config::load(&config_path)
        .with_context(|| format!("failed to load config from {}", config_path.display()))?;

    match cli.command {
        Commands::Shell => shell::run(config, config_path),
        command => {
            let mut session = Session::new(config, config_path)?;
            execute(&mut session, command)
        }
    }
}

/// Dispatch one parsed command against the session. Used by both the
/// one-shot path and the interactive shell.
pub(crate) fn execute(session: &mut Session, command: Commands) -> Result<()> {
    match command {
        Commands::New {
            title,
            description,
            notebook,
            tags,
        } => cmd_new(session, title, description, notebook, tags),
        Commands::List { notebook } => cmd_list(session, &notebook),
        Commands::Lsa => cmd_list(session, "all"),
        Commands::Lsn => cmd_list(session, "notebooks"),
        Commands::Info { alias } => cmd_info(session, &alias),
        Commands::Edit { alias, editor_opts } => cmd_edit(session, &alias, editor_opts.as_deref()),
        Commands::Modify {
            alias,
            new_alias,
            title,
            description,
            notebook,
            tags,
        } => cmd_modify(
            session,
            &alias,
            NoteUpdate {
                alias: new_alias,
                title,
                description,
                notebook,
                tags,
            },
        ),
        Commands::Archive { alias, force } => cmd_archive(session, &alias, force),
        Commands::Delete { alias, force } => cmd_delete(session, &alias, force),
        Commands::Search { term } => cmd_search(session, &term),
        Commands::Config => cmd_config(session),
        Commands::Version => {
            println!("jot {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        Commands::Shell => bail!("already running a shell"),
    }
}

fn cmd_new(
    session: &mut Session,
    title: String,
    description: Option<String>,
    notebook: Option<String>,
    tags: Option<String>,
) -> Result<()> {
    let note = session.store().create(NewNote {
        title: Some(title),
        description,
        notebook,
        tags,
    })?;
    session.invalidate();
    println!("Added note: {}", note.alias);
    if let Some(path) = &note.path {
        let default_opts = session.store().config().editor_options.clone();
        editor::edit_file(path, None, default_opts.as_deref())?;
        session.invalidate();
    }
    Ok(())
}

fn cmd_list(session: &mut Session, notebook: &str) -> Result<()> {
    let view = notebook.trim().to_lowercase();
    let collection = session.collection()?;
    let out = match view.as_str() {
        "all" => render::all_notes(collection),
        "notebooks" => render::notebook_list(collection),
        _ if collection.notebooks().contains(&view) => render::notebook_notes(collection, &view),
        _ => bail!("no such notebook '{}', check spelling", view),
    };
    print!("{}", out);
    Ok(())
}

fn cmd_info(session: &mut Session, alias: &str) -> Result<()> {
    let collection = session.collection()?;
    let note = collection
        .get_by_alias(alias)
        .ok_or_else(|| Error::AliasNotFound(alias.to_lowercase()))?;
    print!("{}", render::note_info(note, collection.default_notebook()));
    Ok(())
}

fn cmd_edit(session: &mut Session, alias: &str, editor_opts: Option<&str>) -> Result<()> {
    let path = {
        let collection = session.collection()?;
        let note = collection
            .get_by_alias(alias)
            .ok_or_else(|| Error::AliasNotFound(alias.to_lowercase()))?;
        match &note.path {
            Some(path) => path.clone(),
            None => bail!("failed to find file for '{}'", alias),
        }
    };
    let default_opts = session.store().config().editor_options.clone();
    editor::edit_file(&path, editor_opts, default_opts.as_deref())?;
    session.invalidate();
    Ok(())
}

fn cmd_modify(session: &mut Session, alias: &str, update: NoteUpdate) -> Result<()> {
    let note = session.store().modify(alias, update)?;
    session.invalidate();
    println!("Updated note: {}", note.alias);
    Ok(())
}

fn cmd_archive(session: &mut Session, alias: &str, force: bool) -> Result<()> {
    if !force && !confirm(&format!("Archive note '{}'?", alias))? {
        return Ok(());
    }
    session.store().archive(alias)?;
    session.invalidate();
    println!("Archived note: {}", alias);
    Ok(())
}

fn cmd_delete(session: &mut Session, alias: &str, force: bool) -> Result<()> {
    if !force && !confirm(&format!("Delete note '{}'?", alias))? {
        return Ok(());
    }
    session.store().delete(alias)?;
    session.invalidate();
    println!("Deleted note: {}", alias);
    Ok(())
}

fn cmd_search(session: &mut Session, term: &str) -> Result<()> {
    let collection = session.collection()?;
    let results = jot_query::search(collection, term, None)?;
    print!(
        "{}",
        render::search_results(&results, collection.default_notebook())
    );
    Ok(())
}

fn cmd_config(session: &mut Session) -> Result<()> {
    // Config edits take effect on the next start; the open session keeps
    // its loaded settings.
    let path = session.config_path().to_path_buf();
    editor::edit_file(&path, None, None)?;
    Ok(())
}

fn confirm(prompt: &str) -> Result<bool> {
    print!("{} [N/y]: ", prompt);
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().read_line(&mut line)?;
    Ok(matches!(line.trim().to_lowercase().as_str(), "y" | "yes"))
}
