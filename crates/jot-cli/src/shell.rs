//! Interactive shell: a line REPL over the same command set.
//!
//! A filesystem watcher on the data directory marks the session's
//! collection snapshot stale whenever note files change underneath the
//! shell, so the next command sees fresh data without interrupting the
//! one in flight.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use notify::{recommended_watcher, EventKind, RecursiveMode, Watcher};
use tracing::{debug, warn};

use jot_core::Config;

use crate::{execute, Cli, Commands, Session};

const HELP: &str = "\
Commands:
  list <notebook>        list notes in a notebook ('all', 'notebooks')
  lsa / lsn              shortcuts for 'list all' / 'list notebooks'
  search <term>          search notes
  info <alias>           show metadata about a note
  new <title> [options]  create a new note
  modify <alias> [...]   modify note metadata (alias: mod)
  edit <alias>           edit a note file in $EDITOR
  archive <alias>        archive a note
  delete <alias>         delete a note file (alias: rm)
  config                 edit the configuration file
  refresh                reload notes from disk
  clear                  clear the terminal
  exit / quit            leave the shell

Append -h to a command for its options.";

/// Run the interactive shell until EOF or an exit command.
pub fn run(config: Config, config_path: PathBuf) -> Result<()> {
    let data_dir = config.data_dir.clone();
    let mut session = Session::new(config, config_path)?;

    // Watch the data directory so external edits show up in the next
    // command. A watcher failure degrades to manual 'refresh'.
    let dirty = session.dirty_flag();
    let mut watcher = match recommended_watcher(move |event: notify::Result<notify::Event>| {
        match event {
            Ok(event) => {
                if !matches!(event.kind, EventKind::Access(_)) {
                    dirty.store(true, std::sync::atomic::Ordering::SeqCst);
                }
            }
            Err(e) => warn!(error = %e, "file watcher error"),
        }
    }) {
        Ok(watcher) => Some(watcher),
        Err(e) => {
            warn!(error = %e, "file watching unavailable, use 'refresh' after external edits");
            None
        }
    };
    if let Some(watcher) = watcher.as_mut() {
        if let Err(e) = watcher.watch(&data_dir, RecursiveMode::Recursive) {
            warn!(file = %data_dir.display(), error = %e, "failed to watch data directory");
        }
    }

    println!("jot {}\n\nEnter command (or 'help')\n", env!("CARGO_PKG_VERSION"));

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        print!("jot> ");
        io::stdout().flush()?;
        let line = match lines.next() {
            Some(line) => line?,
            None => break,
        };
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        match dispatch(&mut session, line) {
            Ok(Outcome::Continue) => {}
            Ok(Outcome::Exit) => break,
            Err(e) => eprintln!("Error: {}", e),
        }
    }
    Ok(())
}

enum Outcome {
    Continue,
    Exit,
}

fn dispatch(session: &mut Session, line: &str) -> Result<Outcome> {
    let (first, rest) = match line.split_once(char::is_whitespace) {
        Some((first, rest)) => (first, rest.trim()),
        None => (line, ""),
    };

    match first {
        "exit" | "quit" => return Ok(Outcome::Exit),
        "help" | "?" => {
            println!("{}", HELP);
            return Ok(Outcome::Continue);
        }
        "clear" => {
            print!("\x1b[2J\x1b[1;1H");
            io::stdout().flush()?;
            return Ok(Outcome::Continue);
        }
        "refresh" => {
            session.invalidate();
            session.collection()?;
            debug!("collection refreshed");
            return Ok(Outcome::Continue);
        }
        // The search term is the whole rest of the line; expressions
        // routinely contain spaces and commas.
        "search" if !rest.is_empty() && !rest.starts_with('-') => {
            execute(
                session,
                Commands::Search {
                    term: rest.to_string(),
                },
            )?;
            return Ok(Outcome::Continue);
        }
        "shell" => {
            println!("Already running a shell");
            return Ok(Outcome::Continue);
        }
        _ => {}
    }

    let argv = std::iter::once("jot".to_string()).chain(split_args(line));
    match Cli::try_parse_from(argv) {
        Ok(cli) => execute(session, cli.command)?,
        // Clap renders its own message, including -h/--help output.
        Err(e) => print!("{}", e),
    }
    Ok(Outcome::Continue)
}

/// Split a command line on whitespace, honoring single and double
/// quotes so titles and descriptions can contain spaces.
fn split_args(line: &str) -> Vec<String> {
    let mut args = Vec::new();
    let mut current = String::new();
    let mut in_token = false;
    let mut quote: Option<char> = None;
    for c in line.chars() {
        match quote {
            Some(q) if c == q => quote = None,
            Some(_) => current.push(c),
            None => match c {
                '\'' | '"' => {
                    quote = Some(c);
                    in_token = true;
                }
                c if c.is_whitespace() => {
                    if in_token {
                        args.push(std::mem::take(&mut current));
                        in_token = false;
                    }
                }
                c => {
                    current.push(c);
                    in_token = true;
                }
            },
        }
    }
    if in_token {
        args.push(current);
    }
    args
}
