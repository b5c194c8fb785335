//! `$EDITOR` invocation for notes and the config file.

use std::env;
use std::path::Path;
use std::process::Command;

use tracing::debug;

use jot_core::{Error, Result};

/// Open `path` in the user's editor and wait for it to exit.
///
/// `opts` takes precedence over `default_opts` (the configured
/// `editor_options`); both are split on whitespace and passed as
/// arguments before the file path.
pub fn edit_file(path: &Path, opts: Option<&str>, default_opts: Option<&str>) -> Result<()> {
    let editor = env::var("EDITOR")
        .ok()
        .filter(|e| !e.trim().is_empty())
        .ok_or_else(|| Error::Editor("$EDITOR is required and not set".to_string()))?;

    let mut command = Command::new(&editor);
    if let Some(opts) = opts.or(default_opts) {
        command.args(opts.split_whitespace());
    }
    command.arg(path);
    debug!(file = %path.display(), editor = %editor, "spawning editor");

    let status = command
        .status()
        .map_err(|e| Error::Editor(format!("failure editing file {}: {}", path.display(), e)))?;
    if !status.success() {
        return Err(Error::Editor(format!(
            "failure editing file {}: editor exited with {}",
            path.display(),
            status
        )));
    }
    Ok(())
}
