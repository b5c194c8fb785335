//! Application configuration.
//!
//! Configuration is loaded once from a TOML file and passed explicitly
//! into collection and evaluator construction; nothing reads ambient
//! process state after startup. A missing config file is created from the
//! default template on first run.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::debug;

use crate::defaults::{APP_NAME, CONFIG_FILE, DEFAULT_CONFIG, DEFAULT_NOTEBOOK};
use crate::error::{Error, Result};

/// Resolved application configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Directory containing note files.
    pub data_dir: PathBuf,
    /// Notebook assigned to notes that carry none (stored lowercase).
    pub default_notebook: String,
    /// File extension for note files, without the leading dot.
    pub file_ext: Option<String>,
    /// Standard options appended to the editor command line.
    pub editor_options: Option<String>,
}

/// On-disk shape of the config file. All fields optional; [`Config`]
/// applies the defaults.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ConfigFile {
    data_dir: Option<String>,
    default_notebook: Option<String>,
    file_ext: Option<String>,
    editor_options: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            default_notebook: DEFAULT_NOTEBOOK.to_string(),
            file_ext: None,
            editor_options: None,
        }
    }
}

impl Config {
    /// Load configuration from `path`, writing the default template first
    /// if the file does not exist yet.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            if let Some(dir) = path.parent() {
                fs::create_dir_all(dir)?;
            }
            fs::write(path, DEFAULT_CONFIG)?;
            debug!(file = %path.display(), "wrote default config");
        }

        let raw = fs::read_to_string(path)?;
        let file: ConfigFile = toml::from_str(&raw)
            .map_err(|e| Error::Config(format!("{}: {}", path.display(), e)))?;

        let mut config = Config::default();
        if let Some(dir) = file.data_dir {
            config.data_dir = expand_tilde(&dir);
        }
        if let Some(notebook) = file.default_notebook {
            let notebook = notebook.trim().to_lowercase();
            if notebook.is_empty() {
                return Err(Error::Config("default_notebook must not be empty".to_string()));
            }
            config.default_notebook = notebook;
        }
        config.file_ext = file.file_ext.filter(|e| !e.is_empty());
        config.editor_options = file.editor_options.filter(|o| !o.is_empty());
        Ok(config)
    }

    /// Default config file location (`$XDG_CONFIG_HOME/jot/config.toml`).
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(APP_NAME)
            .join(CONFIG_FILE)
    }
}

/// Default data directory (`$XDG_DATA_HOME/jot`).
fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_NAME)
}

/// Expand a leading `~` to the user's home directory.
fn expand_tilde(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(rest);
        }
    }
    PathBuf::from(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_writes_default_template() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let config = Config::load(&path).unwrap();
        assert!(path.exists());
        assert_eq!(config.default_notebook, DEFAULT_NOTEBOOK);
        assert!(config.file_ext.is_none());
    }

    #[test]
    fn test_load_custom_values() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(
            &path,
            "data_dir = \"/tmp/notes\"\ndefault_notebook = \"Inbox\"\nfile_ext = \"md\"\n",
        )
        .unwrap();
        let config = Config::load(&path).unwrap();
        assert_eq!(config.data_dir, PathBuf::from("/tmp/notes"));
        assert_eq!(config.default_notebook, "inbox");
        assert_eq!(config.file_ext.as_deref(), Some("md"));
    }

    #[test]
    fn test_load_invalid_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "data_dir = [broken").unwrap();
        let err = Config::load(&path).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_empty_default_notebook_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "default_notebook = \"  \"\n").unwrap();
        assert!(Config::load(&path).is_err());
    }

    #[test]
    fn test_default_template_parses() {
        let file: std::result::Result<ConfigFile, _> = toml::from_str(DEFAULT_CONFIG);
        assert!(file.is_ok());
        assert_eq!(
            file.unwrap().default_notebook.as_deref(),
            Some(DEFAULT_NOTEBOOK)
        );
    }

    #[test]
    fn test_expand_tilde() {
        if let Some(home) = dirs::home_dir() {
            assert_eq!(expand_tilde("~/notes"), home.join("notes"));
        }
        assert_eq!(expand_tilde("/abs/path"), PathBuf::from("/abs/path"));
    }
}
