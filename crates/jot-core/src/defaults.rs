//! Centralized default constants for jot.
//!
//! **This module is the single source of truth** for all shared default
//! values. All crates reference these constants instead of defining their
//! own magic strings.

// =============================================================================
// APPLICATION
// =============================================================================

/// Application name, used for XDG directory paths and display.
pub const APP_NAME: &str = "jot";

// =============================================================================
// NOTEBOOKS
// =============================================================================

/// Notebook assigned to notes that carry none of their own.
pub const DEFAULT_NOTEBOOK: &str = "default";

/// Notebook names taken by list views and therefore unusable for notes.
pub const RESERVED_NOTEBOOKS: &[&str] = &["notebooks", "all"];

// =============================================================================
// ALIASES
// =============================================================================

/// Length of generated note aliases.
pub const ALIAS_LEN: usize = 4;

/// Character set for generated note aliases.
pub const ALIAS_CHARSET: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";

// =============================================================================
// QUERY LANGUAGE
// =============================================================================

/// Delimiter separating the search expression from the exclusion expression.
pub const EXCLUSION_DELIMITER: char = '%';

/// Term that matches every note when used as a `note` clause.
pub const MATCH_ANY: &str = "any";

/// Operator joining alternative tags within a single `tags` clause.
pub const TAG_OR_OPERATOR: char = '+';

/// Tag removal operator. Valid only in the modify grammar, never in search.
pub const TAG_REMOVE_OPERATOR: char = '~';

// =============================================================================
// STORAGE
// =============================================================================

/// Subdirectory of the data directory holding archived notes.
pub const ARCHIVE_DIR: &str = "archive";

/// Delimiter line fencing the YAML metadata block in a note file.
pub const METADATA_FENCE: &str = "---";

// =============================================================================
// CONFIGURATION
// =============================================================================

/// Config file name under the XDG config directory.
pub const CONFIG_FILE: &str = "config.toml";

/// Default config file contents, written on first run.
pub const DEFAULT_CONFIG: &str = "\
# jot configuration

# directory containing note files.
#data_dir = \"~/.local/share/jot\"

# notebook assigned to notes without one.
default_notebook = \"default\"

# file extension for note files (e.g. \"md\" for markdown).
# don't include the '.' character. the default is no extension.
#file_ext = \"\"

# standard editor options to use when editing notes.
# may be overridden with -o/--editor-opts.
#editor_options = \"\"
";
