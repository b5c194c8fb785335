//! Structured logging field name constants for jot.
//!
//! All crates use these constants for consistent structured logging fields,
//! so log output can be filtered by standardized field names across every
//! subsystem.
//!
//! ## Log Level Contract
//!
//! | Level | Usage |
//! |-------|-------|
//! | ERROR | Command cannot proceed, surfaced to the user |
//! | WARN  | Recoverable issue, note file skipped or fallback applied |
//! | INFO  | Lifecycle events, mutation completions |
//! | DEBUG | Decision points, parsed queries, config choices |
//! | TRACE | Per-note iteration during evaluation |

// ─── Identity fields ───────────────────────────────────────────────────────

/// Subsystem originating the log event.
/// Values: "query", "store", "shell"
pub const SUBSYSTEM: &str = "subsystem";

/// Logical operation name.
/// Examples: "search", "load", "modify", "archive"
pub const OPERATION: &str = "op";

// ─── Entity fields ─────────────────────────────────────────────────────────

/// Note UUID being operated on.
pub const NOTE_UID: &str = "note_uid";

/// Note alias being operated on.
pub const ALIAS: &str = "alias";

/// Notebook a note or listing belongs to.
pub const NOTEBOOK: &str = "notebook";

/// Note file path being read or written.
pub const FILE: &str = "file";

/// Raw search expression text.
pub const QUERY: &str = "query";

// ─── Measurement fields ────────────────────────────────────────────────────

/// Number of results returned by a search or listing.
pub const RESULT_COUNT: &str = "result_count";

/// Number of notes loaded into a collection snapshot.
pub const NOTE_COUNT: &str = "note_count";

/// Number of note files skipped during a load.
pub const SKIPPED_COUNT: &str = "skipped_count";

// ─── Outcome fields ────────────────────────────────────────────────────────

/// Error message when an operation fails.
pub const ERROR_MSG: &str = "error";
