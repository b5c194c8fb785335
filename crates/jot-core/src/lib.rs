//! # jot-core
//!
//! Core types, configuration, and abstractions for jot.
//!
//! This crate provides the foundational data structures (notes, collections,
//! tag expressions, configuration) that the other jot crates depend on.

pub mod collection;
pub mod config;
pub mod defaults;
pub mod error;
pub mod logging;
pub mod models;
pub mod tags;

// Re-export commonly used types at crate root
pub use collection::{NoteCollection, NoteSource};
pub use config::Config;
pub use error::{Error, Result};
pub use models::{format_timestamp, parse_timestamp, Note, NoteMetadata};
pub use tags::{modify_tags, normalize_tags};
