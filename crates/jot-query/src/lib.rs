//! # jot-query
//!
//! The search query engine for jot: parsing a search expression into a
//! matchable predicate, evaluating it against an in-memory note
//! collection, and producing ordered results with contextual excerpts.
//!
//! ## Query language
//!
//! A raw search string is a comma-separated list of clauses, optionally
//! followed by `%` and an exclusion expression with the same clause
//! syntax:
//!
//! ```text
//! notebook=projects,tags=development+testing % tags=archived
//! ```
//!
//! Each clause is `field=term` or a bare term (field defaults to `note`,
//! the body search). Clauses AND together; `+`-joined tags within one
//! `tags` clause OR together; the exclusion expression subtracts its
//! matches from the result set. `/…/` wraps a regular expression, valid
//! only for `note` clauses. The literal term `any` matches every note.
//!
//! The comma split happens before regex delimiters are recognized, so a
//! regex containing a literal comma is rejected as malformed. This is a
//! documented restriction of the language, not a defect to fix.

pub mod evaluate;
pub mod matcher;
pub mod parse;

pub use evaluate::{evaluate, search, SearchResult};
pub use matcher::{clause_matches, query_matches};
pub use parse::{parse, Clause, FieldType, ParsedSearch, Query, Term};
