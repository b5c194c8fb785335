//! Query expression parsing.
//!
//! Converts a raw search-expression string (plus optional exclusion
//! string) into a structured [`ParsedSearch`] with all operators resolved
//! and regex patterns compiled. Every malformed input is rejected here as
//! [`Error::QuerySyntax`]; the matcher and evaluator only ever see
//! well-formed predicates.

use regex::Regex;
use tracing::debug;

use jot_core::defaults::{EXCLUSION_DELIMITER, MATCH_ANY, TAG_OR_OPERATOR, TAG_REMOVE_OPERATOR};
use jot_core::{Error, Result};

/// The logical target of a clause.
///
/// A closed set: the query language has exactly these seven field types
/// and unrecognized keys degrade to [`FieldType::Note`] rather than
/// extending it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldType {
    Uid,
    Alias,
    Title,
    Description,
    Notebook,
    Tags,
    Note,
}

impl FieldType {
    /// Resolve a clause key, case-insensitively. `None` for unrecognized
    /// keys (the documented leniency: such clauses become `note` searches).
    pub fn from_key(key: &str) -> Option<Self> {
        match key.to_lowercase().as_str() {
            "uid" => Some(Self::Uid),
            "alias" => Some(Self::Alias),
            "title" => Some(Self::Title),
            "description" => Some(Self::Description),
            "notebook" => Some(Self::Notebook),
            "tags" => Some(Self::Tags),
            "note" => Some(Self::Note),
            _ => None,
        }
    }
}

impl std::fmt::Display for FieldType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Uid => write!(f, "uid"),
            Self::Alias => write!(f, "alias"),
            Self::Title => write!(f, "title"),
            Self::Description => write!(f, "description"),
            Self::Notebook => write!(f, "notebook"),
            Self::Tags => write!(f, "tags"),
            Self::Note => write!(f, "note"),
        }
    }
}

/// A resolved clause term.
#[derive(Debug, Clone)]
pub enum Term {
    /// Plain text, matched as a case-insensitive substring (except the
    /// special `note` term `any`, which matches unconditionally).
    Literal(String),
    /// Compiled regular expression; only valid for `note` clauses.
    Regex(Regex),
    /// Tag alternatives from a `+`-joined tags term; a note matches if it
    /// carries ANY of them.
    AnyTags(Vec<String>),
}

impl Term {
    pub fn is_regex(&self) -> bool {
        matches!(self, Term::Regex(_))
    }
}

/// One `field=term` unit within a query expression.
#[derive(Debug, Clone)]
pub struct Clause {
    pub field: FieldType,
    pub term: Term,
}

/// A parsed search or exclusion expression: an ordered sequence of
/// clauses, ANDed together by the evaluator.
#[derive(Debug, Clone, Default)]
pub struct Query {
    pub clauses: Vec<Clause>,
}

impl Query {
    /// A query with no clauses matches every note (`any`, or an empty
    /// search part).
    pub fn is_match_all(&self) -> bool {
        self.clauses.is_empty()
    }

    /// Whether any clause targets the note body with a real term (used by
    /// the evaluator to decide excerpt extraction).
    pub fn has_body_clause(&self) -> bool {
        self.clauses.iter().any(|c| {
            c.field == FieldType::Note
                && match &c.term {
                    Term::Literal(t) => !t.eq_ignore_ascii_case(MATCH_ANY),
                    Term::Regex(_) => true,
                    Term::AnyTags(_) => false,
                }
        })
    }
}

/// A fully parsed search invocation: the search query plus the optional
/// exclusion query whose matches are subtracted.
#[derive(Debug, Clone)]
pub struct ParsedSearch {
    pub search: Query,
    pub exclusion: Option<Query>,
}

/// Parse a raw search expression and optional separate exclusion
/// expression.
///
/// When `raw_exclusion` is not supplied, `raw_search` is split on the
/// exclusion delimiter `%` into the two parts. The delimiter may appear
/// at most once in total; a `%` in `raw_search` alongside a separately
/// supplied exclusion is likewise rejected.
pub fn parse(raw_search: &str, raw_exclusion: Option<&str>) -> Result<ParsedSearch> {
    let raw = raw_search.trim();
    let delimiters = raw.matches(EXCLUSION_DELIMITER).count();
    if delimiters > 1 {
        return Err(Error::QuerySyntax(format!(
            "exclusion delimiter '{}' may appear at most once",
            EXCLUSION_DELIMITER
        )));
    }
    if delimiters > 0 && raw_exclusion.is_some() {
        return Err(Error::QuerySyntax(format!(
            "exclusion supplied separately, but search expression also contains '{}'",
            EXCLUSION_DELIMITER
        )));
    }

    let (search_part, exclusion_part) = match raw.split_once(EXCLUSION_DELIMITER) {
        Some((s, x)) => (s.trim(), Some(x.trim())),
        None => (raw, raw_exclusion.map(str::trim)),
    };

    let search = parse_expression(search_part)?;
    let exclusion = exclusion_part
        .filter(|part| !part.is_empty())
        .map(parse_expression)
        .transpose()?;

    debug!(
        clause_count = search.clauses.len(),
        has_exclusion = exclusion.is_some(),
        "parsed search expression"
    );
    Ok(ParsedSearch { search, exclusion })
}

/// Parse one comma-separated clause list into a [`Query`].
///
/// An empty expression or the bare term `any` yields the match-all query.
fn parse_expression(part: &str) -> Result<Query> {
    if part.is_empty() || part.eq_ignore_ascii_case(MATCH_ANY) {
        return Ok(Query::default());
    }

    // Clause splitting happens before regex delimiters are recognized, so
    // a regex containing a literal comma comes through here malformed and
    // is rejected below as unterminated. Documented restriction.
    let mut clauses = Vec::new();
    for item in part.split(',') {
        clauses.push(parse_clause(item)?);
    }
    Ok(Query { clauses })
}

/// Parse one clause: `field=term`, or a bare term targeting `note`.
fn parse_clause(item: &str) -> Result<Clause> {
    if item.trim().is_empty() {
        return Err(Error::QuerySyntax("empty clause".to_string()));
    }

    // Keys are recognized case-insensitively; an unrecognized key silently
    // degrades the clause to a note search of the right-hand side.
    let (field, term) = match item.split_once('=') {
        Some((key, term)) => match FieldType::from_key(key.trim()) {
            Some(field) => (field, term),
            None => (FieldType::Note, term),
        },
        None => (FieldType::Note, item),
    };

    let term = build_term(field, term, item)?;
    Ok(Clause { field, term })
}

fn build_term(field: FieldType, raw: &str, clause: &str) -> Result<Term> {
    match field {
        FieldType::Tags => {
            let tags: Vec<String> = raw
                .split(TAG_OR_OPERATOR)
                .map(str::to_string)
                .collect();
            for tag in &tags {
                if tag.starts_with(TAG_REMOVE_OPERATOR) {
                    return Err(Error::QuerySyntax(format!(
                        "tag removal operator '{}' is not valid in a search clause: '{}'",
                        TAG_REMOVE_OPERATOR, clause
                    )));
                }
            }
            Ok(Term::AnyTags(tags))
        }
        FieldType::Note => {
            if let Some(rest) = raw.strip_prefix('/') {
                let pattern = rest.strip_suffix('/').ok_or_else(|| {
                    Error::QuerySyntax(format!("unterminated regex in clause '{}'", clause))
                })?;
                let regex = Regex::new(pattern).map_err(|e| {
                    Error::QuerySyntax(format!("invalid regex in clause '{}': {}", clause, e))
                })?;
                Ok(Term::Regex(regex))
            } else {
                Ok(Term::Literal(raw.to_string()))
            }
        }
        _ => {
            if raw.len() >= 2 && raw.starts_with('/') && raw.ends_with('/') {
                return Err(Error::QuerySyntax(format!(
                    "regex is not permitted for field '{}' in clause '{}'",
                    field, clause
                )));
            }
            Ok(Term::Literal(raw.to_string()))
        }
    }
}
