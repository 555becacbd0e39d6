//! Relevance ranking of script records
//!
//! A query is split into lower-cased terms. Every term is checked against
//! five fields of a record (title, filename without extension, description,
//! short description and category name) and the per-term points are summed.
//!
//! `score` and `matches` deliberately look at different field sets for the
//! fuzzy step: fuzzy hits on the description add points but never make a
//! record match on their own.

use super::types::ScriptRecord;

// ============================================
// SCORE WEIGHTS
// ============================================

const EXACT_TITLE: i32 = 100;
const EXACT_FILENAME: i32 = 100;
const CONTAINS_TITLE: i32 = 50;
const CONTAINS_FILENAME: i32 = 50;
const CONTAINS_DESCRIPTION: i32 = 10;
const CONTAINS_SHORT_DESCRIPTION: i32 = 10;
const CONTAINS_CATEGORY: i32 = 5;
const FUZZY_TITLE: i32 = 3;
const FUZZY_FILENAME: i32 = 3;
const FUZZY_DESCRIPTION: i32 = 1;

/// A normalized search query: trimmed, lower-cased, split on whitespace
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SearchQuery {
    terms: Vec<String>,
}

impl SearchQuery {
    pub fn parse(query: &str) -> Self {
        let terms = query
            .trim()
            .to_lowercase()
            .split_whitespace()
            .map(str::to_string)
            .collect();
        Self { terms }
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    pub fn terms(&self) -> &[String] {
        &self.terms
    }
}

impl From<&str> for SearchQuery {
    fn from(query: &str) -> Self {
        SearchQuery::parse(query)
    }
}

/// Check if `pattern` is a subsequence of `text` (characters appear in order).
/// An empty pattern always matches; an empty text matches only an empty pattern.
/// Both arguments are compared as-is, callers lower-case them first.
pub fn fuzzy_match(text: &str, pattern: &str) -> bool {
    let mut pattern_chars = pattern.chars().peekable();
    for ch in text.chars() {
        match pattern_chars.peek() {
            Some(&p) if p == ch => {
                pattern_chars.next();
            }
            Some(_) => {}
            None => break,
        }
    }
    pattern_chars.peek().is_none()
}

/// Lower-cased copies of the searchable fields; absent fields are empty
struct SearchFields {
    title: String,
    filename: String,
    description: String,
    short_description: String,
    category: String,
}

impl SearchFields {
    fn of(record: &ScriptRecord) -> Self {
        Self {
            title: record.title.to_lowercase(),
            filename: record
                .filename_without_extension()
                .map(str::to_lowercase)
                .unwrap_or_default(),
            description: lower_or_empty(record.description.as_deref()),
            short_description: lower_or_empty(record.short_description.as_deref()),
            category: record.category.display_name().to_lowercase(),
        }
    }

    fn term_score(&self, term: &str) -> i32 {
        let mut score = 0;

        if self.title == term {
            score += EXACT_TITLE;
        }
        if self.filename == term {
            score += EXACT_FILENAME;
        }

        if self.title.contains(term) {
            score += CONTAINS_TITLE;
        }
        if self.filename.contains(term) {
            score += CONTAINS_FILENAME;
        }
        if self.description.contains(term) {
            score += CONTAINS_DESCRIPTION;
        }
        if self.short_description.contains(term) {
            score += CONTAINS_SHORT_DESCRIPTION;
        }
        if self.category.contains(term) {
            score += CONTAINS_CATEGORY;
        }

        if fuzzy_match(&self.title, term) {
            score += FUZZY_TITLE;
        }
        if fuzzy_match(&self.filename, term) {
            score += FUZZY_FILENAME;
        }
        if fuzzy_match(&self.description, term) {
            score += FUZZY_DESCRIPTION;
        }

        score
    }

    /// Exact/contains on any field, or fuzzy on title or filename only
    fn term_matches(&self, term: &str) -> bool {
        self.title.contains(term)
            || self.filename.contains(term)
            || self.description.contains(term)
            || self.short_description.contains(term)
            || self.category.contains(term)
            || fuzzy_match(&self.title, term)
            || fuzzy_match(&self.filename, term)
    }
}

fn lower_or_empty(value: Option<&str>) -> String {
    value.map(str::to_lowercase).unwrap_or_default()
}

/// Relevance of `record` for `query`; 0 for an empty query
pub fn score(record: &ScriptRecord, query: &SearchQuery) -> i32 {
    if query.is_empty() {
        return 0;
    }
    let fields = SearchFields::of(record);
    query.terms().iter().map(|term| fields.term_score(term)).sum()
}

/// Whether every term of `query` hits `record`; always true for an empty query
pub fn matches(record: &ScriptRecord, query: &SearchQuery) -> bool {
    if query.is_empty() {
        return true;
    }
    let fields = SearchFields::of(record);
    query.terms().iter().all(|term| fields.term_matches(term))
}

/// Score and match in one pass over the lower-cased fields.
/// Returns None when the record does not match.
pub(crate) fn rank(record: &ScriptRecord, query: &SearchQuery) -> Option<i32> {
    let fields = SearchFields::of(record);
    if !query.terms().iter().all(|term| fields.term_matches(term)) {
        return None;
    }
    Some(query.terms().iter().map(|term| fields.term_score(term)).sum())
}
