//! Category + query filtering
//!
//! Produces the list the presentation layer displays. Every call is
//! independent; callers must reset any selection or detail view when a new
//! list is returned.

use std::sync::Arc;

use tracing::{debug, instrument};

use super::category::CategoryFilter;
use super::index::CategoryIndex;
use super::search::{rank, SearchQuery};
use super::types::{ScriptRecord, SearchResult};

/// Records for `category` matching `query`, best first.
///
/// With an empty query the bucket is sorted by title; otherwise non-matching
/// records are dropped and the rest sorted by descending score, ties keeping
/// their bucket order.
pub fn filter(index: &CategoryIndex, category: CategoryFilter, query: &str) -> Vec<Arc<ScriptRecord>> {
    filter_ranked(index, category, query)
        .into_iter()
        .map(|result| result.record)
        .collect()
}

/// Same ordering as [`filter`], with the score of every record attached.
/// Scores are 0 when the query is empty.
#[instrument(level = "debug", skip_all, fields(category = %category, query_len = query.len()))]
pub fn filter_ranked(
    index: &CategoryIndex,
    category: CategoryFilter,
    query: &str,
) -> Vec<SearchResult> {
    let bucket = index.bucket(category);
    let query = SearchQuery::parse(query);

    if query.is_empty() {
        let mut results: Vec<SearchResult> = bucket
            .iter()
            .map(|record| SearchResult {
                record: Arc::clone(record),
                score: 0,
            })
            .collect();
        // sort_by is stable: equal titles keep bucket order
        results.sort_by(|a, b| a.record.title.cmp(&b.record.title));
        return results;
    }

    let mut results: Vec<SearchResult> = bucket
        .iter()
        .filter_map(|record| {
            rank(record, &query).map(|score| SearchResult {
                record: Arc::clone(record),
                score,
            })
        })
        .collect();
    results.sort_by(|a, b| b.score.cmp(&a.score));

    debug!(
        bucket_size = bucket.len(),
        result_count = results.len(),
        terms = query.terms().len(),
        "Filtered scripts"
    );

    results
}
