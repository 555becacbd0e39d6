//! Script catalog: the in-memory snapshot of every known script.
//!
//! The snapshot is rebuilt off to the side by `refresh()` and swapped in
//! with a single pointer store, so `filter()` always sees either the old or
//! the new index in full.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;

use parking_lot::RwLock;
use tracing::{info, instrument, warn};

use crate::error::{BrowserError, Result};
use crate::logging;
use crate::provider::MetadataProvider;
use crate::scripts::{self, CatalogStats, CategoryFilter, CategoryIndex, ScriptRecord, SearchResult};

/// Filtering slower than this is logged as a warning
const FILTER_SLOW_THRESHOLD_MS: u64 = 16;

/// Immutable view of the catalog produced by one refresh
#[derive(Debug, Default)]
pub struct CatalogSnapshot {
    pub index: CategoryIndex,
}

impl CatalogSnapshot {
    pub fn new(records: Vec<ScriptRecord>) -> Self {
        Self {
            index: CategoryIndex::build(records.into_iter().map(Arc::new).collect()),
        }
    }
}

pub struct ScriptCatalog {
    provider: Arc<dyn MetadataProvider>,
    snapshot: RwLock<Arc<CatalogSnapshot>>,
    loaded: AtomicBool,
    refreshing: AtomicBool,
}

/// Clears the in-flight flag when a refresh ends, including on early return
struct RefreshGuard<'a>(&'a AtomicBool);

impl Drop for RefreshGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl ScriptCatalog {
    pub fn new(provider: Arc<dyn MetadataProvider>) -> Self {
        Self {
            provider,
            snapshot: RwLock::new(Arc::new(CatalogSnapshot::default())),
            loaded: AtomicBool::new(false),
            refreshing: AtomicBool::new(false),
        }
    }

    pub fn provider(&self) -> &Arc<dyn MetadataProvider> {
        &self.provider
    }

    /// Reload every record from the provider and replace the snapshot.
    ///
    /// Returns the number of records loaded. On failure the previous snapshot
    /// is kept: a malformed listing reports `MissingCategory`/`UnknownCategory`,
    /// anything else `LoadFailed`. A refresh requested while another one runs
    /// is rejected.
    #[instrument(skip_all)]
    pub fn refresh(&self) -> Result<usize> {
        if self
            .refreshing
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            warn!("Refresh requested while another is in flight");
            return Err(BrowserError::RefreshInProgress);
        }
        let _guard = RefreshGuard(&self.refreshing);

        let start = Instant::now();
        let records = match self.provider.load_all() {
            Ok(records) => records,
            Err(e) => {
                logging::log_refresh_event("failed", None, start.elapsed().as_millis() as u64);
                warn!(error = %format!("{:#}", e), "Keeping previous scripts after failed refresh");
                // listing integrity errors keep their variant; transport failures become LoadFailed
                return Err(match e.downcast::<BrowserError>() {
                    Ok(typed) => typed,
                    Err(e) => BrowserError::LoadFailed(format!("{:#}", e)),
                });
            }
        };

        let count = records.len();
        let snapshot = Arc::new(CatalogSnapshot::new(records));
        *self.snapshot.write() = snapshot;
        self.loaded.store(true, Ordering::Release);

        logging::log_refresh_event("completed", Some(count), start.elapsed().as_millis() as u64);
        Ok(count)
    }

    /// Whether at least one refresh has succeeded
    pub fn is_loaded(&self) -> bool {
        self.loaded.load(Ordering::Acquire)
    }

    pub fn is_refreshing(&self) -> bool {
        self.refreshing.load(Ordering::Acquire)
    }

    /// The current snapshot; stays valid even if a refresh swaps in a new one
    pub fn snapshot(&self) -> Arc<CatalogSnapshot> {
        Arc::clone(&self.snapshot.read())
    }

    /// Ordered records for a category and query
    pub fn filter(&self, category: CategoryFilter, query: &str) -> Vec<Arc<ScriptRecord>> {
        self.filter_ranked(category, query)
            .into_iter()
            .map(|result| result.record)
            .collect()
    }

    /// Ordered records with their relevance scores
    pub fn filter_ranked(&self, category: CategoryFilter, query: &str) -> Vec<SearchResult> {
        let snapshot = self.snapshot();
        let start = Instant::now();
        let results = scripts::filter_ranked(&snapshot.index, category, query);
        logging::log_perf(
            "filter",
            start.elapsed().as_millis() as u64,
            FILTER_SLOW_THRESHOLD_MS,
        );
        results
    }

    pub fn stats(&self) -> CatalogStats {
        self.snapshot().index.stats()
    }

    /// Look a script up by its remote filename (case-insensitive)
    pub fn find_by_filename(&self, filename: &str) -> Option<Arc<ScriptRecord>> {
        let snapshot = self.snapshot();
        let found = snapshot
            .index
            .all()
            .iter()
            .find(|r| {
                r.filename
                    .as_deref()
                    .is_some_and(|f| f.eq_ignore_ascii_case(filename))
            })
            .cloned();
        if found.is_none() {
            info!(filename = filename, "Script not found in catalog");
        }
        found
    }
}

#[cfg(test)]
#[path = "catalog_tests.rs"]
mod tests;
