//! Category grouping
//!
//! The index is built once per metadata refresh and never mutated afterwards.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::debug;

use super::category::{Category, CategoryFilter};
use super::types::ScriptRecord;

/// Records grouped by category, plus the implicit `All` bucket
#[derive(Debug, Default, Clone)]
pub struct CategoryIndex {
    all: Vec<Arc<ScriptRecord>>,
    by_category: HashMap<Category, Vec<Arc<ScriptRecord>>>,
}

impl CategoryIndex {
    /// Group records by category. Bucket order follows the input order.
    pub fn build(records: Vec<Arc<ScriptRecord>>) -> Self {
        let mut by_category: HashMap<Category, Vec<Arc<ScriptRecord>>> = HashMap::new();
        for record in &records {
            by_category
                .entry(record.category)
                .or_default()
                .push(Arc::clone(record));
        }

        debug!(
            total = records.len(),
            categories = by_category.len(),
            "Built category index"
        );

        Self {
            all: records,
            by_category,
        }
    }

    /// Records for a selection; a category with no records yields an empty slice
    pub fn bucket(&self, filter: CategoryFilter) -> &[Arc<ScriptRecord>] {
        match filter {
            CategoryFilter::All => &self.all,
            CategoryFilter::Only(category) => self
                .by_category
                .get(&category)
                .map(Vec::as_slice)
                .unwrap_or(&[]),
        }
    }

    pub fn all(&self) -> &[Arc<ScriptRecord>] {
        &self.all
    }

    pub fn len(&self) -> usize {
        self.all.len()
    }

    pub fn is_empty(&self) -> bool {
        self.all.is_empty()
    }

    pub fn count(&self, category: Category) -> usize {
        self.by_category.get(&category).map_or(0, Vec::len)
    }

    pub fn stats(&self) -> CatalogStats {
        CatalogStats {
            total: self.all.len(),
            per_category: Category::ALL.map(|c| (c, self.count(c))),
        }
    }
}

/// Counts shown in the status bar
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CatalogStats {
    pub total: usize,
    pub per_category: [(Category, usize); 3],
}

impl CatalogStats {
    /// Status line, e.g. "Total: 3 | Attractive: 1 | Custom Games: 0 | Utility: 2 | Showing: 2"
    pub fn summary(&self, showing: usize) -> String {
        let mut parts = vec![format!("Total: {}", self.total)];
        parts.extend(
            self.per_category
                .iter()
                .map(|(category, count)| format!("{}: {}", category.display_name(), count)),
        );
        parts.push(format!("Showing: {}", showing));
        parts.join(" | ")
    }
}
