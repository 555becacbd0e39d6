//! Scripts module - script records, categories, ranking and filtering
//!
//! This module provides functionality for:
//! - The script record data model and its derived URLs
//! - Grouping records by category
//! - Relevance ranking of records against a search query
//! - Category + query filtering producing the displayed list
//! - Parsing the remote script listing into records
//!
//! # Module Structure
//!
//! - `types` - Core data types (ScriptRecord, SearchResult)
//! - `category` - Closed category enumeration and the `All` selection
//! - `index` - CategoryIndex built once per refresh
//! - `search` - Query normalization, fuzzy matching, scoring
//! - `filter` - Category selection + ranking + ordering
//! - `listing` - Listing document parsing (ingestion)

mod category;
mod filter;
mod index;
mod listing;
mod search;
mod types;

pub use category::{Category, CategoryFilter};
pub use filter::{filter, filter_ranked};
pub use index::{CatalogStats, CategoryIndex};
pub use listing::parse_listing;
pub use search::{fuzzy_match, matches, score, SearchQuery};
pub use types::{ScriptRecord, SearchResult, SCRIPT_EXTENSION};

#[cfg(test)]
#[path = "../scripts_tests.rs"]
mod tests;
