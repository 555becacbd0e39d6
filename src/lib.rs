//! HSP Script Browser - browse, search and download SAPP Lua scripts
//!
//! This library provides the catalog of scripts published in the HALO SCRIPT
//! PROJECTS repository: loading the listing, ranking it against a search
//! query, filtering by category and downloading individual scripts.

pub mod catalog;
pub mod config;
pub mod error;
pub mod logging;
pub mod provider;
pub mod scripts;
pub mod worker;

pub use catalog::{CatalogSnapshot, ScriptCatalog};
pub use error::{BrowserError, Result};
pub use provider::{GitHubProvider, MetadataProvider, ScriptContent};
pub use scripts::{Category, CategoryFilter, CategoryIndex, ScriptRecord, SearchResult};
