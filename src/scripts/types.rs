//! Script record type definitions
//!
//! This module contains the core data types for script records
//! and ranked search results.

use std::sync::Arc;

use crate::config::RepositoryConfig;
use crate::error::{BrowserError, Result};

use super::category::Category;

/// Extension every SAPP script is published with
pub const SCRIPT_EXTENSION: &str = ".lua";

/// One downloadable script and its metadata.
///
/// Records are built in bulk during a refresh and shared as `Arc<ScriptRecord>`;
/// they are never edited in place.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScriptRecord {
    pub title: String,
    pub short_description: Option<String>,
    pub description: Option<String>,
    /// File name as stored remotely (e.g., "admin_tools.lua")
    pub filename: Option<String>,
    pub category: Category,
}

impl ScriptRecord {
    pub fn new(title: impl Into<String>, filename: impl Into<String>, category: Category) -> Self {
        Self {
            title: title.into(),
            short_description: None,
            description: None,
            filename: Some(filename.into()),
            category,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_short_description(mut self, short_description: impl Into<String>) -> Self {
        self.short_description = Some(short_description.into());
        self
    }

    /// Filename with the `.lua` suffix stripped.
    /// A filename without that suffix is returned unchanged.
    pub fn filename_without_extension(&self) -> Option<&str> {
        self.filename
            .as_deref()
            .map(|name| name.strip_suffix(SCRIPT_EXTENSION).unwrap_or(name))
    }

    /// Filename, or `MissingFilename` for records that cannot be fetched
    pub fn require_filename(&self) -> Result<&str> {
        match self.filename.as_deref() {
            Some(name) if !name.is_empty() => Ok(name),
            _ => Err(BrowserError::MissingFilename {
                title: self.title.clone(),
            }),
        }
    }

    /// Human-facing page for the script ("view source")
    pub fn canonical_url(&self, repo: &RepositoryConfig) -> Result<String> {
        let filename = self.require_filename()?;
        Ok(format!(
            "{}/{}/{}",
            repo.blob_base(),
            self.category.folder_name(),
            filename
        ))
    }

    /// Raw file content location used for downloads
    pub fn raw_content_url(&self, repo: &RepositoryConfig) -> Result<String> {
        let filename = self.require_filename()?;
        Ok(format!(
            "{}/{}/{}",
            repo.raw_base(),
            self.category.folder_name(),
            filename
        ))
    }

    /// Text shown in the details pane for a selected script
    pub fn details_text(&self) -> String {
        format!(
            "Title: {}\n\nCategory: {}\n\nFilename: {}\n\nDescription:\n{}",
            self.title,
            self.category.display_name(),
            self.filename.as_deref().unwrap_or(""),
            self.description.as_deref().unwrap_or("")
        )
    }
}

/// A record paired with its relevance score for one query evaluation
#[derive(Clone, Debug)]
pub struct SearchResult {
    pub record: Arc<ScriptRecord>,
    pub score: i32,
}
