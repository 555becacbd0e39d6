//! Script listing parsing
//!
//! The remote listing is a JSON document in one of two shapes:
//!
//! ```json
//! { "utility": [ { "title": "Admin Tools", "filename": "admin_tools.lua" } ] }
//! ```
//!
//! or a flat array where every entry names its own category:
//!
//! ```json
//! [ { "title": "Admin Tools", "filename": "admin_tools.lua", "category": "utility" } ]
//! ```

use std::collections::HashMap;

use serde::Deserialize;
use tracing::{debug, warn};

use crate::error::{BrowserError, Result};

use super::category::Category;
use super::types::{ScriptRecord, SCRIPT_EXTENSION};

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ListingDocument {
    Grouped(HashMap<String, Vec<ListingEntry>>),
    Flat(Vec<ListingEntry>),
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ListingEntry {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    short_description: Option<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    filename: Option<String>,
    #[serde(default)]
    category: Option<String>,
}

/// Parse a listing document into records.
///
/// A record without a category, or with a category outside the known set,
/// fails the whole listing.
pub fn parse_listing(json: &str) -> Result<Vec<ScriptRecord>> {
    let document: ListingDocument = serde_json::from_str(json)
        .map_err(|e| BrowserError::LoadFailed(format!("Invalid script listing: {}", e)))?;

    let records = match document {
        ListingDocument::Grouped(groups) => records_from_groups(groups)?,
        ListingDocument::Flat(entries) => records_from_entries(entries)?,
    };

    debug!(count = records.len(), "Parsed script listing");
    Ok(records)
}

fn records_from_groups(groups: HashMap<String, Vec<ListingEntry>>) -> Result<Vec<ScriptRecord>> {
    let mut by_category: HashMap<Category, Vec<ListingEntry>> = HashMap::new();
    for (folder, entries) in groups {
        let category = Category::from_folder_name(&folder)
            .ok_or_else(|| BrowserError::UnknownCategory(folder.clone()))?;
        by_category.entry(category).or_default().extend(entries);
    }

    // HashMap order is arbitrary; emit in category order so bucket order is stable
    let mut records = Vec::new();
    for category in Category::ALL {
        for entry in by_category.remove(&category).unwrap_or_default() {
            records.extend(entry.into_record(category));
        }
    }
    Ok(records)
}

fn records_from_entries(entries: Vec<ListingEntry>) -> Result<Vec<ScriptRecord>> {
    let mut records = Vec::with_capacity(entries.len());
    for entry in entries {
        let category = match entry.category.as_deref().map(str::trim) {
            Some(name) if !name.is_empty() => name.parse::<Category>()?,
            _ => {
                return Err(BrowserError::MissingCategory {
                    title: entry.display_title().unwrap_or_default(),
                })
            }
        };
        records.extend(entry.into_record(category));
    }
    Ok(records)
}

impl ListingEntry {
    /// Title, or the filename stem when the title is blank
    fn display_title(&self) -> Option<String> {
        match self.title.as_deref().map(str::trim) {
            Some(title) if !title.is_empty() => Some(title.to_string()),
            _ => self
                .filename
                .as_deref()
                .map(|f| f.strip_suffix(SCRIPT_EXTENSION).unwrap_or(f).to_string())
                .filter(|stem| !stem.is_empty()),
        }
    }

    fn into_record(self, category: Category) -> Option<ScriptRecord> {
        let Some(title) = self.display_title() else {
            warn!(category = %category, "Skipping listing entry without title or filename");
            return None;
        };
        Some(ScriptRecord {
            title,
            short_description: non_blank(self.short_description),
            description: non_blank(self.description),
            filename: non_blank(self.filename).map(|f| f.trim().to_string()),
            category,
        })
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
