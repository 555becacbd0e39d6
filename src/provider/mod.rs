//! Script metadata and content providers.
//!
//! # Architecture
//!
//! - `MetadataProvider` trait defines what the catalog needs from a remote source
//! - `GitHubProvider` implements it over HTTP against a GitHub repository
//!
//! # Usage
//!
//! ```rust,ignore
//! let provider = GitHubProvider::new(&config);
//! let records = provider.load_all()?;
//! ```

mod github;

use std::io::Read;

use anyhow::Result;

use crate::scripts::ScriptRecord;

pub use github::GitHubProvider;

/// Raw bytes of one script, streamed
pub struct ScriptContent {
    pub reader: Box<dyn Read>,
    /// Content length when the source reports one
    pub length: Option<u64>,
}

impl ScriptContent {
    pub fn new(reader: impl Read + 'static, length: Option<u64>) -> Self {
        Self {
            reader: Box::new(reader),
            length,
        }
    }
}

impl std::fmt::Debug for ScriptContent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScriptContent")
            .field("length", &self.length)
            .finish_non_exhaustive()
    }
}

/// Source of script records and script content.
///
/// Methods are blocking; the catalog and the download worker call them
/// from background threads.
pub trait MetadataProvider: Send + Sync {
    /// Every script across all categories
    fn load_all(&self) -> Result<Vec<ScriptRecord>>;

    /// Stream the raw bytes of one script
    fn fetch_content(&self, record: &ScriptRecord) -> Result<ScriptContent>;

    /// Human-facing page for a script ("view source")
    fn canonical_url(&self, record: &ScriptRecord) -> crate::error::Result<String>;
}
