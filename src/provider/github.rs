//! GitHub-backed provider: the listing document and raw script files are
//! fetched from raw.githubusercontent.com.

use anyhow::{Context, Result};
use tracing::{debug, instrument};
use ureq::Agent;

use crate::config::{Config, RepositoryConfig};
use crate::scripts::{parse_listing, ScriptRecord};

use super::{MetadataProvider, ScriptContent};

pub struct GitHubProvider {
    agent: Agent,
    repository: RepositoryConfig,
    metadata_url: String,
}

impl GitHubProvider {
    pub fn new(config: &Config) -> Self {
        let agent: Agent = Agent::config_builder()
            .timeout_global(Some(config.request_timeout()))
            .build()
            .into();
        Self {
            agent,
            repository: config.repository.clone(),
            metadata_url: config.metadata_url(),
        }
    }

    pub fn repository(&self) -> &RepositoryConfig {
        &self.repository
    }

    pub fn metadata_url(&self) -> &str {
        &self.metadata_url
    }
}

impl MetadataProvider for GitHubProvider {
    #[instrument(skip_all, fields(url = %self.metadata_url))]
    fn load_all(&self) -> Result<Vec<ScriptRecord>> {
        debug!("Requesting script listing");

        let body = self
            .agent
            .get(&self.metadata_url)
            .call()
            .with_context(|| format!("Failed to request script listing from {}", self.metadata_url))?
            .into_body()
            .read_to_string()
            .context("Failed to read script listing")?;

        let records = parse_listing(&body)?;
        debug!(count = records.len(), "Received script listing");
        Ok(records)
    }

    fn fetch_content(&self, record: &ScriptRecord) -> Result<ScriptContent> {
        let url = record.raw_content_url(&self.repository)?;
        debug!(url = %url, "Requesting script content");

        let response = self
            .agent
            .get(&url)
            .call()
            .with_context(|| format!("Failed to request {}", url))?;

        let body = response.into_body();
        let length = body.content_length();
        Ok(ScriptContent::new(body.into_reader(), length))
    }

    fn canonical_url(&self, record: &ScriptRecord) -> crate::error::Result<String> {
        record.canonical_url(&self.repository)
    }
}
