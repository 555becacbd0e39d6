//! Configuration type definitions

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use super::defaults::*;

// ============================================
// REPOSITORY
// ============================================

/// Location of the scripts inside a GitHub repository
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RepositoryConfig {
    #[serde(default = "default_owner")]
    pub owner: String,
    #[serde(default = "default_name")]
    pub name: String,
    #[serde(default = "default_branch")]
    pub branch: String,
    /// Folder holding one sub-folder per category (default: "sapp")
    #[serde(default = "default_scripts_root")]
    pub scripts_root: String,
}

fn default_owner() -> String {
    DEFAULT_REPOSITORY_OWNER.to_string()
}
fn default_name() -> String {
    DEFAULT_REPOSITORY_NAME.to_string()
}
fn default_branch() -> String {
    DEFAULT_REPOSITORY_BRANCH.to_string()
}
fn default_scripts_root() -> String {
    DEFAULT_SCRIPTS_ROOT.to_string()
}

impl Default for RepositoryConfig {
    fn default() -> Self {
        RepositoryConfig {
            owner: default_owner(),
            name: default_name(),
            branch: default_branch(),
            scripts_root: default_scripts_root(),
        }
    }
}

impl RepositoryConfig {
    /// Human-facing base, e.g. `https://github.com/Chalwk/HALO-SCRIPT-PROJECTS/blob/master/sapp`
    pub fn blob_base(&self) -> String {
        format!(
            "https://github.com/{}/{}/blob/{}/{}",
            self.owner,
            self.name,
            self.branch,
            self.scripts_root.trim_matches('/')
        )
    }

    /// Raw content base, e.g. `https://raw.githubusercontent.com/Chalwk/HALO-SCRIPT-PROJECTS/master/sapp`
    pub fn raw_base(&self) -> String {
        format!(
            "https://raw.githubusercontent.com/{}/{}/{}/{}",
            self.owner,
            self.name,
            self.branch,
            self.scripts_root.trim_matches('/')
        )
    }
}

// ============================================
// MAIN CONFIG
// ============================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    #[serde(default)]
    pub repository: RepositoryConfig,
    /// Listing document, relative to the scripts root
    #[serde(default = "default_metadata_path")]
    pub metadata_path: String,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    /// Directory downloads land in when no explicit destination is given.
    /// Supports `~` expansion.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub download_dir: Option<String>,
}

fn default_metadata_path() -> String {
    DEFAULT_METADATA_PATH.to_string()
}
fn default_request_timeout_secs() -> u64 {
    DEFAULT_REQUEST_TIMEOUT_SECS
}

impl Default for Config {
    fn default() -> Self {
        Config {
            repository: RepositoryConfig::default(),
            metadata_path: default_metadata_path(),
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            download_dir: None,
        }
    }
}

impl Config {
    /// Full URL of the listing document
    pub fn metadata_url(&self) -> String {
        format!(
            "{}/{}",
            self.repository.raw_base(),
            self.metadata_path.trim_start_matches('/')
        )
    }

    /// Request timeout; zero is treated as the default
    pub fn request_timeout(&self) -> Duration {
        match self.request_timeout_secs {
            0 => Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
            secs => Duration::from_secs(secs),
        }
    }

    /// Download directory with `~` expanded, falling back to the current directory
    pub fn download_dir(&self) -> PathBuf {
        match self.download_dir.as_deref() {
            Some(dir) if !dir.trim().is_empty() => PathBuf::from(shellexpand::tilde(dir).as_ref()),
            _ => std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
        }
    }
}
