//! Configuration module - Repository location and download settings
//!
//! # Module Structure
//!
//! - `defaults` - All default constant values
//! - `types` - Configuration struct definitions (Config, RepositoryConfig)
//! - `loader` - File system loading and parsing

mod defaults;
mod loader;
mod types;

pub use defaults::DEFAULT_CONFIG_PATH;

pub use types::{Config, RepositoryConfig};

pub use loader::{load_config, load_config_from};

#[cfg(test)]
pub use defaults::{
    DEFAULT_METADATA_PATH, DEFAULT_REPOSITORY_BRANCH, DEFAULT_REPOSITORY_NAME,
    DEFAULT_REPOSITORY_OWNER, DEFAULT_REQUEST_TIMEOUT_SECS, DEFAULT_SCRIPTS_ROOT,
};

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
