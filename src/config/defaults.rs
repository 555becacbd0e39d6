//! Default configuration values
//!
//! All constants used throughout the config module are defined here.

/// Default repository hosting the scripts
pub const DEFAULT_REPOSITORY_OWNER: &str = "Chalwk";
pub const DEFAULT_REPOSITORY_NAME: &str = "HALO-SCRIPT-PROJECTS";
pub const DEFAULT_REPOSITORY_BRANCH: &str = "master";

/// Folder inside the repository that holds the category folders
pub const DEFAULT_SCRIPTS_ROOT: &str = "sapp";

/// Listing document path, relative to the scripts root
pub const DEFAULT_METADATA_PATH: &str = "metadata.json";

/// Global timeout applied to every HTTP request
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Location of the optional user config file
pub const DEFAULT_CONFIG_PATH: &str = "~/.hsp-script-browser/config.json";
