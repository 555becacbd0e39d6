use thiserror::Error;
use tracing::warn;

/// Error severity for display in the presentation layer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Info,     // informational
    Warning,  // recoverable, previous state kept
    Error,    // operation failed
}

/// Domain-specific errors for the script browser
#[derive(Error, Debug)]
pub enum BrowserError {
    #[error("Failed to load script metadata: {0}")]
    LoadFailed(String),

    #[error("A metadata refresh is already in progress")]
    RefreshInProgress,

    #[error("Script '{title}' has no category")]
    MissingCategory { title: String },

    #[error("Unknown script category '{0}'")]
    UnknownCategory(String),

    #[error("Script '{title}' has no filename")]
    MissingFilename { title: String },

    #[error("Download of '{filename}' failed: {message}")]
    DownloadFailed { filename: String, message: String },

    #[error("Download of '{filename}' was canceled")]
    DownloadCanceled { filename: String },

    #[error("No script named '{0}'")]
    ScriptNotFound(String),
}

impl BrowserError {
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            Self::LoadFailed(_) => ErrorSeverity::Error,
            Self::RefreshInProgress => ErrorSeverity::Info,
            Self::MissingCategory { .. } => ErrorSeverity::Error,
            Self::UnknownCategory(_) => ErrorSeverity::Error,
            Self::MissingFilename { .. } => ErrorSeverity::Warning,
            Self::DownloadFailed { .. } => ErrorSeverity::Error,
            Self::DownloadCanceled { .. } => ErrorSeverity::Info,
            Self::ScriptNotFound(_) => ErrorSeverity::Warning,
        }
    }

    pub fn user_message(&self) -> String {
        match self {
            Self::LoadFailed(_) => {
                "Failed to load scripts from GitHub. Please check your internet connection."
                    .to_string()
            }
            Self::RefreshInProgress => "Scripts are already being loaded".to_string(),
            Self::MissingCategory { title } => {
                format!("The script listing is invalid: '{}' has no category", title)
            }
            Self::UnknownCategory(name) => {
                format!("The script listing is invalid: unknown category '{}'", name)
            }
            Self::MissingFilename { title } => format!("'{}' cannot be downloaded", title),
            Self::DownloadFailed { filename, .. } => format!("Download failed for {}", filename),
            Self::DownloadCanceled { filename } => format!("Download of {} canceled", filename),
            Self::ScriptNotFound(name) => format!("No script named {}", name),
        }
    }

    /// Whether the presentation layer should offer a retry affordance
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::LoadFailed(_) | Self::RefreshInProgress | Self::DownloadFailed { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, BrowserError>;

/// Extension trait for silent error logging with caller location tracking.
/// Use when the operation is recoverable and the user doesn't need to know.
///
/// # Examples
///
/// ```ignore
/// use hsp_script_browser::error::ResultExt;
///
/// let url = record.canonical_url(&repo).warn_on_err();
/// ```
pub trait ResultExt<T> {
    /// Log as warning with caller location and return None. Use for expected failures.
    fn warn_on_err(self) -> Option<T>;
}

impl<T, E: std::fmt::Debug> ResultExt<T> for std::result::Result<T, E> {
    #[track_caller]
    fn warn_on_err(self) -> Option<T> {
        match self {
            Ok(value) => Some(value),
            Err(error) => {
                let caller = std::panic::Location::caller();
                warn!(
                    error = ?error,
                    file = caller.file(),
                    line = caller.line(),
                    "Operation had warning"
                );
                None
            }
        }
    }
}
