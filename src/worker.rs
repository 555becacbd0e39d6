//! Background refresh and download tasks.
//!
//! Both run on their own thread and report back through an
//! `async_channel::Receiver`, which a UI loop can await and a terminal
//! front-end can read with `recv_blocking`. Neither task touches
//! presentation state directly.

use std::fs::{self, File};
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tracing::{debug, warn};

use crate::catalog::ScriptCatalog;
use crate::error::BrowserError;
use crate::logging;
use crate::provider::MetadataProvider;
use crate::scripts::ScriptRecord;

/// Progress events are dropped rather than blocking the transfer when the
/// receiver falls this far behind
const EVENT_CHANNEL_CAPACITY: usize = 64;

const COPY_BUFFER_SIZE: usize = 8 * 1024;

// ============================================
// REFRESH
// ============================================

/// Result of a background refresh
#[derive(Debug)]
pub enum RefreshOutcome {
    Loaded { count: usize },
    Failed(BrowserError),
}

/// Run `catalog.refresh()` on a background thread
pub fn spawn_refresh(catalog: Arc<ScriptCatalog>) -> async_channel::Receiver<RefreshOutcome> {
    let (tx, rx) = async_channel::bounded(1);

    std::thread::spawn(move || {
        let outcome = match catalog.refresh() {
            Ok(count) => RefreshOutcome::Loaded { count },
            Err(e) => RefreshOutcome::Failed(e),
        };
        if tx.send_blocking(outcome).is_err() {
            debug!("Refresh receiver dropped before completion");
        }
    });

    rx
}

// ============================================
// DOWNLOAD
// ============================================

/// Shared flag telling a download to stop writing
#[derive(Clone, Debug, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Release);
    }

    pub fn is_canceled(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}

#[derive(Debug)]
pub enum DownloadEvent {
    Progress { written: u64, total: Option<u64> },
    Finished(DownloadOutcome),
}

#[derive(Debug)]
pub enum DownloadOutcome {
    Completed { path: PathBuf, bytes: u64 },
    Failed(BrowserError),
    Canceled { filename: String },
}

impl DownloadOutcome {
    /// The written path and byte count, or the error a caller should report
    pub fn into_result(self) -> Result<(PathBuf, u64), BrowserError> {
        match self {
            DownloadOutcome::Completed { path, bytes } => Ok((path, bytes)),
            DownloadOutcome::Failed(e) => Err(e),
            DownloadOutcome::Canceled { filename } => Err(BrowserError::DownloadCanceled { filename }),
        }
    }
}

/// A running download: its event stream and the means to abandon it
pub struct DownloadHandle {
    pub events: async_channel::Receiver<DownloadEvent>,
    cancel: CancelToken,
}

impl DownloadHandle {
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    pub fn cancel_token(&self) -> CancelToken {
        self.cancel.clone()
    }

    /// Block until the final outcome arrives, passing progress to `on_progress`
    pub fn wait(self, mut on_progress: impl FnMut(u64, Option<u64>)) -> DownloadOutcome {
        while let Ok(event) = self.events.recv_blocking() {
            match event {
                DownloadEvent::Progress { written, total } => on_progress(written, total),
                DownloadEvent::Finished(outcome) => return outcome,
            }
        }
        DownloadOutcome::Failed(BrowserError::DownloadFailed {
            filename: String::new(),
            message: "download worker exited without reporting".to_string(),
        })
    }
}

/// Download `record` to `destination` on a background thread.
///
/// Bytes go to `<destination>.part` first and are renamed into place on
/// success. On failure or cancel the partial file is removed.
pub fn spawn_download(
    provider: Arc<dyn MetadataProvider>,
    record: Arc<ScriptRecord>,
    destination: PathBuf,
) -> DownloadHandle {
    let (tx, rx) = async_channel::bounded(EVENT_CHANNEL_CAPACITY);
    let cancel = CancelToken::new();
    let worker_cancel = cancel.clone();

    std::thread::spawn(move || {
        let outcome = run_download(provider.as_ref(), &record, &destination, &worker_cancel, |written, total| {
            // Progress is best-effort; only the final outcome must arrive
            let _ = tx.try_send(DownloadEvent::Progress { written, total });
        });
        if tx.send_blocking(DownloadEvent::Finished(outcome)).is_err() {
            debug!("Download receiver dropped before completion");
        }
    });

    DownloadHandle { events: rx, cancel }
}

/// Blocking download used by the worker thread
pub fn run_download(
    provider: &dyn MetadataProvider,
    record: &ScriptRecord,
    destination: &Path,
    cancel: &CancelToken,
    mut on_progress: impl FnMut(u64, Option<u64>),
) -> DownloadOutcome {
    let filename = record.filename.clone().unwrap_or_else(|| record.title.clone());
    logging::log_download_event(&filename, "started", 0);

    if let Err(e) = record.require_filename() {
        return DownloadOutcome::Failed(e);
    }

    let content = match provider.fetch_content(record) {
        Ok(content) => content,
        Err(e) => {
            warn!(filename = %filename, error = %format!("{:#}", e), "Failed to fetch script");
            return DownloadOutcome::Failed(BrowserError::DownloadFailed {
                filename,
                message: format!("{:#}", e),
            });
        }
    };

    let total = content.length;
    let mut reader = content.reader;
    match write_cancelable(&mut reader, destination, cancel, |written| {
        on_progress(written, total)
    }) {
        Ok(bytes) => {
            logging::log_download_event(&filename, "completed", bytes);
            DownloadOutcome::Completed {
                path: destination.to_path_buf(),
                bytes,
            }
        }
        Err(TransferError::Canceled) => {
            logging::log_download_event(&filename, "canceled", 0);
            DownloadOutcome::Canceled { filename }
        }
        Err(TransferError::Io(e)) => {
            warn!(filename = %filename, error = %e, "Failed to write script");
            DownloadOutcome::Failed(BrowserError::DownloadFailed {
                filename,
                message: e.to_string(),
            })
        }
    }
}

#[derive(Debug)]
enum TransferError {
    Canceled,
    Io(io::Error),
}

impl From<io::Error> for TransferError {
    fn from(e: io::Error) -> Self {
        TransferError::Io(e)
    }
}

fn partial_path(destination: &Path) -> PathBuf {
    let mut name = destination
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".part");
    destination.with_file_name(name)
}

/// Copy `reader` into `destination` via a `.part` file, checking `cancel`
/// between chunks. The partial file never survives an error or cancel.
fn write_cancelable(
    reader: &mut dyn Read,
    destination: &Path,
    cancel: &CancelToken,
    on_progress: impl FnMut(u64),
) -> Result<u64, TransferError> {
    let part = partial_path(destination);
    let result = copy_to_part(reader, &part, destination, cancel, on_progress);
    if result.is_err() {
        if let Err(e) = fs::remove_file(&part) {
            if e.kind() != io::ErrorKind::NotFound {
                warn!(path = %part.display(), error = %e, "Failed to remove partial download");
            }
        }
    }
    result
}

fn copy_to_part(
    reader: &mut dyn Read,
    part: &Path,
    destination: &Path,
    cancel: &CancelToken,
    mut on_progress: impl FnMut(u64),
) -> Result<u64, TransferError> {
    if cancel.is_canceled() {
        return Err(TransferError::Canceled);
    }

    let mut file = File::create(part)?;
    let mut buf = [0u8; COPY_BUFFER_SIZE];
    let mut written = 0u64;

    loop {
        if cancel.is_canceled() {
            return Err(TransferError::Canceled);
        }
        let n = match reader.read(&mut buf) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e.into()),
        };
        file.write_all(&buf[..n])?;
        written += n as u64;
        on_progress(written);
    }

    file.flush()?;
    drop(file);

    if cancel.is_canceled() {
        return Err(TransferError::Canceled);
    }
    fs::rename(part, destination)?;
    Ok(written)
}

#[cfg(test)]
#[path = "worker_tests.rs"]
mod tests;
