//! hsp-script-browser - terminal front-end for the script catalog
//!
//! # Usage
//!
//! ```bash
//! hsp-script-browser list --category utility --query "admin"
//! hsp-script-browser show admin_tools.lua
//! hsp-script-browser download admin_tools.lua --output ~/sapp/
//! ```

use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;

use hsp_script_browser::config::{self, Config};
use hsp_script_browser::error::{BrowserError, ResultExt};
use hsp_script_browser::logging;
use hsp_script_browser::worker::{self, RefreshOutcome};
use hsp_script_browser::{CategoryFilter, GitHubProvider, MetadataProvider, ScriptCatalog};

#[derive(Parser, Debug)]
#[command(name = "hsp-script-browser", version, about = "Browse and download SAPP Lua scripts")]
struct Cli {
    /// Config file (default: ~/.hsp-script-browser/config.json)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List scripts, optionally filtered by category and search query
    List {
        /// all, attractive, custom_games, utility (display names work too)
        #[arg(short, long, default_value = "all")]
        category: CategoryFilter,
        #[arg(short, long, default_value = "")]
        query: String,
        /// Print the relevance score next to each script
        #[arg(long)]
        scores: bool,
    },
    /// Show the details of one script
    Show { filename: String },
    /// Download one script
    Download {
        filename: String,
        /// Destination file or directory (default: configured download dir)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Open the script page in the browser
    Open { filename: String },
    /// Print catalog counts
    Stats,
}

fn main() -> Result<()> {
    let _guard = logging::init();
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => config::load_config_from(path),
        None => config::load_config(),
    };

    let provider: Arc<dyn MetadataProvider> = Arc::new(GitHubProvider::new(&config));
    let catalog = Arc::new(ScriptCatalog::new(Arc::clone(&provider)));

    eprintln!("Loading scripts from GitHub...");
    match worker::spawn_refresh(Arc::clone(&catalog))
        .recv_blocking()
        .context("Refresh worker exited without reporting")?
    {
        RefreshOutcome::Loaded { count } => eprintln!("Loaded {} scripts from GitHub", count),
        RefreshOutcome::Failed(e) => {
            eprintln!("{}", e.user_message());
            return Err(e.into());
        }
    }

    match cli.command {
        Command::List {
            category,
            query,
            scores,
        } => {
            let results = catalog.filter_ranked(category, &query);
            for result in &results {
                let record = &result.record;
                let summary = record.short_description.as_deref().unwrap_or("");
                if scores {
                    println!("{:>5}  {:<32} {:<14} {}", result.score, record.title, record.category, summary);
                } else {
                    println!("{:<32} {:<14} {}", record.title, record.category, summary);
                }
            }
            eprintln!("{}", catalog.stats().summary(results.len()));
        }
        Command::Show { filename } => {
            let record = catalog
                .find_by_filename(&filename)
                .ok_or(BrowserError::ScriptNotFound(filename))?;
            println!("{}", record.details_text());
            if let Some(url) = provider.canonical_url(&record).warn_on_err() {
                println!("\n{}", url);
            }
        }
        Command::Download { filename, output } => {
            let record = catalog
                .find_by_filename(&filename)
                .ok_or_else(|| BrowserError::ScriptNotFound(filename.clone()))?;
            let remote_name = record.require_filename()?.to_string();
            let destination = resolve_destination(output, &config, &remote_name);

            eprintln!("Downloading {}...", remote_name);
            let handle = worker::spawn_download(Arc::clone(&provider), record, destination);
            let cancel = handle.cancel_token();
            ctrlc::set_handler(move || cancel.cancel()).context("Failed to install Ctrl-C handler")?;

            let outcome = handle.wait(|written, total| {
                match total {
                    Some(total) if total > 0 => {
                        eprint!("\r{:>3}% ({} / {} bytes)", written * 100 / total, written, total)
                    }
                    _ => eprint!("\r{} bytes", written),
                }
                let _ = std::io::stderr().flush();
            });
            eprintln!();

            match outcome.into_result() {
                Ok((path, bytes)) => {
                    info!(path = %path.display(), bytes = bytes, "Download complete");
                    println!("Successfully downloaded {} to {}", remote_name, path.display());
                }
                Err(e) => {
                    eprintln!("{}", e.user_message());
                    return Err(e.into());
                }
            }
        }
        Command::Open { filename } => {
            let record = catalog
                .find_by_filename(&filename)
                .ok_or(BrowserError::ScriptNotFound(filename))?;
            let url = provider.canonical_url(&record)?;
            open::that(&url).with_context(|| format!("Failed to open browser for {}", url))?;
        }
        Command::Stats => {
            let results = catalog.filter(CategoryFilter::All, "");
            println!("{}", catalog.stats().summary(results.len()));
        }
    }

    Ok(())
}

/// An existing directory (or a path ending in a separator) receives the
/// remote filename; anything else is used as the file path itself.
fn resolve_destination(output: Option<PathBuf>, config: &Config, remote_name: &str) -> PathBuf {
    match output {
        Some(path) => {
            let expanded = PathBuf::from(shellexpand::tilde(&path.to_string_lossy()).as_ref());
            let is_dir_hint = path.to_string_lossy().ends_with(std::path::MAIN_SEPARATOR);
            if expanded.is_dir() || is_dir_hint {
                expanded.join(remote_name)
            } else {
                expanded
            }
        }
        None => config.download_dir().join(remote_name),
    }
}
