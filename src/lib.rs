//! # sitemap2md Library
//!
//! Walks a project tree, drops files and directories whose names match
//! exclusion patterns, and writes one Markdown document listing every
//! remaining file with a link and its contents.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use sitemap2md::{Config, run_sitemap};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> anyhow::Result<()> {
//!     let mut config = Config::new(std::env::current_dir()?);
//!     config.exclude_patterns.push("target".into());
//!
//!     let summary = run_sitemap(config).await?;
//!     println!("{} files written", summary.files_rendered);
//!     Ok(())
//! }
//! ```
//!
//! ## Document layout
//!
//! ```text
//! # Project Sitemap
//!
//! ## ./docs
//!
//! [notes.md](./docs/notes.md)
//! ### ./docs/notes.md
//! `
//! <contents>
//! `
//! ```
//!
//! Files whose path contains `api` keep their link line but get no content.

pub mod cli;
pub mod error;
pub mod exclude;
pub mod filewalker;
pub mod render;
pub mod utils;
pub mod writer;

pub use cli::Config;
pub use error::SitemapError;
pub use exclude::ExclusionRules;
pub use filewalker::TreeWalker;
pub use writer::{DOCUMENT_TITLE, Document, MarkdownWriter};

use log::{info, warn};
use render::{is_suppressed, render_file};
use std::path::PathBuf;

/// Counts from a completed run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    /// Directories that got a section
    pub directories: usize,
    /// Files written with content
    pub files_rendered: usize,
    /// Files listed by link only
    pub files_suppressed: usize,
    /// Directories and files dropped after an error (only without fail-fast)
    pub files_skipped: usize,
    /// Where the document was written
    pub output_path: PathBuf,
}

/// Generate the sitemap document for `config.project_root`.
///
/// The output file is only touched once the walk and every read succeeded.
pub async fn run_sitemap(config: Config) -> error::Result<RunSummary> {
    let rules = ExclusionRules::new(config.exclude_patterns.iter().cloned())?;
    let walker = TreeWalker::new(rules)
        .fail_fast(config.fail_fast)
        .skip_file(&config.output_path);

    let outcome = walker.walk(&config.project_root)?;

    let mut md_writer = MarkdownWriter::new(&config.output_path);
    let mut directories = 0;
    let mut files_rendered = 0;
    let mut files_suppressed = 0;
    let mut files_skipped = outcome.skipped;

    for listing in &outcome.listings {
        let mut rendered = Vec::with_capacity(listing.files.len());

        for entry in &listing.files {
            match render_file(entry).await {
                Ok(fragment) => rendered.push((entry, fragment)),
                Err(err) if !config.fail_fast => {
                    warn!("{err}");
                    files_skipped += 1;
                }
                Err(err) => return Err(err),
            }
        }

        // Every file in this directory failed to read
        if rendered.is_empty() {
            continue;
        }

        md_writer.begin_directory(listing);
        directories += 1;

        for (entry, fragment) in rendered {
            if is_suppressed(&entry.display) {
                files_suppressed += 1;
            } else {
                files_rendered += 1;
            }
            md_writer.write_entry(entry, &fragment);
        }
    }

    let output_path = md_writer.persist().await?;

    info!(
        "Wrote {} ({directories} directories, {files_rendered} files, {files_suppressed} link-only, {files_skipped} skipped)",
        output_path.display()
    );

    Ok(RunSummary {
        directories,
        files_rendered,
        files_suppressed,
        files_skipped,
        output_path,
    })
}
