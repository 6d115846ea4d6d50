use crate::error::{Result, SitemapError};
use crate::filewalker::{DirListing, FileEntry};
use crate::utils::markdown_link;
use log::debug;
use std::path::{Path, PathBuf};
use tokio::fs;

/// First line of every generated document.
pub const DOCUMENT_TITLE: &str = "# Project Sitemap";

/// Append-only Markdown text for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    text: String,
}

impl Document {
    pub fn new() -> Self {
        Self {
            text: format!("{DOCUMENT_TITLE}\n\n"),
        }
    }

    pub fn push_directory(&mut self, display: &Path) {
        self.text.push_str(&format!("## {}\n\n", display.display()));
    }

    /// Appends the link line for `entry` followed by its fragment, which may be empty.
    pub fn push_file(&mut self, entry: &FileEntry, fragment: &str) {
        self.text.push_str(&markdown_link(&entry.display, &entry.name));
        self.text.push('\n');
        self.text.push_str(fragment);
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn into_string(self) -> String {
        self.text
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

/// Accumulates the document in memory and replaces the output file in one
/// write once everything has been rendered.
pub struct MarkdownWriter {
    output_path: PathBuf,
    document: Document,
}

impl MarkdownWriter {
    pub fn new(output_path: impl Into<PathBuf>) -> Self {
        Self {
            output_path: output_path.into(),
            document: Document::new(),
        }
    }

    pub fn begin_directory(&mut self, listing: &DirListing) {
        debug!("Writing directory: {}", listing.display.display());
        self.document.push_directory(&listing.display);
    }

    pub fn write_entry(&mut self, entry: &FileEntry, fragment: &str) {
        self.document.push_file(entry, fragment);
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Deletes any previous output, then writes the whole document.
    ///
    /// Not atomic: if the write fails after the delete, no output is left.
    pub async fn persist(self) -> Result<PathBuf> {
        let path = self.output_path;
        let write_error = |source| SitemapError::Write {
            path: path.clone(),
            source,
        };

        if fs::try_exists(&path).await.map_err(write_error)? {
            debug!("Removing previous output: {}", path.display());
            fs::remove_file(&path).await.map_err(write_error)?;
        }

        fs::write(&path, self.document.as_str())
            .await
            .map_err(write_error)?;

        Ok(path)
    }
}
