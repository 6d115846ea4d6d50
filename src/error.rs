//! Error type for sitemap generation.
//!
//! Each variant marks the boundary where the failure happened: listing a
//! directory, reading a file, writing the output, or compiling an exclusion
//! pattern.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SitemapError {
    /// A directory could not be listed
    #[error("Failed to walk {}: {source}", .path.display())]
    Traversal {
        path: PathBuf,
        #[source]
        source: ignore::Error,
    },

    /// A file could not be opened or is not valid UTF-8
    #[error("Failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The output file could not be removed or written
    #[error("Failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// An exclusion pattern is not a valid regular expression
    #[error("Invalid exclusion pattern {pattern:?}: {source}")]
    Pattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    /// A pattern file given with `--exclude-from` could not be read
    #[error("Failed to read pattern file {}: {source}", .path.display())]
    PatternFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

pub type Result<T> = std::result::Result<T, SitemapError>;
