use crate::error::{Result, SitemapError};
use crate::exclude::ExclusionRules;
use crate::utils::display_path;
use ignore::{DirEntry, WalkBuilder};
use log::{debug, warn};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// A file that survived the exclusion rules.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    /// Filesystem path used for reading
    pub path: PathBuf,
    /// Path as shown in the document, rooted at `.`
    pub display: PathBuf,
    /// Bare file name
    pub name: String,
}

/// One visited directory and the included files directly inside it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirListing {
    pub path: PathBuf,
    pub display: PathBuf,
    pub files: Vec<FileEntry>,
}

/// Result of a walk. `skipped` counts entries dropped after a traversal
/// error when not failing fast.
#[derive(Debug, Default)]
pub struct WalkOutcome {
    pub listings: Vec<DirListing>,
    pub skipped: usize,
}

/// Walks a tree in pre-order, pruning excluded directories before descent
/// and grouping the remaining files by their parent directory.
pub struct TreeWalker {
    rules: Arc<ExclusionRules>,
    skip_file: Option<PathBuf>,
    fail_fast: bool,
}

impl TreeWalker {
    pub fn new(rules: ExclusionRules) -> Self {
        Self {
            rules: Arc::new(rules),
            skip_file: None,
            fail_fast: true,
        }
    }

    /// Never list `path`, typically the output document. Has no effect if
    /// the file does not exist yet.
    pub fn skip_file(mut self, path: &Path) -> Self {
        self.skip_file = std::fs::canonicalize(path).ok();
        self
    }

    pub fn fail_fast(mut self, yes: bool) -> Self {
        self.fail_fast = yes;
        self
    }

    /// Collects every non-empty directory under `root`, in walk order.
    pub fn walk(&self, root: &Path) -> Result<WalkOutcome> {
        let mut builder = WalkBuilder::new(root);

        // Only our own rules decide what gets skipped
        builder
            .standard_filters(false)
            .follow_links(false)
            .sort_by_file_name(|a, b| a.cmp(b));

        let rules = Arc::clone(&self.rules);
        let skip_file = self.skip_file.clone();
        builder.filter_entry(move |entry| {
            if entry.depth() == 0 {
                return true;
            }
            let name = entry.file_name().to_string_lossy();
            if let Some(pattern) = rules.matching_pattern(&name) {
                debug!("Excluding {} (matches {pattern:?})", entry.path().display());
                return false;
            }
            !is_skipped_file(entry, skip_file.as_deref())
        });

        let mut listings: Vec<DirListing> = Vec::new();
        let mut by_dir: HashMap<PathBuf, usize> = HashMap::new();
        let mut skipped = 0;

        for result in builder.build() {
            let entry = match result {
                Ok(entry) => entry,
                Err(err) => {
                    let path = error_path(&err).unwrap_or(root).to_path_buf();
                    if self.fail_fast {
                        return Err(SitemapError::Traversal { path, source: err });
                    }
                    warn!("Skipping {}: {err}", path.display());
                    skipped += 1;
                    continue;
                }
            };

            let path = entry.path();

            if entry.file_type().is_some_and(|ft| ft.is_dir()) {
                debug!("Entering directory: {}", path.display());
                by_dir.insert(path.to_path_buf(), listings.len());
                listings.push(DirListing {
                    path: path.to_path_buf(),
                    display: display_path(root, path),
                    files: Vec::new(),
                });
                continue;
            }

            // Symlinks are not followed, but a link to a file still reads as one.
            // A dangling link is kept so reading it reports the broken target.
            let dangling = entry.path_is_symlink() && !path.exists();
            if !path.is_file() && !dangling {
                continue;
            }

            let Some(slot) = path.parent().and_then(|p| by_dir.get(p)) else {
                debug!("No parent listing for {}", path.display());
                continue;
            };

            listings[*slot].files.push(FileEntry {
                path: path.to_path_buf(),
                display: display_path(root, path),
                name: entry.file_name().to_string_lossy().into_owned(),
            });
        }

        listings.retain(|listing| !listing.files.is_empty());

        Ok(WalkOutcome { listings, skipped })
    }
}

fn is_skipped_file(entry: &DirEntry, skip_file: Option<&Path>) -> bool {
    let Some(skip) = skip_file else {
        return false;
    };
    // Cheap name check before touching the filesystem
    if skip.file_name() != Some(entry.file_name()) {
        return false;
    }
    std::fs::canonicalize(entry.path()).is_ok_and(|p| p == skip)
}

/// Digs the offending path out of a walk error.
fn error_path(err: &ignore::Error) -> Option<&Path> {
    match err {
        ignore::Error::WithPath { path, .. } => Some(path.as_path()),
        ignore::Error::WithDepth { err, .. } | ignore::Error::WithLineNumber { err, .. } => {
            error_path(err)
        }
        _ => None,
    }
}
