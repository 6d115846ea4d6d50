//! Name-based exclusion rules.
//!
//! A rule is a regular expression tested against the bare name of a file or
//! directory. Matching is anchored at the start of the name only, so `\.git`
//! matches `.git`, `.github` and `.gitignore`, while a trailing `$` also pins
//! the end. Suffix rules therefore need a leading `.*` (`.*\.txt$`).

use crate::error::{Result, SitemapError};
use regex::Regex;
use std::path::Path;

/// Patterns applied when the user does not opt out of defaults.
pub const DEFAULT_EXCLUDE_PATTERNS: &[&str] = &[
    r".*\.pyc$",
    r"__pycache__",
    r"\.git",
    r".*\.txt$",
    "gen_prompt.py",
    "README.md",
    r"apikey\.txt",
];

/// Ordered set of compiled exclusion patterns.
#[derive(Debug, Clone)]
pub struct ExclusionRules {
    patterns: Vec<String>,
    compiled: Vec<Regex>,
}

impl ExclusionRules {
    /// Compiles `patterns` in order. Fails on the first invalid pattern.
    pub fn new<I, S>(patterns: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let patterns: Vec<String> = patterns.into_iter().map(Into::into).collect();
        let compiled = patterns
            .iter()
            .map(|p| {
                Regex::new(&format!("^(?:{p})")).map_err(|source| SitemapError::Pattern {
                    pattern: p.clone(),
                    source,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { patterns, compiled })
    }

    pub fn defaults() -> Self {
        Self::new(DEFAULT_EXCLUDE_PATTERNS.iter().copied())
            .expect("default exclusion patterns compile")
    }

    pub fn empty() -> Self {
        Self {
            patterns: Vec::new(),
            compiled: Vec::new(),
        }
    }

    pub fn patterns(&self) -> &[String] {
        &self.patterns
    }

    pub fn is_empty(&self) -> bool {
        self.compiled.is_empty()
    }

    /// Returns the first pattern that matches `name`, if any.
    pub fn matching_pattern(&self, name: &str) -> Option<&str> {
        self.compiled
            .iter()
            .position(|re| re.is_match(name))
            .map(|i| self.patterns[i].as_str())
    }

    pub fn is_excluded(&self, name: &str) -> bool {
        self.matching_pattern(name).is_some()
    }
}

impl Default for ExclusionRules {
    fn default() -> Self {
        Self::defaults()
    }
}

/// Reads extra patterns from a file: one per line, blank lines and lines
/// starting with `#` are skipped.
pub fn load_pattern_file(path: &Path) -> Result<Vec<String>> {
    let text = std::fs::read_to_string(path).map_err(|source| SitemapError::PatternFile {
        path: path.to_path_buf(),
        source,
    })?;

    Ok(text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(String::from)
        .collect())
}
