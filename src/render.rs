use crate::error::{Result, SitemapError};
use crate::filewalker::FileEntry;
use log::debug;
use std::path::Path;
use tokio::fs;

/// Files whose display path contains this substring are listed without content.
pub const SUPPRESS_MARKER: &str = "api";

/// Plain substring test on the whole display path, not per segment.
pub fn is_suppressed(display: &Path) -> bool {
    display.to_string_lossy().contains(SUPPRESS_MARKER)
}

/// Formats a fragment: a heading with the display path and the raw content
/// between single backticks on their own lines.
pub fn format_fragment(display: &Path, content: &str) -> String {
    format!("### {}\n`\n{content}\n`\n", display.display())
}

/// Reads `entry` and renders its fragment. Suppressed files are not read
/// and render as an empty string.
pub async fn render_file(entry: &FileEntry) -> Result<String> {
    if is_suppressed(&entry.display) {
        debug!("Suppressing content of {}", entry.display.display());
        return Ok(String::new());
    }

    let content = fs::read_to_string(&entry.path)
        .await
        .map_err(|source| SitemapError::Read {
            path: entry.path.clone(),
            source,
        })?;

    debug!("Rendering {} ({} bytes)", entry.display.display(), content.len());
    Ok(format_fragment(&entry.display, &content))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use tempfile::tempdir;

    fn entry(path: PathBuf, display: PathBuf) -> FileEntry {
        let name = path.file_name().unwrap().to_string_lossy().into_owned();
        FileEntry { path, display, name }
    }

    #[test]
    fn suppression_is_a_raw_substring_match() {
        assert!(is_suppressed(Path::new("./secrets/api_key.env")));
        assert!(is_suppressed(Path::new("./rapid/main.rs")));
        assert!(is_suppressed(Path::new("./capital.md")));
        assert!(!is_suppressed(Path::new("./API/main.rs")));
        assert!(!is_suppressed(Path::new("./src/main.rs")));
    }

    #[test]
    fn fragment_wraps_content_in_single_backticks() {
        let fragment = format_fragment(Path::new("./notes.md"), "hello");
        assert_eq!(fragment, "### ./notes.md\n`\nhello\n`\n");
    }

    #[tokio::test]
    async fn renders_file_content_verbatim() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("notes.md");
        std::fs::write(&path, "line one\n  `tick`\n").unwrap();

        let fragment = render_file(&entry(path, PathBuf::from("./notes.md")))
            .await
            .unwrap();

        assert_eq!(fragment, "### ./notes.md\n`\nline one\n  `tick`\n\n`\n");
    }

    #[tokio::test]
    async fn suppressed_file_is_not_read() {
        let dir = tempdir().unwrap();
        // Does not exist: reading it would fail
        let path = dir.path().join("api_key.env");

        let fragment = render_file(&entry(path, PathBuf::from("./api_key.env")))
            .await
            .unwrap();

        assert!(fragment.is_empty());
    }

    #[tokio::test]
    async fn invalid_utf8_is_a_read_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("blob.bin");
        std::fs::write(&path, [0xff, 0xfe, 0x00, 0x80]).unwrap();

        let err = render_file(&entry(path.clone(), PathBuf::from("./blob.bin")))
            .await
            .unwrap_err();

        match err {
            SitemapError::Read { path: failed, .. } => assert_eq!(failed, path),
            other => panic!("unexpected error: {other}"),
        }
    }
}
