use std::path::{Path, PathBuf};

/// Builds the path shown in the document for `path`: rooted at `.` and
/// relative to `root` (`./src/main.rs`). The root itself shows as `.`.
pub fn display_path(root: &Path, path: &Path) -> PathBuf {
    let rel = path.strip_prefix(root).unwrap_or(path);
    if rel.as_os_str().is_empty() {
        PathBuf::from(".")
    } else {
        Path::new(".").join(rel)
    }
}

/// `[name](target)` with backslashes in the target turned into forward slashes.
pub fn markdown_link(display: &Path, name: &str) -> String {
    let target = display.to_string_lossy().replace('\\', "/");
    format!("[{name}]({target})")
}
