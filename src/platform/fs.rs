// McProd - platform/fs.rs
//
// Thin filesystem helpers shared by the app layer.

use std::io;
use std::path::Path;

/// Read the full content of a file as a string.
///
/// For files with invalid UTF-8, uses lossy conversion.
pub fn read_file_lossy(path: &Path) -> io::Result<String> {
    let bytes = std::fs::read(path)?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Create the parent directories of `path` if they are missing.
pub fn ensure_parent_dir(path: &Path) -> io::Result<()> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => std::fs::create_dir_all(parent),
        _ => Ok(()),
    }
}

/// Create (or truncate) `path` for writing, creating parent directories first.
pub fn create_file(path: &Path) -> io::Result<std::fs::File> {
    ensure_parent_dir(path)?;
    std::fs::File::create(path)
}

/// Write `text` to `path`, creating parent directories first.
pub fn write_text(path: &Path, text: &str) -> io::Result<()> {
    ensure_parent_dir(path)?;
    std::fs::write(path, text)
}
