//! Filesystem helpers.

use std::fs;
use std::io;
use std::path::Path;

/// Write a string to a file, creating parent directories if needed.
pub fn write_string(path: &Path, contents: &str) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    fs::write(path, contents)
}
