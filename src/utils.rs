// ABOUTME: Utility functions for the slidesmith application
// ABOUTME: Provides path validation, atomic writes and default input discovery

use crate::errors::{DeckError, Result};
use log::{debug, warn};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Validate that a file exists
pub fn validate_file_exists(path: &Path) -> Result<()> {
    if !path.exists() {
        return Err(DeckError::PathNotFoundError(path.to_path_buf()));
    }
    if !path.is_file() {
        return Err(DeckError::ValidationError(format!(
            "Path is not a file: {:?}",
            path
        )));
    }
    Ok(())
}

/// Ensure a directory exists, creating it if necessary
pub fn ensure_directory_exists(path: &Path) -> Result<()> {
    if !path.exists() {
        fs::create_dir_all(path).map_err(DeckError::FileReadError)?;
    } else if !path.is_dir() {
        return Err(DeckError::ValidationError(format!(
            "Path exists but is not a directory: {:?}",
            path
        )));
    }
    Ok(())
}

/// Ensure a file's parent directory exists
pub fn ensure_parent_directory_exists(file_path: &Path) -> Result<()> {
    if let Some(parent) = file_path.parent() {
        if !parent.as_os_str().is_empty() {
            ensure_directory_exists(parent)?;
        }
    }
    Ok(())
}

/// Turn CRLF and lone CR line endings into LF
pub fn normalize_newlines(text: &str) -> String {
    text.replace("\r\n", "\n").replace('\r', "\n")
}

/// Read a whole deck into memory, with LF line endings
pub fn read_document(path: &Path) -> Result<String> {
    validate_file_exists(path)?;
    let content = fs::read_to_string(path).map_err(DeckError::FileReadError)?;
    if content.contains('\r') {
        debug!("Normalizing line endings of {:?}", path);
        return Ok(normalize_newlines(&content));
    }
    Ok(content)
}

/// Replace `path` with `content` without ever leaving a partially written file.
///
/// The content goes to a temporary file in the same directory first, which is
/// then renamed over the target.
pub fn write_atomic(path: &Path, content: &str) -> Result<()> {
    ensure_parent_directory_exists(path)?;

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let write_error = |source: std::io::Error| DeckError::FileWriteError {
        path: path.to_path_buf(),
        source,
    };

    let mut tmp = NamedTempFile::new_in(dir).map_err(write_error)?;
    tmp.write_all(content.as_bytes()).map_err(write_error)?;
    tmp.as_file().sync_all().map_err(write_error)?;
    tmp.persist(path).map_err(|e| write_error(e.error))?;

    debug!("Wrote {} bytes to {:?}", content.len(), path);
    Ok(())
}

/// Expand a glob pattern into the matching files, sorted
pub fn find_files(pattern: &str) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in glob::glob(pattern)? {
        match entry {
            Ok(path) if path.is_file() => files.push(path),
            Ok(_) => {}
            Err(e) => warn!("Skipping unreadable path: {}", e),
        }
    }
    files.sort();
    Ok(files)
}

/// Whether a directory exists and holds at least one entry
pub fn dir_has_entries(path: &Path) -> bool {
    path.is_dir()
        && fs::read_dir(path)
            .map(|mut entries| entries.next().is_some())
            .unwrap_or(false)
}
