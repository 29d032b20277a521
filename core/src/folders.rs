//! Directory listing helpers
//!
//! Hidden entries (names starting with `.`) are ignored everywhere.

use crate::error::Result;
use std::path::{Path, PathBuf};

/// Returns true for names starting with a dot
pub fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .is_some_and(|name| name.starts_with('.'))
}

/// Non-hidden immediate subdirectories, sorted by name
pub fn list_subdirectories(folder: &Path) -> Result<Vec<PathBuf>> {
    let mut dirs = Vec::new();

    for entry in std::fs::read_dir(folder)? {
        let path = entry?.path();
        if path.is_dir() && !is_hidden(&path) {
            dirs.push(path);
        }
    }

    dirs.sort();
    Ok(dirs)
}

/// Non-hidden regular files, sorted by name
pub fn list_files(folder: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for entry in std::fs::read_dir(folder)? {
        let path = entry?.path();
        if path.is_file() && !is_hidden(&path) {
            files.push(path);
        }
    }

    files.sort();
    Ok(files)
}

/// Returns true if a folder has a non-hidden subdirectory
pub fn has_subdirectory(folder: &Path) -> Result<bool> {
    Ok(!list_subdirectories(folder)?.is_empty())
}

/// A folder holding one series worth of image files
///
/// The representative file is picked once, when the folder is scanned, and
/// every later read for this folder goes to the same file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeafFolder {
    /// Folder name (last path component)
    pub name: String,

    /// Folder path as found under the input root
    pub path: PathBuf,

    files: Vec<PathBuf>,
}

impl LeafFolder {
    /// Lists the files of a folder
    pub fn scan(path: &Path) -> Result<Self> {
        let files = list_files(path)?;
        Ok(Self::from_parts(path.to_path_buf(), files))
    }

    /// Builds a leaf from an already known file list
    pub fn from_parts(path: PathBuf, files: Vec<PathBuf>) -> Self {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        Self { name, path, files }
    }

    /// File metadata is read from
    pub fn representative(&self) -> Option<&Path> {
        self.files.first().map(PathBuf::as_path)
    }

    pub fn file_count(&self) -> usize {
        self.files.len()
    }
}
