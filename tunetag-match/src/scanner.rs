//! Candidate folder scanner
//!
//! Lists the file names directly inside the MIDI folder. The listing is taken
//! once, before any decoding; filtering by suffix and tag arity is left to the
//! match selector.

use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

/// Candidate scanner errors
#[derive(Debug, Error)]
pub enum ScanError {
    /// Specified path does not exist
    #[error("Path not found: {0}")]
    PathNotFound(PathBuf),

    /// Path exists but is not a directory
    #[error("Not a directory: {0}")]
    NotADirectory(PathBuf),

    /// Folder could not be listed
    #[error("I/O error listing {0}: {1}")]
    Io(PathBuf, String),
}

/// Candidate scanner
pub struct CandidateScanner {
    ignore_patterns: Vec<String>,
}

impl CandidateScanner {
    /// Create scanner ignoring common system files
    pub fn new() -> Self {
        Self {
            ignore_patterns: vec![".DS_Store".to_string(), "Thumbs.db".to_string()],
        }
    }

    /// List candidate file names in `folder` (not recursive), sorted
    ///
    /// Entries that are not regular files (after following symlinks) and
    /// names that are not valid UTF-8 are skipped.
    pub fn scan(&self, folder: &Path) -> Result<Vec<String>, ScanError> {
        if !folder.exists() {
            return Err(ScanError::PathNotFound(folder.to_path_buf()));
        }
        if !folder.is_dir() {
            return Err(ScanError::NotADirectory(folder.to_path_buf()));
        }

        let walker = WalkDir::new(folder)
            .min_depth(1)
            .max_depth(1)
            .follow_links(true)
            .sort_by_file_name();

        let mut names = Vec::new();
        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    // The folder itself failing is fatal; a bad entry is not
                    if e.depth() == 0 {
                        return Err(ScanError::Io(folder.to_path_buf(), e.to_string()));
                    }
                    tracing::warn!("Error accessing entry: {}", e);
                    continue;
                }
            };

            if !entry.file_type().is_file() {
                continue;
            }

            let Some(name) = entry.file_name().to_str() else {
                tracing::debug!(
                    "Skipping non-UTF-8 file name: {}",
                    entry.file_name().to_string_lossy()
                );
                continue;
            };

            if self.ignore_patterns.iter().any(|p| p == name) {
                continue;
            }

            names.push(name.to_string());
        }

        tracing::debug!(
            folder = %folder.display(),
            count = names.len(),
            "Candidate folder scanned"
        );

        Ok(names)
    }
}

impl Default for CandidateScanner {
    fn default() -> Self {
        Self::new()
    }
}
