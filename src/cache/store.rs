//! Filesystem-backed store for the recent-repository list.
//!
//! Stores the list as one JSON array in `~/.config/codewiki/recent_repos.json`.

use std::io::Write;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::models::RepoDescriptor;

/// Errors while persisting the list. Reads never fail.
#[derive(Error, Debug)]
pub enum CacheError {
    #[error("no config directory available to store recent repositories")]
    NoLocation,

    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to encode recent repositories: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Filesystem store for the recent list.
pub struct RecentStore {
    file: Option<PathBuf>,
}

impl RecentStore {
    /// Create a store at the default location.
    pub fn new() -> Self {
        let file = dirs::config_dir().map(|d| {
            d.join(crate::constants::CONFIG_DIR)
                .join(crate::constants::RECENT_FILENAME)
        });
        Self { file }
    }

    /// Create a store backed by a specific file.
    pub fn new_with_path(file: PathBuf) -> Self {
        Self { file: Some(file) }
    }

    /// The configured file, or the default location.
    pub fn from_config(recent: &crate::config::RecentConfig) -> Self {
        match &recent.file {
            Some(file) => Self::new_with_path(file.clone()),
            None => Self::new(),
        }
    }

    /// Read the list. Absent or unparsable storage reads as empty; entries
    /// that do not decode are dropped and the rest are kept.
    pub fn load(&self) -> Vec<RepoDescriptor> {
        let Some(path) = self.file.as_deref() else {
            return Vec::new();
        };
        let content = match std::fs::read_to_string(path) {
            Ok(c) => c,
            Err(_) => return Vec::new(),
        };
        let entries: Vec<serde_json::Value> = match serde_json::from_str(&content) {
            Ok(entries) => entries,
            Err(e) => {
                tracing::debug!(path = %path.display(), error = %e, "ignoring unreadable recent list");
                return Vec::new();
            }
        };
        entries
            .into_iter()
            .filter_map(|entry| match serde_json::from_value(entry) {
                Ok(repo) => Some(repo),
                Err(e) => {
                    tracing::debug!(path = %path.display(), error = %e, "skipping unreadable recent entry");
                    None
                }
            })
            .collect()
    }

    /// Replace the persisted list.
    ///
    /// Writes to a sibling temp file and renames it over the target, so a
    /// crash mid-write leaves the previous list intact.
    pub fn save(&self, repos: &[RepoDescriptor]) -> Result<(), CacheError> {
        let path = self.file.as_deref().ok_or(CacheError::NoLocation)?;
        let content = serde_json::to_string_pretty(repos)?;

        let write_err = |source: std::io::Error| CacheError::Write {
            path: path.to_path_buf(),
            source,
        };

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(write_err)?;
        }
        let tmp = tmp_path(path);
        {
            let mut file = std::fs::File::create(&tmp).map_err(write_err)?;
            file.write_all(content.as_bytes()).map_err(write_err)?;
            file.sync_all().map_err(write_err)?;
        }
        std::fs::rename(&tmp, path).map_err(write_err)
    }

    /// Delete the persisted list. Returns whether anything was removed.
    pub fn clear(&self) -> Result<bool, CacheError> {
        let Some(path) = self.file.as_deref() else {
            return Ok(false);
        };
        match std::fs::remove_file(path) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(source) => Err(CacheError::Write {
                path: path.to_path_buf(),
                source,
            }),
        }
    }

    /// Return the list file path.
    pub fn path(&self) -> Option<&Path> {
        self.file.as_deref()
    }
}

impl Default for RecentStore {
    fn default() -> Self {
        Self::new()
    }
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}
