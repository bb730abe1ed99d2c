//! File listing of an analyzed repository.

use serde::{Deserialize, Serialize};

/// One analyzed source file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileEntry {
    pub path: String,
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub has_error: bool,
}

/// Response of `GET /api/repo/{id}/structure`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepoStructure {
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub files: Vec<FileEntry>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl RepoStructure {
    /// Whether the listing flags `path` as failed analysis.
    pub fn has_error(&self, path: &str) -> bool {
        self.files.iter().any(|f| f.path == path && f.has_error)
    }
}
