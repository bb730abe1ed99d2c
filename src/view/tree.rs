//! Sidebar file tree: files grouped by parent directory.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::models::FileEntry;

/// Directory key used for top-level files.
const ROOT_DIR: &str = ".";

/// One directory group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TreeDir {
    /// Directory path, or `root` for top-level files.
    pub label: String,
    pub files: Vec<TreeLeaf>,
}

/// One file in a group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TreeLeaf {
    /// File name without directory.
    pub name: String,
    /// Full path, used to open the file view.
    pub path: String,
    pub has_error: bool,
}

/// Group `files` by directory. Directories sort by path with top-level
/// files first; files within a directory sort by full path, ignoring case.
pub fn build_file_tree(files: &[FileEntry]) -> Vec<TreeDir> {
    let mut by_dir: BTreeMap<String, Vec<&FileEntry>> = BTreeMap::new();
    for file in files {
        by_dir.entry(parent_dir(&file.path)).or_default().push(file);
    }

    by_dir
        .into_iter()
        .map(|(dir, mut entries)| {
            entries.sort_by(|a, b| {
                a.path
                    .to_lowercase()
                    .cmp(&b.path.to_lowercase())
                    .then_with(|| a.path.cmp(&b.path))
            });
            TreeDir {
                label: if dir == ROOT_DIR {
                    "root".to_string()
                } else {
                    dir
                },
                files: entries
                    .into_iter()
                    .map(|f| TreeLeaf {
                        name: f.path.rsplit('/').next().unwrap_or(&f.path).to_string(),
                        path: f.path.clone(),
                        has_error: f.has_error,
                    })
                    .collect(),
            }
        })
        .collect()
}

fn parent_dir(path: &str) -> String {
    match path.rsplit_once('/') {
        Some((dir, _)) if !dir.is_empty() => dir.to_string(),
        _ => ROOT_DIR.to_string(),
    }
}
