//! Local folder bundling for `POST /generate`.
//!
//! Every readable text file under the folder is keyed by its path relative
//! to the folder's parent, so keys start with the folder name
//! (`myproj/src/app.py`), matching what a browser directory picker sends.

use std::path::{Path, PathBuf};

use ignore::WalkBuilder;
use indexmap::IndexMap;

use super::AddError;

/// A folder ready to be posted for analysis.
#[derive(Debug, Clone, PartialEq)]
pub struct FolderBundle {
    /// Top-level folder name; used as both repo name and repo path.
    pub root_name: String,
    pub files: IndexMap<String, String>,
    /// Files skipped because they were not valid UTF-8 or unreadable.
    pub skipped: usize,
}

/// Read every text file under `dir`.
///
/// Hidden entries and anything matched by `.gitignore` are skipped.
pub async fn bundle_folder(dir: &Path) -> Result<FolderBundle, AddError> {
    let root = tokio::fs::canonicalize(dir)
        .await
        .map_err(|e| AddError::ReadFolder {
            path: dir.to_path_buf(),
            reason: e.to_string(),
        })?;
    if !root.is_dir() {
        return Err(AddError::ReadFolder {
            path: dir.to_path_buf(),
            reason: "not a directory".to_string(),
        });
    }
    let root_name = root
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| root.display().to_string());

    let paths = collect_paths(root.clone()).await?;

    let mut files = IndexMap::new();
    let mut skipped = 0;
    for path in paths {
        match tokio::fs::read_to_string(&path).await {
            Ok(content) => {
                files.insert(bundle_key(&root_name, &root, &path), content);
            }
            Err(e) => {
                tracing::debug!(path = %path.display(), error = %e, "skipping unreadable file");
                skipped += 1;
            }
        }
    }

    if files.is_empty() {
        return Err(AddError::EmptyFolder(dir.to_path_buf()));
    }

    Ok(FolderBundle {
        root_name,
        files,
        skipped,
    })
}

/// Walk `root` on a blocking thread; the walker is synchronous.
async fn collect_paths(root: PathBuf) -> Result<Vec<PathBuf>, AddError> {
    let walk_root = root.clone();
    let mut paths = tokio::task::spawn_blocking(move || {
        WalkBuilder::new(&walk_root)
            .hidden(true)
            .git_ignore(true)
            .require_git(false)
            .build()
            .flatten()
            .filter(|entry| entry.file_type().is_some_and(|ft| ft.is_file()))
            .map(|entry| entry.into_path())
            .collect::<Vec<_>>()
    })
    .await
    .map_err(|e| AddError::ReadFolder {
        path: root,
        reason: e.to_string(),
    })?;
    paths.sort();
    Ok(paths)
}

/// `root_name/relative/path` with forward slashes.
fn bundle_key(root_name: &str, root: &Path, path: &Path) -> String {
    let relative = path.strip_prefix(root).unwrap_or(path);
    let mut key = root_name.to_string();
    for part in relative.components() {
        key.push('/');
        key.push_str(&part.as_os_str().to_string_lossy());
    }
    key
}

#[cfg(test)]
mod tests {
    use super::*;

    fn project() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().join("proj");
        std::fs::create_dir_all(root.join("src")).unwrap();
        std::fs::write(root.join("app.py"), "print('hi')\n").unwrap();
        std::fs::write(root.join("src").join("util.py"), "def f(): pass\n").unwrap();
        dir
    }

    #[tokio::test]
    async fn keys_are_rooted_at_folder_name() {
        let dir = project();
        let bundle = bundle_folder(&dir.path().join("proj")).await.unwrap();

        assert_eq!(bundle.root_name, "proj");
        let keys: Vec<_> = bundle.files.keys().cloned().collect();
        assert_eq!(keys, vec!["proj/app.py", "proj/src/util.py"]);
        assert_eq!(bundle.files["proj/app.py"], "print('hi')\n");
        assert_eq!(bundle.skipped, 0);
    }

    #[tokio::test]
    async fn binary_files_are_skipped() {
        let dir = project();
        std::fs::write(dir.path().join("proj").join("logo.bin"), [0xFF, 0xFE, 0x00]).unwrap();

        let bundle = bundle_folder(&dir.path().join("proj")).await.unwrap();
        assert_eq!(bundle.files.len(), 2);
        assert_eq!(bundle.skipped, 1);
    }

    #[tokio::test]
    async fn hidden_and_ignored_entries_are_skipped() {
        let dir = project();
        let root = dir.path().join("proj");
        std::fs::create_dir_all(root.join(".git")).unwrap();
        std::fs::write(root.join(".git").join("HEAD"), "ref: refs/heads/main").unwrap();
        std::fs::create_dir_all(root.join("build")).unwrap();
        std::fs::write(root.join("build").join("out.js"), "x").unwrap();
        std::fs::write(root.join(".gitignore"), "build/\n").unwrap();

        let bundle = bundle_folder(&root).await.unwrap();
        let keys: Vec<_> = bundle.files.keys().cloned().collect();
        assert_eq!(keys, vec!["proj/app.py", "proj/src/util.py"]);
    }

    #[tokio::test]
    async fn empty_folder_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let err = bundle_folder(dir.path()).await.unwrap_err();
        assert!(matches!(err, AddError::EmptyFolder(_)), "got {err:?}");
    }

    #[tokio::test]
    async fn missing_folder_is_rejected() {
        let err = bundle_folder(Path::new("/tmp/codewiki_missing_folder_4821"))
            .await
            .unwrap_err();
        assert!(matches!(err, AddError::ReadFolder { .. }), "got {err:?}");
    }
}
