//! Add-repository flow: analyze a local folder or a git URL on the
//! backend and remember the result.

pub mod bundle;

use std::path::{Path, PathBuf};
use std::sync::atomic::AtomicBool;

use thiserror::Error;

use crate::cache::{CacheError, RecentRepos};
use crate::client::{AnalyzeFolderRequest, BackendApi, ClientError};
use crate::models::{AnalyzeResponse, RepoDescriptor, RepoSource};
use crate::progress::LoadingIndicator;

pub use bundle::{FolderBundle, bundle_folder};

const LOADING_MESSAGE: &str = "Analyzing repository...";

/// Why adding a repository failed. Display text is what the user sees.
#[derive(Error, Debug)]
pub enum AddError {
    #[error("Please enter a Git URL (e.g. https://github.com/user/repo.git)")]
    EmptyGitUrl,

    #[error("another repository is already being analyzed")]
    Busy,

    #[error("no readable files in {}", .0.display())]
    EmptyFolder(PathBuf),

    #[error("cannot read folder {}: {reason}", path.display())]
    ReadFolder { path: PathBuf, reason: String },

    /// Backend or transport failure, already phrased for the user.
    #[error("{0}")]
    Analyze(String),

    #[error("analysis succeeded but the repository list could not be saved: {0}")]
    Cache(#[from] CacheError),
}

/// Which add variant is running; selects fallbacks and alert texts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AddKind {
    Local,
    Git,
}

impl AddKind {
    fn failure_message(self) -> &'static str {
        match self {
            AddKind::Local => "Error while analyzing repo",
            AddKind::Git => "Error while analyzing git repo",
        }
    }

    fn network_message(self) -> &'static str {
        match self {
            AddKind::Local => "Network error while analyzing repo",
            AddKind::Git => "Network error while analyzing git repo",
        }
    }

    fn source(self) -> RepoSource {
        match self {
            AddKind::Local => RepoSource::Local,
            AddKind::Git => RepoSource::Git,
        }
    }
}

/// Runs add requests against one backend and one recent-repo list.
///
/// Only one add runs at a time; a second call while one is in flight
/// returns [`AddError::Busy`].
pub struct AddRepoFlow<'a> {
    backend: &'a dyn BackendApi,
    cache: &'a RecentRepos,
    indicator: &'a LoadingIndicator,
    busy: AtomicBool,
}

impl<'a> AddRepoFlow<'a> {
    pub fn new(backend: &'a dyn BackendApi, cache: &'a RecentRepos, indicator: &'a LoadingIndicator) -> Self {
        Self {
            backend,
            cache,
            indicator,
            busy: AtomicBool::new(false),
        }
    }

    /// True while an add request is in flight.
    pub fn is_busy(&self) -> bool {
        self.busy.load(std::sync::atomic::Ordering::Acquire)
    }

    /// Bundle `dir`, post it to `/generate`, and cache the new repo.
    pub async fn add_local_folder(&self, dir: &Path) -> Result<RepoDescriptor, AddError> {
        let (result, name) = {
            let _guard = self
                .indicator
                .begin(&self.busy, LOADING_MESSAGE)
                .ok_or(AddError::Busy)?;

            let bundle = bundle_folder(dir).await?;
            if bundle.skipped > 0 {
                tracing::debug!(skipped = bundle.skipped, "skipped non-text files");
            }
            let name = bundle.root_name.clone();
            let request = AnalyzeFolderRequest {
                files: bundle.files,
                repo_name: Some(name.clone()),
                repo_path: Some(name.clone()),
            };
            (self.backend.analyze_folder(&request).await, name)
        };
        self.finish(AddKind::Local, result, &name, &name)
    }

    /// Post `git_url` to `/add_git_repo` and cache the new repo.
    pub async fn add_git_url(&self, git_url: &str) -> Result<RepoDescriptor, AddError> {
        let git_url = git_url.trim();
        if git_url.is_empty() {
            return Err(AddError::EmptyGitUrl);
        }
        let result = {
            let _guard = self
                .indicator
                .begin(&self.busy, LOADING_MESSAGE)
                .ok_or(AddError::Busy)?;
            self.backend.add_git_repo(git_url).await
        };
        self.finish(AddKind::Git, result, git_repo_name(git_url), git_url)
    }

    /// Runs after the loading guard is dropped so log lines never land on
    /// the spinner row.
    fn finish(
        &self,
        kind: AddKind,
        result: Result<AnalyzeResponse, ClientError>,
        fallback_name: &str,
        fallback_path: &str,
    ) -> Result<RepoDescriptor, AddError> {
        let response = result.map_err(|e| failure(kind, e))?;
        let repo = response
            .into_descriptor(fallback_name, fallback_path, kind.source())
            .ok_or_else(|| {
                tracing::error!("backend response carried no repo_id");
                AddError::Analyze(kind.failure_message().to_string())
            })?;
        self.cache.upsert_most_recent(repo.clone())?;
        tracing::info!(repo_id = %repo.id, name = %repo.name, source = %repo.source, "repository added");
        Ok(repo)
    }
}

/// Map a backend failure to the alert the user sees.
fn failure(kind: AddKind, err: ClientError) -> AddError {
    if err.is_network() {
        tracing::debug!(error = %err, "{}", kind.network_message());
        return AddError::Analyze(kind.network_message().to_string());
    }
    let message = err
        .backend_message()
        .filter(|m| !m.is_empty())
        .unwrap_or(kind.failure_message());
    AddError::Analyze(message.to_string())
}

/// Last `/`-separated segment of a git URL.
pub fn git_repo_name(git_url: &str) -> &str {
    git_url.rsplit('/').next().unwrap_or(git_url)
}
