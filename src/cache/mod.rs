//! Recently opened repositories.
//!
//! A bounded, most-recent-first list of [`RepoDescriptor`]s persisted
//! between runs. At most [`MAX_RECENT_REPOS`] entries, unique by id.

pub mod store;

use crate::client::BackendApi;
use crate::constants::MAX_RECENT_REPOS;
use crate::models::RepoDescriptor;

pub use store::{CacheError, RecentStore};

/// The recent-repository list.
pub struct RecentRepos {
    store: RecentStore,
}

impl RecentRepos {
    pub fn new(store: RecentStore) -> Self {
        Self { store }
    }

    /// Current list, most recent first. Never fails.
    pub fn list(&self) -> Vec<RepoDescriptor> {
        self.store.load()
    }

    /// Move `repo` to the front, replacing any entry with the same id.
    ///
    /// Returns the list as persisted.
    pub fn upsert_most_recent(&self, repo: RepoDescriptor) -> Result<Vec<RepoDescriptor>, CacheError> {
        let list = upsert(self.list(), repo);
        self.store.save(&list)?;
        Ok(list)
    }

    /// Drop `id` from the local list only.
    pub fn remove_local(&self, id: &str) -> Result<Vec<RepoDescriptor>, CacheError> {
        let list: Vec<_> = self.list().into_iter().filter(|r| r.id != id).collect();
        self.store.save(&list)?;
        Ok(list)
    }

    /// Drop `id` locally, then ask the backend to forget it too.
    ///
    /// The backend call is best-effort: a failure is logged and the local
    /// removal stands.
    pub async fn remove(
        &self,
        id: &str,
        backend: &dyn BackendApi,
    ) -> Result<Vec<RepoDescriptor>, CacheError> {
        let list = self.remove_local(id)?;
        if let Err(e) = backend.delete_repo(id).await {
            tracing::warn!(repo_id = id, error = %e, "error deleting repo on server");
        }
        Ok(list)
    }

    /// Forget every cached repository.
    pub fn clear(&self) -> Result<bool, CacheError> {
        self.store.clear()
    }

    pub fn path(&self) -> Option<&std::path::Path> {
        self.store.path()
    }
}

/// Prepend `repo`, drop older entries with its id, cap the length.
pub fn upsert(list: Vec<RepoDescriptor>, repo: RepoDescriptor) -> Vec<RepoDescriptor> {
    let mut out = Vec::with_capacity(MAX_RECENT_REPOS);
    let id = repo.id.clone();
    out.push(repo);
    out.extend(list.into_iter().filter(|r| r.id != id));
    out.truncate(MAX_RECENT_REPOS);
    out
}

/// Case-insensitive substring match on name or path.
///
/// An empty query returns the whole list.
pub fn filter_repos(repos: &[RepoDescriptor], query: &str) -> Vec<RepoDescriptor> {
    let q = query.to_lowercase();
    repos
        .iter()
        .filter(|r| r.name.to_lowercase().contains(&q) || r.path.to_lowercase().contains(&q))
        .cloned()
        .collect()
}
