//! Shared types used across all modules.
//!
//! Wire and storage shapes for repositories, structure listings, file
//! documentation, reviews and graphs. Every field the backend may omit is
//! optional here so absent data degrades instead of failing to parse.

pub mod file_doc;
pub mod graph;
pub mod repo;
pub mod review;
pub mod structure;

pub use file_doc::{ClassDoc, FileDoc, FunctionDoc};
pub use graph::GraphResponse;
pub use repo::{AnalyzeResponse, RepoDescriptor, RepoSource, RepoSummary};
pub use review::{Issue, ReviewResult, Severity};
pub use structure::{FileEntry, RepoStructure};

use serde::{Deserialize, Deserializer};

/// Treat an explicit JSON `null` the same as a missing field.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
