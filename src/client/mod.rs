//! Backend API trait and HTTP integration.
//!
//! Flows and views talk to the documentation backend through
//! [`BackendApi`], so tests can substitute canned responses.

pub mod http;

use async_trait::async_trait;
use indexmap::IndexMap;
use serde::Serialize;
use thiserror::Error;

use crate::models::{AnalyzeResponse, FileDoc, GraphResponse, RepoStructure, ReviewResult};

pub use http::HttpBackend;

/// Errors from backend calls.
#[derive(Error, Debug)]
pub enum ClientError {
    /// The request never produced a response (DNS, refused, timeout, ...).
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        source: reqwest::Error,
    },

    /// Non-success HTTP status. `message` carries the body's `error` field if any.
    #[error("backend returned HTTP {status}{}", .message.as_ref().map(|m| format!(": {m}")).unwrap_or_default())]
    Status { status: u16, message: Option<String> },

    /// HTTP success, but the payload reported an `error`.
    #[error("backend error: {0}")]
    Backend(String),

    /// The body was not the JSON we expected.
    #[error("invalid response from {url}: {reason}")]
    Decode { url: String, reason: String },

    #[error("invalid server URL '{0}'")]
    InvalidUrl(String),
}

impl ClientError {
    /// True for failures where no usable response arrived.
    pub fn is_network(&self) -> bool {
        matches!(self, ClientError::Transport { .. } | ClientError::Decode { .. })
    }

    /// The backend's own message, when it sent one.
    pub fn backend_message(&self) -> Option<&str> {
        match self {
            ClientError::Backend(m) => Some(m),
            ClientError::Status { message, .. } => message.as_deref(),
            _ => None,
        }
    }
}

/// Body of `POST /generate`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AnalyzeFolderRequest {
    /// Relative path (rooted at the folder name) → file content.
    pub files: IndexMap<String, String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repo_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repo_path: Option<String>,
}

/// Body of `POST /add_git_repo`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AddGitRequest<'a> {
    pub git_url: &'a str,
}

/// Documentation backend operations.
///
/// Analysis calls return `Err` for HTTP failures and for payloads carrying
/// an `error` field. View calls return the payload as-is, embedded errors
/// included, so the views can render them inline.
#[async_trait]
pub trait BackendApi: Send + Sync {
    /// `POST /generate`
    async fn analyze_folder(&self, request: &AnalyzeFolderRequest) -> Result<AnalyzeResponse, ClientError>;

    /// `POST /add_git_repo`
    async fn add_git_repo(&self, git_url: &str) -> Result<AnalyzeResponse, ClientError>;

    /// `DELETE /api/repo/{id}`
    async fn delete_repo(&self, repo_id: &str) -> Result<(), ClientError>;

    /// `GET /api/repo/{id}/structure`
    async fn structure(&self, repo_id: &str) -> Result<RepoStructure, ClientError>;

    /// `GET /api/repo/{id}/review`
    async fn review(&self, repo_id: &str) -> Result<ReviewResult, ClientError>;

    /// `GET /api/repo/{id}/file/{path}`
    async fn file_doc(&self, repo_id: &str, path: &str) -> Result<FileDoc, ClientError>;

    /// `GET /api/repo/{id}/graph`
    async fn graph(&self, repo_id: &str) -> Result<GraphResponse, ClientError>;
}

/// Web URL of a repository's wiki page.
pub fn repo_page_url(base_url: &str, repo_id: &str) -> String {
    format!(
        "{}/repo/{}",
        base_url.trim_end_matches('/'),
        urlencoding::encode(repo_id)
    )
}
