//! Shared test doubles for integration tests.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::sync::Notify;

use codewiki::client::{AnalyzeFolderRequest, BackendApi, ClientError};
use codewiki::models::{AnalyzeResponse, FileDoc, GraphResponse, RepoDescriptor, RepoSource, RepoStructure, ReviewResult};

/// Canned outcome of one backend call.
#[derive(Debug, Clone)]
pub enum Canned<T> {
    Ok(T),
    /// HTTP success with an `error` field.
    Backend(String),
    /// Non-success status, optionally with an `error` field.
    Status(u16, Option<String>),
    /// No usable response.
    Network,
}

impl<T: Clone> Canned<T> {
    fn produce(&self, url: &str) -> Result<T, ClientError> {
        match self {
            Canned::Ok(value) => Ok(value.clone()),
            Canned::Backend(message) => Err(ClientError::Backend(message.clone())),
            Canned::Status(status, message) => Err(ClientError::Status {
                status: *status,
                message: message.clone(),
            }),
            Canned::Network => Err(ClientError::Decode {
                url: url.to_string(),
                reason: "connection reset".to_string(),
            }),
        }
    }
}

/// A [`BackendApi`] returning canned responses and recording every call.
pub struct MockBackend {
    pub analyze: Canned<AnalyzeResponse>,
    pub add_git: Canned<AnalyzeResponse>,
    pub delete: Canned<()>,
    pub structure: Canned<RepoStructure>,
    pub review: Canned<ReviewResult>,
    pub file_doc: Canned<FileDoc>,
    pub graph: Canned<GraphResponse>,
    /// When set, analysis calls wait for a notification before answering.
    pub gate: Option<Arc<Notify>>,
    pub calls: Mutex<Vec<String>>,
    pub folder_requests: Mutex<Vec<AnalyzeFolderRequest>>,
}

impl Default for MockBackend {
    fn default() -> Self {
        Self {
            analyze: Canned::Ok(analyzed("x1")),
            add_git: Canned::Ok(analyzed("g1")),
            delete: Canned::Ok(()),
            structure: Canned::Ok(RepoStructure::default()),
            review: Canned::Ok(ReviewResult::default()),
            file_doc: Canned::Ok(FileDoc::default()),
            graph: Canned::Ok(GraphResponse::default()),
            gate: None,
            calls: Mutex::new(Vec::new()),
            folder_requests: Mutex::new(Vec::new()),
        }
    }
}

impl MockBackend {
    /// Calls in order, e.g. `structure r1`, `file r1 src/app.py`.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn folder_requests(&self) -> Vec<AnalyzeFolderRequest> {
        self.folder_requests.lock().unwrap().clone()
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }

    async fn wait_gate(&self) {
        if let Some(gate) = &self.gate {
            gate.notified().await;
        }
    }
}

#[async_trait]
impl BackendApi for MockBackend {
    async fn analyze_folder(&self, request: &AnalyzeFolderRequest) -> Result<AnalyzeResponse, ClientError> {
        self.record("generate".to_string());
        self.folder_requests.lock().unwrap().push(request.clone());
        self.wait_gate().await;
        self.analyze.produce("/generate")
    }

    async fn add_git_repo(&self, git_url: &str) -> Result<AnalyzeResponse, ClientError> {
        self.record(format!("add_git_repo {git_url}"));
        self.wait_gate().await;
        self.add_git.produce("/add_git_repo")
    }

    async fn delete_repo(&self, repo_id: &str) -> Result<(), ClientError> {
        self.record(format!("delete {repo_id}"));
        self.delete.produce("/api/repo")
    }

    async fn structure(&self, repo_id: &str) -> Result<RepoStructure, ClientError> {
        self.record(format!("structure {repo_id}"));
        self.structure.produce("/structure")
    }

    async fn review(&self, repo_id: &str) -> Result<ReviewResult, ClientError> {
        self.record(format!("review {repo_id}"));
        self.review.produce("/review")
    }

    async fn file_doc(&self, repo_id: &str, path: &str) -> Result<FileDoc, ClientError> {
        self.record(format!("file {repo_id} {path}"));
        self.file_doc.produce("/file")
    }

    async fn graph(&self, repo_id: &str) -> Result<GraphResponse, ClientError> {
        self.record(format!("graph {repo_id}"));
        self.graph.produce("/graph")
    }
}

/// A successful analysis response carrying only an id.
pub fn analyzed(id: &str) -> AnalyzeResponse {
    AnalyzeResponse {
        repo_id: Some(id.to_string()),
        ..Default::default()
    }
}

pub fn repo(id: &str, name: &str) -> RepoDescriptor {
    RepoDescriptor {
        id: id.to_string(),
        name: name.to_string(),
        path: name.to_string(),
        summary: None,
        source: RepoSource::Local,
    }
}
