//! reqwest-based [`BackendApi`] implementation.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Serialize;
use serde::de::DeserializeOwned;

use super::{AddGitRequest, AnalyzeFolderRequest, BackendApi, ClientError};
use crate::config::ServerConfig;
use crate::models::{AnalyzeResponse, FileDoc, GraphResponse, RepoStructure, ReviewResult};

/// HTTP client for the documentation backend.
pub struct HttpBackend {
    client: reqwest::Client,
    base_url: String,
    delete_timeout: Duration,
}

impl HttpBackend {
    /// Build a client for `base_url` (scheme + host, optional path prefix).
    pub fn new(base_url: &str, timeout: Duration, delete_timeout: Duration) -> Result<Self, ClientError> {
        let parsed = reqwest::Url::parse(base_url)
            .map_err(|_| ClientError::InvalidUrl(base_url.to_string()))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ClientError::InvalidUrl(base_url.to_string()));
        }

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(format!(
                "{}/{}",
                crate::constants::APP_NAME,
                crate::constants::VERSION
            ))
            .build()
            .map_err(|e| ClientError::Transport {
                url: base_url.to_string(),
                source: e,
            })?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            delete_timeout,
        })
    }

    pub fn from_config(server: &ServerConfig) -> Result<Self, ClientError> {
        Self::new(&server.url, server.timeout(), server.delete_timeout())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// `/api/repo/{id}{tail}` with the id percent-encoded as one segment.
    fn repo_url(&self, repo_id: &str, tail: &str) -> String {
        self.url(&format!("/api/repo/{}{tail}", urlencoding::encode(repo_id)))
    }

    /// GET a JSON resource. The status is ignored when the body parses,
    /// since view payloads carry their own `error` field.
    async fn get_json<T: DeserializeOwned>(&self, url: String) -> Result<T, ClientError> {
        tracing::debug!(%url, "GET");
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| ClientError::Transport {
                url: url.clone(),
                source: e,
            })?;
        let (status, body) = read_body(&url, response).await?;

        match serde_json::from_str(&body) {
            Ok(value) => Ok(value),
            Err(_) if !status.is_success() => Err(ClientError::Status {
                status: status.as_u16(),
                message: None,
            }),
            Err(e) => Err(ClientError::Decode {
                url,
                reason: e.to_string(),
            }),
        }
    }

    /// POST to an analysis endpoint; any failure signal becomes `Err`.
    async fn post_analyze<B: Serialize + ?Sized>(
        &self,
        url: String,
        body: &B,
    ) -> Result<AnalyzeResponse, ClientError> {
        tracing::debug!(%url, "POST");
        let response = self
            .client
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(|e| ClientError::Transport {
                url: url.clone(),
                source: e,
            })?;
        let (status, text) = read_body(&url, response).await?;
        let parsed = serde_json::from_str::<AnalyzeResponse>(&text);

        if !status.is_success() {
            return Err(ClientError::Status {
                status: status.as_u16(),
                message: parsed.ok().and_then(|r| r.error),
            });
        }

        let analyzed = parsed.map_err(|e| ClientError::Decode {
            url,
            reason: e.to_string(),
        })?;
        if let Some(error) = analyzed.error.clone() {
            return Err(ClientError::Backend(error));
        }
        Ok(analyzed)
    }
}

async fn read_body(url: &str, response: reqwest::Response) -> Result<(StatusCode, String), ClientError> {
    let status = response.status();
    let body = response.text().await.map_err(|e| ClientError::Transport {
        url: url.to_string(),
        source: e,
    })?;
    Ok((status, body))
}

#[async_trait]
impl BackendApi for HttpBackend {
    async fn analyze_folder(&self, request: &AnalyzeFolderRequest) -> Result<AnalyzeResponse, ClientError> {
        self.post_analyze(self.url("/generate"), request).await
    }

    async fn add_git_repo(&self, git_url: &str) -> Result<AnalyzeResponse, ClientError> {
        self.post_analyze(self.url("/add_git_repo"), &AddGitRequest { git_url })
            .await
    }

    async fn delete_repo(&self, repo_id: &str) -> Result<(), ClientError> {
        let url = self.repo_url(repo_id, "");
        tracing::debug!(%url, "DELETE");
        let response = self
            .client
            .delete(&url)
            .timeout(self.delete_timeout)
            .send()
            .await
            .map_err(|e| ClientError::Transport {
                url: url.clone(),
                source: e,
            })?;
        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(ClientError::Status {
                status: status.as_u16(),
                message: None,
            })
        }
    }

    async fn structure(&self, repo_id: &str) -> Result<RepoStructure, ClientError> {
        self.get_json(self.repo_url(repo_id, "/structure")).await
    }

    async fn review(&self, repo_id: &str) -> Result<ReviewResult, ClientError> {
        self.get_json(self.repo_url(repo_id, "/review")).await
    }

    async fn file_doc(&self, repo_id: &str, path: &str) -> Result<FileDoc, ClientError> {
        let tail = format!("/file/{}", urlencoding::encode(path));
        self.get_json(self.repo_url(repo_id, &tail)).await
    }

    async fn graph(&self, repo_id: &str) -> Result<GraphResponse, ClientError> {
        self.get_json(self.repo_url(repo_id, "/graph")).await
    }
}
