//! Repository descriptors and the analysis response they are built from.

use serde::{Deserialize, Deserializer, Serialize};

/// Where an analyzed repository came from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, strum::Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum RepoSource {
    Git,
    #[default]
    Local,
}

/// Anything other than `"git"` (including `null`) counts as local.
impl<'de> Deserialize<'de> for RepoSource {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Option::<String>::deserialize(deserializer)?;
        Ok(match raw.as_deref() {
            Some("git") => RepoSource::Git,
            _ => RepoSource::Local,
        })
    }
}

impl RepoSource {
    /// Badge text shown on repo cards.
    pub fn label(self) -> &'static str {
        match self {
            RepoSource::Git => "Git",
            RepoSource::Local => "Local",
        }
    }
}

/// Processed/failed file counts reported by the backend.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepoSummary {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub processed: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub failed: Option<u64>,
}

/// Cached summary of an analyzed repository. Identity key is `id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepoDescriptor {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub path: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<RepoSummary>,
    #[serde(default)]
    pub source: RepoSource,
}

impl RepoDescriptor {
    /// Processed count, 0 when the backend did not report one.
    pub fn processed(&self) -> u64 {
        self.summary.and_then(|s| s.processed).unwrap_or(0)
    }

    /// Failed count, 0 when the backend did not report one.
    pub fn failed(&self) -> u64 {
        self.summary.and_then(|s| s.failed).unwrap_or(0)
    }
}

/// Response of `POST /generate` and `POST /add_git_repo`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalyzeResponse {
    #[serde(default)]
    pub repo_id: Option<String>,
    #[serde(default)]
    pub repo_name: Option<String>,
    #[serde(default)]
    pub repo_path: Option<String>,
    #[serde(default)]
    pub summary: Option<RepoSummary>,
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

impl AnalyzeResponse {
    /// Build the descriptor to cache, filling gaps from the request side.
    ///
    /// Returns `None` when the backend did not hand back an id.
    pub fn into_descriptor(
        self,
        fallback_name: &str,
        fallback_path: &str,
        fallback_source: RepoSource,
    ) -> Option<RepoDescriptor> {
        let id = self.repo_id.filter(|id| !id.is_empty())?;
        let source = match self.source.as_deref() {
            Some("git") => RepoSource::Git,
            Some(_) => RepoSource::Local,
            None => fallback_source,
        };
        Some(RepoDescriptor {
            id,
            name: self
                .repo_name
                .filter(|n| !n.is_empty())
                .unwrap_or_else(|| fallback_name.to_string()),
            path: self
                .repo_path
                .filter(|p| !p.is_empty())
                .unwrap_or_else(|| fallback_path.to_string()),
            summary: self.summary,
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_take_defaults() {
        let repo: RepoDescriptor = serde_json::from_str(r#"{"id":"a","name":"Foo"}"#).unwrap();
        assert_eq!(repo.path, "");
        assert_eq!(repo.processed(), 0);
        assert_eq!(repo.failed(), 0);
        assert_eq!(repo.source, RepoSource::Local);
    }

    #[test]
    fn partial_summary_defaults_missing_count() {
        let repo: RepoDescriptor =
            serde_json::from_str(r#"{"id":"a","summary":{"processed":3}}"#).unwrap();
        assert_eq!(repo.processed(), 3);
        assert_eq!(repo.failed(), 0);
    }

    #[test]
    fn unknown_or_null_source_is_local() {
        let repo: RepoDescriptor =
            serde_json::from_str(r#"{"id":"a","source":"svn"}"#).unwrap();
        assert_eq!(repo.source, RepoSource::Local);
        let repo: RepoDescriptor = serde_json::from_str(r#"{"id":"a","source":null}"#).unwrap();
        assert_eq!(repo.source, RepoSource::Local);
        let repo: RepoDescriptor = serde_json::from_str(r#"{"id":"a","source":"git"}"#).unwrap();
        assert_eq!(repo.source, RepoSource::Git);
    }

    #[test]
    fn source_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&RepoSource::Git).unwrap(), "\"git\"");
        assert_eq!(RepoSource::Local.to_string(), "local");
        assert_eq!(RepoSource::Git.label(), "Git");
    }

    #[test]
    fn analyze_response_fills_fallbacks() {
        let resp: AnalyzeResponse =
            serde_json::from_str(r#"{"repo_id":"x1","summary":{"processed":5,"failed":1}}"#)
                .unwrap();
        let repo = resp
            .into_descriptor("proj", "proj", RepoSource::Local)
            .unwrap();
        assert_eq!(repo.id, "x1");
        assert_eq!(repo.name, "proj");
        assert_eq!(repo.path, "proj");
        assert_eq!(repo.processed(), 5);
        assert_eq!(repo.failed(), 1);
        assert_eq!(repo.source, RepoSource::Local);
    }

    #[test]
    fn analyze_response_prefers_backend_values() {
        let resp = AnalyzeResponse {
            repo_id: Some("r9".into()),
            repo_name: Some("server-name".into()),
            repo_path: Some("/srv/repos/r9".into()),
            source: Some("git".into()),
            ..Default::default()
        };
        let repo = resp
            .into_descriptor("client", "client", RepoSource::Local)
            .unwrap();
        assert_eq!(repo.name, "server-name");
        assert_eq!(repo.path, "/srv/repos/r9");
        assert_eq!(repo.source, RepoSource::Git);
    }

    #[test]
    fn analyze_response_without_id_is_rejected() {
        let resp = AnalyzeResponse::default();
        assert!(resp.into_descriptor("a", "a", RepoSource::Git).is_none());
    }
}
