//! AI review results for a whole repository.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Severity of a review issue.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Style,
    /// Anything the backend sends that is not `error` or `style`.
    #[default]
    Warning,
}

/// Lenient: unknown or missing severities become [`Severity::Warning`].
impl<'de> Deserialize<'de> for Severity {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = Option::<String>::deserialize(deserializer)?;
        Ok(match raw.as_deref().map(str::trim) {
            Some("error") => Severity::Error,
            Some("style") => Severity::Style,
            _ => Severity::Warning,
        })
    }
}

impl Severity {
    /// Badge text.
    pub fn badge(self) -> &'static str {
        match self {
            Severity::Error => "ERROR",
            Severity::Style => "STYLE",
            Severity::Warning => "WARNING",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Style => write!(f, "style"),
            Severity::Warning => write!(f, "warning"),
        }
    }
}

/// A single issue raised by the reviewer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Issue {
    pub title: Option<String>,
    pub severity: Severity,
    pub file: Option<String>,
    pub line: Option<i64>,
    pub suggestion: Option<String>,
}

impl Issue {
    pub fn display_title(&self) -> &str {
        match self.title.as_deref() {
            Some(t) if !t.is_empty() => t,
            _ => "Issue",
        }
    }

    /// `path/to/file.py (line 12)`; either half is dropped when unknown.
    pub fn location(&self) -> String {
        let mut out = String::new();
        if let Some(file) = self.file.as_deref().filter(|f| !f.is_empty()) {
            out.push_str(file);
            out.push(' ');
        }
        if let Some(line) = self.line.filter(|&l| l > 0) {
            out.push_str(&format!("(line {line})"));
        }
        out.trim_end().to_string()
    }
}

/// Response of `GET /api/repo/{id}/review`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReviewResult {
    pub summary: Option<String>,
    #[serde(deserialize_with = "super::null_as_default")]
    pub issues: Vec<Issue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}
