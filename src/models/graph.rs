//! Whole-repository dependency graph.

use serde::{Deserialize, Serialize};

/// Response of `GET /api/repo/{id}/graph`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GraphResponse {
    /// SVG markup rendered by Graphviz on the server.
    pub diagram: Option<String>,
    pub error: Option<String>,
    /// Lower-level diagnostic paired with `error`.
    pub graphviz_error: Option<String>,
}

impl GraphResponse {
    /// Alert text when the backend reported an error, e.g.
    /// `Graph render failed: syntax error in line 3`.
    pub fn alert(&self) -> Option<String> {
        let error = self.error.as_deref()?;
        Some(match self.graphviz_error.as_deref() {
            Some(detail) => format!("{error}: {detail}"),
            None => error.to_string(),
        })
    }
}
