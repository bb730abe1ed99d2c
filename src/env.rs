//! Environment variable abstraction for testability.
//!
//! Production code uses [`Env::real()`] which delegates to [`std::env::var`].
//! Tests use [`Env::mock()`] backed by a `HashMap`, so config layering can
//! be exercised without touching the process environment.

use std::collections::HashMap;
use std::str::FromStr;

/// Environment variable reader.
#[derive(Clone, Debug, Default)]
pub struct Env {
    overrides: Option<HashMap<String, String>>,
}

impl Env {
    /// Create an `Env` that reads from the real process environment.
    pub fn real() -> Self {
        Self { overrides: None }
    }

    /// Create an `Env` backed by explicit key-value pairs.
    pub fn mock(vars: impl IntoIterator<Item = (impl Into<String>, impl Into<String>)>) -> Self {
        Self {
            overrides: Some(
                vars.into_iter()
                    .map(|(k, v)| (k.into(), v.into()))
                    .collect(),
            ),
        }
    }

    /// Look up a variable, treating blank values as unset.
    pub fn var(&self, name: &str) -> Option<String> {
        let value = match &self.overrides {
            Some(map) => map.get(name).cloned(),
            None => std::env::var(name).ok(),
        }?;
        let trimmed = value.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    }

    /// Look up and parse a variable.
    ///
    /// Returns `None` when unset; `Some(Err(raw))` when present but unparsable
    /// so callers can warn with the offending value.
    pub fn parse<T: FromStr>(&self, name: &str) -> Option<Result<T, String>> {
        let raw = self.var(name)?;
        Some(raw.parse::<T>().map_err(|_| raw))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mock_env_returns_set_values() {
        let env = Env::mock([("CODEWIKI_SERVER", "http://wiki.local")]);
        assert_eq!(env.var("CODEWIKI_SERVER").as_deref(), Some("http://wiki.local"));
        assert!(env.var("CODEWIKI_TIMEOUT").is_none());
    }

    #[test]
    fn blank_values_read_as_unset() {
        let env = Env::mock([("CODEWIKI_SHARE_COMMAND", "   ")]);
        assert!(env.var("CODEWIKI_SHARE_COMMAND").is_none());
    }

    #[test]
    fn parse_reports_raw_value_on_failure() {
        let env = Env::mock([("A", "42"), ("B", "soon")]);
        assert_eq!(env.parse::<u64>("A"), Some(Ok(42)));
        assert_eq!(env.parse::<u64>("B"), Some(Err("soon".to_string())));
        assert_eq!(env.parse::<u64>("C"), None);
    }

    #[test]
    fn real_env_reads_cargo_manifest_dir() {
        assert!(Env::real().var("CARGO_MANIFEST_DIR").is_some());
    }
}
