//! App-wide constants.
//!
//! Centralises the tool name, config paths, environment variable names,
//! and user-facing strings so a rename only requires changing this file.

/// Display name of the tool (lowercase).
pub const APP_NAME: &str = "codewiki";

/// Crate version, baked in at compile time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Target triple, exported by `build.rs`.
pub const TARGET: &str = env!("TARGET");

/// Local config filename (e.g. `.codewiki.toml` in the working directory).
pub const CONFIG_FILENAME: &str = ".codewiki.toml";

/// Directory name under `~/.config/` for global config and the recent list.
pub const CONFIG_DIR: &str = "codewiki";

/// File holding the recently opened repositories.
pub const RECENT_FILENAME: &str = "recent_repos.json";

/// Maximum number of repositories kept in the recent list.
pub const MAX_RECENT_REPOS: usize = 9;

/// Backend used when nothing else is configured.
pub const DEFAULT_SERVER_URL: &str = "http://127.0.0.1:5000";

// ── Environment variable names ──────────────────────────────────────

pub const ENV_SERVER: &str = "CODEWIKI_SERVER";
pub const ENV_TIMEOUT: &str = "CODEWIKI_TIMEOUT";
pub const ENV_RECENT_FILE: &str = "CODEWIKI_RECENT_FILE";
pub const ENV_SHARE_COMMAND: &str = "CODEWIKI_SHARE_COMMAND";
pub const ENV_LOG: &str = "CODEWIKI_LOG";

// ── Share text ──────────────────────────────────────────────────────

pub const SHARE_TITLE: &str = "CodeWiki – Explore your code as a wiki";
pub const SHARE_TEXT: &str =
    "Check out CodeWiki – a tool to explore your codebase like a wiki with AI.";
