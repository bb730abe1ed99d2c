//! Share the app link: platform share, then clipboard, then a manual
//! copy prompt.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use thiserror::Error;

use crate::constants::{SHARE_TEXT, SHARE_TITLE};

/// Upper bound on how long an interactive share command may run.
const SHARE_TIMEOUT: Duration = Duration::from_secs(120);

/// How long a copied link is kept on a clipboard that dies with the process.
pub const CLIPBOARD_HOLD: Duration = Duration::from_secs(30);

/// X11 and Wayland selections are served by the owning process; they are
/// gone once it exits unless a clipboard manager takes them over.
pub const HOLDS_CLIPBOARD: bool = cfg!(all(
    unix,
    not(any(target_os = "macos", target_os = "android", target_os = "emscripten"))
));

#[derive(Error, Debug)]
pub enum ShareError {
    #[error("share command is empty")]
    EmptyCommand,

    #[error("failed to run share command '{program}': {source}")]
    Spawn {
        program: String,
        source: std::io::Error,
    },

    #[error("share command exited with {0}")]
    Exit(std::process::ExitStatus),

    #[error("share command timed out after {}s", .0.as_secs())]
    Timeout(Duration),

    #[error("clipboard unavailable: {0}")]
    Clipboard(String),
}

/// What gets shared.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SharePayload {
    pub title: String,
    pub text: String,
    pub url: String,
}

impl SharePayload {
    /// The standard app payload pointing at `url`.
    pub fn app_link(url: impl Into<String>) -> Self {
        Self {
            title: SHARE_TITLE.to_string(),
            text: SHARE_TEXT.to_string(),
            url: url.into(),
        }
    }
}

/// OS-level share capability.
#[async_trait]
pub trait PlatformShare: Send + Sync {
    /// Hand the payload to the platform. `Err` covers failure and
    /// cancellation alike.
    async fn share(&self, payload: &SharePayload) -> Result<(), ShareError>;
}

/// Clipboard capability.
pub trait ClipboardSink {
    fn set_text(&mut self, text: &str) -> Result<(), ShareError>;

    /// Keep serving `text` until another owner takes the clipboard or
    /// `until` passes. Blocks.
    fn hold(&mut self, _text: &str, _until: Instant) -> Result<(), ShareError> {
        Ok(())
    }
}

/// Share through an external command such as `termux-share {url}`.
///
/// The template is split on whitespace and `{url}`, `{title}` and
/// `{text}` are substituted per argument; no shell is involved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandShare {
    program: String,
    args: Vec<String>,
}

impl CommandShare {
    pub fn from_template(template: &str) -> Result<Self, ShareError> {
        let mut parts = template.split_whitespace().map(str::to_string);
        let program = parts.next().ok_or(ShareError::EmptyCommand)?;
        Ok(Self {
            program,
            args: parts.collect(),
        })
    }

    fn expand_args(&self, payload: &SharePayload) -> Vec<String> {
        self.args
            .iter()
            .map(|arg| {
                arg.replace("{url}", &payload.url)
                    .replace("{title}", &payload.title)
                    .replace("{text}", &payload.text)
            })
            .collect()
    }
}

#[async_trait]
impl PlatformShare for CommandShare {
    async fn share(&self, payload: &SharePayload) -> Result<(), ShareError> {
        let args = self.expand_args(payload);
        tracing::debug!(program = %self.program, ?args, "running share command");
        let status = tokio::time::timeout(
            SHARE_TIMEOUT,
            tokio::process::Command::new(&self.program).args(&args).status(),
        )
        .await
        .map_err(|_| ShareError::Timeout(SHARE_TIMEOUT))?
        .map_err(|source| ShareError::Spawn {
            program: self.program.clone(),
            source,
        })?;

        if status.success() {
            Ok(())
        } else {
            Err(ShareError::Exit(status))
        }
    }
}

/// System clipboard via `arboard`.
pub struct SystemClipboard {
    inner: arboard::Clipboard,
}

impl SystemClipboard {
    pub fn new() -> Result<Self, ShareError> {
        let inner = arboard::Clipboard::new().map_err(|e| ShareError::Clipboard(e.to_string()))?;
        Ok(Self { inner })
    }
}

impl ClipboardSink for SystemClipboard {
    fn set_text(&mut self, text: &str) -> Result<(), ShareError> {
        self.inner
            .set_text(text.to_string())
            .map_err(|e| ShareError::Clipboard(e.to_string()))
    }

    #[cfg(all(unix, not(any(target_os = "macos", target_os = "android", target_os = "emscripten"))))]
    fn hold(&mut self, text: &str, until: Instant) -> Result<(), ShareError> {
        use arboard::SetExtLinux;

        self.inner
            .set()
            .wait_until(until)
            .text(text.to_string())
            .map_err(|e| ShareError::Clipboard(e.to_string()))
    }
}

/// Which step of the fallback chain delivered the link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShareOutcome {
    Shared,
    Copied(String),
    /// Neither platform share nor clipboard worked; the user copies by hand.
    Manual(String),
}

impl ShareOutcome {
    /// Line shown to the user.
    pub fn message(&self) -> Option<String> {
        match self {
            ShareOutcome::Shared => None,
            ShareOutcome::Copied(url) => Some(format!("Copied link to clipboard: {url}")),
            ShareOutcome::Manual(url) => Some(format!("Copy link: {url}")),
        }
    }
}

/// Try platform share, then the clipboard, then fall back to a manual copy.
pub async fn share_link(
    payload: &SharePayload,
    platform: Option<&dyn PlatformShare>,
    clipboard: Option<&mut dyn ClipboardSink>,
) -> ShareOutcome {
    if let Some(platform) = platform {
        match platform.share(payload).await {
            Ok(()) => return ShareOutcome::Shared,
            Err(e) => tracing::info!(error = %e, "share failed or was cancelled"),
        }
    }

    if let Some(clipboard) = clipboard {
        match clipboard.set_text(&payload.url) {
            Ok(()) => return ShareOutcome::Copied(payload.url.clone()),
            Err(e) => tracing::info!(error = %e, "clipboard write failed"),
        }
    }

    ShareOutcome::Manual(payload.url.clone())
}

/// Keep a copied link on the clipboard until `until`. A link that cannot
/// be held is handed to the user as a manual copy instead.
pub fn hold_copied(
    outcome: ShareOutcome,
    clipboard: Option<&mut dyn ClipboardSink>,
    until: Instant,
) -> ShareOutcome {
    match (outcome, clipboard) {
        (ShareOutcome::Copied(url), Some(clipboard)) => match clipboard.hold(&url, until) {
            Ok(()) => ShareOutcome::Copied(url),
            Err(e) => {
                tracing::info!(error = %e, "clipboard could not be held");
                ShareOutcome::Manual(url)
            }
        },
        (outcome, _) => outcome,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct FakeShare {
        ok: bool,
        calls: AtomicUsize,
    }

    #[async_trait]
    impl PlatformShare for FakeShare {
        async fn share(&self, _payload: &SharePayload) -> Result<(), ShareError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.ok {
                Ok(())
            } else {
                Err(ShareError::EmptyCommand)
            }
        }
    }

    #[derive(Default)]
    struct FakeClipboard {
        fail: bool,
        fail_hold: bool,
        content: Option<String>,
        held: Option<String>,
    }

    impl ClipboardSink for FakeClipboard {
        fn set_text(&mut self, text: &str) -> Result<(), ShareError> {
            if self.fail {
                return Err(ShareError::Clipboard("no display".into()));
            }
            self.content = Some(text.to_string());
            Ok(())
        }

        fn hold(&mut self, text: &str, _until: Instant) -> Result<(), ShareError> {
            if self.fail_hold {
                return Err(ShareError::Clipboard("selection lost".into()));
            }
            self.held = Some(text.to_string());
            Ok(())
        }
    }

    fn payload() -> SharePayload {
        SharePayload::app_link("http://127.0.0.1:5000")
    }

    #[tokio::test]
    async fn platform_share_wins() {
        let share = FakeShare {
            ok: true,
            calls: AtomicUsize::new(0),
        };
        let mut clipboard = FakeClipboard::default();
        let outcome = share_link(&payload(), Some(&share), Some(&mut clipboard)).await;
        assert_eq!(outcome, ShareOutcome::Shared);
        assert_eq!(outcome.message(), None);
        assert!(clipboard.content.is_none());
    }

    #[tokio::test]
    async fn failed_share_falls_back_to_clipboard() {
        let share = FakeShare {
            ok: false,
            calls: AtomicUsize::new(0),
        };
        let mut clipboard = FakeClipboard::default();
        let outcome = share_link(&payload(), Some(&share), Some(&mut clipboard)).await;
        assert_eq!(share.calls.load(Ordering::SeqCst), 1);
        assert_eq!(clipboard.content.as_deref(), Some("http://127.0.0.1:5000"));
        assert_eq!(
            outcome.message().as_deref(),
            Some("Copied link to clipboard: http://127.0.0.1:5000")
        );
    }

    #[tokio::test]
    async fn no_share_and_broken_clipboard_is_manual() {
        let mut clipboard = FakeClipboard {
            fail: true,
            ..Default::default()
        };
        let outcome = share_link(&payload(), None, Some(&mut clipboard)).await;
        assert_eq!(outcome, ShareOutcome::Manual("http://127.0.0.1:5000".into()));
        assert_eq!(
            outcome.message().as_deref(),
            Some("Copy link: http://127.0.0.1:5000")
        );
    }

    #[tokio::test]
    async fn nothing_available_is_manual() {
        let outcome = share_link(&payload(), None, None).await;
        assert!(matches!(outcome, ShareOutcome::Manual(_)));
    }

    #[tokio::test]
    async fn copied_link_is_held_after_copy() {
        let mut clipboard = FakeClipboard::default();
        let outcome = share_link(&payload(), None, Some(&mut clipboard)).await;
        let outcome = hold_copied(outcome, Some(&mut clipboard), Instant::now());
        assert_eq!(outcome, ShareOutcome::Copied("http://127.0.0.1:5000".into()));
        assert_eq!(clipboard.held.as_deref(), Some("http://127.0.0.1:5000"));
    }

    #[tokio::test]
    async fn link_that_cannot_be_held_becomes_manual() {
        let mut clipboard = FakeClipboard {
            fail_hold: true,
            ..Default::default()
        };
        let outcome = share_link(&payload(), None, Some(&mut clipboard)).await;
        assert!(matches!(outcome, ShareOutcome::Copied(_)));

        let outcome = hold_copied(outcome, Some(&mut clipboard), Instant::now());
        assert_eq!(
            outcome.message().as_deref(),
            Some("Copy link: http://127.0.0.1:5000")
        );
    }

    #[test]
    fn only_copied_links_are_held() {
        let mut clipboard = FakeClipboard::default();
        let outcome = hold_copied(ShareOutcome::Shared, Some(&mut clipboard), Instant::now());
        assert_eq!(outcome, ShareOutcome::Shared);
        let outcome = hold_copied(
            ShareOutcome::Manual("u".into()),
            Some(&mut clipboard),
            Instant::now(),
        );
        assert_eq!(outcome, ShareOutcome::Manual("u".into()));
        assert!(clipboard.held.is_none());
    }

    #[test]
    fn template_substitutes_per_argument() {
        let cmd = CommandShare::from_template("share-tool --title {title} --url {url}").unwrap();
        let args = cmd.expand_args(&payload());
        assert_eq!(cmd.program, "share-tool");
        assert_eq!(
            args,
            vec![
                "--title".to_string(),
                SHARE_TITLE.to_string(),
                "--url".to_string(),
                "http://127.0.0.1:5000".to_string(),
            ]
        );
    }

    #[test]
    fn blank_template_is_rejected() {
        assert!(matches!(
            CommandShare::from_template("   "),
            Err(ShareError::EmptyCommand)
        ));
    }

    #[tokio::test]
    async fn command_share_reports_exit_status() {
        let ok = CommandShare::from_template("true").unwrap();
        assert!(ok.share(&payload()).await.is_ok());

        let cancelled = CommandShare::from_template("false").unwrap();
        assert!(matches!(
            cancelled.share(&payload()).await,
            Err(ShareError::Exit(_))
        ));

        let missing = CommandShare::from_template("codewiki-no-such-share-tool {url}").unwrap();
        assert!(matches!(
            missing.share(&payload()).await,
            Err(ShareError::Spawn { .. })
        ));
    }
}
