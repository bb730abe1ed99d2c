//! Blocking loading indicator for long backend calls.
//!
//! Shows a single spinner line on stderr while a repository is analyzed,
//! and marks the add-repo affordance busy so a second add is refused until
//! the first one settles. Silenced when stderr is not a terminal.

use std::io::{self, Write};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use colored::Colorize;

const FRAMES: &[&str] = &["◐", "◓", "◑", "◒"];
const TICK: Duration = Duration::from_millis(120);

/// A one-line spinner on stderr.
///
/// Cheap to share; the ticker task holds its own handle to the state.
pub struct LoadingIndicator {
    inner: Arc<Mutex<IndicatorState>>,
    /// If false, nothing is printed but state is still tracked.
    enabled: bool,
}

#[derive(Default)]
struct IndicatorState {
    message: Option<String>,
    frame: usize,
    rendered: bool,
    ticker: Option<tokio::task::JoinHandle<()>>,
}

impl LoadingIndicator {
    pub fn new(enabled: bool) -> Self {
        Self {
            inner: Arc::new(Mutex::new(IndicatorState::default())),
            enabled,
        }
    }

    /// Show `message` with an animated spinner until [`hide`](Self::hide).
    pub fn show(&self, message: &str) {
        let mut state = lock(&self.inner);
        state.message = Some(message.to_string());
        state.frame = 0;
        if !self.enabled {
            return;
        }
        Self::render(&mut state);

        if state.ticker.is_none() {
            if let Ok(handle) = tokio::runtime::Handle::try_current() {
                let shared = Arc::clone(&self.inner);
                state.ticker = Some(handle.spawn(async move {
                    loop {
                        tokio::time::sleep(TICK).await;
                        let mut state = lock(&shared);
                        if state.message.is_none() {
                            break;
                        }
                        state.frame = (state.frame + 1) % FRAMES.len();
                        Self::render(&mut state);
                    }
                }));
            }
        }
    }

    /// Remove the spinner line.
    pub fn hide(&self) {
        let mut state = lock(&self.inner);
        state.message = None;
        if let Some(ticker) = state.ticker.take() {
            ticker.abort();
        }
        if state.rendered {
            Self::clear_line();
            state.rendered = false;
        }
    }

    pub fn is_visible(&self) -> bool {
        lock(&self.inner).message.is_some()
    }

    /// Show the indicator and claim `busy` for the lifetime of the guard.
    ///
    /// Returns `None` if `busy` is already claimed.
    pub fn begin<'a>(&'a self, busy: &'a AtomicBool, message: &str) -> Option<LoadingGuard<'a>> {
        if busy
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            return None;
        }
        self.show(message);
        Some(LoadingGuard {
            indicator: self,
            busy,
        })
    }

    fn render(state: &mut IndicatorState) {
        let Some(message) = state.message.as_deref() else {
            return;
        };
        let stderr = io::stderr();
        let mut handle = stderr.lock();
        let _ = write!(
            handle,
            "\r\x1b[2K  {} {}",
            FRAMES[state.frame].cyan().bold(),
            message.cyan()
        );
        let _ = handle.flush();
        state.rendered = true;
    }

    fn clear_line() {
        let stderr = io::stderr();
        let mut handle = stderr.lock();
        let _ = write!(handle, "\r\x1b[2K");
        let _ = handle.flush();
    }
}

fn lock(inner: &Mutex<IndicatorState>) -> std::sync::MutexGuard<'_, IndicatorState> {
    inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Hides the indicator and releases the busy flag when dropped, whatever
/// way the guarded request ended.
pub struct LoadingGuard<'a> {
    indicator: &'a LoadingIndicator,
    busy: &'a AtomicBool,
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        self.indicator.hide();
        self.busy.store(false, Ordering::Release);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn disabled_indicator_tracks_visibility() {
        let indicator = LoadingIndicator::new(false);
        assert!(!indicator.is_visible());
        indicator.show("Analyzing repository...");
        assert!(indicator.is_visible());
        indicator.hide();
        assert!(!indicator.is_visible());
    }

    #[test]
    fn guard_claims_and_releases_busy() {
        let indicator = LoadingIndicator::new(false);
        let busy = AtomicBool::new(false);

        let guard = indicator.begin(&busy, "Analyzing repository...").unwrap();
        assert!(busy.load(Ordering::Acquire));
        assert!(indicator.is_visible());
        assert!(indicator.begin(&busy, "again").is_none());

        drop(guard);
        assert!(!busy.load(Ordering::Acquire));
        assert!(!indicator.is_visible());
    }

    #[test]
    fn guard_releases_on_early_return() {
        fn failing(indicator: &LoadingIndicator, busy: &AtomicBool) -> Result<(), &'static str> {
            let _guard = indicator.begin(busy, "work").ok_or("busy")?;
            Err("backend said no")
        }

        let indicator = LoadingIndicator::new(false);
        let busy = AtomicBool::new(false);
        assert!(failing(&indicator, &busy).is_err());
        assert!(!busy.load(Ordering::Acquire));
        assert!(!indicator.is_visible());
    }

    #[tokio::test]
    async fn enabled_indicator_stops_ticking_after_hide() {
        let indicator = LoadingIndicator::new(true);
        indicator.show("Analyzing repository...");
        tokio::time::sleep(Duration::from_millis(150)).await;
        indicator.hide();
        assert!(!indicator.is_visible());
        assert!(lock(&indicator.inner).ticker.is_none());
    }
}
